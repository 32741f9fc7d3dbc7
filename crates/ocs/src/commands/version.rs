//! `ocs version` -- print version, build info, and platform.

use anyhow::Result;
use serde::Serialize;

use crate::context::RuntimeContext;
use crate::output::output_json;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build identifier, overridable with `OCS_BUILD` at compile time.
const BUILD: &str = match option_env!("OCS_BUILD") {
    Some(b) => b,
    None => "dev",
};

#[derive(Serialize)]
struct VersionInfo {
    version: &'static str,
    build: &'static str,
    os: &'static str,
    arch: &'static str,
}

impl VersionInfo {
    fn current() -> Self {
        Self {
            version: VERSION,
            build: BUILD,
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
        }
    }
}

/// Execute the `ocs version` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let info = VersionInfo::current();
    if ctx.json {
        output_json(&info);
    } else {
        println!(
            "ocs version {} ({}) {}/{}",
            info.version, info.build, info.os, info.arch
        );
    }
    Ok(())
}
