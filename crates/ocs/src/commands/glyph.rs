//! `ocs glyph` -- look up glyphs by index and indices by glyph.

use anyhow::{Result, bail};
use ocs_core::consts::MAX_SYMBOL;
use ocs_core::symbol::{AttrSet, decode_attrs, decode_glyph, encode_glyph};
use serde::Serialize;

use crate::cli::GlyphArgs;
use crate::context::RuntimeContext;
use crate::output::{LEGEND_HEADERS, legend_rows, output_json, output_table};

#[derive(Debug, Serialize)]
struct GlyphView {
    index: u8,
    glyph: char,
    attrs: AttrSet,
}

/// Resolve one key to a symbol index.
///
/// Keys that parse as integers are indices, so the digit glyphs can only be
/// looked up through their index.
fn resolve_key(key: &str) -> Result<u8> {
    if let Ok(n) = key.parse::<u32>() {
        if n as usize >= MAX_SYMBOL {
            bail!("symbol index {} out of range (0-{})", n, MAX_SYMBOL - 1);
        }
        return Ok(n as u8);
    }
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => match decode_glyph(c) {
            Some(index) => Ok(index),
            None => bail!("'{}' is not a symbol glyph", c),
        },
        _ => bail!("expected a symbol index or a single glyph, got '{}'", key),
    }
}

/// Execute the `ocs glyph` command.
pub fn run(ctx: &RuntimeContext, args: &GlyphArgs) -> Result<()> {
    let config = ctx.load_config()?;
    let indices = args
        .keys
        .iter()
        .map(|k| resolve_key(k))
        .collect::<Result<Vec<u8>>>()?;

    if ctx.wants_json(&config) {
        let views: Vec<GlyphView> = indices
            .iter()
            .map(|&index| GlyphView {
                index,
                glyph: encode_glyph(index),
                attrs: decode_attrs(index),
            })
            .collect();
        output_json(&views);
    } else {
        output_table(&LEGEND_HEADERS, &legend_rows(indices));
    }
    Ok(())
}
