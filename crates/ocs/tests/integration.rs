//! End-to-end CLI integration tests for the `ocs` binary.
//!
//! Each test writes its payloads into its own temporary directory and runs
//! the `ocs` binary as a subprocess via `assert_cmd`.

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a `Command` targeting the cargo-built `ocs` binary, isolated from
/// the caller's configuration and without color.
fn ocs(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ocs").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("OCS_DIR")
        .env_remove("CLICOLOR_FORCE")
        .env("NO_COLOR", "1");
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

/// Write a game with one good goal, one malformed goal and a short history.
fn write_game(tmp: &TempDir) {
    std::fs::write(
        tmp.path().join("details.json"),
        r#"{"count":3,"accepted":2,"next":1,"attrs":[3,8],"type":1}"#,
    )
    .unwrap();
    // [< attr[0] 5] holds; [12288] sets both tag bits.
    std::fs::write(
        tmp.path().join("params.json"),
        r#"{"type":1,"p":[0.5,0.5],"Q":[1,0,0,1],"goals":[[8196,4096,5],[12288]]}"#,
    )
    .unwrap();
    std::fs::write(
        tmp.path().join("symbols.json"),
        r#"{"count":3,"symbols":[133,5,129]}"#,
    )
    .unwrap();
}

// ---------------------------------------------------------------------------
// goal
// ---------------------------------------------------------------------------

#[test]
fn goal_prints_every_step() {
    let tmp = TempDir::new().unwrap();
    ocs(&tmp)
        .args(["goal", "--attrs", "3", "<", "attr[0]", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("< attr[0] 5"))
        .stdout(predicate::str::contains("\u{2192} < 3 5"))
        .stdout(predicate::str::contains("\u{2192} 1"))
        .stdout(predicate::str::contains("true"));
}

#[test]
fn goal_infix_form_reduces() {
    let tmp = TempDir::new().unwrap();
    ocs(&tmp)
        .args(["goal", "--attrs", "3", "@0", "<", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 < 5"))
        .stdout(predicate::str::contains("true"));
}

#[test]
fn goal_json_has_trace_and_result() {
    let tmp = TempDir::new().unwrap();
    let json = json_stdout(ocs(&tmp).args(["goal", "--json", "--attrs", "3", "8196", "4096", "5"]));
    assert_eq!(json["formula"], serde_json::json!([8196, 4096, 5]));
    assert_eq!(
        json["trace"],
        serde_json::json!(["< attr[0] 5", "< 3 5", "1"])
    );
    assert_eq!(json["result"], true);
}

#[test]
fn goal_quiet_prints_only_result() {
    let tmp = TempDir::new().unwrap();
    ocs(&tmp)
        .args(["goal", "-q", "--attrs", "3", ">=", "attr[0]", "5"])
        .assert()
        .success()
        .stdout("false\n");
}

#[test]
fn goal_unknown_operator_is_not_fatal() {
    let tmp = TempDir::new().unwrap();
    ocs(&tmp)
        .args(["goal", "op[6]", "1", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#unknown# 1 2"))
        .stdout(predicate::str::contains("-1"));
}

#[test]
fn goal_tree_shows_infix() {
    let tmp = TempDir::new().unwrap();
    ocs(&tmp)
        .args(["goal", "--tree", "+", "1", "*", "2", "@1", "--attrs", "0,4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(1 + (2 * attr[1]))"));
}

#[test]
fn goal_malformed_tag_fails() {
    let tmp = TempDir::new().unwrap();
    ocs(&tmp)
        .args(["goal", "12288"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("malformed tag"));
}

#[test]
fn goal_error_as_json() {
    let tmp = TempDir::new().unwrap();
    let output = ocs(&tmp)
        .args(["goal", "--json", "<", "attr[4]", "5", "--attrs", "1"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let err: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert!(
        err["error"]
            .as_str()
            .unwrap()
            .contains("attribute index 4 out of range")
    );
}

#[test]
fn goal_bad_token_fails() {
    let tmp = TempDir::new().unwrap();
    ocs(&tmp)
        .args(["goal", "==", "1", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid formula"));
}

// ---------------------------------------------------------------------------
// game
// ---------------------------------------------------------------------------

#[test]
fn game_report_isolates_bad_goal() {
    let tmp = TempDir::new().unwrap();
    write_game(&tmp);
    ocs(&tmp)
        .args([
            "game",
            "--details",
            "details.json",
            "--params",
            "params.json",
            "--symbols",
            "symbols.json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("running"))
        .stdout(predicate::str::contains("goal 0: (attr[0] < 5)"))
        .stdout(predicate::str::contains("goal 1:"))
        .stdout(predicate::str::contains("malformed tag"))
        .stdout(predicate::str::contains("all goals hold: no"))
        .stdout(predicate::str::contains("ffb"))
        .stdout(predicate::str::contains("LEGEND"));
}

#[test]
fn game_json_report() {
    let tmp = TempDir::new().unwrap();
    write_game(&tmp);
    let json = json_stdout(ocs(&tmp).args([
        "game",
        "--json",
        "--details",
        "details.json",
        "--params",
        "params.json",
        "--symbols",
        "symbols.json",
    ]));
    assert_eq!(json["status"], "running");
    assert_eq!(json["rejected"], 1);
    assert_eq!(json["next"]["glyph"], "b");
    assert_eq!(json["goals_hold"], false);
    assert_eq!(json["goals"][0]["result"], true);
    assert!(json["goals"][1]["error"].is_string());
    assert_eq!(json["symbols"]["strip"], "ffb");
    assert_eq!(json["symbols"]["stats"][1]["index"], 5);
    assert_eq!(json["symbols"]["stats"][1]["seen"], 2);
    assert_eq!(json["symbols"]["stats"][1]["rejected"], 1);
}

#[test]
fn game_accepts_toml_params() {
    let tmp = TempDir::new().unwrap();
    write_game(&tmp);
    std::fs::write(
        tmp.path().join("params.toml"),
        "type = 1\ngoals = [[8197, 4097, 8]]\n",
    )
    .unwrap();
    ocs(&tmp)
        .args(["game", "--details", "details.json", "--params", "params.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("all goals hold: yes"))
        .stdout(predicate::str::contains("MOVES").not());
}

#[test]
fn game_missing_details_fails() {
    let tmp = TempDir::new().unwrap();
    write_game(&tmp);
    ocs(&tmp)
        .args(["game", "--details", "nope.json", "--params", "params.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load game details"));
}

// ---------------------------------------------------------------------------
// symbols / glyph
// ---------------------------------------------------------------------------

#[test]
fn symbols_from_raw_codes() {
    let tmp = TempDir::new().unwrap();
    ocs(&tmp)
        .args(["symbols", "133", "5", "129"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ffb"))
        .stdout(predicate::str::contains("3 moves, 2 accepted, 1 rejected"))
        .stdout(predicate::str::contains("[1,0,1,0,0,0,0]"))
        .stdout(predicate::str::contains("attribute totals: [3,0,2,0,0,0,0]"));
}

#[test]
fn symbols_from_stdin() {
    let tmp = TempDir::new().unwrap();
    ocs(&tmp)
        .args(["symbols", "-q", "-"])
        .write_stdin(r#"{"count":2,"symbols":[128,159]}"#)
        .assert()
        .success()
        .stdout("aF\n");
}

#[test]
fn glyph_lookup_both_ways() {
    let tmp = TempDir::new().unwrap();
    let json = json_stdout(ocs(&tmp).args(["glyph", "--json", "5", "\u{3b1}"]));
    assert_eq!(
        json,
        serde_json::json!([
            {"index": 5, "glyph": "f", "attrs": [0, 2]},
            {"index": 94, "glyph": "\u{3b1}", "attrs": [1, 2, 3, 4, 6]},
        ])
    );
}

#[test]
fn glyph_rejects_unknown_character() {
    let tmp = TempDir::new().unwrap();
    ocs(&tmp)
        .args(["glyph", "\u{2603}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a symbol glyph"));
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn config_init_show_and_path() {
    let tmp = TempDir::new().unwrap();
    ocs(&tmp)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));
    assert!(tmp.path().join(".ocs").join("config.yaml").is_file());

    ocs(&tmp)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    ocs(&tmp).args(["config", "init", "--force"]).assert().success();

    ocs(&tmp)
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rules.accepted-limit = 1000"));

    ocs(&tmp)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".ocs"));
}

#[test]
fn config_path_without_dir_fails() {
    let tmp = TempDir::new().unwrap();
    ocs(&tmp)
        .args(["config", "path"])
        .env("OCS_DIR", tmp.path().join("missing"))
        .assert()
        .failure();
}

#[test]
fn config_display_settings_apply() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join(".ocs");
    std::fs::create_dir(&dir).unwrap();
    std::fs::write(dir.join("config.yaml"), "display:\n  trace: false\n").unwrap();

    ocs(&tmp)
        .args(["goal", "+", "1", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{2192}").not())
        .stdout(predicate::str::contains("true"));
}

#[test]
fn config_json_default_and_explicit_dir() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("conf");
    std::fs::create_dir(&dir).unwrap();
    std::fs::write(dir.join("config.yaml"), "json: true\n").unwrap();

    let json = json_stdout(ocs(&tmp).args([
        "--config-dir",
        dir.to_str().unwrap(),
        "goal",
        "*",
        "2",
        "3",
    ]));
    assert_eq!(json["result"], true);
}

#[test]
fn invalid_config_is_reported() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join(".ocs");
    std::fs::create_dir(&dir).unwrap();
    std::fs::write(
        dir.join("config.yaml"),
        "rules:\n  accepted-limit: 0\n",
    )
    .unwrap();

    ocs(&tmp)
        .args(["goal", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("rules.accepted-limit"));
}

// ---------------------------------------------------------------------------
// version / completion
// ---------------------------------------------------------------------------

#[test]
fn version_prints() {
    let tmp = TempDir::new().unwrap();
    ocs(&tmp)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ocs version"));
}

#[test]
fn completion_bash() {
    let tmp = TempDir::new().unwrap();
    ocs(&tmp)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ocs"));
}
