//! End-to-end parses through the binary with a shared command table.

use assert_cmd::cargo::cargo_bin_cmd;
use std::io::Write;
use tempfile::NamedTempFile;

const TEST_TABLE: &str = r#"
[[command]]
name = "cast"

[[command.argument]]
name = "spell"

[[command.keyword]]
name = "on"

[[command.keyword]]
name = "with"

[[command.keyword]]
name = "using"

[[command]]
name = "dance"

[[command]]
name = "do_the_mario"

[[command]]
name = "go"

[[command]]
name = "go_to"

[[command]]
name = "jump"
aliases = ["leap"]
"#;

fn run_line(line: &str) -> String {
    let mut table = NamedTempFile::new().unwrap();
    table.write_all(TEST_TABLE.as_bytes()).unwrap();

    let output = cargo_bin_cmd!("parlance")
        .env("PARLANCE_COMMANDS", table.path())
        .env_remove("PARLANCE_TRANSCRIPT")
        .write_stdin(format!("{line}\n"))
        .output()
        .unwrap();

    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

fn parsed(line: &str) -> serde_json::Value {
    serde_json::from_str(run_line(line).trim()).unwrap()
}

#[test]
fn test_simple_command() {
    let result = parsed("jump");
    assert_eq!(result["matched"], true);
    assert_eq!(result["command"], "jump");
    assert_eq!(result["arguments"], serde_json::json!([]));
}

#[test]
fn test_partial_command_is_no_match() {
    let result = parsed("da");
    assert_eq!(result["matched"], false);
    assert_eq!(result["command"], serde_json::Value::Null);
    assert_eq!(result["input"], "da");
}

#[test]
fn test_chained_positional_arguments() {
    let result = parsed("dance the Charleston and the Lindy Hop and the Mario");
    assert_eq!(
        result["arguments"],
        serde_json::json!(["the Charleston", "the Lindy Hop", "the Mario"])
    );
}

#[test]
fn test_multi_word_command_with_argument() {
    let result = parsed("do the Mario Luigi-style");
    assert_eq!(result["command"], "do_the_mario");
    assert_eq!(result["arguments"], serde_json::json!(["Luigi-style"]));
}

#[test]
fn test_aliased_command() {
    let result = parsed("leap across the chasm");
    assert_eq!(result["command"], "jump");
    assert_eq!(result["arguments"], serde_json::json!(["across the chasm"]));
}

#[test]
fn test_ambiguous_prefix_resolves_to_longest() {
    let result = parsed("go to");
    assert_eq!(result["command"], "go_to");
    assert_eq!(result["arguments"], serde_json::json!([]));
}

#[test]
fn test_full_keyword_grouping() {
    let result = parsed(
        "cast empowered invoked apocalypse on goblin and jotun and ice slime \
         with Brooch of Surtr and Staff of the Salamander using phoenix \
         feather token and dust of Muspellheimr and radiant ruby",
    );
    assert_eq!(result["command"], "cast");
    assert_eq!(
        result["arguments"],
        serde_json::json!([
            "empowered invoked apocalypse",
            {
                "on": ["goblin", "jotun", "ice slime"],
                "with": ["Brooch of Surtr", "Staff of the Salamander"],
                "using": [
                    "phoenix feather token",
                    "dust of Muspellheimr",
                    "radiant ruby"
                ]
            }
        ])
    );
}

#[test]
fn test_no_keyword_fired_means_no_group() {
    let result = parsed("cast fireball");
    assert_eq!(result["arguments"], serde_json::json!(["fireball"]));
}
