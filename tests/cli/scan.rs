use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const HELLO_WORLD_KEYS: &str = r#"
keys:
  hello: Hello
  world: World
"#;

#[test]
fn test_counts_keys_across_files() -> Result<()> {
    let test = CliTest::with_file("translations.yaml", HELLO_WORLD_KEYS)?;
    test.write_file("src/f1.tsx", "hello hello")?;
    test.write_file("src/f2.tsx", "world hello")?;

    let output = test.scan_command().output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("output.json")?,
        "{\n  \"hello\": 3,\n  \"world\": 1\n}\n"
    );
    assert!(stdout(&output).contains("Scanned 2 source files for 2 keys: 0 unused"));

    Ok(())
}

#[test]
fn test_unused_only_csv() -> Result<()> {
    let test = CliTest::with_file(
        "translations.yaml",
        "keys:\n  a.title: A\n  b.title: B\n  c.title: C\n",
    )?;
    test.write_file("app/page.tsx", r#"t("b.title")"#)?;

    let output = test
        .scan_command()
        .args(["--unused-only", "--format", "csv"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("output.csv")?,
        "key,count\na.title,0\nc.title,0\n"
    );
    assert!(stdout(&output).contains("wrote 2 keys to output.csv"));

    Ok(())
}

#[test]
fn test_no_source_files_reports_every_key_unused() -> Result<()> {
    let test = CliTest::with_file("translations.yaml", HELLO_WORLD_KEYS)?;

    let output = test
        .scan_command()
        .args(["--unused-only", "-o", "-"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "{\n  \"hello\": 0,\n  \"world\": 0\n}\n");
    // The summary moves to stderr when the report goes to stdout.
    assert!(stderr(&output).contains("Scanned 0 source files for 2 keys: 2 unused"));

    Ok(())
}

#[test]
fn test_deny_unused_fails_with_status_1() -> Result<()> {
    let test = CliTest::with_file("translations.yaml", HELLO_WORLD_KEYS)?;
    test.write_file("src/app.tsx", "hello")?;

    let output = test.scan_command().arg("--deny-unused").output()?;
    assert_eq!(output.status.code(), Some(1));

    test.write_file("src/other.tsx", "world")?;
    let output = test.scan_command().arg("--deny-unused").output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    Ok(())
}

#[test]
fn test_only_configured_extensions_are_scanned() -> Result<()> {
    let test = CliTest::with_file("translations.yaml", HELLO_WORLD_KEYS)?;
    test.write_file("src/app.tsx", "hello")?;
    test.write_file("src/util.ts", "world")?;
    test.write_file("node_modules/lib/index.tsx", "world")?;

    test.scan_command().output()?;
    assert_eq!(
        test.read_file("output.json")?,
        "{\n  \"hello\": 1,\n  \"world\": 0\n}\n"
    );

    test.scan_command().args(["-e", "tsx", "-e", "ts"]).output()?;
    assert_eq!(
        test.read_file("output.json")?,
        "{\n  \"hello\": 1,\n  \"world\": 1\n}\n"
    );

    Ok(())
}

#[test]
fn test_binary_file_does_not_abort_run() -> Result<()> {
    let test = CliTest::with_file("translations.yaml", HELLO_WORLD_KEYS)?;
    test.write_file("src/a.tsx", "hello")?;
    test.write_file("src/b.tsx", "hello world")?;
    test.write_bytes("src/blob.tsx", &[b'h', 0xff, 0xfe, 0x00])?;

    let output = test.scan_command().output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("output.json")?,
        "{\n  \"hello\": 2,\n  \"world\": 1\n}\n"
    );
    assert!(stdout(&output).contains("1 file(s) could not be scanned"));

    let output = test.scan_command().arg("--verbose").output()?;
    assert!(stdout(&output).contains("blob.tsx: not a text file: invalid UTF-8 at byte 1"));

    Ok(())
}

#[test]
fn test_json_key_source_is_flattened() -> Result<()> {
    let test = CliTest::with_file(
        "messages/en.json",
        r#"{ "Common": { "submit": "Submit", "cancel": "Cancel" } }"#,
    )?;
    test.write_file("src/form.tsx", r#"t("Common.submit"); t("Common.submit")"#)?;

    let output = test
        .scan_command()
        .args(["--keys", "messages/en.json"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("output.json")?,
        "{\n  \"Common.cancel\": 0,\n  \"Common.submit\": 2\n}\n"
    );

    Ok(())
}

#[test]
fn test_config_file() -> Result<()> {
    let test = CliTest::with_file(
        ".keytallyrc.json",
        r#"{
            "keysFile": "i18n/keys.yml",
            "sourceRoot": "web",
            "extensions": ["ts"],
            "format": "csv",
            "output": "reports/usage.csv"
        }"#,
    )?;
    test.write_file("i18n/keys.yml", "keys:\n  home: Home\n  away: Away\n")?;
    test.write_file("web/routes.ts", "home home away")?;
    test.write_file("web/ignored.tsx", "home")?;
    test.write_file("reports/.keep", "")?;

    let output = test.scan_command().output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("reports/usage.csv")?,
        "key,count\naway,1\nhome,2\n"
    );

    Ok(())
}

#[test]
fn test_source_root_from_environment() -> Result<()> {
    let test = CliTest::with_file("translations.yaml", HELLO_WORLD_KEYS)?;
    test.write_file("frontend/app.tsx", "world")?;
    test.write_file("backend/app.tsx", "hello")?;

    let output = test
        .scan_command()
        .env("KEYTALLY_SOURCE_ROOT", test.root().join("frontend"))
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("output.json")?,
        "{\n  \"hello\": 0,\n  \"world\": 1\n}\n"
    );

    Ok(())
}

#[test]
fn test_missing_key_file_is_error() -> Result<()> {
    let test = CliTest::with_file("src/app.tsx", "hello")?;

    let output = test.scan_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error: Failed to load keys: failed to read key file"));
    assert!(!test.root().join("output.json").exists());

    Ok(())
}

#[test]
fn test_duplicate_keys_are_error() -> Result<()> {
    let test = CliTest::with_file("keys.json", r#"{ "hello": "a", "hello": "b" }"#)?;

    let output = test.scan_command().args(["--keys", "keys.json"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("duplicate key `hello`"));

    Ok(())
}

#[test]
fn test_missing_source_root_is_error() -> Result<()> {
    let test = CliTest::with_file("translations.yaml", HELLO_WORLD_KEYS)?;

    let output = test
        .scan_command()
        .args(["--source-root", "does-not-exist"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("source root does not exist"));

    Ok(())
}

#[test]
fn test_unwritable_output_is_error() -> Result<()> {
    let test = CliTest::with_file("translations.yaml", HELLO_WORLD_KEYS)?;

    let output = test
        .scan_command()
        .args(["-o", "missing-dir/out.json"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("failed to write output to missing-dir/out.json"));

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Usage:"));

    Ok(())
}

#[test]
fn test_key_file_and_report_are_not_scanned() -> Result<()> {
    let test = CliTest::with_file("messages/en.json", r#"{ "home": "Home", "away": "Away" }"#)?;
    test.write_file("src/data.json", r#"{ "route": "home" }"#)?;

    let expected = "{\n  \"away\": 0,\n  \"home\": 1\n}\n";
    for _ in 0..2 {
        let output = test
            .scan_command()
            .args(["--keys", "messages/en.json", "-e", "json"])
            .output()?;

        assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
        assert_eq!(test.read_file("output.json")?, expected);
        assert!(stdout(&output).contains("Scanned 1 source file for 2 keys: 1 unused"));
    }

    test.scan_command()
        .args(["--keys", "messages/en.json", "-e", "json", "--unused-only"])
        .output()?;
    assert_eq!(test.read_file("output.json")?, "{\n  \"away\": 0\n}\n");

    Ok(())
}
