use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Created .keytallyrc.json"));

    let content = test.read_file(".keytallyrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["keysFile"], "translations.yaml");
    assert_eq!(parsed["format"], "json");
    assert_eq!(parsed["unusedOnly"], false);
    assert!(parsed["extensions"].is_array());

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".keytallyrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains(".keytallyrc.json already exists"));
    assert_eq!(test.read_file(".keytallyrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("translations.yaml", "keys:\n  greeting: Hi\n")?;
    test.write_file("src/app.tsx", r#"t("greeting")"#)?;

    let output = test.scan_command().output()?;
    assert!(
        output.status.success(),
        "Scan should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert_eq!(
        test.read_file("output.json")?,
        "{\n  \"greeting\": 1\n}\n"
    );

    Ok(())
}
