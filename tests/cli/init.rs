use anyhow::Result;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run(test.command().arg("init"))?;

    assert_eq!(code, 0);
    assert!(stdout.contains("Created .vdiferc.json"));
    assert!(stdout.contains(r#"Set "ngconsole" and "ngconsoleResources""#));

    let content = test.read_file(".vdiferc.json")?;
    let config: serde_json::Value = serde_json::from_str(&content)?;
    assert!(config["ngconsole"].is_null());
    assert!(config["ngconsoleResources"].is_null());
    assert_eq!(config["fallbackProduct"], "e-vdi");
    assert_eq!(config["wrapperFile"], "js/vdi/utils/ui.js");
    assert_eq!(config["ignores"][0], "**/node_modules/**");

    Ok(())
}

#[test]
fn test_init_config_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".vdiferc.json", "{}")?;

    let (code, _, stderr) = run(test.command().arg("init"))?;

    assert_eq!(code, 1);
    assert!(stderr.contains(".vdiferc.json already exists"));
    assert_eq!(test.read_file(".vdiferc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_prefills_found_checkouts() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("ngconsole/index.html", "")?;

    let (code, stdout, _) = run(test.command().arg("init"))?;

    assert_eq!(code, 0);
    assert!(stdout.contains(r#"Set "ngconsoleResources" to"#));
    assert!(!stdout.contains(r#""ngconsole" and"#));

    let content = test.read_file(".vdiferc.json")?;
    let config: serde_json::Value = serde_json::from_str(&content)?;
    assert_eq!(config["ngconsole"], "ngconsole");
    assert!(config["ngconsoleResources"].is_null());

    Ok(())
}
