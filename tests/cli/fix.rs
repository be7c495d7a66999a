use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

const SCRIPT: &str = "var a = $$$I18N.get('a');\nvar b = $$$MSG.get(42);\n";

#[test]
fn test_fix_dry_run() -> Result<()> {
    let Some(test) = CliTest::with_repos("2.0-dev", "2.0", "{}")? else {
        return Ok(());
    };
    test.write_file("ngconsole/js/app.js", SCRIPT)?;

    let (code, stdout, _) = run(test.command().args(["fix", "ngconsole/js/app.js"]))?;

    assert_eq!(code, 1);
    assert!(stdout.contains("--> ngconsole/js/app.js:1:9"));
    assert!(stdout.contains("- $$$I18N.get('a')"));
    assert!(stdout.contains("+ i18n.translateText('a')"));
    assert!(stdout.contains("+ i18n.translateCode(42)"));
    assert!(stdout.contains("Would fix 2 call(s) in 1 file(s)."));
    assert!(stdout.contains("Run with --apply"));
    assert_eq!(test.read_file("ngconsole/js/app.js")?, SCRIPT);

    Ok(())
}

#[test]
fn test_fix_apply() -> Result<()> {
    let Some(test) = CliTest::with_repos("2.0-dev", "2.0", "{}")? else {
        return Ok(());
    };
    test.write_file("ngconsole/js/app.js", SCRIPT)?;

    let (code, stdout, _) = run(test.command().args(["fix", "--apply", "ngconsole/js/app.js"]))?;

    assert_eq!(code, 0);
    assert!(stdout.contains("Fixed 2 call(s) in 1 file(s)."));
    assert_eq!(
        test.read_file("ngconsole/js/app.js")?,
        "var a = i18n.translateText('a');\nvar b = i18n.translateCode(42);\n"
    );

    let (code, _, _) = run(test.command().args(["check", "ngconsole/js"]))?;
    assert_eq!(code, 0);

    Ok(())
}

#[test]
fn test_fix_reports_unfixable_calls() -> Result<()> {
    let Some(test) = CliTest::with_repos("2.0-dev", "2.0", "{}")? else {
        return Ok(());
    };
    test.write_file(
        "ngconsole/js/app.js",
        "$.bigBox({ title: 'x' });\nvar a = $$$I18N.get('a');\n",
    )?;

    let (code, stdout, _) = run(test.command().args(["fix", "--apply", "ngconsole/js/app.js"]))?;

    assert_eq!(code, 1);
    assert!(stdout.contains("✘ ngconsole/js/app.js:1:1"));
    assert!(stdout.contains("Fixed 1 call(s) in 1 file(s)."));
    assert!(stdout.contains("Note: 1 deprecated call(s) have no direct replacement"));
    assert_eq!(
        test.read_file("ngconsole/js/app.js")?,
        "$.bigBox({ title: 'x' });\nvar a = i18n.translateText('a');\n"
    );

    Ok(())
}

#[test]
fn test_fix_nothing_to_do() -> Result<()> {
    let Some(test) = CliTest::with_repos("2.0-dev", "2.0", "{}")? else {
        return Ok(());
    };
    test.write_file("ngconsole/js/app.js", "i18n.translateText('a');\n")?;

    let (code, stdout, _) = run(test.command().args(["fix", "ngconsole/js/app.js"]))?;

    assert_eq!(code, 0);
    assert!(stdout.is_empty());

    Ok(())
}

#[test]
fn test_fix_continues_past_unreadable_file() -> Result<()> {
    let Some(test) = CliTest::with_repos("2.0-dev", "2.0", "{}")? else {
        return Ok(());
    };
    test.write_bytes("ngconsole/js/legacy.js", b"var \xd6\xd0\xce\xc4;\n")?;
    test.write_file("ngconsole/js/app.js", SCRIPT)?;

    let (code, stdout, stderr) = run(test.command().args([
        "fix",
        "--apply",
        "ngconsole/js/legacy.js",
        "ngconsole/js/missing.js",
        "ngconsole/js/app.js",
    ]))?;

    assert_eq!(code, 2);
    assert!(stderr.contains("Failed to read file"));
    assert!(stderr.contains("File not found"));
    assert!(stdout.contains("Fixed 2 call(s) in 1 file(s)."));
    assert_eq!(
        test.read_file("ngconsole/js/app.js")?,
        "var a = i18n.translateText('a');\nvar b = i18n.translateCode(42);\n"
    );

    Ok(())
}
