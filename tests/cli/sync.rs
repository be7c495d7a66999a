use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, LANG_JSON, run};

#[test]
fn test_sync_adds_keys_and_strips_prefix() -> Result<()> {
    let Some(test) = CliTest::with_repos("2.0-dev", "2.0", r#"{"a": "A"}"#)? else {
        return Ok(());
    };
    test.write_file(
        "ngconsole/views/a.html",
        r#"<a data-localize="b"></a><a localize="a"></a><!-- <a localize="c"></a> -->"#,
    )?;

    let (code, stdout, _) = run(test.command().args(["sync", "ngconsole/views/a.html"]))?;

    assert_eq!(code, 0);
    assert!(stdout.contains("Added 1 key(s) from ngconsole/views/a.html: b"));
    assert_eq!(
        test.read_file("ngconsole/views/a.html")?,
        r#"<a localize="b"></a><a localize="a"></a><!-- <a localize="c"></a> -->"#
    );
    assert_eq!(
        test.read_file(LANG_JSON)?,
        "{\n    \"a\": \"A\",\n    \"b\": \"b\"\n}"
    );

    Ok(())
}

#[test]
fn test_sync_without_new_keys_leaves_files() -> Result<()> {
    let Some(test) = CliTest::with_repos("2.0-dev", "2.0", r#"{"a": "A"}"#)? else {
        return Ok(());
    };
    test.write_file("ngconsole/views/a.html", r#"<a data-localize="a"></a>"#)?;

    let (code, stdout, _) = run(test.command().args(["sync", "ngconsole/views/a.html"]))?;

    assert_eq!(code, 0);
    assert!(stdout.contains("ngconsole/views/a.html: no new keys"));
    assert_eq!(
        test.read_file("ngconsole/views/a.html")?,
        r#"<a data-localize="a"></a>"#
    );
    assert_eq!(test.read_file(LANG_JSON)?, r#"{"a": "A"}"#);

    Ok(())
}

#[test]
fn test_sync_rejects_scripts() -> Result<()> {
    let Some(test) = CliTest::with_repos("2.0-dev", "2.0", "{}")? else {
        return Ok(());
    };
    test.write_file("ngconsole/js/app.js", "")?;

    let (code, _, stderr) = run(test.command().args(["sync", "ngconsole/js/app.js"]))?;

    assert_eq!(code, 1);
    assert!(stderr.contains("is not an HTML view"));

    Ok(())
}

#[test]
fn test_sync_outside_ngconsole() -> Result<()> {
    let Some(test) = CliTest::with_repos("2.0-dev", "2.0", "{}")? else {
        return Ok(());
    };
    test.write_file("other/a.html", r#"<a localize="x"></a>"#)?;

    let (code, _, stderr) = run(test.command().args(["sync", "other/a.html"]))?;

    assert_eq!(code, 2);
    assert!(stderr.contains("is not an ngconsole document"));
    assert_eq!(test.read_file(LANG_JSON)?, "{}");

    Ok(())
}

#[test]
fn test_sync_continues_past_unreadable_view() -> Result<()> {
    let Some(test) = CliTest::with_repos("2.0-dev", "2.0", "{}")? else {
        return Ok(());
    };
    test.write_bytes("ngconsole/views/legacy.html", b"<a localize=\"\xd6\xd0\"></a>")?;
    test.write_file("ngconsole/views/a.html", r#"<a localize="b"></a>"#)?;

    let (code, stdout, stderr) = run(test.command().args([
        "sync",
        "ngconsole/views/legacy.html",
        "ngconsole/views/a.html",
    ]))?;

    assert_eq!(code, 2);
    assert!(stderr.contains("Failed to read file"));
    assert!(stdout.contains("Added 1 key(s) from ngconsole/views/a.html: b"));
    assert_eq!(test.read_file(LANG_JSON)?, "{\n    \"b\": \"b\"\n}");

    Ok(())
}
