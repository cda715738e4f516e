use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

const APP: &str = r#"
gettext("Hello");
ngettext("One apple", "{n} apples", n);
pgettext("menu", "Open");
gettext("Hello");
"#;

#[test]
fn test_extract_default_functions() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", APP)?;

    assert_cmd_snapshot!(test.extract_command(), @r"
success: true
exit_code: 0
----- stdout -----
  Files parsed         1
  Files with messages  1
  Messages             3
  Plural messages      1
  Contexts             2
  Message usages       4

✓ Wrote 3 messages to ./locales/messages.pot

----- stderr -----
");

    let pot = test.read_file("locales/messages.pot")?;
    assert!(pot.contains("msgid \"Hello\""));
    assert!(pot.contains("src/app.ts:2"));
    assert!(pot.contains("src/app.ts:5"));
    assert!(pot.contains("msgid_plural \"{n} apples\""));
    assert!(pot.contains("msgctxt \"menu\""));
    assert!(pot.contains("Content-Type: text/plain; charset=UTF-8"));

    // Default context first, messages sorted by text
    let apple = pot.find("msgid \"One apple\"").unwrap();
    let hello = pot.find("msgid \"Hello\"").unwrap();
    let open = pot.find("msgid \"Open\"").unwrap();
    assert!(hello < apple, "Hello should come before One apple");
    assert!(apple < open, "the menu context should come last");

    Ok(())
}

#[test]
fn test_extract_dry_run_writes_nothing() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", APP)?;

    let output = test.extract_command().arg("--dry-run").output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Dry run: would write 3 messages to ./locales/messages.pot"));
    assert!(!test.root().join("locales").exists());

    Ok(())
}

#[test]
fn test_extract_output_override() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", APP)?;

    let output = test
        .extract_command()
        .args(["--output", "po/app.pot"])
        .output()?;

    assert!(output.status.success());
    assert!(test.read_file("po/app.pot")?.contains("msgid \"Open\""));
    assert!(!test.root().join("locales").exists());

    Ok(())
}

#[test]
fn test_extract_source_root() -> Result<()> {
    let test = CliTest::with_file("web/src/app.ts", APP)?;
    test.write_file("web/.glotxrc.json", r#"{ "output": "po/web.pot" }"#)?;

    let output = test
        .extract_command()
        .args(["--source-root", "web"])
        .output()?;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let pot = test.read_file("web/po/web.pot")?;
    assert!(pot.contains("src/app.ts:2"));
    assert!(!pot.contains("web/src/app.ts"));

    Ok(())
}

#[test]
fn test_extract_plural_conflict() -> Result<()> {
    let test = CliTest::with_file("src/a.ts", r#"ngettext("One file", "{n} files", n);"#)?;
    test.write_file(
        "src/b.ts",
        r#"
ngettext("One file", "Many files", n);
gettext("Other");
"#,
    )?;

    assert_cmd_snapshot!(test.extract_command(), @r"
success: false
exit_code: 1
----- stdout -----
error: incompatible plurals found for 'One file'  plural-conflict
  --> src/b.ts:2
  = note: kept '{n} files', skipped 'Many files'

✘ 1 problem (1 error, 0 warnings)

  Files parsed         2
  Files with messages  2
  Messages             2
  Plural messages      1
  Contexts             1
  Message usages       2

✓ Wrote 2 messages to ./locales/messages.pot

----- stderr -----
");

    let pot = test.read_file("locales/messages.pot")?;
    assert!(pot.contains("msgid_plural \"{n} files\""));
    assert!(!pot.contains("Many files"));
    assert!(pot.contains("msgid \"Other\""));

    Ok(())
}

#[test]
fn test_extract_parse_error() -> Result<()> {
    let test = CliTest::with_file("src/ok.ts", r#"gettext("Hello");"#)?;
    test.write_file("src/broken.ts", "const = ;")?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("parse-error"));
    assert!(stdout.contains("--> src/broken.ts"));
    assert!(test.read_file("locales/messages.pot")?.contains("msgid \"Hello\""));

    Ok(())
}

#[test]
fn test_extract_custom_callees_and_comments() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".glotxrc.json",
        r#"{
  "extractors": [
    { "callees": ["i18n.gettext"], "arguments": { "text": 0 } },
    { "callees": ["i18n.pgettext"], "arguments": { "text": 1, "context": 0 } }
  ],
  "comments": { "otherLineLeading": true, "regex": "^TRANSLATORS:\\s*(.*)$" }
}"#,
    )?;
    test.write_file(
        "src/toolbar.ts",
        r#"
class Toolbar {
    render() {
        // TRANSLATORS: button that saves the document
        const save = this.i18n.gettext("Save");
        // eslint-disable-next-line
        const open = i18n.pgettext("menu", "Open");
        const skipped = gettext("Not configured");
        const dynamic = i18n.gettext(label);
    }
}
"#,
    )?;

    let output = test.extract_command().output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("skipped i18n.gettext() call"));
    assert!(stdout.contains("--> src/toolbar.ts:9"));

    let pot = test.read_file("locales/messages.pot")?;
    assert!(pot.contains("msgid \"Save\""));
    assert!(pot.contains("button that saves the document"));
    assert!(pot.contains("msgctxt \"menu\""));
    assert!(!pot.contains("eslint"));
    assert!(!pot.contains("Not configured"));

    Ok(())
}

#[test]
fn test_extract_warns_on_skipped_calls() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", "gettext(`Hello ${name}`);")?;

    assert_cmd_snapshot!(test.extract_command(), @r"
success: true
exit_code: 0
----- stdout -----
warning: skipped gettext() call  skipped-call
  --> src/app.ts:1
  = note: 'text' argument is not a string literal

✘ 1 problem (0 errors, 1 warning)

  Files parsed         1
  Files with messages  0
  Messages             0
  Plural messages      0
  Contexts             0
  Message usages       0

✓ Wrote 0 messages to ./locales/messages.pot

----- stderr -----
");

    Ok(())
}

#[test]
fn test_extract_ignores_test_files() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", r#"gettext("Shipped");"#)?;
    test.write_file("src/app.test.ts", r#"gettext("Only in tests");"#)?;
    test.write_file("node_modules/lib/index.js", r#"gettext("Vendored");"#)?;

    let output = test.extract_command().output()?;
    assert!(output.status.success());

    let pot = test.read_file("locales/messages.pot")?;
    assert!(pot.contains("Shipped"));
    assert!(!pot.contains("Only in tests"));
    assert!(!pot.contains("Vendored"));

    Ok(())
}

#[test]
fn test_extract_invalid_config() -> Result<()> {
    let test = CliTest::with_file(".glotxrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid glob pattern in 'ignores'"));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("--help").output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("extract"));
    assert!(stdout.contains("init"));

    Ok(())
}
