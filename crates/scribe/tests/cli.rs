use std::fs;

use assert_cmd::Command; // Bring Command into scope
use predicates::prelude::*; // Bring predicate traits into scope
use tempfile::TempDir;

/// A `scribe` command isolated in its own home directory
fn scribe(home: &TempDir) -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("scribe")?;
    cmd.arg("--home").arg(home.path()).env_remove("RUST_LOG");
    Ok(cmd)
}

#[test]
fn test_ping_command() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("scribe")?;
    cmd.arg("--ping");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("pong"));

    Ok(())
}

#[test]
fn test_no_args_prints_status() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;

    scribe(&home)?
        .assert()
        .success()
        .stdout(predicate::str::contains("Plugins: 1 loaded, 1 active"))
        .stdout(predicate::str::contains("Workspace: none"))
        .stdout(predicate::str::contains("pong").not());

    Ok(())
}

#[test]
fn test_plugins_list_shows_builtin_activated() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;

    scribe(&home)?
        .args(["plugins", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("core-languages\tCore Languages\t0.1.0\tactivated\tenabled"));

    Ok(())
}

#[test]
fn test_disabled_plugin_from_config() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let config = home.path().join("host.json");
    fs::write(&config, r#"{ "disabled_plugins": ["core-languages"] }"#)?;

    scribe(&home)?
        .arg("--config")
        .arg(&config)
        .args(["plugins", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("core-languages"))
        .stdout(predicate::str::contains("disabled"))
        .stdout(predicate::str::contains("\tactivated\t").not());

    // Only the host's plain text type remains
    scribe(&home)?
        .arg("--config")
        .arg(&config)
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    Ok(())
}

#[test]
fn test_unsupported_config_format_fails() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let config = home.path().join("host.ini");
    fs::write(&config, "log_level = debug\n")?;

    scribe(&home)?
        .arg("--config")
        .arg(&config)
        .arg("languages")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    Ok(())
}

#[test]
fn test_languages_lists_builtin_languages() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;

    scribe(&home)?
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("xml\tXML\tcore-languages"))
        .stdout(predicate::str::contains("rust\tRust\tcore-languages"));

    Ok(())
}

#[test]
fn test_file_types_include_host_and_plugin_types() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;

    scribe(&home)?
        .arg("file-types")
        .assert()
        .success()
        .stdout(predicate::str::contains("Plain Text\ttxt"))
        .stdout(predicate::str::contains("XML\txml,xsd,xsl,svg\txml\ttext"))
        .stdout(predicate::str::contains("PNG\tpng\t-\tbinary"));

    Ok(())
}

#[test]
fn test_file_type_resolution() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;

    scribe(&home)?
        .args(["file-type", "layout.XML"])
        .assert()
        .success()
        .stdout(predicate::str::diff("XML\n"));

    scribe(&home)?
        .args(["file-type", "Makefile"])
        .assert()
        .success()
        .stdout(predicate::str::diff("unknown\n"));

    Ok(())
}

#[test]
fn test_goto_definition_in_rust_file() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let source = home.path().join("lib.rs");
    fs::write(&source, "fn helper() {}\nfn main() { helper(); }\n")?;

    // Cursor on the call to `helper` resolves to its declaration at offset 3
    scribe(&home)?
        .arg("goto")
        .arg(&source)
        .arg("29")
        .assert()
        .success()
        .stdout(predicate::str::ends_with(":3\n"));

    scribe(&home)?
        .arg("goto")
        .arg(&source)
        .arg("0")
        .assert()
        .success()
        .stdout(predicate::str::contains("no definition found"));

    Ok(())
}

#[test]
fn test_goto_without_provider() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let notes = home.path().join("notes.txt");
    fs::write(&notes, "helper helper")?;

    scribe(&home)?
        .arg("goto")
        .arg(&notes)
        .arg("8")
        .assert()
        .success()
        .stdout(predicate::str::contains("no definition found"));

    Ok(())
}

#[test]
fn test_open_workspace() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let project = TempDir::new()?;

    scribe(&home)?
        .arg("open")
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Opened workspace"));

    // The root is restored on the next start
    scribe(&home)?
        .assert()
        .success()
        .stdout(predicate::str::contains(project.path().display().to_string()));

    Ok(())
}

#[test]
fn test_open_missing_workspace_fails() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let missing = home.path().join("does-not-exist");

    scribe(&home)?
        .arg("open")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    Ok(())
}

#[test]
fn test_recent_files_persist() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let first = home.path().join("first.md");
    let second = home.path().join("second.md");
    fs::write(&first, "# first")?;
    fs::write(&second, "# second")?;

    scribe(&home)?.args(["recent", "add"]).arg(&first).assert().success();
    scribe(&home)?.args(["recent", "add"]).arg(&second).assert().success();

    let output = scribe(&home)?.args(["recent", "list"]).output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("second.md"));
    assert!(lines[1].ends_with("first.md"));

    scribe(&home)?.args(["recent", "clear"]).assert().success();
    scribe(&home)?
        .args(["recent", "list"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    Ok(())
}

#[test]
fn test_recent_add_missing_file_fails() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;

    scribe(&home)?
        .args(["recent", "add"])
        .arg(home.path().join("ghost.md"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot add"));

    Ok(())
}

#[test]
fn test_settings_round_trip_across_runs() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;

    scribe(&home)?
        .args(["settings", "set", "editor.font.size", "14"])
        .assert()
        .success();
    scribe(&home)?
        .args(["settings", "set", "editor.theme", "dark"])
        .assert()
        .success();

    scribe(&home)?
        .args(["settings", "get", "editor.font.size"])
        .assert()
        .success()
        .stdout(predicate::str::diff("14\n"));

    scribe(&home)?
        .args(["settings", "keys", "editor."])
        .assert()
        .success()
        .stdout(predicate::str::contains("editor.font.size"))
        .stdout(predicate::str::contains("editor.theme"));

    scribe(&home)?
        .args(["settings", "get", "editor.missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not set"));

    Ok(())
}
