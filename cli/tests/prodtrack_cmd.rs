#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Binary-level tests for `prodtrack`.
//!
//! Every command runs against an isolated config and database inside a
//! tempdir, so nothing touches the user's home.

use std::fs;
use std::path::Path;

use anyhow::Result;
use predicates::prelude::*;
use tempfile::TempDir;

/// Build a command bound to `dir/prodtrack.toml` and `dir/database.db`.
fn prodtrack(dir: &Path) -> Result<assert_cmd::Command> {
    let config = dir.join("prodtrack.toml");
    if !config.exists() {
        fs::write(&config, "")?;
    }
    let mut cmd = assert_cmd::Command::cargo_bin("prodtrack")?;
    cmd.env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir)
        .env_remove("PRODTRACK_CONFIG")
        .env("RUST_LOG", "off")
        .current_dir(dir)
        .arg("--config")
        .arg(&config)
        .arg("--database")
        .arg(dir.join("database.db"));
    Ok(cmd)
}

/// Run `producao <route..> --pedido .. --quantidade ..` and return stdout.
fn add_production(dir: &Path, route: &[&str], order: &str, qty: &str) -> Result<String> {
    let output = prodtrack(dir)?
        .arg("producao")
        .args(route)
        .args([
            "--pedido",
            order,
            "--modelo",
            "M1",
            "--cor",
            "Red",
            "--quantidade",
            qty,
        ])
        .output()?;
    assert!(output.status.success(), "{output:?}");
    Ok(String::from_utf8(output.stdout)?)
}

#[test]
fn init_creates_database() -> Result<()> {
    let dir = TempDir::new()?;
    prodtrack(dir.path())?
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("database ready at"));
    assert!(dir.path().join("database.db").exists());

    // A second init leaves the file usable
    prodtrack(dir.path())?.arg("init").assert().success();
    Ok(())
}

#[test]
fn screen_add_lists_its_stage() -> Result<()> {
    let dir = TempDir::new()?;
    add_production(dir.path(), &["corte", "add"], "P001", "10")?;
    add_production(dir.path(), &["costura-entrada", "add"], "P002", "5")?;

    let listing = add_production(dir.path(), &["corte", "add"], "P003", "7")?;
    let rows: Vec<&str> = listing.lines().skip(2).collect();
    assert_eq!(rows.len(), 2, "{listing}");
    assert!(rows[0].contains("P003"));
    assert!(rows[1].contains("P001"));
    assert!(rows.iter().all(|r| r.contains("CORTE")));
    assert!(!listing.contains("P002"));
    Ok(())
}

#[test]
fn free_stage_is_kept_verbatim_under_open_policy() -> Result<()> {
    let dir = TempDir::new()?;
    add_production(dir.path(), &["add", "corte"], "P010", "3")?;
    add_production(dir.path(), &["corte", "add"], "P011", "4")?;

    let output = prodtrack(dir.path())?
        .args(["producao", "list", "corte"])
        .output()?;
    assert!(output.status.success(), "{output:?}");
    let listing = String::from_utf8(output.stdout)?;
    let rows: Vec<&str> = listing.lines().skip(2).collect();
    assert_eq!(rows.len(), 1, "{listing}");
    assert!(rows[0].contains("P010"));
    assert!(rows[0].contains("corte"));

    let screen = prodtrack(dir.path())?
        .args(["producao", "corte", "list"])
        .output()?;
    let screen = String::from_utf8(screen.stdout)?;
    assert!(screen.contains("P011"), "{screen}");
    assert!(!screen.contains("P010"), "{screen}");
    Ok(())
}

#[test]
fn known_policy_rejects_unlisted_stage() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(
        dir.path().join("prodtrack.toml"),
        "[stages]\npolicy = \"known\"\n",
    )?;

    prodtrack(dir.path())?
        .args(["producao", "list", "Acabamento"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown stage"));

    prodtrack(dir.path())?
        .args(["producao", "list", "COSTURA_SAIDA"])
        .assert()
        .success();

    prodtrack(dir.path())?
        .args(["producao", "list", "corte"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown stage"));
    Ok(())
}

#[test]
fn non_numeric_quantity_is_rejected_before_storage() -> Result<()> {
    let dir = TempDir::new()?;
    prodtrack(dir.path())?
        .args([
            "producao",
            "corte",
            "add",
            "--pedido",
            "P1",
            "--modelo",
            "M",
            "--cor",
            "C",
            "--quantidade",
            "dez",
        ])
        .assert()
        .failure()
        .code(2);
    assert!(!dir.path().join("database.db").exists());
    Ok(())
}

#[test]
fn report_honours_order_flag() -> Result<()> {
    let dir = TempDir::new()?;
    add_production(dir.path(), &["corte", "add"], "P001", "10")?;
    add_production(dir.path(), &["costura-saida", "add"], "P002", "5")?;

    let asc = prodtrack(dir.path())?
        .args(["relatorio", "--order", "asc"])
        .output()?;
    let asc = String::from_utf8(asc.stdout)?;
    let asc_rows: Vec<&str> = asc.lines().skip(2).collect();
    assert!(asc_rows[0].contains("P001"), "{asc}");
    assert!(asc_rows[1].contains("P002"), "{asc}");

    let desc = prodtrack(dir.path())?.arg("relatorio").output()?;
    let desc = String::from_utf8(desc.stdout)?;
    let desc_rows: Vec<&str> = desc.lines().skip(2).collect();
    assert!(desc_rows[0].contains("P002"), "{desc}");

    prodtrack(dir.path())?
        .args(["relatorio", "--order", "sideways"])
        .assert()
        .failure();
    Ok(())
}

#[test]
fn export_writes_fixed_xlsx_filename() -> Result<()> {
    let dir = TempDir::new()?;
    add_production(dir.path(), &["corte", "add"], "P001", "10")?;

    let out_dir = dir.path().join("out");
    prodtrack(dir.path())?
        .args(["exportar", "--output"])
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::ends_with("relatorio.xlsx\n"));

    let bytes = fs::read(out_dir.join("relatorio.xlsx"))?;
    assert_eq!(&bytes[..2], b"PK");
    Ok(())
}

#[test]
fn export_follows_csv_config() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(
        dir.path().join("prodtrack.toml"),
        "[store]\nreport_order = \"asc\"\n\n[export]\nformat = \"csv\"\nfilename = \"relatorio.csv\"\n",
    )?;
    add_production(dir.path(), &["corte", "add"], "P001", "10")?;
    add_production(dir.path(), &["corte", "add"], "P002", "4")?;

    prodtrack(dir.path())?.arg("exportar").assert().success();

    let text = fs::read_to_string(dir.path().join("relatorio.csv"))?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3, "{text}");
    assert_eq!(lines[0], "Pedido,Modelo,Cor,Quantidade,Etapa,Data");
    assert!(lines[1].starts_with("P001,M1,Red,10,CORTE,"));
    assert!(lines[2].starts_with("P002,M1,Red,4,CORTE,"));
    Ok(())
}
