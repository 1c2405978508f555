use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

const BIN_NAME: &str = "moneyflow";

fn moneyflow(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("MONEYFLOW_DATA_DIR", data_dir.path())
        .env_remove("GEMINI_API_KEY")
        .env_remove("MONEYFLOW_LOG")
        .env_remove("RUST_LOG");
    cmd
}

fn in_period(data_dir: &TempDir, args: &[&str]) -> Command {
    let mut cmd = moneyflow(data_dir);
    cmd.arg("--period").arg("03/2027").args(args);
    cmd
}

fn write_settings(data_dir: &TempDir, json: &str) {
    std::fs::write(data_dir.path().join("config.json"), json).expect("write settings");
}

#[test]
fn cli_add_then_list_shows_expense() {
    let dir = TempDir::new().unwrap();

    in_period(&dir, &["add", "1250", "Padaria", "Central"])
        .assert()
        .success()
        .stdout(contains("Padaria Central").and(contains("R$ 12,50")));

    in_period(&dir, &["list"])
        .assert()
        .success()
        .stdout(contains("Março 2027").and(contains("Padaria Central")));

    moneyflow(&dir)
        .args(["--period", "04/2027", "list"])
        .assert()
        .success()
        .stdout(contains("Nenhum gasto registrado este mês."));
}

#[test]
fn cli_summary_shows_consolidation_and_alert() {
    let dir = TempDir::new().unwrap();

    in_period(&dir, &["budget", "set", "100000"])
        .assert()
        .success()
        .stdout(contains("R$ 1.000,00"));
    in_period(&dir, &["add", "50000", "Uber"]).assert().success();
    in_period(&dir, &["add", "30000", "uber"]).assert().success();
    in_period(&dir, &["add", "5000", "Mercado"])
        .assert()
        .success()
        .stdout(contains("ALERTA: 85% do orçamento consumido!"));

    in_period(&dir, &["summary"])
        .assert()
        .success()
        .stdout(
            contains("R$ 150,00")
                .and(contains("85% utilizado"))
                .and(contains("2x"))
                .and(contains("R$ 800,00")),
        );

    in_period(&dir, &["group", "uber"])
        .assert()
        .success()
        .stdout(contains("uber (2x)"));
}

#[test]
fn cli_rejects_invalid_expense() {
    let dir = TempDir::new().unwrap();

    in_period(&dir, &["add", "abc", "Uber"])
        .assert()
        .failure()
        .stderr(contains("positive amount"));

    in_period(&dir, &["list"])
        .assert()
        .success()
        .stdout(contains("Nenhum gasto registrado"));
}

#[test]
fn cli_rejects_oversized_amount_and_keeps_list_usable() {
    let dir = TempDir::new().unwrap();
    let huge = "9".repeat(40);

    in_period(&dir, &["add", huge.as_str(), "Uber"])
        .assert()
        .failure()
        .stderr(contains("positive amount up to"));
    in_period(&dir, &["add", "1250", "Uber"])
        .assert()
        .success()
        .stdout(contains("R$ 12,50"));

    in_period(&dir, &["list"])
        .assert()
        .success()
        .stdout(contains("Uber"));
}

#[test]
fn cli_delete_by_short_id() {
    let dir = TempDir::new().unwrap();

    let output = in_period(&dir, &["add", "999", "Cinema"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let id = stdout.split_whitespace().next().unwrap().to_string();
    assert!(id.starts_with("exp-"));

    in_period(&dir, &["delete", id.as_str()])
        .assert()
        .success()
        .stdout(contains("Deleted"));

    in_period(&dir, &["delete", id.as_str()])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn cli_rejects_unselectable_year() {
    let dir = TempDir::new().unwrap();

    moneyflow(&dir)
        .args(["--year", "2040", "list"])
        .assert()
        .failure()
        .stderr(contains("not selectable"));

    moneyflow(&dir)
        .args(["--period", "13/2027", "list"])
        .assert()
        .failure();
}

#[test]
fn cli_years_and_periods() {
    let dir = TempDir::new().unwrap();

    in_period(&dir, &["years"])
        .assert()
        .success()
        .stdout(contains("  2026").and(contains("* 2027")).and(contains("  2030")));

    in_period(&dir, &["periods"])
        .assert()
        .success()
        .stdout(contains("[Mar]"));
}

#[test]
fn cli_suggest_excludes_exact_match() {
    let dir = TempDir::new().unwrap();
    in_period(&dir, &["add", "100", "Uber"]).assert().success();
    in_period(&dir, &["add", "200", "Uber Eats"]).assert().success();

    in_period(&dir, &["suggest", "uber"])
        .assert()
        .success()
        .stdout("Uber Eats\n");
}

#[test]
fn cli_advise_without_expenses_or_key() {
    let dir = TempDir::new().unwrap();

    in_period(&dir, &["advise"])
        .assert()
        .success()
        .stdout(contains("Registre gastos"));

    in_period(&dir, &["add", "2500", "Cinema"]).assert().success();
    in_period(&dir, &["advise"])
        .assert()
        .success()
        .stdout(contains("Mantenha o foco nos seus objetivos financeiros!"));
}

#[test]
fn cli_english_locale() {
    let dir = TempDir::new().unwrap();
    write_settings(&dir, r#"{"locale": "en-US", "utc_offset_minutes": 0}"#);

    in_period(&dir, &["budget", "set", "10000"]).assert().success();
    in_period(&dir, &["add", "9500", "Rent"])
        .assert()
        .success()
        .stdout(contains("$95.00").and(contains("CRITICAL LIMIT: 95% used!")));

    in_period(&dir, &["list"])
        .assert()
        .success()
        .stdout(contains("March 2027").and(contains("03/15/2027")));
}

#[test]
fn cli_config_shows_paths() {
    let dir = TempDir::new().unwrap();

    moneyflow(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(contains("config.json").and(contains("pt-BR")));
}

#[test]
fn cli_init_writes_settings_once() {
    let dir = TempDir::new().unwrap();

    moneyflow(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Initialization complete!"));
    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").is_dir());

    moneyflow(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("already initialized"));
}
