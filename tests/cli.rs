use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn finvault(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("finvault").unwrap();
    cmd.env("FINVAULT_DATA_DIR", data_dir.path());
    cmd
}

#[test]
fn config_reports_data_directory() {
    let dir = TempDir::new().unwrap();
    finvault(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains(dir.path().to_string_lossy().as_ref()))
        .stdout(predicate::str::contains("Page size:        10"));
}

#[test]
fn seed_group_balances() {
    let dir = TempDir::new().unwrap();
    finvault(&dir)
        .args(["group", "balances", "Roommates"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice"))
        .stdout(predicate::str::contains("-$10.00"))
        .stdout(predicate::str::contains("is owed"));
}

#[test]
fn group_expense_round_trip() {
    let dir = TempDir::new().unwrap();
    finvault(&dir)
        .args(["group", "create", "Ski Trip"])
        .assert()
        .success();
    finvault(&dir)
        .args(["group", "add-member", "Ski Trip", "Ann"])
        .assert()
        .success();
    finvault(&dir)
        .args(["group", "add-member", "Ski Trip", "Ben"])
        .assert()
        .success();
    finvault(&dir)
        .args(["group", "add-expense", "Ski Trip", "Cabin", "300", "--paid-by", "Ann"])
        .assert()
        .success()
        .stdout(predicate::str::contains("paid by Ann"));

    finvault(&dir)
        .args(["group", "balances", "ski trip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$150.00"))
        .stdout(predicate::str::contains("-$150.00"));
}

#[test]
fn rename_keeps_avatar_unless_cleared() {
    let dir = TempDir::new().unwrap();
    finvault(&dir)
        .args(["group", "create", "Flat", "--avatar", "https://img.example/flat.png"])
        .assert()
        .success();

    finvault(&dir)
        .args(["group", "rename", "Flat", "Flat 2B"])
        .assert()
        .success();
    finvault(&dir)
        .args(["group", "show", "Flat 2B"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Avatar:   https://img.example/flat.png"));

    finvault(&dir)
        .args(["group", "rename", "Flat 2B", "Flat 2B", "--clear-avatar"])
        .assert()
        .success();
    finvault(&dir)
        .args(["group", "show", "Flat 2B"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Avatar:").not());
}

#[test]
fn negative_amount_is_rejected() {
    let dir = TempDir::new().unwrap();
    finvault(&dir)
        .args(["group", "add-expense", "Roommates", "Taxi", "-5", "--paid-by", "Alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));

    finvault(&dir)
        .args(["group", "show", "Roommates"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Taxi").not());
}

#[test]
fn unknown_group_is_reported() {
    let dir = TempDir::new().unwrap();
    finvault(&dir)
        .args(["group", "delete", "Nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Group not found: Nowhere"));
}

#[test]
fn share_link_is_encoded() {
    let dir = TempDir::new().unwrap();
    finvault(&dir)
        .args(["group", "share", "Roommates", "--url-only"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "https://wa.me/?text=Group%3A%20Roommates%0AMembers%3A%20Alice%2C%20Bob",
        ));
}

#[test]
fn expenses_persist_and_export() {
    let dir = TempDir::new().unwrap();
    finvault(&dir)
        .args(["expense", "add", "Gym", "45"])
        .assert()
        .success();

    finvault(&dir)
        .args(["expense", "list", "--sort", "amount", "--desc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gym"))
        .stdout(predicate::str::contains("Page 1 of 1 (3 expenses)"));

    finvault(&dir)
        .args(["expense", "export"])
        .assert()
        .success()
        .stdout("name,amount\nGroceries,50\nInternet,30\nGym,45\n");
}

#[test]
fn password_list_is_masked() {
    let dir = TempDir::new().unwrap();
    finvault(&dir)
        .args(["password", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gmail"))
        .stdout(predicate::str::contains("password123").not());
}

#[test]
fn password_strength() {
    let dir = TempDir::new().unwrap();
    finvault(&dir)
        .args(["password", "strength", "Ab1!efgh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5/5 Strong"));
}

#[test]
fn password_strength_reads_stdin_when_omitted() {
    let dir = TempDir::new().unwrap();
    finvault(&dir)
        .args(["password", "strength"])
        .write_stdin("Ab1!efgh\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("5/5 Strong"));
}

#[test]
fn password_add_with_prompt_stays_masked() {
    let dir = TempDir::new().unwrap();
    finvault(&dir)
        .args(["password", "add", "Forge", "dev@example.com", "--prompt"])
        .write_stdin("Tr0ub4dor&3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stored password for Forge"))
        .stdout(predicate::str::contains("Generated password").not());

    finvault(&dir)
        .args(["password", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Forge"))
        .stdout(predicate::str::contains("Tr0ub4dor&3").not());

    finvault(&dir)
        .args(["password", "show", "Forge", "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Password: Tr0ub4dor&3"));
}

#[test]
fn vault_export_and_import() {
    let dir = TempDir::new().unwrap();
    let blob = dir.path().join("vault.txt");

    finvault(&dir)
        .args(["password", "export", "--output"])
        .arg(&blob)
        .assert()
        .success();

    finvault(&dir)
        .args(["password", "delete", "Gmail"])
        .assert()
        .success();

    finvault(&dir)
        .args(["password", "import"])
        .arg(&blob)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 passwords"));

    finvault(&dir)
        .args(["password", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gmail"));
}

#[test]
fn corrupt_vault_import_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let blob = dir.path().join("broken.txt");
    std::fs::write(&blob, "this is not a vault").unwrap();

    finvault(&dir)
        .args(["password", "import"])
        .arg(&blob)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Import error"));

    finvault(&dir)
        .args(["password", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Amazon"));
}
