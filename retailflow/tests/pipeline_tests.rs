use anyhow::{Context, Result};
use assert_cmd::prelude::*;
use duckdb::Connection;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// A throwaway copy of demos/retail, so runs never touch the checked-in fixture.
struct RetailTestEnv {
    _tmp: TempDir,
    root: PathBuf,
}

impl RetailTestEnv {
    fn new() -> Result<Self> {
        let tmp = tempfile::tempdir()?;
        let project_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .context("Workspace root not found")?
            .join("demos/retail");

        let dest = tmp.path().join("retail");
        Self::copy_dir(&project_root, &dest)?;

        Ok(Self {
            _tmp: tmp,
            root: dest,
        })
    }

    fn copy_dir(src: &PathBuf, dst: &PathBuf) -> std::io::Result<()> {
        let mut options = fs_extra::dir::CopyOptions::new();
        options.skip_exist = true;
        options.content_only = true;

        std::fs::create_dir_all(dst)?;
        fs_extra::dir::copy(src, dst, &options)
            .map(|_| ())
            .map_err(|e| std::io::Error::other(e.to_string()))
    }

    fn retailflow(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("retailflow"));
        cmd.current_dir(&self.root)
            .env_remove("RETAILFLOW_INPUT_PATH")
            .env_remove("RETAILFLOW_OUTPUT_PATH");
        cmd
    }

    fn input(&self, file: &str) -> PathBuf {
        self.root.join("data/input").join(file)
    }

    fn output(&self, file: &str) -> PathBuf {
        self.root.join("data/output").join(file)
    }

    fn open_store(&self) -> Result<Connection> {
        Ok(Connection::open(self.output("retail_data.duckdb"))?)
    }
}

fn count(conn: &Connection, table: &str) -> Result<i64> {
    Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?)
}

fn revenue_rows(conn: &Connection) -> Result<Vec<(i64, f64, i64)>> {
    let mut stmt = conn.prepare(
        "SELECT customer_id, ROUND(total_amount, 2), transaction_count \
         FROM customer_revenue ORDER BY customer_id",
    )?;
    let rows = stmt
        .query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

#[test]
fn test_run_loads_clean_snapshot() -> Result<()> {
    let env = RetailTestEnv::new()?;

    env.retailflow()
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("SUCCESS"));

    let conn = env.open_store()?;
    let counts = ["customers", "products", "transactions", "customer_revenue"]
        .iter()
        .map(|t| Ok(format!("{t}: {}", count(&conn, t)?)))
        .collect::<Result<Vec<_>>>()?
        .join("\n");
    insta::assert_snapshot!(counts, @r"
    customers: 3
    products: 4
    transactions: 4
    customer_revenue: 3
    ");

    assert_eq!(
        revenue_rows(&conn)?,
        vec![(1, 1324.98, 2), (3, 179.0, 1), (4, 74.97, 1)]
    );

    // Normalization survived the load
    let category: String = conn.query_row(
        "SELECT category FROM products WHERE product_id = 103",
        [],
        |r| r.get(0),
    )?;
    assert_eq!(category, "Office Supplies");
    let last_name: String = conn.query_row(
        "SELECT last_name FROM customers WHERE customer_id = 4",
        [],
        |r| r.get(0),
    )?;
    assert_eq!(last_name, "Unknown");
    Ok(())
}

#[test]
fn test_run_writes_quality_report_and_export() -> Result<()> {
    let env = RetailTestEnv::new()?;
    env.retailflow().arg("run").assert().success();

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(env.output("data_quality_report.json"))?)?;
    assert!(report["generated_at"].is_string());
    assert_eq!(report["tables"]["transactions"]["record_count"], 4);
    assert_eq!(report["revenue_metrics"]["total_revenue"], 1578.95);
    assert_eq!(report["revenue_metrics"]["max_customer_revenue"], 1324.98);
    assert_eq!(report["revenue_metrics"]["min_customer_revenue"], 74.97);
    assert_eq!(report["revenue_metrics"]["avg_customer_revenue"], 526.32);
    assert_eq!(report["integrity"]["orphaned_customer_transactions"], 1);
    assert_eq!(report["integrity"]["orphaned_product_transactions"], 1);
    assert_eq!(report["cleaning"][2]["dropped"]["duplicate"], 1);

    let export = fs::read_to_string(env.output("customer_revenue.csv"))?;
    let mut lines = export.lines();
    assert_eq!(
        lines.next(),
        Some("customer_id,total_amount,transaction_count")
    );
    assert_eq!(lines.count(), 3);
    Ok(())
}

#[test]
fn test_run_twice_is_idempotent() -> Result<()> {
    let env = RetailTestEnv::new()?;

    env.retailflow().arg("run").assert().success();
    let first = revenue_rows(&env.open_store()?)?;
    let first_export = fs::read(env.output("customer_revenue.csv"))?;

    env.retailflow().arg("run").assert().success();
    let second = revenue_rows(&env.open_store()?)?;
    let second_export = fs::read(env.output("customer_revenue.csv"))?;

    assert_eq!(first, second);
    assert_eq!(first_export, second_export);
    Ok(())
}

#[test]
fn test_run_skip_export() -> Result<()> {
    let env = RetailTestEnv::new()?;

    env.retailflow()
        .args(["run", "--skip-export"])
        .assert()
        .success();

    assert!(env.output("data_quality_report.json").exists());
    assert!(!env.output("customer_revenue.csv").exists());
    Ok(())
}

#[test]
fn test_run_output_dir_override() -> Result<()> {
    let env = RetailTestEnv::new()?;
    let out = env.root.join("elsewhere");

    env.retailflow()
        .arg("run")
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success();

    assert!(out.join("retail_data.duckdb").exists());
    assert!(!env.output("retail_data.duckdb").exists());
    Ok(())
}

#[test]
fn test_missing_input_fails_before_processing() -> Result<()> {
    let env = RetailTestEnv::new()?;
    fs::remove_file(env.input("transactions.csv"))?;
    fs::remove_file(env.input("products.csv"))?;

    env.retailflow()
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("transactions.csv"))
        .stderr(predicate::str::contains("products.csv"));

    env.retailflow()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("PREFLIGHT FAILED"));

    assert!(!env.output("retail_data.duckdb").exists());
    Ok(())
}

#[test]
fn test_failed_run_keeps_previous_snapshot() -> Result<()> {
    let env = RetailTestEnv::new()?;
    env.retailflow().arg("run").assert().success();

    // A header without a required column is a structural failure.
    fs::write(
        env.input("products.csv"),
        "product_id,product_name,price\n101,Laptop,10.00\n",
    )?;
    env.retailflow()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("category"));

    let conn = env.open_store()?;
    assert_eq!(count(&conn, "products")?, 4);
    assert_eq!(count(&conn, "customer_revenue")?, 3);
    Ok(())
}

#[test]
fn test_validation_rejects_empty_relations() -> Result<()> {
    let env = RetailTestEnv::new()?;
    fs::write(
        env.input("transactions.csv"),
        "transaction_id,customer_id,product_id,transaction_date,quantity,amount\n",
    )?;

    env.retailflow()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("VALIDATION FAILED"))
        .stderr(predicate::str::contains("customer_revenue is not empty"));

    env.retailflow()
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("transactions is not empty"));
    Ok(())
}

#[test]
fn test_read_side_commands() -> Result<()> {
    let env = RetailTestEnv::new()?;
    env.retailflow().arg("run").assert().success();

    env.retailflow()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS"));

    env.retailflow()
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("total_revenue"))
        .stdout(predicate::str::contains("1578.95"));

    env.retailflow()
        .args(["query", "SELECT email FROM customers ORDER BY customer_id"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bob.johnson@example.com"))
        .stdout(predicate::str::contains("(3 rows)"));

    let dest = env.root.join("exports/customers.csv");
    env.retailflow()
        .arg("export")
        .arg("customers")
        .arg(&dest)
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&dest)?.lines().count(), 4);

    env.retailflow()
        .args(["export", "orders", "orders.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown relation"));
    Ok(())
}

#[test]
fn test_read_side_commands_require_a_store() -> Result<()> {
    let env = RetailTestEnv::new()?;

    env.retailflow()
        .arg("summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Database not found"));

    // No empty database was created as a side effect
    assert!(!env.output("retail_data.duckdb").exists());
    Ok(())
}
