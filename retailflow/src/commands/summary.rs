// retailflow/src/commands/summary.rs
//
// USE CASE: Print record counts and revenue statistics of an existing store.

use comfy_table::{Table, presets::UTF8_FULL};

use retailflow_core::domain::model::Relation;
use retailflow_core::infrastructure::adapters::DuckDBStore;
use retailflow_core::ports::store::{Store, StoreSummary, with_session};

use super::{render_error, resolve_db_path};
use crate::cli::StoreArgs;

pub fn execute(args: StoreArgs) -> anyhow::Result<()> {
    let db_path = resolve_db_path(&args)?;
    let mut store = DuckDBStore::new(db_path);

    match with_session(&mut store, |s| s.summary()) {
        Ok(summary) => {
            print_summary(&summary);
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Summary failed:\n{}", render_error(e));
            std::process::exit(1);
        }
    }
}

pub fn print_summary(summary: &StoreSummary) {
    let mut tables = Table::new();
    tables.load_preset(UTF8_FULL).set_header(vec!["table", "record_count"]);
    for relation in Relation::ALL {
        tables.add_row(vec![
            relation.table_name().to_string(),
            summary.tables.get(relation).to_string(),
        ]);
    }

    let revenue = &summary.revenue;
    let mut metrics = Table::new();
    metrics.load_preset(UTF8_FULL).set_header(vec!["metric", "value"]);
    for (name, value) in [
        ("avg_customer_revenue", revenue.avg_customer_revenue),
        ("max_customer_revenue", revenue.max_customer_revenue),
        ("min_customer_revenue", revenue.min_customer_revenue),
        ("total_revenue", revenue.total_revenue),
    ] {
        metrics.add_row(vec![name.to_string(), format!("{:.2}", value)]);
    }

    println!("\n📊 Pipeline summary");
    println!("{tables}");
    println!("{metrics}");
}
