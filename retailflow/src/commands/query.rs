// retailflow/src/commands/query.rs
//
// USE CASE: Execute a raw SQL query (ad-hoc) and render it as a table.

use comfy_table::{Table, presets::UTF8_FULL};

use retailflow_core::application::execute_query;
use retailflow_core::infrastructure::adapters::DuckDBStore;
use retailflow_core::ports::store::with_session;

use super::{render_error, resolve_db_path};
use crate::cli::StoreArgs;

pub fn execute(query: String, args: StoreArgs) -> anyhow::Result<()> {
    let db_path = resolve_db_path(&args)?;
    let mut store = DuckDBStore::new(db_path);

    let result = match with_session(&mut store, |s| execute_query(&*s, &query)) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("❌ Query failed:\n{}", render_error(e));
            std::process::exit(1);
        }
    };

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(result.columns.clone());
    for row in &result.rows {
        table.add_row(row.clone());
    }
    println!("{table}");
    println!("({} rows)", result.rows.len());
    Ok(())
}
