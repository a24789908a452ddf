// retailflow/src/commands/export.rs
//
// USE CASE: Export one relation of an existing store as CSV.

use std::path::PathBuf;

use retailflow_core::domain::model::Relation;
use retailflow_core::infrastructure::adapters::DuckDBStore;
use retailflow_core::ports::store::{Store, with_session};

use super::{describe, render_error, resolve_db_path};
use crate::cli::StoreArgs;

pub fn execute(relation: String, destination: PathBuf, args: StoreArgs) -> anyhow::Result<()> {
    // Unknown names are rejected before the store is even opened.
    let relation: Relation = match relation.parse() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", describe(&e));
            std::process::exit(1);
        }
    };

    let db_path = resolve_db_path(&args)?;
    let mut store = DuckDBStore::new(db_path);

    match with_session(&mut store, |s| s.export_csv(relation, &destination)) {
        Ok(rows) => {
            println!(
                "📤 Exported {} rows of {} to {}",
                rows,
                relation,
                destination.display()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Export failed:\n{}", render_error(e));
            std::process::exit(1);
        }
    }
}
