// retailflow/src/commands/validate.rs
//
// USE CASE: Post-load validation against an existing store.

use retailflow_core::application::validate_output;
use retailflow_core::infrastructure::adapters::DuckDBStore;
use retailflow_core::ports::store::with_session;

use super::{render_error, resolve_db_path};
use crate::cli::StoreArgs;

pub fn execute(args: StoreArgs) -> anyhow::Result<()> {
    let db_path = resolve_db_path(&args)?;
    let mut store = DuckDBStore::new(db_path);

    match with_session(&mut store, |s| validate_output(&*s)) {
        Ok(assertions) => {
            for a in assertions {
                println!("   ✅ PASS: {} ({})", a.name, a.observed);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ VALIDATION FAILED:\n{}", render_error(e));
            std::process::exit(1);
        }
    }
}
