// retailflow/src/commands/check.rs
//
// USE CASE: Preflight only (are all the input files there?).

use retailflow_core::application::check_input_files;

use super::{render_error, resolve_config};
use crate::cli::ProjectArgs;

pub fn execute(project: ProjectArgs) -> anyhow::Result<()> {
    let config = resolve_config(&project)?;
    println!("📂 Checking input files in {}", config.input_path.display());

    match check_input_files(&config.input_path) {
        Ok(found) => {
            for path in found {
                println!("   ✅ {}", path.display());
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", render_error(e));
            std::process::exit(1);
        }
    }
}
