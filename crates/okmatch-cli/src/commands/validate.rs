//! The `okmatch validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(paths: Vec<PathBuf>) -> Result<()> {
    let mut failed = 0usize;

    for path in &paths {
        match okmatch_core::load_answers(path) {
            Ok(collection) => {
                println!(
                    "{}: {} answered question(s)",
                    path.display(),
                    collection.len()
                );
            }
            Err(e) => {
                println!("{}: INVALID: {e:#}", path.display());
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} answers file(s) invalid", paths.len());
    }

    println!("All answers files valid.");
    Ok(())
}
