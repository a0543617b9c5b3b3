//! Implementation of the `promptbatch skeleton` command.

use super::load_template;
use crate::cli::SkeletonArgs;
use crate::context::require_initialized_library;
use crate::csv::encode_skeleton;
use crate::error::Result;
use crate::fs::atomic_write_file;
use crate::store::FsLibrary;

/// Execute the `promptbatch skeleton` command.
pub fn cmd_skeleton(args: SkeletonArgs) -> Result<()> {
    let ctx = require_initialized_library()?;
    let library = FsLibrary::new(ctx);
    let template = load_template(&library, &args.template)?;

    let csv = encode_skeleton(&template)?;
    match &args.output {
        Some(path) => {
            atomic_write_file(path, &csv)?;
            println!("Skeleton written to {}", path.display());
        }
        None => print!("{}", csv),
    }

    Ok(())
}
