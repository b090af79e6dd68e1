//! replace and checksum

use colored::Colorize;

use b4x_core::ActionContext;
use b4x_core::actions::{checksum_file, replace_in_file};

use crate::error::Result;

pub fn run_replace(
    ctx: &ActionContext,
    source: &str,
    search: Option<&str>,
    replace: Option<&str>,
) -> Result<()> {
    println!("{} Replace", "=>".blue().bold());
    let outcome = replace_in_file(ctx, source, search, replace)?;
    if outcome.changed {
        println!("{} Updated {}", "OK".green().bold(), outcome.path);
    } else {
        println!("{} Nothing to replace in {}", "OK".green().bold(), outcome.path);
    }
    Ok(())
}

pub fn run_checksum(ctx: &ActionContext, source: &str, destination: Option<&str>) -> Result<()> {
    println!("{} Checksum", "=>".blue().bold());
    let outcome = checksum_file(ctx, source, destination)?;
    println!("{}  {}", outcome.hex, outcome.source.file_name().unwrap_or_default());
    if let Some(path) = &outcome.written {
        println!("{} Wrote {}", "OK".green().bold(), path);
    }
    Ok(())
}
