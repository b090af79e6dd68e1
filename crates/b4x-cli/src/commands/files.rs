//! copy-jar, copy, zip and backup

use colored::Colorize;

use b4x_core::ActionContext;
use b4x_core::actions::{copy_jar, copy_path, move_backups, zip_path};

use crate::error::Result;

pub fn run_copy_jar(ctx: &ActionContext, directory: &str) -> Result<()> {
    println!("{} Copy jar", "=>".blue().bold());
    match copy_jar(ctx, directory)? {
        Some(outcome) => println!(
            "{} Copied {} to {}",
            "OK".green().bold(),
            outcome.source.file_name().unwrap_or_default().cyan(),
            outcome.destination
        ),
        None => println!("{} No jar found in {}", "SKIP".yellow().bold(), ctx.layout().objects_dir()),
    }
    Ok(())
}

pub fn run_copy(ctx: &ActionContext, source: &str, destination: &str) -> Result<()> {
    println!("{} Copy", "=>".blue().bold());
    let outcome = copy_path(ctx, source, destination)?;
    println!(
        "{} Copied {} to {} ({} file{})",
        "OK".green().bold(),
        outcome.source,
        outcome.destination.to_string().cyan(),
        outcome.files,
        if outcome.files == 1 { "" } else { "s" }
    );
    Ok(())
}

pub fn run_zip(ctx: &ActionContext, source: &str, destination: &str) -> Result<()> {
    println!("{} Zip", "=>".blue().bold());
    let outcome = zip_path(ctx, source, destination)?;
    println!(
        "{} Zipped {} into {} ({} entr{})",
        "OK".green().bold(),
        outcome.source,
        outcome.archive.to_string().cyan(),
        outcome.entries,
        if outcome.entries == 1 { "y" } else { "ies" }
    );
    Ok(())
}

pub fn run_backup(ctx: &ActionContext, destination: &str, source: Option<&str>) -> Result<()> {
    println!("{} Backup", "=>".blue().bold());
    let outcome = move_backups(ctx, destination, source)?;
    if outcome.moved.is_empty() {
        println!("{} No backups in {}", "SKIP".yellow().bold(), outcome.source);
        return Ok(());
    }
    for path in &outcome.moved {
        println!("   {} {}", "+".green(), path);
    }
    println!(
        "{} Moved {} backup{} to {}",
        "OK".green().bold(),
        outcome.moved.len(),
        if outcome.moved.len() == 1 { "" } else { "s" },
        outcome.destination
    );
    Ok(())
}
