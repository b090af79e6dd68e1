//! compile-only, build-time and update-version

use colored::Colorize;

use b4x_core::ActionContext;
use b4x_core::actions::{update_version, write_build_stamp};

use crate::error::{CliError, Result};

/// Print a notice and fail, so the IDE stops after compiling.
pub fn run_compile_only() -> Result<()> {
    println!("{} Compile only", "=>".blue().bold());
    Err(CliError::CompileOnly)
}

pub fn run_build_time(
    ctx: &ActionContext,
    date_format: Option<&str>,
    time_format: Option<&str>,
) -> Result<()> {
    println!("{} Build time", "=>".blue().bold());
    let stamp = write_build_stamp(ctx, date_format, time_format)?;
    println!(
        "{} Wrote {} to {}",
        "OK".green().bold(),
        stamp.text.cyan(),
        stamp.path
    );
    Ok(())
}

pub fn run_update_version(ctx: &ActionContext) -> Result<()> {
    println!("{} Update version", "=>".blue().bold());
    let bump = update_version(ctx)?;
    match &bump.previous {
        Some(previous) => println!(
            "{} Version {} -> {}",
            "OK".green().bold(),
            previous,
            bump.current.to_string().cyan()
        ),
        None => println!(
            "{} Created {} with version {}",
            "OK".green().bold(),
            bump.path,
            bump.current.to_string().cyan()
        ),
    }
    Ok(())
}
