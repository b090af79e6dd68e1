//! B4X build actions CLI
//!
//! Helper steps for the B4X IDE build pipeline: copy, zip, stamp, version,
//! checksum and GitHub sync.

mod cli;
mod commands;
mod context;
mod error;
mod interactive;
mod legacy;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use commands::GitHubArgs;
use error::Result;
use legacy::Normalized;

fn main() {
    let args = std::env::args_os().map(|arg| arg.to_string_lossy().into_owned());
    let args = match legacy::normalize_args(args) {
        Normalized::Args(args) => args,
        Normalized::NoAction => {
            println!("No action supplied");
            return;
        }
    };

    let cli = Cli::parse_from(args);
    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn init_tracing(verbose: bool) {
    // Logs go to stderr; stdout carries the per-file report
    let installed = if verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber).is_ok()
    } else if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok()
    } else {
        true
    };
    if !installed {
        eprintln!("warning: could not install log subscriber");
    }
}

fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose);
    tracing::debug!("Verbose mode enabled");

    let Some(command) = cli.command else {
        println!("No action supplied");
        println!();
        println!("Run {} for available commands.", "b4x-actions --help".cyan());
        return Ok(());
    };

    // Needs no project
    if command == Commands::CompileOnly {
        return commands::run_compile_only();
    }

    let ctx = context::load(cli.objects_dir.as_deref(), cli.install_dir.as_deref())?;
    execute_command(&ctx, command)
}

fn execute_command(ctx: &b4x_core::ActionContext, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::CompileOnly => commands::run_compile_only(),
        Commands::CopyJar { directory } => commands::run_copy_jar(ctx, &directory),
        Commands::Copy {
            source,
            destination,
        } => commands::run_copy(ctx, &source, &destination),
        Commands::BuildTime {
            date_format,
            time_format,
        } => commands::run_build_time(ctx, date_format.as_deref(), time_format.as_deref()),
        Commands::UpdateVersion => commands::run_update_version(ctx),
        Commands::Zip {
            source,
            destination,
        } => commands::run_zip(ctx, &source, &destination),
        Commands::Backup {
            destination,
            source,
        } => commands::run_backup(ctx, &destination, source.as_deref()),
        Commands::Replace {
            source,
            search,
            replace,
        } => commands::run_replace(ctx, &source, search.as_deref(), replace.as_deref()),
        Commands::Checksum {
            source,
            destination,
        } => commands::run_checksum(ctx, &source, destination.as_deref()),
        Commands::Github {
            owner,
            repo,
            branch,
            dry_run,
            json,
            api_url,
        } => commands::run_github(
            ctx,
            GitHubArgs {
                owner,
                repo,
                branch,
                dry_run,
                json,
                api_url,
            },
        ),
    }
}
