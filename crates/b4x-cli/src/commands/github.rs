//! The github command: mirror the project folder to a repository
//!
//! Steps, in order: resolve the target, resolve the API key, check the
//! repository exists, make sure `.gitattributes` and the ignore file exist,
//! list the remote once, plan, then execute (unless `--dry-run`).

use colored::Colorize;

use b4x_core::sync::{
    ApiKey, CredentialChain, DEFAULT_IGNORE_FILE, FileCredential, SyncPlan,
    ensure_attributes_file,
};
use b4x_core::{
    ActionContext, ActionOutcome, IgnoreRules, RemoteStore, RemoteTarget, SyncExecutor,
    SyncPlanner, SyncReport,
};
use b4x_fs::{ProjectLayout, ProjectPath};
use b4x_github::GitHubClient;

use crate::error::Result;
use crate::interactive;

/// Flags of the github command.
#[derive(Debug, Clone, Default)]
pub struct GitHubArgs {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub branch: Option<String>,
    pub dry_run: bool,
    pub json: bool,
    pub api_url: String,
}

/// Run the github command
pub fn run_github(ctx: &ActionContext, args: GitHubArgs) -> Result<()> {
    let target = resolve_target(ctx, &args)?;
    println!(
        "{} Syncing {} to {}",
        "=>".blue().bold(),
        ctx.layout().project_dir(),
        target.to_string().cyan()
    );

    let key = resolve_api_key(ctx.layout())?;
    let client = GitHubClient::with_base_url(key, &args.api_url)?;
    sync_project(ctx, &client, &target, args.dry_run, args.json).map(|_| ())
}

/// Owner, repository and branch from flags, then settings, then defaults.
pub fn resolve_target(ctx: &ActionContext, args: &GitHubArgs) -> Result<RemoteTarget> {
    let settings = &ctx.config().github;
    let owner = args
        .owner
        .clone()
        .or_else(|| settings.owner.clone())
        .ok_or_else(|| b4x_core::Error::MissingSetting {
            name: "owner".to_string(),
            hint: "Pass --owner or set github.owner in b4x-actions.toml.".to_string(),
        })?;
    let repo = args
        .repo
        .clone()
        .or_else(|| settings.repo.clone())
        .unwrap_or_else(|| ctx.layout().project_name());
    let branch = args
        .branch
        .clone()
        .unwrap_or_else(|| settings.branch.clone());
    Ok(RemoteTarget::new(owner, repo, branch))
}

/// Walk the credential chain, prompting on a terminal when it comes up
/// empty. A prompted key is saved next to the executable.
pub fn resolve_api_key(layout: &ProjectLayout) -> Result<ApiKey> {
    let chain = CredentialChain::standard(layout.install_dir());
    if let Some(key) = chain.resolve()? {
        return Ok(key);
    }

    let missing = || b4x_core::Error::Credentials {
        message: format!(
            "no GitHub API key found (checked {})",
            chain.sources().join(", ")
        ),
    };
    if !interactive::can_prompt() {
        return Err(missing().into());
    }

    let key = interactive::prompt_api_key()?.ok_or_else(missing)?;
    if let Some(dir) = layout.install_dir() {
        FileCredential::new(dir.join(ProjectPath::ApiKeyFile.as_str())).store(&key)?;
    }
    Ok(key)
}

/// Sync the project folder to `target` through `store`.
///
/// Returns `None` for a dry run. Per-file failures are reported but do not
/// make this fail; only an aborted run does.
pub fn sync_project<S: RemoteStore + ?Sized>(
    ctx: &ActionContext,
    store: &S,
    target: &RemoteTarget,
    dry_run: bool,
    json: bool,
) -> Result<Option<SyncReport>> {
    let settings = &ctx.config().github;
    let root = ctx.layout().project_dir();

    if !store.exists(target)? {
        return Err(b4x_core::Error::RepositoryNotFound {
            target: target.clone(),
        }
        .into());
    }

    let ignore_path = root.join(&settings.ignore_file);
    let rules = if dry_run {
        // Dry runs leave the project untouched
        if ignore_path.is_file() {
            IgnoreRules::parse(&b4x_fs::io::read_text(&ignore_path)?)?
        } else {
            IgnoreRules::parse(DEFAULT_IGNORE_FILE)?
        }
    } else {
        if ensure_attributes_file(root)? {
            println!("   {} {}", "+".green(), ProjectPath::AttributesFile);
        }
        IgnoreRules::load_or_create(&ignore_path)?
    };

    let listing = store.list(target)?;
    let planner = SyncPlanner::new(rules).with_protected(settings.protected.clone());
    let plan = planner.plan_directory(root, &listing)?;
    print_skipped(&plan);

    if dry_run {
        if json {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        } else {
            print_plan(&plan);
        }
        return Ok(None);
    }

    let native_root = root.to_native();
    let report = SyncExecutor::new(store, target).execute(
        &plan,
        |path| std::fs::read(native_root.join(path)),
        |outcome| {
            if !json {
                print_outcome(outcome);
            }
        },
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(Some(report))
}

fn print_skipped(plan: &SyncPlan) {
    for path in &plan.unchanged {
        println!("   {} {}", "=".dimmed(), path.dimmed());
    }
    for path in &plan.ignored {
        println!("   {} {} (ignored)", "-".dimmed(), path.dimmed());
    }
    for path in &plan.protected {
        println!("   {} {} (protected)", "-".dimmed(), path.dimmed());
    }
    for file in &plan.unreadable {
        println!("   {} {}: {}", "!".yellow(), file.path, file.message);
    }
}

fn print_plan(plan: &SyncPlan) {
    if plan.is_empty() {
        println!("{} Already in sync. No changes needed.", "OK".green().bold());
        return;
    }
    println!("{} Would make these changes:", "DRY-RUN".yellow().bold());
    for action in &plan.actions {
        println!("   {} {} {}", marker(action.verb()), action.verb(), action.path());
    }
}

fn print_outcome(outcome: &ActionOutcome) {
    let action = &outcome.action;
    match &outcome.error {
        None => println!("   {} {} {}", marker(action.verb()), action.verb(), action.path()),
        Some(error) => println!(
            "   {} {} {}: {}",
            "!".red(),
            action.verb(),
            action.path(),
            error.red()
        ),
    }
}

fn print_summary(report: &SyncReport) {
    let counts = format!(
        "{} created, {} updated, {} deleted, {} unchanged",
        report.created(),
        report.updated(),
        report.deleted(),
        report.unchanged
    );
    if report.success {
        println!("{} Sync complete: {}", "OK".green().bold(), counts);
    } else {
        println!(
            "{} Sync finished with {} failed call{}: {}",
            "ERROR".red().bold(),
            report.failed(),
            if report.failed() == 1 { "" } else { "s" },
            counts
        );
    }
}

fn marker(verb: &str) -> colored::ColoredString {
    match verb {
        "create" => "+".green(),
        "update" => "~".yellow(),
        _ => "-".red(),
    }
}
