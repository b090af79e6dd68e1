//! The `-action <name> -key value` form used by existing build scripts
//!
//! B4X project files call the tool as
//!
//! ```text
//! #CustomBuildAction: 2, b4x-actions.exe, -action copy -source %JAR% -destination C:\out
//! ```
//!
//! Such argument lists are rewritten to the subcommand form before clap sees
//! them (`copy --source=%JAR% --destination=C:\out`).

/// Outcome of [`normalize_args`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// Arguments to hand to clap
    Args(Vec<String>),
    /// `-action` was given but names no known action
    NoAction,
}

/// Legacy action name to subcommand.
const ACTIONS: &[(&str, &str)] = &[
    ("compileonly", "compile-only"),
    ("copyjar", "copy-jar"),
    ("copy", "copy"),
    ("buildtime", "build-time"),
    ("updateversion", "update-version"),
    ("zip", "zip"),
    ("backup", "backup"),
    ("replace", "replace"),
    ("checksum", "checksum"),
    ("github", "github"),
];

/// Legacy option to long flag.
const OPTIONS: &[(&str, &str)] = &[
    ("-directory", "--directory"),
    ("-source", "--source"),
    ("-destination", "--destination"),
    ("-dateformat", "--date-format"),
    ("-timeformat", "--time-format"),
    ("-search", "--search"),
    ("-replace", "--replace"),
    ("-owner", "--owner"),
    ("-repo", "--repo"),
    ("-branch", "--branch"),
];

/// Rewrite a legacy argument list; anything without `-action` passes through.
///
/// Option names are case-insensitive and values are trimmed. Unknown options
/// are dropped.
pub fn normalize_args<I>(args: I) -> Normalized
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    let is_legacy = args
        .iter()
        .skip(1)
        .any(|arg| arg.eq_ignore_ascii_case("-action"));
    if !is_legacy {
        return Normalized::Args(args);
    }

    let mut action = None;
    let mut options = Vec::new();
    let mut i = 1;
    while i < args.len() {
        let key = args[i].to_lowercase();
        let Some(value) = args.get(i + 1) else {
            break;
        };
        if key == "-action" {
            action = Some(value.trim().to_lowercase());
            i += 2;
        } else if let Some((_, flag)) = OPTIONS.iter().find(|(legacy, _)| *legacy == key) {
            // One argument, so values starting with `-` stay values
            options.push(format!("{flag}={}", value.trim()));
            i += 2;
        } else {
            tracing::debug!(arg = %args[i], "Ignoring legacy argument");
            i += 1;
        }
    }

    let Some(command) = action.and_then(|name| {
        ACTIONS
            .iter()
            .find(|(legacy, _)| *legacy == name)
            .map(|(_, command)| command.to_string())
    }) else {
        return Normalized::NoAction;
    };

    let program = args.first().cloned().unwrap_or_default();
    let mut normalized = vec![program, command];
    normalized.extend(options);
    Normalized::Args(normalized)
}
