//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use b4x_github::DEFAULT_API_BASE;

/// B4X build actions - helper steps for the B4X IDE build pipeline
///
/// Runs from the project's Objects folder, as the IDE does for custom build
/// actions. The legacy `-action <name> -key value` form is accepted too.
#[derive(Parser, Debug)]
#[command(name = "b4x-actions")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Objects folder of the project (default: current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub objects_dir: Option<PathBuf>,

    /// Folder holding github_api_key.txt (default: folder of the executable)
    #[arg(long, global = true, value_name = "DIR", env = "B4X_ACTIONS_INSTALL_DIR", hide = true)]
    pub install_dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Stop the build after compilation (always exits with code 1)
    CompileOnly,

    /// Copy the first .jar of the Objects folder into a directory
    CopyJar {
        /// Target directory
        #[arg(long)]
        directory: String,
    },

    /// Copy a file or folder
    ///
    /// Paths starting with Files or Objects resolve inside those folders,
    /// other relative paths inside Objects. %VARIABLES% are expanded.
    ///
    /// Examples:
    ///   b4x-actions copy --source %JAR% --destination C:\Releases
    ///   b4x-actions copy --source Files/help --destination D:\Site
    Copy {
        #[arg(long)]
        source: String,
        #[arg(long)]
        destination: String,
    },

    /// Write the build date and time to Files/build.txt
    BuildTime {
        /// .NET style date format (default: yyyy-MM-dd)
        #[arg(long)]
        date_format: Option<String>,
        /// .NET style time format (default: HH:mm:ss)
        #[arg(long)]
        time_format: Option<String>,
    },

    /// Increment the build number in Files/version.txt
    UpdateVersion,

    /// Zip a file or folder
    ///
    /// A destination ending in .zip names the archive, otherwise the archive
    /// is created in the destination folder and named after the source.
    Zip {
        #[arg(long)]
        source: String,
        #[arg(long)]
        destination: String,
    },

    /// Move IDE backup archives out of the project
    Backup {
        #[arg(long)]
        destination: String,
        /// Folder holding the archives (default: AutoBackups)
        #[arg(long)]
        source: Option<String>,
    },

    /// Expand %VARIABLES% in a text file, optionally replacing text
    ///
    /// Examples:
    ///   b4x-actions replace --source Files/about.html
    ///   b4x-actions replace --source Files/about.html --search 0.0.0 --replace %VERSION%
    Replace {
        #[arg(long)]
        source: String,
        #[arg(long, requires = "replace")]
        search: Option<String>,
        #[arg(long, requires = "search")]
        replace: Option<String>,
    },

    /// Print the SHA-256 of a file, optionally writing it to a file
    Checksum {
        #[arg(long)]
        source: String,
        /// File, or folder to receive <name>.sha256
        #[arg(long)]
        destination: Option<String>,
    },

    /// Mirror the project folder to a GitHub repository
    ///
    /// Uploads new and changed files and deletes remote files that no
    /// longer exist locally. Files matching .gitignore are not uploaded and
    /// README.md is never deleted.
    ///
    /// Examples:
    ///   b4x-actions github --owner octocat
    ///   b4x-actions github --owner octocat --repo MyApp --dry-run
    Github {
        /// Repository owner (default: github.owner from b4x-actions.toml)
        #[arg(long)]
        owner: Option<String>,
        /// Repository name (default: project name)
        #[arg(long)]
        repo: Option<String>,
        /// Branch (default: main)
        #[arg(long)]
        branch: Option<String>,
        /// Show what would change without calling the API for changes
        #[arg(long)]
        dry_run: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// API root, for GitHub Enterprise
        #[arg(long, env = "B4X_ACTIONS_API_URL", default_value = DEFAULT_API_BASE)]
        api_url: String,
    },
}
