use crate::error::CliError;
use clap::{Args, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bugsnag-cli")]
#[command(about = "Command line interface for the Bugsnag Data Access API")]
#[command(
    long_about = "Query organizations, projects, errors, events and trends from Bugsnag. \
                  Output is JSON by default for scripts and agents; use --format table for humans."
)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags accepted by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file (default: <config dir>/bugsnag-cli/config.toml)
    #[arg(long, global = true, env = "BUGSNAG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Bugsnag personal auth token
    #[arg(short = 't', long, global = true, env = "BUGSNAG_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Output format: json or table
    #[arg(short, long, global = true, env = "BUGSNAG_FORMAT")]
    pub format: Option<String>,

    /// Number of results per page (1-100)
    #[arg(long, global = true, env = "BUGSNAG_PER_PAGE")]
    pub per_page: Option<u32>,

    /// Follow pagination links and fetch every page
    #[arg(short, long, global = true)]
    pub all_pages: bool,

    /// Bugsnag API base URL
    #[arg(long, global = true, env = "BUGSNAG_BASE_URL")]
    pub base_url: Option<String>,

    /// Stop with an error after this many pages when --all-pages is set
    #[arg(long, global = true)]
    pub max_pages: Option<usize>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save the API token and defaults to the config file
    Configure {
        /// Default output format (json or table)
        #[arg(long)]
        default_format: Option<String>,
        /// Default API base URL
        #[arg(long)]
        default_base_url: Option<String>,
        /// Default results per page
        #[arg(long)]
        default_per_page: Option<u32>,
    },
    /// Organizations the token has access to
    Organizations {
        #[command(subcommand)]
        command: OrganizationCommands,
    },
    /// Projects of an organization
    Projects {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Errors of a project
    Errors {
        #[command(subcommand)]
        command: ErrorCommands,
    },
    /// Individual error occurrences
    Events {
        #[command(subcommand)]
        command: EventCommands,
    },
    /// Comments on an error
    Comments {
        #[command(subcommand)]
        command: CommentCommands,
    },
    /// Releases of a project
    Releases {
        #[command(subcommand)]
        command: ReleaseCommands,
    },
    /// Members of an organization
    Collaborators {
        #[command(subcommand)]
        command: CollaboratorCommands,
    },
    /// Event counts over time
    Trends {
        #[command(subcommand)]
        command: TrendCommands,
    },
    /// Session stability metrics
    Stability {
        #[command(subcommand)]
        command: StabilityCommands,
    },
    /// Print the version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum OrganizationCommands {
    /// List organizations
    List,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List projects in an organization
    List {
        /// Organization ID (required)
        #[arg(long)]
        org_id: Option<String>,
    },
    /// Show one project
    Get {
        /// Project ID (required)
        #[arg(long)]
        project_id: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ErrorCommands {
    /// List errors in a project
    List {
        /// Project ID (required)
        #[arg(long)]
        project_id: Option<String>,
        /// Filter by status (open, fixed, snoozed, ignored)
        #[arg(long, default_value = "")]
        status: String,
        /// Filter by severity (error, warning, info)
        #[arg(long, default_value = "")]
        severity: String,
        /// Sort field (last_seen, first_seen, users, events, unsorted)
        #[arg(long, default_value = "")]
        sort: String,
        /// Sort direction (asc, desc)
        #[arg(long, default_value = "")]
        direction: String,
    },
    /// Show one error
    Get {
        /// Project ID (required)
        #[arg(long)]
        project_id: Option<String>,
        /// Error ID (required)
        #[arg(long)]
        error_id: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum EventCommands {
    /// List events of a project, or of one error when --error-id is given
    List {
        /// Project ID (required)
        #[arg(long)]
        project_id: Option<String>,
        /// Error ID
        #[arg(long, default_value = "")]
        error_id: String,
    },
    /// Show one event with its full payload
    Get {
        /// Project ID (required)
        #[arg(long)]
        project_id: Option<String>,
        /// Event ID (required)
        #[arg(long)]
        event_id: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CommentCommands {
    /// List comments on an error
    List {
        /// Project ID (required)
        #[arg(long)]
        project_id: Option<String>,
        /// Error ID (required)
        #[arg(long)]
        error_id: Option<String>,
    },
    /// Add a comment to an error
    Create {
        /// Project ID (required)
        #[arg(long)]
        project_id: Option<String>,
        /// Error ID (required)
        #[arg(long)]
        error_id: Option<String>,
        /// Comment text (required)
        #[arg(long)]
        message: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReleaseCommands {
    /// List releases of a project
    List {
        /// Project ID (required)
        #[arg(long)]
        project_id: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CollaboratorCommands {
    /// List collaborators in an organization
    List {
        /// Organization ID (required)
        #[arg(long)]
        org_id: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TrendCommands {
    /// Error trend buckets for a project
    Project {
        /// Project ID (required)
        #[arg(long)]
        project_id: Option<String>,
        /// Time resolution (1h, 1d, ...)
        #[arg(long, default_value = "")]
        resolution: String,
        /// Number of trend buckets
        #[arg(long, default_value_t = 0)]
        buckets_count: u32,
    },
    /// Trend buckets for one error
    Error {
        /// Project ID (required)
        #[arg(long)]
        project_id: Option<String>,
        /// Error ID (required)
        #[arg(long)]
        error_id: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum StabilityCommands {
    /// Stability timeline for a project
    Trend {
        /// Project ID (required)
        #[arg(long)]
        project_id: Option<String>,
        /// Release stage (production, staging, ...)
        #[arg(long, default_value = "")]
        release_stage: String,
    },
}

/// Convert a clap parse failure into a usage error, keeping the message and
/// dropping clap's `error: ` prefix and usage footer.
pub fn usage_error(err: &clap::Error) -> CliError {
    let rendered = err.to_string();
    let message = rendered
        .lines()
        .map(str::trim)
        .take_while(|line| !line.is_empty() && !line.starts_with("Usage:"))
        .collect::<Vec<_>>()
        .join(" ");
    let message = message
        .strip_prefix("error: ")
        .unwrap_or(&message)
        .to_string();
    CliError::Usage { message }
}

/// Last `-f`/`--format` value in raw arguments, for reporting errors when parsing fails.
pub fn format_from_args<I>(args: I) -> Option<String>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args
        .into_iter()
        .map(|arg| arg.to_string_lossy().into_owned());
    let mut format = None;

    while let Some(arg) = args.next() {
        if arg == "--" {
            break;
        }
        if arg == "-f" || arg == "--format" {
            format = args.next();
        } else if let Some(value) = arg.strip_prefix("--format=") {
            format = Some(value.to_string());
        } else if let Some(value) = arg.strip_prefix("-f").filter(|v| !v.is_empty()) {
            format = Some(value.trim_start_matches('=').to_string());
        }
    }
    format
}
