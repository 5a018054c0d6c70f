use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Maintains the plugin registry and its README listing
#[derive(Parser, Debug)]
#[command(
    name = "plugin-registry",
    about = "Maintains the plugin registry and its README listing",
    version,
    long_about = "plugin-registry keeps a JSON registry of plugins (badges.json) and the \
                  README listing that renders it in sync with the latest GitHub releases.\n\n\
                  The GitHub token is read from PLUGIN_REGISTRY_GITHUB_TOKEN or GITHUB_TOKEN."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,

    #[arg(
        long,
        global = true,
        value_name = "FILE",
        help = "Registry JSON file [env: PLUGIN_REGISTRY_FILE, default: badges.json]"
    )]
    pub registry: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        value_name = "FILE",
        help = "Listing document [env: PLUGIN_REGISTRY_DOCUMENT, default: README.md]"
    )]
    pub document: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Add a plugin to the registry and the listing",
        long_about = "Appends a plugin record to the registry and inserts its entry above \
                      the '<!-- END PLUGINS LIST -->' marker in the listing document. \
                      Values not given as options are prompted for.\n\n\
                      Examples:\n  \
                      plugin-registry add\n  \
                      plugin-registry add --repo-url https://github.com/acme/Widget --description \"A widget\" --fetch\n  \
                      plugin-registry add --repo-url https://github.com/acme/Widget --description \"A widget\" --state \"In Development\""
    )]
    Add(AddArgs),

    #[command(
        about = "Refresh the release dates of all registered plugins",
        long_about = "Looks up the latest release of every registered plugin and rewrites the \
                      registry when any release date changed. Names of updated plugins are \
                      printed to stdout.\n\n\
                      Examples:\n  \
                      plugin-registry update\n  \
                      plugin-registry update --dry-run"
    )]
    Update(UpdateArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct AddArgs {
    #[arg(long, value_name = "URL", help = "GitHub repository URL of the plugin")]
    pub repo_url: Option<String>,

    #[arg(long, value_name = "TEXT", help = "A brief description of the plugin")]
    pub description: Option<String>,

    #[arg(
        long,
        value_name = "TEXT",
        conflicts_with = "fetch",
        help = "Custom state shown instead of a release date (e.g. \"In Development\")"
    )]
    pub state: Option<String>,

    #[arg(long, help = "Fetch the release date without asking for a custom state")]
    pub fetch: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct UpdateArgs {
    #[arg(long, help = "Also refresh plugins whose release date was set by hand")]
    pub include_manual: bool,

    #[arg(long, help = "Report changes without writing the registry")]
    pub dry_run: bool,
}
