use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::StoryCommands;

/// Command-line story editor for the kokpit project dashboard
///
/// Kokpit keeps user stories ("As a ..., I want to ..., so that ...") with
/// acceptance criteria, estimates and attachments. This tool creates and edits
/// them against the dashboard's REST API and can preview a story offline
/// before it is saved.
#[derive(Parser)]
#[command(version, about, name = "kokpit")]
pub struct Args {
    /// Path to the JSON config file. Defaults to
    /// $XDG_CONFIG_HOME/kokpit/config.json
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,

    /// Root URL of the dashboard API, e.g. http://localhost:8000/api
    #[arg(long, global = true, env = "KOKPIT_API_URL")]
    pub base_url: Option<String>,

    /// Bearer token sent with every request
    #[arg(long, global = true, env = "KOKPIT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the kokpit CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Create, edit and inspect user stories
    #[command(alias = "s")]
    Story {
        #[command(subcommand)]
        command: StoryCommands,
    },
}
