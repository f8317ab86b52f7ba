//! asdf - manage multiple runtime versions with a single CLI tool.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config_bridge;

use commands::{install, plugin, versions};

/// asdf - the multiple runtime version manager
#[derive(Parser)]
#[command(name = "asdf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage plugins
    Plugin {
        #[command(subcommand)]
        command: PluginCommands,
    },

    /// Install a version of a tool
    Install {
        /// Plugin name
        plugin: String,
        /// Version, `ref:<ref>`, `latest` or `latest:<filter>`
        version: String,
    },

    /// List every version a plugin can install
    ListAll {
        /// Plugin name
        plugin: String,
    },

    /// Show the latest stable version of a tool
    Latest {
        /// Plugin name
        plugin: String,
        /// Version prefix to match
        query: Option<String>,
    },

    /// Show the versions selected for a tool in the current directory
    Current {
        /// Tool name
        tool: String,
    },
}

#[derive(Subcommand)]
enum PluginCommands {
    /// Clone a plugin repository
    Add {
        /// Plugin name
        name: String,
        /// Git URL of the plugin repository
        url: String,
    },
    /// List installed plugins
    List {
        /// Show each plugin's remote URL
        #[arg(long)]
        urls: bool,
        /// Show each plugin's checked-out commit
        #[arg(long)]
        refs: bool,
    },
    /// Remove a plugin
    Remove {
        /// Plugin name
        name: String,
    },
    /// Update a plugin to a ref or the tip of its branch
    Update {
        /// Plugin name
        name: String,
        /// Branch, tag or commit to check out
        git_ref: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = asdf_config::Config::load(None)?.config;

    let log_config = config_bridge::to_log_config(&config, cli.verbose);
    if let Err(e) = asdf_telemetry::setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let data_dir = config_bridge::to_data_dir(&config);

    match cli.command {
        Commands::Plugin { command } => match command {
            PluginCommands::Add { name, url } => plugin::add_plugin(&data_dir, &name, &url),
            PluginCommands::List { urls, refs } => plugin::list_plugins(&data_dir, urls, refs),
            PluginCommands::Remove { name } => plugin::remove_plugin(&data_dir, &name),
            PluginCommands::Update { name, git_ref } => {
                plugin::update_plugin(&data_dir, &name, git_ref.as_deref())
            },
        },
        Commands::Install { plugin, version } => {
            install::install(&config, data_dir, &plugin, &version)
        },
        Commands::ListAll { plugin } => install::list_all(&config, data_dir, &plugin),
        Commands::Latest { plugin, query } => {
            install::latest(&config, data_dir, &plugin, query.as_deref().unwrap_or(""))
        },
        Commands::Current { tool } => versions::current(&tool),
    }
}
