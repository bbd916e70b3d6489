mod config;
mod service;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use crate::config::Config;
use crate::service::SkillIndexService;

/// Browse and maintain the SkillIndex agent skill catalog
#[derive(Parser, Debug)]
#[command(name = "skillindex", version, about)]
pub struct Cli {
    /// Catalog file (overrides `catalog.path`)
    #[arg(long, global = true, env = "SKILLINDEX_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Log level (overrides `logging.level`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the catalog file against the skill schema
    Validate,

    /// List skills matching a query (all skills when omitted)
    Search {
        /// Matched against names, descriptions and tags
        query: Option<String>,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single skill with its GitHub star count
    Show {
        /// Package name of the skill
        package: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Look up the star count for a GitHub repository URL
    Stars {
        /// Repository URL, e.g. https://github.com/owner/repo
        url: String,
    },

    /// Remove every cached star count
    ClearCache,

    /// Write sitemap.xml and robots.txt
    Seo {
        /// Output directory (overrides `site.output_dir`)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load()?;

    // Create and run the requested command
    let service = SkillIndexService::new(config);
    service.run(cli).await
}
