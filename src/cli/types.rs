//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "menu-cache")]
#[command(about = "Per-tenant menu cache with freshness tracking and provenance", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .menu-cache/
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a tenant's cached menu and whether it is stale
    Get {
        /// Tenant identifier
        tenant: String,

        /// Staleness threshold in hours (defaults to the configured value)
        #[arg(short, long)]
        max_age_hours: Option<f64>,
    },

    /// Fetch a tenant's menu, reusing recent data unless forced
    Refresh {
        /// Tenant identifier
        tenant: String,

        /// Menu page URL
        #[arg(short, long)]
        url: String,

        /// Fetch even when the cached menu is recent
        #[arg(short, long)]
        force: bool,
    },

    /// Apply a manual edit to an existing menu
    Update {
        /// Tenant identifier
        tenant: String,

        #[arg(long)]
        restaurant_name: Option<String>,

        #[arg(long)]
        cuisine: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        hours: Option<String>,

        #[arg(long)]
        website: Option<String>,

        /// Replace the AI context text
        #[arg(long)]
        ai_context: Option<String>,

        /// JSON file with an array of menu items replacing the current ones
        #[arg(long, value_name = "FILE")]
        items_file: Option<PathBuf>,

        /// Special offer (repeatable); replaces the current offers
        #[arg(long = "offer", value_name = "OFFER")]
        offers: Vec<String>,
    },

    /// Create a menu by hand for a tenant that has none
    Create {
        /// Tenant identifier
        tenant: String,

        /// JSON file with an array of menu items
        #[arg(long, value_name = "FILE")]
        items_file: PathBuf,
    },

    /// Delete a tenant's menu and its history
    Delete {
        /// Tenant identifier
        tenant: String,
    },
}
