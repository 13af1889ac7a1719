use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "stockpit")]
#[command(about = "Terminal app for tracking inventory, orders, and stock alerts")]
#[command(version)]
pub struct Cli {
    /// With no subcommand the interactive TUI starts
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List materials from the demo dataset
    Materials {
        /// Filter by name or code (case-insensitive substring)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// List orders from the demo dataset
    Orders {
        /// Filter by customer name, customer code, or order id
        #[arg(short, long)]
        search: Option<String>,

        /// Only show one status (pending, processing, completed, cancelled)
        #[arg(long)]
        status: Option<String>,
    },

    /// Print the inventory and order summaries
    Summary,

    /// Export the full dataset as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
