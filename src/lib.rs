//! stockpit: terminal inventory management
//!
//! Dashboard, inventory, and order tracking over a built-in demo
//! dataset. The TUI is the primary surface; a handful of subcommands
//! print the same data without entering the alternate screen.

pub mod auth;
pub mod cli;
pub mod config;
pub mod models;
pub mod store;
pub mod theme;
pub mod tui;
