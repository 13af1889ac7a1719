//! Screen modules for the stockpit TUI

pub mod dashboard;
pub mod help;
pub mod inventory;
pub mod login;
pub mod orders;
pub mod settings;

pub use dashboard::DashboardScreen;
pub use help::HelpScreen;
pub use inventory::InventoryScreen;
pub use login::LoginScreen;
pub use orders::OrdersScreen;
pub use settings::SettingsScreen;
