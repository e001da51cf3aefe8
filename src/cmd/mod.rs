//! Clap commands handled by the CLI.

mod browse;
pub use browse::BrowseCmd;

mod config;
pub use config::ConfigCmd;

mod inventory;
pub use inventory::InventoryCmd;

mod report;
pub use report::ReportCmd;
