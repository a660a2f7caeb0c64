pub mod config;
pub mod machine;
pub mod terminal;
#[cfg(feature = "hydrate")]
pub mod web;

pub use config::Profile;
pub use machine::Machine;
pub use terminal::{AppId, CommandResult, Terminal};
