pub mod commands;
pub mod controller;
pub mod prompts;
pub mod state;

pub use controller::{EmergencyController, EmergencySnapshot};
pub use state::{EmergencyState, EmergencyStatus};
