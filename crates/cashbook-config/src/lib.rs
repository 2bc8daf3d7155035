//! cashbook-config
//!
//! Local settings for the cashbook tools: where the workbook lives, how long
//! writers wait on each other, and output preferences.

pub mod error;
pub mod manager;
pub mod model;

pub use error::SettingsError;
pub use manager::{app_home, SettingsManager, HOME_ENV};
pub use model::Settings;
