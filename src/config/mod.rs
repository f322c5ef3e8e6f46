// Configuration layer - explicit settings, no ambient statics
pub mod database;
pub mod logging;
pub mod settings;

pub use logging::{init_logging, LoggingConfig, LoggingError};
pub use settings::{Settings, SettingsError};
