//! Settings for loading a directory of translation tables.
mod loader;
mod matcher;
mod types;

pub use loader::{
    SETTINGS_FILE_NAME,
    load_settings,
};
pub use matcher::{
    FileMatcher,
    MatcherError,
};
pub use types::{
    ConfigError,
    LoaderSettings,
    ValidationError,
};
