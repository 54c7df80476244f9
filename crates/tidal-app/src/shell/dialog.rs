//! Modal messages raised during startup.

use std::error::Error;

use tidal_config::{ConfigError, ConfigErrorKind};

/// A titled message shown over the main window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    /// Dialog title.
    pub title: String,
    /// Body text.
    pub message: String,
}

impl Dialog {
    /// Dialog explaining that settings fell back to defaults because of `err`.
    #[must_use]
    pub fn config_error(err: &ConfigError) -> Self {
        let detail = error_chain(err);
        let (title, message) = match err.kind() {
            ConfigErrorKind::Open => (
                "Open config error",
                format!(
                    "An error occurred while trying to open config file. Now using default settings.\nMore info: {detail}"
                ),
            ),
            ConfigErrorKind::Save => (
                "Save config error",
                format!(
                    "An error occurred while trying to save config file. Now using default settings.\nMore info: {detail}"
                ),
            ),
            ConfigErrorKind::Other => (
                "Config initialization error",
                format!(
                    "Something went wrong while setting up configuration. Now using default settings.\nMore info: {detail}"
                ),
            ),
        };
        Self {
            title: title.to_string(),
            message,
        }
    }
}

/// Render an error and its sources as `outer: inner: root`.
fn error_chain(err: &dyn Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn open_errors_get_open_dialog() {
        let err = ConfigError::Open {
            path: PathBuf::from("config.yaml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let dialog = Dialog::config_error(&err);
        assert_eq!(dialog.title, "Open config error");
        assert!(dialog.message.starts_with(
            "An error occurred while trying to open config file. Now using default settings.\nMore info: "
        ));
        assert!(dialog.message.ends_with(": denied"));
    }

    #[test]
    fn save_errors_get_save_dialog() {
        let err = ConfigError::Save {
            path: PathBuf::from("config.yaml"),
            source: io::Error::other("disk full"),
        };
        let dialog = Dialog::config_error(&err);
        assert_eq!(dialog.title, "Save config error");
        assert!(dialog.message.contains("trying to save config file"));
        assert!(dialog.message.contains("disk full"));
    }

    #[test]
    fn other_errors_get_generic_dialog() {
        let err = ConfigError::Read {
            path: PathBuf::from("config.yaml"),
            source: io::Error::other("short read"),
        };
        let dialog = Dialog::config_error(&err);
        assert_eq!(dialog.title, "Config initialization error");
        assert!(
            dialog
                .message
                .starts_with("Something went wrong while setting up configuration.")
        );
        assert!(dialog.message.contains("short read"));
    }
}
