//! Main window, toolbar dispatch, and the frontend event loop.
//!
//! # Design
//! - Rendering and input live behind [`Frontend`]; the shell owns only state and dispatch.
//! - A config problem found at startup is shown once, before the first command is read.
//! - Unknown commands are reported to the user and the loop continues.

pub mod commands;
pub mod console;
pub mod dialog;

use std::io;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

pub use commands::{
    CommandHandler, CommandOutcome, CommandRegistry, ToolbarItem, default_toolbar,
};
pub use console::ConsoleFrontend;
pub use dialog::Dialog;

/// Title of the main window.
pub const WINDOW_TITLE: &str = "Tidal";

/// Errors raised by the shell.
#[derive(Debug, Error)]
pub enum ShellError {
    /// No handler is bound to the requested command.
    #[error("unknown command")]
    UnknownCommand {
        /// Requested command name.
        name: String,
    },
    /// The frontend failed to read input or render output.
    #[error("frontend operation failed")]
    Frontend {
        /// Operation identifier.
        operation: &'static str,
        /// Source IO error.
        source: io::Error,
    },
}

/// Convenience alias for shell results.
pub type ShellResult<T> = Result<T, ShellError>;

/// Main window model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    /// Window title.
    pub title: String,
    /// Toolbar items in display order.
    pub toolbar: Vec<ToolbarItem>,
}

impl Window {
    /// The application's main window with the default toolbar.
    #[must_use]
    pub fn main() -> Self {
        Self {
            title: WINDOW_TITLE.to_string(),
            toolbar: default_toolbar(),
        }
    }
}

/// Presentation layer driven by [`Shell::run`].
#[async_trait]
pub trait Frontend: Send {
    /// Present the main window.
    ///
    /// # Errors
    ///
    /// Returns an error if the window cannot be rendered.
    async fn show_window(&mut self, window: &Window) -> ShellResult<()>;

    /// Present a modal dialog.
    ///
    /// # Errors
    ///
    /// Returns an error if the dialog cannot be rendered.
    async fn show_dialog(&mut self, dialog: &Dialog) -> ShellResult<()>;

    /// Wait for the next command; `None` when input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be read.
    async fn next_command(&mut self) -> ShellResult<Option<String>>;

    /// Present the outcome of a command.
    ///
    /// # Errors
    ///
    /// Returns an error if the outcome cannot be rendered.
    async fn show_outcome(&mut self, outcome: &CommandOutcome) -> ShellResult<()>;

    /// Present a recoverable command error.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be rendered.
    async fn show_error(&mut self, error: &ShellError) -> ShellResult<()>;
}

/// Window, commands, and the optional startup dialog.
#[derive(Debug)]
pub struct Shell {
    window: Window,
    registry: CommandRegistry,
    dialog: Option<Dialog>,
}

impl Shell {
    /// Assemble a shell.
    #[must_use]
    pub const fn new(window: Window, registry: CommandRegistry, dialog: Option<Dialog>) -> Self {
        Self {
            window,
            registry,
            dialog,
        }
    }

    /// Main window.
    #[must_use]
    pub const fn window(&self) -> &Window {
        &self.window
    }

    /// Startup dialog, when one is pending.
    #[must_use]
    pub const fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    /// Show the window and any pending dialog, then dispatch commands until quit or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if the frontend fails; unknown commands are not errors here.
    pub async fn run(&mut self, frontend: &mut dyn Frontend) -> ShellResult<()> {
        frontend.show_window(&self.window).await?;
        if let Some(dialog) = self.dialog.take() {
            frontend.show_dialog(&dialog).await?;
        }

        while let Some(name) = frontend.next_command().await? {
            match self.registry.dispatch(&name) {
                Ok(CommandOutcome::Quit) => {
                    frontend.show_outcome(&CommandOutcome::Quit).await?;
                    info!("quit requested");
                    return Ok(());
                }
                Ok(outcome) => {
                    debug!(command = %name, ?outcome, "command handled");
                    frontend.show_outcome(&outcome).await?;
                }
                Err(err) => {
                    warn!(command = %name, error = %err, "command rejected");
                    frontend.show_error(&err).await?;
                }
            }
        }

        info!("input closed");
        Ok(())
    }
}
