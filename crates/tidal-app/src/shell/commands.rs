//! Toolbar commands and their dispatch table.

use std::collections::BTreeMap;

use tracing::info;

use super::{ShellError, ShellResult};

/// Toolbar command that starts the add-torrent flow.
pub const NEW_TORRENT: &str = "new-torrent";
/// Clipboard cut.
pub const CUT: &str = "cut";
/// Clipboard copy.
pub const COPY: &str = "copy";
/// Clipboard paste.
pub const PASTE: &str = "paste";
/// Help command.
pub const HELP: &str = "help";
/// Ends the event loop.
pub const QUIT: &str = "quit";

/// Result of running a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command ran; the message is shown to the user.
    Done(String),
    /// The command exists on the toolbar but has no behaviour yet.
    NotImplemented {
        /// Command name.
        command: String,
    },
    /// The shell should stop its event loop.
    Quit,
}

/// Behaviour bound to a command name.
pub trait CommandHandler: Send + Sync {
    /// Run the command.
    fn handle(&self) -> CommandOutcome;
}

/// One slot of the toolbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarItem {
    /// Button bound to a registered command.
    Action(String),
    /// Visual separator.
    Separator,
    /// Flexible space pushing later items to the far end.
    Spacer,
}

/// Toolbar layout shown in the main window.
#[must_use]
pub fn default_toolbar() -> Vec<ToolbarItem> {
    vec![
        ToolbarItem::Action(NEW_TORRENT.to_string()),
        ToolbarItem::Separator,
        ToolbarItem::Action(CUT.to_string()),
        ToolbarItem::Action(COPY.to_string()),
        ToolbarItem::Action(PASTE.to_string()),
        ToolbarItem::Spacer,
        ToolbarItem::Action(HELP.to_string()),
    ]
}

/// Name to handler dispatch table.
#[derive(Default)]
pub struct CommandRegistry {
    handlers: BTreeMap<String, Box<dyn CommandHandler>>,
}

impl CommandRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every toolbar command plus `quit`.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(NEW_TORRENT, NewTorrent);
        for name in [CUT, COPY, PASTE] {
            registry.register(name, Unimplemented { command: name });
        }
        registry.register(QUIT, Quit);
        let help = Help {
            commands: registry
                .names()
                .chain(std::iter::once(HELP))
                .map(ToString::to_string)
                .collect(),
        };
        registry.register(HELP, help);
        registry
    }

    /// Bind `handler` to `name`, replacing any previous binding.
    pub fn register(&mut self, name: impl Into<String>, handler: impl CommandHandler + 'static) {
        self.handlers.insert(name.into(), Box::new(handler));
    }

    /// Whether `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered command names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Run the command bound to `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::UnknownCommand`] when nothing is bound to `name`.
    pub fn dispatch(&self, name: &str) -> ShellResult<CommandOutcome> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| ShellError::UnknownCommand {
                name: name.to_string(),
            })?;
        Ok(handler.handle())
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("CommandRegistry")
            .field("commands", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

struct NewTorrent;

impl CommandHandler for NewTorrent {
    fn handle(&self) -> CommandOutcome {
        info!(command = NEW_TORRENT, "new torrent requested");
        CommandOutcome::Done("Adding torrents is not available yet.".to_string())
    }
}

struct Unimplemented {
    command: &'static str,
}

impl CommandHandler for Unimplemented {
    fn handle(&self) -> CommandOutcome {
        CommandOutcome::NotImplemented {
            command: self.command.to_string(),
        }
    }
}

struct Help {
    commands: Vec<String>,
}

impl CommandHandler for Help {
    fn handle(&self) -> CommandOutcome {
        info!(command = HELP, "help requested");
        CommandOutcome::Done(format!("Commands: {}", self.commands.join(", ")))
    }
}

struct Quit;

impl CommandHandler for Quit {
    fn handle(&self) -> CommandOutcome {
        CommandOutcome::Quit
    }
}
