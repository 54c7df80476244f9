//! Line-oriented terminal frontend.

use async_trait::async_trait;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout,
};

use super::{CommandOutcome, Dialog, Frontend, ShellError, ShellResult, ToolbarItem, Window};

const PROMPT: &str = "> ";

/// Frontend that reads one command per line and writes plain text.
#[derive(Debug)]
pub struct ConsoleFrontend<R, W> {
    reader: R,
    writer: W,
    prompt: bool,
}

impl ConsoleFrontend<BufReader<Stdin>, Stdout> {
    /// Frontend bound to the process's stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> ConsoleFrontend<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// Frontend over arbitrary streams.
    pub const fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            prompt: true,
        }
    }

    /// Toggle the input prompt.
    #[must_use]
    pub const fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    /// Give back the underlying streams.
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    async fn write(&mut self, operation: &'static str, text: &str) -> ShellResult<()> {
        self.writer
            .write_all(text.as_bytes())
            .await
            .map_err(|source| ShellError::Frontend { operation, source })?;
        self.writer
            .flush()
            .await
            .map_err(|source| ShellError::Frontend { operation, source })
    }
}

/// Render toolbar items as a single line, e.g. `[new-torrent] | [cut] [copy] ... [help]`.
#[must_use]
pub fn render_toolbar(items: &[ToolbarItem]) -> String {
    items
        .iter()
        .map(|item| match item {
            ToolbarItem::Action(name) => format!("[{name}]"),
            ToolbarItem::Separator => "|".to_string(),
            ToolbarItem::Spacer => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl<R, W> Frontend for ConsoleFrontend<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn show_window(&mut self, window: &Window) -> ShellResult<()> {
        let text = format!("{}\n{}\n", window.title, render_toolbar(&window.toolbar));
        self.write("console.show_window", &text).await
    }

    async fn show_dialog(&mut self, dialog: &Dialog) -> ShellResult<()> {
        let text = format!("== {} ==\n{}\n", dialog.title, dialog.message);
        self.write("console.show_dialog", &text).await
    }

    async fn next_command(&mut self) -> ShellResult<Option<String>> {
        loop {
            if self.prompt {
                self.write("console.prompt", PROMPT).await?;
            }
            let mut line = String::new();
            let read = self
                .reader
                .read_line(&mut line)
                .await
                .map_err(|source| ShellError::Frontend {
                    operation: "console.read_line",
                    source,
                })?;
            if read == 0 {
                return Ok(None);
            }
            let command = line.trim();
            if !command.is_empty() {
                return Ok(Some(command.to_string()));
            }
        }
    }

    async fn show_outcome(&mut self, outcome: &CommandOutcome) -> ShellResult<()> {
        let text = match outcome {
            CommandOutcome::Done(message) => format!("{message}\n"),
            CommandOutcome::NotImplemented { command } => {
                format!("{command}: not implemented\n")
            }
            CommandOutcome::Quit => "Bye.\n".to_string(),
        };
        self.write("console.show_outcome", &text).await
    }

    async fn show_error(&mut self, error: &ShellError) -> ShellResult<()> {
        let text = match error {
            ShellError::UnknownCommand { name } => {
                format!("unknown command '{name}' (try 'help')\n")
            }
            ShellError::Frontend { .. } => format!("{error}\n"),
        };
        self.write("console.show_error", &text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{CommandRegistry, Shell, default_toolbar};
    use std::error::Error;

    async fn run_script(
        input: &str,
        dialog: Option<Dialog>,
    ) -> Result<String, Box<dyn Error>> {
        let mut frontend = ConsoleFrontend::new(input.as_bytes(), Vec::new()).with_prompt(false);
        let mut shell = Shell::new(Window::main(), CommandRegistry::with_defaults(), dialog);
        shell.run(&mut frontend).await?;
        let (_, output) = frontend.into_inner();
        Ok(String::from_utf8(output)?)
    }

    #[test]
    fn toolbar_renders_in_order() {
        assert_eq!(
            render_toolbar(&default_toolbar()),
            "[new-torrent] | [cut] [copy] [paste] ... [help]"
        );
    }

    #[tokio::test]
    async fn script_runs_until_quit() -> Result<(), Box<dyn Error>> {
        let output = run_script("\n  paste \nnope\nquit\nhelp\n", None).await?;
        assert_eq!(
            output,
            "Tidal\n[new-torrent] | [cut] [copy] [paste] ... [help]\n\
             paste: not implemented\n\
             unknown command 'nope' (try 'help')\n\
             Bye.\n"
        );
        Ok(())
    }

    #[tokio::test]
    async fn end_of_input_ends_the_loop() -> Result<(), Box<dyn Error>> {
        let dialog = Dialog {
            title: "Open config error".to_string(),
            message: "More info: denied".to_string(),
        };
        let output = run_script("new-torrent", Some(dialog)).await?;
        assert!(output.contains("== Open config error ==\nMore info: denied\n"));
        assert!(output.ends_with("Adding torrents is not available yet.\n"));
        Ok(())
    }

    #[tokio::test]
    async fn prompt_is_written_before_each_read() -> Result<(), Box<dyn Error>> {
        let mut frontend = ConsoleFrontend::new("help\n".as_bytes(), Vec::new());
        assert_eq!(frontend.next_command().await?, Some("help".to_string()));
        assert_eq!(frontend.next_command().await?, None);
        let (_, output) = frontend.into_inner();
        assert_eq!(output, b"> > ");
        Ok(())
    }
}
