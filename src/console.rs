//! Line-oriented terminal front end.

use std::io::IsTerminal;

use async_trait::async_trait;
use crossterm::style::Stylize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};
use tracing::debug;

use crate::dispatcher::{Confirm, Dispatcher};

pub const PROMPT: &str = "> ";
pub const GREETING: &str = "Greetings, I'm a Copilot for Kubernetes, you require my assistant?";
pub const FAREWELL: &str = "Have a good day, Bye!;)";

const EXIT_KEYWORDS: [&str; 4] = ["exit", "quit", "q", "bye"];

pub fn is_exit_keyword(input: &str) -> bool {
    EXIT_KEYWORDS.contains(&input)
}

pub struct Console<R, W> {
    reader: R,
    writer: W,
    styled: bool,
}

impl Console<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        let styled = std::io::stdout().is_terminal();
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout(), styled)
    }
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W, styled: bool) -> Self {
        Self {
            reader,
            writer,
            styled,
        }
    }

    /// Print `prompt` and read one line without its terminator.
    /// Returns `None` at end of input.
    pub async fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        let prompt = if self.styled {
            prompt.bold().to_string()
        } else {
            prompt.to_string()
        };
        self.writer.write_all(prompt.as_bytes()).await?;
        self.writer.flush().await?;

        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        let len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(len);
        Ok(Some(line))
    }

    pub async fn print(&mut self, text: &str) -> std::io::Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }

    pub async fn print_error(&mut self, text: &str) -> std::io::Result<()> {
        if self.styled {
            let styled = text.red().to_string();
            self.print(&styled).await
        } else {
            self.print(text).await
        }
    }

    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<R, W> Confirm for Console<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn confirm(&mut self, question: &str) -> std::io::Result<bool> {
        let answer = self.read_line(&format!("{} ", question)).await?;
        debug!(answer = ?answer, "Confirmation answered");
        Ok(answer.as_deref() == Some("yes"))
    }
}

/// Read queries until an exit keyword or end of input.
///
/// Failed requests are printed and the loop keeps going; only console I/O
/// errors end it early.
pub async fn run<R, W>(console: &mut Console<R, W>, dispatcher: &Dispatcher<'_>) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    if console.styled {
        let greeting = GREETING.green().to_string();
        console.print(&greeting).await?;
    } else {
        console.print(GREETING).await?;
    }

    loop {
        let Some(line) = console.read_line(PROMPT).await? else {
            console.print("").await?;
            break;
        };
        let input = line.trim();

        if is_exit_keyword(input) {
            break;
        }
        if input.is_empty() {
            continue;
        }

        match dispatcher.handle(input, &mut *console).await {
            Ok(output) => console.print(&output).await?,
            Err(e) => console.print_error(&e.to_string()).await?,
        }
    }

    console.print(FAREWELL).await
}
