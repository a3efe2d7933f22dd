//! Line-based operator interaction.
//!
//! The selection and removal stages never touch stdin/stdout directly. They
//! talk to a [`Prompt`], so tests can drive them with canned answers:
//!
//! ```
//! use vscache::prompt::{Console, Prompt};
//!
//! let mut console = Console::from_script(&["a"]);
//! let answer = console.ask("Delete everything? (a/n)").unwrap();
//! assert_eq!(answer, "a");
//! assert!(console.output_text().contains("Delete everything?"));
//! ```

use std::io::{self, BufRead, Cursor, Write};

use yansi::Paint;

/// Marker printed in front of every answer the operator types.
pub const INPUT_MARKER: &str = ">>> ";

/// Synchronous "show text / ask a question" capability.
pub trait Prompt {
    /// Show one line of text to the operator.
    fn say(&mut self, line: &str) -> io::Result<()>;

    /// Show `question` and read one answer line.
    ///
    /// The returned answer has surrounding whitespace removed. End of input
    /// reads as an empty answer.
    fn ask(&mut self, question: &str) -> io::Result<String>;
}

/// [`Prompt`] over any reader/writer pair.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a console reading answers from `input` and writing to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the console, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    /// Console bound to the process's stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl Console<Cursor<Vec<u8>>, Vec<u8>> {
    /// Console that answers with `answers`, one per line, and records
    /// everything shown.
    #[must_use]
    pub fn from_script(answers: &[&str]) -> Self {
        let mut script = answers.join("\n");
        script.push('\n');
        Self::new(Cursor::new(script.into_bytes()), Vec::new())
    }

    /// Everything written so far, lossily decoded.
    #[must_use]
    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl<R: BufRead, W: Write> Prompt for Console<R, W> {
    fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    fn ask(&mut self, question: &str) -> io::Result<String> {
        writeln!(self.output, "{}", question.bright_green())?;
        write!(self.output, "{INPUT_MARKER}")?;
        self.output.flush()?;

        let mut answer = String::new();
        let read = self.input.read_line(&mut answer)?;
        if read == 0 {
            log::debug!("Input closed while waiting for an answer");
            // Keep the transcript readable when input ends.
            writeln!(self.output)?;
        }
        Ok(answer.trim().to_string())
    }
}
