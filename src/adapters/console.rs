use crate::domain::ports::{LineInput, LineOutput};
use std::io::{BufRead, Write};

/// Line input over any buffered reader (stdin in the binary, a byte slice in tests).
pub struct ConsoleInput<R: BufRead> {
    reader: R,
}

impl<R: BufRead> ConsoleInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineInput for ConsoleInput<R> {
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
                line.truncate(trimmed_len);
                Some(line)
            }
            Err(e) => {
                tracing::warn!("Failed to read console input: {}", e);
                None
            }
        }
    }
}

/// Line output over any writer. Write failures are logged and otherwise ignored.
pub struct ConsoleOutput<W: Write> {
    writer: W,
}

impl<W: Write> ConsoleOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LineOutput for ConsoleOutput<W> {
    fn write(&mut self, text: &str) {
        if let Err(e) = self
            .writer
            .write_all(text.as_bytes())
            .and_then(|_| self.writer.flush())
        {
            tracing::warn!("Failed to write console output: {}", e);
        }
    }
}
