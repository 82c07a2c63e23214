use crate::domain::model::Car;
use crate::utils::error::Result;
use std::path::Path;

/// Whole-file byte storage.
pub trait Storage: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    /// Replaces the file at `path` with `data`. Implementations must not leave a
    /// partially written target behind when the write fails.
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
}

/// Encoder/decoder for one on-disk record format.
pub trait RecordCodec: Send + Sync {
    /// Human-readable format name used in diagnostics.
    fn name(&self) -> &'static str;
    /// Extension handled by this codec, including the leading dot.
    fn extension(&self) -> &'static str;
    fn decode(&self, bytes: &[u8]) -> Result<Vec<Car>>;
    fn encode(&self, records: &[Car]) -> Result<Vec<u8>>;
}

/// Source of user input lines. `None` means the input is exhausted.
pub trait LineInput {
    fn read_line(&mut self) -> Option<String>;
}

/// Sink for user-facing text.
pub trait LineOutput {
    fn write(&mut self, text: &str);

    fn write_line(&mut self, line: &str) {
        self.write(line);
        self.write("\n");
    }
}
