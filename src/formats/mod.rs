//! On-disk record formats.
//!
//! Every format implements [`RecordCodec`] and is looked up by file extension
//! through a [`CodecRegistry`]:
//!
//! - **Text** (`.txt`): marker line plus three lines per record
//! - **JSON** (`.json`): a single array of `{brand, year, price}` objects
//! - **XML** (`.xml`): `<ArrayOfCar>` with one `<Car>` element per record
//!
//! Codecs only convert between bytes and records; file I/O belongs to the
//! storage port.

mod json;
mod text;
mod xml;

pub use json::JsonCodec;
pub use text::{TextCodec, DEFAULT_MARKER};
pub use xml::XmlCodec;

use crate::config::toml_config::FormatSettings;
use crate::domain::ports::RecordCodec;
use std::collections::HashMap;
use std::path::Path;

/// Extension of the file name in `path`, including the leading dot.
///
/// Returns an empty string when the name has no dot or ends with one. Unlike
/// [`Path::extension`], a dot-file such as `.json` has the extension `.json`.
pub fn extension_of(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => name[idx..].to_string(),
        _ => String::new(),
    }
}

/// Registry of available codecs, keyed by extension (case-sensitive).
pub struct CodecRegistry {
    codecs: HashMap<&'static str, Box<dyn RecordCodec>>,
}

impl CodecRegistry {
    /// Create an empty registry.
    pub fn empty() -> Self {
        Self {
            codecs: HashMap::new(),
        }
    }

    /// Create a registry with the built-in codecs in their default configuration.
    pub fn new() -> Self {
        Self::from_settings(&FormatSettings::default())
    }

    /// Create a registry with the built-in codecs configured from `settings`.
    pub fn from_settings(settings: &FormatSettings) -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(
            TextCodec::new().with_marker(settings.text_marker.clone()),
        ));
        registry.register(Box::new(JsonCodec::new().pretty(settings.json_pretty)));
        registry.register(Box::new(XmlCodec::new()));
        registry
    }

    /// Register a codec, replacing any codec for the same extension.
    pub fn register(&mut self, codec: Box<dyn RecordCodec>) {
        self.codecs.insert(codec.extension(), codec);
    }

    pub fn get(&self, extension: &str) -> Option<&dyn RecordCodec> {
        self.codecs.get(extension).map(|c| c.as_ref())
    }

    pub fn for_path(&self, path: &Path) -> Option<&dyn RecordCodec> {
        self.get(&extension_of(path))
    }

    /// Registered extensions, sorted.
    pub fn extensions(&self) -> Vec<&'static str> {
        let mut extensions: Vec<_> = self.codecs.keys().copied().collect();
        extensions.sort_unstable();
        extensions
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}
