pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod formats;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{ConsoleInput, ConsoleOutput, LocalStorage};
pub use crate::config::EditorConfig;
pub use crate::core::editor::{apply_edit, InteractiveEditor};
pub use crate::core::persistence::{LoadOutcome, PersistenceManager, SaveReceipt};
pub use crate::domain::model::{Car, CarField, RecordCollection};
pub use crate::formats::CodecRegistry;
pub use crate::utils::error::{EditorError, ErrorKind, Result};
