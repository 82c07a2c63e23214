// Adapters layer: concrete implementations of the domain ports.

pub mod console;
pub mod storage;

pub use console::{ConsoleInput, ConsoleOutput};
pub use storage::LocalStorage;
