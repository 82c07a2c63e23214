pub mod editor;
pub mod persistence;

pub use crate::domain::model::{Car, CarField, RecordCollection};
pub use crate::domain::ports::{LineInput, LineOutput, RecordCodec, Storage};
pub use crate::utils::error::Result;
