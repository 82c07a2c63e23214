use crate::core::{Car, RecordCodec, RecordCollection, Storage};
use crate::formats::{extension_of, CodecRegistry};
use crate::utils::error::{EditorError, Result};
use crate::utils::validation::validate_path;
use std::path::{Path, PathBuf};

/// Result of [`PersistenceManager::load`]: always a usable collection, plus the
/// problem that emptied it, if any.
#[derive(Debug)]
pub struct LoadOutcome {
    pub records: RecordCollection,
    pub error: Option<EditorError>,
}

impl LoadOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Summary of a successful save.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveReceipt {
    pub path: PathBuf,
    pub format: &'static str,
    pub records: usize,
    pub bytes_written: usize,
}

pub struct PersistenceManager<S: Storage> {
    storage: S,
    registry: CodecRegistry,
}

impl<S: Storage> PersistenceManager<S> {
    pub fn new(storage: S) -> Self {
        Self::with_registry(storage, CodecRegistry::new())
    }

    pub fn with_registry(storage: S, registry: CodecRegistry) -> Self {
        Self { storage, registry }
    }

    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    fn codec_for(&self, path: &Path) -> Result<&dyn RecordCodec> {
        self.registry
            .for_path(path)
            .ok_or_else(|| EditorError::UnsupportedFormat {
                extension: extension_of(path),
            })
    }

    /// Load records from `path`, propagating the first failure.
    pub fn try_load(&self, path: &Path) -> Result<RecordCollection> {
        if !self.storage.exists(path) {
            return Err(EditorError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let codec = self.codec_for(path)?;
        let bytes = self.storage.read_file(path)?;
        tracing::debug!(
            "Read {} bytes from {}, decoding as {}",
            bytes.len(),
            path.display(),
            codec.name()
        );

        codec.decode(&bytes)
    }

    /// Load records from `path`. Never fails: on any error the collection is empty
    /// and the error is reported in the outcome.
    pub fn load(&self, path: &Path) -> LoadOutcome {
        match self.try_load(path) {
            Ok(records) => {
                tracing::info!("Loaded {} records from {}", records.len(), path.display());
                LoadOutcome {
                    records,
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Load of {} failed ({:?}): {}",
                    path.display(),
                    e.kind(),
                    e
                );
                LoadOutcome {
                    records: Vec::new(),
                    error: Some(e),
                }
            }
        }
    }

    /// Write the whole collection to `path` in the format its extension names.
    ///
    /// Output is fully encoded before anything touches the file system, so a
    /// rejected path or an encode failure leaves no file behind.
    pub fn save(&self, records: &[Car], path: &Path) -> Result<SaveReceipt> {
        let result = self.try_save(records, path);
        match &result {
            Ok(receipt) => tracing::info!(
                "Saved {} records to {} as {} ({} bytes)",
                receipt.records,
                receipt.path.display(),
                receipt.format,
                receipt.bytes_written
            ),
            Err(e) => tracing::error!(
                "Save to {} failed ({:?}): {}",
                path.display(),
                e.kind(),
                e
            ),
        }
        result
    }

    fn try_save(&self, records: &[Car], path: &Path) -> Result<SaveReceipt> {
        validate_path("save path", &path.to_string_lossy())?;

        let codec = self.codec_for(path)?;
        // No format reads a NaN or infinite price back.
        if let Some(i) = records.iter().position(|car| !car.price.is_finite()) {
            return Err(EditorError::encode(
                codec.name(),
                format!("record {} has non-finite price {}", i + 1, records[i].price),
            ));
        }
        let data = codec.encode(records)?;
        self.storage.write_file(path, &data)?;

        Ok(SaveReceipt {
            path: path.to_path_buf(),
            format: codec.name(),
            records: records.len(),
            bytes_written: data.len(),
        })
    }
}
