//! JSON bindings file.
//!
//! The file holds one object with three fields:
//!
//! ```json
//! {
//!     "sounds": {
//!         "Key.a": "/home/me/sounds/a.wav"
//!     },
//!     "mouse_sounds": {
//!         "Button.left": "/home/me/sounds/click.mp3"
//!     },
//!     "universal_sound": ""
//! }
//! ```
//!
//! It is rewritten in full, pretty-printed with 4-space indentation, after
//! every change.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use soundbind_core::BindingSet;

use crate::application::binding_store::{BindingRepository, StorageError};

/// Default file name, resolved against the working directory.
pub const DEFAULT_BINDINGS_FILE: &str = "soundbind_config.json";

/// [`BindingRepository`] backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonBindingFile {
    path: PathBuf,
}

impl JsonBindingFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonBindingFile {
    fn default() -> Self {
        Self::new(DEFAULT_BINDINGS_FILE)
    }
}

impl BindingRepository for JsonBindingFile {
    fn load(&self) -> Result<Option<BindingSet>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let set = serde_json::from_str(&content).map_err(|source| StorageError::Parse {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(set))
    }

    fn save(&self, bindings: &BindingSet) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| StorageError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let content = to_pretty_json(bindings)?;
        std::fs::write(&self.path, content).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Serialises `bindings` with 4-space indentation.
fn to_pretty_json(bindings: &BindingSet) -> Result<Vec<u8>, StorageError> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    bindings.serialize(&mut ser)?;
    Ok(buf)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
