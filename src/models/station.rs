use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::utils::filename::station_name_from_path;

/// One station's input file and the label used in column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct StationSource {
    #[validate(length(min = 1))]
    pub name: String,

    #[validate(length(min = 1))]
    pub path: String,
}

impl StationSource {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Build a source whose name is taken from a PRSA file name, falling
    /// back to the file stem.
    pub fn from_path(path: &Path) -> Self {
        let name = station_name_from_path(path).unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
        Self::new(name, path.to_string_lossy().into_owned())
    }

    pub fn path(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }
}
