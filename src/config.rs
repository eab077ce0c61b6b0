use crate::error::{ProcessingError, Result};
use crate::models::{ensure_distinct_stations, StationSource};
use crate::utils::constants::{
    COMPRESSION_SNAPPY, DEFAULT_CHUNK_SIZE, DEFAULT_CONFIG_FILE, DEFAULT_FIRST_STATION,
    DEFAULT_OUTPUT_DIR, DEFAULT_ROW_GROUP_SIZE, DEFAULT_SECOND_STATION, ENV_PREFIX,
};
use crate::utils::filename::prsa_data_path;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DashboardConfig {
    #[validate(length(min = 2, max = 2))]
    pub stations: Vec<StationSource>,

    #[validate(nested)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct OutputConfig {
    pub directory: String,

    pub compression: String,

    #[validate(range(min = 1))]
    pub row_group_size: usize,

    #[validate(range(min = 1))]
    pub chunk_size: usize,

    pub use_mmap: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let station = |name: &str| {
            StationSource::new(name, prsa_data_path(name).to_string_lossy().into_owned())
        };

        Self {
            stations: vec![station(DEFAULT_FIRST_STATION), station(DEFAULT_SECOND_STATION)],
            output: OutputConfig {
                directory: DEFAULT_OUTPUT_DIR.to_string(),
                compression: COMPRESSION_SNAPPY.to_string(),
                row_group_size: DEFAULT_ROW_GROUP_SIZE,
                chunk_size: DEFAULT_CHUNK_SIZE,
                use_mmap: false,
            },
        }
    }
}

impl DashboardConfig {
    /// Layer built-in defaults, an optional TOML/YAML/JSON file and `AQ_DASHBOARD__*` variables.
    /// An explicit `path` must exist. Without one, `aq-dashboard.toml` is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p.to_path_buf()).required(true),
            None => File::from(PathBuf::from(DEFAULT_CONFIG_FILE)).required(false),
        };

        let settings = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.check()?;
        Ok(config)
    }

    pub fn check(&self) -> Result<()> {
        self.validate()?;
        for station in &self.stations {
            station.validate()?;
        }
        ensure_distinct_stations(&self.stations[0].name, &self.stations[1].name)
    }

    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.output.directory)
    }

    /// The two configured stations, in column order
    pub fn station_pair(&self) -> Result<(StationSource, StationSource)> {
        match self.stations.as_slice() {
            [first, second] => Ok((first.clone(), second.clone())),
            _ => Err(ProcessingError::Config(format!(
                "Exactly two stations are required, found {}",
                self.stations.len()
            ))),
        }
    }

    pub fn set_station(&mut self, index: usize, source: StationSource) -> Result<()> {
        let slot = self.stations.get_mut(index).ok_or_else(|| {
            ProcessingError::Config(format!("No station slot {}", index + 1))
        })?;
        *slot = source;
        Ok(())
    }
}
