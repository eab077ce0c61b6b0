pub mod constants;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use filename::{generate_default_parquet_filename, prsa_data_path, station_name_from_path};
pub use progress::ProgressReporter;
