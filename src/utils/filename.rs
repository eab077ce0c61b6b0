use chrono::{Datelike, Local};
use std::path::{Path, PathBuf};

use crate::utils::constants::{DEFAULT_DATA_DIR, DEFAULT_PERIOD};

/// Generate default Parquet filename with format: aq-daily-{YYMMDD}.parquet
pub fn generate_default_parquet_filename(output_dir: &Path) -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    let filename = format!("aq-daily-{:02}{:02}{:02}.parquet", year, month, day);
    output_dir.join(filename)
}

/// Path of a station file in the PRSA layout, e.g. DATA/PRSA_Data_Wanliu_20130301-20170228.csv
pub fn prsa_data_path(station: &str) -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR).join(format!("PRSA_Data_{}_{}.csv", station, DEFAULT_PERIOD))
}

/// Extract the station name from a PRSA file name (PRSA_Data_Wanliu_20130301-20170228.csv -> Wanliu)
pub fn station_name_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let rest = stem.strip_prefix("PRSA_Data_")?;
    let (name, period) = rest.rsplit_once('_')?;

    if name.is_empty() || !period.chars().all(|c| c.is_ascii_digit() || c == '-') {
        return None;
    }

    Some(name.to_string())
}
