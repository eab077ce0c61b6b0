/// Columns every station CSV must carry
pub const REQUIRED_COLUMNS: [&str; 13] = [
    "year", "month", "day", "hour", "PM2.5", "PM10", "SO2", "NO2", "CO", "TEMP", "PRES", "DEWP",
    "RAIN",
];

/// Optional columns carried through cleaning when present
pub const COLUMN_O3: &str = "O3";
pub const COLUMN_WIND_DIRECTION: &str = "wd";
pub const COLUMN_WIND_SPEED: &str = "WSPM";

/// Cell values treated as missing, compared after trimming and lowercasing.
/// Same set as the default `na_values` of pandas `read_csv`.
pub const MISSING_MARKERS: [&str; 15] = [
    "", "#n/a", "#n/a n/a", "#na", "-1.#ind", "-1.#qnan", "-nan", "1.#ind", "1.#qnan", "<na>",
    "n/a", "na", "nan", "none", "null",
];

/// Default stations
pub const DEFAULT_FIRST_STATION: &str = "Wanliu";
pub const DEFAULT_SECOND_STATION: &str = "Wanshouxigong";
pub const DEFAULT_DATA_DIR: &str = "DATA";
pub const DEFAULT_PERIOD: &str = "20130301-20170228";

/// File names
pub const DEFAULT_CONFIG_FILE: &str = "aq-dashboard.toml";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const ENV_PREFIX: &str = "AQ_DASHBOARD";

/// Plausibility checks
pub const PM_RATIO_TOLERANCE: f64 = 1.0;

/// Scatter plot point alpha
pub const SCATTER_ALPHA: f64 = 0.5;

/// Processing defaults
pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";
