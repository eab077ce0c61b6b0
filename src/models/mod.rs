pub mod combined;
pub mod daily;
pub mod observation;
pub mod station;

pub use combined::{ensure_distinct_stations, CombinedRow, CombinedTable, DateRange};
pub use daily::DailyAverage;
pub use observation::{CleanedObservation, Measurement, Measurements, RawObservation};
pub use station::StationSource;
