pub mod cleaner;
pub mod daily_aggregator;
pub mod date_filter;
pub mod integrity_checker;
pub mod pipeline;
pub mod station_joiner;

pub use cleaner::{Cleaner, CleaningStats};
pub use daily_aggregator::DailyAggregator;
pub use date_filter::{filter_by_date, resolve_range};
pub use integrity_checker::{
    IntegrityChecker, IntegrityReport, StationStatistics, Violation, ViolationType,
};
pub use pipeline::{Pipeline, PipelineOutput, StationData};
pub use station_joiner::StationJoiner;
