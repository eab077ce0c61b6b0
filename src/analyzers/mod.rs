pub mod combined_analyzer;
pub mod correlation;

pub use combined_analyzer::{ColumnStats, CombinedAnalyzer, CombinedStatistics};
pub use correlation::{correlation_matrix, scatter_series, CorrelationMatrix, ScatterSeries};
