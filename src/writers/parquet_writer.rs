use crate::error::{ProcessingError, Result};
use crate::models::{CombinedRow, CombinedTable};
use crate::utils::constants::{
    COMPRESSION_GZIP, COMPRESSION_LZ4, COMPRESSION_NONE, COMPRESSION_SNAPPY, COMPRESSION_ZSTD,
    DEFAULT_ROW_GROUP_SIZE,
};
use arrow::array::*;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel};
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

const PM25_SUFFIX: &str = "_PM2.5";

pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            COMPRESSION_SNAPPY => Compression::SNAPPY,
            COMPRESSION_GZIP => Compression::GZIP(GzipLevel::default()),
            COMPRESSION_LZ4 => Compression::LZ4,
            COMPRESSION_ZSTD => Compression::ZSTD(parquet::basic::ZstdLevel::default()),
            COMPRESSION_NONE => Compression::UNCOMPRESSED,
            _ => {
                return Err(ProcessingError::Config(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Write the combined daily table to a Parquet file
    pub fn write_table(&self, table: &CombinedTable, path: &Path) -> Result<()> {
        self.write_table_batched(table, path, table.len().max(1))
    }

    /// Write rows in batches for memory efficiency
    pub fn write_table_batched(
        &self,
        table: &CombinedTable,
        path: &Path,
        batch_size: usize,
    ) -> Result<()> {
        let schema = self.create_schema(table);
        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

        for chunk in table.rows.chunks(batch_size.max(1)) {
            let batch = self.rows_to_batch(chunk, schema.clone())?;
            writer.write(&batch)?;
        }

        writer.close()?;
        debug!(path = %path.display(), rows = table.len(), "wrote parquet file");
        Ok(())
    }

    /// Date column followed by the four nullable station columns
    fn create_schema(&self, table: &CombinedTable) -> Arc<Schema> {
        let mut fields = vec![Field::new("date", DataType::Date32, false)];
        fields.extend(
            table
                .column_names()
                .into_iter()
                .map(|name| Field::new(name, DataType::Float64, true)),
        );

        Arc::new(Schema::new(fields))
    }

    fn rows_to_batch(&self, rows: &[CombinedRow], schema: Arc<Schema>) -> Result<RecordBatch> {
        let dates: Vec<i32> = rows.iter().map(|r| days_since_epoch(r.date)).collect();

        let mut columns: Vec<ArrayRef> = vec![Arc::new(Date32Array::from(dates))];
        for idx in 0..4 {
            let values: Vec<Option<f64>> = rows.iter().map(|r| r.values()[idx]).collect();
            columns.push(Arc::new(Float64Array::from(values)));
        }

        Ok(RecordBatch::try_new(schema, columns)?)
    }

    /// Read a combined table back. `limit` of 0 reads every row.
    pub fn read_combined_table(&self, path: &Path, limit: usize) -> Result<CombinedTable> {
        use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

        let file = File::open(path)?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
        let stations = station_names_from_schema(builder.schema())?;
        let parquet_reader = builder.with_batch_size(8192).build()?;

        let mut rows = Vec::new();

        'batches: for batch_result in parquet_reader {
            let batch = batch_result?;

            let dates = batch
                .column(0)
                .as_any()
                .downcast_ref::<Date32Array>()
                .ok_or_else(|| ProcessingError::InvalidFormat("Invalid date column type".to_string()))?;

            let mut values = Vec::with_capacity(4);
            for idx in 1..=4 {
                let column = batch
                    .column(idx)
                    .as_any()
                    .downcast_ref::<Float64Array>()
                    .ok_or_else(|| {
                        ProcessingError::InvalidFormat(format!("Invalid type for column {}", idx))
                    })?;
                values.push(column);
            }

            let cell = |column: &Float64Array, i: usize| {
                if column.is_null(i) {
                    None
                } else {
                    Some(column.value(i))
                }
            };

            for i in 0..batch.num_rows() {
                if limit > 0 && rows.len() >= limit {
                    break 'batches;
                }
                rows.push(CombinedRow {
                    date: date_from_epoch_days(dates.value(i))?,
                    station1_pm25: cell(values[0], i),
                    station1_pm10: cell(values[1], i),
                    station2_pm25: cell(values[2], i),
                    station2_pm10: cell(values[3], i),
                });
            }
        }

        CombinedTable::new(stations, rows)
    }

    /// Get file statistics
    pub fn get_file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        use parquet::file::reader::{FileReader, SerializedFileReader};

        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let metadata = reader.metadata();

        let file_metadata = metadata.file_metadata();
        let row_groups = metadata.num_row_groups();
        let total_rows = file_metadata.num_rows();
        let file_size = std::fs::metadata(path)?.len();

        let mut row_group_sizes = Vec::new();
        for i in 0..row_groups {
            row_group_sizes.push(metadata.row_group(i).num_rows());
        }

        let compression = if row_groups > 0 && metadata.row_group(0).num_columns() > 0 {
            metadata.row_group(0).column(0).compression()
        } else {
            self.compression
        };

        Ok(ParquetFileInfo {
            total_rows,
            row_groups: row_groups as i32,
            row_group_sizes,
            file_size,
            compression,
        })
    }
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    date.signed_duration_since(epoch()).num_days() as i32
}

fn date_from_epoch_days(days: i32) -> Result<NaiveDate> {
    epoch()
        .checked_add_signed(chrono::Duration::days(days as i64))
        .ok_or_else(|| ProcessingError::InvalidFormat(format!("Date out of range: {} days", days)))
}

/// Station names come from the `{station}_PM2.5` columns
fn station_names_from_schema(schema: &Schema) -> Result<[String; 2]> {
    let fields = schema.fields();
    if fields.len() != 5 || fields[0].name() != "date" {
        return Err(ProcessingError::InvalidFormat(
            "Expected columns: date and four station columns".to_string(),
        ));
    }

    let name_at = |idx: usize| {
        fields[idx]
            .name()
            .strip_suffix(PM25_SUFFIX)
            .map(str::to_string)
            .ok_or_else(|| {
                ProcessingError::InvalidFormat(format!(
                    "Column '{}' is not a PM2.5 column",
                    fields[idx].name()
                ))
            })
    };

    Ok([name_at(1)?, name_at(3)?])
}

#[derive(Debug)]
pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub row_groups: i32,
    pub row_group_sizes: Vec<i64>,
    pub file_size: u64,
    pub compression: Compression,
}

impl ParquetFileInfo {
    pub fn summary(&self) -> String {
        let avg_rows = if self.row_groups > 0 {
            self.total_rows as f64 / self.row_groups as f64
        } else {
            0.0
        };

        format!(
            "Parquet File Summary:\n\
            - Total rows: {}\n\
            - Row groups: {}\n\
            - File size: {:.2} KB\n\
            - Compression: {:?}\n\
            - Avg rows per group: {:.0}",
            self.total_rows,
            self.row_groups,
            self.file_size as f64 / 1024.0,
            self.compression,
            avg_rows
        )
    }
}
