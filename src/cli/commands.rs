use crate::analyzers::CombinedAnalyzer;
use crate::cli::args::{Cli, Commands, StationArgs};
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::logging;
use crate::models::StationSource;
use crate::processors::{
    filter_by_date, resolve_range, IntegrityChecker, Pipeline, PipelineOutput,
};
use crate::utils::filename::generate_default_parquet_filename;
use crate::utils::progress::ProgressReporter;
use crate::writers::{DashboardReport, ParquetWriter, ReportWriter};
use std::path::Path;
use tracing::info;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Process {
            stations,
            output_file,
            compression,
            start,
            end,
            report,
            validate_only,
            chunk_size,
        } => {
            let config = resolve_config(cli.config.as_deref(), &stations)?;
            let output = run_pipeline(&config)?;

            let checker = IntegrityChecker::new();
            println!("\n{}", checker.generate_summary(&output.report));

            if validate_only {
                println!("Validation complete - no output file written");
                return Ok(());
            }

            let range = resolve_range(&output.combined, start, end);
            let filtered = match range {
                Some(range) => {
                    if range.is_inverted() {
                        println!(
                            "Start date {} is after end date {}: selection is empty",
                            range.start, range.end
                        );
                    }
                    filter_by_date(&output.combined, range)
                }
                None => output.combined.clone(),
            };
            info!(rows = filtered.len(), "selected date range");

            if let Some(report_path) = report {
                ensure_parent_dir(&report_path)?;
                let dashboard = DashboardReport::build(&output, range);
                ReportWriter::new().write_report(&dashboard, &report_path)?;
                println!("Dashboard report written to {}", report_path.display());
            }

            if filtered.is_empty() {
                println!("No rows to write");
                return Ok(());
            }

            let output_file = output_file
                .unwrap_or_else(|| generate_default_parquet_filename(&config.output_dir()));
            let compression = compression.unwrap_or_else(|| config.output.compression.clone());
            let chunk_size = chunk_size.unwrap_or(config.output.chunk_size);

            println!("Writing {} daily rows to Parquet file...", filtered.len());
            let writer = ParquetWriter::new()
                .with_compression(&compression)?
                .with_row_group_size(config.output.row_group_size);

            ensure_parent_dir(&output_file)?;
            writer.write_table_batched(&filtered, &output_file, chunk_size)?;

            let file_info = writer.get_file_info(&output_file)?;
            println!("\n{}", file_info.summary());
            println!("Output file: {}", output_file.display());
            println!("Processing complete!");
        }

        Commands::Validate { stations } => {
            let config = resolve_config(cli.config.as_deref(), &stations)?;
            let output = run_pipeline(&config)?;

            let checker = IntegrityChecker::new();
            println!("\n{}", checker.generate_summary(&output.report));

            if output.report.violations.is_empty() {
                println!("✅ All data passed plausibility checks");
            } else {
                println!(
                    "⚠️  Found {} plausibility issues",
                    output.report.violations.len()
                );
            }
        }

        Commands::Correlate { stations } => {
            let config = resolve_config(cli.config.as_deref(), &stations)?;
            let output = run_pipeline(&config)?;
            let dashboard = DashboardReport::build(&output, None);

            for matrix in &dashboard.correlations {
                println!("\n{}", matrix.to_table_string());
            }
            for series in &dashboard.scatter {
                println!(
                    "{} vs {} - {}: {} points",
                    series.x, series.y, series.station, series.points.len()
                );
            }
        }

        Commands::Info {
            file,
            sample,
            analysis_limit,
        } => {
            println!("Analyzing Parquet file: {}", file.display());

            let writer = ParquetWriter::new();
            let file_info = writer.get_file_info(&file)?;

            let analyzer = CombinedAnalyzer::new();
            let stats = analyzer.analyze_parquet_with_limit(&file, analysis_limit)?;

            println!("\n{}", stats.detailed_summary());

            println!("\nFile Details:");
            println!("{}", file_info.summary());

            if sample > 0 {
                println!("\nSample Rows (showing up to {} rows):", sample);
                match writer.read_combined_table(&file, sample) {
                    Ok(table) => {
                        let columns = table.column_names();
                        for (i, row) in table.rows.iter().enumerate() {
                            let cells: Vec<String> = columns
                                .iter()
                                .zip(row.values())
                                .map(|(name, value)| match value {
                                    Some(v) => format!("{}={:.1}", name, v),
                                    None => format!("{}=null", name),
                                })
                                .collect();
                            println!("{}. {}: {}", i + 1, row.date, cells.join(", "));
                        }
                    }
                    Err(e) => println!("Error reading sample data: {}", e),
                }
            }
        }
    }

    Ok(())
}

/// Load settings and apply station overrides from the command line
pub fn resolve_config(
    config_path: Option<&Path>,
    stations: &StationArgs,
) -> Result<DashboardConfig> {
    let mut config = DashboardConfig::load(config_path)?;

    let overrides = [
        (&stations.first, &stations.first_name),
        (&stations.second, &stations.second_name),
    ];
    for (index, (path, name)) in overrides.into_iter().enumerate() {
        let mut source = match path {
            Some(path) => StationSource::from_path(path),
            None => config.stations[index].clone(),
        };
        if let Some(name) = name {
            source.name = name.clone();
        }
        config.set_station(index, source)?;
    }

    if stations.mmap {
        config.output.use_mmap = true;
    }

    config.check()?;
    Ok(config)
}

fn run_pipeline(config: &DashboardConfig) -> Result<PipelineOutput> {
    let (first, second) = config.station_pair()?;
    println!("Processing air quality data...");
    println!("First station: {} ({})", first.name, first.path);
    println!("Second station: {} ({})", second.name, second.path);

    let progress = ProgressReporter::new_spinner("Processing data...", false);
    let pipeline = Pipeline::new().with_mmap(config.output.use_mmap);
    let output = pipeline.run(&first, &second, Some(&progress))?;

    progress.finish_with_message(&format!("Built {} combined days", output.combined.len()));
    if let Some(range) = output.combined.full_range() {
        println!("Available dates: {}", range);
    }

    Ok(output)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
