use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aq-dashboard")]
#[command(about = "Compare daily PM2.5 and PM10 levels of two air-quality stations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Settings file [default: aq-dashboard.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

/// Station inputs that override the configured pair
#[derive(Args, Debug, Clone, Default)]
pub struct StationArgs {
    #[arg(long, help = "CSV file of the first station")]
    pub first: Option<PathBuf>,

    #[arg(long, help = "Label of the first station [default: from file name]")]
    pub first_name: Option<String>,

    #[arg(long, help = "CSV file of the second station")]
    pub second: Option<PathBuf>,

    #[arg(long, help = "Label of the second station [default: from file name]")]
    pub second_name: Option<String>,

    #[arg(long, help = "Read input files through memory maps")]
    pub mmap: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the combined daily table and write it to Parquet
    Process {
        #[command(flatten)]
        stations: StationArgs,

        #[arg(
            short,
            long,
            help = "Output Parquet file path [default: output/aq-daily-{YYMMDD}.parquet]"
        )]
        output_file: Option<PathBuf>,

        #[arg(short, long, help = "Parquet compression [default: snappy]")]
        compression: Option<String>,

        #[arg(long, help = "First date to keep, YYYY-MM-DD [default: earliest date]")]
        start: Option<NaiveDate>,

        #[arg(long, help = "Last date to keep, YYYY-MM-DD [default: latest date]")]
        end: Option<NaiveDate>,

        #[arg(long, help = "Also write the dashboard data as JSON to this path")]
        report: Option<PathBuf>,

        #[arg(long, default_value = "false")]
        validate_only: bool,

        #[arg(long)]
        chunk_size: Option<usize>,
    },

    /// Load and clean both stations and print the integrity report
    Validate {
        #[command(flatten)]
        stations: StationArgs,
    },

    /// Print correlation matrices of both stations
    Correlate {
        #[command(flatten)]
        stations: StationArgs,
    },

    /// Display information about a Parquet file
    Info {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long, default_value = "10")]
        sample: usize,

        #[arg(
            long,
            default_value = "0",
            help = "Maximum rows to analyze (0 = all rows)"
        )]
        analysis_limit: usize,
    },
}
