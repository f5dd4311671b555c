//! bandparams: peak position, peak value, barycenter and FWHM of a band
//! given as an (x, y) table.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;

use bandparams::app::BandParamsApp;
use bandparams::processing::crossings::CrossingStrategy;
use bandparams::state::settings::{BandField, OutputFormat, ReportSettings};

#[derive(Parser)]
#[command(name = "bandparams")]
#[command(version, about = "Parameters of a band: max, barycenter, width", long_about = None)]
struct Cli {
    /// Band data as a table (x y): whitespace-delimited text, CSV or Excel
    #[arg(value_name = "DATAFILE")]
    datafile: PathBuf,

    /// Display abscissa-valued fields (max_pos, barycenter, fwhm) with M digits [default: 2].
    /// Negative M rounds to tens, hundreds, ...
    #[arg(short = 'x', long, value_name = "M", allow_negative_numbers = true)]
    x_digits: Option<i32>,

    /// Display max_val with N digits [default: 3]
    #[arg(short = 'y', long, value_name = "N", allow_negative_numbers = true)]
    y_digits: Option<i32>,

    /// Print only this parameter
    #[arg(short, long, value_enum)]
    field: Option<BandField>,

    /// How FWHM is taken from the half-maximum crossings [default: span]
    #[arg(short, long, value_enum)]
    strategy: Option<CrossingStrategy>,

    /// Output format [default: text]
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Column holding x (name or 1-based index)
    #[arg(long, value_name = "COL")]
    x_column: Option<String>,

    /// Column holding y (name or 1-based index)
    #[arg(long, value_name = "COL")]
    y_column: Option<String>,

    /// JSON file with report settings; flags override it
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Append units inferred from the column headers
    #[arg(short, long)]
    units: bool,

    /// Enable verbose logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn settings(&self) -> Result<ReportSettings> {
        let mut settings = match &self.config {
            Some(path) => ReportSettings::load(path)
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("Invalid settings file {}", path.display()))?,
            None => ReportSettings::default(),
        };

        if let Some(m) = self.x_digits {
            settings.x_digits = m;
        }
        if let Some(n) = self.y_digits {
            settings.y_digits = n;
        }
        if self.field.is_some() {
            settings.field = self.field;
        }
        if let Some(s) = self.strategy {
            settings.strategy = s;
        }
        if let Some(f) = self.format {
            settings.format = f;
        }
        if self.units {
            settings.show_units = true;
        }
        Ok(settings)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    // Logs go to stderr; stdout carries the report only.
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let settings = cli.settings()?;
    tracing::debug!("Report settings: {settings:?}");

    let app = BandParamsApp::new(settings).with_columns(cli.x_column.clone(), cli.y_column.clone());
    let report = app.run(&cli.datafile)?;
    println!("{report}");
    Ok(())
}
