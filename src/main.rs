//! Offline turning-point analysis.
//!
//! Usage: `trendwire <input.json | ->`
//!
//! Reads an `AnalysisInput` document, derives any missing indicator series
//! from its bars and prints the resulting analysis as JSON.

use std::env;
use std::fs;
use std::io::{self, Read};
use tracing::info;
use trendwire::analysis::TechnicalAnalyzer;
use trendwire::config::{get_environment, IndicatorPeriods};
use trendwire::indicators::validate_analysis_input;
use trendwire::logging;
use trendwire::models::AnalysisInput;

fn read_input(source: &str) -> io::Result<String> {
    if source == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        fs::read_to_string(source)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging(&get_environment());

    let source = match env::args().nth(1) {
        Some(source) => source,
        None => {
            eprintln!("usage: trendwire <input.json | ->");
            std::process::exit(2);
        }
    };

    let input: AnalysisInput = serde_json::from_str(&read_input(&source)?)?;
    validate_analysis_input(&input)?;
    let input = input.with_derived_indicators(&IndicatorPeriods::default())?;

    let analysis = TechnicalAnalyzer::default().analyze(&input);
    info!(
        bars = analysis.bars_analyzed,
        events = analysis.turning_points.event_count(),
        "Analysis complete"
    );
    println!("{}", serde_json::to_string_pretty(&analysis)?);

    Ok(())
}
