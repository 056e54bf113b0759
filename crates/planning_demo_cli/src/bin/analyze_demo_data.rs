//! Prints every persona dashboard from a generated planning database.

use log::error;
use planning_demo_core::{init_logging, DemoSettings, PlanningAnalyzer, ReportError};
use std::error::Error;
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=analyze module=cli status=error error={err}");
            match err.downcast_ref::<ReportError>() {
                Some(ReportError::DatabaseNotFound(path)) => {
                    eprintln!("❌ Database file not found: {}", path.display());
                    eprintln!("Please run generate_demo_data first to create the database.");
                }
                _ => eprintln!("❌ Unexpected error: {err}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let settings = DemoSettings::from_env()?;
    if let Err(err) = init_logging(&settings.log_level, &settings.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let analyzer = PlanningAnalyzer::open(&settings.db_path, settings.analysis_date())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(
        out,
        "📊 Connected to database: {}",
        settings.db_path.display()
    )?;
    analyzer.run_all_demos(&mut out)?;
    out.flush()?;
    Ok(())
}
