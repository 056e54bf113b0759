//! Generates the planning demo database and its manifest.
//!
//! # Responsibility
//! - Resolve settings from the environment and start file logging.
//! - Recreate the database, populate it, validate the scenarios and write
//!   the manifest.
//! - Map any failure to a diagnostic on stderr and exit status 1.

use log::{error, info};
use planning_demo_core::{
    init_logging, open_fresh_db, validate_scenarios, write_manifest, DemoGenerator, DemoSettings,
};
use std::error::Error;
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=generate module=cli status=error error={err}");
            eprintln!("❌ Error generating demo data: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let settings = DemoSettings::from_env()?;
    if let Err(err) = init_logging(&settings.log_level, &settings.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let config = settings.generator_config()?;
    let generator = DemoGenerator::new(config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(
        out,
        "🚀 Starting demo data generation (seed={}, reference date={})...",
        generator.config().seed,
        generator.config().reference_date
    )?;

    let mut conn = open_fresh_db(&settings.db_path)?;
    writeln!(out, "📊 Schema created at {}", settings.db_path.display())?;

    let summary = generator.run(&mut conn)?;
    for (table, rows) in summary.iter() {
        writeln!(out, "  Created {rows} {table}")?;
    }
    writeln!(out, "✅ Demo data generation complete! ({} rows)", summary.total())?;

    writeln!(out)?;
    let report = validate_scenarios(&conn)?;
    report.render(&mut out)?;

    let manifest = write_manifest(
        &conn,
        &settings.manifest_path,
        generator.config().seed,
        generator.config().reference_date,
        &report,
    )?;
    writeln!(
        out,
        "\n📄 Generated data manifest at {}",
        settings.manifest_path.display()
    )?;
    writeln!(out, "{}", serde_json::to_string_pretty(&manifest.counts)?)?;

    info!(
        "event=generate module=cli status=ok db_path={} rows={}",
        settings.db_path.display(),
        summary.total()
    );
    if !report.is_valid() {
        return Err("generated data failed integrity checks".into());
    }
    Ok(())
}
