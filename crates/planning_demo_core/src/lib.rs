//! Core logic for the planning demo dataset.
//! Generation, validation and persona reporting all live here; the CLI
//! crate only wires settings, logging and exit codes around them.

pub mod config;
pub mod db;
pub mod generate;
pub mod logging;
pub mod manifest;
pub mod model;
pub mod repo;
pub mod report;
pub mod validate;

pub use config::{ConfigError, DemoSettings, GeneratorConfig};
pub use db::{open_db, open_db_in_memory, open_db_read_only, open_fresh_db, DbError};
pub use generate::{DemoGenerator, GenerateError, GenerationSummary};
pub use logging::{default_log_level, init_logging, logging_status};
pub use manifest::{write_manifest, DataManifest, ManifestError};
pub use repo::{RepoError, RepoResult};
pub use report::{PlanningAnalyzer, ReportError, ReportResult};
pub use validate::{validate_scenarios, ScenarioReport};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
