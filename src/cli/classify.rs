//! Classify command handler.

use super::RevisionPaths;
use crate::config::AppConfig;
use crate::pipeline::{classify_files, exit_code_for, output_report};
use anyhow::{Context, Result};

/// Inputs of the `classify` subcommand.
#[derive(Debug, Clone)]
pub struct ClassifyCommand {
    pub paths: RevisionPaths,
    pub config: AppConfig,
    pub quiet: bool,
}

/// Run the classify command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_classify(command: &ClassifyCommand) -> Result<i32> {
    let paths = &command.paths;
    let classified = classify_files(
        &paths.previous,
        &paths.current,
        paths.catalog.as_deref(),
        &command.config.classifier,
    )
    .context("Failed to classify revision")?;

    output_report(&command.config.output, &classified.result, command.quiet)?;
    Ok(exit_code_for(&classified.result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputConfig;
    use crate::pipeline::exit_codes;
    use crate::reports::ReportFormat;
    use tempfile::TempDir;

    const SNAPSHOT: &str = r#"{
        "name": "Scones",
        "version": "1.0.0",
        "components": [{ "id": "flour", "kind": "direct-reference", "name": "Flour" }]
    }"#;

    #[test]
    fn test_run_classify_identical_files() {
        let tmp = TempDir::new().unwrap();
        let snapshot = tmp.path().join("scones.json");
        std::fs::write(&snapshot, SNAPSHOT).unwrap();
        let report = tmp.path().join("report.json");

        let command = ClassifyCommand {
            paths: RevisionPaths {
                previous: snapshot.clone(),
                current: snapshot,
                catalog: None,
            },
            config: AppConfig {
                output: OutputConfig {
                    format: ReportFormat::Json,
                    file: Some(report.clone()),
                },
                ..AppConfig::default()
            },
            quiet: true,
        };

        assert_eq!(run_classify(&command).unwrap(), exit_codes::SUCCESS);
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(report).unwrap()).unwrap();
        assert_eq!(written["classification"]["has_changes"], false);
    }
}
