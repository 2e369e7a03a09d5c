//! Asset extractor CLI entrypoint.
//!
//! Parses the version label and destination, runs the extraction pipeline
//! against the live endpoints, and maps the outcome to an exit status.

use clap::Parser;
use clap::error::ErrorKind;
use mcasset_extractor::cli::Cli;
use mcasset_extractor::config::Endpoints;
use mcasset_extractor::error::Result;
use mcasset_extractor::output::{Console, write_line};
use mcasset_extractor::pipeline::{PipelineConfig, Summary, run_pipeline};
use std::io::Write;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let mut stderr = std::io::stderr();
            write_line(&mut stderr, err);
            std::process::exit(1);
        }
    };

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stdout, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<Summary> {
    let version = cli.version_label();
    let endpoints = Endpoints::default();
    let config = PipelineConfig {
        version: &version,
        destination: &cli.destination,
        endpoints: &endpoints,
    };
    let mut console = Console::new(stdout, stderr);
    run_pipeline(&config, &mut console)
}

fn exit_code_for_run_result(result: Result<Summary>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(_) => 0,
        Err(err) => {
            write_line(stderr, err);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use mcasset_extractor::download::DownloadReport;
    use mcasset_extractor::error::ExtractorError;
    use mcasset_extractor::extraction::ExtractionReport;

    #[test]
    fn exit_code_for_run_result_returns_zero_on_success() {
        let summary = Summary {
            version: "1.20.1".to_owned(),
            extraction: ExtractionReport::default(),
            download: DownloadReport {
                downloaded: 8,
                failed: 2,
                skipped: 0,
            },
        };
        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Ok(summary), &mut stderr);
        assert_eq!(exit_code, 0);
        assert!(stderr.is_empty());
    }

    #[test]
    fn exit_code_for_run_result_prints_error_and_returns_one() {
        let err = ExtractorError::VersionNotFound {
            id: "0.0.1".to_owned(),
        };

        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Err(err), &mut stderr);
        assert_eq!(exit_code, 1);

        let stderr_text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(stderr_text.contains("failed to find version info url for version 0.0.1"));
    }

    #[test]
    fn run_rejects_existing_destination() {
        let temp = tempfile::tempdir().expect("temp dir");
        let cli = Cli {
            label: "latest".to_owned(),
            destination: Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("UTF-8 path"),
        };
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        let result = run(&cli, &mut stdout, &mut stderr);

        assert!(matches!(
            result,
            Err(ExtractorError::DestinationExists { .. })
        ));
        assert!(stdout.is_empty());
    }
}
