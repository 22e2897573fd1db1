use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info};

use querycount_config::Settings;
use querycount_error::Result;
use querycount_evaluator::QueryCountEvaluator;
use querycount_logging::setup_logger;
use querycount_report::Reporter;

/// 위반 없음
const EXIT_OK: u8 = 0;
/// 위반 발생 시 종료 코드
const EXIT_VIOLATIONS: u8 = 1;
/// 로드/설정 에러 시 종료 코드
const EXIT_ERROR: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "querycount", about = "Per-test API query count reports and regression checks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Checks if the API query count has increased since the last run.
    /// Query count is measured per test case, and per API call.
    Check {
        /// JSON summary file to compare against.
        #[arg(long = "last-count-file", value_name = "PATH")]
        last_count_file: PathBuf,

        /// JSON summary file for current run. Defaults to the configured summary path.
        #[arg(long = "query-count-file", value_name = "PATH")]
        query_count_file: Option<PathBuf>,

        /// Threshold tolerance, in percentage. Defaults to the configured threshold (10%).
        #[arg(long = "query-count-threshold", value_name = "PCT")]
        query_count_threshold: Option<f64>,
    },

    /// Generates an HTML report from a query count JSON file.
    Report {
        /// JSON file for the run. Defaults to the configured summary path.
        query_count_file: Option<PathBuf>,

        /// Output directory to generate the report in.
        #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    // 로거 세팅
    setup_logger();

    let cli = Cli::parse();

    let result = run(cli.command);
    match &result {
        Ok(true) => {}
        Ok(false) => {
            error!("There was at least one test with an API call exceeding the allowed threshold.");
        }
        Err(e) => error!("{e}"),
    }
    ExitCode::from(exit_status(&result))
}

/// 실행 결과를 종료 코드로 변환
fn exit_status(result: &Result<bool>) -> u8 {
    match result {
        Ok(true) => EXIT_OK,
        Ok(false) => EXIT_VIOLATIONS,
        Err(_) => EXIT_ERROR,
    }
}

/// 명령 실행. 위반이 없으면 true
fn run(command: Command) -> Result<bool> {
    // 통합 설정 로드
    let settings = Settings::new()?;
    execute(&settings, command)
}

fn execute(settings: &Settings, command: Command) -> Result<bool> {
    match command {
        Command::Check {
            last_count_file,
            query_count_file,
            query_count_threshold,
        } => {
            let current = query_count_file.unwrap_or_else(|| settings.counter.summary_path());
            let threshold = query_count_threshold.unwrap_or(settings.check.threshold);
            info!(
                "쿼리 카운트 비교: {} (기준 {}, 허용 증가율 {}%)",
                current.display(),
                last_count_file.display(),
                threshold
            );

            let evaluator = QueryCountEvaluator::from_files(threshold, &current, &last_count_file)?;
            let violations = evaluator.run(&mut io::stderr().lock())?;
            Ok(violations.is_empty())
        }
        Command::Report {
            query_count_file,
            output_dir,
        } => {
            let report = query_count_file.unwrap_or_else(|| settings.counter.summary_path());
            let output_dir =
                output_dir.unwrap_or_else(|| PathBuf::from(&settings.report.output_dir));
            Reporter::process_file(&report, &output_dir)?;
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use clap::CommandFactory;
    use querycount_error::QueryCountError;

    fn summary(total: usize) -> String {
        format!(
            r#"{{"test_cases": [{{"id": "t", "queries": [
                {{"method": "GET", "path": "/api/events", "total": {total}}}
            ], "total": {total}}}], "total": {total}}}"#
        )
    }

    fn check(dir: &tempfile::TempDir, current: &str, last: &str) -> Result<bool> {
        let current_path = dir.path().join("query_count.json");
        let last_path = dir.path().join("last_query_count.json");
        fs::write(&current_path, current).unwrap();
        fs::write(&last_path, last).unwrap();

        execute(
            &Settings::default(),
            Command::Check {
                last_count_file: last_path,
                query_count_file: Some(current_path),
                query_count_threshold: None,
            },
        )
    }

    #[test]
    fn test_check_regression() {
        let dir = tempfile::tempdir().unwrap();
        let result = check(&dir, &summary(12), &summary(10));

        assert!(matches!(result, Ok(false)));
        assert_eq!(exit_status(&result), EXIT_VIOLATIONS);
    }

    #[test]
    fn test_check_within_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let result = check(&dir, &summary(11), &summary(10));

        assert!(matches!(result, Ok(true)));
        assert_eq!(exit_status(&result), EXIT_OK);
    }

    #[test]
    fn test_check_malformed_report() {
        let dir = tempfile::tempdir().unwrap();
        let result = check(&dir, "{\"test_cases\": [", &summary(10));

        assert!(matches!(result, Err(QueryCountError::Json(_))));
        assert_eq!(exit_status(&result), EXIT_ERROR);
    }

    #[test]
    fn test_check_missing_baseline() {
        let dir = tempfile::tempdir().unwrap();
        let current_path = dir.path().join("query_count.json");
        fs::write(&current_path, summary(10)).unwrap();

        let result = execute(
            &Settings::default(),
            Command::Check {
                last_count_file: dir.path().join("typo.json"),
                query_count_file: Some(current_path),
                query_count_threshold: Some(10.0),
            },
        );

        match &result {
            Err(QueryCountError::Io(err)) => assert!(err.to_string().contains("typo.json")),
            other => panic!("Expected io error, got {other:?}"),
        }
        assert_eq!(exit_status(&result), EXIT_ERROR);
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_check_arguments() {
        let cli = Cli::try_parse_from([
            "querycount",
            "check",
            "--last-count-file",
            "baseline.json",
            "--query-count-threshold",
            "25",
        ])
        .unwrap();

        match cli.command {
            Command::Check {
                last_count_file,
                query_count_file,
                query_count_threshold,
            } => {
                assert_eq!(last_count_file, PathBuf::from("baseline.json"));
                assert!(query_count_file.is_none());
                assert_eq!(query_count_threshold, Some(25.0));
            }
            other => panic!("Expected check, got {other:?}"),
        }
    }

    #[test]
    fn test_check_requires_baseline() {
        assert!(Cli::try_parse_from(["querycount", "check"]).is_err());
    }

    #[test]
    fn test_report_arguments() {
        let cli =
            Cli::try_parse_from(["querycount", "report", "detail.json", "-o", "out"]).unwrap();
        match cli.command {
            Command::Report {
                query_count_file,
                output_dir,
            } => {
                assert_eq!(query_count_file, Some(PathBuf::from("detail.json")));
                assert_eq!(output_dir, Some(PathBuf::from("out")));
            }
            other => panic!("Expected report, got {other:?}"),
        }
    }
}
