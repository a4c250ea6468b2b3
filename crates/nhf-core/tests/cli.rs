//! CLI tests for the nhf binary.
//!
//! Every test runs against its own temp data and config directories so the
//! user's files are never read or written.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct Env {
    data: TempDir,
    config: TempDir,
}

impl Env {
    fn new() -> Self {
        Self {
            data: TempDir::new().unwrap(),
            config: TempDir::new().unwrap(),
        }
    }

    fn nhf(&self) -> Command {
        let mut cmd = Command::cargo_bin("nhf").expect("nhf binary should exist");
        cmd.env("NHF_CONFIG_DIR", self.config.path())
            .env_remove("NHF_MODEL")
            .env_remove("NHF_DATA_DIR")
            .env_remove("RUST_LOG")
            .arg("--data-dir")
            .arg(self.data.path());
        cmd
    }

    fn events_file(&self) -> std::path::PathBuf {
        self.data.path().join("no_hitters.csv")
    }
}

fn json(stdout: &[u8]) -> serde_json::Value {
    serde_json::from_slice(stdout).expect("stdout should be JSON")
}

mod predict {
    use super::*;

    #[test]
    fn seeds_missing_table_and_predicts() {
        let env = Env::new();
        let output = env
            .nhf()
            .args(["predict", "--date", "2024-09-20", "--seed", "7"])
            .output()
            .unwrap();
        assert!(output.status.success());
        assert!(env.events_file().exists());

        let value = json(&output.stdout);
        let p = value["probability"].as_f64().unwrap();
        assert!(p > 0.0 && p < 1.0);
        assert_eq!(value["seed"], 7);
        assert_eq!(value["status"]["state"], "ok");
        assert!(value["factors"]["recency"]["multiplier"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn same_seed_same_output() {
        let env = Env::new();
        let run = || {
            env.nhf()
                .args(["predict", "--date", "2024-06-01", "--seed", "3"])
                .output()
                .unwrap()
                .stdout
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn summary_format_is_one_line() {
        let env = Env::new();
        env.nhf()
            .args(["-f", "summary", "predict", "--date", "2024-01-15"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("2024-01-15: "))
            .stdout(predicate::str::contains("[off season]"));
    }

    #[test]
    fn markdown_format_has_factor_table() {
        let env = Env::new();
        env.nhf()
            .args(["-f", "md", "predict", "--date", "2024-07-04"])
            .assert()
            .success()
            .stdout(predicate::str::contains("| Factor | Multiplier |"));
    }

    #[test]
    fn unparseable_date_is_args_error() {
        let env = Env::new();
        env.nhf()
            .args(["predict", "--date", "next tuesday"])
            .assert()
            .code(10)
            .stderr(predicate::str::contains("invalid date"));
    }

    #[test]
    fn out_of_range_year_is_args_error() {
        let env = Env::new();
        env.nhf()
            .args(["predict", "--date", "1492-10-12"])
            .assert()
            .code(10);
    }

    #[test]
    fn empty_table_is_degraded_exit() {
        let env = Env::new();
        fs::write(env.events_file(), "date,pitcher,team,opponent,notes\n").unwrap();
        let output = env
            .nhf()
            .args(["predict", "--date", "2024-07-04"])
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(1));
        let value = json(&output.stdout);
        assert_eq!(value["status"]["state"], "degraded");
        assert_eq!(value["status"]["reason"], "empty_table");
        assert_eq!(value["probability"], 0.0);
    }

    #[test]
    fn record_then_history_and_status() {
        let env = Env::new();
        env.nhf()
            .args(["predict", "--date", "2024-09-20", "--record"])
            .assert()
            .success();
        assert!(env.data.path().join("daily_predictions.json").exists());

        let output = env.nhf().arg("history").output().unwrap();
        assert!(output.status.success());
        let value = json(&output.stdout);
        let entries = value["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["prediction"]["date"], "2024-09-20");

        let output = env.nhf().arg("status").output().unwrap();
        assert!(output.status.success());
        let value = json(&output.stdout);
        assert_eq!(value["ledger_entries"], 1);
        assert_eq!(value["prediction"]["prediction"]["date"], "2024-09-20");
    }
}

mod data {
    use super::*;

    fn write_table(path: &Path, body: &str) {
        fs::write(path, format!("date,pitcher,team,opponent,notes\n{body}")).unwrap();
    }

    #[test]
    fn update_keeps_existing_rows() {
        let env = Env::new();
        write_table(&env.events_file(), "2030-05-01,Local Hero,AAA,BBB,\n");
        let output = env.nhf().args(["data", "update"]).output().unwrap();
        assert!(output.status.success());
        let value = json(&output.stdout);
        assert!(value["added"].as_u64().unwrap() > 100);

        let text = fs::read_to_string(env.events_file()).unwrap();
        assert!(text.contains("Local Hero"));
        assert!(text.contains("Christy Mathewson"));
    }

    #[test]
    fn update_refuses_to_drop_unreadable_rows() {
        let env = Env::new();
        let body = "2021-05-05,John Means,BAL,SEA,\n2023-7-4x,Typo Pitcher,NYY,BOS,needs fixing\n";
        write_table(&env.events_file(), body);
        let before = fs::read_to_string(env.events_file()).unwrap();

        env.nhf()
            .args(["data", "update"])
            .assert()
            .code(12)
            .stderr(predicate::str::contains("line 3"));

        let after = fs::read_to_string(env.events_file()).unwrap();
        assert_eq!(after, before);
        assert!(after.contains("Typo Pitcher"));
    }

    #[test]
    fn validate_reports_skipped_rows() {
        let env = Env::new();
        write_table(
            &env.events_file(),
            "2021-05-05,John Means,BAL,SEA,\n2021-13-01,Nobody,AAA,BBB,\n",
        );
        let output = env.nhf().args(["data", "validate"]).output().unwrap();
        assert_eq!(output.status.code(), Some(2));
        let value = json(&output.stdout);
        assert_eq!(value["skipped_rows"][0]["line"], 3);
    }

    #[test]
    fn strict_validate_fails_on_malformed_row() {
        let env = Env::new();
        write_table(&env.events_file(), "2021-05-05,,BAL,SEA,\n");
        env.nhf()
            .args(["data", "validate", "--strict"])
            .assert()
            .code(12)
            .stderr(predicate::str::contains("line 2"));
    }

    #[test]
    fn summary_counts_the_seed_dataset() {
        let env = Env::new();
        let output = env.nhf().args(["data", "summary", "--top", "3"]).output().unwrap();
        assert!(output.status.success());
        let value = json(&output.stdout);
        assert!(value["total_events"].as_u64().unwrap() > 100);
        assert_eq!(value["top_dates"].as_array().unwrap().len(), 3);
    }
}

mod config {
    use super::*;

    #[test]
    fn show_defaults() {
        let env = Env::new();
        let output = env.nhf().args(["config", "show"]).output().unwrap();
        assert!(output.status.success());
        let value = json(&output.stdout);
        assert_eq!(value["source"]["using_defaults"], true);
        assert_eq!(value["model"]["monte_carlo"]["trials"], 1000);
    }

    #[test]
    fn invalid_model_is_config_error() {
        let env = Env::new();
        let path = env.config.path().join("model.json");
        fs::write(&path, r#"{"schema_version":"1.0.0","monte_carlo":{"trials":0}}"#).unwrap();
        env.nhf()
            .args(["config", "validate"])
            .arg(&path)
            .assert()
            .code(11)
            .stderr(predicate::str::contains("trials"));
    }

    #[test]
    fn model_in_config_dir_is_used() {
        let env = Env::new();
        fs::write(
            env.config.path().join("model.json"),
            r#"{"schema_version":"1.0.0","monte_carlo":{"trials":50}}"#,
        )
        .unwrap();
        let output = env
            .nhf()
            .args(["predict", "--date", "2024-06-01"])
            .output()
            .unwrap();
        assert!(output.status.success());
        assert_eq!(json(&output.stdout)["confidence_interval"]["trials"], 50);
    }

    #[test]
    fn wrong_schema_version_is_version_error() {
        let env = Env::new();
        let path = env.config.path().join("model.json");
        fs::write(&path, r#"{"schema_version":"0.1.0"}"#).unwrap();
        env.nhf().args(["config", "validate"]).arg(&path).assert().code(13);
    }
}

mod misc {
    use super::*;

    #[test]
    fn season_summary_for_winter() {
        let env = Env::new();
        env.nhf()
            .args(["-f", "summary", "season", "--date", "2024-01-15"])
            .assert()
            .success()
            .stdout(predicate::str::contains("off season, 77 days"));
    }

    #[test]
    fn schema_for_prediction() {
        let env = Env::new();
        env.nhf()
            .args(["schema", "PredictionResult"])
            .assert()
            .success()
            .stdout(predicate::str::contains("data_fingerprint"));
    }

    #[test]
    fn unknown_schema_is_args_error() {
        let env = Env::new();
        env.nhf().args(["schema", "Nope"]).assert().code(10);
    }

    #[test]
    fn completions_for_bash() {
        let env = Env::new();
        env.nhf()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("nhf"));
    }

    #[test]
    fn version_json() {
        let env = Env::new();
        env.nhf()
            .arg("version")
            .assert()
            .success()
            .stdout(predicate::str::contains("schema_version"));
    }

    #[test]
    fn unknown_command_fails() {
        let env = Env::new();
        env.nhf()
            .arg("nonexistent-command")
            .assert()
            .failure()
            .stderr(predicate::str::contains("error"));
    }
}
