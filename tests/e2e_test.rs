/// End-to-end tests for the CLI
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const AS_OF: &str = "2024-01-10";

fn demo_fleet() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/demo_fleet.json")
}

/// Copies the demo fleet into `dir` so a test can rewrite it
fn writable_fleet(dir: &Path) -> PathBuf {
    let path = dir.join("fleet.json");
    fs::copy(demo_fleet(), &path).unwrap();
    path
}

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: Success - normal execution
    #[test]
    fn test_exit_code_success() {
        cargo_bin_cmd!("fleet-inventory")
            .args(["--as-of", AS_OF, "summary"])
            .assert()
            .code(0);
    }

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("fleet-inventory").arg("--help").assert().code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("fleet-inventory")
            .arg("--version")
            .assert()
            .code(0);
    }

    /// Exit code 1: critical issues with --fail-on-critical
    #[test]
    fn test_exit_code_critical_issues() {
        cargo_bin_cmd!("fleet-inventory")
            .args(["--as-of", AS_OF, "summary", "--fail-on-critical"])
            .assert()
            .code(1);
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("fleet-inventory")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid format value
    #[test]
    fn test_exit_code_invalid_format() {
        cargo_bin_cmd!("fleet-inventory")
            .args(["-f", "invalid_format", "summary"])
            .assert()
            .code(2);
    }

    /// Exit code 2: recent window out of range
    #[test]
    fn test_exit_code_invalid_recent_days() {
        cargo_bin_cmd!("fleet-inventory")
            .args(["--recent-days", "0", "summary"])
            .assert()
            .code(2);
    }

    /// Exit code 3: Application error - non-existent seed file
    #[test]
    fn test_exit_code_application_error_missing_seed() {
        cargo_bin_cmd!("fleet-inventory")
            .args(["--data", "/nonexistent/fleet.json", "summary"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("An error occurred"));
    }

    /// Exit code 3: Application error - seed file is not JSON
    #[test]
    fn test_exit_code_application_error_bad_seed() {
        cargo_bin_cmd!("fleet-inventory")
            .args(["--data", "Cargo.toml", "summary"])
            .assert()
            .code(3);
    }

    /// Exit code 3: --save without a seed file to rewrite
    #[test]
    fn test_exit_code_save_without_data() {
        cargo_bin_cmd!("fleet-inventory")
            .args([
                "register-platform",
                "--name",
                "Relay Node",
                "--urn",
                "4000001",
                "--type",
                "HQ Server",
                "--project",
                "1",
                "--save",
            ])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("--save"));
    }
}

mod report_tests {
    use super::*;

    #[test]
    fn test_markdown_summary_is_default() {
        cargo_bin_cmd!("fleet-inventory")
            .args(["--as-of", AS_OF, "summary"])
            .assert()
            .success()
            .stdout(predicate::str::contains("# Inventory Dashboard"))
            .stdout(predicate::str::contains("| Total Platforms | 6 |"))
            .stdout(predicate::str::contains("## Critical Issues"));
    }

    #[test]
    fn test_json_summary() {
        let output = cargo_bin_cmd!("fleet-inventory")
            .args(["--as-of", AS_OF, "-f", "json", "summary"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["report"], "summary");
        assert_eq!(json["data"]["total_platforms"], 6);
        assert_eq!(json["data"]["active_deployments"], 7);
        assert_eq!(json["data"]["recent_deployments"], 3);
    }

    #[test]
    fn test_recent_days_widens_window() {
        let output = cargo_bin_cmd!("fleet-inventory")
            .args(["--as-of", AS_OF, "--recent-days", "30", "-f", "json", "summary"])
            .output()
            .unwrap();

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["data"]["recent_deployments"], 9);
    }

    #[test]
    fn test_duplicates_report() {
        cargo_bin_cmd!("fleet-inventory")
            .args(["--data", demo_fleet().to_str().unwrap(), "duplicates"])
            .assert()
            .success()
            .stdout(predicate::str::contains("## URN 2000001 (2 platforms)"))
            .stdout(predicate::str::contains("Backend Infrastructure"))
            .stdout(predicate::str::contains("Secure Messaging"));
    }

    #[test]
    fn test_platforms_grouped_by_project() {
        cargo_bin_cmd!("fleet-inventory")
            .args(["platforms", "--group-by", "project"])
            .assert()
            .success()
            .stdout(predicate::str::contains("## FDC (3)"))
            .stdout(predicate::str::contains("## ICCS-X (2)"))
            .stdout(predicate::str::contains("## DITA (1)"));
    }

    #[test]
    fn test_platforms_query_filter() {
        let output = cargo_bin_cmd!("fleet-inventory")
            .args(["-f", "json", "platforms", "-q", "portal"])
            .output()
            .unwrap();

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let platforms = json["data"][0]["platforms"].as_array().unwrap();
        assert_eq!(platforms.len(), 1);
        assert_eq!(platforms[0]["name"], "Web Portal");
    }

    #[test]
    fn test_versions_status_filter() {
        cargo_bin_cmd!("fleet-inventory")
            .args(["versions", "--status", "rollback_needed"])
            .assert()
            .success()
            .stdout(predicate::str::contains("2.0.0"))
            .stdout(predicate::str::contains("1.9.0").not());
    }

    #[test]
    fn test_output_file() {
        let dir = TempDir::new().unwrap();
        let report = dir.path().join("report.md");

        cargo_bin_cmd!("fleet-inventory")
            .args(["--as-of", AS_OF, "-o", report.to_str().unwrap(), "summary"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Report written"));

        let content = fs::read_to_string(report).unwrap();
        assert!(content.starts_with("# Inventory Dashboard"));
    }

    #[test]
    fn test_quiet_suppresses_progress() {
        cargo_bin_cmd!("fleet-inventory")
            .args(["--quiet", "--as-of", AS_OF, "components"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Loading").not());
    }
}

mod registration_tests {
    use super::*;

    #[test]
    fn test_register_duplicate_urn_warns_and_saves() {
        let dir = TempDir::new().unwrap();
        let fleet = writable_fleet(dir.path());

        cargo_bin_cmd!("fleet-inventory")
            .args([
                "--data",
                fleet.to_str().unwrap(),
                "register-platform",
                "--name",
                "Relay Node",
                "--urn",
                "2000001",
                "--type",
                "Mounted Station",
                "--project",
                "2",
                "--save",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"name\": \"Relay Node\""))
            .stderr(predicate::str::contains(
                "URN 2000001 is already used by platform(s)",
            ));

        cargo_bin_cmd!("fleet-inventory")
            .args(["--data", fleet.to_str().unwrap(), "duplicates"])
            .assert()
            .success()
            .stdout(predicate::str::contains("## URN 2000001 (3 platforms)"))
            .stdout(predicate::str::contains("Relay Node"));
    }

    #[test]
    fn test_register_without_save_leaves_seed_untouched() {
        let dir = TempDir::new().unwrap();
        let fleet = writable_fleet(dir.path());
        let before = fs::read_to_string(&fleet).unwrap();

        cargo_bin_cmd!("fleet-inventory")
            .args([
                "--data",
                fleet.to_str().unwrap(),
                "register-platform",
                "--name",
                "Relay Node",
                "--urn",
                "4000001",
                "--type",
                "HQ Server",
                "--project",
                "1",
            ])
            .assert()
            .success();

        assert_eq!(fs::read_to_string(&fleet).unwrap(), before);
    }

    #[test]
    fn test_register_with_unknown_project_fails() {
        cargo_bin_cmd!("fleet-inventory")
            .args([
                "register-platform",
                "--name",
                "Relay Node",
                "--urn",
                "4000001",
                "--type",
                "HQ Server",
                "--project",
                "99",
            ])
            .assert()
            .code(3);
    }
}
