use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn summary(name: &str, entry_point: &str, ticket: &str, processes: &[&str]) -> String {
    let headers: Vec<String> = processes.iter().map(|p| format!("\"{}\"", p)).collect();
    let values: Vec<&str> = processes
        .iter()
        .map(|_| r#"[2, 1024, 60, 150.0, 45.5, 2048]"#)
        .collect();
    format!(
        r#"{{
            "unique_name": "{name}",
            "entry_point": "{entry_point}",
            "pipeline_version": "1.1.0",
            "duration": {{"h": 3.5}},
            "clade": "insects",
            "prefix": "{name}",
            "ticket": "{ticket}",
            "fasta_mb": 450.0,
            "longread_avg_gb": 1.0,
            "hic_avg_gb": 2.0,
            "longread_total_gb": 30.0,
            "hic_total_gb": 60.0,
            "execution": {{"headers": [{}], "values": [{}]}}
        }}"#,
        headers.join(", "),
        values.join(", ")
    )
}

struct Fixture {
    input: TempDir,
    output: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let input = TempDir::new().unwrap();
        fs::write(
            input.path().join("file1"),
            summary("run_1", "RAPID", "TOLA-1", &["KMER:FASTK_FASTK"]),
        )
        .unwrap();
        fs::write(
            input.path().join("file2"),
            summary(
                "run_2",
                "FULL",
                "TOLA-2",
                &["KMER:FASTK_FASTK", "HIC_MAPPING:SAMTOOLS_MERGE"],
            ),
        )
        .unwrap();
        fs::write(input.path().join("file3"), "").unwrap();

        Self {
            input,
            output: TempDir::new().unwrap(),
        }
    }

    fn add(&self, name: &str, content: String) {
        fs::write(self.input.path().join(name), content).unwrap();
    }

    fn runs_dir(&self) -> &Path {
        self.input.path()
    }

    fn command(&self) -> Command {
        // An empty config file keeps the user's own config out of the test.
        let config = self.output.path().join("config.toml");
        fs::write(&config, "").unwrap();

        let mut cmd = Command::cargo_bin("projstats").unwrap();
        cmd.env_remove("RUST_LOG")
            .arg(self.runs_dir())
            .arg("--output")
            .arg(self.output.path().join("stats"))
            .arg("--config")
            .arg(config);
        cmd
    }

    fn artifact(&self, name: &str) -> String {
        fs::read_to_string(self.output.path().join("stats").join(name)).unwrap()
    }

    fn has_artifact(&self, name: &str) -> bool {
        self.output.path().join("stats").join(name).exists()
    }
}

#[test]
fn test_writes_reports_for_a_batch() {
    let fixture = Fixture::new();

    fixture
        .command()
        .assert()
        .success()
        .stdout(contains("PROJECT SUMMARY STATS"))
        .stdout(contains("file3"));

    let summary = fixture.artifact("summary.txt");
    assert!(summary.contains("Total data points: 2"));
    assert!(summary.contains("Run Type Count:\nFULL 1\nRAPID 1\n"));
    assert!(summary.contains("Empty Files!: [file3]"));

    let table: Value = serde_json::from_str(&fixture.artifact("normalized_table.json")).unwrap();
    assert_eq!(table["rows"].as_array().unwrap().len(), 2);
    assert_eq!(table["columns"].as_array().unwrap().len(), 12 + 6 * 51);
    // run_1 never ran SAMTOOLS_MERGE
    let merge = table["columns"]
        .as_array()
        .unwrap()
        .iter()
        .position(|c| c == "HIC_MAPPING:SAMTOOLS_MERGE-AVERAGE_CPU")
        .unwrap();
    assert_eq!(table["rows"][0][merge], Value::Null);
    assert_eq!(table["rows"][1][merge], Value::from(2.0));

    assert!(fixture.has_artifact("KMER_FULL.json"));
    assert!(fixture.has_artifact("HIC_MAPPING_ALL.json"));
    assert!(!fixture.has_artifact("GENE_ALIGNMENT_ALL.json"));
    assert!(fixture.has_artifact("super_module.json"));
    assert!(fixture.has_artifact("runtime_views.json"));
    assert!(fixture.has_artifact("projstats.log"));
}

#[test]
fn test_unknown_process_aborts_by_default() {
    let fixture = Fixture::new();
    fixture.add(
        "file4",
        summary("run_4", "FULL", "TOLA-1", &["KMER:NOT_A_PROCESS"]),
    );

    fixture
        .command()
        .assert()
        .failure()
        .stderr(contains("KMER:NOT_A_PROCESS").and(contains("registry version 1.1.0")));

    assert!(!fixture.has_artifact("normalized_table.json"));
}

#[test]
fn test_unknown_process_can_be_tolerated() {
    let fixture = Fixture::new();
    fixture.add(
        "file4",
        summary("run_4", "FULL", "TOLA-1", &["KMER:NOT_A_PROCESS"]),
    );

    fixture
        .command()
        .args(["--unknown-processes", "warn"])
        .assert()
        .success();

    let summary = fixture.artifact("summary.txt");
    assert!(summary.contains("Total data points: 3"));
    assert!(summary.contains("Unknown Processes!: 1"));
}

#[test]
fn test_ticket_filter_limits_reports_not_summary() {
    let fixture = Fixture::new();

    fixture
        .command()
        .args(["--ticket", "TOLA-2"])
        .assert()
        .success();

    let report: Value = serde_json::from_str(&fixture.artifact("KMER_ALL.json")).unwrap();
    assert_eq!(report["row_count"], Value::from(1));
    assert!(fixture.artifact("summary.txt").contains("Total data points: 2"));
}

#[test]
fn test_missing_input_directory() {
    let fixture = Fixture::new();
    let config = fixture.output.path().join("config.toml");
    fs::write(&config, "").unwrap();

    Command::cargo_bin("projstats")
        .unwrap()
        .arg(fixture.runs_dir().join("missing"))
        .arg("--output")
        .arg(fixture.output.path().join("stats"))
        .arg("--config")
        .arg(config)
        .assert()
        .failure()
        .stderr(contains("Failed to list"));
}
