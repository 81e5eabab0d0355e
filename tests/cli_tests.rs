mod common;

use regex::Regex;
use serde_json::Value;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        common::write_corpus_dir(&dir.path().join("corpus"), "sample", &common::sample_corpus());
        common::write_file(
            &dir.path().join("layouts/mine.txt"),
            "mine:\nq w e r t | y u i o p\na s d f g | h j k l ;\nz x c v b | n m , . /\n",
        );
        Self { dir }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_keysweep"))
            .args(args)
            .arg("--layouts-dir")
            .arg(self.path("layouts"))
            .arg("--corpus-dir")
            .arg(self.path("corpus"))
            .output()
            .expect("Failed to execute binary")
    }

    /// `eval --json`, returning the layout name, score and metrics.
    fn eval_json(&self, args: &[&str]) -> (String, f64, Value) {
        let mut full = vec!["eval"];
        full.extend_from_slice(args);
        full.extend_from_slice(&["--corpus", "sample", "--json"]);
        let output = self.run(&full);
        assert!(
            output.status.success(),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let r: Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
        (
            r["layout"].as_str().unwrap().to_string(),
            r["score"].as_f64().unwrap(),
            r["metrics"].clone(),
        )
    }
}

#[test]
fn test_eval_json_report() {
    let ctx = TestContext::new();
    let qwerty = ctx.eval_json(&["qwerty"]);
    let mine = ctx.eval_json(&["mine"]);

    assert_eq!(qwerty.0, "qwerty");
    assert_eq!(mine.0, "mine");
    // Same keys in the same places.
    assert_eq!(qwerty.1, mine.1);

    let metrics = &qwerty.2;
    let sfb = metrics["sfb"].as_f64().unwrap();
    assert!(sfb > 0.0 && sfb <= 100.0);
    let hands = metrics["left_hand"].as_f64().unwrap() + metrics["right_hand"].as_f64().unwrap();
    assert!((hands - 100.0).abs() < 1e-6);
}

#[test]
fn test_eval_prints_tables() {
    let ctx = TestContext::new();
    let output = ctx.run(&["eval", "semimak", "--corpus", "sample"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Layout: semimak"));
    let re = Regex::new(r"\|\s*SFB\s*\|\s*(\d+\.\d{2})\s*\|").unwrap();
    let sfb: f64 = re
        .captures(&stdout)
        .map(|c| c[1].parse().unwrap())
        .expect("SFB row missing");
    assert!((0.0..=100.0).contains(&sfb));
}

#[test]
fn test_score_mode_flag() {
    let ctx = TestContext::new();
    let (_, score, metrics) = ctx.eval_json(&["colemak", "--score-mode", "sfb"]);
    assert_eq!(score, metrics["sfb"].as_f64().unwrap());
}

#[test]
fn test_weights_file_and_override() {
    let ctx = TestContext::new();
    let weights = ctx.path("weights.json");
    common::write_file(&weights, r#"{ "weight_sfb": 0.0, "weight_sfs": 0.0, "weight_redirect": 0.0,
        "weight_bad_redirect": 0.0, "bonus_roll_in": 0.0, "bonus_roll_out": 0.0,
        "bonus_alternate": 0.0, "weight_imbalance": 0.0 }"#);
    let weights = weights.to_str().unwrap();

    let (_, zeroed, _) = ctx.eval_json(&["qwerty", "--weights", weights]);
    assert_eq!(zeroed, 0.0);

    let (_, score, metrics) =
        ctx.eval_json(&["qwerty", "--weights", weights, "--weight-sfb", "2.0"]);
    let sfb = metrics["sfb"].as_f64().unwrap();
    assert!((score - 2.0 * sfb).abs() < 1e-9);
}

#[test]
fn test_optimize_improves_and_saves() {
    let ctx = TestContext::new();
    let saved = ctx.path("layouts/better.txt");
    let output = ctx.run(&[
        "optimize",
        "qwerty",
        "--corpus",
        "sample",
        "--threads",
        "2",
        "--output",
        saved.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let header = Regex::new(r"(?m)^qwerty-opt:$").unwrap();
    assert!(header.is_match(&stdout), "optimized layout not printed:\n{}", stdout);

    let (_, before, _) = ctx.eval_json(&["qwerty"]);
    let (name, after, _) = ctx.eval_json(&["better"]);
    assert_eq!(name, "qwerty-opt");
    assert!(after < before);
}

#[test]
fn test_ngrams_builds_a_corpus() {
    let ctx = TestContext::new();
    let text = ctx.path("book.txt");
    common::write_file(&text, "the theory of the thing is that there is no theory");
    let out = ctx.path("corpus/book");

    let output = ctx.run(&["ngrams", text.to_str().unwrap(), "--out", out.to_str().unwrap()]);
    assert!(output.status.success());
    for file in ["monograms.json", "bigrams.json", "trigrams.json"] {
        assert!(out.join(file).is_file(), "{} missing", file);
    }

    let eval = ctx.run(&["eval", "qwerty", "--corpus", "book", "--json"]);
    assert!(eval.status.success());
}

#[test]
fn test_missing_inputs_exit_with_error() {
    let ctx = TestContext::new();

    let output = ctx.run(&["eval", "no_such_layout", "--corpus", "sample"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Layout Not Found"));

    let output = ctx.run(&["optimize", "qwerty", "--corpus", "no_such_corpus"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Corpus Not Found"));
}

#[test]
fn test_help_describes_single_layout_eval() {
    let ctx = TestContext::new();
    let output = ctx.run(&["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Score a layout against a corpus"));
    assert!(!stdout.contains("one or more"));
}
