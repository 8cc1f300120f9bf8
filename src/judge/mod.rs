//! # Local Auto-Judge
//!
//! Runs a solution command against a case directory and writes a plain-text
//! report. A case directory holds `cases.txt` (the number of cases on its
//! first line) and `input{i}.txt` / `output{i}.txt` pairs for `i` in
//! `1..=count`.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod run;

use run::{RunOutput, RunStatus};

const WARMUP_TIMEOUT: Duration = Duration::from_secs(1);
const BUILD_TIMEOUT: Duration = Duration::from_secs(600);
const MISSING_LINE: &str = "(none)";

#[derive(Clone, Debug)]
pub struct JudgeConfig {
    /// Shell command under test.
    pub cmd: String,
    /// Shell command run once before any case.
    pub build: Option<String>,
    pub dir: PathBuf,
    pub cases_file: PathBuf,
    pub results_file: PathBuf,
    pub timeout: Duration,
    pub warmup: bool,
    pub quiet: bool,
}

impl JudgeConfig {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self {
            cmd: cmd.into(),
            build: None,
            dir: PathBuf::from("./testcases"),
            cases_file: PathBuf::from("cases.txt"),
            results_file: PathBuf::from("results.txt"),
            timeout: Duration::from_secs(10),
            warmup: true,
            quiet: false,
        }
    }

    pub fn input_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("input{}.txt", index))
    }

    pub fn output_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("output{}.txt", index))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JudgeError {
    #[error("build command failed: {0}")]
    BuildFailed(String),
}

/// One differing line; `None` when that side has no such line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LineDiff {
    pub line: usize,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict")]
pub enum Verdict {
    Accepted,
    WrongAnswer {
        input: String,
        expected: String,
        actual: String,
        diffs: Vec<LineDiff>,
    },
    RuntimeError {
        message: String,
    },
    TimeLimitExceeded,
    Missing,
}

impl Verdict {
    /// Short status code used in `!log status` lines.
    pub fn code(&self) -> &'static str {
        match self {
            Verdict::Accepted => "AC",
            Verdict::WrongAnswer { .. } => "WA",
            Verdict::RuntimeError { .. } => "RE",
            Verdict::TimeLimitExceeded => "TLE",
            Verdict::Missing => "MISSING",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CaseResult {
    pub index: usize,
    /// Wall time of the run; absent when the case did not run to completion.
    pub elapsed_ms: Option<u64>,
    pub verdict: Verdict,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub total: usize,
    pub passed: usize,
    pub cases: Vec<CaseResult>,
}

/// Reads the number of cases. A missing file, or a first line that is not
/// made of ASCII digits, counts as zero.
pub fn read_case_count(path: &Path) -> usize {
    let Ok(text) = fs::read_to_string(path) else {
        return 0;
    };
    let line = text.lines().next().unwrap_or("").trim();
    if line.is_empty() || !line.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    line.parse().unwrap_or(0)
}

/// Line-by-line comparison of trimmed outputs.
pub fn compare_outputs(expected: &str, actual: &str) -> Vec<LineDiff> {
    let exp: Vec<&str> = expected.trim().lines().collect();
    let act: Vec<&str> = actual.trim().lines().collect();
    let mut diffs = vec![];
    for i in 0..exp.len().max(act.len()) {
        let e = exp.get(i).copied();
        let a = act.get(i).copied();
        if e != a {
            diffs.push(LineDiff {
                line: i + 1,
                expected: e.map(str::to_string),
                actual: a.map(str::to_string),
            });
        }
    }
    diffs
}

/// Builds (if configured), warms up, runs every case and writes the report to
/// `cfg.results_file`.
pub fn run_judge(cfg: &JudgeConfig) -> Result<Report> {
    if let Some(build) = &cfg.build {
        eprintln!("[judge] building: {}", build);
        let out = run::run_with_input(build, "", BUILD_TIMEOUT)?;
        if !out.success() {
            let text = format!("compile error:\n{}", out.stderr);
            write_results(&cfg.results_file, &text)?;
            return Err(JudgeError::BuildFailed(failure_message(&out)).into());
        }
    }

    let count = read_case_count(&cfg.cases_file);
    if count == 0 {
        eprintln!("[judge] no cases to run");
        write_results(
            &cfg.results_file,
            "case count is 0 or the cases file is missing.\n",
        )?;
        return Ok(Report::default());
    }

    if cfg.warmup {
        warmup(&cfg.cmd);
    }

    let pb = if cfg.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(count as u64)
    };
    if let Ok(style) = ProgressStyle::with_template("[judge] {bar:40} {pos}/{len} {msg}") {
        pb.set_style(style);
    }

    let mut report = Report {
        total: count,
        ..Report::default()
    };
    for index in 1..=count {
        let case = judge_case(cfg, index)?;
        if case.verdict == Verdict::Accepted {
            report.passed += 1;
        }
        pb.set_message(format!("case {} {}", index, case.verdict.code()));
        if !cfg.quiet {
            pb.println(format!("!log case {} status {}", index, case.verdict.code()));
        }
        pb.inc(1);
        report.cases.push(case);
    }
    pb.finish_and_clear();

    write_results(&cfg.results_file, &render_report(&report))?;
    Ok(report)
}

/// Runs a single case.
pub fn judge_case(cfg: &JudgeConfig, index: usize) -> Result<CaseResult> {
    let in_path = cfg.input_path(index);
    let out_path = cfg.output_path(index);
    if !in_path.exists() || !out_path.exists() {
        return Ok(CaseResult {
            index,
            elapsed_ms: None,
            verdict: Verdict::Missing,
        });
    }
    let input = read_text(&in_path)?;
    let expected = read_text(&out_path)?;

    let out = run::run_with_input(&cfg.cmd, &input, cfg.timeout)?;
    if out.status == RunStatus::TimedOut {
        return Ok(CaseResult {
            index,
            elapsed_ms: None,
            verdict: Verdict::TimeLimitExceeded,
        });
    }
    let elapsed_ms = Some(out.elapsed.as_millis() as u64);
    let verdict = if !out.success() {
        Verdict::RuntimeError {
            message: failure_message(&out),
        }
    } else {
        let stdout = normalize_newlines(&out.stdout);
        let expected = expected.trim();
        let actual = stdout.trim();
        if actual == expected {
            Verdict::Accepted
        } else {
            Verdict::WrongAnswer {
                diffs: compare_outputs(expected, actual),
                input,
                expected: expected.to_string(),
                actual: actual.to_string(),
            }
        }
    };
    Ok(CaseResult {
        index,
        elapsed_ms,
        verdict,
    })
}

/// Renders the plain-text report written to the results file.
pub fn render_report(report: &Report) -> String {
    let mut s = String::new();
    for case in &report.cases {
        let i = case.index;
        if let Some(ms) = case.elapsed_ms {
            let _ = writeln!(s, "[Case {}] time: {} ms", i, ms);
        }
        match &case.verdict {
            Verdict::Accepted => {
                let _ = writeln!(s, "[Case {}] accepted\n", i);
            }
            Verdict::WrongAnswer {
                input,
                expected,
                actual,
                diffs,
            } => {
                let _ = writeln!(s, "[Case {}] wrong answer\n", i);
                let _ = writeln!(s, "input:\n{}", input);
                let _ = writeln!(s, "expected:\n{}", expected);
                let _ = writeln!(s, "actual:\n{}\n", actual);
                if !diffs.is_empty() {
                    s.push_str("diff:\n");
                    for d in diffs {
                        let _ = writeln!(
                            s,
                            "[Line {}]\nexpected: {}\nactual: {}",
                            d.line,
                            d.expected.as_deref().unwrap_or(MISSING_LINE),
                            d.actual.as_deref().unwrap_or(MISSING_LINE),
                        );
                    }
                }
                let _ = writeln!(s, "{}", "-".repeat(40));
            }
            Verdict::RuntimeError { message } => {
                let _ = writeln!(s, "[Case {}] runtime error:\n{}\n", i, message);
            }
            Verdict::TimeLimitExceeded => {
                let _ = writeln!(s, "[Case {}] time limit exceeded", i);
            }
            Verdict::Missing => {
                let _ = writeln!(s, "[Case {}] input or output file is missing.", i);
            }
        }
    }
    let _ = writeln!(s, "\npassed {} of {} cases", report.passed, report.total);
    s
}

/// Converts `\r\n` and lone `\r` line breaks to `\n`.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn read_text(path: &Path) -> Result<String> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(normalize_newlines(&text))
}

fn failure_message(out: &RunOutput) -> String {
    let stderr = out.stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    match out.code() {
        Some(code) => format!("abnormal exit (return code {})", code),
        None => "abnormal exit (killed by signal)".to_string(),
    }
}

/// One throwaway run so the first timed case does not pay for a cold start.
fn warmup(cmd: &str) {
    if let Err(e) = run::run_with_input(cmd, "\n", WARMUP_TIMEOUT) {
        eprintln!("[judge] warmup failed: {:#}", e);
    }
}

fn write_results(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn case_dir(cases: &[(&str, &str)], count: &str) -> Result<(TempDir, JudgeConfig)> {
        let tmp = TempDir::new()?;
        let dir = tmp.path().join("testcases");
        fs::create_dir_all(&dir)?;
        for (i, (input, output)) in cases.iter().enumerate() {
            fs::write(dir.join(format!("input{}.txt", i + 1)), input)?;
            fs::write(dir.join(format!("output{}.txt", i + 1)), output)?;
        }
        fs::write(tmp.path().join("cases.txt"), count)?;
        let mut cfg = JudgeConfig::new("cat");
        cfg.dir = dir;
        cfg.cases_file = tmp.path().join("cases.txt");
        cfg.results_file = tmp.path().join("results.txt");
        cfg.timeout = Duration::from_secs(5);
        cfg.warmup = false;
        cfg.quiet = true;
        Ok((tmp, cfg))
    }

    #[test]
    fn case_count_parsing() -> Result<()> {
        let tmp = TempDir::new()?;
        let p = tmp.path().join("cases.txt");
        assert_eq!(read_case_count(&p), 0);
        fs::write(&p, " 12 \nignored")?;
        assert_eq!(read_case_count(&p), 12);
        fs::write(&p, "-3")?;
        assert_eq!(read_case_count(&p), 0);
        fs::write(&p, "3 cases")?;
        assert_eq!(read_case_count(&p), 0);
        fs::write(&p, "")?;
        assert_eq!(read_case_count(&p), 0);
        Ok(())
    }

    #[test]
    fn compare_outputs_marks_missing_lines() {
        assert!(compare_outputs("1\n2\n", "1\n2").is_empty());
        let diffs = compare_outputs("1\n2\n3", "1\n5");
        assert_eq!(
            diffs,
            vec![
                LineDiff {
                    line: 2,
                    expected: Some("2".into()),
                    actual: Some("5".into()),
                },
                LineDiff {
                    line: 3,
                    expected: Some("3".into()),
                    actual: None,
                },
            ]
        );
    }

    #[test]
    fn newline_normalization() {
        assert_eq!(normalize_newlines("3\r\n4\r\n"), "3\n4\n");
        assert_eq!(normalize_newlines("a\rb\n"), "a\nb\n");
        assert_eq!(normalize_newlines("plain"), "plain");
    }

    #[cfg(unix)]
    #[test]
    fn crlf_case_files_are_accepted() -> Result<()> {
        let (_tmp, mut cfg) = case_dir(&[("2 1\r\n1 1\r\n", "3\r\n4\r\n")], "1")?;
        cfg.cmd = "printf '3\\n4\\n'".into();
        let case = judge_case(&cfg, 1)?;
        assert_eq!(case.verdict, Verdict::Accepted);

        // A CRLF-printing solution against an LF expected file passes too.
        fs::write(cfg.output_path(1), "3\n4\n")?;
        cfg.cmd = "printf '3\\r\\n4\\r\\n'".into();
        let case = judge_case(&cfg, 1)?;
        assert_eq!(case.verdict, Verdict::Accepted);

        // The solution sees LF-only input.
        cfg.cmd = "cat".into();
        fs::write(cfg.output_path(1), "2 1\n1 1\n")?;
        let case = judge_case(&cfg, 1)?;
        assert_eq!(case.verdict, Verdict::Accepted);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn crlf_mismatch_still_reports_a_diff() -> Result<()> {
        let (_tmp, mut cfg) = case_dir(&[("1", "3\r\n4\r\n")], "1")?;
        cfg.cmd = "printf '3\\n5\\n'".into();
        let case = judge_case(&cfg, 1)?;
        match case.verdict {
            Verdict::WrongAnswer { diffs, .. } => assert_eq!(
                diffs,
                vec![LineDiff {
                    line: 2,
                    expected: Some("4".into()),
                    actual: Some("5".into()),
                }]
            ),
            v => panic!("unexpected verdict: {:?}", v),
        }
        Ok(())
    }

    #[test]
    fn render_wrong_answer_and_summary() {
        let report = Report {
            total: 3,
            passed: 1,
            cases: vec![
                CaseResult {
                    index: 1,
                    elapsed_ms: Some(4),
                    verdict: Verdict::Accepted,
                },
                CaseResult {
                    index: 2,
                    elapsed_ms: Some(7),
                    verdict: Verdict::WrongAnswer {
                        input: "1 1\n1\n".into(),
                        expected: "1".into(),
                        actual: "".into(),
                        diffs: compare_outputs("1", ""),
                    },
                },
                CaseResult {
                    index: 3,
                    elapsed_ms: None,
                    verdict: Verdict::Missing,
                },
            ],
        };
        let text = render_report(&report);
        assert!(text.starts_with("[Case 1] time: 4 ms\n[Case 1] accepted\n\n"));
        assert!(text.contains("[Case 2] wrong answer\n"));
        assert!(text.contains("[Line 1]\nexpected: 1\nactual: (none)\n"));
        assert!(text.contains(&"-".repeat(40)));
        assert!(text.contains("[Case 3] input or output file is missing.\n"));
        assert!(text.ends_with("\npassed 1 of 3 cases\n"));
    }

    #[test]
    fn no_cases_writes_notice() -> Result<()> {
        let (_tmp, cfg) = case_dir(&[], "0")?;
        let report = run_judge(&cfg)?;
        assert_eq!(report.total, 0);
        let text = fs::read_to_string(&cfg.results_file)?;
        assert_eq!(text, "case count is 0 or the cases file is missing.\n");
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn judges_accepted_wrong_and_missing() -> Result<()> {
        // `cat` echoes the input, so only a case whose expected output equals
        // its input passes.
        let (_tmp, cfg) = case_dir(&[("3\n", "3\n"), ("4 1\n", "2")], "3")?;
        let report = run_judge(&cfg)?;
        assert_eq!(report.total, 3);
        assert_eq!(report.passed, 1);
        let codes: Vec<_> = report.cases.iter().map(|c| c.verdict.code()).collect();
        assert_eq!(codes, vec!["AC", "WA", "MISSING"]);
        let text = fs::read_to_string(&cfg.results_file)?;
        assert!(text.ends_with("passed 1 of 3 cases\n"));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn runtime_error_and_timeout() -> Result<()> {
        let (_tmp, mut cfg) = case_dir(&[("1", "1")], "1")?;
        cfg.cmd = "exit 7".into();
        let case = judge_case(&cfg, 1)?;
        assert_eq!(
            case.verdict,
            Verdict::RuntimeError {
                message: "abnormal exit (return code 7)".into()
            }
        );

        cfg.cmd = "echo boom 1>&2; exit 1".into();
        let case = judge_case(&cfg, 1)?;
        assert_eq!(
            case.verdict,
            Verdict::RuntimeError {
                message: "boom".into()
            }
        );

        cfg.cmd = "sleep 5".into();
        cfg.timeout = Duration::from_millis(200);
        let case = judge_case(&cfg, 1)?;
        assert_eq!(case.verdict, Verdict::TimeLimitExceeded);
        assert_eq!(case.elapsed_ms, None);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn failed_build_writes_compile_error() -> Result<()> {
        let (_tmp, mut cfg) = case_dir(&[("1", "1")], "1")?;
        cfg.build = Some("echo 'syntax error' 1>&2; exit 1".into());
        let err = run_judge(&cfg).unwrap_err();
        assert!(err.to_string().contains("syntax error"));
        let text = fs::read_to_string(&cfg.results_file)?;
        assert!(text.starts_with("compile error:\nsyntax error"));
        Ok(())
    }
}
