use anyhow::Result;
use clap::Parser;
use deadline_collapse::judge::{self, JudgeConfig};
use std::path::PathBuf;
use std::time::Duration;

/// Runs a solution command against every case in a case directory.
#[derive(Parser, Debug)]
#[command(name = "judge", about = "Local auto-judge")]
struct Cli {
    /// The shell command to run (e.g., the solution binary)
    cmd: String,
    /// Shell command run once before testing (e.g., a compiler invocation)
    #[arg(long)]
    build: Option<String>,
    /// Directory holding input{i}.txt / output{i}.txt
    #[arg(long, default_value = "./testcases")]
    dir: PathBuf,
    /// File whose first line is the number of cases
    #[arg(long, default_value = "cases.txt")]
    cases: PathBuf,
    /// Report destination
    #[arg(long, default_value = "results.txt")]
    results: PathBuf,
    /// Per-case time limit in milliseconds
    #[arg(long = "timeout-ms", default_value_t = 10_000)]
    timeout_ms: u64,
    #[arg(long, default_value_t = false)]
    no_warmup: bool,
    /// Print the summary as JSON on stdout
    #[arg(long, default_value_t = false)]
    json: bool,
    #[arg(long, short = 'q', default_value_t = false)]
    quiet: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let cfg = JudgeConfig {
        cmd: cli.cmd,
        build: cli.build,
        dir: cli.dir,
        cases_file: cli.cases,
        results_file: cli.results,
        timeout: Duration::from_millis(cli.timeout_ms),
        warmup: !cli.no_warmup,
        quiet: cli.quiet,
    };
    let report = match judge::run_judge(&cfg) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("[judge] see {}", cfg.results_file.display());
            return Err(e);
        }
    };
    eprintln!("!log passed {}", report.passed);
    eprintln!("!log total {}", report.total);
    eprintln!(
        "[judge] done, results written to {}",
        cfg.results_file.display()
    );
    if cli.json {
        println!("{}", serde_json::to_string(&report)?);
    }
    Ok(())
}
