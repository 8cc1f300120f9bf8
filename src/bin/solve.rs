use clap::Parser;
use deadline_collapse::input;

/// Reads `N D` and `N` deadlines from stdin and prints the number of tasks done.
#[derive(Parser, Debug)]
struct Cli {
    /// Log every visited bucket to stderr
    #[clap(long, default_value_t = false)]
    trace: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let input = input::read_stdin()?;
    deadline_collapse::solver::run(
        &input,
        cli.trace,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )
}
