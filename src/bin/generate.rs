use clap::Parser;
use deadline_collapse::casegen::{self, Limits};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::path::PathBuf;

#[derive(Parser)]
struct Cli {
    #[clap(long, short = 'n', default_value = "10")]
    count: usize,
    #[clap(long, short = 's')]
    seed: Option<u64>,
    #[clap(long, default_value = "20")]
    max_tasks: usize,
    #[clap(long, default_value = "10")]
    max_deadline: u32,
    #[clap(long, default_value = "10")]
    max_days: u64,
    #[clap(long, short = 'd', default_value = "./testcases")]
    dir: PathBuf,
    #[clap(long, default_value = "cases.txt")]
    cases: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let mut rng = match args.seed {
        Some(s) => ChaCha12Rng::seed_from_u64(s),
        None => ChaCha12Rng::from_os_rng(),
    };
    let limits = Limits {
        max_tasks: args.max_tasks,
        max_deadline: args.max_deadline,
        max_days: args.max_days,
    };
    let problems: Vec<_> = (0..args.count)
        .map(|_| casegen::random_problem(&mut rng, &limits))
        .collect();
    casegen::write_cases(&args.dir, &args.cases, &problems)?;
    eprintln!(
        "[generate] wrote {} cases to {}",
        problems.len(),
        args.dir.display()
    );
    Ok(())
}
