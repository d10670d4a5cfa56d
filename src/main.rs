use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, ValueEnum};
use crossbeam::channel;
use nonograms::*;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(ClapParser, Debug)]
#[command(version, about = "Solve nonograms with row and column logic")]
struct Args {
    /// Puzzles in the nonogram-db format
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Worker threads for line solving (default: one per core)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Output format of the solved grid
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print every cell to stderr as soon as it is decided
    #[arg(short, long)]
    progress: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Serialize)]
struct Report<'a> {
    file: &'a Path,
    width: usize,
    height: usize,
    solved: bool,
    error: Option<String>,
    rounds: usize,
    grid: HintMatrix,
}

fn go(path: &Path, args: &Args) -> Result<bool> {
    let mut fd = fs::File::open(path).with_context(|| format!("cannot read {}", path.display()))?;
    let nono = Parser::new()
        .parse(&mut fd)
        .with_context(|| format!("cannot parse {}", path.display()))?;
    info!(
        file = %path.display(),
        width = nono.width(),
        height = nono.height(),
        "loaded"
    );

    let (mut solver, printer) = if args.progress {
        let (tx, rx) = channel::unbounded::<Notification>();
        let printer = thread::spawn(move || {
            for n in rx {
                eprintln!("{} {} {}", n.row, n.col, if n.filled { '#' } else { '.' });
            }
        });
        (nono.solver_with_notifications(tx)?, Some(printer))
    } else {
        (nono.solver()?, None)
    };

    let result = solver.solve();
    let grid = solver.state();
    let rounds = solver.rounds();
    // Closes the notification channel.
    drop(solver);
    if let Some(printer) = printer {
        if printer.join().is_err() {
            error!(file = %path.display(), "progress printer panicked");
        }
    }

    if let Err(e) = &result {
        error!(file = %path.display(), rounds, "{e}");
    } else {
        info!(file = %path.display(), rounds, "solved");
    }

    match args.format {
        Format::Text => {
            println!("File: {}", path.display());
            println!("Dimensions (w×h) = {}×{}", nono.width(), nono.height());
            if let Err(e) = &result {
                println!("Error: {}", e);
            }
            println!("{}", as_text(&grid));
        }
        Format::Json => {
            let report = Report {
                file: path,
                width: nono.width(),
                height: nono.height(),
                solved: result.is_ok(),
                error: result.as_ref().err().map(ToString::to_string),
                rounds,
                grid,
            };
            println!("{}", serde_json::to_string(&report)?);
        }
    }
    Ok(result.is_ok())
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}=info", env!("CARGO_CRATE_NAME")))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("cannot set up the thread pool")?;
    }

    let mut failed = 0;
    for path in &args.files {
        match go(path, &args) {
            Ok(true) => (),
            Ok(false) => failed += 1,
            Err(err) => {
                eprintln!("Error: {:#}", err);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} puzzles not solved", failed, args.files.len());
    }
    Ok(())
}
