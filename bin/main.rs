use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{ensure, Context, Result};
use clap::{Parser, ValueEnum};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tabled::builder::Builder;

use dimacsrs::dimacs::{read_dimacs, write_dimacs};
use dimacsrs::formula::{FormulaManager, GlobalCounter};
use dimacsrs::translate::Translator;

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    None,
}

impl LogLevel {
    fn to_trace(&self) -> Option<tracing::Level> {
        Some(match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::None => return None,
        })
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to DIMACS file with the CNF problem
    #[arg(short, long, value_name = "dimacs.cnf")]
    dimacs_path: PathBuf,

    /// Print the comment lines of the problem.
    #[arg(short = 'c', long)]
    print_comments: bool,

    /// Keep only this fraction of randomly selected clauses and write them
    /// to the output file.
    #[arg(short, long, value_name = "FRACTION")]
    reduce: Option<f64>,

    /// Where to store the reduced problem. Defaults to the input path
    /// with a '.reduced' suffix.
    #[arg(short, long, value_name = "FILE.cnf")]
    output: Option<PathBuf>,

    /// Seed for shuffling the clauses when reducing.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Verbosity level. See `tracing::Level` for more information.
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    verbosity: LogLevel,

    /// Print timing and size statistics.
    #[arg(short, long)]
    print_statistics: bool,
}

#[derive(Debug, Clone, Default)]
struct Statistics {
    reading: Option<Duration>,
    translation: Option<Duration>,
    reduction: Option<Duration>,

    formula_size: Option<usize>,
    reduced_clauses: Option<usize>,
}

impl Statistics {
    fn print(&self) {
        fn duration(value: Option<Duration>) -> String {
            value.map_or_else(|| "-".to_owned(), |value| format!("{value:.2?}"))
        }

        fn count(value: Option<usize>) -> String {
            value.map_or_else(|| "-".to_owned(), |value| value.to_string())
        }

        let mut builder = Builder::default();
        builder.push_record(["statistic", "value"]);
        builder.push_record(["reading time".to_owned(), duration(self.reading)]);
        builder.push_record(["translation time".to_owned(), duration(self.translation)]);
        builder.push_record(["reduction time".to_owned(), duration(self.reduction)]);
        builder.push_record(["formula size".to_owned(), count(self.formula_size)]);
        builder.push_record(["reduced clauses".to_owned(), count(self.reduced_clauses)]);

        println!("{}", builder.build());
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    if let Some(level) = args.verbosity.to_trace() {
        tracing_subscriber::fmt().with_max_level(level).init();
    }

    let mut statistics = Statistics::default();

    let reading_start = Instant::now();
    let problem = read_dimacs(&args.dimacs_path).with_context(|| {
        format!(
            "could not read DIMACS file '{}'",
            args.dimacs_path.display()
        )
    })?;
    statistics.reading = Some(reading_start.elapsed());

    println!("variables: {}", problem.variable_count());
    println!("clauses  : {}", problem.clauses().len());

    if args.print_comments {
        for comment in problem.comments() {
            println!("{comment}");
        }
    }

    let translation_start = Instant::now();
    let translator = Translator::new(FormulaManager::new(GlobalCounter));
    let (formula, _) = problem
        .to_formula(&translator)
        .context("could not translate the DIMACS problem into a formula")?;
    statistics.translation = Some(translation_start.elapsed());
    statistics.formula_size = Some(formula.size());

    println!("formula size: {}", formula.size());

    if let Some(fraction) = args.reduce {
        ensure!(
            (0.0..=1.0).contains(&fraction),
            "reduction fraction must be between 0 and 1, got {fraction}"
        );

        let output = args.output.clone().unwrap_or_else(|| {
            let mut path = args.dimacs_path.clone().into_os_string();
            path.push(".reduced");
            PathBuf::from(path)
        });

        let reduction_start = Instant::now();
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut clauses = problem.clauses().to_vec();
        clauses.shuffle(&mut rng);

        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_precision_loss,
            clippy::cast_sign_loss
        )]
        let keep = (fraction * clauses.len() as f64).floor() as usize;
        clauses.truncate(keep);

        write_dimacs(&clauses, &output).with_context(|| {
            format!("could not write reduced problem to '{}'", output.display())
        })?;
        statistics.reduction = Some(reduction_start.elapsed());
        statistics.reduced_clauses = Some(keep);

        println!("reduced problem: {} ({keep} clauses)", output.display());
    }

    if args.print_statistics {
        statistics.print();
    }

    Ok(())
}
