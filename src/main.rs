//! truss-ga CLI: evolve a symmetric truss from a JSON run configuration.

use std::path::PathBuf;
use std::process;

use log::info;
use truss_ga::driver::{render_ascii, Driver, RunConfig, RunSummary};
use truss_ga::ga::Checkpoint;
use truss_ga::solver::FrameSolver;
use truss_ga::structure::{build, DecodedStructure};

struct Args {
    config: Option<PathBuf>,
    resume: Option<PathBuf>,
    generations: Option<usize>,
}

fn print_usage(program: &str) {
    eprintln!("Usage: {program} [config.json] [--resume checkpoint.json] [--generations N]");
    eprintln!();
    eprintln!("Evolve a symmetric 2D truss with a genetic algorithm.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  config.json         Run configuration (defaults used when omitted)");
    eprintln!("  --resume PATH       Continue from a checkpoint file");
    eprintln!("  --generations N     Stop at generation N (default: 150)");
    eprintln!("  --example           Print a default configuration and exit");
    eprintln!();
    eprintln!("Set RUST_LOG=info for per-generation progress.");
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args {
        config: None,
        resume: None,
        generations: None,
    };
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--resume" => {
                let path = iter.next().ok_or("--resume needs a path")?;
                parsed.resume = Some(PathBuf::from(path));
            }
            "--generations" => {
                let value = iter.next().ok_or("--generations needs a number")?;
                let n = value
                    .parse()
                    .map_err(|e| format!("invalid generation count '{value}': {e}"))?;
                parsed.generations = Some(n);
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option '{flag}'")),
            path if parsed.config.is_none() => parsed.config = Some(PathBuf::from(path)),
            extra => return Err(format!("unexpected argument '{extra}'")),
        }
    }
    Ok(parsed)
}

fn print_example_config() {
    match serde_json::to_string_pretty(&RunConfig::default()) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing example config: {e}");
            process::exit(1);
        }
    }
}

fn print_structure(generation: usize, structure: &DecodedStructure) {
    println!(
        "Generation {generation}: {} members, span {}",
        structure.element_count(),
        structure.span()
    );
    print!("{}", render_ascii(structure));
}

fn run(args: Args) -> truss_ga::Result<RunSummary> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(n) = args.generations {
        config.generations = n;
    }

    let solver = FrameSolver::default();
    let driver = match &args.resume {
        Some(path) => {
            let checkpoint = Checkpoint::load(path)?;
            info!("loaded checkpoint {}", path.display());
            Driver::resume(config, checkpoint, solver)?
        }
        None => Driver::new(config, solver)?,
    };

    let e = driver.config().evolution.clone();
    println!("Truss GA");
    println!("========");
    println!("Span: {} x {}", e.length, e.height);
    println!(
        "Population: {}, crossover {}, mutation {}",
        e.population_size, e.crossover_rate, e.mutation_rate
    );
    println!("Generations: {}", driver.config().generations);
    println!();

    let mut driver = driver.with_observer(print_structure);
    let summary = driver.run()?;

    if let Some(best) = &summary.best {
        if let Some(structure) = build(&best.genome, driver.engine().geometry()).structure() {
            println!();
            println!("Best design:");
            print!("{}", render_ascii(structure));
        }
    }
    Ok(summary)
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map_or("truss-ga", String::as_str);

    if args.iter().any(|a| a == "--example") {
        print_example_config();
        return;
    }
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage(program);
        return;
    }

    let parsed = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("Error: {message}");
            eprintln!();
            print_usage(program);
            process::exit(2);
        }
    };

    let summary = match run(parsed) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    println!();
    println!("Run complete: {} generations evaluated", summary.generations_run);
    let Some(best) = summary.best else {
        println!("No generation was evaluated.");
        return;
    };
    println!(
        "Best fitness {:.6} (compliance {:.6}) in generation {}",
        best.fitness, best.compliance, best.generation
    );
}
