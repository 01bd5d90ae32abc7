//! polysort command line
//!
//! Measures the dispatching sort against recorded cases, generates such
//! cases, and sorts list files.

use clap::{Arg, ArgAction, ArgMatches, Command};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process;

use polysort::{
    config::{SortConfig, SortConfigBuilder},
    dataset::{format_values, load_values},
    error::{SortError, SortResult},
    generate::{generate_cases, write_case},
    measure::measure_case,
    Dispatcher, EXIT_FAILURE, EXIT_SUCCESS,
};

fn main() {
    let matches = build_cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    match run(&matches) {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("polysort: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn run(matches: &ArgMatches) -> SortResult<i32> {
    match matches.subcommand() {
        Some(("measure", sub)) => run_measure(sub),
        Some(("generate", sub)) => run_generate(sub),
        Some(("sort", sub)) => run_sort(sub),
        _ => Err(SortError::parse_error("missing subcommand")),
    }
}

fn engine_args() -> [Arg; 3] {
    [
        Arg::new("parallel")
            .long("parallel")
            .help("Number of workers for the parallel string sort")
            .value_name("N")
            .value_parser(clap::value_parser!(usize)),
        Arg::new("sequential")
            .long("sequential")
            .help("Sort on the calling thread only")
            .conflicts_with("parallel")
            .action(ArgAction::SetTrue),
        Arg::new("strict")
            .long("strict")
            .help("Fail on mixed or unrecognized element types instead of falling back")
            .action(ArgAction::SetTrue),
    ]
}

fn build_cli() -> Command {
    Command::new("polysort")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Type-dispatching sort engine")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log dispatch decisions (overridden by RUST_LOG)")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("measure")
                .about("Time the sort on a case directory and verify it against expected.txt")
                .arg(
                    Arg::new("case")
                        .help("Directory holding input.txt and expected.txt")
                        .required(true)
                        .value_name("CASE_DIR")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("iterations")
                        .short('n')
                        .long("iterations")
                        .help("Number of timed sorts")
                        .value_name("N")
                        .default_value("1")
                        .value_parser(clap::value_parser!(usize)),
                )
                .args(engine_args()),
        )
        .subcommand(
            Command::new("generate")
                .about("Write generated case directories")
                .arg(
                    Arg::new("out")
                        .help("Directory to create the cases in")
                        .required(true)
                        .value_name("OUT_DIR")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("size")
                        .long("size")
                        .help("Element count of the large cases")
                        .value_name("N")
                        .default_value("10000")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .help("Seed for reproducible random cases")
                        .value_name("SEED")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("sort")
                .about("Sort a list file and print the result")
                .arg(
                    Arg::new("file")
                        .help("List file such as [3, \"a\", 2.5]")
                        .required(true)
                        .value_name("FILE")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .args(engine_args()),
        )
}

/// Build the engine configuration from the shared engine flags
fn parse_config_from_matches(matches: &ArgMatches) -> SortResult<SortConfig> {
    let mut builder = SortConfigBuilder::new();

    if let Some(&threads) = matches.get_one::<usize>("parallel") {
        builder = builder.parallelism(threads);
    }
    if matches.get_flag("sequential") {
        builder = builder.sequential();
    }
    if matches.get_flag("strict") {
        builder = builder.strict();
    }

    builder.build()
}

fn path_arg(matches: &ArgMatches, name: &str) -> SortResult<PathBuf> {
    matches
        .get_one::<PathBuf>(name)
        .cloned()
        .ok_or_else(|| SortError::parse_error(&format!("missing argument: {name}")))
}

fn run_measure(matches: &ArgMatches) -> SortResult<i32> {
    let dir = path_arg(matches, "case")?;
    let iterations = matches.get_one::<usize>("iterations").copied().unwrap_or(1);
    let dispatcher = Dispatcher::new(parse_config_from_matches(matches)?)?;

    let measurement = measure_case(&dir, iterations, &dispatcher)?;

    println!("case: {}", dir.display());
    println!("size: {}", measurement.len);
    println!("plan: {:?}", measurement.plan);
    println!("iterations: {}", measurement.iterations);
    println!("total: {:?}", measurement.total);
    println!("mean: {:?}", measurement.mean());
    println!("valid: {} ({})", measurement.is_valid(), measurement.verification);

    Ok(if measurement.is_valid() {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    })
}

fn run_generate(matches: &ArgMatches) -> SortResult<i32> {
    let out = path_arg(matches, "out")?;
    let size = matches.get_one::<usize>("size").copied().unwrap_or(10_000);
    let mut rng = match matches.get_one::<u64>("seed") {
        Some(&seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for case in generate_cases(size, &mut rng) {
        write_case(&out, &case)?;
        println!("{}: {} ({} values)", case.name, case.description, case.input.len());
    }
    Ok(EXIT_SUCCESS)
}

fn run_sort(matches: &ArgMatches) -> SortResult<i32> {
    let file = path_arg(matches, "file")?;
    let dispatcher = Dispatcher::new(parse_config_from_matches(matches)?)?;

    let values = load_values(&file)?;
    let sorted = dispatcher.sort(&values)?;
    println!("{}", format_values(&sorted));
    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub_matches(args: &[&str]) -> ArgMatches {
        let matches = build_cli()
            .try_get_matches_from(args)
            .expect("Failed to parse test arguments");
        let (_, sub) = matches.subcommand().expect("subcommand");
        sub.clone()
    }

    #[test]
    fn test_parse_basic_config() {
        let matches = sub_matches(&["polysort", "sort", "--parallel", "4", "in.txt"]);
        let config = parse_config_from_matches(&matches).expect("Failed to parse test config");
        assert_eq!(config.parallelism, Some(4));
        assert!(config.use_fallback);
    }

    #[test]
    fn test_parse_strict_sequential() {
        let matches = sub_matches(&["polysort", "measure", "--sequential", "--strict", "cases/case1"]);
        let config = parse_config_from_matches(&matches).expect("Failed to parse test config");
        assert_eq!(config.effective_parallelism(), 1);
        assert!(!config.use_fallback);
        assert_eq!(matches.get_one::<usize>("iterations"), Some(&1));
    }

    #[test]
    fn test_conflicting_options() {
        let result = build_cli().try_get_matches_from([
            "polysort",
            "sort",
            "--sequential",
            "--parallel",
            "2",
            "in.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_thread_count() {
        let matches = sub_matches(&["polysort", "sort", "--parallel", "0", "in.txt"]);
        assert!(parse_config_from_matches(&matches).is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(build_cli().try_get_matches_from(["polysort"]).is_err());
    }
}
