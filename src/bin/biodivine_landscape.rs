use biodivine_algo_landscape::landscape::Landscape;
use biodivine_algo_landscape::network::SynchronousBooleanNetwork;
use biodivine_lib_param_bn::BooleanNetwork;
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "biodivine_landscape")]
#[command(about = "Enumerate attractors and basins of a synchronous Boolean network")]
struct Args {
    /// Path to a Boolean network file (.aeon, .bnet, etc.)
    #[arg(value_name = "FILE")]
    file: String,

    /// Number of attractors to print (0 = all)
    #[arg(long, default_value_t = 0, require_equals = true)]
    count: usize,

    /// Logarithm base of the basin entropy
    #[arg(long, default_value_t = 2.0, require_equals = true)]
    base: f64,

    /// Largest number of variables for which the state space is enumerated
    #[arg(long, default_value_t = 24, require_equals = true)]
    max_vars: usize,

    /// Logging verbosity (use -v for info, or -v=LEVEL for a specific level)
    #[arg(long, short = 'v', value_name = "LEVEL", num_args = 0..=1, default_missing_value = "info", require_equals = true)]
    verbose: Option<Option<LogLevel>>,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
        }
    }
}

/// Format a Boolean state as a string of zeros and ones.
fn bit_string(state: &[usize]) -> String {
    state.iter().map(|it| if *it == 0 { '0' } else { '1' }).collect()
}

fn main() {
    let args = Args::parse();

    let log_level = match args.verbose {
        None => LevelFilter::Off,
        Some(None) => LevelFilter::Info,
        Some(Some(level)) => level.into(),
    };
    Builder::from_default_env().filter_level(log_level).init();

    let bn = BooleanNetwork::try_from_file(&args.file).unwrap_or_else(|e| {
        eprintln!("Failed to load BN file {}: {}", args.file, e);
        std::process::exit(1);
    });

    println!("Loaded BN with {} variables.", bn.num_vars());

    if bn.num_vars() > args.max_vars {
        eprintln!(
            "The network has {} variables, but at most {} are enumerated (see --max-vars).",
            bn.num_vars(),
            args.max_vars
        );
        std::process::exit(1);
    }

    let network = SynchronousBooleanNetwork::new(&bn).unwrap_or_else(|e| {
        eprintln!("Unsupported network: {}", e);
        std::process::exit(1);
    });

    let landscape = Landscape::new(&network).unwrap_or_else(|e| {
        eprintln!("Failed to build the state transition landscape: {}", e);
        std::process::exit(1);
    });

    println!("Variables: {}", network.variable_names().join(", "));

    let space = landscape.state_space();
    let basin_sizes = landscape.basin_sizes();
    for (i, attractor) in landscape.attractors().iter().enumerate() {
        if args.count > 0 && i >= args.count {
            break;
        }
        let states = attractor
            .iter()
            .filter_map(|it| space.decode(*it).ok())
            .map(|it| bit_string(&it))
            .collect::<Vec<_>>();
        println!(
            "Attractor #{}: length {}; basin {} states; [{}]",
            i + 1,
            attractor.len(),
            basin_sizes[i],
            states.join(" -> ")
        );
    }

    println!("Total attractors: {}", landscape.num_attractors());
    println!(
        "Basin entropy (base {}): {}",
        args.base,
        landscape.basin_entropy(args.base)
    );
}
