use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use keysweep::classifier::load_classifier;
use keysweep::config::{Config, ScoringWeights};
use keysweep::error::KsResult;
use keysweep::scorer::Scorer;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory searched for layout definition files.
    #[arg(global = true, long, default_value = "layouts")]
    layouts_dir: PathBuf,

    /// Directory holding one sub-directory of JSON tables per corpus.
    #[arg(global = true, long, default_value = "corpus")]
    corpus_dir: PathBuf,

    /// Movement table (JSON). The built-in table is used when omitted.
    #[arg(global = true, long)]
    classifier: Option<PathBuf>,

    #[arg(global = true, long)]
    weights: Option<PathBuf>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a layout against a corpus.
    Eval(cmd::eval::EvalArgs),
    /// Improve a layout with a single greedy swap sweep.
    Optimize(cmd::optimize::OptimizeArgs),
    /// Turn a text or TSV file into corpus JSON tables.
    Ngrams(cmd::ngrams::NgramsArgs),
}

fn main() {
    // 1. Parse Raw Matches (to distinguish user input from defaults)
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = execute(cli, &matches) {
        error!("❌ {}", e);
        process::exit(1);
    }
}

fn execute(cli: Cli, matches: &ArgMatches) -> KsResult<()> {
    // 2. Commands that need no scorer
    let (config, sub_name) = match &cli.command {
        Commands::Ngrams(args) => return cmd::ngrams::run(args.clone()),
        Commands::Eval(args) => (&args.config, "eval"),
        Commands::Optimize(args) => (&args.config, "optimize"),
    };

    // 3. Resolve Weights: JSON file as base, explicit CLI flags on top
    let sub_matches = matches.subcommand_matches(sub_name).unwrap_or(matches);
    let config = resolve_config(config, cli.weights.as_ref(), sub_matches)?;

    // 4. Initialize Scorer
    let classifier = load_classifier(cli.classifier.as_deref())?;
    let scorer = Arc::new(Scorer::from_config(classifier, &config));

    // 5. Execute
    match cli.command {
        Commands::Eval(mut args) => {
            args.config = config;
            cmd::eval::run(args, scorer, &cli.layouts_dir, &cli.corpus_dir)
        }
        Commands::Optimize(mut args) => {
            args.config = config;
            cmd::optimize::run(args, scorer, &cli.layouts_dir, &cli.corpus_dir)
        }
        Commands::Ngrams(_) => Ok(()),
    }
}

fn resolve_config(
    cli_config: &Config,
    weights_path: Option<&PathBuf>,
    sub_matches: &ArgMatches,
) -> KsResult<Config> {
    let mut config = cli_config.clone();
    match weights_path {
        Some(path) => {
            info!("⚖️  Loading Weights from: {}", path.display());
            let mut file_weights = ScoringWeights::load_from_file(path)?;
            file_weights.merge_from_cli(&cli_config.weights, sub_matches);
            config.weights = file_weights;
        }
        None => info!("⚖️  Using embedded default weights."),
    }
    Ok(config)
}
