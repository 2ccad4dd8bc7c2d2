use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use reader::config::Config;
use reader::error::{ReaderError, ReaderResult};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file; explicit command-line flags override it.
    #[arg(global = true, long = "config")]
    config_file: Option<PathBuf>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Tokenize(cmd::tokenize::TokenizeArgs),
    Pace(cmd::pace::PaceArgs),
    Mask(cmd::mask::MaskArgs),
    Score(cmd::score::ScoreArgs),
    Corpus(cmd::corpus::CorpusArgs),
}

fn init_logging(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// File config (if any) as the base, with flags the user actually typed on top.
fn resolve_config(
    cli_config: &Config,
    config_file: Option<&Path>,
    sub_matches: &ArgMatches,
) -> ReaderResult<Config> {
    let config = match config_file {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            let mut file_config = Config::load_from_file(path)?;
            file_config.merge_from_cli(cli_config, sub_matches);
            file_config
        }
        None => cli_config.clone(),
    };
    config.validate()?;
    Ok(config)
}

fn run(cli: Cli, matches: &ArgMatches) -> ReaderResult<()> {
    // Flags like --wpm live in the subcommand's matches, not the root.
    let sub_matches = matches
        .subcommand()
        .map(|(_, m)| m)
        .ok_or_else(|| ReaderError::Config("no subcommand given".to_string()))?;
    let config_file = cli.config_file.as_deref();

    match cli.command {
        Commands::Tokenize(args) => {
            let config = resolve_config(&args.config, config_file, sub_matches)?;
            cmd::tokenize::run(&args, &config)
        }
        Commands::Pace(args) => {
            let config = resolve_config(&args.config, config_file, sub_matches)?;
            cmd::pace::run(&args, &config)
        }
        Commands::Mask(args) => {
            let config = resolve_config(&args.config, config_file, sub_matches)?;
            cmd::mask::run(&args, &config)
        }
        Commands::Score(args) => {
            let config = resolve_config(&args.config, config_file, sub_matches)?;
            cmd::score::run(&args, &config)
        }
        Commands::Corpus(args) => cmd::corpus::run(&args),
    }
}

fn main() {
    // Raw matches tell user input apart from defaults.
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_logging(cli.debug);

    if let Err(e) = run(cli, &matches) {
        eprintln!("❌ {}", e);
        process::exit(1);
    }
}
