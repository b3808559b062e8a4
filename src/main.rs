use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use ramseyforge::config::Config;
use ramseyforge::error::RfResult;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Search for R(5,5) counterexample graphs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON parameter file; flags given on the command line override it.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, short = 'S', long)]
    seed: Option<u64>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// First-improvement hill climbing from one graph.
    Climb(cmd::climb::ClimbArgs),
    /// Simulated annealing from one graph.
    Anneal(cmd::anneal::AnnealArgs),
    /// Genetic search over a population kept in a run directory.
    Evolve(cmd::evolve::EvolveArgs),
    /// Scores graph files.
    Check(cmd::check::CheckArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = dispatch(&cli, &matches) {
        error!("❌ {}", e);
        process::exit(1);
    }
}

fn dispatch(cli: &Cli, matches: &clap::ArgMatches) -> RfResult<()> {
    let (cli_config, name) = match &cli.command {
        Commands::Climb(args) => (&args.config, "climb"),
        Commands::Anneal(args) => (&args.config, "anneal"),
        Commands::Evolve(args) => (&args.config, "evolve"),
        Commands::Check(args) => (&args.config, "check"),
    };

    let config = match (&cli.config, matches.subcommand_matches(name)) {
        (Some(path), Some(sub_matches)) => {
            info!("⚖️  Loading parameters from: {}", path);
            let mut file_config = Config::load_from_file(path)?;
            file_config.merge_from_cli(cli_config, sub_matches);
            file_config
        }
        _ => cli_config.clone(),
    };
    config.validate()?;

    match &cli.command {
        Commands::Climb(args) => cmd::climb::run(args, &config, cli.seed),
        Commands::Anneal(args) => cmd::anneal::run(args, &config, cli.seed),
        Commands::Evolve(args) => cmd::evolve::run(args, &config, cli.seed),
        Commands::Check(args) => cmd::check::run(args, &config),
    }
}
