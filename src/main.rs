use anyhow::Result;
use clap::Parser;
use srcpm::commands::{self, Config};
use std::path::PathBuf;

/// srcpm - source-based package manager
///
/// Removes packages built from source into a prefix, together with every
/// installed package that depends on them.
///
/// Examples:
///   srcpm remove gnuradio          # Remove gnuradio and its dependents
///   srcpm remove -d volk           # Remove only volk
#[derive(Parser, Debug)]
#[command(author, version = env!("SRCPM_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Prefix directory (overrides defaults; also via SRCPM_PREFIX)
    #[arg(
        long = "prefix",
        short = 'p',
        env = "SRCPM_PREFIX",
        value_name = "PATH",
        global = true
    )]
    pub prefix: Option<PathBuf>,

    /// Recipe directory (defaults to <PREFIX>/.srcpm/recipes)
    #[arg(long = "recipes", env = "SRCPM_RECIPES", value_name = "PATH", global = true)]
    pub recipes: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Remove listed packages
    Remove(RemoveArgs),

    /// List packages recorded in the inventory
    List,
}

#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Packages to remove
    #[arg(value_name = "PACKAGE", required = true, num_args = 1..)]
    pub packages: Vec<String>,

    /// Do not remove dependees. May leave prefix in unusable state.
    #[arg(long = "no-deps", short = 'd')]
    pub no_deps: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = srcpm::runtime::RealRuntime;

    match cli.command {
        Commands::Remove(args) => {
            let config = Config::load(&runtime, cli.prefix, cli.recipes)?;
            commands::remove(runtime, &args.packages, args.no_deps, config)?
        }
        Commands::List => {
            let config = Config::load(&runtime, cli.prefix, cli.recipes)?;
            commands::list(runtime, config)?
        }
    }
    Ok(())
}
