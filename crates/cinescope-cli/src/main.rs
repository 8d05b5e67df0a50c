use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, clear, config, library, search, show};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "cinescope")]
#[command(about = "CineScope - Browse movies and TV, keep favorites and a watchlist")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse curated and filtered catalog lists
    #[command(
        long_about = "Browse the catalog. Without arguments, shows today's trending movies and TV shows. Pick a list with --media and --category; adding --genre, --year, --min-rating, or --sort switches to the filtered discover listing."
    )]
    Browse(browse::BrowseArgs),

    /// Search for movies and TV shows
    #[command(
        long_about = "Search the catalog by title. Searches movies and TV together unless --media narrows it down."
    )]
    Search(search::SearchArgs),

    /// Show full details for one title
    #[command(
        long_about = "Show the detail view for a movie or TV show: overview, genres, rating, trailer, top-billed cast, and similar titles."
    )]
    Show(show::ShowArgs),

    /// Manage the favorites and watchlist collections
    #[command(
        long_about = "Manage the two local collections. Items are stored on this machine only; nothing is written back to the metadata provider."
    )]
    Library {
        #[command(subcommand)]
        cmd: library::LibraryCommands,
    },

    /// View and change configuration
    #[command(
        long_about = "Manage configuration and the TMDB API token. Secrets are masked in 'config show' unless --full is given."
    )]
    Config {
        #[command(subcommand)]
        cmd: config::ConfigCommands,
    },

    /// Clear local data
    #[command(
        long_about = "Clear locally stored data. Use --library to drop the favorites and watchlist collections, --credentials to forget the API token, or --all for both."
    )]
    Clear(clear::ClearArgs),
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    let result = match cli.command {
        Commands::Browse(args) => browse::run_browse(args, &output).await,
        Commands::Search(args) => search::run_search(args, &output).await,
        Commands::Show(args) => show::run_show(args, &output).await,
        Commands::Library { cmd } => library::run_library(cmd, &output).await,
        Commands::Config { cmd } => config::run_config(cmd, &output).await,
        Commands::Clear(args) => clear::run_clear(args, &output).await,
    };

    // Route failures through the output layer so JSON consumers get a
    // structured error object instead of a human backtrace.
    if let Err(error) = result {
        output.error(format!("{error:#}"));
        std::process::exit(1);
    }
    Ok(())
}
