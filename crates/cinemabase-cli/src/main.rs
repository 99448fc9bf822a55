use clap::{ArgAction, Args, Parser, Subcommand};
use movie_catalog_config::PathManager;
use movie_catalog_models::{DirectorId, MovieId};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "cinemabase")]
#[command(about = "Cinemabase - a personal catalog of movies and their directors")]
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

    /// Also write logs to a file, rotated daily. Without `=PATH` the file goes
    /// to the logs directory next to the config.
    #[arg(long, global = true, value_name = "PATH", num_args = 0..=1, require_equals = true)]
    log_file: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List, show, add, edit and delete movies
    Movie {
        #[command(subcommand)]
        cmd: MovieCommands,
    },
    /// List, add, edit and delete directors
    Director {
        #[command(subcommand)]
        cmd: DirectorCommands,
    },
    /// Show catalog KPIs, the genre breakdown and the top-rated movies
    Dashboard,
    /// Search the online movie database by title
    #[command(long_about = "Search OMDb by title. Results are not added to the catalog; use 'cinemabase import <ID>' with one of the listed IDs.")]
    Search {
        /// Title to look for
        query: String,
    },
    /// Import a movie from the online movie database
    #[command(long_about = "Fetch a title from OMDb by its IMDb ID and add it to the catalog. The director is matched by name or created. Titles already in the catalog are refused.")]
    Import {
        /// IMDb ID as listed by 'cinemabase search' (e.g. tt1375666)
        external_id: String,
    },
    /// Show or change configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum MovieCommands {
    /// List movies, optionally filtered and sorted
    List {
        /// Case-insensitive text matched against title and synopsis
        #[arg(long, default_value = "")]
        search: String,

        /// Only movies of exactly this genre
        #[arg(long, default_value = "")]
        genre: String,

        /// title-asc, title-desc, year-asc, year-desc, rating-asc or rating-desc
        #[arg(long, default_value = "")]
        sort: String,
    },
    /// Show one movie in detail
    Show { id: MovieId },
    /// Add a movie
    Add {
        #[command(flatten)]
        fields: MovieFields,
    },
    /// Edit a movie; only the given fields change
    Edit {
        id: MovieId,

        #[command(flatten)]
        fields: MovieFields,
    },
    /// Delete a movie
    Delete {
        id: MovieId,

        /// Do not ask for confirmation
        #[arg(long, short = 'y', action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Args)]
struct MovieFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    year: Option<i32>,
    /// Minutes
    #[arg(long)]
    duration: Option<i32>,
    #[arg(long)]
    genre: Option<String>,
    /// 0 to 10
    #[arg(long)]
    rating: Option<f64>,
    /// Director ID (see 'cinemabase director list')
    #[arg(long)]
    director: Option<DirectorId>,
    #[arg(long)]
    synopsis: Option<String>,
    /// Poster URL
    #[arg(long)]
    poster: Option<String>,
}

#[derive(Subcommand)]
enum DirectorCommands {
    /// List directors with their movie counts
    List,
    /// Add a director
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        nationality: String,
        #[arg(long)]
        bio: Option<String>,
    },
    /// Edit a director; only the given fields change
    Edit {
        id: DirectorId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        nationality: Option<String>,
        #[arg(long)]
        bio: Option<String>,
    },
    /// Delete a director that has no movies
    Delete {
        id: DirectorId,

        /// Do not ask for confirmation
        #[arg(long, short = 'y', action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Store the OMDb API key
    #[command(long_about = "Store the OMDb API key in the credentials file. Get a key at https://www.omdbapi.com/apikey.aspx. The OMDB_API_KEY environment variable overrides the stored key.")]
    Omdb {
        /// API key (if not provided, will prompt)
        #[arg(long, conflicts_with = "clear")]
        api_key: Option<String>,

        /// Remove the stored key instead
        #[arg(long, action = ArgAction::SetTrue)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .map(|path| path.unwrap_or_else(|| PathManager::default().log_file()));
    logging::init_logging_with_file(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Movie { cmd } => commands::movie::run_movie(cmd, &output),
        Commands::Director { cmd } => commands::director::run_director(cmd, &output),
        Commands::Dashboard => commands::dashboard::run_dashboard(&output),
        Commands::Search { query } => commands::remote::run_search(&query, &output).await,
        Commands::Import { external_id } => commands::remote::run_import(&external_id, &output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            commands::config::run_config(cmd, &output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_flag_with_and_without_path() {
        let cli = Cli::try_parse_from(["cinemabase", "dashboard"]).unwrap();
        assert_eq!(cli.log_file, None);

        let cli = Cli::try_parse_from(["cinemabase", "--log-file", "dashboard"]).unwrap();
        assert_eq!(cli.log_file, Some(None));
        assert!(matches!(cli.command, Commands::Dashboard));

        let cli = Cli::try_parse_from(["cinemabase", "--log-file=/tmp/cb.log", "dashboard"]).unwrap();
        assert_eq!(cli.log_file, Some(Some(PathBuf::from("/tmp/cb.log"))));
    }

    #[test]
    fn test_omdb_clear_conflicts_with_key() {
        assert!(Cli::try_parse_from(["cinemabase", "config", "omdb", "--clear"]).is_ok());
        assert!(Cli::try_parse_from(["cinemabase", "config", "omdb", "--clear", "--api-key", "k"]).is_err());
    }
}
