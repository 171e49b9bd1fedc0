use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use statify::{
    cli, config, error,
    types::{SearchCategory, TimeRange},
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightGreen.on_default())
        .placeholder(AnsiColor::BrightBlue.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in with Spotify through the backend
    Login,

    /// Forget the stored tokens and cached profile
    Logout,

    /// Show whether you are logged in and the cached profile
    Status,

    /// Show your Spotify profile
    Profile,

    /// Show your most played tracks
    TopTracks(TimeRangeOptions),

    /// Show your most played artists
    TopArtists(TimeRangeOptions),

    /// Search artists, albums and tracks
    Search(SearchOptions),

    /// Show a single track
    Track(IdOption),

    /// Show a single album with its tracklist
    Album(IdOption),

    /// Show a single artist
    Artist(IdOption),

    /// Keep the session alive by renewing the access token periodically
    Keepalive,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct TimeRangeOptions {
    /// Listening period
    #[clap(long, value_enum, default_value_t = TimeRange::MediumTerm)]
    pub time_range: TimeRange,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Search terms
    pub query: String,

    /// Results per category (defaults to STATIFY_SEARCH_LIMIT or 10)
    #[clap(long)]
    pub limit: Option<u32>,

    /// Only show one kind of result
    #[clap(long, value_enum, default_value_t = SearchCategory::All)]
    pub category: SearchCategory,
}

#[derive(Parser, Debug, Clone)]
pub struct IdOption {
    /// Spotify id
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Login => cli::login().await,
        Command::Logout => cli::logout().await,
        Command::Status => cli::status().await,
        Command::Profile => cli::profile().await,
        Command::TopTracks(opt) => cli::top_tracks(opt.time_range).await,
        Command::TopArtists(opt) => cli::top_artists(opt.time_range).await,
        Command::Search(opt) => {
            let limit = opt.limit.unwrap_or_else(config::search_limit);
            cli::search(opt.query, limit, opt.category).await
        }
        Command::Track(opt) => cli::track(opt.id).await,
        Command::Album(opt) => cli::album(opt.id).await,
        Command::Artist(opt) => cli::artist(opt.id).await,
        Command::Keepalive => cli::keepalive().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
