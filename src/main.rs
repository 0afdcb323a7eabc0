use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotlink::{cli, config, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Show the currently playing track
    Now,

    /// List your playlists
    Playlists,

    /// Search for tracks
    Search(SearchOptions),

    /// Recommend tracks for up to 5 seed tracks
    Recommend(RecommendOptions),

    /// List available devices
    Devices,

    /// Show the playback state
    Status,

    /// Play a track on the active device
    Play(PlayOptions),

    /// Pause playback
    Pause,

    /// Pause or resume playback
    Toggle,

    /// Skip to the next track
    Next,

    /// Skip to the previous track
    Previous,

    /// Seek to a position in the current track
    Seek(SeekOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Search terms
    #[clap(required = true, num_args = 1..)]
    query: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct RecommendOptions {
    /// Spotify track ids
    #[clap(required = true, num_args = 1..)]
    seed_tracks: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlayOptions {
    /// Spotify track id
    track_id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct SeekOptions {
    /// Position in milliseconds
    #[clap(allow_negative_numbers = true)]
    position_ms: i64,
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
        Command::Auth => cli::auth().await,
        Command::Now => cli::now_playing().await,
        Command::Playlists => cli::playlists().await,
        Command::Search(opt) => cli::search(opt.query.join(" ")).await,
        Command::Recommend(opt) => cli::recommend(opt.seed_tracks).await,
        Command::Devices => cli::devices().await,
        Command::Status => cli::status().await,
        Command::Play(opt) => cli::play(opt.track_id).await,
        Command::Pause => cli::pause().await,
        Command::Toggle => cli::toggle().await,
        Command::Next => cli::next().await,
        Command::Previous => cli::previous().await,
        Command::Seek(opt) => cli::seek(opt.position_ms).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
