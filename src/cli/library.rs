use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    cli::{connect, report},
    info, utils, warning,
};

pub async fn now_playing() {
    let mut client = connect().await;

    match client.get_currently_playing().await {
        Ok(Some(track)) => info!(
            "{} - {} ({})",
            track.name,
            utils::join_artists(&track.artists),
            utils::format_duration(track.duration_ms)
        ),
        Ok(None) => info!("Nothing is playing right now."),
        Err(e) => report(e),
    }
}

pub async fn playlists() {
    let mut client = connect().await;

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching playlists...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = client.get_user_playlists().await;
    pb.finish_and_clear();

    match result {
        Ok(playlists) if playlists.is_empty() => warning!("No playlists found."),
        Ok(playlists) => {
            let table = Table::new(utils::playlist_rows(&playlists));
            println!("{}", table);
            info!("Found {} playlists", playlists.len());
        }
        Err(e) => report(e),
    }
}

pub async fn search(query: String) {
    let mut client = connect().await;

    match client.search_tracks(&query).await {
        Ok(tracks) if tracks.is_empty() => warning!("No tracks match \"{}\".", query),
        Ok(tracks) => println!("{}", Table::new(utils::track_rows(&tracks))),
        Err(e) => report(e),
    }
}

pub async fn recommend(seed_tracks: Vec<String>) {
    let mut client = connect().await;

    match client.get_recommendations(seed_tracks.as_slice()).await {
        Ok(tracks) if tracks.is_empty() => warning!("No recommendations available."),
        Ok(tracks) => println!("{}", Table::new(utils::track_rows(&tracks))),
        Err(e) => report(e),
    }
}
