use tabled::Table;

use crate::{
    cli::{connect, report},
    info, success, utils, warning,
};

pub async fn devices() {
    let mut client = connect().await;

    match client.get_devices().await {
        Ok(devices) if devices.is_empty() => {
            warning!("No devices available. Open Spotify on one of your devices.")
        }
        Ok(devices) => println!("{}", Table::new(utils::device_rows(&devices))),
        Err(e) => report(e),
    }
}

pub async fn status() {
    let mut client = connect().await;

    match client.get_playback_state().await {
        Ok(Some(state)) => {
            let device = state
                .device
                .map(|d| d.name)
                .unwrap_or_else(|| "unknown device".to_string());
            let track = state
                .item
                .map(|t| format!("{} - {}", t.name, utils::join_artists(&t.artists)))
                .unwrap_or_else(|| "no track".to_string());
            let verb = if state.is_playing { "Playing" } else { "Paused" };
            info!("{} {} on {}", verb, track, device);
        }
        Ok(None) => info!("No active playback."),
        Err(e) => report(e),
    }
}

pub async fn play(track_id: String) {
    let mut client = connect().await;

    match client.play_track(&track_id).await {
        Ok(()) => success!("Playing {}", track_id),
        Err(e) => report(e),
    }
}

pub async fn pause() {
    let mut client = connect().await;

    match client.pause_track().await {
        Ok(()) => success!("Paused"),
        Err(e) => report(e),
    }
}

pub async fn toggle() {
    let mut client = connect().await;

    match client.toggle_playback().await {
        Ok(true) => success!("Resumed"),
        Ok(false) => success!("Paused"),
        Err(e) => report(e),
    }
}

pub async fn next() {
    let mut client = connect().await;

    match client.skip_to_next().await {
        Ok(()) => success!("Skipped to the next track"),
        Err(e) => report(e),
    }
}

pub async fn previous() {
    let mut client = connect().await;

    match client.skip_to_previous().await {
        Ok(()) => success!("Skipped to the previous track"),
        Err(e) => report(e),
    }
}

pub async fn seek(position_ms: i64) {
    let mut client = connect().await;

    match client.seek(position_ms).await {
        Ok(()) => success!("Seeked to {}", utils::format_duration(position_ms as u64)),
        Err(e) => report(e),
    }
}
