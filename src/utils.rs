use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;

use crate::types::{
    Artist, Device, DeviceTableRow, Playlist, PlaylistTableRow, Track, TrackTableRow,
};

/// Random anti-CSRF value for the `state` parameter of the authorization request.
pub fn generate_state() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Formats a duration in milliseconds as `m:ss`.
pub fn format_duration(duration_ms: u64) -> String {
    let total_secs = duration_ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

pub fn join_artists(artists: &[Artist]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn track_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .map(|t| TrackTableRow {
            id: t.id.clone(),
            name: t.name.clone(),
            artists: join_artists(&t.artists),
            album: t.album.name.clone(),
            duration: format_duration(t.duration_ms),
        })
        .collect()
}

pub fn playlist_rows(playlists: &[Playlist]) -> Vec<PlaylistTableRow> {
    playlists
        .iter()
        .map(|p| PlaylistTableRow {
            name: p.name.clone(),
            tracks: p.tracks.total,
            owner: p
                .owner
                .display_name
                .clone()
                .unwrap_or_else(|| p.owner.id.clone()),
        })
        .collect()
}

pub fn device_rows(devices: &[Device]) -> Vec<DeviceTableRow> {
    devices
        .iter()
        .map(|d| DeviceTableRow {
            name: d.name.clone(),
            device_type: d.device_type.clone(),
            active: if d.is_active { "yes" } else { "no" }.to_string(),
        })
        .collect()
}
