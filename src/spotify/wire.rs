//! Raw response shapes of the Spotify Web API and their mapping into the
//! normalized entities of [`crate::types`].
//!
//! Only the fields the application uses are declared, everything else in a
//! response body is ignored by serde.

use serde::Deserialize;
use serde_json::Value;

use crate::types::{
    Album, Artist, Device, Image, PlaybackState, Playlist, PlaylistOwner, PlaylistTracks, Track,
    User,
};

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Paging<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageObject {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserObject {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub images: Option<Vec<ImageObject>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArtistObject {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AlbumObject {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub images: Option<Vec<ImageObject>>,
    pub release_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrackObject {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistObject>,
    #[serde(default)]
    pub album: AlbumObject,
    #[serde(default)]
    pub duration_ms: u64,
    pub preview_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PlaylistTracksObject {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub href: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwnerObject {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistObject {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub images: Option<Vec<ImageObject>>,
    #[serde(default)]
    pub tracks: PlaylistTracksObject,
    pub owner: OwnerObject,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeviceObject {
    pub id: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub device_type: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DevicesResponse {
    pub devices: Vec<DeviceObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentlyPlayingObject {
    pub item: Option<TrackObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaybackObject {
    #[serde(default)]
    pub is_playing: bool,
    pub device: Option<DeviceObject>,
    pub item: Option<TrackObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub tracks: Option<Paging<TrackObject>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationsResponse {
    pub tracks: Vec<TrackObject>,
}

/// Extracts the human readable message from an error body.
///
/// The Web API answers `{"error": {"status": .., "message": ".."}}`, the
/// accounts service answers `{"error": "..", "error_description": ".."}`.
pub(crate) fn describe_error(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    if let Some(message) = value["error"]["message"].as_str() {
        return Some(message.to_string());
    }
    if let Some(description) = value["error_description"].as_str() {
        return Some(description.to_string());
    }
    value["error"].as_str().map(str::to_string)
}

fn images(images: Option<Vec<ImageObject>>) -> Vec<Image> {
    images
        .unwrap_or_default()
        .into_iter()
        .map(Image::from)
        .collect()
}

impl From<ImageObject> for Image {
    fn from(raw: ImageObject) -> Self {
        Image {
            url: raw.url,
            width: raw.width,
            height: raw.height,
        }
    }
}

impl From<UserObject> for User {
    fn from(raw: UserObject) -> Self {
        User {
            id: raw.id,
            display_name: raw.display_name,
            email: raw.email,
            images: images(raw.images),
        }
    }
}

impl From<ArtistObject> for Artist {
    fn from(raw: ArtistObject) -> Self {
        Artist {
            id: raw.id.unwrap_or_default(),
            name: raw.name,
        }
    }
}

impl From<AlbumObject> for Album {
    fn from(raw: AlbumObject) -> Self {
        Album {
            id: raw.id.unwrap_or_default(),
            name: raw.name,
            images: images(raw.images),
            release_date: raw.release_date,
        }
    }
}

impl From<TrackObject> for Track {
    fn from(raw: TrackObject) -> Self {
        Track {
            // local files have no id
            id: raw.id.unwrap_or_default(),
            name: raw.name,
            artists: raw.artists.into_iter().map(Artist::from).collect(),
            album: Album::from(raw.album),
            duration_ms: raw.duration_ms,
            preview_url: raw.preview_url,
        }
    }
}

impl From<PlaylistObject> for Playlist {
    fn from(raw: PlaylistObject) -> Self {
        Playlist {
            id: raw.id,
            name: raw.name,
            description: raw.description,
            images: images(raw.images),
            tracks: PlaylistTracks {
                total: raw.tracks.total,
                href: raw.tracks.href,
            },
            owner: PlaylistOwner {
                id: raw.owner.id,
                display_name: raw.owner.display_name,
            },
        }
    }
}

impl From<DeviceObject> for Device {
    fn from(raw: DeviceObject) -> Self {
        Device {
            id: raw.id,
            is_active: raw.is_active,
            name: raw.name,
            device_type: raw.device_type,
        }
    }
}

impl From<PlaybackObject> for PlaybackState {
    fn from(raw: PlaybackObject) -> Self {
        PlaybackState {
            is_playing: raw.is_playing,
            device: raw.device.map(Device::from),
            item: raw.item.map(Track::from),
        }
    }
}
