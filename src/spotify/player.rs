use serde_json::json;

use crate::{
    error::ClientError,
    management::TokenStore,
    spotify::{
        SpotifyClient,
        request::ApiCall,
        wire::{DevicesResponse, PlaybackObject},
    },
    types::{Device, PlaybackState},
};

impl<S: TokenStore> SpotifyClient<S> {
    pub async fn get_devices(&mut self) -> Result<Vec<Device>, ClientError> {
        let call = ApiCall::get(self.endpoint("/me/player/devices"));
        let response: Option<DevicesResponse> = self.fetch(&call).await?;
        Ok(response
            .map(|r| r.devices.into_iter().map(Device::from).collect())
            .unwrap_or_default())
    }

    /// `Ok(None)` when no device has an active session.
    pub async fn get_playback_state(&mut self) -> Result<Option<PlaybackState>, ClientError> {
        let call = ApiCall::get(self.endpoint("/me/player"));
        let playback: Option<PlaybackObject> = self.fetch(&call).await?;
        Ok(playback.map(PlaybackState::from))
    }

    /// Starts playing `track_id` on the active device.
    ///
    /// # Errors
    ///
    /// [`ClientError::NoActiveDevice`] if no device reports itself active; the
    /// play command is not sent in that case.
    pub async fn play_track(&mut self, track_id: &str) -> Result<(), ClientError> {
        let devices = self.get_devices().await?;
        let device = devices
            .into_iter()
            .find(|d| d.is_active)
            .ok_or(ClientError::NoActiveDevice)?;

        let mut call = ApiCall::put(self.endpoint("/me/player/play"))
            .json(json!({ "uris": [format!("spotify:track:{track_id}")] }));
        if let Some(device_id) = device.id {
            call = call.query("device_id", device_id);
        }

        self.send(&call).await?;
        Ok(())
    }

    pub async fn pause_track(&mut self) -> Result<(), ClientError> {
        let call = ApiCall::put(self.endpoint("/me/player/pause"));
        self.send(&call).await?;
        Ok(())
    }

    /// Pauses when playing, resumes otherwise. Returns whether playback is
    /// running afterwards.
    ///
    /// # Errors
    ///
    /// [`ClientError::NoActivePlayback`] if there is no playback state at all.
    pub async fn toggle_playback(&mut self) -> Result<bool, ClientError> {
        let state = self
            .get_playback_state()
            .await?
            .ok_or(ClientError::NoActivePlayback)?;

        if state.is_playing {
            self.pause_track().await?;
            Ok(false)
        } else {
            let call = ApiCall::put(self.endpoint("/me/player/play"));
            self.send(&call).await?;
            Ok(true)
        }
    }

    pub async fn skip_to_next(&mut self) -> Result<(), ClientError> {
        let call = ApiCall::post(self.endpoint("/me/player/next"));
        self.send(&call).await?;
        Ok(())
    }

    pub async fn skip_to_previous(&mut self) -> Result<(), ClientError> {
        let call = ApiCall::post(self.endpoint("/me/player/previous"));
        self.send(&call).await?;
        Ok(())
    }

    /// Seeks to `position_ms` in the current track.
    ///
    /// # Errors
    ///
    /// [`ClientError::InvalidPosition`] for a negative position, before any
    /// request is sent.
    pub async fn seek(&mut self, position_ms: i64) -> Result<(), ClientError> {
        if position_ms < 0 {
            return Err(ClientError::InvalidPosition(position_ms));
        }

        let call = ApiCall::put(self.endpoint("/me/player/seek")).query("position_ms", position_ms);
        self.send(&call).await?;
        Ok(())
    }
}
