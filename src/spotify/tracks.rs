use crate::{
    error::ClientError,
    management::TokenStore,
    spotify::{
        MAX_SEED_TRACKS, RECOMMENDATION_LIMIT, SEARCH_PAGE_SIZE, SpotifyClient,
        request::ApiCall,
        wire::{CurrentlyPlayingObject, RecommendationsResponse, SearchResponse},
    },
    types::Track,
};

impl<S: TokenStore> SpotifyClient<S> {
    /// Returns the track currently playing on the user's account.
    ///
    /// `Ok(None)` means nothing is playing: the service answered 204, or the
    /// playing item is not a track (ads, for instance).
    pub async fn get_currently_playing(&mut self) -> Result<Option<Track>, ClientError> {
        let call = ApiCall::get(self.endpoint("/me/player/currently-playing"));
        let playing: Option<CurrentlyPlayingObject> = self.fetch(&call).await?;
        Ok(playing.and_then(|p| p.item).map(Track::from))
    }

    /// Searches the catalog for tracks matching `query`.
    ///
    /// Returns at most [`SEARCH_PAGE_SIZE`] tracks in the service's ranking order.
    ///
    /// # Errors
    ///
    /// [`ClientError::InvalidQuery`] if `query` is empty or whitespace only,
    /// before any request is sent.
    pub async fn search_tracks(&mut self, query: &str) -> Result<Vec<Track>, ClientError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ClientError::InvalidQuery);
        }

        let call = ApiCall::get(self.endpoint("/search"))
            .query("q", query)
            .query("type", "track")
            .query("limit", SEARCH_PAGE_SIZE);
        let response: Option<SearchResponse> = self.fetch(&call).await?;

        Ok(response
            .and_then(|r| r.tracks)
            .map(|page| page.items.into_iter().map(Track::from).collect())
            .unwrap_or_default())
    }

    /// Fetches recommendations seeded by up to [`MAX_SEED_TRACKS`] track ids.
    ///
    /// # Errors
    ///
    /// [`ClientError::InvalidSeed`] if `seed_tracks` is empty or longer than
    /// [`MAX_SEED_TRACKS`], before any request is sent.
    pub async fn get_recommendations<T: AsRef<str>>(
        &mut self,
        seed_tracks: &[T],
    ) -> Result<Vec<Track>, ClientError> {
        if seed_tracks.is_empty() || seed_tracks.len() > MAX_SEED_TRACKS {
            return Err(ClientError::InvalidSeed {
                count: seed_tracks.len(),
            });
        }

        let seeds = seed_tracks
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join(",");

        let call = ApiCall::get(self.endpoint("/recommendations"))
            .query("seed_tracks", seeds)
            .query("limit", RECOMMENDATION_LIMIT);
        let response: Option<RecommendationsResponse> = self.fetch(&call).await?;

        Ok(response
            .map(|r| r.tracks.into_iter().map(Track::from).collect())
            .unwrap_or_default())
    }
}
