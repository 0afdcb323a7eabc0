use crate::{
    error::ClientError,
    management::TokenStore,
    spotify::{
        PLAYLIST_PAGE_LIMIT, SpotifyClient,
        request::ApiCall,
        wire::{Paging, PlaylistObject},
    },
    types::Playlist,
};

impl<S: TokenStore> SpotifyClient<S> {
    /// Retrieves all playlists owned or followed by the user.
    ///
    /// Pages are requested one after another by following the `next` link of
    /// each response until it is absent. The result keeps the server order.
    pub async fn get_user_playlists(&mut self) -> Result<Vec<Playlist>, ClientError> {
        let mut playlists: Vec<Playlist> = Vec::new();
        let mut next = Some(
            ApiCall::get(self.endpoint("/me/playlists")).query("limit", PLAYLIST_PAGE_LIMIT),
        );

        while let Some(call) = next {
            let page: Option<Paging<PlaylistObject>> = self.fetch(&call).await?;
            let Some(page) = page else {
                break;
            };

            playlists.extend(page.items.into_iter().map(Playlist::from));
            // next already carries offset and limit
            next = page.next.map(ApiCall::get);
        }

        Ok(playlists)
    }
}
