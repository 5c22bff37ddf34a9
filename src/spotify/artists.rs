use crate::{
    Res,
    spotify::SpotifyClient,
    types::{Artist, SearchResponse, TopTracksResponse, Track},
};

impl SpotifyClient {
    /// Searches the catalog for an artist by name.
    ///
    /// Issues `GET /search?q=artist:{name}&type=artist` and returns the best
    /// match, which is the first item Spotify ranks.
    ///
    /// # Arguments
    ///
    /// * `name` - Artist name as typed by the user
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing:
    /// - `Ok(Some(Artist))` - The best matching artist
    /// - `Ok(None)` - The search produced no artists
    /// - `Err(_)` - Network, authentication or decoding failure
    ///
    /// # Example
    ///
    /// ```
    /// match client.search_artist("Nina Simone").await? {
    ///     Some(artist) => println!("{} ({})", artist.name, artist.popularity),
    ///     None => println!("No such artist"),
    /// }
    /// ```
    pub async fn search_artist(&self, name: &str) -> Res<Option<Artist>> {
        let q = format!("artist:{}", name);
        let res: SearchResponse = self
            .get_json("/search", &[("q", q.as_str()), ("type", "artist")])
            .await?;

        Ok(res.artists.items.into_iter().next())
    }

    /// Retrieves an artist's top tracks in the configured market.
    ///
    /// Issues `GET /artists/{id}/top-tracks?market={market}`. Spotify returns
    /// up to ten tracks ordered by popularity; the order is preserved.
    ///
    /// # Arguments
    ///
    /// * `artist_id` - Spotify ID of the artist
    ///
    /// # Example
    ///
    /// ```
    /// let tracks = client.top_tracks("4Z8W4fKeB5YxbusRsdQVPb").await?;
    /// for track in tracks {
    ///     println!("{} (preview: {})", track.name, track.preview_url.is_some());
    /// }
    /// ```
    pub async fn top_tracks(&self, artist_id: &str) -> Res<Vec<Track>> {
        let path = format!("/artists/{}/top-tracks", artist_id);
        let market = self.endpoints().market.clone();
        let res: TopTracksResponse = self
            .get_json(&path, &[("market", market.as_str())])
            .await?;

        Ok(res.tracks)
    }
}
