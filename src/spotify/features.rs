use serde_json::{Map, Value};

use crate::{
    Res,
    spotify::SpotifyClient,
    types::{AudioFeatures, AudioFeaturesResponse},
};

/// Maximum number of IDs the audio-features endpoint accepts per request.
const MAX_IDS_PER_REQUEST: usize = 100;

impl SpotifyClient {
    /// Fetches audio features for several tracks.
    ///
    /// Issues `GET /audio-features?ids=...` in batches of up to 100 IDs. The
    /// result is aligned with `track_ids`: entry `i` holds the features of
    /// `track_ids[i]`, or `None` when Spotify has no analysis for that track.
    /// An empty input makes no request.
    ///
    /// Only numeric fields are kept, so identifiers and URLs such as `id`,
    /// `uri`, `track_href` and `analysis_url` are dropped.
    ///
    /// # Arguments
    ///
    /// * `track_ids` - Spotify track IDs
    ///
    /// # Example
    ///
    /// ```
    /// let features = client.audio_features(&["11dFghVXANMlKmJXsNCbNl".to_string()]).await?;
    /// if let Some(Some(f)) = features.first() {
    ///     println!("tempo: {}", f["tempo"]);
    /// }
    /// ```
    pub async fn audio_features(&self, track_ids: &[String]) -> Res<Vec<Option<AudioFeatures>>> {
        let mut all = Vec::with_capacity(track_ids.len());

        for chunk in track_ids.chunks(MAX_IDS_PER_REQUEST) {
            let ids = chunk.join(",");
            let res: AudioFeaturesResponse = self
                .get_json("/audio-features", &[("ids", ids.as_str())])
                .await?;

            let mut features = res.audio_features.into_iter();
            for _ in chunk {
                all.push(features.next().flatten().map(numeric_features));
            }
        }

        Ok(all)
    }
}

/// Keeps the numeric entries of a raw audio-features object.
pub fn numeric_features(raw: Map<String, Value>) -> AudioFeatures {
    raw.into_iter()
        .filter_map(|(name, value)| value.as_f64().map(|v| (name, v)))
        .collect()
}
