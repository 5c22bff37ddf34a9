use crate::{
    Res,
    management::FeatureCache,
    spotify::SpotifyClient,
    types::{Artist, ArtistSummary},
};

/// Everything a report page shows about one artist.
#[derive(Debug, Clone)]
pub struct ArtistReport {
    pub artist: ArtistSummary,
    pub tracks: FeatureCache,
}

/// Looks up an artist and collects the audio features of their top tracks.
///
/// Returns `Ok(None)` when the name is blank or the search finds nothing.
/// Network and API failures are propagated.
pub async fn lookup(client: &SpotifyClient, name: &str) -> Res<Option<ArtistReport>> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(None);
    }

    let Some(artist) = client.search_artist(name).await? else {
        return Ok(None);
    };

    let tracks = client.top_tracks(&artist.id).await?;
    let ids: Vec<String> = tracks.iter().map(|t| t.id.clone()).collect();
    let features = client.audio_features(&ids).await?;

    let mut cache = FeatureCache::new();
    for (track, features) in tracks.into_iter().zip(features) {
        cache.insert(track.name, features, track.preview_url);
    }

    Ok(Some(ArtistReport {
        artist: summarize(artist),
        tracks: cache,
    }))
}

pub fn summarize(artist: Artist) -> ArtistSummary {
    // Spotify lists images largest first; the second-to-last is the medium size.
    let image = match artist.images.len() {
        0 => None,
        1 => Some(artist.images[0].url.clone()),
        n => Some(artist.images[n - 2].url.clone()),
    };

    ArtistSummary {
        name: artist.name,
        image,
        genres: artist.genres.join(", "),
        popularity: artist.popularity,
    }
}
