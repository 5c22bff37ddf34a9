use crate::types::AudioFeatures;

#[derive(Debug, Clone, PartialEq)]
pub struct TrackFeatures {
    pub title: String,
    pub features: Option<AudioFeatures>,
    pub preview_url: Option<String>,
}

impl TrackFeatures {
    pub fn feature(&self, name: &str) -> Option<f64> {
        self.features.as_ref().and_then(|f| f.get(name).copied())
    }
}

/// Audio features of an artist's top tracks keyed by track title.
///
/// Titles are unique. Inserting an existing title replaces its record in
/// place, so iteration follows the order in which titles first appeared.
#[derive(Debug, Clone, Default)]
pub struct FeatureCache {
    tracks: Vec<TrackFeatures>,
}

impl FeatureCache {
    pub fn new() -> Self {
        Self { tracks: Vec::new() }
    }

    pub fn insert(
        &mut self,
        title: String,
        features: Option<AudioFeatures>,
        preview_url: Option<String>,
    ) -> &mut Self {
        let record = TrackFeatures {
            title,
            features,
            preview_url,
        };
        match self.tracks.iter_mut().find(|t| t.title == record.title) {
            Some(existing) => *existing = record,
            None => self.tracks.push(record),
        }
        self
    }

    pub fn get(&self, title: &str) -> Option<&TrackFeatures> {
        self.tracks.iter().find(|t| t.title == title)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackFeatures> {
        self.tracks.iter()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// `(title, preview_url)` for every track that has a preview clip.
    pub fn previews(&self) -> Vec<(&str, &str)> {
        self.tracks
            .iter()
            .filter_map(|t| t.preview_url.as_deref().map(|url| (t.title.as_str(), url)))
            .collect()
    }

    /// `(title, value)` for every track that reports the given feature.
    pub fn feature_rows(&self, feature: &str) -> Vec<(&str, f64)> {
        self.tracks
            .iter()
            .filter_map(|t| t.feature(feature).map(|v| (t.title.as_str(), v)))
            .collect()
    }
}
