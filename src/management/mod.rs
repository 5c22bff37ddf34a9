mod auth;
mod features;
mod lookup;

pub use auth::TokenManager;
pub use features::FeatureCache;
pub use features::TrackFeatures;
pub use lookup::ArtistReport;
pub use lookup::lookup;
pub use lookup::summarize;
