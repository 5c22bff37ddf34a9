//! HTML report rendering
//!
//! Pure string formatting: every function takes already-fetched data and
//! returns markup. Pages load Bootstrap for layout and Google Charts for the
//! bar graphs, so a rendered page is a single self-contained document apart
//! from those two CDN assets.

pub mod chart;
pub mod page;

pub use page::ERROR_MESSAGE;
pub use page::FAILURE_MESSAGE;
pub use page::render_error_page;
pub use page::render_failure_page;
pub use page::render_form_page;
pub use page::render_report_page;

/// One-line explanations shown in the legend under the charts.
const FEATURE_DESCRIPTIONS: [(&str, &str); 13] = [
    ("acousticness", "how nonelectric it sounds"),
    ("danceability", "how easy it is to dance along"),
    ("energy", "how intense it sounds"),
    ("liveness", "how live it sounds (vs. recorded)"),
    (
        "key",
        "the key the song is in (C = 0, C#/D♭ = 1, D = 2, ...)",
    ),
    (
        "valence",
        "how positive/happy it sounds (positive = 1, negative = 0)",
    ),
    ("tempo", "how upbeat it is (BPM)"),
    ("mode", "how major/minor it sounds (major = 1, minor = 0)"),
    (
        "time_signature",
        "how many beats per measure (4 = 4/4 (common time), 3 = 3/4, ...)",
    ),
    ("speechiness", "how much spoken word it contains"),
    ("instrumentalness", "how likely it is to have no vocals"),
    ("loudness", "how loud it is overall (dB)"),
    ("duration_ms", "how long it is (milliseconds)"),
];

pub fn feature_description(feature: &str) -> Option<&'static str> {
    FEATURE_DESCRIPTIONS
        .iter()
        .find(|(name, _)| *name == feature)
        .map(|(_, description)| *description)
}
