use tabled::{Table, builder::Builder};

use crate::{
    cli::{client_or_exit, spinner},
    config, error,
    management::{self, FeatureCache},
    report::chart::key_annotation,
    success, utils, warning,
};

pub async fn features(artist: String) {
    let name = utils::artist_name(Some(artist.as_str()), "");
    let client = client_or_exit();
    let features = config::report_features();

    let pb = spinner(format!("Fetching top tracks of {}...", name));
    let result = management::lookup(&client, &name).await;
    pb.finish_and_clear();

    match result {
        Ok(Some(report)) => {
            let artist = &report.artist;
            success!(
                "{} - popularity {}/100 - {}",
                artist.name,
                artist.popularity,
                if artist.genres.is_empty() {
                    "no genres"
                } else {
                    artist.genres.as_str()
                }
            );
            println!("{}", feature_table(&report.tracks, &features));
        }
        Ok(None) => warning!("No artist found for {}.", name),
        Err(e) => error!("Failed to look up {}. Err: {}", name, e),
    }
}

/// One row per track, one column per feature, plus a preview marker.
pub fn feature_table(cache: &FeatureCache, features: &[String]) -> Table {
    let mut builder = Builder::default();

    let mut header = vec!["track".to_string()];
    header.extend(features.iter().cloned());
    header.push("preview".to_string());
    builder.push_record(header);

    for track in cache.iter() {
        let mut row = vec![utils::shorten(&track.title, 40)];
        for feature in features {
            row.push(match track.feature(feature) {
                Some(v) if feature == "key" => format!("{} ({})", format_value(v), key_annotation(v)),
                Some(v) => format_value(v),
                None => "-".to_string(),
            });
        }
        row.push(if track.preview_url.is_some() { "yes" } else { "no" }.to_string());
        builder.push_record(row);
    }

    builder.build()
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.3}", value)
    }
}
