use crate::{
    management::ArtistReport,
    report::{chart, feature_description},
    utils::{self, html_escape},
};

pub const ERROR_MESSAGE: &str = "Oops! Didn't find that, please try another artist.";
pub const FAILURE_MESSAGE: &str = "Something went wrong while talking to Spotify, please try again.";

const BOOTSTRAP_CSS: &str = "https://maxcdn.bootstrapcdn.com/bootstrap/3.3.7/css/bootstrap.min.css";
const PREVIEWS_PER_ROW: usize = 5;
const CHARTS_PER_ROW: usize = 3;
const PREVIEW_TITLE_WIDTH: usize = 33;

/// The start page: only the search form.
pub fn render_form_page() -> String {
    render_page("")
}

/// The search form followed by the not-found message.
pub fn render_error_page() -> String {
    render_page(&format!("<h2 align='center'>{}</h2>\n", ERROR_MESSAGE))
}

/// The search form followed by a generic failure message.
pub fn render_failure_page() -> String {
    render_page(&format!("<h2 align='center'>{}</h2>\n", FAILURE_MESSAGE))
}

/// The search form followed by the full report for one artist.
pub fn render_report_page(report: &ArtistReport, features: &[String]) -> String {
    render_page(&render_report(report, features))
}

fn render_page(content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset='utf-8'>
<meta name='viewport' content='width=device-width, initial-scale=1, shrink-to-fit=no'>
<title>Top Ten Hits Analytics</title>
<link href='{css}' rel='stylesheet'>
<style>
body {{ padding-top: 54px; }}
</style>
</head>
<body>
{form}{content}</body>
</html>
"#,
        css = BOOTSTRAP_CSS,
        form = search_form(),
        content = content,
    )
}

fn search_form() -> String {
    concat!(
        "<form align='center' method='get' action='/'><div class='form-group'><fieldset><legend>",
        "<strong><h2>Enter an Artist</h2></strong>",
        "<p>Get a detailed breakdown of the audio features of their top ten hits.</p></legend>",
        "Name:<br><input type='text' name='artist' size='36'><br><br>",
        "<input type='submit' value='Submit'></fieldset></div></form>\n",
    )
    .to_string()
}

fn render_report(report: &ArtistReport, features: &[String]) -> String {
    let artist = &report.artist;
    let mut html = String::new();

    html.push_str(&format!(
        "<h1 align='center'>Top Ten Hits Analytics: <strong>{}</strong></h1><br>\n",
        html_escape(&artist.name)
    ));
    if let Some(image) = &artist.image {
        html.push_str(&format!(
            "<p style='text-align:center;'><img src='{}' alt='{}'></p>\n",
            html_escape(image),
            html_escape(&artist.name)
        ));
    }
    html.push_str(&format!(
        "<h3 align='center'><strong>genres:</strong> {}</h3>\n",
        html_escape(&artist.genres)
    ));
    html.push_str(&format!(
        "<h3 align='center'><strong>popularity rating:</strong> {}/100</h3>\n",
        artist.popularity
    ));

    html.push_str(&preview_table(&report.tracks.previews()));
    html.push_str(&chart::chart_scripts(features, &report.tracks));
    html.push_str(&chart_grid(features));
    html.push_str(&legend(features));
    html
}

/// Audio players for the 30-second previews, five per row.
fn preview_table(previews: &[(&str, &str)]) -> String {
    if previews.is_empty() {
        return String::new();
    }

    let mut html = String::from("<br><br><table align='center' class='previews'>\n");
    for row in previews.chunks(PREVIEWS_PER_ROW) {
        html.push_str("<tr>");
        for (title, url) in row {
            html.push_str(&format!(
                "<td><audio controls preload='none' style='width:300px'>\
                 <source src='{}' type='audio/mpeg'></audio>\
                 <h4 align='center'>{}</h4></td>",
                html_escape(url),
                html_escape(&utils::shorten(title, PREVIEW_TITLE_WIDTH))
            ));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n");
    html
}

/// Chart containers, three per row.
fn chart_grid(features: &[String]) -> String {
    let mut html = String::from("<br><br><table align='center' class='charts'>\n");
    for row in features.chunks(CHARTS_PER_ROW) {
        html.push_str("<tr>");
        for feature in row {
            html.push_str(&format!("<td><div id='{}'></div></td>", feature));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n");
    html
}

fn legend(features: &[String]) -> String {
    let mut html = String::from("<ul style='text-align:center; list-style-type: none;'>\n");
    for feature in features {
        if let Some(description) = feature_description(feature) {
            html.push_str(&format!(
                "<li><strong>{}</strong> – {}</li>\n",
                feature.replace('_', " "),
                description
            ));
        }
    }
    html.push_str("</ul>\n");
    html
}
