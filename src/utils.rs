/// Key names indexed by Spotify's pitch-class notation (0 = C, 1 = C#/D♭, ...).
pub const MUSICAL_KEYS: [&str; 12] = [
    "C", "C#/D♭", "D", "D#/E♭", "E", "F", "F#/G♭", "G", "G#/A♭", "A", "A#/B♭", "B",
];

/// Annotation used for key values outside 0-11 (Spotify reports -1 when no
/// key was detected).
pub const UNKNOWN_KEY: &str = "N/A";

/// Returns the key name for a pitch-class value, if it is an integer in 0-11.
pub fn key_name(value: f64) -> Option<&'static str> {
    if value.fract() != 0.0 || !(0.0..=11.0).contains(&value) {
        return None;
    }
    MUSICAL_KEYS.get(value as usize).copied()
}

/// Upper-cases the first letter of every run of letters and lower-cases the
/// rest, so `"time_signature"` becomes `"Time_Signature"` and
/// `"the BEATLES"` becomes `"The Beatles"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

/// Collapses whitespace and truncates `text` on a word boundary so the
/// result, including the `...` placeholder, fits in `width` characters.
pub fn shorten(text: &str, width: usize) -> String {
    const PLACEHOLDER: &str = "...";

    let words: Vec<&str> = text.split_whitespace().collect();
    let collapsed = words.join(" ");
    if collapsed.chars().count() <= width {
        return collapsed;
    }

    let budget = width.saturating_sub(PLACEHOLDER.len());
    let mut out = String::new();
    for word in words {
        let sep = if out.is_empty() { 0 } else { 1 };
        if out.chars().count() + sep + word.chars().count() > budget {
            break;
        }
        if sep == 1 {
            out.push(' ');
        }
        out.push_str(word);
    }
    out.push_str(PLACEHOLDER);
    out
}

/// Feature names become element ids and JavaScript identifiers, so only
/// ASCII letters, digits and underscores are accepted.
pub fn is_feature_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Extracts the submitted artist name from a request.
///
/// The `artist` query parameter of the search form wins; otherwise the path
/// after the leading `/` is used. `+` decodes to a space and the result is
/// trimmed and title-cased.
pub fn artist_name(query_value: Option<&str>, path: &str) -> String {
    let raw = match query_value {
        Some(value) => value.to_string(),
        None => decode_component(path.trim_start_matches('/')),
    };
    title_case(raw.trim())
}

/// Decodes a form-encoded path component, falling back to the raw text when
/// it is not valid percent-encoded UTF-8.
pub fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Lower-case, dash-separated file name stem for an artist name.
pub fn slug(name: &str) -> String {
    let mut out = String::new();
    for c in name.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed = out.trim_end_matches('-');
    if trimmed.is_empty() {
        "artist".to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Serializes a value as JSON that is safe to embed inside a `<script>` tag.
pub fn script_json(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}
