use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::types::Artist;

/// Formats a track length given in milliseconds as `m:ss`.
///
/// The value is rounded to the nearest second before splitting, so 59_600 ms
/// renders as `1:00` rather than `0:60`.
pub fn format_duration(ms: u64) -> String {
    let total_secs = ms.saturating_add(500) / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Avatar initials for a display name.
///
/// One word gives its first letter, two or more give the first letters of the
/// first two words. Blank or missing names give an empty string.
pub fn initials(name: Option<&str>) -> String {
    let Some(name) = name else {
        return String::new();
    };

    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Groups the digits of a count with commas, e.g. `1234567` -> `1,234,567`.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Comma separated artist names.
pub fn join_artist_names(artists: &[Artist]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The first `max` genres, comma separated.
pub fn join_genres(genres: &[String], max: usize) -> String {
    genres
        .iter()
        .take(max)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ")
}

/// Spinner shown while waiting on the backend.
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
