use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Credential pair delivered by the login redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: String,
}

/// Body of a successful `/refresh-access-token` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewedCredentials {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginUrlResponse {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub username: String,
    pub email: String,
    pub followers: u64,
    pub image: String,
    pub country: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
    pub image: String,
    pub followers: u64,
    pub popularity: u32,
    #[serde(rename = "topTracks", skip_serializing_if = "Option::is_none")]
    pub top_tracks: Option<Vec<Track>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artists: Vec<Artist>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<Album>,
    #[serde(rename = "albumImage")]
    pub album_image: String,
    pub explicit: bool,
    pub duration_ms: u64,
    pub popularity: u32,
    #[serde(rename = "previewUrl", skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub artists: Vec<Artist>,
    pub tracks: Vec<Track>,
    pub image: String,
    pub release_date: String,
    pub total_tracks: u32,
    pub album_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artists: Option<Vec<Artist>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub albums: Option<Vec<Album>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Vec<Track>>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.artists.as_ref().is_none_or(Vec::is_empty)
            && self.albums.as_ref().is_none_or(Vec::is_empty)
            && self.tracks.as_ref().is_none_or(Vec::is_empty)
    }
}

/// Listening period for top tracks and artists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum TimeRange {
    ShortTerm,
    #[default]
    MediumTerm,
    LongTerm,
}

impl TimeRange {
    /// Value of the `time_range` query parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "1 Month",
            TimeRange::MediumTerm => "6 Months",
            TimeRange::LongTerm => "1 Year",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// Which part of the search results to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SearchCategory {
    #[default]
    All,
    Artists,
    Albums,
    Tracks,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub name: String,
    pub artists: String,
    pub album: String,
    pub duration: String,
    #[tabled(rename = "E")]
    pub explicit: String,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub name: String,
    pub followers: String,
    pub popularity: u32,
    pub genres: String,
}

#[derive(Tabled)]
pub struct AlbumTableRow {
    pub name: String,
    pub artists: String,
    pub released: String,
    pub tracks: u32,
    #[tabled(rename = "type")]
    pub album_type: String,
}

#[derive(Tabled)]
pub struct DetailTableRow {
    pub field: String,
    pub value: String,
}
