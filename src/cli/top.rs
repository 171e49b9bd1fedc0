use tabled::Table;

use crate::{
    info,
    types::{ArtistTableRow, TimeRange, Track, TrackTableRow},
    utils,
};

pub async fn top_tracks(time_range: TimeRange) {
    let pb = utils::spinner(&format!("Fetching top tracks ({})...", time_range.label()));
    let result = super::backend().await.top_tracks(time_range).await;
    pb.finish_and_clear();

    let tracks = match result {
        Ok(tracks) => tracks,
        Err(e) => super::fail("Failed to fetch top tracks", e),
    };
    if tracks.is_empty() {
        info!("No top tracks for {}.", time_range.label());
        return;
    }

    info!("Your top tracks, {}:", time_range.label());
    println!("{}", Table::new(track_rows(&tracks)));
}

pub async fn top_artists(time_range: TimeRange) {
    let pb = utils::spinner(&format!("Fetching top artists ({})...", time_range.label()));
    let result = super::backend().await.top_artists(time_range).await;
    pb.finish_and_clear();

    let artists = match result {
        Ok(artists) => artists,
        Err(e) => super::fail("Failed to fetch top artists", e),
    };
    if artists.is_empty() {
        info!("No top artists for {}.", time_range.label());
        return;
    }

    info!("Your top artists, {}:", time_range.label());
    let rows: Vec<ArtistTableRow> = artists
        .into_iter()
        .enumerate()
        .map(|(i, a)| ArtistTableRow {
            rank: i + 1,
            name: a.name,
            followers: utils::format_count(a.followers),
            popularity: a.popularity,
            genres: utils::join_genres(&a.genres, 3),
        })
        .collect();
    println!("{}", Table::new(rows));
}

pub(super) fn track_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            rank: i + 1,
            name: t.name.clone(),
            artists: utils::join_artist_names(&t.artists),
            album: t.album.as_ref().map(|a| a.name.clone()).unwrap_or_default(),
            duration: utils::format_duration(t.duration_ms),
            explicit: if t.explicit { "E".to_string() } else { String::new() },
        })
        .collect()
}
