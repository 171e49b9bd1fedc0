use tabled::Table;

use crate::{
    info,
    types::{DetailTableRow, TrackTableRow},
    utils,
};

pub async fn track(id: String) {
    let pb = utils::spinner("Fetching track...");
    let result = super::backend().await.track(&id).await;
    pb.finish_and_clear();

    let track = match result {
        Ok(track) => track,
        Err(e) => super::fail("Failed to fetch track", e),
    };

    let mut rows = vec![
        row("name", track.name),
        row("artists", utils::join_artist_names(&track.artists)),
    ];
    if let Some(album) = track.album {
        rows.push(row("album", album.name));
        rows.push(row("released", album.release_date));
    }
    rows.push(row("duration", utils::format_duration(track.duration_ms)));
    rows.push(row("explicit", if track.explicit { "yes" } else { "no" }.to_string()));
    rows.push(row("popularity", track.popularity.to_string()));
    if let Some(preview_url) = track.preview_url.filter(|u| !u.is_empty()) {
        rows.push(row("preview", preview_url));
    }
    println!("{}", Table::new(rows));
}

pub async fn album(id: String) {
    let pb = utils::spinner("Fetching album...");
    let result = super::backend().await.album(&id).await;
    pb.finish_and_clear();

    let album = match result {
        Ok(album) => album,
        Err(e) => super::fail("Failed to fetch album", e),
    };

    let rows = vec![
        row("name", album.name),
        row("artists", utils::join_artist_names(&album.artists)),
        row("released", album.release_date),
        row("type", album.album_type),
        row("tracks", album.total_tracks.to_string()),
    ];
    println!("{}", Table::new(rows));

    if !album.tracks.is_empty() {
        info!("Tracklist");
        let rows: Vec<TrackTableRow> = album
            .tracks
            .iter()
            .enumerate()
            .map(|(i, t)| TrackTableRow {
                rank: i + 1,
                name: t.name.clone(),
                artists: utils::join_artist_names(&t.artists),
                album: String::new(),
                duration: utils::format_duration(t.duration_ms),
                explicit: if t.explicit { "E".to_string() } else { String::new() },
            })
            .collect();
        println!("{}", Table::new(rows));
    }
}

pub async fn artist(id: String) {
    let pb = utils::spinner("Fetching artist...");
    let result = super::backend().await.artist(&id).await;
    pb.finish_and_clear();

    let artist = match result {
        Ok(artist) => artist,
        Err(e) => super::fail("Failed to fetch artist", e),
    };

    let rows = vec![
        row("name", artist.name),
        row("followers", utils::format_count(artist.followers)),
        row("popularity", artist.popularity.to_string()),
        row("genres", artist.genres.join(", ")),
    ];
    println!("{}", Table::new(rows));

    if let Some(top_tracks) = artist.top_tracks.filter(|t| !t.is_empty()) {
        info!("Top tracks");
        println!("{}", Table::new(super::top::track_rows(&top_tracks)));
    }
}

fn row(field: &str, value: String) -> DetailTableRow {
    DetailTableRow {
        field: field.to_string(),
        value,
    }
}
