use tabled::Table;

use crate::{
    info,
    types::{AlbumTableRow, ArtistTableRow, SearchCategory},
    utils,
};

pub async fn search(query: String, limit: u32, category: SearchCategory) {
    if query.trim().is_empty() {
        info!("Nothing to search for.");
        return;
    }

    let pb = utils::spinner(&format!("Searching for \"{}\"...", query.trim()));
    let result = super::backend().await.search(&query, limit).await;
    pb.finish_and_clear();

    let results = match result {
        Ok(results) => results,
        Err(e) => super::fail("Failed to search", e),
    };
    if results.is_empty() {
        info!("No results for \"{}\".", query.trim());
        return;
    }

    let show = |c: SearchCategory| category == SearchCategory::All || category == c;

    if let Some(artists) = results.artists.filter(|a| !a.is_empty() && show(SearchCategory::Artists)) {
        info!("Artists");
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

    if let Some(albums) = results.albums.filter(|a| !a.is_empty() && show(SearchCategory::Albums)) {
        info!("Albums");
        let rows: Vec<AlbumTableRow> = albums
            .into_iter()
            .map(|a| AlbumTableRow {
                artists: utils::join_artist_names(&a.artists),
                name: a.name,
                released: a.release_date,
                tracks: a.total_tracks,
                album_type: a.album_type,
            })
            .collect();
        println!("{}", Table::new(rows));
    }

    if let Some(tracks) = results.tracks.filter(|t| !t.is_empty() && show(SearchCategory::Tracks)) {
        info!("Tracks");
        println!("{}", Table::new(super::top::track_rows(&tracks)));
    }
}
