use tabled::Table;

use crate::{types::DetailTableRow, utils};

pub async fn profile() {
    let pb = utils::spinner("Fetching profile...");
    let result = super::backend().await.user_profile().await;
    pb.finish_and_clear();

    let user = match result {
        Ok(user) => user,
        Err(e) => super::fail("Failed to fetch user profile", e),
    };

    let rows = vec![
        row("initials", utils::initials(Some(&user.username))),
        row("username", user.username),
        row("email", user.email),
        row("followers", utils::format_count(user.followers)),
        row("country", user.country),
        row("image", user.image),
    ];
    println!("{}", Table::new(rows));
}

fn row(field: &str, value: String) -> DetailTableRow {
    DetailTableRow {
        field: field.to_string(),
        value,
    }
}
