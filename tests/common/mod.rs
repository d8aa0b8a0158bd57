//! Shared fixtures for integration tests
//!
//! Tables are written into temporary directories and removed when the
//! returned `TempDir` drops.

#![allow(dead_code)]

use flatquery::storage::{Row, Table};
use serde_json::Value;
use tempfile::TempDir;

/// (id, name, year, rank)
pub const MOVIES: [(u64, &str, i64, Option<f64>); 36] = [
    (0, "Aliens", 1986, Some(8.2)),
    (1, "Animal House", 1978, Some(7.5)),
    (2, "Apollo 13", 1995, Some(7.5)),
    (3, "Batman Begins", 2005, None),
    (4, "Braveheart", 1995, Some(8.3)),
    (5, "Fargo", 1996, Some(8.2)),
    (6, "Few Good Men, A", 1992, Some(7.5)),
    (7, "Fight Club", 1999, Some(8.5)),
    (8, "Footloose", 1984, Some(5.8)),
    (9, "Garden State", 2004, Some(8.3)),
    (10, "Godfather, The", 1972, Some(9.0)),
    (11, "Hollow Man", 2000, Some(5.3)),
    (12, "JFK", 1991, Some(7.8)),
    (13, "Kill Bill: Vol. 1", 2003, Some(8.4)),
    (14, "Kill Bill: Vol. 2", 2004, Some(8.2)),
    (15, "Little Mermaid, The", 1989, Some(7.3)),
    (16, "Lost in Translation", 2003, Some(8.0)),
    (17, "Matrix, The", 1999, Some(8.5)),
    (18, "Memento", 2000, Some(8.7)),
    (19, "Mystic River", 2003, Some(8.1)),
    (20, "O Brother, Where Art Thou?", 2000, Some(7.8)),
    (21, "Ocean's Eleven", 2001, Some(7.4)),
    (22, "Office Space", 1999, Some(7.6)),
    (23, "Pi", 1998, Some(7.5)),
    (24, "Pirates of the Caribbean", 2003, Some(7.8)),
    (25, "Planes, Trains & Automobiles", 1987, Some(7.2)),
    (26, "Pulp Fiction", 1994, Some(8.7)),
    (27, "Reservoir Dogs", 1992, Some(8.3)),
    (28, "Shawshank Redemption, The", 1994, Some(9.0)),
    (29, "Shrek", 2001, Some(8.1)),
    (30, "Snatch.", 2000, Some(7.9)),
    (31, "Star Wars", 1977, Some(8.8)),
    (32, "Stir of Echoes", 1999, Some(7.0)),
    (33, "Titanic", 1997, Some(6.9)),
    (34, "UHF", 1989, Some(6.6)),
    (35, "Vanilla Sky", 2001, Some(6.9)),
];

const LAST_NAMES: [&str; 7] = ["Smith", "Jones", "Brown", "Taylor", "Wilson", "Davies", "Evans"];

/// Ids of actors named Miller in the actor fixture
pub const MILLER_IDS: [u64; 3] = [17, 142, 388];

/// Number of rows in the actor fixture
pub const ACTOR_COUNT: u64 = 500;

/// Movie row as stored in the fixture
pub fn movie(id: u64) -> Row {
    let (id, name, year, rank) = MOVIES[id as usize];
    Row::new()
        .with("id", id)
        .with("name", name)
        .with("year", year)
        .with("rank", rank.map(Value::from).unwrap_or(Value::Null))
}

/// Fixture movie rows for the given ids, in order
pub fn movies(ids: &[u64]) -> Vec<Row> {
    ids.iter().copied().map(movie).collect()
}

/// Creates `<data_dir>/movies` holding the 36-row movie fixture
pub fn movie_table() -> (TempDir, Table) {
    let dir = TempDir::new().unwrap();
    let table = Table::create(dir.path().join("movies")).unwrap();
    for id in 0..MOVIES.len() as u64 {
        table.write_row(&movie(id)).unwrap();
    }
    table.metrics().reset();
    (dir, table)
}

/// Creates `<data_dir>/actors`: many rows, very few named Miller
pub fn actor_table() -> (TempDir, Table) {
    let dir = TempDir::new().unwrap();
    let table = Table::create(dir.path().join("actors")).unwrap();
    for id in 0..ACTOR_COUNT {
        let last_name = if MILLER_IDS.contains(&id) {
            "Miller"
        } else {
            LAST_NAMES[id as usize % LAST_NAMES.len()]
        };
        let row = Row::new()
            .with("id", id)
            .with("first_name", format!("Actor{}", id))
            .with("last_name", last_name);
        table.write_row(&row).unwrap();
    }
    table.metrics().reset();
    (dir, table)
}

/// Ids of rows, in order
pub fn ids(rows: &[Row]) -> Vec<u64> {
    rows.iter().filter_map(Row::id).collect()
}
