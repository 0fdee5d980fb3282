#![allow(dead_code)]

use std::fs;
use std::path::Path;

use serde_json::json;

/// Writes a small Book-Crossing-shaped artifact set into `dir`.
///
/// Pivot index is `A, B, C, D, E`; row A is `[1.0, 0.9, 0.2, 0.5, 0.2]`,
/// so recommendations for A are `B, D, C, E`. Title E has no metadata and
/// B appears twice (two editions).
pub fn write_artifacts(dir: &Path) -> anyhow::Result<()> {
    let popular = json!({
        "columns": ["Book-Title", "Book-Author", "Image-URL-M", "num_ratings", "avg_rating"],
        "rows": [
            ["B", "Bob", "http://img/b-m.jpg", 120, 4.1],
            ["A", "Ann", "http://img/a-m.jpg", 95, 3.9],
            ["C", "Cid", "http://img/c-m.jpg", 60, 4.4],
        ],
    });
    let books = json!({
        "columns": [
            "ISBN", "Book-Title", "Book-Author", "Year-Of-Publication", "Publisher",
            "Image-URL-S", "Image-URL-M", "Image-URL-L",
        ],
        "rows": [
            ["0001", "A", "Ann", 1999, "Pub", "http://img/a-s.jpg", "http://img/a-m.jpg", "http://img/a-l.jpg"],
            ["0002", "B", "Bob", 2001, "Pub", "http://img/b-s.jpg", "http://img/b-m.jpg", "http://img/b-l.jpg"],
            ["0003", "B", "Bob", 2004, "Pub", "http://img/b2-s.jpg", "http://img/b2-m.jpg", "http://img/b2-l.jpg"],
            ["0004", "C", "Cid", 1987, "Pub", "http://img/c-s.jpg", "http://img/c-m.jpg", "http://img/c-l.jpg"],
            ["0005", "D", "Dee", 2010, "Pub", "http://img/d-s.jpg", "http://img/d-m.jpg", "http://img/d-l.jpg"],
        ],
    });
    let pt = json!({
        "index": ["A", "B", "C", "D", "E"],
        "columns": [254, 2276, 2766],
        "values": [[0, 9, 0], [8, 0, 0], [0, 0, 7], [5, 0, 0], [0, 0, 10]],
    });
    let similarity = json!([
        [1.0, 0.9, 0.2, 0.5, 0.2],
        [0.9, 1.0, 0.1, 0.4, 0.0],
        [0.2, 0.1, 1.0, 0.3, 0.6],
        [0.5, 0.4, 0.3, 1.0, 0.1],
        [0.2, 0.0, 0.6, 0.1, 1.0],
    ]);

    fs::write(dir.join("popular.json"), serde_json::to_vec(&popular)?)?;
    fs::write(dir.join("books.json"), serde_json::to_vec(&books)?)?;
    fs::write(dir.join("pt.json"), serde_json::to_vec(&pt)?)?;
    fs::write(
        dir.join("similarity_scores.json"),
        serde_json::to_vec(&similarity)?,
    )?;
    Ok(())
}

pub fn write_raw_data(dir: &Path) -> anyhow::Result<()> {
    fs::write(
        dir.join("Books.csv"),
        "ISBN,Book-Title,Book-Author\n0001,A,Ann\n0002,B,Bob\n0004,C,Cid\n",
    )?;
    fs::write(
        dir.join("Ratings.csv"),
        "User-ID,ISBN,Book-Rating\n254,0001,9\n2276,0002,8\n",
    )?;
    fs::write(
        dir.join("Users.csv"),
        "User-ID,Location,Age\n254,\"minneapolis, minnesota, usa\",\n",
    )?;
    Ok(())
}
