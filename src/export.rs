//! CSV rendering of the two report tables.
//!
//! Both files are UTF-8, comma-delimited, with a header row and no index
//! column.

use std::path::{Path, PathBuf};

use crate::{
    Res,
    types::{CreditRow, FormattedTable, Report},
};

pub const DETAILED_FILE_NAME: &str = "playlist_credits.csv";
pub const FORMATTED_FILE_NAME: &str = "playlist_credits_formatted.csv";

/// Column order of the detailed table.
pub const DETAILED_HEADERS: [&str; 11] = [
    "Track",
    "Name",
    "Rolle",
    "track_id",
    "release_date",
    "popularity",
    "isrcs",
    "album_title",
    "album_id",
    "album_art",
    "artists",
];

/// One line per credit fact.
///
/// The header row is written even when there are no rows.
pub fn detailed_csv(rows: &[CreditRow]) -> Res<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(DETAILED_HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }

    Ok(writer.into_inner().map_err(|e| e.to_string())?)
}

/// One line per track with `Song, Artist, Writer 1..N, Producer 1..M`.
pub fn formatted_csv(table: &FormattedTable) -> Res<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(table.headers())?;
    for record in table.records() {
        writer.write_record(record)?;
    }

    Ok(writer.into_inner().map_err(|e| e.to_string())?)
}

/// Writes both tables of `report` into `dir`, creating it if needed.
///
/// Returns the paths of the detailed and the formatted file.
pub async fn write_reports(report: &Report, dir: &Path) -> Res<(PathBuf, PathBuf)> {
    async_fs::create_dir_all(dir).await?;

    let detailed_path = dir.join(DETAILED_FILE_NAME);
    let formatted_path = dir.join(FORMATTED_FILE_NAME);

    async_fs::write(&detailed_path, detailed_csv(&report.detailed)?).await?;
    async_fs::write(&formatted_path, formatted_csv(&report.formatted)?).await?;

    Ok((detailed_path, formatted_path))
}
