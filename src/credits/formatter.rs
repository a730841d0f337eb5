use crate::types::{CreditRow, FormattedRow, FormattedTable, Role, UnmatchedTrack};

/// Builds the per-track summary table.
///
/// Matched tracks come first, in the order their rows first appear, followed
/// by one row per unmatched track with only song and artist filled in. Writer
/// and producer numbering follows the row order, which the resolver sorts by
/// role and name. All rows are padded with empty cells to the same width.
pub fn format(rows: &[CreditRow], unmatched: &[UnmatchedTrack]) -> FormattedTable {
    let mut track_order: Vec<&str> = Vec::new();
    for row in rows {
        if !track_order.contains(&row.track.as_str()) {
            track_order.push(row.track.as_str());
        }
    }

    let mut formatted: Vec<FormattedRow> = track_order
        .into_iter()
        .map(|title| summarize(title, rows.iter().filter(|r| r.track == title)))
        .collect();

    formatted.extend(unmatched.iter().map(|u| FormattedRow {
        song: u.track_name.clone(),
        artist: u.artist.clone(),
        writers: Vec::new(),
        producers: Vec::new(),
    }));

    let writer_columns = formatted.iter().map(|r| r.writers.len()).max().unwrap_or(0);
    let producer_columns = formatted
        .iter()
        .map(|r| r.producers.len())
        .max()
        .unwrap_or(0);

    for row in &mut formatted {
        row.writers.resize(writer_columns, String::new());
        row.producers.resize(producer_columns, String::new());
    }

    FormattedTable {
        writer_columns,
        producer_columns,
        rows: formatted,
    }
}

fn summarize<'a>(title: &str, rows: impl Iterator<Item = &'a CreditRow>) -> FormattedRow {
    let mut artists: Vec<String> = Vec::new();
    let mut writers: Vec<String> = Vec::new();
    let mut producers: Vec<String> = Vec::new();

    for row in rows {
        let target = match row.role() {
            Some(Role::PrimaryArtist) => &mut artists,
            Some(role) if role.is_writer() => &mut writers,
            Some(role) if role.is_producer() => &mut producers,
            _ => continue,
        };
        push_unique(target, &row.name);
    }

    FormattedRow {
        song: title.to_string(),
        artist: artists.join(", "),
        writers,
        producers,
    }
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}
