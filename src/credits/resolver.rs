use crate::{
    Res,
    types::{CreditCandidate, CreditGroup, CreditRow, Role, Track, UnmatchedTrack},
    utils, warning,
};

use super::CreditCatalog;

/// Name used for a collaborator the credit database lists without a name.
pub const UNKNOWN_COLLABORATOR: &str = "Unknown";

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Credit rows of the matched candidate, de-duplicated and sorted.
    Matched(Vec<CreditRow>),
    Unmatched(UnmatchedTrack),
}

/// Looks up the credits of one playlist track.
///
/// Candidates are scanned in ranking order and only accepted when both title
/// and album equal the track's (case and surrounding whitespace ignored).
/// There is no looser fallback: a track without such a candidate is
/// unmatched. A matching candidate whose credits contain none of the reported
/// roles is skipped in favour of the next matching one.
///
/// # Errors
///
/// Propagates search or detail request failures after their retries.
pub async fn resolve<C>(catalog: &C, track: &Track, search_limit: u32) -> Res<Resolution>
where
    C: CreditCatalog + Sync,
{
    let candidates = catalog.search(&track.search_string, search_limit).await?;
    if candidates.is_empty() {
        warning!("No track found for: {}", track.name);
        return Ok(Resolution::Unmatched(UnmatchedTrack::from(track)));
    }

    for candidate in candidates.iter().filter(|c| is_match(c, track)) {
        let groups = catalog.credits(&candidate.id).await?;
        let rows = flatten_credits(candidate, &groups);
        if !rows.is_empty() {
            return Ok(Resolution::Matched(rows));
        }
    }

    warning!("No matching track found for: {}", track.name);
    Ok(Resolution::Unmatched(UnmatchedTrack::from(track)))
}

/// Strict match on title and album.
pub fn is_match(candidate: &CreditCandidate, track: &Track) -> bool {
    utils::normalize(&candidate.title) == utils::normalize(&track.name)
        && utils::normalize(&candidate.album.title) == utils::normalize(&track.album)
}

/// Flattens credit groups into one row per (role, collaborator).
///
/// Roles outside [`Role::ALL`] are dropped. The result is free of exact
/// duplicates and sorted by track, role and name.
pub fn flatten_credits(candidate: &CreditCandidate, groups: &[CreditGroup]) -> Vec<CreditRow> {
    let isrcs = candidate.isrcs.join(", ");
    let artists = candidate
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut rows: Vec<CreditRow> = Vec::new();
    for entry in groups.iter().flat_map(|g| g.credits.iter()) {
        let Ok(role) = entry.child.parse::<Role>() else {
            continue;
        };

        for person in &entry.collaborators {
            let name = person
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or(UNKNOWN_COLLABORATOR);

            rows.push(CreditRow {
                track: candidate.title.clone(),
                name: name.to_string(),
                role: role.to_string(),
                track_id: candidate.id.clone(),
                release_date: candidate.release_date.clone().unwrap_or_default(),
                popularity: candidate.popularity,
                isrcs: isrcs.clone(),
                album_title: candidate.album.title.clone(),
                album_id: candidate.album.id.clone(),
                album_art: candidate.album.album_art.clone().unwrap_or_default(),
                artists: artists.clone(),
            });
        }
    }

    utils::remove_duplicate_rows(&mut rows);
    utils::sort_credit_rows(&mut rows);
    rows
}
