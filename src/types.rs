use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksPage {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<PlaylistTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
    pub album: PlaylistAlbum,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistAlbum {
    pub name: String,
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleArtist {
    pub name: String,
}

/// A playlist entry prepared for the credit lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    /// First listed artist, lowercased and trimmed.
    pub artist: String,
    /// Album name, lowercased and trimmed.
    pub album: String,
    pub release_date: String,
    /// `"<artist> : <name>"`, used as the credit search keyword.
    pub search_string: String,
}

/// Reads JSON `null` like a missing field.
///
/// The credit API sends `null` for empty lists and unknown values.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest<'a> {
    pub keyword: &'a str,
    #[serde(rename = "type")]
    pub kinds: Vec<&'a str>,
    pub limit: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: SearchData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub tracks: SearchTracks,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchTracks {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<CreditCandidate>,
}

/// One search hit from the credit database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreditCandidate {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub album: CandidateAlbum,
    #[serde(rename = "releaseDate", default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub isrcs: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<CandidateArtist>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateAlbum {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "albumArt", default)]
    pub album_art: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateArtist {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackDetailsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: TrackDetails,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackDetails {
    #[serde(default, deserialize_with = "null_as_default")]
    pub credits: Vec<CreditGroup>,
}

/// A block of credits in the track detail payload, e.g. all "Writer" roles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreditGroup {
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub credits: Vec<CreditEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreditEntry {
    /// The role name, e.g. `Composer`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub child: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub collaborators: Vec<Collaborator>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Collaborator {
    #[serde(default)]
    pub name: Option<String>,
}

/// Credit roles that make it into the reports.
///
/// Every other role the credit database knows (engineers, musicians, ...) is
/// dropped while flattening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Composer,
    Lyricist,
    CoWriter,
    PrimaryArtist,
    Producer,
    CoProducer,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Composer,
        Role::Lyricist,
        Role::CoWriter,
        Role::PrimaryArtist,
        Role::Producer,
        Role::CoProducer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Composer => "Composer",
            Role::Lyricist => "Lyricist",
            Role::CoWriter => "Co-Writer",
            Role::PrimaryArtist => "Primary Artist",
            Role::Producer => "Producer",
            Role::CoProducer => "Co-Producer",
        }
    }

    pub fn is_writer(&self) -> bool {
        matches!(self, Role::Composer | Role::Lyricist | Role::CoWriter)
    }

    pub fn is_producer(&self) -> bool {
        matches!(self, Role::Producer | Role::CoProducer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    /// Exact, case-sensitive match on the credit database's role names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| format!("'{}' is not a reported role", s))
    }
}

/// One (track, person, role) fact. Field names double as CSV headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditRow {
    #[serde(rename = "Track")]
    pub track: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Rolle")]
    pub role: String,
    pub track_id: String,
    pub release_date: String,
    pub popularity: Option<f64>,
    pub isrcs: String,
    pub album_title: String,
    pub album_id: String,
    pub album_art: String,
    pub artists: String,
}

impl CreditRow {
    pub fn role(&self) -> Option<Role> {
        self.role.parse().ok()
    }
}

/// A playlist track for which no credit record could be identified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tabled)]
pub struct UnmatchedTrack {
    #[tabled(rename = "Song")]
    pub track_name: String,
    #[tabled(rename = "Artist")]
    pub artist: String,
}

impl From<&Track> for UnmatchedTrack {
    fn from(track: &Track) -> Self {
        Self {
            track_name: track.name.clone(),
            artist: track.artist.clone(),
        }
    }
}

/// Reported after each track attempt of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// 1-based position of the track just attempted.
    pub index: usize,
    pub total: usize,
    pub track_name: String,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.index as f64 / self.total as f64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedRow {
    pub song: String,
    pub artist: String,
    pub writers: Vec<String>,
    pub producers: Vec<String>,
}

/// The wide per-track summary. Every row carries exactly `writer_columns`
/// writers and `producer_columns` producers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormattedTable {
    pub writer_columns: usize,
    pub producer_columns: usize,
    pub rows: Vec<FormattedRow>,
}

impl FormattedTable {
    pub fn headers(&self) -> Vec<String> {
        let mut headers = vec!["Song".to_string(), "Artist".to_string()];
        headers.extend((1..=self.writer_columns).map(|i| format!("Writer {}", i)));
        headers.extend((1..=self.producer_columns).map(|i| format!("Producer {}", i)));
        headers
    }

    pub fn records(&self) -> impl Iterator<Item = Vec<&str>> {
        self.rows.iter().map(|row| {
            let mut record = vec![row.song.as_str(), row.artist.as_str()];
            record.extend(row.writers.iter().map(String::as_str));
            record.extend(row.producers.iter().map(String::as_str));
            record
        })
    }
}

/// Everything one analysis run produced.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub playlist_url: String,
    pub tracks_total: usize,
    pub detailed: Vec<CreditRow>,
    pub formatted: FormattedTable,
    pub unmatched: Vec<UnmatchedTrack>,
}
