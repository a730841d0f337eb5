#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    future::Future,
    sync::Mutex,
};

use plcredits::{
    Res,
    credits::CreditCatalog,
    types::{
        CandidateAlbum, CandidateArtist, Collaborator, CreditCandidate, CreditEntry, CreditGroup,
        CreditRow, Track,
    },
};

// Helper function to create a playlist track the way the track lister does
pub fn track(name: &str, artist: &str, album: &str) -> Track {
    Track {
        name: name.to_string(),
        artist: artist.trim().to_lowercase(),
        album: album.trim().to_lowercase(),
        release_date: "2023-10-01".to_string(),
        search_string: format!("{} : {}", artist, name),
    }
}

// Helper function to create a search hit
pub fn candidate(id: &str, title: &str, album: &str) -> CreditCandidate {
    CreditCandidate {
        id: id.to_string(),
        title: title.to_string(),
        album: CandidateAlbum {
            id: format!("{}_album", id),
            title: album.to_string(),
            album_art: Some(format!("https://img.example/{}.jpg", id)),
        },
        release_date: Some("2023-10-01".to_string()),
        popularity: Some(42.0),
        isrcs: vec![format!("ISRC{}", id)],
        artists: vec![CandidateArtist {
            name: "Artist".to_string(),
        }],
    }
}

// Helper function to create a credit group from (role, names) pairs
pub fn group(entries: &[(&str, &[&str])]) -> CreditGroup {
    CreditGroup {
        parent: Some("Credits".to_string()),
        credits: entries
            .iter()
            .map(|(role, names)| CreditEntry {
                child: role.to_string(),
                collaborators: names
                    .iter()
                    .map(|n| Collaborator {
                        name: Some(n.to_string()),
                    })
                    .collect(),
            })
            .collect(),
    }
}

// Helper function to create a bare credit row for formatter tests
pub fn row(track: &str, role: &str, name: &str) -> CreditRow {
    CreditRow {
        track: track.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        track_id: format!("{}_id", track),
        release_date: String::new(),
        popularity: None,
        isrcs: String::new(),
        album_title: String::new(),
        album_id: String::new(),
        album_art: String::new(),
        artists: String::new(),
    }
}

/// In-memory credit catalog keyed by search keyword and track id.
#[derive(Default)]
pub struct FakeCatalog {
    pub hits: HashMap<String, Vec<CreditCandidate>>,
    pub credits: HashMap<String, Vec<CreditGroup>>,
    pub failing_keywords: HashSet<String>,
    pub searches: Mutex<Vec<(String, u32)>>,
    pub credit_calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn with_hits(mut self, keyword: &str, hits: Vec<CreditCandidate>) -> Self {
        self.hits.insert(keyword.to_string(), hits);
        self
    }

    pub fn with_credits(mut self, track_id: &str, groups: Vec<CreditGroup>) -> Self {
        self.credits.insert(track_id.to_string(), groups);
        self
    }

    pub fn failing(mut self, keyword: &str) -> Self {
        self.failing_keywords.insert(keyword.to_string());
        self
    }

    pub fn credit_calls(&self) -> Vec<String> {
        self.credit_calls.lock().unwrap().clone()
    }

    pub fn searches(&self) -> Vec<(String, u32)> {
        self.searches.lock().unwrap().clone()
    }
}

impl CreditCatalog for FakeCatalog {
    fn search(
        &self,
        keyword: &str,
        limit: u32,
    ) -> impl Future<Output = Res<Vec<CreditCandidate>>> + Send {
        self.searches
            .lock()
            .unwrap()
            .push((keyword.to_string(), limit));

        let result: Res<Vec<CreditCandidate>> = if self.failing_keywords.contains(keyword) {
            Err("connection reset by peer".into())
        } else {
            Ok(self.hits.get(keyword).cloned().unwrap_or_default())
        };
        async move { result }
    }

    fn credits(&self, track_id: &str) -> impl Future<Output = Res<Vec<CreditGroup>>> + Send {
        self.credit_calls.lock().unwrap().push(track_id.to_string());

        let result: Res<Vec<CreditGroup>> =
            Ok(self.credits.get(track_id).cloned().unwrap_or_default());
        async move { result }
    }
}
