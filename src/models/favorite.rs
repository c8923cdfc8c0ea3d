use serde::{Deserialize, Serialize};

use super::{MovieSummary, PersonSummary};

/// Kind of a favorited catalog entity
///
/// Identifiers from the catalog are only unique within a kind, so every
/// favorites lookup carries the pair `(id, kind)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Person,
}

/// A favorited movie or person
///
/// Entries are created and destroyed by explicit user action and never
/// mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteEntry {
    pub id: u64,
    pub kind: MediaKind,
    pub display_title: String,
    pub image_path: Option<String>,
}

impl FavoriteEntry {
    pub fn movie(id: u64, title: impl Into<String>, poster_path: Option<String>) -> Self {
        Self {
            id,
            kind: MediaKind::Movie,
            display_title: title.into(),
            image_path: poster_path,
        }
    }

    pub fn person(id: u64, name: impl Into<String>, profile_path: Option<String>) -> Self {
        Self {
            id,
            kind: MediaKind::Person,
            display_title: name.into(),
            image_path: profile_path,
        }
    }
}

impl From<MovieSummary> for FavoriteEntry {
    fn from(movie: MovieSummary) -> Self {
        FavoriteEntry::movie(movie.id, movie.title, movie.poster_path)
    }
}

impl From<PersonSummary> for FavoriteEntry {
    fn from(person: PersonSummary) -> Self {
        FavoriteEntry::person(person.id, person.name, person.profile_path)
    }
}

/// On-disk representation of a single favorite
///
/// The persisted blob is a JSON array of these. Movies carry `displayTitle`
/// and people carry `displayName`; readers accept either.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredFavorite {
    pub id: u64,
    pub kind: MediaKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
}

impl From<FavoriteEntry> for StoredFavorite {
    fn from(entry: FavoriteEntry) -> Self {
        let (display_title, display_name) = match entry.kind {
            MediaKind::Movie => (Some(entry.display_title), None),
            MediaKind::Person => (None, Some(entry.display_title)),
        };

        StoredFavorite {
            id: entry.id,
            kind: entry.kind,
            display_title,
            display_name,
            image_path: entry.image_path,
        }
    }
}

impl From<StoredFavorite> for FavoriteEntry {
    fn from(stored: StoredFavorite) -> Self {
        FavoriteEntry {
            id: stored.id,
            kind: stored.kind,
            display_title: stored
                .display_title
                .or(stored.display_name)
                .unwrap_or_default(),
            image_path: stored.image_path,
        }
    }
}
