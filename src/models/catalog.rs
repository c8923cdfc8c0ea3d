use serde::{Deserialize, Serialize};

// ============================================================================
// TMDB API Types
// ============================================================================

/// One page of results from a TMDB list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ResultsPage<T> {
    pub results: Vec<T>,
}

/// A movie as returned by search, trending, discovery and similar endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// A person as returned by the person search endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonSummary {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// A movie genre
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Response from GET /genre/movie/list
#[derive(Debug, Clone, Deserialize)]
pub struct GenreList {
    pub genres: Vec<Genre>,
}

/// A cast credit on a movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub character: Option<String>,
}

/// Credits sub-resource of a movie detail response
#[derive(Debug, Clone, Deserialize)]
pub struct CreditList {
    pub cast: Vec<CastMember>,
}

/// A trailer or clip attached to a movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub id: String,
    pub key: String,
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
}

/// Response from GET /movie/{id} with credits, videos, similar and
/// recommendations appended
#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub credits: Option<CreditList>,
    #[serde(default)]
    pub videos: Option<ResultsPage<Video>>,
    #[serde(default)]
    pub similar: Option<ResultsPage<MovieSummary>>,
    #[serde(default)]
    pub recommendations: Option<ResultsPage<MovieSummary>>,
}

/// Response from GET /person/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct PersonDetails {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub place_of_birth: Option<String>,
}

/// A movie credit from GET /person/{id}/movie_credits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonCredit {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub character: Option<String>,
}

/// Cast list from GET /person/{id}/movie_credits
#[derive(Debug, Clone, Deserialize)]
pub struct PersonCreditList {
    pub cast: Vec<PersonCredit>,
}

// ============================================================================
// Search
// ============================================================================

/// Combined outcome of a settled search, rebuilt in full on every query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub movies: Vec<MovieSummary>,
    pub people: Vec<PersonSummary>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty() && self.people.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_summary_tolerates_missing_poster() {
        let json = r#"{"id":603,"title":"The Matrix"}"#;
        let movie: MovieSummary = serde_json::from_str(json).unwrap();

        assert_eq!(movie.id, 603);
        assert_eq!(movie.poster_path, None);
    }

    #[test]
    fn test_results_page_deserializes() {
        let json = r#"{"page":1,"results":[{"id":1,"title":"A"},{"id":2,"title":"B"}],"total_pages":1}"#;
        let page: ResultsPage<MovieSummary> = serde_json::from_str(json).unwrap();

        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[1].title, "B");
    }

    #[test]
    fn test_movie_details_tolerates_missing_sub_resources() {
        let json = r#"{"id":603,"title":"The Matrix","overview":"A hacker learns the truth."}"#;
        let details: MovieDetails = serde_json::from_str(json).unwrap();

        assert!(details.credits.is_none());
        assert!(details.similar.is_none());
        assert!(details.genres.is_empty());
    }

    #[test]
    fn test_video_type_field_renamed() {
        let json = r#"{"id":"abc","key":"dQw4w9WgXcQ","name":"Trailer","site":"YouTube","type":"Trailer"}"#;
        let video: Video = serde_json::from_str(json).unwrap();

        assert_eq!(video.video_type, "Trailer");
    }

    #[test]
    fn test_search_results_is_empty() {
        assert!(SearchResults::default().is_empty());

        let with_movie = SearchResults {
            movies: vec![MovieSummary {
                id: 1,
                title: "A".to_string(),
                poster_path: None,
            }],
            people: vec![],
        };
        assert!(!with_movie.is_empty());
    }
}
