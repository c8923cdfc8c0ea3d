/// Catalog data provider abstraction
///
/// The catalog API is consumed read-only: searches, curated lists and
/// per-entity detail lookups. Keeping it behind a trait lets the search
/// coordinator and the front-end be exercised against a mock provider.
use crate::{
    error::AppResult,
    models::{Genre, MovieDetails, MovieSummary, PersonCredit, PersonDetails, PersonSummary},
};

pub mod tmdb;

pub use tmdb::TmdbCatalog;

/// Trait for movie/person catalog providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogApi: Send + Sync {
    /// Search for movies by title
    async fn search_movies(&self, query: &str) -> AppResult<Vec<MovieSummary>>;

    /// Search for people by name
    async fn search_people(&self, query: &str) -> AppResult<Vec<PersonSummary>>;

    /// The full movie genre list
    async fn movie_genres(&self) -> AppResult<Vec<Genre>>;

    /// Movies trending today
    async fn trending_movies(&self) -> AppResult<Vec<MovieSummary>>;

    /// Upcoming theatrical releases
    async fn upcoming_movies(&self) -> AppResult<Vec<MovieSummary>>;

    /// Discover movies belonging to a genre
    async fn movies_by_genre(&self, genre_id: u64) -> AppResult<Vec<MovieSummary>>;

    /// Movie detail by id, with credits, videos, similar titles and
    /// recommendations included
    async fn movie_details(&self, id: u64) -> AppResult<MovieDetails>;

    /// Person detail by id
    async fn person_details(&self, id: u64) -> AppResult<PersonDetails>;

    /// A person's movie credits, deduplicated and ordered newest-id first
    async fn person_movie_credits(&self, id: u64) -> AppResult<Vec<PersonCredit>>;
}
