/// TMDB catalog provider
///
/// Thin read-only client over the TMDB v3 REST API. Every request carries the
/// api_key and language default parameters; responses are deserialized
/// straight into the wire types in `models`.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{
        Genre, GenreList, MovieDetails, MovieSummary, PersonCredit, PersonCreditList,
        PersonDetails, PersonSummary, ResultsPage,
    },
    services::catalog::CatalogApi,
};

#[derive(Clone)]
pub struct TmdbCatalog {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
}

impl TmdbCatalog {
    pub fn new(config: &Config) -> AppResult<Self> {
        // Remote calls carry a bounded deadline so a dead network cannot
        // leave a lookup outstanding forever.
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            api_key: config.tmdb_api_key.clone(),
            api_url: config.tmdb_api_url.clone(),
            language: config.language.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl CatalogApi for TmdbCatalog {
    async fn search_movies(&self, query: &str) -> AppResult<Vec<MovieSummary>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let page: ResultsPage<MovieSummary> =
            self.get_json("/search/movie", &[("query", query)]).await?;

        tracing::info!(
            query = %query,
            results = page.results.len(),
            "Movie search completed"
        );

        Ok(page.results)
    }

    async fn search_people(&self, query: &str) -> AppResult<Vec<PersonSummary>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let page: ResultsPage<PersonSummary> =
            self.get_json("/search/person", &[("query", query)]).await?;

        tracing::info!(
            query = %query,
            results = page.results.len(),
            "Person search completed"
        );

        Ok(page.results)
    }

    async fn movie_genres(&self) -> AppResult<Vec<Genre>> {
        let list: GenreList = self.get_json("/genre/movie/list", &[]).await?;
        Ok(list.genres)
    }

    async fn trending_movies(&self) -> AppResult<Vec<MovieSummary>> {
        let page: ResultsPage<MovieSummary> = self.get_json("/trending/movie/day", &[]).await?;
        Ok(page.results)
    }

    async fn upcoming_movies(&self) -> AppResult<Vec<MovieSummary>> {
        let page: ResultsPage<MovieSummary> = self.get_json("/movie/upcoming", &[]).await?;
        Ok(page.results)
    }

    async fn movies_by_genre(&self, genre_id: u64) -> AppResult<Vec<MovieSummary>> {
        let genre = genre_id.to_string();
        let page: ResultsPage<MovieSummary> = self
            .get_json("/discover/movie", &[("with_genres", genre.as_str())])
            .await?;
        Ok(page.results)
    }

    async fn movie_details(&self, id: u64) -> AppResult<MovieDetails> {
        self.get_json(
            &format!("/movie/{}", id),
            &[("append_to_response", "credits,videos,similar,recommendations")],
        )
        .await
    }

    async fn person_details(&self, id: u64) -> AppResult<PersonDetails> {
        self.get_json(&format!("/person/{}", id), &[]).await
    }

    async fn person_movie_credits(&self, id: u64) -> AppResult<Vec<PersonCredit>> {
        let list: PersonCreditList = self
            .get_json(&format!("/person/{}/movie_credits", id), &[])
            .await?;
        Ok(dedupe_credits(list.cast))
    }
}

/// Collapses duplicate credits (one per movie) and orders newest-id first
fn dedupe_credits(mut credits: Vec<PersonCredit>) -> Vec<PersonCredit> {
    credits.sort_by(|a, b| b.id.cmp(&a.id));
    credits.dedup_by_key(|c| c.id);
    credits
}
