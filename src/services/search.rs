/// Debounced search coordinator
///
/// Turns a raw keystroke stream into at most one outstanding pair of catalog
/// lookups. Each input arms a scheduled task that waits out the quiescence
/// window before firing; a newer input aborts it. A monotonic generation
/// counter is checked after the sleep and again after the lookups settle, so
/// a stale response can never overwrite a fresher query's results.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::{
    models::SearchResults,
    services::catalog::CatalogApi,
};

/// Results per category in a settled search
const RESULT_LIMIT: usize = 5;

/// Phase of the search pipeline as seen by subscribers
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPhase {
    /// No input received yet
    Idle,
    /// Input received; waiting out the quiescence window or awaiting lookups
    Pending,
    /// Lookups settled for the carried query; results may be empty
    Ready(SearchResults),
    /// A lookup failed; distinct from an empty `Ready` so the consumer can
    /// tell "no data" from "failure"
    Failed,
}

/// Published search state: the query it belongs to and its phase
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub phase: SearchPhase,
}

pub struct SearchCoordinator {
    catalog: Arc<dyn CatalogApi>,
    quiescence: Duration,
    generation: Arc<AtomicU64>,
    state_tx: Arc<watch::Sender<SearchState>>,
    scheduled: Mutex<Option<JoinHandle<()>>>,
}

impl SearchCoordinator {
    pub fn new(catalog: Arc<dyn CatalogApi>, quiescence: Duration) -> Self {
        let (state_tx, _) = watch::channel(SearchState {
            query: String::new(),
            phase: SearchPhase::Idle,
        });

        Self {
            catalog,
            quiescence,
            generation: Arc::new(AtomicU64::new(0)),
            state_tx: Arc::new(state_tx),
            scheduled: Mutex::new(None),
        }
    }

    /// Feeds the current query text to the coordinator
    ///
    /// Publishes `Pending`, cancels any previously scheduled evaluation and
    /// arms a new one for the quiescence window.
    pub async fn on_input(&self, query: &str) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.state_tx.send_replace(SearchState {
            query: query.to_string(),
            phase: SearchPhase::Pending,
        });

        let task = tokio::spawn(run_query(
            self.catalog.clone(),
            self.quiescence,
            self.generation.clone(),
            self.state_tx.clone(),
            query.to_string(),
            generation,
        ));

        if let Some(previous) = self.scheduled.lock().await.replace(task) {
            previous.abort();
        }
    }

    /// The most recently published state
    pub fn current(&self) -> SearchState {
        self.state_tx.borrow().clone()
    }

    /// Subscribes to state updates
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state_tx.subscribe()
    }

    /// Cancels any scheduled evaluation; called on teardown
    pub async fn shutdown(&self) {
        if let Some(task) = self.scheduled.lock().await.take() {
            task.abort();
        }
    }
}

async fn run_query(
    catalog: Arc<dyn CatalogApi>,
    quiescence: Duration,
    generation_counter: Arc<AtomicU64>,
    state_tx: Arc<watch::Sender<SearchState>>,
    query: String,
    generation: u64,
) {
    tokio::time::sleep(quiescence).await;
    if generation_counter.load(Ordering::SeqCst) != generation {
        return;
    }

    let trimmed = query.trim();
    if trimmed.is_empty() {
        // Nothing to look up; settle immediately with empty results.
        state_tx.send_replace(SearchState {
            query,
            phase: SearchPhase::Ready(SearchResults::default()),
        });
        return;
    }

    let (movies, people) = tokio::join!(
        catalog.search_movies(trimmed),
        catalog.search_people(trimmed)
    );

    // Last-query-wins: a newer input superseded this lookup while it was in
    // flight, so its results must not be applied.
    if generation_counter.load(Ordering::SeqCst) != generation {
        return;
    }

    let phase = match (movies, people) {
        (Ok(mut movies), Ok(mut people)) => {
            movies.truncate(RESULT_LIMIT);
            people.truncate(RESULT_LIMIT);
            SearchPhase::Ready(SearchResults { movies, people })
        }
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!(error = %e, query = %trimmed, "Search lookup failed");
            SearchPhase::Failed
        }
    };

    state_tx.send_replace(SearchState { query, phase });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MovieSummary, PersonSummary};
    use crate::services::catalog::MockCatalogApi;

    fn movie(id: u64, title: &str) -> MovieSummary {
        MovieSummary {
            id,
            title: title.to_string(),
            poster_path: None,
        }
    }

    fn person(id: u64, name: &str) -> PersonSummary {
        PersonSummary {
            id,
            name: name.to_string(),
            profile_path: None,
        }
    }

    async fn settle(coordinator: &SearchCoordinator) -> SearchState {
        let mut rx = coordinator.subscribe();
        loop {
            let state = rx.borrow_and_update().clone();
            match state.phase {
                SearchPhase::Ready(_) | SearchPhase::Failed => return state,
                _ => rx.changed().await.unwrap(),
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_keystrokes_within_window_coalesce_to_one_lookup_pair() {
        let mut catalog = MockCatalogApi::new();
        catalog
            .expect_search_movies()
            .withf(|q| q == "bat")
            .times(1)
            .returning(|_| Ok(vec![movie(268, "Batman")]));
        catalog
            .expect_search_people()
            .withf(|q| q == "bat")
            .times(1)
            .returning(|_| Ok(vec![]));

        let coordinator =
            SearchCoordinator::new(Arc::new(catalog), Duration::from_millis(300));

        coordinator.on_input("b").await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        coordinator.on_input("ba").await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        coordinator.on_input("bat").await;

        let state = settle(&coordinator).await;
        assert_eq!(state.query, "bat");
        match state.phase {
            SearchPhase::Ready(results) => {
                assert_eq!(results.movies.len(), 1);
                assert_eq!(results.movies[0].title, "Batman");
            }
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_query_settles_without_network_calls() {
        let mut catalog = MockCatalogApi::new();
        catalog.expect_search_movies().times(0);
        catalog.expect_search_people().times(0);

        let coordinator =
            SearchCoordinator::new(Arc::new(catalog), Duration::from_millis(300));

        coordinator.on_input("   ").await;

        let state = settle(&coordinator).await;
        assert_eq!(state.phase, SearchPhase::Ready(SearchResults::default()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_truncated_to_five_per_category() {
        let mut catalog = MockCatalogApi::new();
        catalog.expect_search_movies().times(1).returning(|_| {
            Ok((0..8).map(|i| movie(i, &format!("Movie {}", i))).collect())
        });
        catalog.expect_search_people().times(1).returning(|_| {
            Ok((0..7)
                .map(|i| person(i, &format!("Person {}", i)))
                .collect())
        });

        let coordinator =
            SearchCoordinator::new(Arc::new(catalog), Duration::from_millis(300));

        coordinator.on_input("prolific").await;

        let state = settle(&coordinator).await;
        match state.phase {
            SearchPhase::Ready(results) => {
                assert_eq!(results.movies.len(), 5);
                assert_eq!(results.people.len(), 5);
            }
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookup_failure_publishes_failed() {
        let mut catalog = MockCatalogApi::new();
        catalog.expect_search_movies().times(1).returning(|_| {
            Err(crate::error::AppError::ExternalApi(
                "TMDB returned status 500".to_string(),
            ))
        });
        catalog
            .expect_search_people()
            .times(1)
            .returning(|_| Ok(vec![]));

        let coordinator =
            SearchCoordinator::new(Arc::new(catalog), Duration::from_millis(300));

        coordinator.on_input("anything").await;

        let state = settle(&coordinator).await;
        assert_eq!(state.phase, SearchPhase::Failed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_publishes_pending_immediately() {
        let mut catalog = MockCatalogApi::new();
        catalog
            .expect_search_movies()
            .returning(|_| Ok(vec![]));
        catalog
            .expect_search_people()
            .returning(|_| Ok(vec![]));

        let coordinator =
            SearchCoordinator::new(Arc::new(catalog), Duration::from_millis(300));

        assert_eq!(coordinator.current().phase, SearchPhase::Idle);

        coordinator.on_input("x").await;
        assert_eq!(coordinator.current().phase, SearchPhase::Pending);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_scheduled_evaluation() {
        let mut catalog = MockCatalogApi::new();
        catalog.expect_search_movies().times(0);
        catalog.expect_search_people().times(0);

        let coordinator =
            SearchCoordinator::new(Arc::new(catalog), Duration::from_millis(300));

        coordinator.on_input("doomed").await;
        coordinator.shutdown().await;

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(coordinator.current().phase, SearchPhase::Pending);
    }
}
