use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use cinelog::config::Config;
use cinelog::models::{FavoriteEntry, MediaKind, SearchResults};
use cinelog::services::catalog::{CatalogApi, TmdbCatalog};
use cinelog::services::favorites::FavoritesStore;
use cinelog::services::images::{image_url, ImageSize};
use cinelog::services::search::{SearchCoordinator, SearchPhase};
use cinelog::storage::FileStorage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = Config::from_env()?;

    let storage = Arc::new(FileStorage::new(&config.favorites_path));
    let favorites = FavoritesStore::new(storage);
    favorites.load().await;

    let catalog: Arc<dyn CatalogApi> = Arc::new(TmdbCatalog::new(&config)?);
    let coordinator = SearchCoordinator::new(
        catalog,
        Duration::from_millis(config.search_debounce_ms),
    );
    let mut search_rx = coordinator.subscribe();

    println!("cinelog - search movies and people, mark favorites");
    println!("Type a query, or: :fav m<N> | :fav p<N> | :unfav m<N> | :unfav p<N> | :favs | :quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_results = SearchResults::default();

    print!("> ");
    std::io::stdout().flush()?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();

        if line == ":quit" {
            break;
        } else if line == ":favs" {
            print_favorites(&favorites);
        } else if let Some(target) = line.strip_prefix(":fav ") {
            toggle_favorite(&favorites, &last_results, target, true).await;
        } else if let Some(target) = line.strip_prefix(":unfav ") {
            toggle_favorite(&favorites, &last_results, target, false).await;
        } else if !line.is_empty() {
            coordinator.on_input(&line).await;

            // The console has no keystroke stream, so each submitted line is
            // one settled query; wait for its results before prompting again.
            loop {
                search_rx.changed().await?;
                let state = search_rx.borrow_and_update().clone();
                if state.query != line {
                    continue;
                }
                match state.phase {
                    SearchPhase::Ready(results) => {
                        print_results(&results, &favorites);
                        last_results = results;
                        break;
                    }
                    SearchPhase::Failed => {
                        println!("Search failed, please try again.");
                        break;
                    }
                    _ => {}
                }
            }
        }

        print!("> ");
        std::io::stdout().flush()?;
    }

    coordinator.shutdown().await;
    Ok(())
}

fn print_results(results: &SearchResults, favorites: &FavoritesStore) {
    if results.is_empty() {
        println!("No results.");
        return;
    }

    if !results.movies.is_empty() {
        println!("Movies:");
        for (i, movie) in results.movies.iter().enumerate() {
            let marker = if favorites.is_favorite(movie.id, MediaKind::Movie) {
                "*"
            } else {
                " "
            };
            let poster = image_url(movie.poster_path.as_deref(), ImageSize::W92)
                .unwrap_or_else(|| "(no poster)".to_string());
            println!("  m{} {} {}  {}", i + 1, marker, movie.title, poster);
        }
    }

    if !results.people.is_empty() {
        println!("People:");
        for (i, person) in results.people.iter().enumerate() {
            let marker = if favorites.is_favorite(person.id, MediaKind::Person) {
                "*"
            } else {
                " "
            };
            println!("  p{} {} {}", i + 1, marker, person.name);
        }
    }
}

fn print_favorites(favorites: &FavoritesStore) {
    let snapshot = favorites.snapshot();
    if snapshot.is_empty() {
        println!("No favorites yet.");
        return;
    }
    for entry in snapshot.iter() {
        let kind = match entry.kind {
            MediaKind::Movie => "movie",
            MediaKind::Person => "person",
        };
        println!("  [{}] {} (id {})", kind, entry.display_title, entry.id);
    }
}

async fn toggle_favorite(
    favorites: &FavoritesStore,
    results: &SearchResults,
    target: &str,
    add: bool,
) {
    let Some(entry) = pick_entry(results, target) else {
        println!("No such result: {}", target);
        return;
    };

    let outcome = if add {
        favorites.add(entry.clone()).await
    } else {
        favorites.remove(entry.id, entry.kind).await
    };

    match outcome {
        Ok(()) => println!(
            "{} {}",
            if add { "Favorited" } else { "Unfavorited" },
            entry.display_title
        ),
        Err(e) => println!("Could not update favorites: {}", e),
    }
}

fn pick_entry(results: &SearchResults, target: &str) -> Option<FavoriteEntry> {
    if let Some(index) = target.strip_prefix('m') {
        let index = index.trim().parse::<usize>().ok()?.checked_sub(1)?;
        results.movies.get(index).cloned().map(FavoriteEntry::from)
    } else if let Some(index) = target.strip_prefix('p') {
        let index = index.trim().parse::<usize>().ok()?.checked_sub(1)?;
        results.people.get(index).cloned().map(FavoriteEntry::from)
    } else {
        None
    }
}
