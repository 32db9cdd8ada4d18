//! Favourite cities persisted as a JSON file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use futures::future;
use futures::stream::{BoxStream, StreamExt};
use tokio::sync::Mutex;

use crate::domain::{City, FavouriteRepository, RepositoryError};
use crate::reactive::BehaviorSubject;

/// Favourites shared by every screen.
///
/// Reads come from an in-memory replay-1 subject; writes are serialized by an
/// async mutex and persisted (temp file + rename) before subscribers see them.
///
/// Once a write holds the lock it runs to completion on its own task, so a
/// caller dropped mid-write never leaves the file and the subject apart.
pub struct JsonFavouriteStore {
    path: Option<PathBuf>,
    cities: Arc<BehaviorSubject<Vec<City>>>,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFavouriteStore {
    /// Open the store at `path`, loading existing favourites if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let path = path.into();
        let cities = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content).map_err(|e| {
                RepositoryError::Storage(format!("corrupt favourites file {}: {e}", path.display()))
            })?
        } else {
            Vec::new()
        };
        tracing::debug!(path = %path.display(), count = cities.len(), "Favourites loaded");
        Ok(Self {
            path: Some(path),
            cities: Arc::new(BehaviorSubject::new(cities)),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Store that keeps favourites only for the lifetime of the process.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            cities: Arc::new(BehaviorSubject::new(Vec::new())),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Current favourites snapshot.
    pub fn cities(&self) -> Vec<City> {
        self.cities.value()
    }

    /// Apply `change` to the current list and commit it if it reports a change.
    async fn update<F>(&self, change: F) -> Result<(), RepositoryError>
    where
        F: FnOnce(&mut Vec<City>) -> bool + Send + 'static,
    {
        let guard = Arc::clone(&self.write_lock).lock_owned().await;
        let path = self.path.clone();
        let subject = Arc::clone(&self.cities);
        let write = tokio::spawn(async move {
            let _guard = guard;
            let mut cities = subject.value();
            if !change(&mut cities) {
                return Ok(());
            }
            if let Some(path) = &path {
                persist(path, &cities).await?;
            }
            subject.set(cities);
            Ok::<_, RepositoryError>(())
        });
        write
            .await
            .map_err(|e| RepositoryError::Storage(format!("favourites write aborted: {e}")))?
    }
}

async fn persist(path: &Path, cities: &[City]) -> Result<(), RepositoryError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let json = serde_json::to_string_pretty(cities)
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[async_trait]
impl FavouriteRepository for JsonFavouriteStore {
    fn favourite_cities(&self) -> BoxStream<'static, Vec<City>> {
        self.cities.subscribe().into_stream()
    }

    fn observe_is_favourite(&self, city_id: i64) -> BoxStream<'static, bool> {
        let mut last = None;
        self.cities
            .subscribe()
            .into_stream()
            .map(move |cities| cities.iter().any(|city| city.id == city_id))
            .filter(move |is_favourite| {
                let changed = last != Some(*is_favourite);
                last = Some(*is_favourite);
                future::ready(changed)
            })
            .boxed()
    }

    async fn add_to_favourite(&self, city: City) -> Result<(), RepositoryError> {
        self.update(move |cities| {
            if cities.iter().any(|existing| existing.id == city.id) {
                return false;
            }
            tracing::debug!(city_id = city.id, "Adding favourite");
            cities.push(city);
            true
        })
        .await
    }

    async fn remove_from_favourite(&self, city_id: i64) -> Result<(), RepositoryError> {
        self.update(move |cities| {
            let before = cities.len();
            cities.retain(|city| city.id != city_id);
            if cities.len() == before {
                return false;
            }
            tracing::debug!(city_id, "Removing favourite");
            true
        })
        .await
    }
}
