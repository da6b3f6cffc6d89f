use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::models::{FeedItem, ViewKind};
use crate::seed;

/// Persistence collaborator. Views load their collection through it when they
/// are mounted and hand it every item they create.
pub trait Repository {
    fn save(
        &self,
        kind: ViewKind,
        item: &FeedItem,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn load_all(
        &self,
        kind: ViewKind,
    ) -> impl Future<Output = Result<Vec<FeedItem>, StoreError>> + Send;
}

/// In-memory repository, seeded with the sample content.
#[derive(Debug, Clone, Default)]
pub struct MockRepository {
    inner: Arc<RwLock<HashMap<ViewKind, Vec<FeedItem>>>>,
}

impl MockRepository {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn seeded() -> Self {
        let data = ViewKind::ALL
            .iter()
            .map(|kind| (*kind, seed::items_for(*kind)))
            .collect();
        Self {
            inner: Arc::new(RwLock::new(data)),
        }
    }
}

impl Repository for MockRepository {
    async fn save(&self, kind: ViewKind, item: &FeedItem) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        upsert_front(inner.entry(kind).or_default(), item.clone());
        Ok(())
    }

    async fn load_all(&self, kind: ViewKind) -> Result<Vec<FeedItem>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.get(&kind).cloned().unwrap_or_default())
    }
}

/// File-backed repository: one `<kind>.json` per view in `dir`.
///
/// Writes go to `<kind>.json.tmp` first and are renamed over the main file. A
/// corrupted main file is recovered from the tmp file when possible.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
    // serializes read-modify-write cycles
    lock: Arc<RwLock<()>>,
}

impl JsonStore {
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self {
            dir,
            lock: Arc::new(RwLock::new(())),
        })
    }

    pub fn path_for(&self, kind: ViewKind) -> PathBuf {
        self.dir.join(format!("{}.json", kind.key()))
    }

    /// Writes the sample content for every kind that has no file yet.
    pub async fn seed_missing(&self) -> Result<(), StoreError> {
        let _guard = self.lock.write().await;
        for kind in ViewKind::ALL {
            let path = self.path_for(kind);
            if tokio::fs::try_exists(&path).await? {
                continue;
            }
            debug!(path = %path.display(), "seeding store file");
            write_atomic(&path, &seed::items_for(kind)).await?;
        }
        Ok(())
    }

    async fn read_items(&self, kind: ViewKind) -> Result<Vec<FeedItem>, StoreError> {
        let path = self.path_for(kind);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_slice(&bytes) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!(error = %e, path = %path.display(), "failed to parse store file, trying tmp fallback");
                let tmp = path.with_extension("json.tmp");
                match tokio::fs::read(&tmp).await {
                    Ok(tmp_bytes) => Ok(serde_json::from_slice(&tmp_bytes).unwrap_or_default()),
                    Err(_) => Ok(Vec::new()),
                }
            }
        }
    }
}

impl Repository for JsonStore {
    async fn save(&self, kind: ViewKind, item: &FeedItem) -> Result<(), StoreError> {
        let _guard = self.lock.write().await;
        let mut items = self.read_items(kind).await?;
        upsert_front(&mut items, item.clone());
        write_atomic(&self.path_for(kind), &items).await
    }

    async fn load_all(&self, kind: ViewKind) -> Result<Vec<FeedItem>, StoreError> {
        let _guard = self.lock.read().await;
        self.read_items(kind).await
    }
}

/// The repository the app runs against, picked from configuration.
#[derive(Debug, Clone)]
pub enum Backend {
    Mock(MockRepository),
    Json(JsonStore),
}

impl Repository for Backend {
    async fn save(&self, kind: ViewKind, item: &FeedItem) -> Result<(), StoreError> {
        match self {
            Backend::Mock(repo) => repo.save(kind, item).await,
            Backend::Json(repo) => repo.save(kind, item).await,
        }
    }

    async fn load_all(&self, kind: ViewKind) -> Result<Vec<FeedItem>, StoreError> {
        match self {
            Backend::Mock(repo) => repo.load_all(kind).await,
            Backend::Json(repo) => repo.load_all(kind).await,
        }
    }
}

// Replace in place when the id is known, otherwise prepend.
fn upsert_front(items: &mut Vec<FeedItem>, item: FeedItem) {
    match items.iter_mut().find(|existing| existing.id == item.id) {
        Some(existing) => *existing = item,
        None => items.insert(0, item),
    }
}

async fn write_atomic(path: &Path, items: &[FeedItem]) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec_pretty(items)?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, &bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
