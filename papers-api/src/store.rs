//! Paper store: time-boxed in-memory cache of the derived catalog
//!
//! A reload reads and derives the whole file, so concurrent cold callers must
//! share one pass. Callers that miss the cache queue on `load_gate`; the
//! first one through reloads, the rest find the fresh cache on re-check and
//! return without I/O.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use papers_common::catalog::{load_catalog, Catalog, LoadStats};
use papers_common::config::DEFAULT_CACHE_TTL_SECS;
use papers_common::{Error, Paper, Result};
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info};

/// Default cache lifetime (10 minutes)
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(DEFAULT_CACHE_TTL_SECS);

/// Immutable snapshot handed to callers
pub type PaperSnapshot = Arc<Vec<Paper>>;

/// Reads and derives the catalog file; runs on a blocking thread
pub type CatalogLoader = fn(&Path) -> Catalog;

#[derive(Debug, Clone)]
struct CachedCatalog {
    papers: PaperSnapshot,
    stats: LoadStats,
    loaded_at: Instant,
    loaded_at_utc: DateTime<Utc>,
}

/// Point-in-time view of the cache for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStatus {
    pub papers_cached: usize,
    pub loaded_at: Option<DateTime<Utc>>,
    pub stats: Option<LoadStats>,
}

/// Process-wide paper cache
pub struct PaperStore {
    data_file: PathBuf,
    ttl: Duration,
    loader: CatalogLoader,
    cache: RwLock<Option<CachedCatalog>>,
    /// Held for the duration of a reload
    load_gate: Mutex<()>,
    /// Completed reload passes since startup
    loads: AtomicU64,
}

impl PaperStore {
    pub fn new(data_file: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self::with_loader(data_file, ttl, load_catalog)
    }

    /// Store that loads through `loader` instead of the JSON catalog reader
    pub fn with_loader(
        data_file: impl Into<PathBuf>,
        ttl: Duration,
        loader: CatalogLoader,
    ) -> Self {
        Self {
            data_file: data_file.into(),
            ttl,
            loader,
            cache: RwLock::new(None),
            load_gate: Mutex::new(()),
            loads: AtomicU64::new(0),
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current catalog, reloading first if the cache is empty or expired
    pub async fn papers(&self) -> Result<PaperSnapshot> {
        if let Some(papers) = self.fresh().await {
            return Ok(papers);
        }

        let _gate = self.load_gate.lock().await;

        // Another caller may have reloaded while we waited
        if let Some(papers) = self.fresh().await {
            return Ok(papers);
        }

        info!("Cache miss or expired, loading papers");
        match self.reload().await {
            Ok(cached) => {
                let papers = Arc::clone(&cached.papers);
                info!(
                    count = papers.len(),
                    loaded_at = %cached.loaded_at_utc,
                    "Papers loaded and cached"
                );
                *self.cache.write().await = Some(cached);
                Ok(papers)
            }
            Err(e) => {
                error!("Failed to load and cache papers: {}", e);
                *self.cache.write().await = None;
                Err(e)
            }
        }
    }

    /// Snapshot if the cache holds an unexpired catalog
    async fn fresh(&self) -> Option<PaperSnapshot> {
        let cache = self.cache.read().await;
        cache
            .as_ref()
            .filter(|c| c.loaded_at.elapsed() < self.ttl)
            .map(|c| Arc::clone(&c.papers))
    }

    /// Read, derive and sort the catalog on a blocking thread
    async fn reload(&self) -> Result<CachedCatalog> {
        let path = self.data_file.clone();
        let loader = self.loader;
        let catalog = tokio::task::spawn_blocking(move || loader(&path))
            .await
            .map_err(|e| Error::Internal(format!("catalog load task failed: {}", e)))?;

        self.loads.fetch_add(1, Ordering::Relaxed);

        Ok(CachedCatalog {
            papers: Arc::new(catalog.papers),
            stats: catalog.stats,
            loaded_at: Instant::now(),
            loaded_at_utc: Utc::now(),
        })
    }

    /// Number of completed reload passes
    pub fn load_count(&self) -> u64 {
        self.loads.load(Ordering::Relaxed)
    }

    /// Cache state without triggering a load
    pub async fn status(&self) -> CacheStatus {
        let cache = self.cache.read().await;
        match cache.as_ref() {
            Some(c) => CacheStatus {
                papers_cached: c.papers.len(),
                loaded_at: Some(c.loaded_at_utc),
                stats: Some(c.stats.clone()),
            },
            None => CacheStatus {
                papers_cached: 0,
                loaded_at: None,
                stats: None,
            },
        }
    }
}
