//! Extended dataset bootstrap.
//!
//! On cold start the cached extension is read first, then the configured URL
//! is tried. A candidate set replaces the current one only when it is
//! strictly larger than the bundled default. Every failure is logged and
//! ignored, leaving the bundled set in place.

use crate::cache::KvStore;
use crate::dataset::Dataset;
use crate::types::QAEntry;
use nivesh_core::{AppError, AppResult};

/// Cache key of the extended dataset.
pub const DATASET_CACHE_KEY: &str = "investment_dataset";

/// Where the dataset in use came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetOrigin {
    Bundled,
    Cache,
    Remote,
}

/// The dataset selected by [`bootstrap_dataset`].
#[derive(Debug, Clone)]
pub struct BootstrapOutcome {
    pub dataset: Dataset,
    pub origin: DatasetOrigin,
}

/// Fetch the extended dataset, a JSON array of `{question, answer}` objects.
pub async fn fetch_dataset(url: &str) -> AppResult<Vec<QAEntry>> {
    tracing::info!("Fetching extended dataset from {}", url);

    let response = reqwest::get(url)
        .await
        .map_err(|e| AppError::Knowledge(format!("Failed to fetch dataset: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::Knowledge(format!(
            "Dataset fetch failed ({})",
            response.status()
        )));
    }

    let entries: Vec<QAEntry> = response
        .json()
        .await
        .map_err(|e| AppError::Knowledge(format!("Failed to parse dataset: {}", e)))?;

    tracing::info!("Fetched {} dataset entries", entries.len());
    Ok(entries)
}

/// Whether a candidate set should replace the bundled default.
pub fn should_adopt(candidate: &[QAEntry], bundled_len: usize) -> bool {
    candidate.len() > bundled_len
}

/// Read the cached extension, if any and if it beats the bundled set.
pub fn load_cached(store: &KvStore, bundled_len: usize) -> Option<Vec<QAEntry>> {
    match store.get::<Vec<QAEntry>>(DATASET_CACHE_KEY) {
        Ok(Some(entries)) if should_adopt(&entries, bundled_len) => {
            tracing::debug!("Using {} cached dataset entries", entries.len());
            Some(entries)
        }
        Ok(_) => None,
        Err(e) => {
            tracing::warn!("Ignoring unreadable dataset cache: {}", e);
            None
        }
    }
}

/// Select the dataset for this session.
///
/// `url` is optional; without it only the cache is consulted.
pub async fn bootstrap_dataset(
    store: &mut KvStore,
    url: Option<&str>,
    bundled: Dataset,
) -> BootstrapOutcome {
    let bundled_len = bundled.len();

    let mut outcome = match load_cached(store, bundled_len) {
        Some(entries) => BootstrapOutcome {
            dataset: Dataset::new(entries),
            origin: DatasetOrigin::Cache,
        },
        None => BootstrapOutcome {
            dataset: bundled,
            origin: DatasetOrigin::Bundled,
        },
    };

    let Some(url) = url else {
        return outcome;
    };

    match fetch_dataset(url).await {
        Ok(entries) if should_adopt(&entries, bundled_len) => {
            if let Err(e) = store.set(DATASET_CACHE_KEY, &entries) {
                tracing::warn!("Failed to cache extended dataset: {}", e);
            }
            outcome = BootstrapOutcome {
                dataset: Dataset::new(entries),
                origin: DatasetOrigin::Remote,
            };
        }
        Ok(entries) => {
            tracing::debug!(
                "Remote dataset has {} entries, not more than the bundled {}; keeping current set",
                entries.len(),
                bundled_len
            );
        }
        Err(e) => {
            tracing::debug!("Dataset bootstrap skipped: {}", e);
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entries(n: usize) -> Vec<QAEntry> {
        (0..n)
            .map(|i| QAEntry::new(format!("question {}", i), format!("answer {}", i)))
            .collect()
    }

    #[test]
    fn test_should_adopt_requires_strictly_larger() {
        assert!(!should_adopt(&entries(3), 3));
        assert!(should_adopt(&entries(4), 3));
    }

    #[tokio::test]
    async fn test_bundled_without_cache_or_url() {
        let temp = TempDir::new().unwrap();
        let mut store = KvStore::for_workspace(temp.path()).unwrap();
        let outcome = bootstrap_dataset(&mut store, None, Dataset::bundled()).await;
        assert_eq!(outcome.origin, DatasetOrigin::Bundled);
        assert_eq!(outcome.dataset.len(), Dataset::bundled().len());
    }

    #[tokio::test]
    async fn test_larger_cache_is_used() {
        let temp = TempDir::new().unwrap();
        let mut store = KvStore::for_workspace(temp.path()).unwrap();
        let bundled_len = Dataset::bundled().len();
        store.set(DATASET_CACHE_KEY, &entries(bundled_len + 5)).unwrap();

        let outcome = bootstrap_dataset(&mut store, None, Dataset::bundled()).await;
        assert_eq!(outcome.origin, DatasetOrigin::Cache);
        assert_eq!(outcome.dataset.len(), bundled_len + 5);
    }

    #[tokio::test]
    async fn test_smaller_cache_is_ignored() {
        let temp = TempDir::new().unwrap();
        let mut store = KvStore::for_workspace(temp.path()).unwrap();
        store.set(DATASET_CACHE_KEY, &entries(2)).unwrap();

        let outcome = bootstrap_dataset(&mut store, None, Dataset::bundled()).await;
        assert_eq!(outcome.origin, DatasetOrigin::Bundled);
    }

    #[tokio::test]
    async fn test_unreachable_url_keeps_current_set() {
        let temp = TempDir::new().unwrap();
        let mut store = KvStore::for_workspace(temp.path()).unwrap();
        let outcome = bootstrap_dataset(
            &mut store,
            Some("http://127.0.0.1:9/dataset.json"),
            Dataset::bundled(),
        )
        .await;
        assert_eq!(outcome.origin, DatasetOrigin::Bundled);
        assert!(!store.contains(DATASET_CACHE_KEY));
    }
}
