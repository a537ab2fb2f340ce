//! Asset preloader.
//!
//! Fetches a fixed set of site assets concurrently and reports once all of
//! them have settled. A failed asset fills its slot with the reason; it
//! never aborts the others.

use tokio::task::JoinSet;

use super::ApiClient;

/// Outcome of one asset load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetStatus {
    Loaded { bytes: usize },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLoad {
    pub url: String,
    pub status: AssetStatus,
}

/// Per-asset results, in the order the assets were requested.
#[derive(Debug, Clone, Default)]
pub struct PreloadReport {
    pub assets: Vec<AssetLoad>,
}

impl PreloadReport {
    pub fn loaded(&self) -> usize {
        self.assets
            .iter()
            .filter(|a| matches!(a.status, AssetStatus::Loaded { .. }))
            .count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &AssetLoad> {
        self.assets
            .iter()
            .filter(|a| matches!(a.status, AssetStatus::Failed(_)))
    }
}

#[derive(Debug, Clone)]
pub struct Preloader {
    client: ApiClient,
}

impl Preloader {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Load every asset; paths starting with `/` are resolved against the site.
    pub async fn preload(&self, assets: &[&str]) -> PreloadReport {
        let mut tasks = JoinSet::new();

        for (slot, asset) in assets.iter().enumerate() {
            let url = self.resolve(asset);
            let http = self.client.http().clone();
            tasks.spawn(async move {
                let status = match fetch(&http, &url).await {
                    Ok(bytes) => AssetStatus::Loaded { bytes },
                    Err(reason) => {
                        tracing::warn!("Failed to preload {}: {}", url, reason);
                        AssetStatus::Failed(reason)
                    }
                };
                (slot, AssetLoad { url, status })
            });
        }

        let mut slots: Vec<Option<AssetLoad>> = vec![None; assets.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((slot, load)) => slots[slot] = Some(load),
                Err(e) => tracing::warn!("Preload task did not finish: {}", e),
            }
        }

        let assets = slots
            .into_iter()
            .zip(assets)
            .map(|(slot, asset)| {
                slot.unwrap_or_else(|| AssetLoad {
                    url: self.resolve(asset),
                    status: AssetStatus::Failed("load task aborted".to_string()),
                })
            })
            .collect();

        let report = PreloadReport { assets };
        tracing::debug!(
            loaded = report.loaded(),
            total = report.assets.len(),
            "Preload settled"
        );
        report
    }

    fn resolve(&self, asset: &str) -> String {
        if asset.starts_with('/') {
            format!("{}{}", self.client.base_url(), asset)
        } else {
            asset.to_string()
        }
    }
}

async fn fetch(http: &reqwest::Client, url: &str) -> Result<usize, String> {
    let response = http.get(url).send().await.map_err(|e| e.to_string())?;
    let status = response.status();
    if !status.is_success() {
        return Err(format!("status {}", status));
    }
    let body = response.bytes().await.map_err(|e| e.to_string())?;
    Ok(body.len())
}
