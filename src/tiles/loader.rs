use crate::core::geo::TileCoord;
use crate::{MapError, Result};
use crossbeam_channel::{Receiver, Sender};
use once_cell::sync::Lazy;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::source::TileSource;

/// Shared blocking HTTP client. Building the client once avoids the cost of
/// TLS and connection pool setup for every tile.
pub(crate) static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(concat!("pointmap/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(10))
        .build()
        .expect("failed to build reqwest blocking client")
});

/// Raw payload of one vector tile. The body is never decoded here.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorTile {
    pub coord: TileCoord,
    pub data: Vec<u8>,
}

impl VectorTile {
    /// The tile server answers with an empty body when a tile has no points
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Completed background download
pub type TileResult = (TileCoord, Result<VectorTile>);

#[derive(Debug, Clone)]
pub struct TileLoaderConfig {
    pub max_attempts: usize,
    pub retry_delay: Duration,
}

impl Default for TileLoaderConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            retry_delay: Duration::from_millis(100),
        }
    }
}

/// Fetches tiles of one source, either inline or on background threads that
/// report over a channel.
pub struct TileLoader {
    source: Arc<dyn TileSource>,
    client: Client,
    config: TileLoaderConfig,
    tx: Sender<TileResult>,
    rx: Receiver<TileResult>,
}

impl TileLoader {
    pub fn new(source: Arc<dyn TileSource>) -> Self {
        Self::with_client(source, HTTP_CLIENT.clone(), TileLoaderConfig::default())
    }

    pub fn with_client(source: Arc<dyn TileSource>, client: Client, config: TileLoaderConfig) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            source,
            client,
            config,
            tx,
            rx,
        }
    }

    pub fn config(&self) -> &TileLoaderConfig {
        &self.config
    }

    /// Receiver for tiles started with [`TileLoader::start_download`]
    pub fn results(&self) -> &Receiver<TileResult> {
        &self.rx
    }

    /// Download one tile on the calling thread, retrying on failure.
    pub fn fetch(&self, coord: TileCoord) -> Result<VectorTile> {
        let url = self.source.url(coord).ok_or_else(|| {
            MapError::InvalidConfig(format!(
                "source '{}' does not serve tile {}",
                self.source.id(),
                coord
            ))
        })?;
        fetch_with_retry(&self.client, &self.config, coord, &url)
    }

    /// Start downloading the specified tile on a detached thread. When the
    /// request finishes (successfully or not) the result is sent to
    /// [`TileLoader::results`].
    pub fn start_download(&self, coord: TileCoord) {
        let tx = self.tx.clone();
        let Some(url) = self.source.url(coord) else {
            let _ = tx.send((
                coord,
                Err(MapError::InvalidConfig(format!(
                    "source '{}' does not serve tile {}",
                    self.source.id(),
                    coord
                ))),
            ));
            return;
        };
        let client = self.client.clone();
        let config = self.config.clone();

        thread::spawn(move || {
            let result = fetch_with_retry(&client, &config, coord, &url);
            let _ = tx.send((coord, result));
        });
    }
}

fn fetch_with_retry(
    client: &Client,
    config: &TileLoaderConfig,
    coord: TileCoord,
    url: &str,
) -> Result<VectorTile> {
    let attempts = config.max_attempts.max(1);
    let mut last_error = None;

    for attempt in 1..=attempts {
        log::debug!("fetch tile {} attempt {}", coord, attempt);
        match fetch_once(client, url) {
            Ok(data) => {
                log::info!("downloaded tile {} ({} bytes)", coord, data.len());
                return Ok(VectorTile { coord, data });
            }
            Err(e) => {
                log::warn!("tile {} download failed on attempt {}: {}", coord, attempt, e);
                last_error = Some(e);
                if attempt < attempts {
                    thread::sleep(config.retry_delay);
                }
            }
        }
    }

    log::error!("giving up on tile {}", coord);
    Err(last_error.unwrap_or_else(|| MapError::Surface(format!("no attempt made for {}", url))))
}

fn fetch_once(client: &Client, url: &str) -> Result<Vec<u8>> {
    let resp = client.get(url).send()?;
    if !resp.status().is_success() {
        return Err(MapError::Http {
            status: resp.status().as_u16(),
            url: url.to_string(),
        });
    }
    Ok(resp.bytes()?.to_vec())
}

/// Body of the tile server's `/health` endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Query `<base_url>/health`
pub fn check_health(base_url: &str) -> Result<HealthStatus> {
    check_health_with(&HTTP_CLIENT, base_url)
}

pub fn check_health_with(client: &Client, base_url: &str) -> Result<HealthStatus> {
    let url = format!("{}/health", base_url.trim_end_matches('/'));
    let resp = client.get(&url).send()?;
    if !resp.status().is_success() {
        return Err(MapError::Http {
            status: resp.status().as_u16(),
            url,
        });
    }
    let status: HealthStatus = resp.json()?;
    log::debug!("tile server health at {}: {}", base_url, status.status);
    Ok(status)
}
