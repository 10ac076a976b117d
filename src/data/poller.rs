//! Optional ownership-status poller (requires the `tokio-runtime` feature).
//!
//! Plays the "external listener" role from the renderer's point of view:
//! each tick fetches the latest full snapshot and hands it to the consumer,
//! which forwards it via [`crate::core::map::MapRenderer::apply_statuses`].

use crate::{
    data::{
        provider::MapDataProvider,
        records::{BaseStatus, ContinentId},
    },
    Result,
};
use std::sync::Arc;
use std::time::Duration;

pub struct StatusPoller<P> {
    provider: Arc<P>,
    interval: Duration,
}

impl<P: MapDataProvider + 'static> StatusPoller<P> {
    pub fn new(provider: Arc<P>, interval: Duration) -> Self {
        Self { provider, interval }
    }

    /// One immediate fetch, no scheduling
    pub async fn poll_once(&self, continent: ContinentId) -> Result<Vec<BaseStatus>> {
        self.provider.statuses(continent).await
    }

    /// Spawns the polling loop; it stops when the receiver is dropped.
    /// Failed fetches are logged and skipped, the next tick retries anyway.
    pub fn spawn(self, continent: ContinentId) -> tokio::sync::mpsc::Receiver<Vec<BaseStatus>> {
        let (tx, rx) = tokio::sync::mpsc::channel(1);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            loop {
                ticker.tick().await;
                match self.provider.statuses(continent).await {
                    Ok(statuses) => {
                        if tx.send(statuses).await.is_err() {
                            break;
                        }
                    }
                    Err(_err) => {
                        #[cfg(feature = "debug")]
                        log::warn!("status poll for continent {continent} failed: {_err}");
                    }
                }
            }
        });
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::records::{Base, Continent, LatticeLink};
    use async_trait::async_trait;

    struct StaticProvider;

    #[async_trait]
    impl MapDataProvider for StaticProvider {
        async fn continents(&self) -> Result<Vec<Continent>> {
            Ok(Vec::new())
        }

        async fn bases(&self, _continent: ContinentId) -> Result<Vec<Base>> {
            Ok(Vec::new())
        }

        async fn lattice(&self, _continent: ContinentId) -> Result<Vec<LatticeLink>> {
            Ok(Vec::new())
        }

        async fn statuses(&self, _continent: ContinentId) -> Result<Vec<BaseStatus>> {
            Ok(vec![BaseStatus {
                base_id: 1,
                faction_id: 2,
                timestamp: 1_700_000_000,
            }])
        }
    }

    #[tokio::test]
    async fn test_spawn_delivers_snapshots() {
        let poller = StatusPoller::new(Arc::new(StaticProvider), Duration::from_millis(10));
        let mut rx = poller.spawn(2);

        let snapshot = rx.recv().await.unwrap();
        assert_eq!(snapshot[0].base_id, 1);

        drop(rx);
    }
}
