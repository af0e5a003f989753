use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

use crate::table::EntryTable;

/// Handle to the background task that evicts expired entries.
///
/// The task owns only the entry table, never the handle, so dropping the
/// handle (or calling [`Sweeper::stop`]) ends the task.
#[derive(Debug)]
pub(crate) struct Sweeper {
    shutdown_tx: watch::Sender<bool>,
}

impl Sweeper {
    /// Spawns the sweep loop on the current Tokio runtime.
    pub(crate) fn start(table: Arc<EntryTable>, interval: Duration) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        // tokio::time::interval panics on a zero period
        let interval = interval.max(Duration::from_millis(1));

        tokio::spawn(Self::run(table, interval, shutdown_rx));

        Self { shutdown_tx }
    }

    async fn run(table: Arc<EntryTable>, interval: Duration, mut shutdown_rx: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let evicted = table.evict_expired();
                    if evicted > 0 {
                        debug!(evicted, "Swept expired entries");
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        trace!("Sweeper stopped");
    }

    pub(crate) fn stop(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sweeper_evicts_expired_entries() {
        let table = Arc::new(EntryTable::new());
        let _sweeper = Sweeper::start(Arc::clone(&table), Duration::from_millis(20));

        table.insert_expired("expire1", "value1");
        table.insert_expired("expire2", "value2");
        table.put("keep", Some("value3"), 60_000);
        assert_eq!(table.stored_len(), 3);

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(table.stored_len(), 1);
    }

    #[tokio::test]
    async fn test_stop_halts_sweeping() {
        let table = Arc::new(EntryTable::new());
        let sweeper = Sweeper::start(Arc::clone(&table), Duration::from_millis(10));

        sweeper.stop();
        tokio::time::sleep(Duration::from_millis(30)).await;

        table.insert_expired("expired", "value");
        tokio::time::sleep(Duration::from_millis(50)).await;

        // Still physically present: nothing swept it
        assert_eq!(table.stored_len(), 1);
    }

    #[tokio::test]
    async fn test_drop_releases_table() {
        let table = Arc::new(EntryTable::new());
        let sweeper = Sweeper::start(Arc::clone(&table), Duration::from_millis(10));
        assert_eq!(Arc::strong_count(&table), 2);

        drop(sweeper);
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(Arc::strong_count(&table), 1);
    }

    #[tokio::test]
    async fn test_zero_interval_does_not_panic() {
        let table = Arc::new(EntryTable::new());
        let _sweeper = Sweeper::start(Arc::clone(&table), Duration::ZERO);

        table.insert_expired("expired", "value");
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert_eq!(table.stored_len(), 0);
    }
}
