use std::future::Future;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error};

use crate::api::RecordClient;
use crate::render;

/// Default period between automatic fetches.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(20);

/// Fetch the document every `period` and hand its raw rendering to
/// `on_update` until `shutdown` resolves. The first fetch happens one full
/// period after start. Failed fetches are logged and skipped.
/// Returns the number of successful updates.
pub async fn poll_until<S, F>(client: &RecordClient, period: Duration, shutdown: S, mut on_update: F) -> usize
where
    S: Future<Output = ()>,
    F: FnMut(String),
{
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // `interval` fires immediately; skip that tick.
    ticker.tick().await;

    tokio::pin!(shutdown);
    let mut updates = 0;
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                match client.fetch().await {
                    Ok(doc) => {
                        updates += 1;
                        debug!(updates, "poll fetched document");
                        on_update(render::raw(&doc));
                    }
                    Err(e) => error!(error = %e, "GET request failed"),
                }
            }
        }
    }
    updates
}
