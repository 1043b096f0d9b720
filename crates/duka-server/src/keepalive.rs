//! Self-ping loop that keeps free-tier hosts from idling the process out.

use std::time::Duration;

use tokio::time::interval;

/// Free-tier hosts spin the instance down after ~15 idle minutes; pinging
/// every 14 keeps just inside that window.
pub const PING_INTERVAL: Duration = Duration::from_secs(14 * 60);

/// Runs forever; call inside `tokio::spawn`. Failures are logged and the
/// loop carries on, since the next tick may reach a recovered server.
pub async fn run(self_url: String) {
    let client = reqwest::Client::new();
    let target = format!("{}/api/health", self_url.trim_end_matches('/'));

    let mut ticker = interval(PING_INTERVAL);
    // Skip the first immediate tick so the ping starts one interval after boot.
    ticker.tick().await;

    tracing::info!(target: "duka.keepalive", url = %target, "keep-alive pinger started");

    loop {
        ticker.tick().await;
        match client.get(&target).send().await {
            Ok(response) => {
                tracing::debug!(
                    target: "duka.keepalive",
                    url = %target,
                    status = %response.status(),
                    "keep-alive ping"
                );
            }
            Err(e) => {
                tracing::debug!(
                    target: "duka.keepalive",
                    url = %target,
                    error = %e,
                    "keep-alive ping failed"
                );
            }
        }
    }
}
