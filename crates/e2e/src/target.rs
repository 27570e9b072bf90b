//! Target reachability probing
//!
//! The frontend under test is hosted, not spawned by the suite, and a
//! cold-started deployment can take a while to answer. Poll until it
//! responds before spending time launching browsers at it.

use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::{E2eError, E2eResult};

/// Configuration for the target probe
#[derive(Debug, Clone)]
pub struct TargetConfig {
    /// Base URL of the hosted frontend
    pub base_url: String,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// Overall deadline for the target to become reachable
    pub ready_timeout: Duration,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            request_timeout: Duration::from_secs(5),
            ready_timeout: Duration::from_secs(60),
        }
    }
}

/// Wait for the target frontend to answer a GET on its base URL.
pub async fn wait_for_ready(config: &TargetConfig) -> E2eResult<()> {
    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()?;

    let start = std::time::Instant::now();
    let mut attempts = 0usize;

    while start.elapsed() < config.ready_timeout {
        attempts += 1;

        match client.get(&config.base_url).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("Target reachable at {}", config.base_url);
                return Ok(());
            }
            Ok(resp) => {
                warn!("Target returned {}", resp.status());
            }
            Err(e) => {
                if attempts == 1 {
                    info!("Waiting for target {} ...", config.base_url);
                }
                // Connection refused / timeout is expected while a
                // cold deployment spins up.
                if !e.is_connect() && !e.is_timeout() {
                    warn!("Target probe error: {}", e);
                }
            }
        }

        sleep(Duration::from_secs(2)).await;
    }

    Err(E2eError::TargetUnreachable {
        url: config.base_url.clone(),
        attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_target_errors_with_attempt_count() {
        // Reserved TEST-NET-1 address, nothing listens there.
        let config = TargetConfig {
            base_url: "http://192.0.2.1:9".to_string(),
            request_timeout: Duration::from_millis(200),
            ready_timeout: Duration::from_millis(500),
        };

        let err = wait_for_ready(&config).await.unwrap_err();
        match err {
            E2eError::TargetUnreachable { url, attempts } => {
                assert_eq!(url, "http://192.0.2.1:9");
                assert!(attempts >= 1);
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
