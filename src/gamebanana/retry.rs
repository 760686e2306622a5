use std::future::Future;
use std::time::Duration;

/// Fixed attempt ceiling with a fixed delay between attempts. Every network
/// call site in the indexer (listing page, detail fetch, package download)
/// runs under one of these.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: u32, delay: Duration) -> Self {
        RetryPolicy {
            attempts: attempts.max(1),
            delay,
        }
    }

    /// Runs `op` until it succeeds or the attempt ceiling is reached,
    /// returning the last error on exhaustion.
    pub async fn run<T, E, F, Fut>(&self, what: &str, mut op: F) -> Result<T, E>
    where
        E: std::fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.attempts => {
                    log::warn!(
                        "{} failed (attempt {}/{}), retrying: {}",
                        what,
                        attempt,
                        self.attempts,
                        e
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    log::warn!(
                        "{} failed (attempt {}/{}), giving up: {}",
                        what,
                        attempt,
                        self.attempts,
                        e
                    );
                    return Err(e);
                }
            }
        }
    }
}
