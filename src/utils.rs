use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use backoff::{future::retry, ExponentialBackoff};
use log::warn;

/// How often and how patiently the transport layer retries a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// retries after the first attempt
    pub retry_times: usize,
    pub initial_interval: Duration,
    pub max_interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}

impl RetryPolicy {
    pub fn new(retry_times: usize) -> Self {
        Self {
            retry_times,
            initial_interval: Duration::from_millis(1000),
            max_interval: Duration::from_millis(5000),
        }
    }

    #[inline]
    fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            initial_interval: self.initial_interval,
            max_interval: self.max_interval,
            ..Default::default()
        }
    }
}

/// Retry a function until it succeeds or `policy.retry_times` retries are used up.
pub async fn retry_wrapper<I, E, F, Fut>(policy: RetryPolicy, f: F) -> Result<I, E>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<I, E>>,
    E: Display,
{
    retry_unless(policy, |_| false, f).await
}

/// Like [`retry_wrapper`], but gives up at once on errors `is_permanent` accepts.
pub async fn retry_unless<I, E, F, Fut, P>(policy: RetryPolicy, is_permanent: P, f: F) -> Result<I, E>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<I, E>>,
    E: Display,
    P: Fn(&E) -> bool,
{
    let attempts = AtomicUsize::new(0);
    retry(policy.backoff(), || async {
        let times = attempts.fetch_add(1, Ordering::AcqRel) + 1;
        if times > 1 {
            warn!("retrying for the {} time", times - 1);
        }
        f().await
            .map_err(|err| {
                warn!("attempt {} failed: {}", times, err);
                if is_permanent(&err) {
                    return backoff::Error::permanent(err);
                }
                map_to_backoff_err(err, times, policy.retry_times)
            })
    })
        .await
}

fn map_to_backoff_err<E>(err: E, attempt: usize, retry_times: usize) -> backoff::Error<E> {
    if attempt > retry_times {
        backoff::Error::permanent(err)
    } else {
        backoff::Error::transient(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_policy(retry_times: usize) -> RetryPolicy {
        RetryPolicy {
            retry_times,
            initial_interval: Duration::from_millis(1),
            max_interval: Duration::from_millis(5),
        }
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let calls = AtomicUsize::new(0);
        let result = retry_wrapper(fast_policy(3), || async {
            match calls.fetch_add(1, Ordering::SeqCst) {
                0 | 1 => Err("not yet"),
                n => Ok(n),
            }
        })
            .await;
        assert_eq!(result, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_retry_times() {
        let calls = AtomicUsize::new(0);
        let result: Result<(), _> = retry_wrapper(fast_policy(1), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err("down")
        })
            .await;
        assert_eq!(result, Err("down"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn permanent_errors_are_not_retried() {
        let calls = AtomicUsize::new(0);
        let result: Result<(), _> = retry_unless(fast_policy(5), |err: &&str| *err == "gone", || async {
            match calls.fetch_add(1, Ordering::SeqCst) {
                0 => Err("busy"),
                _ => Err("gone"),
            }
        })
            .await;
        assert_eq!(result, Err("gone"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn zero_retries_is_a_single_attempt() {
        let calls = AtomicUsize::new(0);
        let result: Result<(), _> = retry_wrapper(fast_policy(0), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err("down")
        })
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
