use std::time::{Duration, Instant};

/// Polls a condition until it returns true or the timeout is reached.
///
/// The condition is polled approximately every 1ms. Used by render-loop
/// tests to wait for a spawned loop to reach a state without fixed sleeps.
pub async fn wait_for_condition<F>(
    mut condition: F,
    timeout_duration: Duration,
) -> Result<(), &'static str>
where
    F: FnMut() -> bool,
{
    let start = Instant::now();

    while start.elapsed() < timeout_duration {
        if condition() {
            return Ok(());
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    Err("Condition not met within timeout")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn succeeds_when_condition_met() {
        let mut counter = 0;
        let result = wait_for_condition(
            || {
                counter += 1;
                counter >= 3
            },
            Duration::from_millis(100),
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(counter, 3);
    }

    #[tokio::test]
    async fn fails_on_timeout() {
        let result = wait_for_condition(|| false, Duration::from_millis(10)).await;

        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), "Condition not met within timeout");
    }
}
