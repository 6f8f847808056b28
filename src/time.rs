use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::{interval, Interval, MissedTickBehavior};
use tokio_stream::Stream;

/// Source of wall-clock time and repeating ticks.
///
/// The render loop only ever reads "now" and waits for the next tick through
/// this trait, so tests can drive it with a mock clock instead of sleeping.
pub trait Clock: Send + Sync + Clone + 'static {
    type IntervalStream: Stream<Item = ()> + Send + Unpin;

    fn now(&self) -> DateTime<Utc>;
    fn interval(&self, period: Duration) -> Self::IntervalStream;
}

#[derive(Clone, Debug)]
pub struct SystemClock;

impl Clock for SystemClock {
    type IntervalStream = SystemIntervalStream;

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn interval(&self, period: Duration) -> Self::IntervalStream {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        SystemIntervalStream { interval }
    }
}

pub struct SystemIntervalStream {
    interval: Interval,
}

impl Stream for SystemIntervalStream {
    type Item = ();

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.interval.poll_tick(cx) {
            Poll::Ready(_) => Poll::Ready(Some(())),
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::task::Waker;

    /// A clock whose time only moves when a test calls [`MockClock::advance`].
    #[derive(Clone)]
    pub struct MockClock {
        state: Arc<Mutex<MockClockState>>,
    }

    struct MockClockState {
        current_time: DateTime<Utc>,
        intervals: Vec<Arc<Mutex<MockIntervalState>>>,
    }

    struct MockIntervalState {
        next_tick: DateTime<Utc>,
        period: chrono::Duration,
        pending_waker: Option<Waker>,
    }

    impl MockClock {
        pub fn new(start: DateTime<Utc>) -> Self {
            Self {
                state: Arc::new(Mutex::new(MockClockState {
                    current_time: start,
                    intervals: Vec::new(),
                })),
            }
        }

        pub fn advance(&self, duration: Duration) {
            let mut state = self.state.lock().unwrap();
            state.current_time += chrono::Duration::from_std(duration).unwrap();
            let current_time = state.current_time;

            // Wake any interval that is now due; the stream itself decides
            // how many ticks to hand out when it gets polled.
            for interval_state in &state.intervals {
                let mut interval = interval_state.lock().unwrap();
                if interval.next_tick <= current_time {
                    if let Some(waker) = interval.pending_waker.take() {
                        waker.wake();
                    }
                }
            }
        }

        pub fn set_time(&self, time: DateTime<Utc>) {
            let mut state = self.state.lock().unwrap();
            state.current_time = time;
        }
    }

    impl Clock for MockClock {
        type IntervalStream = MockIntervalStream;

        fn now(&self) -> DateTime<Utc> {
            self.state.lock().unwrap().current_time
        }

        fn interval(&self, period: Duration) -> Self::IntervalStream {
            let period = chrono::Duration::from_std(period).unwrap();
            let interval_state = Arc::new(Mutex::new(MockIntervalState {
                next_tick: self.now() + period,
                period,
                pending_waker: None,
            }));

            self.state
                .lock()
                .unwrap()
                .intervals
                .push(interval_state.clone());

            MockIntervalStream {
                clock: self.clone(),
                state: interval_state,
            }
        }
    }

    pub struct MockIntervalStream {
        clock: MockClock,
        state: Arc<Mutex<MockIntervalState>>,
    }

    impl Stream for MockIntervalStream {
        type Item = ();

        fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
            let current_time = self.clock.now();
            let mut state = self.state.lock().unwrap();

            if current_time >= state.next_tick {
                // Missed ticks collapse into one, matching the skip behavior
                // of the system interval.
                let period = state.period;
                state.next_tick = current_time + period;
                Poll::Ready(Some(()))
            } else {
                state.pending_waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}
