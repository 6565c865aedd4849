//! Elapsed-time ticker for the waiting stages

use crate::core::Stage;
use crate::execution::engine::{emit_to, EventHandler, TriggerEvent};
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant};

const TICK: Duration = Duration::from_secs(1);

/// Background task reporting how long a stage has been waiting
///
/// Emits one `StageProgress` event per second. The task is aborted when the
/// ticker is dropped, so holding it for the duration of the stage is enough
/// to guarantee it never outlives the stage.
#[derive(Debug)]
pub struct ProgressTicker {
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    /// Start ticking for `stage`; must be called inside a tokio runtime
    pub fn start(stage: Stage, handlers: Vec<EventHandler>) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + TICK, TICK);
            let mut elapsed_secs: u64 = 0;

            loop {
                ticker.tick().await;
                elapsed_secs += 1;
                emit_to(&handlers, &TriggerEvent::StageProgress { stage, elapsed_secs });
            }
        });

        Self { handle }
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<u64>>>, Vec<EventHandler>) {
        let ticks = Arc::new(Mutex::new(Vec::new()));
        let sink = ticks.clone();
        let handler: EventHandler = Arc::new(move |event: TriggerEvent| {
            if let TriggerEvent::StageProgress { elapsed_secs, .. } = event {
                sink.lock().unwrap().push(elapsed_secs);
            }
        });
        (ticks, vec![handler])
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_second() {
        let (ticks, handlers) = recorder();
        let ticker = ProgressTicker::start(Stage::AwaitStart, handlers);

        time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(*ticks.lock().unwrap(), vec![1, 2, 3]);
        assert!(!ticker.handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_ticks_after_drop() {
        let (ticks, handlers) = recorder();
        let ticker = ProgressTicker::start(Stage::AwaitCompletion, handlers);

        time::sleep(Duration::from_millis(2500)).await;
        drop(ticker);
        time::sleep(Duration::from_secs(5)).await;

        assert_eq!(*ticks.lock().unwrap(), vec![1, 2]);
    }
}
