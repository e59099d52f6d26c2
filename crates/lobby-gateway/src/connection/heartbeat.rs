//! Heartbeat monitor
//!
//! Periodically writes a liveness probe to one connection until cancelled.
//! Peer replies are not tracked; a dead peer is detected when the probe write fails.

use crate::protocol::OutboundFrame;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use uuid::Uuid;

/// Default probe period
pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(60);

/// Handle to a running probe task
///
/// Dropping the handle also stops the task.
#[derive(Debug)]
pub struct HeartbeatMonitor {
    session_id: Uuid,
    cancel: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl HeartbeatMonitor {
    /// Start probing `sender` every `period`, first probe one period from now
    ///
    /// # Panics
    /// Panics if `period` is zero.
    pub fn start(session_id: Uuid, sender: mpsc::Sender<OutboundFrame>, period: Duration) -> Self {
        let (cancel, mut cancelled) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = &mut cancelled => break,
                    _ = ticker.tick() => {}
                }

                let sent = tokio::select! {
                    biased;
                    _ = &mut cancelled => break,
                    result = sender.send(OutboundFrame::probe()) => result,
                };

                if sent.is_err() {
                    tracing::debug!(session_id = %session_id, "Probe write failed, stopping heartbeat");
                    break;
                }

                tracing::trace!(session_id = %session_id, "Probe sent");
            }
        });

        tracing::debug!(
            session_id = %session_id,
            period_ms = period.as_millis(),
            "Heartbeat started"
        );

        Self {
            session_id,
            cancel,
            handle,
        }
    }

    /// Stop probing and wait for the task to finish
    ///
    /// No probe is written after this returns.
    pub async fn cancel(self) {
        let _ = self.cancel.send(());
        let _ = self.handle.await;

        tracing::debug!(session_id = %self.session_id, "Heartbeat cancelled");
    }

    /// Check if the task has stopped on its own
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
