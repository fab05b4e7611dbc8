//! Detector handle and attached task
//!
//! [`Detector`] owns the attach/detach lifecycle. While attached, a single
//! tokio task consumes key presses from an mpsc channel, drives the
//! matching core, and owns the idle-reset deadline. Detaching shuts the
//! task down deterministically: no callback or buffer mutation can happen
//! after `detach` returns.

use std::future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, info};

use crate::config::{ConfigError, DetectorConfig};
use crate::events::DetectorEvent;
use crate::input::KeyPress;

use super::machine::{DetectorCore, KeyOutcome};

/// Errors from detector construction and lifecycle operations
#[derive(Debug, thiserror::Error)]
pub enum DetectorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("detector is already attached")]
    AlreadyAttached,
}

/// Host-side inlet for delivering key press events to an attached detector.
///
/// Cheap to clone. After the detector detaches, deliveries are silently
/// dropped; a stale inlet is never an error.
#[derive(Debug, Clone)]
pub struct KeySender {
    tx: mpsc::Sender<KeyPress>,
}

impl KeySender {
    /// Deliver one key press event
    pub async fn send(&self, press: KeyPress) {
        if self.tx.send(press).await.is_err() {
            debug!("detector detached, key press dropped");
        }
    }

    /// Deliver one key press event from outside the async runtime
    pub fn blocking_send(&self, press: KeyPress) {
        if self.tx.blocking_send(press).is_err() {
            debug!("detector detached, key press dropped");
        }
    }
}

/// A keystroke trigger detector.
///
/// Created detached. [`attach`](Detector::attach) spawns the observer task
/// and hands back the key inlet; [`detach`](Detector::detach) stops it and
/// discards all buffer state. Dropping the detector tears the task down as
/// well, via the closed shutdown channel.
pub struct Detector {
    config: DetectorConfig,
    on_trigger: Arc<dyn Fn() + Send + Sync>,
    event_tx: broadcast::Sender<DetectorEvent>,
    attached: Arc<AtomicBool>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl Detector {
    /// Create a detached detector.
    ///
    /// `on_trigger` is invoked exactly once, synchronously within event
    /// processing, each time the trigger phrase completes. Fails fast on an
    /// empty trigger phrase.
    pub fn new(
        config: DetectorConfig,
        on_trigger: impl Fn() + Send + Sync + 'static,
    ) -> Result<Self, DetectorError> {
        config.validate()?;
        let (event_tx, _) = broadcast::channel(64);

        Ok(Self {
            config,
            on_trigger: Arc::new(on_trigger),
            event_tx,
            attached: Arc::new(AtomicBool::new(false)),
            shutdown_tx: None,
            task: None,
        })
    }

    /// Subscribe to detector notification events
    pub fn subscribe(&self) -> broadcast::Receiver<DetectorEvent> {
        self.event_tx.subscribe()
    }

    /// Whether the observer task is currently installed
    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    /// Begin listening: spawn the observer task and return the key inlet.
    ///
    /// Each attachment starts from an empty buffer. A second `attach`
    /// without an intervening `detach` fails; duplicate observers cannot
    /// exist for one detector instance.
    pub fn attach(&mut self) -> Result<KeySender, DetectorError> {
        if self.attached.swap(true, Ordering::SeqCst) {
            return Err(DetectorError::AlreadyAttached);
        }

        let (key_tx, key_rx) = mpsc::channel(32);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let core = DetectorCore::new(&self.config);
        let idle_timeout = self.config.idle_timeout;
        let on_trigger = Arc::clone(&self.on_trigger);
        let event_tx = self.event_tx.clone();

        let task = tokio::spawn(run_detector(
            core,
            idle_timeout,
            key_rx,
            shutdown_rx,
            on_trigger,
            event_tx,
        ));

        info!(trigger = %self.config.trigger, "detector attached");

        self.shutdown_tx = Some(shutdown_tx);
        self.task = Some(task);
        Ok(KeySender { tx: key_tx })
    }

    /// Stop listening and discard buffer state.
    ///
    /// Waits for the observer task to exit, so no callback invocation or
    /// buffer mutation can occur after this returns. No-op when detached.
    pub async fn detach(&mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
            info!("detector detached");
        }
        self.attached.store(false, Ordering::SeqCst);
    }
}

/// The observer task: one per attachment, owns all mutable state
async fn run_detector(
    mut core: DetectorCore,
    idle_timeout: Option<std::time::Duration>,
    mut key_rx: mpsc::Receiver<KeyPress>,
    mut shutdown_rx: oneshot::Receiver<()>,
    on_trigger: Arc<dyn Fn() + Send + Sync>,
    event_tx: broadcast::Sender<DetectorEvent>,
) {
    // Single deadline slot: rescheduling replaces any pending timer, so two
    // timers never coexist for one attachment.
    let mut idle_deadline: Option<Instant> = None;

    debug!("detector task started");

    loop {
        let deadline = idle_deadline;
        let idle_timer = async move {
            match deadline {
                Some(deadline) => time::sleep_until(deadline).await,
                None => future::pending().await,
            }
        };

        tokio::select! {
            _ = &mut shutdown_rx => {
                break;
            }

            _ = idle_timer => {
                core.reset();
                idle_deadline = None;
                if let Some(timeout) = idle_timeout {
                    debug!(idle_ms = timeout.as_millis() as u64, "idle timeout elapsed");
                    let _ = event_tx.send(DetectorEvent::IdleReset {
                        idle_ms: timeout.as_millis() as u64,
                    });
                }
            }

            maybe_press = key_rx.recv() => {
                let Some(press) = maybe_press else {
                    debug!("key channel closed");
                    break;
                };

                match core.handle_key(&press) {
                    KeyOutcome::Ignored => {}
                    KeyOutcome::Buffered => {
                        if let Some(timeout) = idle_timeout {
                            idle_deadline = Some(Instant::now() + timeout);
                        }
                    }
                    KeyOutcome::Matched => {
                        idle_deadline = None;
                        info!(trigger = %core.trigger(), "trigger fired");
                        on_trigger();
                        let _ = event_tx.send(DetectorEvent::TriggerFired {
                            trigger: core.trigger().to_string(),
                        });
                    }
                }
            }
        }
    }

    core.reset();
    let _ = event_tx.send(DetectorEvent::Detached);
    debug!("detector task stopped");
}
