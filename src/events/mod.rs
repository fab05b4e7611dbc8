//! Notification events emitted by a detector
//!
//! Subscribers receive these over a broadcast channel, in addition to the
//! synchronous `on_trigger` callback. Serializable so hosts can forward
//! them over whatever transport they already speak.

use serde::{Deserialize, Serialize};

/// Events emitted by a detector during its attached lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DetectorEvent {
    /// The trigger phrase was completed
    TriggerFired {
        /// The configured phrase, lowercased
        trigger: String,
    },

    /// The buffer was cleared after keystroke inactivity (idle-timeout mode)
    IdleReset {
        /// The configured inactivity window in milliseconds
        idle_ms: u64,
    },

    /// The detector task stopped and discarded its state
    Detached,
}

impl std::fmt::Display for DetectorEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectorEvent::TriggerFired { trigger } => {
                write!(f, "TRIGGER_FIRED ({})", trigger)
            }
            DetectorEvent::IdleReset { idle_ms } => {
                write!(f, "IDLE_RESET ({}ms)", idle_ms)
            }
            DetectorEvent::Detached => write!(f, "DETACHED"),
        }
    }
}
