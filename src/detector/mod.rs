//! Keystroke trigger detector
//!
//! Two layers: a synchronous matching core (buffer plus filters) and an
//! attach/detach lifecycle that runs the core inside an owned tokio task.

mod listener;
mod machine;

pub use listener::{Detector, DetectorError, KeySender};
