//! Input event surface for host UI runtimes
//!
//! Hosts translate their native keyboard events into [`KeyPress`] values
//! and deliver them through the detector's key inlet.

mod keys;

pub use keys::{KeyPress, KeyTarget};
