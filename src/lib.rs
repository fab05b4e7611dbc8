//! keytrigger: keystroke sequence trigger detection for event-driven UIs
//!
//! A [`Detector`] watches a live stream of key-press events and fires an
//! edge-triggered callback when the trailing keystrokes complete a
//! configured phrase. The host delivers events through a [`KeySender`]
//! inlet; the detector owns no platform key hook of its own.
//!
//! Two matching modes, selected by configuration:
//! - **Bounded-FIFO** (default): the buffer is capped at the trigger
//!   length, oldest characters dropped first.
//! - **Idle-timeout**: the buffer is cleared after a period of keystroke
//!   inactivity instead of being length-capped.
//!
//! ```no_run
//! use keytrigger::{Detector, DetectorConfig, KeyPress};
//!
//! # async fn demo() -> Result<(), keytrigger::DetectorError> {
//! let mut detector = Detector::new(DetectorConfig::new("tech"), || {
//!     println!("trigger fired");
//! })?;
//!
//! let keys = detector.attach()?;
//! for ch in "tech".chars() {
//!     keys.send(KeyPress::character(ch)).await;
//! }
//! detector.detach().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod detector;
pub mod events;
pub mod input;

pub use config::{ConfigError, DetectorConfig};
pub use detector::{Detector, DetectorError, KeySender};
pub use events::DetectorEvent;
pub use input::{KeyPress, KeyTarget};
