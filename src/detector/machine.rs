//! Core matching state machine
//!
//! Holds the pending keystroke buffer and decides, per key event, whether
//! the trigger phrase just completed. Purely synchronous: the idle timer
//! that drives [`DetectorCore::reset`] in idle-timeout mode lives in the
//! listener task, not here.

use tracing::{debug, trace};

use crate::config::DetectorConfig;
use crate::input::KeyPress;

/// Outcome of feeding one key event into the core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyOutcome {
    /// Event was filtered out; buffer and timer untouched
    Ignored,
    /// Key was appended but the phrase is not complete
    Buffered,
    /// The phrase completed; buffer has been cleared
    Matched,
}

/// The per-attachment matching state
pub(crate) struct DetectorCore {
    /// The trigger phrase, lowercased at construction
    trigger: String,
    /// Trigger length in characters, the FIFO buffer cap
    trigger_chars: usize,
    /// Pending lowercased keystrokes
    buffer: String,
    /// Idle-timeout mode: buffer grows until reset, match on trailing text
    idle_mode: bool,
    ignore_editable: bool,
    single_char_only: bool,
}

impl DetectorCore {
    pub fn new(config: &DetectorConfig) -> Self {
        let trigger = config.trigger.to_lowercase();
        let trigger_chars = trigger.chars().count();
        Self {
            trigger,
            trigger_chars,
            buffer: String::new(),
            idle_mode: config.idle_timeout.is_some(),
            ignore_editable: config.ignore_editable_targets,
            single_char_only: config.single_char_keys_effective(),
        }
    }

    /// The lowercased trigger phrase
    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    /// Feed one key event through the filters and the buffer
    pub fn handle_key(&mut self, press: &KeyPress) -> KeyOutcome {
        if self.ignore_editable && press.target().is_editable() {
            trace!(key = press.key(), target = ?press.target(), "ignoring editable-target key");
            return KeyOutcome::Ignored;
        }

        if self.single_char_only && !press.is_single_char() {
            trace!(key = press.key(), "ignoring multi-character key");
            return KeyOutcome::Ignored;
        }

        self.buffer.push_str(&press.token());
        if !self.idle_mode {
            self.truncate_front();
        }

        let matched = if self.idle_mode {
            self.buffer.ends_with(&self.trigger)
        } else {
            self.buffer == self.trigger
        };

        if matched {
            debug!(trigger = %self.trigger, "trigger phrase completed");
            self.buffer.clear();
            KeyOutcome::Matched
        } else {
            KeyOutcome::Buffered
        }
    }

    /// Discard the pending buffer (idle timer fired, or detaching)
    pub fn reset(&mut self) {
        if !self.buffer.is_empty() {
            debug!(pending = self.buffer.len(), "clearing keystroke buffer");
        }
        self.buffer.clear();
    }

    /// Drop leading characters so the buffer never exceeds the trigger length
    fn truncate_front(&mut self) {
        let len = self.buffer.chars().count();
        if len > self.trigger_chars {
            let drop = len - self.trigger_chars;
            if let Some((cut, _)) = self.buffer.char_indices().nth(drop) {
                self.buffer.drain(..cut);
            }
        }
    }

    #[cfg(test)]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyTarget;
    use std::time::Duration;

    fn fifo_core(trigger: &str) -> DetectorCore {
        DetectorCore::new(&DetectorConfig::new(trigger))
    }

    fn idle_core(trigger: &str) -> DetectorCore {
        DetectorCore::new(
            &DetectorConfig::new(trigger).with_idle_timeout(Duration::from_millis(500)),
        )
    }

    fn feed(core: &mut DetectorCore, text: &str) -> usize {
        text.chars()
            .filter(|ch| core.handle_key(&KeyPress::character(*ch)) == KeyOutcome::Matched)
            .count()
    }

    #[test]
    fn test_exact_phrase_fires_once() {
        let mut core = fifo_core("tech");
        assert_eq!(feed(&mut core, "tech"), 1);
        assert!(core.buffer().is_empty());
    }

    #[test]
    fn test_leading_noise_retained_tail_fires() {
        // FIFO keeps only the last four characters, so "xtech" still matches
        let mut core = fifo_core("tech");
        assert_eq!(feed(&mut core, "xtech"), 1);
    }

    #[test]
    fn test_case_insensitive_matching() {
        let mut core = fifo_core("tech");
        assert_eq!(feed(&mut core, "TeCh"), 1);

        let mut core = DetectorCore::new(&DetectorConfig::new("TECH"));
        assert_eq!(feed(&mut core, "tech"), 1);
    }

    #[test]
    fn test_no_overlapping_retrigger() {
        // Clearing on match means "ababab" completes "abab" only once
        let mut core = fifo_core("abab");
        assert_eq!(feed(&mut core, "ababab"), 1);
    }

    #[test]
    fn test_repeated_phrase_fires_per_occurrence() {
        let mut core = fifo_core("tech");
        assert_eq!(feed(&mut core, "techtech"), 2);
    }

    #[test]
    fn test_editable_target_keys_do_not_touch_buffer() {
        let mut core = fifo_core("tech");
        feed(&mut core, "te");

        let outcome = core.handle_key(&KeyPress::new("c", KeyTarget::TextInput));
        assert_eq!(outcome, KeyOutcome::Ignored);
        assert_eq!(core.buffer(), "te");

        // The clean remainder still completes the phrase
        assert_eq!(feed(&mut core, "ch"), 1);
    }

    #[test]
    fn test_editable_filter_disabled() {
        let config = DetectorConfig::new("tech").ignore_editable_targets(false);
        let mut core = DetectorCore::new(&config);
        feed(&mut core, "tec");
        let outcome = core.handle_key(&KeyPress::new("h", KeyTarget::TextArea));
        assert_eq!(outcome, KeyOutcome::Matched);
    }

    #[test]
    fn test_multi_char_keys_filtered_in_fifo_mode() {
        let mut core = fifo_core("tech");
        feed(&mut core, "te");
        assert_eq!(
            core.handle_key(&KeyPress::new("Shift", KeyTarget::Page)),
            KeyOutcome::Ignored
        );
        assert_eq!(feed(&mut core, "ch"), 1);
    }

    #[test]
    fn test_multi_char_keys_pollute_idle_buffer() {
        // Idle-timeout mode appends key names as literal tokens by default
        let mut core = idle_core("tech");
        feed(&mut core, "tec");
        assert_eq!(
            core.handle_key(&KeyPress::new("Shift", KeyTarget::Page)),
            KeyOutcome::Buffered
        );
        assert_eq!(core.buffer(), "tecshift");

        // No fire from the now-polluted prefix, but a full phrase appended
        // afterwards still matches on the trailing text
        assert_eq!(feed(&mut core, "h"), 0);
        assert_eq!(feed(&mut core, "tech"), 1);
        assert!(core.buffer().is_empty());
    }

    #[test]
    fn test_idle_mode_trailing_match_without_truncation() {
        let mut core = idle_core("tech");
        assert_eq!(feed(&mut core, "xxxtech"), 1);
    }

    #[test]
    fn test_reset_discards_partial_phrase() {
        let mut core = idle_core("tech");
        feed(&mut core, "tec");
        core.reset();
        assert_eq!(feed(&mut core, "h"), 0);
        assert_eq!(feed(&mut core, "tech"), 1);
    }

    #[test]
    fn test_single_char_trigger() {
        let mut core = fifo_core("q");
        assert_eq!(feed(&mut core, "abqcq"), 2);
    }
}
