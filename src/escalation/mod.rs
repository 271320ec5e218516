//! Breach escalation tracker
//!
//! Consecutive-violation counting per monitored key. Any monitor can feed it a
//! stream of [`BreachEvent`]s; a key escalates `normal -> warning -> alert`
//! after `alert_threshold` uninterrupted violations and resets on the first
//! clean check.
//!
//! # Example
//!
//! ```
//! use vigilar::config::EscalationConfig;
//! use vigilar::escalation::{BreachEvent, BreachStatus, BreachTracker};
//!
//! let mut tracker = BreachTracker::new(EscalationConfig::default(), 100);
//! assert!(tracker.record(BreachEvent::now("drift:amount", true)).is_none());
//! assert!(tracker.record(BreachEvent::now("drift:amount", true)).is_none());
//! let alert = tracker.record(BreachEvent::now("drift:amount", true));
//! assert!(alert.is_some());
//! assert_eq!(tracker.state("drift:amount").status, BreachStatus::Alert);
//! ```

mod tracker;
mod types;


pub use tracker::BreachTracker;
pub use types::{Alert, BreachEvent, BreachState, BreachStatus};
