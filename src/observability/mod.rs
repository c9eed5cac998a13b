//! Observability
//!
//! Structured one-line JSON logs for transform and validation events.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on transform results
//! 3. No async or background threads
//!
//! # Usage
//!
//! ```ignore
//! use venue_models::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::MalformedInput, &[("entity", "ledger_entry")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

#[cfg(test)]
pub(crate) use logger::capture_events;

/// Log a lifecycle event at its default severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // Verifies no panic
        log_event(Event::CommandBegin);
        log_event(Event::CommandComplete);
    }

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::MalformedInput, &[("entity", "ledger_entry"), ("shape", "bool")]);
    }
}
