//! Observable events
//!
//! Events are explicit and typed so that log consumers can match on stable
//! names rather than free-form messages.

use std::fmt;

use super::logger::Severity;

/// Observable events in the transform engine and CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Command lifecycle
    /// CLI command begins
    CommandBegin,
    /// CLI command complete
    CommandComplete,

    // Transform
    /// Input normalized into canonical records
    NormalizeComplete,
    /// Input shape was not array-like or object-like and was degraded to an empty record
    MalformedInput,
    /// A record value had the wrong JSON type for the typed instance member
    FieldTypeDropped,
    /// Records serialized into the positional wire form
    SerializeComplete,

    // Validation
    /// Validation passed
    ValidationPassed,
    /// Validation reported a violation
    ValidationFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::CommandBegin => "COMMAND_BEGIN",
            Event::CommandComplete => "COMMAND_COMPLETE",
            Event::NormalizeComplete => "NORMALIZE_COMPLETE",
            Event::MalformedInput => "MALFORMED_INPUT",
            Event::FieldTypeDropped => "FIELD_TYPE_DROPPED",
            Event::SerializeComplete => "SERIALIZE_COMPLETE",
            Event::ValidationPassed => "VALIDATION_PASSED",
            Event::ValidationFailed => "VALIDATION_FAILED",
        }
    }

    /// Returns the severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::MalformedInput | Event::FieldTypeDropped => Severity::Warn,
            Event::ValidationFailed => Severity::Info,
            Event::NormalizeComplete | Event::SerializeComplete | Event::ValidationPassed => {
                Severity::Trace
            }
            Event::ConfigLoaded | Event::CommandBegin | Event::CommandComplete => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_screaming_snake_case() {
        let events = [
            Event::ConfigLoaded,
            Event::CommandBegin,
            Event::CommandComplete,
            Event::NormalizeComplete,
            Event::MalformedInput,
            Event::FieldTypeDropped,
            Event::SerializeComplete,
            Event::ValidationPassed,
            Event::ValidationFailed,
        ];

        for event in events {
            let name = event.as_str();
            assert!(name.chars().all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_degraded_input_is_warn() {
        assert_eq!(Event::MalformedInput.severity(), Severity::Warn);
        assert_eq!(Event::FieldTypeDropped.severity(), Severity::Warn);
    }
}
