//! Message priority and the headers that carry it

use std::{error::Error, fmt};

use lettre::message::header::{Header, HeaderName, HeaderValue};

/// Priority / importance of a message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Priority {
    /// Low priority
    Low,

    /// No priority headers are emitted
    #[default]
    Normal,

    /// High priority
    High,
}

impl Priority {
    fn parse_x_priority(s: &str) -> Result<Self, Box<dyn Error + Send + Sync>> {
        match s.trim().chars().next() {
            Some('1' | '2') => Ok(Self::High),
            Some('3') => Ok(Self::Normal),
            Some('4' | '5') => Ok(Self::Low),
            _ => Err(format!("unknown priority '{s}'").into()),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "1 (Highest)"),
            Self::Normal => write!(f, "3 (Normal)"),
            Self::Low => write!(f, "5 (Lowest)"),
        }
    }
}

/// The `X-Priority` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XPriority(pub Priority);

impl Header for XPriority {
    fn name() -> HeaderName {
        HeaderName::new_from_ascii_str("X-Priority")
    }

    fn parse(s: &str) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Priority::parse_x_priority(s).map(Self)
    }

    fn display(&self) -> HeaderValue {
        HeaderValue::new(Self::name(), self.0.to_string())
    }
}

/// The `Importance` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Importance(pub Priority);

impl Header for Importance {
    fn name() -> HeaderName {
        HeaderName::new_from_ascii_str("Importance")
    }

    fn parse(s: &str) -> Result<Self, Box<dyn Error + Send + Sync>> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self(Priority::High)),
            "normal" => Ok(Self(Priority::Normal)),
            "low" => Ok(Self(Priority::Low)),
            _ => Err(format!("unknown importance '{s}'").into()),
        }
    }

    fn display(&self) -> HeaderValue {
        let importance = match self.0 {
            Priority::High => "high",
            Priority::Normal => "normal",
            Priority::Low => "low",
        };

        HeaderValue::new(Self::name(), importance.to_string())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_x_priority_display() {
        assert_eq!(Priority::High.to_string(), "1 (Highest)");
        assert_eq!(Priority::Low.to_string(), "5 (Lowest)");
    }

    #[test]
    fn test_x_priority_parse() -> TestResult {
        assert_eq!(XPriority::parse("1 (Highest)")?, XPriority(Priority::High));
        assert_eq!(XPriority::parse("3")?, XPriority(Priority::Normal));
        assert_eq!(XPriority::parse("5 (Lowest)")?, XPriority(Priority::Low));
        assert!(XPriority::parse("urgent").is_err());

        Ok(())
    }

    #[test]
    fn test_importance_parse() -> TestResult {
        assert_eq!(Importance::parse("High")?, Importance(Priority::High));
        assert!(Importance::parse("whenever").is_err());

        Ok(())
    }
}
