use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationUnit {
    Minutes,
    Hours,
    Days,
}

impl DurationUnit {
    fn hours_per_unit(self) -> f64 {
        match self {
            DurationUnit::Minutes => 1.0 / 60.0,
            DurationUnit::Hours => 1.0,
            DurationUnit::Days => 24.0,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            DurationUnit::Minutes => "min",
            DurationUnit::Hours => "h",
            DurationUnit::Days => "days",
        }
    }
}

/// Declared duration of a process step, parsed once when the catalog is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepDuration {
    pub magnitude: f64,
    pub unit: DurationUnit,
}

impl Default for StepDuration {
    fn default() -> Self {
        Self::zero()
    }
}

impl StepDuration {
    pub fn new(magnitude: f64, unit: DurationUnit) -> Self {
        Self { magnitude, unit }
    }

    pub fn zero() -> Self {
        Self {
            magnitude: 0.0,
            unit: DurationUnit::Hours,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude == 0.0
    }

    pub fn as_hours(&self) -> f64 {
        self.magnitude * self.unit.hours_per_unit()
    }

    pub fn as_minutes(&self) -> f64 {
        self.as_hours() * 60.0
    }

    /// Parses a free-text magnitude such as `"8"`, `"(8)"`, `"8h"` or `"7 days"`.
    ///
    /// Returns `None` when no number can be recovered; callers treat that as zero.
    pub fn parse_magnitude(raw: &str) -> Option<f64> {
        let cleaned: String = raw
            .chars()
            .filter(|c| !matches!(c, '(' | ')' | ' ' | '\t'))
            .collect();
        let numeric: String = cleaned
            .chars()
            .take_while(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
            .collect();
        let value = numeric.parse::<f64>().ok()?;
        if value.is_finite() && value >= 0.0 {
            Some(value)
        } else {
            None
        }
    }
}

impl fmt::Display for StepDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.magnitude, self.unit.suffix())
    }
}
