/// Where a reading sits relative to a sensor's range and alert thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadingLevel {
    Normal,
    Low,
    High,
    /// Outside the sensor's physical min/max, or not a finite number
    OutOfRange,
}

impl ReadingLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingLevel::Normal => "normal",
            ReadingLevel::Low => "low",
            ReadingLevel::High => "high",
            ReadingLevel::OutOfRange => "out_of_range",
        }
    }

    pub fn is_alert(&self) -> bool {
        !matches!(self, ReadingLevel::Normal)
    }
}

/// Range and thresholds used to classify a value; every bound is optional
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorLimits {
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub threshold_low: Option<f64>,
    pub threshold_high: Option<f64>,
}

pub fn classify_reading(value: f64, limits: &SensorLimits) -> ReadingLevel {
    if !value.is_finite() {
        return ReadingLevel::OutOfRange;
    }
    if limits.min_value.is_some_and(|min| value < min)
        || limits.max_value.is_some_and(|max| value > max)
    {
        return ReadingLevel::OutOfRange;
    }
    if limits.threshold_low.is_some_and(|low| value < low) {
        return ReadingLevel::Low;
    }
    if limits.threshold_high.is_some_and(|high| value > high) {
        return ReadingLevel::High;
    }
    ReadingLevel::Normal
}

/// Number of trailing identical values that marks a stuck sensor
pub const FLATLINE_WINDOW: usize = 6;

/// True when the last six values are identical
pub fn is_flatlined(recent_values: &[f64]) -> bool {
    if recent_values.len() < FLATLINE_WINDOW {
        return false;
    }
    let window = &recent_values[recent_values.len() - FLATLINE_WINDOW..];
    let first = window[0];
    window.iter().all(|&v| (v - first).abs() < 0.001)
}
