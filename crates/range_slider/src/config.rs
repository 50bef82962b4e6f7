//! Slider bounds, step and the disabled flag.
//!
//! Hosts usually receive these as markup attributes, so each field has a
//! tolerant `parse_*` helper next to the strict [`RangeConfig::new`].

use std::fmt;

const DEFAULT_STEP: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub disabled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RangeConfigError {
    NonFiniteBound { name: &'static str, value: f64 },
    MissingBound { name: &'static str },
    EmptyRange { value: f64 },
    InvalidStep { step: f64 },
}

impl fmt::Display for RangeConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeConfigError::NonFiniteBound { name, value } => {
                write!(f, "{name} bound must be finite, got {value}")
            }
            RangeConfigError::MissingBound { name } => {
                write!(f, "{name} bound is missing or not a number")
            }
            RangeConfigError::EmptyRange { value } => {
                write!(f, "min and max are both {value}; the range is empty")
            }
            RangeConfigError::InvalidStep { step } => {
                write!(f, "step must be positive and finite, got {step}")
            }
        }
    }
}

impl std::error::Error for RangeConfigError {}

impl RangeConfig {
    /// Validated configuration. `min` may be greater than `max`; the slider
    /// then counts down from left to right.
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self, RangeConfigError> {
        check_bounds(min, max)?;
        if !(step.is_finite() && step > 0.0) {
            return Err(RangeConfigError::InvalidStep { step });
        }
        Ok(Self {
            min,
            max,
            step,
            disabled: false,
        })
    }

    /// Build from raw attribute values. Bounds are required; step and
    /// disabled fall back to their tolerant defaults.
    pub fn from_attributes(
        min: Option<&str>,
        max: Option<&str>,
        step: Option<&str>,
        disabled: Option<&str>,
    ) -> Result<Self, RangeConfigError> {
        let min = parse_bound(min).ok_or(RangeConfigError::MissingBound { name: "min" })?;
        let max = parse_bound(max).ok_or(RangeConfigError::MissingBound { name: "max" })?;
        let mut config = Self::new(min, max, parse_step(step))?;
        config.disabled = parse_disabled(disabled);
        Ok(config)
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Distance between the bounds, always positive.
    #[inline]
    pub fn span(&self) -> f64 {
        (self.max - self.min).abs()
    }
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: DEFAULT_STEP,
            disabled: false,
        }
    }
}

pub(crate) fn check_bounds(min: f64, max: f64) -> Result<(), RangeConfigError> {
    if !min.is_finite() {
        return Err(RangeConfigError::NonFiniteBound {
            name: "min",
            value: min,
        });
    }
    if !max.is_finite() {
        return Err(RangeConfigError::NonFiniteBound {
            name: "max",
            value: max,
        });
    }
    if min == max {
        return Err(RangeConfigError::EmptyRange { value: min });
    }
    Ok(())
}

/// Step attribute: missing, unparsable, zero, negative or non-finite values
/// all mean `1`.
pub fn parse_step(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|step| step.is_finite() && *step > 0.0)
        .unwrap_or(DEFAULT_STEP)
}

/// Min/max attribute: `None` unless the value is a finite number.
pub fn parse_bound(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Disabled attribute, with boolean-attribute semantics: absent means
/// enabled, present means disabled unless the value is literally `false`.
pub fn parse_disabled(raw: Option<&str>) -> bool {
    match raw {
        None => false,
        Some(value) => !value.trim().eq_ignore_ascii_case("false"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_degenerate_ranges() {
        assert_eq!(
            RangeConfig::new(5.0, 5.0, 1.0),
            Err(RangeConfigError::EmptyRange { value: 5.0 })
        );
        assert!(matches!(
            RangeConfig::new(f64::NAN, 5.0, 1.0),
            Err(RangeConfigError::NonFiniteBound { name: "min", .. })
        ));
        assert!(matches!(
            RangeConfig::new(0.0, f64::INFINITY, 1.0),
            Err(RangeConfigError::NonFiniteBound { name: "max", .. })
        ));
        assert_eq!(
            RangeConfig::new(0.0, 10.0, 0.0),
            Err(RangeConfigError::InvalidStep { step: 0.0 })
        );
    }

    #[test]
    fn reversed_bounds_are_allowed() {
        let config = RangeConfig::new(100.0, 0.0, 5.0).expect("reversed range");
        assert_eq!(config.span(), 100.0);
    }

    #[test]
    fn step_falls_back_to_one() {
        assert_eq!(parse_step(None), 1.0);
        assert_eq!(parse_step(Some("")), 1.0);
        assert_eq!(parse_step(Some("abc")), 1.0);
        assert_eq!(parse_step(Some("0")), 1.0);
        assert_eq!(parse_step(Some("-2")), 1.0);
        assert_eq!(parse_step(Some(" 2.5 ")), 2.5);
    }

    #[test]
    fn bounds_must_be_finite_numbers() {
        assert_eq!(parse_bound(Some("10")), Some(10.0));
        assert_eq!(parse_bound(Some("-3.5")), Some(-3.5));
        assert_eq!(parse_bound(Some("inf")), None);
        assert_eq!(parse_bound(Some("ten")), None);
        assert_eq!(parse_bound(None), None);
    }

    #[test]
    fn disabled_follows_boolean_attribute_rules() {
        assert!(!parse_disabled(None));
        assert!(parse_disabled(Some("")));
        assert!(parse_disabled(Some("disabled")));
        assert!(parse_disabled(Some("true")));
        assert!(!parse_disabled(Some("false")));
        assert!(!parse_disabled(Some("FALSE")));
    }

    #[test]
    fn from_attributes_requires_bounds() {
        let config = RangeConfig::from_attributes(Some("0"), Some("50"), Some("nope"), None)
            .expect("valid attributes");
        assert_eq!(config.step, 1.0);
        assert!(!config.disabled);

        assert_eq!(
            RangeConfig::from_attributes(None, Some("50"), None, None),
            Err(RangeConfigError::MissingBound { name: "min" })
        );
    }

    #[test]
    fn errors_render_readably() {
        let err = RangeConfigError::InvalidStep { step: -1.0 };
        assert_eq!(err.to_string(), "step must be positive and finite, got -1");
    }
}
