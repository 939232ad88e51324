// ABOUTME: Geometric values written into element styles.
// ABOUTME: Renders lengths as CSS-style strings and holds element sizes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A length as assigned to a style property
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Auto,
    Px(f64),
    Percent(f64),
}

impl Length {
    /// Interpret a position coordinate: values above 1 are pixels, anything
    /// else is a fraction of the parent.
    pub fn from_pos(value: f64) -> Self {
        if value > 1.0 {
            Length::Px(value)
        } else {
            Length::Percent(value * 100.0)
        }
    }

    /// Share of `cumulative` as a percentage. Callers guarantee a non-zero
    /// cumulative (see AUTOFLEX substitution).
    pub fn share(flex: f64, cumulative: f64) -> Self {
        Length::Percent(flex * 100.0 / cumulative)
    }

    pub fn px(&self) -> Option<f64> {
        match self {
            Length::Px(v) => Some(*v),
            _ => None,
        }
    }

    pub fn percent(&self) -> Option<f64> {
        match self {
            Length::Percent(v) => Some(*v),
            _ => None,
        }
    }

    /// Parse a rendered length back, e.g. "12px", "50%", "auto"
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text == "auto" {
            return Some(Length::Auto);
        }
        if let Some(num) = text.strip_suffix("px") {
            return num.trim().parse().ok().map(Length::Px);
        }
        if let Some(num) = text.strip_suffix('%') {
            return num.trim().parse().ok().map(Length::Percent);
        }
        // Bare numbers are pixels
        text.parse().ok().map(Length::Px)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Auto => write!(f, "auto"),
            Length::Px(v) => write!(f, "{}px", v),
            Length::Percent(v) => write!(f, "{}%", v),
        }
    }
}

/// Width and height in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl From<[f64; 2]> for Size {
    fn from([width, height]: [f64; 2]) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pos_above_one_is_pixels() {
        assert_eq!(Length::from_pos(40.0), Length::Px(40.0));
        assert_eq!(Length::from_pos(0.25), Length::Percent(25.0));
        // exactly one is still a fraction
        assert_eq!(Length::from_pos(1.0), Length::Percent(100.0));
    }

    #[test]
    fn display_matches_css() {
        assert_eq!(Length::Auto.to_string(), "auto");
        assert_eq!(Length::Px(150.0).to_string(), "150px");
        assert_eq!(Length::Px(2.5).to_string(), "2.5px");
        assert_eq!(Length::Percent(41.0).to_string(), "41%");
    }

    #[test]
    fn share_of_cumulative() {
        assert_eq!(Length::share(1.0, 4.0), Length::Percent(25.0));
        assert_eq!(Length::share(3.0, 4.0), Length::Percent(75.0));
    }

    #[test]
    fn parse_rendered_values() {
        assert_eq!(Length::parse("auto"), Some(Length::Auto));
        assert_eq!(Length::parse("12px"), Some(Length::Px(12.0)));
        assert_eq!(Length::parse(" 50% "), Some(Length::Percent(50.0)));
        assert_eq!(Length::parse("7"), Some(Length::Px(7.0)));
        assert_eq!(Length::parse("wide"), None);
    }
}
