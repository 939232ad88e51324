// ABOUTME: Flex factor vocabulary shared by the grid and split engines.
// ABOUTME: Defines the AUTOFLEX sentinel and the two layout axes.

use serde::{Deserialize, Serialize};

/// Flex value meaning "no explicit preference, share equally".
///
/// Also substituted for every participant on an axis whose cumulative flex is
/// zero, so it is chosen to be implausible as a user-supplied factor.
pub const AUTOFLEX: f64 = 729.0;

/// Layout axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A flex of zero asks for the natural (minimum) size
pub fn is_natural(flex: f64) -> bool {
    flex == 0.0
}

pub fn is_autoflex(flex: f64) -> bool {
    flex == AUTOFLEX
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_natural() {
        assert!(is_natural(0.0));
        assert!(!is_natural(1.0));
        assert!(!is_natural(AUTOFLEX));
    }

    #[test]
    fn autoflex_is_not_a_plain_factor() {
        assert!(is_autoflex(AUTOFLEX));
        assert!(!is_autoflex(1.0));
    }
}
