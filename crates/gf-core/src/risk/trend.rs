//! CGM-style trend arrows derived from the filtered velocity.

use serde::{Deserialize, Serialize};

/// Below this |velocity| (mmol/L/min) the trend is flat.
pub const FLAT_LIMIT: f64 = 0.06;
/// Below this the arrow is diagonal.
pub const DIAGONAL_LIMIT: f64 = 0.11;
/// Below this a single arrow; at or above, a double arrow.
pub const SINGLE_LIMIT: f64 = 0.17;

/// Direction and steepness of the glucose trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendArrow {
    DoubleDown,
    SingleDown,
    FortyFiveDown,
    Flat,
    FortyFiveUp,
    SingleUp,
    DoubleUp,
    /// Velocity was NaN or infinite.
    NotComputable,
}

impl TrendArrow {
    pub fn from_velocity(velocity: f64) -> Self {
        if !velocity.is_finite() {
            return TrendArrow::NotComputable;
        }
        let magnitude = velocity.abs();
        let rising = velocity > 0.0;
        if magnitude < FLAT_LIMIT {
            TrendArrow::Flat
        } else if magnitude < DIAGONAL_LIMIT {
            if rising {
                TrendArrow::FortyFiveUp
            } else {
                TrendArrow::FortyFiveDown
            }
        } else if magnitude < SINGLE_LIMIT {
            if rising {
                TrendArrow::SingleUp
            } else {
                TrendArrow::SingleDown
            }
        } else if rising {
            TrendArrow::DoubleUp
        } else {
            TrendArrow::DoubleDown
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TrendArrow::DoubleDown => "⇊",
            TrendArrow::SingleDown => "↓",
            TrendArrow::FortyFiveDown => "↘",
            TrendArrow::Flat => "→",
            TrendArrow::FortyFiveUp => "↗",
            TrendArrow::SingleUp => "↑",
            TrendArrow::DoubleUp => "⇈",
            TrendArrow::NotComputable => "?",
        }
    }
}

impl std::fmt::Display for TrendArrow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendArrow::DoubleDown => write!(f, "double_down"),
            TrendArrow::SingleDown => write!(f, "single_down"),
            TrendArrow::FortyFiveDown => write!(f, "forty_five_down"),
            TrendArrow::Flat => write!(f, "flat"),
            TrendArrow::FortyFiveUp => write!(f, "forty_five_up"),
            TrendArrow::SingleUp => write!(f, "single_up"),
            TrendArrow::DoubleUp => write!(f, "double_up"),
            TrendArrow::NotComputable => write!(f, "not_computable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cut_points() {
        assert_eq!(TrendArrow::from_velocity(0.0), TrendArrow::Flat);
        assert_eq!(TrendArrow::from_velocity(0.059), TrendArrow::Flat);
        assert_eq!(TrendArrow::from_velocity(-0.059), TrendArrow::Flat);
        assert_eq!(TrendArrow::from_velocity(0.06), TrendArrow::FortyFiveUp);
        assert_eq!(TrendArrow::from_velocity(-0.08), TrendArrow::FortyFiveDown);
        assert_eq!(TrendArrow::from_velocity(0.11), TrendArrow::SingleUp);
        assert_eq!(TrendArrow::from_velocity(-0.15), TrendArrow::SingleDown);
        assert_eq!(TrendArrow::from_velocity(0.17), TrendArrow::DoubleUp);
        assert_eq!(TrendArrow::from_velocity(-1.2), TrendArrow::DoubleDown);
    }

    #[test]
    fn non_finite_velocity() {
        assert_eq!(TrendArrow::from_velocity(f64::NAN), TrendArrow::NotComputable);
        assert_eq!(
            TrendArrow::from_velocity(f64::INFINITY),
            TrendArrow::NotComputable
        );
    }

    #[test]
    fn display_matches_serde() {
        for arrow in [
            TrendArrow::DoubleDown,
            TrendArrow::FortyFiveDown,
            TrendArrow::Flat,
            TrendArrow::SingleUp,
            TrendArrow::NotComputable,
        ] {
            let json = serde_json::to_string(&arrow).unwrap();
            assert_eq!(json, format!("\"{}\"", arrow));
        }
    }
}
