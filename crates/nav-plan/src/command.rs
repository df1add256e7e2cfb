//! Turn-by-turn commands and the angle → label mappings behind them.

use std::fmt;

use nav_core::geo::normalize_deg;

// ── Direction ─────────────────────────────────────────────────────────────────

/// 8-point compass label for a bearing.
///
/// Each band is 45° wide and centred on its compass point; `East` wraps
/// across 0°.
///
/// | Bearing           | Label       |
/// |-------------------|-------------|
/// | [0, 22.5) ∪ [337.5, 360) | east |
/// | [22.5, 67.5)      | northeast   |
/// | [67.5, 112.5)     | north       |
/// | [112.5, 157.5)    | northwest   |
/// | [157.5, 202.5)    | west        |
/// | [202.5, 247.5)    | southwest   |
/// | [247.5, 292.5)    | south       |
/// | [292.5, 337.5)    | southeast   |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    East,
    Northeast,
    North,
    Northwest,
    West,
    Southwest,
    South,
    Southeast,
}

impl Direction {
    /// Label for a bearing in degrees (any value; it is mapped into
    /// `[0, 360)` first).
    pub fn from_bearing(bearing_deg: f64) -> Self {
        let b = normalize_deg(bearing_deg);
        match b {
            b if b < 22.5 => Direction::East,
            b if b < 67.5 => Direction::Northeast,
            b if b < 112.5 => Direction::North,
            b if b < 157.5 => Direction::Northwest,
            b if b < 202.5 => Direction::West,
            b if b < 247.5 => Direction::Southwest,
            b if b < 292.5 => Direction::South,
            b if b < 337.5 => Direction::Southeast,
            _ => Direction::East,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::East => "east",
            Direction::Northeast => "northeast",
            Direction::North => "north",
            Direction::Northwest => "northwest",
            Direction::West => "west",
            Direction::Southwest => "southwest",
            Direction::South => "south",
            Direction::Southeast => "southeast",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── TurnSide ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnSide {
    Left,
    Right,
}

impl TurnSide {
    /// Classify a change of heading in degrees, as produced by
    /// [`nav_core::angle_between`].
    ///
    /// `[1, 180)` is a left turn, `[180, 360)` a right turn.  Anything below
    /// 1° (including exactly 0°) is straight on and yields `None`.
    pub fn from_angle(angle_deg: f64) -> Option<Self> {
        let a = normalize_deg(angle_deg);
        if (1.0..180.0).contains(&a) {
            Some(TurnSide::Left)
        } else if a >= 180.0 {
            Some(TurnSide::Right)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TurnSide::Left => "left",
            TurnSide::Right => "right",
        }
    }
}

impl fmt::Display for TurnSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Command ───────────────────────────────────────────────────────────────────

/// One instruction of a delivery plan.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// Follow `street` heading `direction` for `distance_miles`.
    Proceed {
        direction: Direction,
        street: String,
        distance_miles: f64,
    },
    /// Turn onto `street`.
    Turn { side: TurnSide, street: String },
    /// Hand over `item` at the current stop.
    Deliver { item: String },
}

impl Command {
    pub fn is_deliver(&self) -> bool {
        matches!(self, Command::Deliver { .. })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Proceed { direction, street, distance_miles } => {
                write!(f, "Proceed {distance_miles:.2} miles {direction} on {street}")
            }
            Command::Turn { side, street } => write!(f, "Turn {side} on {street}"),
            Command::Deliver { item } => write!(f, "Deliver {item}"),
        }
    }
}
