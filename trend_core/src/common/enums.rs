use strum_macros::{Display, EnumString};

/// Which side of the price action a fitted line bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum LineSide {
    #[strum(serialize = "support")]
    Support,
    #[strum(serialize = "resistance")]
    Resistance,
}
