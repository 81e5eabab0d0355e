use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

pub const ROWS: usize = 4;
pub const COLS: usize = 10;

/// Row holding the two thumb (space) slots.
pub const THUMB_ROW: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumString, Display)]
pub enum Finger {
    #[strum(serialize = "LP")]
    LeftPinky,
    #[strum(serialize = "LR")]
    LeftRing,
    #[strum(serialize = "LM")]
    LeftMiddle,
    #[strum(serialize = "LI")]
    LeftIndex,
    #[strum(serialize = "LT")]
    LeftThumb,
    #[strum(serialize = "RT")]
    RightThumb,
    #[strum(serialize = "RI")]
    RightIndex,
    #[strum(serialize = "RM")]
    RightMiddle,
    #[strum(serialize = "RR")]
    RightRing,
    #[strum(serialize = "RP")]
    RightPinky,
    /// Generic thumb. Used for combo-table lookups and for space, which sits on both thumbs.
    #[strum(serialize = "TB")]
    Thumb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Hand {
    Left,
    Right,
}

impl Finger {
    pub fn hand(self) -> Hand {
        match self {
            Finger::LeftPinky
            | Finger::LeftRing
            | Finger::LeftMiddle
            | Finger::LeftIndex
            | Finger::LeftThumb => Hand::Left,
            // The generic thumb leans right. Subjective, but hand balance depends on it.
            Finger::RightThumb
            | Finger::RightIndex
            | Finger::RightMiddle
            | Finger::RightRing
            | Finger::RightPinky
            | Finger::Thumb => Hand::Right,
        }
    }

    pub fn is_thumb(self) -> bool {
        matches!(self, Finger::LeftThumb | Finger::RightThumb | Finger::Thumb)
    }

    /// Folds both physical thumbs onto the generic `Thumb` before table lookups.
    pub fn canonicalize_for_lookup(self) -> Finger {
        if self.is_thumb() {
            Finger::Thumb
        } else {
            self
        }
    }

    /// Distance from the index finger (0 = index, 3 = pinky). `None` for thumbs.
    pub fn reach(self) -> Option<u8> {
        match self {
            Finger::LeftIndex | Finger::RightIndex => Some(0),
            Finger::LeftMiddle | Finger::RightMiddle => Some(1),
            Finger::LeftRing | Finger::RightRing => Some(2),
            Finger::LeftPinky | Finger::RightPinky => Some(3),
            _ => None,
        }
    }

    pub fn is_index(self) -> bool {
        self.reach() == Some(0)
    }
}

pub fn hand_for(col: u8) -> Hand {
    if col < 5 {
        Hand::Left
    } else {
        Hand::Right
    }
}

pub fn finger_for(row: u8, col: u8) -> Finger {
    if row == THUMB_ROW {
        match col {
            4 => return Finger::LeftThumb,
            5 => return Finger::RightThumb,
            _ => {}
        }
    }
    match col {
        0 => Finger::LeftPinky,
        1 => Finger::LeftRing,
        2 => Finger::LeftMiddle,
        3 | 4 => Finger::LeftIndex,
        5 | 6 => Finger::RightIndex,
        7 => Finger::RightMiddle,
        8 => Finger::RightRing,
        _ => Finger::RightPinky,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const LEFT_THUMB: Position = Position { row: THUMB_ROW, col: 4 };
    pub const RIGHT_THUMB: Position = Position { row: THUMB_ROW, col: 5 };

    pub fn finger(self) -> Finger {
        finger_for(self.row, self.col)
    }

    pub fn hand(self) -> Hand {
        hand_for(self.col)
    }

    pub fn is_thumb_slot(self) -> bool {
        self == Self::LEFT_THUMB || self == Self::RIGHT_THUMB
    }

    /// Every slot, row-major. This is the optimizer's scan order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..ROWS as u8).flat_map(|row| (0..COLS as u8).map(move |col| Position { row, col }))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row, self.col)
    }
}
