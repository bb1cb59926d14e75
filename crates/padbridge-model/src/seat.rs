//! Player seats.

use serde::{Deserialize, Serialize};

use crate::output::Rgb;

/// Player slot. Selects the LED pattern and lightbar color a pad shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Seat {
    A,
    B,
    C,
    D,
}

impl Seat {
    pub const ALL: [Seat; 4] = [Seat::A, Seat::B, Seat::C, Seat::D];

    pub fn index(self) -> usize {
        match self {
            Seat::A => 0,
            Seat::B => 1,
            Seat::C => 2,
            Seat::D => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Seat> {
        Self::ALL.get(index).copied()
    }

    /// One LED per seat, seat A leftmost.
    pub fn player_led_mask(self) -> u8 {
        1 << self.index()
    }

    pub fn color(self) -> Rgb {
        match self {
            Seat::A => Rgb::new(0x00, 0x00, 0x40),
            Seat::B => Rgb::new(0x40, 0x00, 0x00),
            Seat::C => Rgb::new(0x00, 0x40, 0x00),
            Seat::D => Rgb::new(0x20, 0x00, 0x20),
        }
    }

    /// The seat a pad moves to when its owner toggles it.
    pub fn next(self) -> Seat {
        Seat::from_index((self.index() + 1) % Self::ALL.len()).unwrap_or(Seat::A)
    }
}
