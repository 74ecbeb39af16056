use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Seat {
    Forehand = 0,
    Middlehand = 1,
    Rearhand = 2,
}

impl Seat {
    pub const LOOP: [Seat; 3] = [Seat::Forehand, Seat::Middlehand, Seat::Rearhand];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::Forehand),
            1 => Some(Seat::Middlehand),
            2 => Some(Seat::Rearhand),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Clockwise neighbour.
    pub const fn next(self) -> Seat {
        match self {
            Seat::Forehand => Seat::Middlehand,
            Seat::Middlehand => Seat::Rearhand,
            Seat::Rearhand => Seat::Forehand,
        }
    }

    pub const fn previous(self) -> Seat {
        match self {
            Seat::Forehand => Seat::Rearhand,
            Seat::Middlehand => Seat::Forehand,
            Seat::Rearhand => Seat::Middlehand,
        }
    }

    /// Seat that played the `offset`-th card of a trick led by `self`.
    pub const fn offset(self, offset: usize) -> Seat {
        match (self.index() + offset) % 3 {
            0 => Seat::Forehand,
            1 => Seat::Middlehand,
            _ => Seat::Rearhand,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Seat::Forehand => "Forehand",
            Seat::Middlehand => "Middlehand",
            Seat::Rearhand => "Rearhand",
        };
        f.write_str(label)
    }
}
