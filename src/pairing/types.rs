use serde::Serialize;

use crate::domain::PlayerId;

/// A place at the rotation table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    Player(PlayerId),
    /// Placeholder added for odd rosters; whoever sits opposite has a bye
    Bye,
}

impl Seat {
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            Seat::Player(id) => Some(*id),
            Seat::Bye => None,
        }
    }
}

/// One board of a generated round, before it is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlannedPairing {
    pub board: usize,
    pub white: Option<PlayerId>,
    pub black: Option<PlayerId>,
}

impl PlannedPairing {
    pub fn is_bye(&self) -> bool {
        self.black.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundPlan {
    /// 1-based
    pub number: u32,
    pub pairings: Vec<PlannedPairing>,
}
