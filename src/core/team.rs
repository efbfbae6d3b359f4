//! Teams and card allegiances.
//!
//! ## Team
//!
//! The two playing sides. Every turn belongs to exactly one team.
//!
//! ## Allegiance
//!
//! What a card secretly belongs to: one of the two teams, a neutral
//! bystander, or the assassin.

use serde::{Deserialize, Serialize};

/// A playing side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Team {
    Blue,
    Red,
}

impl Team {
    /// Both teams, Blue first.
    pub const ALL: [Team; 2] = [Team::Blue, Team::Red];

    /// The other team.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Team::Blue => Team::Red,
            Team::Red => Team::Blue,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::Blue => write!(f, "Blue"),
            Team::Red => write!(f, "Red"),
        }
    }
}

impl std::str::FromStr for Team {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blue" => Ok(Team::Blue),
            "red" => Ok(Team::Red),
            other => Err(format!("unknown team {other:?} (expected blue or red)")),
        }
    }
}

/// Hidden identity of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Allegiance {
    Blue,
    Red,
    Bystander,
    Assassin,
}

impl Allegiance {
    /// The team this card scores for, if any.
    #[must_use]
    pub const fn team(self) -> Option<Team> {
        match self {
            Allegiance::Blue => Some(Team::Blue),
            Allegiance::Red => Some(Team::Red),
            Allegiance::Bystander | Allegiance::Assassin => None,
        }
    }

    /// Does this card belong to `team`?
    #[must_use]
    pub fn is_team(self, team: Team) -> bool {
        self.team() == Some(team)
    }
}

impl From<Team> for Allegiance {
    fn from(team: Team) -> Self {
        match team {
            Team::Blue => Allegiance::Blue,
            Team::Red => Allegiance::Red,
        }
    }
}

impl std::fmt::Display for Allegiance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Allegiance::Blue => write!(f, "Blue"),
            Allegiance::Red => write!(f, "Red"),
            Allegiance::Bystander => write!(f, "Bystander"),
            Allegiance::Assassin => write!(f, "Assassin"),
        }
    }
}
