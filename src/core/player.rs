//! Player identification and per-player data storage.
//!
//! ## Player
//!
//! The game is strictly two-handed: `Player::One` always moves first.
//!
//! ## PlayerMap
//!
//! Fixed two-slot storage indexed by `Player`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two seats at the table.
///
/// Serializes as `"Player 1"` / `"Player 2"`, the names clients display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Player {
    #[serde(rename = "Player 1")]
    One,
    #[serde(rename = "Player 2")]
    Two,
}

impl Player {
    /// Both players in seating order.
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// 0-based seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// Display name ("Player 1").
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Player::One => "Player 1",
            Player::Two => "Player 2",
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use crazy_eights::core::{Player, PlayerMap};
///
/// let mut seats: PlayerMap<Option<&str>> = PlayerMap::default();
/// seats[Player::Two] = Some("conn-7");
///
/// assert_eq!(seats[Player::One], None);
/// assert_eq!(seats.find(|s| s.is_some()), Some(Player::Two));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create from one value per player.
    pub fn new(one: T, two: T) -> Self {
        Self { data: [one, two] }
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: Player) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: Player) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (Player, &T) pairs in seating order.
    pub fn iter(&self) -> impl Iterator<Item = (Player, &T)> {
        Player::ALL.into_iter().zip(self.data.iter())
    }

    /// First player (in seating order) whose entry satisfies `pred`.
    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<Player> {
        self.iter().find(|(_, v)| pred(v)).map(|(p, _)| p)
    }
}

impl<T> Index<Player> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: Player) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<Player> for PlayerMap<T> {
    fn index_mut(&mut self, player: Player) -> &mut Self::Output {
        self.get_mut(player)
    }
}
