//! Player identification and per-player dice.
//!
//! ## PlayerId
//!
//! Opaque string identifier assigned by whoever admits the player (the
//! authorization layer). The engine only compares ids.
//!
//! ## Player
//!
//! Display data plus the dice the player owns. Dice are stored inline in a
//! `SmallVec`: a hand rarely exceeds six dice, so cloning a player for a
//! copy-on-write update stays allocation-free.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::die::{Die, DieId};

/// Player identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a new player ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Inline storage for a player's dice.
pub type Dice = SmallVec<[Die; 6]>;

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Identity.
    pub id: PlayerId,

    /// Display name.
    pub name: String,

    /// Display emoji.
    pub emoji: String,

    /// Dice owned by this player, in deal order.
    pub dice: Dice,
}

impl Player {
    /// Create a player without dice.
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            emoji: emoji.into(),
            dice: SmallVec::new(),
        }
    }

    /// Set the starting dice (builder pattern).
    #[must_use]
    pub fn with_dice(mut self, dice: impl IntoIterator<Item = Die>) -> Self {
        self.dice = dice.into_iter().collect();
        self
    }

    /// Number of dice the player still holds.
    #[must_use]
    pub fn num_dice(&self) -> usize {
        self.dice.len()
    }

    /// A player with no dice left is out of the game.
    #[must_use]
    pub fn is_eliminated(&self) -> bool {
        self.dice.is_empty()
    }

    /// Get a die by id.
    #[must_use]
    pub fn die(&self, id: DieId) -> Option<&Die> {
        self.dice.iter().find(|d| d.id == id)
    }

    /// Get a mutable die by id.
    pub fn die_mut(&mut self, id: DieId) -> Option<&mut Die> {
        self.dice.iter_mut().find(|d| d.id == id)
    }

    /// Check whether the player owns a die.
    #[must_use]
    pub fn owns(&self, id: DieId) -> bool {
        self.die(id).is_some()
    }

    /// Count dice showing `value` (no wild substitution).
    #[must_use]
    pub fn count_value(&self, value: u8) -> usize {
        self.dice.iter().filter(|d| d.value == value).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dice(values: &[u8]) -> Vec<Die> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Die::new(DieId::new(i as u32), v))
            .collect()
    }

    #[test]
    fn test_player_id_basics() {
        let id = PlayerId::new("p1");
        assert_eq!(id.as_str(), "p1");
        assert_eq!(format!("{}", id), "p1");
        assert_eq!(PlayerId::from("p1"), id);
        assert_eq!(PlayerId::from(String::from("p1")), id);
    }

    #[test]
    fn test_player_new_has_no_dice() {
        let player = Player::new("p1", "Ada", "🎲");
        assert_eq!(player.num_dice(), 0);
        assert!(player.is_eliminated());
    }

    #[test]
    fn test_player_dice_lookup() {
        let mut player = Player::new("p1", "Ada", "🎲").with_dice(dice(&[2, 5, 2]));

        assert_eq!(player.num_dice(), 3);
        assert!(player.owns(DieId::new(1)));
        assert!(!player.owns(DieId::new(9)));
        assert_eq!(player.die(DieId::new(1)).map(|d| d.value), Some(5));

        if let Some(die) = player.die_mut(DieId::new(2)) {
            die.reveal();
        }
        assert!(player.dice[2].is_visible);
    }

    #[test]
    fn test_count_value() {
        let player = Player::new("p1", "Ada", "🎲").with_dice(dice(&[1, 3, 3, 6, 3]));
        assert_eq!(player.count_value(3), 3);
        assert_eq!(player.count_value(1), 1);
        assert_eq!(player.count_value(4), 0);
    }

    #[test]
    fn test_player_serialization() {
        let player = Player::new("p1", "Ada", "🎲").with_dice(dice(&[4, 4]));
        let json = serde_json::to_string(&player).unwrap();
        let deserialized: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(player, deserialized);
    }
}
