//! Party stats and health management
//!
//! This module provides the live stat state for the two players:
//! - Health management with damage and healing
//! - Score, level, experience and currency
//! - Ability score bonuses (derived from equipment elsewhere)
//!
//! The save system talks to this through [`StatProvider`] so that hosts can
//! plug in their own stat backend and tests can supply fakes.

use serde::{Deserialize, Serialize};

/// Number of players sharing the board
pub const PLAYER_COUNT: usize = 2;

/// The six ability scores
///
/// Used both for the equipment bonuses an item grants and for the summed
/// bonuses a player currently enjoys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AbilityScores {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl AbilityScores {
    /// Component-wise sum
    pub fn add(&self, other: &AbilityScores) -> AbilityScores {
        AbilityScores {
            strength: self.strength + other.strength,
            dexterity: self.dexterity + other.dexterity,
            constitution: self.constitution + other.constitution,
            intelligence: self.intelligence + other.intelligence,
            wisdom: self.wisdom + other.wisdom,
            charisma: self.charisma + other.charisma,
        }
    }
}

/// Represents a character's health points
///
/// Health is tracked separately from max health to enable:
/// - Damage calculations that reduce current health
/// - Healing that can't exceed max health
///
/// # Example
///
/// ```
/// use six_stones::stats::Health;
///
/// let mut health = Health::new(100);
/// health.take_damage(30);
/// assert_eq!(health.current(), 70);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Health {
    current: i32,
    max: i32,
}

impl Health {
    /// Creates a new Health instance with full health
    pub fn new(max: i32) -> Self {
        Health { current: max, max }
    }

    /// Returns the current health value
    pub fn current(&self) -> i32 {
        self.current
    }

    /// Returns the maximum health value
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Checks if the entity is alive (health > 0)
    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Applies damage to health
    ///
    /// Returns a `DamageResult` containing how much damage was actually
    /// dealt, whether it was fatal and any overkill.
    pub fn take_damage(&mut self, amount: i32) -> DamageResult {
        let old_health = self.current;
        self.current = self.current.saturating_sub(amount).max(0);

        DamageResult {
            damage_dealt: old_health - self.current,
            is_fatal: self.current <= 0,
            overkill: if self.current <= 0 { amount.saturating_sub(old_health) } else { 0 },
        }
    }

    /// Heals health, capped at max health
    ///
    /// Returns the actual amount healed (which may be less than requested
    /// if already near max health)
    pub fn heal(&mut self, amount: i32) -> i32 {
        let old_health = self.current;
        self.current = self.current.saturating_add(amount).min(self.max);
        self.current - old_health
    }

    /// Sets the maximum health and adjusts current health if needed
    ///
    /// If new max is lower than current health, current health is capped to new max
    pub fn set_max(&mut self, new_max: i32) {
        self.max = new_max.max(0);
        if self.current > self.max {
            self.current = self.max;
        }
    }
}

/// Result of a damage operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DamageResult {
    /// Actual damage dealt (may be less than requested if target had less health)
    pub damage_dealt: i32,
    /// Whether this damage killed the target
    pub is_fatal: bool,
    /// Excess damage beyond what was needed to kill (0 if not fatal)
    pub overkill: i32,
}

/// Side effects raised by stat changes
///
/// The HUD and battle logic listen to these; restoring health through heal
/// and damage keeps them firing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatEvent {
    Healed { player: usize, amount: i32 },
    Damaged { player: usize, amount: i32 },
    Defeated { player: usize },
}

/// Contract the save system uses to read and write player stats
pub trait StatProvider {
    fn current_health(&self, player: usize) -> i32;
    fn max_health(&self, player: usize) -> i32;
    fn set_max_health(&mut self, player: usize, max: i32);
    /// Heals through the normal path, returning the amount actually healed
    fn heal(&mut self, player: usize, amount: i32) -> i32;
    /// Damages through the normal path, including death checks
    fn damage(&mut self, player: usize, amount: i32) -> DamageResult;

    fn score(&self, player: usize) -> u32;
    fn set_score(&mut self, player: usize, score: u32);

    fn level(&self) -> u32;
    fn set_level(&mut self, level: u32);
    fn experience(&self) -> u64;
    fn set_experience(&mut self, experience: u64);
    fn currency(&self) -> u64;
    fn set_currency(&mut self, amount: u64);
}

/// Per-player live state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerVitals {
    pub health: Health,
    pub score: u32,
}

impl PlayerVitals {
    pub fn new(max_health: i32) -> Self {
        PlayerVitals {
            health: Health::new(max_health),
            score: 0,
        }
    }
}

/// Live stats for the whole party
#[derive(Debug, Clone)]
pub struct PartyStats {
    pub players: [PlayerVitals; PLAYER_COUNT],
    pub level: u32,
    pub experience: u64,
    pub currency: u64,
    events: Vec<StatEvent>,
}

impl PartyStats {
    /// Default starting stats for a new game
    pub fn new() -> Self {
        PartyStats {
            players: [PlayerVitals::new(30), PlayerVitals::new(30)],
            level: 1,
            experience: 0,
            currency: 0,
            events: Vec::new(),
        }
    }

    /// Drains the events raised since the last call
    pub fn take_events(&mut self) -> Vec<StatEvent> {
        std::mem::take(&mut self.events)
    }

    fn vitals_mut(&mut self, player: usize) -> Option<&mut PlayerVitals> {
        let vitals = self.players.get_mut(player);
        if vitals.is_none() {
            tracing::warn!(player, "stat change for unknown player ignored");
        }
        vitals
    }
}

impl Default for PartyStats {
    fn default() -> Self {
        Self::new()
    }
}

impl StatProvider for PartyStats {
    fn current_health(&self, player: usize) -> i32 {
        self.players.get(player).map_or(0, |p| p.health.current())
    }

    fn max_health(&self, player: usize) -> i32 {
        self.players.get(player).map_or(0, |p| p.health.max())
    }

    fn set_max_health(&mut self, player: usize, max: i32) {
        if let Some(vitals) = self.vitals_mut(player) {
            vitals.health.set_max(max);
        }
    }

    fn heal(&mut self, player: usize, amount: i32) -> i32 {
        let Some(vitals) = self.vitals_mut(player) else {
            return 0;
        };
        let healed = vitals.health.heal(amount);
        if healed > 0 {
            self.events.push(StatEvent::Healed { player, amount: healed });
        }
        healed
    }

    fn damage(&mut self, player: usize, amount: i32) -> DamageResult {
        let Some(vitals) = self.vitals_mut(player) else {
            return DamageResult { damage_dealt: 0, is_fatal: false, overkill: 0 };
        };
        let was_alive = vitals.health.is_alive();
        let result = vitals.health.take_damage(amount);
        if result.damage_dealt > 0 {
            self.events.push(StatEvent::Damaged { player, amount: result.damage_dealt });
        }
        if was_alive && result.is_fatal {
            self.events.push(StatEvent::Defeated { player });
        }
        result
    }

    fn score(&self, player: usize) -> u32 {
        self.players.get(player).map_or(0, |p| p.score)
    }

    fn set_score(&mut self, player: usize, score: u32) {
        if let Some(vitals) = self.vitals_mut(player) {
            vitals.score = score;
        }
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn set_level(&mut self, level: u32) {
        self.level = level.max(1);
    }

    fn experience(&self) -> u64 {
        self.experience
    }

    fn set_experience(&mut self, experience: u64) {
        self.experience = experience;
    }

    fn currency(&self) -> u64 {
        self.currency
    }

    fn set_currency(&mut self, amount: u64) {
        self.currency = amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage() {
        let mut health = Health::new(100);
        let result = health.take_damage(30);

        assert_eq!(result.damage_dealt, 30);
        assert_eq!(health.current(), 70);
        assert!(!result.is_fatal);
        assert_eq!(result.overkill, 0);
    }

    #[test]
    fn test_health_fatal_damage() {
        let mut health = Health::new(100);
        let result = health.take_damage(150);

        assert_eq!(result.damage_dealt, 100);
        assert_eq!(health.current(), 0);
        assert!(result.is_fatal);
        assert_eq!(result.overkill, 50);
    }

    #[test]
    fn test_health_overheal_caps() {
        let mut health = Health::new(100);
        health.take_damage(50);

        let healed = health.heal(100);
        assert_eq!(healed, 50); // Only healed what was missing
        assert_eq!(health.current(), 100);
    }

    #[test]
    fn test_health_extremes_saturate() {
        let mut health = Health::new(i32::MAX);
        health.take_damage(1);
        assert_eq!(health.heal(i32::MAX), 1);
        assert_eq!(health.current(), i32::MAX);

        let mut health = Health::new(10);
        let result = health.take_damage(i32::MAX);
        assert_eq!(health.current(), 0);
        assert_eq!(result.overkill, i32::MAX - 10);
    }

    #[test]
    fn test_set_max_caps_current() {
        let mut health = Health::new(100);
        health.set_max(40);
        assert_eq!(health.current(), 40);
        assert_eq!(health.max(), 40);
    }

    #[test]
    fn test_party_damage_raises_defeat_once() {
        let mut stats = PartyStats::new();
        stats.damage(1, 100);
        stats.damage(1, 5);

        let events = stats.take_events();
        assert_eq!(
            events,
            vec![
                StatEvent::Damaged { player: 1, amount: 30 },
                StatEvent::Defeated { player: 1 },
            ]
        );
        assert!(stats.take_events().is_empty());
    }

    #[test]
    fn test_unknown_player_is_ignored() {
        let mut stats = PartyStats::new();
        assert_eq!(stats.heal(7, 10), 0);
        assert_eq!(stats.score(7), 0);
    }

    #[test]
    fn test_ability_scores_add() {
        let a = AbilityScores { strength: 1, wisdom: 2, ..Default::default() };
        let b = AbilityScores { strength: 2, dexterity: -1, ..Default::default() };
        let sum = a.add(&b);
        assert_eq!(sum.strength, 3);
        assert_eq!(sum.dexterity, -1);
        assert_eq!(sum.wisdom, 2);
    }
}
