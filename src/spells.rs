//! Spell book
//!
//! Tracks which spells the party knows, which are prepared for the current
//! run, and their cooldowns and charges.

use std::collections::{BTreeMap, BTreeSet};

/// Live spell state for the party
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpellBook {
    learned: BTreeSet<String>,
    prepared: BTreeSet<String>,
    cooldowns: BTreeMap<String, f32>,
    charges: BTreeMap<String, u32>,
}

impl SpellBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn learn(&mut self, spell: impl Into<String>) {
        self.learned.insert(spell.into());
    }

    /// Prepares a learned spell
    ///
    /// Returns false if the spell hasn't been learned.
    pub fn prepare(&mut self, spell: &str, charges: u32) -> bool {
        if !self.learned.contains(spell) {
            return false;
        }
        self.prepared.insert(spell.to_string());
        self.charges.insert(spell.to_string(), charges);
        true
    }

    /// Spends a charge and starts the cooldown
    ///
    /// Returns false if the spell is unprepared, out of charges or cooling down.
    pub fn cast(&mut self, spell: &str, cooldown: f32) -> bool {
        if !self.prepared.contains(spell) || self.cooldown(spell) > 0.0 {
            return false;
        }
        match self.charges.get_mut(spell) {
            Some(charges) if *charges > 0 => {
                *charges -= 1;
                self.cooldowns.insert(spell.to_string(), cooldown);
                true
            }
            _ => false,
        }
    }

    /// Advances every cooldown by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        for remaining in self.cooldowns.values_mut() {
            *remaining = (*remaining - dt).max(0.0);
        }
        self.cooldowns.retain(|_, remaining| *remaining > 0.0);
    }

    pub fn cooldown(&self, spell: &str) -> f32 {
        self.cooldowns.get(spell).copied().unwrap_or(0.0)
    }

    pub fn learned(&self) -> &BTreeSet<String> {
        &self.learned
    }

    pub fn prepared(&self) -> &BTreeSet<String> {
        &self.prepared
    }

    pub fn cooldowns(&self) -> &BTreeMap<String, f32> {
        &self.cooldowns
    }

    pub fn charges(&self) -> &BTreeMap<String, u32> {
        &self.charges
    }
}
