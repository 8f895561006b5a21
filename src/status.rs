//! Status effects
//!
//! Effects belong to a player, not to a board cell, so they carry no
//! position.

/// One active effect on one player
#[derive(Debug, Clone, PartialEq)]
pub struct StatusEffect {
    pub name: String,
    pub player: usize,
    pub stacks: u32,
    /// Seconds left; effects expire when this reaches zero
    pub remaining: f32,
}

/// Live status effects for the party
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusEffects {
    active: Vec<StatusEffect>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an effect, stacking onto an existing one of the same name
    ///
    /// Stacking refreshes the duration to the longer of the two.
    pub fn apply(&mut self, name: impl Into<String>, player: usize, stacks: u32, duration: f32) {
        let name = name.into();
        match self.active.iter_mut().find(|e| e.name == name && e.player == player) {
            Some(effect) => {
                effect.stacks += stacks;
                effect.remaining = effect.remaining.max(duration);
            }
            None => self.active.push(StatusEffect { name, player, stacks, remaining: duration }),
        }
    }

    /// Advances durations, dropping expired effects
    pub fn tick(&mut self, dt: f32) {
        for effect in &mut self.active {
            effect.remaining -= dt;
        }
        self.active.retain(|effect| effect.remaining > 0.0);
    }

    pub fn active(&self) -> &[StatusEffect] {
        &self.active
    }

    pub fn for_player(&self, player: usize) -> impl Iterator<Item = &StatusEffect> {
        self.active.iter().filter(move |effect| effect.player == player)
    }
}
