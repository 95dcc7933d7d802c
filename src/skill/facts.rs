//! Fact catalog
//!
//! The read-only list of facts the skill speaks, with uniform random
//! selection through an injected random source so tests stay deterministic.

use rand::Rng;

/// Facts served when no custom catalog is configured.
pub const DEFAULT_FACTS: [&str; 4] = [
    "A bolt of lightning contains enough energy to toast 100,000 slices of bread.",
    "You cannot hum while holding your nose.",
    "The total weight of ants on Earth once equaled the total weight of all humans.",
    "Wombat poop is cube-shaped.",
];

/// Ordered fact catalog, loaded once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct FactCatalog {
    facts: Vec<String>,
}

impl FactCatalog {
    pub fn new(facts: Vec<String>) -> Self {
        Self { facts }
    }

    /// Draw one fact uniformly at random. `None` only for an empty catalog,
    /// which configuration loading rejects up front.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        if self.facts.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.facts.len());
        Some(self.facts[index].as_str())
    }
}

impl Default for FactCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_FACTS.iter().map(ToString::to_string).collect())
    }
}
