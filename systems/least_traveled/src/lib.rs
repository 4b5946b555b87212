#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Randomized "least-traveled" walker.
//!
//! The agent always prefers a neighbor it has never stood on, choosing
//! uniformly at random among them; once everything nearby has been seen it
//! retreats to the neighbor with the fewest prior visits. The heuristic
//! reaches every tile of a finite connected component with probability 1
//! but gives no bound on the number of steps.

use std::collections::HashMap;

use maze_forage_core::{AgentStep, Direction, KnownTerrain, StepError, Tile};
use maze_forage_world::PlayerInterface;
use rand::{seq::SliceRandom, Rng};

/// Stateful random walker biased toward the direction least traveled.
#[derive(Clone, Debug)]
pub struct LeastTraveled<R: Rng> {
    rng: R,
    known: KnownTerrain,
    visited: HashMap<Tile, u32>,
    path: Vec<Tile>,
}

impl<R: Rng> LeastTraveled<R> {
    /// Creates an agent positioned at the interface's current tile, with
    /// an injected random source so traversal is reproducible.
    #[must_use]
    pub fn new(interface: &PlayerInterface, rng: R) -> Self {
        let mut known = KnownTerrain::new(interface.dim());
        known.absorb(&interface.current_visible_tiles());

        let start = interface.player_pos();
        let mut visited = HashMap::new();
        let _ = visited.insert(start, 1);
        Self {
            rng,
            known,
            visited,
            path: vec![start],
        }
    }

    /// Performs one move: uniformly random among never-visited walkable
    /// neighbors when any exist, otherwise the first-encountered neighbor
    /// with the strictly smallest visit count. Neighbors are enumerated in
    /// [`Direction::ALL`] order, which fixes the tie-break.
    pub fn step(&mut self, interface: &mut PlayerInterface) -> Result<AgentStep, StepError> {
        self.known.absorb(&interface.current_visible_tiles());
        let pos = interface.player_pos();

        let mut neighbors = Vec::with_capacity(4);
        for direction in Direction::ALL {
            let Some(tile) = pos.step(direction) else {
                continue;
            };
            if self.known.walkability(tile)? {
                neighbors.push(AgentStep { direction, tile });
            }
        }

        let never_visited: Vec<AgentStep> = neighbors
            .iter()
            .copied()
            .filter(|step| !self.visited.contains_key(&step.tile))
            .collect();

        let chosen = match never_visited.choose(&mut self.rng).copied() {
            Some(step) => step,
            None => {
                let mut candidates = neighbors.into_iter();
                let Some(mut least) = candidates.next() else {
                    return Err(StepError::NoWalkableNeighbor(pos));
                };
                for candidate in candidates {
                    if self.visits(candidate.tile) < self.visits(least.tile) {
                        least = candidate;
                    }
                }
                least
            }
        };

        let revealed = interface.move_to(chosen.tile)?;
        self.known.absorb(&revealed);
        *self.visited.entry(chosen.tile).or_insert(0) += 1;
        self.path.push(chosen.tile);
        Ok(chosen)
    }

    /// The agent's private view of the terrain, grown only from revealed
    /// batches.
    #[must_use]
    pub const fn known(&self) -> &KnownTerrain {
        &self.known
    }

    /// Number of distinct tiles the agent has stood on.
    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// How many times the agent has stood on the tile.
    #[must_use]
    pub fn visits(&self, tile: Tile) -> u32 {
        self.visited.get(&tile).copied().unwrap_or(0)
    }

    /// Ordered sequence of tiles visited, starting at the start tile.
    #[must_use]
    pub fn path(&self) -> &[Tile] {
        &self.path
    }
}
