#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Depth-first traversal agent with backtracking.
//!
//! The agent explores through the player interface alone: it probes its
//! four neighbors against its private revealed-knowledge cache, dives into
//! the first unvisited walkable neighbor in a fixed preference order, and
//! retraces its path stack when nothing unvisited remains. Running out of
//! stack means exploration is complete.

use std::collections::HashMap;

use maze_forage_core::{AgentStep, Direction, KnownTerrain, MoveError, StepError, Tile};
use maze_forage_world::PlayerInterface;

/// Neighbor preference order for unvisited tiles: up, left, right, down.
///
/// This exact order is load-bearing for reproducible traversal; it is not
/// a clockwise sweep.
const PREFERENCE: [Direction; 4] = [
    Direction::Up,
    Direction::Left,
    Direction::Right,
    Direction::Down,
];

/// Result of a single DFS step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The agent moved one tile.
    Moved(AgentStep),
    /// The agent backtracked all the way to its start with nothing
    /// unvisited left; exploration is complete.
    Done,
}

/// Stateful depth-first explorer.
#[derive(Clone, Debug)]
pub struct Dfs {
    known: KnownTerrain,
    visited: HashMap<Tile, u32>,
    path: Vec<Tile>,
}

impl Dfs {
    /// Creates an agent positioned at the interface's current tile, seeded
    /// with whatever the interface currently exposes.
    #[must_use]
    pub fn new(interface: &PlayerInterface) -> Self {
        let mut known = KnownTerrain::new(interface.dim());
        known.absorb(&interface.current_visible_tiles());

        let start = interface.player_pos();
        let mut visited = HashMap::new();
        let _ = visited.insert(start, 1);
        Self {
            known,
            visited,
            path: vec![start],
        }
    }

    /// Performs one move: into the first unvisited walkable neighbor in
    /// preference order, or one tile back along the path stack.
    ///
    /// Fails with [`StepError::Undiscovered`] if a probed neighbor has
    /// never been revealed, which indicates an agent logic bug rather than
    /// a recoverable condition.
    pub fn step(&mut self, interface: &mut PlayerInterface) -> Result<StepOutcome, StepError> {
        let pos = interface.player_pos();

        let mut unvisited = None;
        for direction in PREFERENCE {
            let Some(tile) = pos.step(direction) else {
                continue;
            };
            if self.known.walkability(tile)? && !self.visited.contains_key(&tile) {
                unvisited = Some(AgentStep { direction, tile });
                break;
            }
        }

        match unvisited {
            Some(step) => {
                self.advance(interface, step)?;
                self.path.push(step.tile);
                Ok(StepOutcome::Moved(step))
            }
            None => self.backtrack(interface),
        }
    }

    /// Pops the current tile and retreats to the new top of the path stack.
    fn backtrack(&mut self, interface: &mut PlayerInterface) -> Result<StepOutcome, StepError> {
        if self.path.len() < 2 {
            return Ok(StepOutcome::Done);
        }
        let _ = self.path.pop();
        let Some(dest) = self.path.last().copied() else {
            return Ok(StepOutcome::Done);
        };

        let from = interface.player_pos();
        let direction = Direction::between(from, dest)
            .ok_or(StepError::Move(MoveError::NotAdjacent { from, to: dest }))?;
        let step = AgentStep { direction, tile: dest };
        self.advance(interface, step)?;
        Ok(StepOutcome::Moved(step))
    }

    fn advance(
        &mut self,
        interface: &mut PlayerInterface,
        step: AgentStep,
    ) -> Result<(), StepError> {
        let revealed = interface.move_to(step.tile)?;
        self.known.absorb(&revealed);
        *self.visited.entry(step.tile).or_insert(0) += 1;
        Ok(())
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

    /// Current path stack from the start tile to the agent's position,
    /// with backtracked suffixes popped.
    #[must_use]
    pub fn path(&self) -> &[Tile] {
        &self.path
    }
}
