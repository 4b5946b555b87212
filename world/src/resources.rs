//! Placement, tracking, and simulated mining of maze resources.

use std::{collections::HashMap, time::Duration};

use maze_forage_core::{ResourceAllocation, Tile};
use rand::Rng;

/// Outcome of a single mining operation.
///
/// The delay contract of mining is modeled as a returned logical cost, not
/// a real block, so the core stays usable inside an event loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MineYield {
    /// Amount of resource extracted.
    pub mined: u32,
    /// Logical time the extraction took, proportional to capacity / rate.
    pub cost: Duration,
}

/// Finite stockpile of placeable resource units and their grid locations.
///
/// Invariant: the sum of all placed amounts plus the remaining stockpile
/// equals the original allocation until mining starts removing units.
#[derive(Clone, Debug)]
pub struct Resources {
    stockpile: u32,
    min_per_site: u32,
    max_per_site: u32,
    locations: HashMap<Tile, u32>,
    initial_total: u32,
}

impl Resources {
    /// Creates a ledger from the provided allocation. Per-site bounds are
    /// normalized so the minimum never exceeds the maximum.
    #[must_use]
    pub fn new(allocation: ResourceAllocation) -> Self {
        let low = allocation.min_per_site().min(allocation.max_per_site());
        let high = allocation.min_per_site().max(allocation.max_per_site());
        Self {
            stockpile: allocation.stockpile(),
            min_per_site: low,
            max_per_site: high,
            locations: HashMap::new(),
            initial_total: allocation.stockpile(),
        }
    }

    /// Remaining unplaced stockpile.
    #[must_use]
    pub const fn stockpile(&self) -> u32 {
        self.stockpile
    }

    /// Total allocation the ledger started with.
    #[must_use]
    pub const fn initial_total(&self) -> u32 {
        self.initial_total
    }

    /// Amount of resource currently sitting at the tile.
    #[must_use]
    pub fn amount_at(&self, tile: Tile) -> u32 {
        self.locations.get(&tile).copied().unwrap_or(0)
    }

    /// Reports whether the tile holds a nonzero amount.
    #[must_use]
    pub fn is_resource_site(&self, tile: Tile) -> bool {
        self.amount_at(tile) > 0
    }

    /// Placed amounts keyed by tile, including sites mined down to zero.
    #[must_use]
    pub fn locations(&self) -> &HashMap<Tile, u32> {
        &self.locations
    }

    /// Sum of every placed amount still sitting in the maze.
    #[must_use]
    pub fn placed_total(&self) -> u32 {
        self.locations.values().sum()
    }

    /// Number of sites currently holding a nonzero amount.
    #[must_use]
    pub fn site_count(&self) -> usize {
        self.locations.values().filter(|amount| **amount > 0).count()
    }

    /// Draws a uniformly random amount within the per-site bounds, clamped
    /// to the remaining stockpile, and deposits it at the tile. The
    /// stockpile never drops below zero.
    pub fn place<R: Rng>(&mut self, tile: Tile, rng: &mut R) {
        let drawn = rng.gen_range(self.min_per_site..=self.max_per_site);
        let amount = drawn.min(self.stockpile);
        let _ = self.locations.insert(tile, amount);
        self.stockpile -= amount;
    }

    /// Extracts up to `capacity` units from the source tile.
    ///
    /// Returns a zero yield with zero cost when the source is not a
    /// resource site; otherwise the ledger is decremented by the mined
    /// amount and the cost reflects the full capacity over the rate.
    /// Non-positive rates cost nothing.
    pub fn mine(&mut self, capacity: u32, rate: f64, source: Tile) -> MineYield {
        let Some(available) = self.locations.get_mut(&source).filter(|amount| **amount > 0)
        else {
            return MineYield {
                mined: 0,
                cost: Duration::ZERO,
            };
        };

        let mined = capacity.min(*available);
        *available -= mined;
        let cost = if rate > 0.0 {
            Duration::from_secs_f64(f64::from(capacity) / rate)
        } else {
            Duration::ZERO
        };
        MineYield { mined, cost }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_forage_core::ResourceAllocation;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(0x6d61_7a65)
    }

    #[test]
    fn place_conserves_the_allocation() {
        let mut resources = Resources::new(ResourceAllocation::new(20, 3, 7));
        let mut rng = rng();

        let mut site = 0;
        while resources.stockpile() > 0 {
            resources.place(Tile::new(site + 1, 1), &mut rng);
            site += 1;
        }

        assert_eq!(
            resources.placed_total() + resources.stockpile(),
            resources.initial_total()
        );
    }

    #[test]
    fn place_clamps_the_final_draw_to_the_stockpile() {
        let mut resources = Resources::new(ResourceAllocation::new(2, 5, 9));
        resources.place(Tile::new(1, 1), &mut rng());

        assert_eq!(resources.amount_at(Tile::new(1, 1)), 2);
        assert_eq!(resources.stockpile(), 0);
    }

    #[test]
    fn per_site_bounds_are_normalized() {
        let mut resources = Resources::new(ResourceAllocation::new(10, 6, 2));
        resources.place(Tile::new(1, 1), &mut rng());

        let amount = resources.amount_at(Tile::new(1, 1));
        assert!((2..=6).contains(&amount), "amount {amount} out of bounds");
    }

    #[test]
    fn mining_a_non_resource_tile_yields_nothing() {
        let mut resources = Resources::new(ResourceAllocation::new(5, 1, 2));
        let yielded = resources.mine(4, 2.0, Tile::new(3, 3));

        assert_eq!(yielded.mined, 0);
        assert_eq!(yielded.cost, Duration::ZERO);
    }

    #[test]
    fn mining_decrements_the_site_and_charges_for_capacity() {
        let mut resources = Resources::new(ResourceAllocation::new(5, 5, 5));
        let site = Tile::new(2, 2);
        resources.place(site, &mut rng());
        assert_eq!(resources.amount_at(site), 5);

        let yielded = resources.mine(3, 2.0, site);
        assert_eq!(yielded.mined, 3);
        assert_eq!(yielded.cost, Duration::from_secs_f64(1.5));
        assert_eq!(resources.amount_at(site), 2);

        let drained = resources.mine(10, 2.0, site);
        assert_eq!(drained.mined, 2);
        assert!(!resources.is_resource_site(site));

        let exhausted = resources.mine(10, 2.0, site);
        assert_eq!(exhausted.mined, 0);
        assert_eq!(exhausted.cost, Duration::ZERO);
    }
}
