use alloc::vec;
use alloc::vec::Vec;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{
    cell_has_bomb, iter_planar_neighbors, on_layer, shortest_path, BoardConfig, CellData,
    EntityId, GridError, Grid3, PathRules, Pos2, Pos3, Result,
};

/// Outcome of a single cluster reveal, reported as plain values for the
/// embedding game's scoring and damage logic to consume.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealReport {
    /// The cascade ran into a bomb and stopped; the caller treats this as
    /// the player triggering it.
    pub hit_bomb: bool,
    pub revealed_cells: u32,
    pub correct_guesses: u32,
}

impl RevealReport {
    pub const fn is_safe(&self) -> bool {
        !self.hit_bomb
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Placed,
    Removed,
}

/// The playing field: a sparse unbounded grid of lazily generated cells.
///
/// All mutation happens through `get_or_create`, which binds the
/// deterministic generator to the grid so any algorithm can touch any
/// coordinate without caring whether it was materialized before.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Board {
    config: BoardConfig,
    grid: Grid3<CellData>,
}

impl Board {
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            grid: Grid3::new(),
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Read-only grid access for rendering, minimaps and path queries.
    pub fn grid(&self) -> &Grid3<CellData> {
        &self.grid
    }

    /// Direct grid access for scenario setup, e.g. hand-placed bombs in a
    /// tutorial level. Bypasses the deterministic generator.
    pub fn grid_mut(&mut self) -> &mut Grid3<CellData> {
        &mut self.grid
    }

    pub fn cell(&self, pos: Pos3) -> Option<&CellData> {
        self.grid.get_cell(pos)
    }

    /// Lookup for cells that must exist by invariant, e.g. the cell an
    /// entity is standing on. Absence is a programming error upstream, not
    /// a recoverable condition.
    pub fn cell_checked(&self, pos: Pos3) -> Result<&CellData> {
        self.cell(pos).ok_or(GridError::MissingCell(pos))
    }

    /// Returns the cell at `pos`, generating and storing it first if it was
    /// never materialized. The bomb decision is fixed at creation time.
    pub fn get_or_create(&mut self, pos: Pos3) -> &mut CellData {
        let seed = self.config.seed;
        let probability = self.probability_at(pos);
        self.grid
            .get_or_create_cell(pos, || CellData::new(cell_has_bomb(seed, pos, probability)))
    }

    /// Safe-zone policy: cells around the origin spawn are always clear.
    fn probability_at(&self, (x, y, _z): Pos3) -> f64 {
        if self.config.safe_zone && x.abs() <= 1 && y.abs() <= 1 {
            0.0
        } else {
            self.config.bomb_probability
        }
    }

    /// Toggles the player marker on an unrevealed cell. Revealed cells
    /// cannot be flagged.
    pub fn toggle_flag(&mut self, pos: Pos3) -> FlagOutcome {
        let cell = self.get_or_create(pos);
        if cell.revealed {
            return FlagOutcome::NoChange;
        }

        cell.flag = !cell.flag;
        if cell.flag {
            FlagOutcome::Placed
        } else {
            FlagOutcome::Removed
        }
    }

    /// Records an occupant on a cell, materializing it if needed.
    pub fn place_entity(&mut self, pos: Pos3, entity: EntityId) {
        let cell = self.get_or_create(pos);
        if !cell.entities.contains(&entity) {
            cell.entities.push(entity);
        }
    }

    /// Moves an occupant between cells. The source cell must exist and hold
    /// the entity; an entity leaving a cell that was never materialized
    /// means the caller's bookkeeping is already corrupt.
    pub fn move_entity(&mut self, from: Pos3, to: Pos3, entity: EntityId) -> Result<()> {
        let cell = self
            .grid
            .get_cell_mut(from)
            .ok_or(GridError::MissingCell(from))?;
        cell.entities.retain(|&occupant| occupant != entity);
        self.place_entity(to, entity);
        Ok(())
    }

    /// Reveals the cluster reachable from `start`: the connected region of
    /// cells without bomb neighbors, plus its numbered boundary.
    ///
    /// Neighbors of every processed cell become visible (lose `hidden`)
    /// even when they stay unrevealed, which is what drives the fog of war.
    /// Hitting a bomb stops the pass immediately and is reported as a
    /// value, not an error. Flagged cells are never revealed.
    pub fn reveal_cluster(&mut self, start: Pos3) -> RevealReport {
        let mut report = RevealReport::default();

        let start_cell = self.get_or_create(start);
        start_cell.hidden = false;
        // A bomb start never counts as a correct guess, nor does a click
        // that a flag is about to veto.
        if start_cell.is_unrevealed() && !start_cell.has_bomb && !start_cell.flag {
            report.correct_guesses += 1;
        }

        let mut stack: Vec<Pos3> = vec![start];
        let mut visited: HashSet<Pos3> = HashSet::new();

        while let Some(pos) = stack.pop() {
            if !visited.insert(pos) {
                continue;
            }

            let cell = self.get_or_create(pos);
            if cell.flag {
                continue;
            }
            if cell.is_unrevealed() {
                cell.revealed = true;
                report.revealed_cells += 1;
            }
            let stepped_on_bomb = cell.has_bomb;

            // Materialize the full Moore neighborhood and lift its fog.
            let neighbors: SmallVec<[Pos3; 8]> = iter_planar_neighbors(pos).collect();
            let mut bomb_neighbors: SmallVec<[Pos3; 8]> = SmallVec::new();
            for &neighbor_pos in &neighbors {
                let neighbor = self.get_or_create(neighbor_pos);
                neighbor.hidden = false;
                if neighbor.has_bomb {
                    bomb_neighbors.push(neighbor_pos);
                }
            }

            if stepped_on_bomb {
                log::debug!("reveal at {pos:?} triggered a bomb");
                report.hit_bomb = true;
                return report;
            }

            if bomb_neighbors.is_empty() {
                // Zero tile: the cascade keeps flowing.
                stack.extend(neighbors.iter().copied());
            } else {
                // Numbered boundary: stop here and settle the counts.
                for &bomb_pos in &bomb_neighbors {
                    self.process_bomb(bomb_pos);
                }
            }
        }

        report
    }

    /// Propagates one bomb's adjacency contribution to its neighbors,
    /// consuming the `bomb_pending` marker so each bomb is settled exactly
    /// once. Bombs discovered while settling join the worklist, so clusters
    /// of touching bombs resolve together; a bomb cell itself never gets a
    /// count.
    fn process_bomb(&mut self, pos: Pos3) {
        let mut worklist: Vec<Pos3> = vec![pos];

        while let Some(bomb_pos) = worklist.pop() {
            let cell = self.get_or_create(bomb_pos);
            if !cell.bomb_pending {
                continue;
            }
            cell.bomb_pending = false;

            for neighbor_pos in iter_planar_neighbors(bomb_pos) {
                let neighbor = self.get_or_create(neighbor_pos);
                if neighbor.has_bomb {
                    if neighbor.bomb_pending {
                        worklist.push(neighbor_pos);
                    }
                } else {
                    *neighbor.adjacent_bombs.get_or_insert(0) += 1;
                }
            }
        }
    }

    /// Shortest walking path from `source` to `target` on the source's
    /// layer, using the click-to-walk policy: only revealed, bomb-free
    /// cells are passable, an unreachable target still yields the path to
    /// the closest adjacent cell, and the final step onto the target is
    /// taken unless it is flagged.
    pub fn find_path(&self, source: Pos3, target: Pos2) -> Option<Vec<Pos2>> {
        let z = source.2;
        let path = shortest_path(
            source,
            target,
            PathRules {
                is_obstacle: |pos| {
                    self.grid
                        .get_cell(on_layer(pos, z))
                        .is_none_or(|cell| cell.is_unrevealed() || cell.has_bomb)
                },
                accept_near_target: true,
                can_enter_target: |pos| {
                    self.grid
                        .get_cell(on_layer(pos, z))
                        .is_none_or(|cell| !cell.flag)
                },
            },
        );
        if path.is_none() {
            log::debug!("no walkable path from {source:?} to {target:?}");
        }
        path
    }
}
