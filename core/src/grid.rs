use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::{Coord, Pos2, Pos3, Rect2, Rect3, SegmentList};

/// Sparse three-dimensional lookup table addressed z, then y, then x.
///
/// Built from three nested [`SegmentList`] levels; only materialized cells
/// consume memory, and coordinates are unbounded on every axis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid3<T> {
    segments: SegmentList<SegmentList<SegmentList<T>>>,
}

impl<T> Default for Grid3<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Grid3<T> {
    pub const fn new() -> Self {
        Self {
            segments: SegmentList::new(),
        }
    }

    /// Stores a contiguous run of cells along the x axis.
    pub fn set_row(&mut self, (x, y, z): Pos3, items: Vec<T>) {
        let layer = self.segments.get_or_insert_with(z, SegmentList::new);
        let row = layer.get_or_insert_with(y, SegmentList::new);
        row.put(x, items);
    }

    pub fn set_cell(&mut self, pos: Pos3, item: T) {
        self.set_row(pos, vec![item]);
    }

    /// Reads a run of cells along the x axis, absent-padded.
    pub fn get_row(&self, (x, y, z): Pos3, count: usize) -> Vec<Option<&T>> {
        match self.row(y, z) {
            Some(row) => row.get(x, count),
            None => vec![None; count],
        }
    }

    pub fn get_cell(&self, (x, y, z): Pos3) -> Option<&T> {
        self.row(y, z)?.get_single(x)
    }

    pub fn get_cell_mut(&mut self, (x, y, z): Pos3) -> Option<&mut T> {
        self.segments
            .get_single_mut(z)?
            .get_single_mut(y)?
            .get_single_mut(x)
    }

    pub fn has_cell(&self, pos: Pos3) -> bool {
        self.get_cell(pos).is_some()
    }

    /// Returns the cell at `pos`, materializing it with `create` first when
    /// it does not exist yet.
    pub fn get_or_create_cell(&mut self, (x, y, z): Pos3, create: impl FnOnce() -> T) -> &mut T {
        self.segments
            .get_or_insert_with(z, SegmentList::new)
            .get_or_insert_with(y, SegmentList::new)
            .get_or_insert_with(x, create)
    }

    /// Visits every materialized cell with its position, ascending by
    /// segment within each axis.
    pub fn iter(&self) -> impl Iterator<Item = (Pos3, &T)> {
        self.segments.iter().flat_map(|(z, layer)| {
            layer.iter().flat_map(move |(y, row)| {
                row.iter().map(move |(x, cell)| ((x, y, z), cell))
            })
        })
    }

    fn row(&self, y: Coord, z: Coord) -> Option<&SegmentList<T>> {
        self.segments.get_single(z)?.get_single(y)
    }
}

impl<T: Clone> Grid3<T> {
    /// Copies the cells inside `rect` (inclusive bounds) into a new grid
    /// with unchanged coordinates. Used for windowed reads such as minimap
    /// and render extracts.
    pub fn get_slice(&self, rect: &Rect3) -> Grid3<T> {
        let Some(z_count) = axis_count(rect.min.2, rect.max.2) else {
            return Grid3::new();
        };
        let Some(y_count) = axis_count(rect.min.1, rect.max.1) else {
            return Grid3::new();
        };
        let Some(x_count) = axis_count(rect.min.0, rect.max.0) else {
            return Grid3::new();
        };

        let mut sliced = self.segments.slice(rect.min.2, z_count);
        for (_, layer) in sliced.iter_mut() {
            *layer = layer.slice(rect.min.1, y_count);
            for (_, row) in layer.iter_mut() {
                *row = row.slice(rect.min.0, x_count);
            }
        }

        Grid3 { segments: sliced }
    }
}

/// Sparse two-dimensional grid: the same structure as [`Grid3`] with one
/// fewer nesting level, addressed y, then x.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid2<T> {
    segments: SegmentList<SegmentList<T>>,
}

impl<T> Default for Grid2<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Grid2<T> {
    pub const fn new() -> Self {
        Self {
            segments: SegmentList::new(),
        }
    }

    pub fn set_row(&mut self, (x, y): Pos2, items: Vec<T>) {
        let row = self.segments.get_or_insert_with(y, SegmentList::new);
        row.put(x, items);
    }

    pub fn set_cell(&mut self, pos: Pos2, item: T) {
        self.set_row(pos, vec![item]);
    }

    pub fn get_row(&self, (x, y): Pos2, count: usize) -> Vec<Option<&T>> {
        match self.segments.get_single(y) {
            Some(row) => row.get(x, count),
            None => vec![None; count],
        }
    }

    pub fn get_cell(&self, (x, y): Pos2) -> Option<&T> {
        self.segments.get_single(y)?.get_single(x)
    }

    pub fn get_cell_mut(&mut self, (x, y): Pos2) -> Option<&mut T> {
        self.segments.get_single_mut(y)?.get_single_mut(x)
    }

    pub fn has_cell(&self, pos: Pos2) -> bool {
        self.get_cell(pos).is_some()
    }

    pub fn get_or_create_cell(&mut self, (x, y): Pos2, create: impl FnOnce() -> T) -> &mut T {
        self.segments
            .get_or_insert_with(y, SegmentList::new)
            .get_or_insert_with(x, create)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pos2, &T)> {
        self.segments.iter().flat_map(|(y, row)| {
            row.iter().map(move |(x, cell)| ((x, y), cell))
        })
    }
}

impl<T: Clone> Grid2<T> {
    pub fn get_slice(&self, rect: &Rect2) -> Grid2<T> {
        let Some(y_count) = axis_count(rect.min.1, rect.max.1) else {
            return Grid2::new();
        };
        let Some(x_count) = axis_count(rect.min.0, rect.max.0) else {
            return Grid2::new();
        };

        let mut sliced = self.segments.slice(rect.min.1, y_count);
        for (_, row) in sliced.iter_mut() {
            *row = row.slice(rect.min.0, x_count);
        }

        Grid2 { segments: sliced }
    }
}

fn axis_count(min: Coord, max: Coord) -> Option<usize> {
    (max >= min).then_some((max - min + 1) as usize)
}
