use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::Coord;

/// A contiguous run of values covering the coordinates
/// `[from, from + items.len())`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment<T> {
    pub from: Coord,
    pub items: Vec<T>,
}

impl<T> Segment<T> {
    /// One past the last covered coordinate.
    pub fn end(&self) -> Coord {
        self.from + self.items.len() as Coord
    }

    pub fn contains(&self, at: Coord) -> bool {
        self.from <= at && at < self.end()
    }
}

/// Sparse one-dimensional array: an ordered list of non-overlapping,
/// non-touching segments. Any two segments are separated by at least one
/// uncovered coordinate; mutations merge runs that would touch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentList<T> {
    segments: Vec<Segment<T>>,
}

impl<T> Default for SegmentList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SegmentList<T> {
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn segments(&self) -> &[Segment<T>] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Index of the first segment whose run contains, follows, or directly
    /// touches `from`. Segments are sorted, so this is a binary search.
    pub fn find_segment_index(&self, from: Coord) -> usize {
        self.segments.partition_point(|segment| segment.end() < from)
    }

    /// Inserts a run starting at `from`, absorbing every segment it overlaps
    /// or touches into a single replacement segment. Values at overlapping
    /// coordinates are overwritten by `items`.
    pub fn put(&mut self, from: Coord, items: Vec<T>) {
        if items.is_empty() {
            return;
        }

        let to = from + items.len() as Coord;
        let target_index = self.find_segment_index(from);
        let target_contains = self
            .segments
            .get(target_index)
            .is_some_and(|segment| segment.from <= from);

        let mut merge_end = if target_contains {
            target_index + 1
        } else {
            target_index
        };
        while merge_end < self.segments.len() && self.segments[merge_end].from <= to {
            merge_end += 1;
        }

        let absorbed: Vec<Segment<T>> = self.segments.drain(target_index..merge_end).collect();
        let mut absorbed = absorbed.into_iter();

        let mut merged = if target_contains {
            let mut segment = absorbed.next().expect("target segment was drained");
            overlay(&mut segment.items, (from - segment.from) as usize, items);
            segment
        } else {
            Segment { from, items }
        };

        for segment in absorbed {
            // Values covered by the new run are already final; only the part
            // of an absorbed segment reaching past it survives.
            let keep_from = ((to - segment.from).max(0) as usize).min(segment.items.len());
            let offset = (segment.from - merged.from) as usize + keep_from;
            let tail: Vec<T> = segment.items.into_iter().skip(keep_from).collect();
            overlay(&mut merged.items, offset, tail);
        }

        self.segments.insert(target_index, merged);
    }

    /// Reads a fixed-length window. Coordinates not covered by any segment
    /// come back as `None`, including gaps between segments.
    pub fn get(&self, from: Coord, count: usize) -> Vec<Option<&T>> {
        let to = from + count as Coord;
        let mut out = vec![None; count];

        for segment in &self.segments[self.find_segment_index(from)..] {
            if segment.from >= to {
                break;
            }

            let skip = (from - segment.from).max(0) as usize;
            for (index, value) in segment.items.iter().enumerate().skip(skip) {
                let at = segment.from + index as Coord;
                if at >= to {
                    break;
                }
                out[(at - from) as usize] = Some(value);
            }
        }

        out
    }

    /// Removes a window and returns the covered values with the same
    /// absent-padding contract as [`SegmentList::get`]. Segments are split,
    /// shrunk (shifting `from` past a removed prefix), or dropped entirely.
    pub fn remove(&mut self, from: Coord, count: usize) -> Vec<Option<T>> {
        let to = from + count as Coord;
        let mut removed: Vec<Option<T>> = (0..count).map(|_| None).collect();

        let mut index = self.find_segment_index(from);
        while index < self.segments.len() {
            let segment_from = self.segments[index].from;
            let segment_end = self.segments[index].end();

            if segment_from >= to {
                break;
            }

            if segment_from >= from && segment_end <= to {
                // Fully covered: the whole segment goes away.
                let segment = self.segments.remove(index);
                for (offset, value) in segment.items.into_iter().enumerate() {
                    removed[(segment.from + offset as Coord - from) as usize] = Some(value);
                }
                continue;
            }

            if segment_from < from && segment_end > to {
                // Covered range lies strictly inside: split in two.
                let segment = &mut self.segments[index];
                let tail = segment.items.split_off((to - segment.from) as usize);
                let cut = segment.items.split_off((from - segment.from) as usize);
                for (offset, value) in cut.into_iter().enumerate() {
                    removed[offset] = Some(value);
                }
                self.segments.insert(index + 1, Segment { from: to, items: tail });
                break;
            }

            if segment_from < from {
                // Only the suffix of this segment is covered.
                let segment = &mut self.segments[index];
                let cut = segment.items.split_off((from - segment.from) as usize);
                for (offset, value) in cut.into_iter().enumerate() {
                    removed[offset] = Some(value);
                }
                index += 1;
                continue;
            }

            // Only the prefix is covered: shift `from` past the removed part.
            let segment = &mut self.segments[index];
            let kept = segment.items.split_off((to - segment.from) as usize);
            let cut = core::mem::replace(&mut segment.items, kept);
            for (offset, value) in cut.into_iter().enumerate() {
                removed[(segment_from + offset as Coord - from) as usize] = Some(value);
            }
            segment.from = to;
            break;
        }

        removed
    }

    /// Visits every stored value with its coordinate, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &T)> {
        self.segments.iter().flat_map(|segment| {
            segment
                .items
                .iter()
                .enumerate()
                .map(move |(index, value)| (segment.from + index as Coord, value))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Coord, &mut T)> {
        self.segments.iter_mut().flat_map(|segment| {
            let from = segment.from;
            segment
                .items
                .iter_mut()
                .enumerate()
                .map(move |(index, value)| (from + index as Coord, value))
        })
    }

    pub fn contains(&self, at: Coord) -> bool {
        self.segment_at(at).is_some()
    }

    pub fn get_single(&self, at: Coord) -> Option<&T> {
        let segment = self.segment_at(at)?;
        Some(&segment.items[(at - segment.from) as usize])
    }

    pub fn get_single_mut(&mut self, at: Coord) -> Option<&mut T> {
        let index = self.find_segment_index(at);
        let segment = self.segments.get_mut(index)?;
        if segment.contains(at) {
            Some(&mut segment.items[(at - segment.from) as usize])
        } else {
            None
        }
    }

    /// Returns the value stored at `at`, inserting a single-coordinate run
    /// from `create` first when the coordinate is uncovered.
    pub fn get_or_insert_with(&mut self, at: Coord, create: impl FnOnce() -> T) -> &mut T {
        if !self.contains(at) {
            self.put(at, vec![create()]);
        }
        self.get_single_mut(at).expect("coordinate was just covered")
    }

    fn segment_at(&self, at: Coord) -> Option<&Segment<T>> {
        let segment = self.segments.get(self.find_segment_index(at))?;
        segment.contains(at).then_some(segment)
    }
}

impl<T: Clone> SegmentList<T> {
    /// Like [`SegmentList::get`], but keeps the result as a segment list
    /// restricted to the window instead of flattening it.
    pub fn slice(&self, from: Coord, count: usize) -> SegmentList<T> {
        let to = from + count as Coord;
        let mut out = SegmentList::new();

        for segment in &self.segments[self.find_segment_index(from)..] {
            if segment.from >= to {
                break;
            }

            let begin = (from - segment.from).max(0) as usize;
            let end = (to - segment.from).min(segment.items.len() as Coord) as usize;
            if begin >= end {
                continue;
            }

            out.segments.push(Segment {
                from: segment.from + begin as Coord,
                items: segment.items[begin..end].to_vec(),
            });
        }

        out
    }
}

/// Writes `src` over `dst` starting at `offset`, growing `dst` as needed.
/// `offset` must not exceed `dst.len()`.
fn overlay<T>(dst: &mut Vec<T>, offset: usize, src: Vec<T>) {
    debug_assert!(offset <= dst.len());
    for (index, value) in src.into_iter().enumerate() {
        let at = offset + index;
        if at < dst.len() {
            dst[at] = value;
        } else {
            dst.push(value);
        }
    }
}
