use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use hashbrown::{HashMap, HashSet};

use crate::{chebyshev_dist, drop_layer, iter_neighbors2, step_cost, Pos2, Pos3};

/// Obstacle policy for a path query.
///
/// `is_obstacle` marks impassable cells. When the target itself is an
/// obstacle and `accept_near_target` is set, the search ends on the closest
/// frontier cell instead of failing, stepping onto the target only if
/// `can_enter_target` allows it (e.g. the target is unrevealed but not
/// flagged).
pub struct PathRules<O, E> {
    pub is_obstacle: O,
    pub accept_near_target: bool,
    pub can_enter_target: E,
}

struct NodeInfo {
    prev: Pos2,
    path_score: f64,
}

/// Heap entry ordered min-first by the estimated total score. A cheaper
/// route to a queued position is handled by pushing a fresh entry and
/// skipping the stale one when it surfaces.
#[derive(Copy, Clone, Debug, PartialEq)]
struct OpenNode {
    pos: Pos2,
    guess_score: f64,
}

impl Eq for OpenNode {}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        other.guess_score.total_cmp(&self.guess_score)
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// A* over the 8-connected plane at the source's layer.
///
/// Step costs are Euclidean (1 orthogonal, √2 diagonal) with a Chebyshev
/// heuristic. The returned path excludes the source coordinate; `None`
/// means no acceptable path exists, which is a normal outcome and not an
/// error.
pub fn shortest_path<O, E>(source: Pos3, target: Pos2, mut rules: PathRules<O, E>) -> Option<Vec<Pos2>>
where
    O: FnMut(Pos2) -> bool,
    E: FnMut(Pos2) -> bool,
{
    let source = drop_layer(source);

    let mut node_infos: HashMap<Pos2, NodeInfo> = HashMap::new();
    let mut closed: HashSet<Pos2> = HashSet::new();
    let mut open: BinaryHeap<OpenNode> = BinaryHeap::new();

    node_infos.insert(
        source,
        NodeInfo {
            prev: source,
            path_score: 0.0,
        },
    );
    open.push(OpenNode {
        pos: source,
        guess_score: chebyshev_dist(source, target) as f64,
    });

    while let Some(OpenNode { pos: current, .. }) = open.pop() {
        if !closed.insert(current) {
            continue;
        }

        if current == target {
            return Some(reconstruct_path(&node_infos, current, source));
        }

        let current_score = node_infos
            .get(&current)
            .expect("open nodes are recorded before queueing")
            .path_score;

        for neighbor in iter_neighbors2(current) {
            if closed.contains(&neighbor) {
                continue;
            }

            if (rules.is_obstacle)(neighbor) {
                if neighbor != target || !rules.accept_near_target {
                    continue;
                }

                let mut path = reconstruct_path(&node_infos, current, source);
                if (rules.can_enter_target)(neighbor) {
                    path.push(neighbor);
                }
                return Some(path);
            }

            let tentative = current_score + step_cost(current, neighbor);
            let known = node_infos.get(&neighbor).map(|info| info.path_score);
            if known.is_none_or(|score| tentative < score) {
                node_infos.insert(
                    neighbor,
                    NodeInfo {
                        prev: current,
                        path_score: tentative,
                    },
                );
                open.push(OpenNode {
                    pos: neighbor,
                    guess_score: tentative + chebyshev_dist(neighbor, target) as f64,
                });
            }
        }
    }

    None
}

/// Walks `prev` pointers back to the source, then reverses. The source
/// itself is not part of the returned path.
fn reconstruct_path(node_infos: &HashMap<Pos2, NodeInfo>, goal: Pos2, source: Pos2) -> Vec<Pos2> {
    let mut path = Vec::new();
    let mut pos = goal;

    while pos != source {
        path.push(pos);
        pos = node_infos
            .get(&pos)
            .expect("path nodes are linked before expansion")
            .prev;
    }

    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn open_plane<'a>(
        obstacles: &'a [Pos2],
        accept_near_target: bool,
        blocked_targets: &'a [Pos2],
    ) -> PathRules<impl FnMut(Pos2) -> bool + 'a, impl FnMut(Pos2) -> bool + 'a> {
        PathRules {
            is_obstacle: move |pos| obstacles.contains(&pos),
            accept_near_target,
            can_enter_target: move |pos| !blocked_targets.contains(&pos),
        }
    }

    #[test]
    fn straight_line_east() {
        let path = shortest_path((0, 0, 0), (5, 0), open_plane(&[], false, &[]));

        assert_eq!(
            path,
            Some(vec![(1, 0), (2, 0), (3, 0), (4, 0), (5, 0)]),
        );
    }

    #[test]
    fn open_plane_path_length_is_chebyshev_distance() {
        for target in [(4, 2), (-3, -3), (0, 6), (-5, 1)] {
            let path = shortest_path((0, 0, 0), target, open_plane(&[], false, &[]))
                .expect("open plane is always reachable");

            assert_eq!(path.len() as i64, chebyshev_dist((0, 0), target));
            assert_eq!(*path.last().unwrap(), target);
        }
    }

    #[test]
    fn source_equals_target_yields_an_empty_path() {
        let path = shortest_path((3, 3, 0), (3, 3), open_plane(&[], false, &[]));

        assert_eq!(path, Some(vec![]));
    }

    #[test]
    fn walls_are_routed_around() {
        // A vertical wall at x = 2 with a single opening at y = 3.
        let wall: Vec<Pos2> = (-3..=6)
            .filter(|&y| y != 3)
            .map(|y| (2, y))
            .collect();

        let path = shortest_path((0, 0, 0), (4, 0), open_plane(&wall, false, &[]))
            .expect("the opening keeps the target reachable");

        assert!(path.iter().all(|pos| !wall.contains(pos)));
        assert!(path.contains(&(2, 3)));
        assert_eq!(*path.last().unwrap(), (4, 0));
    }

    #[test]
    fn fully_enclosed_target_has_no_path() {
        // Walkable terrain is bounded; on a truly infinite open plane the
        // search for an unreachable target would never exhaust the open set.
        let ring: Vec<Pos2> = iter_neighbors2((5, 5)).collect();
        let rules = PathRules {
            is_obstacle: |pos: Pos2| {
                ring.contains(&pos) || pos.0.abs() > 10 || pos.1.abs() > 10
            },
            accept_near_target: false,
            can_enter_target: |_| true,
        };

        let path = shortest_path((0, 0, 0), (5, 5), rules);

        assert_eq!(path, None);
    }

    #[test]
    fn near_target_stops_adjacent_to_an_obstacle_target() {
        let obstacles = [(3, 0)];

        let path = shortest_path((0, 0, 0), (3, 0), open_plane(&obstacles, true, &[(3, 0)]))
            .expect("near-target paths are accepted");

        // Ends next to the target without stepping onto it.
        assert_eq!(path, vec![(1, 0), (2, 0)]);
    }

    #[test]
    fn near_target_steps_onto_an_enterable_target() {
        let obstacles = [(3, 0)];

        let path = shortest_path((0, 0, 0), (3, 0), open_plane(&obstacles, true, &[]))
            .expect("near-target paths are accepted");

        assert_eq!(path, vec![(1, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn without_near_target_an_obstacle_target_fails() {
        // Bounded for the same reason as fully_enclosed_target_has_no_path.
        let rules = PathRules {
            is_obstacle: |pos: Pos2| pos == (3, 0) || pos.0.abs() > 10 || pos.1.abs() > 10,
            accept_near_target: false,
            can_enter_target: |_| true,
        };

        let path = shortest_path((0, 0, 0), (3, 0), rules);

        assert_eq!(path, None);
    }

    #[test]
    fn diagonal_shortcuts_beat_orthogonal_detours() {
        // Brute-force check on a small open grid: the A* cost matches the
        // optimal mix of diagonal and straight steps.
        let path = shortest_path((0, 0, 0), (3, 2), open_plane(&[], false, &[]))
            .expect("open plane is always reachable");

        let cost: f64 = core::iter::once((0, 0))
            .chain(path.iter().copied())
            .collect::<Vec<_>>()
            .windows(2)
            .map(|pair| step_cost(pair[0], pair[1]))
            .sum();

        let expected = 2.0 * core::f64::consts::SQRT_2 + 1.0;
        assert!((cost - expected).abs() < 1e-9, "cost was {cost}");
    }
}
