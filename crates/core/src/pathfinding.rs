//! Best-first shortest-path search over the live grid.
//! This module exists so enemy pursuit can re-query routes against current occupancy.
//! It does not cache routes; every call allocates its own node table.

use std::collections::{BTreeMap, BTreeSet};

use crate::grid::Grid;
use crate::types::Pos;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Heuristic {
    /// `(x - goal.x) + (y - goal.y)`, signed. Negative when the goal lies below or right.
    #[default]
    SignedOffset,
    Manhattan,
}

impl Heuristic {
    fn estimate(self, pos: Pos, goal: Pos) -> i64 {
        match self {
            Heuristic::SignedOffset => i64::from(pos.x - goal.x) + i64::from(pos.y - goal.y),
            Heuristic::Manhattan => i64::from(pos.manhattan(goal)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: i64,
    seq: u64,
    y: i32,
    x: i32,
}

#[derive(Clone, Copy, Debug)]
struct NodeState {
    g: i64,
    parent: Option<Pos>,
}

/// Route from `start` to `goal`, both inclusive, or an empty route when the goal is unreachable.
pub fn find_path(grid: &Grid, start: Pos, goal: Pos) -> Vec<Pos> {
    find_path_with(grid, start, goal, Heuristic::default())
}

/// Like [`find_path`] with an explicit heuristic.
///
/// The open node with the lowest `f` is expanded next, ties going to the node enqueued first.
/// A neighbour is enqueued once, the first time it is seen, and only if it is unblocked and
/// unoccupied. The start tile itself may be occupied (it usually holds the searcher).
pub fn find_path_with(grid: &Grid, start: Pos, goal: Pos, heuristic: Heuristic) -> Vec<Pos> {
    if !grid.in_bounds(start) {
        return Vec::new();
    }
    let mut open_set = BTreeSet::new();
    let mut nodes: BTreeMap<Pos, NodeState> = BTreeMap::new();
    let mut seq = 0_u64;

    nodes.insert(start, NodeState { g: 0, parent: None });
    open_set.insert(OpenNode { f: heuristic.estimate(start, goal), seq, y: start.y, x: start.x });

    while let Some(current) = open_set.pop_first() {
        let p = Pos { y: current.y, x: current.x };
        if p == goal {
            return reconstruct_path(&nodes, start, goal);
        }
        let Some(cur_g) = nodes.get(&p).map(|node| node.g) else {
            continue;
        };
        for n in grid.adjacent(p) {
            if nodes.contains_key(&n) || !grid.is_walkable(n) {
                continue;
            }
            let g = cur_g + 1;
            seq += 1;
            nodes.insert(n, NodeState { g, parent: Some(p) });
            open_set.insert(OpenNode { f: g + heuristic.estimate(n, goal), seq, y: n.y, x: n.x });
        }
    }
    Vec::new()
}

fn reconstruct_path(nodes: &BTreeMap<Pos, NodeState>, start: Pos, goal: Pos) -> Vec<Pos> {
    let mut p = goal;
    let mut result = vec![p];
    while p != start {
        match nodes.get(&p).and_then(|node| node.parent) {
            Some(parent) => {
                p = parent;
                result.push(p);
            }
            None => return Vec::new(),
        }
    }
    result.reverse();
    result
}
