//! Monitor topology.
//!
//! [`AdjacencyMap`] answers "which monitor lies `<direction>` of monitor
//! `i`?" for every [`Direction`].  It is derived purely from the monitor
//! rectangles, in one of two ways (see [`Strategy`]):
//!
//! * **scored**: every monitor is probed by shifting a copy of it one full
//!   width/height in each direction; the monitor covering the largest share
//!   of the probe becomes the neighbor.  Handles staggered and mixed-size
//!   layouts.  `next`/`prev` follow reading order.
//! * **touching**: only checks whether the right/down probe overlaps a
//!   monitor at all.  `next`/`prev` follow enumeration order.
//!
//! In both strategies a later candidate only replaces an earlier one when it
//! is strictly better, so ties go to the monitor enumerated first.

use crate::command::Direction;
use crate::geometry::{intersection_area, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How spatial neighbors are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Largest overlap ratio wins.
    #[default]
    Scored,
    /// Any overlap counts.
    Touching,
}

/// Topology settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TopologyConfig {
    pub strategy: Strategy,
    /// Weight of the vertical center coordinate in the reading-order key
    /// `center_x + order_y_weight * center_y`.  Only used by
    /// [`Strategy::Scored`].
    pub order_y_weight: u32,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Scored,
            order_y_weight: 8,
        }
    }
}

/// Directed neighbor relation between monitors, indexed by their position
/// in the monitor list.
///
/// `Fit` always maps a monitor to itself.  A missing spatial neighbor is
/// `None`, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMap {
    slots: HashMap<Direction, Vec<Option<usize>>>,
    len: usize,
}

impl AdjacencyMap {
    /// A map for `len` monitors with no neighbors besides the `Fit`
    /// self-mapping.
    fn unlinked(len: usize) -> Self {
        let mut slots: HashMap<Direction, Vec<Option<usize>>> = Direction::ALL
            .iter()
            .map(|d| (*d, vec![None; len]))
            .collect();
        slots.insert(Direction::Fit, (0..len).map(Some).collect());
        Self { slots, len }
    }

    /// Build the map with the configured strategy.
    pub fn build(monitors: &[Rect], config: &TopologyConfig) -> Self {
        match config.strategy {
            Strategy::Scored => Self::scored(monitors, config.order_y_weight),
            Strategy::Touching => Self::touching(monitors),
        }
    }

    /// Ratio-scored neighbors; `next`/`prev` in reading order.
    pub fn scored(monitors: &[Rect], order_y_weight: u32) -> Self {
        let acc = ordered_pairs(monitors.len()).fold(
            ScoreAccumulator::new(monitors.len()),
            |acc, (a, b)| score_pair(acc, monitors, a, b),
        );
        let mut map = acc.into_map();
        map.link_cycle(&reading_order(monitors, order_y_weight));
        map
    }

    /// Existence-based neighbors; `next`/`prev` in enumeration order.
    pub fn touching(monitors: &[Rect]) -> Self {
        let mut map = Self::unlinked(monitors.len());
        for (a, b) in ordered_pairs(monitors.len()) {
            let ra = &monitors[a];
            let shifted_right = ra.translated(ra.width as i64, 0);
            if intersection_area(&shifted_right, &monitors[b]) > 0 {
                map.link_first(Direction::Right, a, b);
                map.link_first(Direction::Left, b, a);
            }
            let shifted_down = ra.translated(0, ra.height as i64);
            if intersection_area(&shifted_down, &monitors[b]) > 0 {
                map.link_first(Direction::Down, a, b);
                map.link_first(Direction::Up, b, a);
            }
        }
        let order: Vec<usize> = (0..monitors.len()).collect();
        map.link_cycle(&order);
        map
    }

    /// Number of monitors the map was built for.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The monitor `direction` of `monitor`, if any.
    pub fn get(&self, direction: Direction, monitor: usize) -> Option<usize> {
        self.slots
            .get(&direction)
            .and_then(|v| v.get(monitor))
            .copied()
            .flatten()
    }

    fn set(&mut self, direction: Direction, monitor: usize, neighbor: usize) {
        if let Some(slot) = self
            .slots
            .get_mut(&direction)
            .and_then(|v| v.get_mut(monitor))
        {
            *slot = Some(neighbor);
        }
    }

    /// Set the slot unless an earlier candidate already claimed it.
    fn link_first(&mut self, direction: Direction, monitor: usize, neighbor: usize) {
        if self.get(direction, monitor).is_none() {
            self.set(direction, monitor, neighbor);
        }
    }

    /// Chain `order` into a cycle for `Next` and `Prev`.
    fn link_cycle(&mut self, order: &[usize]) {
        let n = order.len();
        for (k, &idx) in order.iter().enumerate() {
            self.set(Direction::Next, idx, order[(k + 1) % n]);
            self.set(Direction::Prev, idx, order[(k + n - 1) % n]);
        }
    }
}

/// Every `(a, b)` with `a != b`, in enumeration order.
fn ordered_pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |a| (0..n).filter(move |&b| b != a).map(move |b| (a, b)))
}

/// Running best neighbor and its overlap ratio for each spatial slot.
#[derive(Debug, Clone)]
pub struct ScoreAccumulator {
    best: HashMap<(Direction, usize), f64>,
    map: AdjacencyMap,
}

impl ScoreAccumulator {
    pub fn new(len: usize) -> Self {
        Self {
            best: HashMap::new(),
            map: AdjacencyMap::unlinked(len),
        }
    }

    /// Offer `neighbor` for slot `(direction, monitor)` with the given
    /// ratio.  Replaces the current holder only if strictly better.
    fn offer(mut self, direction: Direction, monitor: usize, neighbor: usize, ratio: f64) -> Self {
        let best = self.best.get(&(direction, monitor)).copied().unwrap_or(0.0);
        if ratio > best {
            self.best.insert((direction, monitor), ratio);
            self.map.set(direction, monitor, neighbor);
        }
        self
    }

    /// The best ratio recorded so far for a slot.
    pub fn best_ratio(&self, direction: Direction, monitor: usize) -> f64 {
        self.best.get(&(direction, monitor)).copied().unwrap_or(0.0)
    }

    pub fn into_map(self) -> AdjacencyMap {
        self.map
    }
}

/// The four probes of a monitor: `(direction, opposite, dx, dy)`.
fn probes(r: &Rect) -> [(Direction, Direction, i64, i64); 4] {
    let w = r.width as i64;
    let h = r.height as i64;
    [
        (Direction::Right, Direction::Left, w, 0),
        (Direction::Left, Direction::Right, -w, 0),
        (Direction::Down, Direction::Up, 0, h),
        (Direction::Up, Direction::Down, 0, -h),
    ]
}

/// Score monitor `b` as a neighbor of monitor `a`.
///
/// Each probe of `a` is compared against `b`; the ratio is the share of
/// `a`'s own area that the shifted copy would overlap with `b`.  The same
/// ratio is offered both to `a`'s slot and to the opposite slot of `b`, each
/// against its own running maximum.
pub fn score_pair(
    acc: ScoreAccumulator,
    monitors: &[Rect],
    a: usize,
    b: usize,
) -> ScoreAccumulator {
    let ra = &monitors[a];
    let rb = &monitors[b];
    let area = ra.area();
    if area == 0 {
        return acc;
    }
    probes(ra)
        .into_iter()
        .fold(acc, |acc, (dir, opposite, dx, dy)| {
            let overlap = intersection_area(&ra.translated(dx, dy), rb);
            if overlap == 0 {
                return acc;
            }
            let ratio = overlap as f64 / area as f64;
            acc.offer(dir, a, b, ratio).offer(opposite, b, a, ratio)
        })
}

/// Monitor indices sorted by `center_x + y_weight * center_y`.
///
/// Equal keys keep enumeration order.
pub fn reading_order(monitors: &[Rect], y_weight: u32) -> Vec<usize> {
    let mut order: Vec<usize> = (0..monitors.len()).collect();
    order.sort_by_key(|&i| {
        let (cx, cy) = monitors[i].double_center();
        cx + y_weight as i64 * cy
    });
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(n: usize) -> Vec<Rect> {
        (0..n)
            .map(|i| Rect::new(1920, 1080, 1920 * i as i32, 0))
            .collect()
    }

    fn both(monitors: &[Rect]) -> [AdjacencyMap; 2] {
        [
            AdjacencyMap::scored(monitors, 8),
            AdjacencyMap::touching(monitors),
        ]
    }

    #[test]
    fn horizontal_row_neighbors() {
        let mons = row(4);
        for map in both(&mons) {
            for i in 0..3 {
                assert_eq!(map.get(Direction::Right, i), Some(i + 1));
                assert_eq!(map.get(Direction::Left, i + 1), Some(i));
            }
            assert_eq!(map.get(Direction::Left, 0), None);
            assert_eq!(map.get(Direction::Right, 3), None);
            for i in 0..4 {
                assert_eq!(map.get(Direction::Up, i), None);
                assert_eq!(map.get(Direction::Down, i), None);
            }
        }
    }

    #[test]
    fn fit_maps_to_self() {
        let mons = row(3);
        for map in both(&mons) {
            for i in 0..3 {
                assert_eq!(map.get(Direction::Fit, i), Some(i));
            }
        }
    }

    #[test]
    fn next_prev_form_inverse_cycles() {
        let mons = vec![
            Rect::new(1920, 1080, 1920, 1080),
            Rect::new(2560, 1440, -2560, 0),
            Rect::new(1920, 1080, 0, 0),
            Rect::new(1280, 1024, 0, 1080),
            Rect::new(1920, 1080, 1920, 0),
        ];
        for map in both(&mons) {
            for start in 0..mons.len() {
                let mut cur = start;
                for _ in 0..mons.len() {
                    let next = map.get(Direction::Next, cur).unwrap();
                    assert_eq!(map.get(Direction::Prev, next), Some(cur));
                    cur = next;
                }
                assert_eq!(cur, start);
            }
        }
    }

    #[test]
    fn next_visits_every_monitor() {
        let mons = row(5);
        let map = AdjacencyMap::scored(&mons, 8);
        let mut seen = vec![false; 5];
        let mut cur = 0;
        for _ in 0..5 {
            seen[cur] = true;
            cur = map.get(Direction::Next, cur).unwrap();
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn reading_order_rows_then_columns() {
        // 2x2 grid enumerated as: bottom-right, top-left, bottom-left, top-right
        let mons = vec![
            Rect::new(1920, 1080, 1920, 1080),
            Rect::new(1920, 1080, 0, 0),
            Rect::new(1920, 1080, 0, 1080),
            Rect::new(1920, 1080, 1920, 0),
        ];
        assert_eq!(reading_order(&mons, 8), vec![1, 3, 2, 0]);
        let map = AdjacencyMap::scored(&mons, 8);
        assert_eq!(map.get(Direction::Next, 1), Some(3));
        assert_eq!(map.get(Direction::Next, 0), Some(1));
        assert_eq!(map.get(Direction::Prev, 1), Some(0));
    }

    #[test]
    fn reading_order_ties_keep_enumeration_order() {
        let mons = vec![Rect::new(100, 100, 0, 0), Rect::new(100, 100, 0, 0)];
        assert_eq!(reading_order(&mons, 8), vec![0, 1]);
    }

    #[test]
    fn touching_cycle_uses_enumeration_order() {
        let mons = vec![
            Rect::new(1920, 1080, 1920, 0),
            Rect::new(1920, 1080, 0, 0),
        ];
        let map = AdjacencyMap::touching(&mons);
        assert_eq!(map.get(Direction::Next, 0), Some(1));
        assert_eq!(map.get(Direction::Next, 1), Some(0));
        assert_eq!(map.get(Direction::Prev, 0), Some(1));
    }

    #[test]
    fn vertical_stack_with_smaller_laptop() {
        let mons = vec![
            Rect::new(2560, 1440, 0, 0),
            Rect::new(1920, 1080, 320, 1440),
        ];
        for map in both(&mons) {
            assert_eq!(map.get(Direction::Down, 0), Some(1));
            assert_eq!(map.get(Direction::Up, 1), Some(0));
            assert_eq!(map.get(Direction::Up, 0), None);
            assert_eq!(map.get(Direction::Left, 1), None);
        }
    }

    #[test]
    fn scored_prefers_largest_overlap() {
        // Two monitors stacked to the right of the first, the lower one
        // covering more of its right edge.
        let mons = vec![
            Rect::new(1920, 1080, 0, 0),
            Rect::new(1920, 1080, 1920, -780),
            Rect::new(1920, 1080, 1920, 300),
        ];
        let scored = AdjacencyMap::scored(&mons, 8);
        assert_eq!(scored.get(Direction::Right, 0), Some(2));
        assert_eq!(scored.get(Direction::Left, 1), Some(0));
        assert_eq!(scored.get(Direction::Left, 2), Some(0));

        // The touching strategy takes whichever overlapping monitor came first.
        let touching = AdjacencyMap::touching(&mons);
        assert_eq!(touching.get(Direction::Right, 0), Some(1));
    }

    #[test]
    fn scored_ties_go_to_first_enumerated() {
        let mons = vec![
            Rect::new(1920, 1080, 0, 0),
            Rect::new(1920, 1080, 1920, -540),
            Rect::new(1920, 1080, 1920, 540),
        ];
        let map = AdjacencyMap::scored(&mons, 8);
        assert_eq!(map.get(Direction::Right, 0), Some(1));
        assert_eq!(map.get(Direction::Down, 1), Some(2));
        assert_eq!(map.get(Direction::Up, 2), Some(1));
    }

    #[test]
    fn scored_links_across_gap_via_larger_probe() {
        // The small monitor's probe falls short of the big one, but the big
        // monitor's left probe reaches back and links both ways.
        let mons = vec![
            Rect::new(800, 600, 0, 0),
            Rect::new(1920, 1080, 1920, 0),
        ];
        let map = AdjacencyMap::scored(&mons, 8);
        assert_eq!(map.get(Direction::Left, 1), Some(0));
        assert_eq!(map.get(Direction::Right, 0), Some(1));
    }

    #[test]
    fn score_pair_accumulates_ratio() {
        let mons = vec![
            Rect::new(1920, 1080, 0, 0),
            Rect::new(1920, 1080, 1920, 540),
        ];
        let acc = score_pair(ScoreAccumulator::new(2), &mons, 0, 1);
        assert_eq!(acc.best_ratio(Direction::Right, 0), 0.5);
        assert_eq!(acc.best_ratio(Direction::Left, 1), 0.5);
        assert_eq!(acc.best_ratio(Direction::Down, 0), 0.0);
        let map = acc.into_map();
        assert_eq!(map.get(Direction::Right, 0), Some(1));
    }

    #[test]
    fn single_and_empty_layouts() {
        let one = vec![Rect::new(1920, 1080, 0, 0)];
        for map in both(&one) {
            assert_eq!(map.len(), 1);
            assert_eq!(map.get(Direction::Left, 0), None);
            assert_eq!(map.get(Direction::Next, 0), Some(0));
            assert_eq!(map.get(Direction::Prev, 0), Some(0));
            assert_eq!(map.get(Direction::Fit, 0), Some(0));
        }
        let none = AdjacencyMap::scored(&[], 8);
        assert!(none.is_empty());
        assert_eq!(none.get(Direction::Fit, 0), None);
    }

    #[test]
    fn build_dispatches_on_strategy() {
        let mons = row(2);
        let cfg = TopologyConfig {
            strategy: Strategy::Touching,
            order_y_weight: 8,
        };
        assert_eq!(
            AdjacencyMap::build(&mons, &cfg),
            AdjacencyMap::touching(&mons)
        );
        assert_eq!(
            AdjacencyMap::build(&mons, &TopologyConfig::default()),
            AdjacencyMap::scored(&mons, 8)
        );
    }
}
