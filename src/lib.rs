//! # arcade_search
//!
//! The search core behind a pair of puzzle games: an agent fetching food
//! across a walled grid and a 3x3 sliding-tile puzzle. Both engines run the
//! same best-first (A*) skeleton over an implicit graph; the grid side uses
//! the [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry)
//! heuristic on 4-connected moves, the puzzle side counts misplaced tiles.
//! Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no path exists.
//!
//! Searches are synchronous and run to completion; a returned path is a
//! plain value a caller can replay one step at a time without calling back
//! into the engine.
mod astar;
pub mod sliding_puzzle;

use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use rand::Rng;

use crate::astar::astar_search;
use core::fmt;

/// Fixed agent start cell used by [random_arena](PathingGrid::random_arena);
/// wall placement never covers it.
pub fn arena_start() -> Point {
    Point::new(1, 1)
}

/// Rejected input to [find_path](PathingGrid::find_path). Distinct from the
/// "no path" outcome, which is a valid answer rather than a caller error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// Start or goal lies outside the grid.
    OutOfBounds(Point),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GridError::OutOfBounds(p) => write!(f, "point {} lies outside the grid", p),
        }
    }
}

impl std::error::Error for GridError {}

/// [PathingGrid] maintains information about components using a [UnionFind] structure in addition to the raw
/// [bool] grid values in the [BoolGrid] that determine whether a space is occupied ([true]) or
/// empty ([false]). Components are joined by 4-connected (orthogonal) adjacency, matching the
/// moves the pathfinder generates. Implements [Grid] by building on [BoolGrid].
#[derive(Clone, Debug)]
pub struct PathingGrid {
    pub grid: BoolGrid,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for PathingGrid {
    fn default() -> PathingGrid {
        PathingGrid {
            grid: BoolGrid::default(),
            components: UnionFind::new(0),
            components_dirty: false,
        }
    }
}

fn manhattan_distance(a: &Point, b: &Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

impl PathingGrid {
    fn get_neighbours(&self, point: Point) -> Vec<Point> {
        neumann_neighborhood(&point)
            .into_iter()
            .filter(|p| self.can_move_to(*p))
            .collect::<Vec<Point>>()
    }
    fn can_move_to(&self, pos: Point) -> bool {
        self.in_bounds(pos.x, pos.y) && !self.grid.get(pos.x as usize, pos.y as usize)
    }
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && self.grid.index_in_bounds(x as usize, y as usize)
    }
    fn pathfinding_neighborhood(&self, pos: &Point) -> Vec<(Point, i32)> {
        neumann_neighborhood(pos)
            .into_iter()
            .filter(|&position| self.can_move_to(position))
            .map(|p| (p, 1))
            .collect::<Vec<_>>()
    }
    fn get_ix_point(&self, point: &Point) -> usize {
        self.grid.get_ix(point.x as usize, point.y as usize)
    }
    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.get_ix_point(point))
    }
    /// Checks if start and goal are on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.in_bounds(start.x, start.y) && self.in_bounds(goal.x, goal.y) {
            let start_ix = self.get_ix_point(start);
            let goal_ix = self.get_ix_point(goal);
            if self.components.equiv(start_ix, goal_ix) {
                false
            } else {
                info!("{} and {} are not equivalent components", start_ix, goal_ix);
                true
            }
        } else {
            true
        }
    }
    /// Computes a shortest path from start to goal over the unblocked cells,
    /// moving orthogonally one cell at a time. The unit-cost Manhattan
    /// heuristic is admissible here, so a returned path has minimal length.
    /// Among equally short paths the choice is deterministic: equal
    /// estimates are broken in favor of the node with the larger cost-so-far
    /// and then by frontier insertion order.
    ///
    /// Returns [Err] when start or goal is out of bounds, [Ok]\([None]) when
    /// the goal is blocked or disconnected from start and [Ok]\([Some])
    /// with the full path, start and goal inclusive, otherwise. Assumes
    /// components are up to date (see [update](Self::update)).
    pub fn find_path(&self, start: Point, goal: Point) -> Result<Option<Vec<Point>>, GridError> {
        for p in [start, goal] {
            if !self.in_bounds(p.x, p.y) {
                return Err(GridError::OutOfBounds(p));
            }
        }
        if !self.can_move_to(goal) {
            info!("Goal {} is blocked", goal);
            return Ok(None);
        }
        if self.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return Ok(None);
        }
        info!("{} is reachable from {}, computing path", goal, start);
        let result = astar_search(
            &start,
            |node| self.pathfinding_neighborhood(node),
            |point| manhattan_distance(point, &goal),
            |node_pos| *node_pos == goal,
        );
        Ok(result.map(|(v, _c)| v))
    }
    /// Generates a bordered n x n arena with `interior_walls` randomly placed
    /// wall cells, the map shape used by the grid game. Border cells are
    /// always blocked; wall placement never covers the fixed [arena_start]
    /// cell. Placements may repeat, so the number of distinct interior walls
    /// is at most `interior_walls`. Components are generated before
    /// returning.
    pub fn random_arena<R: Rng>(n: usize, interior_walls: usize, rng: &mut R) -> PathingGrid {
        debug_assert!(n >= 3);
        let mut arena = PathingGrid::new(n, n, false);
        for i in 0..n {
            arena.set(i, 0, true);
            arena.set(i, n - 1, true);
            arena.set(0, i, true);
            arena.set(n - 1, i, true);
        }
        let start = arena_start();
        for _ in 0..interior_walls {
            let x = rng.gen_range(1..n - 1);
            let y = rng.gen_range(1..n - 1);
            if Point::new(x as i32, y as i32) != start {
                arena.set(x, y, true);
            }
        }
        arena.generate_components();
        arena
    }
    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }
    /// Generates a new [UnionFind] structure and links up orthogonal grid neighbours to the same components.
    pub fn generate_components(&mut self) {
        info!("Generating connected components");
        let w = self.grid.width;
        let h = self.grid.height;
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        for x in 0..w {
            for y in 0..h {
                if !self.grid.get(x, y) {
                    let parent_ix = self.grid.get_ix(x, y);
                    let point = Point::new(x as i32, y as i32);
                    let neighbours = [
                        Point::new(point.x, point.y + 1),
                        Point::new(point.x + 1, point.y),
                    ]
                    .into_iter()
                    .filter(|p| self.grid.point_in_bounds(*p) && !self.grid.get_point(*p))
                    .map(|p| self.grid.get_ix(p.x as usize, p.y as usize))
                    .collect::<Vec<usize>>();
                    for ix in neighbours {
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }
}

/// The four orthogonally adjacent cells, in-bounds or not.
fn neumann_neighborhood(pos: &Point) -> [Point; 4] {
    [
        Point::new(pos.x, pos.y + 1),
        Point::new(pos.x + 1, pos.y),
        Point::new(pos.x, pos.y - 1),
        Point::new(pos.x - 1, pos.y),
    ]
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        for y in 0..self.grid.height {
            let values = (0..self.grid.width)
                .map(|x| self.grid.get(x, y) as i32)
                .collect::<Vec<i32>>();
            writeln!(f, "{:?}", values)?;
        }
        Ok(())
    }
}

impl Grid<bool> for PathingGrid {
    fn new(width: usize, height: usize, default_value: bool) -> Self {
        PathingGrid {
            grid: BoolGrid::new(width, height, default_value),
            components: UnionFind::new(width * height),
            components_dirty: false,
        }
    }
    fn get(&self, x: usize, y: usize) -> bool {
        self.grid.get(x, y)
    }
    /// Updates a position on the grid. Joins newly connected components and flags the components
    /// as dirty if components are (potentially) broken apart into multiple.
    fn set(&mut self, x: usize, y: usize, blocked: bool) {
        let p = Point::new(x as i32, y as i32);
        if self.grid.get(x, y) != blocked && blocked {
            self.components_dirty = true;
        } else {
            for p in self.get_neighbours(p) {
                self.components.union(
                    self.grid.get_ix(x, y),
                    self.grid.get_ix(p.x as usize, p.y as usize),
                );
            }
        }
        self.grid.set(x, y, blocked);
    }
    fn width(&self) -> usize {
        self.grid.width()
    }
    fn height(&self) -> usize {
        self.grid.height()
    }
}
