//! Frontier-expansion search shared by A* and Dijkstra's algorithm.
//!
//! A [`Search`] owns the [`Graph`] it explores together with the per-vertex bookkeeping of the
//! current run. The bookkeeping is reset at the start of every run, so the same engine can be
//! reused for any number of searches; wall flags live on the graph and persist between runs until
//! cleared explicitly.
//!
//! The engine moves through the states of [`SearchStatus`]: it starts [`Idle`](SearchStatus::Idle),
//! becomes [`Running`](SearchStatus::Running) on [`Search::begin`], and ends in
//! [`Found`](SearchStatus::Found), [`Exhausted`](SearchStatus::Exhausted) or
//! [`Cancelled`](SearchStatus::Cancelled). A run can be driven to completion with [`Search::run`]
//! or one expansion at a time with [`Search::step`], which is what the terminal surface does to
//! animate the exploration.

use std::{
    cmp::Reverse,
    collections::BinaryHeap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use log::{debug, trace, warn};
use ordered_float::OrderedFloat;

use crate::{
    coordinate::{euclidean, Coordinate},
    error::Result,
    graph::{Graph, Vertex},
    observer::SearchObserver,
    strategy::Strategy,
};

/// Lifecycle state of a [`Search`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchStatus {
    /// No search has been started since the engine was created or its graph was modified.
    #[default]
    Idle,
    /// The frontier is being expanded.
    Running,
    /// The end vertex was dequeued; the path can be loaded.
    Found,
    /// The frontier emptied without reaching the end vertex, so no path exists.
    Exhausted,
    /// The run was aborted before it could finish.
    Cancelled,
}

impl SearchStatus {
    /// Whether the status is one of the terminal states.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Found | Self::Exhausted | Self::Cancelled)
    }
}

/// Per-vertex bookkeeping of a single run.
#[derive(Clone, Debug, PartialEq)]
pub struct VertexState {
    /// Whether the vertex has been dequeued and finalized.
    visited: bool,
    /// Whether the vertex has been added to the frontier during this run.
    discovered: bool,
    /// Best known distance from the start vertex.
    distance: f64,
    /// Estimated distance to the end vertex, kept only by strategies with a heuristic.
    heuristic: Option<f64>,
    /// Frontier priority: the distance plus the heuristic, if any.
    score: f64,
    /// Dense index of the predecessor on the best known path.
    predecessor: Option<usize>,
}

impl Default for VertexState {
    fn default() -> Self {
        Self {
            visited: false,
            discovered: false,
            distance: f64::INFINITY,
            heuristic: None,
            score: f64::INFINITY,
            predecessor: None,
        }
    }
}

impl VertexState {
    /// Whether the vertex has been finalized.
    #[must_use]
    pub const fn is_visited(&self) -> bool {
        self.visited
    }

    /// Whether the vertex has been discovered, finalized or not.
    #[must_use]
    pub const fn is_discovered(&self) -> bool {
        self.discovered
    }

    /// Best known distance from the start, infinite if the vertex was never reached.
    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.distance
    }

    /// Heuristic distance to the end, if the strategy keeps one.
    #[must_use]
    pub const fn heuristic(&self) -> Option<f64> {
        self.heuristic
    }

    /// Frontier priority of the vertex.
    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }

    /// Dense index of the predecessor on the best known path.
    #[must_use]
    pub const fn predecessor(&self) -> Option<usize> {
        self.predecessor
    }
}

/// Cooperative cancellation flag, checked once per expansion by [`Search::run`].
///
/// Clones share the same flag, so a clone handed to another thread can abort a long search.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    /// Shared flag.
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of every run observing this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Shortest path reconstructed from a finished run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    /// Coordinates from start to end.
    coordinates: Vec<Coordinate>,
    /// Sum of the Euclidean lengths of the edges.
    cost: f64,
}

impl Path {
    /// Coordinates from start to end, empty if no path was found.
    #[must_use]
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// Total Euclidean length of the path.
    #[must_use]
    pub const fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of coordinates on the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Whether the path is empty, meaning the end was never reached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Consecutive pairs of coordinates, from start to end.
    pub fn edges(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        self.coordinates
            .windows(2)
            .filter_map(|pair| match pair {
                [from, to] => Some((*from, *to)),
                _ => None,
            })
    }
}

/// Frontier entry: priority first, dense index second, so equal priorities dequeue in row-major
/// order.
type FrontierEntry = Reverse<(OrderedFloat<f64>, usize)>;

/// Generic frontier-expansion engine parameterised by a [`Strategy`].
#[derive(Clone, Debug)]
pub struct Search<S> {
    /// Graph being explored, including its wall flags.
    graph: Graph,
    /// Strategy supplying the remaining-cost estimate.
    strategy: S,
    /// Bookkeeping of the current run, one entry per vertex.
    states: Vec<VertexState>,
    /// Discovered vertices awaiting expansion. Improved vertices are pushed again and the stale
    /// entries are skipped once the vertex is finalized.
    frontier: BinaryHeap<FrontierEntry>,
    /// Dense indices of the start and end vertices of the current run.
    endpoints: Option<(usize, usize)>,
    /// Lifecycle state.
    status: SearchStatus,
    /// Number of vertices finalized during the current run.
    expanded: usize,
}

impl<S: Strategy> Search<S> {
    /// Creates an idle engine over the given graph.
    #[must_use]
    pub fn new(graph: Graph, strategy: S) -> Self {
        Self {
            graph,
            strategy,
            states: Vec::new(),
            frontier: BinaryHeap::new(),
            endpoints: None,
            status: SearchStatus::Idle,
            expanded: 0,
        }
    }

    /// Graph being explored.
    #[must_use]
    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Mutable access to the graph, for editing walls between runs.
    ///
    /// Any run in progress or finished is discarded and the engine returns to
    /// [`SearchStatus::Idle`], since wall flags must not change while a run is using them.
    pub fn graph_mut(&mut self) -> &mut Graph {
        self.reset();
        &mut self.graph
    }

    /// Consumes the engine and returns its graph.
    #[must_use]
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Strategy in use.
    pub const fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Replaces the strategy, discarding the current run.
    pub fn set_strategy(&mut self, strategy: S) {
        self.reset();
        self.strategy = strategy;
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn status(&self) -> SearchStatus {
        self.status
    }

    /// Number of vertices finalized during the current run.
    #[must_use]
    pub const fn expanded(&self) -> usize {
        self.expanded
    }

    /// Start and end coordinates of the current run, if one was started.
    #[must_use]
    pub fn endpoints(&self) -> Option<(Coordinate, Coordinate)> {
        let (start, end) = self.endpoints?;
        let start = self.graph.vertex(start).ok()?.coordinate();
        let end = self.graph.vertex(end).ok()?.coordinate();

        Some((start, end))
    }

    /// Bookkeeping of the vertex at the given coordinate during the current run.
    ///
    /// Before the first run every vertex reports the default, unreached state.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidCoordinate`](crate::Error::InvalidCoordinate) if the coordinate lies
    ///   outside the grid.
    pub fn vertex_state(&self, coordinate: Coordinate) -> Result<VertexState> {
        let index = self.graph.index_of(coordinate)?;

        Ok(self.states.get(index).cloned().unwrap_or_default())
    }

    /// Drops all run state and returns to [`SearchStatus::Idle`].
    fn reset(&mut self) {
        self.states.clear();
        self.frontier.clear();
        self.endpoints = None;
        self.status = SearchStatus::Idle;
        self.expanded = 0;
    }

    /// Starts a new run from `start` towards `end`.
    ///
    /// The given walls are applied to the graph on top of any walls already present. Run state
    /// from any previous search is discarded and the frontier is seeded with the start vertex. A
    /// wall on the start cell does not prevent seeding; a wall on the end cell makes it
    /// unreachable unless it is also the start.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidCoordinate`](crate::Error::InvalidCoordinate) if the start, the end or
    ///   any wall lies outside the grid. The engine and the graph are left unchanged.
    pub fn begin(
        &mut self,
        start: Coordinate,
        end: Coordinate,
        walls: &[Coordinate],
    ) -> Result<()> {
        let start_index = self.graph.index_of(start)?;
        let end_index = self.graph.index_of(end)?;
        self.graph.apply_walls(walls)?;

        self.reset();
        self.states.resize(self.graph.len(), VertexState::default());

        let heuristic = self.strategy.estimate(start, end);
        let score = heuristic.unwrap_or(0.0);
        if let Some(state) = self.states.get_mut(start_index) {
            state.distance = 0.0;
            state.heuristic = heuristic;
            state.score = score;
            state.discovered = true;
        }
        self.frontier.push(Reverse((OrderedFloat(score), start_index)));

        self.endpoints = Some((start_index, end_index));
        self.status = SearchStatus::Running;

        debug!(
            "{} search from {start} to {end} with {} walls",
            self.strategy.name(),
            self.graph.walls().count()
        );

        Ok(())
    }

    /// Performs a single expansion and returns the resulting status.
    ///
    /// The cheapest frontier member is finalized and reported as processed. If it is the end
    /// vertex the run is [`Found`](SearchStatus::Found); otherwise its non-wall, unfinalized
    /// neighbors are relaxed, and the ones discovered for the first time are reported as
    /// processing. When the frontier is empty the run is
    /// [`Exhausted`](SearchStatus::Exhausted). Outside of a run this does nothing.
    ///
    /// # Errors
    ///
    /// - [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange) if the bookkeeping refers to a
    ///   vertex the graph does not hold, which indicates a bug in the engine.
    pub fn step<O>(&mut self, observer: &mut O) -> Result<SearchStatus>
    where
        O: SearchObserver + ?Sized,
    {
        let (SearchStatus::Running, Some((_, end_index))) = (self.status, self.endpoints) else {
            return Ok(self.status);
        };

        let Some(current) = self.pop_frontier() else {
            return Ok(self.finish(SearchStatus::Exhausted));
        };

        let vertex = self.graph.vertex(current)?;
        let coordinate = vertex.coordinate();
        let end = self.graph.vertex(end_index)?.coordinate();
        let distance = match self.states.get_mut(current) {
            Some(state) => {
                state.visited = true;
                state.distance
            }
            None => f64::INFINITY,
        };
        self.expanded += 1;
        trace!("expanding {coordinate} at distance {distance:.3}");
        observer.processed(coordinate);

        if current == end_index {
            return Ok(self.finish(SearchStatus::Found));
        }

        for &index in vertex.neighbors() {
            let neighbor = self.graph.vertex(index)?;
            if neighbor.is_wall() {
                continue;
            }
            let Some(state) = self.states.get_mut(index) else {
                continue;
            };
            if state.visited {
                continue;
            }

            let tentative = distance + euclidean(coordinate, neighbor.coordinate());
            if tentative < state.distance {
                state.predecessor = Some(current);
                state.distance = tentative;
                state.heuristic = self.strategy.estimate(neighbor.coordinate(), end);
                state.score = tentative + state.heuristic.unwrap_or(0.0);
                self.frontier
                    .push(Reverse((OrderedFloat(state.score), index)));

                if !state.discovered {
                    state.discovered = true;
                    observer.processing(neighbor.coordinate());
                }
            }
        }

        Ok(self.status)
    }

    /// Removes the cheapest frontier member that has not been finalized yet.
    fn pop_frontier(&mut self) -> Option<usize> {
        while let Some(Reverse((_, index))) = self.frontier.pop() {
            let visited = self.states.get(index).is_some_and(VertexState::is_visited);
            if !visited {
                return Some(index);
            }
        }

        None
    }

    /// Moves the run into a terminal state.
    fn finish(&mut self, status: SearchStatus) -> SearchStatus {
        self.status = status;
        self.frontier.clear();
        debug!(
            "{} search {status:?} after {} expansions",
            self.strategy.name(),
            self.expanded
        );

        status
    }

    /// Expands the frontier until the run finishes or `cancel` fires.
    ///
    /// The token is checked once before every expansion.
    ///
    /// # Errors
    ///
    /// - See [`Search::step`].
    pub fn run<O>(&mut self, observer: &mut O, cancel: &CancellationToken) -> Result<SearchStatus>
    where
        O: SearchObserver + ?Sized,
    {
        while self.status == SearchStatus::Running {
            if cancel.is_cancelled() {
                self.cancel();
                break;
            }
            let _ = self.step(observer)?;
        }

        Ok(self.status)
    }

    /// Starts a run and drives it to completion.
    ///
    /// # Errors
    ///
    /// - See [`Search::begin`] and [`Search::step`].
    pub fn find_path<O>(
        &mut self,
        start: Coordinate,
        end: Coordinate,
        walls: &[Coordinate],
        observer: &mut O,
    ) -> Result<SearchStatus>
    where
        O: SearchObserver + ?Sized,
    {
        self.begin(start, end, walls)?;
        self.run(observer, &CancellationToken::new())
    }

    /// Aborts a run in progress. Finished or idle engines are left as they are.
    pub fn cancel(&mut self) {
        if self.status == SearchStatus::Running {
            warn!(
                "{} search cancelled after {} expansions",
                self.strategy.name(),
                self.expanded
            );
            let _ = self.finish(SearchStatus::Cancelled);
        }
    }

    /// Dense indices from the end vertex back to the start, empty unless the run was found.
    fn trace_back(&self) -> Vec<usize> {
        let (SearchStatus::Found, Some((_, end_index))) = (self.status, self.endpoints) else {
            return Vec::new();
        };

        let mut indices = vec![end_index];
        let mut current = end_index;
        while let Some(predecessor) = self
            .states
            .get(current)
            .and_then(VertexState::predecessor)
        {
            indices.push(predecessor);
            current = predecessor;
        }

        indices
    }

    /// Reports every edge of the found path to the observer, from the end back to the start.
    ///
    /// Nothing is reported unless the run is [`Found`](SearchStatus::Found), and a run whose
    /// start is its end has no edges.
    ///
    /// # Errors
    ///
    /// - [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange) on corrupted bookkeeping.
    pub fn load_path<O>(&self, observer: &mut O) -> Result<()>
    where
        O: SearchObserver + ?Sized,
    {
        for pair in self.trace_back().windows(2) {
            if let [from, to] = pair {
                let from = self.graph.vertex(*from)?.coordinate();
                let to = self.graph.vertex(*to)?.coordinate();
                observer.path_edge(from, to);
            }
        }

        Ok(())
    }

    /// The found path from start to end, or an empty path if the run did not find one.
    ///
    /// # Errors
    ///
    /// - [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange) on corrupted bookkeeping.
    pub fn path(&self) -> Result<Path> {
        let indices = self.trace_back();
        let cost = indices
            .first()
            .and_then(|&end| self.states.get(end))
            .map_or(0.0, VertexState::distance);
        let coordinates = indices
            .iter()
            .rev()
            .map(|&index| self.graph.vertex(index).map(Vertex::coordinate))
            .collect::<Result<Vec<_>>>()?;

        Ok(Path { coordinates, cost })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{rngs::StdRng, Rng as _, SeedableRng as _};

    use super::*;
    use crate::{
        error::Error,
        observer::EventRecorder,
        strategy::{AStar, Algorithm, Dijkstra},
    };

    /// Tolerance used when comparing path costs.
    const EPSILON: f64 = 1e-6;

    /// Shorthand for building coordinates in tests.
    const fn at(x: i32, y: i32) -> Coordinate {
        Coordinate::new(x, y)
    }

    /// Creates an idle engine over a fresh graph.
    fn engine<S: Strategy>(width: usize, height: usize, strategy: S) -> Search<S> {
        Search::new(
            Graph::new(width, height).expect("graph should build"),
            strategy,
        )
    }

    /// Exhaustive shortest distances from `start` by Bellman-Ford relaxation over every edge.
    #[expect(
        clippy::indexing_slicing,
        reason = "Every index comes from the graph that sized the distance table."
    )]
    fn exhaustive_distances(graph: &Graph, start: Coordinate) -> Vec<f64> {
        let mut distances = vec![f64::INFINITY; graph.len()];
        let start = graph.index_of(start).expect("start should be in bounds");
        distances[start] = 0.0;

        for _ in 0..graph.len() {
            let mut changed = false;
            for (index, vertex) in graph.vertices().enumerate() {
                if distances[index].is_infinite() {
                    continue;
                }
                for &neighbor in vertex.neighbors() {
                    let next = graph.vertex(neighbor).expect("neighbor should exist");
                    if next.is_wall() {
                        continue;
                    }
                    let candidate =
                        distances[index] + euclidean(vertex.coordinate(), next.coordinate());
                    if candidate < distances[neighbor] {
                        distances[neighbor] = candidate;
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }

        distances
    }

    #[test]
    fn test_open_grid_diagonal_path() {
        for algorithm in [Algorithm::AStar, Algorithm::Dijkstra] {
            let mut search = engine(3, 3, algorithm);
            let status = search
                .find_path(at(0, 0), at(2, 2), &[], &mut ())
                .expect("search should run");
            let path = search.path().expect("path should load");

            assert_eq!(status, SearchStatus::Found);
            assert_eq!(path.coordinates(), &[at(0, 0), at(1, 1), at(2, 2)]);
            assert!((path.cost() - 2.0 * 2_f64.sqrt()).abs() < EPSILON);
        }
    }

    #[test]
    fn test_astar_reaches_goal_in_two_expansions_beyond_start() {
        let mut search = engine(3, 3, AStar);
        let _ = search
            .find_path(at(0, 0), at(2, 2), &[], &mut ())
            .expect("search should run");

        assert_eq!(search.expanded(), 3);
    }

    #[test]
    fn test_routes_around_center_wall() {
        for algorithm in [Algorithm::AStar, Algorithm::Dijkstra] {
            let mut search = engine(3, 3, algorithm);
            let status = search
                .find_path(at(0, 0), at(2, 2), &[at(1, 1)], &mut ())
                .expect("search should run");
            let path = search.path().expect("path should load");

            assert_eq!(status, SearchStatus::Found);
            assert!(!path.coordinates().contains(&at(1, 1)));
            assert_eq!(path.coordinates().first(), Some(&at(0, 0)));
            assert_eq!(path.coordinates().last(), Some(&at(2, 2)));
            assert!((path.cost() - (2.0 + 2_f64.sqrt())).abs() < EPSILON);
        }
    }

    #[test]
    fn test_start_equals_end() {
        let mut search = engine(4, 4, Dijkstra);
        let mut recorder = EventRecorder::new();
        let status = search
            .find_path(at(2, 1), at(2, 1), &[], &mut recorder)
            .expect("search should run");
        search.load_path(&mut recorder).expect("path should load");
        let path = search.path().expect("path should load");

        assert_eq!(status, SearchStatus::Found);
        assert_eq!(path.coordinates(), &[at(2, 1)]);
        assert_eq!(path.edges().count(), 0);
        assert!(path.cost().abs() < EPSILON);
        assert_eq!(recorder.path_edges().count(), 0);
    }

    #[test]
    fn test_walled_in_start_is_exhausted() {
        let walls = [
            at(0, 0),
            at(1, 0),
            at(2, 0),
            at(0, 1),
            at(2, 1),
            at(0, 2),
            at(1, 2),
            at(2, 2),
        ];
        for algorithm in [Algorithm::AStar, Algorithm::Dijkstra] {
            let mut search = engine(5, 5, algorithm);
            let mut recorder = EventRecorder::new();
            let status = search
                .find_path(at(1, 1), at(4, 4), &walls, &mut recorder)
                .expect("search should run");
            search.load_path(&mut recorder).expect("path should load");

            assert_eq!(status, SearchStatus::Exhausted);
            assert_eq!(recorder.path_edges().count(), 0);
            assert!(search.path().expect("path should load").is_empty());
        }
    }

    #[test]
    fn test_corner_start_fully_walled() {
        let mut search = engine(3, 3, AStar);
        let status = search
            .find_path(at(0, 0), at(2, 2), &[at(1, 0), at(0, 1), at(1, 1)], &mut ())
            .expect("search should run");

        assert_eq!(status, SearchStatus::Exhausted);
        assert_eq!(search.expanded(), 1);
    }

    #[test]
    fn test_walled_end_is_unreachable() {
        let mut search = engine(3, 3, AStar);
        let status = search
            .find_path(at(0, 0), at(2, 2), &[at(2, 2)], &mut ())
            .expect("search should run");

        assert_eq!(status, SearchStatus::Exhausted);
    }

    #[test]
    fn test_load_path_before_search_is_empty() {
        let search = engine(3, 3, AStar);
        let mut recorder = EventRecorder::new();

        search.load_path(&mut recorder).expect("load should succeed");

        assert_eq!(search.status(), SearchStatus::Idle);
        assert!(recorder.events.is_empty());
        assert!(search.path().expect("path should load").is_empty());
    }

    #[test]
    fn test_out_of_bounds_input_rejected() {
        let mut search = engine(3, 3, AStar);
        let invalid = |x, y| Error::InvalidCoordinate {
            x,
            y,
            width: 3,
            height: 3,
        };

        assert_eq!(
            search.find_path(at(-1, 0), at(2, 2), &[], &mut ()),
            Err(invalid(-1, 0))
        );
        assert_eq!(
            search.find_path(at(0, 0), at(3, 2), &[], &mut ()),
            Err(invalid(3, 2))
        );
        assert_eq!(
            search.find_path(at(0, 0), at(2, 2), &[at(1, 1), at(0, 9)], &mut ()),
            Err(invalid(0, 9))
        );
        assert_eq!(search.status(), SearchStatus::Idle);
        assert_eq!(search.graph().walls().count(), 0);
    }

    #[test]
    fn test_path_edges_reported_end_to_start() {
        let mut search = engine(5, 3, Dijkstra);
        let mut recorder = EventRecorder::new();
        let _ = search
            .find_path(at(0, 1), at(4, 1), &[at(2, 1)], &mut ())
            .expect("search should run");
        search.load_path(&mut recorder).expect("path should load");

        let edges: Vec<_> = recorder.path_edges().collect();
        let path = search.path().expect("path should load");

        assert_eq!(edges.first().map(|edge| edge.0), Some(at(4, 1)));
        assert_eq!(edges.last().map(|edge| edge.1), Some(at(0, 1)));
        assert_eq!(edges.len(), path.len() - 1);

        let mut forward: Vec<_> = path.edges().map(|(from, to)| (to, from)).collect();
        forward.reverse();
        assert_eq!(edges, forward);
    }

    #[test]
    fn test_path_is_contiguous_and_avoids_walls() {
        let walls = [at(3, 0), at(3, 1), at(3, 2), at(3, 3), at(1, 5), at(2, 5)];
        let mut search = engine(7, 6, AStar);
        let _ = search
            .find_path(at(0, 0), at(6, 0), &walls, &mut ())
            .expect("search should run");
        let path = search.path().expect("path should load");

        assert!(!path.is_empty());
        for (from, to) in path.edges() {
            assert_eq!(from.chebyshev(to), 1);
        }
        for coordinate in path.coordinates() {
            assert!(!walls.contains(coordinate));
        }
    }

    #[test]
    fn test_processing_reported_once_per_vertex() {
        let mut search = engine(8, 8, Dijkstra);
        let mut recorder = EventRecorder::new();
        let _ = search
            .find_path(at(0, 0), at(7, 7), &[at(3, 3), at(4, 4)], &mut recorder)
            .expect("search should run");

        let processing: Vec<_> = recorder.processing_coordinates().collect();
        let unique: HashSet<_> = processing.iter().copied().collect();
        let processed: Vec<_> = recorder.processed_coordinates().collect();
        let unique_processed: HashSet<_> = processed.iter().copied().collect();

        assert_eq!(processing.len(), unique.len());
        assert_eq!(processed.len(), unique_processed.len());
        assert_eq!(processed.len(), search.expanded());
        assert_eq!(processed.first(), Some(&at(0, 0)));
        assert_eq!(processed.last(), Some(&at(7, 7)));
    }

    #[test]
    fn test_runs_are_deterministic() {
        let walls = [at(2, 1), at(2, 2), at(2, 3), at(5, 4)];
        let record = || {
            let mut search = engine(8, 6, AStar);
            let mut recorder = EventRecorder::new();
            let _ = search
                .find_path(at(0, 2), at(7, 2), &walls, &mut recorder)
                .expect("search should run");
            search.load_path(&mut recorder).expect("path should load");
            recorder
        };

        assert_eq!(record(), record());
    }

    #[test]
    fn test_equal_priorities_dequeue_in_row_major_order() {
        let mut search = engine(3, 3, Dijkstra);
        let mut recorder = EventRecorder::new();
        search.begin(at(1, 1), at(0, 0), &[]).expect("begin");
        while !search.step(&mut recorder).expect("step").is_finished() {}

        // After the center, the four orthogonal neighbors tie at distance 1.
        let processed: Vec<_> = recorder.processed_coordinates().collect();
        assert_eq!(
            processed.get(1..5),
            Some(&[at(1, 0), at(0, 1), at(2, 1), at(1, 2)][..])
        );
    }

    #[test]
    fn test_engine_reuse_resets_run_state() {
        let mut search = engine(5, 5, AStar);
        let _ = search
            .find_path(at(0, 2), at(4, 2), &[at(2, 1), at(2, 2), at(2, 3)], &mut ())
            .expect("first run");
        let detour = search.path().expect("path should load");

        let _ = search
            .find_path(at(0, 2), at(4, 2), &[], &mut ())
            .expect("second run");
        let with_stale_walls = search.path().expect("path should load");

        search.graph_mut().clear_walls();
        assert_eq!(search.status(), SearchStatus::Idle);
        let _ = search
            .find_path(at(0, 2), at(4, 2), &[], &mut ())
            .expect("third run");
        let direct = search.path().expect("path should load");

        assert!((detour.cost() - with_stale_walls.cost()).abs() < EPSILON);
        assert!((direct.cost() - 4.0).abs() < EPSILON);
        assert!(direct.cost() < detour.cost());
    }

    #[test]
    fn test_vertex_state_fields() {
        let mut search = engine(4, 4, AStar);
        let _ = search
            .find_path(at(0, 0), at(3, 0), &[], &mut ())
            .expect("search should run");

        let start = search.vertex_state(at(0, 0)).expect("start state");
        assert!(start.is_visited());
        assert!(start.distance().abs() < EPSILON);
        assert_eq!(start.predecessor(), None);

        let end = search.vertex_state(at(3, 0)).expect("end state");
        assert!((end.distance() - 3.0).abs() < EPSILON);
        assert!(end.heuristic().is_some_and(|heuristic| heuristic.abs() < EPSILON));
        assert!((end.score() - 3.0).abs() < EPSILON);
        assert_eq!(end.predecessor(), Some(2));

        let far = search.vertex_state(at(3, 3)).expect("far state");
        assert!(!far.is_visited());

        let mut dijkstra = engine(4, 4, Dijkstra);
        let _ = dijkstra
            .find_path(at(0, 0), at(3, 0), &[], &mut ())
            .expect("search should run");
        let end = dijkstra.vertex_state(at(3, 0)).expect("end state");
        assert_eq!(end.heuristic(), None);
        assert!((end.score() - end.distance()).abs() < EPSILON);
    }

    #[test]
    fn test_vertex_state_before_search() {
        let search = engine(2, 2, AStar);
        let state = search.vertex_state(at(1, 1)).expect("in bounds");

        assert!(state.distance().is_infinite());
        assert!(!state.is_discovered());
        assert!(search.vertex_state(at(2, 2)).is_err());
    }

    #[test]
    fn test_step_outside_run_is_noop() {
        let mut search = engine(3, 3, AStar);

        assert_eq!(search.step(&mut ()), Ok(SearchStatus::Idle));
        assert_eq!(search.expanded(), 0);
    }

    #[test]
    fn test_stepwise_matches_full_run() {
        let walls = [at(1, 0), at(1, 1), at(3, 2), at(3, 3)];
        let mut full = engine(5, 4, AStar);
        let mut full_events = EventRecorder::new();
        let _ = full
            .find_path(at(0, 0), at(4, 3), &walls, &mut full_events)
            .expect("full run");

        let mut stepped = engine(5, 4, AStar);
        let mut stepped_events = EventRecorder::new();
        stepped.begin(at(0, 0), at(4, 3), &walls).expect("begin");
        assert_eq!(stepped.status(), SearchStatus::Running);
        while stepped.step(&mut stepped_events).expect("step") == SearchStatus::Running {}

        assert_eq!(stepped.status(), full.status());
        assert_eq!(stepped_events, full_events);
        assert_eq!(stepped.path(), full.path());
    }

    #[test]
    fn test_cancelled_run() {
        let mut search = engine(20, 20, Dijkstra);
        let token = CancellationToken::new();
        let handle = token.clone();
        handle.cancel();

        search.begin(at(0, 0), at(19, 19), &[]).expect("begin");
        let status = search.run(&mut (), &token).expect("run");
        let mut recorder = EventRecorder::new();
        search.load_path(&mut recorder).expect("load");

        assert!(token.is_cancelled());
        assert_eq!(status, SearchStatus::Cancelled);
        assert!(status.is_finished());
        assert_eq!(search.expanded(), 0);
        assert!(recorder.events.is_empty());
        assert!(search.path().expect("path").is_empty());
    }

    #[test]
    fn test_cancel_mid_run() {
        let mut search = engine(10, 10, AStar);
        search.begin(at(0, 0), at(9, 9), &[]).expect("begin");
        let _ = search.step(&mut ()).expect("step");
        search.cancel();

        assert_eq!(search.status(), SearchStatus::Cancelled);
        assert_eq!(search.step(&mut ()), Ok(SearchStatus::Cancelled));

        // A finished run is not affected by a late cancellation.
        let _ = search
            .find_path(at(0, 0), at(9, 9), &[], &mut ())
            .expect("rerun");
        search.cancel();
        assert_eq!(search.status(), SearchStatus::Found);
    }

    #[test]
    fn test_astar_expands_no_more_than_dijkstra() {
        let mut astar = engine(15, 15, AStar);
        let mut dijkstra = engine(15, 15, Dijkstra);
        let _ = astar
            .find_path(at(0, 7), at(14, 7), &[], &mut ())
            .expect("A* run");
        let _ = dijkstra
            .find_path(at(0, 7), at(14, 7), &[], &mut ())
            .expect("Dijkstra run");

        assert!(astar.expanded() < dijkstra.expanded());
        assert!(
            (astar.path().expect("path").cost() - dijkstra.path().expect("path").cost()).abs()
                < EPSILON
        );
    }

    #[test]
    fn test_random_grids_match_exhaustive_search() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..60 {
            let width = rng.gen_range(2..12_usize);
            let height = rng.gen_range(2..12_usize);
            let pick = |rng: &mut StdRng| {
                at(
                    rng.gen_range(0..i32::try_from(width).expect("small width")),
                    rng.gen_range(0..i32::try_from(height).expect("small height")),
                )
            };
            let start = pick(&mut rng);
            let end = pick(&mut rng);
            let walls: Vec<_> = (0..width * height / 3)
                .map(|_| pick(&mut rng))
                .filter(|&wall| wall != start && wall != end)
                .collect();

            let mut astar = engine(width, height, AStar);
            let mut dijkstra = engine(width, height, Dijkstra);
            let astar_status = astar
                .find_path(start, end, &walls, &mut ())
                .expect("A* run");
            let dijkstra_status = dijkstra
                .find_path(start, end, &walls, &mut ())
                .expect("Dijkstra run");

            let end_index = astar.graph().index_of(end).expect("end in bounds");
            let expected = exhaustive_distances(astar.graph(), start)
                .get(end_index)
                .copied()
                .expect("distance table covers every vertex");

            if expected.is_finite() {
                let astar_path = astar.path().expect("A* path");
                let dijkstra_path = dijkstra.path().expect("Dijkstra path");

                assert_eq!(astar_status, SearchStatus::Found);
                assert_eq!(dijkstra_status, SearchStatus::Found);
                assert!((astar_path.cost() - expected).abs() < EPSILON);
                assert!((dijkstra_path.cost() - expected).abs() < EPSILON);
                assert_eq!(astar_path.coordinates().first(), Some(&start));
                assert_eq!(astar_path.coordinates().last(), Some(&end));

                let summed: f64 = astar_path
                    .edges()
                    .map(|(from, to)| euclidean(from, to))
                    .sum();
                assert!((summed - astar_path.cost()).abs() < EPSILON);
            } else {
                assert_eq!(astar_status, SearchStatus::Exhausted);
                assert_eq!(dijkstra_status, SearchStatus::Exhausted);
            }
        }
    }

    #[test]
    fn test_strategy_swap_discards_run() {
        let mut search = engine(3, 3, Algorithm::AStar);
        let _ = search
            .find_path(at(0, 0), at(2, 2), &[], &mut ())
            .expect("search should run");
        search.set_strategy(Algorithm::Dijkstra);

        assert_eq!(search.status(), SearchStatus::Idle);
        assert_eq!(search.strategy(), &Algorithm::Dijkstra);
        assert_eq!(search.endpoints(), None);
    }

    #[test]
    fn test_endpoints_and_into_graph() {
        let mut search = engine(3, 2, AStar);
        search.begin(at(0, 1), at(2, 0), &[at(1, 0)]).expect("begin");

        assert_eq!(search.endpoints(), Some((at(0, 1), at(2, 0))));

        let graph = search.into_graph();
        assert_eq!(graph.walls().collect::<Vec<_>>(), vec![at(1, 0)]);
    }
}
