//! Depth-first backtracking search over strip frontiers
//!
//! The search starts from the empty strip and always fills the lowest,
//! leftmost empty cell. Every tile that fits there produces a successor
//! frontier; successors already in the memo are dropped, the rest are pushed
//! onto an explicit stack. Reaching a straight frontier means the strip's
//! first rows are tiled exactly, and that rectangle repeats forever.

use crate::algorithm::equivalence::Equivalence;
use crate::algorithm::frontier::Frontier;
use crate::algorithm::memo::{Link, NodeId, SearchGraph, Step};
use crate::algorithm::pruning::Prune;
use crate::algorithm::reconstruct::Tiling;
use crate::io::configuration::SEARCH_TRACE_INTERVAL;
use crate::io::error::{Result, TilingError};
use crate::spatial::{Context, TileShape};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Limits and bookkeeping choices for one search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOptions {
    /// Keep predecessor links so a witness tiling can be rebuilt
    pub record_links: bool,
    /// Stop after expanding this many frontiers
    pub max_nodes: Option<usize>,
    /// Stop after this much wall-clock time
    pub time_limit: Option<Duration>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            record_links: true,
            max_nodes: None,
            time_limit: None,
        }
    }
}

/// Why a search stopped without an answer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The expansion budget ran out
    NodeBudget,
    /// The time limit passed
    TimeLimit,
}

/// Result of a search
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The strip can be tiled; carries a witness when links were recorded
    Tileable(Option<Tiling>),
    /// The state space was exhausted without reaching a straight frontier
    Untileable,
    /// A budget stopped the search first
    Unknown(StopReason),
}

impl Outcome {
    /// Whether the strip was shown to be tileable
    pub const fn is_tileable(&self) -> bool {
        matches!(self, Self::Tileable(_))
    }

    /// The witness tiling, if any
    pub const fn tiling(&self) -> Option<&Tiling> {
        match self {
            Self::Tileable(tiling) => tiling.as_ref(),
            _ => None,
        }
    }
}

/// Counters describing the work a search has done
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Frontiers popped and expanded
    pub expanded: usize,
    /// Distinct frontiers stored in the memo
    pub discovered: usize,
    /// Successors dropped because an equivalent frontier was known
    pub duplicates: usize,
    /// Successors rejected by the pruning hook
    pub pruned: usize,
    /// Candidate placements rejected for overlap or wall collision
    pub blocked: usize,
    /// Largest stack size seen
    pub peak_stack: usize,
}

/// Result of one search step
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Progress {
    /// More frontiers remain
    Running,
    /// The search is over
    Finished(Outcome),
}

/// A strip width together with the tiles allowed to cover it
#[derive(Clone, Debug)]
pub struct Tiler {
    context: Context,
    tiles: Vec<TileShape>,
}

impl Tiler {
    /// Build a tiler for `width` columns from raw cell sets
    ///
    /// Each cell set is one placeable shape; include rotations or reflections
    /// as separate entries when they should be considered.
    ///
    /// # Errors
    ///
    /// Returns an error if the width is zero or any tile is empty, detached,
    /// or wider than the strip
    pub fn new(width: usize, tiles: &[Vec<(i32, i32)>]) -> Result<Self> {
        let context = Context::new(width)?;
        let shapes = tiles
            .iter()
            .map(|cells| TileShape::for_context(cells, &context))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            context,
            tiles: shapes,
        })
    }

    /// Build a tiler from already constructed shapes
    ///
    /// # Errors
    ///
    /// Returns [`TilingError::TileOutOfRange`] when a shape is wider than the strip
    pub fn from_shapes(context: Context, tiles: Vec<TileShape>) -> Result<Self> {
        if let Some(tile) = tiles.iter().find(|tile| tile.width() > context.width()) {
            return Err(TilingError::TileOutOfRange {
                column: i64::from(tile.width()) - 1,
                limit: context.width(),
            });
        }
        Ok(Self { context, tiles })
    }

    /// The strip configuration
    pub const fn context(&self) -> &Context {
        &self.context
    }

    /// Tiles in candidate order
    pub fn tiles(&self) -> &[TileShape] {
        &self.tiles
    }

    /// Start a search that can be driven step by step
    pub fn search<E, P>(
        &self,
        equivalence: E,
        prune: P,
        options: SearchOptions,
    ) -> Search<'_, E, P>
    where
        E: Equivalence,
        P: Prune,
    {
        Search::new(self, equivalence, prune, options)
    }

    /// Run a search to completion
    pub fn solve<E, P>(&self, equivalence: E, prune: P, options: SearchOptions) -> Outcome
    where
        E: Equivalence,
        P: Prune,
    {
        self.search(equivalence, prune, options).run()
    }
}

/// An in-progress search over one tiler's frontiers
pub struct Search<'a, E, P> {
    tiler: &'a Tiler,
    graph: SearchGraph<E>,
    stack: Vec<NodeId>,
    prune: P,
    options: SearchOptions,
    stats: SearchStats,
    started: Instant,
    outcome: Option<Outcome>,
}

impl<'a, E: Equivalence, P: Prune> Search<'a, E, P> {
    fn new(tiler: &'a Tiler, equivalence: E, prune: P, options: SearchOptions) -> Self {
        let context = &tiler.context;
        let mut graph = SearchGraph::new(equivalence, options.record_links);
        let stack = graph
            .insert(context, Frontier::empty(context), None)
            .into_iter()
            .collect();

        debug!(
            width = context.width(),
            pages = context.pages(),
            tiles = tiler.tiles.len(),
            "starting strip search"
        );

        Self {
            tiler,
            graph,
            stack,
            prune,
            options,
            stats: SearchStats {
                discovered: 1,
                peak_stack: 1,
                ..SearchStats::default()
            },
            started: Instant::now(),
            outcome: None,
        }
    }

    /// Work counters so far
    pub const fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// The memo built so far
    pub const fn graph(&self) -> &SearchGraph<E> {
        &self.graph
    }

    /// Final outcome, once the search has finished
    pub const fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Expand one frontier
    pub fn step(&mut self) -> Progress {
        if let Some(outcome) = &self.outcome {
            return Progress::Finished(outcome.clone());
        }

        if let Some(reason) = self.budget_exceeded() {
            warn!(?reason, expanded = self.stats.expanded, "search budget exhausted");
            return self.finish(Outcome::Unknown(reason));
        }

        let Some(id) = self.stack.pop() else {
            return self.finish(Outcome::Untileable);
        };

        let tiler = self.tiler;
        let context = &tiler.context;
        let Some(frontier) = self.graph.frontier(id) else {
            return Progress::Running;
        };
        self.stats.expanded += 1;

        let cell = frontier.find_empty(context);
        let mut successors = Vec::new();
        for (index, tile) in tiler.tiles.iter().enumerate() {
            if !frontier.can_place(context, cell, tile) {
                self.stats.blocked += 1;
                continue;
            }
            let step = Step { tile: index, cell };
            match frontier.place_pruned(context, cell, tile, &self.prune) {
                Some(next) => successors.push((step, next)),
                None => self.stats.pruned += 1,
            }
        }

        if let Some(&(step, _)) = successors.iter().find(|(_, next)| next.is_straight()) {
            let tiling = Tiling::reconstruct(&self.graph, &tiler.tiles, context.width(), id, step);
            return self.finish(Outcome::Tileable(tiling));
        }

        // Reversed so the first tile is explored first
        for (step, next) in successors.into_iter().rev() {
            let link = Link { parent: id, step };
            match self.graph.insert(context, next, Some(link)) {
                Some(child) => {
                    self.stack.push(child);
                    self.stats.discovered += 1;
                }
                None => self.stats.duplicates += 1,
            }
        }
        self.stats.peak_stack = self.stats.peak_stack.max(self.stack.len());

        if self.stats.expanded % SEARCH_TRACE_INTERVAL == 0 {
            trace!(
                expanded = self.stats.expanded,
                discovered = self.stats.discovered,
                stack = self.stack.len(),
                "search progress"
            );
        }

        Progress::Running
    }

    /// Step until the search finishes
    pub fn run(mut self) -> Outcome {
        loop {
            if let Progress::Finished(outcome) = self.step() {
                return outcome;
            }
        }
    }

    fn budget_exceeded(&self) -> Option<StopReason> {
        if self
            .options
            .max_nodes
            .is_some_and(|limit| self.stats.expanded >= limit)
        {
            return Some(StopReason::NodeBudget);
        }
        if self
            .options
            .time_limit
            .is_some_and(|limit| self.started.elapsed() >= limit)
        {
            return Some(StopReason::TimeLimit);
        }
        None
    }

    fn finish(&mut self, outcome: Outcome) -> Progress {
        debug!(
            tileable = outcome.is_tileable(),
            expanded = self.stats.expanded,
            discovered = self.stats.discovered,
            duplicates = self.stats.duplicates,
            pruned = self.stats.pruned,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "strip search finished"
        );
        self.outcome = Some(outcome.clone());
        Progress::Finished(outcome)
    }
}
