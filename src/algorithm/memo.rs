use crate::algorithm::equivalence::Equivalence;
use crate::algorithm::frontier::Frontier;
use crate::spatial::{Cell, Context};
use smallvec::SmallVec;
use std::collections::HashMap;

/// Handle of a frontier stored in a [`SearchGraph`]
pub type NodeId = usize;

/// A tile placed with its anchor on a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Step {
    /// Index of the tile in the search's tile list
    pub tile: usize,
    /// Cell the tile's anchor was placed on
    pub cell: Cell,
}

/// How a frontier was first reached
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
    /// Frontier the step was applied to
    pub parent: NodeId,
    /// Placement that produced the child
    pub step: Step,
}

#[derive(Debug)]
struct Node {
    frontier: Frontier,
    link: Option<Link>,
}

/// Memo of every frontier discovered by one search
///
/// Frontiers live in an arena addressed by [`NodeId`]; each remembers the
/// single link it was first reached by, which is all reconstruction needs.
/// Lookups bucket by the equivalence key and compare through the strategy,
/// so mirror-folded and exact searches share one structure.
pub struct SearchGraph<E> {
    nodes: Vec<Node>,
    buckets: HashMap<u64, SmallVec<[NodeId; 2]>>,
    equivalence: E,
    record_links: bool,

    /// Memo performance statistics
    pub stats: MemoStats,
}

/// Lookup counts for the memo
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoStats {
    /// Frontiers already present when offered
    pub hits: usize,
    /// Frontiers newly stored
    pub misses: usize,
}

impl<E: Equivalence> SearchGraph<E> {
    /// Create an empty memo using `equivalence` to identify states
    pub fn new(equivalence: E, record_links: bool) -> Self {
        Self {
            nodes: Vec::new(),
            buckets: HashMap::new(),
            equivalence,
            record_links,
            stats: MemoStats::default(),
        }
    }

    /// Look up a frontier equivalent to `frontier`
    pub fn find(&self, context: &Context, frontier: &Frontier) -> Option<NodeId> {
        let key = self.equivalence.key(context, frontier);
        self.buckets.get(&key)?.iter().copied().find(|&id| {
            self.nodes.get(id).is_some_and(|node| {
                self.equivalence
                    .equivalent(context, &node.frontier, frontier)
            })
        })
    }

    /// Store `frontier` unless an equivalent one is already known
    ///
    /// Returns the new handle, or `None` for a repeat.
    pub fn insert(
        &mut self,
        context: &Context,
        frontier: Frontier,
        link: Option<Link>,
    ) -> Option<NodeId> {
        if self.find(context, &frontier).is_some() {
            self.stats.hits += 1;
            return None;
        }
        self.stats.misses += 1;

        let key = self.equivalence.key(context, &frontier);
        let link = if self.record_links { link } else { None };
        let id = self.nodes.len();
        self.nodes.push(Node { frontier, link });
        self.buckets.entry(key).or_default().push(id);
        Some(id)
    }

    /// Frontier stored under `id`
    pub fn frontier(&self, id: NodeId) -> Option<&Frontier> {
        self.nodes.get(id).map(|node| &node.frontier)
    }

    /// Link `id` was first reached by; `None` for roots or when links are not recorded
    pub fn link(&self, id: NodeId) -> Option<Link> {
        self.nodes.get(id).and_then(|node| node.link)
    }

    /// Whether predecessor links are kept
    pub const fn records_links(&self) -> bool {
        self.record_links
    }

    /// Steps leading from a root to `id`, in placement order
    pub fn path_to(&self, id: NodeId) -> Vec<Step> {
        let mut steps = Vec::new();
        let mut current = id;
        while let Some(link) = self.link(current) {
            steps.push(link.step);
            current = link.parent;
        }
        steps.reverse();
        steps
    }

    /// Number of distinct frontiers stored
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nothing has been stored
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
