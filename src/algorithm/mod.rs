/// Frontier equivalence strategies, including mirror folding
pub mod equivalence;
/// Canonical strip frontier and placement operations
pub mod frontier;
/// Search memo with predecessor links
pub mod memo;
/// Pluggable rejection of dead-end frontiers
pub mod pruning;
/// Witness tiling reconstruction and verification
pub mod reconstruct;
/// Backtracking search driver
pub mod search;
