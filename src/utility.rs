//! Utility functions scoring a node (or the whole graph)
//!
//! Exact measures live in [`centrality`]; the randomized betweenness
//! estimator lives in [`approximate`]. [`UtilityFunction`] is the
//! serializable tag players carry to select one of them.

pub mod approximate;
pub mod centrality;
pub mod function;

pub use approximate::ApproximateBetweenness;
pub use centrality::{
    ISOLATED_UTILITY, average_clustering, betweenness_all, betweenness_centrality,
    degree_centrality, local_clustering, pair_fraction_betweenness, raw_betweenness,
};
pub use function::UtilityFunction;
