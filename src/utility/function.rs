//! Serializable selection of a player's utility function

use std::{fmt, str::FromStr};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{
    ApproximateBetweenness, ISOLATED_UTILITY, average_clustering, betweenness_centrality,
    degree_centrality, local_clustering,
};
use crate::{Result, network::Graph, types::NodeId};

/// The quantity a player tries to maximize.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum UtilityFunction {
    /// Exact normalized betweenness of the player's node.
    #[default]
    Betweenness,
    /// Sampled betweenness, rescaled to the exact normalization.
    ApproximateBetweenness(ApproximateBetweenness),
    /// Mean clustering of the whole graph; ignores the player's node.
    AverageClustering,
    /// Clustering coefficient of the player's node.
    LocalClustering,
    DegreeCentrality,
}

impl UtilityFunction {
    /// Score `node` in `graph`. Only the approximate estimator consumes
    /// randomness.
    pub fn evaluate<R: Rng>(&self, graph: &Graph, node: NodeId, rng: &mut R) -> f64 {
        match self {
            UtilityFunction::Betweenness => betweenness_centrality(graph, node),
            UtilityFunction::ApproximateBetweenness(estimator) => {
                if graph.degree(node) == 0 {
                    ISOLATED_UTILITY
                } else {
                    estimator
                        .estimate_normalized(graph, rng)
                        .get(node)
                        .copied()
                        .unwrap_or(0.0)
                }
            }
            UtilityFunction::AverageClustering => average_clustering(graph),
            UtilityFunction::LocalClustering => local_clustering(graph, node),
            UtilityFunction::DegreeCentrality => degree_centrality(graph, node),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            UtilityFunction::ApproximateBetweenness(estimator) => estimator.validate(),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for UtilityFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UtilityFunction::Betweenness => f.write_str("betweenness"),
            UtilityFunction::ApproximateBetweenness(estimator) => write!(
                f,
                "approximate-betweenness(eps={}, delta={})",
                estimator.epsilon, estimator.delta
            ),
            UtilityFunction::AverageClustering => f.write_str("average-clustering"),
            UtilityFunction::LocalClustering => f.write_str("local-clustering"),
            UtilityFunction::DegreeCentrality => f.write_str("degree"),
        }
    }
}

impl FromStr for UtilityFunction {
    type Err = crate::Error;

    /// Parses the plain names. The approximate estimator uses default
    /// parameters when parsed from a string.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "betweenness" | "centrality" => Ok(UtilityFunction::Betweenness),
            "approximate-betweenness" | "approximate" | "approx" => Ok(
                UtilityFunction::ApproximateBetweenness(ApproximateBetweenness::default()),
            ),
            "average-clustering" | "clustering" => Ok(UtilityFunction::AverageClustering),
            "local-clustering" => Ok(UtilityFunction::LocalClustering),
            "degree" | "degree-centrality" => Ok(UtilityFunction::DegreeCentrality),
            _ => Err(crate::Error::ParseUtility {
                input: s.to_string(),
                expected: "betweenness, approximate-betweenness, average-clustering, \
                           local-clustering, degree"
                    .to_string(),
            }),
        }
    }
}
