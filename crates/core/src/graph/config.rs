//! Graph index configuration.

use crate::config;
use crate::distance::Metric;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration of an [`ApproximateGraphIndex`](super::ApproximateGraphIndex).
///
/// Controls the trade-off between build cost, search cost, and recall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Maximum forward adjacency size chosen for a node at insertion.
    /// Back edges are only added to nodes holding fewer than `m` entries.
    pub m: usize,
    /// Candidate budget of a query. The effective budget is
    /// `min(ef_search, corpus size)`.
    pub ef_search: usize,
    /// Internal index routing starts from. Falls back to 0 when that node has
    /// not been inserted yet.
    pub entry_point: u32,
    /// Distance function for similarity computation.
    pub metric: Metric,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            m: config::DEFAULT_M,
            ef_search: config::DEFAULT_EF_SEARCH,
            entry_point: config::DEFAULT_ENTRY_POINT,
            metric: Metric::L2Squared,
        }
    }
}

impl GraphConfig {
    /// Default configuration with a custom `m`.
    pub fn with_m(m: usize) -> Self {
        Self {
            m,
            ..Default::default()
        }
    }

    /// Set the ef_search parameter.
    pub fn ef_search(mut self, ef: usize) -> Self {
        self.ef_search = ef;
        self
    }

    /// Set the routing entry point.
    pub fn entry_point(mut self, entry_point: u32) -> Self {
        self.entry_point = entry_point;
        self
    }

    /// Set the distance metric.
    pub fn metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Rejects `m == 0` and `ef_search == 0`.
    pub fn validate(&self) -> Result<()> {
        if self.m == 0 {
            return Err(Error::invalid("M must be > 0"));
        }
        if self.ef_search == 0 {
            return Err(Error::invalid("ef_search must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = GraphConfig::default();
        assert_eq!(cfg.m, 16);
        assert_eq!(cfg.ef_search, 64);
        assert_eq!(cfg.entry_point, 0);
        assert_eq!(cfg.metric, Metric::L2Squared);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let cfg = GraphConfig::with_m(8)
            .ef_search(32)
            .entry_point(3)
            .metric(Metric::InnerProduct);
        assert_eq!(cfg.m, 8);
        assert_eq!(cfg.ef_search, 32);
        assert_eq!(cfg.entry_point, 3);
        assert_eq!(cfg.metric, Metric::InnerProduct);
    }

    #[test]
    fn test_zero_m_or_ef_rejected() {
        assert!(GraphConfig::with_m(0).validate().is_err());
        assert!(GraphConfig::default().ef_search(0).validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: GraphConfig = serde_json::from_str(r#"{"m": 4, "metric": "ip"}"#).unwrap();
        assert_eq!(cfg.m, 4);
        assert_eq!(cfg.metric, Metric::InnerProduct);
        assert_eq!(cfg.ef_search, 64);
        assert_eq!(cfg.entry_point, 0);
    }

    #[test]
    fn test_unknown_metric_in_json_rejected() {
        let parsed = serde_json::from_str::<GraphConfig>(r#"{"metric": "cosine"}"#);
        assert!(parsed.is_err());
    }
}
