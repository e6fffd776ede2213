//! Cross-entity health aggregates over an indexer cluster snapshot.
//!
//! Pure functions of the facts they are computed from; nothing here is stored
//! back into a snapshot.

use std::fmt;

use serde::Serialize;

use crate::models::IndexerClusterFacts;

/// `count` out of `total`, displayed as `count/total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ratio {
    pub count: usize,
    pub total: usize,
}

impl Ratio {
    pub fn of<T>(items: &[T], pred: impl Fn(&T) -> bool) -> Self {
        Self {
            count: items.iter().filter(|item| pred(item)).count(),
            total: items.len(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.count == self.total
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.count, self.total)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClusterAggregates {
    pub peers_searchable: usize,
    pub peers_not_searchable: usize,
    pub indexes_searchable: usize,
    pub indexes_not_searchable: usize,
    /// Peers whose status is `Up`.
    pub peers_up: Ratio,
    /// Search heads whose status is `Connected`.
    pub search_heads_connected: Ratio,
}

impl ClusterAggregates {
    pub fn compute(facts: &IndexerClusterFacts) -> Self {
        let peers = Ratio::of(&facts.peers, |p| p.is_searchable);
        let indexes = Ratio::of(&facts.indexes, |i| i.is_searchable);

        Self {
            peers_searchable: peers.count,
            peers_not_searchable: peers.total - peers.count,
            indexes_searchable: indexes.count,
            indexes_not_searchable: indexes.total - indexes.count,
            peers_up: Ratio::of(&facts.peers, |p| p.is_up()),
            search_heads_connected: Ratio::of(&facts.search_heads, |s| s.is_connected()),
        }
    }

    /// Label/value pairs for display.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("peers_searchable", self.peers_searchable.to_string()),
            ("peers_not_searchable", self.peers_not_searchable.to_string()),
            ("indexes_searchable", self.indexes_searchable.to_string()),
            ("indexes_not_searchable", self.indexes_not_searchable.to_string()),
            ("peers_up", self.peers_up.to_string()),
            ("search_heads_connected", self.search_heads_connected.to_string()),
        ]
    }
}
