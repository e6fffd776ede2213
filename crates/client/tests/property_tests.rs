//! Property-based tests for URI parsing and cluster aggregates.
//!
//! # Invariants
//! - Well-formed `path?k=v&...` URIs parse back to the same path and pairs
//! - Any query pair without `=` is rejected
//! - Searchable plus not-searchable counts always equal the totals

use proptest::prelude::*;
use splunkd_client::{
    ClientError, ClusterAggregates, ClusterIndex, ClusterPeer, ClusterSearchHead,
    IndexerClusterFacts, merge_params, parse_uri,
};

fn key() -> impl Strategy<Value = String> {
    "[a-z_]{1,12}"
}

fn value() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_=.-]{0,16}"
}

fn uri_path() -> impl Strategy<Value = String> {
    "(/[a-z]{1,10}){1,4}"
}

fn peer(searchable: bool, up: bool) -> ClusterPeer {
    serde_json::from_value(serde_json::json!({
        "is_searchable": searchable,
        "status": if up { "Up" } else { "Down" },
    }))
    .unwrap()
}

fn index(searchable: bool) -> ClusterIndex {
    serde_json::from_value(serde_json::json!({ "is_searchable": searchable })).unwrap()
}

fn search_head(connected: bool) -> ClusterSearchHead {
    serde_json::from_value(serde_json::json!({
        "status": if connected { "Connected" } else { "Disconnected" },
    }))
    .unwrap()
}

proptest! {
    #[test]
    fn prop_parse_uri_recovers_pairs(
        path in uri_path(),
        pairs in prop::collection::vec((key(), value()), 1..6),
    ) {
        let query: Vec<String> = pairs.iter().map(|(k, v)| format!("{k}={v}")).collect();
        let uri = format!("{path}?{}", query.join("&"));

        let (parsed_path, parsed) = parse_uri(&uri).unwrap();
        prop_assert_eq!(parsed_path, path);
        prop_assert_eq!(parsed, pairs);
    }

    #[test]
    fn prop_parse_uri_rejects_bare_key(
        path in uri_path(),
        pairs in prop::collection::vec((key(), value()), 0..4),
        bare in key(),
    ) {
        let mut query: Vec<String> = pairs.iter().map(|(k, v)| format!("{k}={v}")).collect();
        query.push(bare);
        let uri = format!("{path}?{}", query.join("&"));

        prop_assert!(matches!(parse_uri(&uri), Err(ClientError::ValidationError(_))));
    }

    #[test]
    fn prop_merge_params_explicit_keys_win(
        inline in prop::collection::vec((key(), value()), 0..6),
        explicit in prop::collection::vec((key(), value()), 0..4),
    ) {
        let merged = merge_params(inline.clone(), &explicit);

        prop_assert!(merged.ends_with(&explicit));
        for (k, _) in &explicit {
            let inline_survivors = merged[..merged.len() - explicit.len()]
                .iter()
                .filter(|(mk, _)| mk == k)
                .count();
            prop_assert_eq!(inline_survivors, 0);
        }
    }

    #[test]
    fn prop_aggregates_partition_totals(
        peers in prop::collection::vec((any::<bool>(), any::<bool>()), 0..20),
        indexes in prop::collection::vec(any::<bool>(), 0..20),
        heads in prop::collection::vec(any::<bool>(), 0..10),
    ) {
        let facts = IndexerClusterFacts {
            peers: peers.iter().map(|(s, u)| peer(*s, *u)).collect(),
            indexes: indexes.iter().map(|s| index(*s)).collect(),
            search_heads: heads.iter().map(|c| search_head(*c)).collect(),
            ..Default::default()
        };

        let agg = ClusterAggregates::compute(&facts);
        prop_assert_eq!(agg.peers_searchable + agg.peers_not_searchable, peers.len());
        prop_assert_eq!(agg.indexes_searchable + agg.indexes_not_searchable, indexes.len());
        prop_assert_eq!(agg.peers_up.total, peers.len());
        prop_assert_eq!(agg.peers_up.count, peers.iter().filter(|(_, u)| *u).count());
        prop_assert_eq!(agg.search_heads_connected.count, heads.iter().filter(|c| **c).count());
    }
}
