//! Weight filtering and top-N trimming of a retrieved graph view.

use std::cmp::Ordering;
use std::collections::HashSet;

use bookrel_common::{GraphEdge, GraphView};

/// Apply a minimum-weight filter and a top-N cap to `view`.
///
/// Absent weights count as zero. The top-N cap sorts by weight descending
/// (stable, so ties keep their input order) and then drops nodes no longer
/// touched by a surviving edge. A plain weight filter leaves the node list
/// alone: pruning only runs together with the cap.
pub fn trim(view: &GraphView, min_weight: Option<f64>, limit: Option<i64>) -> GraphView {
    let mut nodes = view.nodes.clone();
    let mut edges: Vec<GraphEdge> = match min_weight.filter(|m| !m.is_nan()) {
        Some(min) => view
            .edges
            .iter()
            // drop only edges strictly below the threshold; NaN weights stay
            .filter(|e| e.effective_weight().partial_cmp(&min) != Some(Ordering::Less))
            .cloned()
            .collect(),
        None => view.edges.clone(),
    };

    let cap = limit
        .filter(|l| *l > 0)
        .map(|l| usize::try_from(l).unwrap_or(usize::MAX))
        .filter(|l| *l < edges.len());

    if let Some(cap) = cap {
        edges.sort_by(|a, b| b.effective_weight().total_cmp(&a.effective_weight()));
        edges.truncate(cap);

        let keep: HashSet<&str> = edges
            .iter()
            .flat_map(|e| [e.src.as_str(), e.dst.as_str()])
            .collect();
        nodes.retain(|n| keep.contains(n.id.as_str()));
    }

    GraphView { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookrel_common::{ChapterBound, GraphNode};

    fn node(id: &str) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            name: format!("name-{id}"),
        }
    }

    fn edge(src: &str, dst: &str, rel_type: &str, weight: Option<f64>) -> GraphEdge {
        GraphEdge {
            src: src.to_string(),
            dst: dst.to_string(),
            rel_type: rel_type.to_string(),
            weight,
            from_chapter: Some(1),
            to_chapter: ChapterBound::Open,
        }
    }

    fn sample() -> GraphView {
        GraphView {
            nodes: vec![node("a"), node("b"), node("c"), node("d")],
            edges: vec![
                edge("a", "b", "ALLY", Some(0.7)),
                edge("b", "c", "ENEMY", Some(0.2)),
                edge("c", "d", "CO_OCCUR", None),
                edge("a", "d", "ALLY", Some(0.9)),
            ],
        }
    }

    #[test]
    fn no_filters_is_identity() {
        let view = sample();
        assert_eq!(trim(&view, None, None), view);
        assert_eq!(trim(&view, Some(0.0), None), view);
    }

    #[test]
    fn trimming_twice_changes_nothing() {
        let once = trim(&sample(), Some(0.0), None);
        assert_eq!(trim(&once, Some(0.0), None), once);
    }

    #[test]
    fn min_weight_treats_missing_weight_as_zero() {
        let out = trim(&sample(), Some(0.1), None);
        let types: Vec<_> = out.edges.iter().map(|e| e.rel_type.as_str()).collect();
        assert_eq!(types, vec!["ALLY", "ENEMY", "ALLY"]);
    }

    #[test]
    fn min_weight_is_inclusive() {
        let out = trim(&sample(), Some(0.7), None);
        assert_eq!(out.edges.len(), 2);
    }

    #[test]
    fn nan_weight_is_not_below_threshold() {
        let view = GraphView {
            nodes: vec![node("a"), node("b"), node("c")],
            edges: vec![
                edge("a", "b", "ALLY", Some(f64::NAN)),
                edge("b", "c", "ENEMY", Some(0.1)),
            ],
        };
        let out = trim(&view, Some(0.5), None);
        let types: Vec<_> = out.edges.iter().map(|e| e.rel_type.as_str()).collect();
        assert_eq!(types, vec!["ALLY"]);
    }

    #[test]
    fn weight_filter_alone_keeps_orphaned_nodes() {
        let out = trim(&sample(), Some(0.8), None);
        assert_eq!(out.edges.len(), 1);
        assert_eq!(out.nodes.len(), 4);
    }

    #[test]
    fn limit_keeps_heaviest_edges_and_prunes_nodes() {
        let out = trim(&sample(), None, Some(2));
        assert_eq!(out.edges.len(), 2);
        assert_eq!(out.edges[0].weight, Some(0.9));
        assert_eq!(out.edges[1].weight, Some(0.7));
        let ids: Vec<_> = out.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "d"]);
    }

    #[test]
    fn limit_node_set_equals_surviving_endpoints() {
        let view = sample();
        for limit in 1..view.edges.len() as i64 {
            let out = trim(&view, None, Some(limit));
            assert_eq!(out.edges.len(), limit as usize);
            let endpoints: HashSet<&str> = out
                .edges
                .iter()
                .flat_map(|e| [e.src.as_str(), e.dst.as_str()])
                .collect();
            let ids: HashSet<&str> = out.nodes.iter().map(|n| n.id.as_str()).collect();
            assert_eq!(ids, endpoints);
        }
    }

    #[test]
    fn ties_keep_input_order() {
        let view = GraphView {
            nodes: vec![node("a"), node("b"), node("c")],
            edges: vec![
                edge("a", "b", "FIRST", Some(0.5)),
                edge("b", "c", "SECOND", Some(0.5)),
                edge("a", "c", "THIRD", Some(0.5)),
            ],
        };
        let out = trim(&view, None, Some(2));
        let types: Vec<_> = out.edges.iter().map(|e| e.rel_type.as_str()).collect();
        assert_eq!(types, vec!["FIRST", "SECOND"]);
    }

    #[test]
    fn limit_at_or_above_edge_count_skips_pruning() {
        let view = sample();
        let filtered = trim(&view, Some(0.8), Some(1));
        assert_eq!(filtered.nodes.len(), 4);
        let out = trim(&view, None, Some(4));
        assert_eq!(out, view);
    }

    #[test]
    fn non_positive_limit_is_ignored() {
        let view = sample();
        assert_eq!(trim(&view, None, Some(0)), view);
        assert_eq!(trim(&view, None, Some(-3)), view);
    }

    #[test]
    fn input_is_not_mutated() {
        let view = sample();
        let before = view.clone();
        let _ = trim(&view, Some(0.5), Some(1));
        assert_eq!(view, before);
    }
}
