#![cfg(feature = "test-utils")]

// Neo4j store integration tests.
//
// Requirements: Docker (for Neo4j via testcontainers)
//
// Run with: cargo test -p bookrel-graph --features test-utils --test neo4j_store_test

use std::sync::Arc;

use bookrel_common::{ChapterBound, IngestionPayload, PayloadEdge, PayloadNode};
use bookrel_graph::{ingest, GraphService, GraphStore, Neo4jStore};

async fn setup() -> (impl std::any::Any, GraphService) {
    let (container, client) = bookrel_graph::testutil::neo4j_container().await;
    let store: Arc<dyn GraphStore> = Arc::new(Neo4jStore::new(client));
    (container, GraphService::new(store))
}

fn payload(weight: f64) -> IngestionPayload {
    IngestionPayload {
        nodes: Some(vec![
            PayloadNode {
                id: "1".into(),
                name: "Elizabeth Bennet".into(),
            },
            PayloadNode {
                id: "2".into(),
                name: "Mr. Darcy".into(),
            },
            PayloadNode {
                id: "3".into(),
                name: "Mr. Wickham".into(),
            },
        ]),
        edges: Some(vec![
            PayloadEdge {
                src: Some("1".into()),
                dst: Some("2".into()),
                rel_type: Some("ALLY".into()),
                weight: Some(weight),
                from_chapter: Some(2),
                to_chapter: None,
            },
            PayloadEdge {
                src: Some("2".into()),
                dst: Some("3".into()),
                rel_type: None,
                weight: None,
                from_chapter: Some(1),
                to_chapter: Some(4),
            },
            PayloadEdge {
                src: Some("3".into()),
                dst: Some("missing".into()),
                rel_type: Some("ENEMY".into()),
                weight: Some(1.0),
                from_chapter: Some(1),
                to_chapter: Some(1),
            },
        ]),
    }
}

#[tokio::test]
async fn ingest_is_idempotent_and_updates_weight() {
    let (_container, service) = setup().await;
    let store = service.store().clone();

    let first = ingest(store.as_ref(), 3, &payload(0.4)).await.unwrap();
    assert_eq!(first.nodes_upserted, 3);
    assert_eq!(first.edges_upserted, 2);

    let second = ingest(store.as_ref(), 3, &payload(0.9)).await.unwrap();
    assert_eq!(second, first);

    let view = service.get_graph(3, None, None, None, None).await.unwrap();
    assert_eq!(view.nodes.len(), 3);
    assert_eq!(view.edges.len(), 2);

    let ally = view.edges.iter().find(|e| e.rel_type == "ALLY").unwrap();
    assert_eq!(ally.weight, Some(0.9));
    assert_eq!(ally.to_chapter, ChapterBound::Open);

    let co = view.edges.iter().find(|e| e.rel_type == "CO_OCCUR").unwrap();
    assert_eq!(co.weight, None);
    assert_eq!(co.to_chapter, ChapterBound::Bounded(4));
}

#[tokio::test]
async fn open_ended_edge_survives_later_windows() {
    let (_container, service) = setup().await;
    ingest(service.store().as_ref(), 3, &payload(0.5)).await.unwrap();

    let late = service.get_graph(3, Some(30), Some(40), None, None).await.unwrap();
    assert_eq!(late.edges.len(), 1);
    assert_eq!(late.edges[0].rel_type, "ALLY");

    let early = service.get_graph(3, Some(1), Some(1), None, None).await.unwrap();
    assert_eq!(early.edges.len(), 1);
    assert_eq!(early.edges[0].rel_type, "CO_OCCUR");
}

#[tokio::test]
async fn seed_twice_keeps_one_copy() {
    let (_container, service) = setup().await;
    service.seed(1).await.unwrap();
    service.seed(1).await.unwrap();

    let view = service.get_graph(1, None, None, None, None).await.unwrap();
    assert_eq!(view.nodes.len(), 3);
    assert_eq!(view.edges.len(), 2);

    let snapshot = service.snapshot(1, Some(1.0), 50, Some(10)).await.unwrap();
    assert_eq!(snapshot.edges.len(), 1);
    assert_eq!(snapshot.edges[0].rel_type, "ENEMY");
}

#[tokio::test]
async fn concurrent_ingest_of_same_book_converges() {
    let (_container, service) = setup().await;
    let store = service.store().clone();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            // Constraint conflicts may abort a racing transaction; a retry is safe.
            for _ in 0..5 {
                if ingest(store.as_ref(), 8, &payload(0.3)).await.is_ok() {
                    return;
                }
            }
            panic!("ingest never succeeded");
        }));
    }
    for h in handles {
        h.await.unwrap();
    }

    let view = service.get_graph(8, None, None, None, None).await.unwrap();
    assert_eq!(view.nodes.len(), 3);
    // one relationship per (pair, type, interval) despite the racing merges
    assert_eq!(view.edges.len(), 2);
    let ally: Vec<_> = view.edges.iter().filter(|e| e.rel_type == "ALLY").collect();
    assert_eq!(ally.len(), 1);
    assert_eq!(ally[0].weight, Some(0.3));
}

#[tokio::test]
async fn server_reports_a_version() {
    let (_container, service) = setup().await;
    let version = service.store().server_version().await.unwrap();
    assert!(version.starts_with('5'));
}
