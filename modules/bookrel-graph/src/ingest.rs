//! Merge-upsert of extractor output into the persistent character graph.
//!
//! Extractor ids are scoped to a single payload, so every edge is first
//! translated to character names and all merges are keyed by
//! (bookId, name). Edges that point at unknown ids are dropped.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use bookrel_common::{
    require_book_id, BookRelError, ChapterBound, IngestSummary, IngestionPayload,
    DEFAULT_RELATION_TYPE,
};

use crate::store::GraphStore;

/// A relationship to merge between two characters, addressed by name.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationUpsert {
    pub src_name: String,
    pub dst_name: String,
    pub rel_type: String,
    pub weight: Option<f64>,
    pub from_chapter: Option<i64>,
    pub to_chapter: ChapterBound,
}

impl RelationUpsert {
    /// Identity of the relationship between its two endpoints. Weight is
    /// not part of it.
    pub fn key(&self) -> String {
        relation_key(&self.rel_type, self.from_chapter, self.to_chapter)
    }
}

/// Encode (type, fromChapter, toChapter) as a single comparable string.
/// A JSON array keeps the encoding unambiguous for any type string.
pub fn relation_key(rel_type: &str, from_chapter: Option<i64>, to_chapter: ChapterBound) -> String {
    serde_json::json!([rel_type, from_chapter, to_chapter.as_option()]).to_string()
}

/// Distinct character names plus the resolved relationships to upsert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergePlan {
    pub names: Vec<String>,
    pub relations: Vec<RelationUpsert>,
}

impl MergePlan {
    /// Translate an extractor payload into a merge plan.
    ///
    /// Fails only when the node list is missing. Duplicate node ids keep
    /// their first name; duplicate names collapse in first-seen order.
    pub fn from_payload(payload: &IngestionPayload) -> Result<Self, BookRelError> {
        let nodes = payload
            .nodes
            .as_ref()
            .ok_or_else(|| BookRelError::invalid("ingestion payload has no node list"))?;

        let mut id_to_name: HashMap<&str, &str> = HashMap::with_capacity(nodes.len());
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for node in nodes {
            id_to_name.entry(node.id.as_str()).or_insert(node.name.as_str());
            if seen.insert(node.name.as_str()) {
                names.push(node.name.clone());
            }
        }

        let mut relations = Vec::new();
        let mut dropped = 0usize;
        for edge in payload.edges.iter().flatten() {
            let (Some(src), Some(dst)) = (
                edge.src.as_deref().and_then(|id| id_to_name.get(id)),
                edge.dst.as_deref().and_then(|id| id_to_name.get(id)),
            ) else {
                dropped += 1;
                continue;
            };

            relations.push(RelationUpsert {
                src_name: src.to_string(),
                dst_name: dst.to_string(),
                rel_type: edge
                    .rel_type
                    .clone()
                    .unwrap_or_else(|| DEFAULT_RELATION_TYPE.to_string()),
                weight: edge.weight,
                from_chapter: edge.from_chapter,
                to_chapter: edge.to_chapter.into(),
            });
        }

        if dropped > 0 {
            debug!(dropped, "Skipped edges with unresolvable endpoints");
        }

        Ok(Self { names, relations })
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.relations.is_empty()
    }
}

/// Upsert `payload` into the graph of `book_id`.
///
/// Re-ingesting the same payload is a no-op apart from weights, which are
/// always overwritten. The reported counts are the payload sizes after
/// resolution, not the number of newly created entities.
pub async fn ingest(
    store: &dyn GraphStore,
    book_id: i64,
    payload: &IngestionPayload,
) -> Result<IngestSummary, BookRelError> {
    require_book_id(book_id)?;
    let plan = MergePlan::from_payload(payload)?;

    if !plan.is_empty() {
        store.upsert_graph(book_id, &plan).await?;
    }

    info!(
        book_id,
        nodes = plan.names.len(),
        edges = plan.relations.len(),
        "Ingestion merged"
    );

    Ok(IngestSummary {
        book_id,
        nodes_upserted: plan.names.len(),
        edges_upserted: plan.relations.len(),
    })
}
