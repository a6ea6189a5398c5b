// Test doubles for the graph engines.
//
// - MockGraphStore (GraphStore): stateful in-memory property graph with
//   the same merge semantics as the Neo4j store, plus a write counter.
// - ScriptedExtractor (GraphExtractor): canned payload, failure, or hang.

use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use bookrel_common::{
    overlaps_window, BookRelError, ChapterBound, GraphExtractor, IngestionPayload,
};

use crate::ingest::MergePlan;
use crate::store::{GraphStore, RelationRow};

// ---------------------------------------------------------------------------
// MockGraphStore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct StoredCharacter {
    book_id: i64,
    app_id: String,
    name: String,
}

#[derive(Debug, Clone)]
struct StoredRelation {
    book_id: i64,
    src_app_id: String,
    dst_app_id: String,
    rel_key: String,
    rel_type: String,
    weight: Option<f64>,
    from_chapter: Option<i64>,
    to_chapter: ChapterBound,
}

#[derive(Default)]
struct MockState {
    characters: Vec<StoredCharacter>,
    relations: Vec<StoredRelation>,
    writes: usize,
}

impl MockState {
    fn app_id(&self, book_id: i64, name: &str) -> Option<String> {
        self.characters
            .iter()
            .find(|c| c.book_id == book_id && c.name == name)
            .map(|c| c.app_id.clone())
    }

    fn name_of(&self, app_id: &str) -> String {
        self.characters
            .iter()
            .find(|c| c.app_id == app_id)
            .map(|c| c.name.clone())
            .unwrap_or_default()
    }
}

/// In-memory graph store. Iteration order is insertion order.
#[derive(Default)]
pub struct MockGraphStore {
    state: Mutex<MockState>,
}

impl MockGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn character_count(&self, book_id: i64) -> usize {
        let state = self.state.lock().unwrap();
        state.characters.iter().filter(|c| c.book_id == book_id).count()
    }

    pub fn relation_count(&self, book_id: i64) -> usize {
        let state = self.state.lock().unwrap();
        state.relations.iter().filter(|r| r.book_id == book_id).count()
    }

    /// Number of `upsert_graph` calls that reached the store.
    pub fn write_count(&self) -> usize {
        self.state.lock().unwrap().writes
    }

    pub fn app_id(&self, book_id: i64, name: &str) -> Option<String> {
        self.state.lock().unwrap().app_id(book_id, name)
    }

    /// Weight of the first relation of `rel_type` from `src` to `dst`.
    /// Outer `None` means no such relation.
    pub fn relation_weight(
        &self,
        book_id: i64,
        src: &str,
        dst: &str,
        rel_type: &str,
    ) -> Option<Option<f64>> {
        let state = self.state.lock().unwrap();
        let src_id = state.app_id(book_id, src)?;
        let dst_id = state.app_id(book_id, dst)?;
        state
            .relations
            .iter()
            .find(|r| {
                r.book_id == book_id
                    && r.src_app_id == src_id
                    && r.dst_app_id == dst_id
                    && r.rel_type == rel_type
            })
            .map(|r| r.weight)
    }
}

#[async_trait]
impl GraphStore for MockGraphStore {
    async fn fetch_relations(
        &self,
        book_id: i64,
        from: Option<i64>,
        to: Option<i64>,
    ) -> Result<Vec<RelationRow>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .relations
            .iter()
            .filter(|r| r.book_id == book_id)
            .filter(|r| overlaps_window(r.from_chapter, r.to_chapter, from, to))
            .map(|r| RelationRow {
                src_id: r.src_app_id.clone(),
                src_name: state.name_of(&r.src_app_id),
                dst_id: r.dst_app_id.clone(),
                dst_name: state.name_of(&r.dst_app_id),
                rel_type: r.rel_type.clone(),
                weight: r.weight,
                from_chapter: r.from_chapter,
                to_chapter: r.to_chapter,
            })
            .collect())
    }

    async fn upsert_graph(&self, book_id: i64, plan: &MergePlan) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.writes += 1;

        for name in &plan.names {
            if state.app_id(book_id, name).is_none() {
                state.characters.push(StoredCharacter {
                    book_id,
                    app_id: Uuid::new_v4().to_string(),
                    name: name.clone(),
                });
            }
        }

        for rel in &plan.relations {
            let (Some(src), Some(dst)) = (
                state.app_id(book_id, &rel.src_name),
                state.app_id(book_id, &rel.dst_name),
            ) else {
                continue;
            };
            let key = rel.key();

            let existing = state.relations.iter_mut().find(|r| {
                r.book_id == book_id && r.src_app_id == src && r.dst_app_id == dst && r.rel_key == key
            });
            match existing {
                Some(r) => r.weight = rel.weight,
                None => state.relations.push(StoredRelation {
                    book_id,
                    src_app_id: src,
                    dst_app_id: dst,
                    rel_key: key,
                    rel_type: rel.rel_type.clone(),
                    weight: rel.weight,
                    from_chapter: rel.from_chapter,
                    to_chapter: rel.to_chapter,
                }),
            }
        }

        Ok(())
    }

    async fn server_version(&self) -> Result<String> {
        Ok("in-memory".to_string())
    }
}

// ---------------------------------------------------------------------------
// ScriptedExtractor
// ---------------------------------------------------------------------------

enum Script {
    Payload(IngestionPayload),
    Fail(String),
    Hang,
}

/// Extractor returning a fixed outcome and recording its calls.
pub struct ScriptedExtractor {
    script: Script,
    calls: Mutex<Vec<(i64, String)>>,
}

impl ScriptedExtractor {
    fn with(script: Script) -> Self {
        Self {
            script,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn returning(payload: IngestionPayload) -> Self {
        Self::with(Script::Payload(payload))
    }

    pub fn failing(message: &str) -> Self {
        Self::with(Script::Fail(message.to_string()))
    }

    /// Never answers within any reasonable timeout.
    pub fn hanging() -> Self {
        Self::with(Script::Hang)
    }

    pub fn calls(&self) -> Vec<(i64, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GraphExtractor for ScriptedExtractor {
    async fn extract(&self, book_id: i64, url: &str) -> Result<IngestionPayload, BookRelError> {
        self.calls.lock().unwrap().push((book_id, url.to_string()));
        match &self.script {
            Script::Payload(p) => Ok(p.clone()),
            Script::Fail(message) => Err(BookRelError::Upstream {
                book_id,
                url: url.to_string(),
                message: message.clone(),
            }),
            Script::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(BookRelError::Upstream {
                    book_id,
                    url: url.to_string(),
                    message: "unreachable".to_string(),
                })
            }
        }
    }
}
