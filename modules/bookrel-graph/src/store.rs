// Graph store boundary.
//
// GraphStore is everything the engines need from persistence: read the
// RELATES rows visible in a chapter window, and apply a merge plan
// atomically. Neo4jStore is the production implementation;
// testing::MockGraphStore is the in-memory one.

use anyhow::Result;
use async_trait::async_trait;

use bookrel_common::ChapterBound;

use crate::ingest::MergePlan;
use crate::reader::GraphReader;
use crate::writer::GraphWriter;
use crate::GraphClient;

/// One RELATES edge with both endpoints, as returned by a window query.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationRow {
    pub src_id: String,
    pub src_name: String,
    pub dst_id: String,
    pub dst_name: String,
    pub rel_type: String,
    pub weight: Option<f64>,
    pub from_chapter: Option<i64>,
    pub to_chapter: ChapterBound,
}

#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Every RELATES edge between two characters of `book_id` whose active
    /// interval overlaps `[from, to]`. Absent bounds do not constrain.
    async fn fetch_relations(
        &self,
        book_id: i64,
        from: Option<i64>,
        to: Option<i64>,
    ) -> Result<Vec<RelationRow>>;

    /// Merge-or-create every character and relationship in `plan`, then
    /// overwrite relationship weights. Both halves commit together or not
    /// at all.
    async fn upsert_graph(&self, book_id: i64, plan: &MergePlan) -> Result<()>;

    /// Human-readable server version, for the startup banner.
    async fn server_version(&self) -> Result<String>;
}

/// Neo4j-backed store.
pub struct Neo4jStore {
    client: GraphClient,
    reader: GraphReader,
    writer: GraphWriter,
}

impl Neo4jStore {
    pub fn new(client: GraphClient) -> Self {
        Self {
            reader: GraphReader::new(client.clone()),
            writer: GraphWriter::new(client.clone()),
            client,
        }
    }
}

#[async_trait]
impl GraphStore for Neo4jStore {
    async fn fetch_relations(
        &self,
        book_id: i64,
        from: Option<i64>,
        to: Option<i64>,
    ) -> Result<Vec<RelationRow>> {
        Ok(self.reader.relations_in_window(book_id, from, to).await?)
    }

    async fn upsert_graph(&self, book_id: i64, plan: &MergePlan) -> Result<()> {
        Ok(self.writer.upsert_graph(book_id, plan).await?)
    }

    async fn server_version(&self) -> Result<String> {
        Ok(self.client.server_version().await?)
    }
}
