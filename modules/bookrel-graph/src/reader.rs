use std::collections::HashSet;

use neo4rs::query;
use tracing::debug;

use bookrel_common::{require_book_id, BookRelError, GraphEdge, GraphNode, GraphView};

use crate::store::{GraphStore, RelationRow};
use crate::writer::opt_int;
use crate::GraphClient;

/// Read-only wrapper for the character graph.
pub struct GraphReader {
    client: GraphClient,
}

impl GraphReader {
    pub fn new(client: GraphClient) -> Self {
        Self { client }
    }

    /// RELATES edges of one book overlapping the given chapter window.
    /// An edge without `toChapter` is open-ended and passes any lower bound.
    pub async fn relations_in_window(
        &self,
        book_id: i64,
        from: Option<i64>,
        to: Option<i64>,
    ) -> Result<Vec<RelationRow>, neo4rs::Error> {
        let q = query(
            "MATCH (a:Character {bookId: $bookId})-[r:RELATES]->(b:Character {bookId: $bookId})
             WHERE ($fromChap IS NULL OR r.toChapter IS NULL OR r.toChapter >= $fromChap)
               AND ($toChap IS NULL OR r.fromChapter <= $toChap)
             RETURN toString(a.appId) AS aId, a.name AS aName,
                    toString(b.appId) AS bId, b.name AS bName,
                    r.type AS type, r.weight AS weight,
                    r.fromChapter AS fromChapter, r.toChapter AS toChapter",
        )
        .param("bookId", book_id)
        .param("fromChap", opt_int(from))
        .param("toChap", opt_int(to));

        let mut rows = Vec::new();
        let mut stream = self.client.graph.execute(q).await?;
        while let Some(row) = stream.next().await? {
            let to_chapter: Option<i64> = row.get("toChapter").unwrap_or(None);
            rows.push(RelationRow {
                src_id: row.get("aId").unwrap_or_default(),
                src_name: row.get("aName").unwrap_or_default(),
                dst_id: row.get("bId").unwrap_or_default(),
                dst_name: row.get("bName").unwrap_or_default(),
                rel_type: row.get("type").unwrap_or_default(),
                weight: row.get("weight").unwrap_or(None),
                from_chapter: row.get("fromChapter").unwrap_or(None),
                to_chapter: to_chapter.into(),
            });
        }

        Ok(rows)
    }
}

/// Retrieve the graph of `book_id` visible in the optional chapter window.
pub async fn get_graph(
    store: &dyn GraphStore,
    book_id: i64,
    from: Option<i64>,
    to: Option<i64>,
) -> Result<GraphView, BookRelError> {
    require_book_id(book_id)?;

    let rows = store.fetch_relations(book_id, from, to).await?;
    let view = assemble_view(rows);
    debug!(
        book_id,
        ?from,
        ?to,
        nodes = view.nodes.len(),
        edges = view.edges.len(),
        "Graph retrieved"
    );
    Ok(view)
}

/// Build a view from relation rows. Nodes are keyed by their stable id and
/// listed once, in order of first appearance.
pub fn assemble_view(rows: Vec<RelationRow>) -> GraphView {
    let mut seen = HashSet::new();
    let mut nodes = Vec::new();
    let mut edges = Vec::with_capacity(rows.len());

    for row in rows {
        for (id, name) in [(&row.src_id, &row.src_name), (&row.dst_id, &row.dst_name)] {
            if seen.insert(id.clone()) {
                nodes.push(GraphNode {
                    id: id.clone(),
                    name: name.clone(),
                });
            }
        }

        edges.push(GraphEdge {
            src: row.src_id,
            dst: row.dst_id,
            rel_type: row.rel_type,
            weight: row.weight,
            from_chapter: row.from_chapter,
            to_chapter: row.to_chapter,
        });
    }

    GraphView { nodes, edges }
}
