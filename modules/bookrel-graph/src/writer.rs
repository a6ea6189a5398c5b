use neo4rs::{query, BoltFloat, BoltInteger, BoltMap, BoltNull, BoltString, BoltType};
use tracing::{debug, warn};

use crate::ingest::{MergePlan, RelationUpsert};
use crate::GraphClient;

/// Character upsert. `appId` is assigned once, on creation.
const UPSERT_CHARACTERS: &str = "UNWIND $names AS name
     MERGE (c:Character {bookId: $bookId, name: name})
       ON CREATE SET c.appId = randomUUID()";

/// Relationship upsert keyed on `relKey`, since MERGE cannot match on null
/// chapter bounds. The key fields are written on creation only; weight is
/// overwritten every time.
const UPSERT_RELATIONS: &str = "UNWIND $rels AS rel
     MATCH (a:Character {bookId: $bookId, name: rel.srcName})
     MATCH (b:Character {bookId: $bookId, name: rel.dstName})
     MERGE (a)-[r:RELATES {relKey: rel.relKey}]->(b)
       ON CREATE SET r.type = rel.type,
                     r.fromChapter = rel.fromChapter,
                     r.toChapter = rel.toChapter
     SET r.weight = rel.weight";

/// Write-side wrapper for the character graph.
pub struct GraphWriter {
    client: GraphClient,
}

impl GraphWriter {
    pub fn new(client: GraphClient) -> Self {
        Self { client }
    }

    /// Apply a merge plan in a single transaction: characters first, then
    /// relationships. Nothing is committed if either statement fails.
    pub async fn upsert_graph(&self, book_id: i64, plan: &MergePlan) -> Result<(), neo4rs::Error> {
        let names = query(UPSERT_CHARACTERS)
            .param("bookId", book_id)
            .param("names", plan.names.clone());

        let rels = query(UPSERT_RELATIONS)
            .param("bookId", book_id)
            .param("rels", relation_params(&plan.relations));

        let mut txn = self.client.graph.start_txn().await?;
        let applied = async {
            txn.run(names).await?;
            if !plan.relations.is_empty() {
                txn.run(rels).await?;
            }
            Ok::<(), neo4rs::Error>(())
        }
        .await;

        match applied {
            Ok(()) => {
                txn.commit().await?;
                debug!(
                    book_id,
                    names = plan.names.len(),
                    relations = plan.relations.len(),
                    "Merge plan committed"
                );
                Ok(())
            }
            Err(e) => {
                warn!(book_id, error = %e, "Merge plan failed, rolling back");
                if let Err(rollback) = txn.rollback().await {
                    warn!(book_id, error = %rollback, "Rollback failed");
                }
                Err(e)
            }
        }
    }
}

/// Build the `$rels` list of maps for the UNWIND.
fn relation_params(relations: &[RelationUpsert]) -> Vec<BoltType> {
    relations
        .iter()
        .map(|r| {
            BoltType::Map(BoltMap::from_iter(vec![
                (BoltString::from("srcName"), str_value(&r.src_name)),
                (BoltString::from("dstName"), str_value(&r.dst_name)),
                (BoltString::from("type"), str_value(&r.rel_type)),
                (BoltString::from("relKey"), str_value(&r.key())),
                (BoltString::from("weight"), opt_float(r.weight)),
                (BoltString::from("fromChapter"), opt_int(r.from_chapter)),
                (BoltString::from("toChapter"), opt_int(r.to_chapter.as_option())),
            ]))
        })
        .collect()
}

fn str_value(s: &str) -> BoltType {
    BoltType::String(BoltString::from(s))
}

fn opt_float(v: Option<f64>) -> BoltType {
    match v {
        Some(f) => BoltType::Float(BoltFloat::new(f)),
        None => BoltType::Null(BoltNull),
    }
}

/// Nullable integer parameter.
pub(crate) fn opt_int(v: Option<i64>) -> BoltType {
    match v {
        Some(i) => BoltType::Integer(BoltInteger::new(i)),
        None => BoltType::Null(BoltNull),
    }
}
