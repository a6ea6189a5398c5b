use neo4rs::query;
use tracing::info;

use crate::GraphClient;

/// Run idempotent schema migrations: constraints, indexes.
///
/// The (bookId, name) uniqueness constraint is what makes concurrent
/// character upserts for the same book collapse onto one node.
pub async fn migrate(client: &GraphClient) -> Result<(), neo4rs::Error> {
    let g = &client.graph;

    info!("Running schema migrations...");

    let constraints = [
        "CREATE CONSTRAINT character_identity IF NOT EXISTS
         FOR (c:Character) REQUIRE (c.bookId, c.name) IS UNIQUE",
        "CREATE CONSTRAINT character_app_id IF NOT EXISTS
         FOR (c:Character) REQUIRE c.appId IS UNIQUE",
    ];

    for c in &constraints {
        g.run(query(c)).await?;
    }
    info!("Character constraints created");

    let indexes = [
        "CREATE INDEX character_book IF NOT EXISTS FOR (c:Character) ON (c.bookId)",
        "CREATE INDEX relates_key IF NOT EXISTS FOR ()-[r:RELATES]-() ON (r.relKey)",
        "CREATE INDEX relates_from IF NOT EXISTS FOR ()-[r:RELATES]-() ON (r.fromChapter)",
    ];

    for idx in &indexes {
        g.run(query(idx)).await?;
    }
    info!("Property indexes created");

    info!("Schema migrations complete");
    Ok(())
}
