use neo4rs::{query, ConfigBuilder, Graph};

/// Thin wrapper around neo4rs::Graph providing connection setup.
#[derive(Clone)]
pub struct GraphClient {
    pub(crate) graph: Graph,
}

impl GraphClient {
    /// Connect to Neo4j with the given credentials.
    pub async fn connect(uri: &str, user: &str, password: &str) -> Result<Self, neo4rs::Error> {
        let config = ConfigBuilder::default()
            .uri(uri)
            .user(user)
            .password(password)
            .fetch_size(500)
            .max_connections(10)
            .build()?;
        let graph = Graph::connect(config).await?;
        Ok(Self { graph })
    }

    /// Version string reported by the server, or "unknown".
    pub async fn server_version(&self) -> Result<String, neo4rs::Error> {
        let q = query(
            "CALL dbms.components() YIELD name, versions
             RETURN head(versions) AS v
             LIMIT 1",
        );
        let mut stream = self.graph.execute(q).await?;
        if let Some(row) = stream.next().await? {
            let version: String = row.get("v").unwrap_or_default();
            if !version.is_empty() {
                return Ok(version);
            }
        }
        Ok("unknown".to_string())
    }
}
