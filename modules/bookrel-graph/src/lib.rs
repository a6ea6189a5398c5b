pub mod client;
pub mod ingest;
pub mod migrate;
pub mod pipeline;
pub mod reader;
pub mod service;
pub mod store;
pub mod trim;
pub mod window;
pub mod writer;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

#[cfg(feature = "test-utils")]
pub mod testutil;

pub use client::GraphClient;
pub use ingest::{ingest, MergePlan, RelationUpsert};
pub use pipeline::IngestPipeline;
pub use reader::{assemble_view, get_graph, GraphReader};
pub use service::GraphService;
pub use store::{GraphStore, Neo4jStore, RelationRow};
pub use trim::trim;
pub use window::compute_window;
pub use writer::GraphWriter;
