use serde::{Deserialize, Serialize};

/// Relationship category used when the extractor leaves `type` empty.
pub const DEFAULT_RELATION_TYPE: &str = "CO_OCCUR";

/// Snapshot window (in chapters) used when the caller gives none.
pub const DEFAULT_WINDOW: i64 = 10;

// --- Chapter intervals ---

/// End of a relationship's active interval.
///
/// `Open` means the relationship has no recorded end and is still active at
/// the latest known chapter. On the wire this is a nullable integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "Option<i64>")]
pub enum ChapterBound {
    Bounded(i64),
    #[default]
    Open,
}

impl ChapterBound {
    /// True if the interval is still active at or after `chapter`.
    pub fn reaches(&self, chapter: i64) -> bool {
        match self {
            ChapterBound::Bounded(to) => *to >= chapter,
            ChapterBound::Open => true,
        }
    }

    pub fn as_option(&self) -> Option<i64> {
        (*self).into()
    }
}

impl From<Option<i64>> for ChapterBound {
    fn from(v: Option<i64>) -> Self {
        match v {
            Some(to) => ChapterBound::Bounded(to),
            None => ChapterBound::Open,
        }
    }
}

impl From<ChapterBound> for Option<i64> {
    fn from(b: ChapterBound) -> Self {
        match b {
            ChapterBound::Bounded(to) => Some(to),
            ChapterBound::Open => None,
        }
    }
}

/// Inclusive chapter range produced by snapshot windowing.
/// Always satisfies `1 <= from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRange {
    pub from: i64,
    pub to: i64,
}

impl ChapterRange {
    pub fn len(&self) -> i64 {
        self.to - self.from + 1
    }

    pub fn is_empty(&self) -> bool {
        self.to < self.from
    }
}

/// Interval-overlap test between a relationship's active interval and an
/// optional query window.
///
/// An absent window bound does not constrain. An open-ended relationship
/// passes every lower bound. A relationship with no start chapter never
/// satisfies an upper bound (the store compares against null).
pub fn overlaps_window(
    rel_from: Option<i64>,
    rel_to: ChapterBound,
    window_from: Option<i64>,
    window_to: Option<i64>,
) -> bool {
    let lower_ok = window_from.map_or(true, |from| rel_to.reaches(from));
    let upper_ok = window_to.map_or(true, |to| rel_from.is_some_and(|start| start <= to));
    lower_ok && upper_ok
}

// --- Graph view (response shape) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Stable application id of the character, not its name.
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub src: String,
    pub dst: String,
    #[serde(rename = "type")]
    pub rel_type: String,
    pub weight: Option<f64>,
    pub from_chapter: Option<i64>,
    #[serde(default)]
    pub to_chapter: ChapterBound,
}

impl GraphEdge {
    /// Weight used for filtering and ranking. Absent counts as zero.
    pub fn effective_weight(&self) -> f64 {
        self.weight.unwrap_or(0.0)
    }
}

/// Nodes in first-appearance order plus the edges between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphView {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

// --- Ingestion payload (extractor output) ---

/// A character as reported by the extractor. `id` is only meaningful inside
/// the payload it came with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadNode {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadEdge {
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub dst: Option<String>,
    #[serde(rename = "type", default)]
    pub rel_type: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub from_chapter: Option<i64>,
    #[serde(default)]
    pub to_chapter: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestionPayload {
    #[serde(default)]
    pub nodes: Option<Vec<PayloadNode>>,
    #[serde(default)]
    pub edges: Option<Vec<PayloadEdge>>,
}

/// Counts reported after an ingestion. These are the sizes of what was
/// submitted for upsert, not the number of newly created entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestSummary {
    pub book_id: i64,
    pub nodes_upserted: usize,
    pub edges_upserted: usize,
}
