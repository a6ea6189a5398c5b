use std::sync::Arc;

use tracing::info;

use bookrel_common::{require_book_id, BookRelError, ChapterBound, GraphView};

use crate::ingest::{MergePlan, RelationUpsert};
use crate::reader;
use crate::store::GraphStore;
use crate::trim::trim;
use crate::window::compute_window;

/// Book used by the sample seed.
pub const SAMPLE_BOOK_ID: i64 = 1;

/// Retrieval-side operations over a [`GraphStore`].
#[derive(Clone)]
pub struct GraphService {
    store: Arc<dyn GraphStore>,
}

impl GraphService {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn GraphStore> {
        &self.store
    }

    /// Graph for an explicit chapter range, then weight filter and top-N cap.
    pub async fn get_graph(
        &self,
        book_id: i64,
        from_chapter: Option<i64>,
        to_chapter: Option<i64>,
        min_weight: Option<f64>,
        limit: Option<i64>,
    ) -> Result<GraphView, BookRelError> {
        let base = reader::get_graph(self.store.as_ref(), book_id, from_chapter, to_chapter).await?;
        Ok(trim(&base, min_weight, limit))
    }

    /// Graph visible at a reading-progress fraction.
    pub async fn snapshot(
        &self,
        book_id: i64,
        progress: Option<f64>,
        total_chapters: i64,
        window: Option<i64>,
    ) -> Result<GraphView, BookRelError> {
        require_book_id(book_id)?;
        let range = compute_window(progress, total_chapters, window)?;
        info!(
            book_id,
            ?progress,
            total_chapters,
            from = range.from,
            to = range.to,
            "Snapshot window"
        );
        reader::get_graph(self.store.as_ref(), book_id, Some(range.from), Some(range.to)).await
    }

    /// Upsert the fixed demo graph. Safe to call repeatedly.
    pub async fn seed(&self, book_id: i64) -> Result<&'static str, BookRelError> {
        require_book_id(book_id)?;
        self.store.upsert_graph(book_id, &sample_plan()).await?;
        info!(book_id, "Sample graph seeded");
        Ok("seeded")
    }
}

/// Three characters, one closed alliance and one open-ended enmity.
pub fn sample_plan() -> MergePlan {
    let hong = "홍길동";
    let im = "임꺽정";
    let jeon = "전우치";

    MergePlan {
        names: vec![hong.to_string(), im.to_string(), jeon.to_string()],
        relations: vec![
            RelationUpsert {
                src_name: hong.to_string(),
                dst_name: im.to_string(),
                rel_type: "ALLY".to_string(),
                weight: Some(0.7),
                from_chapter: Some(1),
                to_chapter: ChapterBound::Bounded(10),
            },
            RelationUpsert {
                src_name: im.to_string(),
                dst_name: jeon.to_string(),
                rel_type: "ENEMY".to_string(),
                weight: Some(0.6),
                from_chapter: Some(5),
                to_chapter: ChapterBound::Open,
            },
        ],
    }
}
