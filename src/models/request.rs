use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default number of retrieval candidates requested per query.
const DEFAULT_TOP_K: u32 = 10;

/// Request structure for streaming API calls
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreamRequest {
    /// The user query to answer
    pub query: String,
    /// Project scope for retrieval
    pub project_id: Uuid,
    /// Number of retrieval candidates to consider
    pub top_k: u32,
    /// Whether the backend should rerank retrieved candidates
    pub rerank: bool,
}

impl StreamRequest {
    /// Create a new StreamRequest with default retrieval settings.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            project_id: Uuid::nil(),
            top_k: DEFAULT_TOP_K,
            rerank: false,
        }
    }

    /// Scope the request to a project (builder pattern)
    pub fn with_project_id(mut self, project_id: Uuid) -> Self {
        self.project_id = project_id;
        self
    }

    /// Set the number of retrieval candidates (builder pattern)
    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }

    /// Enable or disable reranking (builder pattern)
    pub fn with_rerank(mut self, rerank: bool) -> Self {
        self.rerank = rerank;
        self
    }
}
