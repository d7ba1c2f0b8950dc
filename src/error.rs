#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("parse error: {reason}")]
    Parse { reason: String },

    #[error("knowledge base error: {reason}")]
    KnowledgeBase { reason: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
