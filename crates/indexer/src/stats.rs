use serde::Serialize;

/// Summary of one index build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub sections: usize,
    pub batches: usize,
    pub dimension: usize,
    pub model_id: String,
    pub time_ms: u64,
    pub persisted: bool,
}

impl IndexStats {
    pub fn new() -> Self {
        Self::default()
    }
}
