//! Indexing options

/// Options for a reverse-index pass
#[derive(Debug, Clone)]
pub struct IndexOptions {
    /// Number of visited nodes at which the progress estimate reaches half.
    ///
    /// The total node count is unknown up front, so progress approaches 99%
    /// asymptotically; larger designs want a larger scale.
    pub progress_scale: u32,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self { progress_scale: 64 }
    }
}

impl IndexOptions {
    /// Options with a different progress scale
    pub fn with_progress_scale(mut self, progress_scale: u32) -> Self {
        self.progress_scale = progress_scale;
        self
    }
}
