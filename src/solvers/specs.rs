use crate::{
    dynamics::{FrameworkMode, DEFAULT_BUFFER_CAPACITY, DEFAULT_DYNAMIC_THRESHOLD},
    encodings::EncodingOptions,
};

/// The default number of extensions kept by the reasoning engine cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 8;

/// The state of a reasoning engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No query was answered yet.
    Input,
    /// The last query was answered positively.
    Accept,
    /// The last query was answered negatively.
    Reject,
    /// An operation failed; the engine ignores the subsequent queries.
    Error,
}

/// The options of a reasoning engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// The options related to the encodings of the semantics.
    pub encoding_options: EncodingOptions,
    /// The mode the framework starts in.
    pub start_mode: FrameworkMode,
    /// The live argument count above which the dynamic mode is abandoned.
    pub dynamic_threshold: usize,
    /// The number of placeholders reserved by the first buffer growth.
    pub buffer_capacity: usize,
    /// The maximal number of extensions kept in the cache.
    pub cache_capacity: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            encoding_options: EncodingOptions::default(),
            start_mode: FrameworkMode::Dynamic,
            dynamic_threshold: DEFAULT_DYNAMIC_THRESHOLD,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}
