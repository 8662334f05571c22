//! Data contracts: types + errors shared between the engine and its caller.

pub mod content_search;
pub mod settings;

pub use content_search::{
    ContentSearchMessage, GrepMode, IndexError, IndexedFile, MatchCandidate, SearchError,
    SearchRequest, SearchResult,
};
pub use settings::SearchSettings;
