pub mod document;
pub mod duplicates;
pub mod error;
pub mod index;
pub mod matcher;
pub mod process_queries;
pub mod query;
pub mod search;
pub mod stop_words;
pub mod tokenizer;

pub use document::{DocId, Document, DocumentData, DocumentStatus};
pub use duplicates::remove_duplicates;
pub use error::{Result, SearchError};
pub use index::SearchServer;
pub use matcher::MatchMode;
pub use process_queries::{process_queries, process_queries_joined};
pub use search::{MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
pub use stop_words::StopWords;
