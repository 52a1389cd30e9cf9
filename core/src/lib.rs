pub mod corpus;
pub mod index;
pub mod search;
pub mod segment;
pub mod snippet;

pub use corpus::CorpusRecord;
pub use index::{DocInfo, Index, Posting};
pub use search::Searcher;
pub use segment::{SearchSegmenter, Segmenter, SegmenterConfig};

pub type DocId = u32;
