pub mod citations;
pub mod config;
pub mod logging;
pub mod tree;
pub mod types;

pub use citations::{parse_internal_citations, CitationScanner};
pub use tree::{assemble, LevelStack, TreeAssembler};
pub use types::{CitationRecord, LabelPath, Node, INTERP_MARK};
