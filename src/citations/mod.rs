pub mod anchors;
pub mod layer;
pub mod markers;
pub mod scanner;

pub use layer::citation_layer;
pub use markers::{recognize_run, MarkerGrammar, MarkerRun};
pub use scanner::{parse_internal_citations, CitationScanner};
