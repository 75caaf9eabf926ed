// Resume ↔ job-description matching engine.
// Pure, synchronous analysis over extracted text; I/O lives in handlers.rs.

pub mod analyzer;
pub mod handlers;
pub mod highlight;
pub mod keywords;
pub mod quality;
pub mod report;
pub mod scoring;
pub mod suggestions;
pub mod vocabulary;
