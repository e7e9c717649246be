//! PPTX (Office Open XML) parser backend.
//!
//! Parses .pptx files (ZIP archives of XML parts) into the read-only
//! shape/paragraph tree consumed by the outline heuristics.

pub mod parser;

pub use parser::PptxParser;
