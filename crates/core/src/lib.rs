//! Core domain types, outline-reconstruction heuristics, and report
//! formatting for presentation text extraction.

pub mod alt_text;
pub mod assemble;
pub mod bullet;
pub mod error;
pub mod report;
pub mod slide;
pub mod types;

pub use alt_text::AltTextResolver;
pub use assemble::ShapeTextAssembler;
pub use bullet::{BulletResolver, Resolution};
pub use error::{Error, Result};
pub use report::ReportFormatter;
pub use slide::SlideAssembler;
pub use types::{
    BulletHint, Document, Paragraph, PictureShape, Shape, Slide, SlideRecord, TextShape,
};
