//! # Icon font builder
//!
//! Assembles a TrueType font from icon outlines, with a `liga` lookup that
//! turns each icon's typed name into its glyph.
//!
//! ```no_run
//! use iconforge_font_builder::{AdvanceWidth, FontDocument, FontMetrics};
//! use kurbo::BezPath;
//!
//! let mut doc = FontDocument::new(FontMetrics::new(512, 448, 64));
//! doc.set_family_name("Icons");
//! for ch in "ab".chars() {
//!     doc.add_placeholder(ch);
//! }
//! let outline = BezPath::from_svg("M0 0L512 0L256 448Z").unwrap();
//! let glyph = doc.add_glyph("ab", 0xE000, &outline, AdvanceWidth::Fixed(512)).unwrap();
//! doc.add_ligature(&["a", "b"], glyph).unwrap();
//! std::fs::write("Icons.ttf", doc.build().unwrap()).unwrap();
//! ```

mod document;
mod error;
mod tables;

pub use document::{AdvanceWidth, FontDocument, FontMetrics, NOTDEF, glyph_name_for_char};
pub use error::{FontBuildError, Result};
