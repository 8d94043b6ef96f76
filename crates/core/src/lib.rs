//! iconforge core: reusable build pipeline logic for icon fonts.
//!
//! The pipeline reads a manifest and a legacy codepoint table, allocates a
//! codepoint to every icon source file, builds the font with one ligature per
//! icon, hints it, and writes the reconciled manifest back.

pub mod allocator;
pub mod config;
pub mod discovery;
pub mod hint;
pub mod io;
pub mod legacy;
pub mod ligature;
pub mod manifest;
pub mod names;
pub mod pipeline;

pub use allocator::{Assignment, CodepointAllocator};
pub use config::BuildConfig;
pub use discovery::{IconSource, find_icon_sources};
pub use hint::{HintOutcome, hint_in_place};
pub use legacy::{LegacyCodepoint, LegacyCodepointMap};
pub use ligature::ligature_tokens;
pub use manifest::{IconManifest, IconRecord, reconcile};
pub use names::remap_reserved;
pub use pipeline::{BuildReport, build};
