//! # Outline import
//!
//! Turns icon source files into glyph outlines expressed in font units.
//!
//! Two source formats are understood:
//!
//! - **SVG**: every filled path of the document as resolved by `usvg`
//!   (shapes, `<use>` references, stylesheets and transforms included). The
//!   document is scaled so its height spans the em and its top edge sits on
//!   the ascender.
//! - **EPS**: the PostScript path operators found after `%%EndProlog`, taken
//!   as-is in y-up units.
//!
//! ```no_run
//! use std::path::Path;
//! use iconforge_outline::{EmSquare, import_file};
//!
//! let outline = import_file(Path::new("src/add.svg"), &EmSquare::new(448.0, 64.0)).unwrap();
//! println!("{} path elements", outline.elements().len());
//! ```

mod eps;
mod error;
mod quad;
mod svg;

use std::{fs::read, path::Path};

use kurbo::BezPath;

pub use eps::import_eps;
pub use error::{OutlineError, Result};
pub use quad::to_quadratic;
pub use svg::{import_svg, strip_switch_tags};

/// Maximum distance, in font units, between a cubic and its quadratic approximation.
pub const QUAD_ACCURACY: f64 = 0.5;

/// Vertical extent of the em box the outlines are mapped into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmSquare {
    /// Distance from the baseline to the top of the em box.
    pub ascent: f64,
    /// Distance from the baseline to the bottom of the em box (positive).
    pub descent: f64,
}

impl EmSquare {
    pub fn new(ascent: f64, descent: f64) -> Self {
        Self { ascent, descent }
    }

    pub fn height(&self) -> f64 {
        self.ascent + self.descent
    }
}

/// Icon source formats, recognised by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Svg,
    Eps,
}

impl SourceFormat {
    /// Detect the format from the extension. Matching is case-sensitive.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "svg" => Some(Self::Svg),
            "eps" => Some(Self::Eps),
            _ => None,
        }
    }
}

/// Read an icon source file and return its outline in font units, quadratic only.
pub fn import_file(path: &Path, em: &EmSquare) -> Result<BezPath> {
    let format = SourceFormat::from_path(path)
        .ok_or_else(|| OutlineError::UnsupportedFormat(path.display().to_string()))?;
    let bytes =
        read(path).map_err(|source| OutlineError::Read { path: path.to_path_buf(), source })?;
    let text = String::from_utf8_lossy(&bytes);

    let outline = match format {
        SourceFormat::Svg => import_svg(&text, em)?,
        SourceFormat::Eps => import_eps(&text),
    };

    Ok(to_quadratic(&outline, QUAD_ACCURACY))
}
