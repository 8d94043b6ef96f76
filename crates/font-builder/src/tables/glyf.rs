//! glyf/loca table construction

use write_fonts::tables::{
    glyf::{Glyf, GlyfLocaBuilder},
    loca::{Loca, LocaFormat},
};

use crate::{
    FontDocument,
    error::{FontBuildError, Result},
};

/// Build the glyf and loca tables in glyph order.
pub(crate) fn build_glyf(doc: &FontDocument) -> Result<(Glyf, Loca, LocaFormat)> {
    let mut builder = GlyfLocaBuilder::new();

    for entry in &doc.glyphs {
        builder.add_glyph(&entry.glyph).map_err(|e| FontBuildError::Glyph {
            name: entry.name.clone(),
            message: e.to_string(),
        })?;
    }

    Ok(builder.build())
}
