//! Table compilation for [`FontDocument`].

mod cmap;
mod glyf;
mod gsub;
mod metrics;
mod name;

use log::info;
use write_fonts::FontBuilder;

use crate::{FontDocument, error::Result};

pub(crate) fn build_font(doc: &FontDocument) -> Result<Vec<u8>> {
    let (glyf, loca, loca_format) = glyf::build_glyf(doc)?;
    let bounds = metrics::FontBounds::of(doc);

    let mut builder = FontBuilder::new();
    builder.add_table(&metrics::build_head(doc, &bounds, loca_format))?;
    builder.add_table(&metrics::build_hhea(doc, &bounds))?;
    builder.add_table(&metrics::build_hmtx(doc))?;
    builder.add_table(&metrics::build_maxp(doc))?;
    builder.add_table(&metrics::build_os2(doc))?;
    builder.add_table(&metrics::build_post(doc))?;
    builder.add_table(&name::build_name(doc))?;
    builder.add_table(&cmap::build_cmap(doc))?;
    builder.add_table(&glyf)?;
    builder.add_table(&loca)?;
    builder.add_table(&gsub::build_gsub(doc))?;

    info!(
        "Compiled '{}': {} glyphs, {} ligatures",
        doc.family_name(),
        doc.glyph_count(),
        doc.ligatures.len()
    );
    Ok(builder.build())
}
