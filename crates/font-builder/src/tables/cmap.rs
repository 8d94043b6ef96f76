//! cmap table construction

use write_fonts::tables::cmap::{
    Cmap, Cmap12, CmapSubtable, EncodingRecord, PlatformId, SequentialMapGroup,
};

use crate::FontDocument;

/// Build a cmap table using only format 12 subtables.
///
/// Icon codepoints may sit anywhere in the full Unicode range, so the
/// BMP-only format 4 is not emitted.
pub(crate) fn build_cmap(doc: &FontDocument) -> Cmap {
    let mut mappings: Vec<(u32, u32)> =
        doc.encoded().map(|(cp, gid)| (cp, u32::from(gid.to_u16()))).collect();
    mappings.sort_by_key(|(cp, _)| *cp);

    let cmap12 = Cmap12 { language: 0, groups: build_sequential_groups(&mappings) };

    // Platform 0 (Unicode), Encoding 4 (Unicode full repertoire)
    // Platform 3 (Windows), Encoding 10 (Unicode full repertoire)
    Cmap::new(vec![
        EncodingRecord::new(PlatformId::Unicode, 4, CmapSubtable::Format12(cmap12.clone())),
        EncodingRecord::new(PlatformId::Windows, 10, CmapSubtable::Format12(cmap12)),
    ])
}

/// Build sequential map groups from sorted (codepoint, glyph_id) pairs.
///
/// Groups consecutive codepoints that map to consecutive glyph IDs.
fn build_sequential_groups(mappings: &[(u32, u32)]) -> Vec<SequentialMapGroup> {
    let Some(&(first_cp, first_gid)) = mappings.first() else {
        return Vec::new();
    };

    let mut groups = Vec::new();
    let (mut start_cp, mut start_gid) = (first_cp, first_gid);
    let (mut prev_cp, mut prev_gid) = (first_cp, first_gid);

    for &(cp, gid) in &mappings[1..] {
        if cp == prev_cp + 1 && gid == prev_gid + 1 {
            prev_cp = cp;
            prev_gid = gid;
        } else {
            groups.push(SequentialMapGroup::new(start_cp, prev_cp, start_gid));
            (start_cp, start_gid) = (cp, gid);
            (prev_cp, prev_gid) = (cp, gid);
        }
    }
    groups.push(SequentialMapGroup::new(start_cp, prev_cp, start_gid));

    groups
}
