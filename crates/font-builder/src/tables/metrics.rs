//! head, hhea, hmtx, maxp, OS/2 and post construction

use font_types::{FWord, Fixed, LongDateTime, Tag, UfWord};
use write_fonts::tables::{
    glyf::Glyph,
    head::{Flags, Head, MacStyle},
    hhea::Hhea,
    hmtx::{Hmtx, LongMetric},
    loca::LocaFormat,
    maxp::Maxp,
    os2::{Os2, SelectionFlags},
    post::Post,
};

use crate::FontDocument;

/// Bounds and side-bearing extremes over every glyph with an outline.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FontBounds {
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
    pub advance_max: u16,
    pub min_lsb: i16,
    pub min_rsb: i16,
    pub x_max_extent: i16,
}

impl FontBounds {
    pub(crate) fn of(doc: &FontDocument) -> Self {
        let mut bounds: Option<Self> = None;
        let advance_max = doc.glyphs.iter().map(|g| g.advance).max().unwrap_or(0);

        for entry in &doc.glyphs {
            let Glyph::Simple(simple) = &entry.glyph else {
                continue;
            };
            let bbox = &simple.bbox;
            let rsb = (i32::from(entry.advance) - i32::from(bbox.x_max)) as i16;
            let glyph = Self {
                x_min: bbox.x_min,
                y_min: bbox.y_min,
                x_max: bbox.x_max,
                y_max: bbox.y_max,
                advance_max,
                min_lsb: bbox.x_min,
                min_rsb: rsb,
                x_max_extent: bbox.x_max,
            };
            bounds = Some(match bounds {
                None => glyph,
                Some(acc) => Self {
                    x_min: acc.x_min.min(glyph.x_min),
                    y_min: acc.y_min.min(glyph.y_min),
                    x_max: acc.x_max.max(glyph.x_max),
                    y_max: acc.y_max.max(glyph.y_max),
                    advance_max,
                    min_lsb: acc.min_lsb.min(glyph.min_lsb),
                    min_rsb: acc.min_rsb.min(glyph.min_rsb),
                    x_max_extent: acc.x_max_extent.max(glyph.x_max_extent),
                },
            });
        }

        bounds.unwrap_or(Self { advance_max, ..Self::default() })
    }
}

pub(crate) fn build_head(doc: &FontDocument, bounds: &FontBounds, loca_format: LocaFormat) -> Head {
    Head {
        font_revision: Fixed::from_f64(1.0),
        checksum_adjustment: 0, // Will be recomputed on write
        magic_number: 0x5F0F3CF5,
        // Baseline at y=0, left sidebearing point at x=0
        flags: Flags::from_bits_truncate(0b11),
        units_per_em: doc.metrics.units_per_em,
        // Fixed timestamps keep builds reproducible.
        created: LongDateTime::new(0),
        modified: LongDateTime::new(0),
        x_min: bounds.x_min,
        y_min: bounds.y_min,
        x_max: bounds.x_max,
        y_max: bounds.y_max,
        mac_style: MacStyle::empty(),
        lowest_rec_ppem: 8,
        font_direction_hint: 2,
        index_to_loc_format: match loca_format {
            LocaFormat::Short => 0,
            LocaFormat::Long => 1,
        },
    }
}

pub(crate) fn build_hhea(doc: &FontDocument, bounds: &FontBounds) -> Hhea {
    Hhea {
        ascender: FWord::new(doc.metrics.ascent),
        descender: FWord::new(-doc.metrics.descent),
        line_gap: FWord::new(0),
        advance_width_max: UfWord::new(bounds.advance_max),
        min_left_side_bearing: FWord::new(bounds.min_lsb),
        min_right_side_bearing: FWord::new(bounds.min_rsb),
        x_max_extent: FWord::new(bounds.x_max_extent),
        caret_slope_rise: 1,
        caret_slope_run: 0,
        caret_offset: 0,
        number_of_h_metrics: doc.glyphs.len() as u16,
    }
}

pub(crate) fn build_hmtx(doc: &FontDocument) -> Hmtx {
    let h_metrics = doc
        .glyphs
        .iter()
        .map(|entry| LongMetric { advance: entry.advance, side_bearing: entry.left_side_bearing() })
        .collect();

    Hmtx { h_metrics, left_side_bearings: vec![] }
}

pub(crate) fn build_maxp(doc: &FontDocument) -> Maxp {
    let max_points = doc.glyphs.iter().map(|g| g.points).max().unwrap_or(0);
    let max_contours = doc.glyphs.iter().map(|g| g.contours).max().unwrap_or(0);

    Maxp {
        num_glyphs: doc.glyphs.len() as u16,
        max_points: Some(max_points),
        max_contours: Some(max_contours),
        max_composite_points: Some(0),
        max_composite_contours: Some(0),
        max_zones: Some(2),
        max_twilight_points: Some(0),
        max_storage: Some(0),
        max_function_defs: Some(0),
        max_instruction_defs: Some(0),
        max_stack_elements: Some(0),
        max_size_of_instructions: Some(0),
        max_component_elements: Some(0),
        max_component_depth: Some(0),
    }
}

pub(crate) fn build_os2(doc: &FontDocument) -> Os2 {
    let metrics = doc.metrics;
    let units = i16::try_from(metrics.units_per_em).unwrap_or(i16::MAX);
    let (first_char, last_char) = doc
        .encoded()
        .map(|(cp, _)| cp)
        .fold(None, |range: Option<(u32, u32)>, cp| match range {
            None => Some((cp, cp)),
            Some((lo, hi)) => Some((lo.min(cp), hi.max(cp))),
        })
        .unwrap_or((0, 0));
    let advances: Vec<i32> = doc
        .glyphs
        .iter()
        .filter(|g| g.advance > 0)
        .map(|g| i32::from(g.advance))
        .collect();
    let avg_width = if advances.is_empty() {
        0
    } else {
        (advances.iter().sum::<i32>() / advances.len() as i32) as i16
    };

    Os2 {
        x_avg_char_width: avg_width,
        us_weight_class: 400,
        us_width_class: 5,
        fs_type: 0,
        y_subscript_x_size: units * 13 / 20,
        y_subscript_y_size: units * 3 / 5,
        y_subscript_x_offset: 0,
        y_subscript_y_offset: units * 3 / 40,
        y_superscript_x_size: units * 13 / 20,
        y_superscript_y_size: units * 3 / 5,
        y_superscript_x_offset: 0,
        y_superscript_y_offset: units * 7 / 20,
        y_strikeout_size: units / 20,
        y_strikeout_position: units * 3 / 10,
        s_family_class: 0,
        panose_10: [0; 10],
        // Bit 60: Private Use Area
        ul_unicode_range_1: 0,
        ul_unicode_range_2: 1 << (60 - 32),
        ul_unicode_range_3: 0,
        ul_unicode_range_4: 0,
        ach_vend_id: Tag::new(b"NONE"),
        fs_selection: SelectionFlags::REGULAR,
        us_first_char_index: first_char.min(0xFFFF) as u16,
        us_last_char_index: last_char.min(0xFFFF) as u16,
        s_typo_ascender: metrics.ascent,
        s_typo_descender: -metrics.descent,
        s_typo_line_gap: 0,
        us_win_ascent: metrics.ascent.max(0) as u16,
        us_win_descent: metrics.descent.max(0) as u16,
        ul_code_page_range_1: Some(1), // Latin 1
        ul_code_page_range_2: Some(0),
        sx_height: Some(0),
        s_cap_height: Some(0),
        us_default_char: Some(0),
        us_break_char: Some(0x20),
        us_max_context: Some(max_context(doc)),
        us_lower_optical_point_size: None,
        us_upper_optical_point_size: None,
    }
}

/// Longest ligature input, which bounds the shaping context.
fn max_context(doc: &FontDocument) -> u16 {
    doc.ligatures
        .iter()
        .map(|rule| rule.components.len())
        .max()
        .unwrap_or(0)
        .min(u16::MAX as usize) as u16
}

/// Version 2 post table carrying the glyph names the ligatures are keyed by.
pub(crate) fn build_post(doc: &FontDocument) -> Post {
    let mut post = Post::new_v2(doc.glyphs.iter().map(|g| g.name.as_str()));
    post.italic_angle = Fixed::from_f64(0.0);
    post.underline_position = FWord::new(-(doc.metrics.descent / 2));
    post.underline_thickness = FWord::new((doc.metrics.units_per_em / 20) as i16);
    post.is_fixed_pitch = 0;
    post
}
