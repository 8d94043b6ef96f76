//! In-memory icon font document.

use std::collections::HashMap;

use indexmap::{IndexMap, map::Entry};
use kurbo::{Affine, BezPath, PathEl, Shape};
use log::{debug, warn};
use write_fonts::{
    tables::glyf::{Glyph, SimpleGlyph},
    types::GlyphId16,
};

use crate::{
    error::{FontBuildError, Result},
    tables,
};

/// Name of glyph 0.
pub const NOTDEF: &str = ".notdef";

/// Vertical metrics of the em square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    pub units_per_em: u16,
    pub ascent: i16,
    /// Depth below the baseline, positive.
    pub descent: i16,
}

impl FontMetrics {
    pub const fn new(units_per_em: u16, ascent: i16, descent: i16) -> Self {
        Self { units_per_em, ascent, descent }
    }
}

/// How the advance width of an imported glyph is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceWidth {
    /// Fixed advance; the outline keeps its imported position.
    Fixed(u16),
    /// Zero side bearings: the outline is shifted to x = 0 and the advance is its width.
    Auto,
}

/// A glyph in the document, in glyph order.
#[derive(Debug, Clone)]
pub(crate) struct GlyphEntry {
    pub name: String,
    pub codepoint: Option<u32>,
    pub glyph: Glyph,
    pub advance: u16,
    /// Upper bound of the outline points, for `maxp`.
    pub points: u16,
    pub contours: u16,
}

impl GlyphEntry {
    pub(crate) fn left_side_bearing(&self) -> i16 {
        match &self.glyph {
            Glyph::Simple(simple) => simple.bbox.x_min,
            _ => 0,
        }
    }
}

/// One ligature substitution: `components` typed in order render as `glyph`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LigatureRule {
    pub components: Vec<GlyphId16>,
    pub glyph: GlyphId16,
}

/// An icon font under construction.
///
/// Glyph 0 is always `.notdef`. Placeholders and icons are appended in the
/// order they are added, and one shared ligature lookup collects every
/// registered ligature.
#[derive(Debug, Clone)]
pub struct FontDocument {
    pub(crate) metrics: FontMetrics,
    pub(crate) family_name: String,
    pub(crate) glyphs: Vec<GlyphEntry>,
    pub(crate) ligatures: Vec<LigatureRule>,
    by_name: HashMap<String, GlyphId16>,
    by_codepoint: IndexMap<u32, GlyphId16>,
    /// Blank glyphs ligature components resolve to, by glyph name and by character.
    placeholders: HashMap<String, GlyphId16>,
    placeholder_chars: HashMap<char, GlyphId16>,
}

impl FontDocument {
    pub fn new(metrics: FontMetrics) -> Self {
        let mut doc = Self {
            metrics,
            family_name: String::from("Untitled"),
            glyphs: Vec::new(),
            ligatures: Vec::new(),
            by_name: HashMap::new(),
            by_codepoint: IndexMap::new(),
            placeholders: HashMap::new(),
            placeholder_chars: HashMap::new(),
        };
        doc.push(GlyphEntry {
            name: NOTDEF.to_string(),
            codepoint: None,
            glyph: Glyph::Empty,
            advance: metrics.units_per_em / 2,
            points: 0,
            contours: 0,
        });
        doc
    }

    pub fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    /// Family, full and PostScript names all derive from this.
    pub fn set_family_name(&mut self, name: impl Into<String>) {
        self.family_name = name.into();
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Look up a glyph by name.
    pub fn glyph_id(&self, name: &str) -> Option<GlyphId16> {
        self.by_name.get(name).copied()
    }

    /// Look up the glyph encoded at `codepoint`.
    pub fn glyph_for_codepoint(&self, codepoint: u32) -> Option<GlyphId16> {
        self.by_codepoint.get(&codepoint).copied()
    }

    /// Add a blank, zero-width glyph encoding `ch`, named by [`glyph_name_for_char`].
    ///
    /// Returns the existing placeholder when `ch` already has one.
    pub fn add_placeholder(&mut self, ch: char) -> GlyphId16 {
        if let Some(gid) = self.placeholder_chars.get(&ch) {
            return *gid;
        }
        let name = glyph_name_for_char(ch);
        let gid = self.push(GlyphEntry {
            name: name.clone(),
            codepoint: Some(ch as u32),
            glyph: Glyph::Empty,
            advance: 0,
            points: 0,
            contours: 0,
        });
        self.placeholders.entry(name).or_insert(gid);
        self.placeholder_chars.insert(ch, gid);
        gid
    }

    /// Add an icon glyph named `name`, encoded at `codepoint`.
    ///
    /// `outline` must already be in font units and contain no cubic segments.
    pub fn add_glyph(
        &mut self,
        name: &str,
        codepoint: u32,
        outline: &BezPath,
        width: AdvanceWidth,
    ) -> Result<GlyphId16> {
        let outline = match width {
            AdvanceWidth::Auto if !outline.elements().is_empty() => {
                let bbox = outline.bounding_box();
                Affine::translate((-bbox.x0, 0.0)) * outline.clone()
            }
            _ => outline.clone(),
        };

        let (points, contours) = count_points(&outline);
        let glyph = if contours == 0 {
            Glyph::Empty
        } else {
            let simple = SimpleGlyph::from_bezpath(&outline).map_err(|e| {
                FontBuildError::MalformedOutline { name: name.to_string(), message: format!("{e:?}") }
            })?;
            Glyph::Simple(simple)
        };

        let advance = match (width, &glyph) {
            (AdvanceWidth::Fixed(advance), _) => advance,
            (AdvanceWidth::Auto, Glyph::Simple(simple)) => simple.bbox.x_max.max(0) as u16,
            (AdvanceWidth::Auto, _) => 0,
        };

        Ok(self.push(GlyphEntry {
            name: name.to_string(),
            codepoint: Some(codepoint),
            glyph,
            advance,
            points,
            contours,
        }))
    }

    /// Register a ligature rendering `glyph` when the `components` glyphs are typed.
    ///
    /// Components name placeholder glyphs. A single-character component with
    /// no placeholder of that name resolves to the placeholder for that
    /// character, which is created when missing. Icon glyphs never take part.
    pub fn add_ligature<S: AsRef<str>>(&mut self, components: &[S], glyph: GlyphId16) -> Result<()> {
        let ligature_name = self.glyphs[glyph.to_u16() as usize].name.clone();
        if components.is_empty() {
            return Err(FontBuildError::EmptyLigature(ligature_name));
        }

        let mut resolved = Vec::with_capacity(components.len());
        for component in components {
            let component = component.as_ref();
            let gid = match self.placeholders.get(component).copied() {
                Some(gid) => gid,
                None => {
                    let mut chars = component.chars();
                    match (chars.next(), chars.next()) {
                        (Some(ch), None) => {
                            debug!("creating placeholder for '{ch}' used by '{ligature_name}'");
                            self.add_placeholder(ch)
                        }
                        _ => {
                            return Err(FontBuildError::UnknownComponent {
                                ligature: ligature_name,
                                component: component.to_string(),
                            });
                        }
                    }
                }
            };
            resolved.push(gid);
        }

        self.ligatures.push(LigatureRule { components: resolved, glyph });
        Ok(())
    }

    /// Compile the document into a TrueType font binary.
    pub fn build(&self) -> Result<Vec<u8>> {
        if self.glyphs.len() > u16::MAX as usize {
            return Err(FontBuildError::TooManyGlyphs(self.glyphs.len()));
        }
        tables::build_font(self)
    }

    /// Codepoint to glyph mappings, in insertion order.
    pub(crate) fn encoded(&self) -> impl Iterator<Item = (u32, GlyphId16)> + '_ {
        self.by_codepoint.iter().map(|(cp, gid)| (*cp, *gid))
    }

    fn push(&mut self, mut entry: GlyphEntry) -> GlyphId16 {
        let gid = GlyphId16::new(self.glyphs.len() as u16);

        if self.by_name.contains_key(&entry.name) {
            let unique = (1..)
                .map(|n| format!("{}.{n}", entry.name))
                .find(|candidate| !self.by_name.contains_key(candidate))
                .unwrap_or_default();
            warn!("glyph name '{}' is taken; using '{unique}'", entry.name);
            entry.name = unique;
        }
        self.by_name.insert(entry.name.clone(), gid);
        if let Some(codepoint) = entry.codepoint {
            match self.by_codepoint.entry(codepoint) {
                Entry::Vacant(slot) => {
                    slot.insert(gid);
                }
                Entry::Occupied(slot) => {
                    let existing = &self.glyphs[slot.get().to_u16() as usize].name;
                    warn!(
                        "U+{codepoint:04X} already encodes '{existing}'; '{}' is left unencoded",
                        entry.name
                    );
                }
            }
        }

        self.glyphs.push(entry);
        gid
    }
}

/// Conventional glyph name for a character.
///
/// Digits and common punctuation use their spelled-out names, ASCII letters
/// are named after themselves and everything else gets a `uniXXXX` name.
pub fn glyph_name_for_char(ch: char) -> String {
    let named = match ch {
        ' ' => "space",
        '0' => "zero",
        '1' => "one",
        '2' => "two",
        '3' => "three",
        '4' => "four",
        '5' => "five",
        '6' => "six",
        '7' => "seven",
        '8' => "eight",
        '9' => "nine",
        '_' => "underscore",
        '-' => "hyphen",
        '.' => "period",
        ',' => "comma",
        ':' => "colon",
        ';' => "semicolon",
        '!' => "exclam",
        '?' => "question",
        '&' => "ampersand",
        '@' => "at",
        '+' => "plus",
        '=' => "equal",
        '/' => "slash",
        '(' => "parenleft",
        ')' => "parenright",
        c if c.is_ascii_alphabetic() => return c.to_string(),
        c if (c as u32) <= 0xFFFF => return format!("uni{:04X}", c as u32),
        c => return format!("u{:05X}", c as u32),
    };
    named.to_string()
}

/// Points and contours a quadratic outline compiles to (points are an upper bound).
fn count_points(outline: &BezPath) -> (u16, u16) {
    let (mut points, mut contours) = (0usize, 0usize);
    for el in outline.elements() {
        match el {
            PathEl::MoveTo(_) => {
                points += 1;
                contours += 1;
            }
            PathEl::LineTo(_) => points += 1,
            PathEl::QuadTo(..) => points += 2,
            PathEl::CurveTo(..) => points += 3,
            PathEl::ClosePath => {}
        }
    }
    (points.min(u16::MAX as usize) as u16, contours.min(u16::MAX as usize) as u16)
}
