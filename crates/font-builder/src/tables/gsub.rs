//! GSUB table construction: one `liga` lookup holding every icon ligature.

use std::collections::BTreeMap;

use write_fonts::{
    tables::{
        gsub::{
            Gsub, Ligature, LigatureSet, LigatureSubstFormat1, SubstitutionLookup,
            SubstitutionLookupList,
        },
        layout::{
            CoverageTable, Feature, FeatureList, FeatureRecord, LangSys, Lookup, LookupFlag,
            Script, ScriptList, ScriptRecord,
        },
    },
    types::{GlyphId16, Tag},
};

use crate::{FontDocument, document::LigatureRule};

pub(crate) const LIGA: Tag = Tag::new(b"liga");
pub(crate) const LATN: Tag = Tag::new(b"latn");

/// Build a GSUB table with the `liga` feature registered for `latn`/default.
pub(crate) fn build_gsub(doc: &FontDocument) -> Gsub {
    let lookup = build_ligature_lookup(&doc.ligatures);

    let script_list = ScriptList::new(vec![ScriptRecord::new(
        LATN,
        Script::new(Some(LangSys::new(vec![0])), vec![]),
    )]);
    let feature_list = FeatureList::new(vec![FeatureRecord::new(LIGA, Feature::new(None, vec![0]))]);
    let lookup_list = SubstitutionLookupList::new(vec![lookup]);

    Gsub::new(script_list, feature_list, lookup_list)
}

/// Group ligatures by first component into a single format 1 subtable.
///
/// Within a group longer ligatures come first so a name that is a prefix of
/// another name cannot shadow it; equal lengths keep registration order.
fn build_ligature_lookup(rules: &[LigatureRule]) -> SubstitutionLookup {
    let mut sets: BTreeMap<u16, Vec<&LigatureRule>> = BTreeMap::new();
    for rule in rules {
        if let Some(first) = rule.components.first() {
            sets.entry(first.to_u16()).or_default().push(rule);
        }
    }

    let mut coverage = Vec::with_capacity(sets.len());
    let mut ligature_sets = Vec::with_capacity(sets.len());
    for (first, mut group) in sets {
        group.sort_by_key(|rule| std::cmp::Reverse(rule.components.len()));
        let ligatures = group
            .into_iter()
            .map(|rule| Ligature::new(rule.glyph, rule.components[1..].to_vec()))
            .collect();
        coverage.push(GlyphId16::new(first));
        ligature_sets.push(LigatureSet::new(ligatures));
    }

    let subtable = LigatureSubstFormat1::new(CoverageTable::format_1(coverage), ligature_sets);
    SubstitutionLookup::Ligature(Lookup::new(LookupFlag::empty(), vec![subtable]))
}
