//! name table construction

use write_fonts::{
    tables::name::{Name, NameRecord},
    types::NameId,
};

use crate::FontDocument;

const SUBFAMILY: &str = "Regular";
const VERSION: &str = "Version 1.000";

/// Build name records for Windows (3/1/0x409) and Mac (1/0/0).
pub(crate) fn build_name(doc: &FontDocument) -> Name {
    let family = doc.family_name();
    let postscript = postscript_name(family);

    let strings: [(u16, String); 6] = [
        (1, family.to_string()),
        (2, SUBFAMILY.to_string()),
        (3, format!("{postscript}-{SUBFAMILY}")),
        (4, family.to_string()),
        (5, VERSION.to_string()),
        (6, postscript),
    ];

    let mut records = Vec::with_capacity(strings.len() * 2);
    for (platform_id, encoding_id, language_id) in [(1, 0, 0), (3, 1, 0x409)] {
        for (name_id, string) in &strings {
            // Mac Roman cannot carry arbitrary text.
            if platform_id == 1 && !string.is_ascii() {
                continue;
            }
            records.push(NameRecord::new(
                platform_id,
                encoding_id,
                language_id,
                NameId::new(*name_id),
                string.clone().into(),
            ));
        }
    }

    Name::new(records)
}

/// PostScript names are printable ASCII without spaces or `[](){}<>/%`.
pub(crate) fn postscript_name(family: &str) -> String {
    let name: String = family
        .chars()
        .filter(|c| c.is_ascii_graphic() && !"[](){}<>/%".contains(*c))
        .take(63)
        .collect();
    if name.is_empty() { String::from("Untitled") } else { name }
}
