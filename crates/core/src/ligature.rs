//! Ligature keys: the glyph-name sequence that spells an icon name.

/// Glyph name used to spell `ch` inside a ligature.
///
/// Letters keep their own name; punctuation and digits use their glyph names.
/// Anything else is spelled with the character itself and resolved to an
/// on-demand placeholder by the font document.
pub fn ligature_token(ch: char) -> String {
    let name = match ch {
        '_' => "underscore",
        '-' => "hyphen",
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
        _ => return ch.to_string(),
    };
    name.to_string()
}

/// One token per character of `name`, in order.
pub fn ligature_tokens(name: &str) -> Vec<String> {
    name.chars().map(ligature_token).collect()
}
