//! Icon name normalization.

use std::borrow::Cow;

use log::debug;

use crate::config::RESERVED_NAMES;

/// Replace a reserved icon name with its safe spelling; other names pass through.
pub fn remap_reserved(name: &str) -> Cow<'_, str> {
    match RESERVED_NAMES.iter().find(|(reserved, _)| *reserved == name) {
        Some((_, replacement)) => {
            debug!("renaming reserved icon name '{name}' to '{replacement}'");
            Cow::Borrowed(*replacement)
        }
        None => Cow::Borrowed(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renames_return() {
        assert_eq!(remap_reserved("return"), "return_icon");
    }

    #[test]
    fn leaves_other_names_alone() {
        assert_eq!(remap_reserved("returns"), "returns");
        assert_eq!(remap_reserved("Return"), "Return");
        assert_eq!(remap_reserved("return_icon"), "return_icon");
    }
}
