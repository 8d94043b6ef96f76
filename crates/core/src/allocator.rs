//! Codepoint allocation.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, warn};

use crate::legacy::LegacyCodepointMap;

/// Where an icon's codepoint came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    /// Pinned by the legacy table.
    Legacy(u32),
    /// Reused from the previous manifest.
    Reused(u32),
    /// Taken from the counter.
    New(u32),
}

impl Assignment {
    pub fn codepoint(self) -> u32 {
        match self {
            Self::Legacy(cp) | Self::Reused(cp) | Self::New(cp) => cp,
        }
    }
}

/// Hands out one codepoint per icon name.
///
/// Lookups consume their entry: a second request for the same name falls
/// through to the counter. The counter only moves forward and skips every
/// codepoint held by a previous-manifest entry.
#[derive(Debug)]
pub struct CodepointAllocator<'a> {
    legacy: &'a LegacyCodepointMap,
    previous: Option<&'a IndexMap<String, u32>>,
    held: HashSet<u32>,
    consumed: HashSet<String>,
    next: u32,
}

impl<'a> CodepointAllocator<'a> {
    pub fn new(legacy: &'a LegacyCodepointMap, first_codepoint: u32) -> Self {
        if let Some(highest) = legacy.highest()
            && highest >= first_codepoint
        {
            warn!(
                "legacy table pins U+{highest:04X}, at or above the first counter codepoint \
                 U+{first_codepoint:04X}"
            );
        }
        Self {
            legacy,
            previous: None,
            held: HashSet::new(),
            consumed: HashSet::new(),
            next: first_codepoint,
        }
    }

    /// Consult `previous` after the legacy table and keep the counter off its codepoints.
    pub fn with_previous(mut self, previous: &'a IndexMap<String, u32>) -> Self {
        self.held = previous.values().copied().collect();
        self.previous = Some(previous);
        self
    }

    /// Assign a codepoint to `name`.
    pub fn allocate(&mut self, name: &str) -> Assignment {
        let assignment = if self.consumed.contains(name) {
            None
        } else if let Some(cp) = self.legacy.get(name) {
            Some(Assignment::Legacy(cp))
        } else {
            self.previous.and_then(|previous| previous.get(name)).map(|cp| Assignment::Reused(*cp))
        };

        let assignment = match assignment {
            Some(assignment) => {
                self.consumed.insert(name.to_string());
                assignment
            }
            None => Assignment::New(self.next_from_counter()),
        };
        debug!("{name} -> U+{:04X} ({assignment:?})", assignment.codepoint());
        assignment
    }

    /// Codepoint the counter will hand out next.
    pub fn peek_next(&self) -> u32 {
        let mut next = self.next;
        while self.held.contains(&next) {
            next += 1;
        }
        next
    }

    fn next_from_counter(&mut self) -> u32 {
        let cp = self.peek_next();
        self.next = cp + 1;
        cp
    }

    /// Legacy names never requested, in table order.
    pub fn unconsumed(&self) -> Vec<&'a str> {
        let legacy: &'a LegacyCodepointMap = self.legacy;
        legacy.names().filter(|name| !self.consumed.contains(*name)).collect()
    }
}
