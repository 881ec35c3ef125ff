//! Element tags: the ascending letter sequence `A, B, …, Z, AA, AB, …`.
//!
//! Every placed element carries a tag that is unique among the elements
//! currently on the plan. Freed tags are reused: the next tag handed out is
//! always the first unused one in sequence order.

#[cfg(test)]
#[path = "tags_test.rs"]
mod tags_test;

use std::collections::BTreeSet;

use crate::consts::MAX_TAG_LEN;
use crate::doc::Element;

/// First tag of the sequence.
pub const FIRST_TAG: &str = "A";

/// Return the tag following `tag` in bijective base-26 order
/// (`Z → AA`, `AZ → BA`, `ZZ → AAA`).
///
/// Carries propagate through every letter, so `AZ` steps to `BA`. This
/// intentionally departs from a suffix rule that only rewrites a trailing `Z`
/// and would jump from `AZ` to `AAA`. Within the bound the order has no
/// duplicates and no gaps.
///
/// Returns `None` when `tag` is not an uppercase ASCII letter sequence or the
/// successor would exceed [`MAX_TAG_LEN`] letters.
#[must_use]
pub fn next_in_sequence(tag: &str) -> Option<String> {
    if tag.is_empty() || !tag.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }

    let mut letters: Vec<u8> = tag.bytes().collect();
    let mut i = letters.len();
    loop {
        if i == 0 {
            // Every letter rolled over from Z to A: grow by one.
            if letters.len() >= MAX_TAG_LEN {
                return None;
            }
            letters.insert(0, b'A');
            break;
        }
        i -= 1;
        if letters[i] == b'Z' {
            letters[i] = b'A';
        } else {
            letters[i] += 1;
            break;
        }
    }

    Some(letters.into_iter().map(char::from).collect())
}

/// The set of tags held by currently placed elements.
#[derive(Debug, Clone, Default)]
pub struct TagPool {
    used: BTreeSet<String>,
}

impl TagPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pool contents with the tags of `elements`.
    pub fn rebuild(&mut self, elements: &[Element]) {
        self.used = elements.iter().map(|e| e.tag.clone()).collect();
    }

    #[must_use]
    pub fn is_used(&self, tag: &str) -> bool {
        self.used.contains(tag)
    }

    /// First tag in sequence order that no placed element holds.
    ///
    /// Falls back to the last tag tried if the bounded sequence is exhausted,
    /// which only happens with more than 26^6 elements on one plan.
    #[must_use]
    pub fn next_free(&self) -> String {
        let mut candidate = FIRST_TAG.to_owned();
        while self.used.contains(&candidate) {
            match next_in_sequence(&candidate) {
                Some(next) => candidate = next,
                None => break,
            }
        }
        candidate
    }
}
