//! Named cookie slots and how session data is spread across them.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

// ============================================================================
// SlotName
// ============================================================================

/// Cookie name of one slot: `{prefix}{index}`. Ordered by index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotName {
    prefix: String,
    index: usize,
}

impl SlotName {
    pub fn new(prefix: &str, index: usize) -> Self {
        Self {
            prefix: prefix.to_string(),
            index,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.index)
    }
}

impl PartialOrd for SlotName {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SlotName {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index
            .cmp(&other.index)
            .then_with(|| self.prefix.cmp(&other.prefix))
    }
}

// ============================================================================
// SlotSource — host-provided request cookies
// ============================================================================

/// Read access to the cookies sent with the current request.
///
/// Hosts implement this over whatever request type they have; the codec only
/// needs lookup by cookie name.
pub trait SlotSource {
    fn slot(&self, name: &str) -> Option<&str>;
}

impl SlotSource for HashMap<String, String> {
    fn slot(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl SlotSource for BTreeMap<String, String> {
    fn slot(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<S: SlotSource + ?Sized> SlotSource for &S {
    fn slot(&self, name: &str) -> Option<&str> {
        (**self).slot(name)
    }
}

/// Collect slots `prefix0, prefix1, ...` up to `max_slots`, stopping at the
/// first missing index.
pub fn contiguous_slots<'a, S: SlotSource + ?Sized>(
    source: &'a S,
    prefix: &str,
    max_slots: usize,
) -> Vec<(SlotName, &'a str)> {
    let mut found = Vec::new();
    for index in 0..max_slots {
        let name = SlotName::new(prefix, index);
        match source.slot(&name.to_string()) {
            Some(value) => found.push((name, value)),
            None => break,
        }
    }
    found
}

/// Split an ASCII transport string into chunks of at most `width` characters.
pub fn split_chunks(transport: &str, width: usize) -> Vec<&str> {
    let width = width.max(1);
    let mut chunks = Vec::with_capacity(transport.len().div_ceil(width));
    let mut rest = transport;
    while !rest.is_empty() {
        let mut cut = rest.len().min(width);
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        if cut == 0 {
            // width narrower than one char
            cut = rest.chars().next().map_or(rest.len(), char::len_utf8);
        }
        let (chunk, tail) = rest.split_at(cut);
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookies(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn slot_name_format() {
        assert_eq!(SlotName::new("s_", 0).to_string(), "s_0");
        assert_eq!(SlotName::new("session_store_", 12).to_string(), "session_store_12");
    }

    #[test]
    fn slot_names_order_by_index() {
        let mut names = vec![
            SlotName::new("s_", 10),
            SlotName::new("s_", 2),
            SlotName::new("s_", 0),
        ];
        names.sort();
        let indexes: Vec<usize> = names.iter().map(SlotName::index).collect();
        assert_eq!(indexes, vec![0, 2, 10]);
    }

    #[test]
    fn collects_in_index_order() {
        let source = cookies(&[("s_1", "B"), ("s_0", "A"), ("s_2", "C")]);
        let found = contiguous_slots(&source, "s_", 3);
        let values: Vec<&str> = found.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec!["A", "B", "C"]);
    }

    #[test]
    fn stops_at_first_gap() {
        let source = cookies(&[("s_0", "X"), ("s_2", "Y")]);
        let found = contiguous_slots(&source, "s_", 3);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].1, "X");
    }

    #[test]
    fn respects_max_slots() {
        let source = cookies(&[("s_0", "A"), ("s_1", "B")]);
        assert_eq!(contiguous_slots(&source, "s_", 1).len(), 1);
    }

    #[test]
    fn ignores_other_prefixes() {
        let source = cookies(&[("other_0", "A")]);
        assert!(contiguous_slots(&source, "s_", 4).is_empty());
    }

    #[test]
    fn split_exact_and_remainder() {
        assert_eq!(split_chunks("abcdef", 3), vec!["abc", "def"]);
        assert_eq!(split_chunks("abcdefg", 3), vec!["abc", "def", "g"]);
        assert_eq!(split_chunks("ab", 3), vec!["ab"]);
        assert!(split_chunks("", 3).is_empty());
    }

    #[test]
    fn split_never_breaks_a_char() {
        let chunks = split_chunks("aé", 2);
        assert_eq!(chunks, vec!["a", "é"]);
    }
}
