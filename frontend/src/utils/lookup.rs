use std::collections::HashMap;
use std::hash::Hash;

pub const UNKNOWN_LABEL: &str = "Unknown";

/// `id -> record` index over a fetched collection, used to decorate rows
/// that only carry a foreign id.
#[derive(Debug, Clone)]
pub struct LookupMap<K, V> {
    entries: HashMap<K, V>,
}

impl<K: Eq + Hash, V> Default for LookupMap<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, V: Clone> LookupMap<K, V> {
    pub fn build(records: &[V], key: impl Fn(&V) -> K) -> Self {
        Self {
            entries: records
                .iter()
                .map(|record| (key(record), record.clone()))
                .collect(),
        }
    }

    pub fn get(&self, id: &K) -> Option<&V> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display label of the referenced record, `Unknown` when missing.
    pub fn label(&self, id: &K, label: impl Fn(&V) -> String) -> String {
        self.entries
            .get(id)
            .map(label)
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
    }

    pub fn label_opt(&self, id: Option<&K>, label: impl Fn(&V) -> String) -> String {
        match id {
            Some(id) => self.label(id, label),
            None => "-".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Customer {
        id: u32,
        name: &'static str,
    }

    fn customers() -> LookupMap<u32, Customer> {
        LookupMap::build(
            &[
                Customer { id: 1, name: "Acme" },
                Customer { id: 2, name: "Globex" },
            ],
            |c| c.id,
        )
    }

    #[test]
    fn label_resolves_known_ids() {
        assert_eq!(customers().label(&2, |c| c.name.to_string()), "Globex");
        assert_eq!(customers().len(), 2);
    }

    #[test]
    fn unknown_id_renders_unknown() {
        assert_eq!(customers().label(&9, |c| c.name.to_string()), "Unknown");
        assert_eq!(customers().label_opt(None, |c| c.name.to_string()), "-");
    }

    #[test]
    fn empty_collection_builds_empty_map() {
        let map: LookupMap<u32, Customer> = LookupMap::build(&[], |c| c.id);
        assert!(map.is_empty());
        assert_eq!(map.label(&1, |c| c.name.to_string()), UNKNOWN_LABEL);
    }
}
