//! Row dictionaries: one data row's field values

/// Value of one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A plain cell value
    Scalar(String),
    /// A key-value group, in column order
    Pairs(Vec<(String, String)>),
}

impl FieldValue {
    /// Scalar content, if this is a scalar
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(s) => Some(s),
            FieldValue::Pairs(_) => None,
        }
    }

    /// Pair list, if this is a key-value group
    pub fn as_pairs(&self) -> Option<&[(String, String)]> {
        match self {
            FieldValue::Pairs(p) => Some(p),
            FieldValue::Scalar(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Scalar(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<Vec<(String, String)>> for FieldValue {
    fn from(value: Vec<(String, String)>) -> Self {
        FieldValue::Pairs(value)
    }
}

/// Insertion-ordered mapping from field name to value
///
/// Replacing an existing field keeps its original position, so globals
/// overwritten by a row column still come first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowDictionary {
    fields: Vec<(String, FieldValue)>,
}

impl RowDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
        self.fields
            .iter_mut()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Scalar value of a field, `None` if absent or a group
    pub fn scalar(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_scalar)
    }

    /// Pairs of a key-value group, `None` if absent or a scalar
    pub fn pairs(&self, name: &str) -> Option<&[(String, String)]> {
        self.get(name).and_then(FieldValue::as_pairs)
    }

    /// Set a field, returning the previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Option<FieldValue> {
        let name = name.into();
        let value = value.into();
        match self.get_mut(&name) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((name, value));
                None
            }
        }
    }

    /// Make `name` a key-value group, created empty when absent
    ///
    /// A scalar already stored under the name is replaced by an empty list.
    pub fn ensure_group(&mut self, name: &str) {
        match self.get_mut(name) {
            Some(FieldValue::Pairs(_)) => {}
            Some(slot) => *slot = FieldValue::Pairs(Vec::new()),
            None => self
                .fields
                .push((name.to_string(), FieldValue::Pairs(Vec::new()))),
        }
    }

    /// Append a pair to a group, creating the group first if needed
    pub fn push_pair(&mut self, group: &str, key: impl Into<String>, value: impl Into<String>) {
        self.ensure_group(group);
        if let Some(FieldValue::Pairs(pairs)) = self.get_mut(group) {
            pairs.push((key.into(), value.into()));
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        let index = self.fields.iter().position(|(key, _)| key == name)?;
        Some(self.fields.remove(index).1)
    }

    /// Fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for RowDictionary {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut row = RowDictionary::new();
        for (key, value) in iter {
            row.insert(key, value);
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_position() {
        let mut row = RowDictionary::new();
        row.insert("g", "G");
        row.insert("a", "1");
        assert_eq!(row.insert("g", "override"), Some(FieldValue::from("G")));

        let keys: Vec<_> = row.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["g", "a"]);
        assert_eq!(row.scalar("g"), Some("override"));
    }

    #[test]
    fn test_groups_created_and_replace_scalars() {
        let mut row = RowDictionary::new();
        row.push_pair("info", "name", "Bob");
        row.push_pair("info", "age", "30");
        assert_eq!(row.pairs("info").map(|p| p.len()), Some(2));
        assert_eq!(row.scalar("info"), None);

        row.insert("first", "1");
        row.insert("mark", "scalar");
        row.ensure_group("mark");
        assert_eq!(row.pairs("mark"), Some(&[][..]));

        row.push_pair("mark", "Z", "Z");
        let keys: Vec<_> = row.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["info", "first", "mark"]);
        assert_eq!(row.pairs("mark").map(|p| p.len()), Some(1));

        // An existing group is left alone
        row.ensure_group("info");
        assert_eq!(row.pairs("info").map(|p| p.len()), Some(2));
    }

    #[test]
    fn test_remove_and_collect() {
        let mut row: RowDictionary = vec![("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(row.len(), 2);
        assert_eq!(row.remove("a"), Some(FieldValue::from("1")));
        assert!(!row.contains("a"));
        assert_eq!(row.remove("missing"), None);
    }
}
