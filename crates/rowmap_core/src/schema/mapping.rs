//! Bidirectional attribute <-> column map.

/// Immutable, ordered map from struct attributes to column names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldColumnMap {
    entries: Vec<(&'static str, &'static str)>,
}

impl FieldColumnMap {
    pub(crate) fn from_entries(entries: Vec<(&'static str, &'static str)>) -> Self {
        Self { entries }
    }

    pub fn column_for(&self, attribute: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == attribute)
            .map(|(_, column)| *column)
    }

    pub fn attribute_for(&self, column: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(_, candidate)| *candidate == column)
            .map(|(attribute, _)| *attribute)
    }

    /// Iterates `(attribute, column)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
