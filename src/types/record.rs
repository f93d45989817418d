//! Export records: a combination plus its file, display name and description.

use super::{Combination, TraitDef};

/// Leading metadata columns, before the trait columns.
pub const BASE_COLUMNS: [&str; 3] = ["file", "name", "description"];

/// One row of the output collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRecord {
    /// 1-based position in the collection.
    pub index: usize,
    pub file: String,
    pub name: String,
    pub description: String,
    pub traits: Combination,
}

impl ExportRecord {
    /// Field values in column order: file, name, description, then traits.
    pub fn values(&self) -> Vec<&str> {
        let mut values = Vec::with_capacity(BASE_COLUMNS.len() + self.traits.len());
        values.push(self.file.as_str());
        values.push(self.name.as_str());
        values.push(self.description.as_str());
        values.extend(self.traits.iter().map(|(_, v)| v));
        values
    }

    /// `(column, value)` pairs in column order.
    pub fn fields(&self) -> Vec<(&str, &str)> {
        let mut names: Vec<&str> = BASE_COLUMNS.to_vec();
        names.extend(self.traits.iter().map(|(t, _)| t));
        names.into_iter().zip(self.values()).collect()
    }
}

/// Column names for a collection built from `traits`.
pub fn columns(traits: &[TraitDef]) -> Vec<&str> {
    let mut names: Vec<&str> = BASE_COLUMNS.to_vec();
    names.extend(traits.iter().map(|t| t.name.as_str()));
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record() -> ExportRecord {
        ExportRecord {
            index: 7,
            file: "7.png".to_string(),
            name: "Duck Friends #7".to_string(),
            description: "Ducks".to_string(),
            traits: [("Background", "Red"), ("Hat", "Crown")].into_iter().collect(),
        }
    }

    #[test]
    fn test_values_order() {
        assert_eq!(
            record().values(),
            vec!["7.png", "Duck Friends #7", "Ducks", "Red", "Crown"]
        );
    }

    #[test]
    fn test_fields_pair_columns_with_values() {
        let r = record();
        let fields = r.fields();
        assert_eq!(fields[0], ("file", "7.png"));
        assert_eq!(fields[3], ("Background", "Red"));
        assert_eq!(fields[4], ("Hat", "Crown"));
    }

    #[test]
    fn test_columns() {
        let traits = vec![
            TraitDef::uniform("Background", vec!["A", "B"]),
            TraitDef::uniform("Shape", vec!["X", "Y"]),
        ];
        assert_eq!(
            columns(&traits),
            vec!["file", "name", "description", "Background", "Shape"]
        );
    }
}
