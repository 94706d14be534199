//! Company-column substring filtering

use crate::dataset::Dataset;

/// Case-insensitive substring test against one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPredicate {
    column: usize,
    needle: String,
}

impl FilterPredicate {
    /// `term` is trimmed and lowercased. Returns `None` for a blank term.
    pub fn new(column: usize, term: &str) -> Option<Self> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        Some(Self { column, needle })
    }

    pub fn needle(&self) -> &str {
        &self.needle
    }

    pub fn matches(&self, value: &str) -> bool {
        value.to_lowercase().contains(&self.needle)
    }

    /// Indices of every record whose column value matches, in dataset order
    pub fn filtered_view(&self, dataset: &Dataset) -> Vec<usize> {
        (0..dataset.len())
            .filter(|&idx| self.matches(dataset.value(idx, self.column)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        let rows = [
            ["Ann", "Acme"],
            ["Bo", "Zenith"],
            ["Cy", "ACME Labs"],
            ["Di", "acmeish"],
        ];
        Dataset::new(
            vec!["Name".into(), "Company".into()],
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_blank_term_rejected() {
        assert!(FilterPredicate::new(1, "").is_none());
        assert!(FilterPredicate::new(1, "   \t").is_none());
    }

    #[test]
    fn test_term_trimmed_and_lowercased() {
        let predicate = FilterPredicate::new(1, "  AcMe ").unwrap();
        assert_eq!(predicate.needle(), "acme");
        assert!(predicate.matches("Big ACME corp"));
        assert!(!predicate.matches("Zenith"));
    }

    #[test]
    fn test_filtered_view_partitions_dataset() {
        let data = dataset();
        let predicate = FilterPredicate::new(1, "acme").unwrap();
        let view = predicate.filtered_view(&data);
        assert_eq!(view, vec![0, 2, 3]);
        for idx in 0..data.len() {
            assert_eq!(
                view.contains(&idx),
                data.value(idx, 1).to_lowercase().contains("acme")
            );
        }
    }

    #[test]
    fn test_missing_column_value_never_matches() {
        let data = Dataset::new(
            vec!["Name".into(), "Company".into()],
            vec![vec!["Ann".into()]],
        )
        .unwrap();
        let predicate = FilterPredicate::new(1, "a").unwrap();
        assert!(predicate.filtered_view(&data).is_empty());
    }
}
