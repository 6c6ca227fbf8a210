use std::collections::HashMap;

use thiserror::Error;

/// Listbox suggestions are capped to keep the widget responsive.
const SUGGESTION_CAP: usize = 200;

/// Error returned when a selected municipality is not present in the table.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("municipality '{0}' not found")]
pub struct LookupError(pub String);

/// Municipality display name → tax multiplier (Steuerfuss, integer percent).
///
/// Built once per load and replaced wholesale on reload. A secondary
/// lowercased index supports case-insensitive lookup; it is maintained at
/// insertion time, so every index entry always points at a present name.
/// When two names collide after lowercasing, the later insert wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MunicipalityTable {
    rates: HashMap<String, i32>,
    index: HashMap<String, String>,
}

impl MunicipalityTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, i32)>) -> Self {
        let mut table = Self::new();
        for (name, steuerfuss) in entries {
            table.insert(name, steuerfuss);
        }
        table
    }

    /// Inserts a municipality, updating both the table and the index.
    pub fn insert(&mut self, name: String, steuerfuss: i32) {
        self.index.insert(name.to_lowercase(), name.clone());
        self.rates.insert(name, steuerfuss);
    }

    /// Resolves a user-supplied selection via the case-insensitive index.
    ///
    /// The query is trimmed and lowercased before lookup. On success the
    /// canonical display name and its Steuerfuss are returned.
    pub fn resolve(&self, query: &str) -> Result<(&str, i32), LookupError> {
        let key = query.trim().to_lowercase();
        let canonical = self
            .index
            .get(&key)
            .ok_or_else(|| LookupError(query.trim().to_string()))?;
        let steuerfuss = self.rates[canonical.as_str()];
        Ok((canonical, steuerfuss))
    }

    /// Exact-name access, mainly for display code that already resolved.
    pub fn get(&self, name: &str) -> Option<i32> {
        self.rates.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// All names, sorted case-insensitively for the listbox.
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rates.keys().map(String::as_str).collect();
        names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));
        names
    }

    /// Case-insensitive substring suggestions for a partially typed name.
    ///
    /// An empty query returns the full sorted list; filtered results are
    /// capped at [`SUGGESTION_CAP`] entries.
    pub fn suggestions(&self, query: &str) -> Vec<&str> {
        let needle = query.trim().to_lowercase();
        let mut names = self.sorted_names();
        if needle.is_empty() {
            return names;
        }
        names.retain(|name| name.to_lowercase().contains(&needle));
        names.truncate(SUGGESTION_CAP);
        names
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_table() -> MunicipalityTable {
        MunicipalityTable::from_entries([
            ("Aeschi".to_string(), 110),
            ("Olten".to_string(), 108),
            ("Solothurn".to_string(), 112),
        ])
    }

    #[test]
    fn resolve_is_case_insensitive_and_trims() {
        let table = sample_table();

        assert_eq!(table.resolve("aeschi"), Ok(("Aeschi", 110)));
        assert_eq!(table.resolve("AESCHI"), Ok(("Aeschi", 110)));
        assert_eq!(table.resolve("  Aeschi  "), Ok(("Aeschi", 110)));
    }

    #[test]
    fn resolve_unknown_name_fails() {
        let table = sample_table();

        assert_eq!(
            table.resolve("Bettlach"),
            Err(LookupError("Bettlach".to_string()))
        );
    }

    #[test]
    fn later_insert_wins_on_case_collision() {
        let table = MunicipalityTable::from_entries([
            ("Aeschi".to_string(), 110),
            ("AESCHI".to_string(), 115),
        ]);

        // Both casings are kept as display names, but the index points at
        // the last-inserted one.
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve("aeschi"), Ok(("AESCHI", 115)));
    }

    #[test]
    fn reinserting_same_name_overwrites_rate() {
        let mut table = sample_table();
        table.insert("Aeschi".to_string(), 99);

        assert_eq!(table.len(), 3);
        assert_eq!(table.resolve("aeschi"), Ok(("Aeschi", 99)));
    }

    #[test]
    fn index_entries_always_resolve() {
        let table = sample_table();

        for name in table.sorted_names() {
            let (canonical, _) = table.resolve(name).expect("index must stay in sync");
            assert!(table.get(canonical).is_some());
        }
    }

    #[test]
    fn sorted_names_ignore_case() {
        let table = MunicipalityTable::from_entries([
            ("bettlach".to_string(), 100),
            ("Aeschi".to_string(), 110),
            ("Zuchwil".to_string(), 105),
        ]);

        assert_eq!(table.sorted_names(), vec!["Aeschi", "bettlach", "Zuchwil"]);
    }

    #[test]
    fn suggestions_filter_by_substring() {
        let table = sample_table();

        assert_eq!(table.suggestions("olt"), vec!["Olten"]);
        assert_eq!(table.suggestions("o"), vec!["Olten", "Solothurn"]);
        assert_eq!(table.suggestions(""), vec!["Aeschi", "Olten", "Solothurn"]);
    }

    #[test]
    fn suggestions_are_capped() {
        let table = MunicipalityTable::from_entries(
            (0..250).map(|i| (format!("Dorf{i:03}"), 100)),
        );

        assert_eq!(table.suggestions("dorf").len(), 200);
        // The unfiltered listing is not capped.
        assert_eq!(table.suggestions("").len(), 250);
    }
}
