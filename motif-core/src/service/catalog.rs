//! Rule catalog enumeration for external formatters.

use serde::Serialize;

use crate::java::JavaPattern;
use crate::vue::VuePattern;

/// One catalog row: a pattern rule a validator can report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub summary: &'static str,
}

/// Every Java pattern rule, in catalog scan order.
pub fn java_patterns() -> Vec<CatalogEntry> {
    JavaPattern::ALL
        .iter()
        .map(|pattern| CatalogEntry {
            id: pattern.id(),
            name: pattern.display_name(),
            category: pattern.category().as_str(),
            summary: pattern.summary(),
        })
        .collect()
}

/// Every Vue pattern detection, in catalog scan order.
pub fn vue_patterns() -> Vec<CatalogEntry> {
    VuePattern::ALL
        .iter()
        .map(|pattern| CatalogEntry {
            id: pattern.id(),
            name: pattern.display_name(),
            category: pattern.category().as_str(),
            summary: pattern.summary(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn java_catalog_covers_every_pattern_with_unique_ids() {
        let entries = java_patterns();
        assert_eq!(entries.len(), JavaPattern::ALL.len());

        let mut ids: Vec<&str> = entries.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), entries.len());
    }

    #[test]
    fn vue_catalog_rows_carry_their_category() {
        let entries = vue_patterns();
        assert_eq!(entries.len(), VuePattern::ALL.len());

        let composable = entries
            .iter()
            .find(|e| e.id == "composable-function")
            .unwrap();
        assert_eq!(composable.category, "composables");
        assert!(!composable.summary.is_empty());
    }
}
