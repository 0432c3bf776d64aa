//! Locale label bundles
//!
//! A [`LabelBundle`] maps text keys to unit labels for one locale and
//! chains to a parent bundle for keys it does not override. The
//! [`BundleCatalog`] owns the raw entry tables and hands out shared
//! bundles, building each one once.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::FormatError;

/// Key to label table for one locale, with fallback to a parent
#[derive(Debug, Clone)]
pub struct LabelBundle {
    name: String,
    entries: Vec<(String, String)>,
    parent: Option<Arc<LabelBundle>>,
}

impl LabelBundle {
    pub fn new(
        name: &str,
        mut entries: Vec<(String, String)>,
        parent: Option<Arc<LabelBundle>>,
    ) -> LabelBundle {
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        entries.dedup_by(|a, b| a.0 == b.0);
        LabelBundle {
            name: name.to_string(),
            entries,
            parent,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        match self
            .entries
            .binary_search_by(|(k, _)| k.as_str().cmp(key))
        {
            Ok(index) => Some(&self.entries[index].1),
            Err(_) => self.parent.as_deref().and_then(|parent| parent.lookup(key)),
        }
    }

    /// Looks a key up here, then through the parent chain
    pub fn get(&self, key: &str) -> Result<&str, FormatError> {
        self.lookup(key).ok_or_else(|| FormatError::MissingKey {
            bundle: self.name.clone(),
            key: key.to_string(),
        })
    }

    /// All keys answered by this bundle, own and inherited
    pub fn key_set(&self) -> BTreeSet<String> {
        let mut keys = match &self.parent {
            Some(parent) => parent.key_set(),
            None => BTreeSet::new(),
        };
        keys.extend(self.entries.iter().map(|(key, _)| key.clone()));
        keys
    }

    /// True when the key is answered here or anywhere up the chain
    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Number of own entries, overrides included, inherited keys not
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
struct Family {
    default: Vec<(String, String)>,
    locales: HashMap<String, Vec<(String, String)>>,
}

fn own(entries: &[(&str, &str)]) -> Vec<(String, String)> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Registry of bundle families and their locale variants
#[derive(Debug, Default)]
pub struct BundleCatalog {
    families: HashMap<String, Family>,
    cache: Mutex<HashMap<(String, String), Arc<LabelBundle>>>,
}

impl BundleCatalog {
    pub fn new() -> BundleCatalog {
        BundleCatalog::default()
    }

    /// Registers a family with its default entries
    pub fn add_family(&mut self, name: &str, entries: &[(&str, &str)]) {
        self.families.insert(
            name.to_string(),
            Family {
                default: own(entries),
                locales: HashMap::new(),
            },
        );
        self.clear_cache();
    }

    /// Registers locale overrides for an existing family
    pub fn add_locale(
        &mut self,
        family: &str,
        locale: &str,
        entries: &[(&str, &str)],
    ) -> Result<(), FormatError> {
        let family_data = self
            .families
            .get_mut(family)
            .ok_or_else(|| FormatError::UnknownBundle(family.to_string()))?;
        family_data.locales.insert(locale.to_string(), own(entries));
        self.clear_cache();
        Ok(())
    }

    fn clear_cache(&mut self) {
        self.cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    /// Resolves a family and locale to a shared bundle
    ///
    /// An unknown locale falls back to the family default. Resolving
    /// the same pair again returns the same allocation.
    pub fn resolve(&self, family: &str, locale: &str) -> Result<Arc<LabelBundle>, FormatError> {
        let family_data = self
            .families
            .get(family)
            .ok_or_else(|| FormatError::UnknownBundle(family.to_string()))?;
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());

        let root_key = (family.to_string(), String::new());
        let root = if let Some(bundle) = cache.get(&root_key) {
            Arc::clone(bundle)
        } else {
            let bundle = Arc::new(LabelBundle::new(family, family_data.default.clone(), None));
            debug!(bundle = family, "built label bundle");
            cache.insert(root_key, Arc::clone(&bundle));
            bundle
        };

        let Some(entries) = family_data.locales.get(locale) else {
            return Ok(root);
        };
        let key = (family.to_string(), locale.to_string());
        if let Some(bundle) = cache.get(&key) {
            return Ok(Arc::clone(bundle));
        }
        let name = format!("{family}_{locale}");
        let bundle = Arc::new(LabelBundle::new(&name, entries.clone(), Some(root)));
        debug!(bundle = %name, "built label bundle");
        cache.insert(key, Arc::clone(&bundle));
        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> BundleCatalog {
        let mut catalog = BundleCatalog::new();
        catalog.add_family("units", &[("metre", "m"), ("second", "s"), ("hour", "h")]);
        catalog
            .add_locale("units", "de", &[("second", "Sek"), ("hour", "Std")])
            .unwrap();
        catalog
    }

    #[test]
    fn default_bundle_reads_its_entries() {
        let catalog = catalog();
        let bundle = catalog.resolve("units", "").unwrap();
        assert_eq!(bundle.name(), "units");
        assert_eq!(bundle.get("metre").unwrap(), "m");
        assert_eq!(bundle.get("second").unwrap(), "s");
    }

    #[test]
    fn missing_keys_name_the_asked_bundle() {
        let catalog = catalog();
        let bundle = catalog.resolve("units", "de").unwrap();
        match bundle.get("furlong") {
            Err(FormatError::MissingKey { bundle, key }) => {
                assert_eq!(bundle, "units_de");
                assert_eq!(key, "furlong");
            }
            other => panic!("expected missing key, got {other:?}"),
        }
    }

    #[test]
    fn locale_overrides_and_falls_through() {
        let catalog = catalog();
        let bundle = catalog.resolve("units", "de").unwrap();
        assert_eq!(bundle.name(), "units_de");
        assert_eq!(bundle.get("second").unwrap(), "Sek");
        assert_eq!(bundle.get("metre").unwrap(), "m");
    }

    #[test]
    fn key_set_unions_own_and_inherited() {
        let catalog = catalog();
        let bundle = catalog.resolve("units", "de").unwrap();
        let keys: Vec<String> = bundle.key_set().into_iter().collect();
        assert_eq!(keys, ["hour", "metre", "second"]);
        assert_eq!(bundle.len(), 2);
        assert!(bundle.contains("metre"));
        assert!(!bundle.contains("furlong"));
    }

    #[test]
    fn unknown_locale_falls_back_to_the_default() {
        let catalog = catalog();
        let fallback = catalog.resolve("units", "xx").unwrap();
        let root = catalog.resolve("units", "").unwrap();
        assert!(Arc::ptr_eq(&fallback, &root));
    }

    #[test]
    fn repeated_resolution_shares_the_bundle() {
        let catalog = catalog();
        let first = catalog.resolve("units", "de").unwrap();
        let second = catalog.resolve("units", "de").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn unknown_family_is_an_error() {
        let catalog = catalog();
        assert!(matches!(
            catalog.resolve("currencies", ""),
            Err(FormatError::UnknownBundle(_))
        ));
    }
}
