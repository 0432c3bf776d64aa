//! Symbol registry shared by the unit formats
//!
//! Maps units to display labels and spellings back to units. The two
//! directions deliberately follow different rules: display labels are
//! replaced on relabel, parse bindings are write-once so the first unit
//! to claim a spelling keeps it.

use std::collections::HashMap;
use std::sync::LazyLock;

use metra::{BinaryPrefix, MetricPrefix, Unit};

use crate::error::FormatError;

#[derive(Debug, Clone, Copy)]
enum AnyPrefix {
    Metric(MetricPrefix),
    Binary(BinaryPrefix),
}

/// Prefix spellings tried when peeling a symbol, longest first so that
/// "da" wins over "d" and the binary prefixes never shadow anything
static PREFIX_SPELLINGS: LazyLock<Vec<(&'static str, AnyPrefix)>> = LazyLock::new(|| {
    let mut out: Vec<(&'static str, AnyPrefix)> = Vec::new();
    for prefix in MetricPrefix::ALL {
        out.push((prefix.symbol(), AnyPrefix::Metric(prefix)));
        for alias in prefix.aliases() {
            out.push((alias, AnyPrefix::Metric(prefix)));
        }
    }
    for prefix in BinaryPrefix::ALL {
        out.push((prefix.symbol(), AnyPrefix::Binary(prefix)));
    }
    out.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    out
});

/// Two-way registry between units and their textual spellings
#[derive(Debug, Clone, Default)]
pub struct SymbolMap {
    labels: Vec<(Unit, String)>,
    units: HashMap<String, Unit>,
}

impl SymbolMap {
    pub fn new() -> SymbolMap {
        SymbolMap::default()
    }

    /// Sets the display label of a unit and binds its spelling
    ///
    /// The display label is keyed on structural identity and replaced
    /// on relabel. The parse binding is write-once; older spellings of
    /// a relabeled unit continue to parse.
    pub fn label(&mut self, unit: &Unit, label: &str) {
        match self
            .labels
            .iter_mut()
            .find(|(existing, _)| existing.same_structure(unit))
        {
            Some((_, text)) => *text = label.to_string(),
            None => self.labels.push((unit.clone(), label.to_string())),
        }
        self.units
            .entry(label.to_string())
            .or_insert_with(|| unit.clone());
    }

    /// Binds an extra spelling for parsing without touching the label
    pub fn alias(&mut self, unit: &Unit, alias: &str) {
        self.units
            .entry(alias.to_string())
            .or_insert_with(|| unit.clone());
    }

    /// The display label of a unit, if one was set
    pub fn label_of(&self, unit: &Unit) -> Option<&str> {
        self.labels
            .iter()
            .find(|(existing, _)| existing.same_structure(unit))
            .map(|(_, text)| text.as_str())
    }

    /// The unit bound to an exact spelling
    pub fn unit_for(&self, text: &str) -> Option<&Unit> {
        self.units.get(text)
    }

    /// Resolves a symbol to a unit
    ///
    /// Exact spellings win, then prefix spellings peel off recursively,
    /// so "meV" is milli on eV and "KiMm" stacks kibi on mega on metre.
    /// A bound spelling like "cd" is never split into prefix and rest.
    pub fn resolve(&self, text: &str) -> Result<Unit, FormatError> {
        if let Some(unit) = self.unit_for(text) {
            return Ok(unit.clone());
        }
        for (spelling, prefix) in PREFIX_SPELLINGS.iter() {
            if let Some(rest) = text.strip_prefix(spelling) {
                if rest.is_empty() {
                    continue;
                }
                if let Ok(unit) = self.resolve(rest) {
                    return Ok(match prefix {
                        AnyPrefix::Metric(p) => unit.prefix(*p),
                        AnyPrefix::Binary(p) => unit.prefix_binary(*p),
                    });
                }
            }
        }
        Err(FormatError::UnknownUnit(text.to_string()))
    }
}
