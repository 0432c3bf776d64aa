//! Symbol oriented unit format
//!
//! Formats units as compact symbols: labels where registered, prefix
//! symbols recognized from exact converters, products with middle dots
//! and superscript exponents. Parsing accepts a single symbol, either
//! a bound spelling or a prefixed one; product expressions belong to
//! the expression format.

use metra::{BinaryPrefix, MetricPrefix, Unit};

use crate::error::FormatError;
use crate::symbols::SymbolMap;

fn superscript(n: i32) -> String {
    const DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
    let mut out = String::new();
    if n < 0 {
        out.push('⁻');
    }
    for b in n.unsigned_abs().to_string().bytes() {
        out.push(DIGITS[(b - b'0') as usize]);
    }
    out
}

/// Formats and parses units as plain symbols
#[derive(Debug, Clone, Default)]
pub struct SimpleUnitFormat {
    symbols: SymbolMap,
}

impl SimpleUnitFormat {
    pub fn new() -> SimpleUnitFormat {
        SimpleUnitFormat::default()
    }

    pub fn with_symbols(symbols: SymbolMap) -> SimpleUnitFormat {
        SimpleUnitFormat { symbols }
    }

    /// Sets the display label of a unit and binds its spelling
    pub fn label(&mut self, unit: &Unit, label: &str) {
        self.symbols.label(unit, label);
    }

    /// Binds an extra spelling for parsing
    pub fn alias(&mut self, unit: &Unit, alias: &str) {
        self.symbols.alias(unit, alias);
    }

    pub fn symbols(&self) -> &SymbolMap {
        &self.symbols
    }

    /// Renders a unit as a symbol string
    pub fn format(&self, unit: &Unit) -> String {
        if let Some(label) = self.symbols.label_of(unit) {
            return label.to_string();
        }
        match unit {
            Unit::Base { symbol, .. } | Unit::Alternate { symbol, .. } => symbol.clone(),
            Unit::Transformed { parent, converter } => {
                if let Some(prefix) = MetricPrefix::for_converter(converter) {
                    format!("{}{}", prefix.symbol(), self.format(parent))
                } else if let Some(prefix) = BinaryPrefix::for_converter(converter) {
                    format!("{}{}", prefix.symbol(), self.format(parent))
                } else {
                    format!("{}{}", self.format(parent), converter.suffix())
                }
            }
            Unit::Product { factors } => {
                let mut numerator: Vec<String> = Vec::new();
                let mut denominator: Vec<String> = Vec::new();
                for (factor, exponent) in factors {
                    let rendered = self.format(factor);
                    if *exponent > 0 {
                        if *exponent == 1 {
                            numerator.push(rendered);
                        } else {
                            numerator.push(format!("{}{}", rendered, superscript(*exponent)));
                        }
                    } else if *exponent == -1 {
                        denominator.push(rendered);
                    } else {
                        denominator.push(format!("{}{}", rendered, superscript(-exponent)));
                    }
                }
                let mut out = if numerator.is_empty() {
                    "1".to_string()
                } else {
                    numerator.join("·")
                };
                for part in denominator {
                    out.push('/');
                    out.push_str(&part);
                }
                out
            }
        }
    }

    /// Parses a single unit symbol, bound or prefixed
    pub fn parse(&self, text: &str) -> Result<Unit, FormatError> {
        self.symbols.resolve(text.trim())
    }
}
