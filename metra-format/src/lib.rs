//! Metra Format - Unit Symbols, Formats and Locale Labels
//!
//! Turns units into text and text back into units.
//!
//! Building blocks:
//! - [`SymbolMap`]: label and alias registry with prefix recognition
//! - [`SimpleUnitFormat`]: compact rendering with middle dots and
//!   superscripts, parsing of single symbols
//! - [`EbnfUnitFormat`]: algebraic expressions such as `kg·m/s^2` or
//!   `K+273.15`, with a full format and parse round trip
//! - [`LabelBundle`] and [`BundleCatalog`]: per locale label tables
//!   with fallback chains
//!
//! The formats carry no unit catalog of their own. A system crate
//! registers its units and labels into a [`SymbolMap`] and builds the
//! formats from it.

mod ebnf;
mod error;
mod l10n;
mod simple;
mod symbols;

pub use ebnf::EbnfUnitFormat;
pub use error::FormatError;
pub use l10n::{BundleCatalog, LabelBundle};
pub use simple::SimpleUnitFormat;
pub use symbols::SymbolMap;
