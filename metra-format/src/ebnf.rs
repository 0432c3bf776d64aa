//! Expression based unit format
//!
//! Grammar:
//!
//! ```text
//! expression := product ( ('+' | '-') number )?
//! product    := term ( ('*' | '·') term | '/' term )*
//! term       := factor ( '^' integer )?
//! factor     := '(' expression ')' | number | 'π' | symbol
//! ```
//!
//! Division is left associative, so `kg/h/l` divides by the hour and by
//! the litre. Integer literals scale exactly; literals carrying a
//! decimal point or exponent marker scale by float. Formatting emits
//! float factors in shortest round-trip form, which always includes a
//! marker, so the two literal shapes never collide.

use metra::{BinaryPrefix, MetricPrefix, Unit, UnitConverter};
use metra_core::Number;
use tracing::trace;

use crate::error::FormatError;
use crate::symbols::SymbolMap;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    LParen,
    RParen,
    Times,
    Divide,
    Plus,
    Minus,
    Caret,
    Number(String),
    Pi,
    Symbol(String),
}

fn describe(token: &Token) -> String {
    match token {
        Token::LParen => "(".to_string(),
        Token::RParen => ")".to_string(),
        Token::Times => "*".to_string(),
        Token::Divide => "/".to_string(),
        Token::Plus => "+".to_string(),
        Token::Minus => "-".to_string(),
        Token::Caret => "^".to_string(),
        Token::Pi => "π".to_string(),
        Token::Number(raw) | Token::Symbol(raw) => raw.clone(),
    }
}

fn is_symbol_char(c: char) -> bool {
    !c.is_whitespace()
        && !c.is_ascii_digit()
        && !matches!(c, '(' | ')' | '*' | '·' | '/' | '+' | '-' | '^' | 'π' | '.')
}

fn tokenize(text: &str) -> Vec<(Token, usize)> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let (pos, c) = chars[i];
        match c {
            _ if c.is_whitespace() => i += 1,
            '(' => {
                tokens.push((Token::LParen, pos));
                i += 1;
            }
            ')' => {
                tokens.push((Token::RParen, pos));
                i += 1;
            }
            '*' | '·' => {
                tokens.push((Token::Times, pos));
                i += 1;
            }
            '/' => {
                tokens.push((Token::Divide, pos));
                i += 1;
            }
            '+' => {
                tokens.push((Token::Plus, pos));
                i += 1;
            }
            '-' => {
                tokens.push((Token::Minus, pos));
                i += 1;
            }
            '^' => {
                tokens.push((Token::Caret, pos));
                i += 1;
            }
            'π' => {
                tokens.push((Token::Pi, pos));
                i += 1;
            }
            '0'..='9' | '.' => {
                let mut raw = String::new();
                while i < chars.len() && (chars[i].1.is_ascii_digit() || chars[i].1 == '.') {
                    raw.push(chars[i].1);
                    i += 1;
                }
                // An exponent marker counts only when digits follow, so
                // "2e3" is one literal while "2eV" stays two tokens
                if i < chars.len() && matches!(chars[i].1, 'e' | 'E') {
                    let mut j = i + 1;
                    if j < chars.len() && matches!(chars[j].1, '+' | '-') {
                        j += 1;
                    }
                    if j < chars.len() && chars[j].1.is_ascii_digit() {
                        raw.push(chars[i].1);
                        i += 1;
                        if matches!(chars[i].1, '+' | '-') {
                            raw.push(chars[i].1);
                            i += 1;
                        }
                        while i < chars.len() && chars[i].1.is_ascii_digit() {
                            raw.push(chars[i].1);
                            i += 1;
                        }
                    }
                }
                tokens.push((Token::Number(raw), pos));
            }
            _ => {
                let mut symbol = String::new();
                while i < chars.len() && is_symbol_char(chars[i].1) {
                    symbol.push(chars[i].1);
                    i += 1;
                }
                tokens.push((Token::Symbol(symbol), pos));
            }
        }
    }
    trace!(tokens = tokens.len(), "tokenized unit expression");
    tokens
}

enum Factor {
    Unit(Unit),
    Integer(i128),
    Float(f64),
    Pi,
}

enum Term {
    Unit(Unit),
    Scale(UnitConverter),
}

fn classify_number(raw: &str, position: usize) -> Result<Factor, FormatError> {
    let invalid = || FormatError::InvalidNumber {
        token: raw.to_string(),
        position,
    };
    if raw.contains(['.', 'e', 'E']) {
        let value: f64 = raw.parse().map_err(|_| invalid())?;
        if !value.is_finite() || value == 0.0 {
            return Err(invalid());
        }
        Ok(Factor::Float(value))
    } else {
        let value: i128 = raw.parse().map_err(|_| invalid())?;
        if value == 0 {
            return Err(invalid());
        }
        Ok(Factor::Integer(value))
    }
}

struct Parser<'a> {
    tokens: &'a [(Token, usize)],
    index: usize,
    symbols: &'a SymbolMap,
    end: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.index).map(|(token, _)| token)
    }

    fn position(&self) -> usize {
        self.tokens
            .get(self.index)
            .map(|(_, position)| *position)
            .unwrap_or(self.end)
    }

    fn parse_expression(&mut self) -> Result<Unit, FormatError> {
        let unit = self.parse_product()?;
        match self.peek() {
            Some(Token::Plus) => {
                self.index += 1;
                let amount = self.parse_offset_amount()?;
                Ok(unit.shift(amount))
            }
            Some(Token::Minus) => {
                self.index += 1;
                let amount = self.parse_offset_amount()?;
                Ok(unit.shift(amount.neg()))
            }
            _ => Ok(unit),
        }
    }

    fn parse_product(&mut self) -> Result<Unit, FormatError> {
        let mut acc = match self.parse_term()? {
            Term::Unit(unit) => unit,
            Term::Scale(converter) => Unit::one().transform(converter),
        };
        loop {
            let divide = match self.peek() {
                Some(Token::Times) => false,
                Some(Token::Divide) => true,
                _ => break,
            };
            self.index += 1;
            match self.parse_term()? {
                Term::Unit(unit) => {
                    acc = if divide {
                        acc.divide(&unit)
                    } else {
                        acc.multiply(&unit)
                    };
                }
                Term::Scale(converter) => {
                    let converter = if divide { converter.invert() } else { converter };
                    acc = acc.transform(converter);
                }
            }
        }
        Ok(acc)
    }

    fn parse_term(&mut self) -> Result<Term, FormatError> {
        let position = self.position();
        let factor = self.parse_factor()?;
        let exponent = if matches!(self.peek(), Some(Token::Caret)) {
            self.index += 1;
            self.parse_exponent()?
        } else {
            1
        };
        match factor {
            Factor::Unit(unit) => Ok(Term::Unit(unit.pow(exponent))),
            Factor::Integer(n) => {
                let power = n
                    .checked_pow(exponent.unsigned_abs())
                    .ok_or(FormatError::InvalidNumber {
                        token: format!("{n}^{exponent}"),
                        position,
                    })?;
                Ok(Term::Scale(if exponent < 0 {
                    UnitConverter::rational(1, power)
                } else {
                    UnitConverter::rational(power, 1)
                }))
            }
            Factor::Float(value) => {
                let power = value.powi(exponent);
                if !power.is_finite() || power == 0.0 {
                    return Err(FormatError::InvalidNumber {
                        token: format!("{value:?}^{exponent}"),
                        position,
                    });
                }
                Ok(Term::Scale(UnitConverter::multiply(power)))
            }
            Factor::Pi => Ok(Term::Scale(UnitConverter::pi_power(exponent))),
        }
    }

    fn parse_factor(&mut self) -> Result<Factor, FormatError> {
        let position = self.position();
        match self.peek() {
            Some(Token::LParen) => {
                self.index += 1;
                let unit = self.parse_expression()?;
                match self.peek() {
                    Some(Token::RParen) => {
                        self.index += 1;
                        Ok(Factor::Unit(unit))
                    }
                    _ => Err(FormatError::UnbalancedGrouping {
                        position: self.position(),
                    }),
                }
            }
            Some(Token::Pi) => {
                self.index += 1;
                Ok(Factor::Pi)
            }
            Some(Token::Number(raw)) => {
                self.index += 1;
                classify_number(raw, position)
            }
            Some(Token::Symbol(symbol)) => {
                self.index += 1;
                Ok(Factor::Unit(self.symbols.resolve(symbol)?))
            }
            Some(other) => Err(FormatError::UnknownToken {
                token: describe(other),
                position,
            }),
            None => Err(FormatError::UnknownToken {
                token: String::new(),
                position,
            }),
        }
    }

    fn parse_exponent(&mut self) -> Result<i32, FormatError> {
        let negative = if matches!(self.peek(), Some(Token::Minus)) {
            self.index += 1;
            true
        } else {
            false
        };
        let position = self.position();
        match self.peek() {
            Some(Token::Number(raw)) if raw.bytes().all(|b| b.is_ascii_digit()) => {
                self.index += 1;
                let n: i32 = raw.parse().map_err(|_| FormatError::InvalidExponent {
                    token: raw.clone(),
                    position,
                })?;
                Ok(if negative { -n } else { n })
            }
            Some(other) => Err(FormatError::InvalidExponent {
                token: describe(other),
                position,
            }),
            None => Err(FormatError::InvalidExponent {
                token: String::new(),
                position,
            }),
        }
    }

    fn parse_offset_amount(&mut self) -> Result<Number, FormatError> {
        let negative = if matches!(self.peek(), Some(Token::Minus)) {
            self.index += 1;
            true
        } else {
            false
        };
        let position = self.position();
        match self.peek() {
            Some(Token::Number(raw)) => {
                self.index += 1;
                let amount = Number::from_str(raw).map_err(|_| FormatError::InvalidNumber {
                    token: raw.clone(),
                    position,
                })?;
                Ok(if negative { amount.neg() } else { amount })
            }
            Some(other) => Err(FormatError::InvalidNumber {
                token: describe(other),
                position,
            }),
            None => Err(FormatError::InvalidNumber {
                token: String::new(),
                position,
            }),
        }
    }
}

/// Formats and parses units as algebraic expressions
#[derive(Debug, Clone, Default)]
pub struct EbnfUnitFormat {
    symbols: SymbolMap,
}

impl EbnfUnitFormat {
    pub fn new() -> EbnfUnitFormat {
        EbnfUnitFormat::default()
    }

    pub fn with_symbols(symbols: SymbolMap) -> EbnfUnitFormat {
        EbnfUnitFormat { symbols }
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

    /// Renders a unit as an expression
    pub fn format(&self, unit: &Unit) -> String {
        self.render(unit, false)
    }

    fn render(&self, unit: &Unit, in_product: bool) -> String {
        if let Some(label) = self.symbols.label_of(unit) {
            return label.to_string();
        }
        match unit {
            Unit::Base { symbol, .. } | Unit::Alternate { symbol, .. } => symbol.clone(),
            Unit::Transformed { parent, converter } => {
                if let Some(prefix) = MetricPrefix::for_converter(converter) {
                    return format!("{}{}", prefix.symbol(), self.render(parent, true));
                }
                if let Some(prefix) = BinaryPrefix::for_converter(converter) {
                    return format!("{}{}", prefix.symbol(), self.render(parent, true));
                }
                let body = format!("{}{}", self.render(parent, true), converter.suffix());
                if in_product {
                    format!("({body})")
                } else {
                    body
                }
            }
            Unit::Product { factors } => {
                let mut numerator: Vec<String> = Vec::new();
                let mut denominator: Vec<String> = Vec::new();
                for (factor, exponent) in factors {
                    let rendered = self.render(factor, true);
                    if *exponent > 0 {
                        if *exponent == 1 {
                            numerator.push(rendered);
                        } else {
                            numerator.push(format!("{}^{}", rendered, exponent));
                        }
                    } else if *exponent == -1 {
                        denominator.push(rendered);
                    } else {
                        denominator.push(format!("{}^{}", rendered, -exponent));
                    }
                }
                let mut out = if numerator.is_empty() {
                    "1".to_string()
                } else {
                    numerator.join("*")
                };
                for part in denominator {
                    out.push('/');
                    out.push_str(&part);
                }
                out
            }
        }
    }

    /// Parses a unit expression
    pub fn parse(&self, text: &str) -> Result<Unit, FormatError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(FormatError::UnknownUnit(text.to_string()));
        }
        let tokens = tokenize(trimmed);
        let mut parser = Parser {
            tokens: &tokens,
            index: 0,
            symbols: &self.symbols,
            end: trimmed.len(),
        };
        let unit = parser.parse_expression()?;
        match parser.peek() {
            None => Ok(unit),
            Some(Token::RParen) => Err(FormatError::UnbalancedGrouping {
                position: parser.position(),
            }),
            Some(other) => Err(FormatError::UnknownToken {
                token: describe(other),
                position: parser.position(),
            }),
        }
    }
}
