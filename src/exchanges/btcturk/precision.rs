use crate::core::errors::ExchangeError;
use crate::core::types::OrderSide;
use crate::exchanges::btcturk::constants::BUILTIN_SCALES;
use crate::exchanges::btcturk::types::BtcturkExchangeInfo;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;

/// Allowed decimal places for one pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecisionEntry {
    /// Decimal places of prices (denominator scale)
    pub price_scale: u32,
    /// Decimal places of amounts (numerator scale)
    pub amount_scale: u32,
    /// Whether prices may carry a fractional part at all
    pub has_fraction: bool,
}

impl PrecisionEntry {
    pub const fn new(price_scale: u32, amount_scale: u32, has_fraction: bool) -> Self {
        Self {
            price_scale,
            amount_scale,
            has_fraction,
        }
    }

    /// Price scale after applying `has_fraction`
    pub const fn effective_price_scale(&self) -> u32 {
        if self.has_fraction {
            self.price_scale
        } else {
            0
        }
    }

    /// Scale of a market order quantity
    ///
    /// Market sells are sized in the numerator (amount scale); market buys
    /// are sized in the denominator, so they follow the price scale.
    pub const fn market_quantity_scale(&self, side: OrderSide) -> u32 {
        match side {
            OrderSide::Sell => self.amount_scale,
            OrderSide::Buy => self.effective_price_scale(),
        }
    }
}

/// Symbol to precision lookup, keyed by upper-case pair name
///
/// Every pair is stored under both its concatenated (`BTCTRY`) and
/// underscore (`BTC_TRY`) spelling.
#[derive(Debug, Clone, Default)]
pub struct PrecisionTable {
    entries: HashMap<String, PrecisionEntry>,
}

impl PrecisionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiled table of the long-standing pairs
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (pair, price_scale, amount_scale) in BUILTIN_SCALES {
            table.insert(pair, PrecisionEntry::new(price_scale, amount_scale, true));
        }
        table
    }

    /// Table built from the exchange info listing
    pub fn from_exchange_info(info: &BtcturkExchangeInfo) -> Self {
        let mut table = Self::new();
        for symbol in &info.symbols {
            let entry = PrecisionEntry::new(
                symbol.denominator_scale,
                symbol.numerator_scale,
                symbol.has_fraction,
            );
            table.insert(&symbol.name, entry);
            table.insert(&symbol.name_normalized, entry);
        }
        table
    }

    /// Insert an entry under `symbol` and its separator-free spelling
    pub fn insert(&mut self, symbol: &str, entry: PrecisionEntry) {
        let key = symbol.trim().to_uppercase();
        let compact = strip_separators(&key);
        if compact != key {
            self.entries.insert(compact, entry);
        }
        self.entries.insert(key, entry);
    }

    /// Look up a pair, case-insensitively and with or without separators
    pub fn lookup(&self, symbol: &str) -> Result<PrecisionEntry, ExchangeError> {
        let key = symbol.trim().to_uppercase();
        self.entries
            .get(&key)
            .or_else(|| self.entries.get(&strip_separators(&key)))
            .copied()
            .ok_or_else(|| ExchangeError::UnknownSymbol(symbol.to_string()))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.lookup(symbol).is_ok()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn strip_separators(symbol: &str) -> String {
    symbol.chars().filter(|c| *c != '_' && *c != '-').collect()
}

/// Most fractional digits a `Decimal` can carry
const MAX_SCALE: u32 = 28;

/// Anything that can be read as an exact decimal
pub trait DecimalInput {
    fn to_decimal(&self) -> Result<Decimal, ExchangeError>;

    /// Value truncated toward zero to at most `scale` fractional digits
    fn to_truncated_decimal(&self, scale: u32) -> Result<Decimal, ExchangeError> {
        Ok(self
            .to_decimal()?
            .round_dp_with_strategy(scale, RoundingStrategy::ToZero))
    }
}

impl DecimalInput for Decimal {
    fn to_decimal(&self) -> Result<Decimal, ExchangeError> {
        Ok(*self)
    }
}

impl DecimalInput for str {
    fn to_decimal(&self) -> Result<Decimal, ExchangeError> {
        let trimmed = self.trim();
        Decimal::from_str_exact(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| ExchangeError::InvalidNumericInput(self.to_string()))
    }

    // Digits past `scale` are cut from the text before parsing, so an input
    // longer than a Decimal can hold is never rounded up on the way in
    fn to_truncated_decimal(&self, scale: u32) -> Result<Decimal, ExchangeError> {
        let trimmed = self.trim();
        let value = cut_fraction(trimmed, scale)
            .to_decimal()
            .map_err(|_| ExchangeError::InvalidNumericInput(self.to_string()))?;
        Ok(value.round_dp_with_strategy(scale, RoundingStrategy::ToZero))
    }
}

/// Drop fractional digits beyond `scale` from a plain decimal literal
fn cut_fraction(text: &str, scale: u32) -> &str {
    if !text.is_ascii() || text.contains(['e', 'E']) {
        return text;
    }
    match text.find('.') {
        Some(dot) => {
            let keep = if scale == 0 { dot } else { dot + 1 + scale as usize };
            &text[..keep.min(text.len())]
        }
        None => text,
    }
}

impl DecimalInput for &str {
    fn to_decimal(&self) -> Result<Decimal, ExchangeError> {
        (**self).to_decimal()
    }

    fn to_truncated_decimal(&self, scale: u32) -> Result<Decimal, ExchangeError> {
        (**self).to_truncated_decimal(scale)
    }
}

impl DecimalInput for String {
    fn to_decimal(&self) -> Result<Decimal, ExchangeError> {
        self.as_str().to_decimal()
    }

    fn to_truncated_decimal(&self, scale: u32) -> Result<Decimal, ExchangeError> {
        self.as_str().to_truncated_decimal(scale)
    }
}

// Floats go through their shortest round-trip text form, so 0.1 reads as
// exactly 0.1 rather than its binary expansion.
impl DecimalInput for f64 {
    fn to_decimal(&self) -> Result<Decimal, ExchangeError> {
        if !self.is_finite() {
            return Err(ExchangeError::InvalidNumericInput(self.to_string()));
        }
        self.to_string().to_decimal()
    }

    fn to_truncated_decimal(&self, scale: u32) -> Result<Decimal, ExchangeError> {
        if !self.is_finite() {
            return Err(ExchangeError::InvalidNumericInput(self.to_string()));
        }
        self.to_string().to_truncated_decimal(scale)
    }
}

impl DecimalInput for crate::core::types::Price {
    fn to_decimal(&self) -> Result<Decimal, ExchangeError> {
        Ok(self.value())
    }
}

impl DecimalInput for crate::core::types::Quantity {
    fn to_decimal(&self) -> Result<Decimal, ExchangeError> {
        Ok(self.value())
    }
}

/// Truncate `value` toward zero to `scale` decimal places
///
/// The result has exactly `scale` fractional digits (`0.1` at scale 8
/// renders as `0.10000000`); scale 0 yields the integer part. A scale above
/// 28, or one the value's magnitude leaves no room for, is
/// `InvalidNumericInput`.
pub fn format_unit<T: DecimalInput + ?Sized>(
    value: &T,
    scale: u32,
) -> Result<String, ExchangeError> {
    if scale > MAX_SCALE {
        return Err(ExchangeError::InvalidNumericInput(format!(
            "scale {} exceeds {} decimal places",
            scale, MAX_SCALE
        )));
    }

    let mut truncated = value.to_truncated_decimal(scale)?;
    truncated.rescale(scale);
    if truncated.scale() != scale {
        return Err(ExchangeError::InvalidNumericInput(format!(
            "{} cannot carry {} decimal places",
            truncated, scale
        )));
    }

    // -0.00 is not a meaningful order quantity
    if truncated.is_zero() {
        truncated.set_sign_positive(true);
    }

    Ok(truncated.to_string())
}
