// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::error::ValidationError;

pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Currency {
    pub value: &'static str,
    pub label: &'static str,
    pub locale: &'static str,
}

pub static CURRENCIES: &[Currency] = &[
    Currency { value: "USD", label: "$ Dollar", locale: "en-US" },
    Currency { value: "GBP", label: "£ Pound", locale: "en-GB" },
    Currency { value: "EUR", label: "€ Euro", locale: "de-DE" },
    Currency { value: "JPY", label: "¥ Yen", locale: "ja-JP" },
];

pub fn find(code: &str) -> Option<&'static Currency> {
    let code = code.trim();
    CURRENCIES
        .iter()
        .find(|c| c.value.eq_ignore_ascii_case(code))
}

pub fn require(code: &str) -> Result<&'static Currency, ValidationError> {
    find(code).ok_or_else(|| ValidationError::UnsupportedCurrency(code.trim().to_string()))
}

impl Currency {
    pub fn formatter(&self) -> MoneyFormatter {
        let (symbol, symbol_after, group, decimal) = match self.value {
            "USD" => ("$", false, ',', '.'),
            "GBP" => ("£", false, ',', '.'),
            "EUR" => ("€", true, '.', ','),
            "JPY" => ("￥", false, ',', '.'),
            _ => (self.value, false, ',', '.'),
        };
        MoneyFormatter {
            symbol,
            symbol_after,
            group,
            decimal,
            fraction_digits: if self.value == "JPY" { 0 } else { 2 },
        }
    }
}

/// Renders amounts the way the currency's locale does.
#[derive(Debug, Clone, Copy)]
pub struct MoneyFormatter {
    symbol: &'static str,
    symbol_after: bool,
    group: char,
    decimal: char,
    fraction_digits: u32,
}

impl MoneyFormatter {
    pub fn format(&self, amount: Decimal) -> String {
        let rounded =
            amount.round_dp_with_strategy(self.fraction_digits, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let digits = format!("{:.*}", self.fraction_digits as usize, rounded.abs());
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (digits.as_str(), None),
        };

        let mut body = group_thousands(int_part, self.group);
        if let Some(f) = frac_part {
            body.push(self.decimal);
            body.push_str(f);
        }

        let sign = if negative { "-" } else { "" };
        if self.symbol_after {
            format!("{}{}\u{a0}{}", sign, body, self.symbol)
        } else {
            format!("{}{}{}", sign, self.symbol, body)
        }
    }
}

fn group_thousands(int_part: &str, sep: char) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}
