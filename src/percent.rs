// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Turn per-category sums into whole percentages that add up to exactly 100.
///
/// All entries but the last are rounded half away from zero and the last one
/// absorbs the difference. When that would leave the last entry negative the
/// shares are distributed with the largest-remainder method instead. A zero
/// total yields all zeros.
pub fn normalize_percentages(amounts: &[Decimal]) -> Vec<u32> {
    if amounts.is_empty() {
        return Vec::new();
    }
    let mut clamped: Vec<Decimal> = amounts.iter().map(|a| (*a).max(Decimal::ZERO)).collect();
    let total = match checked_total(&clamped) {
        Some(t) => t,
        None => {
            // shares are scale-free, so shrink every amount until the sum fits
            let divisor = Decimal::from(clamped.len() + 1);
            for a in clamped.iter_mut() {
                *a /= divisor;
            }
            checked_total(&clamped).unwrap_or(Decimal::MAX)
        }
    };
    if total.is_zero() {
        return vec![0; amounts.len()];
    }

    let hundred = Decimal::ONE_HUNDRED;
    let shares: Vec<Decimal> = clamped.iter().map(|a| *a / total * hundred).collect();

    let (head, _) = shares.split_at(shares.len() - 1);
    let rounded: Vec<u32> = head
        .iter()
        .map(|s| to_points(s.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)))
        .collect();
    let rounded_total: u32 = rounded.iter().sum();
    if rounded_total <= 100 {
        let mut out = rounded;
        out.push(100 - rounded_total);
        return out;
    }

    largest_remainder(&shares)
}

fn checked_total(amounts: &[Decimal]) -> Option<Decimal> {
    amounts
        .iter()
        .try_fold(Decimal::ZERO, |acc, a| acc.checked_add(*a))
}

fn largest_remainder(shares: &[Decimal]) -> Vec<u32> {
    let mut out: Vec<u32> = shares.iter().map(|s| to_points(s.floor())).collect();
    let floored: u32 = out.iter().sum();
    let mut remaining = 100u32.saturating_sub(floored) as usize;

    let mut order: Vec<usize> = (0..shares.len()).collect();
    // stable sort keeps the earlier index ahead on equal remainders
    order.sort_by(|&a, &b| shares[b].fract().cmp(&shares[a].fract()));
    for idx in order.into_iter().cycle() {
        if remaining == 0 {
            break;
        }
        out[idx] += 1;
        remaining -= 1;
    }
    out
}

fn to_points(d: Decimal) -> u32 {
    d.to_u32().unwrap_or(0)
}
