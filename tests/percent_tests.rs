// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetrack::percent::normalize_percentages;
use rust_decimal::Decimal;

fn dec(v: &[i64]) -> Vec<Decimal> {
    v.iter().map(|x| Decimal::new(*x, 0)).collect()
}

fn assert_valid(out: &[u32], len: usize) {
    assert_eq!(out.len(), len);
    assert_eq!(out.iter().sum::<u32>(), 100, "{:?}", out);
}

#[test]
fn empty_input_gives_empty_output() {
    assert!(normalize_percentages(&[]).is_empty());
}

#[test]
fn zero_total_is_all_zero() {
    assert_eq!(normalize_percentages(&dec(&[0, 0, 0])), vec![0, 0, 0]);
}

#[test]
fn exact_shares_are_kept() {
    assert_eq!(normalize_percentages(&dec(&[50, 30, 20])), vec![50, 30, 20]);
}

#[test]
fn single_entry_takes_everything() {
    assert_eq!(normalize_percentages(&dec(&[42])), vec![100]);
}

#[test]
fn last_entry_absorbs_rounding() {
    assert_eq!(normalize_percentages(&dec(&[1, 1, 1])), vec![33, 33, 34]);
    assert_eq!(
        normalize_percentages(&dec(&[1, 1, 1, 1, 1, 1])),
        vec![17, 17, 17, 17, 17, 15]
    );
}

#[test]
fn zero_amounts_keep_zero_share() {
    assert_eq!(normalize_percentages(&dec(&[0, 0, 10])), vec![0, 0, 100]);
    assert_eq!(normalize_percentages(&dec(&[10, 0])), vec![100, 0]);
}

#[test]
fn negative_amounts_count_as_zero() {
    assert_eq!(normalize_percentages(&dec(&[-5, 10])), vec![0, 100]);
}

#[test]
fn many_round_ups_fall_back_to_largest_remainder() {
    // 21 shares of 4.5% all round up to 5, which would push the last below zero
    let mut amounts = vec![45; 21];
    amounts.push(55);
    let out = normalize_percentages(&dec(&amounts));
    assert_valid(&out, 22);
    assert_eq!(out[0], 5);
    assert_eq!(out[10], 5);
    assert_eq!(out[11], 4);
    assert_eq!(out[21], 5);
}

#[test]
fn generated_inputs_always_sum_to_hundred() {
    // small deterministic LCG so the cases are reproducible
    let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
    let mut next = || {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        seed >> 33
    };
    for _ in 0..500 {
        let len = (next() % 30 + 1) as usize;
        let amounts: Vec<Decimal> = (0..len)
            .map(|_| {
                let cents = if next() % 4 == 0 { 0 } else { (next() % 100_000) as i64 };
                Decimal::new(cents, 2)
            })
            .collect();
        let out = normalize_percentages(&amounts);
        if amounts.iter().all(|a| a.is_zero()) {
            assert!(out.iter().all(|p| *p == 0));
        } else {
            assert_valid(&out, len);
        }
    }
}

#[test]
fn totals_beyond_decimal_range_do_not_panic() {
    assert_eq!(normalize_percentages(&[Decimal::MAX, Decimal::MAX]), vec![50, 50]);
    let out = normalize_percentages(&[Decimal::MAX, Decimal::MAX, Decimal::ONE]);
    assert_valid(&out, 3);
    assert_eq!(out[2], 0);
}
