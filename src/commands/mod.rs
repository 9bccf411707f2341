// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod users;
pub mod settings;
pub mod currency;
pub mod categories;
pub mod transactions;
pub mod stats;
pub mod exporter;
pub mod doctor;
