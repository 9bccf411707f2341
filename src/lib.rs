// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod config;
pub mod currencies;
pub mod db;
pub mod error;
pub mod models;
pub mod percent;
pub mod stats;
pub mod utils;
pub mod commands;
