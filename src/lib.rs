// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;

#[cfg(test)]
mod test_utils;
