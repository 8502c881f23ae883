// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

mod check;
mod config;
mod help;
mod history;
mod nodes;
