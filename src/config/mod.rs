// ABOUTME: Configuration module organization
// ABOUTME: Environment-variable driven server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

/// Environment-based server configuration
pub mod environment;

pub use environment::{Environment, LogLevel, ServerConfig};
