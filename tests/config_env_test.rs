// ABOUTME: Tests for environment-based server configuration
// ABOUTME: Covers defaults, overrides, and rejection of malformed values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu
#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]

use randevu_server::config::ServerConfig;
use randevu_server::errors::ErrorCode;
use serial_test::serial;
use std::env;

fn clear_config_env() {
    env::remove_var("HTTP_PORT");
    env::remove_var("HTTP_HOST");
    env::remove_var("DATABASE_URL");
}

#[test]
#[serial]
fn test_defaults_when_env_is_empty() {
    clear_config_env();

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 8081);
    assert_eq!(config.http_host, "0.0.0.0");
    assert_eq!(config.database_url, "sqlite:./data/randevu.db");
}

#[test]
#[serial]
fn test_env_overrides() {
    clear_config_env();
    env::set_var("HTTP_PORT", "9090");
    env::set_var("HTTP_HOST", "127.0.0.1");
    env::set_var("DATABASE_URL", "sqlite:/tmp/other.db");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 9090);
    assert_eq!(config.http_host, "127.0.0.1");
    assert_eq!(config.database_url, "sqlite:/tmp/other.db");

    clear_config_env();
}

#[test]
#[serial]
fn test_malformed_port_is_config_error() {
    clear_config_env();
    env::set_var("HTTP_PORT", "not-a-port");

    let error = ServerConfig::from_env().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigError);

    clear_config_env();
}
