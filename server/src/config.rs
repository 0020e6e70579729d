//! Runtime configuration for the Nuclear War server.

use once_cell::sync::Lazy;
use std::env;

#[derive(Debug)]
pub struct Settings {
    /// Address the HTTP server binds to.
    pub server_addr: String,
    /// HTTP worker threads; `None` keeps actix-web's one-per-core default.
    pub workers: Option<usize>,
    /// Most recent turn-log entries included in a player view.
    pub turn_log_limit: usize,
}

impl Settings {
    fn from_env() -> Self {
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".into());

        let workers = env::var("HTTP_WORKERS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|n| *n > 0);

        let turn_log_limit = env::var("TURN_LOG_LIMIT")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(200);

        Settings {
            server_addr,
            workers,
            turn_log_limit,
        }
    }
}

static SETTINGS: Lazy<Settings> = Lazy::new(Settings::from_env);

pub fn settings() -> &'static Settings {
    &SETTINGS
}
