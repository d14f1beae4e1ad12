// SPDX-License-Identifier: MPL-2.0

use cosmic::cosmic_config::{self, cosmic_config_derive::CosmicConfigEntry, CosmicConfigEntry};

#[derive(Debug, Clone, CosmicConfigEntry, Eq, PartialEq)]
#[version = 1]
pub struct Config {
    /// Recruitment server URL (e.g., http://localhost:8080)
    pub server_url: String,
    /// Bearer token for the recruitment API
    pub auth_token: String,
    /// Show moves on the board before the server confirms them
    pub optimistic_moves: bool,
    /// Show the application date on cards
    pub show_applied_date: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: String::from("http://localhost:8080"),
            auth_token: String::new(),
            optimistic_moves: true,
            show_applied_date: true,
        }
    }
}
