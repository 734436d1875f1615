//! Runtime configuration and its environment loader.
use std::env;

use dejarik_core::{BoardConfig, UniformMovement};

/// Settings a [`crate::Session`] is built from.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    pub board: BoardConfig,
    /// Movement budget handed to [`UniformMovement`] when no oracle is supplied.
    pub movement: i32,
    /// Display name of the local player.
    pub player_name: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            movement: UniformMovement::DEFAULT_MOVES,
            player_name: "player".to_owned(),
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DEJARIK_INNER_RADIUS` - Inner ring radius (default: 1.0)
    /// - `DEJARIK_OUTER_RADIUS` - Outer ring radius (default: 2.0)
    /// - `DEJARIK_BOUNDING_RADIUS` - Board edge radius (default: 3.0)
    /// - `DEJARIK_MOVEMENT` - Steps every piece moves when selected (default: 1)
    /// - `DEJARIK_PLAYER_NAME` - Local player display name (default: "player")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(radius) = read_var::<f32, _>(&lookup, "DEJARIK_INNER_RADIUS") {
            config.board.inner_ring_radius = radius;
        }
        if let Some(radius) = read_var::<f32, _>(&lookup, "DEJARIK_OUTER_RADIUS") {
            config.board.outer_ring_radius = radius;
        }
        if let Some(radius) = read_var::<f32, _>(&lookup, "DEJARIK_BOUNDING_RADIUS") {
            config.board.bounding_radius = radius;
        }
        if let Some(moves) = read_var::<i32, _>(&lookup, "DEJARIK_MOVEMENT") {
            config.movement = moves;
        }
        if let Some(name) = lookup("DEJARIK_PLAYER_NAME").filter(|name| !name.trim().is_empty()) {
            config.player_name = name;
        }

        config
    }

    pub fn movement_oracle(&self) -> UniformMovement {
        UniformMovement(self.movement)
    }
}

fn read_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)?.trim().parse().ok()
}
