// Input configuration and remapping

use super::action::{default_p1_bindings, global_bindings, Action, InputSource};
use std::collections::HashMap;

/// Bindings for one player: each input source triggers at most one action
#[derive(Debug, Clone, Default)]
pub struct InputConfig {
    player_id: usize,
    bindings: HashMap<InputSource, Action>,
}

impl InputConfig {
    /// Create an empty configuration
    pub fn new(player_id: usize) -> Self {
        Self {
            player_id,
            bindings: HashMap::new(),
        }
    }

    /// Create a configuration from a list of bindings
    pub fn from_bindings(player_id: usize, bindings: Vec<(InputSource, Action)>) -> Self {
        let mut config = Self::new(player_id);
        for (source, action) in bindings {
            config.bind(source, action);
        }
        config
    }

    /// Bind an input source to an action, replacing any previous binding
    /// for that source
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.bindings.insert(source, action);
    }

    /// Unbind an input source
    pub fn unbind_source(&mut self, source: InputSource) {
        self.bindings.remove(&source);
    }

    /// Unbind all sources for an action
    pub fn unbind_action(&mut self, action: Action) {
        self.bindings.retain(|_, bound| *bound != action);
    }

    /// Get the action bound to an input source
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    /// Get all input sources bound to an action
    pub fn get_sources(&self, action: Action) -> Vec<InputSource> {
        self.bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(source, _)| *source)
            .collect()
    }

    /// Check if an action has any bindings
    pub fn has_binding(&self, action: Action) -> bool {
        self.bindings.values().any(|bound| *bound == action)
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Clear all bindings
    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    /// Reset to default bindings for this player
    ///
    /// Only the first player has local bindings; everyone else starts empty.
    pub fn reset_to_defaults(&mut self) {
        self.clear();
        if self.player_id == 0 {
            for (source, action) in default_p1_bindings() {
                self.bind(source, action);
            }
        }
    }
}

/// Manager for all player input configurations
#[derive(Debug)]
pub struct InputConfigManager {
    /// Configurations for each player
    configs: Vec<InputConfig>,

    /// Global bindings (not player-specific)
    global_config: InputConfig,
}

impl InputConfigManager {
    /// Create a config manager with default bindings for `max_players`
    pub fn new(max_players: usize) -> Self {
        let configs = (0..max_players)
            .map(|player_id| {
                let mut config = InputConfig::new(player_id);
                config.reset_to_defaults();
                config
            })
            .collect();

        Self {
            configs,
            global_config: InputConfig::from_bindings(usize::MAX, global_bindings()),
        }
    }

    pub fn get_config(&self, player_id: usize) -> Option<&InputConfig> {
        self.configs.get(player_id)
    }

    pub fn get_config_mut(&mut self, player_id: usize) -> Option<&mut InputConfig> {
        self.configs.get_mut(player_id)
    }

    /// Player-specific action for a source
    pub fn get_player_action(&self, player_id: usize, source: InputSource) -> Option<Action> {
        self.get_config(player_id)?.get_action(source)
    }

    /// Global action for a source
    pub fn get_global_action(&self, source: InputSource) -> Option<Action> {
        self.global_config.get_action(source)
    }

    /// Reset all configurations to defaults
    pub fn reset_all_to_defaults(&mut self) {
        for config in &mut self.configs {
            config.reset_to_defaults();
        }
    }

    pub fn num_players(&self) -> usize {
        self.configs.len()
    }
}

impl Default for InputConfigManager {
    fn default() -> Self {
        Self::new(2)
    }
}
