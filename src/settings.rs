use serde::{Deserialize, Serialize};

use super::bot_controller::BotType;
use super::types::FirstPlayerMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameSettings {
    pub first_player: FirstPlayerMode,
    pub bot_type: BotType,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            first_player: FirstPlayerMode::Human,
            bot_type: BotType::Minimax,
        }
    }
}

impl GameSettings {
    pub fn from_yaml(content: &str) -> Result<Self, String> {
        serde_yaml_ng::from_str(content)
            .map_err(|e| format!("Failed to deserialize settings: {}", e))
    }

    pub fn to_yaml(&self) -> Result<String, String> {
        serde_yaml_ng::to_string(self).map_err(|e| format!("Failed to serialize settings: {}", e))
    }
}
