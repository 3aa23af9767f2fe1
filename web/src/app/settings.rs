use minado_core::Difficulty;
use serde::{Deserialize, Serialize};

use super::utils::StorageKey;

/// Player preferences kept by the presentation layer, outside the engine:
/// the selected preset and the sound-effect toggle.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub difficulty: Difficulty,
    pub sound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            sound: true,
        }
    }
}

impl StorageKey for Settings {
    const KEY: &'static str = "minado:settings";
}
