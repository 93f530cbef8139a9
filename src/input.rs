//! Player intents
//!
//! Hosts translate raw mouse/keyboard/touch events into these and hand them
//! to the session; the session decides whether they apply in its phase.

use serde::{Deserialize, Serialize};

use crate::sim::Difficulty;

/// Something the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Reverse gravity (Playing only)
    Flip,
    /// Pick a difficulty on the start screen and play
    Start(Difficulty),
    /// Play the same difficulty again after a run ended
    Retry,
    /// Back to the start screen
    Menu,
}

/// Default keyboard binding, by DOM-style key code. Pointer presses on the
/// play field also flip; menu buttons map to the other intents.
pub fn intent_for_key(code: &str) -> Option<Intent> {
    match code {
        "Space" | "ArrowUp" => Some(Intent::Flip),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(intent_for_key("Space"), Some(Intent::Flip));
        assert_eq!(intent_for_key("ArrowUp"), Some(Intent::Flip));
        assert_eq!(intent_for_key("KeyQ"), None);
    }
}
