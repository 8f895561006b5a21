/// Actions that reach the save system
///
/// This enum decouples the keys and menu buttons that trigger saving and
/// loading from the code that performs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    // === Hotkeys ===
    QuickSave,
    QuickLoad,

    // === Slot Menu ===
    SaveToSlot(u32),
    LoadSlot(u32),
    DeleteSlot(u32),

    // === Main Menu ===
    ContinueGame,
    NewGame,
}

/// Keys the save shims listen to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    F5,
    F9,
    Enter,
    /// Number row, 0-9
    Digit(u8),
}

/// Input context determines which actions are available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    /// Normal gameplay; hotkeys are live
    Playing,
    MainMenu,
    /// Slot picker; digits pick a slot, 0 means slot 10
    SlotMenu { saving: bool },
}

/// Maps a key press to an action in the given context
pub fn map_key(key: Key, context: InputContext) -> Option<GameAction> {
    match (context, key) {
        (InputContext::Playing, Key::F5) => Some(GameAction::QuickSave),
        (InputContext::Playing, Key::F9) => Some(GameAction::QuickLoad),

        (InputContext::MainMenu, Key::Enter) => Some(GameAction::ContinueGame),
        (InputContext::MainMenu, Key::F9) => Some(GameAction::QuickLoad),

        (InputContext::SlotMenu { saving }, Key::Digit(digit)) => {
            let slot = if digit == 0 { 10 } else { u32::from(digit) };
            Some(if saving { GameAction::SaveToSlot(slot) } else { GameAction::LoadSlot(slot) })
        }

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotkeys_only_while_playing() {
        assert_eq!(map_key(Key::F5, InputContext::Playing), Some(GameAction::QuickSave));
        assert_eq!(map_key(Key::F5, InputContext::MainMenu), None);
        assert_eq!(map_key(Key::F9, InputContext::MainMenu), Some(GameAction::QuickLoad));
    }

    #[test]
    fn test_slot_menu_digits() {
        let saving = InputContext::SlotMenu { saving: true };
        assert_eq!(map_key(Key::Digit(3), saving), Some(GameAction::SaveToSlot(3)));
        assert_eq!(map_key(Key::Digit(0), saving), Some(GameAction::SaveToSlot(10)));

        let loading = InputContext::SlotMenu { saving: false };
        assert_eq!(map_key(Key::Digit(7), loading), Some(GameAction::LoadSlot(7)));
        assert_eq!(map_key(Key::Enter, loading), None);
    }
}
