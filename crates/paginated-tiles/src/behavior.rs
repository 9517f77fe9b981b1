//! Keyboard behavior.
//!
//! Maps key presses to page navigation through a binding table. Arrow keys
//! follow the reading direction: under [`LayoutDirection::RightToLeft`] the
//! left arrow moves to the next page and the right arrow to the previous one.

use paginated_tiles_core::logging::targets;

use crate::skin::PaginatedTilesSkin;

/// Horizontal reading direction of the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl LayoutDirection {
    /// Whether this is [`RightToLeft`](Self::RightToLeft).
    pub fn is_right_to_left(self) -> bool {
        self == Self::RightToLeft
    }
}

/// Keys the tile grid cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    /// Any other key, identified by a platform code.
    Unknown(u32),
}

/// Keyboard modifiers held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        control: true,
        ..Self::NONE
    };
}

/// A key press delivered to the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPressEvent {
    /// The key that was pressed.
    pub key: Key,
    /// Modifiers held during the press.
    pub modifiers: KeyboardModifiers,
}

impl KeyPressEvent {
    /// Create a key press event.
    pub fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self { key, modifiers }
    }

    /// A key press without modifiers.
    pub fn plain(key: Key) -> Self {
        Self::new(key, KeyboardModifiers::NONE)
    }
}

/// A navigation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Go to the previous page.
    SelectPrevious,
    /// Go to the next page.
    SelectNext,
}

impl Action {
    /// The binding name of the action.
    pub fn name(self) -> &'static str {
        match self {
            Self::SelectPrevious => "Left",
            Self::SelectNext => "Right",
        }
    }

    /// Look up an action by binding name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Left" => Some(Self::SelectPrevious),
            "Right" => Some(Self::SelectNext),
            _ => None,
        }
    }

    /// The action for the opposite direction.
    pub fn mirrored(self) -> Self {
        match self {
            Self::SelectPrevious => Self::SelectNext,
            Self::SelectNext => Self::SelectPrevious,
        }
    }
}

/// One entry of the binding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: Key,
    pub modifiers: KeyboardModifiers,
    pub action: Action,
}

impl KeyBinding {
    /// Bind `key` without modifiers to `action`.
    pub const fn new(key: Key, action: Action) -> Self {
        Self {
            key,
            modifiers: KeyboardModifiers::NONE,
            action,
        }
    }

    /// Bind `key` with exactly `modifiers` to `action`.
    pub const fn with_modifiers(key: Key, modifiers: KeyboardModifiers, action: Action) -> Self {
        Self { key, modifiers, action }
    }

    /// Whether the event triggers this binding.
    pub fn matches(&self, event: &KeyPressEvent) -> bool {
        self.key == event.key && self.modifiers == event.modifiers
    }
}

/// Default bindings of the tile grid.
pub const PAGINATED_TILES_BINDINGS: &[KeyBinding] = &[
    KeyBinding::new(Key::ArrowLeft, Action::SelectPrevious),
    KeyBinding::new(Key::ArrowRight, Action::SelectNext),
];

/// Translates key presses into navigation on a skin.
#[derive(Debug, Clone)]
pub struct PaginatedTilesBehavior {
    bindings: Vec<KeyBinding>,
}

impl PaginatedTilesBehavior {
    /// Behavior with the default binding table.
    pub fn new() -> Self {
        Self::with_bindings(PAGINATED_TILES_BINDINGS.to_vec())
    }

    /// Behavior with a custom binding table. Earlier entries win.
    pub fn with_bindings(bindings: Vec<KeyBinding>) -> Self {
        Self { bindings }
    }

    /// The binding table.
    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    /// Resolve the action for a key press under `direction`.
    ///
    /// Horizontal arrow keys are mirrored under right-to-left.
    pub fn match_action(&self, event: &KeyPressEvent, direction: LayoutDirection) -> Option<Action> {
        let action = self
            .bindings
            .iter()
            .find(|binding| binding.matches(event))
            .map(|binding| binding.action)?;

        let horizontal = matches!(event.key, Key::ArrowLeft | Key::ArrowRight);
        if horizontal && direction.is_right_to_left() {
            Some(action.mirrored())
        } else {
            Some(action)
        }
    }

    /// Run `action` on the skin. Returns `true` if the page changed.
    pub fn call_action<T>(&self, action: Action, skin: &PaginatedTilesSkin<T>) -> bool
    where
        T: Clone + Send + Sync + 'static,
    {
        tracing::trace!(target: targets::BEHAVIOR, action = action.name(), "calling action");
        match action {
            Action::SelectPrevious => skin.select_previous(),
            Action::SelectNext => skin.select_next(),
        }
    }

    /// Handle a key press. Returns `true` if the key is bound (consumed),
    /// whether or not the page actually changed.
    pub fn handle_key_press<T>(&self, event: &KeyPressEvent, skin: &PaginatedTilesSkin<T>) -> bool
    where
        T: Clone + Send + Sync + 'static,
    {
        match self.match_action(event, skin.control().layout_direction()) {
            Some(action) => {
                self.call_action(action, skin);
                true
            }
            None => false,
        }
    }
}

impl Default for PaginatedTilesBehavior {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings_ltr() {
        let behavior = PaginatedTilesBehavior::new();
        let ltr = LayoutDirection::LeftToRight;
        assert_eq!(
            behavior.match_action(&KeyPressEvent::plain(Key::ArrowLeft), ltr),
            Some(Action::SelectPrevious)
        );
        assert_eq!(
            behavior.match_action(&KeyPressEvent::plain(Key::ArrowRight), ltr),
            Some(Action::SelectNext)
        );
        assert_eq!(behavior.match_action(&KeyPressEvent::plain(Key::Home), ltr), None);
    }

    #[test]
    fn test_rtl_mirrors_arrows() {
        let behavior = PaginatedTilesBehavior::new();
        for key in [Key::ArrowLeft, Key::ArrowRight] {
            let event = KeyPressEvent::plain(key);
            let ltr = behavior.match_action(&event, LayoutDirection::LeftToRight);
            let rtl = behavior.match_action(&event, LayoutDirection::RightToLeft);
            assert_eq!(rtl, ltr.map(Action::mirrored));
        }
        assert_eq!(
            behavior.match_action(&KeyPressEvent::plain(Key::ArrowLeft), LayoutDirection::RightToLeft),
            behavior.match_action(&KeyPressEvent::plain(Key::ArrowRight), LayoutDirection::LeftToRight),
        );
    }

    #[test]
    fn test_modifiers_must_match() {
        let behavior = PaginatedTilesBehavior::new();
        let event = KeyPressEvent::new(Key::ArrowRight, KeyboardModifiers::CTRL);
        assert_eq!(behavior.match_action(&event, LayoutDirection::LeftToRight), None);
    }

    #[test]
    fn test_custom_bindings_not_mirrored_off_axis() {
        let behavior = PaginatedTilesBehavior::with_bindings(vec![
            KeyBinding::new(Key::PageDown, Action::SelectNext),
            KeyBinding::with_modifiers(Key::ArrowRight, KeyboardModifiers::SHIFT, Action::SelectNext),
        ]);
        let rtl = LayoutDirection::RightToLeft;
        assert_eq!(
            behavior.match_action(&KeyPressEvent::plain(Key::PageDown), rtl),
            Some(Action::SelectNext)
        );
        assert_eq!(
            behavior.match_action(&KeyPressEvent::new(Key::ArrowRight, KeyboardModifiers::SHIFT), rtl),
            Some(Action::SelectPrevious)
        );
    }

    #[test]
    fn test_action_names() {
        assert_eq!(Action::SelectPrevious.name(), "Left");
        assert_eq!(Action::from_name("Right"), Some(Action::SelectNext));
        assert_eq!(Action::from_name("Up"), None);
    }
}
