use std::collections::{HashMap, HashSet};
use std::hash::Hash;
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

/// Represents a raw input source that can be bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Key(KeyCode),
    Mouse(MouseButton),
}

/// Raw hardware state for a single frame.
///
/// The window layer feeds events in through `key_down`/`key_up`/`mouse_*`;
/// the game reads it once per frame and `clear_frame_state` drops the edges.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    pub keys_held: HashSet<KeyCode>,
    pub keys_pressed: HashSet<KeyCode>,
    pub keys_released: HashSet<KeyCode>,

    /// Pointer position in logical screen pixels (render resolution).
    pub mouse_pos: [f32; 2],
    pub mouse_moved: bool,
    pub mouse_held: HashSet<MouseButton>,
    pub mouse_pressed: HashSet<MouseButton>,
    pub mouse_released: HashSet<MouseButton>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_frame_state(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_pressed.clear();
        self.mouse_released.clear();
        self.mouse_moved = false;
    }

    pub fn key_down(&mut self, key: KeyCode) {
        // OS key repeat must not re-fire the pressed edge.
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
        self.keys_released.insert(key);
    }

    pub fn mouse_down(&mut self, button: MouseButton) {
        self.mouse_held.insert(button);
        self.mouse_pressed.insert(button);
    }

    pub fn mouse_up(&mut self, button: MouseButton) {
        self.mouse_held.remove(&button);
        self.mouse_released.insert(button);
    }

    pub fn move_mouse(&mut self, x: f32, y: f32) {
        self.mouse_pos = [x, y];
        self.mouse_moved = true;
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool { self.keys_held.contains(&key) }
    pub fn is_key_pressed(&self, key: KeyCode) -> bool { self.keys_pressed.contains(&key) }
    pub fn is_key_released(&self, key: KeyCode) -> bool { self.keys_released.contains(&key) }

    pub fn is_mouse_held(&self, button: MouseButton) -> bool { self.mouse_held.contains(&button) }
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool { self.mouse_pressed.contains(&button) }
    pub fn is_mouse_released(&self, button: MouseButton) -> bool { self.mouse_released.contains(&button) }
}

/// Maps logical actions (defined by the game) to one or more physical inputs.
#[derive(Debug, Clone)]
pub struct ActionMap<A: Hash + Eq + Copy> {
    bindings: HashMap<A, Vec<InputSource>>,
}

impl<A: Hash + Eq + Copy> ActionMap<A> {
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    pub fn bind(&mut self, action: A, source: InputSource) {
        self.bindings.entry(action).or_default().push(source);
    }

    /// Returns true if the action was triggered this frame (pressed).
    pub fn is_pressed(&self, action: A, input: &InputState) -> bool {
        self.bindings.get(&action).is_some_and(|sources| {
            sources.iter().any(|s| match s {
                InputSource::Key(k) => input.is_key_pressed(*k),
                InputSource::Mouse(b) => input.is_mouse_pressed(*b),
            })
        })
    }

    /// Returns true if the action is currently being held.
    pub fn is_held(&self, action: A, input: &InputState) -> bool {
        self.bindings.get(&action).is_some_and(|sources| {
            sources.iter().any(|s| match s {
                InputSource::Key(k) => input.is_key_held(*k),
                InputSource::Mouse(b) => input.is_mouse_held(*b),
            })
        })
    }
}

impl<A: Hash + Eq + Copy> Default for ActionMap<A> {
    fn default() -> Self { Self::new() }
}

// ── Game actions ────────────────────────────────────────────────────────────

/// Logical controls of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Enter: advance menus, close the codex, dismiss end screens.
    Confirm,
    /// Escape: pause, resume, quit from the menu.
    Cancel,
    /// Space: spirit burst.
    Attack,
    /// Backspace: leave the pause screen for the menu.
    Back,
    /// Left click on the world map.
    Select,
}

impl ActionMap<Action> {
    /// WASD and arrow keys to move, Space to attack, Enter/Escape for menus.
    pub fn default_bindings() -> Self {
        use InputSource::{Key, Mouse};
        let mut map = Self::new();
        for (action, keys) in [
            (Action::MoveUp, [KeyCode::KeyW, KeyCode::ArrowUp]),
            (Action::MoveDown, [KeyCode::KeyS, KeyCode::ArrowDown]),
            (Action::MoveLeft, [KeyCode::KeyA, KeyCode::ArrowLeft]),
            (Action::MoveRight, [KeyCode::KeyD, KeyCode::ArrowRight]),
            (Action::Confirm, [KeyCode::Enter, KeyCode::NumpadEnter]),
        ] {
            for key in keys {
                map.bind(action, Key(key));
            }
        }
        map.bind(Action::Cancel, Key(KeyCode::Escape));
        map.bind(Action::Attack, Key(KeyCode::Space));
        map.bind(Action::Back, Key(KeyCode::Backspace));
        map.bind(Action::Select, Mouse(MouseButton::Left));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_does_not_repress() {
        let mut input = InputState::new();
        input.key_down(KeyCode::Space);
        input.clear_frame_state();
        input.key_down(KeyCode::Space);
        assert!(!input.is_key_pressed(KeyCode::Space));
        assert!(input.is_key_held(KeyCode::Space));
    }

    #[test]
    fn arrows_and_wasd_both_move() {
        let map = ActionMap::default_bindings();
        let mut input = InputState::new();
        input.key_down(KeyCode::ArrowLeft);
        assert!(map.is_held(Action::MoveLeft, &input));
        input.key_up(KeyCode::ArrowLeft);
        input.key_down(KeyCode::KeyA);
        assert!(map.is_held(Action::MoveLeft, &input));
        assert!(!map.is_held(Action::MoveRight, &input));
    }

    #[test]
    fn click_is_select() {
        let map = ActionMap::default_bindings();
        let mut input = InputState::new();
        input.mouse_down(MouseButton::Left);
        assert!(map.is_pressed(Action::Select, &input));
        input.clear_frame_state();
        assert!(!map.is_pressed(Action::Select, &input));
    }
}
