use tracing::{debug, info};

/// Top-level game mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Menu,
    WorldMap,
    CodexView,
    Cutscene,
    Playing,
    Paused,
    Win,
    GameOver,
    Ending,
}

impl Mode {
    pub const ALL: [Mode; 9] = [
        Mode::Menu,
        Mode::WorldMap,
        Mode::CodexView,
        Mode::Cutscene,
        Mode::Playing,
        Mode::Paused,
        Mode::Win,
        Mode::GameOver,
        Mode::Ending,
    ];

    /// Modes in which the world is drawn underneath the screen overlay.
    pub fn shows_world(self) -> bool {
        matches!(self, Mode::Playing | Mode::Paused)
    }
}

/// Transition hook points. Both default to doing nothing.
pub trait SceneHooks {
    fn on_enter(&mut self, _mode: Mode) {}
    fn on_exit(&mut self, _mode: Mode) {}
}

impl SceneHooks for () {}

/// Holds the current [`Mode`] and only lets it move along legal edges.
///
/// Level-to-level progression happens inside `Playing` and is not a
/// transition here.
#[derive(Debug, Clone, Default)]
pub struct SceneMachine {
    current: Mode,
}

impl SceneMachine {
    pub fn new() -> Self {
        Self { current: Mode::Menu }
    }

    pub fn current(&self) -> Mode {
        self.current
    }

    pub fn is(&self, mode: Mode) -> bool {
        self.current == mode
    }

    pub fn is_legal(from: Mode, to: Mode) -> bool {
        use Mode::*;
        matches!(
            (from, to),
            (Menu, WorldMap)
                | (WorldMap, CodexView | Cutscene | Menu)
                | (CodexView, WorldMap)
                | (Cutscene, Playing)
                | (Playing, Paused | GameOver | Win | Ending)
                | (Paused, Playing | Menu)
                | (Ending | GameOver | Win, Menu)
        )
    }

    /// Move to `to`, calling `on_exit(old)` then `on_enter(new)`.
    /// Illegal requests leave the mode unchanged and return `false`.
    pub fn transition(&mut self, to: Mode, hooks: &mut dyn SceneHooks) -> bool {
        let from = self.current;
        if !Self::is_legal(from, to) {
            debug!(?from, ?to, "scene transition rejected");
            return false;
        }
        hooks.on_exit(from);
        self.current = to;
        hooks.on_enter(to);
        info!(?from, ?to, "scene transition");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Log(Vec<String>);

    impl SceneHooks for Log {
        fn on_enter(&mut self, mode: Mode) {
            self.0.push(format!("enter {mode:?}"));
        }
        fn on_exit(&mut self, mode: Mode) {
            self.0.push(format!("exit {mode:?}"));
        }
    }

    #[test]
    fn hooks_fire_exit_then_enter() {
        let mut sm = SceneMachine::new();
        let mut log = Log::default();
        assert!(sm.transition(Mode::WorldMap, &mut log));
        assert_eq!(log.0, vec!["exit Menu", "enter WorldMap"]);
    }

    #[test]
    fn rejected_transition_is_silent() {
        let mut sm = SceneMachine::new();
        let mut log = Log::default();
        assert!(!sm.transition(Mode::Playing, &mut log));
        assert!(log.0.is_empty());
        assert_eq!(sm.current(), Mode::Menu);
    }

    #[test]
    fn no_self_loops() {
        for mode in Mode::ALL {
            assert!(!SceneMachine::is_legal(mode, mode));
        }
    }
}
