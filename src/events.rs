use crate::scene::{Mode, SceneHooks};

/// Named one-shot sounds the core asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Start,
    Portal,
    Ending,
    Ending2,
    Collect,
    Attack,
    Damage,
    WorldMapBegin,
}

impl Cue {
    pub const ALL: [Cue; 8] = [
        Cue::Start,
        Cue::Portal,
        Cue::Ending,
        Cue::Ending2,
        Cue::Collect,
        Cue::Attack,
        Cue::Damage,
        Cue::WorldMapBegin,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Cue::Start => "start",
            Cue::Portal => "portal",
            Cue::Ending => "ending",
            Cue::Ending2 => "ending2",
            Cue::Collect => "collect",
            Cue::Attack => "attack",
            Cue::Damage => "damage",
            Cue::WorldMapBegin => "worldMap",
        }
    }

    /// File name under the audio directory.
    pub fn file(self) -> &'static str {
        match self {
            Cue::Start => "start.mp3",
            Cue::Portal => "portal.mp3",
            Cue::Ending => "ending.mp3",
            Cue::Ending2 => "ending2.mp3",
            Cue::Collect => "collect.mp3",
            Cue::Attack => "attack.mp3",
            Cue::Damage => "damage.mp3",
            Cue::WorldMapBegin => "world_map.mp3",
        }
    }
}

/// Looping background tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    Gameplay,
    WorldMap,
}

impl Track {
    pub fn file(self) -> &'static str {
        match self {
            Track::Gameplay => "BGM.mp3",
            Track::WorldMap => "world_map.mp3",
        }
    }
}

/// Requests from the simulation to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Sound(Cue),
    Music { track: Track, volume: f32 },
    StopMusic { fade_secs: f32 },
    Entered(Mode),
    Exited(Mode),
    Hint(String),
    Quit,
}

/// Per-frame queue of [`GameEvent`]s, drained by the application.
#[derive(Debug, Default)]
pub struct Outbox {
    events: Vec<GameEvent>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn sound(&mut self, cue: Cue) {
        self.push(GameEvent::Sound(cue));
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl SceneHooks for Outbox {
    fn on_enter(&mut self, mode: Mode) {
        self.push(GameEvent::Entered(mode));
    }

    fn on_exit(&mut self, mode: Mode) {
        self.push(GameEvent::Exited(mode));
    }
}
