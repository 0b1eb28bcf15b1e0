use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use kira::{
    manager::{AudioManager, AudioManagerSettings, backend::DefaultBackend},
    sound::{static_sound::{StaticSoundData, StaticSoundSettings, StaticSoundHandle}, PlaybackRate},
    tween::Tween,
    Volume,
};
use rand::Rng;
use tracing::{debug, warn};

use crate::events::{Cue, GameEvent, Track};
use crate::scene::{Mode, SceneHooks};

/// Music level while the pause screen is up, as a fraction of the track volume.
const PAUSED_MUSIC_FACTOR: f32 = 0.3;

/// Configuration for playing a sound with variation.
#[derive(Debug, Clone, Copy)]
pub struct SoundConfig {
    pub volume: f32,
    pub pitch: f32,
    /// Random pitch variation range (e.g. 0.1 = +/- 10%)
    pub pitch_variation: f32,
    /// Random volume variation range
    pub volume_variation: f32,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self { volume: 1.0, pitch: 1.0, pitch_variation: 0.0, volume_variation: 0.0 }
    }
}

/// Plays the game's cues and background tracks.
///
/// Every failure (no device, missing file) degrades to silence; nothing here
/// can stop the frame loop.
pub struct AudioContext {
    /// `None` when audio hardware is unavailable (headless / CI / no audio device).
    manager: Option<AudioManager>,
    sounds: HashMap<String, StaticSoundData>,
    active_music: Option<StaticSoundHandle>,
    music_volume: f32,
}

impl AudioContext {
    pub fn new() -> Self {
        let manager = match AudioManager::<DefaultBackend>::new(AudioManagerSettings::default()) {
            Ok(m) => Some(m),
            Err(e) => {
                warn!(error = %e, "failed to initialize audio manager; audio disabled");
                None
            }
        };
        Self { manager, sounds: HashMap::new(), active_music: None, music_volume: 1.0 }
    }

    /// Returns true if audio hardware is available.
    pub fn is_available(&self) -> bool { self.manager.is_some() }

    pub fn is_loaded(&self, name: &str) -> bool { self.sounds.contains_key(name) }

    /// Load a sound file (OGG, WAV, MP3) into memory under `name`.
    /// Logs a warning and returns `false` if the file cannot be read.
    pub fn load_sound<P: AsRef<Path>>(&mut self, name: &str, path: P) -> bool {
        match StaticSoundData::from_file(path.as_ref()) {
            Ok(sound) => {
                self.sounds.insert(name.to_string(), sound);
                true
            }
            Err(e) => {
                warn!(name, path = %path.as_ref().display(), error = %e, "failed to load sound");
                false
            }
        }
    }

    /// Load every cue and track from `dir`. Returns how many loaded.
    pub fn load_cues(&mut self, dir: &Path) -> usize {
        let cues = Cue::ALL.iter().map(|c| (c.name(), c.file()));
        let tracks = [Track::Gameplay, Track::WorldMap].into_iter().map(|t| (t.file(), t.file()));
        let mut loaded = 0;
        for (name, file) in cues.chain(tracks) {
            if self.is_loaded(name) {
                continue;
            }
            loaded += usize::from(self.load_sound(name, dir.join(file)));
        }
        debug!(loaded, dir = %dir.display(), "audio assets loaded");
        loaded
    }

    /// Play a sound once with optional config.
    pub fn play(&mut self, name: &str, config: SoundConfig) {
        let Some(manager) = self.manager.as_mut() else { return; };
        let Some(data) = self.sounds.get(name) else { return; };

        let mut rng = rand::thread_rng();
        let p_offset = rng.gen_range(-1.0..=1.0) * config.pitch_variation;
        let v_offset = rng.gen_range(-1.0..=1.0) * config.volume_variation;

        let mut settings = StaticSoundSettings::new();
        settings.playback_rate = PlaybackRate::Factor((config.pitch + p_offset) as f64).into();
        settings.volume = Volume::Amplitude((config.volume + v_offset).clamp(0.0, 2.0) as f64).into();

        if let Err(e) = manager.play(data.clone().with_settings(settings)) {
            warn!(name, error = %e, "failed to play sound");
        }
    }

    /// Play background music that loops indefinitely, replacing the current track.
    pub fn play_music(&mut self, name: &str, volume: f32, fade_in_secs: f32) {
        let Some(manager) = self.manager.as_mut() else { return; };
        let Some(data) = self.sounds.get(name) else { return; };

        // Fade out previous music with a fixed short duration independent of the new track's fade-in.
        if let Some(mut handle) = self.active_music.take() {
            let _ = handle.stop(tween(0.5));
        }

        let mut settings = StaticSoundSettings::new().loop_region(0.0..);
        settings.volume = Volume::Amplitude(0.0).into();

        match manager.play(data.clone().with_settings(settings)) {
            Ok(mut handle) => {
                let _ = handle.set_volume(Volume::Amplitude(volume as f64), tween(fade_in_secs));
                self.active_music = Some(handle);
                self.music_volume = volume;
            }
            Err(e) => warn!(name, error = %e, "failed to play music"),
        }
    }

    pub fn stop_music(&mut self, fade_secs: f32) {
        if let Some(mut handle) = self.active_music.take() {
            let _ = handle.stop(tween(fade_secs));
        }
    }

    fn set_music_level(&mut self, factor: f32) {
        let volume = self.music_volume * factor;
        if let Some(handle) = self.active_music.as_mut() {
            let _ = handle.set_volume(Volume::Amplitude(volume as f64), tween(0.2));
        }
    }

    /// React to one event from the game's outbox. Mode changes go through
    /// the [`SceneHooks`] impl.
    pub fn handle(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Sound(cue) => self.play(cue.name(), SoundConfig::default()),
            GameEvent::Music { track, volume } => self.play_music(track.file(), *volume, 0.5),
            GameEvent::StopMusic { fade_secs } => self.stop_music(*fade_secs),
            GameEvent::Entered(mode) => self.on_enter(*mode),
            GameEvent::Exited(mode) => self.on_exit(*mode),
            GameEvent::Hint(_) | GameEvent::Quit => {}
        }
    }
}

/// Ducks the music under the pause screen.
impl SceneHooks for AudioContext {
    fn on_enter(&mut self, mode: Mode) {
        if mode == Mode::Paused {
            self.set_music_level(PAUSED_MUSIC_FACTOR);
        }
    }

    fn on_exit(&mut self, mode: Mode) {
        if mode == Mode::Paused {
            self.set_music_level(1.0);
        }
    }
}

impl Default for AudioContext {
    fn default() -> Self { Self::new() }
}

fn tween(secs: f32) -> Tween {
    Tween { duration: Duration::from_secs_f32(secs.max(0.0)), ..Default::default() }
}
