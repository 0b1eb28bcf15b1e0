//! The whole game behind one object: input in, simulation step, snapshot out.
//!
//! [`Game`] owns the scene machine and everything a run needs. It never
//! touches a window, GPU or audio device; those collaborators read
//! [`Game::snapshot`] and drain [`Game::drain_events`] once per frame.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::camera::Camera;
use crate::collectible::GemKind;
use crate::companion::{Companion, WisdomEvent};
use crate::config::GameConfig;
use crate::cutscene::{EndingReflection, OpeningCutscene};
use crate::error::Result;
use crate::events::{Cue, GameEvent, Outbox, Track};
use crate::input::{Action, ActionMap, InputState};
use crate::level::{Level, LevelCatalog, LevelId};
use crate::particles::ParticlePool;
use crate::player::{Controls, Player};
use crate::resolver::{resolve_frame, FrameContext, Verdict};
use crate::scene::{Mode, SceneMachine};
use crate::snapshot::{self, Frame, MapMarker, Screen};
use crate::tuning::*;
use crate::world_map::{self, MapClick, WorldMap};

pub struct Game {
    config: GameConfig,
    scene: SceneMachine,
    outbox: Outbox,
    catalog: LevelCatalog,
    bindings: ActionMap<Action>,
    /// Drives every gameplay roll; seeded so a run can be replayed.
    rng: StdRng,
    /// Camera jitter only, so drawing never perturbs the simulation.
    fx_rng: StdRng,
    player: Player,
    companion: Companion,
    level: Option<Level>,
    camera: Camera,
    particles: ParticlePool,
    world_map: WorldMap,
    cutscene: Option<OpeningCutscene>,
    ending: Option<EndingReflection>,
    second_cue_played: bool,
    elapsed: f32,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_catalog(config, LevelCatalog::embedded()?)
    }

    pub fn with_catalog(config: GameConfig, catalog: LevelCatalog) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().r#gen());
        let viewport = config.viewport();
        let first = catalog.get(catalog.first().unwrap_or(LevelId::Forest))?;
        let spawn = Vec2::from(first.spawn);
        let companion = Vec2::from(first.companion);
        let world = Vec2::from(first.world);
        debug!(seed, "game created");

        Ok(Self {
            scene: SceneMachine::new(),
            outbox: Outbox::new(),
            bindings: ActionMap::default_bindings(),
            rng: StdRng::seed_from_u64(seed),
            fx_rng: StdRng::seed_from_u64(seed.wrapping_add(1)),
            player: Player::new(spawn),
            companion: Companion::new(companion),
            level: None,
            camera: Camera::new(viewport, world),
            particles: ParticlePool::new(PARTICLE_POOL_SIZE),
            world_map: WorldMap::new(),
            cutscene: None,
            ending: None,
            second_cue_played: false,
            elapsed: 0.0,
            catalog,
            config,
        })
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.scene.current()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn companion(&self) -> &Companion {
        &self.companion
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn level_mut(&mut self) -> Option<&mut Level> {
        self.level.as_mut()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn particles(&self) -> &ParticlePool {
        &self.particles
    }

    pub fn world_map(&self) -> &WorldMap {
        &self.world_map
    }

    pub fn cutscene(&self) -> Option<&OpeningCutscene> {
        self.cutscene.as_ref()
    }

    pub fn ending(&self) -> Option<&EndingReflection> {
        self.ending.as_ref()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Events produced since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.outbox.drain().collect()
    }

    // ── Frame ───────────────────────────────────────────────────────────────

    /// One step: react to this frame's input, then advance by `dt` seconds.
    pub fn frame(&mut self, input: &InputState, dt: f32) {
        let dt = dt.clamp(0.0, self.config.max_frame_dt);
        self.handle_input(input);
        self.update(input, dt);
    }

    fn pressed(&self, action: Action, input: &InputState) -> bool {
        self.bindings.is_pressed(action, input)
    }

    fn handle_input(&mut self, input: &InputState) {
        let pointer = Vec2::from(input.mouse_pos);
        match self.mode() {
            Mode::Menu => {
                if self.pressed(Action::Confirm, input) {
                    self.outbox.sound(Cue::WorldMapBegin);
                    self.transition(Mode::WorldMap);
                } else if self.pressed(Action::Cancel, input) {
                    info!("quit requested");
                    self.outbox.push(GameEvent::Quit);
                }
            }
            Mode::WorldMap => {
                if input.mouse_moved {
                    self.world_map.hover(pointer);
                }
                if self.pressed(Action::Cancel, input) {
                    self.transition(Mode::Menu);
                } else if self.pressed(Action::Select, input) {
                    match self.world_map.click(pointer) {
                        MapClick::OpenCodex(_) => {
                            self.transition(Mode::CodexView);
                        }
                        MapClick::BeginJourney => {
                            self.outbox.sound(Cue::Start);
                            self.transition(Mode::Cutscene);
                        }
                        MapClick::Nothing => {}
                    }
                }
            }
            Mode::CodexView => {
                let close = self.pressed(Action::Confirm, input)
                    || self.pressed(Action::Cancel, input)
                    || self.pressed(Action::Attack, input)
                    || (self.pressed(Action::Select, input) && world_map::CODEX_CLOSE_BUTTON.contains(pointer));
                if close {
                    self.world_map.close_codex();
                    self.transition(Mode::WorldMap);
                }
            }
            Mode::Cutscene => {
                if self.pressed(Action::Confirm, input) {
                    if let Some(cutscene) = &mut self.cutscene {
                        cutscene.skip();
                    }
                }
            }
            Mode::Playing => {
                if self.pressed(Action::Cancel, input) {
                    self.transition(Mode::Paused);
                }
            }
            Mode::Paused => {
                if self.pressed(Action::Cancel, input) || self.pressed(Action::Confirm, input) {
                    self.transition(Mode::Playing);
                } else if self.pressed(Action::Back, input) {
                    self.transition(Mode::Menu);
                }
            }
            Mode::Win | Mode::GameOver => {
                if self.pressed(Action::Confirm, input) {
                    self.transition(Mode::Menu);
                }
            }
            Mode::Ending => {
                let ready = self.ending.as_ref().is_some_and(EndingReflection::can_dismiss);
                if ready && self.pressed(Action::Confirm, input) {
                    self.transition(Mode::Menu);
                }
            }
        }
    }

    fn update(&mut self, input: &InputState, dt: f32) {
        match self.mode() {
            Mode::Menu | Mode::CodexView | Mode::Paused => {}
            Mode::WorldMap => self.world_map.update(dt),
            Mode::Cutscene => {
                let finished = self.cutscene.as_mut().is_none_or(|c| {
                    c.update(dt);
                    c.is_finished()
                });
                if finished {
                    self.transition(Mode::Playing);
                }
            }
            Mode::Playing => self.update_playing(input, dt),
            Mode::Win | Mode::GameOver => {
                self.particles.update(dt, &mut self.rng);
            }
            Mode::Ending => {
                if let Some(ending) = &mut self.ending {
                    ending.update(dt);
                    if !self.second_cue_played && ending.past_second_cue() {
                        self.second_cue_played = true;
                        self.outbox.sound(Cue::Ending2);
                    }
                }
            }
        }
    }

    fn controls(&self, input: &InputState) -> Controls {
        let held = |action| self.bindings.is_held(action, input);
        Controls {
            up: held(Action::MoveUp),
            down: held(Action::MoveDown),
            left: held(Action::MoveLeft),
            right: held(Action::MoveRight),
            attack: held(Action::Attack),
        }
    }

    fn update_playing(&mut self, input: &InputState, dt: f32) {
        let keys = self.controls(input);
        let Some(level) = self.level.as_mut() else { return };

        if self.player.handle_input(keys, dt, level.world)
            && self.rng.r#gen::<f32>() < WISDOM_ATTACK_CHANCE
        {
            if let Some(line) = self.companion.give_wisdom(WisdomEvent::AttackUsed, &mut self.rng) {
                self.outbox.push(GameEvent::Hint(line.to_owned()));
            }
        }
        self.player.update(dt);
        self.companion.follow(self.player.body.pos);
        self.companion.update(dt);

        let verdict = {
            let mut ctx = FrameContext {
                player: &mut self.player,
                companion: &mut self.companion,
                camera: &mut self.camera,
                particles: &mut self.particles,
                outbox: &mut self.outbox,
                rng: &mut self.rng,
            };
            resolve_frame(level, &mut ctx, dt)
        };

        let altar_lit = level.altar.as_ref().is_some_and(|a| a.is_activated());
        self.camera.set_zoom(if altar_lit { ALTAR_ZOOM } else { 1.0 });
        self.camera.set_target(self.player.body.center());
        self.camera.update(dt);
        self.particles.update(dt, &mut self.rng);
        self.elapsed += dt;

        match verdict {
            Verdict::Continue => {}
            Verdict::Travel(next) => self.start_level(next),
            Verdict::Win => {
                self.transition(Mode::Win);
            }
            Verdict::Ending => {
                self.transition(Mode::Ending);
            }
            Verdict::GameOver => {
                self.transition(Mode::GameOver);
            }
        }
    }

    // ── Transitions ─────────────────────────────────────────────────────────

    /// Move the scene machine and run the game's side of the enter hook.
    /// Returns `false` for an illegal edge, which changes nothing.
    pub fn transition(&mut self, to: Mode) -> bool {
        let from = self.mode();
        if !self.scene.transition(to, &mut self.outbox) {
            return false;
        }
        match to {
            Mode::Menu => self.outbox.push(GameEvent::StopMusic { fade_secs: 0.5 }),
            Mode::WorldMap => self.outbox.push(GameEvent::Music { track: Track::WorldMap, volume: 0.6 }),
            Mode::Cutscene => self.cutscene = Some(OpeningCutscene::new()),
            Mode::Playing if from == Mode::Cutscene => self.start_run(),
            Mode::Ending => {
                self.ending = Some(EndingReflection::new());
                self.second_cue_played = false;
                self.outbox.push(GameEvent::StopMusic { fade_secs: 1.0 });
                self.outbox.sound(Cue::Ending);
            }
            _ => {}
        }
        true
    }

    /// Fresh player and companion, first level, gameplay music.
    fn start_run(&mut self) {
        let first = self.catalog.first().unwrap_or(LevelId::Forest);
        self.player = Player::new(Vec2::ZERO);
        self.companion = Companion::new(Vec2::ZERO);
        self.particles.clear();
        self.elapsed = 0.0;
        self.cutscene = None;
        self.start_level(first);

        if self.world_map.all_read() {
            self.companion.activate_mentor();
            if let Some(line) = self.companion.give_wisdom(WisdomEvent::LevelComplete, &mut self.rng) {
                self.outbox.push(GameEvent::Hint(line.to_owned()));
            }
        }
        self.outbox.push(GameEvent::Music { track: Track::Gameplay, volume: 1.0 });
        info!(mentor = self.companion.is_mentor(), "run started");
    }

    /// Rebuild the level in place. Player identity, score and gems carry over.
    pub fn start_level(&mut self, id: LevelId) {
        let def = match self.catalog.get(id) {
            Ok(def) => def,
            Err(err) => {
                tracing::error!(%err, "cannot start level");
                return;
            }
        };
        let level = Level::spawn(def, &mut self.rng);

        self.player.teleport(level.spawn);
        self.player.bursts_mut().clear();
        if level.grant_missing_gems {
            for kind in GemKind::SPIRIT {
                if !self.player.has_gem(kind) {
                    self.player.collect_gem(kind, kind.color());
                }
            }
        }
        self.companion.reset(level.companion_spawn);
        self.camera.reset(level.world);
        self.level = Some(level);
    }

    // ── Snapshot ────────────────────────────────────────────────────────────

    pub fn snapshot(&mut self) -> Frame {
        let mode = self.mode();
        let viewport = self.camera.viewport();
        let level_id = self.level.as_ref().map(|l| l.id);

        let (sprites, hud, camera, zoom) = match (&self.level, mode.shows_world()) {
            (Some(level), true) => (
                snapshot::world_sprites(level, &self.player, &self.companion),
                Some(snapshot::hud(level, &self.player, &self.companion, self.elapsed)),
                self.camera.offset(&mut self.fx_rng),
                self.camera.zoom,
            ),
            _ => (Vec::new(), None, Vec2::ZERO, 1.0),
        };

        let screen = match mode {
            Mode::Menu => Screen::Menu,
            Mode::WorldMap => Screen::WorldMap {
                markers: self.markers(),
                can_begin: self.world_map.all_read(),
                begin_button: world_map::BEGIN_BUTTON,
            },
            Mode::CodexView => match self.world_map.open_codex() {
                Some(loc) => Screen::Codex {
                    title: loc.codex.title,
                    lines: loc.codex.lines,
                    close_button: world_map::CODEX_CLOSE_BUTTON,
                },
                None => Screen::WorldMap {
                    markers: self.markers(),
                    can_begin: self.world_map.all_read(),
                    begin_button: world_map::BEGIN_BUTTON,
                },
            },
            Mode::Cutscene => Screen::Cutscene {
                line: self.cutscene.as_ref().and_then(OpeningCutscene::line),
                alpha: self.cutscene.as_ref().map_or(0.0, OpeningCutscene::alpha),
            },
            Mode::Playing => Screen::Playing,
            Mode::Paused => Screen::Paused,
            Mode::GameOver => Screen::GameOver { score: self.player.score() },
            Mode::Win => Screen::Win { score: self.player.score(), elapsed: self.elapsed },
            Mode::Ending => {
                let ending = self.ending.clone().unwrap_or_default();
                Screen::Ending { text: ending.text(), alpha: ending.alpha(), beam: ending.beam() }
            }
        };

        let particles = if mode.shows_world() || matches!(mode, Mode::Win | Mode::GameOver) {
            snapshot::particle_quads(&self.particles)
        } else {
            Vec::new()
        };

        Frame {
            mode,
            camera,
            zoom,
            viewport,
            background: snapshot::background(if mode.shows_world() { level_id } else { None }),
            sprites,
            particles,
            hud,
            screen,
        }
    }

    fn markers(&self) -> Vec<MapMarker> {
        let pulse = self.world_map.pulse();
        self.world_map
            .locations()
            .iter()
            .map(|loc| MapMarker {
                name: loc.name,
                pos: loc.pos,
                radius: world_map::LOCATION_RADIUS * pulse,
                color: loc.color,
                unlocked: loc.is_unlocked(),
                read: loc.is_read(),
                hovered: loc.is_hovered(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    fn game() -> Game {
        Game::new(GameConfig::default().with_seed(42)).unwrap()
    }

    fn press(game: &mut Game, key: KeyCode) {
        let mut input = InputState::new();
        input.key_down(key);
        game.frame(&input, 1.0 / 60.0);
    }

    #[test]
    fn starts_in_menu() {
        let game = game();
        assert_eq!(game.mode(), Mode::Menu);
        assert!(game.level().is_none());
    }

    #[test]
    fn enter_opens_world_map_with_cue() {
        let mut game = game();
        press(&mut game, KeyCode::Enter);
        assert_eq!(game.mode(), Mode::WorldMap);
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::Sound(Cue::WorldMapBegin)));
        assert!(events.contains(&GameEvent::Entered(Mode::WorldMap)));
    }

    #[test]
    fn escape_in_menu_requests_quit() {
        let mut game = game();
        press(&mut game, KeyCode::Escape);
        assert_eq!(game.drain_events(), vec![GameEvent::Quit]);
    }

    #[test]
    fn illegal_transition_is_refused() {
        let mut game = game();
        assert!(!game.transition(Mode::Playing));
        assert_eq!(game.mode(), Mode::Menu);
    }
}
