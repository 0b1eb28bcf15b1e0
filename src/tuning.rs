//! Gameplay tuning. Every speed is in world units per second and every
//! duration in seconds, so all integration is `value * dt`.

// ── Frame loop ──────────────────────────────────────────────────────────────

pub const TARGET_UPS: u32 = 60;
/// Upper bound on a single frame's delta; longer stalls are truncated.
pub const MAX_FRAME_DT: f32 = 0.25;

pub const RENDER_WIDTH: f32 = 640.0;
pub const RENDER_HEIGHT: f32 = 360.0;
pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 720;

// ── Sizes ───────────────────────────────────────────────────────────────────

pub const PLAYER_SIZE: f32 = 32.0;
pub const COMPANION_SIZE: f32 = 30.0;
pub const MENTOR_SIZE: f32 = 32.0;
pub const ENEMY_SIZE: f32 = 30.0;
pub const MINI_BOSS_SIZE: f32 = 44.0;
pub const GEM_SIZE: f32 = 22.0;
pub const PORTAL_SIZE: f32 = 52.0;
pub const ALTAR_SIZE: f32 = 120.0;

// ── Player ──────────────────────────────────────────────────────────────────

pub const PLAYER_SPEED: f32 = 150.0;
/// Diagonal movement scales each axis by this factor instead of normalising.
pub const DIAGONAL_FACTOR: f32 = 0.707;
pub const PLAYER_START_LIVES: u32 = 3;
pub const INVINCIBILITY_SECS: f32 = 2.0;
pub const GLOW_SECS: f32 = 3.0;
pub const GEM_SCORE: u32 = 100;
pub const GEM_PLACEMENT_SECS: f32 = 2.0;
pub const REQUIRED_GEMS: usize = 3;

pub const ATTACK_COOLDOWN_SECS: f32 = 0.5;
pub const ATTACK_FLASH_SECS: f32 = 0.1;
pub const SPIRIT_BURST_SPEED: f32 = 280.0;
pub const SPIRIT_BURST_LIFETIME: f32 = 1.2;
pub const SPIRIT_BURST_SIZE: f32 = 12.0;
pub const SPIRIT_BURST_RANGE: f32 = 400.0;

// ── Enemies ─────────────────────────────────────────────────────────────────

pub const ENEMY_PATROL_SPEED: f32 = 80.0;
pub const ENEMY_CHASE_SPEED: f32 = 120.0;

pub const PATROL_WAYPOINT_RADIUS: f32 = 5.0;
pub const PATROL_ALERT_RADIUS: f32 = 100.0;
pub const PATROL_ALERT_SECS: f32 = 0.5;

pub const CHASE_AGGRO_RADIUS: f32 = 150.0;
pub const CHASE_ALERT_SECS: f32 = 0.3;

pub const DASH_HEALTH: i32 = 2;
pub const DASH_TRIGGER_RADIUS: f32 = 200.0;
pub const DASH_ALERT_RADIUS: f32 = 150.0;
pub const DASH_SECS: f32 = 0.3;
pub const DASH_COOLDOWN_SECS: f32 = 2.0;
pub const DASH_INTERRUPT_PENALTY_SECS: f32 = 1.0;
pub const DASH_SPEED_FACTOR: f32 = 1.5;
pub const DASH_WAYPOINT_RADIUS: f32 = 10.0;
pub const DASH_ZIGZAG_RATE: f32 = 3.0;
pub const DASH_ZIGZAG_AMPLITUDE: f32 = 20.0;

pub const CASTER_HEALTH: i32 = 3;
pub const CASTER_MIN_RANGE: f32 = 100.0;
pub const CASTER_ATTACK_RANGE: f32 = 300.0;
pub const CASTER_APPROACH_FACTOR: f32 = 0.7;
/// Approach speed multiplier once the caster is down to its last hit point.
pub const CASTER_ENRAGED_SPEED_FACTOR: f32 = 1.15;
pub const CASTER_CHARGE_SECS: f32 = 1.0;
pub const CASTER_RUNE_GLOW_SECS: f32 = 0.5;
pub const CASTER_HIT_FLASH_SECS: f32 = 0.1;
pub const CASTER_BOLT_SPEED: f32 = 100.0;
pub const CASTER_BOLT_LIFETIME: f32 = 3.0;
pub const CASTER_BOLT_SIZE: f32 = 12.0;
/// Attack cooldown indexed by remaining health (1, 2, 3).
pub const CASTER_COOLDOWN_BY_HEALTH: [f32; 3] = [2.0, 2.5, 3.0];
pub const CASTER_COOLDOWN_REROLL: (f32, f32) = (2.5, 4.0);

pub const KILL_SCORE: u32 = 30;
pub const BOSS_KILL_SCORE: u32 = 50;

// ── Companion ───────────────────────────────────────────────────────────────

pub const COMPANION_FOLLOW_FACTOR: f32 = 0.08;
pub const COMPANION_OFFSET_X: f32 = -40.0;
pub const COMPANION_ALTAR_OFFSET_X: f32 = 60.0;
pub const HINT_SECS: f32 = 3.0;
pub const HINT_COOLDOWN_SECS: f32 = 5.0;
pub const HINT_GLOW_SECS: f32 = 2.0;
pub const WISDOM_SECS: f32 = 4.0;
pub const MENTOR_GLOW_SECS: f32 = 5.0;
/// Per-tick chance of an encounter remark while an enemy is near.
pub const WISDOM_ENCOUNTER_CHANCE: f32 = 0.01;
pub const WISDOM_ENCOUNTER_RADIUS: f32 = 150.0;
/// Per-hit chance of a remark after taking damage.
pub const WISDOM_DAMAGE_CHANCE: f32 = 0.3;
/// Per-shot chance of a mentor line when a spirit burst is fired.
pub const WISDOM_ATTACK_CHANCE: f32 = 0.1;

// ── World objects ───────────────────────────────────────────────────────────

pub const GEM_FLOAT_SPEED: f32 = 100.0;
pub const GEM_ARRIVAL_RADIUS: f32 = 5.0;
pub const ALTAR_SLOT_RADIUS: f32 = 50.0;
pub const ALTAR_REACH: f32 = 20.0;
pub const ALTAR_TREE_DELAY_SECS: f32 = 1.0;
pub const ALTAR_TREE_GROW_SECS: f32 = 3.0;
pub const ALTAR_PORTAL_RISE: f32 = 100.0;
pub const ALTAR_ZOOM: f32 = 0.9;
pub const PORTAL_NEAR_RADIUS: f32 = 80.0;

// ── Camera ──────────────────────────────────────────────────────────────────

pub const CAMERA_SMOOTHING: f32 = 0.08;
pub const CAMERA_ZOOM_SMOOTHING: f32 = 0.03;

// ── Particles ───────────────────────────────────────────────────────────────

pub const PARTICLE_POOL_SIZE: usize = 300;

// ── Screens ─────────────────────────────────────────────────────────────────

pub const CUTSCENE_FADE_SPEED: f32 = 100.0;
pub const CUTSCENE_HOLD_SECS: f32 = 2.0;
/// Ending can be dismissed once this many stages (or fewer) remain.
pub const ENDING_DISMISS_TAIL: usize = 3;
/// The second ending cue fires once the reflection passes this stage.
pub const ENDING_SECOND_CUE_STAGE: usize = 10;
