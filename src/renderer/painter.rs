// ── Painter ───────────────────────────────────────────────────────────────────
//
// Turns a `snapshot::Frame` into flat-coloured triangles. World geometry is in
// world units and goes through the camera; screen geometry is in the 1280×720
// layout space and goes through a fixed projection. Pure CPU work, so it is
// tested without a GPU.

use glam::Vec2;

use crate::geometry::Rect;
use crate::palette::{self, Color};
use crate::snapshot::{Frame, Hud, ParticleQuad, Screen, Sprite, SpriteKind};

use super::quad_pipeline::QuadVertex;

pub const LAYOUT: Vec2 = Vec2::new(1280.0, 720.0);

/// Triangles for one frame, split by projection.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Painted {
    pub world: Vec<QuadVertex>,
    pub screen: Vec<QuadVertex>,
}

pub fn paint(frame: &Frame) -> Painted {
    let mut out = Painted::default();
    for sprite in &frame.sprites {
        paint_sprite(&mut out.world, sprite);
    }
    for p in &frame.particles {
        paint_particle(&mut out.world, p);
    }
    if let Some(hud) = &frame.hud {
        paint_hud(&mut out.screen, hud);
    }
    paint_screen(&mut out.screen, &frame.screen);
    out
}

// ── Primitives ────────────────────────────────────────────────────────────────

pub fn push_rect(out: &mut Vec<QuadVertex>, rect: Rect, color: Color) {
    if color.0[3] <= 0.0 || rect.w <= 0.0 || rect.h <= 0.0 {
        return;
    }
    let (a, b) = (rect.min(), rect.max());
    push_corners(out, [a, Vec2::new(b.x, a.y), b, Vec2::new(a.x, b.y)], color);
}

/// Square of side `size` centred on `center`, rotated by `angle` radians.
pub fn push_rotated(out: &mut Vec<QuadVertex>, center: Vec2, size: f32, angle: f32, color: Color) {
    let half = size * 0.5;
    let rot = Vec2::from_angle(angle);
    let corners = [Vec2::new(-half, -half), Vec2::new(half, -half), Vec2::new(half, half), Vec2::new(-half, half)]
        .map(|c| center + rot.rotate(c));
    push_corners(out, corners, color);
}

fn push_corners(out: &mut Vec<QuadVertex>, [a, b, c, d]: [Vec2; 4], color: Color) {
    let v = |p: Vec2| QuadVertex { position: p.to_array(), color: color.0 };
    out.extend_from_slice(&[v(a), v(b), v(c), v(a), v(c), v(d)]);
}

fn push_frame(out: &mut Vec<QuadVertex>, rect: Rect, thickness: f32, color: Color) {
    let t = thickness;
    push_rect(out, Rect::new(rect.x, rect.y, rect.w, t), color);
    push_rect(out, Rect::new(rect.x, rect.y + rect.h - t, rect.w, t), color);
    push_rect(out, Rect::new(rect.x, rect.y, t, rect.h), color);
    push_rect(out, Rect::new(rect.x + rect.w - t, rect.y, t, rect.h), color);
}

// ── World ─────────────────────────────────────────────────────────────────────

fn paint_sprite(out: &mut Vec<QuadVertex>, sprite: &Sprite) {
    let vis = sprite.visual;
    if vis.hidden {
        return;
    }
    if vis.glowing {
        push_rect(out, sprite.rect.inflate(6.0), sprite.tint.with_alpha(0.25));
    }
    let body = if vis.flashing {
        Color::WHITE
    } else if vis.charging {
        sprite.tint.lerp(palette::BOLT_BLUE, 0.6)
    } else if vis.dashing {
        sprite.tint.lerp(palette::FLARE_BURN, 0.5)
    } else {
        sprite.tint
    };
    match sprite.kind {
        SpriteKind::Gem(_) | SpriteKind::SpiritBurst | SpriteKind::CasterBolt => {
            let c = sprite.rect.center();
            push_rotated(out, c, sprite.rect.w * std::f32::consts::FRAC_1_SQRT_2 * 1.4, std::f32::consts::FRAC_PI_4, body);
        }
        SpriteKind::Portal(_) => {
            let c = sprite.rect.center();
            push_rect(out, sprite.rect, body.with_alpha(0.35));
            push_rotated(out, c, sprite.rect.w * 0.6, sprite.facing.to_angle(), body);
        }
        _ => push_rect(out, sprite.rect, body),
    }
    if matches!(sprite.kind, SpriteKind::Player | SpriteKind::Enemy(_)) {
        // Eye dot toward the facing direction.
        let c = sprite.rect.center() + sprite.facing * sprite.rect.w * 0.3;
        push_rect(out, Rect::centered(c, 4.0, 4.0), Color::BLACK);
    }
    if vis.alert {
        let top = Vec2::new(sprite.rect.center().x, sprite.rect.y - 8.0);
        push_rect(out, Rect::centered(top, 4.0, 8.0), palette::GEM_YELLOW);
    }
    if vis.placing {
        push_frame(out, sprite.rect.inflate(4.0), 2.0, palette::ALTAR_CRYSTAL);
    }
}

fn paint_particle(out: &mut Vec<QuadVertex>, p: &ParticleQuad) {
    push_rotated(out, p.pos, p.size, p.rotation, p.color);
}

// ── Screen ────────────────────────────────────────────────────────────────────

fn paint_hud(out: &mut Vec<QuadVertex>, hud: &Hud) {
    for i in 0..hud.lives {
        push_rect(out, Rect::new(20.0 + i as f32 * 28.0, 20.0, 20.0, 20.0), palette::DAMAGE_RED);
    }
    for (i, kind) in crate::collectible::GemKind::SPIRIT.into_iter().enumerate() {
        let slot = Rect::new(20.0 + i as f32 * 28.0, 52.0, 20.0, 20.0);
        if hud.gems.contains(&kind) {
            push_rect(out, slot, kind.color());
        } else {
            push_frame(out, slot, 2.0, kind.color().with_alpha(0.5));
        }
    }
    if hud.can_attack {
        push_rect(out, Rect::new(20.0, 84.0, 76.0, 6.0), palette::SPIRIT_CYAN);
    }
    if let Some(health) = hud.boss_health {
        let full = crate::tuning::CASTER_HEALTH.max(1) as f32;
        let bar = Rect::new(LAYOUT.x * 0.5 - 150.0, 20.0, 300.0, 14.0);
        push_rect(out, bar, Color::BLACK.with_alpha(0.6));
        push_rect(out, Rect::new(bar.x, bar.y, bar.w * health.max(0) as f32 / full, bar.h), palette::GUARDIAN_GREEN);
    }
    if hud.hint.is_some() {
        push_rect(out, Rect::new(240.0, LAYOUT.y - 90.0, 800.0, 50.0), Color::BLACK.with_alpha(0.55));
        push_frame(out, Rect::new(240.0, LAYOUT.y - 90.0, 800.0, 50.0), 2.0, palette::SPIRIT_CYAN);
    }
}

fn full_screen() -> Rect {
    Rect::new(0.0, 0.0, LAYOUT.x, LAYOUT.y)
}

/// Stand-in bar for a line of text, centred at `y`.
fn text_bar(out: &mut Vec<QuadVertex>, text: &str, y: f32, color: Color) {
    let w = (text.chars().count() as f32 * 11.0).min(LAYOUT.x - 80.0);
    push_rect(out, Rect::centered(Vec2::new(LAYOUT.x * 0.5, y), w, 6.0), color);
}

fn paint_screen(out: &mut Vec<QuadVertex>, screen: &Screen) {
    match screen {
        Screen::Playing => {}
        Screen::Menu => {
            push_rect(out, full_screen(), palette::MAP_BG);
            push_rect(out, Rect::centered(LAYOUT * Vec2::new(0.5, 0.4), 600.0, 90.0), palette::SPIRIT_CYAN.with_alpha(0.8));
            push_frame(out, Rect::centered(LAYOUT * Vec2::new(0.5, 0.7), 320.0, 50.0), 3.0, Color::WHITE);
        }
        Screen::WorldMap { markers, can_begin, begin_button } => {
            push_rect(out, full_screen(), palette::MAP_BG);
            for pair in markers.windows(2) {
                let (a, b) = (pair[0].pos, pair[1].pos);
                push_rect(out, Rect::new(a.x, a.y - 2.0, b.x - a.x, 4.0), palette::LOCATION_INACTIVE.with_alpha(0.5));
            }
            for m in markers {
                let color = if m.unlocked { m.color } else { palette::LOCATION_INACTIVE };
                if m.unlocked {
                    let glow = if m.hovered { 0.45 } else { 0.2 };
                    push_rect(out, Rect::centered(m.pos, m.radius * 2.6, m.radius * 2.6), color.with_alpha(glow));
                }
                push_rotated(out, m.pos, m.radius * 1.6, std::f32::consts::FRAC_PI_4, color);
                if m.read {
                    push_rect(out, Rect::centered(m.pos, 10.0, 10.0), Color::WHITE);
                }
            }
            let fill = if *can_begin { palette::BUTTON_ENABLED } else { palette::BUTTON_DISABLED };
            push_rect(out, *begin_button, fill);
            push_frame(out, *begin_button, 3.0, Color::WHITE);
        }
        Screen::Codex { title, lines, close_button } => {
            push_rect(out, full_screen(), Color::BLACK.with_alpha(0.86));
            push_rect(out, crate::world_map::CODEX_PANEL, palette::CODEX_BG);
            text_bar(out, title, 90.0, palette::SPIRIT_CYAN);
            for (i, line) in lines.iter().enumerate() {
                text_bar(out, line, 160.0 + i as f32 * 40.0, Color::WHITE.with_alpha(0.8));
            }
            push_rect(out, *close_button, palette::BUTTON_ENABLED.with_alpha(0.6));
            push_frame(out, *close_button, 3.0, Color::WHITE.with_alpha(0.5));
        }
        Screen::Cutscene { line, alpha } => {
            push_rect(out, full_screen(), Color::rgb8(10, 10, 10));
            match line {
                Some(text) => text_bar(out, text, LAYOUT.y * 0.5, Color::WHITE.with_alpha(*alpha)),
                None => text_bar(out, "ELION - THE LAST LIGHTKEEPER", LAYOUT.y * 0.5, Color::rgb8(255, 255, 180)),
            }
        }
        Screen::Paused => {
            push_rect(out, full_screen(), Color::BLACK.with_alpha(0.5));
            push_rect(out, Rect::centered(LAYOUT * 0.5 - Vec2::new(20.0, 0.0), 16.0, 70.0), Color::WHITE);
            push_rect(out, Rect::centered(LAYOUT * 0.5 + Vec2::new(20.0, 0.0), 16.0, 70.0), Color::WHITE);
        }
        Screen::GameOver { .. } => {
            push_rect(out, full_screen(), palette::DAMAGE_RED.lerp(Color::BLACK, 0.7).with_alpha(0.85));
        }
        Screen::Win { .. } => {
            push_rect(out, full_screen(), palette::GEM_YELLOW.lerp(Color::BLACK, 0.6).with_alpha(0.85));
        }
        Screen::Ending { text, alpha, beam } => {
            push_rect(out, full_screen(), Color::rgb8(5, 10, 20));
            let h = LAYOUT.y * beam;
            push_rect(out, Rect::new(LAYOUT.x * 0.5 - 60.0, 0.0, 120.0, h), palette::SPIRIT_TREE.with_alpha(0.25));
            text_bar(out, text, LAYOUT.y * 0.5, Color::WHITE.with_alpha(*alpha));
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Mode;
    use crate::snapshot::Visual;

    fn frame(screen: Screen, sprites: Vec<Sprite>) -> Frame {
        Frame {
            mode: Mode::Playing,
            camera: Vec2::ZERO,
            zoom: 1.0,
            viewport: Vec2::new(640.0, 360.0),
            background: palette::FOREST_GROUND,
            sprites,
            particles: Vec::new(),
            hud: None,
            screen,
        }
    }

    #[test]
    fn rect_is_two_triangles() {
        let mut out = Vec::new();
        push_rect(&mut out, Rect::new(1.0, 2.0, 3.0, 4.0), Color::WHITE);
        assert_eq!(out.len(), 6);
        assert_eq!(out[2].position, [4.0, 6.0]);
    }

    #[test]
    fn transparent_rect_is_skipped() {
        let mut out = Vec::new();
        push_rect(&mut out, Rect::new(0.0, 0.0, 3.0, 4.0), Color::TRANSPARENT);
        assert!(out.is_empty());
    }

    #[test]
    fn hidden_sprite_draws_nothing() {
        let sprite = Sprite {
            kind: SpriteKind::Player,
            rect: Rect::new(0.0, 0.0, 32.0, 32.0),
            facing: Vec2::X,
            tint: Color::WHITE,
            visual: Visual { hidden: true, ..Visual::default() },
        };
        let painted = paint(&frame(Screen::Playing, vec![sprite]));
        assert!(painted.world.is_empty());
        assert!(painted.screen.is_empty());
    }

    #[test]
    fn menu_fills_the_screen() {
        let painted = paint(&frame(Screen::Menu, Vec::new()));
        assert_eq!(painted.screen[0].position, [0.0, 0.0]);
        assert_eq!(painted.screen[2].position, [1280.0, 720.0]);
    }
}
