//! Rendering module
//!
//! The game draws through `RenderSurface`, a small immediate-mode API
//! (fill/stroke state plus rect, ellipse, line and text). `draw_frame` never
//! reads back from the surface. `ShapeBatch` is the bundled surface: it
//! tessellates everything into a vertex list for a GPU backend to upload.

pub mod batch;
pub mod shapes;
pub mod vertex;

pub use batch::{ShapeBatch, TextLabel};
pub use vertex::Vertex;

use crate::palette::{self, Rgba};
use crate::sim::effects::powerup_color;
use crate::sim::{GameState, PowerupKind};

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Immediate-mode 2D drawing surface
pub trait RenderSurface {
    /// Clear the whole surface
    fn background(&mut self, color: Rgba);
    fn fill(&mut self, color: Rgba);
    fn no_fill(&mut self);
    fn stroke(&mut self, color: Rgba, weight: f32);
    fn no_stroke(&mut self);
    /// Rectangle by top-left corner and size
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    /// Circle by center and diameter
    fn ellipse(&mut self, x: f32, y: f32, diameter: f32);
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);
    /// Text in the current fill color, `y` at the baseline
    fn text(&mut self, text: &str, x: f32, y: f32, size: f32, align: TextAlign);
}

const HUD_TEXT_SIZE: f32 = 24.0;
const HUD_MARGIN: f32 = 20.0;
const HUD_BASELINE: f32 = 30.0;

/// Icon drawn on a falling powerup
pub fn powerup_glyph(kind: PowerupKind) -> &'static str {
    match kind {
        PowerupKind::Life => "\u{2764}",
        PowerupKind::Expand => "\u{2194}",
        PowerupKind::Speedup => "\u{26A1}",
    }
}

/// Draw one complete frame
pub fn draw_frame<S: RenderSurface + ?Sized>(state: &GameState, surface: &mut S) {
    surface.background(palette::BACKGROUND);
    surface.no_stroke();

    draw_paddle(state, surface);
    draw_ball(state, surface);
    draw_bricks(state, surface);
    draw_powerups(state, surface);
    draw_particles(state, surface);
    draw_hud(state, surface);
}

fn draw_paddle<S: RenderSurface + ?Sized>(state: &GameState, surface: &mut S) {
    let p = &state.paddle;
    surface.fill(palette::PADDLE);
    surface.rect(p.pos.x, p.pos.y, p.width, p.height);
    surface.fill(palette::HIGHLIGHT);
    surface.rect(p.pos.x + 5.0, p.pos.y + 2.0, p.width * 0.8, 4.0);
}

fn draw_ball<S: RenderSurface + ?Sized>(state: &GameState, surface: &mut S) {
    let b = &state.ball;
    surface.fill(palette::BALL);
    surface.ellipse(b.pos.x, b.pos.y, b.radius * 2.0);
    surface.fill(palette::BALL_HIGHLIGHT);
    surface.ellipse(
        b.pos.x - b.radius * 0.3,
        b.pos.y - b.radius * 0.3,
        b.radius * 0.7,
    );
}

fn draw_bricks<S: RenderSurface + ?Sized>(state: &GameState, surface: &mut S) {
    let theme = state.session.theme_index;
    for brick in state.bricks.iter().filter(|b| b.alive) {
        let (x, y, w, h) = (brick.pos.x, brick.pos.y, brick.size.x, brick.size.y);

        surface.fill(palette::brick_color(theme, brick.tier));
        surface.rect(x, y, w, h);

        surface.stroke(palette::BRICK_BORDER, 1.0);
        surface.no_fill();
        surface.rect(x, y, w, h);
        surface.no_stroke();

        surface.fill(palette::BRICK_SHEEN);
        surface.rect(x + 2.0, y + 2.0, w - 4.0, h * 0.4);
    }
}

fn draw_powerups<S: RenderSurface + ?Sized>(state: &GameState, surface: &mut S) {
    for pickup in &state.powerups {
        surface.fill(powerup_color(pickup.kind));
        surface.ellipse(
            pickup.pos.x,
            pickup.pos.y,
            crate::consts::POWERUP_RADIUS * 2.0,
        );
        surface.fill(palette::TEXT);
        surface.text(
            powerup_glyph(pickup.kind),
            pickup.pos.x,
            pickup.pos.y,
            14.0,
            TextAlign::Center,
        );
    }
}

fn draw_particles<S: RenderSurface + ?Sized>(state: &GameState, surface: &mut S) {
    for particle in state.particles.iter() {
        surface.fill(particle.color);
        surface.ellipse(particle.pos.x, particle.pos.y, particle.size);
    }
}

fn draw_hud<S: RenderSurface + ?Sized>(state: &GameState, surface: &mut S) {
    let width = state.field().width;
    let session = &state.session;

    surface.fill(palette::TEXT);
    surface.text(
        &format!("Score: {}", session.score),
        HUD_MARGIN,
        HUD_BASELINE,
        HUD_TEXT_SIZE,
        TextAlign::Left,
    );
    surface.text(
        &format!("Lives: {}", session.lives),
        width - HUD_MARGIN,
        HUD_BASELINE,
        HUD_TEXT_SIZE,
        TextAlign::Right,
    );
    surface.text(
        &format!("Level: {}", session.level),
        width / 2.0,
        HUD_BASELINE,
        HUD_TEXT_SIZE,
        TextAlign::Center,
    );

    // Link from the paddle to the ball right after a hit
    if state.hit_link_visible() {
        let anchor = state.paddle.top_center();
        surface.stroke(palette::HIT_LINK, 2.0);
        surface.line(state.ball.pos.x, state.ball.pos.y, anchor.x, anchor.y);
        surface.no_stroke();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GamePhase, Powerup};
    use glam::Vec2;

    /// Records calls instead of drawing
    #[derive(Default)]
    struct Recorder {
        rects: usize,
        ellipses: usize,
        lines: usize,
        texts: Vec<String>,
    }

    impl RenderSurface for Recorder {
        fn background(&mut self, _color: Rgba) {}
        fn fill(&mut self, _color: Rgba) {}
        fn no_fill(&mut self) {}
        fn stroke(&mut self, _color: Rgba, _weight: f32) {}
        fn no_stroke(&mut self) {}
        fn rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32) {
            self.rects += 1;
        }
        fn ellipse(&mut self, _x: f32, _y: f32, _d: f32) {
            self.ellipses += 1;
        }
        fn line(&mut self, _x1: f32, _y1: f32, _x2: f32, _y2: f32) {
            self.lines += 1;
        }
        fn text(&mut self, text: &str, _x: f32, _y: f32, _size: f32, _align: TextAlign) {
            self.texts.push(text.to_string());
        }
    }

    #[test]
    fn test_frame_draws_every_live_brick() {
        let mut state = GameState::new(3);
        state.bricks[0].alive = false;
        let mut rec = Recorder::default();
        draw_frame(&state, &mut rec);

        let live = state.live_bricks();
        // Paddle body + highlight, then three rects per brick
        assert_eq!(rec.rects, 2 + live * 3);
        // Ball + highlight, no particles or pickups yet
        assert_eq!(rec.ellipses, 2);
        assert_eq!(rec.texts, vec!["Score: 0", "Lives: 3", "Level: 1"]);
        assert_eq!(rec.lines, 0);
    }

    #[test]
    fn test_powerup_glyph_and_hit_link() {
        let mut state = GameState::new(3);
        state.powerups.push(Powerup::new(PowerupKind::Expand, Vec2::new(100.0, 100.0)));
        state.session.phase = GamePhase::Playing;
        state.time_secs = 0.5;
        state.session.last_hit_secs = 0.0;

        let mut rec = Recorder::default();
        draw_frame(&state, &mut rec);
        assert!(rec.texts.iter().any(|t| t == powerup_glyph(PowerupKind::Expand)));
        assert_eq!(rec.lines, 1);

        state.time_secs = 1.5;
        let mut rec = Recorder::default();
        draw_frame(&state, &mut rec);
        assert_eq!(rec.lines, 0);
    }
}
