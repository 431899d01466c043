//! Vertex batching surface
//!
//! Collects one frame of draw calls as a triangle list plus text labels.
//! Text is not tessellated; the backend places glyphs from the labels.

use glam::Vec2;

use super::shapes;
use super::vertex::{self, Vertex};
use super::{RenderSurface, TextAlign};
use crate::palette::Rgba;

/// A text draw call
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub pos: Vec2,
    pub size: f32,
    pub align: TextAlign,
    pub color: Rgba,
}

/// `RenderSurface` that tessellates into a vertex list
#[derive(Debug, Clone)]
pub struct ShapeBatch {
    pub clear_color: Rgba,
    vertices: Vec<Vertex>,
    labels: Vec<TextLabel>,
    fill: Option<Rgba>,
    stroke: Option<(Rgba, f32)>,
}

impl Default for ShapeBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeBatch {
    pub fn new() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0, 1.0],
            vertices: Vec::with_capacity(4096),
            labels: Vec::new(),
            fill: Some([1.0; 4]),
            stroke: None,
        }
    }

    /// Triangle list for the frame so far
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Vertex data ready for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        vertex::as_bytes(&self.vertices)
    }

    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

impl RenderSurface for ShapeBatch {
    fn background(&mut self, color: Rgba) {
        self.clear_color = color;
        self.vertices.clear();
        self.labels.clear();
    }

    fn fill(&mut self, color: Rgba) {
        self.fill = Some(color);
    }

    fn no_fill(&mut self) {
        self.fill = None;
    }

    fn stroke(&mut self, color: Rgba, weight: f32) {
        self.stroke = Some((color, weight));
    }

    fn no_stroke(&mut self) {
        self.stroke = None;
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let min = Vec2::new(x, y);
        let size = Vec2::new(w, h);
        if let Some(color) = self.fill {
            self.vertices.extend(shapes::rect(min, size, color));
        }
        if let Some((color, weight)) = self.stroke {
            self.vertices
                .extend(shapes::rect_outline(min, size, weight, color));
        }
    }

    fn ellipse(&mut self, x: f32, y: f32, diameter: f32) {
        let center = Vec2::new(x, y);
        let radius = diameter / 2.0;
        let segments = shapes::circle_segments(radius);
        if let Some(color) = self.fill {
            self.vertices
                .extend(shapes::circle(center, radius, color, segments));
        }
        if let Some((color, weight)) = self.stroke {
            let point = |i: u32| {
                center + Vec2::from_angle(i as f32 / segments as f32 * std::f32::consts::TAU) * radius
            };
            for i in 0..segments {
                self.vertices
                    .extend(shapes::line(point(i), point(i + 1), weight, color));
            }
        }
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        // Lines only use the stroke
        if let Some((color, weight)) = self.stroke {
            self.vertices.extend(shapes::line(
                Vec2::new(x1, y1),
                Vec2::new(x2, y2),
                weight,
                color,
            ));
        }
    }

    fn text(&mut self, text: &str, x: f32, y: f32, size: f32, align: TextAlign) {
        if let Some(color) = self.fill {
            self.labels.push(TextLabel {
                text: text.to_string(),
                pos: Vec2::new(x, y),
                size,
                align,
                color,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::draw_frame;
    use crate::sim::GameState;

    #[test]
    fn test_fill_and_stroke_state() {
        let mut batch = ShapeBatch::new();
        batch.no_fill();
        batch.rect(0.0, 0.0, 10.0, 10.0);
        assert!(batch.vertices().is_empty());

        batch.stroke([1.0; 4], 1.0);
        batch.rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(batch.vertices().len(), 24);

        batch.no_stroke();
        batch.line(0.0, 0.0, 5.0, 5.0);
        assert_eq!(batch.vertices().len(), 24);
    }

    #[test]
    fn test_background_starts_new_frame() {
        let mut batch = ShapeBatch::new();
        batch.rect(0.0, 0.0, 1.0, 1.0);
        batch.text("hi", 0.0, 0.0, 12.0, TextAlign::Left);
        batch.background([0.1, 0.2, 0.3, 1.0]);
        assert!(batch.vertices().is_empty());
        assert!(batch.labels().is_empty());
        assert_eq!(batch.clear_color, [0.1, 0.2, 0.3, 1.0]);
    }

    #[test]
    fn test_full_frame() {
        let state = GameState::new(11);
        let mut batch = ShapeBatch::new();
        draw_frame(&state, &mut batch);
        assert!(batch.triangle_count() > state.live_bricks() * 2);
        assert_eq!(batch.labels().len(), 3);
        assert_eq!(batch.vertex_bytes().len(), batch.vertices().len() * Vertex::STRIDE);

        // Redrawing replaces the previous frame
        let first = batch.vertices().len();
        draw_frame(&state, &mut batch);
        assert_eq!(batch.vertices().len(), first);
    }
}
