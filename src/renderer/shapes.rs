//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Point on a circle of `radius` around `center`
fn on_circle(center: Vec2, radius: f32, theta: f32) -> Vec2 {
    center + Vec2::from_angle(theta) * radius
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;
        let p1 = on_circle(center, radius, theta1);
        let p2 = on_circle(center, radius, theta2);

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        let inner1 = on_circle(center, inner_radius, theta1);
        let outer1 = on_circle(center, outer_radius, theta1);
        let inner2 = on_circle(center, inner_radius, theta2);
        let outer2 = on_circle(center, outer_radius, theta2);

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Axis-aligned rectangle from its top-left corner
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec::new();
    }
    let max = min + size;
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Rectangle outline of thickness `edge`, drawn inside the bounds
pub fn rect_outline(min: Vec2, size: Vec2, edge: f32, color: [f32; 4]) -> Vec<Vertex> {
    let edge = edge.min(size.x / 2.0).min(size.y / 2.0);
    if edge <= 0.0 {
        return Vec::new();
    }
    let mut vertices = Vec::with_capacity(24);
    vertices.extend(rect(min, Vec2::new(size.x, edge), color));
    vertices.extend(rect(
        Vec2::new(min.x, min.y + size.y - edge),
        Vec2::new(size.x, edge),
        color,
    ));
    vertices.extend(rect(
        Vec2::new(min.x, min.y + edge),
        Vec2::new(edge, size.y - 2.0 * edge),
        color,
    ));
    vertices.extend(rect(
        Vec2::new(min.x + size.x - edge, min.y + edge),
        Vec2::new(edge, size.y - 2.0 * edge),
        color,
    ));
    vertices
}

/// Wedge pointing along `rotation`, used for the bird's beak
pub fn wedge(tip: Vec2, length: f32, half_width: f32, rotation: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = Vec2::from_angle(rotation);
    let back = tip - dir * length;
    let perp = dir.perp() * half_width;
    let a = back + perp;
    let b = back - perp;
    vec![
        Vertex::new(tip.x, tip.y, color),
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_circle_vertex_count() {
        assert_eq!(circle(Vec2::ZERO, 5.0, WHITE, 16).len(), 48);
        // Degenerate segment counts are bumped to a triangle
        assert_eq!(circle(Vec2::ZERO, 5.0, WHITE, 1).len(), 9);
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let center = Vec2::new(10.0, 20.0);
        for v in circle(center, 5.0, WHITE, 12) {
            let p = Vec2::from(v.position);
            assert!(p.distance(center) <= 5.0 + 1e-4);
        }
    }

    #[test]
    fn test_ring_between_radii() {
        for v in ring(Vec2::ZERO, 8.0, 10.0, WHITE, 12) {
            let d = Vec2::from(v.position).length();
            assert!((8.0 - 1e-4..=10.0 + 1e-4).contains(&d));
        }
    }

    #[test]
    fn test_empty_rect_skipped() {
        assert!(rect(Vec2::ZERO, Vec2::new(0.0, 10.0), WHITE).is_empty());
        assert_eq!(rect(Vec2::ZERO, Vec2::new(4.0, 10.0), WHITE).len(), 6);
        assert_eq!(rect_outline(Vec2::ZERO, Vec2::new(40.0, 10.0), 2.0, WHITE).len(), 24);
    }
}
