//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Convert a 0xRRGGBB color to linear RGBA
pub fn rgba(hex: u32, alpha: f32) -> [f32; 4] {
    let channel = |shift: u32| ((hex >> shift) & 0xFF) as f32 / 255.0;
    [channel(16), channel(8), channel(0), alpha.clamp(0.0, 1.0)]
}

/// Scale the RGB part toward black
pub fn darken(color: [f32; 4], factor: f32) -> [f32; 4] {
    [
        color[0] * factor,
        color[1] * factor,
        color[2] * factor,
        color[3],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_channels() {
        assert_eq!(rgba(0xFF0000, 1.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(rgba(0x00FF00, 2.0)[3], 1.0);
        assert_eq!(rgba(0x0000FF, 0.5), [0.0, 0.0, 1.0, 0.5]);
    }

    #[test]
    fn test_vertex_is_pod() {
        let v = [Vertex::new(1.0, 2.0, [0.0; 4])];
        let bytes: &[u8] = bytemuck::cast_slice(&v);
        assert_eq!(bytes.len(), std::mem::size_of::<Vertex>());
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }
}
