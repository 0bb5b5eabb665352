use crate::math::{hex_to_rgb, Rgb};
use crate::uniforms::{ShaderProgram, ShaderUniforms};

/// Which faces a material draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Blending {
    #[default]
    Normal,
    Additive,
}

/// Flat color with opacity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub color: Rgb,
    pub opacity: f32,
    pub transparent: bool,
}

impl Surface {
    pub fn new(color: Rgb, opacity: f32) -> Self {
        Self {
            color,
            opacity,
            transparent: opacity < 1.0,
        }
    }
}

/// Lit surface with an emissive term
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phong {
    pub surface: Surface,
    pub emissive: Rgb,
    pub emissive_intensity: f32,
    pub wireframe: bool,
    pub flat_shading: bool,
    pub shininess: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSprites {
    pub size: f32,
    pub vertex_colors: bool,
    pub opacity: f32,
    pub blending: Blending,
}

/// Custom program fed with elapsed time every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaderMaterial {
    pub program: ShaderProgram,
    pub uniforms: ShaderUniforms,
    pub side: Side,
    pub blending: Blending,
    pub transparent: bool,
    pub depth_test: bool,
    pub depth_write: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Basic(Surface),
    Phong(Phong),
    Line(Surface),
    Points(PointSprites),
    Shader(ShaderMaterial),
}

impl Material {
    pub fn basic(hex: u32, opacity: f32) -> Self {
        Self::Basic(Surface::new(hex_to_rgb(hex), opacity))
    }

    pub fn basic_rgb(color: Rgb, opacity: f32) -> Self {
        Self::Basic(Surface::new(color, opacity))
    }

    /// Phong material whose emissive color matches its base color
    pub fn glowing(hex: u32, emissive_intensity: f32, opacity: f32) -> Self {
        Self::phong(hex, hex, emissive_intensity, opacity)
    }

    pub fn phong(hex: u32, emissive: u32, emissive_intensity: f32, opacity: f32) -> Self {
        Self::phong_rgb(hex_to_rgb(hex), hex_to_rgb(emissive), emissive_intensity, opacity)
    }

    pub fn phong_rgb(color: Rgb, emissive: Rgb, emissive_intensity: f32, opacity: f32) -> Self {
        Self::Phong(Phong {
            surface: Surface::new(color, opacity),
            emissive,
            emissive_intensity,
            wireframe: false,
            flat_shading: false,
            shininess: 30.0,
        })
    }

    pub fn line(hex: u32, opacity: f32) -> Self {
        Self::Line(Surface::new(hex_to_rgb(hex), opacity))
    }

    pub fn line_rgb(color: Rgb, opacity: f32) -> Self {
        Self::Line(Surface::new(color, opacity))
    }

    pub fn points(size: f32, opacity: f32) -> Self {
        Self::Points(PointSprites {
            size,
            vertex_colors: true,
            opacity,
            blending: Blending::Normal,
        })
    }

    /// Additive, depth-test-free material for a point program
    pub fn sprite_program(program: ShaderProgram) -> Self {
        Self::Shader(ShaderMaterial {
            program,
            uniforms: ShaderUniforms::default(),
            side: Side::Front,
            blending: Blending::Additive,
            transparent: true,
            depth_test: false,
            depth_write: true,
        })
    }

    /// Inward-facing transparent shell program
    pub fn shell_program(program: ShaderProgram) -> Self {
        Self::Shader(ShaderMaterial {
            program,
            uniforms: ShaderUniforms::default(),
            side: Side::Back,
            blending: Blending::Normal,
            transparent: true,
            depth_test: true,
            depth_write: true,
        })
    }

    /// Opaque full-screen program drawn behind everything else
    pub fn backdrop_program(program: ShaderProgram) -> Self {
        Self::Shader(ShaderMaterial {
            program,
            uniforms: ShaderUniforms::default(),
            side: Side::Double,
            blending: Blending::Normal,
            transparent: false,
            depth_test: false,
            depth_write: false,
        })
    }

    pub fn wireframe(mut self) -> Self {
        if let Self::Phong(phong) = &mut self {
            phong.wireframe = true;
        }
        self
    }

    pub fn flat(mut self) -> Self {
        if let Self::Phong(phong) = &mut self {
            phong.flat_shading = true;
        }
        self
    }

    pub fn shininess(mut self, shininess: f32) -> Self {
        if let Self::Phong(phong) = &mut self {
            phong.shininess = shininess;
        }
        self
    }

    pub fn without_depth_write(mut self) -> Self {
        if let Self::Shader(shader) = &mut self {
            shader.depth_write = false;
        }
        self
    }

    pub fn opacity(&self) -> f32 {
        match self {
            Self::Basic(s) | Self::Line(s) => s.opacity,
            Self::Phong(p) => p.surface.opacity,
            Self::Points(p) => p.opacity,
            Self::Shader(_) => 1.0,
        }
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        match self {
            Self::Basic(s) | Self::Line(s) => s.opacity = opacity,
            Self::Phong(p) => p.surface.opacity = opacity,
            Self::Points(p) => p.opacity = opacity,
            Self::Shader(_) => {}
        }
    }

    /// Base tint; shader programs compute their own color
    pub fn color(&self) -> Rgb {
        match self {
            Self::Basic(s) | Self::Line(s) => s.color,
            Self::Phong(p) => p.surface.color,
            Self::Points(_) | Self::Shader(_) => [1.0, 1.0, 1.0],
        }
    }

    pub fn is_wireframe(&self) -> bool {
        matches!(self, Self::Phong(Phong { wireframe: true, .. }))
    }

    pub fn blending(&self) -> Blending {
        match self {
            Self::Points(p) => p.blending,
            Self::Shader(s) => s.blending,
            _ => Blending::Normal,
        }
    }

    pub fn shader(&self) -> Option<&ShaderMaterial> {
        match self {
            Self::Shader(s) => Some(s),
            _ => None,
        }
    }

    pub fn shader_mut(&mut self) -> Option<&mut ShaderMaterial> {
        match self {
            Self::Shader(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_below_one_is_transparent() {
        match Material::basic(0x00ffff, 0.6) {
            Material::Basic(s) => assert!(s.transparent),
            other => panic!("unexpected {:?}", other),
        }
        match Material::basic(0x00ffff, 1.0) {
            Material::Basic(s) => assert!(!s.transparent),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn wireframe_only_touches_phong() {
        assert!(Material::glowing(0xff00ff, 0.3, 0.6).wireframe().is_wireframe());
        assert!(!Material::basic(0xff00ff, 0.6).wireframe().is_wireframe());
    }

    #[test]
    fn set_opacity_round_trips() {
        let mut m = Material::line(0xffffff, 0.5);
        m.set_opacity(0.2);
        assert_eq!(m.opacity(), 0.2);
    }

    #[test]
    fn sprite_program_is_additive_without_depth_test() {
        let m = Material::sprite_program(ShaderProgram::Sparks);
        let shader = m.shader().unwrap();
        assert_eq!(shader.blending, Blending::Additive);
        assert!(!shader.depth_test);
        assert_eq!(shader.uniforms.time, 0.0);
    }
}
