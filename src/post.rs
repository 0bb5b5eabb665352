use log::debug;
use serde::{Deserialize, Serialize};

use crate::math::{luminance, Rgb};
use crate::uniforms::PostUniform;

/// Glow around bright areas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bloom {
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
}

/// Brightness, contrast and saturation grade applied last
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorCorrection {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
}

impl ColorCorrection {
    /// CPU reference of the grading pass, unclamped like the GPU side
    pub fn apply(&self, rgb: Rgb) -> Rgb {
        let graded = rgb.map(|c| (c + self.brightness - 0.5) * self.contrast + 0.5);
        let l = luminance(graded);
        graded.map(|c| l + (c - l) * self.saturation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PostPass {
    Render,
    Bloom(Bloom),
    ColorCorrection(ColorCorrection),
}

/// Ordered full-screen passes run after the scene render
#[derive(Debug, Clone, PartialEq)]
pub struct PostChain {
    passes: Vec<PostPass>,
    width: u32,
    height: u32,
}

impl PostChain {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            passes: vec![PostPass::Render],
            width,
            height,
        }
    }

    /// Chain with the optional passes in their fixed order
    pub fn from_parts(width: u32, height: u32, bloom: Option<Bloom>, grade: Option<ColorCorrection>) -> Self {
        let mut chain = Self::new(width, height);
        chain.passes.extend(bloom.map(PostPass::Bloom));
        chain.passes.extend(grade.map(PostPass::ColorCorrection));
        chain
    }

    pub fn passes(&self) -> &[PostPass] {
        &self.passes
    }

    pub fn bloom(&self) -> Option<Bloom> {
        self.passes.iter().find_map(|p| match p {
            PostPass::Bloom(b) => Some(*b),
            _ => None,
        })
    }

    pub fn color_correction(&self) -> Option<ColorCorrection> {
        self.passes.iter().find_map(|p| match p {
            PostPass::ColorCorrection(c) => Some(*c),
            _ => None,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        debug!("post chain resized to {}x{}", width, height);
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn uniform(&self) -> PostUniform {
        let bloom = self
            .bloom()
            .map(|b| [b.strength, b.radius, b.threshold, 1.0])
            .unwrap_or([0.0; 4]);
        let grade = self
            .color_correction()
            .map(|c| [c.brightness, c.contrast, c.saturation, 1.0])
            .unwrap_or([0.0, 1.0, 1.0, 0.0]);

        PostUniform {
            bloom,
            grade,
            texel: [1.0 / self.width.max(1) as f32, 1.0 / self.height.max(1) as f32],
            _pad: [0.0; 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRADE: ColorCorrection = ColorCorrection {
        brightness: 0.05,
        contrast: 1.2,
        saturation: 1.2,
    };

    #[test]
    fn grade_keeps_grey_grey() {
        let out = GRADE.apply([0.5, 0.5, 0.5]);
        for c in out {
            assert!((c - 0.56).abs() < 1e-5);
        }
    }

    #[test]
    fn saturation_pushes_away_from_luminance() {
        let plain = ColorCorrection {
            brightness: 0.0,
            contrast: 1.0,
            saturation: 1.2,
        };
        let out = plain.apply([1.0, 0.0, 0.0]);
        let l = 0.299;
        assert!((out[0] - (l + (1.0 - l) * 1.2)).abs() < 1e-5);
        assert!((out[1] - (l - l * 1.2)).abs() < 1e-5);
    }

    #[test]
    fn passes_keep_their_order() {
        let bloom = Bloom {
            strength: 1.5,
            radius: 0.4,
            threshold: 0.85,
        };
        let chain = PostChain::from_parts(800, 600, Some(bloom), Some(GRADE));
        assert_eq!(
            chain.passes(),
            &[PostPass::Render, PostPass::Bloom(bloom), PostPass::ColorCorrection(GRADE)]
        );
        assert_eq!(chain.uniform().bloom[3], 1.0);
    }

    #[test]
    fn resize_updates_texel_size() {
        let mut chain = PostChain::new(800, 600);
        chain.resize(1600, 0);
        assert_eq!(chain.size(), (1600, 1));
        let uniform = chain.uniform();
        assert_eq!(uniform.texel, [1.0 / 1600.0, 1.0]);
        assert_eq!(uniform.grade[3], 0.0);
    }
}
