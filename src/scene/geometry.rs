use glam::Vec3;

/// Parametric mesh description; tessellation happens in the renderer
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// Capped cylinder or frustum along Y, centred on the origin
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
    Cuboid {
        width: f32,
        height: f32,
        depth: f32,
    },
    /// Ring in the XY plane
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    Tetrahedron {
        radius: f32,
        detail: u32,
    },
    Octahedron {
        radius: f32,
        detail: u32,
    },
    Icosahedron {
        radius: f32,
        detail: u32,
    },
    /// Swept circle along a Catmull-Rom spline through `path`
    Tube {
        path: Vec<Vec3>,
        tubular_segments: u32,
        radius: f32,
        radial_segments: u32,
    },
    Plane {
        width: f32,
        height: f32,
    },
}

impl Geometry {
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self::Sphere {
            radius,
            width_segments,
            height_segments,
        }
    }

    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        Self::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
        }
    }

    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Self::Cuboid { width, height, depth }
    }

    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        Self::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
        }
    }

    pub fn tetrahedron(radius: f32, detail: u32) -> Self {
        Self::Tetrahedron { radius, detail }
    }

    pub fn octahedron(radius: f32, detail: u32) -> Self {
        Self::Octahedron { radius, detail }
    }

    pub fn icosahedron(radius: f32, detail: u32) -> Self {
        Self::Icosahedron { radius, detail }
    }

    pub fn tube(path: Vec<Vec3>, tubular_segments: u32, radius: f32, radial_segments: u32) -> Self {
        Self::Tube {
            path,
            tubular_segments,
            radius,
            radial_segments,
        }
    }

    /// Height along Y for shapes that have one, used to stack parts
    pub fn height(&self) -> f32 {
        match self {
            Self::Sphere { radius, .. }
            | Self::Tetrahedron { radius, .. }
            | Self::Octahedron { radius, .. }
            | Self::Icosahedron { radius, .. } => radius * 2.0,
            Self::Cylinder { height, .. } | Self::Cuboid { height, .. } | Self::Plane { height, .. } => *height,
            Self::Torus { radius, tube, .. } => (radius + tube) * 2.0,
            Self::Tube { path, radius, .. } => {
                let (lo, hi) = path
                    .iter()
                    .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
                if path.is_empty() {
                    0.0
                } else {
                    hi - lo + radius * 2.0
                }
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sphere { .. } => "sphere",
            Self::Cylinder { .. } => "cylinder",
            Self::Cuboid { .. } => "cuboid",
            Self::Torus { .. } => "torus",
            Self::Tetrahedron { .. } => "tetrahedron",
            Self::Octahedron { .. } => "octahedron",
            Self::Icosahedron { .. } => "icosahedron",
            Self::Tube { .. } => "tube",
            Self::Plane { .. } => "plane",
        }
    }
}
