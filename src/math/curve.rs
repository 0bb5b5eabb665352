use glam::Vec3;

/// Divisions used for arc-length tables unless a caller asks otherwise
pub const ARC_DIVISIONS: usize = 200;

/// Parametric 3D curve over t in [0, 1]
pub trait Curve {
    fn point(&self, t: f32) -> Vec3;

    /// `divisions + 1` evenly spaced samples in parameter space
    fn points(&self, divisions: usize) -> Vec<Vec3> {
        (0..=divisions)
            .map(|d| self.point(d as f32 / divisions as f32))
            .collect()
    }

    /// Cumulative chord lengths at `divisions + 1` parameter samples
    fn length_table(&self, divisions: usize) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut last = self.point(0.0);
        let mut sum = 0.0;
        lengths.push(0.0);

        for d in 1..=divisions {
            let current = self.point(d as f32 / divisions as f32);
            sum += current.distance(last);
            lengths.push(sum);
            last = current;
        }

        lengths
    }

    /// Central-difference tangent, clamped at the ends
    fn tangent(&self, t: f32) -> Vec3 {
        let delta = 0.0001;
        let t1 = (t - delta).max(0.0);
        let t2 = (t + delta).min(1.0);
        (self.point(t2) - self.point(t1)).normalize_or_zero()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezier {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
}

impl QuadraticBezier {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }
}

impl Curve for QuadraticBezier {
    fn point(&self, t: f32) -> Vec3 {
        let k = 1.0 - t;
        self.v0 * (k * k) + self.v1 * (2.0 * k * t) + self.v2 * (t * t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    pub v3: Vec3,
}

impl CubicBezier {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, v3: Vec3) -> Self {
        Self { v0, v1, v2, v3 }
    }
}

impl Curve for CubicBezier {
    fn point(&self, t: f32) -> Vec3 {
        let k = 1.0 - t;
        self.v0 * (k * k * k)
            + self.v1 * (3.0 * k * k * t)
            + self.v2 * (3.0 * k * t * t)
            + self.v3 * (t * t * t)
    }
}

/// Open centripetal Catmull-Rom spline through its control points
#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRom {
    points: Vec<Vec3>,
}

impl CatmullRom {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }
}

/// Cubic coefficients for one segment of a non-uniform Catmull-Rom spline
fn nonuniform_segment(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, dt0: f32, dt1: f32, dt2: f32) -> [Vec3; 4] {
    let mut t1 = (p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1;
    let mut t2 = (p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2;
    t1 *= dt1;
    t2 *= dt1;

    [
        p1,
        t1,
        p1 * -3.0 + p2 * 3.0 - t1 * 2.0 - t2,
        p1 * 2.0 - p2 * 2.0 + t1 + t2,
    ]
}

impl Curve for CatmullRom {
    fn point(&self, t: f32) -> Vec3 {
        let pts = &self.points;
        let l = pts.len();
        match l {
            0 => return Vec3::ZERO,
            1 => return pts[0],
            _ => {}
        }

        let p = (l - 1) as f32 * t.clamp(0.0, 1.0);
        let mut segment = p.floor() as usize;
        let mut weight = p - segment as f32;

        if segment >= l - 1 {
            segment = l - 2;
            weight = 1.0;
        }

        let p1 = pts[segment];
        let p2 = pts[segment + 1];
        let p0 = if segment > 0 {
            pts[segment - 1]
        } else {
            p1 - (p2 - p1)
        };
        let p3 = if segment + 2 < l {
            pts[segment + 2]
        } else {
            p2 + (p2 - p1)
        };

        let mut dt0 = p0.distance_squared(p1).powf(0.25);
        let mut dt1 = p1.distance_squared(p2).powf(0.25);
        let mut dt2 = p2.distance_squared(p3).powf(0.25);
        if dt1 < 1e-4 {
            dt1 = 1.0;
        }
        if dt0 < 1e-4 {
            dt0 = dt1;
        }
        if dt2 < 1e-4 {
            dt2 = dt1;
        }

        let [c0, c1, c2, c3] = nonuniform_segment(p0, p1, p2, p3, dt0, dt1, dt2);
        let w = weight;
        c0 + c1 * w + c2 * (w * w) + c3 * (w * w * w)
    }
}

/// Maps a normalized arc-length position to curve parameter space
#[derive(Debug, Clone, PartialEq)]
pub struct ArcLength {
    lengths: Vec<f32>,
}

impl ArcLength {
    pub fn of(curve: &impl Curve, divisions: usize) -> Self {
        Self {
            lengths: curve.length_table(divisions.max(1)),
        }
    }

    pub fn total(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    pub fn u_to_t(&self, u: f32) -> f32 {
        let count = self.lengths.len();
        let total = self.total();
        if count < 2 || total <= 0.0 {
            return u.clamp(0.0, 1.0);
        }

        let target = u.clamp(0.0, 1.0) * total;
        // Last index whose cumulative length does not exceed the target
        let i = self
            .lengths
            .partition_point(|&len| len <= target)
            .saturating_sub(1)
            .min(count - 2);

        let before = self.lengths[i];
        let after = self.lengths[i + 1];
        let segment = after - before;
        let fraction = if segment > 0.0 {
            (target - before) / segment
        } else {
            0.0
        };

        ((i as f32 + fraction) / (count - 1) as f32).clamp(0.0, 1.0)
    }
}

/// Curve paired with its arc-length table for constant-speed sampling
#[derive(Debug, Clone, PartialEq)]
pub struct Path<C> {
    curve: C,
    arc: ArcLength,
}

impl<C: Curve> Path<C> {
    pub fn new(curve: C) -> Self {
        let arc = ArcLength::of(&curve, ARC_DIVISIONS);
        Self { curve, arc }
    }

    pub fn curve(&self) -> &C {
        &self.curve
    }

    pub fn length(&self) -> f32 {
        self.arc.total()
    }

    pub fn point_at(&self, u: f32) -> Vec3 {
        self.curve.point(self.arc.u_to_t(u))
    }

    pub fn tangent_at(&self, u: f32) -> Vec3 {
        self.curve.tangent(self.arc.u_to_t(u))
    }

    /// `divisions + 1` samples evenly spaced by arc length
    pub fn spaced_points(&self, divisions: usize) -> Vec<Vec3> {
        (0..=divisions)
            .map(|d| self.point_at(d as f32 / divisions as f32))
            .collect()
    }
}

/// Parallel-transport frames along a path: (tangent, normal, binormal) per sample
pub fn transport_frames<C: Curve>(path: &Path<C>, segments: usize) -> Vec<(Vec3, Vec3, Vec3)> {
    let tangents: Vec<Vec3> = (0..=segments)
        .map(|i| path.tangent_at(i as f32 / segments as f32))
        .collect();

    let first = tangents.first().copied().unwrap_or(Vec3::X);
    let axis = if first.x.abs() <= first.y.abs() && first.x.abs() <= first.z.abs() {
        Vec3::X
    } else if first.y.abs() <= first.z.abs() {
        Vec3::Y
    } else {
        Vec3::Z
    };

    let mut normal = first.cross(axis).cross(first).normalize_or_zero();
    let mut frames = Vec::with_capacity(tangents.len());
    frames.push((first, normal, first.cross(normal)));

    for pair in tangents.windows(2) {
        let (prev, tangent) = (pair[0], pair[1]);
        let rotation_axis = prev.cross(tangent);
        if rotation_axis.length() > f32::EPSILON {
            let angle = prev.dot(tangent).clamp(-1.0, 1.0).acos();
            normal = glam::Quat::from_axis_angle(rotation_axis.normalize(), angle) * normal;
        }
        frames.push((tangent, normal, tangent.cross(normal)));
    }

    frames
}
