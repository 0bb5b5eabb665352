//! Geometry tessellation.
//!
//! Turns parametric [`Geometry`] descriptors into indexed triangle meshes in
//! local space. Wireframe materials draw the unique edges of the same mesh.

use std::collections::HashSet;
use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::math::{CatmullRom, Path};
use crate::math::curve::transport_frames;
use crate::scene::Geometry;

/// Indexed triangle mesh in local space
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl Mesh {
    fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            uvs: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    fn push_vertex(&mut self, position: Vec3, normal: Vec3, uv: Vec2) -> u32 {
        self.positions.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
        (self.positions.len() - 1) as u32
    }

    fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
    }

    /// Triangle edges with coincident duplicates removed, keyed by position
    pub fn edges(&self) -> Vec<(Vec3, Vec3)> {
        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for [a, b, c] in self.triangles() {
            for (i, j) in [(a, b), (b, c), (c, a)] {
                let (p, q) = (self.positions[i], self.positions[j]);
                let (kp, kq) = (position_key(p), position_key(q));
                if kp == kq {
                    continue;
                }
                let key = if kp < kq { (kp, kq) } else { (kq, kp) };
                if seen.insert(key) {
                    edges.push((p, q));
                }
            }
        }
        edges
    }
}

fn position_key(p: Vec3) -> [i32; 3] {
    (p * 1e4).round().as_ivec3().to_array()
}

pub fn tessellate(geometry: &Geometry) -> Mesh {
    match geometry {
        Geometry::Sphere {
            radius,
            width_segments,
            height_segments,
        } => sphere(*radius, *width_segments, *height_segments),
        Geometry::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
        } => cylinder(*radius_top, *radius_bottom, *height, *radial_segments),
        Geometry::Cuboid { width, height, depth } => cuboid(Vec3::new(*width, *height, *depth)),
        Geometry::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
        } => torus(*radius, *tube, *radial_segments, *tubular_segments),
        Geometry::Tetrahedron { radius, detail } => polyhedron(&TETRAHEDRON.0, &TETRAHEDRON.1, *radius, *detail),
        Geometry::Octahedron { radius, detail } => polyhedron(&OCTAHEDRON.0, &OCTAHEDRON.1, *radius, *detail),
        Geometry::Icosahedron { radius, detail } => polyhedron(&icosahedron_vertices(), &ICOSAHEDRON_FACES, *radius, *detail),
        Geometry::Tube {
            path,
            tubular_segments,
            radius,
            radial_segments,
        } => tube(path, *tubular_segments, *radius, *radial_segments),
        Geometry::Plane { width, height } => plane(*width, *height),
    }
}

/// Line segments of a square grid in the XZ plane
pub fn grid_lines(size: f32, divisions: u32) -> Vec<(Vec3, Vec3)> {
    let divisions = divisions.max(1);
    let half = size * 0.5;
    let step = size / divisions as f32;
    (0..=divisions)
        .flat_map(|i| {
            let k = -half + i as f32 * step;
            [
                (Vec3::new(-half, 0.0, k), Vec3::new(half, 0.0, k)),
                (Vec3::new(k, 0.0, -half), Vec3::new(k, 0.0, half)),
            ]
        })
        .collect()
}

fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Mesh {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let row = ws + 1;
    let mut mesh = Mesh::with_capacity((row * (hs + 1)) as usize, (ws * hs * 6) as usize);

    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let normal = Vec3::new(
                -(u * TAU).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * TAU).sin() * (v * PI).sin(),
            );
            mesh.push_vertex(normal * radius, normal, Vec2::new(u, 1.0 - v));
        }
    }

    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                mesh.push_triangle(a, b, d);
            }
            if iy != hs - 1 {
                mesh.push_triangle(b, c, d);
            }
        }
    }
    mesh
}

fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Mesh {
    let segments = radial_segments.max(3);
    let row = segments + 1;
    let half = height * 0.5;
    let slope = if height > 0.0 { (radius_bottom - radius_top) / height } else { 0.0 };
    let mut mesh = Mesh::with_capacity((row * 2 + (segments + 1) * 2) as usize, (segments * 12) as usize);

    for y in 0..=1 {
        let v = y as f32;
        let radius = radius_top + (radius_bottom - radius_top) * v;
        for x in 0..=segments {
            let u = x as f32 / segments as f32;
            let (sin, cos) = (u * TAU).sin_cos();
            mesh.push_vertex(
                Vec3::new(radius * sin, half - v * height, radius * cos),
                Vec3::new(sin, slope, cos).normalize(),
                Vec2::new(u, 1.0 - v),
            );
        }
    }
    for x in 0..segments {
        let (a, b, c, d) = (x, row + x, row + x + 1, x + 1);
        mesh.push_triangle(a, b, d);
        mesh.push_triangle(b, c, d);
    }

    for (radius, top) in [(radius_top, true), (radius_bottom, false)] {
        if radius <= 0.0 {
            continue;
        }
        let (y, normal) = if top { (half, Vec3::Y) } else { (-half, Vec3::NEG_Y) };
        let center = mesh.push_vertex(Vec3::new(0.0, y, 0.0), normal, Vec2::splat(0.5));
        let first = center + 1;
        for x in 0..=segments {
            let (sin, cos) = (x as f32 / segments as f32 * TAU).sin_cos();
            mesh.push_vertex(
                Vec3::new(radius * sin, y, radius * cos),
                normal,
                Vec2::new(sin * 0.5 + 0.5, cos * 0.5 + 0.5),
            );
        }
        for x in 0..segments {
            if top {
                mesh.push_triangle(center, first + x, first + x + 1);
            } else {
                mesh.push_triangle(center, first + x + 1, first + x);
            }
        }
    }
    mesh
}

fn cuboid(size: Vec3) -> Mesh {
    const FACES: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    let half = size * 0.5;
    let mut mesh = Mesh::with_capacity(24, 36);

    for (normal, u, v) in FACES {
        let base = mesh.vertex_count() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let corner = (normal + u * su + v * sv) * half;
            mesh.push_vertex(corner, normal, Vec2::new((su + 1.0) * 0.5, (sv + 1.0) * 0.5));
        }
        mesh.push_triangle(base, base + 1, base + 2);
        mesh.push_triangle(base, base + 2, base + 3);
    }
    mesh
}

fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Mesh {
    let radial = radial_segments.max(2);
    let tubular = tubular_segments.max(3);
    let row = tubular + 1;
    let mut mesh = Mesh::with_capacity((row * (radial + 1)) as usize, (radial * tubular * 6) as usize);

    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let position = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            mesh.push_vertex(
                position,
                (position - center).normalize_or_zero(),
                Vec2::new(i as f32 / tubular as f32, j as f32 / radial as f32),
            );
        }
    }

    for j in 1..=radial {
        for i in 1..=tubular {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            mesh.push_triangle(a, b, d);
            mesh.push_triangle(b, c, d);
        }
    }
    mesh
}

const TETRAHEDRON: ([Vec3; 4], [[usize; 3]; 4]) = (
    [
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
    ],
    [[2, 1, 0], [0, 3, 2], [1, 3, 0], [2, 3, 1]],
);

const OCTAHEDRON: ([Vec3; 6], [[usize; 3]; 8]) = (
    [
        Vec3::X,
        Vec3::NEG_X,
        Vec3::Y,
        Vec3::NEG_Y,
        Vec3::Z,
        Vec3::NEG_Z,
    ],
    [
        [0, 2, 4],
        [0, 4, 3],
        [0, 3, 5],
        [0, 5, 2],
        [1, 2, 5],
        [1, 5, 3],
        [1, 3, 4],
        [1, 4, 2],
    ],
);

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

fn icosahedron_vertices() -> [Vec3; 12] {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
}

/// Subdivide each face `detail` times and push the result onto a sphere
///
/// Detail 0 keeps faceted normals; finer levels use smooth ones.
fn polyhedron(vertices: &[Vec3], faces: &[[usize; 3]], radius: f32, detail: u32) -> Mesh {
    let cols = detail as usize + 1;
    let per_face = cols * cols;
    let mut mesh = Mesh::with_capacity(faces.len() * per_face * 3, faces.len() * per_face * 3);

    for &face in faces {
        let [a, b, c] = face.map(|i| vertices[i]);
        let mut rows: Vec<Vec<Vec3>> = Vec::with_capacity(cols + 1);
        for i in 0..=cols {
            let aj = a.lerp(c, i as f32 / cols as f32);
            let bj = b.lerp(c, i as f32 / cols as f32);
            let span = cols - i;
            let row = (0..=span)
                .map(|j| {
                    if span == 0 {
                        aj
                    } else {
                        aj.lerp(bj, j as f32 / span as f32)
                    }
                })
                .collect();
            rows.push(row);
        }

        for i in 0..cols {
            for j in 0..2 * (cols - i) - 1 {
                let k = j / 2;
                let triangle = if j % 2 == 0 {
                    [rows[i][k + 1], rows[i + 1][k], rows[i][k]]
                } else {
                    [rows[i][k + 1], rows[i + 1][k + 1], rows[i + 1][k]]
                };
                push_spherical_triangle(&mut mesh, triangle, radius, detail == 0);
            }
        }
    }
    mesh
}

fn push_spherical_triangle(mesh: &mut Mesh, triangle: [Vec3; 3], radius: f32, faceted: bool) {
    let [p0, p1, p2] = triangle.map(|p| p.normalize() * radius);
    let face_normal = (p1 - p0).cross(p2 - p0).normalize_or_zero();
    let base = mesh.vertex_count() as u32;
    for p in [p0, p1, p2] {
        let normal = if faceted { face_normal } else { p.normalize_or_zero() };
        let direction = p.normalize_or_zero();
        let uv = Vec2::new(
            direction.z.atan2(-direction.x) / TAU + 0.5,
            direction.y.clamp(-1.0, 1.0).asin() / PI + 0.5,
        );
        mesh.push_vertex(p, normal, uv);
    }
    mesh.push_triangle(base, base + 1, base + 2);
}

fn tube(points: &[Vec3], tubular_segments: u32, radius: f32, radial_segments: u32) -> Mesh {
    if points.len() < 2 {
        return Mesh::default();
    }
    let tubular = tubular_segments.max(1);
    let radial = radial_segments.max(3);
    let row = radial + 1;
    let path = Path::new(CatmullRom::new(points.to_vec()));
    let frames = transport_frames(&path, tubular as usize);
    let mut mesh = Mesh::with_capacity((row * (tubular + 1)) as usize, (tubular * radial * 6) as usize);

    for (i, &(_, normal, binormal)) in frames.iter().enumerate() {
        let center = path.point_at(i as f32 / tubular as f32);
        for j in 0..=radial {
            let (sin, cos) = (j as f32 / radial as f32 * TAU).sin_cos();
            let direction = (normal * -cos + binormal * sin).normalize_or_zero();
            mesh.push_vertex(
                center + direction * radius,
                direction,
                Vec2::new(i as f32 / tubular as f32, j as f32 / radial as f32),
            );
        }
    }

    for j in 1..=tubular {
        for i in 1..=radial {
            let a = row * (j - 1) + (i - 1);
            let b = row * j + (i - 1);
            let c = row * j + i;
            let d = row * (j - 1) + i;
            mesh.push_triangle(a, b, d);
            mesh.push_triangle(b, c, d);
        }
    }
    mesh
}

fn plane(width: f32, height: f32) -> Mesh {
    let (hw, hh) = (width * 0.5, height * 0.5);
    let mut mesh = Mesh::with_capacity(4, 6);
    for (x, y) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
        mesh.push_vertex(
            Vec3::new(x * hw, y * hh, 0.0),
            Vec3::Z,
            Vec2::new((x + 1.0) * 0.5, (y + 1.0) * 0.5),
        );
    }
    mesh.push_triangle(0, 1, 2);
    mesh.push_triangle(0, 2, 3);
    mesh
}
