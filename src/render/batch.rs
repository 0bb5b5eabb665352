use std::collections::HashMap;

use glam::{Mat3, Mat4, Vec3};

use super::tessellate::{grid_lines, tessellate, Mesh};
use crate::math::Rgb;
use crate::scene::{Blending, Material, Node, NodeId, NodeKind, PointCloud, SceneGraph};
use crate::scenes::Lighting;
use crate::types::{ColorVertex, ParticleInstance, ShellVertex};
use crate::uniforms::ShaderProgram;

/// Tessellated geometry, built once per mesh node
#[derive(Debug, Clone)]
struct CachedMesh {
    mesh: Mesh,
    edges: Option<Vec<(Vec3, Vec3)>>,
}

/// Local-space meshes keyed by node; geometry never changes after building
#[derive(Debug, Default)]
pub struct MeshCache {
    meshes: HashMap<NodeId, CachedMesh>,
}

impl MeshCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    fn get(&mut self, id: NodeId, node: &Node) -> Option<&CachedMesh> {
        let NodeKind::Mesh { geometry, material } = &node.kind else {
            return None;
        };
        Some(self.meshes.entry(id).or_insert_with(|| {
            let mesh = tessellate(geometry);
            let edges = material.is_wireframe().then(|| mesh.edges());
            CachedMesh { mesh, edges }
        }))
    }
}

/// Instanced sprites sharing one pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteBatch {
    /// `None` draws plain square points
    pub program: Option<ShaderProgram>,
    pub additive: bool,
    pub depth_test: bool,
    pub instances: Vec<ParticleInstance>,
}

/// Triangles of the shells drawn by one program
#[derive(Debug, Clone, PartialEq)]
pub struct ShellBatch {
    pub program: ShaderProgram,
    pub depth_write: bool,
    pub vertices: Vec<ShellVertex>,
}

/// One frame of the graph flattened into world space
#[derive(Debug, Clone, Default)]
pub struct FrameBatch {
    pub opaque: Vec<ColorVertex>,
    pub transparent: Vec<ColorVertex>,
    /// Line list, two vertices per segment
    pub lines: Vec<ColorVertex>,
    pub sprites: Vec<SpriteBatch>,
    pub shells: Vec<ShellBatch>,
    pub backdrop: Option<ShaderProgram>,
    /// Time most recently fed to the shader materials
    pub shader_time: f32,
}

impl FrameBatch {
    pub fn build(graph: &SceneGraph, cache: &mut MeshCache, lighting: &Lighting) -> Self {
        let mut batch = Self::default();
        let mut world = vec![Mat4::IDENTITY; graph.len()];
        let light = lighting.direction.normalize_or_zero();

        for id in graph.walk() {
            let Some(node) = graph.node(id) else {
                continue;
            };
            let parent = node.parent.map_or(Mat4::IDENTITY, |p| world[p.index()]);
            let matrix = parent * node.transform.matrix();
            world[id.index()] = matrix;

            match &node.kind {
                NodeKind::Group => {}
                NodeKind::Mesh { material, .. } => {
                    if let Some(cached) = cache.get(id, node) {
                        batch.push_mesh(cached, material, matrix, lighting, light);
                    }
                }
                NodeKind::Line { points, material } => {
                    let color = premultiplied(material.color(), material.opacity());
                    for pair in points.windows(2) {
                        batch.push_segment(matrix, pair[0], pair[1], color);
                    }
                }
                NodeKind::Grid { size, divisions, material } => {
                    let color = premultiplied(material.color(), material.opacity());
                    for (a, b) in grid_lines(*size, *divisions) {
                        batch.push_segment(matrix, a, b, color);
                    }
                }
                NodeKind::Points { cloud, material } => batch.push_points(cloud, material, matrix),
            }
        }

        batch
    }

    pub fn triangle_count(&self) -> usize {
        (self.opaque.len() + self.transparent.len()) / 3
            + self.shells.iter().map(|s| s.vertices.len() / 3).sum::<usize>()
    }

    pub fn segment_count(&self) -> usize {
        self.lines.len() / 2
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.iter().map(|s| s.instances.len()).sum()
    }

    fn push_segment(&mut self, matrix: Mat4, a: Vec3, b: Vec3, color: [f32; 4]) {
        self.lines.push(ColorVertex::new(matrix.transform_point3(a), color));
        self.lines.push(ColorVertex::new(matrix.transform_point3(b), color));
    }

    fn push_mesh(&mut self, cached: &CachedMesh, material: &Material, matrix: Mat4, lighting: &Lighting, light: Vec3) {
        let mesh = &cached.mesh;

        if let Some(shader) = material.shader() {
            self.shader_time = shader.uniforms.time;
            if shader.program == ShaderProgram::Aurora {
                self.backdrop = Some(ShaderProgram::Aurora);
                return;
            }
            let vertices = mesh
                .triangles()
                .flatten()
                .map(|i| ShellVertex {
                    position: matrix.transform_point3(mesh.positions[i]).to_array(),
                    local: mesh.positions[i].to_array(),
                    uv: mesh.uvs[i].to_array(),
                })
                .collect();
            self.shells.push(ShellBatch {
                program: shader.program,
                depth_write: shader.depth_write,
                vertices,
            });
            return;
        }

        let opacity = material.opacity();
        if let Some(edges) = &cached.edges {
            let color = premultiplied(shade(material, None, lighting, light), opacity);
            for &(a, b) in edges {
                self.push_segment(matrix, a, b, color);
            }
            return;
        }

        let normal_matrix = Mat3::from_mat4(matrix).inverse().transpose();
        let flat = matches!(material, Material::Phong(p) if p.flat_shading);
        let target = if opacity < 1.0 { &mut self.transparent } else { &mut self.opaque };

        for [a, b, c] in mesh.triangles() {
            let corners = [a, b, c].map(|i| matrix.transform_point3(mesh.positions[i]));
            let face_normal = (corners[1] - corners[0]).cross(corners[2] - corners[0]).normalize_or_zero();
            for (k, &i) in [a, b, c].iter().enumerate() {
                let normal = if flat {
                    face_normal
                } else {
                    (normal_matrix * mesh.normals[i]).normalize_or_zero()
                };
                let color = premultiplied(shade(material, Some(normal), lighting, light), opacity);
                target.push(ColorVertex::new(corners[k], color));
            }
        }
    }

    fn push_points(&mut self, cloud: &PointCloud, material: &Material, matrix: Mat4) {
        let (program, additive, depth_test, size, opacity, vertex_colors) = match material {
            Material::Points(p) => (None, p.blending == Blending::Additive, true, Some(p.size), p.opacity, p.vertex_colors),
            Material::Shader(s) => {
                self.shader_time = s.uniforms.time;
                (Some(s.program), s.blending == Blending::Additive, s.depth_test, None, 1.0, true)
            }
            other => (None, false, true, Some(1.0), other.opacity(), false),
        };

        let mut instances = Vec::with_capacity(cloud.len());
        for i in 0..cloud.len() {
            let color = if vertex_colors { cloud.colors[i] } else { material.color() };
            let [r, g, b] = color;
            instances.push(ParticleInstance {
                position: matrix.transform_point3(cloud.positions[i]).to_array(),
                size: size.unwrap_or(cloud.sizes[i]),
                color: [r, g, b, opacity],
            });
        }

        match self
            .sprites
            .iter_mut()
            .find(|s| s.program == program && s.additive == additive && s.depth_test == depth_test)
        {
            Some(existing) => existing.instances.extend(instances),
            None => self.sprites.push(SpriteBatch {
                program,
                additive,
                depth_test,
                instances,
            }),
        }
    }
}

/// Lambert term plus emissive for lit materials; flat color otherwise
fn shade(material: &Material, normal: Option<Vec3>, lighting: &Lighting, light: Vec3) -> Rgb {
    match material {
        Material::Phong(p) => {
            let diffuse = normal.map_or(0.5, |n| n.dot(light).max(0.0));
            let intensity = lighting.ambient + lighting.directional * diffuse;
            let [r, g, b] = p.surface.color;
            let [er, eg, eb] = p.emissive;
            let e = p.emissive_intensity;
            [r * intensity + er * e, g * intensity + eg * e, b * intensity + eb * e]
        }
        other => other.color(),
    }
}

fn premultiplied(color: Rgb, opacity: f32) -> [f32; 4] {
    let [r, g, b] = color;
    [r * opacity, g * opacity, b * opacity, opacity]
}
