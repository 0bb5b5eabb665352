use glam::{Mat4, Vec3};
use log::warn;
use serde::Serialize;

use super::geometry::Geometry;
use super::material::Material;
use super::motion::Motion;
use super::transform::Transform;
use crate::math::Rgb;

/// Handle into a [`SceneGraph`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Per-particle attribute buffers; all three have the same length
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Rgb>,
    pub sizes: Vec<f32>,
}

impl PointCloud {
    pub fn with_capacity(count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(count),
            colors: Vec::with_capacity(count),
            sizes: Vec::with_capacity(count),
        }
    }

    pub fn push(&mut self, position: Vec3, color: Rgb, size: f32) {
        self.positions.push(position);
        self.colors.push(color);
        self.sizes.push(size);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Group,
    Mesh { geometry: Geometry, material: Material },
    Line { points: Vec<Vec3>, material: Material },
    Points { cloud: PointCloud, material: Material },
    /// Square XZ grid of `divisions` cells per side
    Grid { size: f32, divisions: u32, material: Material },
}

impl NodeKind {
    pub fn mesh(geometry: Geometry, material: Material) -> Self {
        Self::Mesh { geometry, material }
    }

    pub fn line(points: Vec<Vec3>, material: Material) -> Self {
        Self::Line { points, material }
    }

    pub fn points(cloud: PointCloud, material: Material) -> Self {
        Self::Points { cloud, material }
    }

    pub fn material(&self) -> Option<&Material> {
        match self {
            Self::Group => None,
            Self::Mesh { material, .. }
            | Self::Line { material, .. }
            | Self::Points { material, .. }
            | Self::Grid { material, .. } => Some(material),
        }
    }

    pub fn material_mut(&mut self) -> Option<&mut Material> {
        match self {
            Self::Group => None,
            Self::Mesh { material, .. }
            | Self::Line { material, .. }
            | Self::Points { material, .. }
            | Self::Grid { material, .. } => Some(material),
        }
    }
}

/// Graph entry; structure, kind and motions change only through [`SceneGraph`]
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) motions: Vec<Motion>,
}

impl Node {
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn motions(&self) -> &[Motion] {
        &self.motions
    }
}

fn is_shader(kind: &NodeKind) -> bool {
    matches!(kind.material(), Some(Material::Shader(_)))
}

/// Node counts by kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SceneStats {
    pub nodes: usize,
    pub groups: usize,
    pub meshes: usize,
    pub lines: usize,
    pub point_clouds: usize,
    pub particles: usize,
    pub grids: usize,
    pub animated: usize,
    pub shader_nodes: usize,
}

/// Retained scene graph stored as an arena
///
/// Besides the tree itself the graph keeps two flat registries: the
/// entities carrying motion descriptors (in the order their first motion
/// was attached) and the nodes whose material is a shader program.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    animated: Vec<NodeId>,
    shaders: Vec<NodeId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a detached node; it stays a root until attached
    pub fn add(&mut self, kind: NodeKind, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        if is_shader(&kind) {
            self.shaders.push(id);
        }
        self.nodes.push(Node {
            name: name.into(),
            kind,
            transform: Transform::IDENTITY,
            parent: None,
            children: Vec::new(),
            motions: Vec::new(),
        });
        self.roots.push(id);
        id
    }

    pub fn add_group(&mut self, name: impl Into<String>) -> NodeId {
        self.add(NodeKind::Group, name)
    }

    /// Add a node directly under `parent`
    pub fn add_child(&mut self, parent: NodeId, kind: NodeKind, name: impl Into<String>) -> NodeId {
        let id = self.add(kind, name);
        self.attach(parent, id);
        id
    }

    fn is_ancestor(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut current = Some(of);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.nodes.get(id.0).and_then(|n| n.parent);
        }
        false
    }

    /// Re-parent `child` under `parent`; refuses to create cycles
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        if parent.0 >= self.nodes.len() || child.0 >= self.nodes.len() {
            warn!("attach with unknown node ({:?} -> {:?})", parent, child);
            return;
        }
        if self.is_ancestor(child, parent) {
            warn!("refusing to attach {:?} under its own descendant {:?}", child, parent);
            return;
        }

        match self.nodes[child.0].parent {
            Some(old) => self.nodes[old.0].children.retain(|&c| c != child),
            None => self.roots.retain(|&r| r != child),
        }

        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn transform(&self, id: NodeId) -> Option<&Transform> {
        self.node(id).map(|n| &n.transform)
    }

    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.node_mut(id).map(|n| &mut n.transform)
    }

    pub(crate) fn material_mut(&mut self, id: NodeId) -> Option<&mut Material> {
        self.node_mut(id).and_then(|n| n.kind.material_mut())
    }

    /// Replace a node's kind, returning the old one; the shader registry follows
    pub fn set_kind(&mut self, id: NodeId, kind: NodeKind) -> Option<NodeKind> {
        let Some(node) = self.nodes.get_mut(id.0) else {
            warn!("set_kind on unknown node {:?}", id);
            return None;
        };
        let shader = is_shader(&kind);
        let previous = std::mem::replace(&mut node.kind, kind);

        match (self.shaders.binary_search(&id), shader) {
            (Err(at), true) => self.shaders.insert(at, id),
            (Ok(at), false) => {
                self.shaders.remove(at);
            }
            _ => {}
        }
        Some(previous)
    }

    /// Place a node; returns the id for chaining in builders
    pub fn place(&mut self, id: NodeId, transform: Transform) -> NodeId {
        if let Some(t) = self.transform_mut(id) {
            *t = transform;
        }
        id
    }

    pub fn set_position(&mut self, id: NodeId, position: Vec3) {
        if let Some(t) = self.transform_mut(id) {
            t.position = position;
        }
    }

    /// Attach a motion descriptor, registering the node as animated
    pub fn animate(&mut self, id: NodeId, motion: Motion) {
        let Some(node) = self.nodes.get_mut(id.0) else {
            warn!("animate on unknown node {:?}", id);
            return;
        };
        if node.motions.is_empty() {
            self.animated.push(id);
        }
        node.motions.push(motion);
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn animated(&self) -> &[NodeId] {
        &self.animated
    }

    pub fn shader_nodes(&self) -> &[NodeId] {
        &self.shaders
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    /// Every node whose name matches, in creation order
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, n)| n.name == name)
            .map(|(i, _)| NodeId(i))
    }

    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut matrix = Mat4::IDENTITY;
        let mut current = Some(id);
        while let Some(node) = current.and_then(|c| self.node(c)) {
            matrix = node.transform.matrix() * matrix;
            current = node.parent;
        }
        matrix
    }

    /// Depth-first, parents before children, roots in insertion order
    pub fn walk(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            stack.extend(self.children(id).iter().rev().copied());
            Some(id)
        })
    }

    pub fn stats(&self) -> SceneStats {
        let mut stats = SceneStats {
            nodes: self.nodes.len(),
            animated: self.animated.len(),
            shader_nodes: self.shaders.len(),
            ..SceneStats::default()
        };

        for node in &self.nodes {
            match &node.kind {
                NodeKind::Group => stats.groups += 1,
                NodeKind::Mesh { .. } => stats.meshes += 1,
                NodeKind::Line { .. } => stats.lines += 1,
                NodeKind::Points { cloud, .. } => {
                    stats.point_clouds += 1;
                    stats.particles += cloud.len();
                }
                NodeKind::Grid { .. } => stats.grids += 1,
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_moves_between_parents() {
        let mut g = SceneGraph::new();
        let a = g.add_group("a");
        let b = g.add_group("b");
        let c = g.add_group("c");

        g.attach(a, c);
        assert_eq!(g.children(a), &[c]);
        assert_eq!(g.roots(), &[a, b]);

        g.attach(b, c);
        assert!(g.children(a).is_empty());
        assert_eq!(g.children(b), &[c]);
        assert_eq!(g.node(c).unwrap().parent, Some(b));
    }

    #[test]
    fn attach_rejects_cycles() {
        let mut g = SceneGraph::new();
        let a = g.add_group("a");
        let b = g.add_child(a, NodeKind::Group, "b");
        g.attach(b, a);
        assert_eq!(g.node(a).unwrap().parent, None);
        assert_eq!(g.children(b), &[] as &[NodeId]);
    }

    #[test]
    fn animated_registry_keeps_first_attach_order() {
        let mut g = SceneGraph::new();
        let a = g.add_group("a");
        let b = g.add_group("b");
        g.animate(b, Motion::spin_y(0.01));
        g.animate(a, Motion::spin_y(0.01));
        g.animate(b, Motion::spin_z(0.01));
        assert_eq!(g.animated(), &[b, a]);
        assert_eq!(g.node(b).unwrap().motions.len(), 2);
    }

    #[test]
    fn set_kind_keeps_shader_registry_in_step() {
        use crate::uniforms::{ShaderProgram, UniformFeed};
        let mut g = SceneGraph::new();
        let first = g.add(NodeKind::mesh(Geometry::sphere(1.0, 8, 8), Material::basic(0xffffff, 1.0)), "first");
        let second = g.add(
            NodeKind::mesh(Geometry::sphere(50.0, 32, 32), Material::shell_program(ShaderProgram::GradientShell)),
            "second",
        );

        let old = g.set_kind(
            first,
            NodeKind::mesh(Geometry::sphere(80.0, 64, 64), Material::shell_program(ShaderProgram::GridShell)),
        );
        assert!(matches!(old, Some(NodeKind::Mesh { .. })));
        assert_eq!(g.shader_nodes(), &[first, second]);
        assert_eq!(UniformFeed::push(&mut g, 3.0), 2);

        g.set_kind(second, NodeKind::Group);
        assert_eq!(g.shader_nodes(), &[first]);
        assert_eq!(g.stats().shader_nodes, 1);

        // re-setting a shader kind does not register twice
        g.set_kind(
            first,
            NodeKind::mesh(Geometry::sphere(80.0, 64, 64), Material::shell_program(ShaderProgram::HexShell)),
        );
        assert_eq!(g.shader_nodes(), &[first]);
        assert!(g.set_kind(NodeId(99), NodeKind::Group).is_none());
    }

    #[test]
    fn world_matrix_composes_parents() {
        let mut g = SceneGraph::new();
        let parent = g.add_group("parent");
        g.set_position(parent, Vec3::new(0.0, 0.0, -30.0));
        let child = g.add_child(parent, NodeKind::Group, "child");
        g.set_position(child, Vec3::new(25.0, 0.0, 0.0));

        let p = g.world_matrix(child).transform_point3(Vec3::ZERO);
        assert!(p.distance(Vec3::new(25.0, 0.0, -30.0)) < 1e-5);
    }

    #[test]
    fn walk_visits_parents_first() {
        let mut g = SceneGraph::new();
        let root = g.add_group("root");
        let a = g.add_child(root, NodeKind::Group, "a");
        let a1 = g.add_child(a, NodeKind::Group, "a1");
        let b = g.add_child(root, NodeKind::Group, "b");
        let other = g.add_group("other");

        let order: Vec<_> = g.walk().collect();
        assert_eq!(order, vec![root, a, a1, b, other]);
    }

    #[test]
    fn shader_nodes_are_registered() {
        use crate::uniforms::ShaderProgram;
        let mut g = SceneGraph::new();
        g.add(NodeKind::mesh(Geometry::sphere(80.0, 64, 64), Material::shell_program(ShaderProgram::GridShell)), "shell");
        g.add(NodeKind::mesh(Geometry::sphere(1.0, 8, 8), Material::basic(0xffffff, 1.0)), "plain");
        assert_eq!(g.shader_nodes().len(), 1);
        assert_eq!(g.stats().shader_nodes, 1);
        assert_eq!(g.stats().meshes, 2);
    }
}
