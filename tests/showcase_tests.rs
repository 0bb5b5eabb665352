use glam::Vec3;
use holo_scenes::math::SceneRng;
use holo_scenes::scene::{NodeKind, SceneGraph};
use holo_scenes::scenes::{counts, Constellation, NetworkBackground, Showcase, SECTIONS};
use holo_scenes::traits::SceneBuilder;

fn positions(graph: &SceneGraph) -> Vec<Vec3> {
    graph
        .walk()
        .map(|id| graph.node(id).unwrap().transform.position)
        .collect()
}

#[cfg(test)]
mod determinism_tests {
    use super::*;

    #[test]
    fn test_same_seed_same_layout() {
        for showcase in [Showcase::Holodeck, Showcase::Constellation, Showcase::Aurora] {
            let a = showcase.build(&mut SceneRng::seeded(7));
            let b = showcase.build(&mut SceneRng::seeded(7));

            assert_eq!(a.stats(), b.stats(), "{} stats should match", showcase);
            assert_eq!(positions(&a), positions(&b), "{} layout should match", showcase);
        }
    }

    #[test]
    fn test_different_seed_different_layout() {
        let a = Showcase::Holodeck.build(&mut SceneRng::seeded(1));
        let b = Showcase::Holodeck.build(&mut SceneRng::seeded(2));

        assert_ne!(positions(&a), positions(&b));
    }
}

#[cfg(test)]
mod holodeck_tests {
    use super::*;

    #[test]
    fn test_fixed_structure_counts() {
        let graph = Showcase::Holodeck.build(&mut SceneRng::seeded(42));

        assert_eq!(graph.find_all("bridge").count(), counts::ISLAND_COUNT - 1);
        assert_eq!(graph.find_all("energy beam").count(), counts::ISLAND_COUNT);
        assert_eq!(graph.find_all("core ring").count(), counts::CORE_RING_COUNT);
        assert_eq!(graph.find_all("node").count(), counts::BACKGROUND_NODE_COUNT);
    }

    #[test]
    fn test_shader_driven_materials() {
        let graph = Showcase::Holodeck.build(&mut SceneRng::seeded(42));
        let stats = graph.stats();

        // hex, gradient and grid shells plus the two sprite fields
        assert_eq!(stats.shader_nodes, 5);
        assert!(stats.particles >= counts::FIELD_COUNT + counts::GLOW_COUNT);
        assert!(stats.animated > 0);
    }

    #[test]
    fn test_background_links_respect_cutoff() {
        let mut graph = SceneGraph::new();
        NetworkBackground.build(&mut graph, &mut SceneRng::seeded(3));

        for id in graph.find_all("link") {
            let NodeKind::Line { points, material } = graph.node(id).unwrap().kind() else {
                panic!("link should be a line");
            };
            let distance = points[0].distance(points[1]);
            assert!(distance < counts::BACKGROUND_LINK_DISTANCE);
            let expected = (1.0 - distance / counts::BACKGROUND_LINK_DISTANCE) * 0.5;
            assert!((material.opacity() - expected).abs() < 1e-5);
        }
    }
}

#[cfg(test)]
mod constellation_tests {
    use super::*;

    #[test]
    fn test_section_node_counts() {
        let mut graph = SceneGraph::new();
        Constellation.build(&mut graph, &mut SceneRng::seeded(11));

        let expected: usize = SECTIONS.iter().map(|s| s.count).sum();
        assert_eq!(graph.find_all("node").count(), expected);
        assert_eq!(graph.find_all("glow").count(), expected);
        assert_eq!(graph.find_all("section").count(), SECTIONS.len());
    }

    #[test]
    fn test_links_take_nearest_in_scan_order_within_budget() {
        let mut graph = SceneGraph::new();
        let root = Constellation.build(&mut graph, &mut SceneRng::seeded(11));

        for &section in graph.children(root) {
            let mut nodes = Vec::new();
            let mut links = Vec::new();
            for &child in graph.children(section) {
                let node = graph.node(child).unwrap();
                match node.kind() {
                    NodeKind::Line { points, .. } => links.push((points[0], points[1])),
                    _ if node.name == "node" => nodes.push(node.transform.position),
                    _ => {}
                }
            }

            let mut total = 0;
            for (i, &a) in nodes.iter().enumerate() {
                let targets: Vec<Vec3> = links.iter().filter(|(from, _)| *from == a).map(|&(_, to)| to).collect();
                assert!(targets.len() <= 3, "node {} drew {} links", i, targets.len());

                let in_range: Vec<Vec3> = nodes
                    .iter()
                    .enumerate()
                    .filter(|&(j, &b)| j != i && a.distance(b) < counts::CONSTELLATION_LINK_DISTANCE)
                    .map(|(_, &b)| b)
                    .collect();
                assert_eq!(targets, in_range[..targets.len()].to_vec());
                if targets.len() < 2 {
                    assert_eq!(targets.len(), in_range.len());
                }
                total += targets.len();
            }
            assert_eq!(total, links.len());
        }
    }

    #[test]
    fn test_links_are_short() {
        let graph = Showcase::Constellation.build(&mut SceneRng::seeded(11));

        for id in graph.find_all("link") {
            let NodeKind::Line { points, .. } = graph.node(id).unwrap().kind() else {
                panic!("link should be a line");
            };
            assert!(points[0].distance(points[1]) < counts::CONSTELLATION_LINK_DISTANCE);
        }
    }
}

#[cfg(test)]
mod aurora_tests {
    use super::*;

    #[test]
    fn test_single_backdrop() {
        let graph = Showcase::Aurora.build(&mut SceneRng::seeded(0));
        let stats = graph.stats();

        assert_eq!(stats.nodes, 1);
        assert_eq!(stats.shader_nodes, 1);
        assert!(graph.find("aurora backdrop").is_some());
    }
}
