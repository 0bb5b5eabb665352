use holo_scenes::animation::{AnimationDriver, FrameTime};
use holo_scenes::core::VirtualClock;
use holo_scenes::math::SceneRng;
use holo_scenes::render::{FrameBatch, MeshCache};
use holo_scenes::scene::{Motion, NodeKind, SceneGraph};
use holo_scenes::scenes::{DataStream, FloatingElements, Showcase};
use holo_scenes::traits::SceneBuilder;
use holo_scenes::uniforms::UniformFeed;

fn run(graph: &mut SceneGraph, frames: u64) -> FrameTime {
    let mut clock = VirtualClock::new(60.0);
    let mut driver = AnimationDriver::new();
    let mut time = FrameTime::default();
    for _ in 0..frames {
        time = clock.tick();
        driver.step(graph, time);
        UniformFeed::push(graph, time.elapsed);
    }
    assert_eq!(driver.frames(), frames);
    time
}

#[cfg(test)]
mod uniform_feed_tests {
    use super::*;

    #[test]
    fn test_every_shader_sees_elapsed_time() {
        let mut graph = Showcase::Holodeck.build(&mut SceneRng::seeded(5));
        let time = run(&mut graph, 60);
        assert!((time.elapsed - 1.0).abs() < 1e-4);

        for &id in graph.shader_nodes() {
            let material = graph.node(id).unwrap().kind().material().unwrap();
            assert_eq!(material.shader().unwrap().uniforms.time, time.elapsed);
        }
    }

    #[test]
    fn test_batch_carries_shader_time() {
        let mut graph = Showcase::Aurora.build(&mut SceneRng::seeded(5));
        let time = run(&mut graph, 30);

        let batch = FrameBatch::build(&graph, &mut MeshCache::new(), &Showcase::Aurora.lighting());
        assert_eq!(batch.shader_time, time.elapsed);
        assert!(batch.backdrop.is_some());
    }
}

#[cfg(test)]
mod driver_tests {
    use super::*;

    #[test]
    fn test_packets_stay_between_stream_ends() {
        let mut graph = SceneGraph::new();
        DataStream.build(&mut graph, &mut SceneRng::seeded(8));
        run(&mut graph, 400);

        for id in graph.find_all("packet") {
            let node = graph.node(id).unwrap();
            let x = node.transform.position.x;
            assert!((-30.0..=30.0).contains(&x), "packet left its curve: {}", x);
            let Some(Motion::Ride { progress, .. }) = node.motions().first() else {
                panic!("packet should ride");
            };
            assert!((0.0..=1.0).contains(progress));
        }
    }

    #[test]
    fn test_network_links_follow_their_nodes() {
        let mut graph = SceneGraph::new();
        FloatingElements.build(&mut graph, &mut SceneRng::seeded(8));
        run(&mut graph, 90);

        for id in graph.find_all("network link") {
            let node = graph.node(id).unwrap();
            let Some(Motion::Tether { from, to }) = node.motions().iter().find(|m| m.is_deferred()) else {
                panic!("link should be tethered");
            };
            let NodeKind::Line { points, .. } = node.kind() else {
                panic!("link should be a line");
            };
            assert_eq!(points[0], graph.transform(*from).unwrap().position);
            assert_eq!(points[1], graph.transform(*to).unwrap().position);
        }
    }

    #[test]
    fn test_step_reports_applied_motions() {
        let mut graph = Showcase::Constellation.build(&mut SceneRng::seeded(4));
        let animated = graph.animated().len();
        let applied = AnimationDriver::new().step(&mut graph, FrameTime::fixed(1, 60.0));

        assert!(animated > 0);
        assert!(applied >= animated);
    }
}
