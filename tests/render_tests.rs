use glam::Vec3;
use holo_scenes::math::{CatmullRom, Curve, Path, SceneRng};
use holo_scenes::render::{tessellate, FrameBatch, MeshCache};
use holo_scenes::scene::Geometry;
use holo_scenes::scenes::{counts, Showcase};

#[cfg(test)]
mod tessellation_tests {
    use super::*;

    #[test]
    fn test_sphere_vertices_lie_on_radius() {
        let mesh = tessellate(&Geometry::sphere(2.5, 16, 12));
        assert!(mesh.triangle_count() > 0);
        for p in &mesh.positions {
            assert!((p.length() - 2.5).abs() < 1e-4);
        }
    }

    #[test]
    fn test_tube_follows_path() {
        let path = vec![Vec3::ZERO, Vec3::new(5.0, 2.0, 0.0), Vec3::new(10.0, 0.0, 0.0)];
        let mesh = tessellate(&Geometry::tube(path.clone(), 20, 0.1, 8));
        let spline = Path::new(CatmullRom::new(path));

        // every ring vertex sits one radius away from some sample of the spine
        let spine = spline.spaced_points(20);
        for p in &mesh.positions {
            let nearest = spine.iter().map(|s| s.distance(*p)).fold(f32::MAX, f32::min);
            assert!(nearest < 0.1 + 1e-3);
        }
        assert!(spline.curve().point(1.0).distance(Vec3::new(10.0, 0.0, 0.0)) < 1e-4);
    }
}

#[cfg(test)]
mod batch_tests {
    use super::*;

    #[test]
    fn test_holodeck_batch_contents() {
        let graph = Showcase::Holodeck.build(&mut SceneRng::seeded(21));
        let mut cache = MeshCache::new();
        let batch = FrameBatch::build(&graph, &mut cache, &Showcase::Holodeck.lighting());

        assert!(batch.triangle_count() > 0);
        assert!(batch.segment_count() > 0);
        assert!(batch.sprite_count() >= counts::FIELD_COUNT + counts::GLOW_COUNT);
        assert_eq!(batch.shells.len(), 3);
        assert!(batch.backdrop.is_none());
        assert!(!cache.is_empty());
    }

    #[test]
    fn test_cache_is_reused_across_frames() {
        let graph = Showcase::Constellation.build(&mut SceneRng::seeded(21));
        let mut cache = MeshCache::new();
        let lighting = Showcase::Constellation.lighting();

        let first = FrameBatch::build(&graph, &mut cache, &lighting);
        let cached = cache.len();
        let second = FrameBatch::build(&graph, &mut cache, &lighting);

        assert_eq!(cache.len(), cached);
        assert_eq!(first.triangle_count(), second.triangle_count());
    }

    #[test]
    fn test_premultiplied_colors() {
        let graph = Showcase::Constellation.build(&mut SceneRng::seeded(21));
        let batch = FrameBatch::build(&graph, &mut MeshCache::new(), &Showcase::Constellation.lighting());

        for v in batch.opaque.iter().chain(&batch.transparent).chain(&batch.lines) {
            let [r, g, b, a] = v.color;
            assert!(r <= a + 1e-5 && g <= a + 1e-5 && b <= a + 1e-5);
        }
    }
}
