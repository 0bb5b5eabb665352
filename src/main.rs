use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use log::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use holo_scenes::animation::{AnimationDriver, FrameTime};
use holo_scenes::camera::{OrbitControls, PerspectiveCamera};
use holo_scenes::cli::Cli;
use holo_scenes::config::Config;
use holo_scenes::core::{Clock, FpsCounter, Throttled, VirtualClock};
use holo_scenes::post::PostChain;
use holo_scenes::render::{FrameBatch, MeshCache, Overlay, Renderer, SceneSnapshot};
use holo_scenes::scene::SceneGraph;
use holo_scenes::uniforms::UniformFeed;

const HEADLESS_HZ: f32 = 60.0;
const FPS_WINDOW: f32 = 1.0;
const STATS_INTERVAL: f32 = 5.0;

/// Step the driver and feed at a fixed virtual rate, no window
fn run_headless(cli: &Cli, config: &Config, mut graph: SceneGraph, seed: u64) -> Result<()> {
    let mut clock = VirtualClock::new(HEADLESS_HZ);
    let mut driver = AnimationDriver::new();
    let mut time = FrameTime::default();
    let mut applied = 0;

    for _ in 0..cli.frames {
        time = clock.tick();
        applied += driver.step(&mut graph, time);
        UniformFeed::push(&mut graph, time.elapsed);
    }

    info!(
        "headless {}: {} frames, {:.2}s virtual, {} motions applied",
        config.showcase, cli.frames, time.elapsed, applied
    );

    if let Some(path) = &cli.snapshot {
        SceneSnapshot::capture(&graph, config.showcase, seed, cli.frames, time).write(path)?;
        info!("snapshot written to {}", path.display());
    }
    Ok(())
}

struct App {
    config: Config,
    seed: u64,
    show_ui: bool,
    graph: SceneGraph,
    meshes: MeshCache,
    driver: AnimationDriver,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    post: PostChain,
    clock: Clock,
    fps: FpsCounter,
    stats_log: Throttled,
}

impl App {
    fn new(config: Config, graph: SceneGraph, seed: u64, show_ui: bool) -> Self {
        let (width, height) = (config.window.width, config.window.height);
        Self {
            camera: PerspectiveCamera::from_config(&config.camera, width, height),
            controls: OrbitControls::from_config(&config.camera),
            post: config.post.chain(width, height),
            config,
            seed,
            show_ui,
            graph,
            meshes: MeshCache::new(),
            driver: AnimationDriver::new(),
            window: None,
            renderer: None,
            clock: Clock::new(),
            fps: FpsCounter::new(FPS_WINDOW),
            stats_log: Throttled::new(STATS_INTERVAL),
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if let Some(renderer) = &mut self.renderer {
            renderer.resize(width, height);
        }
        self.camera.resize(width, height);
        self.post.resize(width, height);
    }

    fn redraw(&mut self) {
        let time = self.clock.tick();
        if let Some(fps) = self.fps.tick(time.delta) {
            info!("FPS: {:.1}", fps);
        }

        self.driver.step(&mut self.graph, time);
        UniformFeed::push(&mut self.graph, time.elapsed);
        self.controls.update(&mut self.camera, time.delta);

        let batch = FrameBatch::build(&self.graph, &mut self.meshes, &self.config.showcase.lighting());
        if self.stats_log.try_tick(time.delta) {
            debug!(
                "frame {}: {} triangles, {} segments, {} sprites, {} cached meshes",
                self.driver.frames(),
                batch.triangle_count(),
                batch.segment_count(),
                batch.sprite_count(),
                self.meshes.len()
            );
        }

        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };
        let (width, height) = renderer.size();
        let frame = self.camera.to_uniform(width, height, batch.shader_time);
        let stats = self.graph.stats();
        let overlay = Overlay {
            showcase: self.config.showcase,
            seed: self.seed,
            fps: self.fps.fps(),
            stats: &stats,
            triangles: batch.triangle_count(),
            sprites: batch.sprite_count(),
        };

        match renderer.render(window, &batch, frame, self.post.uniform(), &overlay) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => renderer.reconfigure(),
            Err(wgpu::SurfaceError::Timeout) => warn!("surface timeout"),
            Err(e) => error!("render error: {}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title(self.config.window.title.as_str())
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.config.window.width,
                    self.config.window.height,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                error!("failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(Renderer::new(
            window.clone(),
            self.config.background_rgb(),
            self.show_ui,
        )) {
            Ok(r) => r,
            Err(e) => {
                error!("failed to initialize renderer: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        let (width, height) = renderer.size();
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.resize(width, height);
        self.clock.reset();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => self.controls.process_keyboard(&event),
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = Config::resolve(cli.config.as_deref(), cli.showcase)?.with_seed(cli.seed);
    let mut rng = config.rng();
    let seed = rng.seed();
    let graph = config.showcase.build(&mut rng);

    if cli.headless {
        return run_headless(&cli, &config, graph, seed);
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, graph, seed, !cli.no_ui);

    info!("controls: WASD or arrows orbit, Escape quits");
    event_loop.run_app(&mut app)?;

    Ok(())
}
