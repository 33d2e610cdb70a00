use std::error::Error;
use std::sync::Arc;

use log::{info, warn};
use software3d::prelude::*;

const VIEW_PLANE_Z: f64 = 1.0;
const CAMERA_YAW: f64 = -20.0;
const SPECULAR_EXPONENT: f64 = 20.0;

/// Command line: `software3d [OUTPUT.png] [FRAMES] [MODEL.obj]`.
///
/// The window build only looks at `MODEL.obj`.
#[cfg_attr(feature = "window", allow(dead_code))]
struct Args {
    output: String,
    frames: u32,
    model: Option<String>,
}

impl Args {
    fn parse() -> Result<Self, Box<dyn Error>> {
        let mut args = std::env::args().skip(1);
        let output = args.next().unwrap_or_else(|| "render.png".to_string());
        let frames = match args.next() {
            Some(n) => n.parse()?,
            None => 1,
        };
        Ok(Self {
            output,
            frames,
            model: args.next(),
        })
    }
}

/// The spinning model: the OBJ at `path` when it loads, a cube otherwise.
fn spinner_mesh(path: Option<&str>) -> Mesh {
    let color = Vec3::from_rgb8(0, 180, 0);
    match path.map(|p| Mesh::from_obj(p, color)) {
        Some(Ok(mesh)) => mesh,
        Some(Err(err)) => {
            warn!("falling back to a cube: {err}");
            Mesh::cube(1.0, color)
        }
        None => Mesh::cube(1.0, color),
    }
}

/// Demo scene: a flat-shaded cube, a spinning model, a floor and two lights.
fn build_scene(model: Option<&str>) -> Result<(SceneGraph, NodeId), SceneGraphError> {
    let mut graph = SceneGraph::new();

    let camera = graph.add_child(
        ROOT_NAME,
        "camera",
        GameObject::camera("mainCamera"),
        Transform::from_translation(Vec3::new(1.5, 1.0, -3.0)),
    )?;
    graph.cumulate_before_local(
        camera,
        &Transform::from_rotation(Quaternion::from_axis_angle(Vec3::UP, CAMERA_YAW)),
    )?;

    let cube = Arc::new(Mesh::cube(2.0, Vec3::from_rgb8(180, 25, 25)));
    let spinner = Arc::new(spinner_mesh(model));
    let floor = Arc::new(Mesh::quad(1.0, Vec3::from_rgb8(70, 50, 30)));

    graph.add_child(
        ROOT_NAME,
        "cube",
        ModelObject::new("cubeObj", cube)
            .with_specular_exponent(SPECULAR_EXPONENT)
            .into(),
        Transform::IDENTITY,
    )?;
    let spinner = graph.add_child(
        ROOT_NAME,
        "spinner",
        ModelObject::new("spinnerObj", spinner)
            .with_specular_exponent(SPECULAR_EXPONENT)
            .into(),
        Transform::from_translation(Vec3::new(3.0, 1.0, 3.0)),
    )?;
    graph.cumulate_before_local(
        spinner,
        &Transform::from_rotation(Quaternion::from_euler(20.0, 20.0, 0.0)),
    )?;
    let mut floor_local = Transform::from_scaling(10.0);
    floor_local
        .set_rotation(Quaternion::from_axis_angle(Vec3::RIGHT, 90.0))
        .translate(Vec3::new(0.0, -1.0, 2.0));
    graph.add_child(
        ROOT_NAME,
        "floor",
        ModelObject::new("floorObj", floor)
            .with_ignore_specular(true)
            .into(),
        floor_local,
    )?;

    let falloff = Falloff::Linear { range: 50.0 };
    graph.add_child(
        ROOT_NAME,
        "light1",
        LightObject::new("light1", Vec3::from_rgb8(150, 150, 150), falloff.clone()).into(),
        Transform::from_translation(Vec3::new(0.0, 5.0, 0.0)),
    )?;
    graph.add_child(
        ROOT_NAME,
        "light2",
        LightObject::new("light2", Vec3::from_rgb8(80, 150, 20), falloff).into(),
        Transform::from_translation(Vec3::new(2.0, 2.0, 2.0)),
    )?;

    Ok((graph, camera))
}

fn animate(graph: &mut SceneGraph) -> Result<(), SceneGraphError> {
    let Some(spinner) = graph.node_id("spinner") else {
        return Ok(());
    };
    let mut spin = Transform::IDENTITY;
    spin.rotate(Quaternion::from_axis_angle(Vec3::RIGHT, 1.0))
        .rotate(Quaternion::from_axis_angle(Vec3::UP, 0.3));
    graph.cumulate_before_local(spinner, &spin)
}

#[cfg(feature = "window")]
fn run(mut graph: SceneGraph, camera: NodeId, _args: &Args) -> Result<(), Box<dyn Error>> {
    use std::time::Duration;

    use software3d::window::{FrameLimiter, Window, WindowEvent, FPS, WINDOW_HEIGHT, WINDOW_WIDTH};

    let mut window = Window::new("software3d", WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let mut renderer = Renderer::new(camera, VIEW_PLANE_Z, WINDOW_WIDTH, WINDOW_HEIGHT);
    let mut camera_state = CameraState::new(CAMERA_YAW, 0.0);
    let mut limiter = FrameLimiter::new(FPS);
    let mut frames = 0u32;
    let mut elapsed = Duration::ZERO;

    loop {
        for event in window.poll_events() {
            match event {
                WindowEvent::Quit => return Ok(()),
                WindowEvent::Resized { width, height } => {
                    window.resize(width, height)?;
                    renderer.resize(width, height);
                }
                WindowEvent::RenderMode(mode) => {
                    info!("switching to {mode:?} rendering");
                    renderer.set_render_mode(mode);
                }
            }
        }

        animate(&mut graph)?;
        window.present(renderer.render_scene_graph(&graph))?;
        camera_state.apply(&mut graph, camera, &window.camera_input())?;

        elapsed += limiter.wait();
        frames += 1;
        if frames == FPS {
            info!("avg frame time: {:?} ({})", elapsed / frames, renderer.stats());
            frames = 0;
            elapsed = Duration::ZERO;
        }
    }
}

/// Renders `frames` animated frames (at least one); the last one stays in
/// `renderer.image()`.
#[cfg_attr(feature = "window", allow(dead_code))]
fn render_frames(
    renderer: &mut Renderer,
    graph: &mut SceneGraph,
    frames: u32,
) -> Result<(), SceneGraphError> {
    for _ in 1..frames {
        renderer.render_scene_graph(graph);
        animate(graph)?;
    }
    renderer.render_scene_graph(graph);
    Ok(())
}

/// Renders `args.frames` frames off screen and writes the last one to
/// `args.output`.
#[cfg(not(feature = "window"))]
fn run(mut graph: SceneGraph, camera: NodeId, args: &Args) -> Result<(), Box<dyn Error>> {
    use std::time::Instant;

    const WIDTH: u32 = 800;
    const HEIGHT: u32 = 600;

    let mut renderer = Renderer::new(camera, VIEW_PLANE_Z, WIDTH, HEIGHT);
    let start = Instant::now();
    render_frames(&mut renderer, &mut graph, args.frames)?;
    let frames = args.frames.max(1);
    info!(
        "rendered {frames} frame(s) in {:.1} ms per frame ({})",
        start.elapsed().as_secs_f64() * 1000.0 / f64::from(frames),
        renderer.stats()
    );

    renderer.image().save_png(&args.output)?;
    info!("wrote {}", args.output);
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse()?;
    let (graph, camera) = build_scene(args.model.as_deref())?;
    log::debug!("scene graph:\n{graph}");
    run(graph, camera, &args)
}
