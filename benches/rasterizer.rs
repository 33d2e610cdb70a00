use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use software3d::clipper::Frustum;
use software3d::prelude::*;
use software3d::render::{raster_triangle, ZBuffer};
use software3d::Triangle;

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn screen_triangle(points: [(f64, f64); 3]) -> Triangle {
    let white = Vec3::from_rgb8(255, 255, 255);
    Triangle::new(points.map(|(x, y)| Vec3::new(x, y, 1.0)), [white; 3])
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    for (name, triangle) in [
        ("small", screen_triangle([(100.0, 100.0), (120.0, 100.0), (110.0, 120.0)])),
        ("medium", screen_triangle([(100.0, 100.0), (300.0, 100.0), (200.0, 300.0)])),
        ("large", screen_triangle([(50.0, 50.0), (750.0, 100.0), (400.0, 550.0)])),
    ] {
        group.bench_with_input(BenchmarkId::new("raster", name), &triangle, |b, tri| {
            let mut image = ImageBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            let mut zbuffer = ZBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| {
                zbuffer.clear();
                raster_triangle(black_box(tri), &mut image, &mut zbuffer)
            });
        });
    }

    group.finish();
}

fn benchmark_many_triangles(c: &mut Criterion) {
    // grid of small triangles
    let triangles: Vec<Triangle> = (0..20)
        .flat_map(|row| {
            (0..20).map(move |col| {
                let x = f64::from(col) * 40.0;
                let y = f64::from(row) * 30.0;
                screen_triangle([(x, y), (x + 35.0, y), (x + 17.5, y + 25.0)])
            })
        })
        .collect();

    c.bench_function("raster_400_triangles", |b| {
        let mut image = ImageBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
        let mut zbuffer = ZBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
        b.iter(|| {
            zbuffer.clear();
            for tri in &triangles {
                raster_triangle(black_box(tri), &mut image, &mut zbuffer);
            }
        });
    });
}

fn benchmark_frustum_clip(c: &mut Criterion) {
    let frustum = Frustum::new(4.0 / 3.0, 1.0, 0.3);
    let grey = Vec3::from_rgb8(128, 128, 128);
    // straddles the near and left planes
    let straddling = Triangle::new(
        [
            Vec3::new(-3.0, -0.5, 0.1),
            Vec3::new(0.0, 1.5, 4.0),
            Vec3::new(0.5, -0.5, 2.0),
        ],
        [grey; 3],
    );
    let inside = Triangle::new(
        [
            Vec3::new(-0.2, -0.2, 2.0),
            Vec3::new(0.0, 0.2, 2.0),
            Vec3::new(0.2, -0.2, 2.0),
        ],
        [grey; 3],
    );

    let mut group = c.benchmark_group("frustum_clip");
    group.bench_function("straddling", |b| b.iter(|| frustum.clip(black_box(&straddling))));
    group.bench_function("inside", |b| b.iter(|| frustum.clip(black_box(&inside))));
    group.finish();
}

fn benchmark_render_scene(c: &mut Criterion) {
    let mut graph = SceneGraph::new();
    let camera = graph
        .add_child(
            ROOT_NAME,
            "camera",
            GameObject::camera("camera"),
            Transform::from_translation(Vec3::new(0.0, 1.0, -4.0)),
        )
        .unwrap();
    let cube = Arc::new(Mesh::cube(1.0, Vec3::from_rgb8(180, 25, 25)));
    for i in 0..25 {
        let x = f64::from(i % 5) - 2.0;
        let z = f64::from(i / 5);
        graph
            .add_child(
                ROOT_NAME,
                format!("cube{i}"),
                ModelObject::new(format!("cubeObj{i}"), Arc::clone(&cube)).into(),
                Transform::from_translation(Vec3::new(x * 1.5, 0.0, z * 1.5)),
            )
            .unwrap();
    }
    graph
        .add_child(
            ROOT_NAME,
            "light",
            LightObject::new("light", Vec3::from_rgb8(200, 200, 200), Falloff::Linear { range: 50.0 })
                .into(),
            Transform::from_translation(Vec3::new(0.0, 5.0, 0.0)),
        )
        .unwrap();

    let mut renderer = Renderer::new(camera, 1.0, BUFFER_WIDTH, BUFFER_HEIGHT);
    c.bench_function("render_25_cubes", |b| {
        b.iter(|| renderer.render_scene_graph(black_box(&graph)).width())
    });
}

criterion_group!(
    benches,
    benchmark_single_triangle,
    benchmark_many_triangles,
    benchmark_frustum_clip,
    benchmark_render_scene
);
criterion_main!(benches);
