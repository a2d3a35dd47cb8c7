use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use facet::color::Color;
use facet::math::{Vec2, Vec3};
use facet::prelude::*;
use facet::render::{EdgeFunctionRasterizer, FrameBuffer, Polygon, Rasterizer, ScanlineRasterizer};

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn create_buffer() -> Vec<u32> {
    vec![0u32; (BUFFER_WIDTH * BUFFER_HEIGHT) as usize]
}

fn triangle(points: [(f64, f64); 3]) -> Polygon {
    Polygon::new(
        points.iter().map(|&(x, y)| Vec2::new(x, y)).collect(),
        Color::RED,
        0.0,
    )
}

fn small_triangle() -> Polygon {
    triangle([(100.0, 100.0), (120.0, 100.0), (110.0, 120.0)])
}

fn medium_triangle() -> Polygon {
    triangle([(100.0, 100.0), (300.0, 100.0), (200.0, 300.0)])
}

fn large_triangle() -> Polygon {
    triangle([(50.0, 50.0), (750.0, 100.0), (400.0, 550.0)])
}

fn large_quad() -> Polygon {
    Polygon::new(
        vec![
            Vec2::new(150.0, 80.0),
            Vec2::new(690.0, 120.0),
            Vec2::new(620.0, 520.0),
            Vec2::new(110.0, 470.0),
        ],
        Color::RED,
        0.0,
    )
}

fn benchmark_single_polygon(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_polygon");

    let scanline = ScanlineRasterizer::new();
    let edge_fn = EdgeFunctionRasterizer::new();

    for (name, polygon) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
        ("large_quad", large_quad()),
    ] {
        group.bench_with_input(BenchmarkId::new("scanline", name), &polygon, |b, poly| {
            let mut buffer = create_buffer();
            b.iter(|| {
                let mut fb = FrameBuffer::new(&mut buffer, None, BUFFER_WIDTH, BUFFER_HEIGHT);
                scanline.fill_polygon(black_box(poly), &mut fb);
            });
        });

        group.bench_with_input(
            BenchmarkId::new("edge_function", name),
            &polygon,
            |b, poly| {
                let mut buffer = create_buffer();
                b.iter(|| {
                    let mut fb = FrameBuffer::new(&mut buffer, None, BUFFER_WIDTH, BUFFER_HEIGHT);
                    edge_fn.fill_polygon(black_box(poly), &mut fb);
                });
            },
        );
    }

    group.finish();
}

fn benchmark_many_polygons(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_polygons");

    let scanline = ScanlineRasterizer::new();
    let edge_fn = EdgeFunctionRasterizer::new();

    // Generate a grid of small triangles
    let polygons: Vec<Polygon> = (0..20)
        .flat_map(|row| {
            (0..20).map(move |col| {
                let x = col as f64 * 40.0;
                let y = row as f64 * 30.0;
                triangle([(x, y), (x + 35.0, y), (x + 17.5, y + 25.0)])
            })
        })
        .collect();

    group.bench_function("scanline_400_triangles", |b| {
        let mut buffer = create_buffer();
        b.iter(|| {
            let mut fb = FrameBuffer::new(&mut buffer, None, BUFFER_WIDTH, BUFFER_HEIGHT);
            for poly in &polygons {
                scanline.fill_polygon(black_box(poly), &mut fb);
            }
        });
    });

    group.bench_function("edge_function_400_triangles", |b| {
        let mut buffer = create_buffer();
        let mut depth = vec![f64::INFINITY; (BUFFER_WIDTH * BUFFER_HEIGHT) as usize];
        b.iter(|| {
            depth.fill(f64::INFINITY);
            let mut fb =
                FrameBuffer::new(&mut buffer, Some(&mut depth), BUFFER_WIDTH, BUFFER_HEIGHT);
            for poly in &polygons {
                edge_fn.fill_polygon(black_box(poly), &mut fb);
            }
        });
    });

    group.finish();
}

fn benchmark_full_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_frame");

    let camera = Camera::default();
    let light = DirectionalLight::new(Vec3::new(0.0, 0.0, -1.0), 0.3);
    let pipeline = Pipeline::default();

    for kind in ShapeKind::ALL {
        let mesh = match kind.build() {
            Ok(mesh) => mesh,
            Err(_) => continue,
        };
        let rotated: Vec<Vec3> = mesh
            .vertices()
            .iter()
            .map(|v| v.rotate_y(0.6).rotate_x(0.4))
            .collect();

        for strategy in [VisibilityStrategy::PainterSort, VisibilityStrategy::DepthBuffer] {
            let input = FrameInput::new(&mesh, &rotated, &camera, &light).with_strategy(strategy);
            group.bench_with_input(
                BenchmarkId::new(kind.name(), strategy),
                &input,
                |b, input| {
                    let mut surface = Surface::new(BUFFER_WIDTH, BUFFER_HEIGHT);
                    b.iter(|| pipeline.render(black_box(input), &mut surface));
                },
            );
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_single_polygon,
    benchmark_many_polygons,
    benchmark_full_frame
);
criterion_main!(benches);
