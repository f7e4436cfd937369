use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use route_geometry::tests::util;
use route_geometry::{BoundingBox2D, BspTree, KdTree, Point2D, Strategy, decompose_polygon, triangulate};

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompose");
    for cells in [4, 8, 16] {
        let (outer, holes) = util::grid_of_holes(cells);
        group.throughput(Throughput::Elements(holes.len() as u64));
        for strategy in [Strategy::Basic, Strategy::Delaunay] {
            group.bench_function(format!("{:?} {}x{}", strategy, cells, cells), |b| b.iter(|| {
                decompose_polygon(&outer, &holes, strategy, 0.).expect("Decomposition failed")
            }));
        }
    }
    group.finish();

    let star = util::star(2000, 100., 60.);
    c.bench_function("triangulate star", |b| b.iter(|| {
        triangulate(&star).expect("Triangulation failed")
    }));

    let points = util::random_points(100_000, 1000., 0);
    c.bench_function("bsp build", |b| b.iter(|| {
        let mut tree = BspTree::new(&points);
        tree.build(0..points.len()).expect("Build failed");
        black_box(tree.len())
    }));

    let mut bsp = BspTree::new(&points);
    bsp.build(0..points.len()).expect("Build failed");
    let queries = util::random_points(1000, 1000., 1);
    c.bench_function("bsp nearest", |b| b.iter(|| {
        for q in &queries {
            black_box(bsp.nearest_point(*q));
        }
    }));

    let mut kd = KdTree::new(&points);
    kd.build(0..points.len()).expect("Build failed");
    c.bench_function("kd range", |b| b.iter(|| {
        for q in &queries {
            let bbox = BoundingBox2D::new(*q, *q + Point2D::new(10., 10.));
            black_box(kd.points_in_bbox(&bbox));
        }
    }));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
