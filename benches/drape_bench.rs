//! Benchmarks for mesh I/O, draping and smoothing.
//!
//! Run with: `cargo bench --bench drape_bench`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use drape_rs::geometry::{DrapeMode, SmoothingParams, drape_face, smooth_face};
use drape_rs::mesh::gmsh::{parse_msh, write_msh_to};
use drape_rs::mesh::{Element, ElementType, MshVersion, Node, SurfaceMesh};
use drape_rs::topography::TopographyGrid;
use drape_rs::types::NodeIndex;

/// Triangulated `n × n` patch on face 1 with a perturbed interior. Each
/// cell is split along its rising diagonal.
fn tri_patch(n: usize) -> SurfaceMesh {
    let stride = n + 1;
    let mut nodes = Vec::with_capacity(stride * stride);
    for j in 0..stride {
        for i in 0..stride {
            let phase = (i * 7 + j * 13) as f64;
            nodes.push(Node::new(
                i as f64 + 0.3 * phase.sin(),
                j as f64 + 0.3 * phase.cos(),
                0.0,
            ));
        }
    }
    let tri = |a: usize, b: usize, c: usize| {
        Element::new(
            ElementType::TRIANGLE_3,
            0,
            1,
            [a, b, c].into_iter().map(NodeIndex::new).collect(),
        )
    };
    let mut elements = Vec::with_capacity(2 * n * n);
    for j in 0..n {
        for i in 0..n {
            let a = j * stride + i;
            elements.push(tri(a, a + 1, a + stride + 1));
            elements.push(tri(a, a + stride + 1, a + stride));
        }
    }
    SurfaceMesh::new(nodes, elements).unwrap()
}

fn msh_text(mesh: &SurfaceMesh) -> String {
    let mut buf = Vec::new();
    write_msh_to(&mut buf, mesh, MshVersion::V1).unwrap();
    String::from_utf8(buf).unwrap()
}

fn bench_msh_io(c: &mut Criterion) {
    let mut group = c.benchmark_group("msh_io");

    for n in [32, 128] {
        let mesh = tri_patch(n);
        let text = msh_text(&mesh);

        group.bench_with_input(BenchmarkId::new("parse", n), &text, |b, text| {
            b.iter(|| parse_msh(black_box(text)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("write", n), &mesh, |b, mesh| {
            b.iter(|| msh_text(black_box(mesh)))
        });
    }

    group.finish();
}

fn bench_drape(c: &mut Criterion) {
    let n = 128;
    let mesh = tri_patch(n);
    let axis: Vec<f64> = (0..=n + 1).map(|i| i as f64 - 0.5).collect();
    let values = (0..axis.len() * axis.len())
        .map(|k| (k as f64 * 0.01).sin())
        .collect();
    let grid = TopographyGrid::new(axis.clone(), axis, values).unwrap();

    c.bench_function("drape_face_128", |b| {
        b.iter_batched(
            || mesh.clone(),
            |mut mesh| drape_face(&mut mesh, 1, &grid, DrapeMode::Add),
            criterion::BatchSize::LargeInput,
        )
    });
}

fn bench_smoothing(c: &mut Criterion) {
    let mut group = c.benchmark_group("smoothing");
    let params = SmoothingParams::default();

    for n in [16, 64] {
        let mesh = tri_patch(n);
        group.bench_with_input(BenchmarkId::new("smooth_face", n), &mesh, |b, mesh| {
            b.iter_batched(
                || mesh.clone(),
                |mut mesh| smooth_face(&mut mesh, 1, &params),
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_msh_io, bench_drape, bench_smoothing);
criterion_main!(benches);
