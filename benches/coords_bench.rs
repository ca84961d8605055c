use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hecks_bridge::coords::{index_to_vertex, vertex_to_index};
use hecks_bridge::types::{row_width, ServiceMove, Vertex, ROW_COUNT};

fn bench_vertex_to_index(c: &mut Criterion) {
    let vertex = Vertex::from_str("e12").unwrap();

    c.bench_function("vertex_to_index", |b| {
        b.iter(|| vertex_to_index(black_box(&vertex)))
    });
}

fn bench_index_to_vertex(c: &mut Criterion) {
    c.bench_function("index_to_vertex", |b| {
        b.iter(|| index_to_vertex(black_box(11), black_box(9)))
    });
}

fn bench_full_board_round_trip(c: &mut Criterion) {
    c.bench_function("round_trip_full_board", |b| {
        b.iter(|| {
            for row in 0..ROW_COUNT {
                for col in 1..=row_width(row).unwrap() {
                    let vertex = Vertex::cell(row, col).unwrap();
                    if let Some(ServiceMove::Cell(idx)) = vertex_to_index(&vertex) {
                        black_box(index_to_vertex(idx.row as i8, idx.col as i8));
                    }
                }
            }
        })
    });
}

criterion_group!(
    benches,
    bench_vertex_to_index,
    bench_index_to_vertex,
    bench_full_board_round_trip
);
criterion_main!(benches);
