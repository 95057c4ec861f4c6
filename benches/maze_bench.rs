use criterion::{criterion_group, criterion_main, Criterion};
use grid_astar_trace::mazes::sample_mazes;
use grid_astar_trace::{search, GridGraphBuilder};
use std::hint::black_box;

fn sample_maze_bench(c: &mut Criterion) {
    for maze in sample_mazes() {
        let builder = GridGraphBuilder::new(maze.grid().unwrap());
        c.bench_function(format!("maze {}, build", maze.name).as_str(), |b| {
            b.iter(|| black_box(builder.build(maze.start, maze.goal)))
        });

        let (graph, start, goal) = builder.build(maze.start, maze.goal).unwrap();
        c.bench_function(format!("maze {}, search with trace", maze.name).as_str(), |b| {
            b.iter(|| black_box(search(&graph, start, goal)))
        });
    }
}

criterion_group!(benches, sample_maze_bench);
criterion_main!(benches);
