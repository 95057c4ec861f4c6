#![cfg(feature = "serde")]
//! The trace is what a replay front end consumes, so it has to survive a JSON round trip.
use grid_astar_trace::mazes::sample_mazes;
use grid_astar_trace::{solve, Grid, SearchStatus, SearchTrace};

#[test]
fn trace_round_trips_through_json() {
    let maze = sample_mazes()[1];
    let grid = maze.grid().unwrap();
    let solution = solve(&grid, maze.start, maze.goal).unwrap();
    let trace = &solution.outcome.trace;

    let json = serde_json::to_string(trace).unwrap();
    let restored: SearchTrace = serde_json::from_str(&json).unwrap();
    assert_eq!(&restored, trace);

    let first = serde_json::to_value(trace.first().unwrap()).unwrap();
    assert_eq!(first["step"], 1);
    assert_eq!(first["current"], solution.start);
    assert!(first["open_set"].as_array().unwrap().is_empty());

    let status = serde_json::to_string(&solution.outcome.status()).unwrap();
    assert_eq!(status, "\"Success\"");
    assert_eq!(
        serde_json::from_str::<SearchStatus>(&status).unwrap(),
        SearchStatus::Success
    );
}

/// Grids serialize as their rows of markers.
#[test]
fn grid_serializes_as_marker_rows() {
    let grid: Grid = "#.\n..".parse().unwrap();
    let value = serde_json::to_value(&grid).unwrap();
    assert_eq!(value, serde_json::json!([[1, 0], [0, 0]]));
    let rows: Vec<Vec<u8>> = serde_json::from_value(value).unwrap();
    assert_eq!(Grid::from_rows(&rows).unwrap(), grid);
}
