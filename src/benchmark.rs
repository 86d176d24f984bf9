use std::time::{Duration, Instant};

use serde::Serialize;

use crate::{
    game::{MazeState, MoveLogEntry},
    maze::MazeConfig,
    obstacles::SearchLimits,
};

/// Outcome of running one configuration to completion.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkResult {
    pub matrix_size: u16,
    pub blocking_element_size: usize,
    /// Wall-clock time in milliseconds
    pub speed: u64,
    pub result: Vec<MoveLogEntry>,
}

/// Corner-to-corner mazes of size 5, 10, 20 and 50, each with three obstacle counts.
pub fn standard_configurations() -> Vec<MazeConfig> {
    [
        (5, [1, 2, 3]),
        (10, [2, 3, 4]),
        (20, [3, 4, 5]),
        (50, [5, 6, 7]),
    ]
    .into_iter()
    .flat_map(|(size, counts)| {
        counts
            .into_iter()
            .map(move |count| MazeConfig::corner_to_corner(size, count))
    })
    .collect()
}

/// Whole milliseconds in `elapsed`, saturating at `u64::MAX`.
fn elapsed_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

pub fn run_benchmark(config: MazeConfig, seed: Option<u64>) -> BenchmarkResult {
    let mut maze = MazeState::with_search(config, SearchLimits::default(), seed);
    let start_time = Instant::now();
    let moves = maze.run_to_completion();
    let elapsed = start_time.elapsed();
    tracing::info!(
        "[bench] size {} with {} obstacles: {} moves in {:?}",
        config.size,
        config.obstacle_count,
        moves,
        elapsed
    );

    BenchmarkResult {
        matrix_size: config.size,
        blocking_element_size: config.obstacle_count,
        speed: elapsed_millis(elapsed),
        result: maze.game_log().to_vec(),
    }
}

pub fn run_benchmarks(configs: &[MazeConfig], seed: Option<u64>) -> Vec<BenchmarkResult> {
    configs
        .iter()
        .map(|&config| run_benchmark(config, seed))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_configurations() {
        let configs = standard_configurations();
        assert_eq!(configs.len(), 12);
        assert!(configs.iter().all(|c| c.validate().is_ok()));
        assert_eq!(configs[11], MazeConfig::corner_to_corner(50, 7));
    }

    #[test]
    fn test_small_benchmarks_finish() {
        let configs = &standard_configurations()[..6];
        let results = run_benchmarks(configs, Some(42));
        assert_eq!(results.len(), 6);
        for (result, config) in results.iter().zip(configs) {
            assert_eq!(result.matrix_size, config.size);
            assert_eq!(
                result.result.last().map(|e| e.moving_object_coordinates),
                Some(config.end)
            );
        }
    }

    #[test]
    fn test_elapsed_millis_saturates() {
        assert_eq!(elapsed_millis(Duration::from_micros(2_999)), 2);
        assert_eq!(elapsed_millis(Duration::from_secs(u64::MAX)), u64::MAX);
        assert_eq!(elapsed_millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_result_json_keys() {
        let result = run_benchmark(MazeConfig::corner_to_corner(5, 1), Some(1));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["matrixSize"], 5);
        assert_eq!(value["blockingElementSize"], 1);
        assert!(value["speed"].is_u64());
        assert!(value["result"].is_array());
    }
}
