use mazeshift::benchmark::{run_benchmarks, standard_configurations};

fn main() -> std::io::Result<()> {
    let _log_guard = mazeshift::logging::init_file_logging(std::env::temp_dir(), "mazeshift-profile.log");

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1);
    let seed = args.next().and_then(|s| s.parse::<u64>().ok());

    let configs = standard_configurations();
    for _ in 0..num_iters {
        let results = run_benchmarks(&configs, seed);
        results.iter().for_each(|result| {
            eprintln!(
                "{}x{} with {} obstacles: {} moves in {} ms",
                result.matrix_size,
                result.matrix_size,
                result.blocking_element_size,
                result.result.len(),
                result.speed
            );
        });
        println!("{}", serde_json::to_string(&results)?);
    }
    Ok(())
}
