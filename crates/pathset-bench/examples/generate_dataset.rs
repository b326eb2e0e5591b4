//! Generate a small dataset and print what came out.
//!
//! Run with `RUST_LOG=debug` to see every rejected sample.

use pathset_bench::reference_profile;
use pathset_episode::DatasetDriver;
use pathset_obs::{Frame, AGENT, GOAL};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = reference_profile(42);
    let driver = DatasetDriver::from_config(config).unwrap();

    let dataset = driver.generate_parallel(256, 4).unwrap();
    let stats = dataset.stats();
    tracing::info!(
        episodes = stats.episodes,
        samples = stats.samples,
        no_path = stats.no_path,
        overflow = stats.overflow,
        "done"
    );

    let episode = &dataset.episodes()[0];
    println!(
        "episode 0: {} steps, {} planned, actions {:?}",
        episode.len(),
        episode.plan_len(),
        episode.actions().iter().map(|a| a.0).collect::<Vec<_>>()
    );
    for (t, frame) in episode.frames().enumerate().take(3) {
        println!("t = {t}");
        print_frame(frame);
    }
}

fn print_frame(frame: &Frame) {
    let [rows, cols, _] = frame.shape();
    let state = frame.state();
    let goal = frame.goal();
    for r in 0..rows {
        let line: String = (0..cols)
            .map(|c| {
                let pos = (r as i32, c as i32).into();
                match (state.get(pos), goal.get(pos)) {
                    (Some(AGENT), _) => 'A',
                    (_, Some(GOAL)) => 'G',
                    (Some(1), _) => '#',
                    (Some(0), _) => '.',
                    _ => ' ',
                }
            })
            .collect();
        println!("  {line}");
    }
}
