//! Serial and parallel generation must produce identical datasets.

use pathset_episode::{DatasetConfig, DatasetDriver, EpisodeConfig, OverflowPolicy};
use pathset_obs::ObservationPolicy;
use pathset_space::{Neighbourhood, Visibility};
use pathset_world::GridKind;

fn driver(kind: GridKind, policy: ObservationPolicy, seed: u64) -> DatasetDriver {
    let episode = EpisodeConfig::builder()
        .timesteps(16)
        .visibility(Visibility::Radius(1))
        .neighbourhood(Neighbourhood::Manhattan)
        .policy(policy)
        .overflow(OverflowPolicy::Truncate)
        .build()
        .unwrap();
    let config = DatasetConfig::builder()
        .shape(9, 9)
        .grid_kind(kind)
        .obstacle_density(0.3)
        .episode(episode)
        .seed(seed)
        .build()
        .unwrap();
    DatasetDriver::from_config(config).unwrap()
}

#[test]
fn every_kind_and_policy_is_worker_independent() {
    let policies = [
        ObservationPolicy::Local,
        ObservationPolicy::Total,
        ObservationPolicy::AtStart,
        ObservationPolicy::Cumulative,
        ObservationPolicy::Flickering {
            visible_probability: 0.5,
        },
    ];
    for kind in [GridKind::Free, GridKind::Obstacle, GridKind::Maze] {
        for policy in policies {
            let d = driver(kind, policy, 2024);
            let serial = d.generate(12).unwrap();
            let parallel = d.generate_parallel(12, 4).unwrap();
            assert_eq!(serial, parallel, "{kind} {policy:?}");
        }
    }
}

#[test]
fn single_episode_matches_its_dataset_slot() {
    let d = driver(GridKind::Maze, ObservationPolicy::Cumulative, 5);
    let dataset = d.generate_parallel(6, 3).unwrap();
    for (i, episode) in dataset.iter().enumerate() {
        assert_eq!(&d.generate_episode(i).unwrap(), episode);
    }
}

#[test]
fn more_workers_than_episodes() {
    let d = driver(GridKind::Free, ObservationPolicy::Local, 0);
    assert_eq!(d.generate_parallel(2, 16).unwrap(), d.generate(2).unwrap());
    assert!(d.generate_parallel(0, 4).unwrap().is_empty());
}
