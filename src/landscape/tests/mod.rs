//! Tests for landscape construction and the attractor/basin decomposition.


use crate::error::LandscapeError;
use crate::landscape::{
    Decomposition, Landscape, LandscapeConfig, TransitionState, TransitionStep, TransitionTable,
    attractors, basin_entropy, basins, transitions,
};
use crate::network::{Network, Sizing};
use crate::state_space::StateSpace;
use crate::test_utils::{ElementaryCellularAutomaton, TableNetwork, init_logger};
use computation_process::{Computable, ComputationStep, Stateful};
use std::collections::HashSet;
use std::time::Duration;

/// Check conservation, reachability, and cycle consistency of a decomposed landscape.
pub(super) fn check_landscape_invariants<N: Network>(landscape: &Landscape<N>) {
    let volume = landscape.volume();
    let transitions = landscape.transitions();
    let basins = landscape.basins();
    let attractors = landscape.attractors();

    assert_eq!(transitions.len(), volume);
    assert_eq!(basins.len(), volume);

    // Conservation: every state is in exactly one basin and basin ids are dense.
    let sizes = landscape.basin_sizes();
    assert_eq!(sizes.iter().sum::<usize>(), volume);
    assert_eq!(sizes.len(), attractors.len());
    assert!(sizes.iter().all(|it| *it > 0));
    let distinct: HashSet<usize> = basins.iter().copied().collect();
    assert_eq!(distinct.len(), attractors.len());

    // Every attractor is a cycle in its own basin, and cycles are disjoint.
    let mut on_cycle = HashSet::new();
    for (id, cycle) in attractors.iter().enumerate() {
        assert!(!cycle.is_empty());
        for (i, state) in cycle.iter().enumerate() {
            assert_eq!(basins[*state], id);
            assert_eq!(transitions[*state], cycle[(i + 1) % cycle.len()]);
            assert!(on_cycle.insert(*state), "State {} is on two cycles", state);
        }
    }

    // Reachability: iterating from any state reaches the cycle of its basin.
    for initial in 0..volume {
        let mut state = initial;
        let mut steps = 0;
        while !on_cycle.contains(&state) {
            state = transitions[state];
            steps += 1;
            assert!(steps <= volume, "State {} never reaches a cycle", initial);
        }
        assert_eq!(basins[state], basins[initial]);
    }
}

#[test]
fn test_single_fixed_point_basin() {
    init_logger();
    let landscape = Landscape::new(TableNetwork::binary(2, &[1, 3, 3, 3])).unwrap();
    assert_eq!(landscape.size(), 2);
    assert_eq!(landscape.volume(), 4);
    assert_eq!(landscape.transitions(), &[1, 3, 3, 3]);
    assert_eq!(landscape.attractors(), &[vec![3]]);
    assert_eq!(landscape.basins(), &[0, 0, 0, 0]);
    assert_eq!(landscape.basin_sizes(), vec![4]);
    assert_eq!(landscape.attractor_lengths(), vec![1]);
    check_landscape_invariants(&landscape);
}

#[test]
fn test_single_state_identity() {
    init_logger();
    let space = StateSpace::uniform(1, 1).unwrap();
    let landscape = Landscape::new(TableNetwork::new(space, &[0])).unwrap();
    assert_eq!(landscape.volume(), 1);
    assert_eq!(landscape.transitions(), &[0]);
    assert_eq!(landscape.attractors(), &[vec![0]]);
    assert_eq!(landscape.basins(), &[0]);
    assert_eq!(landscape.num_attractors(), 1);
    assert_eq!(landscape.basin_entropy(2.0).abs(), 0.0);
}

#[test]
fn test_giant_cycle() {
    init_logger();
    let table: Vec<usize> = (0..8).map(|it| (it + 1) % 8).collect();
    let landscape = Landscape::new(TableNetwork::binary(3, &table)).unwrap();
    assert_eq!(landscape.attractors(), &[vec![0, 1, 2, 3, 4, 5, 6, 7]]);
    assert_eq!(landscape.basin_sizes(), vec![8]);
    check_landscape_invariants(&landscape);
}

#[test]
fn test_paths_merging_into_earlier_and_later_basins() {
    init_logger();
    // 0 -> 5 -> 5, 1 -> 2 <-> 3, 4 -> 0
    let space = StateSpace::new(vec![2, 3]).unwrap();
    let landscape = Landscape::new(TableNetwork::new(space, &[5, 2, 3, 2, 0, 5])).unwrap();
    assert_eq!(landscape.attractors(), &[vec![5], vec![2, 3]]);
    assert_eq!(landscape.basins(), &[0, 1, 1, 1, 0, 0]);
    assert_eq!(landscape.basin_sizes(), vec![3, 3]);
    check_landscape_invariants(&landscape);
}

#[test]
fn test_decomposition_is_lazy_and_cached() {
    init_logger();
    let landscape = Landscape::new(TableNetwork::binary(2, &[1, 2, 0, 2])).unwrap();
    assert!(!landscape.is_decomposed());
    assert_eq!(landscape.transitions(), &[1, 2, 0, 2]);
    assert!(!landscape.is_decomposed());

    let first = landscape.decomposition() as *const Decomposition;
    assert!(landscape.is_decomposed());
    assert_eq!(landscape.attractors(), &[vec![0, 1, 2]]);
    let second = landscape.decomposition() as *const Decomposition;
    assert_eq!(first, second);
}

#[test]
fn test_decomposition_of_raw_transitions() {
    let decomposition = Decomposition::from_transitions(&[1, 0, 3, 3, 2, 5]);
    assert_eq!(decomposition.attractors(), &[vec![0, 1], vec![3], vec![5]]);
    assert_eq!(decomposition.basins(), &[0, 0, 1, 1, 1, 2]);
    assert_eq!(decomposition.basin_of(4), Some(1));
    assert_eq!(decomposition.basin_of(6), None);
    assert_eq!(decomposition.basin_sizes(), vec![2, 3, 1]);
    assert_eq!(decomposition.attractor_lengths(), vec![2, 1, 1]);

    let empty = Decomposition::from_transitions(&[]);
    assert_eq!(empty.num_attractors(), 0);
}

#[test]
fn test_elementary_automaton_rule_30() {
    init_logger();
    let eca = ElementaryCellularAutomaton::new(30);

    let small = Landscape::with_size(eca, 3).unwrap();
    assert_eq!(small.transitions(), &[0, 7, 7, 1, 7, 4, 2, 0]);
    assert_eq!(small.attractors(), &[vec![0]]);

    let landscape = Landscape::with_size(eca, 5).unwrap();
    assert_eq!(landscape.attractors(), &[vec![0], vec![19, 28, 7, 25, 14]]);
    assert_eq!(landscape.basin_sizes(), vec![2, 30]);
    assert!((landscape.basin_entropy(2.0) - 0.3372900666170139).abs() < 1e-6);
    check_landscape_invariants(&landscape);
}

#[test]
fn test_elementary_automaton_rule_110() {
    init_logger();
    let landscape = Landscape::with_size(ElementaryCellularAutomaton::new(110), 4).unwrap();
    assert_eq!(
        landscape.attractors(),
        &[vec![0], vec![13, 7], vec![11, 14]]
    );
    assert_eq!(landscape.basin_sizes(), vec![4, 6, 6]);
    check_landscape_invariants(&landscape);
}

#[test]
fn test_invariants_over_many_rules() {
    init_logger();
    for code in (0..=255u8).step_by(7) {
        for size in [1, 4, 7] {
            let landscape =
                Landscape::with_size(ElementaryCellularAutomaton::new(code), size).unwrap();
            check_landscape_invariants(&landscape);
        }
    }
}

#[test]
fn test_rebuilding_is_deterministic() {
    init_logger();
    let eca = ElementaryCellularAutomaton::new(54);
    let first = Landscape::with_size(eca, 8).unwrap();
    let second = Landscape::with_size(eca, 8).unwrap();
    assert_eq!(first.transitions(), second.transitions());
    assert_eq!(first.basins(), second.basins());
    assert_eq!(first.attractors(), second.attractors());
}

#[test]
fn test_chunk_size_does_not_change_result() {
    init_logger();
    let eca = ElementaryCellularAutomaton::new(45);
    let reference = Landscape::with_size(eca, 6).unwrap();
    for chunk_size in [0, 1, 5, 64, 1000] {
        let config = LandscapeConfig::new(eca, Some(6))
            .unwrap()
            .with_chunk_size(chunk_size);
        assert!(config.chunk_size >= 1);
        let landscape = Landscape::configure(config).unwrap();
        assert_eq!(landscape.transitions(), reference.transitions());
    }
}

#[test]
fn test_size_must_match_network_kind() {
    let eca = ElementaryCellularAutomaton::new(30);
    assert!(matches!(
        Landscape::new(eca),
        Err(LandscapeError::InvalidArgument(_))
    ));
    assert!(matches!(
        transitions(eca, None),
        Err(LandscapeError::InvalidArgument(_))
    ));

    let table = TableNetwork::binary(2, &[1, 3, 3, 3]);
    assert!(matches!(
        Landscape::with_size(table.clone(), 2),
        Err(LandscapeError::InvalidArgument(_))
    ));
    assert!(matches!(
        attractors(&table, Some(2)),
        Err(LandscapeError::InvalidArgument(_))
    ));
}

#[test]
fn test_free_functions_delegate_to_landscape() {
    init_logger();
    let eca = ElementaryCellularAutomaton::new(30);
    assert_eq!(
        transitions(eca, Some(3)).unwrap(),
        vec![0, 7, 7, 1, 7, 4, 2, 0]
    );
    assert_eq!(
        attractors(eca, Some(5)).unwrap(),
        vec![vec![0], vec![19, 28, 7, 25, 14]]
    );
    let basins = basins(eca, Some(5)).unwrap();
    assert_eq!(basins.iter().filter(|it| **it == 0).count(), 2);
    assert_eq!(basins.iter().filter(|it| **it == 1).count(), 30);
    let entropy = basin_entropy(eca, Some(5), 2.0).unwrap();
    assert!((entropy - 0.3372900666170139).abs() < 1e-6);
}

#[test]
fn test_edges_follow_transitions() {
    let landscape = Landscape::new(TableNetwork::binary(2, &[1, 3, 3, 3])).unwrap();
    let edges: Vec<(usize, usize)> = landscape.edges().collect();
    assert_eq!(edges, vec![(0, 1), (1, 3), (2, 3), (3, 3)]);
}

#[test]
fn test_timeseries() {
    let landscape = Landscape::with_size(ElementaryCellularAutomaton::new(30), 3).unwrap();
    let series = landscape.timeseries(3).unwrap();
    assert_eq!(series.ndim(), 3);
    assert_eq!(series.volume(), 8);
    assert_eq!(series.timesteps(), 3);

    // Starting from [0, 1, 0] (index 2).
    assert_eq!(series.state_at(2, 0), &[0, 1, 0]);
    assert_eq!(series.state_at(2, 1), &[1, 1, 1]);
    assert_eq!(series.state_at(2, 2), &[0, 0, 0]);
    assert_eq!(series.state_at(2, 3), &[0, 0, 0]);
    assert_eq!(series.get(0, 3, 0), 1);
    assert_eq!(series.get(2, 3, 1), 0);

    for initial in 0..8 {
        assert_eq!(
            series.state_at(initial, 0),
            landscape.state_space().decode(initial).unwrap().as_slice()
        );
    }

    assert!(matches!(
        landscape.timeseries(0),
        Err(LandscapeError::InvalidArgument(_))
    ));
    assert!(matches!(
        landscape.timeseries(usize::MAX),
        Err(LandscapeError::InvalidArgument(_))
    ));
    assert!(matches!(
        landscape.timeseries(usize::MAX / 4),
        Err(LandscapeError::InvalidArgument(_))
    ));
}

#[test]
fn test_construction_can_be_cancelled() {
    init_logger();
    let eca = ElementaryCellularAutomaton::new(110);
    let config = LandscapeConfig::new(eca, Some(18))
        .unwrap()
        .with_chunk_size(16);

    // Either the landscape is built in time, or construction stops with an error.
    let result = cancel_this::on_timeout(Duration::from_millis(1), || {
        match Landscape::configure(config.clone()) {
            Err(LandscapeError::Cancelled(c)) => Err(c),
            other => Ok(other),
        }
    });

    match result {
        Ok(Ok(landscape)) => assert_eq!(landscape.transitions().len(), 1 << 18),
        Ok(Err(e)) => panic!("Unexpected error: {}", e),
        Err(_) => {}
    }
}

#[test]
fn test_borrowed_network_matches_owned_network() {
    init_logger();
    let eca = ElementaryCellularAutomaton::new(110);
    let owned = Landscape::with_size(eca, 5).unwrap();
    let borrowed = Landscape::with_size(&eca, 5).unwrap();
    assert_eq!(owned.transitions(), borrowed.transitions());
    assert_eq!(owned.attractors(), borrowed.attractors());
    assert_eq!(borrowed.network().code, 110);
}

#[test]
fn test_transition_table_computation_of_owned_network() {
    init_logger();
    let eca = ElementaryCellularAutomaton::new(30);
    let config = LandscapeConfig::new(eca, Some(3))
        .unwrap()
        .with_chunk_size(3);
    let space = config.space.clone();
    let mut table = TransitionTable::<ElementaryCellularAutomaton>::configure(config, &space);
    assert_eq!(table.compute().unwrap(), vec![0, 7, 7, 1, 7, 4, 2, 0]);
}

#[test]
fn test_finished_step_hands_over_table() {
    let config = LandscapeConfig::new(TableNetwork::binary(2, &[1, 3, 3, 3]), None).unwrap();
    let mut state = TransitionState::from(&config.space);
    let table = TransitionStep::<TableNetwork>::step(&config, &mut state).unwrap();
    assert_eq!(table, vec![1, 3, 3, 3]);
    assert_eq!(state.progress(), 0);
}

/// A network whose update leaves its own state space.
struct EscapingNetwork;

impl Network for EscapingNetwork {
    fn sizing(&self) -> Sizing {
        Sizing::Variable { base: 2 }
    }

    fn update(&self, _state: &[usize], successor: &mut [usize]) {
        successor.fill(2);
    }
}

#[test]
#[should_panic(expected = "Correctness violation")]
fn test_successor_outside_of_state_space_is_reported() {
    let _ = Landscape::with_size(EscapingNetwork, 2);
}
