use crate::network::{Network, Sizing, SynchronousBooleanNetwork};
use crate::state_space::StateSpace;
use biodivine_lib_param_bn::BooleanNetwork;

/// Initialize env_logger for tests. Safe to call multiple times.
pub fn init_logger() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

/// A fixed-size network given directly by its table of encoded successors.
///
/// # Example
///
/// `TableNetwork::binary(2, &[1, 3, 3, 3])` is a two-node network where
/// `0 -> 1`, `1 -> 3`, `2 -> 3` and `3 -> 3`.
#[derive(Clone, Debug)]
pub struct TableNetwork {
    space: StateSpace,
    table: Vec<usize>,
}

impl TableNetwork {
    pub fn new(space: StateSpace, table: &[usize]) -> TableNetwork {
        assert_eq!(space.volume(), table.len());
        assert!(table.iter().all(|it| *it < space.volume()));
        TableNetwork {
            space,
            table: table.to_vec(),
        }
    }

    pub fn binary(num_nodes: usize, table: &[usize]) -> TableNetwork {
        TableNetwork::new(StateSpace::uniform(num_nodes, 2).unwrap(), table)
    }
}

impl Network for TableNetwork {
    fn sizing(&self) -> Sizing {
        Sizing::Fixed(self.space.clone())
    }

    fn update(&self, state: &[usize], successor: &mut [usize]) {
        let index = self.space.encode(state).unwrap();
        self.space
            .decode_into(self.table[index], successor)
            .unwrap();
    }
}

/// An elementary cellular automaton with periodic boundary conditions.
///
/// The new value of cell `i` is bit `4 * x[i-1] + 2 * x[i] + x[i+1]` of the Wolfram code.
#[derive(Clone, Copy, Debug)]
pub struct ElementaryCellularAutomaton {
    pub code: u8,
}

impl ElementaryCellularAutomaton {
    pub fn new(code: u8) -> ElementaryCellularAutomaton {
        ElementaryCellularAutomaton { code }
    }
}

impl Network for ElementaryCellularAutomaton {
    fn sizing(&self) -> Sizing {
        Sizing::Variable { base: 2 }
    }

    fn update(&self, state: &[usize], successor: &mut [usize]) {
        let n = state.len();
        for i in 0..n {
            let left = state[(i + n - 1) % n];
            let right = state[(i + 1) % n];
            let neighbourhood = 4 * left + 2 * state[i] + right;
            successor[i] = usize::from((self.code >> neighbourhood) & 1);
        }
    }
}

/// Load one of the Boolean network models from the `models` directory.
pub fn load_model(name: &str) -> SynchronousBooleanNetwork {
    let path = format!("./models/{}", name);
    let bn = BooleanNetwork::try_from_file(&path)
        .unwrap_or_else(|e| panic!("Failed to load model {}: {}", path, e));
    SynchronousBooleanNetwork::new(&bn).unwrap()
}
