use crate::error::{LandscapeError, LandscapeResult};
use crate::network::{Network, Sizing};
use crate::state_space::StateSpace;
use biodivine_lib_param_bn::{BooleanNetwork, FnUpdate, VariableId};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// A [`BooleanNetwork`] interpreted with synchronous semantics: in every step, all
/// variables are updated at once using the values of the current state.
///
/// Coordinate `i` of a state corresponds to the `i`-th network variable. The network
/// must be fully specified, i.e. it cannot contain explicit parameters and every variable
/// needs an update function. Otherwise, the update is not a single deterministic function.
pub struct SynchronousBooleanNetwork {
    variables: Vec<VariableId>,
    names: Vec<String>,
    functions: Vec<FnUpdate>,
    space: StateSpace,
    /// Reused variable valuation, so that `update` does not allocate for every state.
    valuation: Mutex<HashMap<VariableId, bool>>,
}

impl Clone for SynchronousBooleanNetwork {
    fn clone(&self) -> Self {
        SynchronousBooleanNetwork {
            variables: self.variables.clone(),
            names: self.names.clone(),
            functions: self.functions.clone(),
            space: self.space.clone(),
            valuation: Mutex::new(initial_valuation(&self.variables)),
        }
    }
}

fn initial_valuation(variables: &[VariableId]) -> HashMap<VariableId, bool> {
    variables.iter().map(|var| (*var, false)).collect()
}

impl TryFrom<&BooleanNetwork> for SynchronousBooleanNetwork {
    type Error = LandscapeError;

    fn try_from(value: &BooleanNetwork) -> LandscapeResult<Self> {
        SynchronousBooleanNetwork::new(value)
    }
}

impl TryFrom<BooleanNetwork> for SynchronousBooleanNetwork {
    type Error = LandscapeError;

    fn try_from(value: BooleanNetwork) -> LandscapeResult<Self> {
        SynchronousBooleanNetwork::new(&value)
    }
}

impl SynchronousBooleanNetwork {
    /// Build the synchronous interpretation of a fully specified [`BooleanNetwork`].
    pub fn new(network: &BooleanNetwork) -> LandscapeResult<SynchronousBooleanNetwork> {
        if network.num_vars() == 0 {
            return Err(LandscapeError::InvalidArgument(
                "Boolean network has no variables".to_string(),
            ));
        }

        if network.num_parameters() > 0 {
            return Err(LandscapeError::UnsupportedNetwork(format!(
                "Boolean network has {} explicit parameters",
                network.num_parameters()
            )));
        }

        let mut variables = Vec::with_capacity(network.num_vars());
        let mut names = Vec::with_capacity(network.num_vars());
        let mut functions = Vec::with_capacity(network.num_vars());
        for var in network.variables() {
            let name = network.get_variable_name(var).clone();
            let Some(function) = network.get_update_function(var) else {
                return Err(LandscapeError::UnsupportedNetwork(format!(
                    "variable `{}` has no update function",
                    name
                )));
            };
            variables.push(var);
            names.push(name);
            functions.push(function.clone());
        }

        Ok(SynchronousBooleanNetwork {
            space: StateSpace::uniform(variables.len(), 2)?,
            valuation: Mutex::new(initial_valuation(&variables)),
            variables,
            names,
            functions,
        })
    }

    /// Names of network variables, in coordinate order.
    pub fn variable_names(&self) -> &[String] {
        &self.names
    }

    /// The number of network variables.
    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }
}

impl Network for SynchronousBooleanNetwork {
    fn sizing(&self) -> Sizing {
        Sizing::Fixed(self.space.clone())
    }

    fn update(&self, state: &[usize], successor: &mut [usize]) {
        let mut values = self
            .valuation
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for (var, x) in self.variables.iter().zip(state) {
            values.insert(*var, *x != 0);
        }

        for (next, function) in successor.iter_mut().zip(&self.functions) {
            let value = function.evaluate(&values).expect(
                "Correctness violation: Parameter-free update function must be evaluable.",
            );
            *next = usize::from(value);
        }
    }
}
