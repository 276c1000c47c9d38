use crate::state_space::StateSpace;

#[cfg(test)]
mod test_utils;

pub mod error;
pub mod landscape;
pub mod network;
pub mod state_space;
pub mod statistics;

/// A utility method for printing useful metadata of state spaces.
fn log_space(space: &StateSpace) -> String {
    format!("nodes={}; volume={}", space.ndim(), space.volume())
}

/// Extract the "simple name" of a type argument at compile time.
///
/// In the future, this should be a `const fn`, but `type_name` and `unwrap_or` are not
/// yet stabilized as `const` functions (even thought they probably are).
fn simple_type_name<T>() -> &'static str {
    std::any::type_name::<T>().split("::").last().unwrap_or("?")
}
