// Core modules implementing the input tree, coercion, dispatch, and error modeling.
pub mod coerce;
pub mod error;
pub mod node;
pub mod options;
pub mod transform;
