//! Lumped thermodynamic cycle: one compressor/turbine node per spool.
//!
//! A node represents an entire spool's compression or expansion as a single
//! (pressure ratio, efficiency) pair over a stagnation inlet state. The
//! three-shaft scheme chains five of them through duct and burner losses and
//! balances turbine heat drops against compressor works. Solved nodes are
//! the references the staged machines are later fitted against.

pub mod error;
pub mod node;
pub mod scheme;
pub mod state;

pub use error::{CycleError, CycleResult};
pub use node::{CompressorNode, ReferenceNode, TurbineNode};
pub use scheme::{CycleSpec, SpoolMassRates, ThreeShaftCycle};
pub use state::StagnationState;
