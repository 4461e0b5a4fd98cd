//! Internal implementation details.

pub(crate) mod chain;
pub(crate) mod destruction;

pub(crate) use chain::CreationChain;
pub(crate) use destruction::DestructionStack;
