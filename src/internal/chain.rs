//! Per-request creation chain for cycle and depth detection.

use crate::error::{DiError, DiResult};
use crate::options::ContainerOptions;

/// Names of the beans being created on the current call path, outermost
/// first.
///
/// Every top-level request starts a fresh chain, so concurrent requests on
/// different threads never see each other's entries.
pub(crate) struct CreationChain {
    names: Vec<String>,
    max_depth: usize,
    detect_cycles: bool,
}

impl CreationChain {
    pub(crate) fn new(options: &ContainerOptions) -> Self {
        Self {
            names: Vec::new(),
            max_depth: options.max_depth,
            detect_cycles: options.detect_cycles,
        }
    }

    /// Pushes `name`, failing if it is already being created on this path
    /// or if the chain is full.
    pub(crate) fn enter(&mut self, name: &str) -> DiResult<()> {
        if self.detect_cycles && self.names.iter().any(|n| n == name) {
            let mut path = self.names.clone();
            path.push(name.to_string());
            return Err(DiError::CircularDependency(path));
        }
        if self.names.len() >= self.max_depth {
            return Err(DiError::DepthExceeded(self.max_depth));
        }
        self.names.push(name.to_string());
        Ok(())
    }

    pub(crate) fn exit(&mut self) {
        self.names.pop();
    }

    pub(crate) fn depth(&self) -> usize {
        self.names.len()
    }
}
