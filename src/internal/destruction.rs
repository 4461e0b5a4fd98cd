//! Destruction stack recording every created instance.

use crate::bean::Bean;

/// Instances in creation order, drained back-to-front on teardown.
///
/// Entries are recorded right after raw construction, so an instance that
/// later fails injection or a hook is still torn down.
#[derive(Default)]
pub(crate) struct DestructionStack {
    beans: Vec<Bean>,
}

impl DestructionStack {
    pub(crate) fn push(&mut self, bean: Bean) {
        self.beans.push(bean);
    }

    /// Most recently created instance.
    pub(crate) fn pop(&mut self) -> Option<Bean> {
        self.beans.pop()
    }

    pub(crate) fn len(&self) -> usize {
        self.beans.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.beans.is_empty()
    }
}
