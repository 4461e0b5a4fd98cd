use crate::bean::Bean;
use crate::error::{DiError, DiResult};
use crate::meta::HookKind;

/// Runs every hook of `kind` declared on the bean's type, in declaration
/// order. The first failure, or a hook declaring parameters, stops the run.
pub(super) fn run_hooks(bean: &Bean, kind: HookKind) -> DiResult<()> {
    let ty = bean.managed_type();
    for hook in ty.hooks_of(kind) {
        if !hook.params().is_empty() {
            return Err(DiError::InvalidHookSignature {
                type_name: ty.type_name(),
                hook: hook.name(),
                kind,
                params: hook.params().len(),
            });
        }
        tracing::trace!(bean = bean.name(), hook = hook.name(), %kind, "running hook");
        hook.invoke(bean.target()).map_err(|source| DiError::HookFailure {
            bean: bean.name().to_string(),
            hook: hook.name(),
            kind,
            source,
        })?;
    }
    Ok(())
}
