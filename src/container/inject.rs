//! Dependency injection into freshly constructed beans.

use super::Container;
use crate::bean::{AnyArc, Bean};
use crate::error::{DiError, DiResult};
use crate::internal::CreationChain;
use crate::key::TypeKey;
use crate::meta::{Autowired, InjectionArgs};

impl Container {
    /// Applies constructor-style, field-style and method-style injection,
    /// in that order.
    pub(super) fn inject_dependencies(&self, bean: &Bean, chain: &mut CreationChain) -> DiResult<()> {
        self.inject_constructor(bean, chain)?;
        self.inject_fields(bean, chain)?;
        self.inject_methods(bean, chain)
    }

    /// Resolves the tagged constructor's parameters and assigns each one to
    /// the declared fields whose type is the dependency's runtime type. The
    /// constructor itself is never called.
    fn inject_constructor(&self, bean: &Bean, chain: &mut CreationChain) -> DiResult<()> {
        let ty = bean.managed_type();
        let Some(ctor) = ty.injection_constructor() else {
            return Ok(());
        };
        let mut dependencies = Vec::with_capacity(ctor.params().len());
        for param in ctor.params() {
            dependencies.push(self.resolve_dependency(param, ctor.autowired(), chain)?);
        }

        for field in ty.fields() {
            for dependency in &dependencies {
                if field.ty() != dependency.managed_type().key() {
                    continue;
                }
                field
                    .assign(bean.target(), AnyArc::clone(dependency.instance()))
                    .map_err(|e| {
                        DiError::construction_caused(
                            bean.name(),
                            format!("constructor injection into field {} failed", field.name()),
                            e,
                        )
                    })?;
            }
        }
        Ok(())
    }

    fn inject_fields(&self, bean: &Bean, chain: &mut CreationChain) -> DiResult<()> {
        for field in bean.managed_type().fields() {
            let Some(autowired) = field.autowired() else {
                continue;
            };
            let dependency = self.resolve_dependency(field.ty(), autowired, chain)?;
            let value = view_as(bean, &dependency, field.ty())?;
            field.assign(bean.target(), value).map_err(|e| {
                DiError::construction_caused(
                    bean.name(),
                    format!("field injection failed for {}", field.name()),
                    e,
                )
            })?;
        }
        Ok(())
    }

    fn inject_methods(&self, bean: &Bean, chain: &mut CreationChain) -> DiResult<()> {
        for method in bean.managed_type().injection_methods() {
            if method.params().is_empty() {
                continue;
            }
            let mut values = Vec::with_capacity(method.params().len());
            for param in method.params() {
                let dependency = self.resolve_dependency(param, method.autowired(), chain)?;
                values.push(view_as(bean, &dependency, param)?);
            }
            method
                .invoke(bean.target(), &InjectionArgs::new(values))
                .map_err(|e| {
                    DiError::construction_caused(
                        bean.name(),
                        format!("method injection failed for {}", method.name()),
                        e,
                    )
                })?;
        }
        Ok(())
    }

    /// Fetches the bean satisfying `key` under the injection metadata.
    fn resolve_dependency(
        &self,
        key: &TypeKey,
        autowired: &Autowired,
        chain: &mut CreationChain,
    ) -> DiResult<Bean> {
        let name = match autowired.name() {
            Some(name) => name.to_string(),
            None if key.is_interface() => self.unique_implementation(key)?,
            None => key.bean_name(),
        };
        self.resolve_bean(&name, autowired.lifetime(), chain)
    }

    /// Name of the only registered definition assignable to `key`.
    fn unique_implementation(&self, key: &TypeKey) -> DiResult<String> {
        let mut candidates = self.registry().candidates_for(key);
        match candidates.len() {
            0 => Err(DiError::DefinitionNotFound(key.display_name().to_string())),
            1 => Ok(candidates.remove(0)),
            _ => {
                candidates.sort();
                Err(DiError::AmbiguousDependency {
                    requested: key.display_name().to_string(),
                    candidates,
                })
            }
        }
    }
}

/// The dependency viewed as the declared type.
fn view_as(target: &Bean, dependency: &Bean, key: &TypeKey) -> DiResult<AnyArc> {
    dependency.view(key).ok_or_else(|| {
        DiError::construction(
            target.name(),
            format!(
                "bean {} of type {} cannot be injected as {}",
                dependency.name(),
                dependency.type_name(),
                key
            ),
        )
    })
}
