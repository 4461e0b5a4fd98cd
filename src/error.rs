//! Error types for the container, the discovery pipeline and the scanners.

use std::path::PathBuf;

use thiserror::Error;

use crate::meta::HookKind;

/// Boxed error returned by user code (constructors, factory methods, hooks, setters).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Container errors
///
/// Every variant is fatal at the point it is raised: nothing inside the
/// container retries or swallows an error, it surfaces to the caller of
/// `get`, `destroy` or container construction.
///
/// # Examples
///
/// ```rust
/// use nexus_di::DiError;
///
/// let not_found = DiError::DefinitionNotFound("greeter".to_string());
/// assert_eq!(not_found.to_string(), "No bean definition found for: greeter");
///
/// let circular = DiError::CircularDependency(vec!["a".into(), "b".into(), "a".into()]);
/// assert_eq!(circular.to_string(), "Circular dependency: a -> b -> a");
/// ```
#[derive(Debug, Error)]
pub enum DiError {
    /// No definition registered under the requested bean name, or no
    /// registered definition is assignable to a requested interface.
    #[error("No bean definition found for: {0}")]
    DefinitionNotFound(String),

    /// An interface-typed dependency matched several definitions and no
    /// explicit bean name was given.
    #[error("Ambiguous dependency {requested}: candidates [{}]; name one explicitly", .candidates.join(", "))]
    AmbiguousDependency {
        requested: String,
        candidates: Vec<String>,
    },

    /// Constructor, factory method, setter or injection method failed.
    #[error("Error creating bean {bean}: {reason}")]
    ConstructionFailure {
        bean: String,
        reason: String,
        #[source]
        source: Option<BoxError>,
    },

    /// A lifecycle hook declares parameters.
    #[error("{kind} hook {type_name}::{hook} must not have parameters (declares {params})")]
    InvalidHookSignature {
        type_name: &'static str,
        hook: &'static str,
        kind: HookKind,
        params: usize,
    },

    /// A lifecycle hook returned an error.
    #[error("{kind} hook {hook} failed for bean {bean}")]
    HookFailure {
        bean: String,
        hook: &'static str,
        kind: HookKind,
        #[source]
        source: BoxError,
    },

    /// Definition discovery could not complete.
    #[error(transparent)]
    DiscoveryFailure(#[from] DiscoveryError),

    /// A bean re-entered its own construction before it was exposed.
    #[error("Circular dependency: {}", .0.join(" -> "))]
    CircularDependency(Vec<String>),

    /// Creation chain deeper than the configured maximum.
    #[error("Max creation depth {0} exceeded")]
    DepthExceeded(usize),

    /// The container was torn down.
    #[error("Container has been destroyed")]
    Destroyed,
}

impl DiError {
    pub(crate) fn construction(bean: impl Into<String>, reason: impl Into<String>) -> Self {
        DiError::ConstructionFailure {
            bean: bean.into(),
            reason: reason.into(),
            source: None,
        }
    }

    pub(crate) fn construction_caused(
        bean: impl Into<String>,
        reason: impl Into<String>,
        source: BoxError,
    ) -> Self {
        DiError::ConstructionFailure {
            bean: bean.into(),
            reason: reason.into(),
            source: Some(source),
        }
    }
}

/// Errors raised while populating the definition registry.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// A type targeted for constructor-based registration has no
    /// no-argument constructor.
    #[error("Type {type_name} has no default constructor")]
    MissingConstructor { type_name: &'static str },

    /// The scanner failed for one of the declared namespaces.
    #[error("Error scanning namespace {namespace}")]
    Scan {
        namespace: String,
        #[source]
        source: ScanError,
    },
}

/// Code-unit scanner errors.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("I/O error reading {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A unit was found on disk or in an archive but no loadable type is
    /// registered under its qualified name.
    #[error("Unit not found during scan: {0}")]
    UnknownUnit(String),

    #[error("Invalid unit entry: {0}")]
    InvalidEntry(String),
}

/// Result type for container operations
pub type DiResult<T> = Result<T, DiError>;
