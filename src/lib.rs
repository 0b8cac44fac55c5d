//! Quacking: a lint rule that bans Python type hints.
//!
//! The host linter owns parsing, traversal, enable/disable state and message
//! rendering. This crate owns the rule: given the nodes the host visits, it
//! reports every PEP 484 annotation in function signatures and variable
//! assignments as a [`Finding`].
//!
//! ```ignore
//! use quacking::{dispatch, AlwaysActive, Node, TypeHintChecker};
//!
//! let checker = TypeHintChecker::new(AlwaysActive);
//! let mut findings = Vec::new();
//! dispatch(&checker, Node::AnnAssign(&stmt), &mut findings);
//! ```

// Core infrastructure - re-exported from quacking-core
pub use quacking_core::error;
pub use quacking_core::message;
pub use quacking_core::types;

// Python checker - re-exported from quacking-python
pub use quacking_python::activation;
pub use quacking_python::checker;
pub use quacking_python::finding;
pub use quacking_python::nodes;

pub use quacking_python::{
    dispatch, dispatch_all, Activation, ActivationFn, ActivationPolicy, AlwaysActive,
    AnnotationSite, Finding, FindingSink, FunctionDefinition, Node, OwnedNode,
    TypeHintChecker,
};

pub mod logging;
