//! Python type-hint checker for quacking.
//!
//! This crate provides:
//! - Node kinds the checker reads ([`nodes`])
//! - The `no-type-hints` checker ([`checker`])
//! - Node-kind dispatch and host-boundary decoding ([`dispatch`])
//! - Findings and the sink interface ([`finding`])
//! - Activation predicates ([`activation`])

pub mod activation;
pub mod checker;
pub mod dispatch;
pub mod finding;
pub mod nodes;

pub use activation::{Activation, ActivationFn, ActivationPolicy, AlwaysActive, LineRange};
pub use checker::{FunctionDefinition, FunctionKind, TypeHintChecker};
pub use dispatch::{dispatch, dispatch_all, Node, OwnedNode, NODE_KINDS};
pub use finding::{AnnotationSite, Emitter, Finding, FindingSink};
pub use nodes::{AnnAssign, AnnotationExpr, Arguments, Assign, FunctionDef, Param, ParamKind};
