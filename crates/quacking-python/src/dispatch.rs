//! Node-kind dispatch for the type-hint checker.
//!
//! The host walks its tree and, for every node of a kind the checker cares
//! about, wraps it in a [`Node`] and calls [`dispatch`]. One exhaustive
//! `match` maps each kind to its inspection routine, so adding a kind without
//! a routine is a compile error.
//!
//! Hosts that hand nodes over as JSON decode them with [`OwnedNode::from_json`]:
//!
//! ```ignore
//! let node = OwnedNode::from_json(r#"{"kind": "ann_assign", ... }"#)?;
//! dispatch(&checker, node.as_node(), &mut findings);
//! ```

use quacking_core::error::{QuackingError, QuackingResult};
use serde::{Deserialize, Serialize};

use crate::activation::Activation;
use crate::checker::{FunctionDefinition, TypeHintChecker};
use crate::finding::FindingSink;
use crate::nodes::{AnnAssign, Arguments, Assign, FunctionDef};

/// A borrowed node of a kind the checker inspects.
#[derive(Debug, Clone, Copy)]
pub enum Node<'n> {
    Arguments(&'n Arguments),
    AnnAssign(&'n AnnAssign),
    Assign(&'n Assign),
    FunctionDef(&'n FunctionDef),
    AsyncFunctionDef(&'n FunctionDef),
}

impl Node<'_> {
    /// The node kind tag, as used in JSON.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Arguments(_) => "arguments",
            Node::AnnAssign(_) => "ann_assign",
            Node::Assign(_) => "assign",
            Node::FunctionDef(_) => "function_def",
            Node::AsyncFunctionDef(_) => "async_function_def",
        }
    }
}

/// Call the inspection routine matching `node`.
pub fn dispatch<A, S>(checker: &TypeHintChecker<A>, node: Node<'_>, sink: &mut S)
where
    A: Activation,
    S: FindingSink + ?Sized,
{
    match node {
        Node::Arguments(args) => checker.inspect_arguments(args, sink),
        Node::AnnAssign(assign) => checker.inspect_annotated_assignment(assign, sink),
        Node::Assign(assign) => checker.inspect_legacy_annotated_assignment(assign, sink),
        Node::FunctionDef(def) => {
            checker.inspect_function_definition(FunctionDefinition::Sync(def), sink)
        }
        Node::AsyncFunctionDef(def) => {
            checker.inspect_function_definition(FunctionDefinition::Async(def), sink)
        }
    }
}

/// Dispatch a host-ordered sequence of nodes, one at a time.
pub fn dispatch_all<'n, A, S, I>(checker: &TypeHintChecker<A>, nodes: I, sink: &mut S)
where
    A: Activation,
    S: FindingSink + ?Sized,
    I: IntoIterator<Item = Node<'n>>,
{
    for node in nodes {
        dispatch(checker, node, sink);
    }
}

// ============================================================================
// Owned Nodes (host boundary)
// ============================================================================

/// Kind tags [`OwnedNode`] accepts.
pub const NODE_KINDS: [&str; 5] = [
    "arguments",
    "ann_assign",
    "assign",
    "function_def",
    "async_function_def",
];

/// An owned node decoded from the host, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OwnedNode {
    Arguments(Arguments),
    AnnAssign(AnnAssign),
    Assign(Assign),
    FunctionDef(FunctionDef),
    AsyncFunctionDef(FunctionDef),
}

impl OwnedNode {
    /// Decode a tagged node.
    ///
    /// Malformed JSON is a [`QuackingError::Json`]. A well-formed node with
    /// an unknown kind or a missing field is a contract violation: the host
    /// and checker disagree on the tree shape.
    pub fn from_json(json: &str) -> QuackingResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Decode a tagged node from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> QuackingResult<Self> {
        let kind = match value.get("kind") {
            Some(serde_json::Value::String(kind)) => kind.clone(),
            Some(other) => {
                return Err(QuackingError::contract_violation(
                    "<unknown>",
                    format!("`kind` must be a string, found {}", other),
                ))
            }
            None => {
                return Err(QuackingError::contract_violation(
                    "<unknown>",
                    "missing field `kind`",
                ))
            }
        };
        if !NODE_KINDS.contains(&kind.as_str()) {
            return Err(QuackingError::UnknownNodeKind { kind });
        }
        serde_json::from_value(value)
            .map_err(|e| QuackingError::contract_violation(kind, e.to_string()))
    }

    /// Decode a JSON array of tagged nodes, failing on the first bad one.
    pub fn list_from_json(json: &str) -> QuackingResult<Vec<Self>> {
        let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
        values.into_iter().map(Self::from_value).collect()
    }

    pub fn as_node(&self) -> Node<'_> {
        match self {
            OwnedNode::Arguments(args) => Node::Arguments(args),
            OwnedNode::AnnAssign(assign) => Node::AnnAssign(assign),
            OwnedNode::Assign(assign) => Node::Assign(assign),
            OwnedNode::FunctionDef(def) => Node::FunctionDef(def),
            OwnedNode::AsyncFunctionDef(def) => Node::AsyncFunctionDef(def),
        }
    }
}
