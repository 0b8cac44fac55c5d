//! Python tree node kinds read by the type-hint checker.
//!
//! The host builds these records for each file it analyzes. They cover only
//! the fields the checker needs: positions and the nullable annotation slots.
//!
//! # Slots
//!
//! Every annotation slot is an `Option`. When nodes are decoded from JSON the
//! slot field must be present: `"returns": null` is an empty slot, while a
//! missing `returns` key means the host and checker disagree on the node
//! shape and decoding fails.

use quacking_core::types::Position;
use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize a slot that must be present but may be null.
///
/// Using `deserialize_with` turns off serde's "missing means None" default
/// for `Option` fields.
fn required_slot<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

// ============================================================================
// Annotation Expression
// ============================================================================

/// A type annotation expression, e.g. `int` or `'Dict[str, int]'`.
///
/// Findings are attributed to this node's own position, never to the
/// parameter or statement that carries it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnotationExpr {
    /// Source text of the annotation.
    pub source: String,
    /// Position of the annotation expression.
    #[serde(flatten)]
    pub position: Position,
}

impl AnnotationExpr {
    pub fn new(source: impl Into<String>, line: u32, col: u32) -> Self {
        AnnotationExpr {
            source: source.into(),
            position: Position::new(line, col),
        }
    }
}

// ============================================================================
// Parameters
// ============================================================================

/// How a parameter may be passed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Before a `/` marker.
    PositionalOnly,
    /// Ordinary positional-or-keyword parameter.
    #[default]
    Positional,
    /// After a `*` or `*args` marker.
    KeywordOnly,
}

/// A single parameter in a function signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(flatten)]
    pub position: Position,
    #[serde(default)]
    pub kind: ParamKind,
    #[serde(deserialize_with = "required_slot")]
    pub annotation: Option<AnnotationExpr>,
}

impl Param {
    /// Create an unannotated positional parameter.
    pub fn new(name: impl Into<String>, line: u32, col: u32) -> Self {
        Param {
            name: name.into(),
            position: Position::new(line, col),
            kind: ParamKind::Positional,
            annotation: None,
        }
    }

    /// Attach an annotation to this parameter.
    pub fn annotated(mut self, annotation: AnnotationExpr) -> Self {
        self.annotation = Some(annotation);
        self
    }

    /// Set the parameter kind.
    pub fn with_kind(mut self, kind: ParamKind) -> Self {
        self.kind = kind;
        self
    }
}

/// The parameter list of a function or method signature.
///
/// `params` holds positional-only, positional and keyword-only parameters in
/// declaration order. `*args` and `**kwargs` are held separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arguments {
    #[serde(flatten)]
    pub position: Position,
    pub params: Vec<Param>,
    #[serde(deserialize_with = "required_slot")]
    pub vararg: Option<Param>,
    #[serde(deserialize_with = "required_slot")]
    pub kwarg: Option<Param>,
}

impl Arguments {
    pub fn new(line: u32, col: u32, params: Vec<Param>) -> Self {
        Arguments {
            position: Position::new(line, col),
            params,
            vararg: None,
            kwarg: None,
        }
    }

    pub fn with_vararg(mut self, vararg: Param) -> Self {
        self.vararg = Some(vararg);
        self
    }

    pub fn with_kwarg(mut self, kwarg: Param) -> Self {
        self.kwarg = Some(kwarg);
        self
    }

    /// Annotation slots in declaration order, one per declared parameter:
    /// positional-only and positional parameters, `*args`, keyword-only
    /// parameters, then `**kwargs`.
    pub fn annotations(&self) -> impl Iterator<Item = Option<&AnnotationExpr>> {
        let keyword_only = |p: &&Param| p.kind == ParamKind::KeywordOnly;
        let leading = self.params.iter().filter(move |p| !keyword_only(p));
        let trailing = self.params.iter().filter(keyword_only);
        leading
            .chain(&self.vararg)
            .chain(trailing)
            .chain(&self.kwarg)
            .map(|p| p.annotation.as_ref())
    }
}

// ============================================================================
// Assignments
// ============================================================================

/// An inline-annotated assignment: `a: int = 2` or `a: int`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnAssign {
    #[serde(flatten)]
    pub position: Position,
    /// Source text of the assignment target.
    pub target: String,
    #[serde(deserialize_with = "required_slot")]
    pub annotation: Option<AnnotationExpr>,
}

impl AnnAssign {
    pub fn new(target: impl Into<String>, line: u32, col: u32) -> Self {
        AnnAssign {
            position: Position::new(line, col),
            target: target.into(),
            annotation: None,
        }
    }

    pub fn annotated(mut self, annotation: AnnotationExpr) -> Self {
        self.annotation = Some(annotation);
        self
    }
}

/// A plain assignment, possibly carrying a `# type:` comment annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assign {
    #[serde(flatten)]
    pub position: Position,
    /// Source text of each target, left to right.
    pub targets: Vec<String>,
    /// Annotation parsed from a trailing `# type:` comment.
    #[serde(deserialize_with = "required_slot")]
    pub type_annotation: Option<AnnotationExpr>,
}

impl Assign {
    pub fn new(targets: Vec<String>, line: u32, col: u32) -> Self {
        Assign {
            position: Position::new(line, col),
            targets,
            type_annotation: None,
        }
    }

    pub fn with_type_comment(mut self, annotation: AnnotationExpr) -> Self {
        self.type_annotation = Some(annotation);
        self
    }
}

// ============================================================================
// Function Definitions
// ============================================================================

/// A `def` or `async def` statement.
///
/// Whether the definition is async is carried by the node kind the host
/// dispatches, not by this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDef {
    #[serde(flatten)]
    pub position: Position,
    pub name: String,
    pub args: Arguments,
    #[serde(deserialize_with = "required_slot")]
    pub returns: Option<AnnotationExpr>,
}

impl FunctionDef {
    pub fn new(name: impl Into<String>, line: u32, col: u32, args: Arguments) -> Self {
        FunctionDef {
            position: Position::new(line, col),
            name: name.into(),
            args,
            returns: None,
        }
    }

    pub fn with_returns(mut self, returns: AnnotationExpr) -> Self {
        self.returns = Some(returns);
        self
    }
}
