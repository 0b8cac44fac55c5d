//! Findings and the sink boundary.
//!
//! A [`Finding`] is built fresh for each annotation the checker detects and
//! handed straight to a [`FindingSink`]. The checker never reads findings
//! back.

use std::fmt;

use quacking_core::message::{MessageDefinition, NO_TYPE_HINTS};
use quacking_core::types::Position;
use serde::{Deserialize, Serialize};

use crate::nodes::AnnotationExpr;

// ============================================================================
// Annotation Site
// ============================================================================

/// Where an annotation was found.
///
/// Adding a site means adding a variant here plus one inspection routine in
/// the checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationSite {
    /// Parameter or return annotation.
    FunctionSignature,
    /// Inline or comment-style assignment annotation.
    VariableAssignment,
}

impl AnnotationSite {
    /// All sites, in declaration order.
    pub const ALL: [AnnotationSite; 2] = [
        AnnotationSite::FunctionSignature,
        AnnotationSite::VariableAssignment,
    ];

    /// The text substituted into the message template.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationSite::FunctionSignature => "function signatures",
            AnnotationSite::VariableAssignment => "variable assignments",
        }
    }
}

impl fmt::Display for AnnotationSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Finding
// ============================================================================

/// One banned annotation, located at the annotation expression itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Symbolic rule id (`no-type-hints`).
    pub rule_id: &'static str,
    /// Message code (`E3107`).
    pub msgid: &'static str,
    pub site: AnnotationSite,
    /// Position of the annotation expression.
    pub location: Position,
    /// The annotation expression that triggered the finding.
    pub node: AnnotationExpr,
    #[serde(skip)]
    definition: &'static MessageDefinition,
}

impl Finding {
    /// Human-readable message, e.g. `Type hints are banned in function signatures`.
    pub fn message(&self) -> String {
        self.definition.render(self.site.as_str())
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({}) {}",
            self.location,
            self.msgid,
            self.rule_id,
            self.message()
        )
    }
}

// ============================================================================
// Sink
// ============================================================================

/// Receiver for findings. Owned by the host.
pub trait FindingSink {
    fn record(&mut self, finding: Finding);
}

impl FindingSink for Vec<Finding> {
    fn record(&mut self, finding: Finding) {
        self.push(finding);
    }
}

impl<S: FindingSink + ?Sized> FindingSink for &mut S {
    fn record(&mut self, finding: Finding) {
        (**self).record(finding);
    }
}

// ============================================================================
// Emitter
// ============================================================================

/// Builds findings and forwards them to a sink. No filtering happens here.
#[derive(Debug, Clone, Copy)]
pub struct Emitter {
    definition: &'static MessageDefinition,
}

impl Default for Emitter {
    fn default() -> Self {
        Emitter {
            definition: &NO_TYPE_HINTS,
        }
    }
}

impl Emitter {
    /// Build the finding for an annotation found at `site`.
    pub fn finding(&self, site: AnnotationSite, node: &AnnotationExpr) -> Finding {
        Finding {
            rule_id: self.definition.symbol,
            msgid: self.definition.msgid,
            site,
            location: node.position,
            node: node.clone(),
            definition: self.definition,
        }
    }

    /// Build a finding and hand it to `sink`.
    pub fn emit<S: FindingSink + ?Sized>(
        &self,
        sink: &mut S,
        site: AnnotationSite,
        node: &AnnotationExpr,
    ) {
        sink.record(self.finding(site, node));
    }
}
