//! The `no-type-hints` checker.
//!
//! [`TypeHintChecker`] exposes one inspection routine per node kind that can
//! carry an annotation. The host's traversal calls the matching routine once
//! per node (see [`crate::dispatch`]); routines never descend into nested
//! scopes themselves.
//!
//! # What is Reported?
//!
//! - **Parameters**: `def foo(x: int, *args: str, k: bytes, **kwargs: str)`
//! - **Return types**: `def foo() -> int`
//! - **Variable annotations**: `x: int = 5`
//! - **Type comments**: `x = 5  # type: int`
//!
//! Each routine asks the activation predicate once, at the node's own line,
//! before looking at any slot. When the rule is inactive the sink is never
//! touched.

use quacking_core::message::NO_TYPE_HINTS;
use quacking_core::types::Position;
use tracing::{debug, trace};

use crate::activation::Activation;
use crate::finding::{AnnotationSite, Emitter, FindingSink};
use crate::nodes::{AnnAssign, AnnotationExpr, Arguments, Assign, FunctionDef};

// ============================================================================
// Function Definition Variant
// ============================================================================

/// Whether a definition was written with `def` or `async def`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Sync,
    Async,
}

/// A function definition of either kind.
///
/// Both variants expose the same fields, so the checker handles them with a
/// single routine.
#[derive(Debug, Clone, Copy)]
pub enum FunctionDefinition<'n> {
    Sync(&'n FunctionDef),
    Async(&'n FunctionDef),
}

impl<'n> FunctionDefinition<'n> {
    pub fn def(&self) -> &'n FunctionDef {
        match self {
            FunctionDefinition::Sync(def) | FunctionDefinition::Async(def) => def,
        }
    }

    pub fn kind(&self) -> FunctionKind {
        match self {
            FunctionDefinition::Sync(_) => FunctionKind::Sync,
            FunctionDefinition::Async(_) => FunctionKind::Async,
        }
    }
}

// ============================================================================
// Checker
// ============================================================================

/// Detects PEP 484 type hints and reports each one as a finding.
///
/// Holds only the injected activation predicate; nothing carries over
/// between calls. Every non-empty slot on an active node is reported.
#[derive(Debug, Clone)]
pub struct TypeHintChecker<A> {
    activation: A,
    emitter: Emitter,
}

impl<A: Activation> TypeHintChecker<A> {
    pub fn new(activation: A) -> Self {
        TypeHintChecker {
            activation,
            emitter: Emitter::default(),
        }
    }

    /// Check parameter annotations in declaration order: positional slots
    /// left to right, `*args`, keyword-only slots, then `**kwargs`.
    pub fn inspect_arguments<S: FindingSink + ?Sized>(&self, node: &Arguments, sink: &mut S) {
        if !self.is_active("arguments", node.position) {
            return;
        }
        for annotation in node.annotations().flatten() {
            self.report(sink, AnnotationSite::FunctionSignature, annotation);
        }
    }

    /// Check an inline-annotated assignment (`a: int = 2`).
    pub fn inspect_annotated_assignment<S: FindingSink + ?Sized>(
        &self,
        node: &AnnAssign,
        sink: &mut S,
    ) {
        if !self.is_active("ann_assign", node.position) {
            return;
        }
        if let Some(annotation) = &node.annotation {
            self.report(sink, AnnotationSite::VariableAssignment, annotation);
        }
    }

    /// Check an assignment's `# type:` comment annotation.
    ///
    /// Independent of [`inspect_annotated_assignment`]: if a host attaches
    /// both forms to one statement, each routine reports its own.
    ///
    /// [`inspect_annotated_assignment`]: Self::inspect_annotated_assignment
    pub fn inspect_legacy_annotated_assignment<S: FindingSink + ?Sized>(
        &self,
        node: &Assign,
        sink: &mut S,
    ) {
        if !self.is_active("assign", node.position) {
            return;
        }
        if let Some(annotation) = &node.type_annotation {
            self.report(sink, AnnotationSite::VariableAssignment, annotation);
        }
    }

    /// Check a function's return annotation. `def` and `async def` are
    /// handled identically.
    pub fn inspect_function_definition<S: FindingSink + ?Sized>(
        &self,
        node: FunctionDefinition<'_>,
        sink: &mut S,
    ) {
        let def = node.def();
        let kind = match node.kind() {
            FunctionKind::Sync => "function_def",
            FunctionKind::Async => "async_function_def",
        };
        if !self.is_active(kind, def.position) {
            return;
        }
        if let Some(returns) = &def.returns {
            self.report(sink, AnnotationSite::FunctionSignature, returns);
        }
    }

    fn is_active(&self, node_kind: &str, position: Position) -> bool {
        let active = self.activation.is_active(NO_TYPE_HINTS.symbol, position.line);
        if !active {
            debug!(
                "{} disabled at line {}, skipping {} node",
                NO_TYPE_HINTS.symbol, position.line, node_kind
            );
        }
        active
    }

    fn report<S: FindingSink + ?Sized>(
        &self,
        sink: &mut S,
        site: AnnotationSite,
        annotation: &AnnotationExpr,
    ) {
        trace!(
            site = site.as_str(),
            line = annotation.position.line,
            col = annotation.position.col,
            "type hint `{}`",
            annotation.source
        );
        self.emitter.emit(sink, site, annotation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::{ActivationFn, AlwaysActive};
    use crate::finding::Finding;
    use crate::nodes::{Param, ParamKind};
    use std::cell::Cell;

    fn locations(findings: &[Finding]) -> Vec<Position> {
        findings.iter().map(|f| f.location).collect()
    }

    fn annotated_args() -> Arguments {
        // def foo(bar: int, quux: int=3, *args: 'List[int]', **kwargs: 'Dict[str, int]') -> int:
        Arguments::new(
            1,
            8,
            vec![
                Param::new("bar", 1, 8).annotated(AnnotationExpr::new("int", 1, 13)),
                Param::new("quux", 1, 18).annotated(AnnotationExpr::new("int", 1, 24)),
            ],
        )
        .with_vararg(
            Param::new("args", 1, 32).annotated(AnnotationExpr::new("'List[int]'", 1, 38)),
        )
        .with_kwarg(
            Param::new("kwargs", 1, 53).annotated(AnnotationExpr::new("'Dict[str, int]'", 1, 61)),
        )
    }

    #[test]
    fn test_arguments_order_positional_then_star_then_double_star() {
        let checker = TypeHintChecker::new(AlwaysActive);
        let mut sink = Vec::new();
        checker.inspect_arguments(&annotated_args(), &mut sink);

        assert_eq!(
            locations(&sink),
            vec![
                Position::new(1, 13),
                Position::new(1, 24),
                Position::new(1, 38),
                Position::new(1, 61),
            ]
        );
        assert!(sink
            .iter()
            .all(|f| f.site == AnnotationSite::FunctionSignature));
    }

    #[test]
    fn test_arguments_keyword_only_after_star_args() {
        // def f(a: int, *args: str, k: bytes, **kw: T):
        let args = Arguments::new(
            1,
            6,
            vec![
                Param::new("a", 1, 6).annotated(AnnotationExpr::new("int", 1, 9)),
                Param::new("k", 1, 26)
                    .with_kind(ParamKind::KeywordOnly)
                    .annotated(AnnotationExpr::new("bytes", 1, 29)),
            ],
        )
        .with_vararg(Param::new("args", 1, 15).annotated(AnnotationExpr::new("str", 1, 21)))
        .with_kwarg(Param::new("kw", 1, 38).annotated(AnnotationExpr::new("T", 1, 42)));

        let checker = TypeHintChecker::new(AlwaysActive);
        let mut sink = Vec::new();
        checker.inspect_arguments(&args, &mut sink);

        let sources: Vec<_> = sink.iter().map(|f| f.node.source.as_str()).collect();
        assert_eq!(sources, vec!["int", "str", "bytes", "T"]);
        assert_eq!(
            locations(&sink),
            vec![
                Position::new(1, 9),
                Position::new(1, 21),
                Position::new(1, 29),
                Position::new(1, 42),
            ]
        );
    }

    #[test]
    fn test_arguments_skips_empty_slots() {
        // def foo(a, b: int, c, *rest, **kw: str):
        let args = Arguments::new(
            1,
            8,
            vec![
                Param::new("a", 1, 8),
                Param::new("b", 1, 11).annotated(AnnotationExpr::new("int", 1, 14)),
                Param::new("c", 1, 19),
            ],
        )
        .with_vararg(Param::new("rest", 1, 23))
        .with_kwarg(Param::new("kw", 1, 31).annotated(AnnotationExpr::new("str", 1, 35)));

        let checker = TypeHintChecker::new(AlwaysActive);
        let mut sink = Vec::new();
        checker.inspect_arguments(&args, &mut sink);

        assert_eq!(
            locations(&sink),
            vec![Position::new(1, 14), Position::new(1, 35)]
        );
    }

    #[test]
    fn test_arguments_without_annotations() {
        let params = vec![Param::new("bar", 1, 8), Param::new("flubber", 1, 13)];
        let args = Arguments::new(1, 8, params);
        let checker = TypeHintChecker::new(AlwaysActive);
        let mut sink = Vec::new();
        checker.inspect_arguments(&args, &mut sink);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_annotated_assignment() {
        let node = AnnAssign::new("a", 1, 0).annotated(AnnotationExpr::new("int", 1, 3));
        let checker = TypeHintChecker::new(AlwaysActive);
        let mut sink = Vec::new();
        checker.inspect_annotated_assignment(&node, &mut sink);

        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].site, AnnotationSite::VariableAssignment);
        assert_eq!(sink[0].location, Position::new(1, 3));
    }

    #[test]
    fn test_annotated_assignment_empty_slot() {
        let node = AnnAssign::new("a", 1, 0);
        let checker = TypeHintChecker::new(AlwaysActive);
        let mut sink = Vec::new();
        checker.inspect_annotated_assignment(&node, &mut sink);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_legacy_annotated_assignment() {
        let node = Assign::new(vec!["b".to_string()], 1, 0)
            .with_type_comment(AnnotationExpr::new("int", 1, 15));
        let checker = TypeHintChecker::new(AlwaysActive);
        let mut sink = Vec::new();
        checker.inspect_legacy_annotated_assignment(&node, &mut sink);

        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].site, AnnotationSite::VariableAssignment);
        assert_eq!(sink[0].location, Position::new(1, 15));
        assert_eq!(sink[0].node.source, "int");
    }

    #[test]
    fn test_function_return_sync_and_async_match() {
        let def = FunctionDef::new("foo", 1, 0, annotated_args())
            .with_returns(AnnotationExpr::new("int", 1, 82));
        let checker = TypeHintChecker::new(AlwaysActive);

        let mut sync_sink = Vec::new();
        checker.inspect_function_definition(FunctionDefinition::Sync(&def), &mut sync_sink);
        let mut async_sink = Vec::new();
        checker.inspect_function_definition(FunctionDefinition::Async(&def), &mut async_sink);

        assert_eq!(sync_sink.len(), 1);
        assert_eq!(sync_sink[0].location, Position::new(1, 82));
        assert_eq!(sync_sink[0].site, AnnotationSite::FunctionSignature);
        assert_eq!(sync_sink, async_sink);
    }

    #[test]
    fn test_function_definition_ignores_parameters() {
        // Parameters are reported through inspect_arguments only.
        let def = FunctionDef::new("foo", 1, 0, annotated_args());
        let checker = TypeHintChecker::new(AlwaysActive);
        let mut sink = Vec::new();
        checker.inspect_function_definition(FunctionDefinition::Sync(&def), &mut sink);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_inactive_rule_is_a_no_op() {
        let calls = Cell::new(0);
        let never = ActivationFn(|rule: &str, _line: u32| {
            calls.set(calls.get() + 1);
            assert_eq!(rule, "no-type-hints");
            false
        });
        let checker = TypeHintChecker::new(never);
        let mut sink = Vec::new();

        checker.inspect_arguments(&annotated_args(), &mut sink);
        checker.inspect_annotated_assignment(
            &AnnAssign::new("a", 1, 0).annotated(AnnotationExpr::new("int", 1, 3)),
            &mut sink,
        );
        checker.inspect_legacy_annotated_assignment(
            &Assign::new(vec!["b".to_string()], 1, 0)
                .with_type_comment(AnnotationExpr::new("int", 1, 15)),
            &mut sink,
        );
        let def = FunctionDef::new("foo", 1, 0, annotated_args())
            .with_returns(AnnotationExpr::new("int", 1, 82));
        checker.inspect_function_definition(FunctionDefinition::Async(&def), &mut sink);

        assert!(sink.is_empty());
        // One activation query per call, never per slot.
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn test_activation_queried_at_node_line() {
        // x: (
        //     str
        // ) = "a"
        let seen = Cell::new(0);
        let activation = ActivationFn(|_: &str, line: u32| {
            seen.set(line);
            line != 4
        });
        let checker = TypeHintChecker::new(activation);
        let mut sink = Vec::new();
        checker.inspect_annotated_assignment(
            &AnnAssign::new("x", 4, 0).annotated(AnnotationExpr::new("str", 5, 4)),
            &mut sink,
        );
        assert_eq!(seen.get(), 4);
        assert!(sink.is_empty());

        // Moved up a line, the statement is active even though its
        // annotation now sits on the disabled line.
        checker.inspect_annotated_assignment(
            &AnnAssign::new("x", 3, 0).annotated(AnnotationExpr::new("str", 4, 4)),
            &mut sink,
        );
        assert_eq!(seen.get(), 3);
        assert_eq!(locations(&sink), vec![Position::new(4, 4)]);
    }

    #[test]
    fn test_non_empty_slot_on_active_node_is_reported_once() {
        let checker = TypeHintChecker::new(AlwaysActive);
        let def = FunctionDef::new("foo", 1, 0, annotated_args())
            .with_returns(AnnotationExpr::new("int", 1, 82));

        let mut sink = Vec::new();
        checker.inspect_annotated_assignment(
            &AnnAssign::new("a", 1, 0).annotated(AnnotationExpr::new("int", 1, 3)),
            &mut sink,
        );
        assert_eq!(sink.len(), 1);
        checker.inspect_legacy_annotated_assignment(
            &Assign::new(vec!["b".to_string()], 2, 0)
                .with_type_comment(AnnotationExpr::new("int", 2, 15)),
            &mut sink,
        );
        assert_eq!(sink.len(), 2);
        checker.inspect_function_definition(FunctionDefinition::Sync(&def), &mut sink);
        assert_eq!(sink.len(), 3);
        checker.inspect_arguments(&def.args, &mut sink);
        assert_eq!(sink.len(), 7);

        let sites: Vec<_> = sink.iter().map(|f| f.site).collect();
        assert_eq!(
            sites[..2],
            [AnnotationSite::VariableAssignment, AnnotationSite::VariableAssignment]
        );
        assert!(sites[2..]
            .iter()
            .all(|s| *s == AnnotationSite::FunctionSignature));
    }

    #[test]
    fn test_calls_do_not_share_findings() {
        let checker = TypeHintChecker::new(AlwaysActive);
        let node = AnnAssign::new("a", 1, 0).annotated(AnnotationExpr::new("int", 1, 3));

        let mut first = Vec::new();
        checker.inspect_annotated_assignment(&node, &mut first);
        let mut second = Vec::new();
        checker.inspect_annotated_assignment(&node, &mut second);

        assert_eq!(first, second);
        assert_eq!(second.len(), 1);
    }
}
