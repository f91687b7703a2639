//! Analysis session: lazily built registry plus per-call orchestration.

use crate::call_site::{CallSite, ExprId};
use crate::classifier::{Classification, ClassifyInput, classify};
use crate::matcher::{PatternMatch, match_call};
use crate::patterns::{PatternCatalog, PatternRegistry};
use rayon::prelude::*;
use std::sync::OnceLock;
use suspect_common::{ByteSpan, Diagnostic, diagnostic_codes};
use suspect_model::{MethodInfo, SearchScope, SymbolTable, TypeId};
use tracing::debug;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AnalyzerOptions {
    /// Report arguments that only reach the bound through a conversion.
    pub report_convertible: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            report_convertible: true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SuspicionKind {
    Convertible,
    Mismatch,
}

impl SuspicionKind {
    pub const fn code(self) -> u32 {
        match self {
            Self::Convertible => diagnostic_codes::SUSPICIOUS_CALL_TO,
            Self::Mismatch => diagnostic_codes::MAY_NOT_CONTAIN_OBJECTS_OF_TYPE,
        }
    }
}

/// A flagged call: the argument expression and what is wrong with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuspiciousCall {
    pub file: String,
    pub argument: ExprId,
    pub span: ByteSpan,
    pub kind: SuspicionKind,
    pub message: String,
}

impl SuspiciousCall {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::from_code(
            self.file.clone(),
            self.span.start,
            self.span.length,
            self.message.clone(),
            self.kind.code(),
        )
    }
}

/// One analysis run over a project.
///
/// The registry is built on first use and then shared read-only by every
/// call analyzed in the session, including calls analyzed in parallel.
pub struct AnalysisSession {
    catalog: PatternCatalog,
    scope: SearchScope,
    options: AnalyzerOptions,
    registry: OnceLock<PatternRegistry>,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new(AnalyzerOptions::default())
    }
}

impl AnalysisSession {
    pub fn new(options: AnalyzerOptions) -> Self {
        Self::with_catalog(PatternCatalog::default(), SearchScope::All, options)
    }

    pub fn with_catalog(catalog: PatternCatalog, scope: SearchScope, options: AnalyzerOptions) -> Self {
        Self {
            catalog,
            scope,
            options,
            registry: OnceLock::new(),
        }
    }

    pub const fn options(&self) -> AnalyzerOptions {
        self.options
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    pub fn is_built(&self) -> bool {
        self.registry.get().is_some()
    }

    /// Build the registry on first call; later calls return it unchanged.
    /// Concurrent first callers wait for the single build.
    pub fn ensure_built(&self, table: &dyn SymbolTable, scope: SearchScope) -> &PatternRegistry {
        self.registry
            .get_or_init(|| PatternRegistry::build(table, scope, &self.catalog))
    }

    pub fn analyze_call(&self, table: &dyn SymbolTable, call: &CallSite) -> Option<SuspiciousCall> {
        let argument = call.single_argument()?;
        let static_type = argument.static_type?;
        let receiver_type = call.receiver_type()?;
        let registry = self.ensure_built(table, self.scope);
        let matched = match_call(table, call, registry)?;
        let callee = table.method(call.callee)?;

        let classify_as = |argument_type: TypeId| {
            self.classify_argument(table, &matched, &callee, receiver_type, argument_type, argument.shape)
        };

        let plain = classify_as(static_type);
        let kind = match &plain {
            Classification::NoProblem => return None,
            Classification::ConvertibleWarning(_) => SuspicionKind::Convertible,
            Classification::DefiniteMismatch(_) => SuspicionKind::Mismatch,
        };
        if let Some(flow_type) = argument.flow_type {
            if !classify_as(flow_type).is_problem() {
                debug!(
                    file = %call.file,
                    start = argument.span.start,
                    "flow-refined argument type is compatible"
                );
                return None;
            }
        }

        let message = plain.message()?.to_string();
        Some(SuspiciousCall {
            file: call.file.clone(),
            argument: argument.expr,
            span: argument.span,
            kind,
            message,
        })
    }

    /// Analyze independent calls in parallel; findings keep input order.
    pub fn analyze_calls(&self, table: &dyn SymbolTable, calls: &[CallSite]) -> Vec<SuspiciousCall> {
        self.ensure_built(table, self.scope);
        calls
            .par_iter()
            .filter_map(|call| self.analyze_call(table, call))
            .collect()
    }

    fn classify_argument(
        &self,
        table: &dyn SymbolTable,
        matched: &PatternMatch<'_>,
        callee: &MethodInfo,
        receiver_type: TypeId,
        argument_type: TypeId,
        argument_shape: crate::call_site::ArgumentShape,
    ) -> Classification {
        classify(
            table,
            &ClassifyInput {
                argument_type,
                argument_shape,
                receiver_type,
                callee,
                matched,
                report_convertible: self.options.report_convertible,
            },
        )
    }
}

#[cfg(test)]
#[path = "../tests/session_tests.rs"]
mod tests;
