//! Project snapshots: a JSON description of the analyzed project's
//! abstractions and of the call sites to check.
//!
//! ```json
//! {
//!   "file": "src/Main.java",
//!   "abstractions": [
//!     { "name": "java.util.Collection", "kind": "interface", "typeParams": ["E"],
//!       "library": true,
//!       "methods": [{ "name": "contains", "params": ["Object"], "returns": "boolean" }] }
//!   ],
//!   "conversions": [{ "from": "example.Celsius", "to": "example.Kelvin" }],
//!   "iterableRoots": ["example.Bag"],
//!   "calls": [
//!     { "receiver": { "kind": "expr", "type": "java.util.Collection<String>" },
//!       "callee": "java.util.Collection#contains(Object)",
//!       "arguments": [{ "type": "Integer", "span": { "start": 120, "length": 2 } }] }
//!   ]
//! }
//! ```
//!
//! Types are written as type expressions and resolved after every
//! abstraction is declared, so declaration order does not matter.

use serde::Deserialize;
use smallvec::SmallVec;
use suspect_checker::{Argument, ArgumentShape, CallSite, ExprId, Receiver};
use suspect_common::ByteSpan;
use suspect_model::{
    AbstractionFlags, AbstractionKind, DefId, MethodId, MethodSignature, ModelError, ProjectModel,
    SymbolTable, TypeArgs, TypeData, TypeExprError, TypeId,
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate abstraction '{0}'")]
    DuplicateAbstraction(String),
    #[error("{context}: {source}")]
    Model {
        context: String,
        #[source]
        source: ModelError,
    },
    #[error("{context}: {source}")]
    Type {
        context: String,
        #[source]
        source: TypeExprError,
    },
    #[error("'{0}' does not name a class or interface")]
    NotAnAbstraction(String),
    #[error("malformed method reference '{0}', expected 'Owner#name(Param, ...)'")]
    MalformedMethodRef(String),
    #[error("no method matches '{0}'")]
    UnknownMethod(String),
}

// =============================================================================
// Wire format
// =============================================================================

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Snapshot {
    /// Source file reported for calls that do not name their own.
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub abstractions: Vec<AbstractionEntry>,
    #[serde(default)]
    pub conversions: Vec<ConversionEntry>,
    #[serde(default)]
    pub iterable_roots: Vec<String>,
    #[serde(default)]
    pub calls: Vec<CallEntry>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindEntry {
    #[default]
    Class,
    Interface,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TypeParamEntry {
    Name(String),
    Bounded { name: String, bound: String },
}

impl TypeParamEntry {
    fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Bounded { name, .. } => name,
        }
    }

    fn bound(&self) -> Option<&str> {
        match self {
            Self::Name(_) => None,
            Self::Bounded { bound, .. } => Some(bound),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AbstractionEntry {
    pub name: String,
    #[serde(default)]
    pub kind: KindEntry,
    #[serde(default)]
    pub type_params: Vec<TypeParamEntry>,
    #[serde(default)]
    pub supertypes: Vec<String>,
    #[serde(default)]
    pub methods: Vec<MethodEntry>,
    #[serde(default, rename = "final")]
    pub is_final: bool,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    /// Declared by a dependency rather than by the analyzed project.
    #[serde(default)]
    pub library: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MethodEntry {
    pub name: String,
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default = "void_type")]
    pub returns: String,
}

fn void_type() -> String {
    "void".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversionEntry {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReceiverEntry {
    Implicit,
    This,
    Super,
    Expr {
        #[serde(rename = "type")]
        ty: String,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CallEntry {
    #[serde(default)]
    pub file: Option<String>,
    pub receiver: ReceiverEntry,
    /// `Owner#name(Param, ...)`.
    pub callee: String,
    #[serde(default)]
    pub enclosing: Option<String>,
    pub arguments: Vec<ArgumentEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ArgumentEntry {
    /// Host expression id; defaults to the call's position in the snapshot.
    #[serde(default)]
    pub id: Option<u32>,
    /// Static type, or absent when the host could not type the argument.
    #[serde(default, rename = "type")]
    pub ty: Option<String>,
    #[serde(default)]
    pub flow_type: Option<String>,
    #[serde(default)]
    pub conditional: bool,
    #[serde(default)]
    pub poly: bool,
    #[serde(default)]
    pub span: ByteSpan,
}

// =============================================================================
// Loading
// =============================================================================

/// A snapshot turned into a symbol table plus the calls to analyze.
pub struct LoadedSnapshot {
    pub model: ProjectModel,
    pub calls: Vec<CallSite>,
}

impl Snapshot {
    pub fn from_json(source: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Build the project model and resolve every call. `default_file` names
    /// the calls that carry no `file` of their own and no top-level `file`
    /// is set.
    pub fn load(&self, default_file: &str) -> Result<LoadedSnapshot, SnapshotError> {
        let model = ProjectModel::new();
        let defs = self.declare_abstractions(&model)?;
        for (entry, &def) in self.abstractions.iter().zip(&defs) {
            populate_abstraction(&model, def, entry)?;
        }
        for conversion in &self.conversions {
            let from = resolve_abstraction(&model, &conversion.from, None)?;
            let to = resolve_abstraction(&model, &conversion.to, None)?;
            model.declare_conversion(from, to);
        }
        for root in &self.iterable_roots {
            model.add_iterable_root(root);
        }

        let file = self.file.as_deref().unwrap_or(default_file);
        let calls = self
            .calls
            .iter()
            .enumerate()
            .map(|(index, call)| load_call(&model, call, index, file))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            abstractions = defs.len(),
            calls = calls.len(),
            "snapshot loaded"
        );
        Ok(LoadedSnapshot { model, calls })
    }

    fn declare_abstractions(&self, model: &ProjectModel) -> Result<Vec<DefId>, SnapshotError> {
        let mut defs = Vec::with_capacity(self.abstractions.len());
        for entry in &self.abstractions {
            if model.definitions().lookup_name(&entry.name).is_some() {
                return Err(SnapshotError::DuplicateAbstraction(entry.name.clone()));
            }
            let kind = match entry.kind {
                KindEntry::Class => AbstractionKind::Class,
                KindEntry::Interface => AbstractionKind::Interface,
            };
            let params: Vec<&str> = entry.type_params.iter().map(TypeParamEntry::name).collect();
            defs.push(model.declare(&entry.name, kind, &params));
        }
        Ok(defs)
    }
}

fn populate_abstraction(
    model: &ProjectModel,
    def: DefId,
    entry: &AbstractionEntry,
) -> Result<(), SnapshotError> {
    let in_entry = |source: ModelError| SnapshotError::Model {
        context: entry.name.clone(),
        source,
    };

    let mut flags = AbstractionFlags::empty();
    flags.set(AbstractionFlags::FINAL, entry.is_final);
    flags.set(AbstractionFlags::ABSTRACT, entry.is_abstract);
    flags.set(AbstractionFlags::LIBRARY, entry.library);
    model.set_flags(def, flags).map_err(in_entry)?;

    for (index, param) in entry.type_params.iter().enumerate() {
        if let Some(bound) = param.bound() {
            model.set_type_param_bound(def, index, bound).map_err(in_entry)?;
        }
    }
    for supertype in &entry.supertypes {
        model.add_supertype(def, supertype).map_err(in_entry)?;
    }
    for method in &entry.methods {
        let params: Vec<&str> = method.params.iter().map(String::as_str).collect();
        model
            .add_method(def, &method.name, &params, &method.returns)
            .map_err(|source| SnapshotError::Model {
                context: format!("{}#{}", entry.name, method.name),
                source,
            })?;
    }
    Ok(())
}

fn load_call(
    model: &ProjectModel,
    call: &CallEntry,
    index: usize,
    default_file: &str,
) -> Result<CallSite, SnapshotError> {
    let callee = resolve_method_ref(model, &call.callee)?;
    let enclosing_method = call
        .enclosing
        .as_deref()
        .map(|text| resolve_method_ref(model, text))
        .transpose()?;
    // Types at the call site may mention the enclosing abstraction's
    // type parameters.
    let context = enclosing_method
        .and_then(|method| model.method(method))
        .map(|method| method.owner);

    let receiver = match &call.receiver {
        ReceiverEntry::Implicit => Receiver::Implicit,
        ReceiverEntry::This => Receiver::This,
        ReceiverEntry::Super => Receiver::Super,
        ReceiverEntry::Expr { ty } => Receiver::Expr(parse_in(model, ty, context)?),
    };

    let arguments = call
        .arguments
        .iter()
        .map(|argument| -> Result<Argument, SnapshotError> {
            Ok(Argument {
                expr: ExprId(argument.id.unwrap_or(index as u32)),
                static_type: argument
                    .ty
                    .as_deref()
                    .map(|ty| parse_in(model, ty, context))
                    .transpose()?,
                flow_type: argument
                    .flow_type
                    .as_deref()
                    .map(|ty| parse_in(model, ty, context))
                    .transpose()?,
                shape: if argument.conditional {
                    ArgumentShape::Conditional {
                        poly: argument.poly,
                    }
                } else {
                    ArgumentShape::Plain
                },
                span: argument.span,
            })
        })
        .collect::<Result<SmallVec<[Argument; 1]>, _>>()?;

    Ok(CallSite {
        file: call.file.clone().unwrap_or_else(|| default_file.to_string()),
        receiver,
        callee,
        enclosing_method,
        arguments,
    })
}

fn parse_in(model: &ProjectModel, text: &str, context: Option<DefId>) -> Result<TypeId, SnapshotError> {
    model
        .parse_type(text, context)
        .map_err(|source| SnapshotError::Type {
            context: text.to_string(),
            source,
        })
}

fn resolve_abstraction(
    model: &ProjectModel,
    name: &str,
    context: Option<DefId>,
) -> Result<DefId, SnapshotError> {
    let ty = parse_in(model, name, context)?;
    match &*model.type_data(ty) {
        TypeData::Reference(class) => Ok(class.def),
        _ => Err(SnapshotError::NotAnAbstraction(name.to_string())),
    }
}

/// Parts of an `Owner#name(Param, ...)` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRef<'a> {
    pub owner: &'a str,
    pub name: &'a str,
    pub params: Vec<&'a str>,
}

pub fn parse_method_ref(text: &str) -> Result<MethodRef<'_>, SnapshotError> {
    let malformed = || SnapshotError::MalformedMethodRef(text.to_string());
    let (owner, rest) = text.split_once('#').ok_or_else(malformed)?;
    let (name, params) = rest.split_once('(').ok_or_else(malformed)?;
    let params = params.trim_end().strip_suffix(')').ok_or_else(malformed)?;
    let (owner, name) = (owner.trim(), name.trim());
    if owner.is_empty() || name.is_empty() {
        return Err(malformed());
    }
    Ok(MethodRef {
        owner,
        name,
        params: split_top_level(params).ok_or_else(malformed)?,
    })
}

/// Split on commas outside `<...>`. `None` on unbalanced brackets.
fn split_top_level(list: &str) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0u32;
    let mut start = 0;
    for (offset, ch) in list.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                parts.push(list[start..offset].trim());
                start = offset + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    let last = list[start..].trim();
    if !last.is_empty() || !parts.is_empty() {
        parts.push(last);
    }
    if parts.iter().any(|part| part.is_empty()) {
        return None;
    }
    Some(parts)
}

fn resolve_method_ref(model: &ProjectModel, text: &str) -> Result<MethodId, SnapshotError> {
    let reference = parse_method_ref(text)?;
    let owner = resolve_abstraction(model, reference.owner, None)?;
    let params = reference
        .params
        .iter()
        .map(|param| parse_in(model, param, Some(owner)))
        .collect::<Result<TypeArgs, _>>()?;
    let signature = MethodSignature::new(reference.name, params);
    model
        .find_method_by_signature(owner, &signature)
        .ok_or_else(|| SnapshotError::UnknownMethod(text.to_string()))
}

#[cfg(test)]
#[path = "../tests/snapshot_tests.rs"]
mod tests;
