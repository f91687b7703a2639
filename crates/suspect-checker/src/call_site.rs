//! Call sites as handed to the analyzer by the host.

use smallvec::SmallVec;
use suspect_common::ByteSpan;
use suspect_model::{MethodId, TypeId};

/// Host-assigned identity of an expression, echoed back in findings.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(pub u32);

/// Syntactic shape of an argument expression, as far as the analyzer cares.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ArgumentShape {
    #[default]
    Plain,
    /// `cond ? a : b`. `poly` marks a conditional whose type came from
    /// poly-expression inference rather than from its branches.
    Conditional { poly: bool },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Argument {
    pub expr: ExprId,
    /// Static type; `None` when the host could not type the expression.
    pub static_type: Option<TypeId>,
    /// Narrower type proven by the host's flow analysis, if any.
    pub flow_type: Option<TypeId>,
    pub shape: ArgumentShape,
    pub span: ByteSpan,
}

impl Argument {
    pub fn new(expr: ExprId, static_type: TypeId, span: ByteSpan) -> Self {
        Self {
            expr,
            static_type: Some(static_type),
            flow_type: None,
            shape: ArgumentShape::Plain,
            span,
        }
    }

    #[must_use]
    pub fn with_flow_type(mut self, flow_type: TypeId) -> Self {
        self.flow_type = Some(flow_type);
        self
    }

    #[must_use]
    pub fn with_shape(mut self, shape: ArgumentShape) -> Self {
        self.shape = shape;
        self
    }
}

/// Qualifier of a method call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Receiver {
    /// Unqualified call: `contains(x)`.
    Implicit,
    This,
    Super,
    /// Any other qualifier expression, with its static type.
    Expr(TypeId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallSite {
    pub file: String,
    pub receiver: Receiver,
    /// Statically resolved callee; may be declared in a subtype of the
    /// abstraction that declares the pattern operation.
    pub callee: MethodId,
    /// Method lexically enclosing the call.
    pub enclosing_method: Option<MethodId>,
    pub arguments: SmallVec<[Argument; 1]>,
}

impl CallSite {
    pub fn new(file: impl Into<String>, receiver: Receiver, callee: MethodId, argument: Argument) -> Self {
        let mut arguments = SmallVec::new();
        arguments.push(argument);
        Self {
            file: file.into(),
            receiver,
            callee,
            enclosing_method: None,
            arguments,
        }
    }

    #[must_use]
    pub fn inside(mut self, enclosing_method: MethodId) -> Self {
        self.enclosing_method = Some(enclosing_method);
        self
    }

    /// The single argument of a one-argument call.
    pub fn single_argument(&self) -> Option<&Argument> {
        match self.arguments.as_slice() {
            [argument] => Some(argument),
            _ => None,
        }
    }

    /// Receiver type when the call is qualified by an ordinary expression.
    pub const fn receiver_type(&self) -> Option<TypeId> {
        match self.receiver {
            Receiver::Expr(ty) => Some(ty),
            Receiver::Implicit | Receiver::This | Receiver::Super => None,
        }
    }
}
