//! Textual type expressions.
//!
//! Snapshots and fixtures write types as text: `java.util.Map<K, ? extends V>`,
//! `int[]`, `String`. Names resolve in this order:
//!
//! 1. primitive keywords, `void`, `null`, `Object`/`java.lang.Object`
//! 2. type parameters of the context abstraction
//! 3. qualified names
//! 4. unique simple names
//!
//! A parameterized reference must supply no arguments (raw) or exactly as
//! many arguments as the abstraction declares.

use crate::def::DefId;
use crate::model::ProjectModel;
use crate::types::{ClassRef, PrimitiveKind, TypeArgs, TypeData, TypeId, TypeParamKey, WildcardBound};
use suspect_common::limits::MAX_TYPE_EXPR_DEPTH;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TypeExprError {
    #[error("unexpected end of type expression '{0}'")]
    UnexpectedEnd(String),
    #[error("unexpected '{found}' at offset {offset} in '{text}'")]
    UnexpectedChar { text: String, found: char, offset: usize },
    #[error("cannot resolve type '{0}'")]
    UnknownType(String),
    #[error("type name '{name}' is ambiguous: {candidates:?}")]
    AmbiguousType { name: String, candidates: Vec<String> },
    #[error("'{name}' expects {expected} type arguments, found {found}")]
    ArityMismatch { name: String, expected: usize, found: usize },
    #[error("wildcard outside of a type argument list in '{0}'")]
    MisplacedWildcard(String),
    #[error("type expression '{0}' is nested too deeply")]
    TooDeep(String),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Token<'a> {
    Ident(&'a str),
    Dot,
    Comma,
    Less,
    Greater,
    Question,
    LeftBracket,
    RightBracket,
}

fn tokenize(text: &str) -> Result<Vec<(usize, Token<'_>)>, TypeExprError> {
    let mut tokens = Vec::new();
    let bytes = text.as_bytes();
    let mut pos = 0;
    while pos < bytes.len() {
        let ch = bytes[pos];
        let token = match ch {
            b' ' | b'\t' | b'\n' | b'\r' => {
                pos += 1;
                continue;
            }
            b'.' => Token::Dot,
            b',' => Token::Comma,
            b'<' => Token::Less,
            b'>' => Token::Greater,
            b'?' => Token::Question,
            b'[' => Token::LeftBracket,
            b']' => Token::RightBracket,
            c if c.is_ascii_alphabetic() || c == b'_' || c == b'$' => {
                let start = pos;
                while pos < bytes.len()
                    && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_' || bytes[pos] == b'$')
                {
                    pos += 1;
                }
                tokens.push((start, Token::Ident(&text[start..pos])));
                continue;
            }
            _ => {
                let found = text[pos..].chars().next().unwrap_or('?');
                return Err(TypeExprError::UnexpectedChar {
                    text: text.to_string(),
                    found,
                    offset: pos,
                });
            }
        };
        tokens.push((pos, token));
        pos += 1;
    }
    Ok(tokens)
}

struct TypeExprParser<'m, 't> {
    model: &'m ProjectModel,
    context: Option<DefId>,
    text: &'t str,
    tokens: Vec<(usize, Token<'t>)>,
    pos: usize,
}

impl<'m, 't> TypeExprParser<'m, 't> {
    fn peek(&self) -> Option<Token<'t>> {
        self.tokens.get(self.pos).map(|(_, token)| *token)
    }

    fn bump(&mut self) -> Option<Token<'t>> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    fn unexpected(&self) -> TypeExprError {
        match self.tokens.get(self.pos) {
            Some(&(offset, _)) => TypeExprError::UnexpectedChar {
                text: self.text.to_string(),
                found: self.text[offset..].chars().next().unwrap_or('?'),
                offset,
            },
            None => TypeExprError::UnexpectedEnd(self.text.to_string()),
        }
    }

    fn expect(&mut self, expected: Token<'t>) -> Result<(), TypeExprError> {
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn parse_type(&mut self, depth: u32) -> Result<TypeId, TypeExprError> {
        if depth > MAX_TYPE_EXPR_DEPTH {
            return Err(TypeExprError::TooDeep(self.text.to_string()));
        }
        let mut ty = match self.peek() {
            Some(Token::Ident(_)) => self.parse_named(depth)?,
            Some(Token::Question) => return Err(TypeExprError::MisplacedWildcard(self.text.to_string())),
            _ => return Err(self.unexpected()),
        };
        while self.peek() == Some(Token::LeftBracket) {
            self.bump();
            self.expect(Token::RightBracket)?;
            ty = self.model.types.intern(TypeData::Array(ty));
        }
        Ok(ty)
    }

    fn parse_type_argument(&mut self, depth: u32) -> Result<TypeId, TypeExprError> {
        if self.peek() != Some(Token::Question) {
            return self.parse_type(depth);
        }
        self.bump();
        let bound = match self.peek() {
            Some(Token::Ident("extends")) => {
                self.bump();
                WildcardBound::Extends(self.parse_type(depth + 1)?)
            }
            Some(Token::Ident("super")) => {
                self.bump();
                WildcardBound::Super(self.parse_type(depth + 1)?)
            }
            _ => WildcardBound::Unbounded,
        };
        Ok(self.model.types.intern(TypeData::Wildcard(bound)))
    }

    fn parse_named(&mut self, depth: u32) -> Result<TypeId, TypeExprError> {
        let mut name = String::new();
        loop {
            match self.bump() {
                Some(Token::Ident(segment)) => name.push_str(segment),
                _ => {
                    self.pos -= 1;
                    return Err(self.unexpected());
                }
            }
            if self.peek() != Some(Token::Dot) {
                break;
            }
            self.bump();
            name.push('.');
        }

        let mut args = TypeArgs::new();
        if self.peek() == Some(Token::Less) {
            self.bump();
            loop {
                args.push(self.parse_type_argument(depth + 1)?);
                match self.bump() {
                    Some(Token::Comma) => continue,
                    Some(Token::Greater) => break,
                    _ => {
                        self.pos -= 1;
                        return Err(self.unexpected());
                    }
                }
            }
        }

        if let Some(intrinsic) = self.intrinsic(&name) {
            if !args.is_empty() {
                return Err(TypeExprError::ArityMismatch {
                    name,
                    expected: 0,
                    found: args.len(),
                });
            }
            return Ok(intrinsic);
        }
        if let Some(param) = self.context_param(&name) {
            if !args.is_empty() {
                return Err(TypeExprError::ArityMismatch {
                    name,
                    expected: 0,
                    found: args.len(),
                });
            }
            return Ok(param);
        }

        let def = self.resolve_name(&name)?;
        let expected = self
            .model
            .defs
            .get(def)
            .map_or(0, |info| info.type_params.len());
        if !args.is_empty() && args.len() != expected {
            return Err(TypeExprError::ArityMismatch {
                name,
                expected,
                found: args.len(),
            });
        }
        Ok(self.model.types.intern(TypeData::Reference(ClassRef { def, args })))
    }

    fn intrinsic(&self, name: &str) -> Option<TypeId> {
        if let Some(kind) = PrimitiveKind::from_keyword(name) {
            return Some(kind.type_id());
        }
        match name {
            "void" => Some(TypeId::VOID),
            "null" => Some(TypeId::NULL),
            "Object" | "java.lang.Object" => Some(TypeId::OBJECT),
            _ => None,
        }
    }

    fn context_param(&self, name: &str) -> Option<TypeId> {
        let owner = self.context?;
        let info = self.model.defs.get(owner)?;
        let index = info.type_params.iter().position(|param| param.name == name)?;
        let key = TypeParamKey::new(owner, index as u32);
        Some(self.model.types.intern(TypeData::TypeParameter(key)))
    }

    fn resolve_name(&self, name: &str) -> Result<DefId, TypeExprError> {
        if let Some(def) = self.model.defs.lookup_name(name) {
            return Ok(def);
        }
        if name.contains('.') {
            return Err(TypeExprError::UnknownType(name.to_string()));
        }
        match self.model.defs.lookup_simple_name(name).as_slice() {
            [] => Err(TypeExprError::UnknownType(name.to_string())),
            [def] => Ok(*def),
            candidates => Err(TypeExprError::AmbiguousType {
                name: name.to_string(),
                candidates: candidates
                    .iter()
                    .filter_map(|def| self.model.defs.get(*def))
                    .map(|info| info.qualified_name)
                    .collect(),
            }),
        }
    }
}

impl ProjectModel {
    /// Parse a type expression. `context` supplies type parameter names.
    pub fn parse_type(&self, text: &str, context: Option<DefId>) -> Result<TypeId, TypeExprError> {
        let tokens = tokenize(text)?;
        let mut parser = TypeExprParser {
            model: self,
            context,
            text,
            tokens,
            pos: 0,
        };
        let ty = parser.parse_type(0)?;
        if parser.pos < parser.tokens.len() {
            return Err(parser.unexpected());
        }
        Ok(ty)
    }
}

#[cfg(test)]
#[path = "../tests/type_expr_tests.rs"]
mod tests;
