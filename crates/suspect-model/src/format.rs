//! Presentable type text.
//!
//! Abstractions print by simple name, so `java.util.List<java.lang.String>`
//! reads as `List<String>`.

use crate::def::simple_name;
use crate::model::ProjectModel;
use crate::types::{TypeData, TypeId, WildcardBound};
use suspect_common::limits::MAX_TYPE_EXPR_DEPTH;

pub struct TypeFormatter<'a> {
    model: &'a ProjectModel,
}

impl<'a> TypeFormatter<'a> {
    pub const fn new(model: &'a ProjectModel) -> Self {
        Self { model }
    }

    pub fn format(&self, ty: TypeId) -> String {
        let mut out = String::new();
        self.write(ty, &mut out, 0);
        out
    }

    fn write(&self, ty: TypeId, out: &mut String, depth: u32) {
        if depth > MAX_TYPE_EXPR_DEPTH {
            out.push_str("...");
            return;
        }
        match &*self.model.types.lookup(ty) {
            TypeData::Error => out.push_str("<error>"),
            TypeData::Null => out.push_str("null"),
            TypeData::Top => out.push_str("Object"),
            TypeData::Void => out.push_str("void"),
            TypeData::Primitive(kind) => out.push_str(kind.keyword()),
            TypeData::Reference(class) => {
                match self.model.defs.get(class.def) {
                    Some(info) => out.push_str(info.simple_name()),
                    None => out.push_str("<unknown>"),
                }
                if !class.args.is_empty() {
                    out.push('<');
                    for (index, &arg) in class.args.iter().enumerate() {
                        if index > 0 {
                            out.push_str(", ");
                        }
                        self.write(arg, out, depth + 1);
                    }
                    out.push('>');
                }
            }
            TypeData::TypeParameter(key) => {
                let name = self
                    .model
                    .defs
                    .get(key.owner)
                    .and_then(|info| info.type_params.get(key.index as usize).map(|p| p.name.clone()));
                match name {
                    Some(name) => out.push_str(simple_name(&name)),
                    None => out.push_str("<unknown>"),
                }
            }
            TypeData::Wildcard(bound) => match bound {
                WildcardBound::Unbounded => out.push('?'),
                WildcardBound::Extends(upper) => {
                    out.push_str("? extends ");
                    self.write(*upper, out, depth + 1);
                }
                WildcardBound::Super(lower) => {
                    out.push_str("? super ");
                    self.write(*lower, out, depth + 1);
                }
            },
            TypeData::Captured(wildcard) => {
                out.push_str("capture of ");
                self.write(*wildcard, out, depth + 1);
            }
            TypeData::Array(element) => {
                self.write(*element, out, depth + 1);
                out.push_str("[]");
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod tests;
