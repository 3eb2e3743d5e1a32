//! Binary descriptors.
//!
//! ```text
//! int[][]                -> [[I
//! java.util.Map.Entry    -> Ljava/util/Map$Entry;
//! (String, int) -> void  -> (Ljava/lang/String;I)V
//! ```
//!
//! Type variables and wildcards render as the descriptor of their erasure.
//! Parsing lives in [`crate::signature`], since every descriptor is also a
//! valid signature.

use crate::types::ResolvedType;
use std::fmt::Write;

pub fn type_descriptor(ty: &ResolvedType) -> String {
    let mut out = String::new();
    write_type(ty, &mut out);
    out
}

pub fn method_descriptor(parameters: &[ResolvedType], return_type: &ResolvedType) -> String {
    let mut out = String::from("(");
    for parameter in parameters {
        write_type(parameter, &mut out);
    }
    out.push(')');
    write_type(return_type, &mut out);
    out
}

fn write_type(ty: &ResolvedType, out: &mut String) {
    match ty {
        ResolvedType::Primitive(kind) => out.push(kind.descriptor()),
        ResolvedType::Void => out.push('V'),
        ResolvedType::Array(component) => {
            out.push('[');
            write_type(component, out);
        }
        ResolvedType::Reference(reference) => {
            let _ = write!(out, "L{};", reference.binary_name.replace('.', "/"));
        }
        ResolvedType::Null => out.push_str("Ljava/lang/Object;"),
        ResolvedType::TypeVariable(_)
        | ResolvedType::Wildcard(_)
        | ResolvedType::Union(_)
        | ResolvedType::Intersection(_) => write_type(&ty.erasure(), out),
    }
}

#[cfg(test)]
#[path = "../tests/descriptor_tests.rs"]
mod tests;
