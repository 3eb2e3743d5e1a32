//! JVM descriptor and generic signature parsing.
//!
//! Grammar (JVMS 4.7.9.1), abbreviated:
//!
//! ```text
//! ClassSignature  = TypeParameters? ClassTypeSignature ClassTypeSignature*
//! MethodSignature = TypeParameters? '(' JavaType* ')' (JavaType | 'V') ('^' Ref)*
//! TypeParameter   = Ident ':' Ref? (':' Ref)*
//! Ref             = 'L' Ident ('/' Ident)* TypeArgs? ('.' Ident TypeArgs?)* ';'
//!                 | 'T' Ident ';'
//!                 | '[' JavaType
//! TypeArg         = '*' | ('+' | '-')? Ref
//! ```
//!
//! Plain descriptors are the subset without type parameters, type arguments
//! and type variables, so the same parser handles both. The output is a
//! syntax-level [`SigType`]; turning type variables into resolved
//! [`TypeVariable`](crate::types::TypeVariable)s needs the declaration
//! context and happens in the JVM model builder.

use jsolve_common::limits::MAX_SIGNATURE_DEPTH;
use jsolve_common::{PrimitiveKind, ResolveError, ResolveResult};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SigType {
    Base(PrimitiveKind),
    Void,
    Class(ClassSig),
    TypeVar(String),
    Array(Box<SigType>),
}

/// A class type; for `Outer<A>.Inner<B>` the internal name is `Outer$Inner`
/// and the arguments are those of the innermost segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassSig {
    /// Internal name with `/` separators, e.g. `java/util/Map$Entry`.
    pub internal_name: String,
    pub type_arguments: Vec<SigTypeArg>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SigTypeArg {
    Any,
    Exact(SigType),
    Extends(SigType),
    Super(SigType),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigTypeParam {
    pub name: String,
    pub class_bound: Option<SigType>,
    pub interface_bounds: Vec<SigType>,
}

impl SigTypeParam {
    /// Bounds in declaration order; the first one determines the erasure.
    pub fn bounds(&self) -> impl Iterator<Item = &SigType> + '_ {
        self.class_bound.iter().chain(self.interface_bounds.iter())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassSignature {
    pub type_parameters: Vec<SigTypeParam>,
    pub superclass: ClassSig,
    pub interfaces: Vec<ClassSig>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodSignature {
    pub type_parameters: Vec<SigTypeParam>,
    pub parameters: Vec<SigType>,
    pub return_type: SigType,
    pub throws: Vec<SigType>,
}

pub fn parse_class_signature(text: &str) -> ResolveResult<ClassSignature> {
    let mut parser = SignatureParser::new(text);
    let type_parameters = parser.type_parameters_opt()?;
    let superclass = parser.class_type()?;
    let mut interfaces = Vec::new();
    while !parser.at_end() {
        interfaces.push(parser.class_type()?);
    }
    Ok(ClassSignature {
        type_parameters,
        superclass,
        interfaces,
    })
}

/// Parse a generic method signature or a plain method descriptor.
pub fn parse_method_signature(text: &str) -> ResolveResult<MethodSignature> {
    let mut parser = SignatureParser::new(text);
    let type_parameters = parser.type_parameters_opt()?;
    parser.expect(b'(')?;
    let mut parameters = Vec::new();
    while parser.peek() != Some(b')') {
        parameters.push(parser.java_type()?);
    }
    parser.expect(b')')?;
    let return_type = if parser.eat(b'V') {
        SigType::Void
    } else {
        parser.java_type()?
    };
    let mut throws = Vec::new();
    while parser.eat(b'^') {
        throws.push(parser.reference_type()?);
    }
    parser.finish()?;
    Ok(MethodSignature {
        type_parameters,
        parameters,
        return_type,
        throws,
    })
}

/// Parse a generic field signature or a plain field descriptor.
pub fn parse_field_signature(text: &str) -> ResolveResult<SigType> {
    let mut parser = SignatureParser::new(text);
    let ty = parser.java_type()?;
    parser.finish()?;
    Ok(ty)
}

struct SignatureParser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: u32,
}

impl<'a> SignatureParser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            depth: 0,
        }
    }

    fn error(&self, reason: &str) -> ResolveError {
        ResolveError::configuration(
            format!("signature `{}`", self.text),
            format!("{reason} at offset {}", self.pos),
        )
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8) -> ResolveResult<()> {
        if self.eat(byte) {
            Ok(())
        } else {
            Err(self.error(&format!("expected `{}`", byte as char)))
        }
    }

    fn finish(&self) -> ResolveResult<()> {
        if self.at_end() {
            Ok(())
        } else {
            Err(self.error("trailing characters"))
        }
    }

    /// Identifier up to (not including) any of the given terminators.
    fn identifier(&mut self, terminators: &[u8]) -> ResolveResult<&'a str> {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if terminators.contains(&byte) {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error("expected identifier"));
        }
        Ok(&self.text[start..self.pos])
    }

    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> ResolveResult<T>) -> ResolveResult<T> {
        if self.depth >= MAX_SIGNATURE_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn type_parameters_opt(&mut self) -> ResolveResult<Vec<SigTypeParam>> {
        let mut params = Vec::new();
        if !self.eat(b'<') {
            return Ok(params);
        }
        while !self.eat(b'>') {
            let name = self.identifier(b":>")?.to_string();
            self.expect(b':')?;
            let class_bound = match self.peek() {
                Some(b'L' | b'T' | b'[') => Some(self.reference_type()?),
                _ => None,
            };
            let mut interface_bounds = Vec::new();
            while self.eat(b':') {
                interface_bounds.push(self.reference_type()?);
            }
            params.push(SigTypeParam {
                name,
                class_bound,
                interface_bounds,
            });
            if self.at_end() {
                return Err(self.error("unterminated type parameters"));
            }
        }
        Ok(params)
    }

    fn java_type(&mut self) -> ResolveResult<SigType> {
        let Some(byte) = self.peek() else {
            return Err(self.error("unexpected end"));
        };
        match PrimitiveKind::from_descriptor(byte as char) {
            Some(kind) => {
                self.pos += 1;
                Ok(SigType::Base(kind))
            }
            None => self.reference_type(),
        }
    }

    fn reference_type(&mut self) -> ResolveResult<SigType> {
        self.nested(|p| match p.peek() {
            Some(b'L') => Ok(SigType::Class(p.class_type()?)),
            Some(b'T') => {
                p.pos += 1;
                let name = p.identifier(b";")?.to_string();
                p.expect(b';')?;
                Ok(SigType::TypeVar(name))
            }
            Some(b'[') => {
                p.pos += 1;
                Ok(SigType::Array(Box::new(p.java_type()?)))
            }
            _ => Err(p.error("expected reference type")),
        })
    }

    fn class_type(&mut self) -> ResolveResult<ClassSig> {
        self.expect(b'L')?;
        let mut internal_name = self.identifier(b";<.")?.to_string();
        let mut type_arguments = self.type_arguments_opt()?;
        while self.eat(b'.') {
            let inner = self.identifier(b";<.")?;
            internal_name.push('$');
            internal_name.push_str(inner);
            type_arguments = self.type_arguments_opt()?;
        }
        self.expect(b';')?;
        Ok(ClassSig {
            internal_name,
            type_arguments,
        })
    }

    fn type_arguments_opt(&mut self) -> ResolveResult<Vec<SigTypeArg>> {
        let mut args = Vec::new();
        if !self.eat(b'<') {
            return Ok(args);
        }
        while !self.eat(b'>') {
            let arg = match self.peek() {
                Some(b'*') => {
                    self.pos += 1;
                    SigTypeArg::Any
                }
                Some(b'+') => {
                    self.pos += 1;
                    SigTypeArg::Extends(self.reference_type()?)
                }
                Some(b'-') => {
                    self.pos += 1;
                    SigTypeArg::Super(self.reference_type()?)
                }
                Some(_) => SigTypeArg::Exact(self.reference_type()?),
                None => return Err(self.error("unterminated type arguments")),
            };
            args.push(arg);
        }
        Ok(args)
    }
}

#[cfg(test)]
#[path = "../tests/signature_tests.rs"]
mod tests;
