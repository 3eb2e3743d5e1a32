//! Shared JVM class model.
//!
//! Both the class-file solver and the runtime catalog describe types the way
//! a class file does: internal names, access flags, descriptors and optional
//! generic signatures. [`build_type_declaration`] turns such a description
//! into a [`TypeDeclaration`].

use crate::declarations::{
    ConstructorDeclaration, DeclarationOrigin, FieldDeclaration, MethodDeclaration,
    ParameterDeclaration, TypeDeclaration, TypeKind, TypeParameterDeclaration,
};
use crate::signature::{
    ClassSig, SigType, SigTypeArg, SigTypeParam, parse_class_signature, parse_field_signature,
    parse_method_signature,
};
use crate::types::{ReferenceType, ResolvedType, TypeParamOwner, TypeVariable, Wildcard};
use jsolve_common::ResolveResult;
use jsolve_syntax::Modifiers;
use std::sync::Arc;

/// Access flag bits (JVMS 4.1, 4.5, 4.6).
pub mod access {
    pub const PUBLIC: u16 = 0x0001;
    pub const PRIVATE: u16 = 0x0002;
    pub const PROTECTED: u16 = 0x0004;
    pub const STATIC: u16 = 0x0008;
    pub const FINAL: u16 = 0x0010;
    pub const SYNCHRONIZED: u16 = 0x0020;
    pub const VOLATILE: u16 = 0x0040;
    pub const BRIDGE: u16 = 0x0040;
    pub const TRANSIENT: u16 = 0x0080;
    pub const VARARGS: u16 = 0x0080;
    pub const NATIVE: u16 = 0x0100;
    pub const INTERFACE: u16 = 0x0200;
    pub const ABSTRACT: u16 = 0x0400;
    pub const STRICT: u16 = 0x0800;
    pub const SYNTHETIC: u16 = 0x1000;
    pub const ANNOTATION: u16 = 0x2000;
    pub const ENUM: u16 = 0x4000;
}

/// A class as described by a class file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JvmClass {
    /// Internal name, e.g. `java/util/Map$Entry`.
    pub internal_name: String,
    pub access: u16,
    pub signature: Option<String>,
    pub superclass: Option<String>,
    pub interfaces: Vec<String>,
    pub fields: Vec<JvmMember>,
    pub methods: Vec<JvmMember>,
    /// Internal names of member classes declared directly in this class.
    pub member_classes: Vec<String>,
    /// Access flags recorded for this class as a member of its outer class.
    pub inner_access: Option<u16>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JvmMember {
    pub name: String,
    pub access: u16,
    pub descriptor: String,
    pub signature: Option<String>,
}

impl JvmMember {
    fn is_synthetic(&self) -> bool {
        self.access & access::SYNTHETIC != 0
    }

    fn generic_or_descriptor(&self) -> &str {
        self.signature.as_deref().unwrap_or(&self.descriptor)
    }
}

/// `java/util/Map$Entry` -> `java.util.Map$Entry`
pub fn internal_to_binary(internal: &str) -> String {
    internal.replace('/', ".")
}

/// `java/util/Map$Entry` -> `java.util.Map.Entry`
pub fn internal_to_qualified(internal: &str) -> String {
    internal.replace(['/', '$'], ".")
}

pub fn reference_from_internal(internal: &str) -> ReferenceType {
    ReferenceType::new(
        internal_to_qualified(internal),
        internal_to_binary(internal),
        Vec::new(),
    )
}

#[derive(Clone, Copy)]
enum MemberKind {
    Type,
    Field,
    Method,
}

fn modifiers_from_access(flags: u16, kind: MemberKind) -> Modifiers {
    let mut modifiers = Modifiers::empty();
    let common = [
        (access::PUBLIC, Modifiers::PUBLIC),
        (access::PRIVATE, Modifiers::PRIVATE),
        (access::PROTECTED, Modifiers::PROTECTED),
        (access::STATIC, Modifiers::STATIC),
        (access::FINAL, Modifiers::FINAL),
        (access::ABSTRACT, Modifiers::ABSTRACT),
    ];
    for (bit, modifier) in common {
        if flags & bit != 0 {
            modifiers |= modifier;
        }
    }
    let specific: &[(u16, Modifiers)] = match kind {
        MemberKind::Type => &[],
        MemberKind::Field => &[
            (access::VOLATILE, Modifiers::VOLATILE),
            (access::TRANSIENT, Modifiers::TRANSIENT),
        ],
        MemberKind::Method => &[
            (access::SYNCHRONIZED, Modifiers::SYNCHRONIZED),
            (access::NATIVE, Modifiers::NATIVE),
            (access::STRICT, Modifiers::STRICTFP),
        ],
    };
    for &(bit, modifier) in specific {
        if flags & bit != 0 {
            modifiers |= modifier;
        }
    }
    modifiers
}

/// Build the declaration described by `class`.
pub fn build_type_declaration(
    class: &JvmClass,
    origin: DeclarationOrigin,
) -> ResolveResult<TypeDeclaration> {
    JvmModelBuilder::new(class, origin).build()
}

struct JvmModelBuilder<'a> {
    class: &'a JvmClass,
    qualified: Arc<str>,
    origin: DeclarationOrigin,
    class_params: Vec<TypeParameterDeclaration>,
}

impl<'a> JvmModelBuilder<'a> {
    fn new(class: &'a JvmClass, origin: DeclarationOrigin) -> Self {
        Self {
            class,
            qualified: internal_to_qualified(&class.internal_name).into(),
            origin,
            class_params: Vec::new(),
        }
    }

    fn build(mut self) -> ResolveResult<TypeDeclaration> {
        let class = self.class;
        let flags = class.access;
        let kind = if flags & access::ANNOTATION != 0 {
            TypeKind::Annotation
        } else if flags & access::INTERFACE != 0 {
            TypeKind::Interface
        } else if flags & access::ENUM != 0 {
            TypeKind::Enum
        } else {
            TypeKind::Class
        };

        let mut decl = TypeDeclaration::new(
            self.qualified.clone(),
            internal_to_binary(&class.internal_name),
            kind,
            self.origin.clone(),
        );
        decl.modifiers = modifiers_from_access(
            class.inner_access.unwrap_or(flags),
            MemberKind::Type,
        );

        match &class.signature {
            Some(signature) => {
                let parsed = parse_class_signature(signature)?;
                let owner = TypeParamOwner::Type(self.qualified.clone());
                self.class_params = self.type_parameters(&parsed.type_parameters, owner);
                decl.superclass = Some(self.class_sig(&parsed.superclass, &[]));
                decl.interfaces = parsed
                    .interfaces
                    .iter()
                    .map(|sig| self.class_sig(sig, &[]))
                    .collect();
            }
            None => {
                decl.superclass = class.superclass.as_deref().map(reference_from_internal);
                decl.interfaces = class
                    .interfaces
                    .iter()
                    .map(|name| reference_from_internal(name))
                    .collect();
            }
        }
        if decl.is_interface() || class.superclass.is_none() {
            decl.superclass = None;
        }
        decl.type_parameters = self.class_params.clone();

        for field in class.fields.iter().filter(|f| !f.is_synthetic()) {
            let ty = parse_field_signature(field.generic_or_descriptor())?;
            decl.fields.push(Arc::new(FieldDeclaration {
                name: field.name.as_str().into(),
                declaring_type: self.qualified.clone(),
                ty: self.convert(&ty, &[]),
                modifiers: modifiers_from_access(field.access, MemberKind::Field),
                origin: self.origin.clone(),
            }));
        }

        let is_interface = decl.is_interface();
        for (ordinal, method) in class.methods.iter().enumerate() {
            if method.is_synthetic()
                || method.access & access::BRIDGE != 0
                || method.name == "<clinit>"
            {
                continue;
            }
            let parsed = parse_method_signature(method.generic_or_descriptor())?;
            let owner = TypeParamOwner::Method {
                declaring_type: self.qualified.clone(),
                ordinal: ordinal as u32,
            };
            let method_params = self.type_parameters(&parsed.type_parameters, owner);
            let mut param_sigs = parsed.parameters.as_slice();
            if method.name == "<init>" && method.signature.is_none() {
                param_sigs = self.strip_outer_instance(param_sigs);
            }
            let is_varargs = method.access & access::VARARGS != 0;
            let parameters = param_sigs
                .iter()
                .enumerate()
                .map(|(i, sig)| ParameterDeclaration {
                    name: format!("arg{i}").into(),
                    ty: self.convert(sig, &method_params),
                    is_varargs: is_varargs && i + 1 == param_sigs.len(),
                    origin: self.origin.clone(),
                })
                .collect();
            let mut modifiers = modifiers_from_access(method.access, MemberKind::Method);
            if is_interface && !modifiers.is_abstract() && !modifiers.is_static() {
                modifiers |= Modifiers::DEFAULT;
            }

            if method.name == "<init>" {
                decl.constructors.push(Arc::new(ConstructorDeclaration {
                    declaring_type: self.qualified.clone(),
                    type_parameters: method_params,
                    parameters,
                    modifiers,
                    origin: self.origin.clone(),
                }));
            } else {
                let return_type = self.convert(&parsed.return_type, &method_params);
                decl.methods.push(Arc::new(MethodDeclaration {
                    name: method.name.as_str().into(),
                    declaring_type: self.qualified.clone(),
                    type_parameters: method_params,
                    parameters,
                    return_type,
                    modifiers,
                    origin: self.origin.clone(),
                }));
            }
        }

        decl.member_types = class
            .member_classes
            .iter()
            .map(|internal| internal_to_qualified(internal).into())
            .collect();
        Ok(decl)
    }

    /// Constructors of inner (non-static member) classes take the enclosing
    /// instance as a leading descriptor parameter.
    fn strip_outer_instance<'s>(&self, params: &'s [SigType]) -> &'s [SigType] {
        let Some(inner_access) = self.class.inner_access else {
            return params;
        };
        if inner_access & access::STATIC != 0 {
            return params;
        }
        let Some((outer, _)) = self.class.internal_name.rsplit_once('$') else {
            return params;
        };
        match params.first() {
            Some(SigType::Class(first)) if first.internal_name == outer => &params[1..],
            _ => params,
        }
    }

    fn type_parameters(
        &self,
        params: &[SigTypeParam],
        owner: TypeParamOwner,
    ) -> Vec<TypeParameterDeclaration> {
        // Erasures first: bounds may mention any parameter of the same list
        // (`<T extends Comparable<T>>`, `<K, V extends K>`).
        let erasures: Vec<ReferenceType> = (0..params.len())
            .map(|i| self.erasure_of(params, i))
            .collect();
        let mut declared: Vec<TypeParameterDeclaration> = params
            .iter()
            .zip(&erasures)
            .map(|(param, erasure)| TypeParameterDeclaration {
                name: param.name.as_str().into(),
                owner: owner.clone(),
                bounds: Vec::new(),
                erasure: erasure.clone(),
                origin: self.origin.clone(),
            })
            .collect();
        let bounds: Vec<Vec<ResolvedType>> = params
            .iter()
            .map(|param| {
                param
                    .bounds()
                    .map(|bound| self.convert(bound, &declared))
                    .collect()
            })
            .collect();
        for (decl, bounds) in declared.iter_mut().zip(bounds) {
            decl.bounds = bounds;
        }
        declared
    }

    fn erasure_of(&self, params: &[SigTypeParam], index: usize) -> ReferenceType {
        let mut current = &params[index];
        for _ in 0..=params.len() {
            match current.bounds().next() {
                Some(SigType::Class(class)) => return reference_from_internal(&class.internal_name),
                Some(SigType::TypeVar(name)) => {
                    if let Some(next) = params.iter().find(|p| &p.name == name) {
                        current = next;
                        continue;
                    }
                    if let Some(class_param) = self.class_params.iter().find(|p| &*p.name == name) {
                        return class_param.erasure.clone();
                    }
                    return ReferenceType::object();
                }
                _ => return ReferenceType::object(),
            }
        }
        ReferenceType::object()
    }

    fn lookup_variable(&self, name: &str, method_params: &[TypeParameterDeclaration]) -> TypeVariable {
        method_params
            .iter()
            .chain(self.class_params.iter())
            .find(|p| &*p.name == name)
            .map(TypeParameterDeclaration::as_type_variable)
            .unwrap_or_else(|| TypeVariable {
                // A parameter of an enclosing class.
                name: name.into(),
                owner: TypeParamOwner::Type(self.qualified.clone()),
                erasure: ReferenceType::object(),
            })
    }

    fn class_sig(&self, sig: &ClassSig, method_params: &[TypeParameterDeclaration]) -> ReferenceType {
        reference_from_internal(&sig.internal_name).with_arguments(
            sig.type_arguments
                .iter()
                .map(|arg| self.type_argument(arg, method_params))
                .collect(),
        )
    }

    fn type_argument(&self, arg: &SigTypeArg, method_params: &[TypeParameterDeclaration]) -> ResolvedType {
        match arg {
            SigTypeArg::Any => ResolvedType::Wildcard(Wildcard::Unbounded),
            SigTypeArg::Exact(ty) => self.convert(ty, method_params),
            SigTypeArg::Extends(ty) => {
                ResolvedType::Wildcard(Wildcard::Extends(Box::new(self.convert(ty, method_params))))
            }
            SigTypeArg::Super(ty) => {
                ResolvedType::Wildcard(Wildcard::Super(Box::new(self.convert(ty, method_params))))
            }
        }
    }

    fn convert(&self, sig: &SigType, method_params: &[TypeParameterDeclaration]) -> ResolvedType {
        match sig {
            SigType::Base(kind) => ResolvedType::Primitive(*kind),
            SigType::Void => ResolvedType::Void,
            SigType::Class(class) => ResolvedType::Reference(self.class_sig(class, method_params)),
            SigType::TypeVar(name) => {
                ResolvedType::TypeVariable(self.lookup_variable(name, method_params))
            }
            SigType::Array(component) => {
                ResolvedType::Array(Box::new(self.convert(component, method_params)))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/jvm_model_tests.rs"]
mod tests;
