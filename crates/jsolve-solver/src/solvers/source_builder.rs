//! Turning syntax into declarations.
//!
//! [`TypeNameQualifier`] maps type names written in a source unit to
//! qualified references and translates type nodes into [`ResolvedType`]s.
//! Simple names are looked up in this order:
//!
//! 1. type parameters of the enclosing methods and types
//! 2. member types of the enclosing types, innermost first (and, in
//!    semantic mode, member types they inherit)
//! 3. top-level types of the same unit
//! 4. single-type imports
//! 5. types of the same package
//! 6. on-demand imports
//! 7. `java.lang`
//!
//! A dotted name whose first segment is not a type is read as fully
//! qualified. Existence checks go through [`TypeSolver::has_type`] on the
//! root solver, which never builds declarations, so qualifying names while
//! building a declaration cannot recurse into building another.

use super::TypeSolver;
use super::source::qualified_name_of;
use crate::declarations::{
    ConstructorDeclaration, DeclarationOrigin, FieldDeclaration, MethodDeclaration,
    ParameterDeclaration, TypeDeclaration, TypeKind, TypeParameterDeclaration,
};
use crate::hierarchy::Hierarchy;
use crate::members::MemberLookup;
use crate::types::{
    ENUM, OBJECT, ReferenceType, ResolvedType, STRING, TypeParamOwner, TypeVariable, Wildcard,
};
use jsolve_common::limits::MAX_SUBSTITUTION_DEPTH;
use jsolve_common::{ResolveError, ResolveResult, SourceLocation};
use jsolve_syntax::{Modifiers, NodeIndex, NodeList, SourceUnit, SyntaxKind, TypeDeclData};
use std::sync::Arc;
use tracing::trace;

/// Binary name of the type `qualified`: the first prefix the solver knows
/// is the top-level type, the remaining segments are nested with `$`. When
/// no prefix is known, the first capitalized segment is taken as top-level.
pub fn binary_name_of(solver: &dyn TypeSolver, qualified: &str) -> Arc<str> {
    let segments: Vec<&str> = qualified.split('.').collect();
    let top_level = (1..=segments.len())
        .find(|&end| solver.has_type(&segments[..end].join(".")))
        .or_else(|| {
            segments
                .iter()
                .position(|s| s.starts_with(|c: char| c.is_ascii_uppercase()))
                .map(|i| i + 1)
        })
        .unwrap_or(segments.len());
    let (outer, nested) = segments.split_at(top_level);
    let mut binary = outer.join(".");
    for segment in nested {
        binary.push('$');
        binary.push_str(segment);
    }
    binary.into()
}

/// Qualifies type names in one source unit.
#[derive(Clone, Copy)]
pub struct TypeNameQualifier<'a> {
    solver: &'a dyn TypeSolver,
    unit: &'a SourceUnit,
    /// Unknown names fail instead of being guessed.
    strict: bool,
    /// Consult member types inherited by the enclosing types.
    inherited: bool,
}

impl<'a> TypeNameQualifier<'a> {
    /// Syntactic mode used while building declarations: unknown names are
    /// kept as best-guess references, inherited member types are not seen.
    pub fn syntactic(solver: &'a dyn TypeSolver, unit: &'a SourceUnit) -> Self {
        Self {
            solver,
            unit,
            strict: false,
            inherited: false,
        }
    }

    /// Semantic mode used by queries: unknown names are unsolved symbols,
    /// inherited member types are visible.
    pub fn semantic(solver: &'a dyn TypeSolver, unit: &'a SourceUnit) -> Self {
        Self {
            solver,
            unit,
            strict: true,
            inherited: true,
        }
    }

    pub fn solver(&self) -> &'a dyn TypeSolver {
        self.solver
    }

    pub fn unit(&self) -> &'a SourceUnit {
        self.unit
    }

    fn location(&self, node: NodeIndex) -> SourceLocation {
        self.unit.location_of(node)
    }

    // -------------------------------------------------------------------------
    // Type nodes
    // -------------------------------------------------------------------------

    /// Translate a type node. `var` is not a type here; callers infer it.
    pub fn resolve_type(&self, node: NodeIndex) -> ResolveResult<ResolvedType> {
        let arena = self.unit.arena();
        let Some(header) = arena.get(node) else {
            return Err(ResolveError::unsupported("missing type", self.location(node)));
        };
        match header.kind {
            SyntaxKind::PrimitiveType => arena
                .get_primitive_type(header)
                .map(|data| ResolvedType::Primitive(data.kind))
                .ok_or_else(|| ResolveError::unsupported("primitive type", self.location(node))),
            SyntaxKind::VoidType => Ok(ResolvedType::Void),
            SyntaxKind::ArrayType => {
                let component = arena
                    .get_array_type(header)
                    .map(|data| data.component)
                    .unwrap_or(NodeIndex::NONE);
                Ok(ResolvedType::Array(Box::new(self.resolve_type(component)?)))
            }
            SyntaxKind::WildcardType => {
                let Some(data) = arena.get_wildcard(header) else {
                    return Ok(ResolvedType::Wildcard(Wildcard::Unbounded));
                };
                let wildcard = if data.extended.is_some() {
                    Wildcard::Extends(Box::new(self.resolve_type(data.extended)?))
                } else if data.super_bound.is_some() {
                    Wildcard::Super(Box::new(self.resolve_type(data.super_bound)?))
                } else {
                    Wildcard::Unbounded
                };
                Ok(ResolvedType::Wildcard(wildcard))
            }
            SyntaxKind::UnionType | SyntaxKind::IntersectionType => {
                let elements = arena
                    .get_type_list(header)
                    .map(|data| data.elements.iter().collect::<Vec<_>>())
                    .unwrap_or_default()
                    .into_iter()
                    .map(|element| self.resolve_type(element))
                    .collect::<ResolveResult<Vec<_>>>()?;
                Ok(if header.kind == SyntaxKind::UnionType {
                    ResolvedType::Union(elements)
                } else {
                    ResolvedType::Intersection(elements)
                })
            }
            SyntaxKind::ClassOrInterfaceType => self.resolve_class_type(node),
            other => Err(ResolveError::unsupported(
                format!("{} as a type", other.name()),
                self.location(node),
            )),
        }
    }

    fn resolve_class_type(&self, node: NodeIndex) -> ResolveResult<ResolvedType> {
        let arena = self.unit.arena();
        let segments = self.segments_of(node);
        let data = arena.get(node).and_then(|n| arena.get_class_type(n));

        if let [single] = segments.as_slice()
            && let Some(param) = self.type_parameter_in_scope(single, node)
        {
            return Ok(ResolvedType::TypeVariable(self.type_variable(param)?));
        }

        let dotted = segments.join(".");
        let reference = self.qualify_or_guess(&dotted, node)?;
        let arguments = match data.and_then(|d| d.type_arguments.as_ref()) {
            Some(list) => list
                .iter()
                .map(|arg| self.resolve_type(arg))
                .collect::<ResolveResult<Vec<_>>>()?,
            None => Vec::new(),
        };
        Ok(ResolvedType::Reference(reference.with_arguments(arguments)))
    }

    /// Name segments of a (possibly qualified) class type node, outermost
    /// first.
    pub fn segments_of(&self, node: NodeIndex) -> Vec<String> {
        let arena = self.unit.arena();
        let mut segments = Vec::new();
        let mut current = node;
        while let Some(data) = arena.get(current).and_then(|n| arena.get_class_type(n)) {
            segments.push(data.name.clone());
            current = data.scope;
        }
        segments.reverse();
        segments
    }

    // -------------------------------------------------------------------------
    // Names
    // -------------------------------------------------------------------------

    fn qualify_or_guess(&self, name: &str, context: NodeIndex) -> ResolveResult<ReferenceType> {
        if let Some(found) = self.qualify(name, context)? {
            return Ok(found);
        }
        if self.strict {
            return Err(ResolveError::unsolved(name, self.location(context)));
        }
        let guess = if name.contains('.') {
            name.to_string()
        } else {
            match self.unit.package_name() {
                Some(package) => format!("{package}.{name}"),
                None => name.to_string(),
            }
        };
        trace!(name, %guess, "unknown type name kept as written");
        Ok(ReferenceType::new(guess.as_str(), binary_name_of(self.solver, &guess), Vec::new()))
    }

    /// The raw type a (possibly dotted) type name denotes at `context`.
    pub fn qualify(&self, name: &str, context: NodeIndex) -> ResolveResult<Option<ReferenceType>> {
        let mut segments = name.split('.');
        let first = segments.next().unwrap_or_default();
        let rest: Vec<&str> = segments.collect();

        if let Some(mut current) = self.qualify_simple(first, context)? {
            for segment in &rest {
                match self.member_of(&current, segment)? {
                    Some(member) => current = member,
                    None => return Ok(None),
                }
            }
            return Ok(Some(current));
        }
        if rest.is_empty() {
            return Ok(None);
        }

        // Fully qualified: the shortest known prefix is the top-level type.
        let all: Vec<&str> = name.split('.').collect();
        for end in 2..=all.len() {
            let prefix = all[..end].join(".");
            if !self.solver.has_type(&prefix) {
                continue;
            }
            let mut current = ReferenceType::top_level(prefix.as_str());
            for segment in &all[end..] {
                match self.member_of(&current, segment)? {
                    Some(member) => current = member,
                    None => return Ok(None),
                }
            }
            return Ok(Some(current));
        }
        Ok(None)
    }

    fn qualify_simple(&self, name: &str, context: NodeIndex) -> ResolveResult<Option<ReferenceType>> {
        let arena = self.unit.arena();
        let navigator = self.unit.navigator();

        let enclosing = std::iter::once(context)
            .chain(navigator.ancestors(context))
            .filter(|&n| arena.kind_of(n).is_some_and(SyntaxKind::is_type_declaration));
        for type_node in enclosing {
            if let Some(member) = navigator
                .member_types(type_node)
                .find(|&m| arena.name_of(m) == Some(name))
                && let Some((qualified, binary)) = qualified_name_of(self.unit, member)
            {
                return Ok(Some(ReferenceType::new(qualified, binary, Vec::new())));
            }
            if self.inherited
                && let Some((qualified, binary)) = qualified_name_of(self.unit, type_node)
            {
                let owner = ReferenceType::new(qualified, binary, Vec::new());
                let lookup = MemberLookup::new(Hierarchy::new(self.solver));
                if let Some(found) = lookup.member_type(&owner, name)? {
                    return Ok(Some(found));
                }
            }
        }

        for top in self.unit.types().iter() {
            if arena.name_of(top) == Some(name)
                && let Some((qualified, binary)) = qualified_name_of(self.unit, top)
            {
                return Ok(Some(ReferenceType::new(qualified, binary, Vec::new())));
            }
        }

        for import in self.unit.imports().filter(|i| !i.is_asterisk) {
            let matches = import.name.rsplit('.').next() == Some(name);
            if !matches || (import.is_static && !self.solver.has_type(&import.name)) {
                continue;
            }
            return Ok(Some(self.known(&import.name)));
        }

        let same_package = match self.unit.package_name() {
            Some(package) => format!("{package}.{name}"),
            None => name.to_string(),
        };
        if self.solver.has_type(&same_package) {
            return Ok(Some(self.known(&same_package)));
        }

        for import in self.unit.imports().filter(|i| i.is_asterisk) {
            let candidate = format!("{}.{name}", import.name);
            if self.solver.has_type(&candidate) {
                return Ok(Some(self.known(&candidate)));
            }
        }

        let implicit = format!("java.lang.{name}");
        if self.solver.has_type(&implicit) {
            return Ok(Some(self.known(&implicit)));
        }
        Ok(None)
    }

    fn known(&self, qualified: &str) -> ReferenceType {
        ReferenceType::new(qualified, binary_name_of(self.solver, qualified), Vec::new())
    }

    /// Member type `simple` of `owner`, declared or (semantic mode)
    /// inherited.
    pub fn member_of(&self, owner: &ReferenceType, simple: &str) -> ResolveResult<Option<ReferenceType>> {
        let candidate = owner.erased().member(simple);
        if self.solver.has_type(&candidate.qualified_name) {
            return Ok(Some(candidate));
        }
        if self.inherited && self.solver.has_type(&owner.qualified_name) {
            return MemberLookup::new(Hierarchy::new(self.solver)).member_type(owner, simple);
        }
        Ok(None)
    }

    // -------------------------------------------------------------------------
    // Type parameters
    // -------------------------------------------------------------------------

    /// The type parameter node named `name` visible at `context`.
    pub fn type_parameter_in_scope(&self, name: &str, context: NodeIndex) -> Option<NodeIndex> {
        let arena = self.unit.arena();
        std::iter::once(context)
            .chain(self.unit.navigator().ancestors(context))
            .find_map(|n| {
                let header = arena.get(n)?;
                let params = if header.kind.is_type_declaration() {
                    &arena.get_type_decl(header)?.type_parameters
                } else if header.kind.is_callable_declaration() {
                    &arena.get_method(header)?.type_parameters
                } else {
                    return None;
                };
                params.iter().find(|&p| arena.name_of(p) == Some(name))
            })
    }

    pub fn type_variable(&self, param: NodeIndex) -> ResolveResult<TypeVariable> {
        let name = self.unit.arena().name_of(param).unwrap_or_default();
        Ok(TypeVariable {
            name: name.into(),
            owner: self.owner_of(param)?,
            erasure: self.erasure_of(param, 0)?,
        })
    }

    pub fn type_parameter(&self, param: NodeIndex) -> ResolveResult<TypeParameterDeclaration> {
        let arena = self.unit.arena();
        let bounds = arena
            .get(param)
            .and_then(|n| arena.get_type_parameter(n))
            .map(|data| data.bounds.iter().collect::<Vec<_>>())
            .unwrap_or_default()
            .into_iter()
            .map(|bound| self.resolve_type(bound))
            .collect::<ResolveResult<Vec<_>>>()?;
        let variable = self.type_variable(param)?;
        Ok(TypeParameterDeclaration {
            name: variable.name,
            owner: variable.owner,
            bounds,
            erasure: variable.erasure,
            origin: DeclarationOrigin::Source(self.unit.node_ref(param)),
        })
    }

    fn owner_of(&self, param: NodeIndex) -> ResolveResult<TypeParamOwner> {
        let arena = self.unit.arena();
        let navigator = self.unit.navigator();
        let parent = navigator.parent(param).unwrap_or(NodeIndex::NONE);
        let kind = arena.kind_of(parent);
        if kind.is_some_and(SyntaxKind::is_type_declaration) {
            return Ok(TypeParamOwner::Type(self.declaring_name(parent)?));
        }
        let type_node = navigator.enclosing_type(parent).unwrap_or(NodeIndex::NONE);
        let ordinal = arena
            .get(type_node)
            .and_then(|n| arena.get_type_decl(n))
            .and_then(|data| data.members.position(parent))
            .unwrap_or_default();
        Ok(TypeParamOwner::Method {
            declaring_type: self.declaring_name(type_node)?,
            ordinal: ordinal as u32,
        })
    }

    fn declaring_name(&self, type_node: NodeIndex) -> ResolveResult<Arc<str>> {
        match qualified_name_of(self.unit, type_node) {
            Some((qualified, _)) => Ok(qualified),
            None => Err(ResolveError::unsupported(
                "local or anonymous class",
                self.location(type_node),
            )),
        }
    }

    /// Raw leftmost bound. Only names are qualified here: bounds such as
    /// `Comparable<T>` mention the parameter itself.
    fn erasure_of(&self, param: NodeIndex, depth: u32) -> ResolveResult<ReferenceType> {
        if depth > MAX_SUBSTITUTION_DEPTH {
            return Ok(ReferenceType::object());
        }
        let arena = self.unit.arena();
        let Some(first) = arena
            .get(param)
            .and_then(|n| arena.get_type_parameter(n))
            .and_then(|data| data.bounds.get(0))
        else {
            return Ok(ReferenceType::object());
        };
        if !arena.is_kind(first, SyntaxKind::ClassOrInterfaceType) {
            return Ok(ReferenceType::object());
        }
        let segments = self.segments_of(first);
        if let [single] = segments.as_slice()
            && let Some(next) = self.type_parameter_in_scope(single, first)
        {
            return self.erasure_of(next, depth + 1);
        }
        self.qualify_or_guess(&segments.join("."), first)
    }
}

// =============================================================================
// Declaration building
// =============================================================================

/// Build the declaration of the type declaration `node` in `unit`.
pub(crate) fn build_source_declaration(
    solver: &dyn TypeSolver,
    unit: &SourceUnit,
    node: NodeIndex,
    qualified: Arc<str>,
    binary: Arc<str>,
) -> ResolveResult<TypeDeclaration> {
    let arena = unit.arena();
    let header = arena
        .get(node)
        .ok_or_else(|| ResolveError::unsupported("missing type declaration", unit.location_of(node)))?;
    let data = arena
        .get_type_decl(header)
        .ok_or_else(|| ResolveError::unsupported(header.kind.name(), unit.location_of(node)))?;
    let kind = match header.kind {
        SyntaxKind::EnumDeclaration => TypeKind::Enum,
        SyntaxKind::AnnotationDeclaration => TypeKind::Annotation,
        _ if data.is_interface => TypeKind::Interface,
        _ => TypeKind::Class,
    };
    SourceDeclarationBuilder {
        qualifier: TypeNameQualifier::syntactic(solver, unit),
        unit,
        node,
        data,
        kind,
        decl: TypeDeclaration::new(
            qualified,
            binary,
            kind,
            DeclarationOrigin::Source(unit.node_ref(node)),
        ),
    }
    .build()
}

struct SourceDeclarationBuilder<'a> {
    qualifier: TypeNameQualifier<'a>,
    unit: &'a SourceUnit,
    node: NodeIndex,
    data: &'a TypeDeclData,
    kind: TypeKind,
    decl: TypeDeclaration,
}

impl<'a> SourceDeclarationBuilder<'a> {
    fn origin(&self, node: NodeIndex) -> DeclarationOrigin {
        DeclarationOrigin::Source(self.unit.node_ref(node))
    }

    fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface | TypeKind::Annotation)
    }

    fn build(mut self) -> ResolveResult<TypeDeclaration> {
        let unit = self.unit;
        let data = self.data;
        let arena = unit.arena();

        self.decl.modifiers = self.type_modifiers();
        self.decl.type_parameters = self.type_parameters(&data.type_parameters)?;
        self.supertypes()?;

        for member in data.members.iter() {
            let Some(kind) = arena.kind_of(member) else {
                continue;
            };
            match kind {
                SyntaxKind::FieldDeclaration => self.fields(member)?,
                SyntaxKind::MethodDeclaration => self.method(member)?,
                SyntaxKind::ConstructorDeclaration => self.constructor(member)?,
                kind if kind.is_type_declaration() => {
                    if let Some((qualified, _)) = qualified_name_of(unit, member) {
                        self.decl.member_types.push(qualified);
                    }
                }
                _ => {}
            }
        }
        if self.kind == TypeKind::Enum {
            self.enum_members();
        }
        if self.decl.constructors.is_empty() && !self.is_interface() {
            self.default_constructor();
        }
        trace!(
            name = %self.decl.qualified_name,
            fields = self.decl.fields.len(),
            methods = self.decl.methods.len(),
            "built source declaration"
        );
        Ok(self.decl)
    }

    fn type_modifiers(&self) -> Modifiers {
        let arena = self.unit.arena();
        let mut modifiers = self.data.modifiers;
        let parent = self.unit.navigator().parent(self.node).unwrap_or(NodeIndex::NONE);
        if let Some(outer) = arena.get(parent).filter(|h| h.kind.is_type_declaration()) {
            let in_interface = outer.kind == SyntaxKind::AnnotationDeclaration
                || arena.get_type_decl(outer).is_some_and(|d| d.is_interface);
            if in_interface {
                modifiers |= Modifiers::PUBLIC | Modifiers::STATIC;
            }
            if self.kind != TypeKind::Class {
                modifiers |= Modifiers::STATIC;
            }
        }
        if self.is_interface() {
            modifiers |= Modifiers::ABSTRACT;
        }
        modifiers
    }

    fn type_parameters(&self, list: &NodeList) -> ResolveResult<Vec<TypeParameterDeclaration>> {
        list.iter()
            .map(|param| self.qualifier.type_parameter(param))
            .collect()
    }

    fn references(&self, list: &NodeList) -> ResolveResult<Vec<ReferenceType>> {
        let mut out = Vec::with_capacity(list.len());
        for node in list.iter() {
            if let ResolvedType::Reference(reference) = self.qualifier.resolve_type(node)? {
                out.push(reference);
            }
        }
        Ok(out)
    }

    fn supertypes(&mut self) -> ResolveResult<()> {
        let data = self.data;
        let extended = self.references(&data.extended_types)?;
        let implemented = self.references(&data.implemented_types)?;

        match self.kind {
            TypeKind::Class => {
                self.decl.superclass = match extended.into_iter().next() {
                    Some(superclass) => Some(superclass),
                    None if &*self.decl.qualified_name == OBJECT => None,
                    None => Some(ReferenceType::object()),
                };
                self.decl.interfaces = implemented;
            }
            TypeKind::Enum => {
                let this = ResolvedType::Reference(self.decl.raw_type());
                self.decl.superclass =
                    Some(ReferenceType::top_level(ENUM).with_arguments(vec![this]));
                self.decl.interfaces = implemented;
            }
            TypeKind::Interface => self.decl.interfaces = extended,
            TypeKind::Annotation => {}
        }
        Ok(())
    }

    fn fields(&mut self, member: NodeIndex) -> ResolveResult<()> {
        let arena = self.unit.arena();
        let Some(data) = arena.get(member).and_then(|n| arena.get_variable_decl(n)) else {
            return Ok(());
        };
        let ty = self.qualifier.resolve_type(data.ty)?;
        let mut modifiers = data.modifiers;
        if self.is_interface() {
            modifiers |= Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL;
        }
        for declarator in data.declarators.iter() {
            let field = FieldDeclaration {
                name: arena.name_of(declarator).unwrap_or_default().into(),
                declaring_type: self.decl.qualified_name.clone(),
                ty: ty.clone(),
                modifiers,
                origin: self.origin(declarator),
            };
            self.decl.fields.push(Arc::new(field));
        }
        Ok(())
    }

    fn parameters(&self, list: &NodeList) -> ResolveResult<Vec<ParameterDeclaration>> {
        let arena = self.unit.arena();
        let mut out = Vec::with_capacity(list.len());
        for node in list.iter() {
            let Some(data) = arena.get(node).and_then(|n| arena.get_parameter(n)) else {
                continue;
            };
            let mut ty = self.qualifier.resolve_type(data.ty)?;
            if data.is_varargs {
                ty = ResolvedType::Array(Box::new(ty));
            }
            out.push(ParameterDeclaration {
                name: data.name.as_str().into(),
                ty,
                is_varargs: data.is_varargs,
                origin: self.origin(node),
            });
        }
        Ok(out)
    }

    fn method(&mut self, member: NodeIndex) -> ResolveResult<()> {
        let arena = self.unit.arena();
        let Some(data) = arena.get(member).and_then(|n| arena.get_method(n)) else {
            return Ok(());
        };
        let mut modifiers = data.modifiers;
        if self.is_interface() {
            if !modifiers.is_private() {
                modifiers |= Modifiers::PUBLIC;
            }
            let has_body = data.body.is_some()
                || modifiers.intersects(Modifiers::STATIC | Modifiers::DEFAULT | Modifiers::PRIVATE);
            if !has_body {
                modifiers |= Modifiers::ABSTRACT;
            }
        }
        let method = MethodDeclaration {
            name: data.name.as_str().into(),
            declaring_type: self.decl.qualified_name.clone(),
            type_parameters: self.type_parameters(&data.type_parameters)?,
            parameters: self.parameters(&data.parameters)?,
            return_type: self.qualifier.resolve_type(data.return_type)?,
            modifiers,
            origin: self.origin(member),
        };
        self.decl.methods.push(Arc::new(method));
        Ok(())
    }

    fn constructor(&mut self, member: NodeIndex) -> ResolveResult<()> {
        let arena = self.unit.arena();
        let Some(data) = arena.get(member).and_then(|n| arena.get_method(n)) else {
            return Ok(());
        };
        let mut modifiers = data.modifiers;
        if self.kind == TypeKind::Enum {
            modifiers = (modifiers - Modifiers::PUBLIC - Modifiers::PROTECTED) | Modifiers::PRIVATE;
        }
        let constructor = ConstructorDeclaration {
            declaring_type: self.decl.qualified_name.clone(),
            type_parameters: self.type_parameters(&data.type_parameters)?,
            parameters: self.parameters(&data.parameters)?,
            modifiers,
            origin: self.origin(member),
        };
        self.decl.constructors.push(Arc::new(constructor));
        Ok(())
    }

    /// Constants become `public static final` fields ahead of the declared
    /// ones; `values()` and `valueOf(String)` are implicit.
    fn enum_members(&mut self) {
        let arena = self.unit.arena();
        let declaring = self.decl.qualified_name.clone();
        let this = ResolvedType::Reference(self.decl.raw_type());
        let mut constants = Vec::with_capacity(self.data.entries.len());
        for entry in self.data.entries.iter() {
            let Some(name) = arena.name_of(entry) else {
                continue;
            };
            constants.push(Arc::new(FieldDeclaration {
                name: name.into(),
                declaring_type: declaring.clone(),
                ty: this.clone(),
                modifiers: Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL,
                origin: self.origin(entry),
            }));
        }
        constants.append(&mut self.decl.fields);
        self.decl.fields = constants;

        let origin = self.origin(self.node);
        let implicit = |name: &str, parameters: Vec<ParameterDeclaration>, return_type| {
            Arc::new(MethodDeclaration {
                name: name.into(),
                declaring_type: declaring.clone(),
                type_parameters: Vec::new(),
                parameters,
                return_type,
                modifiers: Modifiers::PUBLIC | Modifiers::STATIC,
                origin: origin.clone(),
            })
        };
        let values = implicit("values", Vec::new(), ResolvedType::Array(Box::new(this.clone())));
        let name_parameter = ParameterDeclaration {
            name: "name".into(),
            ty: ResolvedType::top_level(STRING),
            is_varargs: false,
            origin: origin.clone(),
        };
        let value_of = implicit("valueOf", vec![name_parameter], this);
        self.decl.methods.push(values);
        self.decl.methods.push(value_of);
    }

    fn default_constructor(&mut self) {
        let modifiers = if self.kind == TypeKind::Enum {
            Modifiers::PRIVATE
        } else {
            self.decl.modifiers & (Modifiers::PUBLIC | Modifiers::PROTECTED | Modifiers::PRIVATE)
        };
        let constructor = ConstructorDeclaration {
            declaring_type: self.decl.qualified_name.clone(),
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            modifiers,
            origin: self.origin(self.node),
        };
        self.decl.constructors.push(Arc::new(constructor));
    }
}
