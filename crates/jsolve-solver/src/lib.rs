//! Resolved type model and type solvers.
//!
//! This crate owns everything that can be answered without looking at an
//! expression: the resolved type and declaration model, generic
//! substitution, binary descriptors, type relations, and the `TypeSolver`
//! providers that turn qualified names into declarations.
//!
//! # Providers
//!
//! | Solver | Source of declarations |
//! |--------|------------------------|
//! | `SourceTypeSolver` | parsed source units |
//! | `ClassFileTypeSolver` | `.class` files under classpath directories |
//! | `RuntimeTypeSolver` | the embedded runtime type catalog |
//! | `MemoryTypeSolver` | declarations registered by the embedder |
//! | `CombinedTypeSolver` | ordered composition, first hit wins |

pub mod types;
pub use types::{PrimitiveKind, ReferenceType, ResolvedType, TypeParamOwner, TypeVariable, Wildcard};

pub mod declarations;
pub use declarations::{
    ConstructorDeclaration, DeclarationOrigin, DeclarationShape, FieldDeclaration, LocalVariableDeclaration,
    MethodDeclaration, ParameterDeclaration, ResolvedDeclaration, TypeDeclaration, TypeKind,
    TypeParameterDeclaration,
};

pub mod symbol_reference;
pub use symbol_reference::SymbolReference;

pub mod instantiate;
pub use instantiate::{TypeSubstitution, substitute};

pub mod descriptor;
pub mod signature;

pub mod recursion;
pub use recursion::{RecursionGuard, RecursionProfile, RecursionResult};

pub mod hierarchy;
pub use hierarchy::Hierarchy;

pub mod relations;
pub use relations::{ConversionMode, TypeRelations};

pub mod promotion;

pub mod members;
pub use members::{ConstructorUsage, FieldUsage, MemberLookup, MethodUsage};

pub mod solvers;
pub use solvers::{
    ClassFileTypeSolver, CombinedTypeSolver, ExceptionHandler, MemoryTypeSolver,
    RuntimeTypeSolver, SourceTypeSolver, TypeSolver,
};
