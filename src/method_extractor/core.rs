use serde::{Deserialize, Serialize};

use crate::errors::ExtractError;

/// One entry per discovered method declaration.
///
/// `body` is `None` for declarations without a body (interface signatures,
/// abstract and native methods, annotation elements) and serializes as `null`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodRecord {
    pub name: String,
    pub body: Option<String>,
}

impl MethodRecord {
    pub fn new(name: impl Into<String>, body: Option<impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            body: body.map(Into::into),
        }
    }
}

// 类型声明种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

/// A method or constructor declared directly in a type body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub name: String,
    /// Raw span from `{` to the matching `}`, untrimmed
    pub body: Option<String>,
    pub is_constructor: bool,
}

/// A class-like declaration and its members in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    pub kind: TypeKind,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Method(MethodDecl),
    Type(TypeDecl),
}

/// Parser-independent view of one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilationUnit {
    pub types: Vec<TypeDecl>,
}

/// Turns Java source text into a [`CompilationUnit`].
///
/// Implementations must be usable from several threads at once.
pub trait SourceParser: Send + Sync {
    fn name(&self) -> &'static str;

    fn parse(&self, source: &str) -> Result<CompilationUnit, ExtractError>;
}

impl CompilationUnit {
    /// Flattens the declaration tree into records, pre-order in source order.
    pub fn method_records(&self, include_constructors: bool) -> Vec<MethodRecord> {
        let mut records = Vec::new();
        for type_decl in &self.types {
            collect_type(type_decl, include_constructors, &mut records);
        }
        records
    }
}

fn collect_type(type_decl: &TypeDecl, include_constructors: bool, out: &mut Vec<MethodRecord>) {
    for member in &type_decl.members {
        match member {
            Member::Method(method) => {
                if method.is_constructor && !include_constructors {
                    continue;
                }
                out.push(MethodRecord {
                    name: method.name.clone(),
                    body: method.body.as_deref().map(|b| b.trim().to_string()),
                });
            }
            Member::Type(nested) => collect_type(nested, include_constructors, out),
        }
    }
}
