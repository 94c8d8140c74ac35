//! Declarations stored in the symbol table.
//!
//! Lookups by signature are heterogeneous: a signature may address a method,
//! a function, a class, a field or a constant. Consumers match on the variant
//! they care about and ignore the rest.

use drex_common::{Parameter, Visibility, fqn_eq};
use serde::{Deserialize, Serialize};

/// Kind of a type declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Trait,
}

/// A method declared in a class, interface or trait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDecl {
    pub name: String,
    /// FQN of the declaring type. Filled in by the symbol table when the
    /// method is registered through its class.
    #[serde(default)]
    pub containing_class: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            containing_class: None,
            visibility: Visibility::Public,
            is_static: false,
            is_abstract: false,
            parameters: Vec::new(),
        }
    }

    pub fn declared_in(mut self, class_fqn: impl Into<String>) -> Self {
        self.containing_class = Some(class_fqn.into());
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn into_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// A free function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDecl {
    pub fqn: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

/// A class, interface or trait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDecl {
    pub fqn: String,
    #[serde(default)]
    pub kind: ClassKind,
    /// Parent class for classes; parent interfaces for interfaces.
    #[serde(default)]
    pub extends: Vec<String>,
    /// Interfaces listed in the declaration's own `implements` clause.
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

impl ClassDecl {
    pub fn class(fqn: impl Into<String>) -> Self {
        Self {
            fqn: fqn.into(),
            kind: ClassKind::Class,
            extends: Vec::new(),
            implements: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn interface(fqn: impl Into<String>) -> Self {
        Self {
            kind: ClassKind::Interface,
            ..Self::class(fqn)
        }
    }

    pub fn extending<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extends.extend(parents.into_iter().map(Into::into));
        self
    }

    pub fn implementing<I, S>(mut self, interfaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.implements.extend(interfaces.into_iter().map(Into::into));
        self
    }

    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    #[inline]
    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }

    pub fn is(&self, fqn: &str) -> bool {
        fqn_eq(&self.fqn, fqn)
    }

    /// Direct supertypes: `extends` followed by `implements`.
    pub fn direct_supertypes(&self) -> impl Iterator<Item = &str> {
        self.extends
            .iter()
            .chain(self.implements.iter())
            .map(String::as_str)
    }

    /// A method declared directly on this type. Case-insensitive, like PHP.
    pub fn find_own_method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods
            .iter()
            .find(|method| method.name.eq_ignore_ascii_case(name))
    }
}

/// A field or class constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDecl {
    pub name: String,
    #[serde(default)]
    pub containing_class: Option<String>,
}

/// Anything a signature may resolve to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "declaration", rename_all = "camelCase")]
pub enum Declaration {
    Method(MethodDecl),
    Function(FunctionDecl),
    Class(ClassDecl),
    Field(MemberDecl),
    Constant(MemberDecl),
}

impl Declaration {
    pub fn as_method(&self) -> Option<&MethodDecl> {
        match self {
            Declaration::Method(method) => Some(method),
            _ => None,
        }
    }

    pub fn into_method(self) -> Option<MethodDecl> {
        match self {
            Declaration::Method(method) => Some(method),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Declaration::Method(method) => &method.name,
            Declaration::Function(function) => &function.fqn,
            Declaration::Class(class) => &class.fqn,
            Declaration::Field(member) | Declaration::Constant(member) => &member.name,
        }
    }
}
