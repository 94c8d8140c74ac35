//! Node types.
//!
//! Each node stores its payload as a `NodeData` variant plus a parent link.
//! Children are referenced by `NodeIndex` into the owning arena.

use drex_common::{Parameter, Visibility};
use smallvec::SmallVec;

/// Index of a node in a `NodeArena`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Sentinel for "no node" (root parent, missing child).
    pub const NONE: Self = Self(u32::MAX);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// Discriminant of `NodeData`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    MethodReference,
    FunctionReference,
    ParameterList,
    StringLiteral,
    NumberLiteral,
    Variable,
    ArrayCreation,
    ArrayHashElement,
    Class,
    Method,
}

/// `$receiver->name(args)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodReferenceData {
    pub name: String,
    pub receiver: NodeIndex,
    /// The `ParameterList` node holding the arguments.
    pub parameters: NodeIndex,
    /// Partial signatures of the declarations this call may resolve to, as
    /// computed by the host from the receiver type. Usually one; several when
    /// both an interface and its implementation declare the method.
    pub signatures: SmallVec<[String; 2]>,
}

/// `name(args)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionReferenceData {
    pub name: String,
    pub parameters: NodeIndex,
}

/// Ordered child list (arguments, array elements).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListData {
    pub elements: Vec<NodeIndex>,
}

/// A string literal. `contents` is the unquoted value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringLiteralData {
    pub contents: String,
    pub double_quoted: bool,
}

/// `key => value` inside an array literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashElementData {
    pub key: NodeIndex,
    pub value: NodeIndex,
}

/// A class or interface declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassData {
    pub name: String,
    pub fqn: String,
    pub is_interface: bool,
    pub extends: Option<String>,
    /// FQNs in the `implements` list, in source order.
    pub implements: Vec<String>,
    /// Member nodes in source order.
    pub members: Vec<NodeIndex>,
}

/// A method declared in a class body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MethodData {
    pub name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub parameters: Vec<Parameter>,
    /// `None` for abstract/interface methods.
    pub body: Option<String>,
}

impl MethodData {
    /// Render the method header the way it appears in source.
    pub fn header(&self) -> String {
        let params: Vec<String> = self.parameters.iter().map(ToString::to_string).collect();
        format!(
            "{}{} function {}({})",
            self.visibility.keyword(),
            if self.is_static { " static" } else { "" },
            self.name,
            params.join(", ")
        )
    }
}

/// Tagged node payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeData {
    MethodReference(MethodReferenceData),
    FunctionReference(FunctionReferenceData),
    ParameterList(ListData),
    StringLiteral(StringLiteralData),
    NumberLiteral(String),
    Variable(String),
    ArrayCreation(ListData),
    ArrayHashElement(HashElementData),
    Class(ClassData),
    Method(MethodData),
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::MethodReference(_) => NodeKind::MethodReference,
            NodeData::FunctionReference(_) => NodeKind::FunctionReference,
            NodeData::ParameterList(_) => NodeKind::ParameterList,
            NodeData::StringLiteral(_) => NodeKind::StringLiteral,
            NodeData::NumberLiteral(_) => NodeKind::NumberLiteral,
            NodeData::Variable(_) => NodeKind::Variable,
            NodeData::ArrayCreation(_) => NodeKind::ArrayCreation,
            NodeData::ArrayHashElement(_) => NodeKind::ArrayHashElement,
            NodeData::Class(_) => NodeKind::Class,
            NodeData::Method(_) => NodeKind::Method,
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> SmallVec<[NodeIndex; 4]> {
        let mut out: SmallVec<[NodeIndex; 4]> = SmallVec::new();
        match self {
            NodeData::MethodReference(data) => {
                out.push(data.receiver);
                out.push(data.parameters);
            }
            NodeData::FunctionReference(data) => out.push(data.parameters),
            NodeData::ParameterList(list) | NodeData::ArrayCreation(list) => {
                out.extend(list.elements.iter().copied());
            }
            NodeData::ArrayHashElement(data) => {
                out.push(data.key);
                out.push(data.value);
            }
            NodeData::Class(data) => out.extend(data.members.iter().copied()),
            NodeData::StringLiteral(_)
            | NodeData::NumberLiteral(_)
            | NodeData::Variable(_)
            | NodeData::Method(_) => {}
        }
        out.retain(|idx| idx.is_some());
        out
    }
}

/// A node in the arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub data: NodeData,
    pub parent: NodeIndex,
}

impl Node {
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }
}
