//! Flat node storage with builders, accessors and provisional types.

use rustc_hash::FxHashMap;

use crate::node::*;

/// Where to place a member inserted into a class body.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InsertPosition {
    Before(NodeIndex),
    After(NodeIndex),
    End,
}

/// Arena of syntax nodes.
///
/// Nodes are append-only; a node's index is stable for the arena's lifetime.
/// Builders link children to their parent when the parent is added, so trees
/// are built bottom-up.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
    /// Placeholder types installed by type providers, keyed by expression node.
    provisional_types: FxHashMap<NodeIndex, String>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a node and adopt its children.
    fn push(&mut self, data: NodeData) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        for child in data.children() {
            if let Some(node) = self.get_mut(child) {
                node.parent = index;
            }
        }
        self.nodes.push(Node {
            data,
            parent: NodeIndex::NONE,
        });
        index
    }

    // =========================================================================
    // Access
    // =========================================================================

    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    #[inline]
    pub fn data(&self, index: NodeIndex) -> Option<&NodeData> {
        self.get(index).map(|node| &node.data)
    }

    #[inline]
    pub fn kind(&self, index: NodeIndex) -> Option<NodeKind> {
        self.get(index).map(Node::kind)
    }

    /// Parent of `index`, `NodeIndex::NONE` for roots and unknown nodes.
    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get(index).map_or(NodeIndex::NONE, |node| node.parent)
    }

    /// Strict ancestors of `index`, nearest first.
    pub fn ancestors(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        std::iter::successors(Some(self.parent(index)), move |&current| {
            Some(self.parent(current))
        })
        .take_while(|idx| idx.is_some())
    }

    /// Nearest strict ancestor of the given kind.
    pub fn find_ancestor(&self, index: NodeIndex, kind: NodeKind) -> Option<NodeIndex> {
        self.ancestors(index)
            .find(|&ancestor| self.kind(ancestor) == Some(kind))
    }

    pub fn get_method_reference(&self, index: NodeIndex) -> Option<&MethodReferenceData> {
        match self.data(index)? {
            NodeData::MethodReference(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_function_reference(&self, index: NodeIndex) -> Option<&FunctionReferenceData> {
        match self.data(index)? {
            NodeData::FunctionReference(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_string_literal(&self, index: NodeIndex) -> Option<&StringLiteralData> {
        match self.data(index)? {
            NodeData::StringLiteral(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_hash_element(&self, index: NodeIndex) -> Option<&HashElementData> {
        match self.data(index)? {
            NodeData::ArrayHashElement(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_class(&self, index: NodeIndex) -> Option<&ClassData> {
        match self.data(index)? {
            NodeData::Class(data) => Some(data),
            _ => None,
        }
    }

    fn get_class_mut(&mut self, index: NodeIndex) -> Option<&mut ClassData> {
        match self.get_mut(index).map(|node| &mut node.data)? {
            NodeData::Class(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_method(&self, index: NodeIndex) -> Option<&MethodData> {
        match self.data(index)? {
            NodeData::Method(data) => Some(data),
            _ => None,
        }
    }

    /// Name of a method or function call.
    pub fn call_name(&self, index: NodeIndex) -> Option<&str> {
        match self.data(index)? {
            NodeData::MethodReference(data) => Some(&data.name),
            NodeData::FunctionReference(data) => Some(&data.name),
            _ => None,
        }
    }

    /// Arguments of a method or function call. Empty for other nodes.
    pub fn arguments(&self, call: NodeIndex) -> &[NodeIndex] {
        let list = match self.data(call) {
            Some(NodeData::MethodReference(data)) => data.parameters,
            Some(NodeData::FunctionReference(data)) => data.parameters,
            _ => return &[],
        };
        match self.data(list) {
            Some(NodeData::ParameterList(list)) => &list.elements,
            _ => &[],
        }
    }

    /// Methods declared directly in a class body, in source order.
    pub fn class_methods(&self, class: NodeIndex) -> impl Iterator<Item = (NodeIndex, &MethodData)> {
        self.get_class(class)
            .map(|data| data.members.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(|&member| self.get_method(member).map(|method| (member, method)))
    }

    /// A method declared directly in the class body (not inherited).
    pub fn find_own_method(&self, class: NodeIndex, name: &str) -> Option<NodeIndex> {
        self.class_methods(class)
            .find(|(_, method)| method.name.eq_ignore_ascii_case(name))
            .map(|(idx, _)| idx)
    }

    // =========================================================================
    // Builders
    // =========================================================================

    pub fn add_string_literal(&mut self, contents: &str) -> NodeIndex {
        self.push(NodeData::StringLiteral(StringLiteralData {
            contents: contents.to_string(),
            double_quoted: false,
        }))
    }

    pub fn add_number_literal(&mut self, text: &str) -> NodeIndex {
        self.push(NodeData::NumberLiteral(text.to_string()))
    }

    /// `$name`; `name` is given without the sigil.
    pub fn add_variable(&mut self, name: &str) -> NodeIndex {
        self.push(NodeData::Variable(name.to_string()))
    }

    pub fn add_parameter_list(&mut self, arguments: Vec<NodeIndex>) -> NodeIndex {
        self.push(NodeData::ParameterList(ListData {
            elements: arguments,
        }))
    }

    /// `$receiver->name(arguments)` carrying the host-computed signatures.
    pub fn add_method_reference<I>(
        &mut self,
        receiver: NodeIndex,
        name: &str,
        arguments: Vec<NodeIndex>,
        signatures: I,
    ) -> NodeIndex
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let parameters = self.add_parameter_list(arguments);
        self.push(NodeData::MethodReference(MethodReferenceData {
            name: name.to_string(),
            receiver,
            parameters,
            signatures: signatures.into_iter().map(Into::into).collect(),
        }))
    }

    pub fn add_function_reference(&mut self, name: &str, arguments: Vec<NodeIndex>) -> NodeIndex {
        let parameters = self.add_parameter_list(arguments);
        self.push(NodeData::FunctionReference(FunctionReferenceData {
            name: name.to_string(),
            parameters,
        }))
    }

    pub fn add_array_creation(&mut self, elements: Vec<NodeIndex>) -> NodeIndex {
        self.push(NodeData::ArrayCreation(ListData { elements }))
    }

    pub fn add_array_hash_element(&mut self, key: NodeIndex, value: NodeIndex) -> NodeIndex {
        self.push(NodeData::ArrayHashElement(HashElementData { key, value }))
    }

    /// A detached method node, ready for `add_class` or `insert_member`.
    pub fn add_method(&mut self, method: MethodData) -> NodeIndex {
        self.push(NodeData::Method(method))
    }

    pub fn add_class(&mut self, class: ClassData) -> NodeIndex {
        self.push(NodeData::Class(class))
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Insert `member` into the body of `class`.
    ///
    /// An anchor that is not a member of the class degrades to `End`.
    /// Returns false when `class` is not a class node.
    pub fn insert_member(
        &mut self,
        class: NodeIndex,
        member: NodeIndex,
        position: InsertPosition,
    ) -> bool {
        let Some(data) = self.get_class_mut(class) else {
            return false;
        };

        let slot = match position {
            InsertPosition::Before(anchor) => data.members.iter().position(|&m| m == anchor),
            InsertPosition::After(anchor) => data
                .members
                .iter()
                .position(|&m| m == anchor)
                .map(|pos| pos + 1),
            InsertPosition::End => None,
        };
        match slot {
            Some(slot) => data.members.insert(slot, member),
            None => data.members.push(member),
        }

        if let Some(node) = self.get_mut(member) {
            node.parent = class;
        }
        true
    }

    /// Append an FQN to a class's `implements` list unless already present.
    /// Returns true when the list changed.
    pub fn add_implements(&mut self, class: NodeIndex, fqn: &str) -> bool {
        let Some(data) = self.get_class_mut(class) else {
            return false;
        };
        if data
            .implements
            .iter()
            .any(|existing| drex_common::fqn_eq(existing, fqn))
        {
            return false;
        }
        data.implements.push(fqn.to_string());
        true
    }

    // =========================================================================
    // Provisional types
    // =========================================================================

    /// Install a placeholder type (a deferred type token) for an expression.
    pub fn set_provisional_type(&mut self, node: NodeIndex, ty: String) {
        self.provisional_types.insert(node, ty);
    }

    pub fn provisional_type(&self, node: NodeIndex) -> Option<&str> {
        self.provisional_types.get(&node).map(String::as_str)
    }
}
