//! "Drupal injection" intention.
//!
//! On a class, adds the boilerplate for container injection:
//!
//! 1. a constructor, copying the parent constructor's parameters if any;
//! 2. unless the class is already a registered service,
//!    `ContainerInjectionInterface` in the `implements` list and a
//!    `create()` stub copied from the inherited declaration.
//!
//! Type-hinted parameters of the copied `create()` are shortened and their
//! FQNs reported as imports for the caller to add.

use drex_common::well_known::{CONSTRUCTOR, CONTAINER_INJECTION_INTERFACE, CREATE_METHOD};
use drex_common::{Fqn, fqn_eq};
use drex_index::{MethodDecl, TypeHierarchy};
use drex_syntax::{InsertPosition, MethodData, NodeArena, NodeIndex, NodeKind};
use drex_types::TypeContext;
use serde::Serialize;
use tracing::debug;

/// Edits made by one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InjectionReport {
    /// The inserted constructor node.
    #[serde(skip)]
    pub constructor: Option<NodeIndex>,
    pub interface_added: bool,
    /// The inserted `create()` node.
    #[serde(skip)]
    pub create: Option<NodeIndex>,
    /// FQNs to import for the shortened parameter types of `create()`.
    pub imports: Vec<String>,
}

impl InjectionReport {
    pub fn is_empty(&self) -> bool {
        self.constructor.is_none()
            && !self.interface_added
            && self.create.is_none()
            && self.imports.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct DependencyInjectionIntention;

impl DependencyInjectionIntention {
    pub fn new() -> Self {
        Self
    }

    pub fn text(&self) -> &'static str {
        "Drupal injection"
    }

    /// Available on direct children of a class declaration.
    pub fn is_available(&self, arena: &NodeArena, node: NodeIndex) -> bool {
        arena.kind(arena.parent(node)) == Some(NodeKind::Class)
    }

    /// Apply the intention at `node`. Returns `None` when not available.
    pub fn invoke(
        &self,
        ctx: &TypeContext<'_>,
        arena: &mut NodeArena,
        node: NodeIndex,
    ) -> Option<InjectionReport> {
        if !self.is_available(arena, node) {
            return None;
        }
        let class = arena.parent(node);
        let hierarchy = TypeHierarchy::new(ctx.indexes.symbols);
        let mut report = InjectionReport {
            constructor: add_constructor_if_none(arena, class, &hierarchy),
            ..InjectionReport::default()
        };

        let class_fqn = arena.get_class(class)?.fqn.clone();
        if !ctx
            .indexes
            .services
            .has_service_definition(&class_fqn, ctx.project)
        {
            report.interface_added = add_interface_if_none(ctx, arena, class, &hierarchy);
            if let Some((create, imports)) = add_create_if_none(arena, class, &hierarchy) {
                report.create = Some(create);
                report.imports = imports;
            }
        }

        debug!(
            class = %class_fqn,
            constructor = report.constructor.is_some(),
            interface = report.interface_added,
            create = report.create.is_some(),
            "applied injection intention"
        );
        Some(report)
    }
}

/// Direct supertypes named by the class node: `extends` first.
fn class_parents(arena: &NodeArena, class: NodeIndex, include_interfaces: bool) -> Vec<String> {
    let Some(data) = arena.get_class(class) else {
        return Vec::new();
    };
    let mut parents: Vec<String> = data.extends.iter().cloned().collect();
    if include_interfaces {
        parents.extend(data.implements.iter().cloned());
    }
    parents
}

fn find_inherited(
    arena: &NodeArena,
    class: NodeIndex,
    hierarchy: &TypeHierarchy<'_>,
    name: &str,
    include_interfaces: bool,
) -> Option<MethodDecl> {
    class_parents(arena, class, include_interfaces)
        .iter()
        .find_map(|parent| hierarchy.find_method(parent, name))
}

fn add_constructor_if_none(
    arena: &mut NodeArena,
    class: NodeIndex,
    hierarchy: &TypeHierarchy<'_>,
) -> Option<NodeIndex> {
    if arena.find_own_method(class, CONSTRUCTOR).is_some() {
        return None;
    }

    let constructor = match find_inherited(arena, class, hierarchy, CONSTRUCTOR, false) {
        Some(parent) => {
            let arguments: Vec<String> = parent
                .parameters
                .iter()
                .map(|param| format!("${}", param.name))
                .collect();
            MethodData {
                name: CONSTRUCTOR.to_string(),
                visibility: parent.visibility,
                is_static: false,
                body: Some(format!("parent::__construct({});", arguments.join(", "))),
                parameters: parent.parameters,
            }
        }
        None => MethodData {
            name: CONSTRUCTOR.to_string(),
            body: Some(String::new()),
            ..MethodData::default()
        },
    };

    let position = arena
        .class_methods(class)
        .next()
        .map_or(InsertPosition::End, |(first, _)| InsertPosition::Before(first));
    let node = arena.add_method(constructor);
    arena.insert_member(class, node, position).then_some(node)
}

fn add_interface_if_none(
    ctx: &TypeContext<'_>,
    arena: &mut NodeArena,
    class: NodeIndex,
    hierarchy: &TypeHierarchy<'_>,
) -> bool {
    let Some(data) = arena.get_class(class) else {
        return false;
    };
    if data
        .implements
        .iter()
        .any(|fqn| fqn_eq(fqn, CONTAINER_INJECTION_INTERFACE))
    {
        return false;
    }
    if ctx
        .indexes
        .symbols
        .get_interfaces_by_fqn(CONTAINER_INJECTION_INTERFACE)
        .is_empty()
    {
        return false;
    }
    let inherited = class_parents(arena, class, true)
        .iter()
        .any(|parent| hierarchy.is_subtype_of(parent, CONTAINER_INJECTION_INTERFACE));
    if inherited {
        return false;
    }
    arena.add_implements(class, CONTAINER_INJECTION_INTERFACE)
}

fn add_create_if_none(
    arena: &mut NodeArena,
    class: NodeIndex,
    hierarchy: &TypeHierarchy<'_>,
) -> Option<(NodeIndex, Vec<String>)> {
    if arena.find_own_method(class, CREATE_METHOD).is_some() {
        return None;
    }
    let inherited = find_inherited(arena, class, hierarchy, CREATE_METHOD, true)?;

    let mut imports: Vec<String> = Vec::new();
    let parameters: Vec<_> = inherited
        .parameters
        .into_iter()
        .map(|mut param| {
            if param.has_class_type()
                && let Some(hint) = param.type_hint.take()
            {
                let fqn = Fqn::new(&hint);
                if !imports.iter().any(|existing| fqn_eq(existing, fqn.as_str())) {
                    imports.push(fqn.as_str().to_string());
                }
                param.type_hint = Some(fqn.short_name().to_string());
            }
            param
        })
        .collect();

    let create = MethodData {
        name: inherited.name,
        visibility: inherited.visibility,
        is_static: true,
        parameters,
        body: Some(String::new()),
    };

    let position = arena
        .find_own_method(class, CONSTRUCTOR)
        .map_or(InsertPosition::End, InsertPosition::After);
    let node = arena.add_method(create);
    arena
        .insert_member(class, node, position)
        .then_some((node, imports))
}
