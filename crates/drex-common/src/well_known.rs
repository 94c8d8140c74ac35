//! Names of framework types and members the analysis knows about.

/// Interface declaring the entity storage factory method.
pub const ENTITY_TYPE_MANAGER_INTERFACE: &str = "\\Drupal\\Core\\Entity\\EntityTypeManagerInterface";

/// The factory method returning a storage handler for an entity type id.
pub const GET_STORAGE_METHOD: &str = "getStorage";

/// Interface a class implements to be instantiated through `create()`.
pub const CONTAINER_INJECTION_INTERFACE: &str =
    "\\Drupal\\Core\\DependencyInjection\\ContainerInjectionInterface";

/// Render array key naming a theme hook.
pub const THEME_RENDER_KEY: &str = "#theme";

/// Constructor method name.
pub const CONSTRUCTOR: &str = "__construct";

/// Static factory method used by container injection.
pub const CREATE_METHOD: &str = "create";
