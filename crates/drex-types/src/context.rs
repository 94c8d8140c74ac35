//! Per-call context handed to type providers.

use drex_common::Project;
use drex_index::ProjectIndexes;

/// The project a request belongs to and read handles to its indexes.
///
/// Built by the caller for each request; providers keep no reference to it
/// between calls.
#[derive(Clone, Copy)]
pub struct TypeContext<'a> {
    pub project: &'a Project,
    pub indexes: ProjectIndexes<'a>,
}

impl<'a> TypeContext<'a> {
    pub fn new(project: &'a Project, indexes: ProjectIndexes<'a>) -> Self {
        Self { project, indexes }
    }

    /// Whether providers may run at all: the feature is on and the indexes
    /// are not being rebuilt.
    pub fn is_available(&self) -> bool {
        self.project.is_enabled() && !self.indexes.status.is_rebuilding(self.project)
    }
}
