// Adapters layer: concrete collaborators for external systems.

pub mod script;

pub use script::ScriptCollaborator;
