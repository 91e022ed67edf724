//! Errors raised by entity, query, and system operations

use super::entity::EntityId;

/// Errors surfaced by the ECS core.
///
/// These propagate to the immediate caller; the core never catches or logs
/// on a caller's behalf.
#[derive(Debug, Clone)]
pub enum EcsError {
    /// A non-optional component accessor missed.
    ///
    /// Callers with optional access use `try_component` or `has_component`
    /// instead of hitting this.
    MissingComponent {
        /// Entity that was queried
        entity: EntityId,
        /// Type name of the missing component kind
        component: &'static str,
    },
    /// The entity id is not registered (destroyed, or never created here).
    UnknownEntity(EntityId),
    /// A system's update failed; aborts the remainder of the frame dispatch.
    System {
        /// Name of the failing system
        system: String,
        /// What went wrong
        message: String,
    },
}

impl EcsError {
    /// Convenience constructor for system update failures.
    pub fn system(system: impl Into<String>, message: impl Into<String>) -> Self {
        Self::System {
            system: system.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for EcsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingComponent { entity, component } => {
                write!(f, "entity {entity} has no {component} component")
            }
            Self::UnknownEntity(id) => write!(f, "no entity {id} is registered"),
            Self::System { system, message } => {
                write!(f, "system '{system}' failed: {message}")
            }
        }
    }
}

impl std::error::Error for EcsError {}
