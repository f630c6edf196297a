//! Component build result and error types.

use arcstr::ArcStr;

use crate::Category;

/// The [`Error`] result type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error raised while building a component.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An option was non-finite, negative, non-positive, or otherwise invalid.
    #[error("invalid configuration: {0}")]
    Configuration(ArcStr),
    /// A pin with the same name was already registered on the component.
    #[error("component `{component}` already has a pin named `{pin}`")]
    DuplicatePin {
        /// The component being built.
        component: ArcStr,
        /// The colliding pin name.
        pin: ArcStr,
    },
    /// A geometry entry with the same name and category was already registered.
    #[error("component `{component}` already has {category} geometry named `{name}`")]
    DuplicateGeometry {
        /// The component being built.
        component: ArcStr,
        /// The category of the colliding entry.
        category: Category,
        /// The colliding entry name.
        name: ArcStr,
    },
    /// A component with the same name already exists in the design.
    #[error("design already has a component named `{0}`")]
    DuplicateComponent(ArcStr),
    /// Geometry construction produced a degenerate result.
    #[error("geometry error: {0}")]
    Geometry(ArcStr),
}

impl From<geometry::error::Error> for Error {
    fn from(value: geometry::error::Error) -> Self {
        match value {
            geometry::error::Error::Configuration(msg) => Self::Configuration(msg),
            geometry::error::Error::Degenerate(msg) => Self::Geometry(msg),
        }
    }
}
