mod noop;
mod query;
mod traits;

#[cfg(feature = "avian3d")]
pub mod avian;

pub use noop::NoOpBackendPlugin;
pub use query::{BackendQuery, BackendView, CapsuleDimensions, PhysicsQuery};
pub use traits::CharacterPhysicsBackend;

#[cfg(feature = "avian3d")]
pub use avian::Avian3dBackend;
