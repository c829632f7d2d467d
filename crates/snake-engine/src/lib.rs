pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CollisionError {
    #[display("snake ran into itself")]
    SelfCollision,
    #[display("snake ran into the wall")]
    WallCollision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no free cell left for food")]
pub struct NoSpaceError;
