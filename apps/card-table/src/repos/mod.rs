//! Record accessors, generic over `ConnectionTrait` so they run inside the caller's transaction.

pub mod cards;
pub mod commands;
pub mod games;
pub mod stacks;
