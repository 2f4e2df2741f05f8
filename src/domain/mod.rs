//! Domain layer - Core business logic
//! 
//! This layer contains:
//! - Entities: Core business objects (Session, Message, Command, Variant)
//! - Traits: Abstractions for infrastructure (Bot)

pub mod entities;
pub mod traits;
