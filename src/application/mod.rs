//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: Command registration and execution
//! - Errors: Domain-specific errors
//! - Messaging: The command loop

pub mod errors;
pub mod services;
pub mod messaging;
