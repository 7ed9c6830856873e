//! In-memory storage implementations
//!
//! Suitable for development and testing. Registrations are lost on restart.

mod registrations;

pub use registrations::MemoryRegistrationStore;
