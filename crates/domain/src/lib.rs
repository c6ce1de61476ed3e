//! Domain layer for Mailsift
//!
//! Contains the core entities and value objects of the forward-package
//! pipeline. This layer has no I/O dependencies and defines the
//! ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
