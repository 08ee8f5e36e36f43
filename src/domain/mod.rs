//! Domain Layer
//!
//! The core of ContextMark - business logic without direct I/O.
//!
//! ## Structure
//!
//! - `entities/` - Library and project entities (Block, Profile, LocalConfig)
//! - `value_objects/` - Immutable value types (Fingerprint, slugs, ConfigWarning)
//! - `services/` - Drift, composition and diff partitioning
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - Services reach the library only through the `ContentStore` port
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
