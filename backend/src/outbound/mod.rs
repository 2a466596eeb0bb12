//! Outbound adapters implementing domain ports.
//!
//! - **memory**: process-local fleet repositories
//!
//! Adapters are thin translators between domain types and their storage
//! representation. They contain no business logic beyond the integrity
//! rules (uniqueness, references, cascades) a database would enforce.

pub mod memory;
