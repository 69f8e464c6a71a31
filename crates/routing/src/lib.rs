//! `taskhub-routing` — resource-oriented request routing.
//!
//! A resource is a named collection exposed through the standard CRUD verbs.
//! This crate owns the **registration table**: resources are registered once
//! during startup, the table is frozen, and every inbound `(method, path)`
//! pair is resolved against it with a pure, synchronous lookup. Anything under
//! the administrative prefix is forwarded wholesale and never interpreted
//! here.
//!
//! The crate is transport-agnostic: it speaks `http::Method` and path strings,
//! nothing else. Invoking the resolved operation is the caller's job.

pub mod registry;

pub use registry::{
    Capabilities, Operation, Registration, RegistryBuilder, RegistryError, Resolution,
    ResourceMatch, ResourceRegistry, RouteError,
};
