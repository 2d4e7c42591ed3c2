//! Conductors, cables and the containers that hold them.
//!
//! - **Items**: [`Conductor`] and [`Cable`], both [`Conduitable`]
//! - **Containers**: [`Conduit`] and [`Bundle`] settings
//! - **Ownership**: [`Installation`], which stores containers and their members
//!   and keeps every member's derating context current
//! - **Systems**: [`VoltageSystem`] and its [`NeutralKind`]
//!
//! A free-standing item sits in free air.
//! Once added to a container through an [`Installation`], the container's
//! ambient temperature, rooftop distance and current-carrying count apply to
//! it, and its own setters for those values are refused until it is removed.

mod bundle;
mod cable;
mod conductor;
mod conduit;
mod conduitable;
mod error;
mod installation;
mod voltage_system;

pub use bundle::Bundle;
pub use cable::{Cable, CableType};
pub use conductor::Conductor;
pub use conduit::Conduit;
pub use conduitable::{AnyConduitable, Conduitable, MAX_AMBIENT_F, MIN_AMBIENT_F, Role};
pub use error::{OwnershipError, ParameterError, WiringError};
pub use installation::{
    BundleId, BundleRef, ConduitId, ConduitRef, Installation, MemberId, Owner,
};
pub use voltage_system::{NeutralKind, VoltageSystem};
