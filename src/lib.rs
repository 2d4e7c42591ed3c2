//! # Twine Electrical
//!
//! NEC conductor sizing models for [Twine](https://github.com/isentropic-dev/twine).
//!
//! Given a load and how its conductors are installed, the models in this
//! crate find the smallest conductor that carries the load after ambient
//! temperature correction and bundling adjustment, keeps the voltage drop
//! within a limit, and then pick the overcurrent protective device (OCPD)
//! rating and equipment grounding conductor (EGC) that go with it.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations.
//! - [`support`]: Code tables, derating factors, and the wiring containment
//!   model used by the sizing models.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Utility code in this crate follows a natural progression as needs emerge:
//!
//! 1. **Model-specific**: Starts in a model's internal `core` module
//! 2. **Domain-specific**: If useful across models in a domain, it moves to a
//!    domain-level support module
//! 3. **Crate-level**: If useful across multiple domains or potentially useful
//!    outside this crate, it moves to [`support`]
//!
//! Note: Only utilities at the crate-level (in [`support`]) are part of the public API.
//! Model-specific and domain-specific utility code remains private.

pub mod models;
pub mod support;
