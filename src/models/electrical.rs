//! Electrical distribution models.
//!
//! This module contains models for sizing the conductors and protection of
//! branch circuits, feeders and services.

pub mod circuit;
