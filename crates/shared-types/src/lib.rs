// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared types for the Shakespeare quote service
//!
//! This crate provides the response envelope and process identity types that
//! every endpoint of the service builds its responses from.

pub mod identity;
pub mod status;

pub use identity::ServiceIdentity;
pub use status::StatusEnvelope;
