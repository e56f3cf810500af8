//! Parcelpoint: intake and pickup tracking for a walk-in parcel counter.
//!
//! Staff photograph shipping labels, review the fields an extraction
//! backend proposes, and commit each label as a package attached to a
//! customer. Packages then wait on the shelf until they are picked up,
//! refused or sent back; an aging sweep lists the ones waiting too long.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, OCR, files)
//!
//! # Modules
//!
//! - [`intake`]: Label extraction, field reconciliation and batch sessions
//! - [`customer`]: Find-or-create customer identity by name
//! - [`package`]: Package lifecycle, aging sweep and archive queries
//! - [`media`]: Content-addressed label and signature images
//! - [`config`]: TOML configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod customer;
pub mod intake;
pub mod media;
pub mod package;
pub mod telemetry;

#[cfg(test)]
mod test_support;
