//! In-memory package adapters.

mod package;

pub use package::InMemoryPackageRepository;
