//! Application services for customer resolution.

mod resolver;

pub use resolver::{CustomerResolver, CustomerResolverError, ResolveCustomerRequest};
