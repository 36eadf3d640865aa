//! Kitchen membership use cases.

pub mod service;

pub use service::MembershipService;
