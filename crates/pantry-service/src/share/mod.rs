//! Resource share use cases.

pub mod service;

pub use service::ShareService;
