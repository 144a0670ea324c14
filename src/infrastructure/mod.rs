//! Infrastructure layer - In-process implementations of domain seams

pub mod logging;
pub mod observability;
pub mod services;
pub mod session;
