//! # Chronicle Shared
//!
//! Wire types of the HTTP API: request/response DTOs and the RFC 7807
//! error body. Kept free of domain and framework dependencies so API
//! clients can depend on it directly.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
