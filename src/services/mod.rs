//! Business logic services.
//!
//! Services contain core logic separated from HTTP handlers: secret
//! generation, key issuance, and the verification decision.

pub mod api_key_service;
