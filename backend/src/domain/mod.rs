//! Domain primitives, ports, and the registration use-case.
//!
//! Purpose: define strongly typed values for registration submissions and the
//! ports through which the use-case reaches its store and hasher. Nothing here
//! depends on HTTP or on a particular database.
//!
//! Public surface:
//! - Error / ErrorCode - transport-agnostic failures.
//! - Registration and its field newtypes - validated submissions.
//! - UserRecord - what the store persists.
//! - RegistrationService - implementation of the registration driving port.
//! - TraceId - request correlation identifier.

pub mod error;
pub mod ports;
pub mod registration;
pub mod registration_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode};
pub use self::registration::{
    EmailAddress, FullName, PASSWORD_MIN_CHARS, Password, PasswordHash, RegisteredUser,
    Registration, RegistrationField, RegistrationValidationError, UserRecord,
};
pub use self::registration_service::RegistrationService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
