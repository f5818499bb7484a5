//! # Identity Resolver
//!
//! Derives the caller of an operation from its execution context. The
//! payload is never consulted.

use crate::domain::{CallerIdentity, UlnError};
use crate::ports::ExecutionContext;
use tracing::error;

/// Resolve the authenticated caller of an operation.
///
/// Fails with `MalformedContext` if the context has no origin. That never
/// happens for a live inbound operation and is treated as fatal.
pub fn resolve_caller<C: ExecutionContext + ?Sized>(
    context: &C,
) -> Result<CallerIdentity, UlnError> {
    match context.origin_account() {
        Some(origin) => Ok(CallerIdentity::from_origin(origin)),
        None => {
            error!("[uln] operation context has no origin account");
            Err(UlnError::MalformedContext)
        }
    }
}
