use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::month::Month;

/// Error taxonomy shared by every public service function.
///
/// Validation failures are detected before any persistence call; storage
/// failures are caught at the public-function boundary and surfaced as
/// [`CoreError::OperationFailed`] with the underlying message attached.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Caller has no valid household/session context.
    #[error("caller has no valid household context")]
    Unauthorized,
    /// Sum of allocations differs from the stated entry total beyond tolerance.
    #[error("allocations sum to {allocated} but the entry total is {expected}")]
    AllocationMismatch { expected: Decimal, allocated: Decimal },
    /// Entity id does not exist or belongs to another household; the two cases
    /// are indistinguishable on purpose.
    #[error("{0} not found in this household")]
    NotFoundOrUnauthorized(&'static str),
    /// Edit/delete attempted on an entity still referenced by another entity.
    /// Names the conflict class only, never the conflicting row.
    #[error("{entity} is in use by {conflict}")]
    ReferentialConflict {
        entity: &'static str,
        conflict: &'static str,
    },
    /// Budget copy refused: the target month already has budget items.
    #[error("month {0} already has budget items")]
    TargetNotEmpty(Month),
    /// Budget copy refused: the source month has nothing to copy.
    #[error("month {0} has no budget items to copy")]
    SourceEmpty(Month),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Storage-layer failure re-surfaced for diagnostics; never retried here.
    #[error("operation failed: {0}")]
    OperationFailed(String),
}
