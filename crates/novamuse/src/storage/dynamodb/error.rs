//! Maps AWS SDK errors onto `RepositoryError`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use novamuse_core::storage::RepositoryError;

/// Maps a failed Query, Scan or PutItem call.
///
/// Transport failures become `ConnectionFailed`; service errors are keyed on
/// the DynamoDB error code.
pub fn map_sdk_error<E, R>(operation: &'static str, err: SdkError<E, R>) -> RepositoryError
where
    E: ProvideErrorMetadata + Debug,
    R: Debug,
{
    if let SdkError::DispatchFailure(failure) = &err {
        return RepositoryError::ConnectionFailed(format!("{:?}", failure));
    }

    let message = match err.code() {
        Some("ResourceNotFoundException") => "Table not found".to_string(),
        Some("ProvisionedThroughputExceededException" | "ThrottlingException") => {
            "Throughput exceeded, please retry".to_string()
        }
        Some("RequestLimitExceeded") => "Request limit exceeded, please retry".to_string(),
        Some("InternalServerError") => "DynamoDB internal server error".to_string(),
        _ => format!("{} failed: {:?}", operation, err),
    };

    RepositoryError::QueryFailed(message)
}

/// Maps a failed conditional PutItem. A failed `attribute_not_exists(PK)`
/// check is the duplicate outcome.
pub fn map_put_item_error<R: Debug>(
    err: SdkError<PutItemError, R>,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    if err
        .as_service_error()
        .is_some_and(PutItemError::is_conditional_check_failed_exception)
    {
        return RepositoryError::AlreadyExists {
            entity_type,
            id: id.into(),
        };
    }

    map_sdk_error("PutItem", err)
}
