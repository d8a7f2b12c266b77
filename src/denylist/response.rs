/*!
 * Wire Responses
 * Small-integer response codes shared with the command dispatcher
 */

use crate::core::errors::{AddError, EnableError, RemoveError};
use serde::{Deserialize, Serialize};

/// Response codes of the daemon's denylist command protocol
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyResponse {
    Error = -1,
    Success = 0,
    IsEnforced = 1,
    NotEnforced = 2,
    ItemExists = 3,
    ItemNotExist = 4,
    InvalidPkg = 5,
    NoNamespace = 6,
}

impl DenyResponse {
    /// The raw wire integer
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Response for the `status` command
    pub fn status(enforced: bool) -> Self {
        if enforced {
            DenyResponse::IsEnforced
        } else {
            DenyResponse::NotEnforced
        }
    }
}

impl From<&AddError> for DenyResponse {
    fn from(err: &AddError) -> Self {
        match err {
            AddError::InvalidName { .. } => DenyResponse::InvalidPkg,
            AddError::AlreadyExists { .. } => DenyResponse::ItemExists,
            AddError::NotEnforced | AddError::Store(_) => DenyResponse::Error,
        }
    }
}

impl From<&RemoveError> for DenyResponse {
    fn from(err: &RemoveError) -> Self {
        match err {
            RemoveError::NotFound { .. } => DenyResponse::ItemNotExist,
            RemoveError::NotEnforced | RemoveError::Store(_) => DenyResponse::Error,
        }
    }
}

impl From<&EnableError> for DenyResponse {
    fn from(err: &EnableError) -> Self {
        match err {
            EnableError::AlreadyEnforced => DenyResponse::IsEnforced,
            EnableError::NoNamespaceSupport => DenyResponse::NoNamespace,
            EnableError::Proc(_) | EnableError::Store(_) => DenyResponse::Error,
        }
    }
}

impl<E> From<Result<(), E>> for DenyResponse
where
    for<'a> DenyResponse: From<&'a E>,
{
    fn from(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => DenyResponse::Success,
            Err(e) => DenyResponse::from(&e),
        }
    }
}
