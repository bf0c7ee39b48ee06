//! Functional core for the posts functions.
//!
//! Everything in this crate is free of I/O: request parsing, update-expression
//! planning, response shaping and the storage trait that the shell implements.

pub mod codec;
pub mod error;
pub mod event;
pub mod operation;
pub mod record;
pub mod response;
pub mod storage;
pub mod update;

pub use error::{PostError, RequestError};
pub use event::PostEvent;
pub use operation::{Operation, ParseOperationError};
pub use record::{Record, POST_ID_FIELD};
pub use response::{FailureBody, HandlerResponse, Payload, ResponseBody, SuccessBody};
pub use update::{SetClause, UpdatePlan};
