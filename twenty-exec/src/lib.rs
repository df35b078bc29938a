#![forbid(unsafe_code)]

//! Twenty CRM REST client.
//!
//! Every call goes through the retry engine in `twenty-core`; this crate
//! supplies the transport, credentials and the request shapes on top.

pub mod api;
pub mod credentials;
pub mod http;

pub use crate::api::{
    ApiError, ApiRequest, BulkItemResult, BulkOperation, TwentyClient, TwentyError,
    BULK_CONCURRENCY,
};
pub use crate::credentials::{Credentials, CredentialsError, CredentialsProvider};
pub use crate::http::{HttpClient, HttpError, ReqwestHttpClient};
