mod bulk;
mod client;
mod error;
mod lookup;
mod objects;
mod request;
mod search;

pub use bulk::{
    parse_bulk_ids, parse_bulk_items, parse_bulk_update_items, BulkItemResult, BulkOperation,
    BULK_CONCURRENCY,
};
pub use client::{TwentyClient, DEFAULT_TIMEOUT};
pub use error::{ApiError, TwentyError};
pub use lookup::{UpsertAction, UPSERT_ACTION_FIELD};
pub use objects::{
    build_filter_query, clean_object, extract_records, object_endpoint, record_endpoint,
};
pub use request::ApiRequest;
pub use search::{DEFAULT_SEARCH_LIMIT, OBJECT_TYPE_FIELD};
