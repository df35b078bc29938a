use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch one record.
    Get {
        /// API plural object name, e.g. `companies`.
        object: String,
        id: String,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Fetch one page of records.
    List {
        object: String,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long = "filter", value_name = "KEY=VALUE")]
        filters: Vec<String>,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        api: ApiArgs,
    },
    Create {
        object: String,
        /// JSON object, or `@file`.
        data: String,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        api: ApiArgs,
    },
    Update {
        object: String,
        id: String,
        /// JSON object, or `@file`.
        data: String,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        api: ApiArgs,
    },
    Delete {
        object: String,
        id: String,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Search several object types at once.
    Search {
        query: String,
        #[arg(
            long = "type",
            value_delimiter = ',',
            default_value = "people,companies,opportunities"
        )]
        object_types: Vec<String>,
        #[arg(long, default_value_t = twenty_exec::api::DEFAULT_SEARCH_LIMIT)]
        limit: u32,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Update the record where FIELD equals VALUE, or create it.
    Upsert {
        object: String,
        #[arg(long)]
        field: String,
        #[arg(long)]
        value: String,
        /// JSON object, or `@file`.
        data: String,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        api: ApiArgs,
    },
    BulkCreate {
        object: String,
        /// JSON array of objects, or `@file`.
        items: String,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        api: ApiArgs,
    },
    BulkUpdate {
        object: String,
        /// JSON array of objects with an `id`, or `@file`.
        items: String,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        api: ApiArgs,
    },
    BulkDelete {
        object: String,
        /// Comma-separated ids.
        ids: String,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Check configuration and connectivity.
    Doctor {
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        api: ApiArgs,
    },
}
