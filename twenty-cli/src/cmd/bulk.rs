use serde::Serialize;
use serde_json::{Map, Value};
use twenty_exec::api::{parse_bulk_ids, parse_bulk_items, parse_bulk_update_items};
use twenty_exec::{BulkItemResult, BulkOperation, TwentyError};

use crate::cmd::{client_or_exit, invalid_input, report};
use crate::exit_codes;
use crate::output::print_result;
use crate::utils::read_json_arg;
use crate::{ApiArgs, OutputArgs};

#[derive(Serialize)]
struct BulkSummary {
    operation: BulkOperation,
    total: usize,
    succeeded: usize,
    failed: usize,
    results: Vec<BulkItemResult>,
}

pub async fn bulk_create_cmd(object: &str, items: &str, output: OutputArgs, api: ApiArgs) -> i32 {
    let parsed = read_json_arg(items).map_err(TwentyError::InvalidInput);
    let parsed = parsed.and_then(|s| parse_bulk_items(&s));
    run(BulkOperation::Create, object, parsed, output, api).await
}

pub async fn bulk_update_cmd(object: &str, items: &str, output: OutputArgs, api: ApiArgs) -> i32 {
    let parsed = read_json_arg(items).map_err(TwentyError::InvalidInput);
    let parsed = parsed.and_then(|s| parse_bulk_update_items(&s));
    run(BulkOperation::Update, object, parsed, output, api).await
}

pub async fn bulk_delete_cmd(object: &str, ids: &str, output: OutputArgs, api: ApiArgs) -> i32 {
    let parsed = parse_bulk_ids(ids).map(|ids| {
        ids.into_iter()
            .map(|id| {
                let mut item = Map::new();
                item.insert("id".to_string(), Value::String(id));
                item
            })
            .collect()
    });
    run(BulkOperation::Delete, object, parsed, output, api).await
}

async fn run(
    operation: BulkOperation,
    object: &str,
    items: Result<Vec<Map<String, Value>>, TwentyError>,
    output: OutputArgs,
    api: ApiArgs,
) -> i32 {
    let items = match items {
        Ok(items) => items,
        Err(TwentyError::InvalidInput(msg)) => return invalid_input(&output, &msg),
        Err(e) => return report(&output, &e),
    };
    let client = match client_or_exit(&api, &output) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let results = client.bulk(operation, object, items).await;
    let succeeded = results.iter().filter(|r| r.success).count();
    let summary = BulkSummary {
        operation,
        total: results.len(),
        succeeded,
        failed: results.len() - succeeded,
        results,
    };
    print_result(output.format, output.quiet, &summary);

    if summary.failed == 0 {
        exit_codes::SUCCESS
    } else {
        exit_codes::RUN_FAILED
    }
}
