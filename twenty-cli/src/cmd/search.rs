use crate::cmd::{client_or_exit, invalid_input};
use crate::exit_codes;
use crate::output::print_result;
use crate::{ApiArgs, OutputArgs};

pub async fn search_cmd(
    query: &str,
    object_types: &[String],
    limit: u32,
    output: OutputArgs,
    api: ApiArgs,
) -> i32 {
    let object_types: Vec<String> = object_types
        .iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    if object_types.is_empty() {
        return invalid_input(&output, "at least one object type is required");
    }

    let client = match client_or_exit(&api, &output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let hits = client.search(query, &object_types, limit).await;
    print_result(output.format, output.quiet, &hits);
    exit_codes::SUCCESS
}
