use crate::cmd::{client_or_exit, invalid_input, report};
use crate::exit_codes;
use crate::output::print_result;
use crate::utils::{parse_filters, parse_object_arg};
use crate::{ApiArgs, OutputArgs};

pub async fn get_cmd(object: &str, id: &str, output: OutputArgs, api: ApiArgs) -> i32 {
    let client = match client_or_exit(&api, &output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    match client.get(object, id).await {
        Ok(record) => {
            print_result(output.format, output.quiet, &record);
            exit_codes::SUCCESS
        }
        Err(e) => report(&output, &e),
    }
}

pub async fn list_cmd(
    object: &str,
    limit: Option<u32>,
    filters: &[String],
    output: OutputArgs,
    api: ApiArgs,
) -> i32 {
    let filters = match parse_filters(filters) {
        Ok(f) => f,
        Err(e) => return invalid_input(&output, &e),
    };
    let client = match client_or_exit(&api, &output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    match client.list(object, limit, &filters).await {
        Ok(records) => {
            print_result(output.format, output.quiet, &records);
            exit_codes::SUCCESS
        }
        Err(e) => report(&output, &e),
    }
}

pub async fn create_cmd(object: &str, data: &str, output: OutputArgs, api: ApiArgs) -> i32 {
    let body = match parse_object_arg(data) {
        Ok(b) => b,
        Err(e) => return invalid_input(&output, &e),
    };
    let client = match client_or_exit(&api, &output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    match client.create(object, &body).await {
        Ok(record) => {
            print_result(output.format, output.quiet, &record);
            exit_codes::SUCCESS
        }
        Err(e) => report(&output, &e),
    }
}

pub async fn update_cmd(
    object: &str,
    id: &str,
    data: &str,
    output: OutputArgs,
    api: ApiArgs,
) -> i32 {
    let body = match parse_object_arg(data) {
        Ok(b) => b,
        Err(e) => return invalid_input(&output, &e),
    };
    let client = match client_or_exit(&api, &output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    match client.update(object, id, &body).await {
        Ok(record) => {
            print_result(output.format, output.quiet, &record);
            exit_codes::SUCCESS
        }
        Err(e) => report(&output, &e),
    }
}

pub async fn delete_cmd(object: &str, id: &str, output: OutputArgs, api: ApiArgs) -> i32 {
    let client = match client_or_exit(&api, &output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    match client.delete(object, id).await {
        Ok(response) => {
            let result = serde_json::json!({"deleted": true, "id": id, "response": response});
            print_result(output.format, output.quiet, &result);
            exit_codes::SUCCESS
        }
        Err(e) => report(&output, &e),
    }
}
