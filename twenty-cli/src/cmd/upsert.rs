use crate::cmd::{client_or_exit, invalid_input, report};
use crate::exit_codes;
use crate::output::print_result;
use crate::utils::parse_object_arg;
use crate::{ApiArgs, OutputArgs};

pub async fn upsert_cmd(
    object: &str,
    field: &str,
    value: &str,
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
    match client.upsert(object, field, value, &body).await {
        Ok(record) => {
            print_result(output.format, output.quiet, &record);
            exit_codes::SUCCESS
        }
        Err(e) => report(&output, &e),
    }
}
