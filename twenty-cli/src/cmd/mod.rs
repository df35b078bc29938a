pub mod bulk;
pub mod doctor;
pub mod record;
pub mod search;
pub mod upsert;

use twenty_exec::{TwentyClient, TwentyError};

use crate::config::build_client;
use crate::exit_codes;
use crate::output::print_error;
use crate::{ApiArgs, OutputArgs};

/// Builds the client or reports why it could not be built.
pub(crate) fn client_or_exit(api: &ApiArgs, output: &OutputArgs) -> Result<TwentyClient, i32> {
    build_client(api).map_err(|e| {
        print_error(output.format, output.quiet, &e.to_string());
        exit_codes::for_config_error(&e)
    })
}

pub(crate) fn report(output: &OutputArgs, err: &TwentyError) -> i32 {
    print_error(output.format, output.quiet, &err.to_string());
    exit_codes::for_error(err)
}

pub(crate) fn invalid_input(output: &OutputArgs, message: &str) -> i32 {
    print_error(output.format, output.quiet, message);
    exit_codes::VALIDATION_FAILED
}
