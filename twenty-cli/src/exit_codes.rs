use twenty_exec::TwentyError;

use crate::config::ConfigError;

/// Exit codes for CI/automation.
pub const SUCCESS: i32 = 0;
pub const VALIDATION_FAILED: i32 = 2;
pub const RUN_FAILED: i32 = 3;
pub const RUNTIME_ERROR: i32 = 4;

pub fn for_error(err: &TwentyError) -> i32 {
    match err {
        TwentyError::InvalidInput(_) => VALIDATION_FAILED,
        TwentyError::Credentials(_) => RUNTIME_ERROR,
        TwentyError::Request(_) | TwentyError::Decode(_) => RUN_FAILED,
    }
}

/// Bad settings the user supplied are validation failures; anything that
/// breaks while loading or building the client is a runtime error.
pub fn for_config_error(err: &ConfigError) -> i32 {
    match err {
        ConfigError::Retry(_) | ConfigError::ZeroTimeout => VALIDATION_FAILED,
        ConfigError::Read { .. }
        | ConfigError::Parse { .. }
        | ConfigError::Credentials(_)
        | ConfigError::Http(_) => RUNTIME_ERROR,
    }
}
