use serde::Serialize;
use twenty_core::RetryConfig;
use twenty_exec::credentials::EnvCredentialsProvider;

use crate::config::{client_for, resolve, Settings};
use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::{ApiArgs, OutputArgs};

#[derive(Serialize)]
struct Check {
    name: String,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl Check {
    fn new(name: &str, status: &str, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status: status.to_string(),
            message: Some(message.into()),
        }
    }
}

#[derive(Serialize)]
struct DoctorResult {
    checks: Vec<Check>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry: Option<RetryConfig>,
    all_passed: bool,
}

pub async fn doctor_cmd(output: OutputArgs, api: ApiArgs) -> i32 {
    let mut checks = Vec::new();

    let settings = match resolve(&api) {
        Ok(s) => {
            checks.push(Check::new(
                "config",
                "ok",
                format!(
                    "timeout {} ms, up to {} attempt(s)",
                    s.timeout.as_millis(),
                    s.retry.max_attempts()
                ),
            ));
            Some(s)
        }
        Err(e) => {
            checks.push(Check::new("config", "error", e.to_string()));
            None
        }
    };

    let url_override = settings.as_ref().and_then(|s| s.api_url.as_deref());
    let credentials_ok = check_credentials(&mut checks, url_override);

    match &settings {
        Some(settings) if credentials_ok => checks.push(check_connectivity(settings).await),
        _ => checks.push(Check::new(
            "connectivity",
            "skipped",
            "configuration or credentials incomplete",
        )),
    }

    let all_passed = checks.iter().all(|c| c.status == "ok");
    let result = DoctorResult {
        checks,
        retry: settings.map(|s| s.retry),
        all_passed,
    };

    if output.format == OutputFormat::Text && !output.quiet {
        println!("Environment checks:");
        for c in &result.checks {
            let icon = if c.status == "ok" { "✓" } else { "✗" };
            print!("  {} {}: {}", icon, c.name, c.status);
            if let Some(msg) = &c.message {
                print!(" - {msg}");
            }
            println!();
        }
        if result.all_passed {
            println!("\nAll checks passed.");
        } else {
            println!("\nSome checks failed.");
        }
    } else {
        print_result(output.format, output.quiet, &result);
    }

    if all_passed {
        exit_codes::SUCCESS
    } else {
        exit_codes::RUNTIME_ERROR
    }
}

fn check_credentials(checks: &mut Vec<Check>, url_override: Option<&str>) -> bool {
    match EnvCredentialsProvider::default().load() {
        Ok(mut creds) => {
            if let Some(url) = url_override {
                creds = creds.with_api_url(url);
            }
            checks.push(Check::new("api_key", "ok", "TWENTY_API_KEY is set"));
            checks.push(Check::new("api_url", "ok", creds.base_url()));
            true
        }
        Err(e) => {
            checks.push(Check::new("api_key", "error", e.to_string()));
            false
        }
    }
}

async fn check_connectivity(settings: &Settings) -> Check {
    let client = match client_for(settings) {
        Ok(c) => c,
        Err(e) => return Check::new("connectivity", "error", e.to_string()),
    };
    match client.verify_credentials().await {
        Ok(()) => Check::new("connectivity", "ok", "authenticated request succeeded"),
        Err(e) => Check::new("connectivity", "error", e.to_string()),
    }
}
