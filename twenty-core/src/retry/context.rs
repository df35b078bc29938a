use crate::retry::attempt::AttemptError;

/// Short human-readable prefix explaining a final failure.
///
/// `attempt_index` is 0-based; the attempt count is only mentioned once at
/// least one retry happened.
pub fn describe_context(error: &AttemptError, attempt_index: usize) -> String {
    let lead = match (error.status, error.code.as_deref()) {
        (Some(429), _) => "Rate limit exceeded. ",
        (Some(503), _) => "Service temporarily unavailable. ",
        (Some(502 | 504), _) => "Server gateway error. ",
        (_, Some("ECONNREFUSED")) => "Connection refused - server may be down. ",
        (_, Some("ETIMEDOUT")) => "Request timed out. ",
        _ => "",
    };

    let mut context = lead.to_string();
    if attempt_index > 0 {
        context.push_str(&format!("Failed after {} attempt(s). ", attempt_index + 1));
    }
    context
}
