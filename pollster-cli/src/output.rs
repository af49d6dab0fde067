//! Terminal output for poll results

use colored::*;
use pollster_core::{FetchError, PollSummary};
use serde_json::Value;

fn timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Print a decoded payload, pretty-printed
pub fn print_payload(attempt: u64, payload: &Value) {
    let body = serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
    println!(
        "{} {} {}",
        timestamp().dimmed(),
        format!("#{}", attempt).cyan(),
        body
    );
}

/// Print a failed attempt to stderr
pub fn print_error(error: &FetchError) {
    eprintln!("{} {}", timestamp().dimmed(), error.to_string().red());
}

/// Print the final summary as JSON
pub fn print_summary(summary: &PollSummary) {
    match serde_json::to_string_pretty(summary) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("{}", format!("Failed to encode summary: {}", e).red()),
    }
}
