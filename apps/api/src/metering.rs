//! Per-request cost and telemetry accounting.
//!
//! Pricing is gpt-4o's published per-million-token rates with the usage
//! split assumed 90% input / 10% output. Token counts are an approximation:
//! gpt-4o averages about four characters per token on English prose, and the
//! estimate only feeds the cost figure.

use std::time::Instant;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::llm_client::MODEL;

const INPUT_COST_PER_MTOK: f64 = 5.0;
const OUTPUT_COST_PER_MTOK: f64 = 15.0;
const INPUT_SHARE: f64 = 0.9;

/// Approximate token count of `text` under the completion model's tokenizer.
pub fn count_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

/// Estimated dollar cost of a request totalling `token_count` tokens,
/// rounded to 5 decimals.
pub fn estimate_cost(token_count: usize) -> f64 {
    let input_tokens = (token_count as f64 * INPUT_SHARE).floor();
    let output_tokens = token_count as f64 - input_tokens;

    let input_cost = input_tokens / 1_000_000.0 * INPUT_COST_PER_MTOK;
    let output_cost = output_tokens / 1_000_000.0 * OUTPUT_COST_PER_MTOK;

    round_to(input_cost + output_cost, 100_000.0)
}

fn round_to(value: f64, scale: f64) -> f64 {
    (value * scale).round() / scale
}

/// Document-level telemetry returned alongside every parse response.
#[derive(Debug, Clone, Serialize)]
pub struct RequestMeta {
    pub char_count: usize,
    pub token_count: usize,
    pub estimated_cost_usd: f64,
    pub processing_time_seconds: f64,
    pub model_used: &'static str,
    pub timestamp: String,
}

impl RequestMeta {
    /// Captures the telemetry block for one request: counts over the
    /// extracted text, wall clock since `started`, and the current UTC time.
    pub fn capture(resume_text: &str, started: Instant) -> Self {
        let token_count = count_tokens(resume_text);
        RequestMeta {
            char_count: resume_text.chars().count(),
            token_count,
            estimated_cost_usd: estimate_cost(token_count),
            processing_time_seconds: round_to(started.elapsed().as_secs_f64(), 100.0),
            model_used: MODEL,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_for_1000_tokens_is_0_006() {
        // 900 input at $5/M + 100 output at $15/M
        assert_eq!(estimate_cost(1000), 0.006);
    }

    #[test]
    fn test_cost_for_zero_tokens_is_zero() {
        assert_eq!(estimate_cost(0), 0.0);
    }

    #[test]
    fn test_cost_is_rounded_to_five_decimals() {
        // 1M tokens: 900k * 5/M + 100k * 15/M = 4.5 + 1.5 = 6.0
        assert_eq!(estimate_cost(1_000_000), 6.0);
        let cost = estimate_cost(12_345);
        assert_eq!(round_to(cost, 100_000.0), cost);
    }

    #[test]
    fn test_empty_text_counts_zero_tokens() {
        assert_eq!(count_tokens(""), 0);
    }

    #[test]
    fn test_token_count_is_roughly_chars_over_four() {
        assert_eq!(count_tokens("abcd"), 1);
        assert_eq!(count_tokens("abcde"), 2);
        assert_eq!(count_tokens(&"x".repeat(4000)), 1000);
    }

    #[test]
    fn test_capture_on_empty_text_zeroes_the_counters() {
        let meta = RequestMeta::capture("", Instant::now());
        assert_eq!(meta.char_count, 0);
        assert_eq!(meta.token_count, 0);
        assert_eq!(meta.estimated_cost_usd, 0.0);
        assert_eq!(meta.model_used, "gpt-4o");
        assert!(meta.timestamp.ends_with('Z'));
    }
}
