//! Placeholder text for cache misses

/// Generic openings a generated answer starts with
pub const MISS_OPENINGS: [&str; 4] = [
    "Based on the latest information, here's what you need to know about your query...",
    "That's an interesting question! Let me provide you with comprehensive insights...",
    "Here's a detailed explanation tailored to your specific question...",
    "According to current best practices and recent developments...",
];

pub const MISS_SUFFIX: &str = "... [Generated response with detailed information about the topic]";

const QUERY_TOKEN_LIMIT: usize = 20;

/// Build a miss response from an opening and the first 20 query tokens
///
/// `opening` is an index into [`MISS_OPENINGS`], wrapped if out of bounds.
pub fn generate_placeholder(opening: usize, query: &str) -> String {
    let opening = MISS_OPENINGS[opening % MISS_OPENINGS.len()];
    let excerpt = query
        .split_whitespace()
        .take(QUERY_TOKEN_LIMIT)
        .collect::<Vec<_>>()
        .join(" ");

    format!("{} {}{}", opening, excerpt, MISS_SUFFIX)
}
