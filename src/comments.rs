use std::collections::HashSet;

use serde_json::Value;

/// Default recursion budget for untrusted JSON. The depth bound is a
/// correctness requirement, not an optimization: platform state blobs can
/// be adversarially deep.
pub const MAX_COMMENT_DEPTH: usize = 10;

const MIN_COMMENT_CHARS: usize = 50;
const MAX_COMMENT_CHARS: usize = 2000;

/// Keys whose string values platforms use for comment/caption bodies.
const COMMENT_KEYS: &[&str] = &["text", "content", "simpleText"];

const RECIPE_KEYWORDS: &[&str] = &[
    "ingredient", "cup", "tbsp", "tsp", "bake", "oven", "recipe", "flour",
    "sugar", "butter", "dough", "whisk", "simmer", "stir", "step", "minutes",
];

/// Candidate-comment predicate: plausible length plus at least one recipe
/// keyword.
pub fn looks_like_recipe_text(text: &str) -> bool {
    let chars = text.chars().count();
    if !(MIN_COMMENT_CHARS..=MAX_COMMENT_CHARS).contains(&chars) {
        return false;
    }
    let lower = text.to_lowercase();
    RECIPE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Walk a parsed JSON value collecting strings that look like recipe text.
///
/// Recursion stops unconditionally past `max_depth`; branches deeper than
/// that contribute nothing. Callers pass the raw result through
/// [`rank_comments`].
pub fn mine_comments(value: &Value, max_depth: usize) -> Vec<String> {
    let mut found = Vec::new();
    walk(value, 0, max_depth, &mut found);
    found
}

fn walk(value: &Value, depth: usize, max_depth: usize, found: &mut Vec<String>) {
    if depth > max_depth {
        return;
    }
    match value {
        Value::String(text) => {
            if looks_like_recipe_text(text) {
                found.push(text.clone());
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, depth + 1, max_depth, found);
            }
        }
        Value::Object(map) => {
            for (key, val) in map {
                // Comment-body keys are checked directly at this depth;
                // recursing into the same string would only repeat the check.
                if COMMENT_KEYS.contains(&key.as_str()) {
                    if let Value::String(text) = val {
                        if looks_like_recipe_text(text) {
                            found.push(text.clone());
                        }
                        continue;
                    }
                }
                walk(val, depth + 1, max_depth, found);
            }
        }
        _ => {}
    }
}

/// Deduplicate, order longest-first, and keep at most five candidates.
/// Longer strings are more likely to be full recipes.
pub fn rank_comments(mut comments: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    comments.retain(|c| seen.insert(c.clone()));
    comments.sort_by_key(|c| std::cmp::Reverse(c.chars().count()));
    comments.truncate(5);
    comments
}
