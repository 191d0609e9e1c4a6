use once_cell::sync::Lazy;
use regex::Regex;

/// Input is truncated to this many characters before any pattern runs.
pub const MAX_INPUT_CHARS: usize = 100_000;

/// The leading ingredient-block strip only looks inside this window.
const HEADING_WINDOW_CHARS: usize = 5_000;

/// Lines longer than this are treated as prose and always kept.
const MAX_INGREDIENT_LINE_CHARS: usize = 500;

// Every pattern here is either confined to the pre-truncated heading
// window or applied per-line behind the line-length guard, so none of
// them can blow up on large or crafted input.
static INGREDIENTS_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^[ \t]{0,8}ingredients[ \t]{0,8}:?[ \t]{0,8}").unwrap());

static SECTION_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(instructions|steps|method|directions)\b").unwrap());

static INGREDIENTS_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bingredients\s{0,8}:").unwrap());

static UNIT_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(cups?|tbsp|tsp|tablespoons?|teaspoons?|grams?|g|kg|ml|dl|l|oz|lbs?|pounds?|ounces?|liters?|litres?|milliliters?)\b",
    )
    .unwrap()
});

static BULLET_QUANTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s{0,8}[-•*–]\s{0,8}\d{1,4}([./,]\d{1,4})?").unwrap());

static NUMBERED_QUANTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s{0,8}\d{1,3}[.)]\s{0,8}\d{1,4}([./,]\d{1,4})?").unwrap());

/// Strip ingredient-list remnants out of free-form recipe instructions.
///
/// Handles both user-pasted text and model output, which routinely carry
/// the ingredient list glued onto the instructions. Idempotent once no
/// ingredient-shaped lines remain.
pub fn sanitize_instructions(instructions: &str) -> String {
    let text = truncate_chars(instructions, MAX_INPUT_CHARS);
    let text = strip_leading_ingredient_block(text);

    let kept: Vec<&str> = text
        .lines()
        .filter(|line| !is_ingredient_line(line))
        .collect();
    let joined = kept.join("\n");

    let cleaned = INGREDIENTS_LABEL.replace_all(&joined, "");
    cleaned.trim().to_string()
}

/// Remove an "Ingredients:" heading plus its following block, up to the
/// next recognized section heading or the end of the scan window. Text
/// beyond the window is reattached untouched.
fn strip_leading_ingredient_block(text: &str) -> String {
    let window_end = truncate_chars(text, HEADING_WINDOW_CHARS).len();
    let (window, rest) = text.split_at(window_end);

    let Some(heading) = INGREDIENTS_HEADING.find(window) else {
        return text.to_string();
    };

    let after_heading = &window[heading.end()..];
    let resume = match SECTION_HEADING.find(after_heading) {
        Some(section) => heading.end() + section.start(),
        None => window.len(),
    };

    let mut out = String::with_capacity(text.len());
    out.push_str(&window[..heading.start()]);
    out.push_str(&window[resume..]);
    out.push_str(rest);
    out
}

fn is_ingredient_line(line: &str) -> bool {
    if line.chars().count() > MAX_INGREDIENT_LINE_CHARS {
        return false;
    }
    if !UNIT_KEYWORD.is_match(line) {
        return false;
    }
    BULLET_QUANTITY.is_match(line) || NUMBERED_QUANTITY.is_match(line)
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
