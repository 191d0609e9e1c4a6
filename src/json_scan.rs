/// Hard cap on how far the extractor scans past a marker.
pub const DEFAULT_MAX_SCAN: usize = 1_000_000;

/// Extract one balanced `{...}` region following a literal marker.
///
/// Scans forward from the first occurrence of `start_marker`, at most
/// `max_scan` characters, counting brace depth: the first `{` opens the
/// region and the scan stops as soon as depth returns to zero. Returns
/// `None` when the marker is absent or no balanced region closes within
/// the cap; callers must fall back to another extraction path rather
/// than any unbounded pattern search.
///
/// Braces are counted without string-awareness, so a `}` inside a quoted
/// JSON string can truncate the region. That is acceptable here: the
/// returned slice is never trusted to parse, and a parse failure is
/// non-fatal for every caller.
pub fn extract_balanced_json<'a>(
    haystack: &'a str,
    start_marker: &str,
    max_scan: usize,
) -> Option<&'a str> {
    let marker_pos = haystack.find(start_marker)?;
    let scan_from = marker_pos + start_marker.len();
    let tail = &haystack[scan_from..];

    let mut depth: usize = 0;
    let mut open_at: Option<usize> = None;

    for (scanned, (idx, ch)) in tail.char_indices().enumerate() {
        if scanned >= max_scan {
            return None;
        }
        match ch {
            '{' => {
                if open_at.is_none() {
                    open_at = Some(idx);
                }
                depth += 1;
            }
            '}' if open_at.is_some() => {
                depth -= 1;
                if depth == 0 {
                    let start = scan_from + open_at.unwrap();
                    let end = scan_from + idx + ch.len_utf8();
                    return Some(&haystack[start..end]);
                }
            }
            _ => {}
        }
    }

    None
}
