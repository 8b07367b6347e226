//! Best-effort page title lookup by literal marker search.

const HEAD_OPEN: &str = "<head>";
const HEAD_CLOSE: &str = "</head>";
const TITLE_OPEN: &str = "<title>";
const TITLE_CLOSE: &str = "</title>";

/// Text between the first `<title>` and `</title>`, when both lie inside the
/// first `<head>`..`</head>` span.
///
/// Markers are case-sensitive literals. Anything missing or out of order
/// yields `None`.
pub fn extract_title(body: &str) -> Option<&str> {
    let head_start = body.find(HEAD_OPEN)?;
    let head_end = body.find(HEAD_CLOSE)?;
    let title_start = body.find(TITLE_OPEN)?;
    let title_end = body.find(TITLE_CLOSE)?;

    if title_start <= head_start || title_end >= head_end {
        return None;
    }

    let text_start = title_start.checked_add(TITLE_OPEN.len())?;
    body.get(text_start..title_end)
}
