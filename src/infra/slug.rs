//! Slug generation for note filenames.

/// Converts a title to a filesystem-safe slug.
///
/// - Converts to lowercase
/// - Replaces spaces with hyphens
/// - Keeps only alphanumeric characters, hyphens, and underscores
/// - Collapses consecutive hyphens
/// - Trims leading/trailing hyphens
/// - Truncates to 50 characters (at word boundary if possible)
/// - Returns "untitled" for empty results
///
/// # Examples
///
/// ```
/// use shelf::infra::slugify;
///
/// assert_eq!(slugify("Meeting Notes"), "meeting-notes");
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify(""), "untitled");
/// ```
pub fn slugify(title: &str) -> String {
    const MAX_LENGTH: usize = 50;

    let lower = title.to_lowercase();

    // Replace spaces with hyphens and filter invalid characters
    let mut result = String::new();
    for c in lower.chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c);
        } else if c == ' ' || c == '-' || c == '_' {
            result.push(if c == ' ' { '-' } else { c });
        }
        // Skip all other characters
    }

    // Collapse consecutive hyphens
    let mut collapsed = String::new();
    let mut prev_was_hyphen = false;
    for c in result.chars() {
        if c == '-' {
            if !prev_was_hyphen {
                collapsed.push(c);
            }
            prev_was_hyphen = true;
        } else {
            collapsed.push(c);
            prev_was_hyphen = false;
        }
    }

    let trimmed = collapsed.trim_matches('-');

    if trimmed.is_empty() {
        return "untitled".to_string();
    }

    if trimmed.len() <= MAX_LENGTH {
        return trimmed.to_string();
    }

    // Try to truncate at a hyphen boundary
    let truncated = &trimmed[..MAX_LENGTH];
    if let Some(last_hyphen) = truncated.rfind('-')
        && last_hyphen > MAX_LENGTH / 2
    {
        // Only use hyphen boundary if it's not too early
        return truncated[..last_hyphen].to_string();
    }

    truncated.trim_end_matches('-').to_string()
}
