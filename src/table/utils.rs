/// Trim whitespace, a leading UTF-8 BOM and outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim_start_matches('\u{feff}').trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}

/// Split a header line into cleaned column names.
pub fn split_header(line: &str) -> Vec<String> {
    line.split(',').map(clean_str).collect()
}
