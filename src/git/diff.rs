use crate::error::Result;
use crate::git::DiffStats;

fn extract_filename_from_diff_header(line: &str) -> Option<String> {
    const PREFIX: &str = "diff --git ";
    if !line.starts_with(PREFIX) {
        return None;
    }

    let rest = &line[PREFIX.len()..];

    // Locate the a/ b/ boundary via " b/" so paths with spaces survive.
    if let Some(b_pos) = rest.find(" b/") {
        return rest[..b_pos]
            .strip_prefix("a/")
            .map(|filename| filename.to_string());
    }

    // Quoted paths: diff --git "a/path with spaces.rs" "b/path with spaces.rs"
    if let Some(stripped) = rest.strip_prefix('"')
        && let Some(end) = stripped.find('"')
    {
        return stripped[..end]
            .strip_prefix("a/")
            .map(|filename| filename.to_string());
    }

    rest.split_whitespace()
        .next()
        .and_then(|s| s.strip_prefix("a/"))
        .map(|s| s.to_string())
}

/// Extract file list and insertion/deletion counts from diff text.
pub fn parse_diff_stats(diff: &str) -> Result<DiffStats> {
    let mut files_changed = Vec::new();
    let mut insertions = 0;
    let mut deletions = 0;

    for line in diff.lines() {
        if line.starts_with("diff --git") {
            if let Some(filename) = extract_filename_from_diff_header(line) {
                files_changed.push(filename);
            }
        } else if line.starts_with('+') && !line.starts_with("+++") {
            insertions += 1;
        } else if line.starts_with('-') && !line.starts_with("---") {
            deletions += 1;
        }
    }

    Ok(DiffStats {
        files_changed,
        insertions,
        deletions,
    })
}
