//! Slash-normalized path arithmetic.
//!
//! Module identifiers mirror the compiled output layout, so every path
//! computation here works on forward-slash separated strings regardless of
//! the platform the analyzed tree came from. Windows separators are folded
//! to `/` up front and `.`/`..` segments are resolved structurally, without
//! touching the file system.

/// Normalize a path: fold backslashes to `/`, collapse repeated separators
/// and resolve `.` and `..` segments.
pub fn normalize(path: &str) -> String {
    let path = path.replace('\\', "/");
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(segments.last(), Some(&s) if s != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }
    let joined = segments.join("/");
    if absolute { format!("/{joined}") } else { joined }
}

/// Join `base` and `tail` and normalize the result.
pub fn join(base: &str, tail: &str) -> String {
    if tail.starts_with('/') {
        normalize(tail)
    } else if base.is_empty() {
        normalize(tail)
    } else {
        normalize(&format!("{base}/{tail}"))
    }
}

/// The directory portion of a path (empty for a bare file name).
pub fn dirname(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Compute `path` relative to `base`, both normalized first.
///
/// Shared leading segments are dropped and every remaining `base` segment
/// becomes a `..`. Relative and absolute inputs both work as long as the
/// two sides agree.
pub fn relative(base: &str, path: &str) -> String {
    let base = normalize(base);
    let path = normalize(path);
    if base == path {
        return String::new();
    }

    let base_segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();
    let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let mut common = 0;
    while common < base_segments.len()
        && common < path_segments.len()
        && base_segments[common] == path_segments[common]
    {
        common += 1;
    }

    let mut segments: Vec<&str> = Vec::new();
    for _ in common..base_segments.len() {
        segments.push("..");
    }
    segments.extend(&path_segments[common..]);
    segments.join("/")
}

/// Strip the last extension (`lib/util.ts` -> `lib/util`).
///
/// Only the final `.` of the last segment is considered; a path without an
/// extension is returned unchanged.
pub fn strip_extension(path: &str) -> &str {
    let file_start = path.rfind('/').map_or(0, |idx| idx + 1);
    match path[file_start..].rfind('.') {
        Some(dot) if dot > 0 => &path[..file_start + dot],
        _ => path,
    }
}

/// Strip a known multi-part suffix such as `.d.ts`, if present.
pub fn strip_suffix<'a>(path: &'a str, suffix: &str) -> &'a str {
    path.strip_suffix(suffix)
        .map(|s| s.strip_suffix('.').unwrap_or(s))
        .unwrap_or(path)
}
