//! Lexical path handling for the catalog namespace.
//!
//! Catalog paths are POSIX-like (`/zone/home/user/file.dat`) but never touch
//! the local filesystem: no symlink resolution, no existence checks. `..`
//! cannot climb above `/`.

pub const SEPARATOR: char = '/';

/// Join `relative` onto `base` and normalise `.`, `..` and repeated separators.
///
/// If `relative` is itself absolute it replaces `base`, mirroring POSIX join
/// semantics.
pub fn resolve(relative: &str, base: &str) -> String {
    let joined = if is_absolute(relative) {
        relative.to_string()
    } else {
        format!("{base}{SEPARATOR}{relative}")
    };
    normalize(&joined)
}

/// Return `path` unchanged when absolute, otherwise resolve it against `cwd`.
pub fn to_absolute(path: &str, cwd: &str) -> String {
    if is_absolute(path) {
        path.to_string()
    } else {
        resolve(path, cwd)
    }
}

pub fn is_absolute(path: &str) -> bool {
    path.starts_with(SEPARATOR)
}

/// Lexically normalise an absolute path.
pub fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split(SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("{SEPARATOR}{}", segments.join("/"))
}

/// Split an absolute path into `(parent, last segment)`.
///
/// `/zone/home/a.dat` yields `("/zone/home", "a.dat")`; top-level entries
/// have `/` as parent.
pub fn split(path: &str) -> (&str, &str) {
    match path.rfind(SEPARATOR) {
        Some(0) => ("/", &path[1..]),
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("", path),
    }
}

/// Join a collection path and a child name without doubling the separator.
pub fn join(collection: &str, name: &str) -> String {
    if collection.ends_with(SEPARATOR) {
        format!("{collection}{name}")
    } else {
        format!("{collection}{SEPARATOR}{name}")
    }
}

/// Last path segment; `/` for the root itself.
pub fn last_segment(path: &str) -> &str {
    match split(path) {
        (_, "") => path,
        (_, name) => name,
    }
}
