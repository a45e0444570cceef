use std::io;
use std::path::{Component, Path, PathBuf};

/// Canonical absolute form of `requested` against a chosen `root`.
///
/// Empty input means the root itself; relative input is joined under the
/// root; absolute input is resolved as-is (containment is checked later
/// either way).
pub fn resolve(requested: &str, root: &Path) -> io::Result<PathBuf> {
    if requested.is_empty() {
        return canonicalize_best_effort(root);
    }
    let requested = Path::new(requested);
    let joined = if requested.is_absolute() {
        requested.to_path_buf()
    } else {
        root.join(requested)
    };
    canonicalize_best_effort(&joined)
}

/// Canonicalization that still succeeds for paths that do not exist yet.
///
/// Components that exist are resolved through the filesystem (symlinks
/// included); once a component is missing, the remaining tail is folded
/// lexically (`.` dropped, `..` pops). Existence is the caller's problem.
pub fn canonicalize_best_effort(path: &Path) -> io::Result<PathBuf> {
    match dunce::canonicalize(path) {
        Ok(resolved) => return Ok(resolved),
        Err(err) if missing_kind(&err) => {}
        Err(err) => return Err(err),
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut out = PathBuf::new();
    let mut missing = false;
    for component in absolute.components() {
        match component {
            Component::Prefix(p) => out.push(p.as_os_str()),
            Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                // `out` is canonical up to here, so a lexical pop is the
                // physical parent; at the root this is a no-op.
                out.pop();
            }
            Component::Normal(name) => {
                if missing {
                    out.push(name);
                    continue;
                }
                let next = out.join(name);
                match dunce::canonicalize(&next) {
                    Ok(resolved) => out = resolved,
                    Err(err) if missing_kind(&err) => {
                        missing = true;
                        out.push(name);
                    }
                    Err(err) => return Err(err),
                }
            }
        }
    }
    Ok(out)
}

fn missing_kind(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

/// Outcome of a containment check. Resolution failures get their own arm so
/// the fail-closed policy stays visible to callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    Contained,
    Outside,
    Unresolvable,
}

/// Whether `candidate` lives at or under `root`.
///
/// Both sides are re-resolved fresh, then compared segment by segment via
/// the ancestor chain. This is never a string-prefix test: `/data-backup`
/// does not count as inside `/data`.
pub fn containment(candidate: &Path, root: &Path) -> Containment {
    let candidate = match canonicalize_best_effort(candidate) {
        Ok(p) => p,
        Err(_) => return Containment::Unresolvable,
    };
    let root = match canonicalize_best_effort(root) {
        Ok(p) => p,
        Err(_) => return Containment::Unresolvable,
    };
    if candidate.ancestors().any(|ancestor| ancestor == root) {
        Containment::Contained
    } else {
        Containment::Outside
    }
}

pub fn is_within(candidate: &Path, root: &Path) -> bool {
    containment(candidate, root) == Containment::Contained
}
