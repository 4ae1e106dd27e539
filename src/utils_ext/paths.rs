// Path string helpers

use std::env;
use std::path::{Component, Path, PathBuf};

/// Git Bash for Windows
const MSYS_PREFIX_NATIVE: &str = r"C:\Program Files\Git";
/// Git Bash running inside ConEmu
const MSYS_PREFIX_MIXED: &str = "C:/Program Files/Git";

/// Whether the process runs under an MSYS shell that rewrites POSIX-looking
/// arguments into Windows paths.
pub fn in_msys() -> bool {
    ["MSYSTEM", "MSYS"]
        .iter()
        .any(|var| env::var_os(var).is_some_and(|v| !v.is_empty()))
}

/// Undo the MSYS argument conversion of `path` when running under MSYS.
///
/// Conversion can be disabled at the shell with `MSYS_NO_PATHCONV=1`.
pub fn fix_msys(path: &str) -> String {
    fix_msys_path(path, in_msys())
}

/// Strip the known Git-for-Windows prefixes from an argument
pub fn fix_msys_path(path: &str, in_msys: bool) -> String {
    if !in_msys {
        return path.to_string();
    }

    if path.contains(MSYS_PREFIX_NATIVE) {
        path.replacen(MSYS_PREFIX_NATIVE, "", 1).replace('\\', "/")
    } else if path.contains(MSYS_PREFIX_MIXED) {
        path.replacen(MSYS_PREFIX_MIXED, "", 1)
    } else {
        path.to_string()
    }
}

/// Resolve `.` and `..` components without touching the filesystem
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(out.components().next_back(), Some(Component::Normal(_)));
                if can_pop {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }

    out
}

/// Absolute form of `path`, relative paths resolved against the working directory
pub fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(normalize_lexically(path))
    } else {
        Ok(normalize_lexically(&env::current_dir()?.join(path)))
    }
}
