use std::path::{Component, Path, PathBuf};

/// Make `path` absolute against `base` and clean it lexically.
///
/// Absolute paths are only cleaned. `.` components are dropped and `..` pops
/// the previous component; the filesystem is never consulted, so symlinks are
/// not resolved and the path need not exist.
pub fn absolutize(path: impl AsRef<Path>, base: &Path) -> PathBuf {
	let path = path.as_ref();
	if path.is_absolute() {
		clean(path)
	} else {
		clean(&base.join(path))
	}
}

/// Lexically normalise a path.
pub fn clean(path: &Path) -> PathBuf {
	let mut cleaned = PathBuf::new();

	for component in path.components() {
		match component {
			Component::CurDir => {}
			// `/..` stays `/`; leading `..` on a relative path is kept.
			Component::ParentDir => match cleaned.components().next_back() {
				Some(Component::Normal(_)) => {
					cleaned.pop();
				}
				Some(Component::RootDir | Component::Prefix(_)) => {}
				_ => cleaned.push(component),
			},
			other => cleaned.push(other),
		}
	}

	if cleaned.as_os_str().is_empty() {
		cleaned.push(".");
	}
	cleaned
}
