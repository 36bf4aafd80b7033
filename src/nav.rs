use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ViewerError;

// ---------------------------------------------------------------------------
// Directory image cycling: list sibling images of the loaded file and step
// next/prev with wraparound. The listing is recomputed on every call so it
// always reflects current directory contents.
// ---------------------------------------------------------------------------

pub const IMAGE_EXTENSIONS: &[&str] = &[
    "bmp", "gif", "jpg", "jpeg", "jpe", "jfif", "png", "tif", "tiff",
];

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Non-recursive listing of the directory containing `loaded`, filtered to
/// supported image extensions and sorted ascending by file name.
pub fn list_sibling_images(loaded: &Path) -> Result<Vec<PathBuf>, ViewerError> {
    let dir = loaded.parent().unwrap_or(Path::new("."));
    let entries = fs::read_dir(dir).map_err(|source| ViewerError::DirectoryUnavailable {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_image_file(p))
        .collect();

    // Sort by file name, not full path.
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Direction {
    Forward,
    Backward,
}

fn step(loaded: &Path, dir: Direction) -> Option<PathBuf> {
    let siblings = match list_sibling_images(loaded) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("navigation unavailable: {}", e);
            return None;
        }
    };
    if siblings.is_empty() {
        return None;
    }

    // The loaded file may have been deleted or renamed since it was opened;
    // in that case there is no position to step from.
    let name = loaded.file_name()?;
    let pos = siblings.iter().position(|p| p.file_name() == Some(name))?;

    let next = match dir {
        Direction::Forward => (pos + 1) % siblings.len(),
        Direction::Backward => (pos + siblings.len() - 1) % siblings.len(),
    };
    Some(siblings[next].clone())
}

/// Next sibling image by file name, wrapping to the first after the last.
pub fn next_image(loaded: &Path) -> Option<PathBuf> {
    step(loaded, Direction::Forward)
}

/// Previous sibling image by file name, wrapping to the last before the first.
pub fn prev_image(loaded: &Path) -> Option<PathBuf> {
    step(loaded, Direction::Backward)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        File::create(&path).expect("create test file");
        path
    }

    #[test]
    fn listing_filters_and_sorts_by_name() {
        let tmp = tempdir().expect("tempdir");
        let b = touch(tmp.path(), "b.png");
        let a = touch(tmp.path(), "a.png");
        let c = touch(tmp.path(), "c.jpg");
        touch(tmp.path(), "notes.txt");
        touch(tmp.path(), "noext");

        let listing = list_sibling_images(&b).expect("listing");
        assert_eq!(listing, vec![a, b, c]);
    }

    #[test]
    fn listing_is_case_insensitive_on_extension() {
        let tmp = tempdir().expect("tempdir");
        let a = touch(tmp.path(), "a.PNG");
        let b = touch(tmp.path(), "b.Jpeg");

        let listing = list_sibling_images(&a).expect("listing");
        assert_eq!(listing, vec![a, b]);
    }

    #[test]
    fn next_and_prev_step_and_wrap() {
        let tmp = tempdir().expect("tempdir");
        let a = touch(tmp.path(), "a.png");
        let b = touch(tmp.path(), "b.png");
        let c = touch(tmp.path(), "c.jpg");

        assert_eq!(next_image(&b), Some(c.clone()));
        assert_eq!(next_image(&c), Some(a.clone())); // wrap
        assert_eq!(prev_image(&a), Some(c.clone())); // wrap
        assert_eq!(prev_image(&b), Some(a.clone()));
    }

    #[test]
    fn next_cycles_back_to_start_after_n_steps() {
        let tmp = tempdir().expect("tempdir");
        let names = ["a.png", "b.gif", "c.jpg", "d.bmp", "e.tif"];
        for n in names {
            touch(tmp.path(), n);
        }
        let start = tmp.path().join("a.png");
        let mut cur = start.clone();
        for _ in 0..names.len() {
            cur = next_image(&cur).expect("next");
        }
        assert_eq!(cur, start);
    }

    #[test]
    fn next_then_prev_returns_to_start() {
        let tmp = tempdir().expect("tempdir");
        touch(tmp.path(), "a.png");
        let b = touch(tmp.path(), "b.png");
        touch(tmp.path(), "c.jpg");

        let fwd = next_image(&b).expect("next");
        assert_eq!(prev_image(&fwd), Some(b));
    }

    #[test]
    fn loaded_file_absent_from_listing_yields_none() {
        let tmp = tempdir().expect("tempdir");
        touch(tmp.path(), "a.png");
        touch(tmp.path(), "b.png");

        // Unsupported extension: listed siblings exist but the loaded file
        // has no position among them.
        let odd = touch(tmp.path(), "movie.mp4");
        assert_eq!(next_image(&odd), None);
        assert_eq!(prev_image(&odd), None);

        // Deleted file.
        let gone = tmp.path().join("zz.png");
        assert_eq!(next_image(&gone), None);
    }

    #[test]
    fn empty_directory_yields_none() {
        let tmp = tempdir().expect("tempdir");
        let ghost = tmp.path().join("only.png");
        assert_eq!(next_image(&ghost), None);
        assert_eq!(prev_image(&ghost), None);
    }

    #[test]
    fn unreadable_directory_is_navigation_unavailable() {
        let missing = Path::new("/no/such/directory/img.png");
        assert!(list_sibling_images(missing).is_err());
        assert_eq!(next_image(missing), None);
        assert_eq!(prev_image(missing), None);
    }

    #[test]
    fn single_image_wraps_to_itself() {
        let tmp = tempdir().expect("tempdir");
        let only = touch(tmp.path(), "only.jfif");
        assert_eq!(next_image(&only), Some(only.clone()));
        assert_eq!(prev_image(&only), Some(only));
    }
}
