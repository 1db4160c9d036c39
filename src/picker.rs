use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rfd::FileDialog;

/// Extensions offered by the picker dialog.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "tiff"];

/// Outcome of asking the user to pick an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// The user picked a readable image file.
    Picked(PathBuf),
    /// The user dismissed the dialog; nothing happens.
    Cancelled,
    /// The OS refused access to the selection; no upload is attempted.
    PermissionDenied,
}

/// Show the native image picker and verify the selection is readable.
///
/// The readability check happens before any network activity, so a denied
/// selection never turns into an upload attempt.
pub fn select_image() -> PickOutcome {
    let picked = FileDialog::new()
        .set_title("Select an Image")
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_file();

    match picked {
        Some(path) => verify_readable(&path),
        None => PickOutcome::Cancelled,
    }
}

/// Check that the picked file can actually be opened for reading.
/// Anything the OS refuses to open is surfaced as a denied pick.
fn verify_readable(path: &Path) -> PickOutcome {
    match std::fs::File::open(path) {
        Ok(_) => PickOutcome::Picked(path.to_path_buf()),
        Err(e) => {
            if e.kind() != ErrorKind::PermissionDenied {
                eprintln!("⚠️  Could not open {}: {e}", path.display());
            }
            PickOutcome::PermissionDenied
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readable_file_is_picked() {
        let path = std::env::temp_dir().join("gallery_client_picker_test.jpg");
        std::fs::write(&path, b"not a real jpeg").unwrap();

        assert_eq!(verify_readable(&path), PickOutcome::Picked(path.clone()));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_unopenable_file_is_denied() {
        let path = std::env::temp_dir().join("gallery_client_picker_missing.jpg");
        std::fs::remove_file(&path).ok();

        assert_eq!(verify_readable(&path), PickOutcome::PermissionDenied);
    }
}
