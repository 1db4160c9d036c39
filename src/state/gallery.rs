/// Screen state for the gallery
///
/// Everything the UI renders lives here: the list of uploaded image URLs,
/// the two loading flags, the currently selected local file and the alert
/// overlay. The state is only ever mutated from the UI update loop, so no
/// synchronization is needed; the generation counter on fetches is what
/// keeps overlapping listings from clobbering each other.

use std::path::PathBuf;

use crate::net::GalleryError;

/// A server-hosted image, identified by the URL the listing endpoint returned.
pub type GalleryItem = String;

/// Notice shown when gallery access to the selected file is refused.
pub const PERMISSION_NOTICE: &str =
    "Access to the selected image was denied. Allow file access and try again.";

/// Notice shown when an upload fails, regardless of cause.
pub const UPLOAD_FAILED_NOTICE: &str = "Could not upload the image.";

/// What the caller should do after an upload finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Followup {
    /// Upload succeeded: fetch the listing exactly once.
    Refetch,
    /// Nothing further; an alert has been raised if the upload failed.
    Nothing,
}

/// Result of applying a listing completion to the state.
#[derive(Debug)]
pub enum ListingOutcome {
    /// The listing replaced the image list.
    Applied,
    /// The completion was superseded by a newer fetch and was discarded.
    Stale,
    /// The fetch failed; the existing list is kept untouched.
    Failed(GalleryError),
}

#[derive(Debug, Default)]
pub struct GalleryState {
    /// Uploaded image URLs, in the order the server returned them.
    pub images: Vec<GalleryItem>,
    /// True strictly between upload start and upload end.
    pub uploading: bool,
    /// True while a user-triggered refresh is in flight.
    pub refreshing: bool,
    /// Local file currently being uploaded, discarded on completion.
    pub selected: Option<PathBuf>,
    /// Blocking alert message, if one is showing.
    pub alert: Option<String>,
    /// Generation counter for listing fetches; stale completions are dropped.
    fetch_gen: u64,
}

impl GalleryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an upload for the given local file.
    ///
    /// Returns false if an upload is already in flight; the second trigger
    /// is rejected rather than racing the first.
    pub fn begin_upload(&mut self, image: PathBuf) -> bool {
        if self.uploading {
            return false;
        }
        self.uploading = true;
        self.selected = Some(image);
        true
    }

    /// Record the outcome of an upload.
    ///
    /// The uploading flag is cleared and the selected file discarded on both
    /// outcomes. A success asks for exactly one listing re-fetch; a failure
    /// raises the generic alert and asks for nothing.
    pub fn finish_upload(&mut self, result: Result<(), GalleryError>) -> Followup {
        self.uploading = false;
        self.selected = None;
        match result {
            Ok(()) => Followup::Refetch,
            Err(_) => {
                self.alert = Some(UPLOAD_FAILED_NOTICE.to_string());
                Followup::Nothing
            }
        }
    }

    /// Start a listing fetch and return its generation token.
    ///
    /// `refresh` marks a user-triggered refresh so the UI can show the
    /// refresh control spinning; startup and post-upload fetches pass false.
    pub fn begin_fetch(&mut self, refresh: bool) -> u64 {
        if refresh {
            self.refreshing = true;
        }
        self.fetch_gen += 1;
        self.fetch_gen
    }

    /// Apply a listing completion carrying the generation token it was
    /// started with.
    ///
    /// A stale token means a newer fetch superseded this one; the completion
    /// is discarded without touching any state. On success the image list is
    /// replaced wholesale. On failure the existing list is kept (listing
    /// failures are deliberately silent to the user).
    pub fn apply_listing(
        &mut self,
        gen: u64,
        result: Result<Vec<GalleryItem>, GalleryError>,
    ) -> ListingOutcome {
        if gen != self.fetch_gen {
            return ListingOutcome::Stale;
        }
        self.refreshing = false;
        match result {
            Ok(images) => {
                self.images = images;
                ListingOutcome::Applied
            }
            Err(e) => ListingOutcome::Failed(e),
        }
    }

    /// Raise a blocking alert with the given notice.
    pub fn show_alert(&mut self, notice: &str) {
        self.alert = Some(notice.to_string());
    }

    /// Dismiss the current alert, if any.
    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network_error() -> GalleryError {
        GalleryError::Network("server returned 500".to_string())
    }

    #[test]
    fn test_upload_flag_spans_upload() {
        let mut state = GalleryState::new();
        assert!(!state.uploading);

        assert!(state.begin_upload(PathBuf::from("/tmp/a.jpg")));
        assert!(state.uploading);
        assert_eq!(state.selected, Some(PathBuf::from("/tmp/a.jpg")));

        state.finish_upload(Ok(()));
        assert!(!state.uploading);
        assert!(state.selected.is_none());

        // Same on the failure path.
        assert!(state.begin_upload(PathBuf::from("/tmp/b.jpg")));
        assert!(state.uploading);
        state.finish_upload(Err(network_error()));
        assert!(!state.uploading);
        assert!(state.selected.is_none());
    }

    #[test]
    fn test_second_upload_rejected_while_in_flight() {
        let mut state = GalleryState::new();
        assert!(state.begin_upload(PathBuf::from("/tmp/a.jpg")));
        assert!(!state.begin_upload(PathBuf::from("/tmp/b.jpg")));
        // The first selection is the one that survives.
        assert_eq!(state.selected, Some(PathBuf::from("/tmp/a.jpg")));
    }

    #[test]
    fn test_successful_upload_requests_one_refetch() {
        let mut state = GalleryState::new();
        state.begin_upload(PathBuf::from("/tmp/a.jpg"));
        assert_eq!(state.finish_upload(Ok(())), Followup::Refetch);
        assert!(state.alert.is_none());
    }

    #[test]
    fn test_failed_upload_keeps_images_and_raises_one_alert() {
        let mut state = GalleryState::new();
        state.images = vec!["a.png".to_string(), "b.png".to_string()];

        state.begin_upload(PathBuf::from("/tmp/c.jpg"));
        assert_eq!(state.finish_upload(Err(network_error())), Followup::Nothing);

        assert_eq!(state.images, vec!["a.png", "b.png"]);
        assert_eq!(state.alert.as_deref(), Some(UPLOAD_FAILED_NOTICE));

        state.dismiss_alert();
        assert!(state.alert.is_none());
    }

    #[test]
    fn test_listing_replaces_list_wholesale() {
        let mut state = GalleryState::new();
        state.images = vec!["old.png".to_string()];

        let gen = state.begin_fetch(false);
        let outcome = state.apply_listing(
            gen,
            Ok(vec!["a.png".to_string(), "b.png".to_string()]),
        );

        assert!(matches!(outcome, ListingOutcome::Applied));
        assert_eq!(state.images, vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_empty_listing_yields_empty_state() {
        let mut state = GalleryState::new();
        state.images = vec!["old.png".to_string()];

        let gen = state.begin_fetch(false);
        state.apply_listing(gen, Ok(Vec::new()));

        assert!(state.images.is_empty());
    }

    #[test]
    fn test_refresh_toggles_regardless_of_outcome() {
        let mut state = GalleryState::new();
        state.images = vec!["keep.png".to_string()];

        // Failure path: flag toggles, list untouched.
        let gen = state.begin_fetch(true);
        assert!(state.refreshing);
        let outcome = state.apply_listing(gen, Err(network_error()));
        assert!(matches!(outcome, ListingOutcome::Failed(_)));
        assert!(!state.refreshing);
        assert_eq!(state.images, vec!["keep.png"]);
        assert!(state.alert.is_none());

        // Success path.
        let gen = state.begin_fetch(true);
        assert!(state.refreshing);
        state.apply_listing(gen, Ok(vec!["new.png".to_string()]));
        assert!(!state.refreshing);
        assert_eq!(state.images, vec!["new.png"]);
    }

    #[test]
    fn test_stale_listing_is_discarded() {
        let mut state = GalleryState::new();

        let first = state.begin_fetch(false);
        let second = state.begin_fetch(false);

        let outcome = state.apply_listing(first, Ok(vec!["stale.png".to_string()]));
        assert!(matches!(outcome, ListingOutcome::Stale));
        assert!(state.images.is_empty());

        let outcome = state.apply_listing(second, Ok(vec!["fresh.png".to_string()]));
        assert!(matches!(outcome, ListingOutcome::Applied));
        assert_eq!(state.images, vec!["fresh.png"]);
    }
}
