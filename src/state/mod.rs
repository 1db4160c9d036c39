/// State management module
///
/// This module handles the screen state for the gallery:
/// - image list, loading flags and the alert overlay (gallery.rs)
///
/// Transitions are plain methods so they can be exercised in tests
/// without the UI runtime or a live server.

pub mod gallery;
