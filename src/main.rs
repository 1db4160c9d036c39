use std::collections::HashMap;

use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length, Task, Theme};

// Declare the application modules
mod config;
mod net;
mod picker;
mod state;
mod thumbnail;
mod ui;

use config::Config;
use net::{ApiClient, GalleryError};
use picker::PickOutcome;
use state::gallery::{Followup, GalleryState, ListingOutcome, PERMISSION_NOTICE};

/// Main application state
struct GalleryApp {
    /// The screen state: image list, loading flags, alert
    state: GalleryState,
    /// Decoded square thumbnails, keyed by image URL
    thumbnails: HashMap<String, Handle>,
    /// Client for the gallery endpoint
    client: ApiClient,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the "Select Image" button
    SelectImage,
    /// Background upload completed
    UploadFinished(Result<(), GalleryError>),
    /// User clicked the "Refresh" button
    Refresh,
    /// A listing fetch completed, tagged with its generation token
    ImagesFetched {
        gen: u64,
        result: Result<Vec<String>, GalleryError>,
    },
    /// A thumbnail download and decode completed (None on failure)
    ThumbnailLoaded {
        url: String,
        handle: Option<Handle>,
    },
    /// User dismissed the alert overlay
    DismissAlert,
}

impl GalleryApp {
    /// Create a new instance of the application and kick off the first
    /// listing fetch.
    fn new(config: Config) -> (Self, Task<Message>) {
        println!("🖼️  Gallery client starting, endpoint: {}", config.endpoint);

        let client = ApiClient::new(&config);
        let mut app = GalleryApp {
            state: GalleryState::new(),
            thumbnails: HashMap::new(),
            client,
        };

        let fetch = app.fetch_task(false);
        (app, fetch)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SelectImage => {
                // The button is disabled while busy, but guard anyway so a
                // queued click cannot start a second upload.
                if self.state.uploading || self.state.alert.is_some() {
                    return Task::none();
                }

                match picker::select_image() {
                    PickOutcome::Picked(path) => {
                        if !self.state.begin_upload(path.clone()) {
                            return Task::none();
                        }
                        println!("📤 Uploading {}", path.display());
                        let client = self.client.clone();
                        Task::perform(client.upload(path), Message::UploadFinished)
                    }
                    PickOutcome::Cancelled => Task::none(),
                    PickOutcome::PermissionDenied => {
                        self.state.show_alert(PERMISSION_NOTICE);
                        Task::none()
                    }
                }
            }

            Message::UploadFinished(result) => {
                match &result {
                    Ok(()) => println!("✅ Upload complete"),
                    Err(e) => eprintln!("❌ Upload failed: {e}"),
                }
                match self.state.finish_upload(result) {
                    Followup::Refetch => self.fetch_task(false),
                    Followup::Nothing => Task::none(),
                }
            }

            Message::Refresh => {
                if self.state.refreshing {
                    return Task::none();
                }
                self.fetch_task(true)
            }

            Message::ImagesFetched { gen, result } => {
                match self.state.apply_listing(gen, result) {
                    ListingOutcome::Applied => {
                        println!("🖼️  Listed {} images", self.state.images.len());
                        self.thumbnail_tasks()
                    }
                    ListingOutcome::Stale => Task::none(),
                    ListingOutcome::Failed(e) => {
                        // Listing failures are logged only; the grid keeps
                        // showing whatever it already had.
                        eprintln!("⚠️  Failed to fetch images: {e}");
                        Task::none()
                    }
                }
            }

            Message::ThumbnailLoaded { url, handle } => {
                match handle {
                    Some(handle) if self.state.images.contains(&url) => {
                        self.thumbnails.insert(url, handle);
                    }
                    Some(_) => {} // listing changed underneath, drop it
                    None => eprintln!("⚠️  Could not load thumbnail for {url}"),
                }
                Task::none()
            }

            Message::DismissAlert => {
                self.state.dismiss_alert();
                Task::none()
            }
        }
    }

    /// Start a listing fetch and tag its completion with a generation
    /// token so a superseded fetch cannot overwrite a newer one.
    fn fetch_task(&mut self, refresh: bool) -> Task<Message> {
        let gen = self.state.begin_fetch(refresh);
        let client = self.client.clone();
        Task::perform(client.fetch_images(), move |result| {
            Message::ImagesFetched { gen, result }
        })
    }

    /// Drop thumbnails for images no longer listed and download the
    /// missing ones.
    fn thumbnail_tasks(&mut self) -> Task<Message> {
        let images = &self.state.images;
        self.thumbnails.retain(|url, _| images.contains(url));

        let mut tasks = Vec::new();
        for url in images {
            if self.thumbnails.contains_key(url) {
                continue;
            }
            let client = self.client.clone();
            let url = url.clone();
            tasks.push(Task::perform(
                async move {
                    let handle = client
                        .fetch_bytes(url.clone())
                        .await
                        .ok()
                        .and_then(|bytes| thumbnail::square_thumbnail(&bytes));
                    (url, handle)
                },
                |(url, handle)| Message::ThumbnailLoaded { url, handle },
            ));
        }

        Task::batch(tasks)
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let header = text("Gallery").size(32);

        let body: Element<Message> = if let Some(notice) = &self.state.alert {
            alert_panel(notice)
        } else if self.state.uploading {
            centered_notice("Uploading image...")
        } else if self.state.images.is_empty() {
            centered_notice("No images available.")
        } else {
            ui::grid::image_grid(&self.state.images, &self.thumbnails)
        };

        let busy = self.state.uploading || self.state.alert.is_some();

        let refresh_label = if self.state.refreshing {
            "Refreshing..."
        } else {
            "Refresh"
        };
        let mut refresh = button(refresh_label).padding(10);
        if !busy && !self.state.refreshing {
            refresh = refresh.on_press(Message::Refresh);
        }

        let mut select = button("Select Image").padding(10);
        if !busy {
            select = select.on_press(Message::SelectImage);
        }

        let content = column![
            header,
            body,
            row![refresh, select].spacing(20),
        ]
        .spacing(20)
        .padding(20)
        .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

/// Full-body centered notice, used for the upload indicator and the
/// empty state.
fn centered_notice(notice: &'static str) -> Element<'static, Message> {
    container(text(notice).size(18))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

/// Blocking alert overlay with a dismiss button. While it shows, the
/// grid and both controls are unavailable.
fn alert_panel(notice: &str) -> Element<'_, Message> {
    let panel = column![
        text("Error").size(24),
        text(notice).size(16),
        button("OK").on_press(Message::DismissAlert).padding(10),
    ]
    .spacing(15)
    .align_x(Alignment::Center);

    container(panel)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

fn main() -> iced::Result {
    let config = Config::load();

    iced::application(
        "Gallery",
        GalleryApp::update,
        GalleryApp::view,
    )
    .theme(GalleryApp::theme)
    .centered()
    .run_with(move || GalleryApp::new(config))
}
