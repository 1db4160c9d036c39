use std::collections::HashMap;

use iced::widget::image::Handle;
use iced::widget::{container, scrollable, text, Column, Image, Row, Space};
use iced::{Element, Length};

use crate::state::gallery::GalleryItem;
use crate::Message;

/// The grid always lays images out two across.
pub const GRID_COLUMNS: usize = 2;

/// Height of one grid cell in logical pixels.
const CELL_HEIGHT: f32 = 180.0;

/// Build the scrollable two-column image grid.
///
/// Cells appear in server order, left to right then top to bottom. A cell
/// whose thumbnail has not finished downloading shows a loading placeholder;
/// an odd final row is padded with blank space so cell widths stay even.
pub fn image_grid<'a>(
    images: &'a [GalleryItem],
    thumbnails: &HashMap<String, Handle>,
) -> Element<'a, Message> {
    let mut rows = Column::new().spacing(10).padding(10).width(Length::Fill);

    for chunk in grid_rows(images) {
        let mut grid_row = Row::new().spacing(10);
        for url in chunk {
            grid_row = grid_row.push(grid_cell(url, thumbnails));
        }
        for _ in chunk.len()..GRID_COLUMNS {
            grid_row = grid_row.push(Space::with_width(Length::Fill));
        }
        rows = rows.push(grid_row);
    }

    scrollable(rows)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Chunk the image list into grid rows, preserving server order.
fn grid_rows(images: &[GalleryItem]) -> std::slice::Chunks<'_, GalleryItem> {
    images.chunks(GRID_COLUMNS)
}

fn grid_cell<'a>(url: &'a str, thumbnails: &HashMap<String, Handle>) -> Element<'a, Message> {
    let content: Element<Message> = match thumbnails.get(url) {
        Some(handle) => Image::new(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => text("Loading...").size(14).into(),
    };

    container(content)
        .width(Length::Fill)
        .height(Length::Fixed(CELL_HEIGHT))
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
