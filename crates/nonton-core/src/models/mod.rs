mod catalog;
mod media;

pub use catalog::{is_renderable, retain_renderable, DetailItem, EpisodeRef, ListItem, Shelf};
pub use media::{available_resolutions, select_stream, ChapterImages, ImagePage, StreamOption};
