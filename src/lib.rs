//! Annotation engine for painting strokes and placing stickers over a photo
//! or live frame.
//!
//! [`Editor`] owns one editing surface. Hosts forward pointer, wheel and key
//! events to it, resolve queued sticker loads through a
//! [`resource::ResourceLoader`], and render with [`Editor::render`] or export
//! with [`export::render_to_surface`].

pub mod background;
pub mod config;
pub mod draw;
pub mod export;
pub mod history;
pub mod input;
pub mod resource;
pub mod scene;
pub mod script;
pub mod util;
pub mod view;

pub use config::Config;
pub use input::Editor;
