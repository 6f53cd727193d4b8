//! Lazy image previews for design files and courier slips.
//!
//! The worker fetches and downscales the bytes; textures are created on
//! first draw and cached per URL for the life of the view.

use std::collections::HashMap;

use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::PreviewImage;
use crate::controller::orchestration::CommandQueue;

pub enum PreviewState {
    Loading,
    Ready {
        image: PreviewImage,
        texture: Option<egui::TextureHandle>,
    },
    Failed(String),
}

#[derive(Default)]
pub struct PreviewCache {
    entries: HashMap<String, PreviewState>,
}

impl PreviewCache {
    pub fn insert_loaded(&mut self, url: String, image: PreviewImage) {
        self.entries.insert(
            url,
            PreviewState::Ready {
                image,
                texture: None,
            },
        );
    }

    pub fn insert_failed(&mut self, url: String, reason: String) {
        self.entries.insert(url, PreviewState::Failed(reason));
    }

    /// Draws the preview for `url`, requesting the fetch on first sight.
    pub fn show(&mut self, ui: &mut egui::Ui, url: &str, queue: &mut CommandQueue<'_>) {
        if !self.entries.contains_key(url) {
            queue.dispatch(BackendCommand::FetchImagePreview {
                url: url.to_string(),
            });
            self.entries.insert(url.to_string(), PreviewState::Loading);
        }
        let Some(state) = self.entries.get_mut(url) else {
            return;
        };
        match state {
            PreviewState::Loading => {
                ui.spinner();
            }
            PreviewState::Failed(reason) => {
                ui.label(
                    egui::RichText::new(format!("preview unavailable: {reason}"))
                        .weak()
                        .small(),
                );
            }
            PreviewState::Ready { image, texture } => {
                let texture = texture.get_or_insert_with(|| {
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(
                        [image.width, image.height],
                        &image.rgba,
                    );
                    ui.ctx().load_texture(
                        format!("preview:{url}"),
                        color_image,
                        egui::TextureOptions::LINEAR,
                    )
                });
                let size = egui::vec2(image.width as f32, image.height as f32);
                ui.add(egui::Image::new((texture.id(), size)));
            }
        }
    }
}
