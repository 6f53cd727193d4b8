//! Designing queue: search + tabs over assigned orders, order view with
//! multi-image design upload, and ZIP download of the customer's files.

use std::path::PathBuf;

use eframe::egui;

use shared::domain::{OrderId, WORK_QUEUE_FILTERS};
use shared::protocol::{DesignJob, DesignOrderDetails, DesignsPage};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::orchestration::CommandQueue;
use crate::ui::previews::PreviewCache;
use crate::ui::{badge, widgets};

struct ViewModal {
    details: DesignOrderDetails,
    staged_images: Vec<PathBuf>,
}

pub struct DesigningState {
    pub filter: String,
    pub search: String,
    pub page: u32,
    pub total_pages: u32,
    pub designs: Vec<DesignJob>,
    pub loading: bool,
    pub needs_refresh: bool,
    view: Option<ViewModal>,
    download_confirm: Option<OrderId>,
}

impl Default for DesigningState {
    fn default() -> Self {
        Self {
            filter: "all".to_string(),
            search: String::new(),
            page: 1,
            total_pages: 1,
            designs: Vec::new(),
            loading: false,
            needs_refresh: true,
            view: None,
            download_confirm: None,
        }
    }
}

impl DesigningState {
    pub fn apply_page(&mut self, page: DesignsPage) {
        self.designs = page.designs;
        self.total_pages = page.total_pages.max(1);
        self.loading = false;
    }

    pub fn open_view(&mut self, details: DesignOrderDetails) {
        self.view = Some(ViewModal {
            details,
            staged_images: Vec::new(),
        });
    }

    pub fn close_view(&mut self) {
        self.view = None;
    }
}

pub fn show(
    state: &mut DesigningState,
    ui: &mut egui::Ui,
    queue: &mut CommandQueue<'_>,
    previews: &mut PreviewCache,
) {
    if state.needs_refresh {
        state.needs_refresh = false;
        state.loading = true;
        queue.dispatch(BackendCommand::FetchDesigns {
            page: state.page,
            filter: state.filter.clone(),
            search: state.search.clone(),
        });
    }

    ui.heading("Designing");

    if widgets::filter_tabs(ui, WORK_QUEUE_FILTERS, &mut state.filter) {
        state.page = 1;
        state.needs_refresh = true;
    }

    // Search runs server-side; submit on enter like the web console.
    let search_response =
        ui.add(egui::TextEdit::singleline(&mut state.search).hint_text("Search customers"));
    if search_response.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter)) {
        state.page = 1;
        state.needs_refresh = true;
    }
    ui.add_space(6.0);

    let rows = state.designs.clone();
    egui::ScrollArea::vertical()
        .max_height(ui.available_height() - 56.0)
        .show(ui, |ui| {
            egui::Grid::new("designs_table")
                .num_columns(5)
                .striped(true)
                .min_col_width(130.0)
                .show(ui, |ui| {
                    ui.strong("Name");
                    ui.strong("Phone");
                    ui.strong("Lead Owner");
                    ui.strong("Status");
                    ui.strong("Action");
                    ui.end_row();

                    if state.loading {
                        ui.label("Loading...");
                        ui.end_row();
                    } else if rows.is_empty() {
                        ui.weak("No results found.");
                        ui.end_row();
                    }
                    for row in rows {
                        ui.label(&row.customer_name);
                        ui.weak(&row.phone);
                        ui.weak(row.lead_owner.as_deref().unwrap_or("-"));
                        badge::show(ui, &row.status);
                        ui.menu_button("⋮", |ui| {
                            if ui.button("View").clicked() {
                                queue.dispatch(BackendCommand::FetchDesignOrder {
                                    id: row.id.clone(),
                                });
                                ui.close_menu();
                            }
                            if ui.button("Download").clicked() {
                                state.download_confirm = Some(row.id.clone());
                                ui.close_menu();
                            }
                        });
                        ui.end_row();
                    }
                });
        });

    if widgets::pagination_row(ui, &mut state.page, state.total_pages) {
        state.needs_refresh = true;
    }

    show_download_modal(state, ui, queue);
    show_view_modal(state, ui, queue, previews);
}

fn show_download_modal(state: &mut DesigningState, ui: &mut egui::Ui, queue: &mut CommandQueue<'_>) {
    let Some(id) = state.download_confirm.clone() else {
        return;
    };
    let ctx = ui.ctx().clone();
    let mut close = false;
    egui::Window::new("Confirm Download")
        .collapsible(false)
        .resizable(false)
        .show(&ctx, |ui| {
            ui.label("Do you want to download all images for this order?");
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    close = true;
                }
                if ui.button("Download ZIP").clicked() {
                    queue.dispatch(BackendCommand::DownloadDesignerBundle { id: id.clone() });
                    close = true;
                }
            });
        });
    if close {
        state.download_confirm = None;
    }
}

fn show_view_modal(
    state: &mut DesigningState,
    ui: &mut egui::Ui,
    queue: &mut CommandQueue<'_>,
    previews: &mut PreviewCache,
) {
    let Some(modal) = state.view.as_mut() else {
        return;
    };
    let ctx = ui.ctx().clone();
    let mut close = false;
    egui::Window::new("Order Details")
        .collapsible(false)
        .show(&ctx, |ui| {
            egui::ScrollArea::vertical().max_height(420.0).show(ui, |ui| {
                ui.label(format!("Order ID: {}", modal.details.order_id));
                ui.label(format!("Customer: {}", modal.details.customer_name));
                ui.label(format!("Phone: {}", modal.details.phone));
                if let Some(owner) = &modal.details.lead_owner {
                    ui.label(format!("Lead Owner: {owner}"));
                }

                ui.separator();
                ui.strong("Products");
                for product in &modal.details.products {
                    ui.label(format!(
                        "{} – Shape: {}, Size: {}",
                        product.name,
                        product.shape.as_deref().unwrap_or("-"),
                        product.size.as_deref().unwrap_or("-"),
                    ));
                }

                if !modal.details.order_image_links.is_empty() {
                    ui.separator();
                    ui.strong("Customer Images");
                    ui.horizontal_wrapped(|ui| {
                        for link in &modal.details.order_image_links {
                            previews.show(ui, link, queue);
                        }
                    });
                }

                ui.separator();
                ui.strong("Please upload your designs");
                ui.small("Allowed: JPG, PNG");
                if ui.button("Choose Files").clicked() {
                    if let Some(paths) = rfd::FileDialog::new()
                        .add_filter("images", &["png", "jpg", "jpeg"])
                        .pick_files()
                    {
                        modal.staged_images.extend(paths);
                    }
                }
                let mut remove_at = None;
                for (index, path) in modal.staged_images.iter().enumerate() {
                    ui.horizontal(|ui| {
                        ui.small(
                            path.file_name()
                                .and_then(|name| name.to_str())
                                .unwrap_or("image"),
                        );
                        if ui.small_button("✕").clicked() {
                            remove_at = Some(index);
                        }
                    });
                }
                if let Some(index) = remove_at {
                    modal.staged_images.remove(index);
                }

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    let ready = !modal.staged_images.is_empty();
                    if ui
                        .add_enabled(ready, egui::Button::new("Submit Designs"))
                        .clicked()
                    {
                        queue.dispatch(BackendCommand::SubmitDesigns {
                            order_id: modal.details.order_id.clone(),
                            image_paths: modal.staged_images.clone(),
                        });
                        *queue.status = "Uploading designs...".to_string();
                    }
                    if ui.button("Close").clicked() {
                        close = true;
                    }
                });
            });
        });
    if close {
        state.view = None;
    }
}
