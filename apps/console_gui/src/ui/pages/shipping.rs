//! Shipping queue: delivery-stage listing, status updates through the fixed
//! shipping stages, and courier-slip upload with preview.

use eframe::egui;

use shared::domain::{SHIPPING_STATUSES, WORK_QUEUE_FILTERS};
use shared::protocol::{ShippingOrder, ShippingOrderDetails, ShippingPage};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::orchestration::CommandQueue;
use crate::ui::previews::PreviewCache;
use crate::ui::{badge, widgets};

pub struct ShippingState {
    pub filter: String,
    pub page: u32,
    pub total_pages: u32,
    pub orders: Vec<ShippingOrder>,
    pub loading: bool,
    pub needs_refresh: bool,
    view: Option<ShippingOrderDetails>,
}

impl Default for ShippingState {
    fn default() -> Self {
        Self {
            filter: "all".to_string(),
            page: 1,
            total_pages: 1,
            orders: Vec::new(),
            loading: false,
            needs_refresh: true,
            view: None,
        }
    }
}

impl ShippingState {
    pub fn apply_page(&mut self, page: ShippingPage) {
        self.orders = page.orders;
        self.total_pages = page.total_pages.max(1);
        self.loading = false;
    }

    pub fn open_view(&mut self, details: ShippingOrderDetails) {
        self.view = Some(details);
    }

    /// Mirrors a confirmed status change into the open detail view.
    pub fn apply_status(&mut self, order_id: &str, status: &str) {
        if let Some(view) = self.view.as_mut() {
            if view.order_id == order_id {
                view.status = status.to_string();
            }
        }
        self.needs_refresh = true;
    }

    /// A fresh courier slip invalidates the cached detail; refetch it.
    pub fn courier_slip_uploaded(&mut self, queue: &mut CommandQueue<'_>) {
        if let Some(view) = self.view.as_ref() {
            queue.dispatch(BackendCommand::FetchShippingOrder {
                order_id: view.order_id.clone(),
            });
        }
    }
}

pub fn show(
    state: &mut ShippingState,
    ui: &mut egui::Ui,
    queue: &mut CommandQueue<'_>,
    previews: &mut PreviewCache,
) {
    if state.needs_refresh {
        state.needs_refresh = false;
        state.loading = true;
        queue.dispatch(BackendCommand::FetchShippings {
            page: state.page,
            filter: state.filter.clone(),
        });
    }

    ui.heading("Shipping");

    if widgets::filter_tabs(ui, WORK_QUEUE_FILTERS, &mut state.filter) {
        state.page = 1;
        state.needs_refresh = true;
    }

    let rows = state.orders.clone();
    egui::ScrollArea::vertical()
        .max_height(ui.available_height() - 56.0)
        .show(ui, |ui| {
            egui::Grid::new("shipping_table")
                .num_columns(4)
                .striped(true)
                .min_col_width(140.0)
                .show(ui, |ui| {
                    ui.strong("Customer");
                    ui.strong("Phone");
                    ui.strong("Status");
                    ui.strong("Action");
                    ui.end_row();

                    if state.loading {
                        ui.label("Loading...");
                        ui.end_row();
                    } else if rows.is_empty() {
                        ui.weak("No shipping orders found.");
                        ui.end_row();
                    }
                    for order in rows {
                        ui.label(&order.customer_name);
                        ui.weak(&order.phone);
                        badge::show(ui, &order.status);
                        if ui.button("View").clicked() {
                            queue.dispatch(BackendCommand::FetchShippingOrder {
                                order_id: order.order_id.clone(),
                            });
                        }
                        ui.end_row();
                    }
                });
        });

    if widgets::pagination_row(ui, &mut state.page, state.total_pages) {
        state.needs_refresh = true;
    }

    show_view_modal(state, ui, queue, previews);
}

fn show_view_modal(
    state: &mut ShippingState,
    ui: &mut egui::Ui,
    queue: &mut CommandQueue<'_>,
    previews: &mut PreviewCache,
) {
    let Some(details) = state.view.as_ref().cloned() else {
        return;
    };
    let ctx = ui.ctx().clone();
    let mut close = false;
    egui::Window::new("Shipping Order Details")
        .collapsible(false)
        .show(&ctx, |ui| {
            egui::ScrollArea::vertical().max_height(420.0).show(ui, |ui| {
                ui.label(format!("Order ID: {}", details.order_id));
                ui.label(format!("Customer Name: {}", details.customer_name));
                ui.label(format!("Phone: {}", details.phone));
                if let Some(owner) = &details.lead_owner {
                    ui.label(format!("Lead Owner: {owner}"));
                }

                ui.horizontal(|ui| {
                    ui.strong("Status:");
                    let mut selected = details.status.clone();
                    egui::ComboBox::from_id_source("shipping_status")
                        .selected_text(badge::stage_label(&selected))
                        .show_ui(ui, |ui| {
                            for status in SHIPPING_STATUSES {
                                ui.selectable_value(
                                    &mut selected,
                                    status.to_string(),
                                    badge::stage_label(status),
                                );
                            }
                        });
                    if selected != details.status {
                        queue.dispatch(BackendCommand::UpdateShippingStatus {
                            order_id: details.order_id.clone(),
                            status: selected,
                        });
                    }
                });

                ui.separator();
                ui.strong("Products");
                for product in &details.products {
                    ui.label(format!(
                        "{} – Shape: {}, Size: {}",
                        product.name,
                        product.shape.as_deref().unwrap_or("-"),
                        product.size.as_deref().unwrap_or("-"),
                    ));
                }

                if !details.designed_image_links.is_empty() {
                    ui.separator();
                    ui.strong("Design Previews");
                    ui.horizontal_wrapped(|ui| {
                        for link in &details.designed_image_links {
                            previews.show(ui, link, queue);
                        }
                    });
                }

                ui.separator();
                ui.strong("Courier Slip");
                match &details.courier_slip {
                    Some(slip) => {
                        let url = format!("/courier/{slip}");
                        previews.show(ui, &url, queue);
                    }
                    None => {
                        ui.weak("No courier slip uploaded yet.");
                        if ui.button("Upload courier slip").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("images", &["png", "jpg", "jpeg"])
                                .pick_file()
                            {
                                queue.dispatch(BackendCommand::UploadCourierSlip {
                                    order_id: details.order_id.clone(),
                                    file: path,
                                });
                            }
                        }
                    }
                }

                ui.add_space(6.0);
                if ui.button("Close").clicked() {
                    close = true;
                }
            });
        });
    if close {
        state.view = None;
    }
}
