//! All-orders page: stage-filtered listing, order details with bill upload,
//! designer/printer assignment, design approval, and ZIP downloads.

use std::path::PathBuf;

use eframe::egui;

use shared::domain::{LeadId, OrderId, ProductId, StaffId, ORDER_FILTERS};
use shared::protocol::{
    AssignableUsers, LeadsForOrder, OrderDetails, OrderSummary, OrdersPage,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::orchestration::CommandQueue;
use crate::ui::previews::PreviewCache;
use crate::ui::{badge, widgets};

struct CreateOrderModal {
    intake: LeadsForOrder,
    selected_lead: Option<LeadId>,
    selected_product: Option<ProductId>,
    address: String,
    images: Vec<PathBuf>,
}

struct BillUpload {
    is_one_payment: bool,
    bill1: Option<PathBuf>,
    bill2: Option<PathBuf>,
}

pub struct OrdersState {
    pub filter: String,
    pub page: u32,
    pub total_pages: u32,
    pub orders: Vec<OrderSummary>,
    pub loading: bool,
    pub needs_refresh: bool,
    details: Option<OrderDetails>,
    bill: BillUpload,
    assign_for: Option<OrderId>,
    assign_tab: String,
    assignable: Option<AssignableUsers>,
    selected_user: Option<StaffId>,
    create_modal: Option<CreateOrderModal>,
}

impl Default for OrdersState {
    fn default() -> Self {
        Self {
            filter: "all".to_string(),
            page: 1,
            total_pages: 1,
            orders: Vec::new(),
            loading: false,
            needs_refresh: true,
            details: None,
            bill: BillUpload {
                is_one_payment: true,
                bill1: None,
                bill2: None,
            },
            assign_for: None,
            assign_tab: "designer".to_string(),
            assignable: None,
            selected_user: None,
            create_modal: None,
        }
    }
}

impl OrdersState {
    pub fn apply_page(&mut self, page: OrdersPage) {
        self.orders = page.orders;
        self.total_pages = page.total_pages.max(1);
        self.loading = false;
    }

    pub fn open_details(&mut self, details: OrderDetails) {
        self.details = Some(details);
        self.bill = BillUpload {
            is_one_payment: true,
            bill1: None,
            bill2: None,
        };
    }

    pub fn set_assignable(&mut self, users: AssignableUsers) {
        self.assignable = Some(users);
    }

    pub fn open_create_modal(&mut self, intake: LeadsForOrder) {
        self.create_modal = Some(CreateOrderModal {
            intake,
            selected_lead: None,
            selected_product: None,
            address: String::new(),
            images: Vec::new(),
        });
    }

    pub fn close_create_modal(&mut self) {
        self.create_modal = None;
    }

    pub fn bill_uploaded(&mut self) {
        self.bill.bill1 = None;
        self.bill.bill2 = None;
    }
}

pub fn show(
    state: &mut OrdersState,
    ui: &mut egui::Ui,
    queue: &mut CommandQueue<'_>,
    previews: &mut PreviewCache,
) {
    if state.needs_refresh {
        state.needs_refresh = false;
        state.loading = true;
        queue.dispatch(BackendCommand::FetchOrders {
            page: state.page,
            filter: state.filter.clone(),
        });
    }

    ui.horizontal(|ui| {
        ui.heading("All Orders");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Create Order").clicked() {
                queue.dispatch(BackendCommand::FetchLeadsForOrder);
                *queue.status = "Loading open leads...".to_string();
            }
        });
    });

    if widgets::filter_tabs(ui, ORDER_FILTERS, &mut state.filter) {
        state.page = 1;
        state.needs_refresh = true;
    }

    let rows = state.orders.clone();
    egui::ScrollArea::vertical()
        .max_height(ui.available_height() - 56.0)
        .show(ui, |ui| {
            egui::Grid::new("orders_table")
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
                        ui.weak("No orders found.");
                        ui.end_row();
                    }
                    for order in rows {
                        let customer = order
                            .lead_id
                            .as_ref()
                            .map(|lead| lead.fullname.clone())
                            .unwrap_or_else(|| "N/A".to_string());
                        let phone = order
                            .lead_id
                            .as_ref()
                            .map(|lead| lead.phone.clone())
                            .unwrap_or_else(|| "N/A".to_string());
                        ui.label(customer);
                        ui.weak(phone);
                        badge::show(ui, &order.status);
                        let design_done = order.status == "design_completed";
                        ui.menu_button("⋮", |ui| {
                            if ui.button("View").clicked() {
                                queue.dispatch(BackendCommand::FetchOrderDetails {
                                    id: order.id.clone(),
                                });
                                ui.close_menu();
                            }
                            if ui
                                .add_enabled(design_done, egui::Button::new("Download designs"))
                                .clicked()
                            {
                                queue.dispatch(BackendCommand::DownloadDesigns {
                                    order_id: order.order_id.clone(),
                                });
                                ui.close_menu();
                            }
                            if ui
                                .add_enabled(design_done, egui::Button::new("Approve"))
                                .clicked()
                            {
                                queue.dispatch(BackendCommand::ApproveOrder {
                                    order_id: order.order_id.clone(),
                                });
                                ui.close_menu();
                            }
                            if ui
                                .add_enabled(design_done, egui::Button::new("Reject design"))
                                .clicked()
                            {
                                queue.dispatch(BackendCommand::RejectDesign {
                                    order_id: order.order_id.clone(),
                                });
                                ui.close_menu();
                            }
                            if ui.button("Assign").clicked() {
                                state.assign_for = Some(order.id.clone());
                                state.selected_user = None;
                                queue.dispatch(BackendCommand::FetchAssignableUsers);
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

    show_details_modal(state, ui, queue, previews);
    show_assign_modal(state, ui, queue);
    show_create_modal(state, ui, queue);
}

fn show_details_modal(
    state: &mut OrdersState,
    ui: &mut egui::Ui,
    queue: &mut CommandQueue<'_>,
    previews: &mut PreviewCache,
) {
    let Some(details) = state.details.as_ref().cloned() else {
        return;
    };
    let ctx = ui.ctx().clone();
    let mut close = false;
    egui::Window::new("Order Details")
        .collapsible(false)
        .show(&ctx, |ui| {
            egui::ScrollArea::vertical().max_height(420.0).show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.strong("Order ID:");
                    ui.label(&details.order_id);
                    if ui.small_button("Copy").clicked() {
                        ui.ctx().copy_text(details.order_id.clone());
                        *queue.status = "Order ID copied to clipboard".to_string();
                    }
                });
                ui.label(format!("Customer: {}", details.customer_name));
                ui.label(format!("Phone: {}", details.phone));
                if let Some(owner) = &details.lead_owner {
                    ui.label(format!("Lead Owner: {owner}"));
                }
                ui.horizontal(|ui| {
                    ui.strong("Status:");
                    badge::show(ui, &details.status);
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
                ui.strong("Upload Bill");
                ui.horizontal(|ui| {
                    ui.radio_value(&mut state.bill.is_one_payment, true, "Single payment");
                    ui.radio_value(&mut state.bill.is_one_payment, false, "Two payments");
                });
                ui.horizontal(|ui| {
                    if ui.button("Choose bill 1").clicked() {
                        state.bill.bill1 = rfd::FileDialog::new().pick_file();
                    }
                    if let Some(path) = &state.bill.bill1 {
                        ui.small(path.file_name().and_then(|n| n.to_str()).unwrap_or("bill1"));
                    }
                });
                if !state.bill.is_one_payment {
                    ui.horizontal(|ui| {
                        if ui.button("Choose bill 2").clicked() {
                            state.bill.bill2 = rfd::FileDialog::new().pick_file();
                        }
                        if let Some(path) = &state.bill.bill2 {
                            ui.small(path.file_name().and_then(|n| n.to_str()).unwrap_or("bill2"));
                        }
                    });
                }
                let ready = state.bill.bill1.is_some()
                    && (state.bill.is_one_payment || state.bill.bill2.is_some());
                if ui
                    .add_enabled(ready, egui::Button::new("Upload bill"))
                    .clicked()
                {
                    if let Some(bill1) = state.bill.bill1.clone() {
                        queue.dispatch(BackendCommand::UploadBill {
                            order_id: details.order_id.clone(),
                            is_one_payment: state.bill.is_one_payment,
                            bill1,
                            bill2: state.bill.bill2.clone(),
                        });
                    }
                }

                ui.add_space(6.0);
                if ui.button("Close").clicked() {
                    close = true;
                }
            });
        });
    if close {
        state.details = None;
    }
}

fn show_assign_modal(state: &mut OrdersState, ui: &mut egui::Ui, queue: &mut CommandQueue<'_>) {
    let Some(order_db_id) = state.assign_for.clone() else {
        return;
    };
    let ctx = ui.ctx().clone();
    let mut close = false;
    egui::Window::new("Assign Order")
        .collapsible(false)
        .resizable(false)
        .show(&ctx, |ui| {
            ui.horizontal(|ui| {
                for tab in ["designer", "printer"] {
                    let selected = state.assign_tab == tab;
                    if ui.selectable_label(selected, tab).clicked() && !selected {
                        state.assign_tab = tab.to_string();
                        state.selected_user = None;
                    }
                }
            });
            ui.separator();

            match state.assignable.as_ref() {
                None => {
                    ui.spinner();
                }
                Some(users) => {
                    let pool = if state.assign_tab == "designer" {
                        &users.designers
                    } else {
                        &users.printers
                    };
                    if pool.is_empty() {
                        ui.weak("No users available.");
                    }
                    for user in pool {
                        let selected = state.selected_user.as_ref() == Some(&user.id);
                        if ui.selectable_label(selected, &user.name).clicked() {
                            state.selected_user = Some(user.id.clone());
                        }
                    }
                }
            }

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let ready = state.selected_user.is_some();
                if ui.add_enabled(ready, egui::Button::new("Assign")).clicked() {
                    if let Some(user_id) = state.selected_user.clone() {
                        queue.dispatch(BackendCommand::AssignOrder {
                            order_db_id: order_db_id.clone(),
                            user_id,
                            role: state.assign_tab.clone(),
                        });
                        *queue.status = "Assigning order...".to_string();
                        close = true;
                    }
                }
                if ui.button("Cancel").clicked() {
                    close = true;
                }
            });
        });
    if close {
        state.assign_for = None;
    }
}

fn show_create_modal(state: &mut OrdersState, ui: &mut egui::Ui, queue: &mut CommandQueue<'_>) {
    let Some(modal) = state.create_modal.as_mut() else {
        return;
    };
    let ctx = ui.ctx().clone();
    let mut close = false;
    egui::Window::new("Create Order")
        .collapsible(false)
        .show(&ctx, |ui| {
            ui.label(format!("Order ID: {}", modal.intake.order_id));

            ui.label("Select Lead");
            let lead_name = modal
                .selected_lead
                .as_ref()
                .and_then(|id| modal.intake.leads.iter().find(|lead| &lead.id == id))
                .map(|lead| lead.fullname.clone())
                .unwrap_or_else(|| "-- Select Lead --".to_string());
            egui::ComboBox::from_id_source("create_order_lead")
                .selected_text(lead_name)
                .show_ui(ui, |ui| {
                    for lead in &modal.intake.leads {
                        ui.selectable_value(
                            &mut modal.selected_lead,
                            Some(lead.id.clone()),
                            &lead.fullname,
                        );
                    }
                });

            widgets::labeled_text_edit(ui, "Address", &mut modal.address);

            ui.label("Select Product");
            let product_name = modal
                .selected_product
                .as_ref()
                .and_then(|id| {
                    modal
                        .intake
                        .product_details
                        .iter()
                        .find(|product| &product.id == id)
                })
                .map(|product| product.product_name.clone())
                .unwrap_or_else(|| "-- Select Product --".to_string());
            egui::ComboBox::from_id_source("create_order_product")
                .selected_text(product_name)
                .show_ui(ui, |ui| {
                    for product in &modal.intake.product_details {
                        ui.selectable_value(
                            &mut modal.selected_product,
                            Some(product.id.clone()),
                            &product.product_name,
                        );
                    }
                });

            if ui.button("Choose Images").clicked() {
                if let Some(paths) = rfd::FileDialog::new()
                    .add_filter("images", &["png", "jpg", "jpeg"])
                    .pick_files()
                {
                    modal.images.extend(paths);
                }
            }
            ui.small(format!("{} image(s) staged", modal.images.len()));

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let ready = modal.selected_lead.is_some()
                    && modal.selected_product.is_some()
                    && !modal.images.is_empty();
                if ui
                    .add_enabled(ready, egui::Button::new("Place Order"))
                    .clicked()
                {
                    let lead = modal
                        .selected_lead
                        .as_ref()
                        .and_then(|id| modal.intake.leads.iter().find(|lead| &lead.id == id))
                        .cloned();
                    if let (Some(lead), Some(product_id)) = (lead, modal.selected_product.clone()) {
                        queue.dispatch(BackendCommand::PlaceOrder {
                            order_id: modal.intake.order_id.clone(),
                            user_id: lead.lead_owner.clone().unwrap_or(StaffId(String::new())),
                            lead_id: lead.id.clone(),
                            address: modal.address.clone(),
                            product_id,
                            image_paths: modal.images.clone(),
                            from_orders_page: true,
                        });
                        *queue.status = "Placing order...".to_string();
                    }
                }
                if ui.button("Cancel").clicked() {
                    close = true;
                }
            });
        });
    if close {
        state.create_modal = None;
    }
}
