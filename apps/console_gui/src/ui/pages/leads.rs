//! Leads page: filter tabs, name search, create/edit/delete modals, and the
//! place-order flow that turns a lead into an order.

use std::path::PathBuf;

use eframe::egui;

use shared::domain::{LeadId, ProductId, LEAD_FILTERS, LEAD_RATINGS, LEAD_STATUSES};
use shared::protocol::{Lead, LeadDraft, LeadsPage, PreorderDetails};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::orchestration::CommandQueue;
use crate::ui::widgets;

pub struct LeadForm {
    pub fullname: String,
    pub phone: String,
    pub rating: String,
    pub status: String,
    pub note: String,
    pub address: String,
}

impl LeadForm {
    fn new() -> Self {
        Self {
            fullname: String::new(),
            phone: String::new(),
            rating: "hot".to_string(),
            status: "new".to_string(),
            note: String::new(),
            address: String::new(),
        }
    }

    fn from_lead(lead: &Lead) -> Self {
        Self {
            fullname: lead.fullname.clone(),
            phone: lead.phone.clone(),
            rating: lead.rating.clone().unwrap_or_else(|| "hot".to_string()),
            status: lead.status.clone(),
            note: lead.note.clone().unwrap_or_default(),
            address: lead.address.clone().unwrap_or_default(),
        }
    }

    fn draft(&self) -> LeadDraft {
        LeadDraft {
            fullname: self.fullname.trim().to_string(),
            phone: self.phone.trim().to_string(),
            rating: self.rating.clone(),
            status: self.status.clone(),
            note: self.note.clone(),
            address: self.address.clone(),
        }
    }
}

struct OrderModal {
    details: PreorderDetails,
    address: String,
    selected_product: Option<ProductId>,
    images: Vec<PathBuf>,
}

pub struct LeadsState {
    pub filter: String,
    pub page: u32,
    pub total_pages: u32,
    pub search: String,
    pub leads: Vec<Lead>,
    pub loading: bool,
    pub needs_refresh: bool,
    show_form: bool,
    editing: Option<LeadId>,
    form: LeadForm,
    delete_confirm: Option<LeadId>,
    order_confirm: Option<LeadId>,
    order_modal: Option<OrderModal>,
}

impl Default for LeadsState {
    fn default() -> Self {
        Self {
            filter: "new".to_string(),
            page: 1,
            total_pages: 1,
            search: String::new(),
            leads: Vec::new(),
            loading: false,
            needs_refresh: true,
            show_form: false,
            editing: None,
            form: LeadForm::new(),
            delete_confirm: None,
            order_confirm: None,
            order_modal: None,
        }
    }
}

impl LeadsState {
    pub fn apply_page(&mut self, page: LeadsPage) {
        self.leads = page.leads;
        self.total_pages = page.total_pages.max(1);
        self.loading = false;
    }

    pub fn begin_edit(&mut self, lead: Lead) {
        self.form = LeadForm::from_lead(&lead);
        self.editing = Some(lead.id);
        self.show_form = true;
    }

    pub fn open_order_modal(&mut self, details: PreorderDetails) {
        self.order_modal = Some(OrderModal {
            address: details.lead_details.address.clone().unwrap_or_default(),
            details,
            selected_product: None,
            images: Vec::new(),
        });
    }

    pub fn close_order_modal(&mut self) {
        self.order_modal = None;
    }
}

pub fn show(state: &mut LeadsState, ui: &mut egui::Ui, queue: &mut CommandQueue<'_>) {
    if state.needs_refresh {
        state.needs_refresh = false;
        state.loading = true;
        queue.dispatch(BackendCommand::FetchLeads {
            page: state.page,
            filter: state.filter.clone(),
        });
    }

    ui.horizontal(|ui| {
        ui.heading("All Leads");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Create New Lead").clicked() {
                state.form = LeadForm::new();
                state.editing = None;
                state.show_form = true;
            }
        });
    });

    if widgets::filter_tabs(ui, LEAD_FILTERS, &mut state.filter) {
        state.page = 1;
        state.needs_refresh = true;
    }

    ui.add(egui::TextEdit::singleline(&mut state.search).hint_text("Search leads"));
    ui.add_space(6.0);

    let search = state.search.to_lowercase();
    let rows: Vec<Lead> = state
        .leads
        .iter()
        .filter(|lead| lead.fullname.to_lowercase().contains(&search))
        .cloned()
        .collect();

    egui::ScrollArea::vertical()
        .max_height(ui.available_height() - 56.0)
        .show(ui, |ui| {
            egui::Grid::new("leads_table")
                .num_columns(4)
                .striped(true)
                .min_col_width(140.0)
                .show(ui, |ui| {
                    ui.strong("Name");
                    ui.strong("Phone");
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
                    for lead in rows {
                        ui.label(&lead.fullname);
                        ui.weak(&lead.phone);
                        ui.label(&lead.status);
                        ui.menu_button("⋮", |ui| {
                            if ui.button("Edit").clicked() {
                                queue.dispatch(BackendCommand::FetchLead {
                                    id: lead.id.clone(),
                                });
                                ui.close_menu();
                            }
                            if ui.button("Delete").clicked() {
                                state.delete_confirm = Some(lead.id.clone());
                                ui.close_menu();
                            }
                            if ui.button("Order").clicked() {
                                state.order_confirm = Some(lead.id.clone());
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

    show_form_modal(state, ui, queue);
    show_delete_modal(state, ui, queue);
    show_order_confirm_modal(state, ui, queue);
    show_order_modal(state, ui, queue);
}

fn show_form_modal(state: &mut LeadsState, ui: &mut egui::Ui, queue: &mut CommandQueue<'_>) {
    if !state.show_form {
        return;
    }
    let ctx = ui.ctx().clone();
    let mut close = false;
    let title = if state.editing.is_some() {
        "Edit Lead"
    } else {
        "Create Lead"
    };
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .show(&ctx, |ui| {
            widgets::labeled_text_edit(ui, "Full Name", &mut state.form.fullname);
            widgets::labeled_text_edit(ui, "Phone", &mut state.form.phone);
            widgets::option_select(ui, "lead_rating", "Rating", LEAD_RATINGS, &mut state.form.rating);
            widgets::option_select(ui, "lead_status", "Status", LEAD_STATUSES, &mut state.form.status);
            widgets::labeled_text_edit(ui, "Note", &mut state.form.note);
            widgets::labeled_text_edit(ui, "Address", &mut state.form.address);
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let label = if state.editing.is_some() { "Update" } else { "Create" };
                if ui.button(label).clicked() {
                    if widgets::is_blank(&state.form.fullname) || widgets::is_blank(&state.form.phone)
                    {
                        *queue.status = "Name and phone are required".to_string();
                    } else {
                        let draft = state.form.draft();
                        match state.editing.clone() {
                            Some(id) => queue.dispatch(BackendCommand::EditLead { id, draft }),
                            None => queue.dispatch(BackendCommand::CreateLead { draft }),
                        }
                        close = true;
                    }
                }
                if ui.button("Cancel").clicked() {
                    close = true;
                }
            });
        });
    if close {
        state.show_form = false;
        state.editing = None;
    }
}

fn show_delete_modal(state: &mut LeadsState, ui: &mut egui::Ui, queue: &mut CommandQueue<'_>) {
    let Some(id) = state.delete_confirm.clone() else {
        return;
    };
    let ctx = ui.ctx().clone();
    let mut close = false;
    egui::Window::new("Confirm Delete")
        .collapsible(false)
        .resizable(false)
        .show(&ctx, |ui| {
            ui.label("Are you sure you want to delete this lead? This action cannot be undone.");
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    close = true;
                }
                if ui.button("Delete").clicked() {
                    queue.dispatch(BackendCommand::DeleteLead { id: id.clone() });
                    close = true;
                }
            });
        });
    if close {
        state.delete_confirm = None;
    }
}

fn show_order_confirm_modal(state: &mut LeadsState, ui: &mut egui::Ui, queue: &mut CommandQueue<'_>) {
    let Some(lead_id) = state.order_confirm.clone() else {
        return;
    };
    let ctx = ui.ctx().clone();
    let mut close = false;
    egui::Window::new("Confirm Order")
        .collapsible(false)
        .resizable(false)
        .show(&ctx, |ui| {
            ui.label("Do you want to confirm the order?");
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    close = true;
                }
                if ui.button("Confirm").clicked() {
                    queue.dispatch(BackendCommand::FetchPreorderDetails {
                        lead_id: lead_id.clone(),
                    });
                    close = true;
                }
            });
        });
    if close {
        state.order_confirm = None;
    }
}

fn show_order_modal(state: &mut LeadsState, ui: &mut egui::Ui, queue: &mut CommandQueue<'_>) {
    let Some(modal) = state.order_modal.as_mut() else {
        return;
    };
    let ctx = ui.ctx().clone();
    let mut close = false;
    egui::Window::new("Place Order")
        .collapsible(false)
        .show(&ctx, |ui| {
            ui.label(format!("Order ID: {}", modal.details.order_id));
            ui.label(format!("Customer: {}", modal.details.lead_details.fullname));
            ui.label(format!("Phone: {}", modal.details.lead_details.phone));
            widgets::labeled_text_edit(ui, "Address", &mut modal.address);

            ui.label("Select Product");
            let selected_name = modal
                .selected_product
                .as_ref()
                .and_then(|id| {
                    modal
                        .details
                        .product_details
                        .iter()
                        .find(|product| &product.id == id)
                })
                .map(|product| product.product_name.clone())
                .unwrap_or_else(|| "-- Select Product --".to_string());
            egui::ComboBox::from_id_source("order_product")
                .selected_text(selected_name)
                .show_ui(ui, |ui| {
                    for product in &modal.details.product_details {
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
            let mut remove_at = None;
            for (index, path) in modal.images.iter().enumerate() {
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
                modal.images.remove(index);
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let ready = modal.selected_product.is_some() && !modal.images.is_empty();
                if ui
                    .add_enabled(ready, egui::Button::new("Place Order"))
                    .clicked()
                {
                    if let Some(product_id) = modal.selected_product.clone() {
                        queue.dispatch(BackendCommand::PlaceOrder {
                            order_id: modal.details.order_id.clone(),
                            user_id: modal
                                .details
                                .lead_details
                                .lead_owner
                                .clone()
                                .unwrap_or(shared::domain::StaffId(String::new())),
                            lead_id: modal.details.lead_details.id.clone(),
                            address: modal.address.clone(),
                            product_id,
                            image_paths: modal.images.clone(),
                            from_orders_page: false,
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
        state.order_modal = None;
    }
}
