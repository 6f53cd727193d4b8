//! Raw-material inventory (admin): paginated table, create/edit modal keyed
//! to a product category, delete confirm.

use eframe::egui;

use shared::domain::{CategoryId, InventoryItemId};
use shared::protocol::{Category, InventoryDraft, InventoryItem, InventoryPage};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::orchestration::CommandQueue;
use crate::ui::widgets;

pub struct InventoryForm {
    pub material_name: String,
    pub product_category: Option<CategoryId>,
    pub unit: String,
    pub quantity: String,
}

impl InventoryForm {
    fn new() -> Self {
        Self {
            material_name: String::new(),
            product_category: None,
            unit: String::new(),
            quantity: String::new(),
        }
    }

    fn from_item(item: &InventoryItem) -> Self {
        Self {
            material_name: item.material_name.clone(),
            product_category: item.product_category.as_ref().map(|c| c.id.clone()),
            unit: item.unit.clone(),
            quantity: item.quantity.clone(),
        }
    }

    fn draft(&self) -> Option<InventoryDraft> {
        let product_category = self.product_category.clone()?;
        Some(InventoryDraft {
            material_name: self.material_name.trim().to_string(),
            product_category,
            unit: self.unit.trim().to_string(),
            quantity: self.quantity.trim().to_string(),
        })
    }

    fn has_blank_fields(&self) -> bool {
        widgets::is_blank(&self.material_name)
            || self.product_category.is_none()
            || widgets::is_blank(&self.unit)
            || widgets::is_blank(&self.quantity)
    }
}

pub struct InventoryState {
    pub page: u32,
    pub total_pages: u32,
    pub items: Vec<InventoryItem>,
    pub categories: Vec<Category>,
    pub loading: bool,
    pub needs_refresh: bool,
    show_form: bool,
    editing: Option<InventoryItemId>,
    form: InventoryForm,
    delete_confirm: Option<InventoryItemId>,
}

impl Default for InventoryState {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 1,
            items: Vec::new(),
            categories: Vec::new(),
            loading: false,
            needs_refresh: true,
            show_form: false,
            editing: None,
            form: InventoryForm::new(),
            delete_confirm: None,
        }
    }
}

impl InventoryState {
    pub fn apply_page(&mut self, page: InventoryPage) {
        self.items = page.items;
        self.total_pages = page.total_pages.max(1);
        self.loading = false;
    }

    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }
}

pub fn show(state: &mut InventoryState, ui: &mut egui::Ui, queue: &mut CommandQueue<'_>) {
    if state.needs_refresh {
        state.needs_refresh = false;
        state.loading = true;
        queue.dispatch(BackendCommand::FetchInventory { page: state.page });
    }

    ui.horizontal(|ui| {
        ui.heading("Inventory");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Add Item").clicked() {
                state.form = InventoryForm::new();
                state.editing = None;
                state.show_form = true;
                queue.dispatch(BackendCommand::FetchCategoryOptions);
            }
        });
    });
    ui.separator();

    let rows = state.items.clone();
    egui::ScrollArea::vertical()
        .max_height(ui.available_height() - 56.0)
        .show(ui, |ui| {
            egui::Grid::new("inventory_table")
                .num_columns(5)
                .striped(true)
                .min_col_width(120.0)
                .show(ui, |ui| {
                    ui.strong("Material");
                    ui.strong("Category");
                    ui.strong("Unit");
                    ui.strong("Quantity");
                    ui.strong("Action");
                    ui.end_row();

                    if state.loading {
                        ui.label("Loading...");
                        ui.end_row();
                    } else if rows.is_empty() {
                        ui.weak("No inventory items found.");
                        ui.end_row();
                    }
                    for item in rows {
                        ui.label(&item.material_name);
                        ui.weak(
                            item.product_category
                                .as_ref()
                                .map(|c| c.category_name.as_str())
                                .unwrap_or(""),
                        );
                        ui.label(&item.unit);
                        ui.label(&item.quantity);
                        ui.menu_button("⋮", |ui| {
                            if ui.button("Edit").clicked() {
                                state.form = InventoryForm::from_item(&item);
                                state.editing = Some(item.id.clone());
                                state.show_form = true;
                                queue.dispatch(BackendCommand::FetchCategoryOptions);
                                ui.close_menu();
                            }
                            if ui.button("Delete").clicked() {
                                state.delete_confirm = Some(item.id.clone());
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
}

fn show_form_modal(state: &mut InventoryState, ui: &mut egui::Ui, queue: &mut CommandQueue<'_>) {
    if !state.show_form {
        return;
    }
    let ctx = ui.ctx().clone();
    let mut close = false;
    let title = if state.editing.is_some() {
        "Edit Inventory Item"
    } else {
        "Add Inventory Item"
    };
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .show(&ctx, |ui| {
            widgets::labeled_text_edit(ui, "Material Name", &mut state.form.material_name);

            ui.label("Category");
            let category_name = state
                .form
                .product_category
                .as_ref()
                .and_then(|id| state.categories.iter().find(|c| &c.id == id))
                .map(|c| c.category_name.clone())
                .unwrap_or_else(|| "-- Select Category --".to_string());
            egui::ComboBox::from_id_source("inventory_category")
                .selected_text(category_name)
                .show_ui(ui, |ui| {
                    for category in &state.categories {
                        ui.selectable_value(
                            &mut state.form.product_category,
                            Some(category.id.clone()),
                            &category.category_name,
                        );
                    }
                });

            widgets::labeled_text_edit(ui, "Unit", &mut state.form.unit);
            widgets::labeled_text_edit(ui, "Quantity", &mut state.form.quantity);

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let label = if state.editing.is_some() { "Update" } else { "Create" };
                if ui.button(label).clicked() {
                    if state.form.has_blank_fields() {
                        *queue.status = "All fields are required".to_string();
                    } else if let Some(draft) = state.form.draft() {
                        match state.editing.clone() {
                            Some(id) => {
                                queue.dispatch(BackendCommand::EditInventoryItem { id, draft })
                            }
                            None => queue.dispatch(BackendCommand::CreateInventoryItem { draft }),
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

fn show_delete_modal(state: &mut InventoryState, ui: &mut egui::Ui, queue: &mut CommandQueue<'_>) {
    let Some(id) = state.delete_confirm.clone() else {
        return;
    };
    let ctx = ui.ctx().clone();
    let mut close = false;
    egui::Window::new("Delete Inventory Item")
        .collapsible(false)
        .resizable(false)
        .show(&ctx, |ui| {
            ui.label("Are you sure you want to delete this item?");
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    close = true;
                }
                if ui.button("Delete").clicked() {
                    queue.dispatch(BackendCommand::DeleteInventoryItem { id: id.clone() });
                    close = true;
                }
            });
        });
    if close {
        state.delete_confirm = None;
    }
}
