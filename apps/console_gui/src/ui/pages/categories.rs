//! Product categories (admin): paginated table with create/edit/delete.

use std::path::PathBuf;

use eframe::egui;

use shared::domain::CategoryId;
use shared::protocol::{CategoriesPage, Category};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::orchestration::CommandQueue;
use crate::ui::widgets;

pub struct CategoriesState {
    pub page: u32,
    pub total_pages: u32,
    pub categories: Vec<Category>,
    pub loading: bool,
    pub needs_refresh: bool,
    show_form: bool,
    editing: Option<CategoryId>,
    name: String,
    image: Option<PathBuf>,
    delete_confirm: Option<CategoryId>,
}

impl Default for CategoriesState {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 1,
            categories: Vec::new(),
            loading: false,
            needs_refresh: true,
            show_form: false,
            editing: None,
            name: String::new(),
            image: None,
            delete_confirm: None,
        }
    }
}

impl CategoriesState {
    pub fn apply_page(&mut self, page: CategoriesPage) {
        self.categories = page.categories;
        self.total_pages = page.total_pages.max(1);
        self.loading = false;
    }
}

pub fn show(state: &mut CategoriesState, ui: &mut egui::Ui, queue: &mut CommandQueue<'_>) {
    if state.needs_refresh {
        state.needs_refresh = false;
        state.loading = true;
        queue.dispatch(BackendCommand::FetchCategories { page: state.page });
    }

    ui.horizontal(|ui| {
        ui.heading("Categories");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Create Category").clicked() {
                state.name = String::new();
                state.image = None;
                state.editing = None;
                state.show_form = true;
            }
        });
    });
    ui.separator();

    let rows = state.categories.clone();
    egui::ScrollArea::vertical()
        .max_height(ui.available_height() - 56.0)
        .show(ui, |ui| {
            egui::Grid::new("categories_table")
                .num_columns(2)
                .striped(true)
                .min_col_width(220.0)
                .show(ui, |ui| {
                    ui.strong("Category");
                    ui.strong("Action");
                    ui.end_row();

                    if state.loading {
                        ui.label("Loading...");
                        ui.end_row();
                    } else if rows.is_empty() {
                        ui.weak("No categories found.");
                        ui.end_row();
                    }
                    for category in rows {
                        ui.label(&category.category_name);
                        ui.menu_button("⋮", |ui| {
                            if ui.button("Edit").clicked() {
                                state.name = category.category_name.clone();
                                state.image = None;
                                state.editing = Some(category.id.clone());
                                state.show_form = true;
                                ui.close_menu();
                            }
                            if ui.button("Delete").clicked() {
                                state.delete_confirm = Some(category.id.clone());
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

fn show_form_modal(state: &mut CategoriesState, ui: &mut egui::Ui, queue: &mut CommandQueue<'_>) {
    if !state.show_form {
        return;
    }
    let ctx = ui.ctx().clone();
    let mut close = false;
    let title = if state.editing.is_some() {
        "Edit Category"
    } else {
        "Create Category"
    };
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .show(&ctx, |ui| {
            widgets::labeled_text_edit(ui, "Category Name", &mut state.name);
            if state.editing.is_none() {
                ui.horizontal(|ui| {
                    if ui.button("Choose Image").clicked() {
                        state.image = rfd::FileDialog::new()
                            .add_filter("images", &["png", "jpg", "jpeg"])
                            .pick_file();
                    }
                    if let Some(path) = &state.image {
                        ui.small(path.file_name().and_then(|n| n.to_str()).unwrap_or("image"));
                    }
                });
            }
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let label = if state.editing.is_some() { "Update" } else { "Create" };
                if ui.button(label).clicked() {
                    if widgets::is_blank(&state.name) {
                        *queue.status = "Category name is required".to_string();
                    } else {
                        match state.editing.clone() {
                            Some(id) => queue.dispatch(BackendCommand::EditCategory {
                                id,
                                name: state.name.trim().to_string(),
                            }),
                            None => queue.dispatch(BackendCommand::CreateCategory {
                                name: state.name.trim().to_string(),
                                image: state.image.clone(),
                            }),
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

fn show_delete_modal(state: &mut CategoriesState, ui: &mut egui::Ui, queue: &mut CommandQueue<'_>) {
    let Some(id) = state.delete_confirm.clone() else {
        return;
    };
    let ctx = ui.ctx().clone();
    let mut close = false;
    egui::Window::new("Delete Category")
        .collapsible(false)
        .resizable(false)
        .show(&ctx, |ui| {
            ui.label("Are you sure you want to delete this category?");
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    close = true;
                }
                if ui.button("Delete").clicked() {
                    queue.dispatch(BackendCommand::DeleteCategory { id: id.clone() });
                    close = true;
                }
            });
        });
    if close {
        state.delete_confirm = None;
    }
}
