//! Product catalog (admin): paginated table, create/edit popups covering
//! the full attribute sheet, delete confirm.

use std::path::PathBuf;

use eframe::egui;

use shared::domain::{CategoryId, ProductId, PRODUCT_SHAPES, PRODUCT_SIZES};
use shared::protocol::{Category, Product, ProductDraft, ProductsPage};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::orchestration::CommandQueue;
use crate::ui::widgets;

pub struct ProductForm {
    pub product_name: String,
    pub sku: String,
    pub product_category: Option<CategoryId>,
    pub mrp: String,
    pub selling_price: String,
    pub shape: String,
    pub size: String,
    pub thickness: String,
    pub photo: Option<PathBuf>,
}

impl ProductForm {
    fn new() -> Self {
        Self {
            product_name: String::new(),
            sku: String::new(),
            product_category: None,
            mrp: String::new(),
            selling_price: String::new(),
            shape: String::new(),
            size: String::new(),
            thickness: String::new(),
            photo: None,
        }
    }

    fn from_product(product: &Product) -> Self {
        Self {
            product_name: product.product_name.clone(),
            sku: product.sku.clone().unwrap_or_default(),
            product_category: product.product_category.as_ref().map(|c| c.id.clone()),
            mrp: product.mrp.clone().unwrap_or_default(),
            selling_price: product.selling_price.clone().unwrap_or_default(),
            shape: product.shape.clone().unwrap_or_default(),
            size: product.size.clone().unwrap_or_default(),
            thickness: product.thickness.clone().unwrap_or_default(),
            photo: None,
        }
    }

    fn draft(&self) -> Option<ProductDraft> {
        let product_category = self.product_category.clone()?;
        Some(ProductDraft {
            product_name: self.product_name.trim().to_string(),
            sku: self.sku.trim().to_string(),
            product_category,
            mrp: self.mrp.trim().to_string(),
            selling_price: self.selling_price.trim().to_string(),
            shape: self.shape.clone(),
            size: self.size.clone(),
            thickness: self.thickness.trim().to_string(),
        })
    }

    fn has_blank_fields(&self) -> bool {
        widgets::is_blank(&self.product_name)
            || widgets::is_blank(&self.sku)
            || self.product_category.is_none()
            || widgets::is_blank(&self.mrp)
            || widgets::is_blank(&self.selling_price)
            || widgets::is_blank(&self.shape)
            || widgets::is_blank(&self.size)
            || widgets::is_blank(&self.thickness)
    }
}

pub struct ProductsState {
    pub page: u32,
    pub total_pages: u32,
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub loading: bool,
    pub needs_refresh: bool,
    show_form: bool,
    editing: Option<ProductId>,
    form: ProductForm,
    delete_confirm: Option<ProductId>,
}

impl Default for ProductsState {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 1,
            products: Vec::new(),
            categories: Vec::new(),
            loading: false,
            needs_refresh: true,
            show_form: false,
            editing: None,
            form: ProductForm::new(),
            delete_confirm: None,
        }
    }
}

impl ProductsState {
    pub fn apply_page(&mut self, page: ProductsPage) {
        self.products = page.products;
        self.total_pages = page.total_pages.max(1);
        self.loading = false;
    }

    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    pub fn begin_edit(&mut self, product: Product) {
        self.form = ProductForm::from_product(&product);
        self.editing = Some(product.id);
        self.show_form = true;
    }
}

pub fn show(state: &mut ProductsState, ui: &mut egui::Ui, queue: &mut CommandQueue<'_>) {
    if state.needs_refresh {
        state.needs_refresh = false;
        state.loading = true;
        queue.dispatch(BackendCommand::FetchProducts { page: state.page });
    }

    ui.horizontal(|ui| {
        ui.heading("All Products");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Create Product").clicked() {
                state.form = ProductForm::new();
                state.editing = None;
                state.show_form = true;
                queue.dispatch(BackendCommand::FetchCategoryOptions);
            }
        });
    });
    ui.separator();

    let rows = state.products.clone();
    egui::ScrollArea::vertical()
        .max_height(ui.available_height() - 56.0)
        .show(ui, |ui| {
            egui::Grid::new("products_table")
                .num_columns(4)
                .striped(true)
                .min_col_width(140.0)
                .show(ui, |ui| {
                    ui.strong("Product");
                    ui.strong("Category");
                    ui.strong("Selling Price");
                    ui.strong("Action");
                    ui.end_row();

                    if state.loading {
                        ui.label("Loading...");
                        ui.end_row();
                    } else if rows.is_empty() {
                        ui.weak("No products found.");
                        ui.end_row();
                    }
                    for product in rows {
                        ui.label(&product.product_name);
                        ui.weak(
                            product
                                .product_category
                                .as_ref()
                                .map(|c| c.category_name.as_str())
                                .unwrap_or("-"),
                        );
                        ui.label(format!("₹{}", product.selling_price.as_deref().unwrap_or("-")));
                        ui.menu_button("⋮", |ui| {
                            if ui.button("Edit").clicked() {
                                queue.dispatch(BackendCommand::FetchProduct {
                                    id: product.id.clone(),
                                });
                                queue.dispatch(BackendCommand::FetchCategoryOptions);
                                ui.close_menu();
                            }
                            if ui.button("Delete").clicked() {
                                state.delete_confirm = Some(product.id.clone());
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

fn show_form_modal(state: &mut ProductsState, ui: &mut egui::Ui, queue: &mut CommandQueue<'_>) {
    if !state.show_form {
        return;
    }
    let ctx = ui.ctx().clone();
    let mut close = false;
    let title = if state.editing.is_some() {
        "Edit Product"
    } else {
        "Create Product"
    };
    egui::Window::new(title)
        .collapsible(false)
        .show(&ctx, |ui| {
            egui::ScrollArea::vertical().max_height(420.0).show(ui, |ui| {
                widgets::labeled_text_edit(ui, "Product Name", &mut state.form.product_name);
                widgets::labeled_text_edit(ui, "SKU", &mut state.form.sku);

                ui.label("Category");
                let category_name = state
                    .form
                    .product_category
                    .as_ref()
                    .and_then(|id| state.categories.iter().find(|c| &c.id == id))
                    .map(|c| c.category_name.clone())
                    .unwrap_or_else(|| "-- Select Category --".to_string());
                egui::ComboBox::from_id_source("product_category")
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

                widgets::labeled_text_edit(ui, "MRP", &mut state.form.mrp);
                widgets::labeled_text_edit(ui, "Selling Price", &mut state.form.selling_price);
                widgets::option_select(ui, "product_shape", "Shape", PRODUCT_SHAPES, &mut state.form.shape);
                widgets::option_select(ui, "product_size", "Size", PRODUCT_SIZES, &mut state.form.size);
                widgets::labeled_text_edit(ui, "Thickness", &mut state.form.thickness);

                ui.horizontal(|ui| {
                    if ui.button("Choose Photo").clicked() {
                        state.form.photo = rfd::FileDialog::new()
                            .add_filter("images", &["png", "jpg", "jpeg"])
                            .pick_file();
                    }
                    if let Some(path) = &state.form.photo {
                        ui.small(path.file_name().and_then(|n| n.to_str()).unwrap_or("photo"));
                    }
                });

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    let label = if state.editing.is_some() { "Update" } else { "Create" };
                    if ui.button(label).clicked() {
                        // Photo is mandatory on create only; edits keep the stored one.
                        let missing_photo = state.editing.is_none() && state.form.photo.is_none();
                        if state.form.has_blank_fields() || missing_photo {
                            *queue.status = "All fields are required".to_string();
                        } else if let Some(draft) = state.form.draft() {
                            let photo = state.form.photo.clone();
                            match state.editing.clone() {
                                Some(id) => queue.dispatch(BackendCommand::EditProduct {
                                    id,
                                    draft,
                                    photo,
                                }),
                                None => queue.dispatch(BackendCommand::CreateProduct {
                                    draft,
                                    photo,
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
        });
    if close {
        state.show_form = false;
        state.editing = None;
    }
}

fn show_delete_modal(state: &mut ProductsState, ui: &mut egui::Ui, queue: &mut CommandQueue<'_>) {
    let Some(id) = state.delete_confirm.clone() else {
        return;
    };
    let ctx = ui.ctx().clone();
    let mut close = false;
    egui::Window::new("Delete Product")
        .collapsible(false)
        .resizable(false)
        .show(&ctx, |ui| {
            ui.label("Are you sure you want to delete this product?");
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    close = true;
                }
                if ui.button("Delete").clicked() {
                    queue.dispatch(BackendCommand::DeleteProduct { id: id.clone() });
                    close = true;
                }
            });
        });
    if close {
        state.delete_confirm = None;
    }
}
