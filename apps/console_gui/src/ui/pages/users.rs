//! Staff management (admin): user table with activity badge, create/edit
//! modal, activate/deactivate toggle, delete confirm.

use eframe::egui;

use shared::domain::StaffId;
use shared::protocol::{StaffUser, StaffUserDraft};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::orchestration::CommandQueue;
use crate::ui::widgets;

const STAFF_ROLES: &[&str] = &["user", "designer", "printer", "shipping"];

pub struct StaffForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: String,
    pub is_active: bool,
    /// Comma-separated page grants, applied on edit once the user exists.
    pub pages: String,
}

impl StaffForm {
    fn new() -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            role: "user".to_string(),
            is_active: true,
            pages: String::new(),
        }
    }

    fn from_user(user: &StaffUser) -> Self {
        Self {
            name: user.name.clone(),
            phone: user.phone.clone(),
            email: user.email.clone().unwrap_or_default(),
            password: String::new(),
            confirm_password: String::new(),
            role: user.role.clone().unwrap_or_else(|| "user".to_string()),
            is_active: user.is_active,
            pages: user.pages.join(","),
        }
    }

    fn page_grants(&self) -> Vec<String> {
        self.pages
            .split(',')
            .map(|page| page.trim().to_string())
            .filter(|page| !page.is_empty())
            .collect()
    }

    fn draft(&self, is_edit: bool) -> StaffUserDraft {
        StaffUserDraft {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            // Blank password on edit means "keep the current one".
            password: if is_edit && self.password.is_empty() {
                None
            } else {
                Some(self.password.clone())
            },
            role: self.role.clone(),
            is_active: self.is_active,
        }
    }
}

pub struct UsersState {
    pub users: Vec<StaffUser>,
    pub loading: bool,
    pub needs_refresh: bool,
    show_form: bool,
    editing: Option<StaffId>,
    form: StaffForm,
    delete_confirm: Option<StaffId>,
}

impl Default for UsersState {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            loading: false,
            needs_refresh: true,
            show_form: false,
            editing: None,
            form: StaffForm::new(),
            delete_confirm: None,
        }
    }
}

impl UsersState {
    pub fn apply_users(&mut self, users: Vec<StaffUser>) {
        self.users = users;
        self.loading = false;
    }
}

pub fn show(state: &mut UsersState, ui: &mut egui::Ui, queue: &mut CommandQueue<'_>) {
    if state.needs_refresh {
        state.needs_refresh = false;
        state.loading = true;
        queue.dispatch(BackendCommand::FetchStaffUsers);
    }

    ui.horizontal(|ui| {
        ui.heading("Users");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Create User").clicked() {
                state.form = StaffForm::new();
                state.editing = None;
                state.show_form = true;
            }
        });
    });
    ui.separator();

    let rows = state.users.clone();
    egui::ScrollArea::vertical()
        .max_height(ui.available_height() - 24.0)
        .show(ui, |ui| {
            egui::Grid::new("users_table")
                .num_columns(5)
                .striped(true)
                .min_col_width(120.0)
                .show(ui, |ui| {
                    ui.strong("Name");
                    ui.strong("Phone");
                    ui.strong("Role");
                    ui.strong("Status");
                    ui.strong("Action");
                    ui.end_row();

                    if state.loading {
                        ui.label("Loading...");
                        ui.end_row();
                    } else if rows.is_empty() {
                        ui.weak("No users found.");
                        ui.end_row();
                    }
                    for user in rows {
                        ui.label(&user.name);
                        ui.weak(&user.phone);
                        ui.label(user.role.as_deref().unwrap_or("-"));
                        if user.is_active {
                            ui.label(
                                egui::RichText::new(" Active ")
                                    .color(egui::Color32::from_rgb(0x06, 0x5F, 0x46))
                                    .background_color(egui::Color32::from_rgb(0xD1, 0xFA, 0xE5))
                                    .small(),
                            );
                        } else {
                            ui.label(
                                egui::RichText::new(" Inactive ")
                                    .color(egui::Color32::from_rgb(0x99, 0x1B, 0x1B))
                                    .background_color(egui::Color32::from_rgb(0xFE, 0xE2, 0xE2))
                                    .small(),
                            );
                        }
                        ui.menu_button("⋮", |ui| {
                            if ui.button("Edit").clicked() {
                                state.form = StaffForm::from_user(&user);
                                state.editing = Some(user.id.clone());
                                state.show_form = true;
                                ui.close_menu();
                            }
                            let toggle_label = if user.is_active {
                                "Deactivate"
                            } else {
                                "Activate"
                            };
                            if ui.button(toggle_label).clicked() {
                                queue.dispatch(BackendCommand::ToggleStaffUserStatus {
                                    id: user.id.clone(),
                                });
                                ui.close_menu();
                            }
                            if ui.button("Delete").clicked() {
                                state.delete_confirm = Some(user.id.clone());
                                ui.close_menu();
                            }
                        });
                        ui.end_row();
                    }
                });
        });

    show_form_modal(state, ui, queue);
    show_delete_modal(state, ui, queue);
}

fn show_form_modal(state: &mut UsersState, ui: &mut egui::Ui, queue: &mut CommandQueue<'_>) {
    if !state.show_form {
        return;
    }
    let ctx = ui.ctx().clone();
    let mut close = false;
    let title = if state.editing.is_some() {
        "Edit User"
    } else {
        "Create User"
    };
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .show(&ctx, |ui| {
            widgets::labeled_text_edit(ui, "Name", &mut state.form.name);
            widgets::labeled_text_edit(ui, "Phone", &mut state.form.phone);
            widgets::labeled_text_edit(ui, "Email", &mut state.form.email);

            ui.label("Password");
            ui.add(egui::TextEdit::singleline(&mut state.form.password).password(true));
            ui.label("Confirm Password");
            ui.add(egui::TextEdit::singleline(&mut state.form.confirm_password).password(true));

            widgets::option_select(ui, "staff_role", "Role", STAFF_ROLES, &mut state.form.role);
            ui.checkbox(&mut state.form.is_active, "Active");
            if state.editing.is_some() {
                widgets::labeled_text_edit(ui, "Pages (comma separated)", &mut state.form.pages);
            }

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let is_edit = state.editing.is_some();
                let label = if is_edit { "Update" } else { "Create" };
                if ui.button(label).clicked() {
                    if widgets::is_blank(&state.form.name) || widgets::is_blank(&state.form.phone) {
                        *queue.status = "Name and phone are required".to_string();
                    } else if state.form.password != state.form.confirm_password {
                        *queue.status = "Passwords do not match".to_string();
                    } else if !is_edit && state.form.password.is_empty() {
                        *queue.status = "Password is required".to_string();
                    } else {
                        let draft = state.form.draft(is_edit);
                        match state.editing.clone() {
                            Some(id) => {
                                queue.dispatch(BackendCommand::EditStaffUser {
                                    id: id.clone(),
                                    draft,
                                });
                                queue.dispatch(BackendCommand::SetStaffPages {
                                    id,
                                    pages: state.form.page_grants(),
                                });
                            }
                            None => queue.dispatch(BackendCommand::CreateStaffUser { draft }),
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

fn show_delete_modal(state: &mut UsersState, ui: &mut egui::Ui, queue: &mut CommandQueue<'_>) {
    let Some(id) = state.delete_confirm.clone() else {
        return;
    };
    let name = state
        .users
        .iter()
        .find(|user| user.id == id)
        .map(|user| user.name.clone())
        .unwrap_or_default();
    let ctx = ui.ctx().clone();
    let mut close = false;
    egui::Window::new("Delete User")
        .collapsible(false)
        .resizable(false)
        .show(&ctx, |ui| {
            ui.label(format!("Are you sure you want to delete {name}?"));
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    close = true;
                }
                if ui.button("Delete").clicked() {
                    queue.dispatch(BackendCommand::DeleteStaffUser { id: id.clone() });
                    close = true;
                }
            });
        });
    if close {
        state.delete_confirm = None;
    }
}
