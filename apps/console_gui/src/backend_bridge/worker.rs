//! Backend worker thread: owns the tokio runtime, drains the UI command
//! queue, drives the API gateway, and reports back as `UiEvent`s.
//!
//! Commands are processed strictly in arrival order on this one loop. There
//! is no de-duplication or cancellation of superseded requests; a stale
//! pagination response simply lands after the newer one.

use std::{path::Path, sync::Arc, thread};

use anyhow::Context as _;
use crossbeam_channel::{Receiver, Sender};
use image::GenericImageView;
use tracing::{error, warn};
use url::Url;

use client_core::{
    ApiGateway, CredentialScope, FileSessionStore, GatewayError, LoginNavigator,
    MemorySessionStore, PlaceOrderRequest, SessionStore, UploadFile,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{PreviewImage, UiError, UiErrorContext, UiEvent};

struct ChannelNavigator {
    ui_tx: Sender<UiEvent>,
}

impl LoginNavigator for ChannelNavigator {
    fn redirect_to_login(&self, scope: CredentialScope) {
        let _ = self.ui_tx.try_send(UiEvent::SessionEnded { scope });
    }
}

pub fn spawn_backend_thread(
    server_url: String,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let base_url = match Url::parse(&server_url) {
                Ok(url) => url,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: invalid server URL '{server_url}': {err}"),
                    )));
                    error!(%server_url, "invalid server URL: {err}");
                    return;
                }
            };

            let store: Arc<dyn SessionStore> = match FileSessionStore::open_default() {
                Ok(store) => Arc::new(store),
                Err(err) => {
                    warn!("session persistence unavailable, falling back to in-memory slots: {err}");
                    Arc::new(MemorySessionStore::new())
                }
            };
            let navigator = Arc::new(ChannelNavigator {
                ui_tx: ui_tx.clone(),
            });
            let gateway = ApiGateway::new(base_url, store, navigator);

            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));
            // A persisted general token survives restarts, like the web
            // console staying signed in across reloads. It is not validated
            // here; the first 401 will end it through the usual policy.
            if gateway.has_session(CredentialScope::General) {
                let role = gateway.session_role();
                let _ = ui_tx.try_send(UiEvent::GeneralLoginOk { role });
                let _ = ui_tx.try_send(UiEvent::Info("Restored saved session".to_string()));
            }
            while let Ok(cmd) = cmd_rx.recv() {
                handle_command(&gateway, &ui_tx, cmd).await;
            }
        });
    });
}

fn send(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    let _ = ui_tx.try_send(event);
}

fn report(ui_tx: &Sender<UiEvent>, context: UiErrorContext, err: GatewayError) {
    // A session expiry already produced its redirect through the navigator;
    // a second error banner would only fight the login screen.
    if matches!(err, GatewayError::SessionExpired { .. }) {
        return;
    }
    send(
        ui_tx,
        UiEvent::Error(UiError::from_message(context, err.to_string())),
    );
}

async fn read_upload(path: &Path) -> anyhow::Result<UploadFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload.bin")
        .to_string();
    let mime_type = mime_guess::from_path(path).first().map(|m| m.to_string());
    Ok(UploadFile {
        filename,
        mime_type,
        bytes,
    })
}

async fn read_uploads(paths: &[std::path::PathBuf]) -> anyhow::Result<Vec<UploadFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(read_upload(path).await?);
    }
    Ok(files)
}

fn validation_error(ui_tx: &Sender<UiEvent>, err: anyhow::Error) {
    send(
        ui_tx,
        UiEvent::Error(UiError::from_message(
            UiErrorContext::Mutation,
            format!("{err:#}"),
        )),
    );
}

const PREVIEW_MAX_DIMENSION: f32 = 320.0;

fn decode_preview(bytes: &[u8]) -> Result<PreviewImage, String> {
    let decoded = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let (width, height) = decoded.dimensions();
    let scale = (PREVIEW_MAX_DIMENSION / (width.max(height) as f32)).min(1.0);
    let resized = if scale < 1.0 {
        decoded.resize(
            (width as f32 * scale).max(1.0) as u32,
            (height as f32 * scale).max(1.0) as u32,
            image::imageops::FilterType::Triangle,
        )
    } else {
        decoded
    };
    let rgba = resized.to_rgba8();
    Ok(PreviewImage {
        width: rgba.width() as usize,
        height: rgba.height() as usize,
        rgba: rgba.into_raw(),
    })
}

/// Absolute URLs from the backend point at the same host; previews are
/// fetched by path so the credential policy applies uniformly.
fn blob_path(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {
            let mut path = parsed.path().to_string();
            if let Some(query) = parsed.query() {
                path.push('?');
                path.push_str(query);
            }
            path
        }
        _ => url.to_string(),
    }
}

async fn handle_command(gateway: &ApiGateway, ui_tx: &Sender<UiEvent>, cmd: BackendCommand) {
    match cmd {
        BackendCommand::LoginGeneral { email, password } => {
            match gateway.login(&email, &password).await {
                Ok(()) => {
                    let role = gateway.session_role();
                    send(ui_tx, UiEvent::GeneralLoginOk { role });
                }
                Err(err) => report(ui_tx, UiErrorContext::Login, err),
            }
        }
        BackendCommand::LoginAdmin { phone, password } => {
            match gateway.admin_login(&phone, &password).await {
                Ok(()) => send(ui_tx, UiEvent::AdminLoginOk),
                Err(err) => report(ui_tx, UiErrorContext::Login, err),
            }
        }
        BackendCommand::SignOut { scope } => {
            gateway.sign_out(scope);
        }

        BackendCommand::FetchLeads { page, filter } => {
            match gateway.leads(page, &filter).await {
                Ok(leads) => send(ui_tx, UiEvent::LeadsLoaded(leads)),
                Err(err) => report(ui_tx, UiErrorContext::General, err),
            }
        }
        BackendCommand::FetchLead { id } => match gateway.lead(&id).await {
            Ok(lead) => send(ui_tx, UiEvent::LeadLoaded(lead)),
            Err(err) => report(ui_tx, UiErrorContext::General, err),
        },
        BackendCommand::FetchLeadOptions => match gateway.leads(1, "all").await {
            Ok(page) => send(ui_tx, UiEvent::LeadOptionsLoaded(page.leads)),
            Err(err) => report(ui_tx, UiErrorContext::General, err),
        },
        BackendCommand::CreateLead { draft } => match gateway.create_lead(&draft).await {
            Ok(()) => {
                send(ui_tx, UiEvent::Info("Lead created".to_string()));
                send(ui_tx, UiEvent::LeadsRefreshNeeded);
            }
            Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
        },
        BackendCommand::EditLead { id, draft } => match gateway.edit_lead(&id, &draft).await {
            Ok(()) => {
                send(ui_tx, UiEvent::Info("Lead updated".to_string()));
                send(ui_tx, UiEvent::LeadsRefreshNeeded);
            }
            Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
        },
        BackendCommand::DeleteLead { id } => match gateway.delete_lead(&id).await {
            Ok(()) => {
                send(ui_tx, UiEvent::Info("Lead deleted".to_string()));
                send(ui_tx, UiEvent::LeadsRefreshNeeded);
            }
            Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
        },
        BackendCommand::FetchPreorderDetails { lead_id } => {
            match gateway.preorder_details(&lead_id).await {
                Ok(details) => send(ui_tx, UiEvent::PreorderLoaded(details)),
                Err(err) => report(ui_tx, UiErrorContext::General, err),
            }
        }
        BackendCommand::PlaceOrder {
            order_id,
            user_id,
            lead_id,
            address,
            product_id,
            image_paths,
            from_orders_page,
        } => {
            let images = match read_uploads(&image_paths).await {
                Ok(images) => images,
                Err(err) => return validation_error(ui_tx, err),
            };
            let request = PlaceOrderRequest {
                order_id,
                user_id,
                lead_id,
                address,
                product_ids: vec![product_id],
                images,
            };
            let outcome = if from_orders_page {
                gateway.place_order_from_orders(request).await
            } else {
                gateway.place_order(request).await
            };
            match outcome {
                Ok(()) => {
                    send(ui_tx, UiEvent::Info("Order placed successfully".to_string()));
                    send(ui_tx, UiEvent::OrderPlaced);
                }
                Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
            }
        }

        BackendCommand::FetchOrders { page, filter } => {
            match gateway.orders(page, &filter).await {
                Ok(orders) => send(ui_tx, UiEvent::OrdersLoaded(orders)),
                Err(err) => report(ui_tx, UiErrorContext::General, err),
            }
        }
        BackendCommand::FetchOrderDetails { id } => match gateway.order_details(&id).await {
            Ok(details) => send(ui_tx, UiEvent::OrderDetailsLoaded(details)),
            Err(err) => report(ui_tx, UiErrorContext::General, err),
        },
        BackendCommand::FetchAssignableUsers => match gateway.assignable_users().await {
            Ok(users) => send(ui_tx, UiEvent::AssignableUsersLoaded(users)),
            Err(err) => report(ui_tx, UiErrorContext::General, err),
        },
        BackendCommand::AssignOrder {
            order_db_id,
            user_id,
            role,
        } => match gateway.assign_order(&order_db_id, &user_id, &role).await {
            Ok(()) => {
                send(ui_tx, UiEvent::Info("Order assigned successfully".to_string()));
                send(ui_tx, UiEvent::OrdersRefreshNeeded);
            }
            Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
        },
        BackendCommand::ApproveOrder { order_id } => match gateway.approve_order(&order_id).await {
            Ok(()) => {
                send(ui_tx, UiEvent::Info("Order approved".to_string()));
                send(ui_tx, UiEvent::OrdersRefreshNeeded);
            }
            Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
        },
        BackendCommand::RejectDesign { order_id } => match gateway.reject_design(&order_id).await {
            Ok(()) => {
                send(ui_tx, UiEvent::Info("Design rejected".to_string()));
                send(ui_tx, UiEvent::OrdersRefreshNeeded);
            }
            Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
        },
        BackendCommand::DownloadDesigns { order_id } => {
            match gateway.download_designs(&order_id).await {
                Ok(file) => send(
                    ui_tx,
                    UiEvent::FileDownloaded {
                        filename: file.filename,
                        bytes: file.bytes,
                    },
                ),
                Err(err) => report(ui_tx, UiErrorContext::General, err),
            }
        }
        BackendCommand::UploadBill {
            order_id,
            is_one_payment,
            bill1,
            bill2,
        } => {
            let bill1 = match read_upload(&bill1).await {
                Ok(file) => file,
                Err(err) => return validation_error(ui_tx, err),
            };
            let bill2 = match bill2 {
                Some(path) => match read_upload(&path).await {
                    Ok(file) => Some(file),
                    Err(err) => return validation_error(ui_tx, err),
                },
                None => None,
            };
            match gateway
                .upload_bill(&order_id, is_one_payment, bill1, bill2)
                .await
            {
                Ok(()) => {
                    send(ui_tx, UiEvent::Info("Bill uploaded".to_string()));
                    send(ui_tx, UiEvent::BillUploaded);
                }
                Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
            }
        }
        BackendCommand::FetchLeadsForOrder => match gateway.leads_for_order().await {
            Ok(intake) => send(ui_tx, UiEvent::LeadsForOrderLoaded(intake)),
            Err(err) => report(ui_tx, UiErrorContext::General, err),
        },

        BackendCommand::FetchTasks { page, filter } => match gateway.tasks(page, &filter).await {
            Ok(tasks) => send(ui_tx, UiEvent::TasksLoaded(tasks)),
            Err(err) => report(ui_tx, UiErrorContext::General, err),
        },
        BackendCommand::CreateTask { draft } => match gateway.create_task(&draft).await {
            Ok(_) => {
                send(ui_tx, UiEvent::Info("Task created".to_string()));
                send(ui_tx, UiEvent::TasksRefreshNeeded);
            }
            Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
        },
        BackendCommand::EditTask { id, draft } => match gateway.edit_task(&id, &draft).await {
            Ok(()) => {
                send(ui_tx, UiEvent::Info("Task updated".to_string()));
                send(ui_tx, UiEvent::TasksRefreshNeeded);
            }
            Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
        },
        BackendCommand::DeleteTask { id } => match gateway.delete_task(&id).await {
            Ok(()) => {
                send(ui_tx, UiEvent::Info("Task deleted".to_string()));
                send(ui_tx, UiEvent::TasksRefreshNeeded);
            }
            Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
        },

        BackendCommand::FetchDesigns {
            page,
            filter,
            search,
        } => match gateway.designs(page, &filter, &search).await {
            Ok(designs) => send(ui_tx, UiEvent::DesignsLoaded(designs)),
            Err(err) => report(ui_tx, UiErrorContext::General, err),
        },
        BackendCommand::FetchDesignOrder { id } => match gateway.design_order(&id).await {
            Ok(details) => send(ui_tx, UiEvent::DesignOrderLoaded(details)),
            Err(err) => report(ui_tx, UiErrorContext::General, err),
        },
        BackendCommand::SubmitDesigns {
            order_id,
            image_paths,
        } => {
            let images = match read_uploads(&image_paths).await {
                Ok(images) => images,
                Err(err) => return validation_error(ui_tx, err),
            };
            match gateway.submit_designs(&order_id, images).await {
                Ok(()) => {
                    send(ui_tx, UiEvent::Info("Designs uploaded".to_string()));
                    send(ui_tx, UiEvent::DesignsRefreshNeeded);
                }
                Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
            }
        }
        BackendCommand::DownloadDesignerBundle { id } => {
            match gateway.download_designer_bundle(&id).await {
                Ok(file) => send(
                    ui_tx,
                    UiEvent::FileDownloaded {
                        filename: file.filename,
                        bytes: file.bytes,
                    },
                ),
                Err(err) => report(ui_tx, UiErrorContext::General, err),
            }
        }

        BackendCommand::FetchPrintJobs { page, filter } => {
            match gateway.printer_orders(page, &filter).await {
                Ok(jobs) => send(ui_tx, UiEvent::PrintJobsLoaded(jobs)),
                Err(err) => report(ui_tx, UiErrorContext::General, err),
            }
        }
        BackendCommand::FetchPrintOrder { order_id } => {
            match gateway.printer_order_detail(&order_id).await {
                Ok(details) => send(ui_tx, UiEvent::PrintOrderLoaded(details)),
                Err(err) => report(ui_tx, UiErrorContext::General, err),
            }
        }
        BackendCommand::DownloadPrinterBundle { order_id } => {
            match gateway.download_printer_bundle(&order_id).await {
                Ok(file) => send(
                    ui_tx,
                    UiEvent::FileDownloaded {
                        filename: file.filename,
                        bytes: file.bytes,
                    },
                ),
                Err(err) => report(ui_tx, UiErrorContext::General, err),
            }
        }
        BackendCommand::StartPrinting { order_id } => {
            match gateway.printer_approve_order(&order_id).await {
                Ok(()) => {
                    send(ui_tx, UiEvent::Info("Printing started".to_string()));
                    send(ui_tx, UiEvent::PrintJobsRefreshNeeded);
                }
                Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
            }
        }
        BackendCommand::SendToShipping { order_id } => {
            match gateway.printer_ship_order(&order_id).await {
                Ok(()) => {
                    send(ui_tx, UiEvent::Info("Order sent to shipping".to_string()));
                    send(ui_tx, UiEvent::PrintJobsRefreshNeeded);
                }
                Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
            }
        }

        BackendCommand::FetchShippings { page, filter } => {
            match gateway.shippings(page, &filter).await {
                Ok(orders) => send(ui_tx, UiEvent::ShippingsLoaded(orders)),
                Err(err) => report(ui_tx, UiErrorContext::General, err),
            }
        }
        BackendCommand::FetchShippingOrder { order_id } => {
            match gateway.shipping_order_details(&order_id).await {
                Ok(details) => send(ui_tx, UiEvent::ShippingOrderLoaded(details)),
                Err(err) => report(ui_tx, UiErrorContext::General, err),
            }
        }
        BackendCommand::UpdateShippingStatus { order_id, status } => {
            match gateway.update_shipping_status(&order_id, &status).await {
                Ok(()) => {
                    send(ui_tx, UiEvent::Info("Status updated".to_string()));
                    send(ui_tx, UiEvent::ShippingStatusUpdated { order_id, status });
                }
                Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
            }
        }
        BackendCommand::UploadCourierSlip { order_id, file } => {
            let file = match read_upload(&file).await {
                Ok(file) => file,
                Err(err) => return validation_error(ui_tx, err),
            };
            match gateway.upload_courier_slip(&order_id, file).await {
                Ok(()) => {
                    send(ui_tx, UiEvent::Info("Courier slip uploaded".to_string()));
                    send(ui_tx, UiEvent::CourierSlipUploaded);
                }
                Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
            }
        }

        BackendCommand::FetchProducts { page } => match gateway.products(page).await {
            Ok(products) => send(ui_tx, UiEvent::ProductsLoaded(products)),
            Err(err) => report(ui_tx, UiErrorContext::General, err),
        },
        BackendCommand::FetchProduct { id } => match gateway.product(&id).await {
            Ok(product) => send(ui_tx, UiEvent::ProductLoaded(product)),
            Err(err) => report(ui_tx, UiErrorContext::General, err),
        },
        BackendCommand::CreateProduct { draft, photo } => {
            let photo = match photo {
                Some(path) => match read_upload(&path).await {
                    Ok(file) => Some(file),
                    Err(err) => return validation_error(ui_tx, err),
                },
                None => None,
            };
            match gateway.create_product(&draft, photo).await {
                Ok(()) => {
                    send(ui_tx, UiEvent::Info("Product created".to_string()));
                    send(ui_tx, UiEvent::ProductsRefreshNeeded);
                }
                Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
            }
        }
        BackendCommand::EditProduct { id, draft, photo } => {
            let photo = match photo {
                Some(path) => match read_upload(&path).await {
                    Ok(file) => Some(file),
                    Err(err) => return validation_error(ui_tx, err),
                },
                None => None,
            };
            match gateway.edit_product(&id, &draft, photo).await {
                Ok(()) => {
                    send(ui_tx, UiEvent::Info("Product updated".to_string()));
                    send(ui_tx, UiEvent::ProductsRefreshNeeded);
                }
                Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
            }
        }
        BackendCommand::DeleteProduct { id } => match gateway.delete_product(&id).await {
            Ok(()) => {
                send(ui_tx, UiEvent::Info("Product deleted".to_string()));
                send(ui_tx, UiEvent::ProductsRefreshNeeded);
            }
            Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
        },
        BackendCommand::FetchCategoryOptions => match gateway.product_categories().await {
            Ok(categories) => send(ui_tx, UiEvent::CategoryOptionsLoaded(categories)),
            Err(err) => report(ui_tx, UiErrorContext::General, err),
        },

        BackendCommand::FetchCategories { page } => match gateway.categories(page).await {
            Ok(categories) => send(ui_tx, UiEvent::CategoriesLoaded(categories)),
            Err(err) => report(ui_tx, UiErrorContext::General, err),
        },
        BackendCommand::CreateCategory { name, image } => {
            let image = match image {
                Some(path) => match read_upload(&path).await {
                    Ok(file) => Some(file),
                    Err(err) => return validation_error(ui_tx, err),
                },
                None => None,
            };
            match gateway.create_category(&name, image).await {
                Ok(()) => {
                    send(ui_tx, UiEvent::Info("Category created".to_string()));
                    send(ui_tx, UiEvent::CategoriesRefreshNeeded);
                }
                Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
            }
        }
        BackendCommand::EditCategory { id, name } => {
            match gateway.edit_category(&id, &name).await {
                Ok(()) => {
                    send(ui_tx, UiEvent::Info("Category updated".to_string()));
                    send(ui_tx, UiEvent::CategoriesRefreshNeeded);
                }
                Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
            }
        }
        BackendCommand::DeleteCategory { id } => match gateway.delete_category(&id).await {
            Ok(()) => {
                send(ui_tx, UiEvent::Info("Category deleted".to_string()));
                send(ui_tx, UiEvent::CategoriesRefreshNeeded);
            }
            Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
        },

        BackendCommand::FetchInventory { page } => match gateway.inventory(page).await {
            Ok(items) => send(ui_tx, UiEvent::InventoryLoaded(items)),
            Err(err) => report(ui_tx, UiErrorContext::General, err),
        },
        BackendCommand::CreateInventoryItem { draft } => {
            match gateway.create_inventory_item(&draft).await {
                Ok(()) => {
                    send(ui_tx, UiEvent::Info("Inventory item created".to_string()));
                    send(ui_tx, UiEvent::InventoryRefreshNeeded);
                }
                Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
            }
        }
        BackendCommand::EditInventoryItem { id, draft } => {
            match gateway.edit_inventory_item(&id, &draft).await {
                Ok(()) => {
                    send(ui_tx, UiEvent::Info("Inventory item updated".to_string()));
                    send(ui_tx, UiEvent::InventoryRefreshNeeded);
                }
                Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
            }
        }
        BackendCommand::DeleteInventoryItem { id } => {
            match gateway.delete_inventory_item(&id).await {
                Ok(()) => {
                    send(ui_tx, UiEvent::Info("Inventory item deleted".to_string()));
                    send(ui_tx, UiEvent::InventoryRefreshNeeded);
                }
                Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
            }
        }

        BackendCommand::FetchStaffUsers => match gateway.staff_users().await {
            Ok(users) => send(ui_tx, UiEvent::StaffUsersLoaded(users.users)),
            Err(err) => report(ui_tx, UiErrorContext::General, err),
        },
        BackendCommand::CreateStaffUser { draft } => {
            match gateway.create_staff_user(&draft).await {
                Ok(()) => {
                    send(ui_tx, UiEvent::Info("User created".to_string()));
                    send(ui_tx, UiEvent::StaffUsersRefreshNeeded);
                }
                Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
            }
        }
        BackendCommand::EditStaffUser { id, draft } => {
            match gateway.edit_staff_user(&id, &draft).await {
                Ok(()) => {
                    send(ui_tx, UiEvent::Info("User updated".to_string()));
                    send(ui_tx, UiEvent::StaffUsersRefreshNeeded);
                }
                Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
            }
        }
        BackendCommand::ToggleStaffUserStatus { id } => {
            match gateway.toggle_staff_user_status(&id).await {
                Ok(()) => {
                    send(ui_tx, UiEvent::Info("User status updated".to_string()));
                    send(ui_tx, UiEvent::StaffUsersRefreshNeeded);
                }
                Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
            }
        }
        BackendCommand::SetStaffPages { id, pages } => {
            match gateway.set_staff_pages(&id, &pages).await {
                Ok(()) => send(ui_tx, UiEvent::StaffUsersRefreshNeeded),
                Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
            }
        }
        BackendCommand::DeleteStaffUser { id } => match gateway.delete_staff_user(&id).await {
            Ok(()) => {
                send(ui_tx, UiEvent::Info("User deleted".to_string()));
                send(ui_tx, UiEvent::StaffUsersRefreshNeeded);
            }
            Err(err) => report(ui_tx, UiErrorContext::Mutation, err),
        },

        BackendCommand::FetchReport { stage } => match gateway.orders_report(&stage).await {
            Ok(summary) => send(ui_tx, UiEvent::ReportLoaded(summary)),
            Err(err) => report(ui_tx, UiErrorContext::General, err),
        },
        BackendCommand::FetchImagePreview { url } => {
            match gateway.fetch_blob(&blob_path(&url)).await {
                Ok(bytes) => match decode_preview(&bytes) {
                    Ok(image) => send(ui_tx, UiEvent::ImagePreviewLoaded { url, image }),
                    Err(reason) => send(ui_tx, UiEvent::ImagePreviewFailed { url, reason }),
                },
                Err(err) => {
                    if matches!(err, GatewayError::SessionExpired { .. }) {
                        return;
                    }
                    send(
                        ui_tx,
                        UiEvent::ImagePreviewFailed {
                            url,
                            reason: err.to_string(),
                        },
                    );
                }
            }
        }
    }
}
