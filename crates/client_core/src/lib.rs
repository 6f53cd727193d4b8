//! HTTP gateway for the operations backend.
//!
//! Every request goes through one pipeline: pick a credential slot from the
//! request path, attach the bearer token if the slot is populated, send, and
//! intercept authentication failures centrally. A 401 on a non-login path
//! clears the owning slot and redirects to that slot's login entry exactly
//! once; a 401 on a login path propagates to the caller so the login screen
//! can show a local error instead of bouncing the user away. Every other
//! error status surfaces unchanged as an API rejection.

use std::sync::Arc;

use reqwest::{multipart, Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

use shared::{
    domain::{CategoryId, InventoryItemId, LeadId, OrderId, ProductId, StaffId, StaffRole, TaskId},
    error::{ApiError, ApiException},
    protocol::{
        AssignableUsers, CategoriesPage, Category, CategoryList, DesignOrderDetails, DesignsPage,
        InventoryDraft, InventoryPage, Lead, LeadDraft, LeadsForOrder, LeadsPage, LoginResponse,
        OrderDetails, OrdersPage, OrdersReport, PreorderDetails, PrintJobsPage, PrintOrderDetails,
        Product, ProductDraft, ProductsPage, ShippingOrderDetails, ShippingPage, StaffUserDraft,
        StaffUsers, Task, TaskDraft, TasksPage,
    },
};

pub mod claims;
pub mod session;

pub use claims::decode_role_claim;
pub use session::{
    CredentialScope, FileSessionStore, LoginNavigator, MemorySessionStore, NoopNavigator,
    RequestAuth, SessionStore, ADMIN_TOKEN_KEY, GENERAL_TOKEN_KEY,
};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to encode request payload: {0}")]
    Encode(#[from] serde_json::Error),
    /// Backend rejection with its own message body: validation failures,
    /// business-rule refusals, failed sign-ins.
    #[error(transparent)]
    Api(#[from] ApiException),
    #[error("{scope:?} session expired")]
    SessionExpired { scope: CredentialScope },
}

/// A blob download plus the filename the backend suggested for it.
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// File staged for a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Everything needed to place an order from a lead.
#[derive(Debug, Clone)]
pub struct PlaceOrderRequest {
    pub order_id: String,
    pub user_id: StaffId,
    pub lead_id: LeadId,
    pub address: String,
    pub product_ids: Vec<ProductId>,
    pub images: Vec<UploadFile>,
}

pub struct ApiGateway {
    http: Client,
    base_url: Url,
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn LoginNavigator>,
}

impl ApiGateway {
    pub fn new(
        base_url: Url,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn LoginNavigator>,
    ) -> Self {
        Self {
            http: Client::new(),
            base_url,
            store,
            navigator,
        }
    }

    /// Role claim of the current general session, if one is stored and the
    /// token is readable. A menu hint only.
    pub fn session_role(&self) -> Option<StaffRole> {
        self.store
            .token(CredentialScope::General)
            .as_deref()
            .and_then(decode_role_claim)
    }

    pub fn has_session(&self, scope: CredentialScope) -> bool {
        self.store.token(scope).is_some()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    fn authorize(&self, path: &str, builder: RequestBuilder) -> RequestBuilder {
        match RequestAuth::for_path(path) {
            RequestAuth::Unauthenticated => builder,
            RequestAuth::Scoped(scope) => match self.store.token(scope) {
                Some(token) => builder.bearer_auth(token),
                None => builder,
            },
        }
    }

    async fn execute(
        &self,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<Response, GatewayError> {
        let response = self.authorize(path, builder).send().await?;
        self.intercept(path, response).await
    }

    async fn intercept(&self, path: &str, response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            if session::is_login_path(path) {
                // A failed sign-in must stay on the login screen.
                return Err(ApiException::new(
                    status.as_u16(),
                    read_error_message(response).await,
                )
                .into());
            }
            let scope = match RequestAuth::for_path(path) {
                RequestAuth::Scoped(scope) => scope,
                RequestAuth::Unauthenticated => CredentialScope::General,
            };
            warn!(
                path,
                scope = scope.label(),
                login_entry = scope.login_entry(),
                "unauthorized response, ending session"
            );
            self.store.clear(scope);
            self.navigator.redirect_to_login(scope);
            return Err(GatewayError::SessionExpired { scope });
        }
        if !status.is_success() {
            return Err(ApiException::new(
                status.as_u16(),
                read_error_message(response).await,
            )
            .into());
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let response = self.execute(path, self.http.get(self.endpoint(path))).await?;
        Ok(response.json().await?)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        let response = self
            .execute(path, self.http.post(self.endpoint(path)).json(body))
            .await?;
        Ok(response.json().await?)
    }

    async fn put_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), GatewayError> {
        self.execute(path, self.http.put(self.endpoint(path)).json(body))
            .await?;
        Ok(())
    }

    async fn put_empty(&self, path: &str) -> Result<(), GatewayError> {
        self.execute(path, self.http.put(self.endpoint(path))).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), GatewayError> {
        self.execute(path, self.http.delete(self.endpoint(path)))
            .await?;
        Ok(())
    }

    async fn post_multipart(&self, path: &str, form: multipart::Form) -> Result<(), GatewayError> {
        self.execute(path, self.http.post(self.endpoint(path)).multipart(form))
            .await?;
        Ok(())
    }

    async fn download(&self, path: &str, fallback_name: &str) -> Result<DownloadedFile, GatewayError> {
        let response = self.execute(path, self.http.get(self.endpoint(path))).await?;
        let filename = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(content_disposition_filename)
            .unwrap_or_else(|| fallback_name.to_string());
        let bytes = response.bytes().await?.to_vec();
        Ok(DownloadedFile { filename, bytes })
    }

    // ---------- sessions ----------

    pub async fn login(&self, email: &str, password: &str) -> Result<(), GatewayError> {
        let path = session::GENERAL_LOGIN_PATH;
        let body = serde_json::json!({ "email": email, "password": password });
        let response = self
            .execute(path, self.http.post(self.endpoint(path)).json(&body))
            .await?;
        let login: LoginResponse = response.json().await?;
        self.store.set_token(CredentialScope::General, &login.token);
        info!("general session established");
        Ok(())
    }

    pub async fn admin_login(&self, phone: &str, password: &str) -> Result<(), GatewayError> {
        let path = session::ADMIN_LOGIN_PATH;
        let body = serde_json::json!({ "phone": phone, "password": password });
        let response = self
            .execute(path, self.http.post(self.endpoint(path)).json(&body))
            .await?;
        let login: LoginResponse = response.json().await?;
        self.store.set_token(CredentialScope::Admin, &login.token);
        info!("admin session established");
        Ok(())
    }

    pub fn sign_out(&self, scope: CredentialScope) {
        self.store.clear(scope);
        info!(scope = scope.label(), "session cleared by sign-out");
        self.navigator.redirect_to_login(scope);
    }

    // ---------- leads ----------

    pub async fn leads(&self, page: u32, filter: &str) -> Result<LeadsPage, GatewayError> {
        self.get_json(&format!(
            "/api/v1/leads/getleads?page={page}&limit=10&filter={filter}"
        ))
        .await
    }

    pub async fn lead(&self, id: &LeadId) -> Result<Lead, GatewayError> {
        #[derive(serde::Deserialize)]
        struct LeadEnvelope {
            lead: Lead,
        }
        let envelope: LeadEnvelope = self.get_json(&format!("/api/v1/leads/getlead/{id}")).await?;
        Ok(envelope.lead)
    }

    pub async fn create_lead(&self, draft: &LeadDraft) -> Result<(), GatewayError> {
        let path = "/api/v1/leads/createlead";
        self.execute(path, self.http.post(self.endpoint(path)).json(draft))
            .await?;
        info!(lead = %draft.fullname, "lead created");
        Ok(())
    }

    pub async fn edit_lead(&self, id: &LeadId, draft: &LeadDraft) -> Result<(), GatewayError> {
        self.put_unit(&format!("/api/v1/leads/editlead/{id}"), draft).await
    }

    pub async fn delete_lead(&self, id: &LeadId) -> Result<(), GatewayError> {
        self.delete(&format!("/api/v1/leads/deletelead/{id}")).await
    }

    /// Lead and catalog snapshot the backend assembles before an order is
    /// placed from a lead.
    pub async fn preorder_details(&self, lead_id: &LeadId) -> Result<PreorderDetails, GatewayError> {
        let path = format!("/api/v1/orders/preorderdetails/{lead_id}");
        let response = self.execute(&path, self.http.post(self.endpoint(&path))).await?;
        Ok(response.json().await?)
    }

    pub async fn place_order(&self, request: PlaceOrderRequest) -> Result<(), GatewayError> {
        let form = order_form(&request)?;
        self.post_multipart("/api/v1/orders/createorder", form).await?;
        info!(order_id = %request.order_id, "order placed from lead");
        Ok(())
    }

    // ---------- orders ----------

    pub async fn orders(&self, page: u32, filter: &str) -> Result<OrdersPage, GatewayError> {
        let path = format!("/api/v1/orders/getorders?page={page}&limit=10&filter={filter}");
        let response = self.execute(&path, self.http.post(self.endpoint(&path))).await?;
        Ok(response.json().await?)
    }

    pub async fn order_details(&self, id: &OrderId) -> Result<OrderDetails, GatewayError> {
        self.get_json(&format!("/api/v1/orders/vieworderdetails/{id}")).await
    }

    pub async fn assignable_users(&self) -> Result<AssignableUsers, GatewayError> {
        self.get_json("/api/v1/orders/getusers").await
    }

    pub async fn assign_order(
        &self,
        order_db_id: &OrderId,
        user_id: &StaffId,
        role: &str,
    ) -> Result<(), GatewayError> {
        let path = "/api/v1/orders/assignorder";
        let builder = self.http.get(self.endpoint(path)).query(&[
            ("user_id", user_id.0.as_str()),
            ("order_id", order_db_id.0.as_str()),
            ("role", role),
        ]);
        self.execute(path, builder).await?;
        info!(order_id = %order_db_id, user_id = %user_id, role, "order assigned");
        Ok(())
    }

    pub async fn approve_order(&self, order_id: &str) -> Result<(), GatewayError> {
        self.put_empty(&format!("/api/v1/orders/approveorder/{order_id}")).await
    }

    pub async fn reject_design(&self, order_id: &str) -> Result<(), GatewayError> {
        self.put_empty(&format!("/api/v1/orders/reject-design/{order_id}")).await
    }

    pub async fn download_designs(&self, order_id: &str) -> Result<DownloadedFile, GatewayError> {
        self.download(
            &format!("/api/v1/orders/download-designs/{order_id}"),
            &format!("{order_id}-designs.zip"),
        )
        .await
    }

    pub async fn upload_bill(
        &self,
        order_id: &str,
        is_one_payment: bool,
        bill1: UploadFile,
        bill2: Option<UploadFile>,
    ) -> Result<(), GatewayError> {
        let mut form = multipart::Form::new()
            .text("order_id", order_id.to_string())
            .text("is_one_payment", is_one_payment.to_string())
            .part("bill1", file_part(bill1)?);
        if let Some(bill2) = bill2 {
            form = form.part("bill2", file_part(bill2)?);
        }
        self.post_multipart("/api/v1/orders/upload-bill", form).await?;
        info!(order_id, "bill uploaded");
        Ok(())
    }

    pub async fn leads_for_order(&self) -> Result<LeadsForOrder, GatewayError> {
        self.get_json("/api/v1/orders/getleadsfororder").await
    }

    pub async fn place_order_from_orders(
        &self,
        request: PlaceOrderRequest,
    ) -> Result<(), GatewayError> {
        let form = order_form(&request)?;
        self.post_multipart("/api/v1/orders/createorderfromallorder", form)
            .await?;
        info!(order_id = %request.order_id, "order placed from orders page");
        Ok(())
    }

    // ---------- tasks ----------

    pub async fn tasks(&self, page: u32, filter: &str) -> Result<TasksPage, GatewayError> {
        self.get_json(&format!(
            "/api/v1/tasks/gettasks?filter={filter}&page={page}&limit=10"
        ))
        .await
    }

    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task, GatewayError> {
        self.post_json("/api/v1/tasks/createtask", draft).await
    }

    pub async fn edit_task(&self, id: &TaskId, draft: &TaskDraft) -> Result<(), GatewayError> {
        self.put_unit(&format!("/api/v1/tasks/edittask/{id}"), draft).await
    }

    pub async fn delete_task(&self, id: &TaskId) -> Result<(), GatewayError> {
        self.delete(&format!("/api/v1/tasks/deletetask/{id}")).await
    }

    // ---------- designing ----------

    pub async fn designs(
        &self,
        page: u32,
        filter: &str,
        search: &str,
    ) -> Result<DesignsPage, GatewayError> {
        let path = "/api/v1/designs/getdesigns";
        let builder = self.http.get(self.endpoint(path)).query(&[
            ("filter", filter.to_string()),
            ("search", search.to_string()),
            ("page", page.to_string()),
        ]);
        let response = self.execute(path, builder).await?;
        Ok(response.json().await?)
    }

    pub async fn design_order(&self, id: &OrderId) -> Result<DesignOrderDetails, GatewayError> {
        self.get_json(&format!("/api/v1/designs/viewdesignorder/{id}")).await
    }

    pub async fn submit_designs(
        &self,
        order_id: &str,
        images: Vec<UploadFile>,
    ) -> Result<(), GatewayError> {
        let mut form = multipart::Form::new();
        for image in images {
            form = form.part("design_images", file_part(image)?);
        }
        self.post_multipart(&format!("/api/v1/designs/submit-designs/{order_id}"), form)
            .await?;
        info!(order_id, "designs submitted");
        Ok(())
    }

    pub async fn download_designer_bundle(
        &self,
        id: &OrderId,
    ) -> Result<DownloadedFile, GatewayError> {
        self.download(
            &format!("/api/v1/designs/downloadorderdesigner/{id}"),
            "designs.zip",
        )
        .await
    }

    // ---------- printing ----------

    pub async fn printer_orders(
        &self,
        page: u32,
        filter: &str,
    ) -> Result<PrintJobsPage, GatewayError> {
        let path = "/api/v1/printers/orders";
        let builder = self.http.get(self.endpoint(path)).query(&[
            ("page", page.to_string()),
            ("limit", "10".to_string()),
            ("filter", filter.to_string()),
        ]);
        let response = self.execute(path, builder).await?;
        Ok(response.json().await?)
    }

    pub async fn printer_order_detail(
        &self,
        order_id: &str,
    ) -> Result<PrintOrderDetails, GatewayError> {
        self.get_json(&format!("/api/v1/printers/orderdetail/{order_id}")).await
    }

    pub async fn download_printer_bundle(
        &self,
        order_id: &str,
    ) -> Result<DownloadedFile, GatewayError> {
        self.download(
            &format!("/api/v1/printers/downloadorderprinter/{order_id}"),
            &format!("{order_id}-print.zip"),
        )
        .await
    }

    /// Moves an assigned order into `printing_started`.
    pub async fn printer_approve_order(&self, order_id: &str) -> Result<(), GatewayError> {
        self.put_empty(&format!("/api/v1/printers/approveorder/{order_id}")).await
    }

    /// Hands a finished print over to the shipping queue.
    pub async fn printer_ship_order(&self, order_id: &str) -> Result<(), GatewayError> {
        self.put_empty(&format!("/api/v1/printers/shiporder/{order_id}")).await
    }

    // ---------- shipping ----------

    pub async fn shippings(&self, page: u32, filter: &str) -> Result<ShippingPage, GatewayError> {
        let path = "/api/v1/shipping/getshippings";
        let builder = self.http.get(self.endpoint(path)).query(&[
            ("page", page.to_string()),
            ("limit", "10".to_string()),
            ("filter", filter.to_string()),
        ]);
        let response = self.execute(path, builder).await?;
        Ok(response.json().await?)
    }

    pub async fn shipping_order_details(
        &self,
        order_id: &str,
    ) -> Result<ShippingOrderDetails, GatewayError> {
        self.get_json(&format!("/api/v1/shipping/vieworderdetails/{order_id}")).await
    }

    pub async fn update_shipping_status(
        &self,
        order_id: &str,
        status: &str,
    ) -> Result<(), GatewayError> {
        let body = serde_json::json!({ "status": status });
        self.put_unit(&format!("/api/v1/shipping/update-status/{order_id}"), &body)
            .await?;
        info!(order_id, status, "shipping status updated");
        Ok(())
    }

    pub async fn upload_courier_slip(
        &self,
        order_id: &str,
        file: UploadFile,
    ) -> Result<(), GatewayError> {
        let form = multipart::Form::new().part("file", file_part(file)?);
        self.post_multipart(&format!("/api/v1/shipping/upload-courier/{order_id}"), form)
            .await?;
        info!(order_id, "courier slip uploaded");
        Ok(())
    }

    // ---------- catalog (admin scope by path shape) ----------

    pub async fn products(&self, page: u32) -> Result<ProductsPage, GatewayError> {
        self.get_json(&format!("/api/v1/products/getproducts?page={page}&limit=10"))
            .await
    }

    pub async fn product(&self, id: &ProductId) -> Result<Product, GatewayError> {
        self.get_json(&format!("/api/v1/products/getproduct/{id}")).await
    }

    pub async fn product_categories(&self) -> Result<Vec<Category>, GatewayError> {
        let list: CategoryList = self.get_json("/api/v1/products/loadcategories").await?;
        Ok(list.categories)
    }

    pub async fn create_product(
        &self,
        draft: &ProductDraft,
        photo: Option<UploadFile>,
    ) -> Result<(), GatewayError> {
        let form = product_form(draft, photo)?;
        self.post_multipart("/api/v1/products/createproduct", form).await?;
        info!(product = %draft.product_name, "product created");
        Ok(())
    }

    pub async fn edit_product(
        &self,
        id: &ProductId,
        draft: &ProductDraft,
        photo: Option<UploadFile>,
    ) -> Result<(), GatewayError> {
        let path = format!("/api/v1/products/editproduct/{id}");
        let form = product_form(draft, photo)?;
        self.execute(&path, self.http.put(self.endpoint(&path)).multipart(form))
            .await?;
        Ok(())
    }

    pub async fn delete_product(&self, id: &ProductId) -> Result<(), GatewayError> {
        self.delete(&format!("/api/v1/products/deleteproduct/{id}")).await
    }

    pub async fn categories(&self, page: u32) -> Result<CategoriesPage, GatewayError> {
        self.get_json(&format!(
            "/api/v1/category/getcategories?page={page}&limit=10"
        ))
        .await
    }

    pub async fn create_category(
        &self,
        name: &str,
        image: Option<UploadFile>,
    ) -> Result<(), GatewayError> {
        let mut form = multipart::Form::new().text("category_name", name.to_string());
        if let Some(image) = image {
            form = form.part("category_image", file_part(image)?);
        }
        self.post_multipart("/api/v1/category/createcategory", form).await?;
        info!(category = name, "category created");
        Ok(())
    }

    pub async fn edit_category(&self, id: &CategoryId, name: &str) -> Result<(), GatewayError> {
        let path = format!("/api/v1/category/editcategory/{id}");
        let form = multipart::Form::new().text("category_name", name.to_string());
        self.execute(&path, self.http.put(self.endpoint(&path)).multipart(form))
            .await?;
        Ok(())
    }

    pub async fn delete_category(&self, id: &CategoryId) -> Result<(), GatewayError> {
        self.delete(&format!("/api/v1/category/deletecategory/{id}")).await
    }

    pub async fn inventory(&self, page: u32) -> Result<InventoryPage, GatewayError> {
        self.get_json(&format!(
            "/api/v1/inventory/getinventory?page={page}&limit=10"
        ))
        .await
    }

    pub async fn inventory_categories(&self) -> Result<Vec<Category>, GatewayError> {
        let list: CategoryList = self.get_json("/api/v1/inventory/loadcategories").await?;
        Ok(list.categories)
    }

    pub async fn create_inventory_item(&self, draft: &InventoryDraft) -> Result<(), GatewayError> {
        let path = "/api/v1/inventory/createinventory";
        self.execute(path, self.http.post(self.endpoint(path)).json(draft))
            .await?;
        Ok(())
    }

    pub async fn edit_inventory_item(
        &self,
        id: &InventoryItemId,
        draft: &InventoryDraft,
    ) -> Result<(), GatewayError> {
        self.put_unit(&format!("/api/v1/inventory/editinventory/{id}"), draft).await
    }

    pub async fn delete_inventory_item(&self, id: &InventoryItemId) -> Result<(), GatewayError> {
        self.delete(&format!("/api/v1/inventory/deleteinventory/{id}")).await
    }

    // ---------- admin ----------

    pub async fn staff_users(&self) -> Result<StaffUsers, GatewayError> {
        self.get_json("/api/v1/admin/users").await
    }

    pub async fn create_staff_user(&self, draft: &StaffUserDraft) -> Result<(), GatewayError> {
        let path = "/api/v1/admin/create-user";
        self.execute(path, self.http.post(self.endpoint(path)).json(draft))
            .await?;
        info!(name = %draft.name, "staff user created");
        Ok(())
    }

    pub async fn edit_staff_user(
        &self,
        id: &StaffId,
        draft: &StaffUserDraft,
    ) -> Result<(), GatewayError> {
        self.put_unit(&format!("/api/v1/admin/edit-user/{id}"), draft).await
    }

    pub async fn toggle_staff_user_status(&self, id: &StaffId) -> Result<(), GatewayError> {
        let body = serde_json::json!({ "userId": id });
        self.put_unit("/api/v1/admin/toggle-user-status", &body).await
    }

    pub async fn delete_staff_user(&self, id: &StaffId) -> Result<(), GatewayError> {
        self.delete(&format!("/api/v1/admin/user/{id}")).await
    }

    pub async fn set_staff_pages(
        &self,
        id: &StaffId,
        pages: &[String],
    ) -> Result<(), GatewayError> {
        let body = serde_json::json!({ "userId": id, "pages": pages });
        self.put_unit("/api/v1/admin/pages", &body).await
    }

    pub async fn orders_report(&self, stage: &str) -> Result<OrdersReport, GatewayError> {
        let path = if stage == "all" {
            "/api/v1/admin/reports".to_string()
        } else {
            format!("/api/v1/admin/reports?stage={stage}")
        };
        self.get_json(&path).await
    }

    /// Raw blob fetch for preview images (design previews, courier slips).
    /// Served relative to the same base address, so the path classifier and
    /// 401 policy apply as for any other request.
    pub async fn fetch_blob(&self, path: &str) -> Result<Vec<u8>, GatewayError> {
        let response = self.execute(path, self.http.get(self.endpoint(path))).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

fn order_form(request: &PlaceOrderRequest) -> Result<multipart::Form, GatewayError> {
    let product_ids: Vec<&str> = request.product_ids.iter().map(|id| id.0.as_str()).collect();
    let mut form = multipart::Form::new()
        .text("order_id", request.order_id.clone())
        .text("user_id", request.user_id.0.clone())
        .text("lead_id", request.lead_id.0.clone())
        .text("address", request.address.clone())
        .text("products", serde_json::to_string(&product_ids)?);
    for image in request.images.clone() {
        form = form.part("order_images", file_part(image)?);
    }
    Ok(form)
}

fn product_form(
    draft: &ProductDraft,
    photo: Option<UploadFile>,
) -> Result<multipart::Form, GatewayError> {
    let mut form = multipart::Form::new()
        .text("product_name", draft.product_name.clone())
        .text("sku", draft.sku.clone())
        .text("product_category", draft.product_category.0.clone())
        .text("mrp", draft.mrp.clone())
        .text("selling_price", draft.selling_price.clone())
        .text("shape", draft.shape.clone())
        .text("size", draft.size.clone())
        .text("thickness", draft.thickness.clone());
    if let Some(photo) = photo {
        form = form.part("product_photo", file_part(photo)?);
    }
    Ok(form)
}

fn file_part(file: UploadFile) -> Result<multipart::Part, GatewayError> {
    let part = multipart::Part::bytes(file.bytes).file_name(file.filename);
    match file.mime_type.as_deref() {
        Some(mime) => Ok(part.mime_str(mime)?),
        None => Ok(part),
    }
}

async fn read_error_message(response: Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str::<ApiError>(&text)
        .map(|body| body.message)
        .unwrap_or_else(|_| {
            if text.trim().is_empty() {
                status.to_string()
            } else {
                text
            }
        })
}

fn content_disposition_filename(header: &str) -> Option<String> {
    let name = header.split("filename=").nth(1)?;
    let name = name
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim_end_matches(';')
        .to_string();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod session_tests;
