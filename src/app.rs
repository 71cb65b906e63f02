use std::fmt::Write;
use tracing::{info, warn};

use crate::api::ProductApi;
use crate::models::{Product, ProductDraft};
use crate::operator::Operator;
use crate::views::{FormEvent, ProductForm, ProductTable, TableAction};

pub const TITLE: &str = "Product Admin";
pub const LOADING_TEXT: &str = "Loading...";

/// Everything currently on screen.
#[derive(Debug, Default, Clone)]
pub struct AdminState {
    pub products: Vec<Product>,
    pub loading: bool,
    pub last_error: Option<String>,
    pub form_visible: bool,
    /// `None` while the form is in create mode.
    pub editing_target: Option<Product>,
}

pub struct AdminApp<A> {
    api: A,
    state: AdminState,
    form: ProductForm,
    mounted: bool,
}

impl<A: ProductApi> AdminApp<A> {
    pub fn new(api: A) -> Self {
        AdminApp {
            api,
            state: AdminState::default(),
            form: ProductForm::new(),
            mounted: false,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &AdminState {
        &self.state
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProductForm {
        &mut self.form
    }

    pub fn table(&self) -> ProductTable<'_> {
        ProductTable::new(&self.state.products)
    }

    /// Initial load. Only the first call reaches the backend.
    pub async fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.reload().await;
    }

    pub async fn reload(&mut self) {
        self.state.loading = true;
        self.state.last_error = None;

        match self.api.list().await {
            Ok(products) => {
                info!(count = products.len(), "product list reloaded");
                self.state.products = products;
            }
            Err(e) => {
                warn!(error = %e, "product list reload failed");
                self.state.last_error = Some(e.to_string());
            }
        }

        self.state.loading = false;
    }

    pub fn open_create(&mut self) {
        self.state.editing_target = None;
        self.state.form_visible = true;
        self.sync_form();
    }

    pub fn open_edit(&mut self, product: Product) {
        self.state.editing_target = Some(product);
        self.state.form_visible = true;
        self.sync_form();
    }

    pub fn cancel(&mut self) {
        self.close_form();
    }

    /// Create or update depending on the form mode, then reload. On failure
    /// the form stays open with its values and the operator is alerted.
    pub async fn submit(&mut self, draft: ProductDraft, operator: &mut dyn Operator) {
        let result = match &self.state.editing_target {
            Some(target) => {
                info!(id = target.id, "updating product");
                self.api.update(target.id, &draft).await
            }
            None => {
                info!(name = %draft.name, "creating product");
                self.api.create(&draft).await
            }
        };

        match result {
            Ok(_) => {
                self.close_form();
                self.reload().await;
            }
            Err(e) => operator.alert(&e.to_string()),
        }
    }

    /// Deletes a product the operator already confirmed through the table.
    pub async fn delete(&mut self, id: i64, operator: &mut dyn Operator) {
        info!(id, "deleting product");
        match self.api.delete(id).await {
            Ok(()) => self.reload().await,
            Err(e) => operator.alert(&e.to_string()),
        }
    }

    pub async fn handle_table(&mut self, action: TableAction, operator: &mut dyn Operator) {
        match action {
            TableAction::Edit(product) => self.open_edit(product),
            TableAction::Delete(id) => self.delete(id, operator).await,
        }
    }

    pub async fn handle_form(&mut self, event: FormEvent, operator: &mut dyn Operator) {
        match event {
            FormEvent::Submit(draft) => self.submit(draft, operator).await,
            FormEvent::Cancel => self.cancel(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "== {} ==", TITLE);
        let _ = writeln!(out, "[add] new product   [refresh] reload   [edit <id>]   [delete <id>]   [quit]");
        if let Some(error) = &self.state.last_error {
            let _ = writeln!(out, "Error: {}", error);
        }
        if self.state.loading {
            let _ = writeln!(out, "{}", LOADING_TEXT);
        } else {
            out.push_str(&self.table().render());
        }
        if let Some(form) = self.form.render() {
            out.push('\n');
            out.push_str(&form);
        }
        out
    }

    fn close_form(&mut self) {
        self.state.form_visible = false;
        self.state.editing_target = None;
        self.sync_form();
    }

    fn sync_form(&mut self) {
        self.form
            .sync(self.state.form_visible, self.state.editing_target.as_ref());
    }
}
