use async_trait::async_trait;
use std::cell::{Cell, RefCell};

use product_admin::app::LOADING_TEXT;
use product_admin::operator::ScriptedOperator;
use product_admin::views::table::EMPTY_PLACEHOLDER;
use product_admin::views::{Field, FormEvent, TableAction};
use product_admin::{AdminApp, FetchError, Operation, Product, ProductApi, ProductDraft};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    List,
    Get(i64),
    Create(ProductDraft),
    Update(i64, ProductDraft),
    Delete(i64),
}

/// In-process backend that records calls and fails the operations listed in
/// `failing`.
#[derive(Default)]
struct FakeApi {
    products: RefCell<Vec<Product>>,
    calls: RefCell<Vec<Call>>,
    failing: RefCell<Vec<Operation>>,
    next_id: Cell<i64>,
}

impl FakeApi {
    fn with_products(products: Vec<Product>) -> Self {
        let next_id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        FakeApi {
            products: RefCell::new(products),
            next_id: Cell::new(next_id),
            ..Default::default()
        }
    }

    fn fail(&self, operation: Operation) {
        self.failing.borrow_mut().push(operation);
    }

    fn heal(&self) {
        self.failing.borrow_mut().clear();
    }

    fn check(&self, operation: Operation) -> Result<(), FetchError> {
        if self.failing.borrow().contains(&operation) {
            Err(FetchError::new(operation))
        } else {
            Ok(())
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn list_calls(&self) -> usize {
        self.calls.borrow().iter().filter(|c| **c == Call::List).count()
    }
}

fn stored(id: i64, draft: &ProductDraft) -> Product {
    Product {
        id,
        name: draft.name.clone(),
        description: draft.description.clone(),
        price: draft.price,
        stock: draft.stock,
        category: draft.category.clone(),
        created_at: Some("2024-01-05T14:03:02Z".to_string()),
        updated_at: Some("2024-01-05T14:03:02Z".to_string()),
    }
}

#[async_trait(?Send)]
impl ProductApi for FakeApi {
    async fn list(&self) -> Result<Vec<Product>, FetchError> {
        self.calls.borrow_mut().push(Call::List);
        self.check(Operation::List)?;
        Ok(self.products.borrow().clone())
    }

    async fn get(&self, id: i64) -> Result<Product, FetchError> {
        self.calls.borrow_mut().push(Call::Get(id));
        self.check(Operation::Get)?;
        self.products
            .borrow()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(FetchError::new(Operation::Get))
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product, FetchError> {
        self.calls.borrow_mut().push(Call::Create(draft.clone()));
        self.check(Operation::Create)?;
        let product = stored(self.next_id.get(), draft);
        self.next_id.set(product.id + 1);
        self.products.borrow_mut().push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: i64, draft: &ProductDraft) -> Result<Product, FetchError> {
        self.calls.borrow_mut().push(Call::Update(id, draft.clone()));
        self.check(Operation::Update)?;
        let mut products = self.products.borrow_mut();
        let slot = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(FetchError::new(Operation::Update))?;
        *slot = stored(id, draft);
        Ok(slot.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), FetchError> {
        self.calls.borrow_mut().push(Call::Delete(id));
        self.check(Operation::Delete)?;
        self.products.borrow_mut().retain(|p| p.id != id);
        Ok(())
    }
}

fn draft(name: &str, price: f64) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        price,
        stock: 1,
        ..Default::default()
    }
}

fn catalog() -> Vec<Product> {
    vec![stored(1, &draft("Widget", 3.0)), stored(2, &draft("Gadget", 8.0))]
}

#[actix_web::test]
async fn starts_empty_and_loads_once() {
    let mut app = AdminApp::new(FakeApi::with_products(catalog()));
    let state = app.state();
    assert!(state.products.is_empty());
    assert!(!state.loading);
    assert!(state.last_error.is_none());
    assert!(!state.form_visible);
    assert!(state.editing_target.is_none());

    app.mount().await;
    app.mount().await;
    assert_eq!(app.api().calls(), vec![Call::List]);
    assert_eq!(app.state().products.len(), 2);
}

#[actix_web::test]
async fn empty_list_shows_placeholder_not_error() {
    let mut app = AdminApp::new(FakeApi::default());
    app.mount().await;

    let screen = app.render();
    assert!(screen.contains(EMPTY_PLACEHOLDER));
    assert!(!screen.contains("Error:"));
    assert!(!screen.contains(LOADING_TEXT));
}

#[actix_web::test]
async fn failed_reload_keeps_previous_products() {
    let mut app = AdminApp::new(FakeApi::with_products(catalog()));
    app.mount().await;
    assert_eq!(app.state().products.len(), 2);

    app.api().fail(Operation::List);
    app.reload().await;

    let state = app.state();
    assert_eq!(state.products.len(), 2);
    assert_eq!(state.last_error.as_deref(), Some("failed to fetch product list"));
    assert!(!state.loading);
    assert!(app.render().contains("Error: failed to fetch product list"));

    app.api().heal();
    app.reload().await;
    assert!(app.state().last_error.is_none());
    assert!(!app.state().loading);
}

#[actix_web::test]
async fn cancel_after_edit_leaves_everything_alone() {
    let mut app = AdminApp::new(FakeApi::with_products(catalog()));
    app.mount().await;

    let action = app.table().request_edit(1).unwrap();
    let mut operator = ScriptedOperator::agreeing();
    app.handle_table(action, &mut operator).await;
    assert!(app.state().form_visible);
    assert_eq!(app.form().draft().name, "Widget");

    app.form_mut().set_field(Field::Name, "Renamed");
    app.handle_form(FormEvent::Cancel, &mut operator).await;
    assert!(!app.state().form_visible);
    assert!(app.state().editing_target.is_none());
    assert!(app.form().render().is_none());

    app.open_create();
    assert_eq!(app.form().draft(), &ProductDraft::default());
    assert!(!app.form().is_edit());

    assert_eq!(app.api().calls(), vec![Call::List]);
    assert_eq!(app.state().products, catalog());
}

#[actix_web::test]
async fn submit_without_target_creates() {
    let mut app = AdminApp::new(FakeApi::with_products(catalog()));
    app.mount().await;
    let mut operator = ScriptedOperator::agreeing();

    app.open_create();
    app.submit(draft("Lamp", 12.0), &mut operator).await;

    assert_eq!(
        app.api().calls(),
        vec![Call::List, Call::Create(draft("Lamp", 12.0)), Call::List]
    );
    assert!(!app.state().form_visible);
    assert_eq!(app.state().products.len(), 3);
    assert!(operator.alerts.is_empty());
}

#[actix_web::test]
async fn submit_with_target_updates_that_id() {
    let mut app = AdminApp::new(FakeApi::with_products(catalog()));
    app.mount().await;
    let mut operator = ScriptedOperator::agreeing();

    let target = app.state().products[1].clone();
    app.open_edit(target);
    app.form_mut().set_field(Field::Price, "9.5");
    let event = app.form().submit().unwrap();
    app.handle_form(event, &mut operator).await;

    let calls = app.api().calls();
    assert_eq!(calls.len(), 3);
    match &calls[1] {
        Call::Update(id, body) => {
            assert_eq!(*id, 2);
            assert_eq!(body.name, "Gadget");
            assert_eq!(body.price, 9.5);
        }
        other => panic!("expected update, got {:?}", other),
    }
    assert!(!calls.iter().any(|c| matches!(c, Call::Create(_))));
    assert!(app.state().editing_target.is_none());
    assert_eq!(app.state().products[1].price, 9.5);
}

#[actix_web::test]
async fn failed_submit_keeps_form_and_alerts() {
    let mut app = AdminApp::new(FakeApi::with_products(catalog()));
    app.mount().await;
    app.api().fail(Operation::Update);
    let mut operator = ScriptedOperator::agreeing();

    let target = app.state().products[0].clone();
    app.open_edit(target.clone());
    app.form_mut().set_field(Field::Category, "Spare parts");
    let event = app.form().submit().unwrap();
    app.handle_form(event, &mut operator).await;

    assert_eq!(operator.alerts, vec!["failed to update product".to_string()]);
    assert!(app.state().form_visible);
    assert_eq!(app.state().editing_target.as_ref(), Some(&target));
    assert_eq!(app.form().draft().category, "Spare parts");
    assert_eq!(app.api().list_calls(), 1);
    assert!(app.state().last_error.is_none());
}

#[actix_web::test]
async fn declined_delete_never_reaches_the_api() {
    let mut app = AdminApp::new(FakeApi::with_products(catalog()));
    app.mount().await;
    let mut operator = ScriptedOperator::declining();

    let action = app.table().request_delete(1, &mut operator);
    assert!(action.is_none());
    assert_eq!(operator.confirmations, vec!["Delete product \"Widget\"?".to_string()]);
    assert_eq!(app.api().calls(), vec![Call::List]);
    assert_eq!(app.state().products.len(), 2);
}

#[actix_web::test]
async fn confirmed_delete_reloads() {
    let mut app = AdminApp::new(FakeApi::with_products(catalog()));
    app.mount().await;
    let mut operator = ScriptedOperator::agreeing();

    let action = app.table().request_delete(2, &mut operator).unwrap();
    assert_eq!(action, TableAction::Delete(2));
    app.handle_table(action, &mut operator).await;

    assert_eq!(app.api().calls(), vec![Call::List, Call::Delete(2), Call::List]);
    assert_eq!(app.state().products.len(), 1);
}

#[actix_web::test]
async fn failed_delete_alerts_and_leaves_list_stale() {
    let mut app = AdminApp::new(FakeApi::with_products(catalog()));
    app.mount().await;
    app.api().fail(Operation::Delete);
    let mut operator = ScriptedOperator::agreeing();

    app.delete(1, &mut operator).await;

    assert_eq!(operator.alerts, vec!["failed to delete product".to_string()]);
    assert_eq!(app.api().list_calls(), 1);
    assert_eq!(app.state().products.len(), 2);
    assert!(app.state().last_error.is_none());
}

#[actix_web::test]
async fn coerced_price_reaches_the_request() {
    let mut app = AdminApp::new(FakeApi::default());
    app.mount().await;
    let mut operator = ScriptedOperator::agreeing();

    app.open_create();
    app.form_mut().set_field(Field::Name, "Widget");
    app.form_mut().set_field(Field::Price, "abc");
    let event = app.form().submit().unwrap();
    app.handle_form(event, &mut operator).await;

    match &app.api().calls()[1] {
        Call::Create(body) => {
            assert_eq!(body.name, "Widget");
            assert_eq!(body.price, 0.0);
        }
        other => panic!("expected create, got {:?}", other),
    }
}
