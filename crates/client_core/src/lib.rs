use std::sync::Arc;

use async_trait::async_trait;
use shared::{
    domain::{Product, ProductId},
    protocol::ProductDraft,
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

pub mod error;
pub mod rest;
pub mod validation;

use error::RemoteError;

const LOAD_FAILED: &str = "Erro ao carregar produtos";
const LOAD_OK: &str = "Produtos atualizados";
const CREATE_FAILED: &str = "Erro ao criar produto";
const CREATE_OK: &str = "Produto criado";
const DELETE_FAILED: &str = "Erro ao remover produto";
const DELETE_OK: &str = "Produto removido";

/// Uniform create/read/delete access to a remote resource collection.
#[async_trait]
pub trait CollectionClient: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, RemoteError>;
    async fn create(&self, draft: &ProductDraft) -> Result<Product, RemoteError>;
    async fn remove(&self, id: ProductId) -> Result<(), RemoteError>;
}

/// Yes/no gate consulted before a delete request is issued. Declining
/// means no request and no local mutation.
pub trait DeleteConfirmer: Send + Sync {
    fn confirm_delete(&self, product: &Product) -> bool;
}

/// Confirms every delete without asking. Headless and test wiring.
pub struct AlwaysConfirm;

impl DeleteConfirmer for AlwaysConfirm {
    fn confirm_delete(&self, _product: &Product) -> bool {
        true
    }
}

/// Transient user-facing notification; every applied operation terminates
/// in exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

#[derive(Default, Debug, Clone)]
pub struct CollectionState {
    pub items: Vec<Product>,
    pub loading: bool,
    pub saving: bool,
    pub last_error: Option<String>,
}

/// Raw form input as the user typed it; `price` stays a string until
/// validation parses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub in_stock: bool,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: String::new(),
            in_stock: true,
        }
    }
}

impl ProductForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// Entity accepted by the server and prepended locally.
    Created(Product),
    /// Local validation rejected the draft; no request was issued.
    Rejected(&'static str),
    /// The request was issued and failed; message already reduced for
    /// display.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Deleted,
    /// User declined the confirmation; no request was issued.
    Cancelled,
    /// Id not present locally; nothing to do.
    NotFound,
    Failed(String),
}

struct ControllerState {
    collection: CollectionState,
    refresh_generation: u64,
}

/// Mediates all mutations of the local product collection between user
/// intents, the remote collection resource, and the rendering view. The
/// view reads state only through `snapshot`.
pub struct ProductListController {
    client: Arc<dyn CollectionClient>,
    confirmer: Arc<dyn DeleteConfirmer>,
    inner: Mutex<ControllerState>,
    notices: broadcast::Sender<Notice>,
}

impl ProductListController {
    pub fn new(
        client: Arc<dyn CollectionClient>,
        confirmer: Arc<dyn DeleteConfirmer>,
    ) -> Arc<Self> {
        let (notices, _) = broadcast::channel(64);
        Arc::new(Self {
            client,
            confirmer,
            inner: Mutex::new(ControllerState {
                collection: CollectionState::default(),
                refresh_generation: 0,
            }),
            notices,
        })
    }

    /// Construct and run the single explicit initialization load.
    pub async fn start(
        client: Arc<dyn CollectionClient>,
        confirmer: Arc<dyn DeleteConfirmer>,
    ) -> Arc<Self> {
        let controller = Self::new(client, confirmer);
        controller.refresh().await;
        controller
    }

    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    pub async fn snapshot(&self) -> CollectionState {
        self.inner.lock().await.collection.clone()
    }

    fn notify_success(&self, message: impl Into<String>) {
        let _ = self.notices.send(Notice::Success(message.into()));
    }

    fn notify_error(&self, message: impl Into<String>) {
        let _ = self.notices.send(Notice::Error(message.into()));
    }

    /// Replace the collection wholesale from the remote resource. A
    /// response that resolves after a newer refresh has started is
    /// discarded so it cannot overwrite newer data.
    pub async fn refresh(&self) {
        let generation = {
            let mut guard = self.inner.lock().await;
            guard.refresh_generation += 1;
            guard.collection.loading = true;
            guard.collection.last_error = None;
            guard.refresh_generation
        };

        let result = self.client.list().await;

        let mut guard = self.inner.lock().await;
        if guard.refresh_generation != generation {
            debug!(generation, "products: discarding superseded refresh response");
            return;
        }
        guard.collection.loading = false;
        match result {
            Ok(items) => {
                info!(count = items.len(), "products: collection refreshed");
                guard.collection.items = items;
                drop(guard);
                self.notify_success(LOAD_OK);
            }
            Err(err) => {
                warn!("products: refresh failed: {err}");
                guard.collection.last_error = Some(LOAD_FAILED.to_string());
                drop(guard);
                self.notify_error(LOAD_FAILED);
            }
        }
    }

    /// Validate the form locally, then submit it. On success the created
    /// entity is prepended and the form is reset; a local rejection issues
    /// no request at all.
    pub async fn submit_create(&self, form: &mut ProductForm) -> CreateOutcome {
        {
            let mut guard = self.inner.lock().await;
            guard.collection.last_error = None;
        }

        let draft = match validation::validate_draft(&form.name, &form.price, form.in_stock) {
            Ok(draft) => draft,
            Err(message) => {
                self.notify_error(message);
                return CreateOutcome::Rejected(message);
            }
        };

        {
            let mut guard = self.inner.lock().await;
            guard.collection.saving = true;
        }

        let result = self.client.create(&draft).await;

        let mut guard = self.inner.lock().await;
        guard.collection.saving = false;
        match result {
            Ok(product) => {
                info!(id = product.id.0, "products: created");
                guard.collection.items.insert(0, product.clone());
                drop(guard);
                form.reset();
                self.notify_success(CREATE_OK);
                CreateOutcome::Created(product)
            }
            Err(err) => {
                warn!("products: create failed: {err}");
                let message = err.field_message().unwrap_or(CREATE_FAILED).to_string();
                guard.collection.last_error = Some(message.clone());
                drop(guard);
                self.notify_error(message.clone());
                CreateOutcome::Failed(message)
            }
        }
    }

    /// Delete after explicit confirmation; the local entry is removed only
    /// once the server has confirmed the removal.
    pub async fn delete_item(&self, id: ProductId) -> DeleteOutcome {
        let product = {
            let guard = self.inner.lock().await;
            guard.collection.items.iter().find(|p| p.id == id).cloned()
        };
        let Some(product) = product else {
            debug!(id = id.0, "products: delete requested for unknown id");
            return DeleteOutcome::NotFound;
        };

        if !self.confirmer.confirm_delete(&product) {
            return DeleteOutcome::Cancelled;
        }

        {
            let mut guard = self.inner.lock().await;
            guard.collection.last_error = None;
        }

        match self.client.remove(id).await {
            Ok(()) => {
                info!(id = id.0, "products: removed");
                let mut guard = self.inner.lock().await;
                guard.collection.items.retain(|p| p.id != id);
                drop(guard);
                self.notify_success(DELETE_OK);
                DeleteOutcome::Deleted
            }
            Err(err) => {
                warn!(id = id.0, "products: delete failed: {err}");
                let mut guard = self.inner.lock().await;
                guard.collection.last_error = Some(DELETE_FAILED.to_string());
                drop(guard);
                self.notify_error(DELETE_FAILED);
                DeleteOutcome::Failed(DELETE_FAILED.to_string())
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
