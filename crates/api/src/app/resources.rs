//! Resource handler seam and the registration table behind `/api`.

use std::collections::HashMap;
use std::sync::Arc;

use axum::response::Response;

use taskhub_routing::{Capabilities, RegistryBuilder, RegistryError, ResourceRegistry};

use crate::app::errors;
use crate::app::routes::todos::TodosResource;
use crate::app::services::AppServices;

/// CRUD capability surface implemented per resource.
///
/// Operations are synchronous: resolution already happened in the registry
/// and the stores behind the handlers do not suspend. The registry rejects
/// operations outside a handler's capability set before dispatch, so the
/// defaults only answer a handler/registration mismatch.
pub trait ResourceHandler: Send + Sync {
    /// The operations this handler supports, declared for registration.
    fn capabilities(&self) -> Capabilities;

    fn list(&self) -> Response {
        errors::method_not_allowed()
    }

    fn create(&self, _body: serde_json::Value) -> Response {
        errors::method_not_allowed()
    }

    fn retrieve(&self, _id: &str) -> Response {
        errors::method_not_allowed()
    }

    fn update(&self, _id: &str, _body: serde_json::Value, _partial: bool) -> Response {
        errors::method_not_allowed()
    }

    fn delete(&self, _id: &str) -> Response {
        errors::method_not_allowed()
    }
}

/// Immutable registration table plus the handlers serving it.
pub struct ResourceTable {
    registry: ResourceRegistry,
    handlers: HashMap<String, Arc<dyn ResourceHandler>>,
}

impl ResourceTable {
    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    pub fn handler(&self, resource: &str) -> Option<&Arc<dyn ResourceHandler>> {
        self.handlers.get(resource)
    }
}

/// Register every resource exposed by this service.
///
/// Handlers are passed in explicitly together with their capability set;
/// a `DuplicateRegistration` here is fatal and must abort startup.
pub fn build_table(services: Arc<AppServices>) -> Result<ResourceTable, RegistryError> {
    let todos: Arc<dyn ResourceHandler> = Arc::new(TodosResource::new(services));

    let mut builder = RegistryBuilder::new();
    builder.register("todos", "/api/todos", todos.capabilities())?;

    let mut handlers: HashMap<String, Arc<dyn ResourceHandler>> = HashMap::new();
    handlers.insert("todos".to_string(), todos);

    Ok(ResourceTable {
        registry: builder.build(),
        handlers,
    })
}
