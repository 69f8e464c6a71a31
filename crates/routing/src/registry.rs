//! Resource registration table and request resolution.

use bitflags::bitflags;
use http::Method;
use thiserror::Error;

/// CRUD operation resolved for an inbound request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Retrieve,
    Update,
    Delete,
}

impl Operation {
    /// The capability a handler must declare to receive this operation.
    pub fn required_capability(self) -> Capabilities {
        match self {
            Operation::List => Capabilities::LIST,
            Operation::Create => Capabilities::CREATE,
            Operation::Retrieve => Capabilities::RETRIEVE,
            Operation::Update => Capabilities::UPDATE,
            Operation::Delete => Capabilities::DELETE,
        }
    }
}

bitflags! {
    /// Set of operations a resource handler supports.
    ///
    /// Declared explicitly at registration time; there is no runtime
    /// discovery of what a handler can do.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        const LIST = 1 << 0;
        const CREATE = 1 << 1;
        const RETRIEVE = 1 << 2;
        const UPDATE = 1 << 3;
        const DELETE = 1 << 4;
    }
}

impl Capabilities {
    /// Full CRUD surface.
    pub const fn crud() -> Self {
        Self::all()
    }

    /// Listing and retrieval only.
    pub const fn read_only() -> Self {
        Self::LIST.union(Self::RETRIEVE)
    }

    pub fn supports(self, operation: Operation) -> bool {
        self.contains(operation.required_capability())
    }
}

/// One entry in the registration table: a named collection, the path prefix
/// it is served under, and the operations its handler supports.
///
/// Created during router configuration; immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: String,
    base_path: String,
    capabilities: Capabilities,
}

impl Registration {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized base path: leading slash, no trailing slash.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }
}

/// Error raised while building the registration table.
///
/// Registration happens once at process start; any of these is a
/// configuration error and should abort initialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The resource name or base path is already registered.
    #[error("duplicate registration: {0}")]
    DuplicateRegistration(String),

    /// The registration itself is malformed (empty name, relative path, ...).
    #[error("invalid registration: {0}")]
    InvalidRegistration(String),
}

/// Error resolving an inbound request against the table.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// No registered prefix matches the path.
    #[error("no route matches the requested path")]
    NotFound,

    /// A prefix matches, but the method is unsupported for that path shape
    /// or absent from the resource's capability set.
    #[error("method not allowed for the matched resource")]
    MethodNotAllowed,
}

/// Successful resource resolution: which collection, which operation, and the
/// identifier segment if the path carried one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMatch<'r, 'p> {
    /// Name of the matched registration.
    pub resource: &'r str,
    pub operation: Operation,
    /// Identifier segment, borrowed from the request path. Opaque at this
    /// layer; the handler decides how to parse it.
    pub id: Option<&'p str>,
}

/// Outcome of resolving an inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'r, 'p> {
    /// The request targets a registered resource collection.
    Resource(ResourceMatch<'r, 'p>),
    /// The path lives under the administrative prefix: forward it wholesale,
    /// do not interpret it.
    Admin,
}

/// Build phase of the registration table.
///
/// `register` validates eagerly so a bad table never makes it to `build`;
/// a failed attempt leaves the table exactly as it was.
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    admin_prefix: String,
    registrations: Vec<Registration>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            admin_prefix: "/admin".to_string(),
            registrations: Vec::new(),
        }
    }

    /// Override the administrative mount prefix (default `/admin`).
    pub fn with_admin_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.admin_prefix = normalize_base_path(&prefix.into());
        self
    }

    /// Add a resource mapping.
    ///
    /// Fails with [`RegistryError::DuplicateRegistration`] if `name` or
    /// `base_path` is already registered.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        base_path: impl Into<String>,
        capabilities: Capabilities,
    ) -> Result<&mut Self, RegistryError> {
        let name = name.into();
        let base_path = base_path.into();

        if name.trim().is_empty() {
            return Err(RegistryError::InvalidRegistration(
                "resource name cannot be empty".to_string(),
            ));
        }
        if !base_path.starts_with('/') {
            return Err(RegistryError::InvalidRegistration(format!(
                "base path `{base_path}` must start with '/'"
            )));
        }

        let base_path = normalize_base_path(&base_path);
        if base_path == "/" {
            return Err(RegistryError::InvalidRegistration(
                "base path cannot be the root".to_string(),
            ));
        }

        if self.registrations.iter().any(|r| r.name == name) {
            return Err(RegistryError::DuplicateRegistration(format!(
                "resource `{name}` is already registered"
            )));
        }
        if self.registrations.iter().any(|r| r.base_path == base_path) {
            return Err(RegistryError::DuplicateRegistration(format!(
                "base path `{base_path}` is already registered"
            )));
        }

        self.registrations.push(Registration {
            name,
            base_path,
            capabilities,
        });
        Ok(self)
    }

    /// Freeze the table. Resolution order is registration order.
    pub fn build(self) -> ResourceRegistry {
        ResourceRegistry {
            admin_prefix: self.admin_prefix,
            registrations: self.registrations,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable registration table.
///
/// Holds no mutable state after construction, so concurrent lookups need no
/// locking; share it by reference (`Arc`) with the request entry point.
#[derive(Debug, Clone)]
pub struct ResourceRegistry {
    admin_prefix: String,
    registrations: Vec<Registration>,
}

impl ResourceRegistry {
    pub fn admin_prefix(&self) -> &str {
        &self.admin_prefix
    }

    /// All registrations, in registration order.
    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    /// Resolve an inbound request to an operation on a registered resource,
    /// or to the administrative mount.
    ///
    /// Pure, synchronous lookup. Longest matching base path wins; ties break
    /// to the earliest registration. Trailing slashes are ignored.
    pub fn resolve<'r, 'p>(
        &'r self,
        method: &Method,
        path: &'p str,
    ) -> Result<Resolution<'r, 'p>, RouteError> {
        let path = trim_trailing_slashes(path);

        if self.is_admin_path(path) {
            return Ok(Resolution::Admin);
        }

        let (registration, rest) = self.match_registration(path).ok_or(RouteError::NotFound)?;

        let id = match rest {
            "" => None,
            segment if !segment.contains('/') => Some(segment),
            // Deeper paths (e.g. sub-collections) are not part of the
            // resource contract.
            _ => return Err(RouteError::NotFound),
        };

        let operation = classify(method, id.is_some()).ok_or(RouteError::MethodNotAllowed)?;
        if !registration.capabilities.supports(operation) {
            return Err(RouteError::MethodNotAllowed);
        }

        Ok(Resolution::Resource(ResourceMatch {
            resource: registration.name(),
            operation,
            id,
        }))
    }

    fn is_admin_path(&self, path: &str) -> bool {
        strip_segment_prefix(path, &self.admin_prefix).is_some()
    }

    /// Longest applicable prefix wins. `>` (not `>=`) keeps the earliest
    /// registration on equal lengths.
    fn match_registration<'r, 'p>(&'r self, path: &'p str) -> Option<(&'r Registration, &'p str)> {
        let mut best: Option<(&Registration, &str)> = None;
        for registration in &self.registrations {
            let Some(rest) = strip_segment_prefix(path, &registration.base_path) else {
                continue;
            };
            let better = match best {
                Some((current, _)) => registration.base_path.len() > current.base_path.len(),
                None => true,
            };
            if better {
                best = Some((registration, rest));
            }
        }
        best
    }
}

/// Map method + path shape to an operation, REST convention:
/// collection path -> list/create; collection path + identifier ->
/// retrieve/update/delete. HEAD resolves like GET.
fn classify(method: &Method, has_id: bool) -> Option<Operation> {
    if has_id {
        if *method == Method::GET || *method == Method::HEAD {
            Some(Operation::Retrieve)
        } else if *method == Method::PUT || *method == Method::PATCH {
            Some(Operation::Update)
        } else if *method == Method::DELETE {
            Some(Operation::Delete)
        } else {
            None
        }
    } else if *method == Method::GET || *method == Method::HEAD {
        Some(Operation::List)
    } else if *method == Method::POST {
        Some(Operation::Create)
    } else {
        None
    }
}

/// Strip `base` from `path` on a path-segment boundary. Returns the remainder
/// without its leading slash, or `None` if `base` is not a segment prefix.
fn strip_segment_prefix<'p>(path: &'p str, base: &str) -> Option<&'p str> {
    let rest = path.strip_prefix(base)?;
    if rest.is_empty() {
        return Some("");
    }
    rest.strip_prefix('/')
}

fn normalize_base_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

fn trim_trailing_slashes(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}
