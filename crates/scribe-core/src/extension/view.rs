use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::extension::error::ExtensionError;
use crate::extension::registry::{DuplicatePolicy, ExtensionRegistry, Identified};

/// A view contributed to the host's activity bar or side bar.
///
/// Rendering is the UI layer's concern; the core only hands out instances.
pub trait View: Send + Sync + fmt::Debug {
    fn title(&self) -> &str;
}

/// Produces the view behind an activity-bar or side-bar entry
pub trait ViewProvider: Send + Sync {
    fn view(&self) -> Result<Arc<dyn View>, ExtensionError>;
}

type ViewFactory = Box<dyn Fn() -> Result<Arc<dyn View>, ExtensionError> + Send + Sync>;

/// View provider that constructs its view once and hands out the same
/// instance afterwards.
///
/// Concurrent first callers block until the single construction finishes and
/// then observe its result. A failed construction is not cached, so a later
/// call runs the factory again; after the first success it never runs again.
pub struct CachedViewProvider {
    factory: ViewFactory,
    cell: OnceCell<Arc<dyn View>>,
}

impl CachedViewProvider {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn View>, ExtensionError> + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            cell: OnceCell::new(),
        }
    }

    /// Whether the view has been constructed
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl ViewProvider for CachedViewProvider {
    fn view(&self) -> Result<Arc<dyn View>, ExtensionError> {
        self.cell.get_or_try_init(|| (self.factory)()).cloned()
    }
}

impl fmt::Debug for CachedViewProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedViewProvider")
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}

/// A labelled entry in the activity bar or side bar
#[derive(Clone)]
pub struct ViewContribution {
    label: String,
    provider: Arc<dyn ViewProvider>,
}

impl ViewContribution {
    pub fn new(label: impl Into<String>, provider: Arc<dyn ViewProvider>) -> Self {
        Self {
            label: label.into(),
            provider,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn provider(&self) -> &Arc<dyn ViewProvider> {
        &self.provider
    }

    /// Resolve the view, naming this entry in a construction failure
    pub fn view(&self) -> Result<Arc<dyn View>, ExtensionError> {
        self.provider.view().map_err(|e| match e {
            ExtensionError::ViewConstruction { .. } => e,
            other => ExtensionError::ViewConstruction {
                label: self.label.clone(),
                message: other.to_string(),
            },
        })
    }
}

impl Identified for ViewContribution {
    fn id(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for ViewContribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewContribution")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Registry of view contributions keyed by label.
///
/// Views are decoration only, so a duplicate label is ignored rather than
/// rejected.
#[derive(Debug)]
pub struct ViewRegistry {
    inner: ExtensionRegistry<ViewContribution>,
}

impl ViewRegistry {
    pub fn new(kind: &'static str) -> Self {
        Self {
            inner: ExtensionRegistry::new(kind, DuplicatePolicy::Ignore),
        }
    }

    /// Add an entry. Returns `false` if the label was already taken.
    pub fn add(&self, label: impl Into<String>, provider: Arc<dyn ViewProvider>, owner: &str) -> bool {
        // An ignoring registry never reports a duplicate as an error
        self.inner
            .register(Arc::new(ViewContribution::new(label, provider)), owner)
            .unwrap_or(false)
    }

    /// Resolve the view behind `label`, `None` if no such entry exists
    pub fn view(&self, label: &str) -> Option<Result<Arc<dyn View>, ExtensionError>> {
        self.inner.get(label).map(|contribution| contribution.view())
    }

    /// Labels in registration order
    pub fn labels(&self) -> Vec<String> {
        self.inner.all().iter().map(|c| c.label().to_string()).collect()
    }
}

impl Deref for ViewRegistry {
    type Target = ExtensionRegistry<ViewContribution>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
