use std::sync::Arc;

use scribe_core::extension::{ExtensionError, View};

/// Placeholder panel for the built-in activity-bar and side-bar entries.
/// Rendering belongs to the UI layer.
#[derive(Debug)]
pub struct PanelView {
    title: String,
}

impl PanelView {
    pub fn build(title: &str) -> Result<Arc<dyn View>, ExtensionError> {
        log::debug!("Constructing view '{}'", title);
        Ok(Arc::new(Self {
            title: title.to_string(),
        }))
    }
}

impl View for PanelView {
    fn title(&self) -> &str {
        &self.title
    }
}
