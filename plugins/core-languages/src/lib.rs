//! Built-in language support for Scribe.
//!
//! Registers the languages and file types the editor knows out of the box, a
//! "go to definition" provider for Rust sources and the default activity-bar
//! and side-bar views.
mod navigation;
mod views;

use std::sync::Arc;

use scribe_core::extension::{CachedViewProvider, FileType, Language};
use scribe_core::plugin_system::{Plugin, PluginContext, PluginError, PluginInfo};

pub use navigation::RustDefinitionProvider;
pub use views::PanelView;

pub const PLUGIN_ID: &str = "core-languages";

/// Language id, display name and recognized extensions
const LANGUAGES: &[(&str, &str, &[&str])] = &[
    ("xml", "XML", &["xml", "xsd", "xsl", "svg"]),
    ("json", "JSON", &["json"]),
    ("rust", "Rust", &["rs"]),
    ("toml", "TOML", &["toml"]),
    ("properties", "Properties", &["properties"]),
    ("markdown", "Markdown", &["md", "markdown"]),
];

/// Binary formats recognized without a language
const BINARY_TYPES: &[(&str, &str, &[&str])] = &[
    ("PNG", "PNG image", &["png"]),
    ("JPEG", "JPEG image", &["jpg", "jpeg"]),
    ("Archive", "Zip archive", &["zip", "jar"]),
];

pub struct CoreLanguagesPlugin {
    info: PluginInfo,
}

impl CoreLanguagesPlugin {
    pub fn new() -> Self {
        Self {
            info: PluginInfo::new(
                PLUGIN_ID,
                "Core Languages",
                scribe_core::semver::Version::new(0, 1, 0),
            ),
        }
    }

    pub fn shared() -> Arc<dyn Plugin> {
        Arc::new(Self::new())
    }
}

impl Default for CoreLanguagesPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for CoreLanguagesPlugin {
    fn info(&self) -> &PluginInfo {
        &self.info
    }

    fn activate(&self, ctx: &mut PluginContext) -> Result<(), PluginError> {
        for (id, display_name, extensions) in LANGUAGES {
            let language = ctx.register_language(Language::new(*id).with_display_name(*display_name))?;
            ctx.register_file_type(
                FileType::for_language(language, extensions.iter())
                    .with_description(format!("{} source", display_name))
                    .with_icon(format!("icons/{}.svg", id)),
            )?;
        }

        for (name, description, extensions) in BINARY_TYPES {
            ctx.register_file_type(
                FileType::new(*name, extensions.iter())
                    .binary()
                    .with_description(*description),
            )?;
        }

        ctx.register_navigation_provider(Arc::new(RustDefinitionProvider::new()))?;

        // Views are decoration; a label taken by another plugin is not an error
        if !ctx.add_activity_bar_item("Explorer", Arc::new(CachedViewProvider::new(|| PanelView::build("Explorer")))) {
            log::warn!("Activity bar item 'Explorer' already provided by another plugin");
        }
        if !ctx.add_side_bar_view("Outline", Arc::new(CachedViewProvider::new(|| PanelView::build("Outline")))) {
            log::warn!("Side bar view 'Outline' already provided by another plugin");
        }

        log::info!(
            "{} registered {} language(s) and {} file type(s)",
            PLUGIN_ID,
            LANGUAGES.len(),
            LANGUAGES.len() + BINARY_TYPES.len()
        );
        Ok(())
    }

    fn deactivate(&self) -> Result<(), PluginError> {
        log::info!("Shutting down {}", PLUGIN_ID);
        Ok(())
    }
}
