//! SDK entry points and builder for composing the network explorer app.

use bevy::prelude::*;

use crate::camera::camera_plugin;
use crate::config;
use crate::content::{
    content_plugin, ContentFetcher, ContentRecorder, FetcherResource, FixtureFetcher,
    SheetsConfig, SheetsFetcher,
};
use crate::pages::{pages_plugin, Page};
use crate::scene::interaction_plugin;
use crate::ui::{ui_plugin, UiOptions};

/// Builder for constructing the explorer app with a chosen content source and UI.
pub struct NetworkExplorerBuilder {
    content_config: Option<SheetsConfig>,
    fetcher: Option<Box<dyn ContentFetcher>>,
    initial_page: Page,
    window_title: String,
    window_resolution: (f32, f32),
    clear_color: Color,
    ui: UiOptions,
}

impl Default for NetworkExplorerBuilder {
    fn default() -> Self {
        Self {
            content_config: None,
            fetcher: None,
            initial_page: Page::default(),
            window_title: "Jaringan".to_string(),
            window_resolution: (1280.0, 720.0),
            clear_color: Color::srgb(0.05, 0.05, 0.08),
            ui: UiOptions::default(),
        }
    }
}

impl NetworkExplorerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit Sheets configuration instead of reading the environment.
    pub fn content_config(mut self, config: SheetsConfig) -> Self {
        self.content_config = Some(config);
        self
    }

    /// Provide a custom content source. Takes precedence over any Sheets config.
    pub fn fetcher(mut self, fetcher: impl ContentFetcher) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    pub fn initial_page(mut self, page: Page) -> Self {
        self.initial_page = page;
        self
    }

    pub fn window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn window_resolution(mut self, width: f32, height: f32) -> Self {
        self.window_resolution = (width, height);
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn disable_nav_bar(mut self) -> Self {
        self.ui.nav_bar = false;
        self
    }

    pub fn disable_loading_indicator(mut self) -> Self {
        self.ui.loading_indicator = false;
        self
    }

    /// Resolves the content source: explicit fetcher, then `CONTENT_FIXTURE`,
    /// then Sheets with the given or environment config.
    fn resolve_fetcher(
        fetcher: Option<Box<dyn ContentFetcher>>,
        content_config: Option<SheetsConfig>,
    ) -> Box<dyn ContentFetcher> {
        if let Some(fetcher) = fetcher {
            return fetcher;
        }
        if let Some(path) = config::content_fixture() {
            eprintln!("jaringan: replaying content from {}", path.display());
            return Box::new(FixtureFetcher { path });
        }
        let config = content_config.unwrap_or_else(config::content_config);
        Box::new(SheetsFetcher::new(config))
    }

    /// Build the Bevy app with the selected content source and plugins.
    pub fn build(self) -> App {
        let fetcher = Self::resolve_fetcher(self.fetcher, self.content_config);

        let mut app = App::new();
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: self.window_title,
                resolution: self.window_resolution.into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(self.clear_color))
        .insert_resource(FetcherResource(fetcher))
        .insert_resource(self.ui)
        .insert_state(self.initial_page);

        if let Some(path) = config::content_record() {
            app.insert_resource(ContentRecorder { path });
        }

        app.add_plugins((
            content_plugin,
            camera_plugin,
            interaction_plugin,
            pages_plugin,
            ui_plugin,
        ));

        app
    }
}
