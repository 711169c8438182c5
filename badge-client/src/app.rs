//! Application wiring
//!
//! [`BadgeApp`] owns the session store and the navigator, and hands out
//! workflows that share them.

use std::path::PathBuf;
use std::sync::Arc;

use crate::api::{BadgeApi, NetworkBadgeApi};
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::generator::BadgeWorkflow;
use crate::login::LoginFlow;
use crate::presentation::{FileSurface, PresentationSurface};
use crate::profile::ProfileWorkflow;
use crate::route::{Navigator, Route};
use crate::session::{SessionStorage, SessionStore};

/// Builder for [`BadgeApp`]
pub struct BadgeAppBuilder {
    config: ClientConfig,
    data_dir: Option<PathBuf>,
    open_viewer: bool,
    api: Option<Arc<dyn BadgeApi>>,
    surface: Option<Arc<dyn PresentationSurface>>,
}

impl BadgeAppBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            data_dir: None,
            open_viewer: false,
            api: None,
            surface: None,
        }
    }

    /// Persist the session under `<dir>/session` and write badges to
    /// `<dir>/badges`
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Hand rendered badges to the desktop browser
    pub fn open_viewer(mut self, open: bool) -> Self {
        self.open_viewer = open;
        self
    }

    /// Replace the network gateway
    pub fn api(mut self, api: Arc<dyn BadgeApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Replace the file surface
    pub fn surface(mut self, surface: Arc<dyn PresentationSurface>) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn build(self) -> ClientResult<BadgeApp> {
        let session = Arc::new(match &self.data_dir {
            Some(dir) => SessionStore::with_storage(SessionStorage::new(dir.join("session"))),
            None => SessionStore::new(),
        });

        let api: Arc<dyn BadgeApi> = match self.api {
            Some(api) => api,
            None => Arc::new(NetworkBadgeApi::new(&self.config, session.view())?),
        };

        let surface: Arc<dyn PresentationSurface> = match self.surface {
            Some(surface) => surface,
            None => {
                let dir = self
                    .data_dir
                    .clone()
                    .unwrap_or_else(std::env::temp_dir)
                    .join("badges");
                Arc::new(FileSurface::new(dir).with_viewer(self.open_viewer))
            }
        };

        let navigator = Navigator::new(session.view());
        tracing::debug!(
            base_url = %self.config.base_url,
            restored = session.has_session(),
            "Badge app ready"
        );

        Ok(BadgeApp {
            config: self.config,
            session,
            navigator,
            api,
            surface,
        })
    }
}

/// Shared handles for one operator session
pub struct BadgeApp {
    config: ClientConfig,
    session: Arc<SessionStore>,
    navigator: Navigator,
    api: Arc<dyn BadgeApi>,
    surface: Arc<dyn PresentationSurface>,
}

impl BadgeApp {
    pub fn builder(config: ClientConfig) -> BadgeAppBuilder {
        BadgeAppBuilder::new(config)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Navigate by path, returning the route landed on
    pub fn navigate(&self, path: &str) -> Route {
        self.navigator.navigate(Route::parse(path))
    }

    pub fn login_flow(&self) -> LoginFlow {
        LoginFlow::new(self.api.clone(), self.session.clone(), self.navigator.clone())
    }

    pub fn badge_workflow(&self) -> BadgeWorkflow {
        BadgeWorkflow::new(
            self.api.clone(),
            self.surface.clone(),
            self.session.clone(),
            self.navigator.clone(),
            self.config.back_surface_delay,
        )
    }

    pub fn profile_workflow(&self) -> ProfileWorkflow {
        ProfileWorkflow::new(
            self.api.clone(),
            self.config.asset_base_url.clone(),
            self.config.date_locale,
        )
    }
}
