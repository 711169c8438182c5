//! Badge Client - operator client for the ID badge API
//!
//! Session handling, route guarding, login, badge generation and the public
//! employee profile, over an HTTP gateway to the badge server.

pub mod api;
pub mod app;
pub mod config;
pub mod date;
pub mod error;
pub mod generator;
pub mod login;
pub mod presentation;
pub mod profile;
pub mod route;
pub mod session;
pub mod types;

pub use api::{BadgeApi, NetworkBadgeApi};
pub use app::{BadgeApp, BadgeAppBuilder};
pub use config::ClientConfig;
pub use date::DateLocale;
pub use error::{ClientError, ClientResult, FailureKind};
pub use generator::{BadgeWorkflow, GenerationError, GenerationPhase, GenerationState};
pub use login::{LoginError, LoginFlow, LoginPhase};
pub use presentation::{FileSurface, PresentationBlocked, PresentationSurface, SurfaceHandle};
pub use profile::{ProfilePhase, ProfileView, ProfileWorkflow};
pub use route::{Decision, Navigator, Protection, Route, decide};
pub use session::{SessionData, SessionStorage, SessionStore, SessionView};
pub use types::{BadgeRender, BadgeSide, GenerationTarget};

// Re-export shared types for convenience
pub use shared::client::{LoginResponse, UserInfo};
pub use shared::models::{EmployeePublicProfile, EmployeeSummary};
