//! Badge generation workflow
//!
//! Fetches badge renders for the selected employee and opens each one on
//! its own display surface. Owns the loading/error state shown to the
//! operator and the recovery path for authorization failures: clear the
//! session, then force the login surface.
//!
//! `generate_both` fetches both sides concurrently in one task. Surfaces
//! open only after both fetches succeeded: front first, then back after
//! `back_surface_delay`. A single failed side fails the whole operation and
//! nothing is opened.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use shared::models::EmployeeSummary;
use thiserror::Error;

use crate::api::BadgeApi;
use crate::error::{ClientError, FailureKind};
use crate::presentation::{PresentationBlocked, PresentationSurface, SurfaceHandle};
use crate::route::Navigator;
use crate::session::SessionStore;
use crate::types::{BadgeRender, BadgeSide, GenerationTarget};

pub const MSG_NO_EMPLOYEE: &str = "الرجاء اختيار موظف";
pub const MSG_FRONT_FAILED: &str = "فشل في توليد الوجه الأمامي للبطاقة";
pub const MSG_BACK_FAILED: &str = "فشل في توليد الوجه الخلفي للبطاقة";
pub const MSG_BOTH_FAILED: &str = "فشل في توليد البطاقات";
pub const MSG_LIST_FAILED: &str = "فشل في جلب قائمة الموظفين";
pub const MSG_POPUP_BLOCKED: &str = "الرجاء السماح بفتح النوافذ المنبثقة لعرض البطاقة";

/// Workflow-level failure, already converted at the workflow boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Local validation, no request was sent
    #[error("No employee selected")]
    NoEmployeeSelected,

    #[error("Failed to generate {target} badge ({kind})")]
    Failed {
        target: GenerationTarget,
        kind: FailureKind,
    },

    #[error("Failed to load employees ({0})")]
    ListFailed(FailureKind),

    /// The host refused a display surface
    #[error(transparent)]
    PresentationBlocked(#[from] PresentationBlocked),

    /// Session was torn down and the operator sent back to login.
    ///
    /// Carries the generate target, `None` for the employee list.
    #[error("Session is no longer valid")]
    Unauthorized(Option<GenerationTarget>),
}

impl GenerationError {
    /// Message shown to the operator
    pub fn user_message(&self) -> &'static str {
        match self {
            GenerationError::NoEmployeeSelected => MSG_NO_EMPLOYEE,
            GenerationError::Failed { target, .. }
            | GenerationError::Unauthorized(Some(target)) => match target {
                GenerationTarget::Front => MSG_FRONT_FAILED,
                GenerationTarget::Back => MSG_BACK_FAILED,
                GenerationTarget::Both => MSG_BOTH_FAILED,
            },
            GenerationError::ListFailed(_) | GenerationError::Unauthorized(None) => {
                MSG_LIST_FAILED
            }
            GenerationError::PresentationBlocked(_) => MSG_POPUP_BLOCKED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPhase {
    Idle,
    Loading,
    Error,
}

/// State visible to the operator
#[derive(Debug, Clone, Default)]
pub struct GenerationState {
    pub employees: Vec<EmployeeSummary>,
    pub selected_employee_id: Option<String>,
    pub loading: bool,
    pub error: Option<GenerationError>,
    /// Operations started and not yet settled
    in_flight: usize,
}

impl GenerationState {
    pub fn phase(&self) -> GenerationPhase {
        if self.loading {
            GenerationPhase::Loading
        } else if self.error.is_some() {
            GenerationPhase::Error
        } else {
            GenerationPhase::Idle
        }
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error.as_ref().map(GenerationError::user_message)
    }

    /// Generate controls are disabled while loading or with no selection
    pub fn controls_enabled(&self) -> bool {
        !self.loading && self.selected_employee_id.is_some()
    }
}

/// Holds one in-flight slot; `loading` stays set until the last guard drops
struct LoadingGuard<'a> {
    state: &'a Mutex<GenerationState>,
}

impl<'a> LoadingGuard<'a> {
    fn begin(state: &'a Mutex<GenerationState>) -> Self {
        {
            let mut s = state.lock();
            s.in_flight += 1;
            s.loading = true;
            s.error = None;
        }
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut s = self.state.lock();
        s.in_flight = s.in_flight.saturating_sub(1);
        s.loading = s.in_flight > 0;
    }
}

pub struct BadgeWorkflow {
    api: Arc<dyn BadgeApi>,
    surface: Arc<dyn PresentationSurface>,
    session: Arc<SessionStore>,
    navigator: Navigator,
    back_surface_delay: Duration,
    state: Mutex<GenerationState>,
}

impl BadgeWorkflow {
    pub fn new(
        api: Arc<dyn BadgeApi>,
        surface: Arc<dyn PresentationSurface>,
        session: Arc<SessionStore>,
        navigator: Navigator,
        back_surface_delay: Duration,
    ) -> Self {
        Self {
            api,
            surface,
            session,
            navigator,
            back_surface_delay,
            state: Mutex::new(GenerationState::default()),
        }
    }

    pub fn state(&self) -> GenerationState {
        self.state.lock().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    /// Username of the logged-in operator, for the greeting
    pub fn operator_name(&self) -> Option<String> {
        self.session.user().map(|u| u.username)
    }

    // ========== Entry / Selection ==========

    /// Entry to the generator surface: requires a session, then loads the
    /// employee list.
    pub async fn enter(&self) -> Result<Vec<EmployeeSummary>, GenerationError> {
        if !self.session.has_session() {
            self.navigator.force_login();
            return Err(GenerationError::Unauthorized(None));
        }
        self.load_employees().await
    }

    pub async fn load_employees(&self) -> Result<Vec<EmployeeSummary>, GenerationError> {
        match self.api.list_employees().await {
            Ok(employees) => {
                tracing::debug!(count = employees.len(), "Employees loaded");
                self.state.lock().employees = employees.clone();
                Ok(employees)
            }
            Err(e) => {
                tracing::error!(kind = %e.kind(), "Error fetching employees: {}", e);
                let err = if e.is_unauthorized() {
                    self.recover_session();
                    GenerationError::Unauthorized(None)
                } else {
                    GenerationError::ListFailed(e.kind())
                };
                self.state.lock().error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Select (or deselect with `None`) the employee to generate for
    pub fn select_employee(&self, employee_id: Option<String>) {
        let employee_id = employee_id.filter(|id| !id.trim().is_empty());
        self.state.lock().selected_employee_id = employee_id;
    }

    /// Run `target` for the current selection
    pub async fn generate(
        &self,
        target: GenerationTarget,
    ) -> Result<Vec<SurfaceHandle>, GenerationError> {
        let selected = self.state.lock().selected_employee_id.clone().unwrap_or_default();
        match target {
            GenerationTarget::Front => self.generate_front(&selected).await.map(|h| vec![h]),
            GenerationTarget::Back => self.generate_back(&selected).await.map(|h| vec![h]),
            GenerationTarget::Both => self
                .generate_both(&selected)
                .await
                .map(|(front, back)| vec![front, back]),
        }
    }

    // ========== Generate ==========

    pub async fn generate_front(
        &self,
        employee_id: &str,
    ) -> Result<SurfaceHandle, GenerationError> {
        self.generate_side(employee_id, BadgeSide::Front).await
    }

    pub async fn generate_back(
        &self,
        employee_id: &str,
    ) -> Result<SurfaceHandle, GenerationError> {
        self.generate_side(employee_id, BadgeSide::Back).await
    }

    async fn generate_side(
        &self,
        employee_id: &str,
        side: BadgeSide,
    ) -> Result<SurfaceHandle, GenerationError> {
        let employee_id = self.require_employee(employee_id)?;
        let _loading = LoadingGuard::begin(&self.state);

        let result = match self.api.fetch_badge(employee_id, side).await {
            Ok(render) => self.present(&render).await,
            Err(e) => Err(self.fetch_failed(side.into(), &[e])),
        };
        self.settle(result)
    }

    /// Fetch both sides concurrently; open front, wait, open back.
    pub async fn generate_both(
        &self,
        employee_id: &str,
    ) -> Result<(SurfaceHandle, SurfaceHandle), GenerationError> {
        let employee_id = self.require_employee(employee_id)?;
        let _loading = LoadingGuard::begin(&self.state);

        let (front, back) = tokio::join!(
            self.api.fetch_badge(employee_id, BadgeSide::Front),
            self.api.fetch_badge(employee_id, BadgeSide::Back),
        );

        let result = match (front, back) {
            (Ok(front), Ok(back)) => self.present_pair(&front, &back).await,
            (front, back) => {
                let errors: Vec<ClientError> =
                    [front.err(), back.err()].into_iter().flatten().collect();
                Err(self.fetch_failed(GenerationTarget::Both, &errors))
            }
        };
        self.settle(result)
    }

    async fn present_pair(
        &self,
        front: &BadgeRender,
        back: &BadgeRender,
    ) -> Result<(SurfaceHandle, SurfaceHandle), GenerationError> {
        let front_handle = self.present(front).await?;
        tokio::time::sleep(self.back_surface_delay).await;
        let back_handle = self.present(back).await?;
        Ok((front_handle, back_handle))
    }

    async fn present(&self, render: &BadgeRender) -> Result<SurfaceHandle, GenerationError> {
        match self.surface.open(&render.markup).await {
            Ok(handle) => {
                tracing::info!(
                    employee_id = %render.employee_id,
                    side = %render.side,
                    surface = %handle.id,
                    "Badge presented"
                );
                Ok(handle)
            }
            Err(blocked) => {
                tracing::warn!(side = %render.side, "{}", blocked);
                Err(blocked.into())
            }
        }
    }

    // ========== Logout ==========

    pub fn logout(&self) {
        self.session.clear();
        self.navigator.force_login();
        tracing::info!("Operator logged out");
    }

    // ========== Internals ==========

    fn require_employee<'a>(&self, employee_id: &'a str) -> Result<&'a str, GenerationError> {
        let id = employee_id.trim();
        if id.is_empty() {
            self.state.lock().error = Some(GenerationError::NoEmployeeSelected);
            return Err(GenerationError::NoEmployeeSelected);
        }
        Ok(id)
    }

    /// Log every failure and convert to one workflow error.
    ///
    /// Any unauthorized response wins over the other kinds.
    fn fetch_failed(&self, target: GenerationTarget, errors: &[ClientError]) -> GenerationError {
        for e in errors {
            tracing::error!(%target, kind = %e.kind(), "Error generating badge: {}", e);
        }

        if errors.iter().any(ClientError::is_unauthorized) {
            self.recover_session();
            return GenerationError::Unauthorized(Some(target));
        }

        let kind = errors.first().map(ClientError::kind).unwrap_or(FailureKind::Malformed);
        GenerationError::Failed { target, kind }
    }

    /// Clear the session, then force the login surface. Safe to repeat.
    fn recover_session(&self) {
        let cleared = self.session.clear();
        let navigated = self.navigator.force_login();
        tracing::warn!(cleared, navigated, "Authorization failure, session invalidated");
    }

    fn settle<T>(&self, result: Result<T, GenerationError>) -> Result<T, GenerationError> {
        if let Err(e) = &result {
            self.state.lock().error = Some(e.clone());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientResult;
    use crate::route::Route;
    use async_trait::async_trait;
    use shared::client::{LoginResponse, UserInfo};
    use shared::models::EmployeePublicProfile;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Copy)]
    enum Reply {
        Ok,
        Unauthorized,
        Unreachable,
        NotFound,
    }

    impl Reply {
        fn into_result<T>(self, ok: T) -> ClientResult<T> {
            match self {
                Reply::Ok => Ok(ok),
                Reply::Unauthorized => Err(ClientError::Unauthorized),
                Reply::Unreachable => Err(ClientError::Unreachable("connection reset".into())),
                Reply::NotFound => Err(ClientError::NotFound("no such employee".into())),
            }
        }
    }

    struct StubApi {
        replies: HashMap<BadgeSide, Reply>,
        list_reply: Reply,
        latency: HashMap<BadgeSide, Duration>,
        calls: AtomicUsize,
    }

    impl StubApi {
        fn new() -> Self {
            Self {
                replies: HashMap::new(),
                list_reply: Reply::Ok,
                latency: HashMap::new(),
                calls: AtomicUsize::new(0),
            }
        }

        fn reply(mut self, side: BadgeSide, reply: Reply) -> Self {
            self.replies.insert(side, reply);
            self
        }

        fn latency(mut self, side: BadgeSide, latency: Duration) -> Self {
            self.latency.insert(side, latency);
            self
        }

        fn list(mut self, reply: Reply) -> Self {
            self.list_reply = reply;
            self
        }
    }

    #[async_trait]
    impl BadgeApi for StubApi {
        async fn authenticate(&self, _: &str, _: &str) -> ClientResult<LoginResponse> {
            unreachable!()
        }

        async fn list_employees(&self) -> ClientResult<Vec<EmployeeSummary>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.list_reply.into_result(vec![
                EmployeeSummary {
                    id: "7".into(),
                    full_name: "Sami Khalil".into(),
                },
                EmployeeSummary {
                    id: "3".into(),
                    full_name: "Amal Haddad".into(),
                },
            ])
        }

        async fn fetch_badge(
            &self,
            employee_id: &str,
            side: BadgeSide,
        ) -> ClientResult<BadgeRender> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(latency) = self.latency.get(&side) {
                tokio::time::sleep(*latency).await;
            }
            let reply = self.replies.get(&side).copied().unwrap_or(Reply::Ok);
            reply.into_result(BadgeRender {
                employee_id: employee_id.to_string(),
                side,
                markup: format!("<html>{}-{}</html>", employee_id, side),
            })
        }

        async fn fetch_public_profile(&self, _: &str) -> ClientResult<EmployeePublicProfile> {
            unreachable!()
        }
    }

    /// Records every open with the tokio clock time it happened at
    #[derive(Default)]
    struct RecordingSurface {
        opened: Mutex<Vec<(String, tokio::time::Instant)>>,
        /// Opens granted before the host starts refusing; `None` is unlimited
        allow: Option<usize>,
    }

    #[async_trait]
    impl PresentationSurface for RecordingSurface {
        async fn open(&self, content: &str) -> Result<SurfaceHandle, PresentationBlocked> {
            let mut opened = self.opened.lock();
            if self.allow.is_some_and(|n| opened.len() >= n) {
                return Err(PresentationBlocked("popup blocked".into()));
            }
            opened.push((content.to_string(), tokio::time::Instant::now()));
            Ok(SurfaceHandle {
                id: format!("surface-{}", opened.len()),
                location: None,
            })
        }
    }

    impl RecordingSurface {
        fn contents(&self) -> Vec<String> {
            self.opened.lock().iter().map(|(c, _)| c.clone()).collect()
        }
    }

    struct Harness {
        workflow: BadgeWorkflow,
        api: Arc<StubApi>,
        surface: Arc<RecordingSurface>,
        session: Arc<SessionStore>,
        navigator: Navigator,
    }

    fn harness(api: StubApi, surface: RecordingSurface) -> Harness {
        let api = Arc::new(api);
        let surface = Arc::new(surface);
        let session = Arc::new(SessionStore::new());
        session.establish("abc", UserInfo::new("amal"));
        let navigator = Navigator::new(session.view());
        navigator.navigate(Route::Generator);
        let workflow = BadgeWorkflow::new(
            api.clone(),
            surface.clone(),
            session.clone(),
            navigator.clone(),
            Duration::from_millis(500),
        );
        Harness {
            workflow,
            api,
            surface,
            session,
            navigator,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_both_opens_two_surfaces_front_first() {
        let h = harness(
            StubApi::new()
                .latency(BadgeSide::Front, Duration::from_millis(300))
                .latency(BadgeSide::Back, Duration::from_millis(100)),
            RecordingSurface::default(),
        );

        let start = tokio::time::Instant::now();
        let (front, back) = h.workflow.generate_both("7").await.unwrap();
        assert_ne!(front, back);

        let opened = h.surface.opened.lock().clone();
        assert_eq!(opened.len(), 2);
        assert_eq!(opened[0].0, "<html>7-front</html>");
        assert_eq!(opened[1].0, "<html>7-back</html>");

        // fetches overlap: front opens at max(300, 100), not 300 + 100
        assert_eq!(opened[0].1 - start, Duration::from_millis(300));
        assert_eq!(opened[1].1 - opened[0].1, Duration::from_millis(500));
        assert!(!h.workflow.is_loading());
        assert_eq!(h.workflow.state().phase(), GenerationPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_both_opens_nothing_when_one_side_fails() {
        for failing in [BadgeSide::Front, BadgeSide::Back] {
            let h = harness(
                StubApi::new().reply(failing, Reply::Unreachable),
                RecordingSurface::default(),
            );

            let err = h.workflow.generate_both("7").await.unwrap_err();
            assert_eq!(
                err,
                GenerationError::Failed {
                    target: GenerationTarget::Both,
                    kind: FailureKind::Unreachable
                }
            );
            assert!(h.surface.contents().is_empty());
            assert_eq!(h.workflow.state().error_message(), Some(MSG_BOTH_FAILED));
            assert!(!h.workflow.is_loading());
            assert!(h.session.has_session());
        }
    }

    #[tokio::test]
    async fn test_front_ok_back_unreachable() {
        let h = harness(
            StubApi::new().reply(BadgeSide::Back, Reply::Unreachable),
            RecordingSurface::default(),
        );

        h.workflow.generate_front("7").await.unwrap();
        let err = h.workflow.generate_back("7").await.unwrap_err();

        assert_eq!(h.surface.contents(), vec!["<html>7-front</html>".to_string()]);
        assert_eq!(err.user_message(), MSG_BACK_FAILED);
        let state = h.workflow.state();
        assert_eq!(state.phase(), GenerationPhase::Error);
        assert_eq!(state.error_message(), Some(MSG_BACK_FAILED));
    }

    #[tokio::test]
    async fn test_no_selection_never_calls_network() {
        let h = harness(StubApi::new(), RecordingSurface::default());

        for target in [GenerationTarget::Front, GenerationTarget::Back, GenerationTarget::Both] {
            let err = h.workflow.generate(target).await.unwrap_err();
            assert_eq!(err, GenerationError::NoEmployeeSelected);
            assert_eq!(h.workflow.state().error_message(), Some(MSG_NO_EMPLOYEE));
        }
        assert_eq!(h.workflow.generate_front("  ").await, Err(GenerationError::NoEmployeeSelected));
        assert_eq!(h.api.calls.load(Ordering::SeqCst), 0);
        assert!(h.surface.contents().is_empty());
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session_then_navigates() {
        let h = harness(
            StubApi::new().reply(BadgeSide::Front, Reply::Unauthorized),
            RecordingSurface::default(),
        );
        assert_eq!(h.navigator.current(), Route::Generator);

        let err = h.workflow.generate_front("7").await.unwrap_err();
        assert_eq!(err, GenerationError::Unauthorized(Some(GenerationTarget::Front)));
        assert!(h.session.token().is_none());
        assert!(h.session.user().is_none());
        assert_eq!(h.navigator.current(), Route::Login);
    }

    #[tokio::test]
    async fn test_both_unauthorized_navigates_once() {
        let h = harness(
            StubApi::new()
                .reply(BadgeSide::Front, Reply::Unauthorized)
                .reply(BadgeSide::Back, Reply::Unauthorized),
            RecordingSurface::default(),
        );
        let before = h.navigator.history().len();

        let err = h.workflow.generate_both("7").await.unwrap_err();
        assert_eq!(err, GenerationError::Unauthorized(Some(GenerationTarget::Both)));
        assert!(!h.session.has_session());
        assert_eq!(h.navigator.history().len(), before + 1);
        assert!(h.surface.contents().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_unauthorized_siblings_are_idempotent() {
        let h = harness(
            StubApi::new()
                .reply(BadgeSide::Front, Reply::Unauthorized)
                .reply(BadgeSide::Back, Reply::Unauthorized),
            RecordingSurface::default(),
        );
        let before = h.navigator.history().len();

        let (a, b) = tokio::join!(h.workflow.generate_front("7"), h.workflow.generate_back("7"));
        assert_eq!(a, Err(GenerationError::Unauthorized(Some(GenerationTarget::Front))));
        assert_eq!(b, Err(GenerationError::Unauthorized(Some(GenerationTarget::Back))));
        assert_eq!(h.navigator.history().len(), before + 1);
        assert!(!h.session.has_session());
    }

    #[tokio::test]
    async fn test_unauthorized_outranks_other_failures() {
        let h = harness(
            StubApi::new()
                .reply(BadgeSide::Front, Reply::NotFound)
                .reply(BadgeSide::Back, Reply::Unauthorized),
            RecordingSurface::default(),
        );
        assert_eq!(
            h.workflow.generate_both("7").await,
            Err(GenerationError::Unauthorized(Some(GenerationTarget::Both)))
        );
        assert!(!h.session.has_session());
    }

    #[test]
    fn test_unauthorized_uses_side_message() {
        let front = GenerationError::Unauthorized(Some(GenerationTarget::Front));
        let both = GenerationError::Unauthorized(Some(GenerationTarget::Both));
        assert_eq!(front.user_message(), MSG_FRONT_FAILED);
        assert_eq!(both.user_message(), MSG_BOTH_FAILED);
        assert_eq!(GenerationError::Unauthorized(None).user_message(), MSG_LIST_FAILED);
    }

    #[tokio::test(start_paused = true)]
    async fn test_back_blocked_leaves_front_open() {
        let h = harness(
            StubApi::new(),
            RecordingSurface {
                allow: Some(1),
                ..Default::default()
            },
        );

        let err = h.workflow.generate_both("7").await.unwrap_err();
        assert!(matches!(err, GenerationError::PresentationBlocked(_)));
        assert_eq!(h.surface.contents(), vec!["<html>7-front</html>".to_string()]);
        assert_eq!(h.workflow.state().error_message(), Some(MSG_POPUP_BLOCKED));
        assert!(h.session.has_session());
        assert!(!h.workflow.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_held_until_last_operation_settles() {
        let h = harness(
            StubApi::new()
                .latency(BadgeSide::Front, Duration::from_millis(100))
                .latency(BadgeSide::Back, Duration::from_millis(300)),
            RecordingSurface::default(),
        );

        let observe = async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            h.workflow.is_loading()
        };
        let (front, back, loading_midway) = tokio::join!(
            h.workflow.generate_front("7"),
            h.workflow.generate_back("7"),
            observe
        );

        assert!(front.is_ok());
        assert!(back.is_ok());
        assert!(loading_midway);
        assert!(!h.workflow.is_loading());
    }

    #[tokio::test]
    async fn test_popup_blocked_is_distinct() {
        let h = harness(
            StubApi::new(),
            RecordingSurface {
                allow: Some(0),
                ..Default::default()
            },
        );

        let err = h.workflow.generate_front("7").await.unwrap_err();
        assert!(matches!(err, GenerationError::PresentationBlocked(_)));
        assert_eq!(err.user_message(), MSG_POPUP_BLOCKED);
        assert!(h.session.has_session());
        assert!(!h.workflow.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_visible_while_in_flight() {
        let h = harness(
            StubApi::new().latency(BadgeSide::Front, Duration::from_millis(200)),
            RecordingSurface::default(),
        );
        h.workflow.select_employee(Some("7".into()));
        assert!(h.workflow.state().controls_enabled());

        let observe = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            let state = h.workflow.state();
            (state.phase(), state.controls_enabled())
        };
        let (result, (phase, enabled)) =
            tokio::join!(h.workflow.generate(GenerationTarget::Front), observe);

        assert!(result.is_ok());
        assert_eq!(phase, GenerationPhase::Loading);
        assert!(!enabled);
        assert!(h.workflow.state().controls_enabled());
    }

    #[tokio::test]
    async fn test_load_employees_keeps_server_order() {
        let h = harness(StubApi::new(), RecordingSurface::default());
        let list = h.workflow.enter().await.unwrap();
        let ids: Vec<&str> = list.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["7", "3"]);
        assert_eq!(h.workflow.state().employees, list);
        assert_eq!(h.workflow.operator_name().as_deref(), Some("amal"));
    }

    #[tokio::test]
    async fn test_load_employees_unauthorized() {
        let h = harness(StubApi::new().list(Reply::Unauthorized), RecordingSurface::default());
        assert_eq!(h.workflow.load_employees().await, Err(GenerationError::Unauthorized(None)));
        assert!(!h.session.has_session());
        assert_eq!(h.navigator.current(), Route::Login);
    }

    #[tokio::test]
    async fn test_load_employees_failure_message() {
        let h = harness(StubApi::new().list(Reply::Unreachable), RecordingSurface::default());
        let err = h.workflow.load_employees().await.unwrap_err();
        assert_eq!(err.user_message(), MSG_LIST_FAILED);
        assert!(h.session.has_session());
    }

    #[tokio::test]
    async fn test_enter_without_session() {
        let h = harness(StubApi::new(), RecordingSurface::default());
        h.session.clear();
        assert_eq!(h.workflow.enter().await, Err(GenerationError::Unauthorized(None)));
        assert_eq!(h.api.calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.navigator.current(), Route::Login);
    }

    #[tokio::test]
    async fn test_logout() {
        let h = harness(StubApi::new(), RecordingSurface::default());
        h.workflow.logout();
        assert!(!h.session.has_session());
        assert_eq!(h.navigator.current(), Route::Login);
        assert!(h.workflow.operator_name().is_none());
    }
}
