//! Public employee profile
//!
//! Fetched without credentials and independent of session state; this
//! module never reads or writes the session. Every remote failure collapses
//! to one message.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use shared::models::EmployeePublicProfile;

use crate::api::BadgeApi;
use crate::date::{DateLocale, PLACEHOLDER};
use crate::route::Route;

pub use crate::date::format_date;

pub const MSG_PROFILE_NOT_FOUND: &str = "عذراً، لم نتمكن من العثور على بيانات الموظف";
pub const MSG_NO_PHOTO: &str = "لا توجد صورة";
const FOOTER_ISSUER: &str = "وزارة الأوقاف - الجمهورية العربية السورية";
pub const HEADER_TITLE: &str = "وزارة الأوقاف - مديرية أوقاف حلب";
pub const FOOTER_NOTE: &str = "هذه البيانات للاستخدام الرسمي فقط";
const REPUBLIC_LOGO_PATH: &str = "/uploads/Syrian_Arab_Republic.png";
const MINISTRY_LOGO_PATH: &str = "/uploads/logo.png";

pub const SECTION_JOB: &str = "المعلومات الوظيفية";
pub const SECTION_PERSONAL: &str = "المعلومات الشخصية";

pub const LABEL_POSITION: &str = "المسمى الوظيفي";
pub const LABEL_WORK_LOCATION: &str = "مكان العمل";
pub const LABEL_DIVISION: &str = "الدائرة/الشعبة";
pub const LABEL_JOINED: &str = "تاريخ التعيين";
pub const LABEL_BIRTH_DATE: &str = "تاريخ الميلاد";
pub const LABEL_BIRTH_PLACE: &str = "مكان الميلاد";
pub const LABEL_BLOOD_TYPE: &str = "فصيلة الدم";
pub const LABEL_EMPLOYEE_NO: &str = "رقم الموظف";
pub const LABEL_MOBILE: &str = "رقم الهاتف";
pub const LABEL_FINGERPRINT: &str = "رقم البصمة";

// ============================================================================
// View
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSection {
    pub title: &'static str,
    pub rows: Vec<ProfileRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeView {
    pub image_url: String,
    pub code: Option<String>,
}

/// Render-ready public profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub header_title: &'static str,
    pub republic_logo_url: String,
    pub ministry_logo_url: String,
    pub full_name: String,
    pub photo_url: Option<String>,
    pub sections: Vec<ProfileSection>,
    /// Present only when the record carries a barcode image
    pub barcode: Option<BarcodeView>,
    pub footer: String,
    pub footer_note: &'static str,
}

impl ProfileView {
    pub fn build(
        profile: &EmployeePublicProfile,
        asset_base_url: &str,
        locale: DateLocale,
    ) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_else(|| PLACEHOLDER.to_string());
        let row = |label, value| ProfileRow { label, value };

        let job = ProfileSection {
            title: SECTION_JOB,
            rows: vec![
                row(LABEL_POSITION, text(&profile.position)),
                row(LABEL_WORK_LOCATION, text(&profile.work_location)),
                row(LABEL_DIVISION, text(&profile.division_section)),
                row(LABEL_JOINED, format_date(profile.date_of_joining.as_deref(), locale)),
            ],
        };

        let personal = ProfileSection {
            title: SECTION_PERSONAL,
            rows: vec![
                row(LABEL_BIRTH_DATE, format_date(profile.date_of_birth.as_deref(), locale)),
                row(LABEL_BIRTH_PLACE, text(&profile.place_of_birth)),
                row(LABEL_BLOOD_TYPE, text(&profile.blood_type)),
                row(LABEL_EMPLOYEE_NO, profile.id.clone()),
                row(LABEL_MOBILE, profile.mobile_1.clone()),
                row(LABEL_FINGERPRINT, text(&profile.fingerprint_id)),
            ],
        };

        let barcode = profile.barcode_image_path.as_deref().map(|path| BarcodeView {
            image_url: media_url(asset_base_url, path),
            code: profile.barcode.clone(),
        });

        Self {
            header_title: HEADER_TITLE,
            republic_logo_url: media_url(asset_base_url, REPUBLIC_LOGO_PATH),
            ministry_logo_url: media_url(asset_base_url, MINISTRY_LOGO_PATH),
            full_name: profile.full_name.clone(),
            photo_url: profile
                .photo_path
                .as_deref()
                .map(|path| media_url(asset_base_url, path)),
            sections: vec![job, personal],
            barcode,
            footer: format!("© {} {}", shared::util::current_year(), FOOTER_ISSUER),
            footer_note: FOOTER_NOTE,
        }
    }

    /// Value of the first row carrying `label`
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.sections
            .iter()
            .flat_map(|s| s.rows.iter())
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
    }
}

impl fmt::Display for ProfileView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header_title)?;
        writeln!(f, "{} {}", self.republic_logo_url, self.ministry_logo_url)?;
        writeln!(f)?;
        writeln!(f, "{}", self.full_name)?;
        writeln!(f, "{}", self.photo_url.as_deref().unwrap_or(MSG_NO_PHOTO))?;
        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "{}", section.title)?;
            for r in &section.rows {
                writeln!(f, "  {}: {}", r.label, r.value)?;
            }
        }
        if let Some(barcode) = &self.barcode {
            writeln!(f)?;
            writeln!(f, "{}", barcode.image_url)?;
            if let Some(code) = &barcode.code {
                writeln!(f, "{}", code)?;
            }
        }
        writeln!(f)?;
        writeln!(f, "{}", self.footer)?;
        write!(f, "{}", self.footer_note)
    }
}

fn media_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

// ============================================================================
// Workflow
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfilePhase {
    Loading,
    Ready(ProfileView),
    Error(&'static str),
}

pub struct ProfileWorkflow {
    api: Arc<dyn BadgeApi>,
    asset_base_url: String,
    locale: DateLocale,
    phase: Mutex<ProfilePhase>,
}

impl ProfileWorkflow {
    pub fn new(
        api: Arc<dyn BadgeApi>,
        asset_base_url: impl Into<String>,
        locale: DateLocale,
    ) -> Self {
        Self {
            api,
            asset_base_url: asset_base_url.into(),
            locale,
            phase: Mutex::new(ProfilePhase::Loading),
        }
    }

    pub fn phase(&self) -> ProfilePhase {
        self.phase.lock().clone()
    }

    /// Mount on a navigation target; only `/employee/:id` carries an id
    pub async fn mount(&self, route: &Route) -> ProfilePhase {
        match route.employee_id() {
            Some(id) => self.load(id).await,
            None => {
                tracing::warn!(route = %route, "Profile mounted without employee id");
                self.settle(ProfilePhase::Error(MSG_PROFILE_NOT_FOUND))
            }
        }
    }

    pub async fn load(&self, employee_id: &str) -> ProfilePhase {
        *self.phase.lock() = ProfilePhase::Loading;

        match self.api.fetch_public_profile(employee_id).await {
            Ok(profile) => {
                tracing::debug!(employee_id, "Public profile loaded");
                let view = ProfileView::build(&profile, &self.asset_base_url, self.locale);
                self.settle(ProfilePhase::Ready(view))
            }
            Err(e) => {
                tracing::error!(
                    employee_id,
                    kind = %e.kind(),
                    "Error fetching employee: {}",
                    e
                );
                self.settle(ProfilePhase::Error(MSG_PROFILE_NOT_FOUND))
            }
        }
    }

    fn settle(&self, phase: ProfilePhase) -> ProfilePhase {
        *self.phase.lock() = phase.clone();
        phase
    }
}
