//! Pure API handlers
//!
//! These handlers contain business logic and are HTTP-agnostic.
//! They take typed input and return `Result<T, ApiError>`. Every request
//! opens its own check-in session; nothing is shared between requests.

use crate::adapters::FixedGeolocator;
use crate::core::error::CheckinError;
use crate::core::models::StudentRecord;
use crate::core::ports::{AttendanceBackend, Clock};
use crate::core::services::{CheckinSession, Geofence, TokenPolicy, TokenStatus};
use crate::kiosk::{CheckinReceipt, CheckinRequest, Kiosk};

use super::error::ApiError;
use super::types::{CheckinBody, SiteData};

/// Everything the portal endpoints need
pub struct Portal<'a> {
    backend: &'a dyn AttendanceBackend,
    clock: &'a dyn Clock,
    fence: Geofence,
    policy: TokenPolicy,
}

impl std::fmt::Debug for Portal<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Portal")
            .field("fence", &self.fence)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl<'a> Portal<'a> {
    /// Create a portal over a backend and clock
    #[must_use]
    pub const fn new(
        backend: &'a dyn AttendanceBackend,
        clock: &'a dyn Clock,
        fence: Geofence,
        policy: TokenPolicy,
    ) -> Self {
        Self {
            backend,
            clock,
            fence,
            policy,
        }
    }

    fn open_session(&self, token: Option<&str>) -> Result<CheckinSession, ApiError> {
        let session = CheckinSession::open(token, self.clock.now_millis(), &self.policy);
        match session.error() {
            Some(e) => Err(e.into()),
            None => Ok(session),
        }
    }

    // =========================================================================
    // SITE
    // =========================================================================

    /// Get the allowed site
    pub fn get_site(&self) -> Result<SiteData, ApiError> {
        Ok(SiteData {
            site: self.fence.site,
            radius_meters: self.fence.radius_meters,
            token_validity_hours: self.policy.validity().as_secs() / 3600,
        })
    }

    // =========================================================================
    // TOKEN
    // =========================================================================

    /// Report on a token without opening a session
    pub fn check_token(&self, token: Option<&str>) -> Result<TokenStatus, ApiError> {
        Ok(self.policy.evaluate(token, self.clock.now_millis()))
    }

    // =========================================================================
    // STUDENTS
    // =========================================================================

    /// Look up a student; requires a valid token
    pub fn get_student(
        &self,
        token: Option<&str>,
        student_id: &str,
    ) -> Result<StudentRecord, ApiError> {
        let mut session = self.open_session(token)?;
        let ticket = session.begin_validation(student_id)?;
        let result = self.backend.validate_student(student_id.trim());
        session.resolve_student(ticket, result);

        match session.student() {
            Some(student) => Ok(student.clone()),
            None => Err(session.error().unwrap_or(CheckinError::Busy).into()),
        }
    }

    // =========================================================================
    // CHECK-IN
    // =========================================================================

    /// Run a full check-in
    pub fn check_in(&self, body: &CheckinBody) -> Result<CheckinReceipt, ApiError> {
        let mut session = self
            .open_session(body.token.as_deref())?
            .with_status(body.status.unwrap_or_default());

        let geolocator = match body.location {
            Some(position) => FixedGeolocator::at(
                position
                    .validated()
                    .map_err(|e| ApiError::bad_request(e.to_string()))?,
            ),
            None => FixedGeolocator::denied(),
        };

        let request = CheckinRequest {
            student_id: body.student_id.clone(),
            course_id: body.course_id.clone(),
        };
        let kiosk = Kiosk::new(self.backend, &geolocator, self.fence);
        Ok(kiosk.check_in(&mut session, &request)?)
    }
}
