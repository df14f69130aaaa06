//! Kiosk check-in driver
//!
//! Walks a [`CheckinSession`] through the ports one step at a time: look
//! the student up, settle the course, locate the device, apply the
//! geofence and submit. The session decides every transition; this module
//! only performs the I/O in between.

use serde::Serialize;

use crate::core::error::CheckinError;
use crate::core::models::{
    AttendanceSubmission, Course, GeoCoordinate, LocationDetails, StudentRecord,
};
use crate::core::ports::{AttendanceBackend, Geolocator, ReverseGeocoder};
use crate::core::services::{CheckinSession, CheckinState, Geofence};

/// What the student entered on the form
#[derive(Debug, Clone, Default)]
pub struct CheckinRequest {
    /// Student ID as typed
    pub student_id: String,
    /// Chosen course; may be omitted when the student has exactly one
    pub course_id: Option<String>,
}

/// Proof of a recorded check-in
#[derive(Debug, Clone, Serialize)]
pub struct CheckinReceipt {
    /// Student checked in
    pub student: StudentRecord,
    /// Course checked in to
    pub course: Course,
    /// What was recorded
    pub submission: AttendanceSubmission,
    /// Distance from the allowed site
    pub distance_meters: f64,
    /// Address near the device, when it could be looked up
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationDetails>,
    /// Backend confirmation
    pub message: String,
}

/// Drives check-in sessions against the backend and device
pub struct Kiosk<'a> {
    backend: &'a dyn AttendanceBackend,
    geolocator: &'a dyn Geolocator,
    geocoder: Option<&'a dyn ReverseGeocoder>,
    fence: Geofence,
}

impl std::fmt::Debug for Kiosk<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kiosk")
            .field("fence", &self.fence)
            .field("geocoder", &self.geocoder.is_some())
            .finish_non_exhaustive()
    }
}

impl<'a> Kiosk<'a> {
    /// Create a kiosk admitting positions inside `fence`
    #[must_use]
    pub fn new(
        backend: &'a dyn AttendanceBackend,
        geolocator: &'a dyn Geolocator,
        fence: Geofence,
    ) -> Self {
        Self {
            backend,
            geolocator,
            geocoder: None,
            fence,
        }
    }

    /// Look up addresses for display
    #[must_use]
    pub fn with_geocoder(mut self, geocoder: &'a dyn ReverseGeocoder) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    /// The fence in use
    #[must_use]
    pub const fn fence(&self) -> &Geofence {
        &self.fence
    }

    /// Run the whole check-in for one student
    pub fn check_in(
        &self,
        session: &mut CheckinSession,
        request: &CheckinRequest,
    ) -> Result<CheckinReceipt, CheckinError> {
        self.lookup_student(session, &request.student_id)?;
        self.complete(session, request.course_id.as_deref())
    }

    /// Resolve the student ID; the session then awaits course selection
    pub fn lookup_student(
        &self,
        session: &mut CheckinSession,
        student_id: &str,
    ) -> Result<StudentRecord, CheckinError> {
        let ticket = session.begin_validation(student_id)?;
        let result = self.backend.validate_student(student_id.trim());
        session.resolve_student(ticket, result);

        session.student().cloned().ok_or_else(|| session.error().unwrap_or(CheckinError::Busy))
    }

    /// Select the course (if given), locate, check the fence and submit
    pub fn complete(
        &self,
        session: &mut CheckinSession,
        course_id: Option<&str>,
    ) -> Result<CheckinReceipt, CheckinError> {
        if let Some(course_id) = course_id {
            session.select_course(course_id)?;
        }

        let student = session.student().cloned().ok_or(CheckinError::Busy)?;
        let ticket = session.confirm_course()?;

        let position = self.geolocator.current_position();
        let location = position.as_ref().ok().and_then(|p| self.describe(*p));
        session.resolve_location(ticket, position, &self.fence);
        if let Some(error) = session.error() {
            return Err(error);
        }

        let (ticket, submission) = session.begin_submission()?;
        let result = self.backend.submit_attendance(&submission);
        session.resolve_submission(ticket, result);

        match session.state() {
            CheckinState::Succeeded { message } => {
                log::info!(
                    "checked in student {} to course {}",
                    submission.student_id,
                    submission.course_id
                );
                let course = student
                    .course(&submission.course_id)
                    .cloned()
                    .ok_or_else(|| CheckinError::UnknownCourse(submission.course_id.clone()))?;
                Ok(CheckinReceipt {
                    distance_meters: self.fence.evaluate(submission.location).distance_meters,
                    message: message.clone(),
                    student,
                    course,
                    submission,
                    location,
                })
            },
            _ => Err(session.error().unwrap_or(CheckinError::Busy)),
        }
    }

    fn describe(&self, position: GeoCoordinate) -> Option<LocationDetails> {
        let geocoder = self.geocoder?;
        match geocoder.lookup(position) {
            Ok(details) => Some(details),
            Err(e) => {
                log::warn!("reverse geocoding failed: {e}");
                Some(LocationDetails::unknown())
            },
        }
    }
}
