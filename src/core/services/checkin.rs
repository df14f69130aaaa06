//! Check-in session state machine
//!
//! Tracks one student's pass through the check-in form:
//!
//! ```text
//! open(token) ─┬─> TokenRejected
//!               └─> AwaitingStudentId ─> Validating ─┬─> Failed (not found / network)
//!                                                     └─> AwaitingCourseSelection
//!     AwaitingCourseSelection ─> AwaitingLocation ─┬─> Failed (location denied)
//!                                                  ├─> Denied (outside fence)
//!                                                  └─> Admitted ─> Submitting ─┬─> Succeeded
//!                                                                              └─> Failed
//! ```
//!
//! The session performs no I/O. Each outgoing request hands out a
//! [`Ticket`]; the matching `resolve_*` call only applies if the ticket is
//! from the current generation. [`CheckinSession::reset`] bumps the
//! generation, so a response arriving after a reset is discarded.

use std::time::Duration;

use crate::core::error::CheckinError;
use crate::core::models::{AttendanceStatus, AttendanceSubmission, GeoCoordinate, StudentRecord};
use crate::core::ports::LocationError;

use super::geofence::Geofence;
use super::token::TokenPolicy;

/// How long an outcome stays on screen before the form resets
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(2500);

/// Proof that a response belongs to the request that was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

/// Whether a resolved response was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The response advanced the session
    Applied,
    /// The response was for an earlier request and was dropped
    Stale,
}

/// Where a session currently is
#[derive(Debug, Clone, PartialEq)]
pub enum CheckinState {
    /// Token invalid; terminal for this session
    TokenRejected,
    /// Waiting for the student to enter an ID
    AwaitingStudentId,
    /// Student lookup in flight
    Validating {
        /// ID being looked up
        student_id: String,
    },
    /// Student known; waiting for a course to be chosen and confirmed
    AwaitingCourseSelection {
        /// Resolved student
        student: StudentRecord,
        /// Currently chosen course, preset when the student has exactly one
        selected: Option<String>,
    },
    /// Device position requested
    AwaitingLocation {
        /// Resolved student
        student: StudentRecord,
        /// Confirmed course
        course_id: String,
    },
    /// Inside the fence; ready to submit
    Admitted {
        /// What will be sent
        submission: AttendanceSubmission,
    },
    /// Submission in flight
    Submitting {
        /// What was sent
        submission: AttendanceSubmission,
    },
    /// Attendance recorded
    Succeeded {
        /// Backend confirmation message
        message: String,
    },
    /// Device outside the fence
    Denied {
        /// Distance from the allowed site
        distance_meters: f64,
    },
    /// Lookup, location or submission failed
    Failed {
        /// What went wrong
        error: CheckinError,
    },
}

impl CheckinState {
    /// Short name used in logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TokenRejected => "token_rejected",
            Self::AwaitingStudentId => "awaiting_student_id",
            Self::Validating { .. } => "validating",
            Self::AwaitingCourseSelection { .. } => "awaiting_course_selection",
            Self::AwaitingLocation { .. } => "awaiting_location",
            Self::Admitted { .. } => "admitted",
            Self::Submitting { .. } => "submitting",
            Self::Succeeded { .. } => "succeeded",
            Self::Denied { .. } => "denied",
            Self::Failed { .. } => "failed",
        }
    }
}

/// One check-in form instance
#[derive(Debug, Clone)]
pub struct CheckinSession {
    state: CheckinState,
    generation: u64,
    status: AttendanceStatus,
    reset_delay: Duration,
}

impl CheckinSession {
    /// Open a session from the portal token
    ///
    /// The token is evaluated here and never again; a rejected token is
    /// terminal for the session.
    #[must_use]
    pub fn open(raw_token: Option<&str>, now_millis: i64, policy: &TokenPolicy) -> Self {
        let status = policy.evaluate(raw_token, now_millis);
        let state = if status.is_valid() {
            CheckinState::AwaitingStudentId
        } else {
            log::info!("check-in token rejected: {status}");
            CheckinState::TokenRejected
        };
        Self {
            state,
            generation: 0,
            status: AttendanceStatus::Present,
            reset_delay: DEFAULT_RESET_DELAY,
        }
    }

    /// Set the status recorded with submissions
    #[must_use]
    pub fn with_status(mut self, status: AttendanceStatus) -> Self {
        self.status = status;
        self
    }

    /// Set how long outcomes stay visible before reset
    #[must_use]
    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay;
        self
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &CheckinState {
        &self.state
    }

    /// The student once resolved
    #[must_use]
    pub fn student(&self) -> Option<&StudentRecord> {
        match &self.state {
            CheckinState::AwaitingCourseSelection { student, .. }
            | CheckinState::AwaitingLocation { student, .. } => Some(student),
            _ => None,
        }
    }

    /// Error to display, if the session ended in one
    #[must_use]
    pub fn error(&self) -> Option<CheckinError> {
        match &self.state {
            CheckinState::TokenRejected => Some(CheckinError::InvalidToken),
            CheckinState::Denied { distance_meters } => Some(CheckinError::OutOfFence {
                distance_meters: *distance_meters,
            }),
            CheckinState::Failed { error } => Some(error.clone()),
            _ => None,
        }
    }

    /// Delay before the form should reset, if the session reached an outcome
    #[must_use]
    pub fn reset_after(&self) -> Option<Duration> {
        if matches!(self.state, CheckinState::Succeeded { .. }) {
            return Some(self.reset_delay);
        }
        self.error()
            .filter(CheckinError::resets_form)
            .map(|_| self.reset_delay)
    }

    /// Start looking up a student ID
    pub fn begin_validation(&mut self, student_id: &str) -> Result<Ticket, CheckinError> {
        self.require(|s| matches!(s, CheckinState::AwaitingStudentId))?;

        let student_id = student_id.trim();
        if student_id.is_empty() {
            return Err(CheckinError::EmptyStudentId);
        }

        self.transition(CheckinState::Validating {
            student_id: student_id.to_string(),
        });
        Ok(self.issue_ticket())
    }

    /// Apply the result of a student lookup
    pub fn resolve_student(
        &mut self,
        ticket: Ticket,
        result: Result<StudentRecord, CheckinError>,
    ) -> Delivery {
        if !self.accepts(ticket, |s| matches!(s, CheckinState::Validating { .. })) {
            return Delivery::Stale;
        }

        match result {
            Ok(student) => {
                let selected = student.sole_course().map(|c| c.course_id.clone());
                self.transition(CheckinState::AwaitingCourseSelection { student, selected });
            },
            Err(error) => self.transition(CheckinState::Failed { error }),
        }
        Delivery::Applied
    }

    /// Choose one of the student's courses
    pub fn select_course(&mut self, course_id: &str) -> Result<(), CheckinError> {
        self.require(|s| matches!(s, CheckinState::AwaitingCourseSelection { .. }))?;

        if let CheckinState::AwaitingCourseSelection { student, selected } = &mut self.state {
            if student.course(course_id).is_none() {
                return Err(CheckinError::UnknownCourse(course_id.to_string()));
            }
            *selected = Some(course_id.to_string());
        }
        Ok(())
    }

    /// Confirm the selected course and request the device position
    ///
    /// Without a selection the session stays where it is.
    pub fn confirm_course(&mut self) -> Result<Ticket, CheckinError> {
        self.require(|s| matches!(s, CheckinState::AwaitingCourseSelection { .. }))?;

        let CheckinState::AwaitingCourseSelection {
            student,
            selected: Some(course_id),
        } = &self.state
        else {
            return Err(CheckinError::MissingCourseSelection);
        };

        let next = CheckinState::AwaitingLocation {
            student: student.clone(),
            course_id: course_id.clone(),
        };
        self.transition(next);
        Ok(self.issue_ticket())
    }

    /// Apply the device position and run the geofence check
    pub fn resolve_location(
        &mut self,
        ticket: Ticket,
        result: Result<GeoCoordinate, LocationError>,
        fence: &Geofence,
    ) -> Delivery {
        if !self.accepts(ticket, |s| matches!(s, CheckinState::AwaitingLocation { .. })) {
            return Delivery::Stale;
        }

        let CheckinState::AwaitingLocation { student, course_id } = &self.state else {
            return Delivery::Stale;
        };

        let position = match result.and_then(|p| p.validated().map_err(LocationError::from)) {
            Ok(position) => position,
            Err(e) => {
                log::info!("location unavailable: {e}");
                self.transition(CheckinState::Failed {
                    error: CheckinError::LocationDenied,
                });
                return Delivery::Applied;
            },
        };

        let decision = fence.evaluate(position);
        let next = if decision.admitted {
            CheckinState::Admitted {
                submission: AttendanceSubmission {
                    student_id: student.student_id.clone(),
                    course_id: course_id.clone(),
                    status: self.status,
                    location: position,
                },
            }
        } else {
            log::info!(
                "student {} is {:.0} m from the site (limit {:.0} m)",
                student.student_id,
                decision.distance_meters,
                fence.radius_meters
            );
            CheckinState::Denied {
                distance_meters: decision.distance_meters,
            }
        };
        self.transition(next);
        Delivery::Applied
    }

    /// Start submitting an admitted check-in
    pub fn begin_submission(&mut self) -> Result<(Ticket, AttendanceSubmission), CheckinError> {
        self.require(|s| matches!(s, CheckinState::Admitted { .. }))?;

        let CheckinState::Admitted { submission } = &self.state else {
            return Err(CheckinError::Busy);
        };
        let submission = submission.clone();

        self.transition(CheckinState::Submitting {
            submission: submission.clone(),
        });
        Ok((self.issue_ticket(), submission))
    }

    /// Apply the backend's answer to a submission
    pub fn resolve_submission(
        &mut self,
        ticket: Ticket,
        result: Result<String, CheckinError>,
    ) -> Delivery {
        if !self.accepts(ticket, |s| matches!(s, CheckinState::Submitting { .. })) {
            return Delivery::Stale;
        }

        let next = match result {
            Ok(message) => CheckinState::Succeeded { message },
            Err(error) => CheckinState::Failed { error },
        };
        self.transition(next);
        Delivery::Applied
    }

    /// Return to the student ID prompt, discarding anything in flight
    ///
    /// A rejected token stays rejected.
    pub fn reset(&mut self) {
        self.generation += 1;
        if self.state != CheckinState::TokenRejected {
            self.transition(CheckinState::AwaitingStudentId);
        }
    }

    fn require(&self, allowed: impl Fn(&CheckinState) -> bool) -> Result<(), CheckinError> {
        if allowed(&self.state) {
            Ok(())
        } else if self.state == CheckinState::TokenRejected {
            Err(CheckinError::InvalidToken)
        } else {
            log::debug!("step not allowed in state {}", self.state.name());
            Err(CheckinError::Busy)
        }
    }

    fn accepts(&self, ticket: Ticket, expected: impl Fn(&CheckinState) -> bool) -> bool {
        let current = ticket.generation == self.generation && expected(&self.state);
        if !current {
            log::warn!(
                "discarding stale response (ticket {}, generation {}, state {})",
                ticket.generation,
                self.generation,
                self.state.name()
            );
        }
        current
    }

    fn issue_ticket(&mut self) -> Ticket {
        self.generation += 1;
        Ticket {
            generation: self.generation,
        }
    }

    fn transition(&mut self, next: CheckinState) {
        log::debug!("check-in: {} -> {}", self.state.name(), next.name());
        self.state = next;
    }
}
