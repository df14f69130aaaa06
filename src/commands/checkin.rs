//! Checkin command - one-shot check-in against the backend

use rollcall::adapters::{FixedGeolocator, NominatimGeocoder, PhpBackend};
use rollcall::config::RollcallConfig;
use rollcall::core::models::AttendanceStatus;
use rollcall::core::ports::{Clock, SystemClock};
use rollcall::core::services::CheckinSession;
use rollcall::kiosk::{CheckinRequest, Kiosk};
use rollcall::output::{CheckinReport, OutputMode};
use rollcall::qr_link;

/// Arguments for `rollcall checkin`
#[derive(Debug)]
pub struct CheckinArgs {
    pub token: String,
    pub student_id: String,
    pub course: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub status: String,
}

/// Open a session for the token (or portal URL) given on the command line
pub fn open_session(config: &RollcallConfig, token_input: &str) -> anyhow::Result<CheckinSession> {
    let raw = qr_link::extract_token(token_input);
    let policy = config.token.policy()?;
    Ok(CheckinSession::open(raw.as_deref(), SystemClock.now_millis(), &policy)
        .with_reset_delay(config.portal.reset_delay()))
}

/// Reverse geocoder when enabled and a position will be reported
pub fn geocoder(config: &RollcallConfig, located: bool) -> anyhow::Result<Option<NominatimGeocoder>> {
    if config.geocoding.enabled && located {
        Ok(Some(NominatimGeocoder::new(&config.geocoding)?))
    } else {
        Ok(None)
    }
}

/// Check one student in; exits 1 when the check-in is refused
pub fn checkin(config: &RollcallConfig, args: &CheckinArgs, mode: OutputMode) -> anyhow::Result<()> {
    let status: AttendanceStatus = args.status.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let geolocator = FixedGeolocator::from_args(args.lat, args.lon)?;
    let backend = PhpBackend::new(&config.backend)?;
    let geocoder = geocoder(config, args.lat.is_some())?;

    let mut kiosk = Kiosk::new(&backend, &geolocator, config.site.geofence()?);
    if let Some(geocoder) = &geocoder {
        kiosk = kiosk.with_geocoder(geocoder);
    }

    let mut session = open_session(config, &args.token)?.with_status(status);
    let request = CheckinRequest {
        student_id: args.student_id.clone(),
        course_id: args.course.clone(),
    };

    match kiosk.check_in(&mut session, &request) {
        Ok(receipt) => {
            CheckinReport::recorded(receipt).render(mode);
            Ok(())
        },
        Err(e) => {
            log::debug!("check-in ended in state {}", session.state().name());
            CheckinReport::failed(&e).render(mode);
            std::process::exit(1);
        },
    }
}
