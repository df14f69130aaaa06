//! Kiosk command - interactive check-in loop
//!
//! One token, many students. Each student goes through the full flow; the
//! outcome stays on screen for the reset delay before the form clears.

use std::io::{self, BufRead, Write as _};

use rollcall::adapters::{FixedGeolocator, PhpBackend};
use rollcall::config::RollcallConfig;
use rollcall::core::CheckinError;
use rollcall::core::models::StudentRecord;
use rollcall::core::services::CheckinSession;
use rollcall::kiosk::Kiosk;
use rollcall::output::{CheckinReport, OutputMode};

use super::checkin::{geocoder, open_session};

/// Run the kiosk until stdin closes or a blank student ID is entered
pub fn kiosk(
    config: &RollcallConfig,
    token: &str,
    lat: Option<f64>,
    lon: Option<f64>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let geolocator = FixedGeolocator::from_args(lat, lon)?;
    let backend = PhpBackend::new(&config.backend)?;
    let geocoder = geocoder(config, lat.is_some())?;

    let mut kiosk = Kiosk::new(&backend, &geolocator, config.site.geofence()?);
    if let Some(geocoder) = &geocoder {
        kiosk = kiosk.with_geocoder(geocoder);
    }

    let mut session = open_session(config, token)?;
    if let Some(e) = session.error() {
        CheckinReport::failed(&e).render(mode);
        std::process::exit(1);
    }

    let stdin = io::stdin();
    run_loop(&kiosk, &mut session, &mut stdin.lock(), mode)
}

fn run_loop(
    kiosk: &Kiosk<'_>,
    session: &mut CheckinSession,
    input: &mut impl BufRead,
    mode: OutputMode,
) -> anyhow::Result<()> {
    loop {
        let Some(student_id) = prompt(input, "Student ID (blank to quit): ")? else {
            return Ok(());
        };
        if student_id.is_empty() {
            return Ok(());
        }

        let outcome = match kiosk.lookup_student(session, &student_id) {
            Ok(student) => match choose_course(input, &student)? {
                Some(course_id) => kiosk.complete(session, course_id.as_deref()),
                None => return Ok(()),
            },
            Err(e) => Err(e),
        };

        match outcome {
            Ok(receipt) => CheckinReport::recorded(receipt).render(mode),
            Err(e) => CheckinReport::failed(&e).render(mode),
        }

        if let Some(delay) = session.reset_after() {
            std::thread::sleep(delay);
        }
        session.reset();
        if mode == OutputMode::Human {
            println!();
        }
    }
}

/// Ask for a course when the student has more than one
///
/// Returns `Some(None)` when no choice is needed, `None` on end of input.
fn choose_course(
    input: &mut impl BufRead,
    student: &StudentRecord,
) -> anyhow::Result<Option<Option<String>>> {
    if student.courses.len() < 2 {
        return Ok(Some(None));
    }

    println!("Welcome, {}", student.student_name);
    for (i, course) in student.courses.iter().enumerate() {
        println!("  {}) {} [{}]", i + 1, course.course_name, course.course_id);
    }

    loop {
        let Some(choice) = prompt(input, "Course: ")? else {
            return Ok(None);
        };
        let picked = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| student.courses.get(i))
            .or_else(|| student.course(&choice));
        match picked {
            Some(course) => return Ok(Some(Some(course.course_id.clone()))),
            None => println!("{}", CheckinError::MissingCourseSelection),
        }
    }
}

fn prompt(input: &mut impl BufRead, label: &str) -> anyhow::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
