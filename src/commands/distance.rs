//! Distance command - measure a position against the geofence

use rollcall::config::RollcallConfig;
use rollcall::core::models::GeoCoordinate;
use rollcall::output::{DistanceReport, OutputMode};

/// Print the distance from `lat`/`lon` to the site and the admission decision
pub fn distance(config: &RollcallConfig, lat: f64, lon: f64, mode: OutputMode) -> anyhow::Result<()> {
    let fence = config.site.geofence()?;
    let position = GeoCoordinate::new(lat, lon)?;
    let decision = fence.evaluate(position);

    DistanceReport {
        position,
        site: fence.site,
        radius_meters: fence.radius_meters,
        distance_meters: decision.distance_meters,
        admitted: decision.admitted,
    }
    .render(mode);
    Ok(())
}
