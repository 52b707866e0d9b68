use chrono::NaiveDateTime;
use skymeet_core::error::SearchError;
use skymeet_core::models::{Itinerary, PassengerCounts, RawItinerary, RawSegment, RouteSummary};
use tracing::warn;

/// The provider contractually caps a direction at this many legs.
const MAX_LEGS_PER_DIRECTION: usize = 3;

/// Convert one raw provider record into a canonical itinerary. This is the
/// only place raw provider shapes are interpreted; everything downstream
/// operates on the canonical types.
pub fn normalize(raw: &RawItinerary, passengers: PassengerCounts) -> Result<Itinerary, SearchError> {
    let outbound_segments: Vec<&RawSegment> =
        raw.route.iter().filter(|s| s.is_return == 0).collect();
    let inbound_segments: Vec<&RawSegment> =
        raw.route.iter().filter(|s| s.is_return != 0).collect();

    if outbound_segments.is_empty() {
        return Err(SearchError::MalformedProviderData {
            id: raw.id.clone(),
            reason: "empty outbound segment list".to_string(),
        });
    }

    let outbound = summarize(&raw.id, &outbound_segments)?;
    let inbound = if inbound_segments.is_empty() {
        None // one-way
    } else {
        Some(summarize(&raw.id, &inbound_segments)?)
    };

    Ok(Itinerary {
        id: raw.id.clone(),
        fly_from: raw.fly_from.clone(),
        fly_to: raw.fly_to.clone(),
        city_from: raw.city_from.clone(),
        city_to: raw.city_to.clone(),
        city_code_from: raw.city_code_from.clone(),
        city_code_to: raw.city_code_to.clone(),
        country_to: raw.country_to.name.clone(),
        country_code_to: raw.country_to.code.clone(),
        price: raw.price,
        distance: raw.distance,
        passengers,
        outbound,
        inbound,
        deep_link: raw.deep_link.clone(),
    })
}

/// Normalize a whole provider response. Malformed records are dropped and
/// logged rather than failing the batch; providers do emit the occasional
/// inconsistent record in large result sets.
pub fn normalize_batch(raws: &[RawItinerary], passengers: PassengerCounts) -> Vec<Itinerary> {
    let mut out = Vec::with_capacity(raws.len());
    for raw in raws {
        match normalize(raw, passengers) {
            Ok(itinerary) => out.push(itinerary),
            Err(err) => warn!(itinerary_id = %raw.id, error = %err, "dropping malformed provider record"),
        }
    }
    out
}

/// Derive the per-direction summary from an ordered, non-empty segment list.
fn summarize(itinerary_id: &str, segments: &[&RawSegment]) -> Result<RouteSummary, SearchError> {
    if segments.len() > MAX_LEGS_PER_DIRECTION {
        // Provider contract violation. We keep going and report at most two
        // connections, so the record stays usable.
        warn!(
            itinerary_id = %itinerary_id,
            legs = segments.len(),
            "direction exceeds provider leg cap, connection list truncated"
        );
    }

    let mut connections = Vec::new();
    if segments.len() >= 2 {
        connections.push(segments[0].city_to.clone());
    }
    if segments.len() >= 3 {
        connections.push(segments[1].city_to.clone());
    }

    let first = segments[0];
    let last = segments[segments.len() - 1];

    let departure = local_wall_clock(itinerary_id, &first.local_departure)?;
    let arrival = local_wall_clock(itinerary_id, &last.local_arrival)?;
    let utc_departure = local_wall_clock(itinerary_id, &first.utc_departure)?;
    let utc_arrival = local_wall_clock(itinerary_id, &last.utc_arrival)?;

    Ok(RouteSummary {
        connections,
        departure,
        arrival,
        duration_secs: (utc_arrival - utc_departure).num_seconds(),
    })
}

/// The provider suffixes all timestamps with a zone marker but the local
/// variants are semantically local wall-clock times. Strip the suffix and
/// keep the wall-clock reading as-is; no timezone reinterpretation.
fn local_wall_clock(itinerary_id: &str, raw: &str) -> Result<NaiveDateTime, SearchError> {
    raw.trim_end_matches('Z')
        .parse::<NaiveDateTime>()
        .map_err(|_| SearchError::MalformedProviderData {
            id: itinerary_id.to_string(),
            reason: format!("unparseable timestamp {raw:?}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use skymeet_core::models::RawCountry;

    fn segment(from: &str, to: &str, city_to: &str, dep: &str, arr: &str, ret: u8) -> RawSegment {
        RawSegment {
            fly_from: from.to_string(),
            fly_to: to.to_string(),
            city_from: from.to_string(),
            city_to: city_to.to_string(),
            city_code_from: from.to_string(),
            city_code_to: to.to_string(),
            local_departure: dep.to_string(),
            local_arrival: arr.to_string(),
            utc_departure: dep.to_string(),
            utc_arrival: arr.to_string(),
            is_return: ret,
        }
    }

    fn raw(route: Vec<RawSegment>) -> RawItinerary {
        RawItinerary {
            id: "it-1".to_string(),
            fly_from: "MAD".to_string(),
            fly_to: "IBZ".to_string(),
            city_from: "Madrid".to_string(),
            city_to: "Ibiza".to_string(),
            city_code_from: "MAD".to_string(),
            city_code_to: "IBZ".to_string(),
            country_to: RawCountry {
                code: "ES".to_string(),
                name: "Spain".to_string(),
            },
            price: 120.0,
            distance: 458.0,
            route,
            deep_link: "https://example.test/it-1".to_string(),
        }
    }

    #[test]
    fn test_direct_flight_has_no_connections() {
        let it = normalize(
            &raw(vec![segment(
                "MAD",
                "IBZ",
                "Ibiza",
                "2026-06-05T07:40:00.000Z",
                "2026-06-05T09:00:00.000Z",
                0,
            )]),
            PassengerCounts::default(),
        )
        .unwrap();
        assert!(it.outbound.connections.is_empty());
        assert!(it.inbound.is_none());
        assert_eq!(it.outbound.duration_secs, 80 * 60);
    }

    #[test]
    fn test_two_segments_yield_one_connection() {
        let it = normalize(
            &raw(vec![
                segment(
                    "MAD",
                    "BCN",
                    "Barcelona",
                    "2026-06-05T07:00:00.000Z",
                    "2026-06-05T08:10:00.000Z",
                    0,
                ),
                segment(
                    "BCN",
                    "IBZ",
                    "Ibiza",
                    "2026-06-05T09:30:00.000Z",
                    "2026-06-05T10:20:00.000Z",
                    0,
                ),
            ]),
            PassengerCounts::default(),
        )
        .unwrap();
        assert_eq!(it.outbound.connections, vec!["Barcelona"]);
    }

    #[test]
    fn test_three_segments_yield_two_connections() {
        let it = normalize(
            &raw(vec![
                segment(
                    "MAD",
                    "BCN",
                    "Barcelona",
                    "2026-06-05T07:00:00.000Z",
                    "2026-06-05T08:10:00.000Z",
                    0,
                ),
                segment(
                    "BCN",
                    "PMI",
                    "Palma",
                    "2026-06-05T09:30:00.000Z",
                    "2026-06-05T10:10:00.000Z",
                    0,
                ),
                segment(
                    "PMI",
                    "IBZ",
                    "Ibiza",
                    "2026-06-05T11:00:00.000Z",
                    "2026-06-05T11:35:00.000Z",
                    0,
                ),
            ]),
            PassengerCounts::default(),
        )
        .unwrap();
        assert_eq!(it.outbound.connections, vec!["Barcelona", "Palma"]);
    }

    #[test]
    fn test_over_cap_route_is_truncated_not_fatal() {
        let mut route = Vec::new();
        for (from, to, city) in [
            ("MAD", "BCN", "Barcelona"),
            ("BCN", "PMI", "Palma"),
            ("PMI", "VLC", "Valencia"),
            ("VLC", "IBZ", "Ibiza"),
        ] {
            route.push(segment(
                from,
                to,
                city,
                "2026-06-05T07:00:00.000Z",
                "2026-06-05T08:00:00.000Z",
                0,
            ));
        }
        let it = normalize(&raw(route), PassengerCounts::default()).unwrap();
        assert_eq!(it.outbound.connections, vec!["Barcelona", "Palma"]);
    }

    #[test]
    fn test_round_trip_builds_inbound_summary() {
        let it = normalize(
            &raw(vec![
                segment(
                    "MAD",
                    "IBZ",
                    "Ibiza",
                    "2026-06-05T07:40:00.000Z",
                    "2026-06-05T09:00:00.000Z",
                    0,
                ),
                segment(
                    "IBZ",
                    "MAD",
                    "Madrid",
                    "2026-06-08T18:00:00.000Z",
                    "2026-06-08T19:20:00.000Z",
                    1,
                ),
            ]),
            PassengerCounts::default(),
        )
        .unwrap();
        let inbound = it.inbound.expect("round trip should have an inbound leg");
        assert!(inbound.connections.is_empty());
        assert_eq!(inbound.duration_secs, 80 * 60);
    }

    #[test]
    fn test_empty_route_is_malformed() {
        let err = normalize(&raw(vec![]), PassengerCounts::default()).unwrap_err();
        assert!(matches!(err, SearchError::MalformedProviderData { .. }));
    }

    #[test]
    fn test_batch_drops_malformed_records() {
        let good = raw(vec![segment(
            "MAD",
            "IBZ",
            "Ibiza",
            "2026-06-05T07:40:00.000Z",
            "2026-06-05T09:00:00.000Z",
            0,
        )]);
        let bad = raw(vec![]);
        let out = normalize_batch(&[bad, good], PassengerCounts::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "it-1");
    }

    #[test]
    fn test_local_times_keep_wall_clock_reading() {
        let it = normalize(
            &raw(vec![segment(
                "MAD",
                "IBZ",
                "Ibiza",
                "2026-06-05T07:40:00.000Z",
                "2026-06-05T09:00:00.000Z",
                0,
            )]),
            PassengerCounts::default(),
        )
        .unwrap();
        assert_eq!(it.outbound.departure.to_string(), "2026-06-05 07:40:00");
    }
}
