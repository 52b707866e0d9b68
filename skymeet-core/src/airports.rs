//! Static code→name lookup for airports and metropolitan areas. Presentation
//! only: aggregation never needs it, because the provider already stamps
//! metro-area city codes onto airport-level itineraries.

/// (code, display name, country name)
const AIRPORTS: &[(&str, &str, &str)] = &[
    ("AMS", "Amsterdam", "Netherlands"),
    ("BCN", "Barcelona", "Spain"),
    ("BOD", "Bordeaux", "France"),
    ("BRU", "Brussels", "Belgium"),
    ("CDG", "Paris Charles de Gaulle", "France"),
    ("DUB", "Dublin", "Ireland"),
    ("FCO", "Rome Fiumicino", "Italy"),
    ("GVA", "Geneva", "Switzerland"),
    ("IBZ", "Ibiza", "Spain"),
    ("LCY", "London City", "United Kingdom"),
    ("LGW", "London Gatwick", "United Kingdom"),
    ("LHR", "London Heathrow", "United Kingdom"),
    ("LIS", "Lisbon", "Portugal"),
    ("LTN", "London Luton", "United Kingdom"),
    ("MAD", "Madrid", "Spain"),
    ("MRS", "Marseille", "France"),
    ("MXP", "Milan Malpensa", "Italy"),
    ("NAP", "Naples", "Italy"),
    ("ORY", "Paris Orly", "France"),
    ("OPO", "Porto", "Portugal"),
    ("PMI", "Palma de Mallorca", "Spain"),
    ("PRG", "Prague", "Czechia"),
    ("STN", "London Stansted", "United Kingdom"),
    ("TXL", "Berlin", "Germany"),
    ("VIE", "Vienna", "Austria"),
];

/// (metro-area code, display name, member airport codes)
const METRO_AREAS: &[(&str, &str, &[&str])] = &[
    ("LON", "London", &["LHR", "LGW", "STN", "LTN", "LCY"]),
    ("PAR", "Paris", &["CDG", "ORY"]),
    ("MIL", "Milan", &["MXP"]),
    ("ROM", "Rome", &["FCO"]),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirportInfo {
    pub code: String,
    pub name: String,
    pub country: Option<String>,
}

/// Resolve an airport or metro-area code to its display name.
pub fn lookup(code: &str) -> Option<AirportInfo> {
    let code = code.to_ascii_uppercase();
    if let Some((c, name, country)) = AIRPORTS.iter().find(|(c, _, _)| *c == code) {
        return Some(AirportInfo {
            code: (*c).to_string(),
            name: (*name).to_string(),
            country: Some((*country).to_string()),
        });
    }
    METRO_AREAS
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(c, name, _)| AirportInfo {
            code: (*c).to_string(),
            name: (*name).to_string(),
            country: None,
        })
}

/// Member airports of a metro-area code, if it is one.
pub fn metro_members(code: &str) -> Option<&'static [&'static str]> {
    let code = code.to_ascii_uppercase();
    METRO_AREAS
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, _, members)| *members)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_airport() {
        let info = lookup("mad").unwrap();
        assert_eq!(info.name, "Madrid");
        assert_eq!(info.country.as_deref(), Some("Spain"));
    }

    #[test]
    fn test_lookup_metro_area() {
        let info = lookup("LON").unwrap();
        assert_eq!(info.name, "London");
        assert!(info.country.is_none());
        assert!(metro_members("LON").unwrap().contains(&"LGW"));
    }

    #[test]
    fn test_lookup_unknown() {
        assert!(lookup("XXX").is_none());
        assert!(metro_members("MAD").is_none());
    }
}
