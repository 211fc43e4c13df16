use serde::{Deserialize, Serialize};

use crate::icao;

/// One airport returned by the search service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirportSuggestion {
    /// ICAO identifier, e.g. `KATL`. Unique within one result set.
    #[serde(default)]
    pub icao: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iata: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,

    /// Category such as `large_airport` or `heliport`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_service: Option<bool>,
}

impl AirportSuggestion {
    pub fn new(icao: impl Into<String>) -> Self {
        Self {
            icao: icao.into(),
            ..Default::default()
        }
    }

    /// Heliports are never offered as origin or destination.
    ///
    /// Matches `type == "heliport"` (any case) and, for entries without a
    /// usable type, any name containing "heliport".
    pub fn is_usable(&self) -> bool {
        if self
            .kind
            .as_deref()
            .is_some_and(|k| k.eq_ignore_ascii_case("heliport"))
        {
            return false;
        }
        if self
            .name
            .as_deref()
            .is_some_and(|n| n.to_lowercase().contains("heliport"))
        {
            return false;
        }
        true
    }

    /// Same entry with its ICAO code normalized.
    pub fn normalized(mut self) -> Self {
        self.icao = icao::normalize(&self.icao);
        self
    }

    /// `"Atlanta, GA"`, `"Atlanta"`, or `None`.
    pub fn locality(&self) -> Option<String> {
        let parts: Vec<&str> = [self.city.as_deref(), self.state.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }

    /// Secondary row text: `name · city, state`.
    pub fn detail_line(&self) -> Option<String> {
        let parts: Vec<String> = [
            self.name.clone().filter(|s| !s.is_empty()),
            self.locality(),
        ]
        .into_iter()
        .flatten()
        .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" · "))
        }
    }

    /// Single-line label: `KATL (ATL) — Hartsfield-Jackson · Atlanta, GA · US`.
    pub fn display_label(&self) -> String {
        let bits: Vec<String> = [
            self.name.clone().filter(|s| !s.is_empty()),
            self.locality(),
            self.country.clone().filter(|s| !s.is_empty()),
        ]
        .into_iter()
        .flatten()
        .collect();

        let mut label = self.icao.clone();
        if let Some(iata) = self.iata.as_deref().filter(|s| !s.is_empty()) {
            label.push_str(&format!(" ({iata})"));
        }
        if !bits.is_empty() {
            label.push_str(" — ");
            label.push_str(&bits.join(" · "));
        }
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atl() -> AirportSuggestion {
        AirportSuggestion {
            icao: "KATL".into(),
            iata: Some("ATL".into()),
            name: Some("Hartsfield-Jackson Atlanta International Airport".into()),
            city: Some("Atlanta".into()),
            state: Some("GA".into()),
            country: Some("US".into()),
            kind: Some("large_airport".into()),
            scheduled_service: Some(true),
            ..Default::default()
        }
    }

    #[test]
    fn test_deserialize_renames_type() {
        let json = r#"{"icao":"katl","type":"large_airport","lat":33.6,"lon":-84.4,"scheduled_service":true}"#;
        let a: AirportSuggestion = serde_json::from_str(json).unwrap();
        assert_eq!(a.kind.as_deref(), Some("large_airport"));
        assert_eq!(a.lat, Some(33.6));
        assert_eq!(a.scheduled_service, Some(true));
        assert_eq!(a.normalized().icao, "KATL");
    }

    #[test]
    fn test_missing_icao_defaults_to_empty() {
        let a: AirportSuggestion = serde_json::from_str(r#"{"name":"Nowhere"}"#).unwrap();
        assert!(a.icao.is_empty());
    }

    #[test]
    fn test_heliports_are_not_usable() {
        assert!(atl().is_usable());

        let by_type = AirportSuggestion {
            kind: Some("HeliPort".into()),
            ..AirportSuggestion::new("KX01")
        };
        assert!(!by_type.is_usable());

        let by_name = AirportSuggestion {
            name: Some("Downtown HELIPORT".into()),
            ..AirportSuggestion::new("KX02")
        };
        assert!(!by_name.is_usable());
    }

    #[test]
    fn test_display_label() {
        assert_eq!(
            atl().display_label(),
            "KATL (ATL) — Hartsfield-Jackson Atlanta International Airport · Atlanta, GA · US"
        );
        assert_eq!(AirportSuggestion::new("KXYZ").display_label(), "KXYZ");
    }

    #[test]
    fn test_detail_line() {
        let a = AirportSuggestion {
            city: Some("Denver".into()),
            ..AirportSuggestion::new("KDEN")
        };
        assert_eq!(a.detail_line().as_deref(), Some("Denver"));
        assert_eq!(AirportSuggestion::new("KDEN").detail_line(), None);
    }
}
