use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::temperature::Temperature;

/// A wire field that is either a number or a free-form string token.
///
/// The observation feed reuses numeric slots for sentinel strings: a wind
/// direction of `"VRB"` means variable winds, a visibility of `"10+"` means
/// at or above ten statute miles. Numeric decoding is attempted first; a
/// value matching neither shape fails the record decode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText<T> {
    Number(T),
    Text(String),
}

/// Cloud cover codes as reported on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum CloudCover {
    Few,
    Scattered,
    Broken,
    Overcast,
    Clear,
    Cavok,
    Obscured,
    Other(String),
}

impl From<String> for CloudCover {
    fn from(token: String) -> Self {
        match token.as_str() {
            "FEW" => CloudCover::Few,
            "SCT" => CloudCover::Scattered,
            "BKN" => CloudCover::Broken,
            "OVC" => CloudCover::Overcast,
            "CLR" => CloudCover::Clear,
            "CAVOK" => CloudCover::Cavok,
            "OVX" => CloudCover::Obscured,
            _ => CloudCover::Other(token),
        }
    }
}

/// One reported cloud layer. `base` is feet AGL; absent for CLR, CAVOK,
/// and unrecognized covers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CloudLayer {
    pub cover: CloudCover,
    #[serde(default)]
    pub base: Option<u32>,
}

/// One parsed METAR record, field names mapped from the wire schema.
///
/// Temperature and observation time always carry a value (0 °C and "now"
/// when the wire omits them); every other field is optional, and absence is
/// distinct from zero. Layers keep the order the station reported them in.
#[derive(Debug, Clone, Deserialize)]
pub struct Observation {
    #[serde(rename = "icaoId", default)]
    pub station: String,

    #[serde(
        rename = "obsTime",
        with = "chrono::serde::ts_seconds",
        default = "Utc::now"
    )]
    pub observed_at: DateTime<Utc>,

    #[serde(rename = "temp", default)]
    pub temperature: Temperature,

    #[serde(rename = "dewp", default)]
    pub dew_point: Option<Temperature>,

    /// Degrees, or the variable-direction token.
    #[serde(rename = "wdir", default)]
    pub wind_direction: Option<NumberOrText<u16>>,

    /// Knots.
    #[serde(rename = "wspd", default)]
    pub wind_speed: Option<u32>,

    /// Knots.
    #[serde(rename = "wgst", default)]
    pub wind_gust: Option<u32>,

    /// Statute miles, or the at-or-above-ten-miles token.
    #[serde(rename = "visib", default)]
    pub visibility: Option<NumberOrText<f64>>,

    /// Millibars.
    #[serde(rename = "altim", default)]
    pub altimeter: Option<f64>,

    /// Millibars.
    #[serde(rename = "slp", default)]
    pub sea_level_pressure: Option<f64>,

    #[serde(rename = "wxString", default)]
    pub weather_string: Option<String>,

    /// Feet AGL, reported with obscured-sky conditions.
    #[serde(rename = "vertVis", default)]
    pub vertical_visibility: Option<u32>,

    #[serde(rename = "metarType", default)]
    pub metar_type: String,

    #[serde(rename = "rawOb", default)]
    pub raw_text: String,

    #[serde(rename = "name", default)]
    pub site_name: String,

    #[serde(default)]
    pub clouds: Vec<CloudLayer>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RECORD: &str = r#"{
        "icaoId": "KPVD",
        "obsTime": 1710000000,
        "temp": 12.8,
        "dewp": 6.1,
        "wdir": 230,
        "wspd": 9,
        "wgst": 17,
        "visib": "10+",
        "altim": 1016.3,
        "slp": 1016.1,
        "metarType": "METAR",
        "rawOb": "KPVD 091651Z 23009G17KT 10SM FEW048 13/06 A3001",
        "name": "Providence/Green Arpt, RI, US",
        "clouds": [{"cover": "FEW", "base": 4800}]
    }"#;

    #[test]
    fn decodes_full_record() {
        let obs: Observation = serde_json::from_str(FULL_RECORD).unwrap();

        assert_eq!(obs.station, "KPVD");
        assert_eq!(obs.observed_at.timestamp(), 1_710_000_000);
        assert_eq!(obs.temperature.celsius(), 12.8);
        assert_eq!(obs.dew_point.unwrap().celsius(), 6.1);
        assert_eq!(obs.wind_direction, Some(NumberOrText::Number(230)));
        assert_eq!(obs.wind_speed, Some(9));
        assert_eq!(obs.wind_gust, Some(17));
        assert_eq!(obs.visibility, Some(NumberOrText::Text("10+".into())));
        assert_eq!(obs.altimeter, Some(1016.3));
        assert_eq!(obs.sea_level_pressure, Some(1016.1));
        assert_eq!(obs.metar_type, "METAR");
        assert_eq!(
            obs.clouds,
            vec![CloudLayer {
                cover: CloudCover::Few,
                base: Some(4800)
            }]
        );
    }

    #[test]
    fn numeric_shape_wins_over_text() {
        let obs: Observation =
            serde_json::from_str(r#"{"wdir": 90, "visib": 1.5}"#).unwrap();
        assert_eq!(obs.wind_direction, Some(NumberOrText::Number(90)));
        assert_eq!(obs.visibility, Some(NumberOrText::Number(1.5)));
    }

    #[test]
    fn sentinel_strings_decode_as_text() {
        let obs: Observation =
            serde_json::from_str(r#"{"wdir": "VRB", "visib": "10+"}"#).unwrap();
        assert_eq!(obs.wind_direction, Some(NumberOrText::Text("VRB".into())));
        assert_eq!(obs.visibility, Some(NumberOrText::Text("10+".into())));
    }

    #[test]
    fn neither_shape_is_an_error() {
        assert!(serde_json::from_str::<Observation>(r#"{"wdir": [1, 2]}"#).is_err());
        assert!(serde_json::from_str::<Observation>(r#"{"visib": true}"#).is_err());
    }

    #[test]
    fn missing_fields_default_or_stay_absent() {
        let before = Utc::now();
        let obs: Observation = serde_json::from_str("{}").unwrap();

        assert_eq!(obs.temperature.celsius(), 0.0);
        assert!(obs.observed_at >= before);
        assert!(obs.dew_point.is_none());
        assert!(obs.wind_direction.is_none());
        assert!(obs.wind_speed.is_none());
        assert!(obs.visibility.is_none());
        assert!(obs.altimeter.is_none());
        assert!(obs.sea_level_pressure.is_none());
        assert!(obs.vertical_visibility.is_none());
        assert!(obs.clouds.is_empty());
        assert_eq!(obs.station, "");
    }

    #[test]
    fn cloud_cover_tokens() {
        for (token, cover) in [
            ("FEW", CloudCover::Few),
            ("SCT", CloudCover::Scattered),
            ("BKN", CloudCover::Broken),
            ("OVC", CloudCover::Overcast),
            ("CLR", CloudCover::Clear),
            ("CAVOK", CloudCover::Cavok),
            ("OVX", CloudCover::Obscured),
            ("SKC", CloudCover::Other("SKC".into())),
        ] {
            assert_eq!(CloudCover::from(token.to_string()), cover);
        }
    }
}
