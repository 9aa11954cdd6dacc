//! Renders a parsed observation as a human-readable decoded report.
//!
//! Everything here is pure and synchronous. The report is assembled as an
//! ordered list of optional (label, value) pairs; a line whose underlying
//! data is absent is dropped entirely, and labels are right-justified into
//! a fixed-width column.

use crate::model::{CloudCover, CloudLayer, NumberOrText, Observation};
use crate::temperature::Temperature;

/// Column width the line labels are right-justified into.
const LABEL_WIDTH: usize = 22;
/// Width of the report-type code on the header line.
const TYPE_WIDTH: usize = 5;

const KNOTS_TO_MPH: f64 = 1.15078;
const KNOTS_TO_MPS: f64 = 0.514444;
const SM_TO_KM: f64 = 1.60934;
const MB_TO_INHG: f64 = 0.029_530_0;

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// The verbatim observation text as reported by the station.
pub fn raw(obs: &Observation) -> &str {
    &obs.raw_text
}

/// The full decoded multi-line report.
pub fn decoded(obs: &Observation) -> String {
    let mut out = String::new();
    for (label, value) in lines(obs) {
        out.push_str(&format!("{label:>width$}{value}\n", width = LABEL_WIDTH));
    }
    out
}

fn lines(obs: &Observation) -> Vec<(String, String)> {
    let mut lines = vec![
        (
            format!("{:>width$} for: ", obs.metar_type, width = TYPE_WIDTH),
            format!("{} ({})", obs.station, obs.site_name),
        ),
        ("Text: ".to_owned(), obs.raw_text.clone()),
        (
            "Conditions at: ".to_owned(),
            obs.observed_at.format("%Y-%m-%d %H:%M:%S %z").to_string(),
        ),
        ("Temperature: ".to_owned(), obs.temperature.to_string()),
    ];

    if let Some(value) = dew_point_line(obs) {
        lines.push(("Dewpoint: ".to_owned(), value));
    }
    if let Some(value) = pressure_line(obs) {
        lines.push(("Pressure (altimeter): ".to_owned(), value));
    }
    if let Some(value) = wind_line(obs) {
        lines.push(("Winds: ".to_owned(), value));
    }
    if let Some(value) = visibility_line(obs) {
        lines.push(("Visibility: ".to_owned(), value));
    }
    if let Some((ceiling, cover)) = sky_lines(obs) {
        lines.push(("Ceiling: ".to_owned(), ceiling));
        lines.push(("Cloud cover: ".to_owned(), cover));
    }

    lines
}

/// Magnus-form relative humidity as a 0..=1 fraction.
pub fn relative_humidity(temperature: Temperature, dew_point: Temperature) -> f64 {
    let t = temperature.celsius();
    let td = dew_point.celsius();

    ((17.625 * td) / (243.04 + td)).exp() / ((17.625 * t) / (243.04 + t)).exp()
}

fn dew_point_line(obs: &Observation) -> Option<String> {
    let dew_point = obs.dew_point?;
    let rh = relative_humidity(obs.temperature, dew_point);

    Some(format!("{dew_point} [RH = {:.0}%]", rh * 100.0))
}

fn pressure_line(obs: &Observation) -> Option<String> {
    let millibars = obs.altimeter?;
    let inhg = millibars * MB_TO_INHG;

    let mut line = format!("{inhg:.2} inches Hg ({millibars:.1} mb)");
    if let Some(slp) = obs.sea_level_pressure {
        line.push_str(&format!(" [Sea level pressure: {slp:.1} mb]"));
    }

    Some(line)
}

/// Nearest of the 16 compass points for a direction in degrees.
pub fn compass_point(degrees: u16) -> &'static str {
    let index = ((f64::from(degrees) / 22.5) + 0.5).floor() as usize % 16;
    COMPASS_POINTS[index]
}

fn speed_phrase(prefix: &str, knots: u32) -> String {
    let mph = f64::from(knots) * KNOTS_TO_MPH;
    let mps = f64::from(knots) * KNOTS_TO_MPS;

    format!("{prefix} {mph:.0} MPH ({knots} knots; {mps:.1} m/s)")
}

fn wind_line(obs: &Observation) -> Option<String> {
    let direction = obs.wind_direction.as_ref()?;
    let speed = obs.wind_speed?;

    if speed == 0 {
        return Some("calm".to_owned());
    }

    let mut line = match direction {
        NumberOrText::Number(degrees) => {
            format!("from the {} ({degrees:03} degrees)", compass_point(*degrees))
        }
        NumberOrText::Text(_) => "variable direction".to_owned(),
    };

    line.push_str(&speed_phrase(" at", speed));
    if let Some(gust) = obs.wind_gust {
        line.push_str(&speed_phrase(" gusting to", gust));
    }

    Some(line)
}

fn visibility_line(obs: &Observation) -> Option<String> {
    let visibility = obs.visibility.as_ref()?;

    Some(match visibility {
        NumberOrText::Number(sm) => {
            // Whole-mile values render without fraction digits, others with two.
            let digits = if sm.fract() == 0.0 { 0 } else { 2 };
            let km = sm * SM_TO_KM;
            format!("{sm:.digits$} sm ({km:.digits$} km)", digits = digits)
        }
        NumberOrText::Text(_) => "10 or more sm (16+ km)".to_owned(),
    })
}

/// Ceiling and cloud-cover values, derived jointly from the layer stack.
/// Both are present or both absent.
fn sky_lines(obs: &Observation) -> Option<(String, String)> {
    if obs.clouds.is_empty() {
        return None;
    }

    let lowest_broken = obs
        .clouds
        .iter()
        .filter(|layer| matches!(layer.cover, CloudCover::Broken | CloudCover::Overcast))
        .filter_map(|layer| layer.base)
        .min();

    let ceiling = if let Some(base) = lowest_broken {
        format!("{base} feet AGL")
    } else if obs.clouds.iter().any(|l| l.cover == CloudCover::Cavok) {
        return Some((
            "ceiling and visibility are OK".to_owned(),
            "unknown".to_owned(),
        ));
    } else if obs.clouds.iter().any(|l| l.cover == CloudCover::Obscured) {
        let mut ceiling = "indefinite ceiling".to_owned();
        if let Some(feet) = obs.vertical_visibility {
            ceiling.push_str(&format!(" with vertical visibility of {feet} feet AGL"));
        }
        return Some((ceiling, "obscured sky".to_owned()));
    } else {
        "at least 12,000 feet AGL".to_owned()
    };

    Some((ceiling, cover_summary(&obs.clouds)))
}

fn cover_summary(clouds: &[CloudLayer]) -> String {
    let mut phrases: Vec<String> = Vec::new();

    for layer in clouds {
        let phrase = match (&layer.cover, layer.base) {
            // A clear layer overrides everything reported around it.
            (CloudCover::Clear, _) => return "sky clear below 12,000 feet AGL".to_owned(),
            (CloudCover::Few, Some(base)) => format!("few clouds at {base} feet AGL"),
            (CloudCover::Scattered, Some(base)) => format!("scattered clouds at {base} feet AGL"),
            (CloudCover::Broken, Some(base)) => format!("broken clouds at {base} feet AGL"),
            (CloudCover::Overcast, Some(base)) => format!("overcast cloud deck at {base} feet AGL"),
            _ => continue,
        };
        phrases.push(phrase);
    }

    phrases.join(", ")
}
