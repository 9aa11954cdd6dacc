use anyhow::{Context, Result, bail};
use clap::Parser;
use metar_core::{AviationWeather, Config, ObservationSource, report};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "metar", version, about = "Fetch and decode aviation weather observations")]
pub struct Cli {
    /// 4-letter ICAO station identifier, e.g. KPVD.
    pub station: String,

    /// Print the raw observation text instead of the decoded report.
    #[arg(long)]
    pub raw: bool,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        // Reject malformed identifiers before touching the network.
        let station = validate_station(&self.station)?;

        let config = Config::load().context("Failed to load configuration")?;
        let client = match config.endpoint {
            Some(endpoint) => AviationWeather::with_endpoint(endpoint),
            None => AviationWeather::new(),
        };

        let observation = client
            .observation(&station)
            .await
            .with_context(|| format!("Failed to fetch observation for {station}"))?;

        if self.raw {
            println!("{}", report::raw(&observation));
        } else {
            print!("{}", report::decoded(&observation));
        }

        Ok(())
    }
}

/// Station identifiers are exactly four letters; uppercased for the request.
fn validate_station(raw: &str) -> Result<String> {
    if raw.len() != 4 || !raw.chars().all(|c| c.is_ascii_alphabetic()) {
        bail!("'{raw}' is not a valid station identifier (expected 4 letters, e.g. KPVD)");
    }

    Ok(raw.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_stations_are_uppercased() {
        assert_eq!(validate_station("kpvd").unwrap(), "KPVD");
        assert_eq!(validate_station("EGLL").unwrap(), "EGLL");
    }

    #[test]
    fn invalid_stations_are_rejected() {
        for bad in ["", "KPV", "KPVDX", "K1VD", "KP-D", "KPV D"] {
            let err = validate_station(bad).unwrap_err();
            assert!(err.to_string().contains("not a valid station identifier"));
        }
    }
}
