use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Address components of a geocoding hit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl Address {
    /// Suggestion label: `"state, country"`, or just the country.
    pub fn label(&self) -> String {
        let country = self.country.as_deref().unwrap_or_default();
        match self.state.as_deref().filter(|s| !s.is_empty()) {
            Some(state) => format!("{state}, {country}"),
            None => country.to_owned(),
        }
    }

    /// Country code normalised to upper case, the key of the country lookup.
    pub fn country_key(&self) -> Option<String> {
        self.country_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_uppercase)
    }
}

/// One geocoding candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub address: Option<Address>,
}

impl Place {
    pub fn country_key(&self) -> Option<String> {
        self.address.as_ref().and_then(Address::country_key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub code: String,
    pub name: Option<String>,
    pub flag_url: Option<String>,
    pub capital: Option<String>,
    pub population: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub temperature: Option<f64>,
    pub description: Option<String>,
    pub icon: Option<String>,
}
