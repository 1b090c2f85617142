pub mod reference;

use serde::{Deserialize, Serialize};

/// Session-lived project location. City is only meaningful under a state and
/// zip code only under a city; `apply` keeps those dependencies consistent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectLocation {
    pub state: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub address: Option<String>,
}

/// Partial update merged into a [`ProjectLocation`]. Absent fields are left
/// untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationUpdate {
    pub state: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub address: Option<String>,
}

impl LocationUpdate {
    pub fn state(value: impl Into<String>) -> Self {
        Self {
            state: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn city(value: impl Into<String>) -> Self {
        Self {
            city: Some(value.into()),
            ..Self::default()
        }
    }
}

impl ProjectLocation {
    /// Merge the update. Assigning a different state clears the dependent
    /// city and zip code; assigning a different city clears the zip code.
    /// Re-assigning the current value leaves dependents alone.
    pub fn apply(&mut self, update: LocationUpdate) {
        if let Some(state) = update.state {
            if self.state.as_deref() != Some(state.as_str()) {
                self.city = None;
                self.zip_code = None;
            }
            self.state = Some(state);
        }

        if let Some(city) = update.city {
            if self.city.as_deref() != Some(city.as_str()) {
                self.zip_code = None;
            }
            self.city = Some(city);
        }

        if let Some(zip_code) = update.zip_code {
            self.zip_code = Some(zip_code);
        }

        if let Some(address) = update.address {
            self.address = Some(address);
        }
    }
}
