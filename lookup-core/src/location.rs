use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::LocationError, model::Coordinates};

/// Platform capability that yields the device position.
#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    /// Whether a position can be requested at all.
    fn is_supported(&self) -> bool;

    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Position supplied up front, e.g. from command-line flags.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationProvider for FixedLocation {
    fn is_supported(&self) -> bool {
        true
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// Platform without any location capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationProvider for NoLocation {
    fn is_supported(&self) -> bool {
        false
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unsupported)
    }
}

/// Builds a provider from optional latitude/longitude flags.
pub fn provider_from_coords(lat: Option<f64>, lon: Option<f64>) -> Box<dyn LocationProvider> {
    match (lat, lon) {
        (Some(latitude), Some(longitude)) => Box::new(FixedLocation(Coordinates {
            latitude,
            longitude,
        })),
        _ => Box::new(NoLocation),
    }
}
