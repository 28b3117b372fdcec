pub mod errors;

pub use errors::{MotionError, MotionErrorCategory, MotionResult};

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Editable point-source parameter fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceField {
    MomentMag,
    Distance,
    Depth,
    StressDrop,
    GeoAtten,
    PathDurCoeff,
    PathAttenCoeff,
    PathAttenPower,
    ShearVelocity,
    Density,
    SiteAtten,
}

impl SourceField {
    pub const ALL: [SourceField; 11] = [
        Self::MomentMag,
        Self::Distance,
        Self::Depth,
        Self::StressDrop,
        Self::GeoAtten,
        Self::PathDurCoeff,
        Self::PathAttenCoeff,
        Self::PathAttenPower,
        Self::ShearVelocity,
        Self::Density,
        Self::SiteAtten,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MomentMag => "momentMag",
            Self::Distance => "distance",
            Self::Depth => "depth",
            Self::StressDrop => "stressDrop",
            Self::GeoAtten => "geoAtten",
            Self::PathDurCoeff => "pathDurCoeff",
            Self::PathAttenCoeff => "pathAttenCoeff",
            Self::PathAttenPower => "pathAttenPower",
            Self::ShearVelocity => "shearVelocity",
            Self::Density => "density",
            Self::SiteAtten => "siteAtten",
        }
    }

    /// Inclusive `(min, max)` range accepted at calculation time.
    pub const fn bounds(self) -> (f64, f64) {
        match self {
            Self::MomentMag => (4.0, 9.0),
            Self::Distance => (0.0, 2000.0),
            Self::Depth => (0.0, 20.0),
            Self::StressDrop => (5.0, 500.0),
            Self::GeoAtten => (0.0, 1.0),
            Self::PathDurCoeff => (0.0, 0.20),
            Self::PathAttenCoeff => (50.0, 10000.0),
            Self::PathAttenPower => (0.0, 1.0),
            Self::ShearVelocity => (2.0, 5.0),
            Self::Density => (2.4, 3.5),
            Self::SiteAtten => (0.001, 0.10),
        }
    }

    /// Location fields stay editable under every region preset.
    pub const fn is_scenario_field(self) -> bool {
        matches!(self, Self::MomentMag | Self::Distance | Self::Depth)
    }
}

impl Display for SourceField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::SourceField;

    #[test]
    fn bounds_are_ordered_for_every_field() {
        for field in SourceField::ALL {
            let (min, max) = field.bounds();
            assert!(min < max, "{field} bounds out of order");
        }
    }

    #[test]
    fn only_location_fields_are_scenario_fields() {
        let scenario: Vec<_> = SourceField::ALL
            .into_iter()
            .filter(|field| field.is_scenario_field())
            .collect();
        assert_eq!(
            scenario,
            vec![
                SourceField::MomentMag,
                SourceField::Distance,
                SourceField::Depth
            ]
        );
    }
}
