use super::region::RegionPreset;
use crate::domain::SourceField;
use serde::{Deserialize, Serialize};

/// Point-source scenario and attenuation parameters.
///
/// Units: distance and depth [km], stress drop [bars], shear velocity
/// [km/s], density [g/cc], site attenuation κ0 [s]. Q(f) = a·f^b with
/// `a = path_atten_coeff`, `b = path_atten_power`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceParameters {
    pub moment_mag: f64,
    pub distance: f64,
    pub depth: f64,
    pub stress_drop: f64,
    pub geo_atten: f64,
    pub path_dur_coeff: f64,
    pub path_atten_coeff: f64,
    pub path_atten_power: f64,
    pub shear_velocity: f64,
    pub density: f64,
    pub site_atten: f64,
}

impl Default for SourceParameters {
    fn default() -> Self {
        let mut params = Self {
            moment_mag: 6.5,
            distance: 20.0,
            depth: 8.0,
            stress_drop: 0.0,
            geo_atten: 0.0,
            path_dur_coeff: 0.0,
            path_atten_coeff: 0.0,
            path_atten_power: 0.0,
            shear_velocity: 0.0,
            density: 0.0,
            site_atten: 0.0,
        };
        params.apply_preset(&super::region::RegionModel::Wus.preset());
        params
    }
}

impl SourceParameters {
    pub fn get(&self, field: SourceField) -> f64 {
        match field {
            SourceField::MomentMag => self.moment_mag,
            SourceField::Distance => self.distance,
            SourceField::Depth => self.depth,
            SourceField::StressDrop => self.stress_drop,
            SourceField::GeoAtten => self.geo_atten,
            SourceField::PathDurCoeff => self.path_dur_coeff,
            SourceField::PathAttenCoeff => self.path_atten_coeff,
            SourceField::PathAttenPower => self.path_atten_power,
            SourceField::ShearVelocity => self.shear_velocity,
            SourceField::Density => self.density,
            SourceField::SiteAtten => self.site_atten,
        }
    }

    pub fn set(&mut self, field: SourceField, value: f64) {
        let slot = match field {
            SourceField::MomentMag => &mut self.moment_mag,
            SourceField::Distance => &mut self.distance,
            SourceField::Depth => &mut self.depth,
            SourceField::StressDrop => &mut self.stress_drop,
            SourceField::GeoAtten => &mut self.geo_atten,
            SourceField::PathDurCoeff => &mut self.path_dur_coeff,
            SourceField::PathAttenCoeff => &mut self.path_atten_coeff,
            SourceField::PathAttenPower => &mut self.path_atten_power,
            SourceField::ShearVelocity => &mut self.shear_velocity,
            SourceField::Density => &mut self.density,
            SourceField::SiteAtten => &mut self.site_atten,
        };
        *slot = value;
    }

    /// Overwrites every non-scenario field with the preset values.
    pub fn apply_preset(&mut self, preset: &RegionPreset) {
        self.stress_drop = preset.stress_drop;
        self.geo_atten = preset.geo_atten;
        self.path_dur_coeff = preset.path_dur_coeff;
        self.path_atten_coeff = preset.path_atten_coeff;
        self.path_atten_power = preset.path_atten_power;
        self.shear_velocity = preset.shear_velocity;
        self.density = preset.density;
        self.site_atten = preset.site_atten;
    }

    /// Copy with every field clamped into its documented range, plus the
    /// fields that had to move.
    pub fn clamped(&self) -> (Self, Vec<SourceField>) {
        let mut clamped = *self;
        let mut moved = Vec::new();

        for field in SourceField::ALL {
            let (min, max) = field.bounds();
            let value = self.get(field);
            let bounded = if value.is_nan() { min } else { value.clamp(min, max) };
            if bounded != value {
                clamped.set(field, bounded);
                moved.push(field);
            }
        }

        (clamped, moved)
    }

    /// Hypocentral distance [km] before any near-source floor.
    pub fn hypocentral_distance(&self) -> f64 {
        self.distance.hypot(self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::SourceParameters;
    use crate::domain::SourceField;
    use crate::modules::source_theory::RegionModel;

    #[test]
    fn default_parameters_follow_the_wus_preset() {
        let params = SourceParameters::default();
        let preset = RegionModel::Wus.preset();
        assert_eq!(params.moment_mag, 6.5);
        assert_eq!(params.stress_drop, preset.stress_drop);
        assert_eq!(params.path_atten_coeff, 180.0);
        assert_eq!(params.site_atten, 0.04);
    }

    #[test]
    fn field_accessors_round_trip_every_field() {
        let mut params = SourceParameters::default();
        for (index, field) in SourceField::ALL.into_iter().enumerate() {
            params.set(field, index as f64 + 0.25);
        }
        for (index, field) in SourceField::ALL.into_iter().enumerate() {
            assert_eq!(params.get(field), index as f64 + 0.25);
        }
    }

    #[test]
    fn clamping_reports_moved_fields() {
        let mut params = SourceParameters::default();
        params.moment_mag = 9.5;
        params.stress_drop = 1.0;
        params.site_atten = f64::NAN;

        let (clamped, moved) = params.clamped();
        assert_eq!(clamped.moment_mag, 9.0);
        assert_eq!(clamped.stress_drop, 5.0);
        assert_eq!(clamped.site_atten, 0.001);
        assert_eq!(
            moved,
            vec![
                SourceField::MomentMag,
                SourceField::StressDrop,
                SourceField::SiteAtten
            ]
        );

        let (_, untouched) = SourceParameters::default().clamped();
        assert!(untouched.is_empty());
    }

    #[test]
    fn hypocentral_distance_combines_distance_and_depth() {
        let mut params = SourceParameters::default();
        params.distance = 3.0;
        params.depth = 4.0;
        assert!((params.hypocentral_distance() - 5.0).abs() < 1.0e-12);
    }

    #[test]
    fn parameters_serialize_with_camel_case_keys() {
        let json = serde_json::to_value(SourceParameters::default()).expect("json");
        assert_eq!(json["momentMag"], 6.5);
        assert_eq!(json["pathAttenCoeff"], 180.0);
    }
}
