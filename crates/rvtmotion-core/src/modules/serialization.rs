use crate::modules::motion::SourceTheoryRvtMotion;
use crate::modules::source_theory::{SourceModel, SourceParameters};
use crate::modules::spectra::{FourierSpectrum, ResponseSpectrum};
use serde::Serialize;
use std::fs;
use std::path::Path;

pub fn format_fixed_f64(value: f64, width: usize, precision: usize) -> String {
    format!(
        "{value:>width$.precision$}",
        width = width,
        precision = precision
    )
}

pub fn format_scientific_f64(value: f64, width: usize, precision: usize) -> String {
    format!(
        "{value:>width$.precision$e}",
        width = width,
        precision = precision
    )
}

pub fn normalize_text_artifact(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

pub fn write_text_artifact(path: &Path, content: &str) -> std::io::Result<()> {
    fs::write(path, normalize_text_artifact(content))
}

pub fn render_fourier_table(fas: &FourierSpectrum) -> String {
    let mut out = format!("{:>14}{:>14}\n", "freq_hz", "fas_g_s");
    for (freq, amp) in fas.rows() {
        out.push_str(&format_scientific_f64(freq, 14, 5));
        out.push_str(&format_scientific_f64(amp, 14, 5));
        out.push('\n');
    }
    out
}

pub fn render_response_table(spectrum: &ResponseSpectrum) -> String {
    let mut out = format!(
        "# damping = {}\n{:>14}{:>14}\n",
        format_fixed_f64(spectrum.damping(), 0, 3),
        "period_s",
        "sa_g"
    );
    for (period, sa) in spectrum.rows() {
        out.push_str(&format_scientific_f64(period, 14, 5));
        out.push_str(&format_scientific_f64(sa, 14, 5));
        out.push('\n');
    }
    out
}

/// Serializable snapshot of a calculated motion.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionReport<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub source_model: SourceModel,
    pub parameters: SourceParameters,
    pub seismic_moment: f64,
    pub corner_frequency: f64,
    pub hypocentral_distance: f64,
    pub duration: f64,
    pub pga: f64,
    pub pgv: f64,
    pub fourier: &'a FourierSpectrum,
    pub response: &'a ResponseSpectrum,
}

impl<'a> MotionReport<'a> {
    /// `None` until the motion has been calculated.
    pub fn from_motion(motion: &'a SourceTheoryRvtMotion) -> Option<Self> {
        let output = motion.calculated()?;
        Some(Self {
            name: motion.name(),
            description: motion.description(),
            source_model: motion.source_model(),
            parameters: output.parameters,
            seismic_moment: output.seismic_moment,
            corner_frequency: output.corner_frequency,
            hypocentral_distance: output.hypocentral_distance,
            duration: output.duration,
            pga: output.pga,
            pgv: output.pgv,
            fourier: &output.fourier,
            response: &output.response,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n", self.name));
        if !self.description.is_empty() {
            out.push_str(&format!("# {}\n", self.description));
        }
        out.push_str(&format!("# source model = {}\n", self.source_model));
        out.push_str(&format!(
            "# Mw = {}  distance_km = {}  depth_km = {}  stress_drop_bar = {}\n",
            format_fixed_f64(self.parameters.moment_mag, 0, 2),
            format_fixed_f64(self.parameters.distance, 0, 2),
            format_fixed_f64(self.parameters.depth, 0, 2),
            format_fixed_f64(self.parameters.stress_drop, 0, 1),
        ));
        out.push_str(&format!(
            "# corner_freq_hz = {}  duration_s = {}  pga_g = {}  pgv_cm_s = {}\n",
            format_fixed_f64(self.corner_frequency, 0, 4),
            format_fixed_f64(self.duration, 0, 3),
            format_fixed_f64(self.pga, 0, 4),
            format_fixed_f64(self.pgv, 0, 3),
        ));
        out.push('\n');
        out.push_str(&render_response_table(self.response));
        out.push('\n');
        out.push_str(&render_fourier_table(self.fourier));
        out
    }
}
