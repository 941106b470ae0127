//! Slime toy settings and preferences
//!
//! Persisted separately from scores in LocalStorage.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ELASTICITY, DEFAULT_VISCOSITY, SLIME_PARTICLE_COUNT};
use crate::error::{StoreError, UnknownName};
use crate::platform::KeyValueStore;
use crate::slime::FieldState;

/// Lowest viscosity the sliders may reach (0 would freeze every particle)
pub const MIN_VISCOSITY: f32 = 0.5;
/// Upper bound for the particle count slider
pub const MAX_PARTICLE_COUNT: usize = 1000;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl FromStr for QualityPreset {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(QualityPreset::Low),
            "medium" | "med" => Ok(QualityPreset::Medium),
            "high" => Ok(QualityPreset::High),
            _ => Err(UnknownName {
                what: "quality preset",
                name: s.to_string(),
            }),
        }
    }
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Slime particles for this preset
    pub fn particle_count(&self) -> usize {
        match self {
            QualityPreset::Low => SLIME_PARTICLE_COUNT / 2,
            QualityPreset::Medium => SLIME_PARTICLE_COUNT,
            QualityPreset::High => SLIME_PARTICLE_COUNT * 2,
        }
    }

    /// Whether to draw the connecting lines (quadratic in particle count)
    pub fn links_enabled(&self) -> bool {
        match self {
            QualityPreset::Low => false,
            QualityPreset::Medium => true,
            QualityPreset::High => true,
        }
    }
}

/// Slime settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Quality preset
    pub quality: QualityPreset,

    // === Physics ===
    /// Slider override for the particle count (None = preset)
    #[serde(default)]
    pub particle_count: Option<usize>,
    /// Per-tick damping (1.0 = none)
    pub viscosity: f32,
    /// Wall restitution (0.0 = stick, 1.0 = lossless)
    pub elasticity: f32,
    /// Cursor interaction on/off
    pub physics_enabled: bool,

    // === Visual ===
    /// Draw lines between nearby particles
    pub links: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            particle_count: None,
            viscosity: DEFAULT_VISCOSITY,
            elasticity: DEFAULT_ELASTICITY,
            physics_enabled: true,

            links: true,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (drops any slider override)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;
        self.particle_count = None;
        self.links = preset.links_enabled();
    }

    /// Effective particle count
    pub fn particle_count(&self) -> usize {
        self.particle_count
            .unwrap_or_else(|| self.quality.particle_count())
            .min(MAX_PARTICLE_COUNT)
    }

    /// Clamp tunables into the ranges the physics expects
    pub fn sanitized(mut self) -> Self {
        self.viscosity = if self.viscosity.is_finite() {
            self.viscosity.clamp(MIN_VISCOSITY, 1.0)
        } else {
            DEFAULT_VISCOSITY
        };
        self.elasticity = if self.elasticity.is_finite() {
            self.elasticity.clamp(0.0, 1.0)
        } else {
            DEFAULT_ELASTICITY
        };
        self
    }

    /// Copy the physics tunables into a field state
    pub fn apply_to(&self, state: &mut FieldState) {
        state.viscosity = self.viscosity;
        state.elasticity = self.elasticity;
        state.physics_enabled = self.physics_enabled;
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "mini_arcade_settings";

    /// Load settings, falling back to defaults on missing or corrupt data
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        match store.load_json::<Settings>(Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from storage");
                settings.sanitized()
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings
    pub fn save<S: KeyValueStore>(&self, store: &mut S) -> Result<(), StoreError> {
        store.save_json(Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
