//! Tunable generation policy loaded from TOML.
//!
//! Every table falls back to its [`Default`] when omitted, so a config file
//! only needs to name the values it overrides:
//!
//! ```toml
//! [world]
//! width = 4096.0
//!
//! [tiers]
//! complex_from = 8
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Rect;
use crate::mapgen::RoomKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn is_positive(value: f32) -> bool {
    value > 0.0
}

fn is_non_negative(value: f32) -> bool {
    value >= 0.0
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.into() }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub world: WorldConfig,
    pub tiers: TierPolicy,
    pub themes: ThemeThresholds,
    pub layout: LayoutConfig,
    pub connector: ConnectorConfig,
    pub obstacles: ObstacleConfig,
    pub playability: PlayabilityConfig,
}

impl GenerationConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;
        self.tiers.validate()?;
        self.themes.validate()?;
        self.layout.validate()?;
        self.connector.validate()?;
        self.obstacles.validate()?;
        self.playability.validate()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    pub border_thickness: f32,
    /// Edge length of the occupancy grid used to wall off unclaimed space.
    pub fill_cell_size: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { width: 3072.0, height: 2304.0, border_thickness: 32.0, fill_cell_size: 128.0 }
    }
}

impl WorldConfig {
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.width) {
            return Err(invalid("world.width", format!("must be positive, got {}", self.width)));
        }
        if !is_positive(self.height) {
            return Err(invalid("world.height", format!("must be positive, got {}", self.height)));
        }
        if !is_positive(self.border_thickness)
            || self.border_thickness * 2.0 >= self.width.min(self.height)
        {
            return Err(invalid(
                "world.border_thickness",
                format!("{} does not fit the world extents", self.border_thickness),
            ));
        }
        if !is_positive(self.fill_cell_size) {
            return Err(invalid("world.fill_cell_size", "must be positive"));
        }
        Ok(())
    }
}

/// Wave thresholds that pick a layout strategy. Boss waves take precedence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierPolicy {
    pub standard_from: u32,
    pub complex_from: u32,
    pub endgame_from: u32,
    pub boss_every: u32,
}

impl Default for TierPolicy {
    fn default() -> Self {
        Self { standard_from: 5, complex_from: 10, endgame_from: 15, boss_every: 5 }
    }
}

impl TierPolicy {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.standard_from == 0 {
            return Err(invalid("tiers.standard_from", "must be at least 1"));
        }
        if self.standard_from > self.complex_from || self.complex_from > self.endgame_from {
            return Err(invalid(
                "tiers",
                format!(
                    "tier thresholds must be monotonic, got {} / {} / {}",
                    self.standard_from, self.complex_from, self.endgame_from
                ),
            ));
        }
        if self.boss_every == 0 {
            return Err(invalid("tiers.boss_every", "must be at least 1"));
        }
        Ok(())
    }
}

/// Morality thresholds checked highest-first, faith before corruption.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeThresholds {
    pub imperial_faith: f32,
    pub hive_faith: f32,
    pub daemon_corruption: f32,
    pub chaos_corruption: f32,
    pub hulk_corruption: f32,
}

impl Default for ThemeThresholds {
    fn default() -> Self {
        Self {
            imperial_faith: 80.0,
            hive_faith: 50.0,
            daemon_corruption: 80.0,
            chaos_corruption: 50.0,
            hulk_corruption: 30.0,
        }
    }
}

impl ThemeThresholds {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.hive_faith > self.imperial_faith {
            return Err(invalid("themes.hive_faith", "must not exceed imperial_faith"));
        }
        if self.hulk_corruption > self.chaos_corruption
            || self.chaos_corruption > self.daemon_corruption
        {
            return Err(invalid("themes", "corruption thresholds must be ordered"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub intro_margin: f32,
    pub grid_columns: usize,
    pub grid_rows: usize,
    /// Share of a grid cell a standard-layout room occupies before jitter.
    pub grid_fill: f32,
    pub grid_jitter: f32,
    pub satellite_count: usize,
    pub satellite_radius_ratio: f32,
    pub satellite_width: f32,
    pub satellite_height: f32,
    pub hub_ratio: f32,
    pub boss_base_ratio: f32,
    pub boss_ratio_per_wave: f32,
    pub boss_max_ratio: f32,
    pub approach_width: f32,
    pub approach_height: f32,
    pub approach_inset: f32,
    pub endgame_ratio: f32,
    pub endgame_offset_ratio: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            intro_margin: 200.0,
            grid_columns: 3,
            grid_rows: 3,
            grid_fill: 0.7,
            grid_jitter: 0.1,
            satellite_count: 6,
            satellite_radius_ratio: 0.35,
            satellite_width: 320.0,
            satellite_height: 260.0,
            hub_ratio: 0.3,
            boss_base_ratio: 0.4,
            boss_ratio_per_wave: 0.01,
            boss_max_ratio: 0.6,
            approach_width: 300.0,
            approach_height: 240.0,
            approach_inset: 60.0,
            endgame_ratio: 0.45,
            endgame_offset_ratio: 0.35,
        }
    }
}

impl LayoutConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.intro_margin < 0.0 {
            return Err(invalid("layout.intro_margin", "must not be negative"));
        }
        if self.grid_columns == 0 || self.grid_rows == 0 {
            return Err(invalid("layout.grid_columns", "grid must have at least one cell"));
        }
        if !(self.grid_fill > 0.0 && self.grid_fill <= 1.0) {
            return Err(invalid("layout.grid_fill", "must be in (0, 1]"));
        }
        if self.grid_jitter < 0.0 || self.grid_jitter >= self.grid_fill {
            return Err(invalid("layout.grid_jitter", "must be in [0, grid_fill)"));
        }
        if self.satellite_count == 0 {
            return Err(invalid("layout.satellite_count", "must be at least 1"));
        }
        if !is_positive(self.boss_base_ratio) {
            return Err(invalid("layout.boss_base_ratio", "must be positive"));
        }
        if self.boss_base_ratio > self.boss_max_ratio || self.boss_max_ratio > 1.0 {
            return Err(invalid("layout.boss_max_ratio", "must be in [boss_base_ratio, 1]"));
        }
        let ratios = [
            ("layout.hub_ratio", self.hub_ratio),
            ("layout.endgame_ratio", self.endgame_ratio),
        ];
        for (field, ratio) in ratios {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(invalid(field, "must be in (0, 1]"));
            }
        }
        let sizes = [
            ("layout.satellite_width", self.satellite_width),
            ("layout.satellite_height", self.satellite_height),
            ("layout.approach_width", self.approach_width),
            ("layout.approach_height", self.approach_height),
        ];
        for (field, size) in sizes {
            if !is_positive(size) {
                return Err(invalid(field, format!("must be positive, got {size}")));
            }
        }
        let offsets = [
            ("layout.approach_inset", self.approach_inset),
            ("layout.satellite_radius_ratio", self.satellite_radius_ratio),
            ("layout.endgame_offset_ratio", self.endgame_offset_ratio),
            ("layout.boss_ratio_per_wave", self.boss_ratio_per_wave),
        ];
        for (field, offset) in offsets {
            if !is_non_negative(offset) {
                return Err(invalid(field, format!("must not be negative, got {offset}")));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    pub corridor_width: f32,
    pub extra_corridor_width: f32,
    pub extra_connections: usize,
    pub extra_attempts_per_connection: usize,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            corridor_width: 80.0,
            extra_corridor_width: 120.0,
            extra_connections: 2,
            extra_attempts_per_connection: 4,
        }
    }
}

impl ConnectorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.corridor_width) || !is_positive(self.extra_corridor_width) {
            return Err(invalid("connector.corridor_width", "corridor widths must be positive"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    pub base_density: f32,
    pub density_normalization: f32,
    /// Distance every obstacle keeps from its room's boundary.
    pub boundary_margin: f32,
    pub kind_multipliers: KindMultipliers,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            base_density: 0.08,
            density_normalization: 10_000.0,
            boundary_margin: 50.0,
            kind_multipliers: KindMultipliers::default(),
        }
    }
}

impl ObstacleConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_density < 0.0 {
            return Err(invalid("obstacles.base_density", "must not be negative"));
        }
        if !is_positive(self.density_normalization) {
            return Err(invalid("obstacles.density_normalization", "must be positive"));
        }
        if self.boundary_margin < 0.0 {
            return Err(invalid("obstacles.boundary_margin", "must not be negative"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindMultipliers {
    pub arena: f32,
    pub corridor: f32,
    pub chamber: f32,
    pub chokepoint: f32,
    pub sanctuary: f32,
    pub maze: f32,
}

impl Default for KindMultipliers {
    fn default() -> Self {
        Self { arena: 0.5, corridor: 0.0, chamber: 1.0, chokepoint: 1.5, sanctuary: 0.3, maze: 2.0 }
    }
}

impl KindMultipliers {
    pub fn for_kind(&self, kind: RoomKind) -> f32 {
        match kind {
            RoomKind::Arena => self.arena,
            RoomKind::Corridor => self.corridor,
            RoomKind::Chamber => self.chamber,
            RoomKind::Chokepoint => self.chokepoint,
            RoomKind::Sanctuary => self.sanctuary,
            RoomKind::Maze => self.maze,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayabilityConfig {
    /// Share of an arena's width and height kept free around its center.
    pub center_zone_ratio: f32,
    pub spawn_inset: f32,
    pub edge_lane_width: f32,
    pub chamber_cover_scale: f32,
}

impl Default for PlayabilityConfig {
    fn default() -> Self {
        Self {
            center_zone_ratio: 0.3,
            spawn_inset: 100.0,
            edge_lane_width: 80.0,
            chamber_cover_scale: 0.6,
        }
    }
}

impl PlayabilityConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.center_zone_ratio > 0.0 && self.center_zone_ratio < 1.0) {
            return Err(invalid("playability.center_zone_ratio", "must be in (0, 1)"));
        }
        if self.spawn_inset < 0.0 || self.edge_lane_width < 0.0 {
            return Err(invalid("playability", "insets must not be negative"));
        }
        if !is_positive(self.chamber_cover_scale) {
            return Err(invalid("playability.chamber_cover_scale", "must be positive"));
        }
        Ok(())
    }
}
