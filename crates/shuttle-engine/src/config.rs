//! Serializable court configuration.
//!
//! A [`CourtConfig`] is plain data, typically read from a JSON file. It is
//! validated when a [`RallySession`](crate::RallySession) is built from it,
//! which is the only place a [`ConfigError`] can surface.
//!
//! ```json
//! {
//!   "grid": { "rows": 4, "cols": 5 },
//!   "near_out_cells": [[1, 1], [1, 2]],
//!   "far_out_cells": [[4, 1], [4, 2]],
//!   "near_side": { "name": "Home", "color": [220, 20, 60] },
//!   "far_side": { "name": "Visitor", "color": [30, 144, 255] }
//! }
//! ```
//!
//! When `near_scoring_cells` is omitted the conventional rule is used
//! (see [`ScoringRule::standard`]).

use serde::{Deserialize, Serialize};

use crate::{
    ConfigError,
    core::{
        CellPos, CellRef, CourtLayout, DEFAULT_FAR_OUT_CELLS, DEFAULT_NEAR_OUT_CELLS, GridConfig,
        Side,
    },
    engine::ScoringRule,
};

/// 24-bit color, serialized as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const CRIMSON: Self = Self(220, 20, 60);
    pub const DODGER_BLUE: Self = Self(30, 144, 255);
}

/// Display name and color shown for one side of the court.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideStyle {
    pub name: String,
    pub color: Rgb,
}

impl SideStyle {
    pub fn new(name: impl Into<String>, color: Rgb) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// Which display style is currently attached to each fixed [`Side`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideDisplay {
    near: SideStyle,
    far: SideStyle,
}

impl SideDisplay {
    pub fn new(near: SideStyle, far: SideStyle) -> Result<Self, ConfigError> {
        for (side, style) in [(Side::Near, &near), (Side::Far, &far)] {
            if style.name.trim().is_empty() {
                return Err(ConfigError::EmptySideName { side });
            }
        }
        if near.name == far.name {
            return Err(ConfigError::DuplicateSideName { name: near.name });
        }
        Ok(Self { near, far })
    }

    #[must_use]
    pub fn get(&self, side: Side) -> &SideStyle {
        match side {
            Side::Near => &self.near,
            Side::Far => &self.far,
        }
    }

    #[must_use]
    pub fn name(&self, side: Side) -> &str {
        &self.get(side).name
    }

    #[must_use]
    pub fn color(&self, side: Side) -> Rgb {
        self.get(side).color
    }

    /// Exchanges names and colors between the two sides.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.near, &mut self.far);
    }
}

/// Everything a session needs to know about the court, as plain data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CourtConfig {
    pub grid: GridConfig,
    pub near_out_cells: Vec<CellPos>,
    pub far_out_cells: Vec<CellPos>,
    /// Cells that award the point to the near side in odd-numbered games.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub near_scoring_cells: Option<Vec<CellRef>>,
    pub near_side: SideStyle,
    pub far_side: SideStyle,
}

impl Default for CourtConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::STANDARD,
            near_out_cells: DEFAULT_NEAR_OUT_CELLS.to_vec(),
            far_out_cells: DEFAULT_FAR_OUT_CELLS.to_vec(),
            near_scoring_cells: None,
            near_side: SideStyle::new("Home", Rgb::CRIMSON),
            far_side: SideStyle::new("Visitor", Rgb::DODGER_BLUE),
        }
    }
}

impl CourtConfig {
    pub fn layout(&self) -> Result<CourtLayout, ConfigError> {
        CourtLayout::new(
            self.grid,
            self.near_out_cells.iter().copied(),
            self.far_out_cells.iter().copied(),
        )
    }

    pub fn scoring_rule(&self, layout: &CourtLayout) -> Result<ScoringRule, ConfigError> {
        match &self.near_scoring_cells {
            Some(cells) => ScoringRule::new(layout, cells.iter().copied()),
            None => Ok(ScoringRule::standard(layout)),
        }
    }

    pub fn side_display(&self) -> Result<SideDisplay, ConfigError> {
        SideDisplay::new(self.near_side.clone(), self.far_side.clone())
    }

    /// Runs every check a session build would run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = self.layout()?;
        self.scoring_rule(&layout)?;
        self.side_display()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = CourtConfig::default();
        config.validate().unwrap();
        assert_eq!(config.layout().unwrap(), CourtLayout::standard());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = CourtConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: CourtConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
        assert!(!json.contains("near_scoring_cells"));
    }

    #[test]
    fn test_parse_minimal_json() {
        let json = r#"{
            "grid": { "rows": 5, "cols": 5 },
            "near_out_cells": [[1, 1], [1, 5]],
            "far_out_cells": [[5, 1], [5, 5]],
            "near_scoring_cells": [{ "side": "far", "row": 3, "col": 3 }],
            "near_side": { "name": "A", "color": [255, 0, 0] },
            "far_side": { "name": "B", "color": [0, 0, 255] }
        }"#;
        let config: CourtConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.grid.rows(), 5);
        assert_eq!(config.grid.cell_width(), GridConfig::DEFAULT_CELL_SIZE);
        assert_eq!(config.near_side.color, Rgb(255, 0, 0));

        let layout = config.layout().unwrap();
        assert!(layout.is_out_cell(Side::Far, 5, 5));
        let rule = config.scoring_rule(&layout).unwrap();
        assert_eq!(
            rule.near_scoring_cells().collect::<Vec<_>>(),
            [CellRef::new(Side::Far, 3, 3)]
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut value = serde_json::to_value(CourtConfig::default()).unwrap();
        value["extra"] = serde_json::Value::Bool(true);
        assert!(serde_json::from_value::<CourtConfig>(value).is_err());
    }

    #[test]
    fn test_validation_errors() {
        let mut config = CourtConfig::default();
        config.far_out_cells.push((0, 3));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutCellOutOfRange { side: Side::Far, .. })
        ));

        let mut config = CourtConfig::default();
        config.near_scoring_cells = Some(vec![CellRef::new(Side::Near, 1, 6)]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ScoringCellOutOfRange { .. })
        ));

        let mut config = CourtConfig::default();
        config.far_side.name = "  ".to_owned();
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptySideName { side: Side::Far })
        );

        let mut config = CourtConfig::default();
        config.far_side.name = config.near_side.name.clone();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateSideName { .. })
        ));

        let json = r#"{
            "grid": { "rows": 0, "cols": 5 },
            "near_out_cells": [],
            "far_out_cells": [],
            "near_side": { "name": "A", "color": [0, 0, 0] },
            "far_side": { "name": "B", "color": [0, 0, 0] }
        }"#;
        let config: CourtConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyGrid { rows: 0, cols: 5 })
        );
    }

    #[test]
    fn test_side_display_swap() {
        let mut display = CourtConfig::default().side_display().unwrap();
        assert_eq!(display.name(Side::Near), "Home");
        display.swap();
        assert_eq!(display.name(Side::Near), "Visitor");
        assert_eq!(display.color(Side::Near), Rgb::DODGER_BLUE);
        assert_eq!(display.color(Side::Far), Rgb::CRIMSON);
    }
}
