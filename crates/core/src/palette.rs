//! Palette module - piece templates offered for dragging onto the grid
//!
//! The builtin catalog holds the seven tetrominoes plus a domino and a
//! monomino. A JSON catalog can replace it:
//!
//! ```json
//! {"pieces": [
//!   {"id": "T", "pattern": [[1,1,1],[0,1,0]], "enabled": true, "color": "#a000f0"},
//!   {"id": "plus", "pattern": [[0,1,0],[1,1,1],[0,1,0]]}
//! ]}
//! ```
//!
//! Disabled entries are skipped. Entries without a color take one from
//! [`COLOR_PALETTE`] by their position in the file. Patterns are trimmed.

use std::fmt;

use serde::Deserialize;

use crate::pattern::{Pattern, PatternError};
use crate::types::Rgb;

/// Colors handed out in entry order to catalog pieces without one.
pub const COLOR_PALETTE: [Rgb; 13] = [
    Rgb::new(0xf5, 0xbe, 0x02),
    Rgb::new(0x00, 0xf0, 0xf0),
    Rgb::new(0xa0, 0x00, 0xf0),
    Rgb::new(0x00, 0xf0, 0x00),
    Rgb::new(0xf0, 0x00, 0x00),
    Rgb::new(0x00, 0x00, 0xf0),
    Rgb::new(0xff, 0x69, 0xb4),
    Rgb::new(0x93, 0x70, 0xdb),
    Rgb::new(0x20, 0xb2, 0xaa),
    Rgb::new(0xff, 0x6b, 0x9d),
    Rgb::new(0x32, 0xcd, 0x32),
    Rgb::new(0xff, 0x45, 0x00),
    Rgb::new(0x1e, 0x90, 0xff),
];

const BUILTIN: [(&str, &[&[u8]]); 9] = [
    ("O", &[&[1, 1], &[1, 1]]),
    ("I", &[&[1, 1, 1, 1]]),
    ("T", &[&[1, 1, 1], &[0, 1, 0]]),
    ("S", &[&[0, 1, 1], &[1, 1, 0]]),
    ("Z", &[&[1, 1, 0], &[0, 1, 1]]),
    ("J", &[&[1, 0, 0], &[1, 1, 1]]),
    ("L", &[&[0, 0, 1], &[1, 1, 1]]),
    ("D", &[&[1, 1]]),
    ("M", &[&[1]]),
];

/// A shape that can be dragged out of the palette.
#[derive(Debug, Clone, PartialEq)]
pub struct PieceTemplate {
    pub kind: String,
    pub pattern: Pattern,
    pub color: Rgb,
}

/// Why a palette catalog could not be loaded.
#[derive(Debug)]
pub enum PaletteError {
    Json(serde_json::Error),
    Pattern { id: String, error: PatternError },
    Color { id: String, value: String },
    /// Every entry was disabled (or the list was empty)
    Empty,
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::Json(e) => write!(f, "invalid palette json: {}", e),
            PaletteError::Pattern { id, error } => write!(f, "piece {}: {}", id, error),
            PaletteError::Color { id, value } => {
                write!(f, "piece {}: invalid color {:?}", id, value)
            }
            PaletteError::Empty => f.write_str("palette has no enabled pieces"),
        }
    }
}

impl std::error::Error for PaletteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PaletteError::Json(e) => Some(e),
            PaletteError::Pattern { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PaletteError {
    fn from(value: serde_json::Error) -> Self {
        PaletteError::Json(value)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    pieces: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    id: String,
    pattern: Vec<Vec<u8>>,
    #[serde(default = "enabled_by_default")]
    enabled: bool,
    #[serde(default)]
    color: Option<String>,
}

fn enabled_by_default() -> bool {
    true
}

/// Ordered set of piece templates.
///
/// Templates can be rotated in place; that rotation is local to the palette
/// and is what a subsequent drag carries onto the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    templates: Vec<PieceTemplate>,
}

impl Palette {
    pub fn new(templates: Vec<PieceTemplate>) -> Self {
        Self { templates }
    }

    /// The builtin catalog.
    pub fn builtin() -> Self {
        let templates = BUILTIN
            .iter()
            .enumerate()
            .filter_map(|(i, (kind, rows))| {
                let pattern = Pattern::from_rows(rows).ok()?;
                Some(PieceTemplate {
                    kind: kind.to_string(),
                    pattern,
                    color: COLOR_PALETTE[i % COLOR_PALETTE.len()],
                })
            })
            .collect();
        Self::new(templates)
    }

    /// Parse a JSON catalog.
    pub fn from_json(json: &str) -> Result<Self, PaletteError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut templates = Vec::with_capacity(file.pieces.len());

        for (i, entry) in file.pieces.into_iter().enumerate() {
            if !entry.enabled {
                continue;
            }
            let pattern = Pattern::from_rows(&entry.pattern)
                .map_err(|error| PaletteError::Pattern {
                    id: entry.id.clone(),
                    error,
                })?
                .trim();
            let color = match entry.color {
                Some(value) => Rgb::from_hex(&value).ok_or_else(|| PaletteError::Color {
                    id: entry.id.clone(),
                    value: value.clone(),
                })?,
                None => COLOR_PALETTE[i % COLOR_PALETTE.len()],
            };
            templates.push(PieceTemplate {
                kind: entry.id,
                pattern,
                color,
            });
        }

        if templates.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Self::new(templates))
    }

    pub fn templates(&self) -> &[PieceTemplate] {
        &self.templates
    }

    pub fn get(&self, index: usize) -> Option<&PieceTemplate> {
        self.templates.get(index)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Rotate one template 90° clockwise. Returns `false` for a bad index.
    pub fn rotate(&mut self, index: usize) -> bool {
        let Some(template) = self.templates.get_mut(index) else {
            return false;
        };
        template.pattern = template.pattern.rotate_cw();
        true
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::builtin()
    }
}
