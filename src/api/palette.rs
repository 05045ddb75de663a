use axum::Json;
use msx_quant::{NamedColor, Palette};
use serde::Serialize;

/// One palette entry as exposed by the API and the `palette` command.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaletteColor {
    pub index: usize,
    pub name: Option<&'static str>,
    pub hex: String,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Display label, e.g. `Dark Red - RGB(185, 94, 74)`
    pub label: String,
}

impl PaletteColor {
    fn from_entry(index: usize, entry: &NamedColor) -> Self {
        let rgb = entry.rgb();
        Self {
            index,
            name: entry.name(),
            hex: rgb.to_hex(),
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
            label: entry.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaletteResponse {
    pub colors: Vec<PaletteColor>,
}

impl PaletteResponse {
    pub fn from_palette(palette: &Palette) -> Self {
        Self {
            colors: palette
                .entries()
                .iter()
                .enumerate()
                .map(|(i, entry)| PaletteColor::from_entry(i, entry))
                .collect(),
        }
    }

    pub fn msx() -> Self {
        Self::from_palette(&Palette::msx())
    }
}

/// List the output palette
pub async fn handle_palette() -> Json<PaletteResponse> {
    Json(PaletteResponse::msx())
}
