use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::{RenderFrame, SvgRenderer};

pub const SVG_DATA_URL_PREFIX: &str = "data:image/svg+xml;charset=utf-8,";
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Identifier shared by the drawn document and the export file names.
#[must_use]
pub fn document_id(board: &str) -> String {
    format!("chartboard-{board}")
}

/// Downloadable views of one board's settled chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartExports {
    pub svg_file_name: String,
    pub svg_data_url: String,
    pub png_file_name: String,
    /// Present only when a raster backend is compiled in.
    pub png_data_url: Option<String>,
}

impl ChartExports {
    pub fn from_frame(board: &str, frame: &RenderFrame) -> ChartResult<Self> {
        let id = document_id(board);
        let svg = SvgRenderer::serialize(frame)?;
        let svg_data_url = format!("{SVG_DATA_URL_PREFIX}{}", urlencoding::encode(&svg));
        Ok(Self {
            svg_file_name: format!("{id}.svg"),
            svg_data_url,
            png_file_name: format!("{id}.png"),
            png_data_url: png_data_url(frame)?,
        })
    }

    /// Decodes the SVG document back out of its data URL.
    pub fn svg_document(&self) -> ChartResult<String> {
        let encoded = self
            .svg_data_url
            .strip_prefix(SVG_DATA_URL_PREFIX)
            .unwrap_or(&self.svg_data_url);
        urlencoding::decode(encoded)
            .map(|document| document.into_owned())
            .map_err(|err| ChartError::Export(format!("svg data url is not utf-8: {err}")))
    }
}

#[cfg(feature = "cairo-backend")]
fn png_data_url(frame: &RenderFrame) -> ChartResult<Option<String>> {
    use base64::Engine;

    use crate::render::{CairoRenderer, Renderer};

    let width = i32::try_from(frame.viewport.width)
        .map_err(|_| ChartError::Export("canvas width exceeds raster limits".to_owned()))?;
    let height = i32::try_from(frame.viewport.height)
        .map_err(|_| ChartError::Export("canvas height exceeds raster limits".to_owned()))?;
    let mut renderer = CairoRenderer::new(width, height)?;
    renderer.render(frame)?;
    let bytes = renderer.png_bytes()?;
    Ok(Some(format!(
        "{PNG_DATA_URL_PREFIX}{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )))
}

#[cfg(not(feature = "cairo-backend"))]
fn png_data_url(_frame: &RenderFrame) -> ChartResult<Option<String>> {
    Ok(None)
}
