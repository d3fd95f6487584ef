use std::path::Path;

use anyhow::Context;

use crate::{
    animation::ease::Ease,
    foundation::core::{Canvas, Fps, Rgba8},
    foundation::error::{RevealError, RevealResult},
    order::policy::OrderPolicy,
    paint::mapper::{PaintMode, Weighting},
    paint::painter::PaintStyle,
    range::partition::VisibleRange,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Every recognized reveal option, loadable from JSON.
pub struct RevealConfig {
    /// Visible range over path indices, `None` for the whole drawing.
    pub range: Option<VisibleRange>,
    /// Ordering policy name. Unknown names fall back to original order.
    pub order: String,
    /// Time distribution across foreground segments.
    pub weighting: Weighting,
    /// One-by-one or all-at-once reveal. All-at-once forces original order.
    pub mode: PaintMode,
    /// Curve applied to clock progress.
    pub ease: Ease,
    /// Stroke overrides for the painter.
    pub stroke: PaintStyle,
    /// Output frame rate.
    pub fps: Fps,
    /// Frames in one run.
    pub duration_frames: u64,
    /// Output size.
    pub canvas: Canvas,
    /// Fit the drawing bounds into the canvas.
    pub scale_to_viewport: bool,
    /// Clear colour for rendered frames, transparent when `None`.
    pub background: Option<Rgba8>,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            range: None,
            order: OrderPolicy::Original.name().to_string(),
            weighting: Weighting::default(),
            mode: PaintMode::default(),
            ease: Ease::default(),
            stroke: PaintStyle::default(),
            fps: Fps::default(),
            duration_frames: 90,
            canvas: Canvas::default(),
            scale_to_viewport: true,
            background: Some(Rgba8::opaque(255, 255, 255)),
        }
    }
}

impl RevealConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(text: &str) -> RevealResult<Self> {
        let cfg: Self = serde_json::from_str(text).map_err(|e| RevealError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_json_file(path: &Path) -> RevealResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check values that do not depend on the drawing.
    ///
    /// The range is checked against the drawing when it is assigned to an engine.
    pub fn validate(&self) -> RevealResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if self.duration_frames == 0 {
            return Err(RevealError::validation("duration_frames must be > 0"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(RevealError::validation("canvas must be non-empty"));
        }
        if self.canvas.width > u32::from(u16::MAX) || self.canvas.height > u32::from(u16::MAX) {
            return Err(RevealError::validation("canvas exceeds 65535 pixels"));
        }
        if let Some(r) = self.range
            && r.start > r.end
        {
            return Err(RevealError::validation(format!(
                "range start {} must not exceed end {}",
                r.start, r.end
            )));
        }
        self.stroke.validate()
    }

    /// Resolved ordering policy.
    pub fn order_policy(&self) -> OrderPolicy {
        OrderPolicy::from_name(&self.order)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
