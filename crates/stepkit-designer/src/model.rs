//! Canvas object model: icons, text boxes and step containers.

use serde::{Deserialize, Serialize};
use stepkit_core::{Bounds, Footprint, LayoutConfig, LocalCell, ObjectId, Point, Size};

/// Default colour for new steps.
pub const DEFAULT_STEP_COLOR: &str = "#4F46E5";
/// Default colour for new icons and text.
pub const DEFAULT_INK_COLOR: &str = "#000000";
/// Default content of a new text box.
pub const DEFAULT_TEXT: &str = "New text";
/// Default font size of a new text box.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Text weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Icon attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconAttrs {
    /// Image or emoji reference, resolved by the host
    pub glyph: String,
    pub label: String,
    pub color: String,
}

/// Text box attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAttrs {
    pub text: String,
    pub font_size: f64,
    pub font_weight: FontWeight,
    /// Rotation in degrees
    pub rotation: f64,
    pub color: String,
}

/// Step container attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepAttrs {
    /// Outer size in pixels; determines the internal grid resolution
    pub size: Size,
    pub color_theme: String,
    /// 1-based display sequence number
    pub order: u32,
    /// Presentation-only 3-D depth
    pub depth_hint: f64,
}

/// Kind-specific attributes of a canvas object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectKind {
    Icon(IconAttrs),
    Text(TextAttrs),
    Step(StepAttrs),
}

impl ObjectKind {
    /// Short lowercase name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Icon(_) => "icon",
            ObjectKind::Text(_) => "text",
            ObjectKind::Step(_) => "step",
        }
    }
}

/// Placement of an icon inside a step's internal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub step_id: ObjectId,
    pub cell: LocalCell,
}

/// A placed entity on the canvas.
///
/// `position` is always in outer-canvas pixels. For attached objects it is the
/// cached pixel equivalent of `attachment.cell`; the store keeps the two in
/// agreement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasObject {
    pub id: ObjectId,
    pub name: String,
    pub position: Point,
    pub footprint: Footprint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    pub kind: ObjectKind,
}

impl CanvasObject {
    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn is_step(&self) -> bool {
        matches!(self.kind, ObjectKind::Step(_))
    }

    pub fn is_icon(&self) -> bool {
        matches!(self.kind, ObjectKind::Icon(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ObjectKind::Text(_))
    }

    pub fn as_step(&self) -> Option<&StepAttrs> {
        match &self.kind {
            ObjectKind::Step(step) => Some(step),
            _ => None,
        }
    }

    pub(crate) fn as_step_mut(&mut self) -> Option<&mut StepAttrs> {
        match &mut self.kind {
            ObjectKind::Step(step) => Some(step),
            _ => None,
        }
    }

    /// The step this object is attached to, if any.
    pub fn attached_step(&self) -> Option<ObjectId> {
        self.attachment.map(|a| a.step_id)
    }

    /// The object's local cell, if attached.
    pub fn local_cell(&self) -> Option<LocalCell> {
        self.attachment.map(|a| a.cell)
    }

    /// Pixel size of the object on the outer canvas.
    ///
    /// Steps use their own size; icons and text use their footprint at the
    /// step cell pitch.
    pub fn pixel_size(&self, config: &LayoutConfig) -> Size {
        match &self.kind {
            ObjectKind::Step(step) => step.size,
            _ => self.footprint.to_pixels(config.step_cell_size),
        }
    }

    /// Bounding box on the outer canvas.
    pub fn bounds(&self, config: &LayoutConfig) -> Bounds {
        Bounds::from_origin_size(self.position, self.pixel_size(config))
    }

    /// Centre of the object's bounding box.
    pub fn center(&self, config: &LayoutConfig) -> Point {
        let (cx, cy) = self.bounds(config).center();
        Point::new(cx, cy)
    }
}

/// A behaviour-free description of a new object, validated at the host
/// boundary before it reaches the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectTemplate {
    Icon {
        glyph: String,
        label: String,
        #[serde(default)]
        footprint: Footprint,
    },
    Text {
        #[serde(default)]
        text: Option<String>,
    },
    Step {
        /// Size in preset cells; the step is `footprint * preset_cell_size` pixels
        footprint: Footprint,
    },
}

/// A typed property edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "property", content = "value", rename_all = "snake_case")]
pub enum PropertyUpdate {
    /// Any kind
    Name(String),
    /// Any kind; free objects keep their pixel position, steps are clamped
    Position(Point),
    /// Icon or text ink colour
    Color(String),
    /// Icon only
    Glyph(String),
    /// Icon only
    Label(String),
    /// Text only
    Text(String),
    /// Text only
    FontSize(f64),
    /// Text only
    FontWeight(FontWeight),
    /// Text only
    Rotation(f64),
    /// Step only
    StepColor(String),
    /// Step only; the internal grid is re-derived
    StepSize(Size),
    /// Step only
    DepthHint(f64),
}

impl PropertyUpdate {
    /// Property name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            PropertyUpdate::Name(_) => "name",
            PropertyUpdate::Position(_) => "position",
            PropertyUpdate::Color(_) => "color",
            PropertyUpdate::Glyph(_) => "glyph",
            PropertyUpdate::Label(_) => "label",
            PropertyUpdate::Text(_) => "text",
            PropertyUpdate::FontSize(_) => "font_size",
            PropertyUpdate::FontWeight(_) => "font_weight",
            PropertyUpdate::Rotation(_) => "rotation",
            PropertyUpdate::StepColor(_) => "step_color",
            PropertyUpdate::StepSize(_) => "step_size",
            PropertyUpdate::DepthHint(_) => "depth_hint",
        }
    }
}
