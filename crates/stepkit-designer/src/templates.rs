//! Quick-create kits: ready-made starting layouts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stepkit_core::{Footprint, ObjectId, Point, Result};
use tracing::debug;

use crate::model::{FontWeight, ObjectTemplate, PropertyUpdate};
use crate::object_store::ObjectStore;

/// Colour of the kit title text.
pub const KIT_TITLE_COLOR: &str = "#ffffff";
/// Font size of the kit title text.
pub const KIT_TITLE_FONT_SIZE: f64 = 32.0;

const KIT_TITLE_POSITION: Point = Point { x: 50.0, y: 50.0 };
const KIT_STEP_FOOTPRINT: Footprint = Footprint {
    width: 4,
    height: 4,
};
const KIT_STEPS: [(Point, &str); 4] = [
    (Point { x: 100.0, y: 150.0 }, "#4F46E5"),
    (Point { x: 350.0, y: 150.0 }, "#EF4444"),
    (Point { x: 100.0, y: 350.0 }, "#10B981"),
    (Point { x: 350.0, y: 350.0 }, "#F59E0B"),
];

/// A quick-create template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickKit {
    Workout,
    Travel,
    Survival,
    Project,
    Study,
    Moving,
}

impl QuickKit {
    pub const ALL: [QuickKit; 6] = [
        QuickKit::Workout,
        QuickKit::Travel,
        QuickKit::Survival,
        QuickKit::Project,
        QuickKit::Study,
        QuickKit::Moving,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuickKit::Workout => "workout",
            QuickKit::Travel => "travel",
            QuickKit::Survival => "survival",
            QuickKit::Project => "project",
            QuickKit::Study => "study",
            QuickKit::Moving => "moving",
        }
    }

    /// Poster title.
    pub fn title(&self) -> &'static str {
        match self {
            QuickKit::Workout => "FITNESS KIT",
            QuickKit::Travel => "TRAVEL KIT",
            QuickKit::Survival => "SURVIVAL KIT",
            QuickKit::Project => "PROJECT KIT",
            QuickKit::Study => "STUDY KIT",
            QuickKit::Moving => "MOVING KIT",
        }
    }

    /// CSS background the host paints behind the canvas.
    pub fn background(&self) -> &'static str {
        match self {
            QuickKit::Workout => "linear-gradient(135deg, #ff9a9e 0%, #fecfef 50%, #fecfef 100%)",
            QuickKit::Travel => "linear-gradient(135deg, #a8edea 0%, #fed6e3 100%)",
            QuickKit::Survival => "linear-gradient(135deg, #d299c2 0%, #fef9d7 100%)",
            QuickKit::Project => "linear-gradient(135deg, #89f7fe 0%, #66a6ff 100%)",
            QuickKit::Study => "linear-gradient(135deg, #fc4a1a 0%, #f7b733 100%)",
            QuickKit::Moving => "linear-gradient(135deg, #4facfe 0%, #00f2fe 100%)",
        }
    }

    /// Whether the kit starts with a title and four steps.
    pub fn has_starter_layout(&self) -> bool {
        matches!(
            self,
            QuickKit::Workout | QuickKit::Travel | QuickKit::Survival
        )
    }

    /// Adds the kit's starter objects to `store`, returning their ids.
    pub fn populate(&self, store: &mut ObjectStore) -> Result<Vec<ObjectId>> {
        if !self.has_starter_layout() {
            return Ok(Vec::new());
        }
        let mut ids = Vec::with_capacity(1 + KIT_STEPS.len());

        let title = store.add(ObjectTemplate::Text {
            text: Some(self.title().to_string()),
        });
        for update in [
            PropertyUpdate::Name("Title".to_string()),
            PropertyUpdate::Position(KIT_TITLE_POSITION),
            PropertyUpdate::Color(KIT_TITLE_COLOR.to_string()),
            PropertyUpdate::FontSize(KIT_TITLE_FONT_SIZE),
            PropertyUpdate::FontWeight(FontWeight::Bold),
        ] {
            store.update_property(title, update)?;
        }
        ids.push(title);

        for (position, color) in KIT_STEPS {
            let step = store.add_step(KIT_STEP_FOOTPRINT);
            store.update_property(step, PropertyUpdate::Position(position))?;
            store.update_property(step, PropertyUpdate::StepColor(color.to_string()))?;
            ids.push(step);
        }
        debug!("Populated {} kit with {} objects", self, ids.len());
        Ok(ids)
    }
}

impl fmt::Display for QuickKit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuickKit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        QuickKit::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown quick-create kit: {s}"))
    }
}
