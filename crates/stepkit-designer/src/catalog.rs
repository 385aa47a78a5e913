//! Built-in icon catalog, step presets and colour palette.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stepkit_core::Footprint;

use crate::model::ObjectTemplate;

/// Icon catalog category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconCategory {
    Travel,
    Fitness,
    Work,
    Food,
    Home,
    Study,
}

impl IconCategory {
    pub const ALL: [IconCategory; 6] = [
        IconCategory::Travel,
        IconCategory::Fitness,
        IconCategory::Work,
        IconCategory::Food,
        IconCategory::Home,
        IconCategory::Study,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IconCategory::Travel => "travel",
            IconCategory::Fitness => "fitness",
            IconCategory::Work => "work",
            IconCategory::Food => "food",
            IconCategory::Home => "home",
            IconCategory::Study => "study",
        }
    }
}

impl fmt::Display for IconCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IconCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IconCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown icon category: {s}"))
    }
}

/// One entry of the icon catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IconEntry {
    pub id: &'static str,
    pub glyph: &'static str,
    pub label: &'static str,
    pub category: IconCategory,
}

impl IconEntry {
    /// Catalog icons all occupy 2x2 cells.
    pub fn footprint(&self) -> Footprint {
        Footprint::ICON
    }

    /// A template that adds this icon to a canvas.
    pub fn template(&self) -> ObjectTemplate {
        ObjectTemplate::Icon {
            glyph: self.glyph.to_string(),
            label: self.label.to_string(),
            footprint: self.footprint(),
        }
    }
}

const fn icon(
    id: &'static str,
    glyph: &'static str,
    label: &'static str,
    category: IconCategory,
) -> IconEntry {
    IconEntry {
        id,
        glyph,
        label,
        category,
    }
}

use IconCategory::{Fitness, Food, Home, Study, Travel, Work};

/// The built-in icons, grouped by category.
pub static ICONS: &[IconEntry] = &[
    icon("plane", "✈️", "Plane", Travel),
    icon("luggage", "🧳", "Luggage", Travel),
    icon("passport", "📄", "Passport", Travel),
    icon("camera", "📷", "Camera", Travel),
    icon("map", "🗺️", "Map", Travel),
    icon("hotel", "🏨", "Hotel", Travel),
    icon("car", "🚗", "Car", Travel),
    icon("train", "🚄", "Train", Travel),
    icon("dumbbell", "🏋️", "Dumbbell", Fitness),
    icon("shoe", "👟", "Sneakers", Fitness),
    icon("water", "💧", "Water", Fitness),
    icon("towel", "🏃", "Towel", Fitness),
    icon("timer", "⏰", "Timer", Fitness),
    icon("yoga", "🧘", "Yoga", Fitness),
    icon("bicycle", "🚴", "Bicycle", Fitness),
    icon("swimming", "🏊", "Swimming", Fitness),
    icon("laptop", "💻", "Laptop", Work),
    icon("phone", "📱", "Phone", Work),
    icon("document", "📄", "Document", Work),
    icon("pen", "✏️", "Pen", Work),
    icon("briefcase", "💼", "Briefcase", Work),
    icon("meeting", "👥", "Meeting", Work),
    icon("calendar", "📅", "Calendar", Work),
    icon("email", "📧", "Email", Work),
    icon("apple", "🍎", "Apple", Food),
    icon("bread", "🍞", "Bread", Food),
    icon("milk", "🥛", "Milk", Food),
    icon("coffee", "☕", "Coffee", Food),
    icon("pizza", "🍕", "Pizza", Food),
    icon("salad", "🥗", "Salad", Food),
    icon("rice", "🍚", "Rice", Food),
    icon("soup", "🍲", "Stew", Food),
    icon("home", "🏠", "Home", Home),
    icon("bed", "🛏️", "Bed", Home),
    icon("shower", "🚿", "Shower", Home),
    icon("laundry", "🧺", "Laundry", Home),
    icon("cleaning", "🧹", "Cleaning", Home),
    icon("cooking", "🍳", "Cooking", Home),
    icon("shopping", "🛒", "Shopping", Home),
    icon("plant", "🌱", "Plant", Home),
    icon("book", "📚", "Book", Study),
    icon("pencil", "✏️", "Pencil", Study),
    icon("notebook", "📓", "Notebook", Study),
    icon("calculator", "🧮", "Calculator", Study),
    icon("globe", "🌍", "Globe", Study),
    icon("graduation", "🎓", "Graduation cap", Study),
    icon("microscope", "🔬", "Microscope", Study),
    icon("test", "📝", "Exam", Study),
];

/// Looks up a catalog icon by id.
pub fn find_icon(id: &str) -> Option<&'static IconEntry> {
    ICONS.iter().find(|entry| entry.id == id)
}

/// Filters the catalog.
///
/// `query` matches a case-insensitive label substring or a glyph substring;
/// an empty query matches everything. `category` of `None` means all.
pub fn search_icons(query: &str, category: Option<IconCategory>) -> Vec<&'static IconEntry> {
    let needle = query.to_lowercase();
    ICONS
        .iter()
        .filter(|entry| category.is_none_or(|c| entry.category == c))
        .filter(|entry| entry.label.to_lowercase().contains(&needle) || entry.glyph.contains(query))
        .collect()
}

/// A step size offered in the step palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepPreset {
    pub id: &'static str,
    pub label: &'static str,
    /// Size in preset cells
    pub footprint: Footprint,
}

impl StepPreset {
    pub fn template(&self) -> ObjectTemplate {
        ObjectTemplate::Step {
            footprint: self.footprint,
        }
    }
}

pub static STEP_PRESETS: &[StepPreset] = &[
    StepPreset {
        id: "2x2",
        label: "2x2 basic",
        footprint: Footprint {
            width: 2,
            height: 2,
        },
    },
    StepPreset {
        id: "3x3",
        label: "3x3 medium",
        footprint: Footprint {
            width: 3,
            height: 3,
        },
    },
    StepPreset {
        id: "4x4",
        label: "4x4 large",
        footprint: Footprint {
            width: 4,
            height: 4,
        },
    },
    StepPreset {
        id: "5x6",
        label: "5x6 wide",
        footprint: Footprint {
            width: 5,
            height: 6,
        },
    },
    StepPreset {
        id: "7x12",
        label: "7x12 mega",
        footprint: Footprint {
            width: 7,
            height: 12,
        },
    },
];

pub fn find_preset(id: &str) -> Option<&'static StepPreset> {
    STEP_PRESETS.iter().find(|preset| preset.id == id)
}

/// Colours offered for steps and text.
pub const PALETTE: [&str; 8] = [
    "#4F46E5", "#EF4444", "#10B981", "#F59E0B", "#8B5CF6", "#EC4899", "#6B7280", "#000000",
];
