//! Static step catalog for the yogurt-fermentation activity.
//!
//! Content is fixed at process start and never mutated. Every lookup by a
//! typed [`StepOrdinal`] is infallible; raw ordinals enter through
//! [`StepCatalog::lookup`], which rejects anything outside 1..=7.

use shared::{
    domain::{AnimationKind, ItemId, StepOrdinal, ZoneId},
    error::DomainError,
};

/// Id of the single drop target accepting placements for the active step.
pub const DROP_ZONE_ID: &str = "drop-zone";

pub fn drop_zone() -> ZoneId {
    ZoneId::new(DROP_ZONE_ID)
}

/// Item the learner must drag into the step's target zone.
#[derive(Debug, Clone)]
pub struct RequiredItem {
    pub id: ItemId,
    pub name: &'static str,
    pub glyph: &'static str,
}

impl RequiredItem {
    fn new(id: &str, name: &'static str, glyph: &'static str) -> Self {
        Self {
            id: ItemId::new(id),
            name,
            glyph,
        }
    }
}

/// Explanatory panel shown beneath a step.
#[derive(Debug, Clone)]
pub struct ScienceNote {
    pub title: &'static str,
    pub body: &'static str,
    /// Offers a pronunciation playback control when set.
    pub has_pronunciation: bool,
}

#[derive(Debug, Clone)]
pub struct StepDefinition {
    pub ordinal: StepOrdinal,
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub science: ScienceNote,
    pub required_items: Vec<RequiredItem>,
    pub target_zone_label: &'static str,
    pub animation: AnimationKind,
    /// Zero-item step completed by an explicit check action instead of
    /// placements.
    pub requires_inspection: bool,
}

impl StepDefinition {
    pub fn requires_placements(&self) -> bool {
        !self.required_items.is_empty()
    }

    pub fn required_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.required_items.iter().map(|item| &item.id)
    }

    pub fn required_item(&self, id: &ItemId) -> Option<&RequiredItem> {
        self.required_items.iter().find(|item| &item.id == id)
    }
}

/// Ordered, immutable list of the seven activity steps.
#[derive(Debug, Clone)]
pub struct StepCatalog {
    steps: Vec<StepDefinition>,
}

impl StepCatalog {
    /// The standard yogurt-making sequence.
    pub fn standard() -> Self {
        let steps = vec![
            StepDefinition {
                ordinal: StepOrdinal::FIRST,
                title: "Step 1: Mix warm water (40-50°C)",
                description:
                    "Drag the hot and cold water into the mixing jar to reach 40-50°C",
                image: "step-1",
                science: ScienceNote {
                    title: "🌡️ Why 40-50°C?",
                    body: "This temperature is the ideal environment for lactic acid \
                           bacteria to grow. Above 60°C the bacteria die; below 35°C \
                           they barely work.",
                    has_pronunciation: false,
                },
                required_items: vec![
                    RequiredItem::new("hot-water", "Hot water", "🫖"),
                    RequiredItem::new("cold-water", "Cold water", "🧊"),
                ],
                target_zone_label: "Mixing jar 🫙",
                animation: AnimationKind::Pouring,
                requires_inspection: false,
            },
            StepDefinition {
                ordinal: ordinal(2),
                title: "Step 2: Dissolve the condensed milk",
                description: "Drag the can of condensed milk into the jar of warm water",
                image: "step-2",
                science: ScienceNote {
                    title: "🥛 What the condensed milk is for",
                    body: "Condensed milk supplies lactose, the main food source for \
                           lactic acid bacteria. The bacteria eat this sugar and turn \
                           it into lactic acid.",
                    has_pronunciation: false,
                },
                required_items: vec![RequiredItem::new("condensed-milk", "Condensed milk", "🥫")],
                target_zone_label: "Warm water jar 🫙",
                animation: AnimationKind::Pouring,
                requires_inspection: false,
            },
            StepDefinition {
                ordinal: ordinal(3),
                title: "Step 3: Add the yogurt starter",
                description:
                    "Drag the starter yogurt into the milk mixture to seed the ferment",
                image: "step-3",
                science: ScienceNote {
                    title: "🦠 Lactobacillus bacteria",
                    body: "The starter carries Lactobacillus, the main character of \
                           fermentation! These bacteria multiply, turn sugar into \
                           lactic acid, and thicken the milk into yogurt.",
                    has_pronunciation: true,
                },
                required_items: vec![RequiredItem::new("yogurt-starter", "Yogurt starter", "🥛")],
                target_zone_label: "Milk mixture 🥣",
                animation: AnimationKind::Pouring,
                requires_inspection: false,
            },
            StepDefinition {
                ordinal: ordinal(4),
                title: "Step 4: Pour into cups",
                description: "Drag the milk cup to fill the glass jars",
                image: "step-4",
                science: ScienceNote {
                    title: "🫙 Why seal the lids?",
                    body: "Lactic acid bacteria are anaerobic; they do not need \
                           oxygen. Sealed lids keep air out so the bacteria work at \
                           their best.",
                    has_pronunciation: false,
                },
                required_items: vec![RequiredItem::new("milk-cup", "Milk cup", "🥛")],
                target_zone_label: "Glass jars 🫙",
                animation: AnimationKind::Pouring,
                requires_inspection: false,
            },
            StepDefinition {
                ordinal: ordinal(5),
                title: "Step 5: Incubate (8-12 hours)",
                description: "Drag each jar into the warm incubation box",
                image: "step-5",
                science: ScienceNote {
                    title: "⏰ The fermentation magic!",
                    body: "Over 8-12 hours the bacteria multiply millions of times, \
                           eat the lactose, and produce lactic acid. The acid curdles \
                           the milk proteins and the yogurt takes shape.",
                    has_pronunciation: false,
                },
                required_items: vec![
                    RequiredItem::new("jar-1", "Jar 1", "🫙"),
                    RequiredItem::new("jar-2", "Jar 2", "🫙"),
                    RequiredItem::new("jar-3", "Jar 3", "🫙"),
                    RequiredItem::new("jar-4", "Jar 4", "🫙"),
                ],
                target_zone_label: "Incubation box 📦",
                animation: AnimationKind::BacteriaMultiply,
                requires_inspection: false,
            },
            StepDefinition {
                ordinal: ordinal(6),
                title: "Step 6: Inspect the result",
                description: "Press the check button to examine the experiment!",
                image: "step-6",
                science: ScienceNote {
                    title: "✅ Signs of success",
                    body: "Good yogurt is set and does not run, ivory white, mildly \
                           fragrant and slightly sour. The tang comes from the lactic \
                           acid the bacteria produced!",
                    has_pronunciation: false,
                },
                required_items: Vec::new(),
                target_zone_label: "",
                animation: AnimationKind::None,
                requires_inspection: true,
            },
            StepDefinition {
                ordinal: StepOrdinal::LAST,
                title: "Step 7: Chill and store",
                description: "Drag the finished yogurt into the refrigerator",
                image: "step-7",
                science: ScienceNote {
                    title: "❄️ Why refrigerate?",
                    body: "Cold (2-4°C) puts the bacteria to sleep. The yogurt stops \
                           getting more sour and keeps its quality for 7-14 days.",
                    has_pronunciation: false,
                },
                required_items: vec![RequiredItem::new("yogurt-cup", "Yogurt jar", "🫙")],
                target_zone_label: "Refrigerator 🧊",
                animation: AnimationKind::Snowflakes,
                requires_inspection: false,
            },
        ];

        Self { steps }
    }

    pub fn get(&self, ordinal: StepOrdinal) -> &StepDefinition {
        &self.steps[ordinal.index()]
    }

    /// Raw-ordinal entry point for untyped callers.
    pub fn lookup(&self, ordinal: u8) -> Result<&StepDefinition, DomainError> {
        Ok(self.get(StepOrdinal::new(ordinal)?))
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }
}

fn ordinal(n: u8) -> StepOrdinal {
    StepOrdinal::new(n).expect("catalog ordinal")
}
