use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Equipment value that is always allowed, whatever the user selected.
pub const BODYWEIGHT: &str = "bodyweight";

/// Equipment sentinel meaning "no equipment restriction".
pub const ALL_EQUIPMENT: &str = "all";

/// Primary target of an exercise.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
    Glutes,
    FullBody,
    Cardio,
}

impl MuscleGroup {
    /// Groups the full-body balancer tries to cover.
    pub const MAJOR: [MuscleGroup; 7] = [
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Legs,
        MuscleGroup::Shoulders,
        MuscleGroup::Core,
        MuscleGroup::Arms,
        MuscleGroup::Glutes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "chest",
            MuscleGroup::Back => "back",
            MuscleGroup::Legs => "legs",
            MuscleGroup::Shoulders => "shoulders",
            MuscleGroup::Arms => "arms",
            MuscleGroup::Core => "core",
            MuscleGroup::Glutes => "glutes",
            MuscleGroup::FullBody => "full_body",
            MuscleGroup::Cardio => "cardio",
        }
    }

    pub fn is_major(&self) -> bool {
        Self::MAJOR.contains(self)
    }

    /// Groups that can stand in for this one when searching for a replacement.
    pub fn related(&self) -> &'static [MuscleGroup] {
        match self {
            MuscleGroup::Chest => &[MuscleGroup::Arms],
            MuscleGroup::Back => &[MuscleGroup::Arms],
            MuscleGroup::Legs => &[MuscleGroup::Glutes],
            MuscleGroup::Glutes => &[MuscleGroup::Legs],
            MuscleGroup::Arms => &[MuscleGroup::Chest, MuscleGroup::Back],
            MuscleGroup::Shoulders => &[MuscleGroup::Arms, MuscleGroup::Chest],
            MuscleGroup::Core | MuscleGroup::FullBody | MuscleGroup::Cardio => &[],
        }
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for MuscleGroup {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let group = match s.trim().to_lowercase().as_str() {
            "chest" => MuscleGroup::Chest,
            "back" => MuscleGroup::Back,
            "legs" => MuscleGroup::Legs,
            "shoulders" => MuscleGroup::Shoulders,
            "arms" => MuscleGroup::Arms,
            "core" => MuscleGroup::Core,
            "glutes" => MuscleGroup::Glutes,
            "full_body" => MuscleGroup::FullBody,
            "cardio" => MuscleGroup::Cardio,
            _ => {
                return Err(UnknownValue {
                    kind: "muscle group",
                    value: s.to_string(),
                })
            }
        };
        Ok(group)
    }
}

/// Descriptive category; overlaps with `is_compound`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Strength,
    Cardio,
    Compound,
    Isolation,
    Warmup,
    Cooldown,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Strength => "strength",
            Category::Cardio => "cardio",
            Category::Compound => "compound",
            Category::Isolation => "isolation",
            Category::Warmup => "warmup",
            Category::Cooldown => "cooldown",
        }
    }
}

impl FromStr for Category {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strength" => Ok(Category::Strength),
            "cardio" => Ok(Category::Cardio),
            "compound" => Ok(Category::Compound),
            "isolation" => Ok(Category::Isolation),
            "warmup" => Ok(Category::Warmup),
            "cooldown" => Ok(Category::Cooldown),
            _ => Err(UnknownValue {
                kind: "category",
                value: s.to_string(),
            }),
        }
    }
}

/// Fitness goal of a requested workout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Strength,
    Cardio,
    GeneralFitness,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Strength => "strength",
            Goal::Cardio => "cardio",
            Goal::GeneralFitness => "general_fitness",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Goal::Strength => "Strength",
            Goal::Cardio => "Cardio",
            Goal::GeneralFitness => "Fitness",
        }
    }
}

impl FromStr for Goal {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strength" => Ok(Goal::Strength),
            "cardio" => Ok(Goal::Cardio),
            "general_fitness" => Ok(Goal::GeneralFitness),
            _ => Err(UnknownValue {
                kind: "goal",
                value: s.to_string(),
            }),
        }
    }
}

/// One catalog entry. Every field is always present so filters never have to
/// check for missing keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub muscle_group: MuscleGroup,
    #[serde(default = "default_equipment")]
    pub equipment: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub is_compound: bool,
    #[serde(default)]
    pub exercise_family: Option<String>,
    #[serde(default)]
    pub exclude_from_cardio: bool,
    #[serde(default)]
    pub exclude_from_strength: bool,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

fn default_equipment() -> String {
    BODYWEIGHT.to_string()
}

impl Exercise {
    pub fn new(name: &str, muscle_group: MuscleGroup, equipment: &str, is_compound: bool) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            description: None,
            muscle_group,
            equipment: equipment.to_string(),
            category: Category::Strength,
            is_compound,
            exercise_family: None,
            exclude_from_cardio: false,
            exclude_from_strength: false,
            instructions: None,
            image_url: None,
            tips: Vec::new(),
        }
    }

    pub fn family(mut self, family: &str) -> Self {
        self.exercise_family = Some(family.to_string());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn describe(mut self, description: &str, instructions: &str) -> Self {
        self.description = Some(description.to_string());
        self.instructions = Some(instructions.to_string());
        self
    }

    pub fn tips(mut self, tips: &[&str]) -> Self {
        self.tips = tips.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn not_for_cardio(mut self) -> Self {
        self.exclude_from_cardio = true;
        self
    }

    pub fn not_for_strength(mut self) -> Self {
        self.exclude_from_strength = true;
        self
    }

    /// Goal-based exclusion: flagged exercises never appear for that goal.
    pub fn allowed_for(&self, goal: Goal) -> bool {
        match goal {
            Goal::Cardio => !self.exclude_from_cardio,
            Goal::Strength => !self.exclude_from_strength,
            Goal::GeneralFitness => true,
        }
    }
}

/// The user's equipment choice, with the "all" sentinel resolved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EquipmentSelection {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl EquipmentSelection {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for name in names {
            let name = name.as_ref().trim().to_lowercase();
            if name == ALL_EQUIPMENT {
                return EquipmentSelection::All;
            }
            if !name.is_empty() {
                set.insert(name);
            }
        }
        set.insert(BODYWEIGHT.to_string());
        EquipmentSelection::Only(set)
    }

    pub fn allows(&self, equipment: &str) -> bool {
        match self {
            EquipmentSelection::All => true,
            EquipmentSelection::Only(set) => equipment == BODYWEIGHT || set.contains(equipment),
        }
    }

    /// Effective equipment list for store queries; `None` means unrestricted.
    pub fn to_query(&self) -> Option<Vec<String>> {
        match self {
            EquipmentSelection::All => None,
            EquipmentSelection::Only(set) => Some(set.iter().cloned().collect()),
        }
    }
}
