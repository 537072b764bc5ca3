use std::{collections::BTreeSet, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::ValidationError,
    exercises::model::{EquipmentSelection, Exercise, Goal, MuscleGroup, UnknownValue},
};

use super::prescription::annotate;

/// "focus": fewer, higher-volume exercises. "variety": more, lighter ones.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Focus,
    #[default]
    Variety,
}

impl FromStr for Style {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "focus" => Ok(Style::Focus),
            "variety" => Ok(Style::Variety),
            _ => Err(UnknownValue {
                kind: "style",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlanSource {
    Catalog,
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedExercise {
    #[serde(flatten)]
    pub exercise: Exercise,
    pub sets: u32,
    pub reps: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub name: String,
    pub duration: u32,
    pub goal: Goal,
    pub focus: Vec<String>,
    pub style: Style,
    pub equipment: Vec<String>,
    pub source: PlanSource,
    pub exercises: Vec<AnnotatedExercise>,
}

impl WorkoutPlan {
    /// Annotates the picked exercises and wraps them with the request data.
    pub fn assemble(criteria: &PlanCriteria, source: PlanSource, picks: Vec<Exercise>) -> Self {
        Self {
            name: criteria.plan_name(),
            duration: criteria.duration,
            goal: criteria.goal,
            focus: criteria.focus_labels().to_vec(),
            style: criteria.style,
            equipment: criteria.equipment_labels().to_vec(),
            source,
            exercises: picks
                .into_iter()
                .map(|ex| annotate(ex, criteria.goal, criteria.style))
                .collect(),
        }
    }
}

/// Raw body of the plan endpoints. Every field is optional here so that a
/// missing field turns into a `ValidationError` instead of a 422.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePlanRequest {
    #[serde(default)]
    pub focus: Vec<String>,
    pub goal: Option<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub duration: Option<DurationInput>,
    pub style: Option<String>,
    #[serde(default)]
    pub blacklist: Vec<String>,
}

/// Focus areas with the `full_body` sentinel resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    FullBody,
    Groups(Vec<MuscleGroup>),
}

impl Focus {
    pub fn is_full_body(&self) -> bool {
        matches!(self, Focus::FullBody)
    }

    /// Muscle-group restriction for catalog queries; `None` for full body.
    pub fn groups(&self) -> Option<Vec<MuscleGroup>> {
        match self {
            Focus::FullBody => None,
            Focus::Groups(gs) => Some(gs.clone()),
        }
    }

    pub fn title(&self) -> String {
        match self {
            Focus::FullBody => "Full Body".to_string(),
            Focus::Groups(gs) => gs
                .iter()
                .map(|g| title_case(g.as_str()))
                .collect::<Vec<_>>()
                .join(" & "),
        }
    }
}

fn title_case(raw: &str) -> String {
    raw.split('_')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Validated plan parameters.
#[derive(Debug, Clone)]
pub struct PlanCriteria {
    pub focus: Focus,
    pub goal: Goal,
    pub equipment: EquipmentSelection,
    pub duration: u32,
    pub style: Style,
    pub blacklist: BTreeSet<String>,
    focus_labels: Vec<String>,
    equipment_labels: Vec<String>,
}

impl PlanCriteria {
    pub fn focus_labels(&self) -> &[String] {
        &self.focus_labels
    }

    pub fn equipment_labels(&self) -> &[String] {
        &self.equipment_labels
    }

    /// "30-min Chest & Arms Strength Workout"
    pub fn plan_name(&self) -> String {
        format!(
            "{}-min {} {} Workout",
            self.duration,
            self.focus.title(),
            self.goal.title()
        )
    }
}

impl TryFrom<GeneratePlanRequest> for PlanCriteria {
    type Error = ValidationError;

    fn try_from(req: GeneratePlanRequest) -> Result<Self, Self::Error> {
        let focus_labels = normalized(&req.focus);
        if focus_labels.is_empty() {
            return Err(ValidationError::Empty("focus area"));
        }
        let equipment_labels = normalized(&req.equipment);
        if equipment_labels.is_empty() {
            return Err(ValidationError::Empty("equipment type"));
        }
        let goal: Goal = req.goal.as_deref().ok_or(ValidationError::Missing("goal"))?.parse()?;
        let duration = req
            .duration
            .ok_or(ValidationError::Missing("duration"))?
            .minutes()?;
        let style = match req.style.as_deref().map(str::trim) {
            None | Some("") => Style::default(),
            Some(s) => s.parse()?,
        };

        let mut groups = Vec::new();
        for label in &focus_labels {
            let group: MuscleGroup = label.parse()?;
            if !groups.contains(&group) {
                groups.push(group);
            }
        }
        let focus = if groups.contains(&MuscleGroup::FullBody) {
            Focus::FullBody
        } else {
            Focus::Groups(groups)
        };

        Ok(Self {
            focus,
            goal,
            equipment: EquipmentSelection::from_names(&equipment_labels),
            duration,
            style,
            blacklist: req.blacklist.into_iter().collect(),
            focus_labels,
            equipment_labels,
        })
    }
}

fn normalized(values: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for v in values {
        let v = v.trim().to_lowercase();
        if !v.is_empty() && !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

/// Duration as posted: the form sends the slider value as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DurationInput {
    Whole(i64),
    Fractional(f64),
    Text(String),
}

impl From<i64> for DurationInput {
    fn from(minutes: i64) -> Self {
        DurationInput::Whole(minutes)
    }
}

impl DurationInput {
    /// Whole positive minutes. `30`, `30.0` and `"30"` are accepted.
    pub fn minutes(&self) -> Result<u32, ValidationError> {
        let invalid = || ValidationError::InvalidDuration(self.to_string());
        let whole = match self {
            DurationInput::Whole(n) => *n,
            DurationInput::Fractional(f) if f.is_finite() && f.fract() == 0.0 => *f as i64,
            DurationInput::Fractional(_) => return Err(invalid()),
            DurationInput::Text(t) => t.trim().parse::<i64>().map_err(|_| invalid())?,
        };
        if whole <= 0 {
            return Err(ValidationError::NonPositiveDuration);
        }
        u32::try_from(whole).map_err(|_| invalid())
    }
}

impl std::fmt::Display for DurationInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationInput::Whole(n) => write!(f, "{n}"),
            DurationInput::Fractional(x) => write!(f, "{x}"),
            DurationInput::Text(t) => f.write_str(t),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplacementRequest {
    pub muscle_group: MuscleGroup,
    pub goal: Goal,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub is_compound: bool,
    #[serde(default)]
    pub exclude_names: Vec<String>,
}

#[cfg(test)]
mod dto_tests {
    use super::*;

    fn request() -> GeneratePlanRequest {
        GeneratePlanRequest {
            focus: vec!["chest".into(), "arms".into()],
            goal: Some("strength".into()),
            equipment: vec!["bodyweight".into(), "dumbbells".into()],
            duration: Some(30.into()),
            style: Some("variety".into()),
            blacklist: vec!["Push-Up".into()],
        }
    }

    #[test]
    fn validates_and_names_the_plan() {
        let c = PlanCriteria::try_from(request()).unwrap();
        assert_eq!(c.focus, Focus::Groups(vec![MuscleGroup::Chest, MuscleGroup::Arms]));
        assert_eq!(c.goal, Goal::Strength);
        assert_eq!(c.style, Style::Variety);
        assert!(c.blacklist.contains("Push-Up"));
        assert_eq!(c.plan_name(), "30-min Chest & Arms Strength Workout");
    }

    #[test]
    fn full_body_wins_over_other_groups() {
        let mut req = request();
        req.focus = vec!["chest".into(), "full_body".into()];
        req.goal = Some("general_fitness".into());
        let c = PlanCriteria::try_from(req).unwrap();
        assert!(c.focus.is_full_body());
        assert_eq!(c.plan_name(), "30-min Full Body Fitness Workout");
    }

    #[test]
    fn rejects_missing_and_empty_fields() {
        let mut req = request();
        req.focus.clear();
        assert_eq!(
            PlanCriteria::try_from(req).unwrap_err(),
            ValidationError::Empty("focus area")
        );

        let mut req = request();
        req.equipment = vec!["  ".into()];
        assert_eq!(
            PlanCriteria::try_from(req).unwrap_err(),
            ValidationError::Empty("equipment type")
        );

        let mut req = request();
        req.goal = None;
        assert_eq!(
            PlanCriteria::try_from(req).unwrap_err(),
            ValidationError::Missing("goal")
        );

        let mut req = request();
        req.duration = Some(0.into());
        assert_eq!(
            PlanCriteria::try_from(req).unwrap_err(),
            ValidationError::NonPositiveDuration
        );

        let mut req = request();
        req.style = Some("chaos".into());
        assert!(matches!(
            PlanCriteria::try_from(req).unwrap_err(),
            ValidationError::Unknown(_)
        ));
    }

    #[test]
    fn style_defaults_to_variety() {
        let mut req = request();
        req.style = None;
        assert_eq!(PlanCriteria::try_from(req).unwrap().style, Style::Variety);
    }

    #[test]
    fn duration_accepts_numeric_strings() {
        let req: GeneratePlanRequest = serde_json::from_str(
            r#"{"focus":["legs"],"goal":"cardio","equipment":["all"],"duration":"45"}"#,
        )
        .unwrap();
        assert_eq!(PlanCriteria::try_from(req).unwrap().duration, 45);

        let req: GeneratePlanRequest = serde_json::from_str(
            r#"{"focus":["legs"],"goal":"cardio","equipment":["all"],"duration":20.0}"#,
        )
        .unwrap();
        assert_eq!(PlanCriteria::try_from(req).unwrap().duration, 20);
    }

    #[test]
    fn malformed_duration_is_not_reported_as_missing() {
        for raw in [r#""soon""#, r#""30.5""#, "30.5", "4294967296"] {
            let json = format!(
                r#"{{"focus":["legs"],"goal":"cardio","equipment":["all"],"duration":{raw}}}"#
            );
            let req: GeneratePlanRequest = serde_json::from_str(&json).unwrap();
            let err = PlanCriteria::try_from(req).unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidDuration(_)),
                "{raw}: {err:?}"
            );
        }

        let mut req = request();
        req.duration = Some(DurationInput::Text("-5".into()));
        assert_eq!(
            PlanCriteria::try_from(req).unwrap_err(),
            ValidationError::NonPositiveDuration
        );
    }

    #[test]
    fn annotated_exercise_flattens_the_record() {
        let ex = AnnotatedExercise {
            exercise: Exercise::new("Plank", MuscleGroup::Core, "bodyweight", false),
            sets: 3,
            reps: "10-15".into(),
        };
        let json = serde_json::to_value(&ex).unwrap();
        assert_eq!(json["name"], "Plank");
        assert_eq!(json["muscleGroup"], "core");
        assert_eq!(json["sets"], 3);
        assert_eq!(json["reps"], "10-15");
    }
}
