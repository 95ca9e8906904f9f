use chrono::DateTime;
use chrono::Local;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::RehabRagError;
use crate::Result;

/// Highest accepted pain/difficulty rating
pub const MAX_LEVEL: u8 = 10;

/// Exercise in a rehabilitation plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub duration_seconds: Option<u32>,
    /// How to perform the exercise, safety notes
    pub instructions: Option<String>,
}

impl Exercise {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            sets: None,
            reps: None,
            duration_seconds: None,
            instructions: None,
        }
    }
}

/// Rehabilitation plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RehabPlan {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub goal: Option<String>,
    pub exercises: Vec<Exercise>,
}

impl RehabPlan {
    pub fn new(name: impl Into<String>, goal: Option<String>, exercises: Vec<Exercise>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start_date: Local::now().date_naive(),
            goal,
            exercises,
        }
    }

    pub fn find_exercise(&self, id: Uuid) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }
}

impl Default for RehabPlan {
    /// The initial bicep recovery plan
    fn default() -> Self {
        let exercises = vec![
            Exercise {
                description: Some(
                    "Gently bend elbow with assistance from other arm or therapist.".to_string(),
                ),
                sets: Some(3),
                reps: Some(10),
                instructions: Some("Move slowly within pain-free range.".to_string()),
                ..Exercise::new("Passive Elbow Flexion")
            },
            Exercise {
                description: Some(
                    "Attempt to flex bicep against an immovable object (like a table or wall) \
                     without moving the elbow."
                        .to_string(),
                ),
                sets: Some(3),
                duration_seconds: Some(5),
                instructions: Some(
                    "Hold contraction gently for 5 seconds, relax. Don't push into pain."
                        .to_string(),
                ),
                ..Exercise::new("Isometric Bicep Contraction")
            },
            Exercise {
                description: Some(
                    "Lying on your side, slide forearm towards shoulder.".to_string(),
                ),
                sets: Some(3),
                reps: Some(10),
                instructions: Some(
                    "Focus on feeling the bicep engage, even slightly.".to_string(),
                ),
                ..Exercise::new("Assisted Active Elbow Flexion (Gravity Eliminated)")
            },
        ];

        Self::new(
            "Initial Bicep Recovery Plan",
            Some("Improve bicep activation and range of motion.".to_string()),
            exercises,
        )
    }
}

/// Progress entry as submitted by the client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProgressEntry {
    /// Must reference an exercise in the current plan
    pub exercise_id: String,
    #[serde(default)]
    pub completed_sets: Option<u32>,
    #[serde(default)]
    pub completed_reps: Option<u32>,
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    /// 0 = no pain, 10 = max pain
    #[serde(default)]
    pub pain_level: Option<u8>,
    /// 0 = very easy, 10 = very hard
    #[serde(default)]
    pub difficulty_level: Option<u8>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewProgressEntry {
    /// Check rating ranges; the exercise reference is checked by the store
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("pain_level", self.pain_level),
            ("difficulty_level", self.difficulty_level),
        ] {
            if let Some(level) = value {
                if level > MAX_LEVEL {
                    return Err(RehabRagError::Validation(format!(
                        "{field} must be between 0 and {MAX_LEVEL}, got {level}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Recorded progress entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub exercise_id: Uuid,
    pub completed_sets: Option<u32>,
    pub completed_reps: Option<u32>,
    pub duration_seconds: Option<u32>,
    pub pain_level: Option<u8>,
    pub difficulty_level: Option<u8>,
    pub notes: Option<String>,
}

impl ProgressEntry {
    /// Stamp a validated submission with an id and the current time
    pub fn record(exercise_id: Uuid, entry: NewProgressEntry) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: Utc::now(),
            exercise_id,
            completed_sets: entry.completed_sets,
            completed_reps: entry.completed_reps,
            duration_seconds: entry.duration_seconds,
            pain_level: entry.pain_level,
            difficulty_level: entry.difficulty_level,
            notes: entry.notes,
        }
    }
}

/// Reference material shown in the resource center
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: Uuid,
    pub title: String,
    /// Full markdown content
    pub content: String,
    /// e.g. document, link, video, research_summary
    #[serde(rename = "type")]
    pub resource_type: String,
    pub source_url: Option<String>,
    pub added_date: DateTime<Utc>,
}

impl Resource {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            resource_type: "document".to_string(),
            source_url: None,
            added_date: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = resource_type.into();
        self
    }
}
