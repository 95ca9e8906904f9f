//! In-memory store for the rehabilitation plan, progress log and resources
//!
//! Owned by the application context and handed to request handlers; nothing
//! is persisted across restarts.

use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::RehabRagError;
use crate::models::NewProgressEntry;
use crate::models::ProgressEntry;
use crate::models::RehabPlan;
use crate::models::Resource;
use crate::Result;

pub struct RehabStore {
    plan: RehabPlan,
    progress: RwLock<Vec<ProgressEntry>>,
    resources: RwLock<Vec<Resource>>,
}

impl RehabStore {
    pub fn new(plan: RehabPlan) -> Self {
        Self {
            plan,
            progress: RwLock::new(Vec::new()),
            resources: RwLock::new(Vec::new()),
        }
    }

    /// The current plan; fixed for the lifetime of the store
    pub const fn plan(&self) -> &RehabPlan {
        &self.plan
    }

    /// All progress entries in insertion order, optionally for one exercise
    pub async fn progress(&self, exercise_id: Option<Uuid>) -> Vec<ProgressEntry> {
        let progress = self.progress.read().await;
        progress
            .iter()
            .filter(|entry| exercise_id.map_or(true, |id| entry.exercise_id == id))
            .cloned()
            .collect()
    }

    /// Validate and record a progress entry
    ///
    /// # Errors
    /// - `UnknownExercise` if the exercise is not in the current plan
    /// - `Validation` if a rating is out of range
    pub async fn add_progress(&self, entry: NewProgressEntry) -> Result<ProgressEntry> {
        let exercise_id = Uuid::parse_str(entry.exercise_id.trim())
            .ok()
            .filter(|id| self.plan.find_exercise(*id).is_some())
            .ok_or_else(|| RehabRagError::UnknownExercise(entry.exercise_id.clone()))?;
        entry.validate()?;

        let recorded = ProgressEntry::record(exercise_id, entry);
        self.progress.write().await.push(recorded.clone());
        info!(
            "Added progress entry: {} for exercise {}",
            recorded.id, recorded.exercise_id
        );

        Ok(recorded)
    }

    pub async fn resources(&self) -> Vec<Resource> {
        self.resources.read().await.clone()
    }

    pub async fn add_resource(&self, resource: Resource) {
        info!("Registered resource: {}", resource.title);
        self.resources.write().await.push(resource);
    }
}

impl Default for RehabStore {
    fn default() -> Self {
        Self::new(RehabPlan::default())
    }
}
