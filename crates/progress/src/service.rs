//! Progress service: registration, enrollment, progress and points.

use std::collections::BTreeMap;
use learnpath_core::{
    base_points, Course, CourseId, Identifier, LedgerError, Milestone, OperationResult,
    ProfileSummary, Progress, ProgressItem, ProgressResult, RegistrationResult, Result,
    UserProfile, UNKNOWN_COURSE_TITLE,
};
use learnpath_storage::{LedgerStore, MemoryStore, ProgressDelta};
use tracing::{debug, info, warn};

use crate::catalog::CourseCatalog;
use crate::config::{ConfigError, LedgerConfig};
use crate::milestone::MilestoneTable;

/// Owner of all ledger state.
///
/// Mutating operations take `&mut self` and each runs to completion before
/// returning, so no caller can observe a half-applied update. A failed
/// operation leaves every store unchanged.
pub struct ProgressService<S: LedgerStore = MemoryStore> {
    catalog: CourseCatalog,
    milestones: MilestoneTable,
    store: S,
}

impl ProgressService<MemoryStore> {
    /// Create a service over an empty in-memory store.
    pub fn new(config: LedgerConfig) -> std::result::Result<Self, ConfigError> {
        Self::with_store(config, MemoryStore::new())
    }
}

impl Default for ProgressService<MemoryStore> {
    fn default() -> Self {
        Self {
            catalog: CourseCatalog::seeded(),
            milestones: MilestoneTable::from_seed(LedgerConfig::default().milestones),
            store: MemoryStore::new(),
        }
    }
}

impl<S: LedgerStore> ProgressService<S> {
    /// Create a service over the given store.
    pub fn with_store(config: LedgerConfig, store: S) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            catalog: CourseCatalog::new(config.courses)?,
            milestones: MilestoneTable::from_seed(config.milestones),
            store,
        })
    }

    // === Registration and enrollment ===

    /// Register an identifier. Registering again is a successful no-op.
    pub fn register(&mut self, id: &Identifier) -> RegistrationResult {
        let message = if self.store.insert_user(id) {
            info!("Registered user {}", id);
            "User registered successfully."
        } else {
            debug!("User {} already registered", id);
            "User already registered."
        };

        RegistrationResult {
            success: true,
            message: message.to_string(),
            identifier: id.clone(),
        }
    }

    /// Whether an identifier has registered.
    pub fn is_registered(&self, id: &Identifier) -> bool {
        self.store.contains_user(id)
    }

    /// Enroll a registered user in a catalog course.
    pub fn enroll(&mut self, id: &Identifier, course: CourseId) -> OperationResult {
        let result = self.try_enroll(id, course);
        if let Err(e) = &result {
            warn!("Enrollment of {} in {} rejected: {}", id, course, e);
        }
        result.map(|()| "Enrollment successful.".to_string()).into()
    }

    fn try_enroll(&mut self, id: &Identifier, course: CourseId) -> Result<()> {
        if !self.store.contains_user(id) {
            return Err(LedgerError::NotRegistered(id.clone()));
        }
        if !self.catalog.exists(course) {
            return Err(LedgerError::CourseNotFound(course));
        }
        if self.store.load_progress(id, course).is_some() {
            return Err(LedgerError::AlreadyEnrolled(course));
        }

        self.store.insert_enrollment(id, course)?;
        info!("User {} enrolled in course {}", id, course);
        Ok(())
    }

    // === Progress ===

    /// Record completed lessons and passed quizzes for an enrolled course.
    ///
    /// Counts are increments, not totals. Milestones whose threshold equals
    /// the new cumulative lesson count add their bonus to this report.
    pub fn update_course_progress(
        &mut self,
        id: &Identifier,
        course: CourseId,
        lessons_completed: i64,
        quizzes_passed: i64,
    ) -> ProgressResult {
        match self.try_update_progress(id, course, lessons_completed, quizzes_passed) {
            Ok((new_points, total_points)) => ProgressResult {
                success: true,
                message: "Progress updated.".to_string(),
                new_points,
                total_points,
                error: None,
            },
            Err(e) => {
                warn!("Progress update for {} in {} rejected: {}", id, course, e);
                ProgressResult::failed(&e, self.get_points(id))
            }
        }
    }

    fn try_update_progress(
        &mut self,
        id: &Identifier,
        course: CourseId,
        lessons: i64,
        quizzes: i64,
    ) -> Result<(u64, u64)> {
        if !self.store.contains_user(id) {
            return Err(LedgerError::NotRegistered(id.clone()));
        }
        let current = self
            .store
            .load_progress(id, course)
            .ok_or(LedgerError::NotEnrolled(course))?;

        let lessons = count_arg("lessonsCompleted", lessons)?;
        let quizzes = count_arg("quizzesPassed", quizzes)?;

        let earned = base_points(lessons, quizzes)
            .ok_or_else(|| LedgerError::invalid("points for this report are out of range"))?;
        let cumulative = current
            .lessons_completed
            .checked_add(lessons)
            .ok_or_else(|| LedgerError::invalid("lesson count out of range"))?;

        let bonus = self.milestones.calculate_bonus(course, cumulative);
        let points = earned
            .checked_add(bonus)
            .ok_or_else(|| LedgerError::invalid("points for this report are out of range"))?;

        let (_, total) = self.store.apply_progress(
            id,
            course,
            ProgressDelta { lessons, quizzes, points },
        )?;
        if bonus > 0 {
            info!(
                "User {} reached {} lessons in course {}: +{} bonus",
                id, cumulative, course, bonus
            );
        }
        debug!("User {} course {}: +{} points, total {}", id, course, points, total);
        Ok((points, total))
    }

    // === Milestones (trusted) ===

    /// Replace the milestone list of a course.
    ///
    /// Callers are not authorized here; gate this operation in the host.
    pub fn update_milestones_for_course(
        &mut self,
        course: CourseId,
        milestones: Vec<Milestone>,
    ) -> OperationResult {
        let count = milestones.len();
        let result = self.milestones.replace(course, milestones);
        match &result {
            Ok(()) => info!("Replaced milestones of course {} ({} entries)", course, count),
            Err(e) => warn!("Milestone update for {} rejected: {}", course, e),
        }
        result.map(|()| "Milestones updated.".to_string()).into()
    }

    /// Milestones currently defined for a course.
    pub fn get_milestones(&self, course: CourseId) -> Vec<Milestone> {
        self.milestones.get(course).to_vec()
    }

    // === Queries ===

    /// All courses in catalog order.
    pub fn list_courses(&self) -> &[Course] {
        self.catalog.list()
    }

    /// Progress records keyed by course. Empty if unregistered.
    pub fn get_progress(&self, id: &Identifier) -> BTreeMap<CourseId, Progress> {
        self.store.list_progress(id).into_iter().collect()
    }

    /// One listing row per enrolled course, in enrollment order.
    pub fn list_my_progress(&self, id: &Identifier) -> Vec<ProgressItem> {
        self.store
            .list_progress(id)
            .into_iter()
            .map(|(course_id, p)| ProgressItem {
                course_id,
                title: self
                    .catalog
                    .find(course_id)
                    .map(|c| c.title.clone())
                    .unwrap_or_else(|| UNKNOWN_COURSE_TITLE.to_string()),
                lessons_completed: p.lessons_completed,
                quizzes_passed: p.quizzes_passed,
                points: p.points,
            })
            .collect()
    }

    /// Running total, 0 if unregistered.
    pub fn get_points(&self, id: &Identifier) -> u64 {
        self.store.total_points(id).unwrap_or(0)
    }

    /// Profile of an identifier; the empty profile if unregistered.
    pub fn get_profile(&self, id: &Identifier) -> UserProfile {
        if !self.store.contains_user(id) {
            return UserProfile::empty(id.clone());
        }
        UserProfile {
            identifier: id.clone(),
            total_points: self.get_points(id),
            enrolled_courses: self.store.list_enrollments(id),
        }
    }

    /// Totals and enrollments of any identifier. Read-only and unauthorized.
    pub fn get_profile_by_identifier(&self, id: &Identifier) -> ProfileSummary {
        self.get_profile(id).into()
    }

    /// Check that every user's total equals the sum of their course points.
    ///
    /// Returns the first identifier whose books do not balance.
    pub fn audit(&self) -> std::result::Result<(), Identifier> {
        for id in self.store.list_users() {
            let sum: u64 = self.store.list_progress(&id).iter().map(|(_, p)| p.points).sum();
            if self.store.total_points(&id) != Some(sum) {
                return Err(id);
            }
        }
        Ok(())
    }
}

/// Validate a signed count argument.
fn count_arg(name: &str, value: i64) -> Result<u32> {
    if value < 0 {
        return Err(LedgerError::invalid(format!("{} must not be negative (got {})", name, value)));
    }
    u32::try_from(value).map_err(|_| LedgerError::invalid(format!("{} is too large (got {})", name, value)))
}
