//! Session state tying the pieces together: location edits swap the active
//! scoring template, and location or radius changes re-run the amenity
//! survey and write its score into the location category.

use crate::scoring::location::reference::{self, Coordinates};
use crate::scoring::location::{LocationUpdate, ProjectLocation};
use crate::scoring::proximity::{
    self, Amenity, AmenityKind, LocationScore, DEFAULT_MAX_AMENITIES,
};
use crate::scoring::rubric::{Scorecard, ScoringCategory, LOCATION_CATEGORY};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::debug;

/// Survey radius bounds in kilometers, matching the original slider.
pub const MIN_RADIUS_KM: f64 = 1.0;
pub const MAX_RADIUS_KM: f64 = 10.0;

/// In-memory session: one project location, one active scorecard, and the
/// latest amenity survey. Lives for the process; nothing is persisted.
#[derive(Debug)]
pub struct QapSession {
    location: ProjectLocation,
    scorecard: Scorecard,
    radius_km: f64,
    amenities: Vec<Amenity>,
    position: Option<Coordinates>,
    rng: ChaCha8Rng,
}

impl QapSession {
    /// Session with OS-derived randomness for the amenity survey.
    pub fn new() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }

    /// Session with a fixed seed, for reproducible surveys.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(rng: ChaCha8Rng) -> Self {
        Self {
            location: ProjectLocation::default(),
            scorecard: Scorecard::default(),
            radius_km: MIN_RADIUS_KM,
            amenities: Vec::new(),
            position: None,
            rng,
        }
    }

    pub fn location(&self) -> &ProjectLocation {
        &self.location
    }

    pub fn scorecard(&self) -> &Scorecard {
        &self.scorecard
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    pub fn amenities(&self) -> &[Amenity] {
        &self.amenities
    }

    /// Merge a location update. A state change swaps in that state's zeroed
    /// template; the amenity survey then re-runs against the new position.
    pub fn set_location(&mut self, update: LocationUpdate) {
        let previous_state = self.location.state.clone();
        self.location.apply(update);

        if self.location.state != previous_state {
            if let Some(state) = self.location.state.as_deref() {
                if self.scorecard.swap_template(state) {
                    debug!(state, "swapped scoring template");
                }
            }
        }

        self.resurvey();
    }

    /// Clamp the survey radius to the supported band and re-run the survey.
    pub fn set_radius(&mut self, radius_km: f64) {
        self.radius_km = radius_km.clamp(MIN_RADIUS_KM, MAX_RADIUS_KM);
        self.resurvey();
    }

    /// Direct slider edit on one category. Unknown ids are silently ignored.
    pub fn set_category_points(&mut self, category_id: &str, points: i32) {
        self.scorecard.update_category_score(category_id, points);
    }

    /// Regenerate the amenity set for the current position and radius, and
    /// fold the result into the location category. Without a mapped position
    /// the survey is empty and the category is zeroed.
    fn resurvey(&mut self) {
        self.position = match (self.location.state.as_deref(), self.location.city.as_deref()) {
            (Some(state), Some(city)) => reference::city_coordinates(state, city),
            _ => None,
        };

        match self.position {
            Some(center) => {
                self.amenities = proximity::generate_amenities(
                    center,
                    self.radius_km,
                    DEFAULT_MAX_AMENITIES,
                    &mut self.rng,
                );
                let score = self.location_score();
                debug!(
                    count = self.amenities.len(),
                    radius_km = self.radius_km,
                    normalized = score.normalized,
                    "amenity survey refreshed"
                );
                self.scorecard
                    .update_category_score(LOCATION_CATEGORY, i32::from(score.normalized));
            }
            None => {
                self.amenities.clear();
                self.scorecard.update_category_score(LOCATION_CATEGORY, 0);
            }
        }
    }

    fn location_score(&self) -> LocationScore {
        let max_points = self
            .scorecard
            .category(LOCATION_CATEGORY)
            .map(|category| category.max_points)
            .unwrap_or(0);
        proximity::location_score(&self.amenities, max_points)
    }

    /// Point-in-time view for API responses and report generation.
    pub fn snapshot(&self) -> SessionSnapshot {
        let template = self.scorecard.template();
        let amenity_counts = proximity::count_by_kind(&self.amenities)
            .into_iter()
            .map(|(kind, count)| AmenityCountEntry {
                kind,
                kind_label: kind.label(),
                count,
            })
            .collect();

        SessionSnapshot {
            location: self.location.clone(),
            state: template.state,
            categories: template.categories.clone(),
            total_max_points: template.total_max_points,
            total_score: self.scorecard.total_score(),
            score_percentage: self.scorecard.score_percentage(),
            radius_km: self.radius_km,
            position: self.position,
            amenities: self.amenities.clone(),
            amenity_counts,
        }
    }
}

impl Default for QapSession {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AmenityCountEntry {
    pub kind: AmenityKind,
    pub kind_label: &'static str,
    pub count: usize,
}

/// Serializable snapshot of the whole session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub location: ProjectLocation,
    pub state: &'static str,
    pub categories: Vec<ScoringCategory>,
    pub total_max_points: u16,
    pub total_score: u32,
    pub score_percentage: f64,
    pub radius_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Coordinates>,
    pub amenities: Vec<Amenity>,
    pub amenity_counts: Vec<AmenityCountEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select_texas_austin(session: &mut QapSession) {
        session.set_location(LocationUpdate::state("Texas"));
        session.set_location(LocationUpdate::city("Austin"));
    }

    #[test]
    fn selecting_a_mapped_city_runs_the_survey() {
        let mut session = QapSession::seeded(11);
        select_texas_austin(&mut session);

        assert!(!session.amenities().is_empty());
        let location_points = session
            .scorecard()
            .category(LOCATION_CATEGORY)
            .map(|c| c.current_points)
            .expect("location category present");
        assert!(location_points > 0);
        assert!(location_points <= 17);
    }

    #[test]
    fn state_change_swaps_template_and_zeroes_scores() {
        let mut session = QapSession::seeded(11);
        select_texas_austin(&mut session);
        session.set_category_points("financial", 12);

        session.set_location(LocationUpdate::state("California"));

        let snapshot = session.snapshot();
        assert_eq!(snapshot.state, "California");
        assert_eq!(snapshot.total_max_points, 81);
        // City was cleared by the cascade, so the survey is empty and the
        // financial edit did not survive the swap.
        assert!(snapshot.amenities.is_empty());
        assert_eq!(snapshot.total_score, 0);
    }

    #[test]
    fn radius_is_clamped_and_triggers_resurvey() {
        let mut session = QapSession::seeded(3);
        select_texas_austin(&mut session);

        session.set_radius(25.0);
        assert_eq!(session.radius_km(), MAX_RADIUS_KM);
        assert_eq!(session.amenities().len(), DEFAULT_MAX_AMENITIES);

        session.set_radius(0.0);
        assert_eq!(session.radius_km(), MIN_RADIUS_KM);
        assert!(session.amenities().len() < DEFAULT_MAX_AMENITIES);
    }

    #[test]
    fn unmapped_city_clears_survey_and_location_score() {
        let mut session = QapSession::seeded(8);
        select_texas_austin(&mut session);
        assert!(!session.amenities().is_empty());

        session.set_location(LocationUpdate::city("El Paso"));
        assert!(session.amenities().is_empty());
        assert_eq!(
            session
                .scorecard()
                .category(LOCATION_CATEGORY)
                .map(|c| c.current_points),
            Some(0)
        );
    }

    #[test]
    fn snapshot_totals_match_scorecard_identity() {
        let mut session = QapSession::seeded(21);
        select_texas_austin(&mut session);
        session.set_category_points("financial", 9);
        session.set_category_points("readiness", 999);

        let snapshot = session.snapshot();
        let sum: u32 = snapshot
            .categories
            .iter()
            .map(|c| u32::from(c.current_points))
            .sum();
        assert_eq!(snapshot.total_score, sum);
        let expected = f64::from(snapshot.total_score) / f64::from(snapshot.total_max_points) * 100.0;
        assert!((snapshot.score_percentage - expected).abs() < 1e-9);
        // readiness clamped to its Texas maximum of 10
        assert_eq!(
            snapshot
                .categories
                .iter()
                .find(|c| c.id == "readiness")
                .map(|c| c.current_points),
            Some(10)
        );
    }

    #[test]
    fn seeded_sessions_agree() {
        let mut a = QapSession::seeded(77);
        let mut b = QapSession::seeded(77);
        select_texas_austin(&mut a);
        select_texas_austin(&mut b);
        assert_eq!(a.amenities(), b.amenities());
        assert_eq!(a.scorecard().total_score(), b.scorecard().total_score());
    }
}
