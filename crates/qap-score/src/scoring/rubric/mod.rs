mod templates;

use serde::Serialize;

/// Category id fed by the proximity heuristic.
pub const LOCATION_CATEGORY: &str = "location";

/// One scoring dimension of a QAP template. `current_points` never leaves
/// `[0, max_points]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoringCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub max_points: u16,
    pub current_points: u16,
}

/// A state's published scoring rubric: an ordered category list and the sum
/// of the maximum points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QapTemplate {
    pub state: &'static str,
    pub categories: Vec<ScoringCategory>,
    pub total_max_points: u16,
}

impl QapTemplate {
    pub(crate) fn new(state: &'static str, categories: Vec<ScoringCategory>) -> Self {
        let total_max_points = categories.iter().map(|c| c.max_points).sum();
        Self {
            state,
            categories,
            total_max_points,
        }
    }

    /// Fresh zeroed template for a state, if one is published.
    pub fn for_state(state: &str) -> Option<Self> {
        match state {
            "Texas" => Some(templates::texas()),
            "California" => Some(templates::california()),
            _ => None,
        }
    }
}

/// Mutable scoring state over the active template. Totals are recomputed as
/// pure reductions on demand rather than cached.
#[derive(Debug, Clone, Serialize)]
pub struct Scorecard {
    template: QapTemplate,
}

impl Default for Scorecard {
    /// Matches the original application, which starts on the Texas rubric
    /// before any state is selected.
    fn default() -> Self {
        Self {
            template: templates::texas(),
        }
    }
}

impl Scorecard {
    /// Replace the active template with a fresh zeroed copy for `state`.
    /// States without a published template keep the current one. Returns
    /// whether a swap happened.
    pub fn swap_template(&mut self, state: &str) -> bool {
        match QapTemplate::for_state(state) {
            Some(template) => {
                self.template = template;
                true
            }
            None => false,
        }
    }

    /// Clamp `points` to `[0, max_points]` and store it on the matching
    /// category. Unknown ids are a no-op.
    pub fn update_category_score(&mut self, category_id: &str, points: i32) {
        if let Some(category) = self
            .template
            .categories
            .iter_mut()
            .find(|category| category.id == category_id)
        {
            category.current_points = points.clamp(0, i32::from(category.max_points)) as u16;
        }
    }

    pub fn category(&self, category_id: &str) -> Option<&ScoringCategory> {
        self.template
            .categories
            .iter()
            .find(|category| category.id == category_id)
    }

    pub fn template(&self) -> &QapTemplate {
        &self.template
    }

    pub fn total_score(&self) -> u32 {
        self.template
            .categories
            .iter()
            .map(|category| u32::from(category.current_points))
            .sum()
    }

    pub fn score_percentage(&self) -> f64 {
        if self.template.total_max_points == 0 {
            return 0.0;
        }
        f64::from(self.total_score()) / f64::from(self.template.total_max_points) * 100.0
    }
}
