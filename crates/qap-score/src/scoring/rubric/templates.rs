//! Published QAP scoring templates per state. Category ids are stable keys
//! referenced by the session and the API; `location` is the category fed by
//! the proximity heuristic.

use super::{QapTemplate, ScoringCategory};

const fn category(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    max_points: u16,
) -> ScoringCategory {
    ScoringCategory {
        id,
        name,
        description,
        max_points,
        current_points: 0,
    }
}

pub(super) fn texas() -> QapTemplate {
    QapTemplate::new(
        "Texas",
        vec![
            category(
                "financial",
                "Financial Feasibility and Cost of Development",
                "Points awarded based on cost per square foot and financial feasibility of the development.",
                14,
            ),
            category(
                "location",
                "Development Location",
                "Points for developments in areas with high opportunity indices, proximity to amenities, and underserved areas.",
                17,
            ),
            category(
                "specialNeeds",
                "Tenant Populations with Special Needs",
                "Incentivizes support for individuals with disabilities or homelessness.",
                5,
            ),
            category(
                "incomeLevels",
                "Income and Rent Levels of Tenants",
                "Encourages deeper income targeting and reduced rents.",
                16,
            ),
            category(
                "units",
                "Size and Quality of Units",
                "Rewards for larger unit sizes and inclusion of amenities.",
                7,
            ),
            category(
                "services",
                "Tenant Services",
                "Points for providing supportive services like education, health, etc.",
                10,
            ),
            category(
                "readiness",
                "Readiness to Proceed",
                "Scores readiness for construction start.",
                10,
            ),
            category(
                "experience",
                "Development Team Experience",
                "Considers the team's history with successful LIHTC projects.",
                10,
            ),
            category(
                "priorities",
                "State Housing Priorities",
                "Rewards alignment with state-specific goals (rural housing, preservation).",
                10,
            ),
            category(
                "eviction",
                "Eviction Prevention Plans",
                "Incentivizes structured eviction prevention with case management.",
                5,
            ),
        ],
    )
}

pub(super) fn california() -> QapTemplate {
    QapTemplate::new(
        "California",
        vec![
            category(
                "financial",
                "Financial Feasibility and Cost of Development",
                "Points awarded based on cost per square foot and financial feasibility of the development.",
                12,
            ),
            category(
                "location",
                "Development Location",
                "Points for developments in areas with high opportunity indices, proximity to amenities, and underserved areas.",
                15,
            ),
            category(
                "specialNeeds",
                "Tenant Populations with Special Needs",
                "Incentivizes support for individuals with disabilities or homelessness.",
                5,
            ),
            category(
                "incomeLevels",
                "Income and Rent Levels of Tenants",
                "Encourages deeper income targeting and reduced rents.",
                10,
            ),
            category(
                "units",
                "Size and Quality of Units",
                "Rewards for larger unit sizes and inclusion of amenities.",
                8,
            ),
            category(
                "services",
                "Tenant Services",
                "Points for providing supportive services like education, health, etc.",
                6,
            ),
            category(
                "readiness",
                "Readiness to Proceed",
                "Scores readiness for construction start.",
                5,
            ),
            category(
                "experience",
                "Development Team Experience",
                "Considers the team's history with successful LIHTC projects.",
                4,
            ),
            category(
                "priorities",
                "State Housing Priorities",
                "Rewards alignment with state-specific goals (rural housing, preservation).",
                12,
            ),
            category(
                "eviction",
                "Eviction Prevention Plans",
                "Incentivizes structured eviction prevention with case management.",
                4,
            ),
        ],
    )
}
