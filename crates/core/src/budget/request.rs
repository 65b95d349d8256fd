//! Budget requests and their validated plan.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::ops::RangeInclusive;

use crate::costing::OutputRow;
use crate::error::BudgetError;
use crate::scenario::{AdminUnit, InterventionCode, InterventionSlot, ScenarioRow, ScenarioTable};
use crate::settings::BudgetSettings;

/// Longest year range a single request may cover.
pub const MAX_YEAR_SPAN: u32 = 50;

/// Scenario name given to rows built from a request.
pub const REQUEST_SCENARIO_NAME: &str = "request";

/// A request for a multi-year budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRequest {
    /// First year, inclusive.
    pub start_year: i32,
    /// Last year, inclusive.
    pub end_year: i32,
    /// Formula parameters and currency selection.
    #[serde(default)]
    pub settings: BudgetSettings,
    /// Requested intervention families and where to deploy them.
    pub interventions: Vec<InterventionRequest>,
    /// Country whose reference datasets to use.
    pub country: String,
}

/// One requested intervention family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterventionRequest {
    /// Intervention code, e.g. `smc`.
    pub name: String,
    /// Product/regimen, e.g. `SP+AQ`. Optional for case management.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_label: Option<String>,
    /// Places as `adm1:adm2`.
    #[serde(default)]
    pub places: Vec<String>,
}

/// A requested family with its identifiers parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedIntervention {
    /// Intervention family.
    pub intervention: InterventionCode,
    /// Active type.
    pub type_label: Option<String>,
    /// Admin units to deploy in.
    pub places: Vec<AdminUnit>,
}

/// A validated [`BudgetRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetPlan {
    start_year: i32,
    end_year: i32,
    interventions: Vec<PlannedIntervention>,
    requested: HashSet<(InterventionCode, AdminUnit)>,
}

impl BudgetRequest {
    /// Validates the request and parses its identifiers.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: a reversed or overlong year range,
    /// no interventions, an unknown intervention name, a formula family with
    /// no type, a malformed place, a place listed twice for one family, or
    /// an invalid setting.
    pub fn plan(&self) -> Result<BudgetPlan, BudgetError> {
        if self.start_year > self.end_year {
            return Err(BudgetError::InvalidYearRange {
                start: self.start_year,
                end: self.end_year,
            });
        }
        if self.end_year.abs_diff(self.start_year) >= MAX_YEAR_SPAN {
            return Err(BudgetError::YearRangeTooLong {
                start: self.start_year,
                end: self.end_year,
                max: MAX_YEAR_SPAN,
            });
        }
        if self.interventions.is_empty() {
            return Err(BudgetError::NoInterventions);
        }

        let mut interventions = Vec::with_capacity(self.interventions.len());
        let mut requested = HashSet::new();

        for item in &self.interventions {
            let intervention: InterventionCode = item.name.parse()?;
            let type_label = item
                .type_label
                .as_deref()
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(str::to_string);
            if type_label.is_none() && intervention.requires_type() {
                return Err(BudgetError::MissingType { intervention });
            }

            let mut places = Vec::with_capacity(item.places.len());
            for place in &item.places {
                let admin_unit: AdminUnit = place.parse()?;
                if !requested.insert((intervention, admin_unit.clone())) {
                    return Err(BudgetError::DuplicatePlace {
                        intervention,
                        admin_unit,
                    });
                }
                places.push(admin_unit);
            }

            interventions.push(PlannedIntervention {
                intervention,
                type_label,
                places,
            });
        }

        self.settings.validate()?;

        Ok(BudgetPlan {
            start_year: self.start_year,
            end_year: self.end_year,
            interventions,
            requested,
        })
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// See [`BudgetRequest::plan`].
    pub fn validate(&self) -> Result<(), BudgetError> {
        self.plan().map(|_| ())
    }
}

impl BudgetPlan {
    /// Years covered, inclusive.
    #[must_use]
    pub fn years(&self) -> RangeInclusive<i32> {
        self.start_year..=self.end_year
    }

    /// Parsed interventions, in request order.
    #[must_use]
    pub fn interventions(&self) -> &[PlannedIntervention] {
        &self.interventions
    }

    /// Builds the scenario for one year: one row per distinct place, each
    /// deploying the families requested there.
    #[must_use]
    pub fn scenario_for(&self, year: i32) -> ScenarioTable {
        let mut rows: BTreeMap<&AdminUnit, ScenarioRow> = BTreeMap::new();

        for planned in &self.interventions {
            for place in &planned.places {
                let row = rows.entry(place).or_insert_with(|| {
                    ScenarioRow::new(place.clone(), year, REQUEST_SCENARIO_NAME, "")
                });
                row.interventions.insert(
                    planned.intervention,
                    InterventionSlot {
                        deployed: true,
                        type_label: planned.type_label.clone(),
                    },
                );
            }
        }

        ScenarioTable::new(rows.into_values().collect())
    }

    /// Whether an output row belongs to a requested (family, place) pair
    /// within the year range.
    #[must_use]
    pub fn includes(&self, row: &OutputRow) -> bool {
        self.years().contains(&row.year)
            && self.requested.contains(&(
                row.code_intervention,
                AdminUnit::new(row.adm1.as_str(), row.adm2.as_str()),
            ))
    }
}

/// Builds the scenario table a request implies for one year.
///
/// # Errors
///
/// See [`BudgetRequest::plan`].
pub fn build_scenario(request: &BudgetRequest, year: i32) -> Result<ScenarioTable, BudgetError> {
    Ok(request.plan()?.scenario_for(year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn intervention(name: &str, type_label: Option<&str>, places: &[&str]) -> InterventionRequest {
        InterventionRequest {
            name: name.to_string(),
            type_label: type_label.map(str::to_string),
            places: places.iter().map(|p| (*p).to_string()).collect(),
        }
    }

    fn request() -> BudgetRequest {
        BudgetRequest {
            start_year: 2025,
            end_year: 2026,
            settings: BudgetSettings::default(),
            interventions: vec![
                intervention("smc", Some("SP+AQ"), &["Tshopo:Opala", "Tshopo:Isangi"]),
                intervention("vacc", Some("R21"), &["Tshopo:Opala"]),
                intervention("cm_public", None, &["Tshopo:Opala"]),
            ],
            country: "drc".to_string(),
        }
    }

    #[test]
    fn test_deserialize_wire_request() {
        let json = r#"{
            "startYear": 2025,
            "endYear": 2025,
            "settings": {"smc_buffer": 1.5, "vacc_doses_per_child": 4, "currency": "NGN"},
            "interventions": [
                {"name": "smc", "type": "SP+AQ", "places": ["Tshopo:Opala"]}
            ],
            "country": "drc"
        }"#;

        let request: BudgetRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.start_year, 2025);
        assert_eq!(request.settings.smc.buffer, dec!(1.5));
        assert_eq!(request.settings.currency.as_deref(), Some("NGN"));
        assert_eq!(request.interventions[0].type_label.as_deref(), Some("SP+AQ"));
    }

    #[test]
    fn test_scenario_groups_families_by_place() {
        let plan = request().plan().unwrap();
        let scenario = plan.scenario_for(2026);

        assert_eq!(scenario.rows().len(), 2);
        let opala = scenario
            .rows()
            .iter()
            .find(|row| row.admin_unit.adm2 == "Opala")
            .unwrap();
        assert_eq!(opala.year, 2026);
        assert_eq!(opala.scenario_name, REQUEST_SCENARIO_NAME);
        assert_eq!(opala.interventions.len(), 3);

        let entries = scenario.active_entries().unwrap();
        assert_eq!(entries.len(), 4);
    }

    #[test]
    fn test_plan_years() {
        let plan = request().plan().unwrap();
        assert_eq!(plan.years().collect::<Vec<_>>(), vec![2025, 2026]);
    }

    #[test]
    fn test_includes_only_requested_pairs() {
        let plan = request().plan().unwrap();
        let mut row = OutputRow {
            adm1: "Tshopo".to_string(),
            adm2: "Isangi".to_string(),
            year: 2025,
            scenario_name: REQUEST_SCENARIO_NAME.to_string(),
            scenario_description: String::new(),
            code_intervention: InterventionCode::Smc,
            intervention_nice: "SMC".to_string(),
            type_intervention: "SP+AQ".to_string(),
            unit: "per SPAQ pack 3-11 month olds".to_string(),
            cost_class: "Commodity".to_string(),
            quantity: dec!(1),
            currency: crate::costing::CurrencyCode::usd(),
            unit_cost: dec!(1),
            cost_element: dec!(1),
        };
        assert!(plan.includes(&row));

        row.code_intervention = InterventionCode::Vacc;
        assert!(!plan.includes(&row));

        row.code_intervention = InterventionCode::Smc;
        row.year = 2030;
        assert!(!plan.includes(&row));
    }

    #[rstest]
    #[case::reversed_years(
        |r: &mut BudgetRequest| r.start_year = 2027,
        BudgetError::InvalidYearRange { start: 2027, end: 2026 }
    )]
    #[case::overlong_range(
        |r: &mut BudgetRequest| r.end_year = 2075,
        BudgetError::YearRangeTooLong { start: 2025, end: 2075, max: MAX_YEAR_SPAN }
    )]
    #[case::no_interventions(
        |r: &mut BudgetRequest| r.interventions.clear(),
        BudgetError::NoInterventions
    )]
    #[case::unknown_name(
        |r: &mut BudgetRequest| r.interventions[0].name = "irs".to_string(),
        BudgetError::UnknownIntervention("irs".to_string())
    )]
    #[case::missing_type(
        |r: &mut BudgetRequest| r.interventions[1].type_label = None,
        BudgetError::MissingType { intervention: InterventionCode::Vacc }
    )]
    #[case::bad_place(
        |r: &mut BudgetRequest| r.interventions[0].places[0] = "Opala".to_string(),
        BudgetError::InvalidPlace("Opala".to_string())
    )]
    #[case::duplicate_place(
        |r: &mut BudgetRequest| r.interventions[0].places.push(" Tshopo : Opala".to_string()),
        BudgetError::DuplicatePlace {
            intervention: InterventionCode::Smc,
            admin_unit: AdminUnit::new("Tshopo", "Opala"),
        }
    )]
    #[case::unsupported_setting(
        |r: &mut BudgetRequest| r.settings.smc.include_5_10 = true,
        BudgetError::UnsupportedSetting { setting: "smc_include_5_10" }
    )]
    fn test_invalid_requests(
        #[case] mutate: fn(&mut BudgetRequest),
        #[case] expected: BudgetError,
    ) {
        let mut request = request();
        mutate(&mut request);

        assert_eq!(request.validate(), Err(expected));
    }

    #[test]
    fn test_fifty_year_span_accepted() {
        let mut request = request();
        request.end_year = 2074;

        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_build_scenario() {
        let scenario = build_scenario(&request(), 2025).unwrap();
        assert!(scenario.rows().iter().all(|row| row.year == 2025));
    }
}
