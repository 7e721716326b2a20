use polars::prelude::*;

/// Sidebar filter state, already split into typed fields. Every `None`
/// means "the user left this widget alone".
#[derive(Debug, Default, Clone)]
pub struct PropertyFilter {
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<i64>,
    pub livingrooms: Option<i64>,
    pub property_type: Option<String>,
    pub tenure: Option<String>,
    pub school_ratings: Option<Vec<String>>,
    pub crime_levels: Option<Vec<String>>,
    /// Only meaningful after commute enrichment appended duration_mins
    pub max_commute_mins: Option<u32>,
}

pub struct FilterOutcome {
    pub frame: LazyFrame,
    pub warnings: Vec<String>,
}

/// All predicates are conjunctive. A contradictory budget range warns
/// and matches nothing rather than failing the request.
pub fn apply_filter(frame: LazyFrame, filter: &PropertyFilter) -> FilterOutcome {
    let mut warnings = Vec::new();
    let mut frame = frame;

    if let (Some(min), Some(max)) = (filter.budget_min, filter.budget_max) {
        if min > max {
            warnings.push("Minimum budget cannot be greater than maximum budget.".to_string());
        }
    }
    if let Some(min) = filter.budget_min {
        frame = frame.filter(col("median_price").gt_eq(lit(min)));
    }
    if let Some(max) = filter.budget_max {
        frame = frame.filter(col("median_price").lt_eq(lit(max)));
    }

    if let Some(bedrooms) = filter.bedrooms {
        frame = frame.filter(col("bedrooms").eq(lit(bedrooms)));
    }
    if let Some(bathrooms) = filter.bathrooms {
        frame = frame.filter(col("bathrooms").eq(lit(bathrooms)));
    }
    if let Some(livingrooms) = filter.livingrooms {
        frame = frame.filter(col("livingrooms").eq(lit(livingrooms)));
    }
    if let Some(property_type) = &filter.property_type {
        frame = frame.filter(col("propertytype_converted").eq(lit(property_type.clone())));
    }
    if let Some(tenure) = &filter.tenure {
        frame = frame.filter(col("tenure").eq(lit(tenure.clone())));
    }

    if let Some(levels) = &filter.crime_levels {
        let levels = Series::new("crime_levels".into(), levels.clone());
        frame = frame.filter(col("crime_level").is_in(lit(levels)));
    }
    if let Some(ratings) = &filter.school_ratings {
        frame = frame.filter(school_predicate(ratings));
    }

    if let Some(max_commute) = filter.max_commute_mins {
        frame = frame.filter(col("duration_mins").lt_eq(lit(max_commute)));
    }

    FilterOutcome { frame, warnings }
}

/// Union of the selected school clauses: "Good" and "Outstanding" keep
/// rows with at least one such school, "No info" keeps rows with
/// neither.
fn school_predicate(ratings: &[String]) -> Expr {
    let mut predicate = lit(false);
    for rating in ratings {
        let clause = match rating.as_str() {
            "Good" => col("num_good").gt(lit(0)),
            "Outstanding" => col("num_outstanding").gt(lit(0)),
            "No info" => col("num_good").eq(lit(0)).and(col("num_outstanding").eq(lit(0))),
            _ => continue,
        };
        predicate = predicate.or(clause);
    }
    predicate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> DataFrame {
        df!(
            "area name" => &["Soho", "Camden Town", "Peckham"],
            "outcode" => &["W1", "NW1", "SE15"],
            "median_price" => &[1_200_000.0, 850_000.0, 500_000.0],
            "bedrooms" => &[2i64, 2, 3],
            "bathrooms" => &[1i64, 1, 2],
            "livingrooms" => &[1i64, 1, 1],
            "propertytype_converted" => &["Flat", "Flat", "Terraced"],
            "tenure" => &["Leasehold", "Leasehold", "Freehold"],
            "crime_level" => &["High crime", "Medium crime", "Low crime"],
            "num_good" => &[2i64, 0, 1],
            "num_outstanding" => &[1i64, 0, 0],
        )
        .unwrap()
    }

    fn areas(outcome: FilterOutcome) -> Vec<String> {
        let result = outcome.frame.collect().unwrap();
        result.column("area name").unwrap().str().unwrap()
            .into_iter().flatten().map(String::from).collect()
    }

    #[test]
    fn budget_window_is_inclusive() {
        let filter = PropertyFilter {
            budget_min: Some(500_000.0),
            budget_max: Some(850_000.0),
            ..PropertyFilter::default()
        };

        let outcome = apply_filter(sample_table().lazy(), &filter);

        assert!(outcome.warnings.is_empty());
        assert_eq!(areas(outcome), vec!["Camden Town", "Peckham"]);
    }

    #[test]
    fn contradictory_budget_warns_and_matches_nothing() {
        let filter = PropertyFilter {
            budget_min: Some(900_000.0),
            budget_max: Some(600_000.0),
            ..PropertyFilter::default()
        };

        let outcome = apply_filter(sample_table().lazy(), &filter);

        assert_eq!(outcome.warnings.len(), 1);
        assert!(areas(outcome).is_empty());
    }

    #[test]
    fn room_and_type_filters_are_exact() {
        let filter = PropertyFilter {
            bedrooms: Some(2),
            property_type: Some("Flat".to_string()),
            ..PropertyFilter::default()
        };

        let outcome = apply_filter(sample_table().lazy(), &filter);

        assert_eq!(areas(outcome), vec!["Soho", "Camden Town"]);
    }

    #[test]
    fn crime_levels_are_a_multiselect() {
        let filter = PropertyFilter {
            crime_levels: Some(vec!["Medium crime".to_string(), "Low crime".to_string()]),
            ..PropertyFilter::default()
        };

        let outcome = apply_filter(sample_table().lazy(), &filter);

        assert_eq!(areas(outcome), vec!["Camden Town", "Peckham"]);
    }

    #[test]
    fn school_clauses_union() {
        let no_info_only = PropertyFilter {
            school_ratings: Some(vec!["No info".to_string()]),
            ..PropertyFilter::default()
        };
        assert_eq!(areas(apply_filter(sample_table().lazy(), &no_info_only)), vec!["Camden Town"]);

        let good_or_outstanding = PropertyFilter {
            school_ratings: Some(vec!["Good".to_string(), "Outstanding".to_string()]),
            ..PropertyFilter::default()
        };
        assert_eq!(
            areas(apply_filter(sample_table().lazy(), &good_or_outstanding)),
            vec!["Soho", "Peckham"]
        );
    }

    #[test]
    fn commute_ceiling_drops_slow_and_unenriched_rows() {
        let table = df!(
            "area name" => &["Soho", "Camden Town", "Peckham"],
            "median_price" => &[1_200_000.0, 850_000.0, 500_000.0],
            "duration_mins" => &[Some(12u32), Some(48), None],
        )
        .unwrap();
        let filter = PropertyFilter {
            max_commute_mins: Some(30),
            ..PropertyFilter::default()
        };

        let outcome = apply_filter(table.lazy(), &filter);
        let result = outcome.frame.collect().unwrap();

        let names: Vec<&str> = result.column("area name").unwrap().str().unwrap()
            .into_iter().flatten().collect();
        assert_eq!(names, vec!["Soho"]);
    }
}
