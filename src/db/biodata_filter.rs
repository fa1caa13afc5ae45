use sqlx::{Postgres, QueryBuilder};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{BiodataQuery, AGE_FIELD, BIODATA_TYPE_FIELD, PERMANENT_DIVISION_FIELD};

#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    #[error("{param} must be a whole number, got '{value}'")]
    InvalidAge { param: &'static str, value: String },

    #[error("'{value}' is not a valid biodata identifier")]
    InvalidId { value: String },
}

/// One conjunct of a biodata listing filter.
#[derive(Debug, Clone, PartialEq)]
pub enum BiodataConstraint {
    /// Inclusive numeric range on `age`; at least one bound is set
    Age { min: Option<i64>, max: Option<i64> },
    BiodataType(String),
    PermanentDivision(String),
    /// Membership in a set of storage identifiers
    Ids(Vec<Uuid>),
}

/// Conjunctive filter built from sparse query parameters. An empty filter
/// matches every biodata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BiodataFilter {
    constraints: Vec<BiodataConstraint>,
}

impl BiodataFilter {
    pub fn from_query(query: &BiodataQuery) -> Result<Self, FilterError> {
        let mut constraints = Vec::new();

        let min = parse_age("ageFrom", query.age_from.as_deref())?;
        let max = parse_age("ageTo", query.age_to.as_deref())?;
        if min.is_some() || max.is_some() {
            constraints.push(BiodataConstraint::Age { min, max });
        }

        if let Some(biodata_type) = non_empty(query.biodata_type.as_deref()) {
            constraints.push(BiodataConstraint::BiodataType(biodata_type.to_string()));
        }

        if let Some(division) = non_empty(query.permanent_division.as_deref()) {
            constraints.push(BiodataConstraint::PermanentDivision(division.to_string()));
        }

        if let Some(ids) = non_empty(query.ids.as_deref()) {
            let ids = ids
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    Uuid::parse_str(s).map_err(|_| FilterError::InvalidId {
                        value: s.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if !ids.is_empty() {
                constraints.push(BiodataConstraint::Ids(ids));
            }
        }

        Ok(Self { constraints })
    }

    pub fn constraints(&self) -> &[BiodataConstraint] {
        &self.constraints
    }

    pub fn matches_everything(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Appends ` WHERE a AND b ...` to the query, or nothing for an empty filter.
    pub fn push_where(&self, query: &mut QueryBuilder<'_, Postgres>) {
        for (i, constraint) in self.constraints.iter().enumerate() {
            query.push(if i == 0 { " WHERE " } else { " AND " });
            match constraint {
                BiodataConstraint::Age { min, max } => {
                    let age = format!(
                        "(CASE WHEN jsonb_typeof(doc->'{0}') = 'number' THEN (doc->>'{0}')::numeric END)",
                        AGE_FIELD
                    );
                    query.push("(");
                    match (min, max) {
                        (Some(min), Some(max)) => {
                            query.push(&age).push(" BETWEEN ").push_bind(*min);
                            query.push(" AND ").push_bind(*max);
                        }
                        (Some(min), None) => {
                            query.push(&age).push(" >= ").push_bind(*min);
                        }
                        (None, Some(max)) => {
                            query.push(&age).push(" <= ").push_bind(*max);
                        }
                        (None, None) => {
                            query.push("TRUE");
                        }
                    }
                    query.push(")");
                }
                BiodataConstraint::BiodataType(value) => {
                    query
                        .push(format!("doc->>'{}' = ", BIODATA_TYPE_FIELD))
                        .push_bind(value.clone());
                }
                BiodataConstraint::PermanentDivision(value) => {
                    query
                        .push(format!("doc->>'{}' = ", PERMANENT_DIVISION_FIELD))
                        .push_bind(value.clone());
                }
                BiodataConstraint::Ids(ids) => {
                    query.push("id = ANY(").push_bind(ids.clone()).push(")");
                }
            }
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_age(param: &'static str, value: Option<&str>) -> Result<Option<i64>, FilterError> {
    match non_empty(value) {
        None => Ok(None),
        Some(raw) => raw.parse::<i64>().map(Some).map_err(|_| FilterError::InvalidAge {
            param,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> BiodataQuery {
        BiodataQuery::default()
    }

    fn sql_for(filter: &BiodataFilter) -> String {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT id, doc FROM biodatas");
        filter.push_where(&mut builder);
        builder.sql().to_string()
    }

    #[test]
    fn no_parameters_match_everything() {
        let filter = BiodataFilter::from_query(&query()).unwrap();
        assert!(filter.matches_everything());
        assert_eq!(sql_for(&filter), "SELECT id, doc FROM biodatas");
    }

    #[test]
    fn lower_bound_alone_is_one_age_constraint() {
        let filter = BiodataFilter::from_query(&BiodataQuery {
            age_from: Some("30".to_string()),
            ..query()
        })
        .unwrap();

        assert_eq!(
            filter.constraints(),
            &[BiodataConstraint::Age { min: Some(30), max: None }]
        );
    }

    #[test]
    fn both_bounds_combine_into_one_constraint() {
        let filter = BiodataFilter::from_query(&BiodataQuery {
            age_from: Some("25".to_string()),
            age_to: Some("35".to_string()),
            ..query()
        })
        .unwrap();

        assert_eq!(filter.constraints().len(), 1);
        assert_eq!(
            filter.constraints()[0],
            BiodataConstraint::Age { min: Some(25), max: Some(35) }
        );
        let sql = sql_for(&filter);
        assert_eq!(sql.matches("BETWEEN").count(), 1);
        assert!(sql.contains("$1") && sql.contains("$2"));
    }

    #[test]
    fn blank_parameters_are_ignored() {
        let filter = BiodataFilter::from_query(&BiodataQuery {
            age_from: Some("".to_string()),
            biodata_type: Some("  ".to_string()),
            ids: Some(" , ".to_string()),
            ..query()
        })
        .unwrap();
        assert!(filter.matches_everything());
    }

    #[test]
    fn all_parameters_are_anded() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let filter = BiodataFilter::from_query(&BiodataQuery {
            age_to: Some("40".to_string()),
            biodata_type: Some("Female".to_string()),
            permanent_division: Some("Chattagram".to_string()),
            ids: Some(format!("{}, {}", a, b)),
            ..query()
        })
        .unwrap();

        assert_eq!(
            filter.constraints(),
            &[
                BiodataConstraint::Age { min: None, max: Some(40) },
                BiodataConstraint::BiodataType("Female".to_string()),
                BiodataConstraint::PermanentDivision("Chattagram".to_string()),
                BiodataConstraint::Ids(vec![a, b]),
            ]
        );

        let sql = sql_for(&filter);
        assert_eq!(sql.matches(" WHERE ").count(), 1);
        assert_eq!(sql.matches(" AND ").count(), 3);
        assert!(sql.contains("id = ANY($4)"));
    }

    #[test]
    fn non_numeric_age_is_an_error() {
        let err = BiodataFilter::from_query(&BiodataQuery {
            age_from: Some("twenty".to_string()),
            ..query()
        })
        .unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidAge { param: "ageFrom", value: "twenty".to_string() }
        );
    }

    #[test]
    fn malformed_identifier_is_an_error() {
        let err = BiodataFilter::from_query(&BiodataQuery {
            ids: Some(format!("{},nope", Uuid::new_v4())),
            ..query()
        })
        .unwrap_err();
        assert_eq!(err, FilterError::InvalidId { value: "nope".to_string() });
    }
}
