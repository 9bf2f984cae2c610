//! Tests for the aggregation pipeline
//!
//! Scenario tests use small hand-written CSV fixtures; property tests check
//! the invariants that hold for any dataset.


use crate::models::Dataset;
use crate::pipeline::parse_csv;
use chrono::Utc;

/// Parse an inline CSV fixture
pub fn dataset(csv: &str) -> Dataset {
    parse_csv(csv.as_bytes().to_vec(), None, "fixture", Utc::now()).unwrap()
}

/// A trimmed-down mpox extract with the real column layout
pub const MPOX_SAMPLE: &str = "\
country,iso_code,date,total_cases,total_deaths,new_cases,new_deaths
Portugal,PRT,2022-05-18,9,0,9,0
Spain,ESP,2022-05-18,7,0,7,0
Portugal,PRT,2022-05-20,14,0,5,0
Spain,ESP,2022-05-19,30,0,23,0
Portugal,PRT,2022-05-19,9,0,0,0
United Kingdom,GBR,2022-05-18,9,0,9,0
Spain,ESP,2022-05-20,,0,,0
";
