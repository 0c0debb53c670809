//! Participant list import from CSV (`name`, optional `group`, optional `weight`).

use crate::models::{clamp_weight, Candidate, DrawError, DEFAULT_WEIGHT};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct CandidateRow {
    name: String,
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    weight: Option<i64>,
}

/// Parse candidates from CSV with a header row. Rows with a blank name are skipped;
/// negative weights clamp to 0; a missing weight means the default.
pub fn parse_candidates_csv<R: Read>(reader: R) -> Result<Vec<Candidate>, DrawError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut candidates = Vec::new();
    for (line, record) in rdr.deserialize::<CandidateRow>().enumerate() {
        // header is line 1
        let row = record.map_err(|e| DrawError::Import(format!("line {}: {}", line + 2, e)))?;
        if row.name.is_empty() {
            continue;
        }
        let mut candidate = Candidate::new(row.name)
            .with_weight(row.weight.map(clamp_weight).unwrap_or(DEFAULT_WEIGHT));
        if let Some(group) = row.group.filter(|g| !g.is_empty()) {
            candidate = candidate.with_group(group);
        }
        candidates.push(candidate);
    }
    Ok(candidates)
}
