use crate::consts::ASPECT_CONSISTENCY_TOLERANCE;

use super::grid::SampleRow;

/// A displayed image whose aspect ratio strays from the set's average.
#[derive(Clone, Debug, PartialEq)]
pub struct AspectWarning {
    pub sample_index: usize,
    pub sample: String,
    pub method: String,
    pub ratio: f64,
    pub average: f64,
}

/// Flag every loaded image whose source ratio deviates from the average of
/// all loaded images by more than the tolerance (relative). Placeholders
/// take no part.
pub fn check_aspect_ratios(rows: &[SampleRow]) -> Vec<AspectWarning> {
    let loaded: Vec<(&SampleRow, &str, f64)> = rows
        .iter()
        .flat_map(|row| {
            row.cells
                .iter()
                .filter(|c| !c.missing)
                .map(move |c| (row, c.method.as_str(), c.aspect_ratio))
        })
        .collect();
    if loaded.is_empty() {
        return Vec::new();
    }

    let average = loaded.iter().map(|(_, _, r)| r).sum::<f64>() / loaded.len() as f64;
    loaded
        .into_iter()
        .filter(|(_, _, ratio)| (ratio - average).abs() / average > ASPECT_CONSISTENCY_TOLERANCE)
        .map(|(row, method, ratio)| AspectWarning {
            sample_index: row.index,
            sample: row.name.clone(),
            method: method.to_string(),
            ratio,
            average,
        })
        .collect()
}
