//! Average pensionable earnings with the dropout provision

use crate::error::CppError;

/// Average of yearly earnings after capping and dropping the lowest years
///
/// Each year is capped at `ceiling`, then the `dropout_years` lowest capped
/// values are excluded before averaging. Non-finite entries are rejected.
pub fn average_capped_earnings(
    yearly_earnings: &[f64],
    dropout_years: u32,
    ceiling: f64,
) -> Result<f64, CppError> {
    if yearly_earnings.is_empty() {
        return Err(CppError::NoEarnings);
    }
    if dropout_years as usize >= yearly_earnings.len() {
        return Err(CppError::DropoutExceedsHistory {
            dropout_years,
            available: yearly_earnings.len(),
        });
    }

    if let Some((index, &value)) = yearly_earnings.iter().enumerate().find(|(_, e)| !e.is_finite()) {
        return Err(CppError::NonFiniteEarnings { index, value });
    }

    let mut capped: Vec<f64> = yearly_earnings.iter().map(|e| e.min(ceiling)).collect();
    capped.sort_by(|a, b| b.total_cmp(a));

    let kept = &capped[..capped.len() - dropout_years as usize];
    Ok(kept.iter().sum::<f64>() / kept.len() as f64)
}
