use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::*;
use crate::types::*;

/// Formats an amount the way the service's own screens do: whole rupees,
/// Indian digit grouping, and the minus sign ahead of the currency symbol.
pub fn format_rupees(amount: Rupees) -> String {
    let rounded = amount
        .to_decimal()
        .round_dp_with_strategy(0, RoundingStrategy::RoundHalfUp);
    let grouped = add_indian_group_separators(&rounded.abs().to_string());
    if rounded < Decimal::zero() {
        format!("-₹{}", grouped)
    } else {
        format!("₹{}", grouped)
    }
}

pub fn score_band(score: f64) -> &'static str {
    if score >= GOOD_SCORE_FLOOR {
        "Good"
    } else if score >= AVERAGE_SCORE_FLOOR {
        "Average"
    } else {
        "Poor"
    }
}

/// Percentage share of `part` in `whole`, as a whole number. Zero when
/// `whole` is zero.
pub fn share_percent(part: Rupees, whole: Rupees) -> Decimal {
    if whole > Rupees::zero() {
        (part.to_decimal() / whole.to_decimal() * Decimal::new(100, 0))
            .round_dp_with_strategy(0, RoundingStrategy::RoundHalfUp)
    } else {
        Decimal::zero()
    }
}

/// Renders a plain-text table with the first column left-aligned and the
/// rest right-aligned.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.chars().count()).collect();
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            widths[index] = widths[index].max(cell.chars().count());
        }
    }
    let header_cells: Vec<String> = headers.iter().map(|header| (*header).to_string()).collect();
    let mut lines: Vec<String> = Vec::with_capacity(rows.len() + 1);
    lines.push(format_row(&header_cells, &widths));
    for row in rows {
        lines.push(format_row(row, &widths));
    }
    lines.join("\n")
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            if index == 0 {
                format!("{:<width$}", cell, width = widths[index])
            } else {
                format!("{:>width$}", cell, width = widths[index])
            }
        })
        .collect::<Vec<String>>()
        .join("  ")
}

/// Indian grouping puts a separator after the first three digits from the
/// right, then after every two.
fn add_indian_group_separators(digits: &str) -> String {
    let reversed: Vec<char> = digits.chars().rev().collect();
    let (first, rest) = reversed.split_at(reversed.len().min(3));
    let mut groups: Vec<String> = vec![first.iter().collect()];
    for chunk in rest.chunks(2) {
        groups.push(chunk.iter().collect());
    }
    groups
        .join(",")
        .chars()
        .rev()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rupees_grouping() {
        assert_eq!(format_rupees(Rupees::from_i64(0)), "₹0");
        assert_eq!(format_rupees(Rupees::from_i64(123)), "₹123");
        assert_eq!(format_rupees(Rupees::from_i64(1234)), "₹1,234");
        assert_eq!(format_rupees(Rupees::from_i64(123_456)), "₹1,23,456");
        assert_eq!(format_rupees(Rupees::from_i64(1_234_567)), "₹12,34,567");
        assert_eq!(format_rupees(Rupees::from_i64(120_000)), "₹1,20,000");
        assert_eq!(
            format_rupees(Rupees::from_i64(123_456_789_0)),
            "₹1,23,45,67,890"
        );
    }

    #[test]
    fn test_format_rupees_rounds_half_up() {
        assert_eq!(format_rupees(Rupees::from_f64(33_333.5)), "₹33,334");
        assert_eq!(format_rupees(Rupees::from_f64(33_333.49)), "₹33,333");
        assert_eq!(format_rupees(Rupees::from_f64(0.4)), "₹0");
    }

    #[test]
    fn test_format_rupees_negative() {
        assert_eq!(format_rupees(Rupees::from_i64(-5000)), "-₹5,000");
        assert_eq!(format_rupees(Rupees::from_f64(-123_456.5)), "-₹1,23,457");
    }

    #[test]
    fn test_share_percent() {
        assert_eq!(
            share_percent(Rupees::from_i64(15_000), Rupees::from_i64(30_000)),
            Decimal::new(50, 0)
        );
        assert_eq!(
            share_percent(Rupees::from_i64(8_000), Rupees::from_i64(30_000)),
            Decimal::new(27, 0)
        );
        assert_eq!(
            share_percent(Rupees::from_i64(5_000), Rupees::zero()),
            Decimal::zero()
        );
    }

    #[test]
    fn test_score_band() {
        assert_eq!(score_band(100.0), "Good");
        assert_eq!(score_band(71.0), "Good");
        assert_eq!(score_band(70.9), "Average");
        assert_eq!(score_band(41.0), "Average");
        assert_eq!(score_band(40.9), "Poor");
        assert_eq!(score_band(0.0), "Poor");
    }

    #[test]
    fn test_render_table_alignment() {
        let table = render_table(
            &["Year", "Projected Savings", "Status"],
            &[
                vec![
                    "Year 1".to_string(),
                    "₹60,000".to_string(),
                    "Ahead".to_string(),
                ],
                vec![
                    "Year 2".to_string(),
                    "₹1,20,000".to_string(),
                    "Ahead".to_string(),
                ],
            ],
        );
        assert_eq!(
            table,
            "Year    Projected Savings  Status\n\
             Year 1            ₹60,000   Ahead\n\
             Year 2          ₹1,20,000   Ahead"
        );
    }
}
