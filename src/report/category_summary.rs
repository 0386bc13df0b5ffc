//! Per-upload category summary: split of rows, spend per category, preview

use std::collections::HashMap;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;
use serde::Serialize;

use crate::pipeline::inference::CategorizedTransaction;
use crate::utils::styling::truncate_string;

/// Rows shown in the preview table unless overridden
pub const DEFAULT_PREVIEW_ROWS: usize = 20;

/// Totals for one predicted category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub transactions: usize,
    pub spend: f64,
}

/// Aggregates over one categorized upload
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategorySummary {
    /// Ordered by transaction count, largest first
    pub by_count: Vec<CategoryTotal>,
    /// Ordered by spend, largest first
    pub by_spend: Vec<CategoryTotal>,
    pub total_spend: f64,
}

impl CategorySummary {
    pub fn from_rows(rows: &[CategorizedTransaction]) -> Self {
        let mut totals: HashMap<&str, (usize, f64)> = HashMap::new();
        for row in rows {
            let entry = totals.entry(row.predicted_category.as_str()).or_default();
            entry.0 += 1;
            entry.1 += row.transaction.amount.unwrap_or(0.0);
        }

        let all: Vec<CategoryTotal> = totals
            .into_iter()
            .map(|(category, (transactions, spend))| CategoryTotal {
                category: category.to_string(),
                transactions,
                spend,
            })
            .collect();

        // Ties fall back to the category name so output is stable
        let mut by_count = all.clone();
        by_count.sort_by(|a, b| {
            b.transactions
                .cmp(&a.transactions)
                .then_with(|| a.category.cmp(&b.category))
        });

        let mut by_spend = all;
        by_spend.sort_by(|a, b| {
            b.spend
                .total_cmp(&a.spend)
                .then_with(|| a.category.cmp(&b.category))
        });

        let total_spend = by_spend.iter().map(|c| c.spend).sum();

        Self {
            by_count,
            by_spend,
            total_spend,
        }
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("🧮").cyan(),
            style("CATEGORY SPLIT").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("Transactions").add_attribute(Attribute::Bold),
        ]);
        for total in &self.by_count {
            table.add_row(vec![
                Cell::new(&total.category),
                Cell::new(total.transactions).set_alignment(CellAlignment::Right),
            ]);
        }
        print_table(&table);

        println!();
        println!(
            "    {} {}",
            style("💰").cyan(),
            style("SPEND BY CATEGORY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("Amount").add_attribute(Attribute::Bold),
            Cell::new("Share").add_attribute(Attribute::Bold),
        ]);
        for total in &self.by_spend {
            let share = if self.total_spend != 0.0 {
                total.spend / self.total_spend * 100.0
            } else {
                0.0
            };
            table.add_row(vec![
                Cell::new(&total.category),
                Cell::new(format!("{:.2}", total.spend)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.1}%", share)).set_alignment(CellAlignment::Right),
            ]);
        }
        table.add_row(vec![
            Cell::new("Total").add_attribute(Attribute::Bold),
            Cell::new(format!("{:.2}", self.total_spend))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
                .set_alignment(CellAlignment::Right),
            Cell::new(""),
        ]);
        print_table(&table);
    }
}

/// Show the first `limit` categorized rows.
pub fn display_preview(rows: &[CategorizedTransaction], limit: usize) {
    if limit == 0 || rows.is_empty() {
        return;
    }

    println!();
    println!(
        "    {} {}",
        style("👀").cyan(),
        style(format!("PREVIEW (first {} of {})", limit.min(rows.len()), rows.len()))
            .white()
            .bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Date").add_attribute(Attribute::Bold),
        Cell::new("Amount").add_attribute(Attribute::Bold),
        Cell::new("Description").add_attribute(Attribute::Bold),
        Cell::new("Category").add_attribute(Attribute::Bold),
    ]);

    for row in rows.iter().take(limit) {
        let date = row
            .transaction
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let amount = row
            .transaction
            .amount
            .map(|a| format!("{:.2}", a))
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(date),
            Cell::new(amount).set_alignment(CellAlignment::Right),
            Cell::new(truncate_string(&row.transaction.description, 40)),
            Cell::new(&row.predicted_category).fg(Color::Cyan),
        ]);
    }
    print_table(&table);
}

fn print_table(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::inference::Transaction;

    fn row(amount: f64, category: &str) -> CategorizedTransaction {
        CategorizedTransaction {
            transaction: Transaction {
                date: None,
                amount: Some(amount),
                description: "x".to_string(),
            },
            clean_text: "x".to_string(),
            predicted_category: category.to_string(),
        }
    }

    #[test]
    fn test_counts_sorted_descending() {
        let rows = vec![
            row(10.0, "Food"),
            row(5000.0, "Rent"),
            row(20.0, "Food"),
            row(30.0, "Food"),
            row(15.0, "Travel"),
            row(25.0, "Travel"),
        ];
        let summary = CategorySummary::from_rows(&rows);

        let counts: Vec<(&str, usize)> = summary
            .by_count
            .iter()
            .map(|c| (c.category.as_str(), c.transactions))
            .collect();
        assert_eq!(counts, vec![("Food", 3), ("Travel", 2), ("Rent", 1)]);

        let spend: Vec<&str> = summary.by_spend.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(spend, vec!["Rent", "Food", "Travel"]);
        assert!((summary.total_spend - 5100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_rows() {
        let summary = CategorySummary::from_rows(&[]);
        assert!(summary.by_count.is_empty());
        assert_eq!(summary.total_spend, 0.0);
    }
}
