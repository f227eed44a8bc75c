// ABOUTME: Exports event summaries as a deterministic Markdown document.
// ABOUTME: Each event gets a header, progress and budget lines, then one section per category.

use std::fmt::Write;

use crate::summary::{CategorySummary, EventSummary};

/// Render summaries as Markdown, one top-level section per event in the
/// order given.
pub fn export_markdown(summaries: &[EventSummary], currency: &str) -> String {
    let mut out = String::new();

    for (i, summary) in summaries.iter().enumerate() {
        if i > 0 {
            writeln!(out).unwrap();
            writeln!(out, "---").unwrap();
            writeln!(out).unwrap();
        }
        write_event(&mut out, summary, currency);
    }

    out
}

fn write_event(out: &mut String, summary: &EventSummary, currency: &str) {
    writeln!(out, "# {}", summary.name).unwrap();
    writeln!(out).unwrap();
    writeln!(
        out,
        "> {} on {} at {} ({})",
        summary.event_type,
        summary.date.format("%Y-%m-%d"),
        summary.location,
        summary.status
    )
    .unwrap();

    if let Some(ref description) = summary.description {
        writeln!(out).unwrap();
        writeln!(out, "{}", description).unwrap();
    }

    writeln!(out).unwrap();
    writeln!(
        out,
        "Progress: {}% ({}/{} tasks)",
        summary.progress, summary.completed_tasks, summary.total_tasks
    )
    .unwrap();

    let budget = &summary.budget;
    writeln!(out).unwrap();
    writeln!(out, "## Budget").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "- Total: {}", format_amount(budget.total, currency)).unwrap();
    writeln!(out, "- Allocated: {}", format_amount(budget.allocated, currency)).unwrap();
    writeln!(out, "- Unallocated: {}", format_amount(budget.unallocated, currency)).unwrap();
    writeln!(out, "- Spent: {}", format_amount(budget.spent, currency)).unwrap();
    if budget.remaining < 0.0 {
        writeln!(
            out,
            "- Over budget by {}",
            format_amount(-budget.remaining, currency)
        )
        .unwrap();
    } else {
        writeln!(out, "- Remaining: {}", format_amount(budget.remaining, currency)).unwrap();
    }

    for category in &summary.categories {
        write_category(out, category, currency);
    }
}

fn write_category(out: &mut String, category: &CategorySummary, currency: &str) {
    writeln!(out).unwrap();
    writeln!(out, "## {}", category.category).unwrap();
    writeln!(out).unwrap();
    writeln!(
        out,
        "Budget: {} ({:.1}%)",
        format_amount(category.amount, currency),
        category.percentage
    )
    .unwrap();

    if category.vendors.is_empty() {
        writeln!(out).unwrap();
        writeln!(out, "_No vendors yet._").unwrap();
        return;
    }

    writeln!(out).unwrap();
    for vendor in &category.vendors {
        let mut line = format!("- {}", vendor.name);
        if let Some(ref price) = vendor.agreed_price {
            write!(line, ": {}", price).unwrap();
        }
        if vendor.finalized {
            line.push_str(" [finalized]");
        }
        if let Some(ref comments) = vendor.comments {
            write!(line, " ({})", comments).unwrap();
        }
        writeln!(out, "{}", line).unwrap();
    }
}

/// Format an amount with thousands separators, dropping the fraction for
/// whole numbers.
fn format_amount(value: f64, currency: &str) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let whole = rounded.trunc() as i64;
    let cents = ((rounded - whole as f64).abs() * 100.0).round() as i64;

    let digits = whole.abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    if cents == 0 {
        format!("{}{}{}", sign, currency, grouped)
    } else {
        format!("{}{}{}.{:02}", sign, currency, grouped, cents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{InMemoryCatalog, Vendor};
    use crate::category::Category;
    use crate::command::{BudgetInput, NewEvent, VendorScope};
    use crate::config::LedgerConfig;
    use crate::model::VendorId;
    use crate::store::LedgerStore;

    fn sample() -> EventSummary {
        let mut store = LedgerStore::new(LedgerConfig::default());
        let id = store
            .create_event(NewEvent {
                name: Some("Asha & Rohan".to_string()),
                event_type: Some("Wedding".to_string()),
                date: Some("2027-02-14".to_string()),
                location: Some("Udaipur".to_string()),
                total_budget: Some(BudgetInput::from("100000")),
                categories: vec!["Venue".to_string(), "Catering".to_string()],
                ..Default::default()
            })
            .unwrap()
            .event
            .id;
        store.update_category_budget(&id, Category::Venue, 60000.0).unwrap();
        store.add_vendor(&id, VendorId::from("7"), Category::Venue).unwrap();
        store
            .update_vendor_details(
                &id,
                &VendorId::from("7"),
                VendorScope::All,
                Some("Lake view".to_string()),
                Some("55000".to_string()),
            )
            .unwrap();
        store
            .toggle_finalization(&id, &VendorId::from("7"), None)
            .unwrap();

        let catalog: InMemoryCatalog =
            std::iter::once(Vendor::new("7", "Grand Hall", Category::Venue)).collect();
        EventSummary::new(store.find_event(&id).unwrap(), &catalog)
    }

    #[test]
    fn markdown_contains_header_budget_and_vendors() {
        let md = export_markdown(&[sample()], "$");

        assert!(md.starts_with("# Asha & Rohan\n"));
        assert!(md.contains("> Wedding on 2027-02-14 at Udaipur (planning)"));
        assert!(md.contains("- Total: $160,000"));
        assert!(md.contains("## Venue"));
        assert!(md.contains("Budget: $60,000 (37.5%)"));
        assert!(md.contains("- Grand Hall: 55000 [finalized] (Lake view)"));
        assert!(md.contains("## Catering"));
        assert!(md.contains("_No vendors yet._"));
    }

    #[test]
    fn markdown_is_deterministic() {
        let summary = sample();
        assert_eq!(
            export_markdown(&[summary.clone()], "$"),
            export_markdown(&[summary], "$")
        );
    }

    #[test]
    fn multiple_events_are_separated() {
        let summary = sample();
        let md = export_markdown(&[summary.clone(), summary], "$");
        assert_eq!(md.matches("\n---\n").count(), 1);
    }

    #[test]
    fn amounts_are_grouped() {
        assert_eq!(format_amount(0.0, "$"), "$0");
        assert_eq!(format_amount(999.0, "$"), "$999");
        assert_eq!(format_amount(1000.0, "$"), "$1,000");
        assert_eq!(format_amount(1234567.5, "₹"), "₹1,234,567.50");
        assert_eq!(format_amount(-2500.0, "$"), "-$2,500");
    }
}
