//! Plain-text rendering of the read models.

use boxdraft::domain::AppState;
use boxdraft::features::admin::{Dashboard, Placement};
use boxdraft::features::registration::{BoxView, Teammate};
use chrono::{DateTime, Local};

pub fn event(state: &AppState) {
    let settings = &state.settings;
    println!("{}", settings.event_title);
    if !settings.event_description.is_empty() {
        println!("{}", settings.event_description);
    }
    if let Some(banner) = settings.banner() {
        println!("Banner: {} (position {}%)", abbreviate(banner), settings.banner_position());
    }
    println!();
}

pub fn form(state: &AppState) {
    println!("Registration form:");
    for question in state.ordered_questions() {
        let marker = if question.required { " *" } else { "" };
        println!("  {:<12} {}{marker} [{}]", question.id, question.label, question.kind.as_str());
        if let Some(description) = &question.description {
            println!("  {:<12} {description}", "");
        }
    }
    println!();
}

pub fn boxes(views: &[BoxView]) {
    println!("Boxes:");
    for view in views {
        let status = match (view.is_mine, view.is_full) {
            (true, _) => "  <- your box",
            (false, true) => "  FULL",
            (false, false) => "",
        };
        println!(
            "  {:<12} {:<16} {} / {}{status}",
            view.id, view.name, view.occupancy, view.capacity
        );
    }
}

pub fn teammates(teammates: &[Teammate]) {
    for mate in teammates {
        let you = if mate.is_you { " (you)" } else { "" };
        println!("  - {}{you}", mate.name);
    }
}

pub fn dashboard(dashboard: &Dashboard) {
    println!("Unassigned ({}):", dashboard.unassigned.len());
    for card in &dashboard.unassigned {
        println!("  {:<14} {}", card.id, card.name);
    }

    for column in &dashboard.columns {
        let full = if column.is_full { "  FULL" } else { "" };
        println!("\n{} [{}] {}{full}", column.name, column.id, column.badge());
        for card in &column.players {
            println!("  {:<14} {}", card.id, card.name);
        }
    }

    println!("\nPlayers ({}):", dashboard.roster.len());
    for row in &dashboard.roster {
        let placement = match &row.placement {
            Placement::Pending => "Pending".to_owned(),
            Placement::Box(name) => name.clone(),
            Placement::UnknownBox => "Unknown box".to_owned(),
        };
        println!("  {:<14} {:<20} {:<16} {}", row.id, row.name, placement, timestamp(row.registered_at));
    }
}

fn timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis).map_or_else(
        || "-".to_owned(),
        |t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
    )
}

/// `data:` URLs are far too long to print.
fn abbreviate(url: &str) -> &str {
    if url.starts_with("data:") {
        url.split_once(',').map_or(url, |(header, _)| header)
    } else {
        url
    }
}
