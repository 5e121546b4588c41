use std::fmt::Write;

use colored::{ColoredString, Colorize};

use crate::domain::Displayable;
use crate::engine::{Dashboard, PaymentView, ReminderState, UrgencyTier};

fn tier_badge(tier: UrgencyTier) -> ColoredString {
    let label = format!("[{tier}]");
    match tier {
        UrgencyTier::Overdue => label.red().bold(),
        UrgencyTier::DueSoon => label.yellow().bold(),
        UrgencyTier::Upcoming => label.blue(),
        UrgencyTier::Paid => label.green(),
    }
}

fn reminder_label(state: ReminderState) -> ColoredString {
    let label = state.to_string();
    match state {
        ReminderState::ReadyToSend => label.yellow(),
        ReminderState::Sent => label.green(),
        ReminderState::Upcoming => label.normal(),
        ReminderState::Disabled => label.dimmed(),
    }
}

fn push_view(out: &mut String, view: &PaymentView<'_>) {
    let _ = writeln!(
        out,
        "  {} {} ({})",
        tier_badge(view.tier),
        view.payment.display_label(),
        view.due_label
    );
    if view.tier != UrgencyTier::Paid {
        let _ = writeln!(
            out,
            "      lead reminder: {}  due reminder: {}",
            reminder_label(view.reminder.lead),
            reminder_label(view.reminder.due)
        );
    }
}

/// Renders the dashboard as plain terminal text.
pub fn render_dashboard(dashboard: &Dashboard<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", format!("Bills as of {}", dashboard.today).bold());

    if dashboard.overdue_count > 0 {
        let banner = format!("{} Payment(s) OVERDUE!", dashboard.overdue_count);
        let _ = writeln!(out, "{}", banner.red().bold());
    }
    for alert in &dashboard.alerts {
        let _ = writeln!(out, "{}", alert.message.as_str().yellow());
    }

    let _ = writeln!(
        out,
        "Next 7 days: {} payment(s), ${:.2} total",
        dashboard.week.count, dashboard.week.total_amount
    );

    if dashboard.is_empty() {
        let _ = writeln!(out, "No payments tracked.");
        return out;
    }

    let _ = writeln!(out, "\nUpcoming");
    for view in &dashboard.upcoming {
        push_view(&mut out, view);
    }
    if !dashboard.history.is_empty() {
        let _ = writeln!(out, "\nHistory");
        for view in &dashboard.history {
            push_view(&mut out, view);
        }
    }
    out
}
