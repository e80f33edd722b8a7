use portal_core::{FieldKind, FieldView, WizardViewModel};
use portal_engine::Job;
use serde_json::Value;

const REACHED: char = '●';
const PENDING: char = '○';

/// Progress bar, section list and step heading for the wizard.
pub fn render_wizard(view: &WizardViewModel) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&progress_bar(&view.progress_items, &view.progress_segments));
    out.push('\n');

    for section in &view.sections {
        let marker = if section.active { '>' } else { ' ' };
        out.push_str(&format!("{marker} {}. {}\n", section.step, section.title));
    }

    if let Some(active) = view.active_section() {
        out.push_str(&format!(
            "\nStep {} of {}: {}\n",
            view.current_step, view.total_steps, active.title
        ));
    }
    if view.in_flight {
        out.push_str(&format!("{}\n", view.submit_label));
    }
    out
}

fn progress_bar(items: &[bool], segments: &[bool]) -> String {
    let mut bar = String::new();
    for (idx, reached) in items.iter().enumerate() {
        if idx > 0 {
            let done = segments.get(idx - 1).copied().unwrap_or(false);
            bar.push_str(if done { "━━━" } else { "───" });
        }
        bar.push(if *reached { REACHED } else { PENDING });
    }
    bar
}

/// Prompt text for one field.
pub fn field_prompt(field: &FieldView) -> String {
    let hint = match field.kind {
        FieldKind::Email => " (name@example.com)",
        FieldKind::Tel => " (10 digits)",
        FieldKind::Date => " (YYYY-MM-DD)",
        FieldKind::Text | FieldKind::Multiline => "",
    };
    let optional = if field.required { "" } else { " [optional]" };
    format!("{}{hint}{optional}", field.label)
}

pub fn celebration() -> &'static str {
    "\n  *  .  *  Application sent!  *  .  *\n"
}

pub fn job_card(job: &Job) -> String {
    let mut card = String::new();
    card.push_str(&job.title);
    if let Some(id) = &job.id {
        card.push_str(&format!("  [{id}]"));
    }
    card.push('\n');
    for (label, value) in [
        ("Location", &job.location),
        ("Salary", &job.salary),
        ("Qualification", &job.qualification),
        ("Experience", &job.experience),
        ("Key Skills", &job.key_skills),
    ] {
        card.push_str(&format!("  {label} : {value}\n"));
    }
    card
}

pub fn job_list(jobs: &[Job]) -> String {
    jobs.iter().map(job_card).collect::<Vec<_>>().join("\n")
}

/// Pretty JSON for records the portal does not model field by field.
pub fn json_value(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
