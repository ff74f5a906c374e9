//! Localized plain-text rendering of a [`Dashboard`].

use std::fmt::Write;

use crate::i18n::{Labels, Lang};
use crate::pipeline::Dashboard;

/// Renders the headline figures, transmission totals and population
/// breakdown in `lang`. Undefined values print as the language's no-data
/// label.
pub fn render_summary(dashboard: &Dashboard, lang: Lang) -> String {
    let l = lang.labels();
    let s = &dashboard.summary;
    let mut output = String::new();

    let _ = writeln!(output, "# {}", l.title);
    let _ = writeln!(output, "{}: {}", l.as_of, s.as_of.format("%d/%m/%Y"));
    let _ = writeln!(output);

    let _ = writeln!(output, "## {}", l.in_brief);
    let _ = writeln!(output, "- {}: {}", l.active, s.active);
    let _ = writeln!(output, "- {}: {}", l.deceased, s.total_deceased);
    let _ = writeln!(output, "- {}: {}", l.recovered, s.total_recovered);
    let _ = writeln!(output, "- {}: {}", l.recovery_pct, percent(s.recovery_pct, 1, l));
    let _ = writeln!(output, "- {}: {}", l.growth_rate, percent(s.growth_rate_pct, 2, l));
    let _ = writeln!(output, "- {}: {}", l.total_positive, s.total_positive);
    let _ = writeln!(output, "- {}: {}", l.total_negative, s.total_negative);
    let _ = writeln!(output, "- {}: {}", l.total_tests, s.total_tests);
    let _ = writeln!(output, "- {}: {}", l.positivity_pct, percent(s.positivity_pct, 1, l));
    let _ = writeln!(output);

    let t = &dashboard.transmission_totals;
    let _ = writeln!(output, "## {}", l.contamination);
    let _ = writeln!(output, "- {}: {}", l.imported, t.imported);
    let _ = writeln!(output, "- {}: {}", l.contact, t.contact);
    let _ = writeln!(output, "- {}: {}", l.community, t.community);
    let _ = writeln!(output);

    let p = &dashboard.population;
    let _ = writeln!(output, "## {}", l.population);
    let _ = writeln!(output, "- {}: {}", l.mean_age, quantity(p.mean_age, l.years, l));
    let _ = writeln!(output, "- {}: {} / {}: {}", l.men, p.male, l.women, p.female);
    let _ = writeln!(
        output,
        "- {}: {}",
        l.mean_hospitalization,
        quantity(p.mean_hospitalization_days, l.days, l)
    );

    output
}

fn percent(value: Option<f64>, decimals: usize, l: &Labels) -> String {
    match value {
        Some(v) => format!("{v:.decimals$} %"),
        None => l.no_data.to_string(),
    }
}

fn quantity(value: Option<f64>, unit: &str, l: &Labels) -> String {
    match value {
        Some(v) => format!("{v:.1} {unit}"),
        None => l.no_data.to_string(),
    }
}
