use serde::Serialize;
use std::collections::BTreeMap;

/// Line colours handed out to series without an explicit colour, in order.
pub const DEFAULT_COLORS: [&str; 6] = [
    "#b45309", "#0f766e", "#7c3aed", "#2563eb", "#ef4444", "#16a34a",
];

/// Legend entry for one series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesStyle {
    pub name: String,
    pub color: String,
}

/// Pair every series with a colour.
///
/// Overrides win. Everything else cycles through [`DEFAULT_COLORS`], and
/// only those series advance the palette.
pub fn assign_colors<S: AsRef<str>>(
    series: &[S],
    overrides: &BTreeMap<String, String>,
) -> Vec<SeriesStyle> {
    let mut next = 0usize;
    series
        .iter()
        .map(|name| {
            let name = name.as_ref();
            let color = match overrides.get(name) {
                Some(color) => color.clone(),
                None => {
                    let color = DEFAULT_COLORS[next % DEFAULT_COLORS.len()];
                    next += 1;
                    color.to_string()
                }
            };
            SeriesStyle {
                name: name.to_string(),
                color,
            }
        })
        .collect()
}
