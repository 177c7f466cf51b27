// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use crate::configuration::StringTree;

const CUSTOM_PROPERTY_PREFIX: &str = "--qc-pw-";
const WIDGET_PREFIX: &str = "presentation-widget";

/// Flattens style overrides into CSS custom properties, in key order.
///
/// `playButton.hoverColor` becomes `--qc-pw-play-button-hover-color`.
/// Top-level values apply to the widget itself, so `borderRadius`
/// becomes `--qc-pw-presentation-widget-border-radius`.
pub fn style_properties(style: &StringTree) -> Vec<(String, String)> {
    style
        .leaves()
        .into_iter()
        .filter(|(path, _)| !path.is_empty())
        .map(|(path, value)| {
            let mut segments: Vec<String> = path.iter().map(|s| kebab_case(s)).collect();
            if segments.len() == 1 {
                segments.insert(0, WIDGET_PREFIX.to_string());
            }
            (
                format!("{CUSTOM_PROPERTY_PREFIX}{}", segments.join("-")),
                value.to_string(),
            )
        })
        .collect()
}

fn kebab_case(s: &str) -> String {
    let mut kebab = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if c.is_ascii_uppercase() {
            if !kebab.is_empty() {
                kebab.push('-');
            }
            kebab.push(c.to_ascii_lowercase());
        } else {
            kebab.push(c);
        }
    }
    kebab
}
