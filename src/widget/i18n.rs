// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use crate::configuration::{Locales, StringTree};
use std::collections::BTreeMap;

/// Locale used when nothing else matches.
pub const DEFAULT_LOCALE: &str = "en";

const BUILT_IN_MESSAGES: &[(&str, &str)] = &[
    ("Close", "Close"),
    ("Play", "Play"),
    ("Presentation not found", "Presentation not found"),
    ("Thumbnail for", "Thumbnail for"),
];

/// Widget messages for one locale.
///
/// Keys are dot-separated paths such as `common.Play`. A key is looked up in
/// the exact locale (`fr-FR`), then its language (`fr`), then English, and is
/// returned unchanged when no translation exists.
#[derive(Clone, Debug)]
pub struct Translations {
    locale: String,
    messages: BTreeMap<String, StringTree>,
}

impl Default for Translations {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE, &Locales::default())
    }
}

impl Translations {
    /// Built-in English messages extended by `overrides`.
    pub fn new(locale: impl Into<String>, overrides: &Locales) -> Self {
        let common = BUILT_IN_MESSAGES
            .iter()
            .map(|(key, message)| (key.to_string(), StringTree::Leaf(message.to_string())))
            .collect();
        let mut messages = BTreeMap::new();
        messages.insert(
            DEFAULT_LOCALE.to_string(),
            StringTree::Branch(BTreeMap::from([(
                "common".to_string(),
                StringTree::Branch(common),
            )])),
        );
        for (locale, tree) in &overrides.0 {
            match messages.get_mut(locale) {
                Some(existing) => merge(existing, tree),
                None => {
                    messages.insert(locale.clone(), tree.clone());
                }
            }
        }
        Self {
            locale: locale.into(),
            messages,
        }
    }

    /// The locale, e.g. `fr-FR`.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// The language part of the locale, e.g. `fr`.
    pub fn language(&self) -> &str {
        match self.locale.split_once('-') {
            Some((language, _)) => language,
            None => &self.locale,
        }
    }

    /// Translate `key`.
    pub fn t(&self, key: &str) -> String {
        [self.locale(), self.language(), DEFAULT_LOCALE]
            .into_iter()
            .find_map(|locale| self.messages.get(locale)?.get(key))
            .unwrap_or(key)
            .to_string()
    }
}

fn merge(into: &mut StringTree, from: &StringTree) {
    match (into, from) {
        (StringTree::Branch(into), StringTree::Branch(from)) => {
            for (key, tree) in from {
                match into.get_mut(key) {
                    Some(existing) => merge(existing, tree),
                    None => {
                        into.insert(key.clone(), tree.clone());
                    }
                }
            }
        }
        (into, from) => *into = from.clone(),
    }
}
