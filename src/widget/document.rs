// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use crate::common::{ElementId, Error};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// The parts of a host page a widget needs: element lookup, content
/// replacement and inline custom properties.
pub trait HostDocument: Send + Sync {
    /// First connected element matching `selector`, in document order.
    fn query_selector(&self, selector: &str) -> Option<ElementId>;

    /// Whether `element` is (still) attached to the document.
    fn is_connected(&self, element: ElementId) -> bool;

    /// `lang` of the closest element, starting with `element` itself.
    fn language(&self, element: ElementId) -> Option<String>;

    /// Replace everything inside `element` with `html`.
    fn replace_children(&self, element: ElementId, html: &str) -> Result<(), Error>;

    /// Set an inline style property, e.g. `--qc-pw-dialog-padding`.
    fn set_style_property(&self, element: ElementId, name: &str, value: &str)
        -> Result<(), Error>;

    /// Remove an inline style property.
    fn remove_style_property(&self, element: ElementId, name: &str) -> Result<(), Error>;
}

#[derive(Debug, Default)]
struct Node {
    attached: bool,
    children: Vec<ElementId>,
    classes: Vec<String>,
    id: Option<String>,
    inner_html: String,
    lang: Option<String>,
    parent: Option<ElementId>,
    style: BTreeMap<String, String>,
    tag: String,
}

/// `tag#id.class` with any part optional.
#[derive(Debug, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(s: &str) -> Option<Self> {
        fn is_ident(s: &str) -> bool {
            !s.is_empty()
                && s.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        }

        let mut compound = Self::default();
        let tag_len = s.find(['#', '.']).unwrap_or(s.len());
        match &s[..tag_len] {
            "" | "*" => {}
            tag if is_ident(tag) => compound.tag = Some(tag.to_ascii_lowercase()),
            _ => return None,
        }
        let mut rest = &s[tag_len..];
        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let len = body.find(['#', '.']).unwrap_or(body.len());
            let name = &body[..len];
            if !is_ident(name) {
                return None;
            }
            if marker == '#' {
                if compound.id.is_some() {
                    return None;
                }
                compound.id = Some(name.to_string());
            } else {
                compound.classes.push(name.to_string());
            }
            rest = &body[len..];
        }
        Some(compound)
    }

    fn matches(&self, node: &Node) -> bool {
        self.tag.as_ref().map_or(true, |tag| *tag == node.tag)
            && self
                .id
                .as_ref()
                .map_or(true, |id| node.id.as_ref() == Some(id))
            && self.classes.iter().all(|c| node.classes.contains(c))
    }
}

#[derive(Debug)]
struct DocumentInner {
    mutations: usize,
    nodes: Vec<Node>,
}

impl DocumentInner {
    fn node(&self, element: ElementId) -> Result<&Node, Error> {
        self.nodes
            .get(element.0)
            .ok_or_else(|| Error::String(format!("{element} is not part of the document")))
    }

    fn node_mut(&mut self, element: ElementId) -> Result<&mut Node, Error> {
        self.nodes
            .get_mut(element.0)
            .ok_or_else(|| Error::String(format!("{element} is not part of the document")))
    }

    fn is_connected(&self, element: ElementId) -> bool {
        let mut current = Some(element);
        while let Some(id) = current {
            match self.nodes.get(id.0) {
                Some(node) if node.attached => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    /// Descendant combinators match greedily against the closest ancestors.
    fn matches(&self, element: ElementId, selector: &[Compound]) -> bool {
        let Some((last, mut ancestors)) = selector.split_last() else {
            return false;
        };
        let Some(node) = self.nodes.get(element.0) else {
            return false;
        };
        if !last.matches(node) {
            return false;
        }
        let mut current = node.parent;
        while let Some((next, rest)) = ancestors.split_last() {
            let Some(node) = current.and_then(|id| self.nodes.get(id.0)) else {
                return false;
            };
            if next.matches(node) {
                ancestors = rest;
            }
            current = node.parent;
        }
        true
    }

    fn first_match(&self, element: ElementId, selector: &[Compound]) -> Option<ElementId> {
        let node = self.nodes.get(element.0).filter(|n| n.attached)?;
        if self.matches(element, selector) {
            return Some(element);
        }
        node.children
            .iter()
            .find_map(|child| self.first_match(*child, selector))
    }
}

/// In-memory `HostDocument`, e.g. for server-side embedding and tests.
///
/// Element `0` is the root `<html>` element. Every change to content or
/// inline style is counted by `mutation_count`.
#[derive(Debug)]
pub struct MemoryDocument {
    inner: Mutex<DocumentInner>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// A document holding only the root element.
    pub fn new() -> Self {
        let root = Node {
            attached: true,
            tag: "html".to_string(),
            ..Default::default()
        };
        Self {
            inner: Mutex::new(DocumentInner {
                mutations: 0,
                nodes: vec![root],
            }),
        }
    }

    /// The root element.
    pub fn root(&self) -> ElementId {
        ElementId(0)
    }

    /// Append a child described by `tag#id.class`, e.g. `div#widget.embed`.
    pub fn append_element(&self, parent: ElementId, description: &str) -> Result<ElementId, Error> {
        let invalid = || Error::String(format!("{description}: not a valid element description"));
        let Compound { tag, id, classes } = Compound::parse(description).ok_or_else(invalid)?;
        let tag = tag.ok_or_else(invalid)?;
        let mut inner = self.lock()?;
        inner.node(parent)?;
        let element = ElementId(inner.nodes.len());
        inner.nodes.push(Node {
            attached: true,
            classes,
            id,
            parent: Some(parent),
            tag,
            ..Default::default()
        });
        inner.node_mut(parent)?.children.push(element);
        Ok(element)
    }

    /// Detach `element` (and so its subtree) from the document.
    pub fn detach(&self, element: ElementId) -> Result<(), Error> {
        self.lock()?.node_mut(element)?.attached = false;
        Ok(())
    }

    /// Set the `lang` attribute of `element`.
    pub fn set_lang(&self, element: ElementId, lang: &str) -> Result<(), Error> {
        self.lock()?.node_mut(element)?.lang = Some(lang.to_string());
        Ok(())
    }

    /// Current content of `element`.
    pub fn inner_html(&self, element: ElementId) -> Option<String> {
        self.lock()
            .ok()
            .and_then(|inner| inner.nodes.get(element.0).map(|n| n.inner_html.clone()))
    }

    /// Inline style property of `element`.
    pub fn style_property(&self, element: ElementId, name: &str) -> Option<String> {
        self.lock()
            .ok()
            .and_then(|inner| inner.nodes.get(element.0)?.style.get(name).cloned())
    }

    /// Number of content and style changes so far.
    pub fn mutation_count(&self) -> usize {
        self.lock().map(|inner| inner.mutations).unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, DocumentInner>, Error> {
        self.inner
            .lock()
            .map_err(|_| Error::String("document lock poisoned".to_string()))
    }

    fn mutate(
        &self,
        element: ElementId,
        f: impl FnOnce(&mut Node),
    ) -> Result<(), Error> {
        let mut inner = self.lock()?;
        f(inner.node_mut(element)?);
        inner.mutations += 1;
        Ok(())
    }
}

impl HostDocument for MemoryDocument {
    fn query_selector(&self, selector: &str) -> Option<ElementId> {
        let selector = selector
            .split_whitespace()
            .map(Compound::parse)
            .collect::<Option<Vec<_>>>()
            .filter(|s| !s.is_empty())?;
        let inner = self.lock().ok()?;
        inner.first_match(self.root(), &selector)
    }

    fn is_connected(&self, element: ElementId) -> bool {
        self.lock()
            .map(|inner| inner.is_connected(element))
            .unwrap_or(false)
    }

    fn language(&self, element: ElementId) -> Option<String> {
        let inner = self.lock().ok()?;
        let mut current = Some(element);
        while let Some(id) = current {
            let node = inner.nodes.get(id.0)?;
            if let Some(lang) = &node.lang {
                return Some(lang.clone());
            }
            current = node.parent;
        }
        None
    }

    fn replace_children(&self, element: ElementId, html: &str) -> Result<(), Error> {
        self.mutate(element, |node| node.inner_html = html.to_string())
    }

    fn set_style_property(
        &self,
        element: ElementId,
        name: &str,
        value: &str,
    ) -> Result<(), Error> {
        self.mutate(element, |node| {
            node.style.insert(name.to_string(), value.to_string());
        })
    }

    fn remove_style_property(&self, element: ElementId, name: &str) -> Result<(), Error> {
        self.mutate(element, |node| {
            node.style.remove(name);
        })
    }
}
