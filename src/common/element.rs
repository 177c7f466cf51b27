// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Opaque handle to an element of a host document.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub struct ElementId(pub usize);

impl Display for ElementId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "element#{}", self.0)
    }
}

/// The player iframe rendered inside a mounted widget.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IframeHandle {
    /// Element that owns the rendered widget.
    pub container: ElementId,
    /// Player URL loaded by the iframe.
    pub src: String,
}
