// Copyright (c) 2021-2025 RBB S.r.l
// opensource@mintlayer.org
// SPDX-License-Identifier: MIT
// Licensed under the MIT License;
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// https://github.com/mintlayer/mintlayer-core/blob/master/LICENSE
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Symbolic data stack

use std::{fmt, ops::Range};

/// Item on the symbolic data stack.
///
/// Numbers are kept as concrete integers so arithmetic can be evaluated exactly. Everything else
/// (hashes, keys, placeholders, results of operations on non-numeric operands) is symbolic text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Item {
    Concrete(i64),
    Symbolic(String),
}

impl Item {
    pub fn symbolic(text: impl Into<String>) -> Self {
        Self::Symbolic(text.into())
    }

    pub fn from_bool(b: bool) -> Self {
        Self::Concrete(b as i64)
    }

    /// Convert token text into an item. Only the canonical decimal form of an integer becomes a
    /// concrete item, so rendering the item always reproduces the original text.
    pub fn from_text(text: &str) -> Self {
        match parse_int(text) {
            Some(n) if n.to_string() == text => Self::Concrete(n),
            _ => Self::Symbolic(text.to_owned()),
        }
    }

    /// Best-effort integer interpretation of the item.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Concrete(n) => Some(*n),
            Self::Symbolic(s) => parse_int(s),
        }
    }

    /// `0`, `FALSE` (in any case) and the empty string are false, everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Concrete(n) => *n != 0,
            Self::Symbolic(s) => !(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("FALSE")),
        }
    }

    pub fn is_concrete(&self) -> bool {
        matches!(self, Self::Concrete(_))
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concrete(n) => write!(f, "{n}"),
            Self::Symbolic(s) => f.write_str(s),
        }
    }
}

/// Parse an optionally negative decimal integer.
fn parse_int(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Symbolic data stack. The top of the stack is the end of the vector.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stack(Vec<Item>);

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.0
    }

    /// Get an element at given position from the top of the stack.
    pub fn top(&self, idx: usize) -> Option<&Item> {
        self.len().checked_sub(idx + 1).map(|i| &self.0[i])
    }

    /// Render every item as text, bottom first.
    pub fn render(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    pub(crate) fn push(&mut self, item: Item) {
        self.0.push(item)
    }

    pub(crate) fn pop(&mut self) -> Option<Item> {
        self.0.pop()
    }

    /// Map range counting from the top of the stack to the internal vector indexing.
    fn top_range(&self, r: Range<usize>) -> Option<Range<usize>> {
        let len = self.len();
        (r.end <= len).then(|| (len - r.end)..(len - r.start))
    }

    /// Duplicate slice indexed from the top of the stack. The copies go on top.
    pub(crate) fn dup(&mut self, r: Range<usize>) -> Option<()> {
        let range = self.top_range(r)?;
        self.0.extend_from_within(range);
        Some(())
    }

    /// Remove `n`-th element, counting from the top of the stack.
    pub(crate) fn remove(&mut self, n: usize) -> Option<Item> {
        let idx = self.len().checked_sub(n + 1)?;
        Some(self.0.remove(idx))
    }

    /// Insert an element so that it ends up `n` positions below the top.
    pub(crate) fn insert(&mut self, n: usize, item: Item) -> Option<()> {
        let idx = self.len().checked_sub(n)?;
        self.0.insert(idx, item);
        Some(())
    }

    /// Put items underneath everything currently on the stack.
    pub(crate) fn extend_bottom(&mut self, items: impl IntoIterator<Item = Item>) {
        let mut bottom: Vec<Item> = items.into_iter().collect();
        bottom.append(&mut self.0);
        self.0 = bottom;
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear()
    }
}

impl From<Vec<Item>> for Stack {
    fn from(items: Vec<Item>) -> Self {
        Self(items)
    }
}

impl FromIterator<Item> for Stack {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
