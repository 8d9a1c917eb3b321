// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Markup stripping for user-supplied text.
//!
//! Output is plain text safe to embed in HTML: every tag and attribute is
//! removed, `<script>`/`<style>` bodies are dropped, and `&`, `<`, `>` in the
//! remaining text are entity-escaped. Running it twice yields the same string.

use ammonia::Builder;
use std::collections::HashSet;
use std::sync::LazyLock;

static PLAIN_TEXT: LazyLock<Builder<'static>> = LazyLock::new(|| {
    let mut builder = Builder::empty();
    builder.clean_content_tags(HashSet::from(["script", "style"]));
    builder
});

/// Strip all markup from `text`, keeping its literal content and newlines.
///
/// Text inside foreign-namespace elements (`<svg>`, `<math>`) is discarded
/// along with the element.
pub fn sanitize(text: &str) -> String {
    PLAIN_TEXT.clean(text).to_string()
}
