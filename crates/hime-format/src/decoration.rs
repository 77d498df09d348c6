//! Bold/italic nesting state.
//!
//! At most two decorations are open at once: an outer and an inner slot.
//! Markers toggle: a marker matching an open slot closes it, anything else
//! opens a new slot. With both slots taken the marker is left as text; with
//! only two kinds this cannot happen, since any marker then matches a slot.

/// Inline decoration kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Decoration {
    Strong,
    Emphasis,
}

impl Decoration {
    fn open_tag(self) -> &'static str {
        match self {
            Self::Strong => "<strong>",
            Self::Emphasis => "<em>",
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            Self::Strong => "</strong>",
            Self::Emphasis => "</em>",
        }
    }
}

/// Outcome of a decoration marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Toggle {
    Opened,
    Closed,
    /// Both slots are in use and neither matches; the marker was not
    /// applied. Unreachable while there are only two decoration kinds.
    Overflow,
}

#[derive(Debug, Default)]
pub(crate) struct DecorationStack {
    outer: Option<Decoration>,
    inner: Option<Decoration>,
}

impl DecorationStack {
    /// Apply a marker of `kind`, writing the resulting tags to `html`.
    pub(crate) fn toggle(&mut self, kind: Decoration, html: &mut String) -> Toggle {
        if self.inner == Some(kind) {
            html.push_str(kind.close_tag());
            self.inner = None;
            return Toggle::Closed;
        }

        if self.outer == Some(kind) {
            if let Some(inner) = self.inner.take() {
                html.push_str(inner.close_tag());
            }
            html.push_str(kind.close_tag());
            self.outer = None;
            return Toggle::Closed;
        }

        if self.outer.is_none() {
            self.outer = Some(kind);
        } else if self.inner.is_none() {
            self.inner = Some(kind);
        } else {
            return Toggle::Overflow;
        }
        html.push_str(kind.open_tag());
        Toggle::Opened
    }

    /// Close every open decoration, innermost first.
    pub(crate) fn close_all(&mut self, html: &mut String) {
        if let Some(inner) = self.inner.take() {
            html.push_str(inner.close_tag());
        }
        if let Some(outer) = self.outer.take() {
            html.push_str(outer.close_tag());
        }
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.outer.is_none() && self.inner.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_close() {
        let mut stack = DecorationStack::default();
        let mut html = String::new();
        assert_eq!(stack.toggle(Decoration::Strong, &mut html), Toggle::Opened);
        assert_eq!(stack.toggle(Decoration::Strong, &mut html), Toggle::Closed);
        assert_eq!(html, "<strong></strong>");
        assert!(stack.is_empty());
    }

    #[test]
    fn test_nested_inner_closes_first() {
        let mut stack = DecorationStack::default();
        let mut html = String::new();
        stack.toggle(Decoration::Strong, &mut html);
        stack.toggle(Decoration::Emphasis, &mut html);
        stack.toggle(Decoration::Emphasis, &mut html);
        stack.toggle(Decoration::Strong, &mut html);
        assert_eq!(html, "<strong><em></em></strong>");
        assert!(stack.is_empty());
    }

    #[test]
    fn test_closing_outer_auto_closes_inner() {
        let mut stack = DecorationStack::default();
        let mut html = String::new();
        stack.toggle(Decoration::Emphasis, &mut html);
        stack.toggle(Decoration::Strong, &mut html);
        stack.toggle(Decoration::Emphasis, &mut html);
        assert_eq!(html, "<em><strong></strong></em>");
        assert!(stack.is_empty());
    }

    #[test]
    fn test_close_all() {
        let mut stack = DecorationStack::default();
        let mut html = String::new();
        stack.toggle(Decoration::Strong, &mut html);
        stack.toggle(Decoration::Emphasis, &mut html);
        stack.close_all(&mut html);
        assert_eq!(html, "<strong><em></em></strong>");
        assert!(stack.is_empty());
    }

    #[test]
    fn test_close_all_when_empty_writes_nothing() {
        let mut stack = DecorationStack::default();
        let mut html = String::new();
        stack.close_all(&mut html);
        assert!(html.is_empty());
    }

    #[test]
    fn test_full_stack_always_matches_a_slot() {
        let mut stack = DecorationStack::default();
        let mut html = String::new();
        stack.toggle(Decoration::Strong, &mut html);
        stack.toggle(Decoration::Emphasis, &mut html);
        assert_eq!(stack.toggle(Decoration::Strong, &mut html), Toggle::Closed);
        stack.toggle(Decoration::Emphasis, &mut html);
        stack.toggle(Decoration::Strong, &mut html);
        assert_eq!(stack.toggle(Decoration::Emphasis, &mut html), Toggle::Closed);
    }

    #[test]
    fn test_overflow_guard_leaves_state_untouched() {
        // Two slots holding the same kind cannot arise from toggling.
        let mut stack = DecorationStack {
            outer: Some(Decoration::Strong),
            inner: Some(Decoration::Strong),
        };
        let mut html = String::new();
        assert_eq!(stack.toggle(Decoration::Emphasis, &mut html), Toggle::Overflow);
        assert!(html.is_empty());
        assert_eq!(stack.outer, Some(Decoration::Strong));
    }
}
