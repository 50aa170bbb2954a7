//! Format templates and the builder that produces them.
//!
//! ```text
//! FormatBuilder::new()            state: Closed
//!     .named("time")?             -> InSection  (auto-open)
//!     .open_section()             -> InSection  (no-op, already open)
//!     .close_section()            -> Closed     ("[time]" sealed)
//!     .named("thread")?           -> InSection
//!     .literal("/")
//!     .named("severity")?
//!     .build()                    -> auto-close, "[time] [thread/severity]"
//! ```

use super::field::{FieldContext, HeaderField};
use crate::error::{LogError, LogResult};

/// An immutable, ordered list of bracketed sections.
#[derive(Debug, Clone, Default)]
pub struct FormatTemplate {
    sections: Vec<Vec<HeaderField>>,
}

impl FormatTemplate {
    /// A template that produces no header at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Field labels per section, for inspection.
    pub fn labels(&self) -> Vec<Vec<&str>> {
        self.sections
            .iter()
            .map(|section| section.iter().map(HeaderField::label).collect())
            .collect()
    }

    /// Render the header: each section bracketed, sections joined by a space.
    pub fn header(&self, ctx: &FieldContext<'_>) -> String {
        let mut out = String::new();
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push('[');
            for field in section {
                out.push_str(&field.render(ctx));
            }
            out.push(']');
        }
        out
    }

    /// Header followed by `message`.
    pub fn line(&self, ctx: &FieldContext<'_>, message: &str) -> String {
        if self.is_empty() {
            return message.to_string();
        }
        let mut line = self.header(ctx);
        line.push(' ');
        line.push_str(message);
        line
    }
}

#[derive(Debug, Default)]
enum BuilderState {
    #[default]
    Closed,
    InSection(Vec<HeaderField>),
}

/// Builder for [`FormatTemplate`].
#[derive(Debug, Default)]
pub struct FormatBuilder {
    sections: Vec<Vec<HeaderField>>,
    state: BuilderState,
}

impl FormatBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_section_open(&self) -> bool {
        matches!(self.state, BuilderState::InSection(_))
    }

    /// Open a section. Does nothing when one is already open.
    pub fn open_section(mut self) -> Self {
        if let BuilderState::Closed = self.state {
            self.state = BuilderState::InSection(Vec::new());
        }
        self
    }

    /// Close the open section. Does nothing when none is open.
    ///
    /// A section closed without any fields is dropped.
    pub fn close_section(mut self) -> Self {
        if let BuilderState::InSection(fields) = std::mem::take(&mut self.state) {
            if !fields.is_empty() {
                self.sections.push(fields);
            }
        }
        self
    }

    /// Append a field, opening a section first if needed.
    pub fn field(self, field: HeaderField) -> Self {
        let mut this = self.open_section();
        if let BuilderState::InSection(fields) = &mut this.state {
            fields.push(field);
        }
        this
    }

    /// Append one of the default named fields.
    pub fn named(self, name: &str) -> LogResult<Self> {
        let field = HeaderField::named(name).ok_or_else(|| LogError::UnknownField(name.to_string()))?;
        Ok(self.field(field))
    }

    pub fn literal(self, text: &str) -> Self {
        self.field(HeaderField::literal(text))
    }

    /// Close any open section and seal the template.
    pub fn build(self) -> FormatTemplate {
        let this = self.close_section();
        FormatTemplate {
            sections: this.sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::Timestamps;
    use chrono::{TimeZone, Utc};

    fn render(template: &FormatTemplate, message: &str) -> String {
        let timestamps = Timestamps::new();
        let ctx = FieldContext {
            severity: "INFO",
            logger: "app",
            thread: "main",
            now: Utc.with_ymd_and_hms(2026, 1, 21, 14, 30, 45).unwrap(),
            timestamps: &timestamps,
        };
        template.line(&ctx, message)
    }

    #[test]
    fn test_sections_render_bracketed() {
        let template = FormatBuilder::new()
            .named("time")
            .unwrap()
            .close_section()
            .named("thread")
            .unwrap()
            .literal("/")
            .named("severity")
            .unwrap()
            .build();

        assert_eq!(template.section_count(), 2);
        assert_eq!(render(&template, "test"), "[14:30:45] [main/INFO] test");
    }

    #[test]
    fn test_implicit_and_explicit_sections_match() {
        let implicit = FormatBuilder::new().named("severity").unwrap().build();
        let explicit = FormatBuilder::new()
            .open_section()
            .named("severity")
            .unwrap()
            .close_section()
            .build();

        assert_eq!(render(&implicit, "hi"), render(&explicit, "hi"));
        assert_eq!(render(&implicit, "hi"), "[INFO] hi");
    }

    #[test]
    fn test_open_and_close_are_idempotent() {
        let builder = FormatBuilder::new().open_section().open_section();
        assert!(builder.is_section_open());
        let builder = builder.literal("x").close_section().close_section();
        assert!(!builder.is_section_open());
        assert_eq!(builder.build().labels(), vec![vec!["x"]]);
    }

    #[test]
    fn test_empty_section_is_dropped() {
        let template = FormatBuilder::new().open_section().close_section().build();
        assert!(template.is_empty());
        assert_eq!(render(&template, "bare"), "bare");
    }

    #[test]
    fn test_unknown_named_field() {
        let err = FormatBuilder::new().named("pid").unwrap_err();
        assert!(matches!(err, LogError::UnknownField(name) if name == "pid"));
    }
}
