//! Step descriptor definition and related functionality.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a step inside one step table.
///
/// Ids are consecutive integers in table order, so "the next step" is always
/// `id + 1`.
pub type StepId = u32;

/// Display title of a step.
///
/// A derived title is a pure function of the accumulated record and is
/// resolved again on every render.
pub enum Title<R> {
    /// Fixed text
    Static(String),
    /// Text computed from the accumulated record
    Derived(fn(&R) -> String),
}

impl<R> Title<R> {
    /// Resolve the title against the current record.
    pub fn resolve(&self, record: &R) -> String {
        match self {
            Title::Static(text) => text.clone(),
            Title::Derived(render) => render(record),
        }
    }
}

impl<R> Clone for Title<R> {
    fn clone(&self) -> Self {
        match self {
            Title::Static(text) => Title::Static(text.clone()),
            Title::Derived(render) => Title::Derived(*render),
        }
    }
}

impl<R> fmt::Debug for Title<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Title::Static(text) => f.debug_tuple("Static").field(text).finish(),
            Title::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

/// Whether a step shows the back/next navigation affordances.
///
/// This is orthogonal to the state machine: hidden-chrome steps are still
/// reachable through the normal transitions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Chrome {
    #[default]
    Full,
    Hidden,
}

/// One entry in a step table.
pub struct StepDescriptor<R> {
    /// Position of the step in the table
    pub id: StepId,

    /// Title shown above the step form
    pub title: Title<R>,

    /// Optional helper text under the title
    pub description: Option<String>,

    /// Whether the step must be satisfied before the flow is ready to finish
    pub required: bool,

    /// Navigation chrome policy
    pub chrome: Chrome,

    /// Predicate telling whether the record already satisfies this step
    pub done: Option<fn(&R) -> bool>,
}

impl<R> StepDescriptor<R> {
    /// A required step with a static title and full chrome.
    pub fn new(id: StepId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: Title::Static(title.into()),
            description: None,
            required: true,
            chrome: Chrome::Full,
            done: None,
        }
    }

    /// A required step whose title is derived from the record.
    pub fn derived(id: StepId, title: fn(&R) -> String) -> Self {
        Self {
            title: Title::Derived(title),
            ..Self::new(id, String::new())
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn without_chrome(mut self) -> Self {
        self.chrome = Chrome::Hidden;
        self
    }

    pub fn done_when(mut self, predicate: fn(&R) -> bool) -> Self {
        self.done = Some(predicate);
        self
    }

    /// Whether back/next controls are offered on this step.
    pub fn is_navigable(&self) -> bool {
        self.chrome == Chrome::Full
    }

    /// Evaluate the done-predicate, if the step declares one.
    pub fn is_satisfied_by(&self, record: &R) -> Option<bool> {
        self.done.map(|predicate| predicate(record))
    }
}

impl<R> Clone for StepDescriptor<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            required: self.required,
            chrome: self.chrome,
            done: self.done,
        }
    }
}

impl<R> fmt::Debug for StepDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDescriptor")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("required", &self.required)
            .field("chrome", &self.chrome)
            .field("done", &self.done.is_some())
            .finish()
    }
}
