//! Share dialog state: the label being edited and the link derived from it.

use url::Url;

use crate::models::Question;
use crate::protocol::share_link;

/// Longest label accepted from the keyboard.
const SLUG_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareDialog {
    slug: String,
    link: String,
    copied: bool,
}

impl ShareDialog {
    /// Open the dialog with `slug` prefilled and the link computed.
    pub fn open(questions: &[Question], slug: &str, base: &Url) -> Self {
        let mut dialog = Self {
            slug: slug.to_string(),
            link: String::new(),
            copied: false,
        };
        dialog.regenerate(questions, base);
        dialog
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn is_copied(&self) -> bool {
        self.copied
    }

    /// Recompute the link; called whenever the questions or the label change.
    pub fn regenerate(&mut self, questions: &[Question], base: &Url) {
        self.link = share_link::encode(questions, Some(&self.slug), base).into();
        self.copied = false;
    }

    pub fn push_slug_char(&mut self, c: char, questions: &[Question], base: &Url) {
        if self.slug.chars().count() < SLUG_MAX_LENGTH {
            self.slug.push(c);
            self.regenerate(questions, base);
        }
    }

    pub fn pop_slug_char(&mut self, questions: &[Question], base: &Url) {
        if self.slug.pop().is_some() {
            self.regenerate(questions, base);
        }
    }

    /// Mark the link as copied and hand it out.
    pub fn copy(&mut self) -> &str {
        self.copied = true;
        &self.link
    }
}
