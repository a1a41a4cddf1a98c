//! Two-step decoration wizard: pick a decoration, write a letter, submit.
//!
//! The machine holds all in-progress input. Guards are exposed as `can_*`
//! queries so the triggering controls can be disabled, and the matching
//! transition methods return [`CoreError::Validation`] when called anyway.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Notice};
use crate::post::{truncate_display, validate_content_length, NewPost, SENDER_DISPLAY_CHARS};
use crate::routing::{Route, TreeTarget};
use crate::session::UserProfile;
use crate::types::UserId;

/// Wizard steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    SelectingDecoration,
    WritingLetter,
    Submitted,
}

impl WizardStep {
    /// 1-based step number shown in the header; `Submitted` has none.
    pub fn number(self) -> Option<u8> {
        match self {
            Self::SelectingDecoration => Some(1),
            Self::WritingLetter => Some(2),
            Self::Submitted => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SelectingDecoration => "Choose a decoration",
            Self::WritingLetter => "Write a letter",
            Self::Submitted => "Submitted",
        }
    }
}

/// State of one decoration attempt against a target tree.
#[derive(Debug, Clone)]
pub struct DecorationWizard {
    step: WizardStep,
    tree_id: UserId,
    sender_name: String,
    receiver_nickname: String,
    selected: Option<String>,
    content: String,
    submitting: bool,
}

impl DecorationWizard {
    /// Start the wizard for `actor` decorating the tree owned by `tree_id`.
    ///
    /// No actor means the caller is unauthenticated and the machine does
    /// not start. `receiver_nickname` falls back to the actor's nickname.
    pub fn start(
        actor: Option<&UserProfile>,
        tree_id: UserId,
        receiver_nickname: Option<String>,
    ) -> Result<Self, CoreError> {
        let actor = actor.ok_or(CoreError::AuthRequired)?;
        if actor.nickname.trim().is_empty() {
            return Err(CoreError::Validation(
                "A sender nickname is required to decorate a tree".to_string(),
            ));
        }
        let receiver_nickname = receiver_nickname
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| actor.nickname.clone());

        Ok(Self {
            step: WizardStep::SelectingDecoration,
            tree_id,
            sender_name: actor.nickname.clone(),
            receiver_nickname,
            selected: None,
            content: String::new(),
            submitting: false,
        })
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn tree_id(&self) -> UserId {
        self.tree_id
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Characters typed so far, for the `n / 850` counter.
    pub fn content_chars(&self) -> usize {
        self.content.chars().count()
    }

    pub fn receiver_nickname(&self) -> &str {
        &self.receiver_nickname
    }

    /// Full sender nickname, as submitted.
    pub fn sender_name(&self) -> &str {
        &self.sender_name
    }

    /// Sender nickname truncated for the letter header.
    pub fn sender_display(&self) -> &str {
        truncate_display(&self.sender_name, SENDER_DISPLAY_CHARS)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    // ---- step 1 ----

    /// Pick (or re-pick) the decoration.
    pub fn select_decoration(&mut self, name: impl Into<String>) -> Result<(), CoreError> {
        self.expect_step(WizardStep::SelectingDecoration)?;
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::Validation(
                "Decoration name must not be empty".to_string(),
            ));
        }
        self.selected = Some(name);
        Ok(())
    }

    /// Whether the "next" control is enabled.
    pub fn can_advance(&self) -> bool {
        self.step == WizardStep::SelectingDecoration && self.selected.is_some()
    }

    /// Move on to writing the letter.
    pub fn advance(&mut self) -> Result<(), CoreError> {
        self.expect_step(WizardStep::SelectingDecoration)?;
        if self.selected.is_none() {
            return Err(CoreError::Validation(
                "Choose a decoration first".to_string(),
            ));
        }
        self.step = WizardStep::WritingLetter;
        Ok(())
    }

    // ---- step 2 ----

    /// Replace the letter text with `text`.
    ///
    /// Input longer than the cap is rejected whole and the stored text is
    /// left as it was.
    pub fn input_content(&mut self, text: impl Into<String>) -> Result<(), CoreError> {
        self.expect_step(WizardStep::WritingLetter)?;
        if self.submitting {
            return Err(CoreError::Validation(
                "Cannot edit the letter while it is being sent".to_string(),
            ));
        }
        let text = text.into();
        validate_content_length(&text)?;
        self.content = text;
        Ok(())
    }

    /// Return to decoration selection. Selection and text are kept.
    pub fn back(&mut self) -> Result<(), CoreError> {
        self.expect_step(WizardStep::WritingLetter)?;
        if self.submitting {
            return Err(CoreError::Validation(
                "Cannot go back while the letter is being sent".to_string(),
            ));
        }
        self.step = WizardStep::SelectingDecoration;
        Ok(())
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.step == WizardStep::WritingLetter
            && !self.submitting
            && self.selected.is_some()
            && !self.content.is_empty()
    }

    /// Mark a submission in flight and build its payload.
    pub fn begin_submit(&mut self) -> Result<NewPost, CoreError> {
        self.expect_step(WizardStep::WritingLetter)?;
        if self.submitting {
            return Err(CoreError::Validation(
                "A submission is already in progress".to_string(),
            ));
        }
        let img_name = self
            .selected
            .clone()
            .ok_or_else(|| CoreError::Validation("Choose a decoration first".to_string()))?;
        if self.content.is_empty() {
            return Err(CoreError::Validation(
                "Write a message before sending".to_string(),
            ));
        }

        let payload = NewPost {
            content: self.content.clone(),
            img_name,
            sender_name: self.sender_name.clone(),
        }
        .validated()?;

        self.submitting = true;
        Ok(payload)
    }

    /// The create-post request succeeded: finish and point at the gallery.
    pub fn submit_succeeded(&mut self) -> Result<Route, CoreError> {
        self.expect_submitting()?;
        self.submitting = false;
        self.step = WizardStep::Submitted;
        Ok(Route::Gallery(TreeTarget::Owner(self.tree_id)))
    }

    /// The create-post request failed: stay on the letter, keep the text.
    pub fn submit_failed(&mut self, error: &CoreError) -> Result<Notice, CoreError> {
        self.expect_submitting()?;
        self.submitting = false;
        Ok(error.notice())
    }

    fn expect_submitting(&self) -> Result<(), CoreError> {
        self.expect_step(WizardStep::WritingLetter)?;
        if !self.submitting {
            return Err(CoreError::Validation(
                "No submission is in progress".to_string(),
            ));
        }
        Ok(())
    }

    fn expect_step(&self, expected: WizardStep) -> Result<(), CoreError> {
        if self.step != expected {
            return Err(CoreError::Validation(format!(
                "Wizard is at '{}', expected '{}'",
                self.step.label(),
                expected.label()
            )));
        }
        Ok(())
    }
}
