//! Decorate flow: drives a [`DecorationWizard`] against the backend.

use std::sync::Arc;

use futures::future::try_join;

use yuletree_core::assets::AssetCategory;
use yuletree_core::error::{CoreError, Notice};
use yuletree_core::routing::{Route, TreeTarget};
use yuletree_core::session::Session;
use yuletree_core::types::UserId;
use yuletree_core::wizard::DecorationWizard;

use crate::backend::Backend;
use crate::resolver::AssetResolver;

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The post was created; navigate to the receiver's gallery.
    Sent(Route),
    /// Nothing was created. The wizard keeps its state.
    Rejected(Notice),
}

/// One decoration attempt, from catalog to submitted post.
pub struct DecorateSession {
    backend: Arc<dyn Backend>,
    resolver: AssetResolver,
    wizard: DecorationWizard,
    decorations: Vec<String>,
}

impl DecorateSession {
    /// Load the actor, the receiver's nickname and the decoration catalog,
    /// then start the wizard at step 1.
    pub async fn start(
        backend: Arc<dyn Backend>,
        resolver: AssetResolver,
        session: &Session,
        tree_id: UserId,
    ) -> Result<Self, CoreError> {
        let actor = backend.current_user(session).await?;

        let (view, decorations) = try_join(
            backend.tree(session, TreeTarget::Owner(tree_id)),
            resolver.list_catalog(session, AssetCategory::Decoration),
        )
        .await?;

        let wizard = DecorationWizard::start(Some(&actor), tree_id, view.nickname)?;
        tracing::debug!(
            tree_id,
            sender = wizard.sender_name(),
            options = decorations.len(),
            "Decorate session started",
        );

        Ok(Self {
            backend,
            resolver,
            wizard,
            decorations,
        })
    }

    pub fn wizard(&self) -> &DecorationWizard {
        &self.wizard
    }

    pub fn wizard_mut(&mut self) -> &mut DecorationWizard {
        &mut self.wizard
    }

    /// Decoration names in catalog order.
    pub fn decorations(&self) -> &[String] {
        &self.decorations
    }

    /// Image URL of a catalog entry.
    pub fn decoration_url(&self, name: &str) -> String {
        self.resolver.resolve_url(name, AssetCategory::Decoration)
    }

    /// Send the letter.
    ///
    /// A failed request leaves the wizard on the letter step with the
    /// text intact; an auth failure maps to a login redirect notice.
    pub async fn submit(&mut self, session: &Session) -> SubmitOutcome {
        let payload = match self.wizard.begin_submit() {
            Ok(payload) => payload,
            Err(e) => return SubmitOutcome::Rejected(e.notice()),
        };

        let tree_id = self.wizard.tree_id();
        match self.backend.create_post(session, tree_id, &payload).await {
            Ok(()) => {
                tracing::info!(tree_id, img_name = %payload.img_name, "Decoration posted");
                match self.wizard.submit_succeeded() {
                    Ok(route) => SubmitOutcome::Sent(route),
                    Err(e) => SubmitOutcome::Rejected(e.notice()),
                }
            }
            Err(e) => {
                tracing::warn!(tree_id, error = %e, "Failed to post decoration");
                let notice = self
                    .wizard
                    .submit_failed(&e)
                    .unwrap_or_else(|guard| guard.notice());
                SubmitOutcome::Rejected(notice)
            }
        }
    }
}
