#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Barrier;

use yuletree_client::backend::{Backend, TreeView};
use yuletree_client::resolver::AssetResolver;
use yuletree_core::assets::{AssetCategory, ImageHost};
use yuletree_core::error::CoreError;
use yuletree_core::post::{NewPost, Post};
use yuletree_core::routing::TreeTarget;
use yuletree_core::session::{Session, UserProfile};
use yuletree_core::tree_config::{ResolvedTreeConfiguration, TreeConfiguration};
use yuletree_core::types::{AssetId, UserId};

pub const IMAGE_HOST: &str = "http://img.test";

/// Mutable state behind [`FakeBackend`].
#[derive(Default)]
pub struct FakeState {
    pub profile: Option<UserProfile>,
    pub trees: HashMap<UserId, TreeView>,
    pub catalogs: HashMap<AssetCategory, Vec<String>>,
    pub assets: HashMap<(AssetCategory, String), AssetId>,
    pub saved: Vec<ResolvedTreeConfiguration>,
    pub created: Vec<(UserId, NewPost)>,
    pub fail_save: bool,
    pub fail_create_post: bool,
    /// When set, every asset lookup waits here before answering.
    pub lookup_barrier: Option<Arc<Barrier>>,
    /// Method names in call order.
    pub calls: Vec<String>,
}

/// In-memory backend. Unknown assets fail lookup with `Resolution`.
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(id: UserId, nickname: &str) -> Self {
        let backend = Self::new();
        backend.state().profile = Some(UserProfile {
            id,
            nickname: nickname.to_string(),
        });
        backend
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn with_tree(self, owner: UserId, view: TreeView) -> Self {
        self.state().trees.insert(owner, view);
        self
    }

    pub fn with_asset(self, category: AssetCategory, name: &str, id: AssetId) -> Self {
        self.state().assets.insert((category, name.to_string()), id);
        self
    }

    pub fn with_catalog(self, category: AssetCategory, names: &[&str]) -> Self {
        self.state()
            .catalogs
            .insert(category, names.iter().map(|n| n.to_string()).collect());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    fn record(&self, call: &str) {
        self.state().calls.push(call.to_string());
    }

    fn me(&self) -> Result<UserProfile, CoreError> {
        self.state().profile.clone().ok_or(CoreError::AuthRequired)
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn current_user(&self, session: &Session) -> Result<UserProfile, CoreError> {
        self.record("current_user");
        session.bearer()?;
        self.me()
    }

    async fn tree(&self, session: &Session, target: TreeTarget) -> Result<TreeView, CoreError> {
        self.record("tree");
        session.bearer()?;
        let owner = match target {
            TreeTarget::Mine => self.me()?.id,
            TreeTarget::Owner(id) => id,
        };
        Ok(self
            .state()
            .trees
            .get(&owner)
            .cloned()
            .unwrap_or_else(|| tree_view(TreeConfiguration::default(), Vec::new(), None)))
    }

    async fn catalog(
        &self,
        session: &Session,
        category: AssetCategory,
    ) -> Result<Vec<String>, CoreError> {
        self.record("catalog");
        session.bearer()?;
        Ok(self
            .state()
            .catalogs
            .get(&category)
            .cloned()
            .unwrap_or_default())
    }

    async fn lookup_asset(
        &self,
        session: &Session,
        name: &str,
        category: AssetCategory,
    ) -> Result<AssetId, CoreError> {
        self.record("lookup_asset");
        session.bearer()?;
        let barrier = self.state().lookup_barrier.clone();
        if let Some(barrier) = barrier {
            barrier.wait().await;
        }
        self.state()
            .assets
            .get(&(category, name.to_string()))
            .copied()
            .ok_or_else(|| CoreError::Resolution {
                name: name.to_string(),
                category,
                message: "not found".to_string(),
            })
    }

    async fn save_tree(
        &self,
        session: &Session,
        resolved: &ResolvedTreeConfiguration,
    ) -> Result<(), CoreError> {
        self.record("save_tree");
        session.bearer()?;
        let mut state = self.state();
        if state.fail_save {
            return Err(CoreError::Persistence("disk full".to_string()));
        }
        state.saved.push(*resolved);
        Ok(())
    }

    async fn create_post(
        &self,
        session: &Session,
        tree_id: UserId,
        post: &NewPost,
    ) -> Result<(), CoreError> {
        self.record("create_post");
        session.bearer()?;
        let mut state = self.state();
        if state.fail_create_post {
            return Err(CoreError::Persistence("503".to_string()));
        }
        state.created.push((tree_id, post.clone()));
        Ok(())
    }
}

// ---- fixtures ----

pub fn session() -> Session {
    Session::acquire("test-token").unwrap()
}

pub fn images() -> ImageHost {
    ImageHost::new(IMAGE_HOST)
}

pub fn resolver(backend: &FakeBackend) -> AssetResolver {
    AssetResolver::new(Arc::new(backend.clone()), images())
}

pub fn complete_config() -> TreeConfiguration {
    TreeConfiguration::new("snow.png", "pine.png", "star.png")
}

pub fn tree_view(
    configuration: TreeConfiguration,
    posts: Vec<Post>,
    nickname: Option<&str>,
) -> TreeView {
    TreeView {
        configuration,
        posts,
        nickname: nickname.map(str::to_string),
    }
}

/// `count` posts with ids `1..=count`.
pub fn posts(count: i64) -> Vec<Post> {
    (1..=count)
        .map(|id| Post {
            id,
            img_name: format!("ornament{id}.png"),
            sender_name: format!("friend{id}"),
            content: Some(format!("letter {id}")),
        })
        .collect()
}
