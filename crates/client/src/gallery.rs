//! Gallery loading and state.
//!
//! A load is a linear pipeline: identity, then the tree, then derived
//! layout. Reloads replace the whole state; only the current page index
//! carries over, clamped to the new page count.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use yuletree_core::assets::{AssetCategory, ImageHost};
use yuletree_core::error::CoreError;
use yuletree_core::layout::{paginate, Page, Pager, Placement, SlotTable, DEFAULT_PAGE_SIZE};
use yuletree_core::ownership::{
    decide_owner, open_post, primary_action, visible_posts, OwnerDecision, PostReveal,
    PrimaryAction,
};
use yuletree_core::post::Post;
use yuletree_core::routing::{Route, TreeTarget};
use yuletree_core::session::{Session, UserProfile};
use yuletree_core::tree_config::TreeConfiguration;
use yuletree_core::types::{PostId, UserId};

use crate::backend::Backend;

// ---------------------------------------------------------------------------
// Gallery state
// ---------------------------------------------------------------------------

/// Image URLs of the three layers; absent layers are not drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerUrls {
    pub background: Option<String>,
    pub tree: Option<String>,
    pub point: Option<String>,
}

/// A loaded tree with its posts laid out.
#[derive(Debug, Clone)]
pub struct Gallery {
    viewer: UserProfile,
    target: TreeTarget,
    tree_id: UserId,
    owner: OwnerDecision,
    configuration: TreeConfiguration,
    nickname: Option<String>,
    posts: Vec<Post>,
    pager: Pager,
    slots: SlotTable,
    images: ImageHost,
}

impl Gallery {
    pub fn viewer(&self) -> &UserProfile {
        &self.viewer
    }

    pub fn target(&self) -> TreeTarget {
        self.target
    }

    /// Owner id of the viewed tree.
    pub fn tree_id(&self) -> UserId {
        self.tree_id
    }

    pub fn owner_decision(&self) -> OwnerDecision {
        self.owner
    }

    pub fn is_owner(&self) -> bool {
        self.owner.is_owner()
    }

    pub fn configuration(&self) -> &TreeConfiguration {
        &self.configuration
    }

    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }

    /// Header line above the tree.
    pub fn title(&self) -> String {
        match &self.nickname {
            Some(nickname) => format!("{nickname}'s tree"),
            None => "A tree has arrived!".to_string(),
        }
    }

    /// Posts in arrival order. Bodies are already stripped for non-owners.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Whether the tree image (the page shell) is drawn.
    pub fn shell_visible(&self) -> bool {
        self.configuration.tree.is_some()
    }

    pub fn layer_urls(&self) -> LayerUrls {
        let url = |category| {
            self.configuration
                .get(category)
                .map(|name| self.images.resolve_url(name, category))
        };
        LayerUrls {
            background: url(AssetCategory::Background),
            tree: url(AssetCategory::Tree),
            point: url(AssetCategory::Point),
        }
    }

    pub fn decoration_url(&self, post: &Post) -> String {
        self.images
            .resolve_url(&post.img_name, AssetCategory::Decoration)
    }

    /// Every page, always at least one.
    pub fn pages(&self) -> Vec<Page<'_>> {
        // page size was validated when the pager was built
        paginate(&self.posts, self.pager.page_size()).unwrap_or_default()
    }

    /// Decorations on the current page with their slot positions.
    pub fn current_placements(&self) -> Vec<Placement<'_>> {
        self.pages()
            .get(self.pager.current() - 1)
            .map(|page| page.placements(&self.slots))
            .unwrap_or_default()
    }

    pub fn next_page(&mut self) -> usize {
        self.pager.next()
    }

    pub fn prev_page(&mut self) -> usize {
        self.pager.prev()
    }

    /// Apply the reveal rule to a clicked decoration.
    pub fn open_post(&self, post_id: PostId) -> Option<PostReveal> {
        self.posts
            .iter()
            .find(|p| p.id == post_id)
            .map(|post| open_post(post, self.is_owner()))
    }

    pub fn primary_action(&self) -> PrimaryAction {
        primary_action(self.is_owner(), self.tree_id)
    }

    /// Keep the current page of `previous`, clamped to this gallery.
    fn carry_page_from(&mut self, previous: &Gallery) {
        while self.pager.current() < previous.pager.current() && self.pager.has_next() {
            self.pager.next();
        }
    }
}

/// Result of loading a gallery.
#[derive(Debug, Clone)]
pub enum GalleryLoad {
    Ready(Gallery),
    /// The caller must navigate instead of rendering.
    Redirect(Route),
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct GalleryLoader {
    backend: Arc<dyn Backend>,
    images: ImageHost,
    slots: SlotTable,
    page_size: usize,
}

impl GalleryLoader {
    pub fn new(backend: Arc<dyn Backend>, images: ImageHost) -> Self {
        Self {
            backend,
            images,
            slots: SlotTable::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Use a custom slot table and page size.
    pub fn with_layout(mut self, slots: SlotTable, page_size: usize) -> Result<Self, CoreError> {
        Pager::new(page_size)?;
        self.slots = slots;
        self.page_size = page_size;
        Ok(self)
    }

    /// Load a gallery for `target`.
    ///
    /// The viewer's own tree with an incomplete configuration redirects to
    /// the configuration flow. Another owner's incomplete tree still loads.
    pub async fn load(&self, session: &Session, target: TreeTarget) -> Result<GalleryLoad, CoreError> {
        let viewer = self.backend.current_user(session).await?;
        let view = self.backend.tree(session, target).await?;

        if target.is_default() && !view.configuration.is_complete() {
            tracing::info!(user_id = viewer.id, "Own tree incomplete, redirecting to configuration");
            return Ok(GalleryLoad::Redirect(Route::Configure));
        }

        let owner = decide_owner(Some(viewer.id), target.owner_id(), target);
        let tree_id = target.owner_id().unwrap_or(viewer.id);
        let nickname = match target {
            TreeTarget::Mine => view.nickname.or_else(|| Some(viewer.nickname.clone())),
            TreeTarget::Owner(_) => view.nickname,
        };
        let posts = visible_posts(view.posts, owner.is_owner());

        let mut pager = Pager::new(self.page_size)?;
        pager.set_post_count(posts.len());

        tracing::debug!(
            tree_id,
            posts = posts.len(),
            pages = pager.page_count(),
            ?owner,
            "Gallery loaded",
        );

        Ok(GalleryLoad::Ready(Gallery {
            viewer,
            target,
            tree_id,
            owner,
            configuration: view.configuration,
            nickname,
            posts,
            pager,
            slots: self.slots.clone(),
            images: self.images.clone(),
        }))
    }
}

// ---------------------------------------------------------------------------
// Stale-response guard
// ---------------------------------------------------------------------------

/// Identifies one issued load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Generation counter: only the most recently issued ticket is current.
#[derive(Debug, Clone, Default)]
pub struct LoadGuard {
    generation: Arc<AtomicU64>,
}

impl LoadGuard {
    pub fn issue(&self) -> LoadTicket {
        LoadTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Invalidate every outstanding ticket (e.g. on navigation away).
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

/// Outcome of handing a finished load to the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// The load was current and is now displayed.
    Shown,
    /// The load was current and asks for navigation.
    Navigate(Route),
    /// A newer load was issued meanwhile; the response was dropped.
    Stale,
}

/// Screen-local gallery state with stale-response protection.
#[derive(Debug, Default)]
pub struct GalleryScreen {
    guard: LoadGuard,
    gallery: Option<Gallery>,
}

impl GalleryScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket before starting a load.
    pub fn begin_load(&self) -> LoadTicket {
        self.guard.issue()
    }

    pub fn guard(&self) -> &LoadGuard {
        &self.guard
    }

    /// Hand a finished load back. Stale tickets are ignored.
    pub fn apply(&mut self, ticket: LoadTicket, loaded: GalleryLoad) -> Applied {
        if !self.guard.is_current(ticket) {
            tracing::debug!(?ticket, "Dropping stale gallery response");
            return Applied::Stale;
        }
        match loaded {
            GalleryLoad::Ready(mut gallery) => {
                if let Some(previous) = &self.gallery {
                    if previous.target == gallery.target {
                        gallery.carry_page_from(previous);
                    }
                }
                self.gallery = Some(gallery);
                Applied::Shown
            }
            GalleryLoad::Redirect(route) => Applied::Navigate(route),
        }
    }

    pub fn gallery(&self) -> Option<&Gallery> {
        self.gallery.as_ref()
    }

    pub fn gallery_mut(&mut self) -> Option<&mut Gallery> {
        self.gallery.as_mut()
    }
}
