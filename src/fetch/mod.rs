//! Request coordination for the three fetch targets
//!
//! The session issues requests against three independent targets: the
//! product listing and one facet endpoint per dimension. For each target
//! at most one request is outstanding; issuing a new one supersedes the
//! previous request by bumping the target's generation counter and
//! aborting its task.
//!
//! Completions arrive on an mpsc channel tagged with the generation they
//! were issued under. The session compares that tag against the target's
//! current generation before applying anything, so a superseded response
//! that still manages to complete can never overwrite newer state (the
//! classic out-of-order-response hazard under debounced input).

use crate::api::{ApiClient, ApiError, FacetOption, PageDto, Product};
use crate::facets::{FacetDimension, FilterContext};
use crate::query::QueryState;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// One of the independent request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchTarget {
    Products,
    Facet(FacetDimension),
}

/// A completed fetch, tagged with the generation it was issued under
#[derive(Debug)]
pub enum FetchMessage {
    Products {
        generation: u64,
        result: Result<PageDto<Product>, ApiError>,
    },
    Facet {
        dimension: FacetDimension,
        generation: u64,
        append: bool,
        result: Result<PageDto<FacetOption>, ApiError>,
    },
}

impl FetchMessage {
    /// The target this message belongs to
    #[must_use]
    pub const fn target(&self) -> FetchTarget {
        match self {
            Self::Products { .. } => FetchTarget::Products,
            Self::Facet { dimension, .. } => FetchTarget::Facet(*dimension),
        }
    }

    /// The generation this message was issued under
    #[must_use]
    pub const fn generation(&self) -> u64 {
        match self {
            Self::Products { generation, .. } | Self::Facet { generation, .. } => *generation,
        }
    }
}

/// Per-target generation counters
///
/// A target's counter advances every time a new request is issued for it;
/// a response is current only if its tag equals the counter.
#[derive(Debug, Default, Clone)]
pub struct GenerationTable {
    products: u64,
    brand: u64,
    category: u64,
}

impl GenerationTable {
    const fn slot(&mut self, target: FetchTarget) -> &mut u64 {
        match target {
            FetchTarget::Products => &mut self.products,
            FetchTarget::Facet(FacetDimension::Brand) => &mut self.brand,
            FetchTarget::Facet(FacetDimension::Category) => &mut self.category,
        }
    }

    /// Advance a target's generation, superseding any outstanding request
    pub const fn bump(&mut self, target: FetchTarget) -> u64 {
        let slot = self.slot(target);
        *slot += 1;
        *slot
    }

    /// Current generation of a target
    #[must_use]
    pub const fn current(&self, target: FetchTarget) -> u64 {
        match target {
            FetchTarget::Products => self.products,
            FetchTarget::Facet(FacetDimension::Brand) => self.brand,
            FetchTarget::Facet(FacetDimension::Category) => self.category,
        }
    }

    /// Whether a tagged response is still current for its target
    #[must_use]
    pub const fn is_current(&self, target: FetchTarget, generation: u64) -> bool {
        self.current(target) == generation
    }
}

/// Spawns fetch tasks and enforces at-most-one-outstanding per target
pub struct FetchCoordinator {
    client: Arc<ApiClient>,
    handle: Handle,
    tx: UnboundedSender<FetchMessage>,
    generations: GenerationTable,
    tasks: HashMap<FetchTarget, JoinHandle<()>>,
}

impl FetchCoordinator {
    /// Create a coordinator and the receiver its completions arrive on
    #[must_use]
    pub fn new(client: ApiClient, handle: Handle) -> (Self, UnboundedReceiver<FetchMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let coordinator = Self {
            client: Arc::new(client),
            handle,
            tx,
            generations: GenerationTable::default(),
            tasks: HashMap::new(),
        };
        (coordinator, rx)
    }

    /// Issue a product listing fetch, superseding any outstanding one
    ///
    /// Returns the generation the request was issued under.
    pub fn request_products(&mut self, query: &QueryState, size: u32) -> u64 {
        let generation = self.supersede(FetchTarget::Products);
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let query = query.clone();

        let task = self.handle.spawn(async move {
            let result = client.fetch_products(&query, size).await;
            // The receiver is gone only during shutdown.
            let _ = tx.send(FetchMessage::Products { generation, result });
        });
        self.tasks.insert(FetchTarget::Products, task);
        generation
    }

    /// Issue a facet page fetch, superseding any outstanding one for the
    /// same dimension
    ///
    /// Returns the generation the request was issued under.
    pub fn request_facet(
        &mut self,
        dimension: FacetDimension,
        context: &FilterContext,
        page: u32,
        size: u32,
        append: bool,
    ) -> u64 {
        let generation = self.supersede(FetchTarget::Facet(dimension));
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let context = context.clone();

        let task = self.handle.spawn(async move {
            let result = client.fetch_facet_page(dimension, &context, page, size).await;
            let _ = tx.send(FetchMessage::Facet {
                dimension,
                generation,
                append,
                result,
            });
        });
        self.tasks.insert(FetchTarget::Facet(dimension), task);
        generation
    }

    /// Current generation of a target
    #[must_use]
    pub const fn current_generation(&self, target: FetchTarget) -> u64 {
        self.generations.current(target)
    }

    /// Whether a message is still current for its target
    #[must_use]
    pub const fn is_current(&self, message: &FetchMessage) -> bool {
        self.generations
            .is_current(message.target(), message.generation())
    }

    /// Abort every in-flight task
    pub fn abort_all(&mut self) {
        for (fetch_target, task) in self.tasks.drain() {
            tracing::debug!(?fetch_target, "aborting in-flight fetch");
            task.abort();
        }
    }

    fn supersede(&mut self, target: FetchTarget) -> u64 {
        if let Some(task) = self.tasks.remove(&target) {
            tracing::debug!(fetch_target = ?target, "superseding in-flight fetch");
            task.abort();
        }
        self.generations.bump(target)
    }
}

impl Drop for FetchCoordinator {
    fn drop(&mut self) {
        self.abort_all();
    }
}
