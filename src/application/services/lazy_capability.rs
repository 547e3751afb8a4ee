use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use tokio::sync::{OwnedRwLockWriteGuard, RwLock};

use crate::application::ports::BackendError;

/// Builds a capability provider. Runs on the blocking pool because loading a
/// model or probing a backend may take a while.
pub type CapabilityBuilder<T> = Arc<dyn Fn() -> Result<Arc<T>, String> + Send + Sync>;

enum Slot<T: ?Sized> {
    Empty,
    Ready(Arc<T>),
    Unavailable { reason: String, since: Instant },
}

/// Process-wide handle to a lazily constructed capability provider.
///
/// The first caller hands the write lock to a detached task that builds the
/// provider and fills the slot, so concurrent first uses result in a single
/// construction and every caller sees the same instance. Dropping the caller
/// does not cancel the build. A failed construction is cached as unavailable; it is
/// attempted again only once `retry_cooldown` has elapsed, and never when the
/// cooldown is `None`.
pub struct LazyCapability<T: ?Sized> {
    name: &'static str,
    builder: CapabilityBuilder<T>,
    retry_cooldown: Option<Duration>,
    slot: Arc<RwLock<Slot<T>>>,
    attempts: AtomicUsize,
}

impl<T> LazyCapability<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    pub fn new(
        name: &'static str,
        builder: CapabilityBuilder<T>,
        retry_cooldown: Option<Duration>,
    ) -> Self {
        Self {
            name,
            builder,
            retry_cooldown,
            slot: Arc::new(RwLock::new(Slot::Empty)),
            attempts: AtomicUsize::new(0),
        }
    }

    /// A handle whose provider already exists.
    pub fn ready(name: &'static str, instance: Arc<T>) -> Self {
        let builder_instance = Arc::clone(&instance);
        Self {
            name,
            builder: Arc::new(move || Ok::<_, String>(Arc::clone(&builder_instance))),
            retry_cooldown: None,
            slot: Arc::new(RwLock::new(Slot::Ready(instance))),
            attempts: AtomicUsize::new(0),
        }
    }

    /// A handle that never yields a provider.
    pub fn disabled(name: &'static str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        let builder_reason = reason.clone();
        Self {
            name,
            builder: Arc::new(move || Err::<Arc<T>, _>(builder_reason.clone())),
            retry_cooldown: None,
            slot: Arc::new(RwLock::new(Slot::Unavailable {
                reason,
                since: Instant::now(),
            })),
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of times the builder has actually run.
    pub fn construction_attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub async fn get(&self) -> Result<Arc<T>, BackendError> {
        {
            let slot = self.slot.read().await;
            if let Some(result) = self.settled(&slot) {
                return result;
            }
        }

        let slot = Arc::clone(&self.slot).write_owned().await;
        if let Some(result) = self.settled(&slot) {
            return result;
        }

        self.attempts.fetch_add(1, Ordering::SeqCst);
        let build = tokio::spawn(Self::build(self.name, Arc::clone(&self.builder), slot));

        match build.await {
            Ok(result) => result,
            Err(e) => Err(BackendError::Unavailable(format!(
                "initialization task failed: {}",
                e
            ))),
        }
    }

    async fn build(
        name: &'static str,
        builder: CapabilityBuilder<T>,
        mut slot: OwnedRwLockWriteGuard<Slot<T>>,
    ) -> Result<Arc<T>, BackendError> {
        tracing::info!(capability = name, "Initializing capability provider");

        let built = match tokio::task::spawn_blocking(move || builder()).await {
            Ok(result) => result,
            Err(e) => Err(format!("initialization task failed: {}", e)),
        };

        match built {
            Ok(instance) => {
                tracing::info!(capability = name, "Capability provider ready");
                *slot = Slot::Ready(Arc::clone(&instance));
                Ok(instance)
            }
            Err(reason) => {
                tracing::warn!(
                    capability = name,
                    reason = %reason,
                    "Capability provider unavailable"
                );
                *slot = Slot::Unavailable {
                    reason: reason.clone(),
                    since: Instant::now(),
                };
                Err(BackendError::Unavailable(reason))
            }
        }
    }

    fn settled(&self, slot: &Slot<T>) -> Option<Result<Arc<T>, BackendError>> {
        match slot {
            Slot::Ready(instance) => Some(Ok(Arc::clone(instance))),
            Slot::Unavailable { reason, since } if !self.may_retry(*since) => {
                Some(Err(BackendError::Unavailable(reason.clone())))
            }
            _ => None,
        }
    }

    fn may_retry(&self, since: Instant) -> bool {
        self.retry_cooldown
            .is_some_and(|cooldown| since.elapsed() >= cooldown)
    }
}
