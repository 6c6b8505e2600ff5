//! Model registry for lcdui.
//!
//! Every model object (a screen, an item, a ticker, ...) registers itself here
//! on construction and is identified by a [`ModelId`] from then on. Bindings
//! refer to their model through this id: it is a plain non-owning handle, so
//! holding one never keeps a model alive.
//!
//! # Key Types
//!
//! - [`ModelId`] - Stable handle for a registered model
//! - [`ModelBase`] - RAII registration helper embedded in model types
//! - [`ModelRegistry`] - Arena of registered models
//! - [`SharedModelRegistry`] - Thread-safe wrapper around [`ModelRegistry`]

use std::any::TypeId;
use std::sync::LazyLock;

use parking_lot::RwLock;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a registered model object.
    ///
    /// `ModelId`s stay valid for as long as the model lives and are never
    /// reused while it does. After the model is dropped the id no longer
    /// resolves in the registry.
    pub struct ModelId;
}

impl ModelId {
    /// Convert the id to a raw u64 value, e.g. for a backend's handle table.
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Rebuild an id from a value produced by [`ModelId::as_raw`].
    ///
    /// This does not check that the id is registered.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}

/// Registry record for one model.
#[derive(Debug, Clone)]
struct ModelData {
    type_id: TypeId,
    type_name: &'static str,
}

/// The arena of all live model objects.
pub struct ModelRegistry {
    models: SlotMap<ModelId, ModelData>,
}

impl ModelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            models: SlotMap::with_key(),
        }
    }

    /// Register a model of type `T` and return its id.
    pub fn register<T: 'static>(&mut self) -> ModelId {
        let data = ModelData {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        };
        let id = self.models.insert(data);
        tracing::trace!(target: targets::MODEL, ?id, type_name = std::any::type_name::<T>(), "registered model");
        id
    }

    /// Remove a model. Returns `false` if it was not registered.
    pub fn unregister(&mut self, id: ModelId) -> bool {
        let removed = self.models.remove(id).is_some();
        if removed {
            tracing::trace!(target: targets::MODEL, ?id, "unregistered model");
        }
        removed
    }

    /// Check whether an id refers to a live model.
    pub fn contains(&self, id: ModelId) -> bool {
        self.models.contains_key(id)
    }

    /// Type name of a live model.
    pub fn type_name(&self, id: ModelId) -> Option<&'static str> {
        self.models.get(id).map(|data| data.type_name)
    }

    /// Check whether a live model is of type `T`.
    pub fn is_type<T: 'static>(&self, id: ModelId) -> bool {
        self.models
            .get(id)
            .is_some_and(|data| data.type_id == TypeId::of::<T>())
    }

    /// Number of live models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Returns `true` if no model is registered.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Ids and type names of every live model, in arena order.
    pub fn entries(&self) -> Vec<(ModelId, &'static str)> {
        self.models
            .iter()
            .map(|(id, data)| (id, data.type_name))
            .collect()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe wrapper around [`ModelRegistry`].
pub struct SharedModelRegistry {
    inner: RwLock<ModelRegistry>,
}

impl SharedModelRegistry {
    /// Create an empty shared registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(ModelRegistry::new()),
        }
    }

    /// Register a model of type `T`.
    pub fn register<T: 'static>(&self) -> ModelId {
        self.inner.write().register::<T>()
    }

    /// Remove a model.
    pub fn unregister(&self, id: ModelId) -> bool {
        self.inner.write().unregister(id)
    }

    /// Check whether an id refers to a live model.
    pub fn contains(&self, id: ModelId) -> bool {
        self.inner.read().contains(id)
    }

    /// Type name of a live model.
    pub fn type_name(&self, id: ModelId) -> Option<&'static str> {
        self.inner.read().type_name(id)
    }

    /// Check whether a live model is of type `T`.
    pub fn is_type<T: 'static>(&self, id: ModelId) -> bool {
        self.inner.read().is_type::<T>(id)
    }

    /// Number of live models.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if no model is registered.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Access the registry with a read lock for compound queries.
    pub fn with_read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ModelRegistry) -> R,
    {
        f(&self.inner.read())
    }
}

impl Default for SharedModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_REGISTRY: LazyLock<SharedModelRegistry> = LazyLock::new(SharedModelRegistry::new);

/// The process-wide model registry.
pub fn global_registry() -> &'static SharedModelRegistry {
    &GLOBAL_REGISTRY
}

/// Registration helper embedded in every model type.
///
/// Constructing a `ModelBase` registers the model with the
/// [`global_registry`]; dropping it unregisters the model.
///
/// # Example
///
/// ```
/// use lcdui_core::{global_registry, ModelBase};
///
/// struct Counter {
///     base: ModelBase,
/// }
///
/// let counter = Counter { base: ModelBase::new::<Counter>() };
/// let id = counter.base.id();
/// assert!(global_registry().contains(id));
/// drop(counter);
/// assert!(!global_registry().contains(id));
/// ```
#[derive(Debug)]
pub struct ModelBase {
    id: ModelId,
}

impl ModelBase {
    /// Register a new model of type `T`.
    pub fn new<T: 'static>() -> Self {
        Self {
            id: global_registry().register::<T>(),
        }
    }

    /// The model's id.
    pub fn id(&self) -> ModelId {
        self.id
    }

    /// The registered type name.
    pub fn type_name(&self) -> &'static str {
        global_registry().type_name(self.id).unwrap_or("<unregistered>")
    }
}

impl Drop for ModelBase {
    fn drop(&mut self) {
        global_registry().unregister(self.id);
    }
}
