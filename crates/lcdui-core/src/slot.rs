//! Binding slots: the model side of the binding system.
//!
//! A [`BindingSlot`] is owned by a model object and holds at most one
//! binding. Mutators notify the slot's current binding through
//! [`BindingSlot::notify`]; backends swap bindings in and out through
//! [`BindingSlot::attach`].
//!
//! # Slot chains
//!
//! Model types that build on a base level (a choice group is an item, a form
//! is a screen is a displayable) give their slot a parent: the slot of the
//! base level. Attaching a binding to the derived slot routes the same binding
//! object through every parent slot, so a single attach makes the binding
//! visible at each level. Clearing the derived slot clears the parents too.
//!
//! The binding's owner slot is always the slot the attach was made on. Only
//! that slot runs the lifecycle hooks; parents just mirror the binding.
//!
//! # Locking
//!
//! No lock is held while a binding runs. Hooks and notification handlers may
//! call back into the model, attach or detach bindings, or read the model
//! through [`BindingBase::view`](crate::BindingBase::view).

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::binding::{Attachment, Binding, ModelView};
use crate::logging::targets;
use crate::model::ModelId;

/// Identifier of a binding slot, unique for the lifetime of the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(u64);

impl SlotId {
    fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}

/// Type-erased release entry point used by a binding's back-reference.
pub(crate) trait SlotRelease: Send + Sync {
    /// Take the current binding out of the slot and its parents.
    ///
    /// Runs `on_detach` and clears the binding's record if this slot owns it.
    fn release(&self);
}

/// Link from a slot to its parent slot, erasing the parent's binding type.
trait ParentLink<B: ?Sized>: Send + Sync {
    fn install(&self, binding: &Arc<B>, views: &mut Vec<ModelView>);
    fn release(&self);
    fn slot_id(&self) -> SlotId;
}

struct Upstream<P: ?Sized + Binding, B: ?Sized> {
    slot: Arc<BindingSlot<P>>,
    upcast: fn(Arc<B>) -> Arc<P>,
}

impl<P: ?Sized + Binding, B: ?Sized + Binding> ParentLink<B> for Upstream<P, B> {
    fn install(&self, binding: &Arc<B>, views: &mut Vec<ModelView>) {
        self.slot.install_chained((self.upcast)(binding.clone()), views);
    }

    fn release(&self) {
        SlotRelease::release(&*self.slot);
    }

    fn slot_id(&self) -> SlotId {
        self.slot.id()
    }
}

/// A model-owned container holding at most one binding of type `B`.
///
/// `B` is usually a trait object such as `dyn ScreenBinding`.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use lcdui_core::{Binding, BindingBase, BindingSlot, ModelBase};
///
/// trait TitleBinding: Binding {
///     fn on_title_changed(&self, _title: &str) {}
/// }
///
/// struct Titled {
///     base: ModelBase,
///     slot: Arc<BindingSlot<dyn TitleBinding>>,
/// }
///
/// impl Titled {
///     fn new() -> Arc<Self> {
///         let base = ModelBase::new::<Self>();
///         Arc::new_cyclic(|weak| Self {
///             slot: BindingSlot::new(weak, base.id()),
///             base,
///         })
///     }
///
///     fn set_title(&self, title: &str) {
///         self.slot.notify(|b| b.on_title_changed(title));
///     }
/// }
///
/// #[derive(Default)]
/// struct Printer {
///     base: BindingBase,
/// }
///
/// impl Binding for Printer {
///     fn binding_base(&self) -> &BindingBase {
///         &self.base
///     }
/// }
///
/// impl TitleBinding for Printer {
///     fn on_title_changed(&self, title: &str) {
///         println!("title is now {title}");
///     }
/// }
///
/// let model = Titled::new();
/// let printer = Arc::new(Printer::default());
/// model.slot.attach(Some(printer.clone()));
/// assert_eq!(printer.base.attached_model(), Some(model.base.id()));
///
/// model.set_title("Inbox");
/// printer.base.detach();
/// assert!(!printer.base.is_attached());
/// ```
pub struct BindingSlot<B: ?Sized + Binding> {
    id: SlotId,
    model: ModelId,
    owner: ModelView,
    current: Mutex<Option<Arc<B>>>,
    parent: Option<Box<dyn ParentLink<B>>>,
}

impl<B: ?Sized + Binding> BindingSlot<B> {
    /// Create a slot owned by `owner`, a model registered as `model`.
    ///
    /// `owner` is typically the `Weak` handed out by `Arc::new_cyclic` while
    /// the model is being built.
    pub fn new<M: Any + Send + Sync>(owner: &Weak<M>, model: ModelId) -> Arc<Self> {
        let owner: ModelView = owner.clone();
        Arc::new(Self {
            id: SlotId::next(),
            model,
            owner,
            current: Mutex::new(None),
            parent: None,
        })
    }

    /// Create a slot whose bindings are also routed through `parent`.
    ///
    /// `upcast` converts this slot's binding type into the parent's, which for
    /// trait objects is a plain coercion:
    ///
    /// ```ignore
    /// fn as_item(binding: Arc<dyn GaugeBinding>) -> Arc<dyn ItemBinding> {
    ///     binding
    /// }
    /// ```
    pub fn with_parent<M, P>(
        owner: &Weak<M>,
        model: ModelId,
        parent: Arc<BindingSlot<P>>,
        upcast: fn(Arc<B>) -> Arc<P>,
    ) -> Arc<Self>
    where
        M: Any + Send + Sync,
        P: ?Sized + Binding,
    {
        let owner: ModelView = owner.clone();
        let link: Box<dyn ParentLink<B>> = Box::new(Upstream {
            slot: parent,
            upcast,
        });
        Arc::new(Self {
            id: SlotId::next(),
            model,
            owner,
            current: Mutex::new(None),
            parent: Some(link),
        })
    }

    /// This slot's id.
    pub fn id(&self) -> SlotId {
        self.id
    }

    /// The model that owns this slot.
    pub fn model(&self) -> ModelId {
        self.model
    }

    /// The parent slot's id, if this slot is chained.
    pub fn parent_id(&self) -> Option<SlotId> {
        self.parent.as_ref().map(|p| p.slot_id())
    }

    /// The binding currently held by the slot.
    pub fn current(&self) -> Option<Arc<B>> {
        self.current.lock().clone()
    }

    /// Returns `true` if a binding is installed.
    pub fn is_bound(&self) -> bool {
        self.current.lock().is_some()
    }

    /// Returns `true` if `binding` is the one currently installed.
    pub fn holds(&self, binding: &Arc<B>) -> bool {
        self.current
            .lock()
            .as_ref()
            .is_some_and(|current| same_binding(current, binding))
    }

    /// Attach `binding` to this slot, or detach the current one with `None`.
    ///
    /// Attaching the binding that is already installed does nothing. Otherwise
    /// the current binding is detached, `binding` is detached from wherever it
    /// was attached, and then installed here and in every parent slot. Its
    /// `on_attach` runs once the whole chain holds it.
    #[tracing::instrument(skip_all, target = "lcdui_core::slot", level = "trace", fields(slot = %self.id))]
    pub fn attach(self: &Arc<Self>, binding: Option<Arc<B>>) {
        match &binding {
            Some(binding) if self.holds(binding) => {
                tracing::trace!(target: targets::SLOT, "binding already attached");
                return;
            }
            None if !self.is_bound() => return,
            _ => {}
        }

        self.clear();

        let Some(binding) = binding else {
            return;
        };

        let base = binding.binding_base();
        if let Some(previous) = base.owner_slot() {
            tracing::debug!(target: targets::SLOT, from = %previous, to = %self.id, "moving binding");
            base.detach();
        }

        *self.current.lock() = Some(binding.clone());

        let mut views = vec![self.owner.clone()];
        if let Some(parent) = &self.parent {
            parent.install(&binding, &mut views);
        }

        let slot: Weak<dyn SlotRelease> = Arc::downgrade(self) as Weak<dyn SlotRelease>;
        base.set_attachment(Attachment {
            model: self.model,
            slot_id: self.id,
            slot,
            views,
        });

        tracing::trace!(target: targets::SLOT, model = ?self.model, "binding attached");
        binding.on_attach();
    }

    /// Detach whatever binding the slot holds.
    ///
    /// If the binding is owned by a derived slot further down the chain, the
    /// whole chain is cleared.
    pub fn clear(&self) {
        let current = self.current.lock().clone();
        let Some(current) = current else {
            return;
        };

        current.binding_base().detach();
        // A binding whose owner slot is already gone may still linger here.
        SlotRelease::release(self);
    }

    /// Invoke `f` on the current binding, if any.
    ///
    /// `f` runs synchronously before `notify` returns and without any slot
    /// lock held.
    pub fn notify<F>(&self, f: F)
    where
        F: FnOnce(&B),
    {
        let current = self.current.lock().clone();
        if let Some(binding) = current {
            tracing::trace!(target: targets::SLOT, slot = %self.id, "notifying binding");
            f(&binding);
        }
    }

    /// Mirror a binding owned by a derived slot.
    fn install_chained(&self, binding: Arc<B>, views: &mut Vec<ModelView>) {
        self.clear();
        *self.current.lock() = Some(binding.clone());
        views.push(self.owner.clone());
        if let Some(parent) = &self.parent {
            parent.install(&binding, views);
        }
    }
}

impl<B: ?Sized + Binding> SlotRelease for BindingSlot<B> {
    fn release(&self) {
        let Some(binding) = self.current.lock().take() else {
            return;
        };

        if let Some(parent) = &self.parent {
            parent.release();
        }

        let base = binding.binding_base();
        if base.owner_slot() == Some(self.id) {
            tracing::trace!(target: targets::SLOT, slot = %self.id, "binding detached");
            binding.on_detach();
            base.clear_attachment_if_owned_by(self.id);
        }
    }
}

impl<B: ?Sized + Binding> Drop for BindingSlot<B> {
    fn drop(&mut self) {
        SlotRelease::release(self);
    }
}

impl<B: ?Sized + Binding> fmt::Debug for BindingSlot<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingSlot")
            .field("id", &self.id)
            .field("model", &self.model)
            .field("bound", &self.is_bound())
            .field("parent", &self.parent_id())
            .finish()
    }
}

fn same_binding<B: ?Sized>(a: &Arc<B>, b: &Arc<B>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
