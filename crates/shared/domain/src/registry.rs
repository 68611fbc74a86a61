//! Type-erased registry entries for the feature slices built at start-up.

use std::any::{Any, TypeId};
use std::fmt::Debug;

/// State owned by one feature slice (catalog, ordering, ...), shared across request tasks.
pub trait FeatureSlice: Any + Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

/// One registered slice, keyed by its concrete type.
#[derive(Debug)]
pub struct InitializedSlice {
    pub id: TypeId,
    pub state: Box<dyn FeatureSlice>,
}

impl InitializedSlice {
    pub fn new<T: FeatureSlice>(state: T) -> Self {
        Self { id: TypeId::of::<T>(), state: Box::new(state) }
    }

    /// Downcasts the stored state back to `T`.
    #[must_use]
    pub fn downcast<T: FeatureSlice>(&self) -> Option<&T> {
        self.state.as_any().downcast_ref::<T>()
    }
}
