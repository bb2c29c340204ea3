use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use async_trait::async_trait;
use crate::kernel::error::Result;

/// Core component lifecycle trait for all kernel components
#[async_trait]
pub trait KernelComponent: Any + Send + Sync + Debug {
    fn name(&self) -> &'static str;
    async fn initialize(&self) -> Result<()>;
    async fn start(&self) -> Result<()>;
    async fn stop(&self) -> Result<()>;
}

/// Registry storing components as Arc<dyn KernelComponent>, keyed by concrete type
#[derive(Default, Debug)]
pub struct DependencyRegistry {
    instances: HashMap<TypeId, Arc<dyn KernelComponent>>,
}

impl DependencyRegistry {
    /// Create a new empty dependency registry
    pub fn new() -> Self {
        Self {
            instances: HashMap::new(),
        }
    }

    /// Register a component instance, keyed by the TypeId of the concrete type V.
    pub fn register_instance<V>(&mut self, instance: Arc<V>)
    where
        V: KernelComponent + 'static,
    {
        self.instances.insert(TypeId::of::<V>(), instance);
    }

    /// Get a component instance by the TypeId of its concrete type.
    pub fn get_component_by_id(&self, type_id: &TypeId) -> Option<Arc<dyn KernelComponent>> {
        self.instances.get(type_id).cloned()
    }

    /// Get a component instance by concrete type T.
    pub fn get_concrete<T: KernelComponent + 'static>(&self) -> Option<Arc<T>> {
        self.instances
            .get(&TypeId::of::<T>())
            .and_then(|arc_kc| {
                // KernelComponent: Any, so the trait object can be downcast
                let arc_any: Arc<dyn Any + Send + Sync> = arc_kc.clone();
                Arc::downcast::<T>(arc_any).ok()
            })
    }

    /// Number of registered components
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
