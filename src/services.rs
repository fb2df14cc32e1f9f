// SPDX-License-Identifier: MIT
//!
//! Minimal service container used by generated bootstrap code
//!
//! Only singletons are supported. Each type has at most one registration;
//! registering a type again replaces the earlier registration.
//!
use crate::error::{HostingError, Result};
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};

type AnyService = Arc<dyn Any + Send + Sync>;
type Factory = Box<dyn Fn(&ServiceProvider) -> Result<AnyService> + Send + Sync>;

/// Type constructed by the container
pub trait FromServices: Sized {
    fn from_services(services: &ServiceProvider) -> Result<Self>;
}

/// User hook registering extra services before the container is finalized
pub trait Startup: Default {
    fn configure_services(&self, services: &mut ServiceCollection);
}

enum Registration {
    Instance(AnyService),
    Factory(Factory),
}

/// Service registrations, finalized with [`ServiceCollection::build`]
#[derive(Default)]
pub struct ServiceCollection {
    // Registration order kept for inspection
    order: Vec<(TypeId, &'static str)>,
    registrations: HashMap<TypeId, Registration>,
}

impl ServiceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&mut self, type_id: TypeId, name: &'static str, registration: Registration) {
        if self.registrations.insert(type_id, registration).is_none() {
            self.order.push((type_id, name));
        }
    }

    /// Register an already constructed singleton
    pub fn add_singleton<T: Send + Sync + 'static>(&mut self, value: T) -> &mut Self {
        self.register(
            TypeId::of::<T>(),
            type_name::<T>(),
            Registration::Instance(Arc::new(value)),
        );
        self
    }

    /// Register a singleton built on first resolution
    pub fn add_singleton_with<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Send + Sync + 'static,
        F: Fn(&ServiceProvider) -> Result<T> + Send + Sync + 'static,
    {
        let factory: Factory = Box::new(move |services: &ServiceProvider| {
            factory(services).map(|v| Arc::new(v) as AnyService)
        });
        self.register(
            TypeId::of::<T>(),
            type_name::<T>(),
            Registration::Factory(factory),
        );
        self
    }

    /// Register a [`FromServices`] type as a singleton
    pub fn add_singleton_from_services<T>(&mut self) -> &mut Self
    where
        T: FromServices + Send + Sync + 'static,
    {
        self.add_singleton_with(T::from_services)
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.registrations.contains_key(&TypeId::of::<T>())
    }

    /// Registered type names, in registration order
    pub fn registrations(&self) -> Vec<&'static str> {
        self.order.iter().map(|(_, name)| *name).collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn build(self) -> ServiceProvider {
        let entries = self
            .registrations
            .into_iter()
            .map(|(type_id, registration)| {
                let entry = match registration {
                    Registration::Instance(value) => Entry {
                        value: Mutex::new(Some(value)),
                        factory: None,
                        building: Mutex::new(None),
                    },
                    Registration::Factory(factory) => Entry {
                        value: Mutex::new(None),
                        factory: Some(factory),
                        building: Mutex::new(None),
                    },
                };
                (type_id, entry)
            })
            .collect();
        ServiceProvider {
            names: self.order.into_iter().map(|(_, name)| name).collect(),
            entries,
        }
    }
}

struct Entry {
    value: Mutex<Option<AnyService>>,
    factory: Option<Factory>,
    // Thread running the factory, re-entry from it is a cycle
    building: Mutex<Option<ThreadId>>,
}

impl Entry {
    fn building(&self) -> std::sync::MutexGuard<'_, Option<ThreadId>> {
        self.building
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Finalized container
pub struct ServiceProvider {
    names: Vec<&'static str>,
    entries: HashMap<TypeId, Entry>,
}

impl ServiceProvider {
    /// Resolve a singleton, constructing it on first use.
    /// None when the type is not registered.
    pub fn get<T: Send + Sync + 'static>(&self) -> Result<Option<Arc<T>>> {
        let Some(entry) = self.entries.get(&TypeId::of::<T>()) else {
            return Ok(None);
        };

        let current = thread::current().id();
        if *entry.building() == Some(current) {
            return Err(HostingError::CircularDependency(type_name::<T>()));
        }

        // Held during construction so concurrent callers share one instance
        let mut slot = entry
            .value
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(value) = slot.as_ref() {
            return Ok(value.clone().downcast::<T>().ok());
        }
        let Some(factory) = entry.factory.as_ref() else {
            return Ok(None);
        };
        *entry.building() = Some(current);
        let built = factory(self);
        *entry.building() = None;
        let value = built?;
        *slot = Some(value.clone());
        Ok(value.downcast::<T>().ok())
    }

    /// Resolve a singleton that must be registered
    pub fn required<T: Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        self.get::<T>()?
            .ok_or_else(|| HostingError::MissingService(type_name::<T>()))
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Number of registrations for a type, 0 or 1
    pub fn registration_count<T: 'static>(&self) -> usize {
        usize::from(self.contains::<T>())
    }

    /// Registered type names, in registration order
    pub fn registrations(&self) -> &[&'static str] {
        &self.names
    }
}

impl std::fmt::Debug for ServiceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceProvider")
            .field("registrations", &self.names)
            .finish()
    }
}
