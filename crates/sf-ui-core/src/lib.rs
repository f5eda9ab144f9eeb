//! Storefront page behaviors, independent of the browser.
//!
//! [`Storefront`] bundles a [`Dom`] handle with the page configuration. Each
//! concern adds its methods in its own module.

pub mod admin;
pub mod behaviors;
pub mod config;
pub mod dom;
pub mod error;
pub mod forms;
pub mod navigation;
pub mod notify;
pub mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

use std::rc::Rc;

pub use config::StorefrontConfig;
pub use dom::Dom;
pub use error::{AdminError, DomError, FileRejection, NavigationError, TransportError};
pub use transport::{Reply, Transport};

#[derive(Clone)]
pub struct Storefront<D: Dom> {
    dom: D,
    config: Rc<StorefrontConfig>,
}

impl<D: Dom> Storefront<D> {
    pub fn new(dom: D, config: StorefrontConfig) -> Self {
        Self {
            dom,
            config: Rc::new(config),
        }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }
}
