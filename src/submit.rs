//! Injected host interfaces
//!
//! The form never talks to a backend itself; the hosting page supplies a
//! [`SubmitHandler`] and the normalized payload leaves through it. Image
//! resolution is likewise delegated to the host through [`ImageResolver`].

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use thiserror::Error;

use crate::types::ListingPayload;

/// Failure reported by the submission collaborator. Rendered as a single
/// top-level banner; the form stays editable for a manual retry.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct SubmitError {
    message: String,
}

impl SubmitError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type SubmitFuture = Pin<Box<dyn Future<Output = Result<(), SubmitError>>>>;

/// Caller-supplied asynchronous submission callback.
///
/// Cloneable and compared by pointer identity so it can travel through
/// component props without forcing re-renders.
#[derive(Clone)]
pub struct SubmitHandler(Rc<dyn Fn(ListingPayload) -> SubmitFuture>);

impl SubmitHandler {
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(ListingPayload) -> Fut + 'static,
        Fut: Future<Output = Result<(), SubmitError>> + 'static,
    {
        Self(Rc::new(move |payload| Box::pin(handler(payload))))
    }

    pub fn call(&self, payload: ListingPayload) -> SubmitFuture {
        (self.0)(payload)
    }
}

impl PartialEq for SubmitHandler {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SubmitHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SubmitHandler")
    }
}

/// Host-supplied resolver turning selected file names into displayable
/// image references (blob URLs, uploaded asset URLs, and so on).
///
/// Cloneable and compared by pointer identity, like [`SubmitHandler`].
#[derive(Clone)]
pub struct ImageResolver(Rc<dyn Fn(Vec<String>) -> Vec<String>>);

impl ImageResolver {
    pub fn new<F>(resolver: F) -> Self
    where
        F: Fn(Vec<String>) -> Vec<String> + 'static,
    {
        Self(Rc::new(resolver))
    }

    /// Identity resolver for hosts that accept raw file names.
    pub fn passthrough() -> Self {
        Self::new(|names| names)
    }

    pub fn resolve(&self, names: Vec<String>) -> Vec<String> {
        (self.0)(names)
    }
}

impl PartialEq for ImageResolver {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ImageResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ImageResolver")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_resolver_maps_file_names_to_references() {
        let resolver = ImageResolver::new(|names| {
            names
                .into_iter()
                .map(|name| format!("blob:{name}"))
                .collect()
        });
        assert_eq!(
            resolver.resolve(vec!["a.png".to_string(), "b.jpg".to_string()]),
            vec!["blob:a.png".to_string(), "blob:b.jpg".to_string()]
        );
    }

    #[test]
    fn test_passthrough_resolver_keeps_names() {
        let resolver = ImageResolver::passthrough();
        let names = vec!["photo.png".to_string()];
        assert_eq!(resolver.resolve(names.clone()), names);
    }

    #[test]
    fn test_resolver_compares_by_identity() {
        let resolver = ImageResolver::passthrough();
        assert_eq!(resolver, resolver.clone());
        assert_ne!(resolver, ImageResolver::passthrough());
    }
}
