//! Contract for the host project (repository discovery).

use std::path::Path;
use std::rc::Rc;

use async_trait::async_trait;

use crate::event::Subscription;
use crate::traits::Repository;

/// The host project, which owns repository discovery.
///
/// `repository_for_directory` is asynchronous and offers no cancellation, so
/// a lookup can complete after the caller's world has moved on; callers guard
/// against applying stale results (see
/// [`RepositorySubscription`](crate::subscription::RepositorySubscription)).
#[async_trait(?Send)]
pub trait Project {
    /// Find the repository covering `directory`, if any.
    async fn repository_for_directory(&self, directory: &Path) -> Option<Rc<dyn Repository>>;

    /// The set of project root paths changed.
    fn on_did_change_paths(&self, callback: Box<dyn Fn()>) -> Subscription;
}
