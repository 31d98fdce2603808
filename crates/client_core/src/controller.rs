//! Mutation-sync controller: every remote call goes through here, and only
//! this controller invalidates the collection cache.

use std::{fmt, sync::Arc};

use shared::{Book, BookDraft, BookId, BookPayload};
use tokio::{sync::broadcast, task::JoinHandle};
use tracing::{info, warn};

use crate::{
    cache::{QueryCache, QueryKey},
    error::ClientError,
    transport::BookApi,
};

const EVENT_CAPACITY: usize = 256;

pub type BookCache = QueryCache<QueryKey, Arc<Vec<Book>>>;

/// A spawned mutation. The outcome is also reported as a notification, so
/// awaiting it is optional.
pub type MutationTask = JoinHandle<Result<(), ClientError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    NewBook,
    EditBook(BookId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::NewBook => "/book".to_string(),
            Route::EditBook(id) => format!("/book/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    Notification(Notification),
    Navigate(Route),
}

/// Where a delete was confirmed; selects the failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOrigin {
    Table,
    Form,
}

pub struct MutationSync {
    api: Arc<dyn BookApi>,
    cache: BookCache,
    events: broadcast::Sender<ClientEvent>,
}

impl MutationSync {
    pub fn new(api: Arc<dyn BookApi>) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Arc::new(Self {
            api,
            cache: QueryCache::new(),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    pub fn cache(&self) -> &BookCache {
        &self.cache
    }

    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) {
        let _ = self.events.send(ClientEvent::Notification(Notification {
            kind,
            message: message.into(),
        }));
    }

    pub fn navigate(&self, route: Route) {
        let _ = self.events.send(ClientEvent::Navigate(route));
    }

    /// The book collection, re-fetched when the cache is stale.
    pub async fn list(&self) -> Result<Arc<Vec<Book>>, ClientError> {
        self.cache
            .read(QueryKey::Books, || async {
                let books = self.api.list().await.map_err(|error| {
                    warn!(%error, "failed to fetch books");
                    error
                })?;
                info!(count = books.len(), "fetched books");
                Ok::<_, ClientError>(Arc::new(books))
            })
            .await
    }

    pub async fn get(&self, id: &BookId) -> Result<Book, ClientError> {
        self.api.get(id).await.map_err(|error| {
            warn!(%id, %error, "failed to fetch book");
            error
        })
    }

    /// Validates `draft` and creates the book. Validation failures never reach
    /// the remote side and raise no notification.
    pub async fn create(&self, draft: &BookDraft) -> Result<Book, ClientError> {
        let payload = draft.validate()?;
        self.create_payload(&payload).await
    }

    pub async fn update(&self, id: &BookId, draft: &BookDraft) -> Result<Book, ClientError> {
        let payload = draft.validate()?;
        self.update_payload(id, &payload).await
    }

    pub async fn delete(&self, id: &BookId, origin: DeleteOrigin) -> Result<(), ClientError> {
        match self.api.delete(id).await {
            Ok(()) => {
                info!(%id, "book deleted");
                self.cache.invalidate(QueryKey::Books).await;
                self.notify(NotificationKind::Success, "Book deleted successfully!");
                Ok(())
            }
            Err(error) => {
                warn!(%id, %error, ?origin, "failed to delete book");
                let message = match origin {
                    DeleteOrigin::Table => "Can't delete right now!",
                    DeleteOrigin::Form => "Error in deleting book!",
                };
                self.notify(NotificationKind::Error, message);
                Err(error)
            }
        }
    }

    pub(crate) async fn create_payload(&self, payload: &BookPayload) -> Result<Book, ClientError> {
        match self.api.create(payload).await {
            Ok(book) => {
                info!(id = %book.id, title = %book.title, "book created");
                self.cache.invalidate(QueryKey::Books).await;
                self.notify(NotificationKind::Success, "Book added successfully!");
                Ok(book)
            }
            Err(error) => {
                warn!(%error, "failed to create book");
                self.notify(NotificationKind::Error, "Error in adding book!");
                Err(error)
            }
        }
    }

    pub(crate) async fn update_payload(
        &self,
        id: &BookId,
        payload: &BookPayload,
    ) -> Result<Book, ClientError> {
        match self.api.update(id, payload).await {
            Ok(book) => {
                info!(%id, "book updated");
                self.cache.invalidate(QueryKey::Books).await;
                self.notify(NotificationKind::Success, "Book updated successfully!");
                Ok(book)
            }
            Err(error) => {
                warn!(%id, %error, "failed to update book");
                self.notify(NotificationKind::Error, "Error in updating book!");
                Err(error)
            }
        }
    }

    pub(crate) fn spawn_create(self: &Arc<Self>, payload: BookPayload) -> MutationTask {
        let sync = Arc::clone(self);
        tokio::spawn(async move { sync.create_payload(&payload).await.map(drop) })
    }

    pub(crate) fn spawn_update(self: &Arc<Self>, id: BookId, payload: BookPayload) -> MutationTask {
        let sync = Arc::clone(self);
        tokio::spawn(async move { sync.update_payload(&id, &payload).await.map(drop) })
    }

    pub(crate) fn spawn_delete(self: &Arc<Self>, id: BookId, origin: DeleteOrigin) -> MutationTask {
        let sync = Arc::clone(self);
        tokio::spawn(async move { sync.delete(&id, origin).await })
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
