use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use async_trait::async_trait;
use reqwest::StatusCode;
use shared::{Book, BookId, BookPayload, BookStatus, Genre};
use tokio::sync::{broadcast, Mutex};

use crate::{
    controller::ClientEvent,
    error::{ClientError, FetchError},
    transport::BookApi,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    List,
    Get(BookId),
    Create(BookPayload),
    Update(BookId, BookPayload),
    Delete(BookId),
}

/// In-memory collection resource that records every call.
#[derive(Default)]
pub(crate) struct FakeApi {
    books: Mutex<Vec<Book>>,
    calls: Mutex<Vec<Call>>,
    next_id: AtomicU64,
    failing: Mutex<Vec<&'static str>>,
}

impl FakeApi {
    pub(crate) fn with_books(books: Vec<Book>) -> Arc<Self> {
        Arc::new(Self {
            books: Mutex::new(books),
            next_id: AtomicU64::new(100),
            ..Self::default()
        })
    }

    /// Makes every call to `method` ("list", "get", ...) answer HTTP 500.
    pub(crate) async fn fail(&self, method: &'static str) {
        self.failing.lock().await.push(method);
    }

    pub(crate) async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    pub(crate) async fn deletes(&self) -> Vec<BookId> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|call| match call {
                Call::Delete(id) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    async fn record(&self, method: &'static str, call: Call) -> Result<(), ClientError> {
        self.calls.lock().await.push(call);
        if self.failing.lock().await.contains(&method) {
            return Err(FetchError::status(
                "TEST",
                format!("fake://books/{method}"),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl BookApi for FakeApi {
    async fn list(&self) -> Result<Vec<Book>, ClientError> {
        self.record("list", Call::List).await?;
        Ok(self.books.lock().await.clone())
    }

    async fn get(&self, id: &BookId) -> Result<Book, ClientError> {
        self.record("get", Call::Get(id.clone())).await?;
        self.books
            .lock()
            .await
            .iter()
            .find(|book| &book.id == id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound { id: id.clone() })
    }

    async fn create(&self, payload: &BookPayload) -> Result<Book, ClientError> {
        self.record("create", Call::Create(payload.clone())).await?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let book = payload.clone().with_id(BookId::new(format!("srv-{id}")));
        self.books.lock().await.push(book.clone());
        Ok(book)
    }

    async fn update(&self, id: &BookId, payload: &BookPayload) -> Result<Book, ClientError> {
        self.record("update", Call::Update(id.clone(), payload.clone()))
            .await?;
        let mut books = self.books.lock().await;
        let slot = books
            .iter_mut()
            .find(|book| &book.id == id)
            .ok_or_else(|| ClientError::NotFound { id: id.clone() })?;
        *slot = payload.clone().with_id(id.clone());
        Ok(slot.clone())
    }

    async fn delete(&self, id: &BookId) -> Result<(), ClientError> {
        self.record("delete", Call::Delete(id.clone())).await?;
        self.books.lock().await.retain(|book| &book.id != id);
        Ok(())
    }
}

pub(crate) fn book(id: &str, title: &str, author: &str, genre: Genre, year: &str, status: BookStatus) -> Book {
    Book {
        id: BookId::new(id),
        title: title.to_string(),
        author: author.to_string(),
        genre,
        year: year.to_string(),
        status,
    }
}

pub(crate) fn dune() -> Book {
    book("1", "Dune", "Herbert", Genre::SciFi, "1965", BookStatus::Available)
}

pub(crate) fn emma() -> Book {
    book("2", "Emma", "Austen", Genre::Romance, "1815", BookStatus::Issued)
}

/// Drains every event published so far.
pub(crate) fn drain(rx: &mut broadcast::Receiver<ClientEvent>) -> Vec<ClientEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
