//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{BooksCommand, BooksQuery, LendingCommand, UsersCommand, UsersQuery};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub books: Arc<dyn BooksCommand>,
    pub books_query: Arc<dyn BooksQuery>,
    pub lending: Arc<dyn LendingCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub books: Arc<dyn BooksCommand>,
    pub books_query: Arc<dyn BooksQuery>,
    pub lending: Arc<dyn LendingCommand>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            users,
            users_query,
            books,
            books_query,
            lending,
        } = ports;
        Self {
            users,
            users_query,
            books,
            books_query,
            lending,
        }
    }

    /// Construct state where one service implements every driving port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use library_backend::domain::LibraryService;
    /// use library_backend::inbound::http::state::HttpState;
    /// use library_backend::outbound::memory::{InMemoryBookRepository, InMemoryUserRepository};
    ///
    /// let service = LibraryService::new(
    ///     Arc::new(InMemoryUserRepository::new()),
    ///     Arc::new(InMemoryBookRepository::new()),
    /// );
    /// let _state = HttpState::from_service(Arc::new(service));
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: UsersCommand + UsersQuery + BooksCommand + BooksQuery + LendingCommand + 'static,
    {
        Self::new(HttpStatePorts {
            users: service.clone(),
            users_query: service.clone(),
            books: service.clone(),
            books_query: service.clone(),
            lending: service,
        })
    }
}
