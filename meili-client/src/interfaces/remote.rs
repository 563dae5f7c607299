//! Remote (transport) trait definition.
//!
//! This module defines the abstract interface for carrying a [`Request`] to
//! the server and bringing back its [`Response`].

use std::fmt;

use async_trait::async_trait;

use crate::errors::TransportError;
use crate::types::{Request, Response};

/// HTTP methods used by the Meilisearch REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// The method name as sent on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Abstract interface for communicating with a Meilisearch server.
///
/// Implementations handle the mechanics of the exchange (connection pooling,
/// TLS, authentication headers) while this trait exposes one call per request.
/// The verb-specific methods are `execute` pinned to a method.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`: a single remote is shared by
/// every index and update handed out by a [`Client`](crate::Client) and may
/// be called concurrently. Implementations must not keep request bodies past
/// the call.
///
/// # Error Handling
///
/// Network failures are reported as [`TransportError`]. Any status the server
/// answers with, including 4xx and 5xx, is a successful exchange and comes
/// back as a [`Response`].
#[async_trait]
pub trait Remote: Send + Sync {
    /// Execute the request with the given method.
    async fn execute(&self, method: Method, request: Request) -> Result<Response, TransportError>;

    /// Perform a GET on the given resource.
    async fn get(&self, request: Request) -> Result<Response, TransportError> {
        self.execute(Method::Get, request).await
    }

    /// Perform a POST on the given resource.
    async fn post(&self, request: Request) -> Result<Response, TransportError> {
        self.execute(Method::Post, request).await
    }

    /// Perform a PUT on the given resource.
    async fn put(&self, request: Request) -> Result<Response, TransportError> {
        self.execute(Method::Put, request).await
    }

    /// Perform a DELETE on the given resource.
    async fn delete(&self, request: Request) -> Result<Response, TransportError> {
        self.execute(Method::Delete, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingRemote {
        calls: Mutex<Vec<(Method, String)>>,
    }

    #[async_trait]
    impl Remote for RecordingRemote {
        async fn execute(
            &self,
            method: Method,
            request: Request,
        ) -> Result<Response, TransportError> {
            self.calls
                .lock()
                .unwrap()
                .push((method, request.path().to_string()));
            Ok(Response::empty(200))
        }
    }

    #[tokio::test]
    async fn test_verb_methods_delegate_to_execute() {
        let remote = RecordingRemote {
            calls: Mutex::new(Vec::new()),
        };

        remote.get(Request::new("/a")).await.unwrap();
        remote.post(Request::new("/b")).await.unwrap();
        remote.put(Request::new("/c")).await.unwrap();
        remote.delete(Request::new("/d")).await.unwrap();

        let calls = remote.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![
                (Method::Get, "/a".to_string()),
                (Method::Post, "/b".to_string()),
                (Method::Put, "/c".to_string()),
                (Method::Delete, "/d".to_string()),
            ]
        );
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Delete.to_string(), "DELETE");
        assert_eq!(Method::Get.as_str(), "GET");
    }
}
