//! Test doubles shared by the unit tests.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::Document;
use crate::errors::TransportError;
use crate::interfaces::{Method, Remote};
use crate::types::{Request, Response};

/// A request as seen by the stub remote.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: BTreeMap<String, String>,
    pub body: Option<Vec<u8>>,
}

impl Recorded {
    pub fn body_json(&self) -> Value {
        serde_json::from_slice(self.body.as_deref().unwrap_or_default()).unwrap()
    }
}

/// Remote answering from canned responses keyed by method and path.
///
/// Queued responses are served in order; the last one repeats.
#[derive(Default)]
pub struct StubRemote {
    routes: Mutex<HashMap<(Method, String), VecDeque<Response>>>,
    requests: Mutex<Vec<Recorded>>,
}

impl StubRemote {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on(&self, method: Method, path: &str, response: Response) {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

#[async_trait]
impl Remote for StubRemote {
    async fn execute(&self, method: Method, request: Request) -> Result<Response, TransportError> {
        let path = request.path().to_string();
        self.requests.lock().unwrap().push(Recorded {
            method,
            path: path.clone(),
            query: request.query().clone(),
            body: request.body().map(<[u8]>::to_vec),
        });

        let mut routes = self.routes.lock().unwrap();
        let queue = routes
            .get_mut(&(method, path.clone()))
            .ok_or_else(|| TransportError::connection(format!("no route for {method} {path}")))?;
        let response = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        response.ok_or_else(|| TransportError::connection("empty route"))
    }
}

pub fn json_response(status: u16, value: Value) -> Response {
    Response::new(status, Some(serde_json::to_vec(&value).unwrap()))
}

pub fn ok(value: Value) -> Response {
    json_response(200, value)
}

pub fn accepted(value: Value) -> Response {
    json_response(202, value)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub poster: String,
    pub overview: String,
    pub release_date: i64,
}

impl Document for Movie {
    const INDEX: &'static str = "movies";
    const PRIMARY_KEY: &'static str = "id";
}

pub fn movies() -> Vec<Movie> {
    vec![
        Movie {
            id: "287947".to_string(),
            title: "Carol".to_string(),
            poster: "https://image.tmdb.org/t/p/w1280/carol.jpg".to_string(),
            overview: "In 1950s New York, a department-store clerk falls for an older woman."
                .to_string(),
            release_date: 1_448_928_000,
        },
        Movie {
            id: "299537".to_string(),
            title: "Captain Marvel".to_string(),
            poster: "https://image.tmdb.org/t/p/w1280/marvel.jpg".to_string(),
            overview: "The story follows Carol Danvers as she becomes one of the universe's most extraordinary heroes."
                .to_string(),
            release_date: 1_551_830_400,
        },
        Movie {
            id: "522681".to_string(),
            title: "Escape Room".to_string(),
            poster: "https://image.tmdb.org/t/p/w1280/escape.jpg".to_string(),
            overview: "Six strangers find themselves in circumstances beyond their control."
                .to_string(),
            release_date: 1_546_473_600,
        },
    ]
}
