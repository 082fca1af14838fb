//! Pattern: Proxy
//! Example: an image proxy that defers loading until first display, and an
//! nginx-style proxy that rate limits requests before they reach the application

use std::collections::HashMap;

use crate::config::ProxySettings;

// ============================================
// 1. Lazy image
// ============================================

pub trait Image {
    fn display(&mut self) -> String;
}

#[derive(Debug)]
pub struct RealImage {
    file_name: String,
}

impl RealImage {
    pub fn load(file_name: &str) -> Self {
        tracing::info!(file_name, "loading image from disk");
        Self {
            file_name: file_name.to_string(),
        }
    }
}

impl Image for RealImage {
    fn display(&mut self) -> String {
        format!("Displaying {}", self.file_name)
    }
}

#[derive(Debug)]
pub struct ProxyImage {
    file_name: String,
    real: Option<RealImage>,
    loads: usize,
}

impl ProxyImage {
    pub fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            real: None,
            loads: 0,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.real.is_some()
    }

    pub fn loads(&self) -> usize {
        self.loads
    }
}

impl Image for ProxyImage {
    fn display(&mut self) -> String {
        let file_name = &self.file_name;
        let loads = &mut self.loads;
        self.real
            .get_or_insert_with(|| {
                *loads += 1;
                RealImage::load(file_name)
            })
            .display()
    }
}

// ============================================
// 2. Rate-limiting server proxy
// ============================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: &'static str,
}

pub trait Server {
    fn handle_request(&mut self, url: &str, method: &str) -> Response;
}

#[derive(Debug, Default)]
pub struct Application;

impl Server for Application {
    fn handle_request(&mut self, url: &str, method: &str) -> Response {
        match (url, method) {
            ("/app/status", "GET") => Response {
                status: 200,
                body: "Ok",
            },
            ("/create/user", "POST") => Response {
                status: 201,
                body: "User Created",
            },
            _ => Response {
                status: 404,
                body: "Not Ok",
            },
        }
    }
}

/// Allows `max_allowed_requests` calls per URL, then answers 403.
pub struct Nginx<S: Server> {
    application: S,
    max_allowed_requests: u32,
    seen: HashMap<String, u32>,
}

impl Nginx<Application> {
    pub fn new(settings: &ProxySettings) -> Self {
        Self::wrapping(Application, settings)
    }
}

impl<S: Server> Nginx<S> {
    pub fn wrapping(application: S, settings: &ProxySettings) -> Self {
        Self {
            application,
            max_allowed_requests: settings.max_allowed_requests,
            seen: HashMap::new(),
        }
    }

    fn check_rate_limit(&mut self, url: &str) -> bool {
        let count = self.seen.entry(url.to_string()).or_insert(0);
        if *count >= self.max_allowed_requests {
            return false;
        }
        *count += 1;
        true
    }

    pub fn requests_seen(&self, url: &str) -> u32 {
        self.seen.get(url).copied().unwrap_or(0)
    }
}

impl<S: Server> Server for Nginx<S> {
    fn handle_request(&mut self, url: &str, method: &str) -> Response {
        if !self.check_rate_limit(url) {
            tracing::warn!(url, method, "rate limit exceeded");
            return Response {
                status: 403,
                body: "Not Allowed",
            };
        }
        self.application.handle_request(url, method)
    }
}
