use crate::error::{CatalogError, Result};

/// What a single link decided to do with a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow<O> {
    Handled(O),
    Forward,
}

/// Result of running a request through a whole [`Chain`].
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch<O> {
    Handled { by: String, output: O },
    Unhandled,
}

impl<O> Dispatch<O> {
    pub fn is_handled(&self) -> bool {
        matches!(self, Dispatch::Handled { .. })
    }

    pub fn handled_by(&self) -> Option<&str> {
        match self {
            Dispatch::Handled { by, .. } => Some(by),
            Dispatch::Unhandled => None,
        }
    }

    /// Converts the unhandled terminal into [`CatalogError::Unhandled`].
    pub fn into_result(self, request: impl Into<String>) -> Result<(String, O)> {
        match self {
            Dispatch::Handled { by, output } => Ok((by, output)),
            Dispatch::Unhandled => Err(CatalogError::unhandled(request)),
        }
    }
}

/// One link of a chain. A link may mutate the request before forwarding it.
pub trait Handler<R, O> {
    fn name(&self) -> &str;
    fn handle(&mut self, request: &mut R) -> Flow<O>;
}

/// Ordered sequence of handlers. Dispatch stops at the first link that handles the
/// request; running off the end yields [`Dispatch::Unhandled`].
pub struct Chain<R, O> {
    links: Vec<Box<dyn Handler<R, O>>>,
}

impl<R, O> Default for Chain<R, O> {
    fn default() -> Self {
        Self { links: Vec::new() }
    }
}

impl<R, O> Chain<R, O> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link(mut self, handler: impl Handler<R, O> + 'static) -> Self {
        self.links.push(Box::new(handler));
        self
    }

    pub fn push(&mut self, handler: Box<dyn Handler<R, O>>) {
        self.links.push(handler);
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.links.iter().map(|l| l.name()).collect()
    }

    pub fn dispatch(&mut self, request: &mut R) -> Dispatch<O> {
        for link in self.links.iter_mut() {
            match link.handle(request) {
                Flow::Handled(output) => {
                    tracing::debug!(link = link.name(), "request handled");
                    return Dispatch::Handled {
                        by: link.name().to_string(),
                        output,
                    };
                }
                Flow::Forward => {
                    tracing::trace!(link = link.name(), "request forwarded");
                }
            }
        }
        tracing::debug!(links = self.links.len(), "request fell off the end of the chain");
        Dispatch::Unhandled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Threshold {
        name: String,
        limit: u32,
    }

    impl Handler<u32, String> for Threshold {
        fn name(&self) -> &str {
            &self.name
        }

        fn handle(&mut self, request: &mut u32) -> Flow<String> {
            if *request <= self.limit {
                Flow::Handled(format!("{} took {}", self.name, request))
            } else {
                Flow::Forward
            }
        }
    }

    fn threshold(name: &str, limit: u32) -> Threshold {
        Threshold {
            name: name.to_string(),
            limit,
        }
    }

    #[test]
    fn test_first_matching_link_wins() {
        let mut chain = Chain::new()
            .link(threshold("small", 10))
            .link(threshold("large", 100));

        let outcome = chain.dispatch(&mut 50);
        assert_eq!(outcome.handled_by(), Some("large"));
        assert_eq!(chain.names(), vec!["small", "large"]);
    }

    #[test]
    fn test_exhausted_chain_is_unhandled() {
        let mut chain = Chain::new().link(threshold("small", 10));
        let outcome = chain.dispatch(&mut 500);
        assert_eq!(outcome, Dispatch::Unhandled);
        assert!(matches!(
            outcome.into_result("500"),
            Err(CatalogError::Unhandled { request }) if request == "500"
        ));
    }

    #[test]
    fn test_empty_chain_is_unhandled() {
        let mut chain: Chain<u32, String> = Chain::new();
        assert!(chain.is_empty());
        assert!(!chain.dispatch(&mut 1).is_handled());
    }
}
