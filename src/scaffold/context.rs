/// Holds exactly one active variant and hands out access to it.
///
/// Swapping is wholesale: [`Context::replace`] returns the previous variant so the
/// caller decides whether to keep or drop it.
pub struct Context<C: ?Sized> {
    active: Box<C>,
    swaps: usize,
}

impl<C: ?Sized> Context<C> {
    pub fn new(active: Box<C>) -> Self {
        Self { active, swaps: 0 }
    }

    pub fn replace(&mut self, next: Box<C>) -> Box<C> {
        self.swaps += 1;
        std::mem::replace(&mut self.active, next)
    }

    pub fn active(&self) -> &C {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut C {
        &mut self.active
    }

    /// Runs `f` against the active variant.
    pub fn delegate<R>(&mut self, f: impl FnOnce(&mut C) -> R) -> R {
        f(&mut self.active)
    }

    /// Number of times the active variant has been replaced.
    pub fn swaps(&self) -> usize {
        self.swaps
    }
}

impl<C: ?Sized + std::fmt::Debug> std::fmt::Debug for Context<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("active", &self.active)
            .field("swaps", &self.swaps)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter {
        fn greet(&self) -> String;
    }

    struct English;
    struct French;

    impl Greeter for English {
        fn greet(&self) -> String {
            "hello".into()
        }
    }

    impl Greeter for French {
        fn greet(&self) -> String {
            "bonjour".into()
        }
    }

    #[test]
    fn test_replace_switches_behaviour() {
        let mut ctx: Context<dyn Greeter> = Context::new(Box::new(English));
        assert_eq!(ctx.active().greet(), "hello");

        let previous = ctx.replace(Box::new(French));
        assert_eq!(previous.greet(), "hello");
        assert_eq!(ctx.delegate(|g| g.greet()), "bonjour");
        assert_eq!(ctx.swaps(), 1);
    }
}
