//! Component registry.

use std::collections::HashMap;

use crate::components::{Callout, Details, Tab, Tabs};
use crate::directive::ComponentArgs;

/// A renderable presentation component.
///
/// Implementations receive the reference's arguments and the already
/// rendered HTML of any nested content, and return the component's HTML.
pub trait PresentationComponent: Send + Sync {
    /// Render the component.
    fn render(&self, args: &ComponentArgs, children: &str) -> String;
}

/// Name-to-component lookup used during evaluation.
///
/// The registry is injected at evaluation time; compiled modules never hold
/// component implementations themselves.
#[derive(Default)]
pub struct ComponentRegistry {
    components: HashMap<String, Box<dyn PresentationComponent>>,
}

impl ComponentRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the built-in components: `callout`,
    /// `details`, `tabs`, and `tab`.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new()
            .with_component("callout", Callout)
            .with_component("details", Details)
            .with_component("tabs", Tabs)
            .with_component("tab", Tab)
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with_component(
        mut self,
        name: impl Into<String>,
        component: impl PresentationComponent + 'static,
    ) -> Self {
        self.register(name, component);
        self
    }

    /// Register a component under `name`, replacing any previous entry.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        component: impl PresentationComponent + 'static,
    ) {
        self.components.insert(name.into(), Box::new(component));
    }

    /// Look up a component by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn PresentationComponent> {
        self.components.get(name).map(Box::as_ref)
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Registered component names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.components.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("components", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    struct Upper;

    impl PresentationComponent for Upper {
        fn render(&self, args: &ComponentArgs, _children: &str) -> String {
            args.content.to_uppercase()
        }
    }

    #[test]
    fn test_register_and_get() {
        let registry = ComponentRegistry::new().with_component("upper", Upper);
        assert!(registry.contains("upper"));
        assert!(!registry.contains("lower"));

        let args = ComponentArgs {
            content: "hi".to_owned(),
            ..ComponentArgs::default()
        };
        let rendered = registry.get("upper").map(|c| c.render(&args, ""));
        assert_eq!(rendered.as_deref(), Some("HI"));
    }

    #[test]
    fn test_defaults_registered() {
        let registry = ComponentRegistry::with_defaults();
        assert_eq!(registry.names(), ["callout", "details", "tab", "tabs"]);
    }

    #[test]
    fn test_register_replaces() {
        struct Fixed;
        impl PresentationComponent for Fixed {
            fn render(&self, _: &ComponentArgs, _: &str) -> String {
                "fixed".to_owned()
            }
        }

        let mut registry = ComponentRegistry::new().with_component("x", Upper);
        registry.register("x", Fixed);
        let rendered = registry
            .get("x")
            .map(|c| c.render(&ComponentArgs::default(), ""));
        assert_eq!(rendered.as_deref(), Some("fixed"));
    }
}
